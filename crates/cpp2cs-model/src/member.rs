use crate::{CommentBlock, RegionMarker, Visibility};
use smol_str::SmolStr;

/// A data member of a class or struct.
///
/// Built during header (or embedded struct) parsing. The only later
/// mutation is `initializer` gaining a value discovered in an
/// out-of-line static initialization; an initializer already present
/// from the header is never overwritten.
#[derive(Debug, Clone)]
pub struct MemberModel {
    pub type_text: SmolStr,
    pub name: SmolStr,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_const: bool,
    pub is_array: bool,
    /// Size expression inside `[...]`; empty for unsized arrays.
    pub array_size: String,
    pub initializer: Option<String>,
    pub preceding_comments: CommentBlock,
    /// Comment on the declaration line, after the semicolon.
    pub postfix_comment: String,
    pub region: RegionMarker,
    pub order_index: usize,
}

impl MemberModel {
    pub fn new(type_text: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Self {
            type_text: type_text.into(),
            name: name.into(),
            visibility: Visibility::Private,
            is_static: false,
            is_const: false,
            is_array: false,
            array_size: String::new(),
            initializer: None,
            preceding_comments: CommentBlock::default(),
            postfix_comment: String::new(),
            region: RegionMarker::default(),
            order_index: 0,
        }
    }

    /// Adopt an initializer found in a source file unless the header
    /// already supplied one.
    pub fn enrich_initializer(&mut self, value: impl Into<String>) {
        if self.initializer.is_none() {
            self.initializer = Some(value.into());
        }
    }
}
