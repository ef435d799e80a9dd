use crate::{CommentBlock, ParameterModel, RegionMarker, Visibility};
use smol_str::SmolStr;

/// One entry of a constructor's member-initializer list, `name(value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInitializer {
    pub member: SmolStr,
    pub value: String,
}

/// A method declaration or implementation.
///
/// Created once per file scan. A header-origin instance may later be
/// enriched with the target file and body found by reconciliation; a
/// source-origin instance with no header counterpart is retained as a
/// local method.
#[derive(Debug, Clone)]
pub struct MethodModel {
    pub name: SmolStr,
    pub return_type: SmolStr,
    pub params: Vec<ParameterModel>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_const: bool,
    pub is_pure_virtual: bool,
    pub is_constructor: bool,
    pub is_destructor: bool,
    /// Free function without a `Owner::` scope qualifier.
    pub is_local: bool,
    pub initializer_list: Vec<MemberInitializer>,
    /// Body found inside the header declaration, min-indent-stripped.
    pub inline_body: Option<String>,
    /// Body found in an implementation file, min-indent-stripped.
    pub impl_body: Option<String>,
    /// Indentation baseline of `impl_body` as written.
    pub impl_indent: usize,
    /// Name of the owning type; empty for file-local functions before
    /// attribution.
    pub owner: SmolStr,
    /// Generated file (stem, no extension) this method's code belongs
    /// in. `None` until reconciliation resolves it; inline methods get
    /// the header stem at parse time.
    pub target_file: Option<String>,
    pub order_index: usize,
    pub header_comments: CommentBlock,
    pub source_comments: CommentBlock,
    pub header_region: RegionMarker,
    pub source_region: RegionMarker,
}

impl MethodModel {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            return_type: SmolStr::new("void"),
            params: Vec::new(),
            visibility: Visibility::Private,
            is_static: false,
            is_virtual: false,
            is_const: false,
            is_pure_virtual: false,
            is_constructor: false,
            is_destructor: false,
            is_local: false,
            initializer_list: Vec::new(),
            inline_body: None,
            impl_body: None,
            impl_indent: 0,
            owner: SmolStr::default(),
            target_file: None,
            order_index: 0,
            header_comments: CommentBlock::default(),
            source_comments: CommentBlock::default(),
            header_region: RegionMarker::default(),
            source_region: RegionMarker::default(),
        }
    }

    pub fn has_inline_body(&self) -> bool {
        self.inline_body.is_some()
    }

    /// True once either an inline or out-of-line body is known.
    pub fn has_body(&self) -> bool {
        self.inline_body.is_some() || self.impl_body.is_some()
    }

    /// Canonical parameter-type key list used for overload matching.
    pub fn canonical_params(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.canonical.as_str()).collect()
    }

    /// Copy implementation facts from a source-origin counterpart onto
    /// this header-origin model. Header-authoritative fields (defaults,
    /// visibility, virtual/static flags) are kept; per-parameter names
    /// follow the implementation while defaults follow the header, per
    /// position.
    pub fn enrich_from_impl(&mut self, found: &MethodModel) {
        self.target_file = found.target_file.clone();
        self.impl_body = found.impl_body.clone();
        self.impl_indent = found.impl_indent;
        self.order_index = found.order_index;
        if self.source_comments.is_empty() {
            self.source_comments = found.source_comments.clone();
        }
        if self.source_region.is_empty() {
            self.source_region = found.source_region.clone();
        }
        if self.initializer_list.is_empty() {
            self.initializer_list = found.initializer_list.clone();
        }

        for (i, theirs) in found.params.iter().enumerate() {
            let Some(ours) = self.params.get_mut(i) else {
                self.params.push(theirs.clone());
                continue;
            };
            if !theirs.name.is_empty() {
                ours.name = theirs.name.clone();
            }
            // Implementation comments win for methods with a body.
            if theirs.has_comments() {
                ours.comments = theirs.comments.clone();
                ours.original_text = theirs.original_text.clone();
            }
            ours.starts_on_new_line = theirs.starts_on_new_line;
            ours.leading_indent = theirs.leading_indent;
        }
    }
}
