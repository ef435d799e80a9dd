/// A block of comment lines collected above a declaration, with the
/// indentation baseline of the first line so it can be re-indented to
/// the target nesting depth.
#[derive(Debug, Clone, Default)]
pub struct CommentBlock {
    pub lines: Vec<String>,
    pub indent: usize,
}

impl CommentBlock {
    pub fn new(lines: Vec<String>) -> Self {
        let indent = lines
            .first()
            .map(|l| cpp2cs_common::leading_indent_width(l))
            .unwrap_or(0);
        Self { lines, indent }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A `#pragma region` / `#pragma endregion` pair around a construct.
/// Header-origin markers render as comments in the output; source-origin
/// markers are preserved as C# regions.
#[derive(Debug, Clone, Default)]
pub struct RegionMarker {
    /// Rendered start marker, e.g. `//#region Init` or `#region Init`.
    pub start: String,
    /// Rendered end marker, empty when the region start was unmatched.
    pub end: String,
}

impl RegionMarker {
    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }
}
