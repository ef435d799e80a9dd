use smol_str::SmolStr;

/// Where a comment sits relative to a parameter's type/name text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPosition {
    Prefix,
    Suffix,
}

/// A comment attached to a single parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedComment {
    pub text: String,
    pub position: CommentPosition,
}

impl PositionedComment {
    pub fn prefix(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: CommentPosition::Prefix,
        }
    }

    pub fn suffix(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: CommentPosition::Suffix,
        }
    }

    pub fn is_line_style(&self) -> bool {
        self.text.trim_start().starts_with("//")
    }
}

/// A single method parameter.
#[derive(Debug, Clone, Default)]
pub struct ParameterModel {
    /// Base type with modifiers stripped, e.g. `TAttId` for `const TAttId&`.
    pub base_type: SmolStr,
    /// Empty for unnamed declaration-only parameters.
    pub name: SmolStr,
    pub is_const: bool,
    pub is_pointer: bool,
    pub is_reference: bool,
    pub default_value: Option<String>,
    pub comments: Vec<PositionedComment>,
    /// Normalized type key used for cross-file matching: `const` first,
    /// `*`/`&` last, single spaces. Raw signatures vary arbitrarily in
    /// whitespace and const placement between header and implementation;
    /// this string does not.
    pub canonical: String,
    /// Layout metadata from the original parameter list.
    pub starts_on_new_line: bool,
    pub leading_indent: usize,
    /// Type + name as written, without comments or default.
    pub original_text: String,
}

impl ParameterModel {
    pub fn has_comments(&self) -> bool {
        !self.comments.is_empty()
    }

    pub fn prefix_comments(&self) -> impl Iterator<Item = &PositionedComment> {
        self.comments
            .iter()
            .filter(|c| c.position == CommentPosition::Prefix)
    }

    pub fn suffix_comments(&self) -> impl Iterator<Item = &PositionedComment> {
        self.comments
            .iter()
            .filter(|c| c.position == CommentPosition::Suffix)
    }
}
