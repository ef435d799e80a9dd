mod diagnostic;
mod source;
mod text;

pub use diagnostic::ConvertError;
pub use source::{FileKind, SourceFile, SourceId, SourceMap};
pub use text::{leading_indent_width, normalize_line_endings, split_lines};
