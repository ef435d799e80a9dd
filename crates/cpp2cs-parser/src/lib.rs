//! Regex- and line-oriented parsers that turn free-form C++ header and
//! implementation text into the structural model.
//!
//! There is deliberately no grammar here: each construct is matched by
//! a narrowly scoped pattern plus explicit multi-line joining, so a
//! malformed construct is dropped with a warning instead of failing
//! the file.

mod blocks;
mod comments;
mod header;
mod params;
mod source;

pub use blocks::{split_into_blocks, ParamBlock};
pub use comments::{collect_preceding_comments, region_around, CollectedComments, RegionStyle};
pub use header::HeaderParser;
pub use params::{canonical_signature, parse_parameter_list, strip_min_indent};
pub use source::SourceParser;
