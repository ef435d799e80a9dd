//! Structural model of a C++ codebase: types, members, methods,
//! parameters, defines, comments and region markers.
//!
//! All models are tree-shaped and exclusively owned by the conversion
//! session. Header-origin models may be enriched (never replaced) by
//! the reconciliation pass with facts discovered in implementation
//! files.

mod comment;
mod define;
mod file;
mod member;
mod method;
mod param;
mod type_model;

pub use comment::{CommentBlock, RegionMarker};
pub use define::DefineModel;
pub use file::{HeaderFileModel, SourceFileModel, StaticInitModel};
pub use member::MemberModel;
pub use method::{MemberInitializer, MethodModel};
pub use param::{CommentPosition, ParameterModel, PositionedComment};
pub use type_model::{TypeKind, TypeModel, Visibility};
