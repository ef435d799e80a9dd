//! C# emission from the reconciled model.
//!
//! Generators are line-oriented string builders: each type renders to
//! one or more complete file contents, with indentation reapplied at
//! fixed nesting levels and captured bodies translated token-wise.

pub mod indent;

mod class_gen;
mod interface_gen;
mod type_map;

pub use class_gen::ClassGenerator;
pub use interface_gen::InterfaceGenerator;
pub use type_map::TypeMap;

use cpp2cs_model::TypeModel;

/// Generate the main C# file for a class or struct.
pub fn generate_class(ty: &TypeModel, header_stem: &str) -> String {
    ClassGenerator::new().generate(ty, header_stem)
}

/// Generate one fragment file of a partial class.
pub fn generate_class_fragment(ty: &TypeModel, target_file: &str) -> String {
    ClassGenerator::new().generate_fragment(ty, target_file)
}

/// Generate the C# file for an interface, including its static
/// companion class when needed.
pub fn generate_interface(ty: &TypeModel) -> String {
    InterfaceGenerator::new().generate(ty)
}
