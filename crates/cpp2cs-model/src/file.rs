use crate::{DefineModel, MethodModel, TypeModel};
use smol_str::SmolStr;

/// An out-of-line `Type::member = value;` static initialization found
/// in an implementation file.
#[derive(Debug, Clone)]
pub struct StaticInitModel {
    pub owner: SmolStr,
    pub member: SmolStr,
    pub value: String,
    pub is_array: bool,
    pub array_size: String,
    pub type_text: SmolStr,
    pub is_const: bool,
    pub order_index: usize,
}

/// Everything extracted from one header file, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct HeaderFileModel {
    pub stem: String,
    pub types: Vec<TypeModel>,
}

/// Everything extracted from one implementation file.
#[derive(Debug, Clone, Default)]
pub struct SourceFileModel {
    pub stem: String,
    /// Comments before the first preprocessor directive.
    pub file_top_comments: Vec<String>,
    pub methods: Vec<MethodModel>,
    pub static_inits: Vec<StaticInitModel>,
    pub defines: Vec<DefineModel>,
    /// Struct definitions embedded in the .cpp file.
    pub structs: Vec<TypeModel>,
}
