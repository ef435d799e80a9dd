//! C++ to C# type and value translation.
//!
//! Deliberately conservative: primitive names map through an identity
//! table, everything else is preserved as-is for downstream review.
//! Body translation is a fixed set of token substitutions, not a
//! parser.

use rustc_hash::FxHashMap;

pub struct TypeMap {
    map: FxHashMap<&'static str, &'static str>,
}

impl Default for TypeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeMap {
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        for name in [
            "void", "bool", "char", "short", "int", "long", "float", "double",
        ] {
            map.insert(name, name);
        }
        Self { map }
    }

    /// Map a C++ type name to its C# counterpart. Unknown types,
    /// templates and domain types pass through unchanged.
    pub fn convert_type<'a>(&self, cpp_type: &'a str) -> &'a str {
        let mut ty = cpp_type.trim();
        if let Some(rest) = ty.strip_prefix("const ") {
            ty = rest.trim();
        }
        ty = ty.trim_end_matches(['*', '&', ' ']);
        match self.map.get(ty) {
            Some(mapped) => mapped,
            None => ty,
        }
    }

    /// The literal used for a placeholder `return` of the given type.
    pub fn default_return_value(&self, return_type: &str) -> &'static str {
        match self.convert_type(return_type) {
            "bool" => "false",
            "int" | "long" | "short" | "byte" | "double" | "float" | "agrint" => "0",
            "string" | "CString" => "string.Empty",
            _ => "default",
        }
    }

    /// Token-level body translation: `_T` macros, member access,
    /// scope resolution and the classic Win32 literals.
    pub fn convert_body(&self, body: &str) -> String {
        body.replace("_T(\"", "\"")
            .replace("_T('", "'")
            .replace("->", ".")
            .replace("::", ".")
            .replace("NULL", "null")
            .replace("TRUE", "true")
            .replace("FALSE", "false")
            .trim_matches('\n')
            .to_string()
    }

    /// Translate a single initialization value.
    pub fn convert_value(&self, value: &str) -> String {
        let v = value.trim();
        if v.is_empty() {
            return "default".to_string();
        }
        if v.eq_ignore_ascii_case("null") || v == "nullptr" || v == "NULL" {
            return "null".to_string();
        }
        if v == "TRUE" {
            return "true".to_string();
        }
        if v == "FALSE" {
            return "false".to_string();
        }
        if let Some(rest) = v.strip_prefix("_T(") {
            if let Some(inner) = rest.strip_suffix(')') {
                return inner.to_string();
            }
        }
        v.to_string()
    }
}
