use crate::{CommentBlock, DefineModel, MemberModel, MethodModel};
use smol_str::SmolStr;

/// C++ access specifier, carried through to the generated C#.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Private,
    Protected,
    Public,
}

impl Visibility {
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    /// A class with at least one pure-virtual declaration.
    Interface,
}

/// A class, struct or interface assembled from one header (plus any
/// embedded struct definitions found in implementation files).
#[derive(Debug, Clone)]
pub struct TypeModel {
    pub name: SmolStr,
    pub kind: TypeKind,
    /// `__declspec(dllexport)` on the declaration; exported types render
    /// public, everything else internal. Structs are never exported.
    pub is_exported: bool,
    pub bases: Vec<SmolStr>,
    pub members: Vec<MemberModel>,
    pub methods: Vec<MethodModel>,
    pub preceding_comments: CommentBlock,
    /// Defines attributed to this type, split by origin so header
    /// constants render before source constants.
    pub header_defines: Vec<DefineModel>,
    pub source_defines: Vec<DefineModel>,
}

impl TypeModel {
    pub fn new(name: impl Into<SmolStr>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_exported: false,
            bases: Vec::new(),
            members: Vec::new(),
            methods: Vec::new(),
            preceding_comments: CommentBlock::default(),
            header_defines: Vec::new(),
            source_defines: Vec::new(),
        }
    }

    /// Section visibility in effect when the type body opens, before
    /// any access-specifier label.
    pub fn default_visibility(&self) -> Visibility {
        match self.kind {
            TypeKind::Interface => Visibility::Public,
            TypeKind::Struct => Visibility::Public,
            TypeKind::Class => Visibility::Private,
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Distinct generated files this type's methods resolve to.
    pub fn target_files(&self) -> Vec<String> {
        let mut files: Vec<String> = Vec::new();
        for m in &self.methods {
            if let Some(t) = &m.target_file {
                if !files.iter().any(|f| f == t) {
                    files.push(t.clone());
                }
            }
        }
        files
    }

    /// A type needs partial generation exactly when its methods resolve
    /// to two or more distinct target files.
    pub fn needs_partial(&self) -> bool {
        self.target_files().len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_flag_requires_two_target_files() {
        let mut ty = TypeModel::new("CSample", TypeKind::Class);
        let mut a = MethodModel::new("A");
        a.target_file = Some("CSample".to_string());
        let mut b = MethodModel::new("B");
        b.target_file = Some("CSample".to_string());
        ty.methods = vec![a, b];
        assert!(!ty.needs_partial());

        ty.methods[1].target_file = Some("CSample_Part2".to_string());
        assert!(ty.needs_partial());
    }

    #[test]
    fn default_visibility_follows_kind() {
        assert_eq!(
            TypeModel::new("I", TypeKind::Interface).default_visibility(),
            Visibility::Public
        );
        assert_eq!(
            TypeModel::new("C", TypeKind::Class).default_visibility(),
            Visibility::Private
        );
    }
}
