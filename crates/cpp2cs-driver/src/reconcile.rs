//! Cross-file reconciliation: binding implementation files back onto
//! the types their headers declared.
//!
//! Matching is positional, never semantic. A method implementation
//! binds to the declaration with the same owner, name and canonical
//! parameter types; when the types disagree the name match still wins,
//! with a warning. Everything file-scoped in a `.cpp` (free functions,
//! defines, file-top comments) attaches to the type that file mostly
//! implements.

use cpp2cs_model::{
    CommentBlock, HeaderFileModel, MemberModel, MethodModel, SourceFileModel, StaticInitModel,
    TypeModel,
};
use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::warn;

/// A type ready for generation, paired with the stem of the header that
/// declared it. The stem names the main output group of a partial
/// class.
pub struct ConvertedType {
    pub model: TypeModel,
    pub header_stem: String,
}

pub fn reconcile(headers: Vec<HeaderFileModel>, sources: Vec<SourceFileModel>) -> Vec<ConvertedType> {
    let mut types: IndexMap<SmolStr, ConvertedType> = IndexMap::new();

    for header in headers {
        for ty in header.types {
            if types.contains_key(&ty.name) {
                warn!(type_name = %ty.name, header = %header.stem, "duplicate type declaration ignored");
                continue;
            }
            types.insert(
                ty.name.clone(),
                ConvertedType {
                    model: ty,
                    header_stem: header.stem.clone(),
                },
            );
        }
    }
    // Structs defined directly in a .cpp have no header; the source
    // file acts as both.
    for src in &sources {
        for st in &src.structs {
            if !types.contains_key(&st.name) {
                types.insert(
                    st.name.clone(),
                    ConvertedType {
                        model: st.clone(),
                        header_stem: src.stem.clone(),
                    },
                );
            }
        }
    }

    for src in &sources {
        for found in &src.methods {
            if found.is_local {
                continue;
            }
            match types.get_mut(found.owner.as_str()) {
                Some(ct) => attach_method(&mut ct.model, found),
                None => warn!(
                    owner = %found.owner,
                    method = %found.name,
                    file = %src.stem,
                    "implementation references an undeclared type"
                ),
            }
        }
        for init in &src.static_inits {
            match types.get_mut(init.owner.as_str()) {
                Some(ct) => apply_static_init(&mut ct.model, init),
                None => warn!(
                    owner = %init.owner,
                    member = %init.member,
                    file = %src.stem,
                    "static initialization references an undeclared type"
                ),
            }
        }

        let locals: Vec<&MethodModel> = src.methods.iter().filter(|m| m.is_local).collect();
        if locals.is_empty() && src.defines.is_empty() && src.file_top_comments.is_empty() {
            continue;
        }
        let Some(host) = host_index(&types, &src.stem) else {
            warn!(file = %src.stem, "no type to attach file-scoped constructs to");
            continue;
        };
        if let Some((_, ct)) = types.get_index_mut(host) {
            for found in locals {
                let mut method = found.clone();
                method.owner = ct.model.name.clone();
                ct.model.methods.push(method);
            }
            for define in &src.defines {
                ct.model.source_defines.push(define.clone());
            }
            if ct.model.preceding_comments.is_empty() && !src.file_top_comments.is_empty() {
                ct.model.preceding_comments = CommentBlock::new(src.file_top_comments.clone());
            }
        }
    }

    types.into_values().collect()
}

/// Bind one implementation onto its declaration, or retain it as a
/// source-only method when the header never mentioned it.
fn attach_method(ty: &mut TypeModel, found: &MethodModel) {
    let candidates: Vec<usize> = ty
        .methods
        .iter()
        .enumerate()
        .filter(|(_, m)| m.name == found.name && m.impl_body.is_none())
        .map(|(i, _)| i)
        .collect();

    if candidates.is_empty() {
        ty.methods.push(found.clone());
        return;
    }

    if let Some(&i) = candidates
        .iter()
        .find(|&&i| ty.methods[i].canonical_params() == found.canonical_params())
    {
        ty.methods[i].enrich_from_impl(found);
        return;
    }

    // No signature-exact declaration. Prefer an arity match before
    // falling back to the first open declaration.
    let pick = candidates
        .iter()
        .copied()
        .find(|&i| ty.methods[i].params.len() == found.params.len())
        .or_else(|| candidates.first().copied());
    if let Some(i) = pick {
        if candidates.len() > 1 {
            warn!(
                type_name = %ty.name,
                method = %found.name,
                "ambiguous overload; binding implementation by arity"
            );
        } else {
            warn!(
                type_name = %ty.name,
                method = %found.name,
                "parameter types differ between declaration and implementation; matched by name"
            );
        }
        ty.methods[i].enrich_from_impl(found);
    }
}

fn apply_static_init(ty: &mut TypeModel, init: &StaticInitModel) {
    if let Some(member) = ty.members.iter_mut().find(|m| m.name == init.member) {
        member.enrich_initializer(init.value.trim());
        return;
    }
    warn!(
        type_name = %ty.name,
        member = %init.member,
        "initialized member is not declared in the header; synthesizing a static field"
    );
    let mut member = MemberModel::new(init.type_text.clone(), init.member.clone());
    member.is_static = true;
    member.is_const = init.is_const;
    member.is_array = init.is_array;
    member.array_size = init.array_size.clone();
    member.initializer = Some(init.value.trim().to_string());
    member.order_index = init.order_index;
    ty.members.push(member);
}

/// The type a source file "belongs" to: the non-interface type with the
/// most implementations in that file, else the type declared by the
/// header of the same stem.
fn host_index(types: &IndexMap<SmolStr, ConvertedType>, stem: &str) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, ct) in types.values().enumerate() {
        if ct.model.is_interface() || looks_like_interface_name(&ct.model.name) {
            continue;
        }
        let impls = ct
            .model
            .methods
            .iter()
            .filter(|m| m.target_file.as_deref() == Some(stem))
            .count();
        if impls > 0 && best.map_or(true, |(_, n)| impls > n) {
            best = Some((i, impls));
        }
    }
    best.map(|(i, _)| i).or_else(|| {
        types
            .values()
            .position(|ct| ct.header_stem == stem && !ct.model.is_interface())
    })
}

fn looks_like_interface_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('I') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}
