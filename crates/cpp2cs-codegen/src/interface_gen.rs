//! C# interface generation for pure-virtual C++ classes.
//!
//! The instance surface becomes interface contract methods. Static
//! methods cannot live on a C# interface, so they move to a companion
//! `{Name}Extensions` static class; a static accessor that looks like a
//! factory gets a synthesized `return new ...` body.

use cpp2cs_model::{MethodModel, ParameterModel, TypeModel, Visibility};

use crate::indent::{self, indent_for, levels};
use crate::TypeMap;

pub struct InterfaceGenerator {
    types: TypeMap,
}

impl Default for InterfaceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InterfaceGenerator {
    pub fn new() -> Self {
        Self {
            types: TypeMap::new(),
        }
    }

    pub fn generate(&self, ty: &TypeModel) -> String {
        let mut out = String::new();
        out.push_str("using System;\n\n");
        out.push_str("namespace GeneratedInterfaces;\n\n");

        if !ty.preceding_comments.is_empty() {
            out.push_str(&indent::reindent_comments(
                &ty.preceding_comments.lines,
                ty.preceding_comments.indent,
                levels::NAMESPACE,
            ));
            out.push('\n');
        }

        let vis = if ty.is_exported { "public" } else { "internal" };
        out.push_str(&format!("{vis} interface {}\n{{\n", ty.name));

        let mut sections: Vec<String> = Vec::new();
        let defines: Vec<String> = ty
            .header_defines
            .iter()
            .chain(&ty.source_defines)
            .map(|d| {
                format!(
                    "{}public const {} {} = {};",
                    indent_for(levels::TYPE),
                    d.target_type,
                    d.name,
                    self.types.convert_value(&d.value),
                )
            })
            .collect();
        if !defines.is_empty() {
            sections.push(defines.join("\n"));
        }
        for m in ty.methods.iter().filter(|m| is_contract(m)) {
            sections.push(self.render_contract(m));
        }
        out.push_str(&sections.join("\n\n"));
        if !sections.is_empty() {
            out.push('\n');
        }
        out.push_str("}\n");

        let statics: Vec<&MethodModel> = ty
            .methods
            .iter()
            .filter(|m| m.is_static && m.visibility == Visibility::Public)
            .collect();
        if !statics.is_empty() {
            out.push('\n');
            out.push_str(&self.render_extensions(ty, &statics));
        }
        out
    }

    fn render_contract(&self, m: &MethodModel) -> String {
        let i1 = indent_for(levels::TYPE);
        let mut out = String::new();
        if !m.header_comments.is_empty() {
            out.push_str(&indent::reindent_comments(
                &m.header_comments.lines,
                m.header_comments.indent,
                levels::TYPE,
            ));
            out.push('\n');
        }
        let params: Vec<String> = m.params.iter().map(|p| self.param_text(p)).collect();
        out.push_str(&format!(
            "{i1}{} {}({});",
            self.types.convert_type(&m.return_type),
            m.name,
            params.join(", "),
        ));
        out
    }

    /// Companion static class carrying the C++ class's static surface.
    fn render_extensions(&self, ty: &TypeModel, statics: &[&MethodModel]) -> String {
        let i1 = indent_for(levels::TYPE);
        let i2 = indent_for(levels::MEMBER);
        let mut out = String::new();
        out.push_str(&format!("public static class {}Extensions\n{{\n", ty.name));
        for (i, m) in statics.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let params: Vec<String> = m.params.iter().map(|p| self.param_text(p)).collect();
            out.push_str(&format!(
                "{i1}public static {} {}({})\n{i1}{{\n",
                self.types.convert_type(&m.return_type),
                m.name,
                params.join(", "),
            ));
            out.push_str(&self.static_body(ty, m, &i2));
            out.push_str(&format!("{i1}}}\n"));
        }
        out.push_str("}\n");
        out
    }

    fn static_body(&self, ty: &TypeModel, m: &MethodModel, indent_str: &str) -> String {
        if let Some(class_name) = self.factory_target(ty, m) {
            return format!("{indent_str}return new {class_name}();\n");
        }
        match m.impl_body.as_ref().or(m.inline_body.as_ref()) {
            Some(raw) => {
                let converted = self.types.convert_body(raw);
                if converted.trim().is_empty() {
                    String::new()
                } else {
                    let base = indent::detect_indent(&converted);
                    let mut body = indent::reindent(&converted, base, levels::MEMBER);
                    body.push('\n');
                    body
                }
            }
            None if m.return_type != "void" && !m.return_type.is_empty() => format!(
                "{indent_str}return {};\n",
                self.types.default_return_value(&m.return_type)
            ),
            None => format!("{indent_str}// TODO: Implement method\n"),
        }
    }

    /// A static accessor returning the interface type by Get/Create/
    /// Instance naming is a factory; the conventional implementing
    /// class swaps the `I` prefix for `C`.
    fn factory_target(&self, ty: &TypeModel, m: &MethodModel) -> Option<String> {
        if !["Get", "Create", "Instance"]
            .iter()
            .any(|k| m.name.contains(k))
        {
            return None;
        }
        if self.types.convert_type(&m.return_type) != ty.name {
            return None;
        }
        let rest = ty.name.strip_prefix('I')?;
        Some(format!("C{rest}"))
    }

    fn param_text(&self, p: &ParameterModel) -> String {
        let mut out = String::new();
        if !p.is_const && (p.is_pointer || p.is_reference) {
            out.push_str(if p.is_pointer { "out " } else { "ref " });
        }
        out.push_str(self.types.convert_type(&p.base_type));
        if !p.name.is_empty() {
            out.push(' ');
            out.push_str(&p.name);
        }
        if let Some(d) = &p.default_value {
            if p.is_const || (!p.is_pointer && !p.is_reference) {
                out.push_str(" = ");
                out.push_str(&self.types.convert_value(d));
            }
        }
        out
    }
}

fn is_contract(m: &MethodModel) -> bool {
    m.visibility == Visibility::Public && !m.is_static && !m.is_constructor && !m.is_destructor
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpp2cs_model::{DefineModel, TypeKind};

    fn interface(name: &str) -> TypeModel {
        let mut ty = TypeModel::new(name, TypeKind::Interface);
        ty.is_exported = true;
        ty
    }

    fn method(name: &str, ret: &str) -> MethodModel {
        let mut m = MethodModel::new(name);
        m.return_type = ret.into();
        m.visibility = Visibility::Public;
        m.is_virtual = true;
        m.is_pure_virtual = true;
        m
    }

    #[test]
    fn contract_methods_have_no_modifiers() {
        let mut ty = interface("ISample");
        let mut m = method("MethodA", "bool");
        m.params = vec![ParameterModel {
            base_type: "TAttId".into(),
            name: "attId".into(),
            is_const: true,
            is_reference: true,
            canonical: "const TAttId &".to_string(),
            ..Default::default()
        }];
        ty.methods = vec![m];

        let out = InterfaceGenerator::new().generate(&ty);
        assert!(out.contains("namespace GeneratedInterfaces;\n"));
        assert!(out.contains("public interface ISample\n{\n    bool MethodA(TAttId attId);\n}\n"));
    }

    #[test]
    fn constructors_and_statics_leave_the_contract() {
        let mut ty = interface("ISample");
        let mut ctor = MethodModel::new("ISample");
        ctor.is_constructor = true;
        let mut stat = method("Helper", "void");
        stat.is_static = true;
        stat.is_pure_virtual = false;
        ty.methods = vec![ctor, stat, method("Work", "void")];

        let out = InterfaceGenerator::new().generate(&ty);
        let interface_part = &out[..out.find("Extensions").unwrap()];
        assert!(!interface_part.contains("ISample("));
        assert!(!interface_part.contains("Helper"));
        assert!(interface_part.contains("    void Work();"));
    }

    #[test]
    fn non_public_methods_stay_out_of_the_contract() {
        let mut ty = interface("ISample");
        let mut hidden = method("Hidden", "void");
        hidden.visibility = Visibility::Private;
        ty.methods = vec![method("Run", "bool"), hidden];

        let out = InterfaceGenerator::new().generate(&ty);
        assert!(out.contains("    bool Run();"));
        assert!(!out.contains("Hidden("));
    }

    #[test]
    fn static_factory_gets_synthesized_body() {
        let mut ty = interface("ISample");
        let mut factory = method("GetInstance", "ISample");
        factory.is_static = true;
        factory.is_pure_virtual = false;
        ty.methods = vec![factory];

        let out = InterfaceGenerator::new().generate(&ty);
        assert!(out.contains("public static class ISampleExtensions\n{\n"));
        assert!(out.contains(
            "    public static ISample GetInstance()\n    {\n        return new CSample();\n    }\n"
        ));
    }

    #[test]
    fn static_with_body_keeps_converted_body() {
        let mut ty = interface("ISample");
        let mut stat = method("Reset", "void");
        stat.is_static = true;
        stat.is_pure_virtual = false;
        stat.impl_body = Some("s_table->Clear();".to_string());
        ty.methods = vec![stat];

        let out = InterfaceGenerator::new().generate(&ty);
        assert!(out.contains("        s_table.Clear();\n"));
    }

    #[test]
    fn interface_defines_render_as_public_constants() {
        let mut ty = interface("ISample");
        ty.header_defines
            .push(DefineModel::new("IN_INTERFACE_DEF01", "1"));
        let out = InterfaceGenerator::new().generate(&ty);
        assert!(out.contains("    public const int IN_INTERFACE_DEF01 = 1;\n"));
    }
}
