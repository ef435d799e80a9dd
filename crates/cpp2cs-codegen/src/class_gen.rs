//! C# class generation.
//!
//! One generated file per target: the main file (named after the header
//! stem) carries constants, fields and the methods that resolved there;
//! partial fragments carry only their own methods. Structs are emitted
//! as classes.

use cpp2cs_model::{DefineModel, MemberModel, MethodModel, ParameterModel, TypeModel};
use tracing::warn;

use crate::indent::{self, indent_for, levels};
use crate::TypeMap;

pub struct ClassGenerator {
    types: TypeMap,
}

impl Default for ClassGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassGenerator {
    pub fn new() -> Self {
        Self {
            types: TypeMap::new(),
        }
    }

    /// Render the main file for a type. Constants and fields live here,
    /// along with every method whose target is this file or still
    /// unresolved.
    pub fn generate(&self, ty: &TypeModel, file_stem: &str) -> String {
        self.warn_if_header_only(ty);
        self.render(ty, file_stem, true)
    }

    /// Render one fragment of a partial class: methods only.
    pub fn generate_fragment(&self, ty: &TypeModel, target_file: &str) -> String {
        self.render(ty, target_file, false)
    }

    fn render(&self, ty: &TypeModel, file_stem: &str, is_main: bool) -> String {
        let mut out = String::new();
        out.push_str("using System;\n\n");
        out.push_str("namespace GeneratedClasses;\n\n");

        if !ty.preceding_comments.is_empty() {
            out.push_str(&indent::reindent_comments(
                &ty.preceding_comments.lines,
                ty.preceding_comments.indent,
                levels::NAMESPACE,
            ));
            out.push('\n');
        }

        let vis = if ty.is_exported { "public" } else { "internal" };
        let partial = if ty.needs_partial() { "partial " } else { "" };
        let bases = if ty.bases.is_empty() {
            String::new()
        } else {
            let joined: Vec<&str> = ty.bases.iter().map(|b| b.as_str()).collect();
            format!(" : {}", joined.join(", "))
        };
        out.push_str(&format!("{vis} {partial}class {}{bases}\n{{\n", ty.name));

        let mut sections: Vec<String> = Vec::new();
        if is_main {
            sections.extend(self.define_sections(ty));
            sections.extend(self.member_sections(&ty.members));
        }

        // Without partial generation every method lands in the main
        // file, wherever its implementation was found.
        let split = ty.needs_partial();
        let selected: Vec<&MethodModel> = ty
            .methods
            .iter()
            .filter(|m| match (&m.target_file, is_main) {
                (Some(t), main) => t == file_stem || (main && !split),
                (None, main) => main,
            })
            .collect();
        for m in order_methods(&selected) {
            sections.push(self.render_method(ty, m));
        }

        out.push_str(&sections.join("\n\n"));
        if !sections.is_empty() {
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }

    fn warn_if_header_only(&self, ty: &TypeModel) {
        let needing = ty
            .methods
            .iter()
            .filter(|m| !m.has_body() && !m.is_pure_virtual)
            .count();
        if needing > 0 && ty.methods.iter().all(|m| !m.has_body()) {
            warn!(
                type_name = %ty.name,
                methods = needing,
                "no implementation file matched; generating placeholder bodies"
            );
        }
    }

    /// Constants: header defines first, then source defines grouped by
    /// the file they came from. Plain constants sit on consecutive
    /// lines; one with preceding comments opens its own block.
    fn define_sections(&self, ty: &TypeModel) -> Vec<String> {
        let mut source: Vec<&DefineModel> = ty.source_defines.iter().collect();
        source.sort_by(|a, b| a.origin_file.cmp(&b.origin_file));

        let mut sections: Vec<String> = Vec::new();
        let mut run = String::new();
        for d in ty.header_defines.iter().chain(source) {
            let rendered = self.render_define(d);
            if d.preceding_comments.is_empty() {
                if !run.is_empty() {
                    run.push('\n');
                }
                run.push_str(&rendered);
            } else {
                if !run.is_empty() {
                    sections.push(std::mem::take(&mut run));
                }
                sections.push(rendered);
            }
        }
        if !run.is_empty() {
            sections.push(run);
        }
        sections
    }

    fn render_define(&self, d: &DefineModel) -> String {
        let mut out = String::new();
        if !d.preceding_comments.is_empty() {
            out.push_str(&indent::reindent_comments(
                &d.preceding_comments.lines,
                d.preceding_comments.indent,
                levels::TYPE,
            ));
            out.push('\n');
        }
        let vis = if d.from_header { "internal" } else { "private" };
        out.push_str(&format!(
            "{}{vis} const {} {} = {};",
            indent_for(levels::TYPE),
            d.target_type,
            d.name,
            self.types.convert_value(&d.value),
        ));
        if !d.postfix_comment.is_empty() {
            out.push(' ');
            out.push_str(&d.postfix_comment);
        }
        out
    }

    fn member_sections(&self, members: &[MemberModel]) -> Vec<String> {
        let mut sections: Vec<String> = Vec::new();
        let mut run = String::new();
        for m in members {
            let decorated = !m.preceding_comments.is_empty() || !m.region.is_empty();
            let rendered = self.render_member(m);
            if decorated {
                if !run.is_empty() {
                    sections.push(std::mem::take(&mut run));
                }
                sections.push(rendered);
            } else {
                if !run.is_empty() {
                    run.push('\n');
                }
                run.push_str(&rendered);
            }
        }
        if !run.is_empty() {
            sections.push(run);
        }
        sections
    }

    fn render_member(&self, m: &MemberModel) -> String {
        let i2 = indent_for(levels::TYPE);
        let mut out = String::new();

        if !m.region.start.is_empty() {
            out.push_str(&format!("{i2}{}\n", m.region.start));
        }
        if !m.preceding_comments.is_empty() {
            out.push_str(&indent::reindent_comments(
                &m.preceding_comments.lines,
                m.preceding_comments.indent,
                levels::TYPE,
            ));
            out.push('\n');
        }

        let base = self.types.convert_type(&m.type_text).to_string();
        let mut type_text = base.clone();
        let mut init = match &m.initializer {
            Some(v) => format!(" = {}", self.types.convert_value(v)),
            None => String::new(),
        };
        if m.is_array {
            type_text.push_str("[]");
            match &m.initializer {
                // Brace lists need the C# array-creation form.
                Some(v) if v.trim_start().starts_with('{') => {
                    init = format!(" = new {base}[] {}", self.types.convert_value(v));
                }
                Some(_) => {}
                None if !m.array_size.is_empty() => {
                    init = format!(" = new {base}[{}]", m.array_size);
                }
                None => {}
            }
        }

        // C# constants are implicitly static.
        let modifiers = if m.is_const {
            "const "
        } else if m.is_static {
            "static "
        } else {
            ""
        };
        out.push_str(&format!(
            "{i2}{} {modifiers}{type_text} {}{init};",
            m.visibility.keyword(),
            m.name,
        ));
        if !m.postfix_comment.is_empty() {
            out.push(' ');
            out.push_str(&m.postfix_comment);
        }
        if !m.region.end.is_empty() {
            out.push_str(&format!("\n{i2}{}", m.region.end));
        }
        out
    }

    fn render_method(&self, ty: &TypeModel, m: &MethodModel) -> String {
        let i2 = indent_for(levels::TYPE);
        let mut out = String::new();

        let region = if !m.source_region.is_empty() {
            &m.source_region
        } else {
            &m.header_region
        };
        if !region.start.is_empty() {
            out.push_str(&format!("{i2}{}\n", region.start));
        }
        for block in [&m.header_comments, &m.source_comments] {
            if !block.is_empty() {
                out.push_str(&indent::reindent_comments(
                    &block.lines,
                    block.indent,
                    levels::TYPE,
                ));
                out.push('\n');
            }
        }

        let head = self.signature_head(ty, m);
        if m.params.iter().any(ParameterModel::has_comments) {
            out.push_str(&format!("{i2}{head}(\n"));
            self.render_commented_params(&mut out, &m.params);
        } else {
            let rendered: Vec<String> = m.params.iter().map(|p| self.param_text(p)).collect();
            out.push_str(&format!("{i2}{head}({})\n", rendered.join(", ")));
        }

        out.push_str(&format!("{i2}{{\n"));
        out.push_str(&self.render_body(m));
        out.push_str(&format!("{i2}}}"));
        if !region.end.is_empty() {
            out.push_str(&format!("\n{i2}{}", region.end));
        }
        out
    }

    fn signature_head(&self, ty: &TypeModel, m: &MethodModel) -> String {
        if m.is_destructor {
            let name = m.name.strip_prefix('~').unwrap_or(&m.name);
            return format!("~{name}");
        }
        let mut head = String::from(m.visibility.keyword());
        head.push(' ');
        if m.is_static {
            head.push_str("static ");
        } else if m.is_virtual {
            head.push_str("virtual ");
        }
        if m.is_constructor {
            head.push_str(&ty.name);
        } else {
            head.push_str(self.types.convert_type(&m.return_type));
            head.push(' ');
            head.push_str(&m.name);
        }
        head
    }

    /// One parameter per continuation line, keeping its comments in
    /// place. The separating comma lands before a `//` suffix comment
    /// (anything after it would be swallowed) and after a `/* */` one.
    fn render_commented_params(&self, out: &mut String, params: &[ParameterModel]) {
        let pi = indent_for(levels::MEMBER);
        for (i, p) in params.iter().enumerate() {
            let last = i + 1 == params.len();
            let mut line = pi.clone();
            for c in p.prefix_comments() {
                line.push_str(&c.text);
                line.push(' ');
            }
            line.push_str(&self.param_text(p));
            let mut line_comments: Vec<&str> = Vec::new();
            for c in p.suffix_comments() {
                if c.is_line_style() {
                    line_comments.push(&c.text);
                } else {
                    line.push(' ');
                    line.push_str(&c.text);
                }
            }
            line.push(if last { ')' } else { ',' });
            for c in line_comments {
                line.push(' ');
                line.push_str(c);
            }
            out.push_str(&line);
            out.push('\n');
        }
    }

    fn param_text(&self, p: &ParameterModel) -> String {
        let mut out = String::new();
        let by_ref = !p.is_const && (p.is_pointer || p.is_reference);
        if by_ref {
            out.push_str(if p.is_pointer { "out " } else { "ref " });
        }
        out.push_str(self.types.convert_type(&p.base_type));
        if !p.name.is_empty() {
            out.push(' ');
            out.push_str(&p.name);
        }
        // C# forbids defaults on out/ref parameters.
        if !by_ref {
            if let Some(d) = &p.default_value {
                out.push_str(" = ");
                out.push_str(&self.types.convert_value(d));
            }
        }
        out
    }

    fn render_body(&self, m: &MethodModel) -> String {
        let i3 = indent_for(levels::MEMBER);
        let mut body = String::new();

        if m.is_constructor {
            for init in &m.initializer_list {
                body.push_str(&format!(
                    "{i3}{} = {};\n",
                    init.member,
                    self.types.convert_value(&init.value)
                ));
            }
        }

        match m.impl_body.as_ref().or(m.inline_body.as_ref()) {
            Some(raw) => {
                let converted = self.types.convert_body(raw);
                if !converted.trim().is_empty() {
                    let base = indent::detect_indent(&converted);
                    body.push_str(&indent::reindent(&converted, base, levels::MEMBER));
                    body.push('\n');
                }
            }
            None if body.is_empty() => {
                if m.is_constructor {
                    body.push_str(&format!("{i3}// TODO: Initialize members\n"));
                } else if m.return_type != "void" && !m.return_type.is_empty() {
                    body.push_str(&format!(
                        "{i3}return {};\n",
                        self.types.default_return_value(&m.return_type)
                    ));
                } else {
                    body.push_str(&format!("{i3}// TODO: Implement method\n"));
                }
            }
            None => {}
        }
        body
    }
}

/// Implemented methods first, in implementation-file order; declared-only
/// methods follow in header order.
fn order_methods<'a>(methods: &[&'a MethodModel]) -> Vec<&'a MethodModel> {
    let mut ordered: Vec<&MethodModel> = methods
        .iter()
        .copied()
        .filter(|m| m.impl_body.is_some())
        .collect();
    ordered.sort_by_key(|m| m.order_index);
    ordered.extend(methods.iter().copied().filter(|m| m.impl_body.is_none()));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpp2cs_model::{
        CommentBlock, DefineModel, PositionedComment, TypeKind, TypeModel, Visibility,
    };

    fn method(name: &str) -> MethodModel {
        let mut m = MethodModel::new(name);
        m.visibility = Visibility::Public;
        m
    }

    fn param(base: &str, name: &str) -> ParameterModel {
        ParameterModel {
            base_type: base.into(),
            name: name.into(),
            canonical: base.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_class_shell() {
        let ty = TypeModel::new("CSample", TypeKind::Class);
        let out = ClassGenerator::new().generate(&ty, "CSample");
        assert_eq!(
            out,
            "using System;\n\nnamespace GeneratedClasses;\n\ninternal class CSample\n{\n}\n"
        );
    }

    #[test]
    fn exported_class_with_base_is_public() {
        let mut ty = TypeModel::new("CSample", TypeKind::Class);
        ty.is_exported = true;
        ty.bases.push("ISample".into());
        let out = ClassGenerator::new().generate(&ty, "CSample");
        assert!(out.contains("public class CSample : ISample\n"));
    }

    #[test]
    fn implemented_methods_precede_declared_only() {
        let mut ty = TypeModel::new("CSample", TypeKind::Class);
        let mut declared = method("First");
        declared.return_type = "bool".into();
        let mut implemented = method("Second");
        implemented.impl_body = Some("DoWork();".to_string());
        implemented.target_file = Some("CSample".to_string());
        implemented.order_index = 0;
        ty.methods = vec![declared, implemented];

        let out = ClassGenerator::new().generate(&ty, "CSample");
        let second = out.find("Second(").unwrap();
        let first = out.find("First(").unwrap();
        assert!(second < first);
        assert!(out.contains("    public void Second()\n    {\n        DoWork();\n    }"));
        assert!(out.contains("        return false;"));
    }

    #[test]
    fn members_and_methods_sit_one_level_inside_the_class() {
        let mut ty = TypeModel::new("CSample", TypeKind::Class);
        ty.members.push(MemberModel::new("int", "m_value"));
        let mut m = method("Run");
        m.impl_body = Some("Work();".to_string());
        m.target_file = Some("Sample".to_string());
        ty.methods = vec![m];

        let out = ClassGenerator::new().generate(&ty, "Sample");
        let expected = concat!(
            "using System;\n",
            "\n",
            "namespace GeneratedClasses;\n",
            "\n",
            "internal class CSample\n",
            "{\n",
            "    private int m_value;\n",
            "\n",
            "    public void Run()\n",
            "    {\n",
            "        Work();\n",
            "    }\n",
            "}\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn constructor_placeholder_and_initializer_assignments() {
        let mut ty = TypeModel::new("CSample", TypeKind::Class);
        let mut plain = method("CSample");
        plain.is_constructor = true;
        let mut with_inits = method("CSample");
        with_inits.is_constructor = true;
        with_inits.params = vec![param("int", "x")];
        with_inits.initializer_list = vec![cpp2cs_model::MemberInitializer {
            member: "m_value".into(),
            value: "NULL".to_string(),
        }];
        ty.methods = vec![plain, with_inits];

        let out = ClassGenerator::new().generate(&ty, "CSample");
        assert!(out.contains("    public CSample()\n    {\n        // TODO: Initialize members\n    }"));
        assert!(out.contains("    public CSample(int x)\n    {\n        m_value = null;\n    }"));
    }

    #[test]
    fn parameter_comments_force_one_per_line() {
        let mut ty = TypeModel::new("CSample", TypeKind::Class);
        let mut m = method("Configure");
        let mut a = param("TAttId", "attId");
        a.comments = vec![PositionedComment::suffix("// attribute id")];
        let mut b = param("bool", "enable");
        b.comments = vec![PositionedComment::prefix("/* flag */")];
        m.params = vec![a, b];
        ty.methods = vec![m];

        let out = ClassGenerator::new().generate(&ty, "CSample");
        assert!(out.contains("    public void Configure(\n"));
        assert!(out.contains("        TAttId attId, // attribute id\n"));
        assert!(out.contains("        /* flag */ bool enable)\n"));
    }

    #[test]
    fn pointer_and_reference_params_map_to_out_and_ref() {
        let gen = ClassGenerator::new();
        let mut p = param("int", "pValue");
        p.is_pointer = true;
        p.default_value = Some("NULL".to_string());
        assert_eq!(gen.param_text(&p), "out int pValue");

        let mut r = param("CString", "name");
        r.is_reference = true;
        assert_eq!(gen.param_text(&r), "ref CString name");

        let mut c = param("TAttId", "attId");
        c.is_const = true;
        c.is_reference = true;
        c.default_value = Some("0".to_string());
        assert_eq!(gen.param_text(&c), "TAttId attId = 0");
    }

    #[test]
    fn defines_render_as_constants_with_comment_grouping() {
        let mut ty = TypeModel::new("CSample", TypeKind::Class);
        ty.header_defines.push(DefineModel::new("DEF01", "1"));
        ty.header_defines
            .push(DefineModel::new("DEF02", "2 // inline note"));
        let mut commented = DefineModel::new("DEF03", "3");
        commented.preceding_comments = CommentBlock::new(vec!["// Block note".to_string()]);
        ty.header_defines.push(commented);
        let mut src = DefineModel::new("LOCAL", "\"x\"");
        src.from_header = false;
        ty.source_defines.push(src);

        let out = ClassGenerator::new().generate(&ty, "CSample");
        assert!(out.contains(
            "{\n    internal const int DEF01 = 1;\n    internal const int DEF02 = 2; // inline note\n\n    // Block note\n    internal const int DEF03 = 3;"
        ));
        assert!(out.contains("\n    private const string LOCAL = \"x\";"));
    }

    #[test]
    fn member_arrays_synthesize_allocations() {
        let mut ty = TypeModel::new("CSample", TypeKind::Class);
        let mut arr = MemberModel::new("int", "m_counts");
        arr.is_array = true;
        arr.array_size = "10".to_string();
        let mut filled = MemberModel::new("int", "m_table");
        filled.is_array = true;
        filled.initializer = Some("{ 1, 2 }".to_string());
        filled.postfix_comment = "// lookup".to_string();
        ty.members = vec![arr, filled];

        let out = ClassGenerator::new().generate(&ty, "CSample");
        assert!(out.contains("{\n    private int[] m_counts = new int[10];\n"));
        assert!(out.contains("\n    private int[] m_table = new int[] { 1, 2 }; // lookup"));
    }

    #[test]
    fn fragment_omits_fields_and_marks_partial() {
        let mut ty = TypeModel::new("CSample", TypeKind::Class);
        ty.members.push(MemberModel::new("int", "m_value"));
        let mut a = method("InMain");
        a.impl_body = Some("Main();".to_string());
        a.target_file = Some("CSample".to_string());
        let mut b = method("InPart");
        b.impl_body = Some("Part();".to_string());
        b.target_file = Some("CSample_Part2".to_string());
        ty.methods = vec![a, b];

        let gen = ClassGenerator::new();
        let main = gen.generate(&ty, "CSample");
        let part = gen.generate_fragment(&ty, "CSample_Part2");
        assert!(main.contains("internal partial class CSample\n"));
        assert!(main.contains("m_value"));
        assert!(main.contains("InMain"));
        assert!(!main.contains("InPart"));
        assert!(part.contains("internal partial class CSample\n"));
        assert!(part.contains("InPart"));
        assert!(!part.contains("m_value"));
    }

    #[test]
    fn destructor_renders_as_finalizer() {
        let mut ty = TypeModel::new("CSample", TypeKind::Class);
        let mut d = method("~CSample");
        d.is_destructor = true;
        ty.methods = vec![d];
        let out = ClassGenerator::new().generate(&ty, "CSample");
        assert!(out.contains("    ~CSample()\n    {\n        // TODO: Implement method\n    }"));
    }
}
