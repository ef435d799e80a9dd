//! Header file parsing.
//!
//! A line-oriented state machine: outside any type it looks for
//! class/struct declarations and file-level defines; inside a type it
//! tracks the visibility section and classifies each line as a method
//! declaration (joined across physical lines first) or a data member.

use crate::comments::{collect_preceding_comments, region_around, RegionStyle};
use crate::params::{parse_initializer_list, parse_parameter_list, strip_min_indent};
use cpp2cs_model::{
    DefineModel, HeaderFileModel, MemberModel, MethodModel, TypeKind, TypeModel, Visibility,
};
use regex::Regex;
use tracing::warn;

pub struct HeaderParser {
    class_re: Regex,
    member_re: Regex,
    access_re: Regex,
    define_re: Regex,
    typedef_close_re: Regex,
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderParser {
    pub fn new() -> Self {
        Self {
            class_re: Regex::new(
                r"^(?:typedef\s+)?(class|struct)\s+(?:__declspec\s*\([^)]*\)\s+)?(\w+)(?:\s*:\s*(?:public|private|protected)\s+(\w+))?",
            )
            .unwrap_or_else(|_| unreachable!("static pattern")),
            member_re: Regex::new(
                r"^(?:(static)\s+)?(?:(const)\s+)?(\w+(?:\s*\*|\s*&)?)\s+(\w+)\s*(?:\[\s*([^\]]*?)\s*\])?\s*(?:=\s*([^;]+?)\s*)?;\s*(//.*|/\*.*)?$",
            )
            .unwrap_or_else(|_| unreachable!("static pattern")),
            access_re: Regex::new(r"^(private|protected|public)\s*:(.*)$")
                .unwrap_or_else(|_| unreachable!("static pattern")),
            define_re: Regex::new(r"^#define\s+(\w+)\s+(.+)$")
                .unwrap_or_else(|_| unreachable!("static pattern")),
            typedef_close_re: Regex::new(r"^\}\s*(\w+)\s*;")
                .unwrap_or_else(|_| unreachable!("static pattern")),
        }
    }

    /// Parse one header file's text. Unparseable constructs are dropped
    /// with a warning; the file itself never fails.
    pub fn parse(&self, stem: &str, text: &str) -> HeaderFileModel {
        let lines = cpp2cs_common::split_lines(text);
        let mut types: Vec<TypeModel> = Vec::new();
        let mut defines: Vec<DefineModel> = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let trimmed = lines[i].trim();

            if trimmed.is_empty() || trimmed.starts_with("//") {
                i += 1;
                continue;
            }
            if trimmed.starts_with("/*") {
                while i < lines.len() && !lines[i].contains("*/") {
                    i += 1;
                }
                i += 1;
                continue;
            }

            if let Some(caps) = self.define_re.captures(trimmed) {
                let mut define = DefineModel::new(&caps[1], caps[2].trim());
                define.origin_file = stem.to_string();
                define.from_header = true;
                define.preceding_comments = collect_preceding_comments(&lines, i).into_block();
                defines.push(define);
                i += 1;
                continue;
            }
            if trimmed.starts_with('#') {
                i += 1;
                continue;
            }

            if self.is_type_declaration(trimmed) {
                let ty = self.parse_type(&lines, &mut i, stem);
                if let Some(ty) = ty {
                    types.push(ty);
                }
                continue;
            }

            i += 1;
        }

        attribute_defines(&mut types, defines, stem);

        HeaderFileModel {
            stem: stem.to_string(),
            types,
        }
    }

    fn is_type_declaration(&self, trimmed: &str) -> bool {
        if trimmed.starts_with("typedef struct") {
            return true;
        }
        if !self.class_re.is_match(trimmed) {
            return false;
        }
        // Forward declarations and friend declarations end with `;` on
        // the declaration line.
        !(trimmed.ends_with(';') && !trimmed.contains('{')) && !trimmed.starts_with("friend ")
    }

    /// Parse one type starting at the declaration line `*pos`, leaving
    /// `*pos` on the line after the closing brace.
    fn parse_type(&self, lines: &[&str], pos: &mut usize, stem: &str) -> Option<TypeModel> {
        let start = *pos;
        let decl = lines[start].trim();

        let anonymous_typedef =
            decl.starts_with("typedef struct") && !self.class_re.is_match(decl);

        let mut ty = if anonymous_typedef {
            TypeModel::new("", TypeKind::Struct)
        } else {
            let caps = self.class_re.captures(decl)?;
            let kind = if &caps[1] == "struct" {
                TypeKind::Struct
            } else {
                TypeKind::Class
            };
            let mut ty = TypeModel::new(&caps[2], kind);
            if let Some(base) = caps.get(3) {
                ty.bases.push(base.as_str().into());
            }
            ty
        };

        ty.is_exported = decl.contains("__declspec(dllexport)");
        ty.preceding_comments = collect_preceding_comments(lines, start).into_block();
        if ty.kind == TypeKind::Class && contains_pure_virtual(lines, start) {
            ty.kind = TypeKind::Interface;
        }

        let mut visibility = ty.default_visibility();
        let mut order = 0usize;

        let mut i = start + 1;
        while i < lines.len() {
            let raw = lines[i];
            let line = raw.trim();

            if line.is_empty() {
                i += 1;
                continue;
            }

            if line == "};" || line == "}" {
                i += 1;
                break;
            }
            if anonymous_typedef {
                if let Some(caps) = self.typedef_close_re.captures(line) {
                    ty.name = caps[1].into();
                    i += 1;
                    break;
                }
            }

            if let Some(caps) = self.access_re.captures(line) {
                visibility = parse_visibility(&caps[1]);
                let rest = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
                if !rest.is_empty() {
                    // Inline content after the label, e.g. `public: int x;`.
                    if let Some(member) = self.parse_member(rest, lines, i, visibility, order) {
                        ty.members.push(member);
                        order += 1;
                    }
                }
                i += 1;
                continue;
            }

            if line.starts_with("//") {
                i += 1;
                continue;
            }
            if line.starts_with("/*") && !line.contains("*/") {
                while i < lines.len() && !lines[i].contains("*/") {
                    i += 1;
                }
                i += 1;
                continue;
            }
            if line.starts_with('#') {
                i += 1;
                continue;
            }
            // Stray body fragments from constructs the joiner gave up on.
            if line.starts_with("return ") || line.starts_with("if ") {
                i += 1;
                continue;
            }

            if line.contains('(') {
                let decl_start = i;
                let joined = join_method_declaration(lines, &mut i);
                match self.parse_method(&joined, &ty.name, visibility, stem) {
                    Some(mut method) => {
                        method.order_index = order;
                        order += 1;
                        method.header_comments =
                            collect_preceding_comments(lines, decl_start).into_block();
                        method.header_region =
                            region_around(lines, decl_start, i, RegionStyle::Commented);
                        ty.methods.push(method);
                    }
                    None => {
                        warn!(construct = %joined.trim(), "dropping unparseable declaration");
                    }
                }
                i += 1;
                continue;
            }

            if let Some(member) = self.parse_member(line, lines, i, visibility, order) {
                ty.members.push(member);
                order += 1;
            }
            i += 1;
        }

        *pos = i;

        if ty.name.is_empty() {
            warn!("dropping anonymous struct with no typedef name");
            return None;
        }
        Some(ty)
    }

    fn parse_member(
        &self,
        line: &str,
        lines: &[&str],
        index: usize,
        visibility: Visibility,
        order: usize,
    ) -> Option<MemberModel> {
        let caps = self.member_re.captures(line)?;
        let type_text = caps[3].trim();
        if matches!(type_text, "return" | "delete" | "throw") {
            return None;
        }

        let mut member = MemberModel::new(type_text, &caps[4]);
        member.visibility = visibility;
        member.is_static = caps.get(1).is_some();
        member.is_const = caps.get(2).is_some();
        if let Some(size) = caps.get(5) {
            member.is_array = true;
            member.array_size = size.as_str().to_string();
        }
        member.initializer = caps.get(6).map(|m| m.as_str().trim().to_string());
        member.postfix_comment = caps
            .get(7)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        member.preceding_comments = collect_preceding_comments(lines, index).into_block();
        member.region = region_around(lines, index, index, RegionStyle::Commented);
        member.order_index = order;
        Some(member)
    }

    /// Parse a fully joined declaration line into a method model.
    fn parse_method(
        &self,
        joined: &str,
        class_name: &str,
        visibility: Visibility,
        stem: &str,
    ) -> Option<MethodModel> {
        let paren = joined.find('(')?;
        let head = &joined[..paren];

        let mut tokens: Vec<&str> = head.split_whitespace().collect();
        let mut name = tokens.pop()?.to_string();

        // Pointer/reference glued to the name belongs to the return type.
        let mut glued = String::new();
        while name.starts_with('*') || name.starts_with('&') {
            glued.push(name.remove(0));
        }
        if name.is_empty() {
            return None;
        }
        // Redundant `Class::` qualifier on an inline declaration.
        if let Some(idx) = name.rfind("::") {
            name = name[idx + 2..].to_string();
        }

        let is_virtual = tokens.iter().any(|t| *t == "virtual");
        let is_static = tokens.iter().any(|t| *t == "static");
        tokens.retain(|t| *t != "virtual" && *t != "static" && *t != "inline");
        let mut return_type = tokens.join(" ");
        if !glued.is_empty() {
            return_type.push_str(&glued);
        }

        let (params_text, after) = extract_balanced_parameters(joined, paren);

        let signature_end = after.find('{').unwrap_or(after.len());
        let signature_tail = &after[..signature_end];

        let mut method = MethodModel::new(name.as_str());
        method.visibility = visibility;
        method.is_virtual = is_virtual;
        method.is_static = is_static;
        method.is_const = signature_tail.split_whitespace().any(|t| t == "const");
        method.is_pure_virtual = signature_tail.contains("= 0") || signature_tail.contains("=0");
        method.is_destructor = name.starts_with('~');
        method.is_constructor = !method.is_destructor && name == class_name && return_type.is_empty();
        method.owner = class_name.into();
        method.return_type = if return_type.is_empty() {
            "void".into()
        } else {
            return_type.as_str().into()
        };
        method.params = parse_parameter_list(&params_text);

        if method.is_constructor {
            if let Some(colon) = signature_tail.find(':') {
                method.initializer_list = parse_initializer_list(&signature_tail[colon + 1..]);
            }
        }

        if let Some(open) = after.find('{') {
            let close = after.rfind('}')?;
            if close > open {
                // Inline implementations stay in the header's own file.
                method.inline_body = Some(strip_min_indent(&after[open + 1..close]));
                method.target_file = Some(stem.to_string());
            }
        }

        Some(method)
    }

}

fn parse_visibility(keyword: &str) -> Visibility {
    match keyword {
        "public" => Visibility::Public,
        "protected" => Visibility::Protected,
        _ => Visibility::Private,
    }
}

/// Look ahead from a class declaration for a pure-virtual method before
/// the class closes.
fn contains_pure_virtual(lines: &[&str], start: usize) -> bool {
    for raw in lines.iter().skip(start) {
        let line = raw.trim();
        if line.ends_with("= 0;")
            && (line.contains("virtual")
                || (line.contains('(') && line.contains(')') && !line.contains('{')))
        {
            return true;
        }
        if line.contains("};")
            && line.matches('}').count() > line.matches('{').count()
        {
            break;
        }
    }
    false
}

/// Join a declaration spanning physical lines into one string:
/// declaration-only continuations are appended with spaces until a
/// terminating `;`; inline bodies keep their line breaks until braces
/// balance.
fn join_method_declaration(lines: &[&str], pos: &mut usize) -> String {
    let first = lines[*pos];
    let mut joined = first.to_string();

    let mut brace_level =
        first.matches('{').count() as i32 - first.matches('}').count() as i32;

    if first.trim_end().ends_with(';') && brace_level == 0 {
        return joined;
    }
    if brace_level == 0 && first.contains('{') && first.contains('}') {
        return joined;
    }

    let mut in_body = brace_level > 0;
    let mut i = *pos + 1;
    while i < lines.len() {
        let next = lines[i];
        let trimmed = next.trim();

        if !in_body
            && (trimmed.starts_with("class ")
                || trimmed.starts_with("struct ")
                || trimmed == "};"
                || trimmed.starts_with("private:")
                || trimmed.starts_with("public:")
                || trimmed.starts_with("protected:"))
        {
            // A type boundary before the declaration ended.
            *pos = i - 1;
            return joined;
        }

        if next.contains('{') {
            in_body = true;
        }
        if in_body {
            joined.push('\n');
            joined.push_str(next);
        } else {
            joined.push(' ');
            joined.push_str(trimmed);
        }

        brace_level += next.matches('{').count() as i32 - next.matches('}').count() as i32;

        if brace_level == 0 {
            if trimmed.ends_with(';') || (in_body && next.contains('}')) {
                *pos = i;
                return joined;
            }
        }
        if brace_level < 0 {
            *pos = i;
            return joined;
        }
        i += 1;
    }

    *pos = lines.len() - 1;
    joined
}

/// Extract the text between the parenthesis at `open` and its balanced
/// match, quote-aware. Returns the parameter text and the remainder of
/// the line after the closing parenthesis.
fn extract_balanced_parameters(text: &str, open: usize) -> (String, String) {
    let chars: Vec<char> = text.chars().collect();
    let byte_to_char = text[..open].chars().count();

    let mut level = 0i32;
    let mut in_quotes = false;
    let mut quote = '\0';
    let mut escape = false;

    for i in byte_to_char..chars.len() {
        let c = chars[i];
        if in_quotes {
            if escape {
                escape = false;
            } else if c == '\\' {
                escape = true;
            } else if c == quote {
                in_quotes = false;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                in_quotes = true;
                quote = c;
            }
            '(' => level += 1,
            ')' => {
                level -= 1;
                if level == 0 {
                    let params: String = chars[byte_to_char + 1..i].iter().collect();
                    let rest: String = chars[i + 1..].iter().collect();
                    return (params, rest);
                }
            }
            _ => {}
        }
    }

    let params: String = chars[byte_to_char + 1..].iter().collect();
    (params, String::new())
}

/// Attach file-level defines to exactly one type: the type named after
/// the file, else the sole non-struct type, else the first class.
/// Structs never receive file-level defines.
fn attribute_defines(types: &mut [TypeModel], defines: Vec<DefineModel>, stem: &str) {
    if defines.is_empty() {
        return;
    }

    let by_stem = types.iter().position(|t| t.name == stem);
    let target = by_stem
        .or_else(|| {
            let non_structs: Vec<usize> = types
                .iter()
                .enumerate()
                .filter(|(_, t)| t.kind != TypeKind::Struct)
                .map(|(i, _)| i)
                .collect();
            (non_structs.len() == 1).then(|| non_structs[0])
        })
        .or_else(|| types.iter().position(|t| t.kind == TypeKind::Class));

    match target {
        Some(idx) => types[idx].header_defines.extend(defines),
        None => warn!(
            file = stem,
            count = defines.len(),
            "no eligible type for file-level defines"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpp2cs_model::TypeKind;

    fn parse(text: &str) -> HeaderFileModel {
        HeaderParser::new().parse("CSample", text)
    }

    const SAMPLE: &str = r#"
// Sample class.
class __declspec(dllexport) CSample : public CBase
{
public:
    CSample();
    virtual ~CSample();

    // Does the thing.
    bool MethodP1(const agrint& int2 = 0);
    int GetCount() const { return m_nCount; }

private:
    int m_nCount;
    static const int MAX_ROWS = 10;
    char m_szBuf[32]; // scratch
};
"#;

    #[test]
    fn parses_class_shell() {
        let model = parse(SAMPLE);
        assert_eq!(model.types.len(), 1);
        let ty = &model.types[0];
        assert_eq!(ty.name, "CSample");
        assert_eq!(ty.kind, TypeKind::Class);
        assert!(ty.is_exported);
        assert_eq!(ty.bases, vec!["CBase"]);
    }

    #[test]
    fn classifies_methods_and_sections() {
        let model = parse(SAMPLE);
        let ty = &model.types[0];
        assert_eq!(ty.methods.len(), 4);

        let ctor = &ty.methods[0];
        assert!(ctor.is_constructor);
        assert_eq!(ctor.visibility, Visibility::Public);

        let dtor = &ty.methods[1];
        assert!(dtor.is_destructor);
        assert!(dtor.is_virtual);

        let m = &ty.methods[2];
        assert_eq!(m.name, "MethodP1");
        assert_eq!(m.return_type, "bool");
        assert_eq!(m.params.len(), 1);
        assert_eq!(m.params[0].default_value.as_deref(), Some("0"));
        assert_eq!(m.header_comments.lines, vec!["    // Does the thing."]);
    }

    #[test]
    fn captures_inline_body_and_target_file() {
        let model = parse(SAMPLE);
        let m = &model.types[0].methods[3];
        assert_eq!(m.name, "GetCount");
        assert!(m.is_const);
        assert_eq!(m.inline_body.as_deref(), Some("return m_nCount;"));
        assert_eq!(m.target_file.as_deref(), Some("CSample"));
    }

    #[test]
    fn parses_members_with_flags_and_postfix_comment() {
        let model = parse(SAMPLE);
        let members = &model.types[0].members;
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].name, "m_nCount");
        assert_eq!(members[0].visibility, Visibility::Private);

        assert!(members[1].is_static);
        assert!(members[1].is_const);
        assert_eq!(members[1].initializer.as_deref(), Some("10"));

        assert!(members[2].is_array);
        assert_eq!(members[2].array_size, "32");
        assert_eq!(members[2].postfix_comment, "// scratch");
    }

    #[test]
    fn pure_virtual_class_becomes_interface() {
        let text = "class ISample\n{\npublic:\n    virtual bool Run(int n) = 0;\n};\n";
        let model = parse(text);
        assert_eq!(model.types[0].kind, TypeKind::Interface);
        assert!(model.types[0].methods[0].is_pure_virtual);
    }

    #[test]
    fn joins_multi_line_declarations() {
        let text = "class CSample\n{\npublic:\n    void Configure(const CString& cName,\n        bool bFlag);\n};\n";
        let model = parse(text);
        let m = &model.types[0].methods[0];
        assert_eq!(m.name, "Configure");
        assert_eq!(m.params.len(), 2);
        assert_eq!(m.params[1].name, "bFlag");
    }

    #[test]
    fn backfills_anonymous_typedef_struct_name() {
        let text = "typedef struct\n{\n    int nKey;\n    int nValue;\n} TPair;\n";
        let model = parse(text);
        assert_eq!(model.types.len(), 1);
        assert_eq!(model.types[0].name, "TPair");
        assert_eq!(model.types[0].kind, TypeKind::Struct);
        assert_eq!(model.types[0].members.len(), 2);
    }

    #[test]
    fn constructor_initializer_list_is_parsed() {
        let text =
            "class CSample\n{\npublic:\n    CSample() : m_nCount(0), m_bReady(false) {}\n};\n";
        let model = parse(text);
        let ctor = &model.types[0].methods[0];
        assert!(ctor.is_constructor);
        assert_eq!(ctor.initializer_list.len(), 2);
        assert_eq!(ctor.initializer_list[0].member, "m_nCount");
        assert_eq!(ctor.initializer_list[0].value, "0");
    }

    #[test]
    fn define_goes_to_type_matching_file_stem() {
        let text = "#define MAX_LEN 128\n\nclass COther\n{\n};\n\nclass CSample\n{\n};\n";
        let model = parse(text);
        let sample = model.types.iter().find(|t| t.name == "CSample");
        let sample = sample.as_ref().unwrap();
        assert_eq!(sample.header_defines.len(), 1);
        assert_eq!(sample.header_defines[0].name, "MAX_LEN");
    }

    #[test]
    fn structs_never_receive_file_defines() {
        let text = "#define MAX_LEN 128\n\nstruct TPoint\n{\n    int x;\n};\n\nclass CImpl\n{\n};\n";
        let model = parse(text);
        let s = model.types.iter().find(|t| t.name == "TPoint");
        assert!(s.as_ref().unwrap().header_defines.is_empty());
        let c = model.types.iter().find(|t| t.name == "CImpl");
        assert_eq!(c.as_ref().unwrap().header_defines.len(), 1);
    }

    #[test]
    fn forward_declarations_are_not_types() {
        let text = "class CForward;\n\nclass CSample\n{\n};\n";
        let model = parse(text);
        assert_eq!(model.types.len(), 1);
        assert_eq!(model.types[0].name, "CSample");
    }

    #[test]
    fn inline_content_after_access_label() {
        let text = "class CSample\n{\npublic: int m_nOpen;\n};\n";
        let model = parse(text);
        let member = &model.types[0].members[0];
        assert_eq!(member.name, "m_nOpen");
        assert_eq!(member.visibility, Visibility::Public);
    }
}
