//! Implementation file parsing.
//!
//! Two passes over the file text: a primary regex pass matches
//! `Owner::Method(...) {` signatures (parameter lists may span lines),
//! and a recovery pass re-joins signatures whose parameter lists
//! contain nested parentheses the primary pattern cannot cross.
//! Duplicates between passes are suppressed by (owner, name, parameter
//! count, per-parameter canonical type). Static member initializations,
//! embedded structs, free functions, file-level defines and
//! file-leading comments are extracted by independent scans, then all
//! constructs are re-sorted by their true textual position.

use crate::comments::{collect_preceding_comments, region_around, RegionStyle};
use crate::header::HeaderParser;
use crate::params::{parse_initializer_list, parse_parameter_list, strip_min_indent};
use cpp2cs_model::{DefineModel, MethodModel, SourceFileModel, StaticInitModel, TypeModel};
use regex::Regex;
use tracing::warn;

pub struct SourceParser {
    impl_re: Regex,
    sig_head_re: Regex,
    static_init_re: Regex,
    define_re: Regex,
    free_fn_re: Regex,
    ctor_like_re: Regex,
    struct_decl_re: Regex,
    header_parser: HeaderParser,
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser {
    pub fn new() -> Self {
        Self {
            impl_re: Regex::new(
                r"(?m)^[ \t]*(?:(const)\s+)?(?:(static)\s+)?(?:([\w:<>]+(?:\s*[*&])*)\s+)?(\w+)\s*::\s*(~?\w+)\s*\(([^)]*)\)\s*(const)?\s*(?::\s*([^{]*?))?\s*\{",
            )
            .unwrap_or_else(|_| unreachable!("static pattern")),
            sig_head_re: Regex::new(
                r"^(?:(const)\s+)?(?:(static)\s+)?(?:([\w:<>]+(?:\s*[*&])*)\s+)?(\w+)\s*::\s*(~?\w+)\s*\($",
            )
            .unwrap_or_else(|_| unreachable!("static pattern")),
            static_init_re: Regex::new(
                r"(?m)^[ \t]*(?:(const)\s+)?(?:([\w:<>]+(?:\s*[*&])*)\s+)?(\w+)\s*::\s*(\w+)\s*((?:\[\s*\w*\s*\])*)\s*=\s*([^;]+);",
            )
            .unwrap_or_else(|_| unreachable!("static pattern")),
            define_re: Regex::new(r"^#define\s+(\w+)\s+(.+)$")
                .unwrap_or_else(|_| unreachable!("static pattern")),
            free_fn_re: Regex::new(
                r"(?m)^(?:(static)\s+)?([\w:<>]+(?:\s*[*&])*)\s+(\w+)\s*\(([^)]*)\)\s*\{",
            )
            .unwrap_or_else(|_| unreachable!("static pattern")),
            ctor_like_re: Regex::new(r"(?m)^(\w+)\s*\(([^)]*)\)\s*(?::\s*([^{]*?))?\s*\{")
                .unwrap_or_else(|_| unreachable!("static pattern")),
            struct_decl_re: Regex::new(r"^(?:typedef\s+)?struct(?:\s+\w+)?\s*\{?\s*$")
                .unwrap_or_else(|_| unreachable!("static pattern")),
            header_parser: HeaderParser::new(),
        }
    }

    /// Parse one implementation file's text.
    pub fn parse(&self, stem: &str, text: &str) -> SourceFileModel {
        let text = cpp2cs_common::normalize_line_endings(text);
        let lines = cpp2cs_common::split_lines(&text);
        let line_starts = line_start_offsets(&text);

        let mut methods = self.parse_implementations(&text, stem);
        self.recover_multiline_signatures(&text, stem, &mut methods);

        let structs = self.parse_embedded_structs(&lines, stem);
        self.reclassify_struct_constructors(&text, stem, &structs, &mut methods);
        self.parse_free_functions(&text, stem, &mut methods);

        let static_inits = self.parse_static_inits(&text);
        let defines = self.parse_defines(&lines, stem);
        let file_top_comments = collect_file_top_comments(&lines);

        for (offset, end_offset, method) in methods.iter_mut() {
            let decl_line = line_of(&line_starts, *offset);
            let end_line = line_of(&line_starts, *end_offset);
            method.source_comments = collect_preceding_comments(&lines, decl_line).into_block();
            method.source_region = region_around(&lines, decl_line, end_line, RegionStyle::Native);
        }

        // Independent passes ran independent counters; renumber every
        // construct by its textual position.
        let mut offsets: Vec<usize> = methods
            .iter()
            .map(|(o, _, _)| *o)
            .chain(static_inits.iter().map(|(o, _)| *o))
            .collect();
        offsets.sort_unstable();

        let mut methods: Vec<(usize, MethodModel)> =
            methods.into_iter().map(|(o, _, m)| (o, m)).collect();
        methods.sort_by_key(|(o, _)| *o);
        let methods = methods
            .into_iter()
            .map(|(o, mut m)| {
                m.order_index = rank_of(&offsets, o);
                m
            })
            .collect();

        let mut static_inits: Vec<(usize, StaticInitModel)> = static_inits;
        static_inits.sort_by_key(|(o, _)| *o);
        let static_inits = static_inits
            .into_iter()
            .map(|(o, mut s)| {
                s.order_index = rank_of(&offsets, o);
                s
            })
            .collect();

        SourceFileModel {
            stem: stem.to_string(),
            file_top_comments,
            methods,
            static_inits,
            defines,
            structs: structs.into_iter().map(|(_, t)| t).collect(),
        }
    }

    /// Primary pass. Returns (signature offset, body-end offset, model).
    fn parse_implementations(
        &self,
        text: &str,
        stem: &str,
    ) -> Vec<(usize, usize, MethodModel)> {
        let mut methods = Vec::new();

        for caps in self.impl_re.captures_iter(text) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let owner = &caps[4];
            let name = &caps[5];

            let mut method = MethodModel::new(name);
            method.owner = owner.into();
            method.return_type = joined_return_type(caps.get(1), caps.get(3));
            method.is_const = caps.get(7).is_some();
            method.is_static = caps.get(2).is_some();
            method.is_destructor = name.starts_with('~');
            method.is_constructor = !method.is_destructor && name == owner;
            method.params = parse_parameter_list(&caps[6]);
            if let Some(init) = caps.get(8) {
                method.initializer_list = parse_initializer_list(init.as_str());
            }
            method.target_file = Some(stem.to_string());

            let body_open = whole.end() - 1;
            let (body, body_end) = extract_braced_body(text, body_open);
            method.impl_indent = body_indent(&body);
            method.impl_body = Some(strip_min_indent(&body));

            methods.push((whole.start(), body_end, method));
        }

        methods
    }

    /// Recovery pass for signatures whose parameter lists hold nested
    /// parentheses: find `Owner::Method(` line heads and join forward
    /// until the parentheses balance.
    fn recover_multiline_signatures(
        &self,
        text: &str,
        stem: &str,
        methods: &mut Vec<(usize, usize, MethodModel)>,
    ) {
        let mut search_from = 0;
        while let Some(rel) = text[search_from..].find("::") {
            let scope_at = search_from + rel;
            search_from = scope_at + 2;

            let line_start = text[..scope_at].rfind('\n').map(|i| i + 1).unwrap_or(0);
            let Some(open_rel) = text[scope_at..].find('(') else {
                continue;
            };
            let open = scope_at + open_rel;
            let head = text[line_start..open].trim_start();
            let head_probe = format!("{head}(");
            let Some(caps) = self.sig_head_re.captures(&head_probe) else {
                continue;
            };

            let Some(close) = find_balanced_close(text, open) else {
                continue;
            };
            let params_text = &text[open + 1..close];
            if !params_text.contains('(') {
                // The primary pass already handled this signature.
                continue;
            }

            // The body brace must follow before any statement terminator.
            let tail = &text[close + 1..];
            let brace_rel = match tail.find('{') {
                Some(b) if !tail[..b].contains(';') => b,
                _ => continue,
            };
            let body_open = close + 1 + brace_rel;
            let signature_tail = &tail[..brace_rel];

            let owner = &caps[4];
            let name = &caps[5];
            let mut method = MethodModel::new(name);
            method.owner = owner.into();
            method.return_type = joined_return_type(caps.get(1), caps.get(3));
            method.is_static = caps.get(2).is_some();
            method.is_const = signature_tail.split_whitespace().any(|t| t == "const");
            method.is_destructor = name.starts_with('~');
            method.is_constructor = !method.is_destructor && name == owner;
            method.params = parse_parameter_list(params_text);
            if let Some(colon) = signature_tail.find(':') {
                method.initializer_list = parse_initializer_list(&signature_tail[colon + 1..]);
            }
            method.target_file = Some(stem.to_string());

            if methods.iter().any(|(_, _, m)| same_signature(m, &method)) {
                continue;
            }

            let (body, body_end) = extract_braced_body(text, body_open);
            method.impl_indent = body_indent(&body);
            method.impl_body = Some(strip_min_indent(&body));

            methods.push((line_start, body_end, method));
        }
    }

    /// Struct definitions embedded in the implementation file, parsed
    /// by slicing the block out and reusing the header machinery.
    fn parse_embedded_structs(&self, lines: &[&str], stem: &str) -> Vec<(usize, TypeModel)> {
        let mut structs = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            let trimmed = lines[i].trim();
            if !self.struct_decl_re.is_match(trimmed) && !trimmed.starts_with("struct ") {
                i += 1;
                continue;
            }
            if trimmed.ends_with(';') && !trimmed.contains('{') {
                i += 1;
                continue;
            }

            let start = i;
            let mut level = 0i32;
            let mut seen_open = false;
            let mut end = i;
            for (j, line) in lines.iter().enumerate().skip(i) {
                level += line.matches('{').count() as i32 - line.matches('}').count() as i32;
                if line.contains('{') {
                    seen_open = true;
                }
                if seen_open && level <= 0 {
                    end = j;
                    break;
                }
            }
            if !seen_open {
                i += 1;
                continue;
            }

            let block = lines[start..=end].join("\n");
            let parsed = self.header_parser.parse(stem, &block);
            for ty in parsed.types {
                structs.push((start, ty));
            }
            i = end + 1;
        }
        structs
    }

    /// An ownerless function shaped like `Name(...) { ... }` whose name
    /// matches a struct discovered in the same file is that struct's
    /// constructor.
    fn reclassify_struct_constructors(
        &self,
        text: &str,
        stem: &str,
        structs: &[(usize, TypeModel)],
        methods: &mut Vec<(usize, usize, MethodModel)>,
    ) {
        if structs.is_empty() {
            return;
        }
        for caps in self.ctor_like_re.captures_iter(text) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let name = &caps[1];
            let Some((_, owner_struct)) = structs.iter().find(|(_, t)| t.name == name) else {
                continue;
            };

            let mut method = MethodModel::new(name);
            method.owner = owner_struct.name.clone();
            method.return_type = "".into();
            method.is_constructor = true;
            method.params = parse_parameter_list(&caps[2]);
            if let Some(init) = caps.get(3) {
                method.initializer_list = parse_initializer_list(init.as_str());
            }
            method.target_file = Some(stem.to_string());

            if methods.iter().any(|(_, _, m)| same_signature(m, &method)) {
                continue;
            }

            let body_open = whole.end() - 1;
            let (body, body_end) = extract_braced_body(text, body_open);
            method.impl_indent = body_indent(&body);
            method.impl_body = Some(strip_min_indent(&body));

            methods.push((whole.start(), body_end, method));
        }
    }

    /// Free functions with no scope qualifier. Ownership is resolved
    /// during reconciliation; until then they are local methods.
    fn parse_free_functions(
        &self,
        text: &str,
        stem: &str,
        methods: &mut Vec<(usize, usize, MethodModel)>,
    ) {
        for caps in self.free_fn_re.captures_iter(text) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            if whole.as_str().contains("::") {
                continue;
            }
            let name = &caps[3];
            if matches!(name, "if" | "while" | "for" | "switch" | "return") {
                continue;
            }

            let mut method = MethodModel::new(name);
            method.is_local = true;
            method.is_static = caps.get(1).is_some();
            method.return_type = caps[2].trim().into();
            method.params = parse_parameter_list(&caps[4]);
            method.target_file = Some(stem.to_string());

            if methods.iter().any(|(_, _, m)| same_signature(m, &method)) {
                continue;
            }

            let body_open = whole.end() - 1;
            let (body, body_end) = extract_braced_body(text, body_open);
            method.impl_indent = body_indent(&body);
            method.impl_body = Some(strip_min_indent(&body));

            methods.push((whole.start(), body_end, method));
        }
    }

    fn parse_static_inits(&self, text: &str) -> Vec<(usize, StaticInitModel)> {
        let mut inits = Vec::new();
        for caps in self.static_init_re.captures_iter(text) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            // `Owner::Owner(...) : ... {` constructor heads are not
            // initializations even when the initializer contains `=`.
            if caps[6].contains('{') && !caps[6].trim_start().starts_with('{') {
                continue;
            }

            let brackets = caps.get(5).map(|m| m.as_str()).unwrap_or("");
            let value = caps[6].trim().to_string();
            let array_size: String = brackets
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();

            inits.push((
                whole.start(),
                StaticInitModel {
                    owner: caps[3].into(),
                    member: caps[4].into(),
                    value: value.clone(),
                    is_array: !brackets.is_empty() || value.starts_with('{'),
                    array_size,
                    type_text: caps
                        .get(2)
                        .map(|m| m.as_str().trim().into())
                        .unwrap_or_default(),
                    is_const: caps.get(1).is_some(),
                    order_index: 0,
                },
            ));
        }
        inits
    }

    fn parse_defines(&self, lines: &[&str], stem: &str) -> Vec<DefineModel> {
        let mut defines = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let Some(caps) = self.define_re.captures(line.trim()) else {
                continue;
            };
            if caps[1].is_empty() {
                continue;
            }
            let mut define = DefineModel::new(&caps[1], caps[2].trim());
            define.origin_file = stem.to_string();
            define.from_header = false;
            define.preceding_comments = collect_preceding_comments(lines, i).into_block();
            defines.push(define);
        }
        defines
    }
}

fn joined_return_type(
    const_prefix: Option<regex::Match<'_>>,
    base: Option<regex::Match<'_>>,
) -> smol_str::SmolStr {
    let base = base.map(|m| m.as_str().trim()).unwrap_or("");
    match (const_prefix.is_some(), base.is_empty()) {
        (_, true) => "".into(),
        (true, false) => format!("const {base}").into(),
        (false, false) => base.into(),
    }
}

/// Extract the text between the brace at `open` and its balanced match.
/// Returns the body (without the outer braces) and the byte offset of
/// the closing brace.
fn extract_braced_body(text: &str, open: usize) -> (String, usize) {
    let bytes = text.as_bytes();
    let mut level = 0i32;
    let mut in_string = false;
    let mut in_char = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;
    let mut escape = false;

    let mut i = open;
    while i < bytes.len() {
        let c = bytes[i];
        if in_line_comment {
            if c == b'\n' {
                in_line_comment = false;
            }
        } else if in_block_comment {
            if c == b'*' && bytes.get(i + 1) == Some(&b'/') {
                in_block_comment = false;
                i += 1;
            }
        } else if in_string || in_char {
            if escape {
                escape = false;
            } else if c == b'\\' {
                escape = true;
            } else if in_string && c == b'"' {
                in_string = false;
            } else if in_char && c == b'\'' {
                in_char = false;
            }
        } else {
            match c {
                b'/' if bytes.get(i + 1) == Some(&b'/') => in_line_comment = true,
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    in_block_comment = true;
                    i += 1;
                }
                b'"' => in_string = true,
                b'\'' => in_char = true,
                b'{' => level += 1,
                b'}' => {
                    level -= 1;
                    if level == 0 {
                        let body = text[open + 1..i].replace('\t', "    ");
                        return (body, i);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }

    warn!("unbalanced braces in implementation body");
    (text[open + 1..].replace('\t', "    "), text.len())
}

/// Matching `)` for the `(` at `open`, quote-aware.
fn find_balanced_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut level = 0i32;
    let mut in_string = false;
    let mut escape = false;

    for (i, &c) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escape {
                escape = false;
            } else if c == b'\\' {
                escape = true;
            } else if c == b'"' {
                in_string = false;
            }
            continue;
        }
        match c {
            b'"' => in_string = true,
            b'(' => level += 1,
            b')' => {
                level -= 1;
                if level == 0 {
                    return Some(i);
                }
            }
            b';' if level == 1 => return None,
            _ => {}
        }
    }
    None
}

/// Minimum leading indent of a body's non-empty lines, as written.
fn body_indent(body: &str) -> usize {
    body.split('\n')
        .filter(|l| !l.trim().is_empty())
        .map(cpp2cs_common::leading_indent_width)
        .min()
        .unwrap_or(0)
}

fn line_start_offsets(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, c) in text.char_indices() {
        if c == '\n' {
            starts.push(i + 1);
        }
    }
    starts
}

fn line_of(line_starts: &[usize], offset: usize) -> usize {
    match line_starts.binary_search(&offset) {
        Ok(i) => i,
        Err(i) => i.saturating_sub(1),
    }
}

fn rank_of(sorted_offsets: &[usize], offset: usize) -> usize {
    match sorted_offsets.binary_search(&offset) {
        Ok(i) => i,
        Err(i) => i,
    }
}

fn same_signature(a: &MethodModel, b: &MethodModel) -> bool {
    a.owner == b.owner
        && a.name == b.name
        && a.params.len() == b.params.len()
        && a.canonical_params() == b.canonical_params()
}

/// Comment lines at the very top of the file, before the first
/// preprocessor directive or code line.
fn collect_file_top_comments(lines: &[&str]) -> Vec<String> {
    let mut comments = Vec::new();
    let mut in_block = false;
    for raw in lines {
        let line = raw.trim();
        if in_block {
            comments.push(raw.to_string());
            if line.contains("*/") {
                in_block = false;
            }
            continue;
        }
        if line.starts_with("//") {
            comments.push(raw.to_string());
            continue;
        }
        if line.starts_with("/*") {
            comments.push(raw.to_string());
            in_block = !line.contains("*/");
            continue;
        }
        if line.is_empty() {
            continue;
        }
        break;
    }
    comments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> SourceFileModel {
        SourceParser::new().parse("CSample", text)
    }

    const SAMPLE: &str = r#"// Implementation notes.
#include "CSample.h"

bool CSample::MethodP1(const agrint& lLimitHorizon)
{
    if (lLimitHorizon > 0)
        return true;

    return false;
}

CSample::CSample() : m_nCount(0)
{
    m_nCount = 1;
}

int CSample::s_nInstances = 0;
"#;

    #[test]
    fn parses_scoped_implementations() {
        let model = parse(SAMPLE);
        assert_eq!(model.methods.len(), 2);

        let m = &model.methods[0];
        assert_eq!(m.owner, "CSample");
        assert_eq!(m.name, "MethodP1");
        assert_eq!(m.return_type, "bool");
        assert_eq!(m.params[0].name, "lLimitHorizon");
        assert_eq!(m.target_file.as_deref(), Some("CSample"));
        assert_eq!(
            m.impl_body.as_deref(),
            Some("if (lLimitHorizon > 0)\n    return true;\n\nreturn false;")
        );
        assert_eq!(m.impl_indent, 4);
    }

    #[test]
    fn parses_constructor_with_initializer_list() {
        let model = parse(SAMPLE);
        let ctor = &model.methods[1];
        assert!(ctor.is_constructor);
        assert_eq!(ctor.initializer_list.len(), 1);
        assert_eq!(ctor.initializer_list[0].member, "m_nCount");
        assert_eq!(ctor.initializer_list[0].value, "0");
    }

    #[test]
    fn parses_static_member_initialization() {
        let model = parse(SAMPLE);
        assert_eq!(model.static_inits.len(), 1);
        let init = &model.static_inits[0];
        assert_eq!(init.owner, "CSample");
        assert_eq!(init.member, "s_nInstances");
        assert_eq!(init.value, "0");
        assert_eq!(init.type_text, "int");
        assert!(!init.is_array);
    }

    #[test]
    fn textual_order_spans_construct_kinds() {
        let model = parse(SAMPLE);
        assert_eq!(model.methods[0].order_index, 0);
        assert_eq!(model.methods[1].order_index, 1);
        assert_eq!(model.static_inits[0].order_index, 2);
    }

    #[test]
    fn collects_file_top_comments() {
        let model = parse(SAMPLE);
        assert_eq!(model.file_top_comments, vec!["// Implementation notes."]);
    }

    #[test]
    fn attaches_source_comments_to_methods() {
        let text = "// Checks the horizon.\nbool CSample::Check(int n)\n{\n    return n > 0;\n}\n";
        let model = parse(text);
        assert_eq!(
            model.methods[0].source_comments.lines,
            vec!["// Checks the horizon."]
        );
    }

    #[test]
    fn preserves_source_region_markers() {
        let text = "#pragma region Core\nvoid CSample::Run()\n{\n}\n#pragma endregion\n";
        let model = parse(text);
        let m = &model.methods[0];
        assert_eq!(m.source_region.start, "#region Core");
        assert_eq!(m.source_region.end, "#endregion");
    }

    #[test]
    fn recovers_signatures_with_nested_parens() {
        let text = "void CSample::Apply(int (n), bool b)\n{\n}\n";
        let model = parse(text);
        assert_eq!(model.methods.len(), 1);
        assert_eq!(model.methods[0].params.len(), 2);
    }

    #[test]
    fn multiline_parameter_lists_are_not_duplicated() {
        let text =
            "void CSample::Configure(const CString& cName,\n    bool bFlag)\n{\n    return;\n}\n";
        let model = parse(text);
        assert_eq!(model.methods.len(), 1);
        let m = &model.methods[0];
        assert_eq!(m.params.len(), 2);
        assert!(m.params[1].starts_on_new_line);
    }

    #[test]
    fn parses_array_static_init_with_brace_value() {
        let text = "int CSample::s_nTable[3] = {1, 2, 3};\n";
        let model = parse(text);
        let init = &model.static_inits[0];
        assert!(init.is_array);
        assert_eq!(init.array_size, "3");
        assert_eq!(init.value, "{1, 2, 3}");
    }

    #[test]
    fn embedded_struct_and_constructor_reclassification() {
        let text = "struct TPair\n{\n    int nKey;\n    int nValue;\n};\n\nTPair(int nK) : nKey(nK)\n{\n}\n";
        let model = parse(text);
        assert_eq!(model.structs.len(), 1);
        assert_eq!(model.structs[0].name, "TPair");

        let ctor = model.methods.iter().find(|m| m.is_constructor);
        let ctor = ctor.as_ref().unwrap();
        assert_eq!(ctor.owner, "TPair");
        assert_eq!(ctor.initializer_list[0].member, "nKey");
    }

    #[test]
    fn free_function_is_local_until_reconciled() {
        let text = "static bool IsPositive(int n)\n{\n    return n > 0;\n}\n";
        let model = parse(text);
        assert_eq!(model.methods.len(), 1);
        let m = &model.methods[0];
        assert!(m.is_local);
        assert!(m.is_static);
        assert_eq!(m.name, "IsPositive");
        assert!(m.owner.is_empty());
    }

    #[test]
    fn parses_source_defines_as_private_constants() {
        let text = "// limit\n#define MAX_DEPTH 8\n\nvoid CSample::Run()\n{\n}\n";
        let model = parse(text);
        assert_eq!(model.defines.len(), 1);
        assert_eq!(model.defines[0].name, "MAX_DEPTH");
        assert!(!model.defines[0].from_header);
        assert_eq!(model.defines[0].preceding_comments.lines, vec!["// limit"]);
    }

    #[test]
    fn const_method_flag_is_captured() {
        let text = "int CSample::GetCount() const\n{\n    return m_nCount;\n}\n";
        let model = parse(text);
        assert!(model.methods[0].is_const);
    }
}
