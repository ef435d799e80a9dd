//! Parameter component extraction.
//!
//! Turns a raw [`ParamBlock`](crate::ParamBlock) into a structured
//! [`ParameterModel`]: positioned comments, default value, base type,
//! name and the canonical signature used for cross-file matching.

use crate::blocks::{split_into_blocks, ParamBlock};
use cpp2cs_model::{MemberInitializer, ParameterModel, PositionedComment};

/// Parse a complete parameter list (the text between a method's outer
/// parentheses) into structured parameters.
pub fn parse_parameter_list(text: &str) -> Vec<ParameterModel> {
    split_into_blocks(text)
        .iter()
        .filter_map(extract_components)
        .collect()
}

/// Extract the components of one parameter block. Returns `None` for
/// blocks whose non-comment content is empty (fully commented-out
/// parameters).
pub fn extract_components(block: &ParamBlock) -> Option<ParameterModel> {
    let (cleaned, comments) = extract_comments(&block.raw);

    let (type_text, name, default_value) = parse_type_name_default(&cleaned);
    if type_text.is_empty() && name.is_empty() {
        return None;
    }

    let is_const = type_text.split_whitespace().any(|t| t == "const")
        || tokenize(&type_text).iter().any(|t| t == "const");
    let is_pointer = type_text.contains('*');
    let is_reference = type_text.contains('&') && !type_text.contains("&&");

    let base_type = tokenize(&type_text)
        .into_iter()
        .filter(|t| t != "const" && t != "*" && t != "&")
        .collect::<Vec<_>>()
        .join(" ");

    let canonical = canonical_signature(&type_text);

    let original_text = if name.is_empty() {
        type_text.clone()
    } else {
        format!("{type_text} {name}")
    };

    Some(ParameterModel {
        base_type: base_type.into(),
        name: name.into(),
        is_const,
        is_pointer,
        is_reference,
        default_value,
        comments,
        canonical,
        starts_on_new_line: block.starts_on_new_line,
        leading_indent: block.leading_indent,
        original_text,
    })
}

/// Remove comments from a block, classifying each as prefix or suffix
/// using "has non-comment content been seen yet" as the position
/// oracle.
fn extract_comments(text: &str) -> (String, Vec<PositionedComment>) {
    let chars: Vec<char> = text.chars().collect();
    let mut cleaned = String::new();
    let mut comments = Vec::new();
    let mut current = String::new();
    let mut in_block = false;
    let mut in_line = false;
    let mut seen_content = false;

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let next = chars.get(i + 1).copied().unwrap_or('\0');

        if in_line {
            if ch == '\n' {
                comments.push(PositionedComment::suffix(current.trim()));
                current.clear();
                in_line = false;
            } else {
                current.push(ch);
            }
            i += 1;
            continue;
        }

        if !in_block && ch == '/' && next == '/' {
            in_line = true;
            current.push(ch);
            i += 1;
            continue;
        }

        if in_block {
            current.push(ch);
            if ch == '*' && next == '/' {
                current.push(next);
                i += 2;
                let comment = current.trim().to_string();
                if seen_content {
                    comments.push(PositionedComment::suffix(comment));
                } else {
                    comments.push(PositionedComment::prefix(comment));
                }
                current.clear();
                in_block = false;
                continue;
            }
            i += 1;
            continue;
        }

        if ch == '/' && next == '*' {
            in_block = true;
            current.push(ch);
            i += 1;
            continue;
        }

        if !ch.is_whitespace() && ch != ',' {
            seen_content = true;
        }
        cleaned.push(ch);
        i += 1;
    }

    // A line comment that ran to end of input without a newline.
    if in_line && !current.is_empty() {
        comments.push(PositionedComment::suffix(current.trim()));
    }

    (cleaned, comments)
}

/// Split off a top-level default value and the parameter name.
fn parse_type_name_default(text: &str) -> (String, String, Option<String>) {
    let text = text.trim_end_matches([',', ' ', '\t', '\n', '\r']);

    let (head, default_value) = match find_default_separator(text) {
        Some(idx) => (
            text[..idx].trim(),
            Some(text[idx + 1..].trim().to_string()),
        ),
        None => (text.trim(), None),
    };

    let (type_text, name) = split_type_and_name(head);
    (type_text, name, default_value)
}

/// Index of an `=` outside parentheses, brackets and angle brackets.
fn find_default_separator(text: &str) -> Option<usize> {
    let mut paren = 0i32;
    let mut angle = 0i32;
    let mut bracket = 0i32;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' => paren += 1,
            ')' => paren -= 1,
            '<' => angle += 1,
            '>' => angle -= 1,
            '[' => bracket += 1,
            ']' => bracket -= 1,
            '=' if paren == 0 && angle == 0 && bracket == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// The parameter name is the last token that is neither a modifier nor
/// an array bracket group; a trailing modifier means the parameter is
/// unnamed (legal in declaration-only signatures).
fn split_type_and_name(text: &str) -> (String, String) {
    let text = text.trim();
    if text.is_empty() {
        return (String::new(), String::new());
    }

    let tokens = tokenize(text);
    if tokens.is_empty() {
        return (text.to_string(), String::new());
    }

    let last = tokens.last().unwrap();
    if last == "*" || last == "&" || last == "const" {
        return (text.to_string(), String::new());
    }

    let mut name = String::new();
    let mut name_index = None;
    for (i, token) in tokens.iter().enumerate().rev() {
        if token.starts_with('[') && token.ends_with(']') {
            continue;
        }
        if token == "*" || token == "&" || token == "const" {
            continue;
        }
        name = token.clone();
        name_index = Some(i);
        break;
    }

    let Some(name_index) = name_index else {
        return (text.to_string(), String::new());
    };

    // Single token means it is the type, not a name.
    if tokens.len() == 1 {
        return (text.to_string(), String::new());
    }

    let type_tokens: Vec<&str> = tokens
        .iter()
        .enumerate()
        .filter(|(i, t)| *i != name_index && !(t.starts_with('[') && t.ends_with(']')))
        .map(|(_, t)| t.as_str())
        .collect();

    (join_type_tokens(&type_tokens), name)
}

/// Join type tokens with canonical spacing: no space before or after
/// `*` / `&`.
fn join_type_tokens(tokens: &[&str]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0
            && *token != "*"
            && *token != "&"
            && tokens[i - 1] != "*"
            && tokens[i - 1] != "&"
        {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

/// Tokenize a parameter's type/name text on whitespace, with `*`, `&`
/// and `[...]` groups as their own tokens and template contents kept
/// intact.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut angle_depth = 0i32;
    let mut in_brackets = false;

    for ch in text.chars() {
        if ch == '[' && !in_brackets && angle_depth == 0 {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            in_brackets = true;
            current.push(ch);
            continue;
        }
        if in_brackets {
            current.push(ch);
            if ch == ']' {
                tokens.push(std::mem::take(&mut current));
                in_brackets = false;
            }
            continue;
        }
        match ch {
            '<' => {
                angle_depth += 1;
                current.push(ch);
            }
            '>' => {
                angle_depth -= 1;
                current.push(ch);
            }
            _ if angle_depth > 0 => current.push(ch),
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '*' | '&' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(ch.to_string());
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Build the canonical signature for a parameter type: `const` first,
/// base tokens next, `*` then `&` last, single-space separated. This
/// key, not the raw text, is what declaration/implementation matching
/// compares.
pub fn canonical_signature(type_text: &str) -> String {
    let tokens = tokenize(type_text);
    let mut normalized = Vec::new();

    if tokens.iter().any(|t| t == "const") {
        normalized.push("const".to_string());
    }
    for token in &tokens {
        if token == "const" || token == "*" || token == "&" {
            continue;
        }
        normalized.push(token.clone());
    }
    if tokens.iter().any(|t| t == "*") {
        normalized.push("*".to_string());
    }
    if tokens.iter().any(|t| t == "&") {
        normalized.push("&".to_string());
    }

    normalized.join(" ")
}

/// Parse a constructor member-initializer list, `m_a(0), m_b{false}`,
/// into name/value pairs. Commas inside parentheses or braces do not
/// split entries.
pub(crate) fn parse_initializer_list(text: &str) -> Vec<MemberInitializer> {
    let mut entries = Vec::new();
    for part in split_initializer_entries(text) {
        let part = part.trim();
        let Some(open) = part.find(['(', '{']) else {
            continue;
        };
        let close = match part.as_bytes()[open] {
            b'(' => part.rfind(')'),
            _ => part.rfind('}'),
        };
        let Some(close) = close else { continue };
        if close <= open {
            continue;
        }
        let member = part[..open].trim();
        if member.is_empty() {
            continue;
        }
        entries.push(MemberInitializer {
            member: member.into(),
            value: part[open + 1..close].trim().to_string(),
        });
    }
    entries
}

fn split_initializer_entries(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut paren = 0i32;
    let mut brace = 0i32;
    for c in text.chars() {
        match c {
            '(' => paren += 1,
            ')' => paren -= 1,
            '{' => brace += 1,
            '}' => brace -= 1,
            ',' if paren == 0 && brace == 0 => {
                parts.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Strip the minimum common leading whitespace from a multi-line block,
/// preserving relative indentation. Blank lines stay empty. Done once
/// at capture so emission only has to add the target indentation.
pub fn strip_min_indent(body: &str) -> String {
    if body.trim().is_empty() {
        return String::new();
    }

    let expanded = body.replace('\t', "    ");
    let lines: Vec<&str> = expanded.split('\n').collect();

    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    let stripped: Vec<String> = lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else if l.len() > min_indent {
                l[min_indent..].trim_end().to_string()
            } else {
                l.trim_start().trim_end().to_string()
            }
        })
        .collect();

    stripped.join("\n").trim_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpp2cs_model::CommentPosition;

    fn one(text: &str) -> ParameterModel {
        let params = parse_parameter_list(text);
        assert_eq!(params.len(), 1, "expected one parameter from {text:?}");
        params.into_iter().next().unwrap()
    }

    #[test]
    fn pointer_spacing_is_whitespace_invariant() {
        let a = one("CAgrMT* pmtTable");
        let b = one("CAgrMT *pmtTable");
        assert_eq!(a.canonical, b.canonical);
        assert_eq!(a.canonical, "CAgrMT *");
        assert_eq!(a.name, "pmtTable");
        assert_eq!(b.name, "pmtTable");
    }

    #[test]
    fn const_placement_is_canonicalized() {
        let a = one("const TAttId& attId");
        let b = one("TAttId const & attId");
        assert_eq!(a.canonical, b.canonical);
        assert_eq!(a.canonical, "const TAttId &");
    }

    #[test]
    fn splits_default_value() {
        let p = one("const agrint& int2=0");
        assert_eq!(p.default_value.as_deref(), Some("0"));
        assert_eq!(p.base_type, "agrint");
        assert_eq!(p.name, "int2");
        assert!(p.is_const);
        assert!(p.is_reference);
    }

    #[test]
    fn default_with_nested_call_commas_survives() {
        let p = one("CString cPar = _T(\"xyz\")");
        assert_eq!(p.default_value.as_deref(), Some("_T(\"xyz\")"));
        assert_eq!(p.name, "cPar");
    }

    #[test]
    fn unnamed_parameter_has_empty_name() {
        let p = one("const TAttId&");
        assert_eq!(p.name, "");
        assert_eq!(p.base_type, "TAttId");
        assert!(p.is_reference);
    }

    #[test]
    fn bare_type_is_not_a_name() {
        let p = one("bool");
        assert_eq!(p.name, "");
        assert_eq!(p.base_type, "bool");
    }

    #[test]
    fn array_brackets_stay_out_of_type_and_name() {
        let p = one("char buf[32]");
        assert_eq!(p.base_type, "char");
        assert_eq!(p.name, "buf");
    }

    #[test]
    fn prefix_comment_is_classified_prefix() {
        let p = one("/* note */ const TDimValue& v");
        assert_eq!(p.comments.len(), 1);
        assert_eq!(p.comments[0].position, CommentPosition::Prefix);
        assert_eq!(p.comments[0].text, "/* note */");
    }

    #[test]
    fn suffix_comment_is_classified_suffix() {
        let p = one("const TDimValue& v /* note */");
        assert_eq!(p.comments.len(), 1);
        assert_eq!(p.comments[0].position, CommentPosition::Suffix);
    }

    #[test]
    fn trailing_line_comment_stays_with_preceding_parameter() {
        let params = parse_parameter_list("int v, // trailing\nbool w");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].comments.len(), 1);
        assert_eq!(params[0].comments[0].position, CommentPosition::Suffix);
        assert!(params[1].comments.is_empty());
    }

    #[test]
    fn commented_out_parameter_is_dropped() {
        let params = parse_parameter_list("int a, /* bool gone */");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "a");
    }

    #[test]
    fn template_type_keeps_its_arguments() {
        let p = one("std::vector<std::pair<int,int>> data");
        assert_eq!(p.base_type, "std::vector<std::pair<int,int>>");
        assert_eq!(p.name, "data");
    }

    #[test]
    fn initializer_list_respects_nested_commas() {
        let entries = parse_initializer_list("m_n(0), m_p(f(1, 2)), m_b{false}");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].member, "m_n");
        assert_eq!(entries[0].value, "0");
        assert_eq!(entries[1].value, "f(1, 2)");
        assert_eq!(entries[2].member, "m_b");
        assert_eq!(entries[2].value, "false");
    }

    #[test]
    fn strip_min_indent_preserves_relative_depth() {
        let body = "        if (x)\n            return 1;\n\n        return 0;";
        let stripped = strip_min_indent(body);
        assert_eq!(stripped, "if (x)\n    return 1;\n\nreturn 0;");
    }

    #[test]
    fn strip_min_indent_handles_tabs() {
        let body = "\tif (a)\n\t\treturn;";
        assert_eq!(strip_min_indent(body), "if (a)\n    return;");
    }
}
