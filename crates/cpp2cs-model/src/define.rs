use crate::CommentBlock;
use smol_str::SmolStr;

/// A `#define NAME value` mapped to a C# constant.
#[derive(Debug, Clone)]
pub struct DefineModel {
    pub name: SmolStr,
    pub value: String,
    /// Declared type for the generated constant, inferred from the
    /// value's shape (string literal, char, integer, floating point).
    pub target_type: SmolStr,
    /// Stem of the file the define came from.
    pub origin_file: String,
    /// Header defines render internal constants; source defines private.
    pub from_header: bool,
    pub preceding_comments: CommentBlock,
    /// Comment trailing the define on the same line.
    pub postfix_comment: String,
}

impl DefineModel {
    /// Build from the raw text after the define's name; a trailing
    /// same-line comment is split off before type inference.
    pub fn new(name: impl Into<SmolStr>, raw_value: impl Into<String>) -> Self {
        let raw_value = raw_value.into();
        let (value, postfix_comment) = split_postfix_comment(&raw_value);
        let target_type = Self::infer_type(&value);
        Self {
            name: name.into(),
            value,
            target_type,
            origin_file: String::new(),
            from_header: true,
            preceding_comments: CommentBlock::default(),
            postfix_comment,
        }
    }

    /// Static shape-based inference; no expression evaluation.
    fn infer_type(value: &str) -> SmolStr {
        let v = value.trim();
        if v.starts_with('"') || v.starts_with("_T(\"") {
            SmolStr::new("string")
        } else if v.starts_with('\'') {
            SmolStr::new("char")
        } else if v
            .strip_suffix(['L', 'l'])
            .is_some_and(|n| n.parse::<i64>().is_ok())
        {
            SmolStr::new("long")
        } else if v.parse::<i64>().is_ok() {
            SmolStr::new("int")
        } else if v.parse::<f64>().is_ok() {
            SmolStr::new("double")
        } else if v == "true" || v == "false" || v == "TRUE" || v == "FALSE" {
            SmolStr::new("bool")
        } else {
            SmolStr::new("int")
        }
    }
}

/// Split a same-line `//` or `/* */` comment off a define's value,
/// ignoring comment markers inside string literals.
fn split_postfix_comment(raw: &str) -> (String, String) {
    let chars: Vec<char> = raw.chars().collect();
    let mut in_string = false;
    let mut escape = false;
    for i in 0..chars.len() {
        let c = chars[i];
        if in_string {
            if escape {
                escape = false;
            } else if c == '\\' {
                escape = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
            continue;
        }
        if c == '/' && matches!(chars.get(i + 1), Some('/') | Some('*')) {
            let value: String = chars[..i].iter().collect();
            let comment: String = chars[i..].iter().collect();
            return (value.trim().to_string(), comment.trim().to_string());
        }
    }
    (raw.trim().to_string(), String::new())
}
