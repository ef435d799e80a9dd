//! Parameter list tokenizer.
//!
//! Splits the raw text between a method's outer parentheses into
//! ordered blocks, one per parameter. A comma only terminates a block
//! at zero `()`/`<>` depth outside comments and string literals, and a
//! bounded lookahead decides whether a comment trailing the comma
//! belongs to the parameter just closed or to the next one.

/// One raw parameter block, comments and whitespace included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamBlock {
    pub raw: String,
    pub index: usize,
    pub starts_on_new_line: bool,
    pub leading_indent: usize,
}

/// Split a parameter-list string into blocks.
///
/// Empty or whitespace-only input yields an empty list; a trailing
/// comma produces no phantom block.
pub fn split_into_blocks(text: &str) -> Vec<ParamBlock> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut block_index = 0;

    let mut in_block_comment = false;
    let mut in_line_comment = false;
    let mut in_string = false;
    let mut escape_next = false;
    let mut paren_depth = 0i32;
    let mut angle_depth = 0i32;

    let mut starts_on_new_line = false;
    let mut leading_indent = 0usize;
    let mut seen_non_ws = false;

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let next = chars.get(i + 1).copied().unwrap_or('\0');

        if ch == '\n' {
            current.push(ch);
            in_line_comment = false;
            if !seen_non_ws {
                starts_on_new_line = true;
            }
            i += 1;
            continue;
        }

        if in_string {
            current.push(ch);
            if escape_next {
                escape_next = false;
            } else if ch == '\\' {
                escape_next = true;
            } else if ch == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if ch == '"' && !in_block_comment && !in_line_comment {
            in_string = true;
            current.push(ch);
            i += 1;
            continue;
        }

        if in_line_comment {
            current.push(ch);
            i += 1;
            continue;
        }

        if !in_block_comment && ch == '/' && next == '/' {
            in_line_comment = true;
            current.push(ch);
            i += 1;
            continue;
        }

        if in_block_comment {
            current.push(ch);
            if ch == '*' && next == '/' {
                current.push(next);
                i += 2;
                in_block_comment = false;
                continue;
            }
            i += 1;
            continue;
        }

        if ch == '/' && next == '*' {
            in_block_comment = true;
            current.push(ch);
            i += 1;
            continue;
        }

        match ch {
            '(' => {
                paren_depth += 1;
                current.push(ch);
                i += 1;
                continue;
            }
            ')' => {
                paren_depth -= 1;
                current.push(ch);
                i += 1;
                continue;
            }
            '<' => {
                angle_depth += 1;
                current.push(ch);
                i += 1;
                continue;
            }
            '>' => {
                angle_depth -= 1;
                current.push(ch);
                i += 1;
                continue;
            }
            _ => {}
        }

        if !seen_non_ws && (ch == ' ' || ch == '\t') {
            if starts_on_new_line {
                leading_indent += 1;
            }
            current.push(ch);
            i += 1;
            continue;
        }

        if !seen_non_ws && !ch.is_whitespace() {
            seen_non_ws = true;
        }

        if ch == ',' && paren_depth == 0 && angle_depth == 0 {
            // Classify what follows the comma: a line comment always
            // attaches to the parameter just closed; a block comment
            // followed only by whitespace-then-newline does too; a block
            // comment followed by further content belongs to the next
            // parameter.
            let (consumed, consumed_newline) = attach_trailing_comment(&chars, i + 1, &mut current);
            i += 1 + consumed;

            if !current.trim().is_empty() {
                blocks.push(ParamBlock {
                    raw: std::mem::take(&mut current),
                    index: block_index,
                    starts_on_new_line,
                    leading_indent,
                });
                block_index += 1;
            } else {
                current.clear();
            }

            starts_on_new_line = consumed_newline;
            leading_indent = 0;
            seen_non_ws = false;
            continue;
        }

        current.push(ch);
        i += 1;
    }

    if !current.trim().is_empty() {
        blocks.push(ParamBlock {
            raw: current,
            index: block_index,
            starts_on_new_line,
            leading_indent,
        });
    }

    blocks
}

/// Lookahead after a top-level comma. Appends to `current` any trailing
/// comment that belongs to the preceding parameter and returns how many
/// characters past the comma were consumed, plus whether a newline was
/// consumed (the next block then starts on a new line).
fn attach_trailing_comment(chars: &[char], start: usize, current: &mut String) -> (usize, bool) {
    let mut j = start;
    let mut pending = String::new();

    while j < chars.len() && (chars[j] == ' ' || chars[j] == '\t') {
        pending.push(chars[j]);
        j += 1;
    }

    let ch = chars.get(j).copied().unwrap_or('\0');
    let next = chars.get(j + 1).copied().unwrap_or('\0');

    if ch == '/' && next == '/' {
        // Line comment: runs to the newline, always previous parameter's.
        pending.push(ch);
        pending.push(next);
        j += 2;
        while j < chars.len() && chars[j] != '\n' {
            pending.push(chars[j]);
            j += 1;
        }
        let mut consumed_newline = false;
        if j < chars.len() {
            pending.push(chars[j]);
            j += 1;
            consumed_newline = true;
        }
        current.push_str(&pending);
        return (j - start, consumed_newline);
    }

    if ch == '/' && next == '*' {
        let mut comment = String::new();
        comment.push(ch);
        comment.push(next);
        j += 2;
        while j < chars.len() {
            let c = chars[j];
            let n = chars.get(j + 1).copied().unwrap_or('\0');
            comment.push(c);
            j += 1;
            if c == '*' && n == '/' {
                comment.push(n);
                j += 1;
                break;
            }
        }

        // What follows the comment decides ownership.
        let mut k = j;
        while k < chars.len() {
            let c = chars[k];
            if c == '\n' {
                pending.push_str(&comment);
                for idx in j..=k {
                    pending.push(chars[idx]);
                }
                current.push_str(&pending);
                return (k + 1 - start, true);
            }
            if c != ' ' && c != '\t' && c != '\r' {
                // Belongs to the next parameter; consume nothing.
                return (0, false);
            }
            k += 1;
        }

        // End of input with only whitespace after the comment.
        pending.push_str(&comment);
        current.push_str(&pending);
        return (j - start, false);
    }

    (0, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(text: &str) -> Vec<String> {
        split_into_blocks(text)
            .into_iter()
            .map(|b| b.raw.trim().to_string())
            .collect()
    }

    #[test]
    fn splits_simple_list() {
        assert_eq!(raws("int a, bool b"), vec!["int a", "bool b"]);
    }

    #[test]
    fn trailing_comma_produces_no_phantom_block() {
        assert_eq!(raws("int a, bool b,"), vec!["int a", "bool b"]);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(split_into_blocks("").is_empty());
        assert!(split_into_blocks("   \n\t ").is_empty());
    }

    #[test]
    fn ignores_commas_inside_angle_brackets() {
        assert_eq!(
            raws("vector<pair<int,int>> data, bool flag"),
            vec!["vector<pair<int,int>> data", "bool flag"]
        );
    }

    #[test]
    fn ignores_commas_inside_default_value_calls() {
        assert_eq!(
            raws("int a = f(1, 2), bool b"),
            vec!["int a = f(1, 2)", "bool b"]
        );
    }

    #[test]
    fn ignores_commas_inside_string_literals() {
        assert_eq!(
            raws(r#"const char* s = "a,b", int n"#),
            vec![r#"const char* s = "a,b""#, "int n"]
        );
    }

    #[test]
    fn line_comment_attaches_to_preceding_parameter() {
        let blocks = split_into_blocks("int a, // count\nbool b");
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].raw.contains("// count"));
        assert!(!blocks[1].raw.contains("//"));
    }

    #[test]
    fn block_comment_before_newline_attaches_to_preceding() {
        let blocks = split_into_blocks("int a, /* count */\nbool b");
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].raw.contains("/* count */"));
    }

    #[test]
    fn block_comment_followed_by_content_attaches_to_next() {
        let blocks = split_into_blocks("int a, /* next */ bool b");
        assert_eq!(blocks.len(), 2);
        assert!(!blocks[0].raw.contains("/*"));
        assert!(blocks[1].raw.contains("/* next */"));
    }

    #[test]
    fn tracks_new_line_starts_and_indent() {
        let blocks = split_into_blocks("const CString& cParam1,\n    const bool &bParam2");
        assert_eq!(blocks.len(), 2);
        assert!(!blocks[0].starts_on_new_line);
        assert!(blocks[1].starts_on_new_line);
        assert_eq!(blocks[1].leading_indent, 4);
    }

    #[test]
    fn comment_only_block_between_commas_is_dropped() {
        // A fully commented-out parameter still forms a block because it
        // has non-whitespace text; it is filtered later by the extractor
        // producing an empty type. Here just ensure no panic and stable
        // split.
        let blocks = split_into_blocks("int a, /* bool gone, */ int b");
        assert_eq!(blocks.len(), 2);
    }
}
