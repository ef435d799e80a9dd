//! Indentation management for generated C# output.
//!
//! All output uses a fixed four-space unit. Captured blocks were
//! normalized to a zero baseline at parse time; emission reapplies the
//! indentation of the target nesting level while preserving relative
//! depth.

pub const INDENT_UNIT: usize = 4;

/// Nesting levels of the generated file.
pub mod levels {
    /// File-scoped namespace contents.
    pub const NAMESPACE: usize = 0;
    /// Class/interface declaration.
    pub const TYPE: usize = 1;
    /// Fields, constants, method signatures.
    pub const MEMBER: usize = 2;
    /// Statements inside a method body.
    pub const BODY: usize = 3;
}

pub fn indent_for(level: usize) -> String {
    " ".repeat(level * INDENT_UNIT)
}

/// Leading width of the first non-empty line, tabs as four columns.
pub fn detect_indent(block: &str) -> usize {
    block
        .split('\n')
        .find(|l| !l.trim().is_empty())
        .map(cpp2cs_common::leading_indent_width)
        .unwrap_or(0)
}

/// Reindent a block from its original baseline to a target level.
///
/// Relative indentation below the baseline is preserved. Blank lines
/// stay truly empty (never padded to the target indent) and
/// consecutive blank lines collapse to one; leading and trailing
/// blank lines are dropped.
pub fn reindent(block: &str, original_indent: usize, level: usize) -> String {
    if block.trim().is_empty() {
        return String::new();
    }

    let target = indent_for(level);
    let mut out: Vec<String> = Vec::new();
    let mut last_blank = false;

    for line in block.split('\n') {
        if line.trim().is_empty() {
            if !last_blank && !out.is_empty() {
                out.push(String::new());
            }
            last_blank = true;
            continue;
        }
        last_blank = false;

        let expanded = line.replace('\t', "    ");
        let trimmed = expanded.trim_start();
        let width = cpp2cs_common::leading_indent_width(&expanded);
        let relative = width.saturating_sub(original_indent);
        out.push(format!("{target}{}{trimmed}", " ".repeat(relative)));
    }

    while matches!(out.last(), Some(l) if l.is_empty()) {
        out.pop();
    }

    out.join("\n")
}

/// Reindent a comment block to a target level.
pub fn reindent_comments(comments: &[String], original_indent: usize, level: usize) -> String {
    if comments.is_empty() {
        return String::new();
    }
    reindent(&comments.join("\n"), original_indent, level)
}
