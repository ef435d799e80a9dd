//! Comment-block and region-marker collection shared by the header and
//! source parsers.

use cpp2cs_model::{CommentBlock, RegionMarker};
use regex::Regex;
use std::sync::OnceLock;

/// Comment lines found immediately above a construct, with the
/// indentation baseline of the first line.
#[derive(Debug, Clone, Default)]
pub struct CollectedComments {
    pub lines: Vec<String>,
    pub indent: usize,
}

impl CollectedComments {
    pub fn into_block(self) -> CommentBlock {
        CommentBlock::new(self.lines)
    }
}

/// How a `#pragma region` pair is rendered in generated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStyle {
    /// Header-origin markers degrade to comments (`//#region ...`).
    Commented,
    /// Source-origin markers survive as C# regions (`#region ...`).
    Native,
}

fn pragma_region_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*#pragma\s+(region|endregion)(?:\s+(.*))?$")
            .unwrap_or_else(|_| unreachable!("static pattern"))
    })
}

/// Match a `#pragma region` / `#pragma endregion` line. Returns
/// `(is_start, description)`.
fn match_pragma_region(line: &str) -> Option<(bool, String)> {
    let caps = pragma_region_re().captures(line)?;
    let is_start = &caps[1] == "region";
    let description = caps
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    Some((is_start, description))
}

fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.ends_with("*/")
}

/// Walk backwards from `index` and collect the contiguous comment block
/// above it, multi-line `/* ... */` blocks included. Blank lines
/// between comment blocks are kept when more comments lie above them;
/// a blank gap with code above it ends the walk.
pub fn collect_preceding_comments(lines: &[&str], index: usize) -> CollectedComments {
    let mut block: Vec<String> = Vec::new();
    let mut in_multi_line = false;

    let mut i = index as isize - 1;
    // Skip blanks immediately above the construct.
    while i >= 0 && lines[i as usize].trim().is_empty() {
        i -= 1;
    }

    while i >= 0 {
        let raw = lines[i as usize];
        let line = raw.trim();

        if line.starts_with("//") {
            block.insert(0, raw.to_string());
            i -= 1;
            continue;
        }

        if line.ends_with("*/") {
            in_multi_line = !line.starts_with("/*");
            block.insert(0, raw.to_string());
            i -= 1;
            continue;
        }

        if in_multi_line {
            if line.starts_with("/*") {
                in_multi_line = false;
            }
            block.insert(0, raw.to_string());
            i -= 1;
            continue;
        }

        if line.is_empty() {
            // Keep the gap only when another comment block sits above.
            let mut peek = i - 1;
            while peek >= 0 && lines[peek as usize].trim().is_empty() {
                peek -= 1;
            }
            if peek >= 0 {
                let above = lines[peek as usize].trim();
                if above.starts_with("//") || above.ends_with("*/") {
                    block.insert(0, raw.to_string());
                    i -= 1;
                    continue;
                }
            }
        }

        break;
    }

    let indent = block
        .first()
        .map(|l| cpp2cs_common::leading_indent_width(l))
        .unwrap_or(0);

    CollectedComments {
        lines: block,
        indent,
    }
}

/// Find a `#pragma region` directly above the lines `start..=end` and
/// the matching `#pragma endregion` below them, skipping blank and
/// comment lines only. `Native` style requires the start marker before
/// it looks for an end at all.
pub fn region_around(lines: &[&str], start: usize, end: usize, style: RegionStyle) -> RegionMarker {
    let mut marker = RegionMarker::default();

    let mut i = start as isize - 1;
    while i >= 0 {
        let line = lines[i as usize].trim();
        if line.is_empty() {
            i -= 1;
            continue;
        }
        if let Some((true, description)) = match_pragma_region(line) {
            marker.start = match style {
                RegionStyle::Commented => format!("//#region {description}").trim().to_string(),
                RegionStyle::Native => format!("#region {description}").trim().to_string(),
            };
            break;
        }
        if !is_comment_line(line) {
            break;
        }
        i -= 1;
    }

    if style == RegionStyle::Native && marker.start.is_empty() {
        return marker;
    }

    for raw in lines.iter().skip(end + 1) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((false, description)) = match_pragma_region(line) {
            marker.end = match style {
                RegionStyle::Commented => format!("//#endregion {description}").trim().to_string(),
                RegionStyle::Native if description.is_empty() => "#endregion".to_string(),
                RegionStyle::Native => format!("#endregion {description}"),
            };
            break;
        }
        if !is_comment_line(line) && match_pragma_region(line).is_none() {
            break;
        }
    }

    marker
}
