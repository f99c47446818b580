#![forbid(unsafe_code)]

//! Normalization of embedded text blocks
//!
//! Descriptions are usually written as indented raw string literals:
//!
//! ```text
//! .description("
//!     long description
//!     on multiple lines
//!         with indenting
//! ")
//! ```
//!
//! [`deindent`] strips the indentation of the first non-blank line from every
//! line so the block renders flush left while keeping relative indentation.

/// Removes common indentation, trailing whitespace and surrounding blank lines
pub fn deindent(text: &str) -> String {
    let text = text.replace('\r', "");
    let lines: Vec<&str> = text.split('\n').map(str::trim_end).collect();

    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(first);

    let indent = leading_whitespace(lines[first]);

    lines[first..=last]
        .iter()
        .map(|line| strip_indent(line, indent))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of leading whitespace characters
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Strips up to `indent` whitespace characters from the start of `line`
fn strip_indent(line: &str, indent: usize) -> &str {
    let mut rest = line;
    for _ in 0..indent {
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) if c.is_whitespace() => rest = chars.as_str(),
            _ => break,
        }
    }
    rest
}
