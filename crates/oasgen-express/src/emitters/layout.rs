//! Layout pass for generated JavaScript.
//!
//! Templates are written flush-left; this pass indents them by bracket depth
//! so the output reads as hand-formatted code. It only touches whitespace.

const INDENT: &str = "  ";

/// Re-indent JavaScript source.
///
/// - two spaces per open `{`, `(` or `[`, with leading closers dedented
/// - runs of spaces between tokens collapsed to one
/// - trailing whitespace removed, at most one blank line in a row
/// - exactly one trailing newline
///
/// String literals and `//` comments are left untouched. Applying the pass
/// to its own output returns the same text.
pub fn reformat(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut depth = 0usize;
    let mut blank_pending = false;

    for raw in source.lines() {
        let (line, shape) = normalize_line(raw.trim());
        if line.is_empty() {
            blank_pending = !out.is_empty();
            continue;
        }
        if blank_pending {
            out.push('\n');
            blank_pending = false;
        }

        let indent = depth.saturating_sub(shape.leading_closers);
        for _ in 0..indent {
            out.push_str(INDENT);
        }
        out.push_str(&line);
        out.push('\n');

        depth = (depth + shape.opens).saturating_sub(shape.closes);
    }

    out
}

#[derive(Debug, Default, PartialEq, Eq)]
struct LineShape {
    opens: usize,
    closes: usize,
    /// Closers before the first other token, e.g. both in `});`.
    leading_closers: usize,
}

/// Collapse inner whitespace of a trimmed line and count its brackets.
fn normalize_line(line: &str) -> (String, LineShape) {
    let mut text = String::with_capacity(line.len());
    let mut shape = LineShape::default();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut leading = true;
    let mut prev_space = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            text.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        if ch.is_whitespace() {
            if !prev_space {
                text.push(' ');
            }
            prev_space = true;
            continue;
        }
        prev_space = false;

        match ch {
            '/' if chars.peek() == Some(&'/') => {
                text.push(ch);
                text.extend(chars.by_ref());
                break;
            }
            '\'' | '"' | '`' => {
                quote = Some(ch);
                leading = false;
            }
            '{' | '(' | '[' => {
                shape.opens += 1;
                leading = false;
            }
            '}' | ')' | ']' => {
                shape.closes += 1;
                if leading {
                    shape.leading_closers += 1;
                }
            }
            _ => leading = false,
        }
        text.push(ch);
    }

    (text, shape)
}
