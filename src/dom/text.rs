//! Plain-text view of markup, for the terminal content pane.

use super::tokenizer::{Token, Tokenizer};

/// Elements that start a new line when opened or closed.
const BLOCK_ELEMENTS: &[&str] = &[
    "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "section", "header", "footer", "table",
    "thead", "tbody", "tr", "ul", "ol", "li", "br", "hr", "canvas", "form", "article",
];

/// Decodes the handful of entities fragments use.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Escapes text for interpolation into markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Flattens markup into non-empty text lines. Block elements break lines,
/// table cells are joined with ` | `, whitespace runs collapse to one space.
pub fn to_lines(markup: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_raw = false;

    let mut push_line = |current: &mut String| {
        let line = current.split_whitespace().collect::<Vec<_>>().join(" ");
        if !line.is_empty() {
            lines.push(decode_entities(&line));
        }
        current.clear();
    };

    for token in Tokenizer::new(markup) {
        match token {
            Token::Start { name, .. } if matches!(name.as_str(), "script" | "style") => {
                in_raw = true;
            }
            Token::End { name, .. } if matches!(name.as_str(), "script" | "style") => {
                in_raw = false;
            }
            Token::Start { name, .. } | Token::End { name, .. }
                if BLOCK_ELEMENTS.contains(&name.as_str()) =>
            {
                push_line(&mut current);
            }
            Token::Start { name, .. } if name == "td" || name == "th" => {
                if !current.trim().is_empty() {
                    current.push_str(" | ");
                }
            }
            Token::Text(text) if !in_raw => {
                current.push(' ');
                current.push_str(text);
            }
            _ => {}
        }
    }
    push_line(&mut current);
    lines
}
