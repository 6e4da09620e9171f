//! Minimal HTML tokenizer.
//!
//! Covers what page fragments actually contain: nested elements, quoted and
//! unquoted attributes, comments, doctype, void elements and raw-text
//! `<script>`/`<style>` bodies. Entities are left untouched.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
        span: Range<usize>,
    },
    End {
        name: String,
        span: Range<usize>,
    },
    Text(&'a str),
    Comment,
}

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    raw_until: Option<String>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            raw_until: None,
        }
    }

    fn text_until(&mut self, end: usize) -> Token<'a> {
        let text = &self.src[self.pos..end];
        self.pos = end;
        Token::Text(text)
    }

    fn skip_past(&mut self, from: usize, needle: &str) {
        self.pos = self.src[from..]
            .find(needle)
            .map(|i| from + i + needle.len())
            .unwrap_or(self.src.len());
    }

    fn read_name(&self, mut i: usize) -> (String, usize) {
        let bytes = self.src.as_bytes();
        let start = i;
        while i < bytes.len()
            && (bytes[i].is_ascii_alphanumeric() || matches!(bytes[i], b'-' | b'_' | b':'))
        {
            i += 1;
        }
        (self.src[start..i].to_ascii_lowercase(), i)
    }

    fn end_tag(&mut self) -> Token<'a> {
        let start = self.pos;
        let (name, after) = self.read_name(start + 2);
        self.skip_past(after, ">");
        Token::End {
            name,
            span: start..self.pos,
        }
    }

    fn start_tag(&mut self) -> Token<'a> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let (name, mut i) = self.read_name(start + 1);
        let mut attrs = Vec::new();
        let mut self_closing = false;

        loop {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= bytes.len() {
                break;
            }
            match bytes[i] {
                b'>' => {
                    i += 1;
                    break;
                }
                b'/' if bytes.get(i + 1) == Some(&b'>') => {
                    self_closing = true;
                    i += 2;
                    break;
                }
                b'/' => {
                    i += 1;
                    continue;
                }
                _ => {}
            }

            let name_start = i;
            while i < bytes.len()
                && !bytes[i].is_ascii_whitespace()
                && !matches!(bytes[i], b'=' | b'>' | b'/')
            {
                i += 1;
            }
            let attr_name = self.src[name_start..i].to_ascii_lowercase();
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            let mut value = String::new();
            if bytes.get(i) == Some(&b'=') {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                match bytes.get(i) {
                    Some(&quote) if quote == b'"' || quote == b'\'' => {
                        let value_start = i + 1;
                        let value_end = self.src[value_start..]
                            .find(quote as char)
                            .map(|n| value_start + n)
                            .unwrap_or(bytes.len());
                        value = self.src[value_start..value_end].to_string();
                        i = (value_end + 1).min(bytes.len());
                    }
                    _ => {
                        let value_start = i;
                        while i < bytes.len()
                            && !bytes[i].is_ascii_whitespace()
                            && bytes[i] != b'>'
                        {
                            i += 1;
                        }
                        value = self.src[value_start..i].to_string();
                    }
                }
            }
            if !attr_name.is_empty() {
                attrs.push((attr_name, value));
            }
        }

        self.pos = i;
        if !self_closing && matches!(name.as_str(), "script" | "style") {
            self.raw_until = Some(name.clone());
        }
        Token::Start {
            name,
            attrs,
            self_closing,
            span: start..i,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.src.len();
        if self.pos >= len {
            return None;
        }

        if let Some(tag) = self.raw_until.take() {
            let closing = format!("</{tag}");
            let end = self.src[self.pos..]
                .to_ascii_lowercase()
                .find(&closing)
                .map(|i| self.pos + i)
                .unwrap_or(len);
            if end > self.pos {
                return Some(self.text_until(end));
            }
        }

        let rest = &self.src[self.pos..];
        if !rest.starts_with('<') {
            let end = rest.find('<').map(|i| self.pos + i).unwrap_or(len);
            return Some(self.text_until(end));
        }
        if rest.starts_with("<!--") {
            self.skip_past(self.pos + 4, "-->");
            return Some(Token::Comment);
        }
        if rest.starts_with("</") {
            return Some(self.end_tag());
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            self.skip_past(self.pos, ">");
            return Some(Token::Comment);
        }
        if rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Some(self.start_tag());
        }

        // A lone '<' is plain text.
        let end = rest[1..].find('<').map(|i| self.pos + 1 + i).unwrap_or(len);
        Some(self.text_until(end))
    }
}
