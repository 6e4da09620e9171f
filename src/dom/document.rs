//! The content region of the dashboard.
//!
//! Holds the markup of the currently injected fragment and lets renderers
//! replace the inner markup of elements found by [`Selector`]. The markup is
//! re-indexed after each write; fragments are small enough that this is
//! cheaper than keeping a mutable tree in sync.

use std::ops::Range;

use super::selector::Selector;
use super::tokenizer::{Token, Tokenizer, is_void};

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    parent: Option<usize>,
    inner: Range<usize>,
}

fn index(markup: &str) -> Vec<Element> {
    let mut elements: Vec<Element> = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    for token in Tokenizer::new(markup) {
        match token {
            Token::Start {
                name,
                attrs,
                self_closing,
                span,
            } => {
                let mut id = None;
                let mut classes = Vec::new();
                for (key, value) in attrs {
                    match key.as_str() {
                        "id" => id = Some(value),
                        "class" => classes = value.split_whitespace().map(str::to_string).collect(),
                        _ => {}
                    }
                }
                let childless = self_closing || is_void(&name);
                let inner = if childless {
                    span.end..span.end
                } else {
                    span.end..markup.len()
                };
                elements.push(Element {
                    tag: name,
                    id,
                    classes,
                    parent: open.last().copied(),
                    inner,
                });
                if !childless {
                    open.push(elements.len() - 1);
                }
            }
            Token::End { name, span } => {
                // Closing an ancestor implicitly closes anything left open inside it.
                if let Some(depth) = open.iter().rposition(|&i| elements[i].tag == name) {
                    for &i in &open[depth..] {
                        elements[i].inner.end = span.start;
                    }
                    open.truncate(depth);
                }
            }
            Token::Text(_) | Token::Comment => {}
        }
    }
    elements
}

fn select_in(elements: &[Element], selector: &Selector) -> Vec<usize> {
    (0..elements.len())
        .filter(|&i| {
            let el = &elements[i];
            let ancestors = std::iter::successors(el.parent, |&p| elements[p].parent).map(|p| {
                let a = &elements[p];
                (a.tag.as_str(), a.id.as_deref(), a.classes.as_slice())
            });
            selector.matches(
                (el.tag.as_str(), el.id.as_deref(), el.classes.as_slice()),
                ancestors,
            )
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    markup: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_markup(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    /// Current markup of the content region.
    pub fn content(&self) -> &str {
        &self.markup
    }

    /// Replaces the whole content region.
    pub fn set_content(&mut self, markup: impl Into<String>) {
        self.markup = markup.into();
    }

    pub fn count(&self, selector: &Selector) -> usize {
        select_in(&index(&self.markup), selector).len()
    }

    pub fn exists(&self, selector: &Selector) -> bool {
        self.count(selector) > 0
    }

    /// Inner markup of every match, in document order.
    pub fn inner_html_all(&self, selector: &Selector) -> Vec<&str> {
        let elements = index(&self.markup);
        select_in(&elements, selector)
            .into_iter()
            .map(|i| &self.markup[elements[i].inner.clone()])
            .collect()
    }

    pub fn inner_html(&self, selector: &Selector) -> Option<&str> {
        self.inner_html_all(selector).into_iter().next()
    }

    /// Replaces the inner markup of the `nth` match. Returns false when there
    /// is no such match.
    pub fn set_inner_html_nth(&mut self, selector: &Selector, nth: usize, html: &str) -> bool {
        let elements = index(&self.markup);
        match select_in(&elements, selector).get(nth) {
            Some(&i) => {
                self.markup.replace_range(elements[i].inner.clone(), html);
                true
            }
            None => false,
        }
    }

    /// Replaces the inner markup of the first match.
    pub fn set_inner_html(&mut self, selector: &Selector, html: &str) -> bool {
        self.set_inner_html_nth(selector, 0, html)
    }
}
