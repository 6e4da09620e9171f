//! CSS-like selectors used by renderers to find their targets.
//!
//! Supported: `tag`, `.class`, `#id`, compounds like `div.squad-list.us`, and
//! descendant chains separated by whitespace (`.map-stats table tbody`).

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorError(pub String);

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selector: {}", self.0)
    }
}

impl std::error::Error for SelectorError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(part: &str) -> Result<Self, SelectorError> {
        let mut compound = Compound::default();
        let mut chars = part.char_indices().peekable();
        let mut marker: Option<char> = None;
        let mut start = 0;

        let mut flush = |marker: Option<char>, ident: &str| -> Result<(), SelectorError> {
            if ident.is_empty() {
                return Err(SelectorError(part.to_string()));
            }
            match marker {
                None => compound.tag = Some(ident.to_ascii_lowercase()),
                Some('.') => compound.classes.push(ident.to_string()),
                Some('#') => compound.id = Some(ident.to_string()),
                Some(_) => unreachable!(),
            }
            Ok(())
        };

        // Leading marker means no tag.
        if let Some(&(_, c)) = chars.peek()
            && (c == '.' || c == '#')
        {
            marker = Some(c);
            chars.next();
            start = c.len_utf8();
        }

        while let Some((i, c)) = chars.next() {
            match c {
                '.' | '#' => {
                    flush(marker, &part[start..i])?;
                    marker = Some(c);
                    start = i + c.len_utf8();
                }
                c if c.is_alphanumeric() || c == '-' || c == '_' => {}
                _ => return Err(SelectorError(part.to_string())),
            }
        }
        flush(marker, &part[start..])?;
        Ok(compound)
    }

    fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        if let Some(want) = &self.tag
            && want != tag
        {
            return false;
        }
        if let Some(want) = &self.id
            && id != Some(want.as_str())
        {
            return false;
        }
        self.classes.iter().all(|c| classes.iter().any(|have| have == c))
    }
}

/// A parsed selector: a chain of compounds joined by descendant combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    steps: Vec<Compound>,
}

impl Selector {
    /// Parses a selector that is known to be valid at compile time.
    ///
    /// Renderers use fixed selectors, so a failure here is a typo in the
    /// source rather than bad input; it degrades to a selector that matches
    /// nothing instead of panicking.
    pub fn fixed(source: &str) -> Self {
        source.parse().unwrap_or_else(|e| {
            log::error!("{e}");
            Selector {
                source: source.to_string(),
                steps: Vec::new(),
            }
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Checks an element against the chain. `ancestors` yields the element's
    /// ancestors as `(tag, id, classes)`, nearest first.
    pub(crate) fn matches<'a, I>(
        &self,
        element: (&str, Option<&str>, &[String]),
        ancestors: I,
    ) -> bool
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>, &'a [String])>,
    {
        let Some((last, rest)) = self.steps.split_last() else {
            return false;
        };
        if !last.matches(element.0, element.1, element.2) {
            return false;
        }

        let mut pending = rest.iter().rev().peekable();
        for (tag, id, classes) in ancestors {
            match pending.peek() {
                Some(step) if step.matches(tag, id, classes) => {
                    pending.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        pending.peek().is_none()
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if steps.is_empty() {
            return Err(SelectorError(s.to_string()));
        }
        Ok(Selector {
            source: s.trim().to_string(),
            steps,
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
