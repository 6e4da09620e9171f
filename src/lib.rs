//! Squad Panel library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod data;
pub mod dom;
pub mod fragments;
pub mod render;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How `render` prints the content region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The markup exactly as injected and rendered.
    #[default]
    Html,
    /// Flattened text, one line per block element.
    Text,
}
