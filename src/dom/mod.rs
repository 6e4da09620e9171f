//! # Document Surface
//!
//! An in-memory stand-in for the browser DOM the panel was designed around.
//! The content region is plain markup; renderers address parts of it with
//! selectors, which form the contract between fragment authors and renderers.
//!
//! ```text
//! fragment ──set_content()──▶ Document ──select──▶ .kills-list ──set_inner_html()
//! ```

pub mod document;
pub mod selector;
pub mod text;
mod tokenizer;

pub use document::Document;
pub use selector::{Selector, SelectorError};
pub use text::{escape, to_lines};
