//! # Fragment Sources
//!
//! Where page fragments come from. The loader asks a [`FragmentSource`] for
//! `pages/{id}.html` and gets either the markup or a [`FetchError`].
//!
//! ```text
//!   FragmentSource
//!     ├─ HttpFragments      GET {base}/pages/{id}.html   (reqwest)
//!     ├─ DirFragments       {dir}/pages/{id}.html        (tokio::fs)
//!     └─ EmbeddedFragments  pages/*.html baked in by build.rs
//! ```
//!
//! Fragments are never cached; every switch fetches again.

pub mod dir;
pub mod embedded;
pub mod http;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::page::PageId;

pub use dir::DirFragments;
pub use embedded::EmbeddedFragments;
pub use http::HttpFragments;

/// Why a fragment could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Server answered with something other than 2xx.
    Status { status: u16, path: String },
    /// Transport failure (connection refused, DNS, timeout).
    Network(String),
    /// Local file could not be read.
    Io(String),
    /// The source has no fragment for this page.
    NotFound(String),
    /// The page id cannot name a file under `pages/`.
    InvalidPage(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status { status, path } => {
                write!(f, "HTTP error! status: {status} ({path})")
            }
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Io(msg) => write!(f, "io error: {msg}"),
            FetchError::NotFound(path) => write!(f, "fragment not found: {path}"),
            FetchError::InvalidPage(id) => write!(f, "invalid page id: {id:?}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[async_trait]
pub trait FragmentSource: Send + Sync {
    /// Short name for logs and the title bar.
    fn name(&self) -> &str;

    /// Retrieves the fragment markup for `page`.
    async fn fetch(&self, page: &PageId) -> Result<String, FetchError>;
}

/// Picks a source for a configured base: embedded wins, then anything that
/// looks like a URL goes over HTTP, everything else is a directory.
pub fn source_for(base: &str, embedded: bool, timeout: Option<Duration>) -> Arc<dyn FragmentSource> {
    if embedded {
        Arc::new(EmbeddedFragments)
    } else if base.starts_with("http://") || base.starts_with("https://") {
        Arc::new(HttpFragments::new(base, timeout))
    } else {
        Arc::new(DirFragments::new(base))
    }
}
