use async_trait::async_trait;
use log::debug;

use super::{FetchError, FragmentSource};
use crate::core::page::PageId;

include!(concat!(env!("OUT_DIR"), "/embedded_pages.rs"));

/// Fragments compiled into the binary from the repository's `pages/`.
pub struct EmbeddedFragments;

impl EmbeddedFragments {
    pub fn get(id: &str) -> Option<&'static str> {
        EMBEDDED_PAGES
            .iter()
            .find(|(name, _)| *name == id)
            .map(|(_, html)| *html)
    }

    pub fn ids() -> impl Iterator<Item = &'static str> {
        EMBEDDED_PAGES.iter().map(|(name, _)| *name)
    }
}

#[async_trait]
impl FragmentSource for EmbeddedFragments {
    fn name(&self) -> &str {
        "embedded"
    }

    async fn fetch(&self, page: &PageId) -> Result<String, FetchError> {
        debug!("Embedded lookup for '{}'", page);
        Self::get(page.as_str())
            .map(str::to_string)
            .ok_or_else(|| FetchError::NotFound(page.fragment_path()))
    }
}
