use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use log::{info, warn};

use super::{FetchError, FragmentSource};
use crate::core::page::PageId;

/// Reads fragments from a local checkout of the panel's static files.
pub struct DirFragments {
    root: PathBuf,
}

impl DirFragments {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, page: &PageId) -> PathBuf {
        self.root.join(page.fragment_path())
    }
}

#[async_trait]
impl FragmentSource for DirFragments {
    fn name(&self) -> &str {
        "dir"
    }

    async fn fetch(&self, page: &PageId) -> Result<String, FetchError> {
        if !page.is_path_safe() {
            warn!("Refusing to read fragment for page id {:?}", page.as_str());
            return Err(FetchError::InvalidPage(page.as_str().to_string()));
        }
        let path = self.path_for(page);
        info!("Reading {}", path.display());
        tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::NotFound(page.fragment_path()),
            _ => FetchError::Io(format!("{}: {}", path.display(), e)),
        })
    }
}
