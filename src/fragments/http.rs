use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::{FetchError, FragmentSource};
use crate::core::page::PageId;

/// Fetches fragments from a web server hosting the panel's `pages/` folder.
pub struct HttpFragments {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFragments {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        });

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn url_for(&self, page: &PageId) -> String {
        format!("{}/{}", self.base_url, page.fragment_path())
    }
}

#[async_trait]
impl FragmentSource for HttpFragments {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, page: &PageId) -> Result<String, FetchError> {
        let url = self.url_for(page);
        info!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("Fragment response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Fragment request failed: {} - {}", status, url);
            return Err(FetchError::Status {
                status,
                path: page.fragment_path(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}
