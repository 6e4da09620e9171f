//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::page::PageId;
use crate::data::*;
use crate::fragments::{FetchError, FragmentSource};
use crate::render::RenderContext;

/// A data source whose every dataset fails to decode.
pub struct BrokenData;

fn broken<T>(dataset: &'static str) -> Result<T, DataError> {
    Err(DataError::Parse {
        dataset,
        message: "expected value at line 1 column 1".to_string(),
    })
}

impl DataSource for BrokenData {
    fn battlefield(&self, _server_id: &str) -> Result<Battlefield, DataError> {
        broken("battlefield")
    }
    fn match_history(&self) -> Result<MatchHistory, DataError> {
        broken("history")
    }
    fn kills(&self) -> Result<KillFeed, DataError> {
        broken("kills")
    }
    fn downs(&self) -> Result<DownFeed, DataError> {
        broken("downs")
    }
    fn squad_records(&self) -> Result<SquadRecords, DataError> {
        broken("squad_records")
    }
    fn players(&self) -> Result<PlayerRoster, DataError> {
        broken("players")
    }
    fn vips(&self) -> Result<VipRoster, DataError> {
        broken("vips")
    }
    fn server_stats(&self) -> Result<ServerStats, DataError> {
        broken("stats")
    }
}

/// Render context with no chart backend, on the default server.
pub fn render_ctx(data: &dyn DataSource) -> RenderContext<'_> {
    RenderContext {
        data,
        charts: None,
        server_id: "server1",
    }
}

/// In-memory fragments keyed by page id. Unknown ids are `NotFound`.
#[derive(Default)]
pub struct StaticFragments {
    pages: HashMap<String, String>,
}

impl StaticFragments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, html: &str) -> Self {
        self.pages.insert(id.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl FragmentSource for StaticFragments {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, page: &PageId) -> Result<String, FetchError> {
        self.pages
            .get(page.as_str())
            .cloned()
            .ok_or_else(|| FetchError::NotFound(page.fragment_path()))
    }
}

/// Text of a rendered buffer, one line per row. Cells hidden behind wide
/// characters are skipped so CJK text reads contiguously.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    use unicode_width::UnicodeWidthStr;

    let width = buffer.area.width as usize;
    let mut out = String::new();
    let mut skip = 0usize;
    for (i, cell) in buffer.content().iter().enumerate() {
        if i > 0 && i % width == 0 {
            out.push('\n');
            skip = 0;
        }
        if skip > 0 {
            skip -= 1;
            continue;
        }
        out.push_str(cell.symbol());
        skip = cell.symbol().width().saturating_sub(1);
    }
    out
}
