//! # Shell State
//!
//! Everything the dashboard shell knows, in one place. Presentation-only
//! state (cursor position, scroll offsets) lives in the `tui` module.
//!
//! ```text
//! Shell
//! ├── current_page: PageId           // page the user last switched to
//! ├── generation: u64                // bumps on every fetch request
//! ├── navigation: Navigation         // sidebar groups + active marks
//! ├── document: Document             // the main content region
//! ├── load: LoadState                // idle / loading / loaded / failed
//! ├── sidebar_expanded: bool         // hamburger toggle
//! ├── server_id / servers            // console server selector
//! ├── chart_range: Option<String>    // last chart range picked
//! ├── status_message: String         // status bar text
//! ├── loaded_at: Option<DateTime>    // when the content last changed
//! ├── data: Arc<dyn DataSource>      // datasets for the renderers
//! └── charts: Option<Arc<dyn ChartBackend>>
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::core::config::ResolvedConfig;
use crate::core::nav::Navigation;
use crate::core::page::PageId;
use crate::data::{DataSource, MockData};
use crate::dom::Document;
use crate::render::{ChartBackend, RenderContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn label(&self) -> &str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
            LoadState::Failed(_) => "failed",
        }
    }
}

pub struct Shell {
    pub current_page: PageId,
    pub generation: u64,
    pub navigation: Navigation,
    pub document: Document,
    pub load: LoadState,
    pub sidebar_expanded: bool,
    pub server_id: String,
    pub servers: Vec<String>,
    pub chart_range: Option<String>,
    pub status_message: String,
    pub loaded_at: Option<DateTime<Local>>,
    pub data: Arc<dyn DataSource>,
    pub charts: Option<Arc<dyn ChartBackend>>,
}

impl Shell {
    pub fn new(data: Arc<dyn DataSource>) -> Self {
        Self::from_config(data, &ResolvedConfig::default())
    }

    pub fn from_config(data: Arc<dyn DataSource>, config: &ResolvedConfig) -> Self {
        Self {
            current_page: PageId::default(),
            generation: 0,
            navigation: config.navigation.clone(),
            document: Document::new(),
            load: LoadState::Idle,
            sidebar_expanded: config.sidebar_expanded,
            server_id: config.server_id.clone(),
            servers: config.servers.clone(),
            chart_range: None,
            status_message: String::from("Squad Panel"),
            loaded_at: None,
            data,
            charts: None,
        }
    }

    /// Shell backed by the built-in mock datasets.
    pub fn with_mock_data() -> Self {
        Self::new(Arc::new(MockData))
    }

    pub fn with_charts(mut self, charts: Arc<dyn ChartBackend>) -> Self {
        self.charts = Some(charts);
        self
    }

    /// Splits the shell into the content document and what renderers read.
    pub fn render_parts(&mut self) -> (&mut Document, RenderContext<'_>) {
        let ctx = RenderContext {
            data: self.data.as_ref(),
            charts: self.charts.as_deref(),
            server_id: &self.server_id,
        };
        (&mut self.document, ctx)
    }
}
