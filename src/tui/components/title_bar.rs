//! # TitleBar Component
//!
//! Top status line showing which page is open and how its load went.
//!
//! ## Stateless Component
//!
//! TitleBar is purely presentational. It receives everything as props and
//! keeps no state of its own:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::from_shell(&shell);
//! title_bar.render(frame, area);
//! ```
//!
//! ## Layout
//!
//! Segments are joined with `" | "`, and empty ones are left out:
//!
//! 1. **Loaded**: `"Squad Panel | 控制台 | loaded | server1 | 12:00:01 | 已加载 控制台"`
//! 2. **Loading**: `"Squad Panel | 统计 | loading | server1"`
//! 3. **Nothing open**: `"Squad Panel"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::core::state::Shell;
use crate::tui::component::Component;

pub const APP_TITLE: &str = "Squad Panel";

pub struct TitleBar {
    /// Human label of the current page (or its raw id when unknown).
    pub page_label: String,
    pub load_label: String,
    pub server_id: String,
    /// Local time the content region last changed, pre-formatted.
    pub loaded_at: Option<String>,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(page_label: String, load_label: String, server_id: String) -> Self {
        Self {
            page_label,
            load_label,
            server_id,
            loaded_at: None,
            status_message: String::new(),
        }
    }

    pub fn from_shell(shell: &Shell) -> Self {
        let page_label = match shell.current_page.page() {
            Some(page) => page.label().to_string(),
            None => shell.current_page.as_str().to_string(),
        };
        let mut title_bar = Self::new(
            page_label,
            shell.load.label().to_string(),
            shell.server_id.clone(),
        );
        title_bar.loaded_at = shell.loaded_at.map(|t| t.format("%H:%M:%S").to_string());
        title_bar.status_message = shell.status_message.clone();
        title_bar
    }

    pub fn text(&self) -> String {
        if self.page_label.is_empty() {
            return APP_TITLE.to_string();
        }
        let mut parts = vec![
            APP_TITLE,
            self.page_label.as_str(),
            self.load_label.as_str(),
            self.server_id.as_str(),
        ];
        if let Some(at) = &self.loaded_at {
            parts.push(at);
        }
        if !self.status_message.is_empty() && self.status_message != APP_TITLE {
            parts.push(&self.status_message);
        }
        parts.retain(|p| !p.is_empty());
        parts.join(" | ")
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
