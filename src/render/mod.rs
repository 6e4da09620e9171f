//! # Page Renderers
//!
//! One renderer per page that has data to show. A renderer pulls its dataset
//! from the injected [`DataSource`], finds its targets in the content region
//! by selector and overwrites their inner markup.
//!
//! ```text
//! Page ──renderer_for()──▶ fn(&mut Document, &RenderContext)
//!                              │
//!                              ├─ ctx.data.kills()        (dataset)
//!                              └─ doc.set_inner_html(.kills-list, rows)
//! ```
//!
//! A missing target is logged and skipped; a dataset error is logged and the
//! renderer stops before writing anything.

pub mod chart;
pub mod console;
pub mod history;
pub mod kills;
pub mod players;
pub mod squads;
pub mod stats;
pub mod vips;

use log::{debug, error, warn};

use crate::core::page::Page;
use crate::data::{DataError, DataSource};
use crate::dom::{Document, Selector};

pub use chart::{ChartBackend, ChartError, ChartSlot, LineChart};

/// Everything a renderer may read besides the document.
pub struct RenderContext<'a> {
    pub data: &'a dyn DataSource,
    pub charts: Option<&'a dyn ChartBackend>,
    /// Server selected in the console. Only the console renderer reads it.
    pub server_id: &'a str,
}

pub type Renderer = fn(&mut Document, &RenderContext<'_>);

pub fn renderer_for(page: Page) -> Option<Renderer> {
    match page {
        Page::Console => Some(console::render),
        Page::GameHistory => Some(history::render),
        Page::Kills => Some(kills::render),
        Page::Downs => Some(kills::render_downs),
        Page::Squads => Some(squads::render),
        Page::Players => Some(players::render),
        Page::Vips => Some(vips::render),
        Page::Stats => Some(stats::render),
        Page::Chat | Page::Bans | Page::Vote | Page::Admins | Page::Logs | Page::Settings => None,
    }
}

/// Runs the page's renderer, if it has one. Returns whether one ran.
pub fn render_page(page: Page, doc: &mut Document, ctx: &RenderContext<'_>) -> bool {
    match renderer_for(page) {
        Some(render) => {
            debug!("Rendering page '{}'", page);
            render(doc, ctx);
            true
        }
        None => false,
    }
}

/// Writes `html` into the first element matching `selector`.
pub(crate) fn fill(doc: &mut Document, selector: &str, html: &str) -> bool {
    let selector = Selector::fixed(selector);
    if doc.set_inner_html(&selector, html) {
        debug!("Filled '{}' ({} bytes)", selector, html.len());
        true
    } else {
        warn!("Render target '{}' not found", selector);
        false
    }
}

/// Unwraps a dataset, logging the failure.
pub(crate) fn dataset<T>(result: Result<T, DataError>) -> Option<T> {
    result.map_err(|e| error!("{e}")).ok()
}

/// CSS class for a team name.
pub(crate) fn team_class(team: &str) -> &'static str {
    if team == "美军" { "us" } else { "ru" }
}
