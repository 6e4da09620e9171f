//! # Page Loader
//!
//! Turns a fetch result into content: the fragment (or the error panel)
//! replaces the content region, then the page's renderer fills it.
//!
//! ```text
//! FragmentSource::fetch ──▶ Action::FragmentLoaded ──▶ apply_fragment
//!                      └──▶ Action::FragmentFailed ──▶ apply_error
//! ```
//!
//! Only the fetch itself is async; everything after it runs inside `update()`.

use chrono::Local;
use log::{debug, error, info, warn};

use crate::core::action::{Action, Effect};
use crate::core::page::{Page, PageId, RenderTiming};
use crate::core::state::{LoadState, Shell};
use crate::dom::escape;
use crate::fragments::{FetchError, FragmentSource};
use crate::render;

/// Markup shown in place of a fragment that could not be loaded.
pub fn error_markup(page: &PageId, message: &str) -> String {
    format!(
        r#"
<div class="error-message">
    <i class="fas fa-exclamation-circle"></i>
    <h2>页面加载失败</h2>
    <p>请稍后重试或联系管理员</p>
    <p class="error-details">{}</p>
    <p class="error-path">路径: {}</p>
</div>"#,
        escape(message),
        escape(&page.fragment_path())
    )
}

/// Fetches `page` and wraps the outcome as the action that reports it.
pub async fn fetch(source: &dyn FragmentSource, page: PageId, generation: u64) -> Action {
    if !page.is_path_safe() {
        warn!("Not fetching page with unusable id {:?}", page.as_str());
        let error = FetchError::InvalidPage(page.as_str().to_string());
        return Action::FragmentFailed {
            page,
            generation,
            error,
        };
    }
    match source.fetch(&page).await {
        Ok(html) => Action::FragmentLoaded {
            page,
            generation,
            html,
        },
        Err(error) => Action::FragmentFailed {
            page,
            generation,
            error,
        },
    }
}

/// Injects a fetched fragment and runs or schedules its renderer.
pub fn apply_fragment(shell: &mut Shell, page: PageId, html: String) -> Effect {
    info!("Loaded {} ({} bytes)", page.fragment_path(), html.len());
    replace_content(shell, html);
    shell.load = LoadState::Loaded;
    shell.loaded_at = Some(Local::now());
    shell.status_message = format!("{} loaded", page);

    let Some(known) = page.page() else {
        debug!("No renderer for unknown page '{}'", page);
        return Effect::None;
    };
    match known.render_timing() {
        RenderTiming::Immediate => {
            render_now(shell, known);
            Effect::None
        }
        RenderTiming::NextFrame => Effect::DeferRender {
            page,
            generation: shell.generation,
        },
    }
}

/// Replaces the content region with the error panel. No renderer runs.
pub fn apply_error(shell: &mut Shell, page: PageId, err: FetchError) {
    error!("Error loading page '{}' from {}: {}", page, page.fragment_path(), err);
    replace_content(shell, error_markup(&page, &err.to_string()));
    shell.load = LoadState::Failed(err.to_string());
    shell.loaded_at = Some(Local::now());
    shell.status_message = format!("Failed to load {}", page.fragment_path());
}

/// Swaps the content region. Charts and the chart range belong to the old
/// content and go with it.
fn replace_content(shell: &mut Shell, html: String) {
    shell.document.set_content(html);
    shell.chart_range = None;
    if let Some(charts) = &shell.charts {
        charts.clear();
    }
}

/// Runs the renderer for `page` against the current content.
pub fn render_now(shell: &mut Shell, page: Page) -> bool {
    let (doc, ctx) = shell.render_parts();
    render::render_page(page, doc, &ctx)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::dom::Selector;
    use crate::fragments::EmbeddedFragments;
    use crate::render::{ChartBackend, ChartSlot, LineChart};

    /// Counts fetches and serves an empty fragment.
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FragmentSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch(&self, _page: &PageId) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(String::new())
        }
    }

    #[test]
    fn test_error_markup_names_path_and_message() {
        let html = error_markup(&PageId::new("missing"), "HTTP error! status: 404");
        assert!(html.contains("页面加载失败"));
        assert!(html.contains("请稍后重试或联系管理员"));
        assert!(html.contains(r#"<p class="error-details">HTTP error! status: 404</p>"#));
        assert!(html.contains(r#"<p class="error-path">路径: pages/missing.html</p>"#));
    }

    #[test]
    fn test_immediate_page_is_rendered_on_apply() {
        let mut shell = Shell::with_mock_data();
        let effect = apply_fragment(
            &mut shell,
            PageId::new("kills"),
            r#"<div class="kills-list"></div>"#.to_string(),
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(shell.load, LoadState::Loaded);
        assert!(shell.document.exists(&Selector::fixed(".kill-item")));
    }

    #[test]
    fn test_console_render_is_deferred() {
        let mut shell = Shell::with_mock_data();
        shell.generation = 4;
        let effect = apply_fragment(
            &mut shell,
            PageId::new("console"),
            r#"<div class="server-info"></div>"#.to_string(),
        );
        assert_eq!(
            effect,
            Effect::DeferRender {
                page: PageId::new("console"),
                generation: 4
            }
        );
        assert_eq!(shell.document.inner_html(&Selector::fixed(".server-info")), Some(""));
    }

    #[test]
    fn test_unknown_page_is_injected_without_render() {
        let mut shell = Shell::with_mock_data();
        let effect = apply_fragment(&mut shell, PageId::new("custom"), "<p>hi</p>".to_string());
        assert_eq!(effect, Effect::None);
        assert_eq!(shell.document.content(), "<p>hi</p>");
    }

    #[test]
    fn test_error_replaces_content() {
        let mut shell = Shell::with_mock_data();
        shell.document.set_content("<div class=\"kills-list\">old</div>");
        apply_error(
            &mut shell,
            PageId::new("kills"),
            FetchError::Network("connection refused".to_string()),
        );
        assert!(!shell.document.content().contains("old"));
        assert!(shell.document.content().contains("network error: connection refused"));
        assert!(matches!(shell.load, LoadState::Failed(_)));
    }

    #[tokio::test]
    async fn test_unsafe_page_id_is_never_fetched() {
        let source = CountingSource::default();
        for id in ["../x", "a/b", "a\\b", ".."] {
            let action = fetch(&source, PageId::new(id), 3).await;
            assert_eq!(
                action,
                Action::FragmentFailed {
                    page: PageId::new(id),
                    generation: 3,
                    error: FetchError::InvalidPage(id.to_string()),
                }
            );
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);

        fetch(&source, PageId::new("kills"), 4).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsafe_page_id_shows_error_panel() {
        let mut shell = Shell::with_mock_data();
        let action = fetch(&EmbeddedFragments, PageId::new("../x"), 0).await;
        let Action::FragmentFailed { page, error, .. } = action else {
            panic!("expected a failure for ../x");
        };
        apply_error(&mut shell, page, error);
        assert!(shell.document.content().contains("页面加载失败"));
        assert!(shell.document.content().contains("invalid page id"));
    }

    #[test]
    fn test_new_content_drops_old_chart_and_range() {
        let slot = ChartSlot::new();
        let mut shell = Shell::with_mock_data().with_charts(Arc::new(slot.clone()));
        slot.line_chart("#hourlyChart", LineChart::hourly(&shell.data.server_stats().unwrap().time_stats))
            .unwrap();
        shell.chart_range = Some("7d".to_string());

        apply_fragment(&mut shell, PageId::new("kills"), "<div class=\"kills-list\"></div>".to_string());
        assert!(slot.latest().is_none());
        assert!(shell.chart_range.is_none());

        slot.line_chart("#hourlyChart", LineChart::hourly(&shell.data.server_stats().unwrap().time_stats))
            .unwrap();
        apply_error(&mut shell, PageId::new("stats"), FetchError::NotFound("pages/stats.html".to_string()));
        assert!(slot.latest().is_none());
    }
}
