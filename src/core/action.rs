//! # Actions
//!
//! Everything that can happen in the shell becomes an `Action`.
//! User picks a page in the sidebar? That's `Action::SwitchPage(id)`.
//! The fragment arrives? That's `Action::FragmentLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing I/O for the adapter to
//! perform. No I/O happens here.
//!
//! ```text
//! Shell + Action  →  update()  →  Shell' + Effect
//!                                          │
//!            Effect::Fetch ──adapter──▶ Action::FragmentLoaded / FragmentFailed
//!      Effect::DeferRender ──next frame──▶ Action::RenderDeferred
//! ```
//!
//! Every fetch carries the generation it was issued under. Results from an
//! older generation are dropped, so the last switch always wins.

use log::{debug, info, warn};

use crate::core::loader;
use crate::core::page::{Page, PageId};
use crate::core::state::{LoadState, Shell};
use crate::dom::Selector;
use crate::fragments::FetchError;
use crate::render::stats;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A navigation trigger asked for this page.
    SwitchPage(PageId),
    /// Expand/collapse a sidebar group by index.
    ToggleGroup(usize),
    FragmentLoaded {
        page: PageId,
        generation: u64,
        html: String,
    },
    FragmentFailed {
        page: PageId,
        generation: u64,
        error: FetchError,
    },
    /// A renderer scheduled for the next frame is due.
    RenderDeferred { page: PageId, generation: u64 },
    /// Re-fetch the current page.
    Reload,
    /// Re-run the console renderer on the current content.
    RefreshSquads,
    SelectServer(String),
    CycleServer,
    /// Pick a range in the statistics page's chart range select.
    SelectChartRange(String),
    /// Move the chart range select to its next option.
    CycleChartRange,
    ToggleSidebar,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Fetch the fragment and report back with `FragmentLoaded`/`FragmentFailed`.
    Fetch { page: PageId, generation: u64 },
    /// Dispatch `RenderDeferred` with these fields on the next frame.
    DeferRender { page: PageId, generation: u64 },
    Quit,
}

pub fn update(shell: &mut Shell, action: Action) -> Effect {
    match action {
        Action::SwitchPage(page) => switch_page(shell, page),
        Action::ToggleGroup(index) => {
            if !shell.navigation.toggle_group(index) {
                warn!("No navigation group at index {}", index);
            }
            Effect::None
        }
        Action::FragmentLoaded {
            page,
            generation,
            html,
        } => {
            if is_stale(shell, &page, generation) {
                return Effect::None;
            }
            loader::apply_fragment(shell, page, html)
        }
        Action::FragmentFailed {
            page,
            generation,
            error,
        } => {
            if !is_stale(shell, &page, generation) {
                loader::apply_error(shell, page, error);
            }
            Effect::None
        }
        Action::RenderDeferred { page, generation } => {
            if is_stale(shell, &page, generation) {
                return Effect::None;
            }
            if let Some(known) = page.page() {
                loader::render_now(shell, known);
            }
            Effect::None
        }
        Action::Reload => {
            if shell.current_page.is_empty() {
                debug!("Nothing to reload");
                return Effect::None;
            }
            info!("Reloading '{}'", shell.current_page);
            request_fetch(shell)
        }
        Action::RefreshSquads => {
            rerender_console(shell, "Refreshing squads");
            Effect::None
        }
        Action::SelectServer(id) => {
            select_server(shell, id);
            Effect::None
        }
        Action::CycleServer => {
            let next = shell
                .servers
                .iter()
                .position(|s| *s == shell.server_id)
                .map(|i| (i + 1) % shell.servers.len())
                .unwrap_or(0);
            if let Some(id) = shell.servers.get(next).cloned() {
                select_server(shell, id);
            }
            Effect::None
        }
        Action::SelectChartRange(range) => {
            select_chart_range(shell, range);
            Effect::None
        }
        Action::CycleChartRange => {
            let next = stats::next_chart_range(shell.chart_range.as_deref());
            select_chart_range(shell, next.to_string());
            Effect::None
        }
        Action::ToggleSidebar => {
            shell.sidebar_expanded = !shell.sidebar_expanded;
            debug!("Sidebar expanded={}", shell.sidebar_expanded);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn switch_page(shell: &mut Shell, page: PageId) -> Effect {
    if page.is_empty() || page == shell.current_page {
        debug!("Ignoring switch to '{}' (empty or current)", page);
        return Effect::None;
    }
    info!("Switching page: '{}' -> '{}'", shell.current_page, page);
    shell.navigation.activate(&page);
    shell.current_page = page;
    request_fetch(shell)
}

/// Starts a new generation for the current page.
fn request_fetch(shell: &mut Shell) -> Effect {
    shell.generation += 1;
    shell.load = LoadState::Loading;
    shell.status_message = format!("Loading {}", shell.current_page.fragment_path());
    Effect::Fetch {
        page: shell.current_page.clone(),
        generation: shell.generation,
    }
}

fn is_stale(shell: &Shell, page: &PageId, generation: u64) -> bool {
    let stale = generation != shell.generation || *page != shell.current_page;
    if stale {
        debug!(
            "Dropping stale result for '{}' (generation {}, latest {})",
            page, generation, shell.generation
        );
    }
    stale
}

fn select_server(shell: &mut Shell, id: String) {
    info!("Server selected: {}", id);
    shell.server_id = id;
    rerender_console(shell, "Reloading squads for new server");
}

/// The range select only exists on a loaded statistics page.
fn select_chart_range(shell: &mut Shell, range: String) {
    if shell.current_page.page() != Some(Page::Stats) || shell.load != LoadState::Loaded {
        debug!("Chart range '{}': stats page not showing, skipped", range);
        return;
    }
    let Some(label) = stats::chart_range_label(&range) else {
        warn!("Unknown chart range '{}'", range);
        return;
    };
    info!("Chart range selected: {}", range);
    let target = Selector::fixed(stats::CHART_RANGE_TARGET);
    if shell.document.exists(&target) {
        shell
            .document
            .set_inner_html(&target, &stats::chart_range_options(&range));
    }
    shell.status_message = format!("图表范围: {}", label);
    shell.chart_range = Some(range);
}

/// Console-only actions act on content that is already on screen; anywhere
/// else they just update state.
fn rerender_console(shell: &mut Shell, reason: &str) {
    if shell.current_page.page() != Some(Page::Console) || shell.load != LoadState::Loaded {
        debug!("{}: console not showing, skipped", reason);
        return;
    }
    info!("{}", reason);
    loader::render_now(shell, Page::Console);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Shell {
        Shell::with_mock_data()
    }

    fn switch(shell: &mut Shell, id: &str) -> Effect {
        update(shell, Action::SwitchPage(PageId::new(id)))
    }

    fn loaded(shell: &Shell, html: &str) -> Action {
        Action::FragmentLoaded {
            page: shell.current_page.clone(),
            generation: shell.generation,
            html: html.to_string(),
        }
    }

    #[test]
    fn test_switch_updates_page_before_fetch_resolves() {
        let mut s = shell();
        let effect = switch(&mut s, "kills");
        assert_eq!(
            effect,
            Effect::Fetch {
                page: PageId::new("kills"),
                generation: 1
            }
        );
        assert_eq!(s.current_page, PageId::new("kills"));
        assert_eq!(s.load, LoadState::Loading);
        assert_eq!(s.navigation.active_pages(), vec![&PageId::new("kills")]);
        // "kills" lives in the second group, which starts collapsed.
        assert!(s.navigation.groups[1].expanded);
    }

    #[test]
    fn test_switch_to_current_or_empty_is_noop() {
        let mut s = shell();
        switch(&mut s, "vips");
        let before = s.navigation.clone();
        assert_eq!(switch(&mut s, "vips"), Effect::None);
        assert_eq!(switch(&mut s, ""), Effect::None);
        assert_eq!(s.generation, 1);
        assert_eq!(s.navigation, before);
    }

    #[test]
    fn test_exactly_one_item_active_after_each_switch() {
        let mut s = shell();
        for page in Page::ALL {
            switch(&mut s, page.id());
            assert_eq!(s.navigation.active_pages(), vec![&PageId::from(page)]);
        }
    }

    #[test]
    fn test_unknown_page_clears_active_and_still_fetches() {
        let mut s = shell();
        switch(&mut s, "kills");
        let effect = switch(&mut s, "missing");
        assert!(matches!(effect, Effect::Fetch { .. }));
        assert!(s.navigation.active_pages().is_empty());
        assert_eq!(s.current_page, PageId::new("missing"));
    }

    #[test]
    fn test_stale_fragment_is_dropped() {
        let mut s = shell();
        switch(&mut s, "kills");
        let stale = loaded(&s, "<div class=\"kills-list\"></div>");
        switch(&mut s, "vips");

        assert_eq!(update(&mut s, stale), Effect::None);
        assert_eq!(s.document.content(), "");
        assert_eq!(s.load, LoadState::Loading);
    }

    #[test]
    fn test_stale_failure_is_dropped() {
        let mut s = shell();
        switch(&mut s, "kills");
        let generation = s.generation;
        update(&mut s, Action::Reload);
        update(
            &mut s,
            Action::FragmentFailed {
                page: PageId::new("kills"),
                generation,
                error: FetchError::Network("timeout".to_string()),
            },
        );
        assert_eq!(s.load, LoadState::Loading);
    }

    #[test]
    fn test_failure_keeps_current_page() {
        let mut s = shell();
        switch(&mut s, "missing");
        let generation = s.generation;
        update(
            &mut s,
            Action::FragmentFailed {
                page: PageId::new("missing"),
                generation,
                error: FetchError::Status {
                    status: 404,
                    path: "pages/missing.html".to_string(),
                },
            },
        );
        assert_eq!(s.current_page, PageId::new("missing"));
        assert!(s.document.content().contains("pages/missing.html"));
        assert!(matches!(s.load, LoadState::Failed(_)));
    }

    #[test]
    fn test_console_renders_on_deferred_action() {
        let mut s = shell();
        switch(&mut s, "console");
        let action = loaded(&s, r#"<div class="squad-list"></div>"#);
        let effect = update(&mut s, action);
        let Effect::DeferRender { page, generation } = effect else {
            panic!("expected deferred render, got {effect:?}");
        };
        assert!(!s.document.exists(&Selector::fixed(".squad")));

        update(&mut s, Action::RenderDeferred { page, generation });
        assert!(s.document.exists(&Selector::fixed(".squad-list .squad")));
    }

    #[test]
    fn test_deferred_render_after_switch_is_dropped() {
        let mut s = shell();
        switch(&mut s, "console");
        let action = loaded(&s, r#"<div class="squad-list"></div>"#);
        let Effect::DeferRender { page, generation } = update(&mut s, action) else {
            panic!("expected deferred render");
        };
        switch(&mut s, "chat");
        let action = loaded(&s, r#"<div class="squad-list"></div>"#);
        update(&mut s, action);
        update(&mut s, Action::RenderDeferred { page, generation });
        assert!(!s.document.content().contains("squad-header"));
    }

    #[test]
    fn test_reload_bumps_generation() {
        let mut s = shell();
        assert_eq!(update(&mut s, Action::Reload), Effect::None);
        switch(&mut s, "stats");
        assert_eq!(
            update(&mut s, Action::Reload),
            Effect::Fetch {
                page: PageId::new("stats"),
                generation: 2
            }
        );
    }

    #[test]
    fn test_cycle_server_wraps() {
        let mut s = shell();
        update(&mut s, Action::CycleServer);
        assert_eq!(s.server_id, "server2");
        update(&mut s, Action::CycleServer);
        update(&mut s, Action::CycleServer);
        assert_eq!(s.server_id, "server1");
    }

    #[test]
    fn test_refresh_rerenders_console_only_when_showing() {
        let mut s = shell();
        switch(&mut s, "console");
        let (page, generation) = (s.current_page.clone(), s.generation);
        let action = loaded(&s, r#"<div class="squad-list"></div>"#);
        update(&mut s, action);
        update(&mut s, Action::RenderDeferred { page, generation });

        s.document.set_content(r#"<div class="squad-list"></div>"#);
        update(&mut s, Action::RefreshSquads);
        assert!(s.document.exists(&Selector::fixed(".squad")));

        switch(&mut s, "kills");
        let action = loaded(&s, r#"<div class="squad-list"></div>"#);
        update(&mut s, action);
        update(&mut s, Action::RefreshSquads);
        assert!(!s.document.exists(&Selector::fixed(".squad")));
    }

    #[test]
    fn test_toggles_and_quit() {
        let mut s = shell();
        update(&mut s, Action::ToggleSidebar);
        assert!(!s.sidebar_expanded);
        update(&mut s, Action::ToggleGroup(0));
        assert!(!s.navigation.groups[0].expanded);
        assert_eq!(update(&mut s, Action::ToggleGroup(99)), Effect::None);
        assert_eq!(update(&mut s, Action::Quit), Effect::Quit);
    }

    const STATS_WITH_RANGE: &str = r#"<select class="chart-range"><option value="24h">24小时</option><option value="7d">7天</option></select><canvas id="hourlyChart"></canvas>"#;

    #[test]
    fn test_chart_range_cycles_on_loaded_stats_page() {
        let mut s = shell();
        switch(&mut s, "stats");
        let action = loaded(&s, STATS_WITH_RANGE);
        update(&mut s, action);
        assert_eq!(s.chart_range, None);

        update(&mut s, Action::CycleChartRange);
        assert_eq!(s.chart_range.as_deref(), Some("7d"));
        assert_eq!(s.status_message, "图表范围: 7天");
        assert!(s.document.content().contains(r#"<option value="7d" selected>"#));

        update(&mut s, Action::CycleChartRange);
        assert_eq!(s.chart_range.as_deref(), Some("24h"));
        assert!(s.document.content().contains(r#"<option value="24h" selected>"#));
    }

    #[test]
    fn test_chart_range_ignored_off_stats_or_unknown() {
        let mut s = shell();
        update(&mut s, Action::CycleChartRange);
        assert_eq!(s.chart_range, None);

        switch(&mut s, "stats");
        update(&mut s, Action::SelectChartRange("7d".to_string()));
        assert_eq!(s.chart_range, None, "still loading");

        let action = loaded(&s, STATS_WITH_RANGE);
        update(&mut s, action);
        update(&mut s, Action::SelectChartRange("1y".to_string()));
        assert_eq!(s.chart_range, None);
        update(&mut s, Action::SelectChartRange("7d".to_string()));
        assert_eq!(s.chart_range.as_deref(), Some("7d"));

        update(&mut s, Action::Reload);
        let action = loaded(&s, STATS_WITH_RANGE);
        update(&mut s, action);
        assert_eq!(s.chart_range, None, "fresh fragment starts at its default");
    }
}
