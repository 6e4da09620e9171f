//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the shell and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! headless `core::Runner` drives the same `update()` without a terminal.
//!
//! ## Effects
//!
//! - `Effect::Fetch`: spawned on the tokio runtime; the outcome comes back
//!   through an `mpsc` channel as `FragmentLoaded`/`FragmentFailed`. A newer
//!   fetch aborts the one still in flight.
//! - `Effect::DeferRender`: queued and dispatched right after the next
//!   frame is drawn, so the console renderer sees the injected fragment.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms per poll and only draws
//! when an event, a fetch result or a deferred render changed something.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::loader;
use crate::core::page::PageId;
use crate::core::state::Shell;
use crate::data::MockData;
use crate::fragments::FragmentSource;
use crate::render::ChartSlot;
use crate::tui::component::EventHandler;
use crate::tui::components::{ContentViewState, SidebarEvent, SidebarState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of the shell)
pub struct TuiState {
    pub sidebar: SidebarState,
    pub content: ContentViewState,
    /// Receives charts drawn by the statistics renderer.
    pub charts: ChartSlot,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            sidebar: SidebarState::new(),
            content: ContentViewState::new(),
            charts: ChartSlot::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Where effects produced by `update()` go.
struct Effects {
    source: Arc<dyn FragmentSource>,
    tx: mpsc::Sender<Action>,
    deferred: Vec<Action>,
    in_flight: Option<tokio::task::AbortHandle>,
}

impl Effects {
    /// Performs `effect`. Returns true when the shell asked to quit.
    fn perform(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::Fetch { page, generation } => {
                if let Some(handle) = self.in_flight.take() {
                    handle.abort();
                }
                self.in_flight = Some(spawn_fetch(
                    self.source.clone(),
                    page,
                    generation,
                    self.tx.clone(),
                ));
                false
            }
            Effect::DeferRender { page, generation } => {
                self.deferred.push(Action::RenderDeferred { page, generation });
                false
            }
            Effect::Quit => true,
            Effect::None => false,
        }
    }
}

/// Maps a key-level event onto the action it stands for, if any.
fn global_action(event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Reload => Some(Action::Reload),
        TuiEvent::Refresh => Some(Action::RefreshSquads),
        TuiEvent::CycleServer => Some(Action::CycleServer),
        TuiEvent::CycleChartRange => Some(Action::CycleChartRange),
        TuiEvent::ToggleSidebar => Some(Action::ToggleSidebar),
        _ => None,
    }
}

pub fn run(config: ResolvedConfig, source: Arc<dyn FragmentSource>) -> std::io::Result<()> {
    info!("Starting TUI with fragment source '{}'", source.name());
    let mut tui = TuiState::new();
    let mut shell = Shell::from_config(Arc::new(MockData), &config)
        .with_charts(Arc::new(tui.charts.clone()));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut effects = Effects {
        source,
        tx,
        deferred: Vec::new(),
        in_flight: None,
    };

    let mut should_quit = effects.perform(update(
        &mut shell,
        Action::SwitchPage(config.default_page.clone()),
    ));
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &shell, &mut tui))?;
            needs_redraw = false;

            // The frame that showed the fragment is out; run what waited for it.
            for action in std::mem::take(&mut effects.deferred) {
                should_quit |= effects.perform(update(&mut shell, action));
                needs_redraw = true;
            }
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = global_action(event) {
                should_quit |= effects.perform(update(&mut shell, action));
                continue;
            }

            match event {
                TuiEvent::Resize => {}
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.content.handle_event(&event);
                }
                _ if shell.sidebar_expanded => {
                    tui.sidebar.sync(&shell.navigation);
                    let action = match tui.sidebar.handle_event(&event) {
                        Some(SidebarEvent::Open(page)) => Action::SwitchPage(page),
                        Some(SidebarEvent::ToggleGroup(index)) => Action::ToggleGroup(index),
                        None => continue,
                    };
                    should_quit |= effects.perform(update(&mut shell, action));
                }
                _ => {}
            }
        }

        // Fetch results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= effects.perform(update(&mut shell, action));
        }
    }

    if let Some(handle) = effects.in_flight.take() {
        handle.abort();
    }
    ratatui::restore();
    Ok(())
}

fn spawn_fetch(
    source: Arc<dyn FragmentSource>,
    page: PageId,
    generation: u64,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!(
        "Spawning fetch of {} via {} (generation={})",
        page.fragment_path(),
        source.name(),
        generation
    );
    let handle = tokio::spawn(async move {
        let action = loader::fetch(source.as_ref(), page, generation).await;
        if tx.send(action).is_err() {
            warn!("Failed to send fetch result: receiver dropped");
        }
    });
    handle.abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::LoadState;
    use crate::test_support::StaticFragments;

    fn effects(source: StaticFragments) -> (Effects, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        (
            Effects {
                source: Arc::new(source),
                tx,
                deferred: Vec::new(),
                in_flight: None,
            },
            rx,
        )
    }

    #[test]
    fn test_global_actions() {
        assert_eq!(global_action(TuiEvent::ForceQuit), Some(Action::Quit));
        assert_eq!(global_action(TuiEvent::Reload), Some(Action::Reload));
        assert_eq!(global_action(TuiEvent::Refresh), Some(Action::RefreshSquads));
        assert_eq!(
            global_action(TuiEvent::CycleChartRange),
            Some(Action::CycleChartRange)
        );
        assert_eq!(global_action(TuiEvent::CursorDown), None);
    }

    #[tokio::test]
    async fn test_fetch_effect_reports_back_through_channel() {
        let (mut effects, rx) = effects(StaticFragments::new().with("kills", "<div class=\"kills-list\"></div>"));
        let mut shell = Shell::with_mock_data();

        let effect = update(&mut shell, Action::SwitchPage(PageId::new("kills")));
        assert!(!effects.perform(effect));

        let handle = effects.in_flight.take().unwrap();
        while !handle.is_finished() {
            tokio::task::yield_now().await;
        }
        let action = rx.recv().unwrap();
        assert!(matches!(action, Action::FragmentLoaded { .. }));

        update(&mut shell, action);
        assert_eq!(shell.load, LoadState::Loaded);
    }

    #[test]
    fn test_deferred_render_is_queued() {
        let (mut effects, _rx) = effects(StaticFragments::new());
        let quit = effects.perform(Effect::DeferRender {
            page: PageId::new("console"),
            generation: 3,
        });
        assert!(!quit);
        assert_eq!(
            effects.deferred,
            vec![Action::RenderDeferred {
                page: PageId::new("console"),
                generation: 3
            }]
        );
    }

    #[test]
    fn test_quit_effect() {
        let (mut effects, _rx) = effects(StaticFragments::new());
        assert!(effects.perform(Effect::Quit));
    }
}
