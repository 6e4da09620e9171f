//! Headless driver: feeds actions through `update()` and performs the
//! resulting effects inline, without a terminal. Used by the `render`
//! subcommand and by tests that want the whole pipeline.

use std::sync::Arc;

use log::debug;

use crate::core::action::{Action, Effect, update};
use crate::core::loader;
use crate::core::page::PageId;
use crate::core::state::Shell;
use crate::fragments::FragmentSource;

pub struct Runner {
    shell: Shell,
    source: Arc<dyn FragmentSource>,
}

impl Runner {
    pub fn new(shell: Shell, source: Arc<dyn FragmentSource>) -> Self {
        Self { shell, source }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    pub fn into_shell(self) -> Shell {
        self.shell
    }

    /// Applies `action` and every effect it leads to. A fetch is awaited in
    /// place; a deferred render runs right after the action that scheduled
    /// it. Returns the last effect, `Effect::None` or `Effect::Quit`.
    pub async fn dispatch(&mut self, action: Action) -> Effect {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            match update(&mut self.shell, action) {
                Effect::Fetch { page, generation } => {
                    next = Some(loader::fetch(self.source.as_ref(), page, generation).await);
                }
                Effect::DeferRender { page, generation } => {
                    debug!("Running deferred render for '{}'", page);
                    next = Some(Action::RenderDeferred { page, generation });
                }
                Effect::Quit => return Effect::Quit,
                Effect::None => {}
            }
        }
        Effect::None
    }

    /// Switches to `page` and waits until it is loaded and rendered.
    pub async fn open(&mut self, page: impl Into<PageId>) -> &Shell {
        self.dispatch(Action::SwitchPage(page.into())).await;
        &self.shell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::LoadState;
    use crate::dom::Selector;
    use crate::test_support::StaticFragments;

    fn runner() -> Runner {
        let source = StaticFragments::new()
            .with("console", r#"<div class="server-info"></div><div class="squad-list"></div><div class="squad-list"></div>"#)
            .with("kills", r#"<div class="kills-list"></div>"#);
        Runner::new(Shell::with_mock_data(), Arc::new(source))
    }

    #[tokio::test]
    async fn test_open_runs_deferred_console_render() {
        let mut runner = runner();
        let shell = runner.open("console").await;
        assert_eq!(shell.load, LoadState::Loaded);
        assert_eq!(shell.document.count(&Selector::fixed(".info-tag")), 7);
        assert!(shell.document.exists(&Selector::fixed(".squad-list .squad")));
    }

    #[tokio::test]
    async fn test_missing_fragment_shows_error_panel() {
        let mut runner = runner();
        let shell = runner.open("bans").await;
        assert!(matches!(shell.load, LoadState::Failed(_)));
        assert!(shell.document.exists(&Selector::fixed(".error-message")));
        assert_eq!(shell.current_page, PageId::new("bans"));
    }

    #[tokio::test]
    async fn test_into_shell_keeps_loaded_content() {
        let mut runner = runner();
        runner.open("kills").await;
        let shell = runner.into_shell();
        assert_eq!(shell.current_page, PageId::new("kills"));
        assert!(shell.document.exists(&Selector::fixed(".kill-item")));
    }

    #[tokio::test]
    async fn test_quit_stops_dispatch() {
        let mut runner = runner();
        assert_eq!(runner.dispatch(Action::Quit).await, Effect::Quit);
    }
}
