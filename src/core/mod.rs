//! # Core Shell Logic
//!
//! Page identity, navigation, the load/render pipeline and configuration.
//! It knows nothing about terminals; fragment I/O is requested through
//! `Effect`s and performed by an adapter.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Shell (state)        │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No fetch. │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Fetch / DeferRender
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │  Runner    │
//!           │  Adapter   │              │ (headless) │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`page`]: `PageId` and the closed `Page` enum
//! - [`nav`]: sidebar groups and the active item
//! - [`state`]: the `Shell` struct, all shell state in one place
//! - [`action`]: the `Action` enum and `update()`
//! - [`loader`]: applies fetch results to the content region
//! - [`runner`]: drives effects without a terminal
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod loader;
pub mod nav;
pub mod page;
pub mod runner;
pub mod state;

pub use action::{Action, Effect, update};
pub use page::{Page, PageId};
pub use runner::Runner;
pub use state::Shell;
