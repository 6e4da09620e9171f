//! # TUI Components
//!
//! UI pieces of the terminal shell.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: page, load state, server and last load time
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `Sidebar` / `SidebarState`: navigation groups with a cursor
//! - `ContentView` / `ContentViewState`: scrollable content region
//!
//! Each file keeps its state type, event type, rendering and tests together.
//! Components read shell data through props and never touch `Shell` directly;
//! the loop in `tui::run` turns their events into core actions.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── sidebar.rs
//! └── content_view.rs
//! ```

pub mod content_view;
pub mod sidebar;
mod title_bar;

pub use content_view::{ContentView, ContentViewState};
pub use sidebar::{Sidebar, SidebarEvent, SidebarState};
pub use title_bar::TitleBar;
