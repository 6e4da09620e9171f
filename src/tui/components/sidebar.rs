//! # Sidebar Component
//!
//! Navigation groups as a cursor-driven list. Group headers are always
//! listed; items only while their group is expanded.
//!
//! ```text
//! ▾ 服务器管理
//!     控制台        ◀ active
//!     聊天记录
//! ▸ 游戏记录
//! ```
//!
//! The cursor indexes the visible rows, so it is re-clamped whenever the
//! navigation changes shape (`sync`).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState};

use crate::core::nav::Navigation;
use crate::core::page::PageId;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRow {
    Group(usize),
    Item { group: usize, page: PageId },
}

/// What the user asked for from the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEvent {
    Open(PageId),
    ToggleGroup(usize),
}

#[derive(Debug, Default)]
pub struct SidebarState {
    pub cursor: usize,
    rows: Vec<SidebarRow>,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the visible rows from the navigation model.
    pub fn sync(&mut self, nav: &Navigation) {
        self.rows = visible_rows(nav);
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }

    pub fn rows(&self) -> &[SidebarRow] {
        &self.rows
    }

    pub fn selected(&self) -> Option<&SidebarRow> {
        self.rows.get(self.cursor)
    }
}

pub fn visible_rows(nav: &Navigation) -> Vec<SidebarRow> {
    let mut rows = Vec::new();
    for (index, group) in nav.groups.iter().enumerate() {
        rows.push(SidebarRow::Group(index));
        if group.expanded {
            rows.extend(group.items.iter().map(|item| SidebarRow::Item {
                group: index,
                page: item.page.clone(),
            }));
        }
    }
    rows
}

impl EventHandler for SidebarState {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if self.cursor + 1 < self.rows.len() {
                    self.cursor += 1;
                }
                None
            }
            TuiEvent::Select => match self.selected()? {
                SidebarRow::Group(index) => Some(SidebarEvent::ToggleGroup(*index)),
                SidebarRow::Item { page, .. } => Some(SidebarEvent::Open(page.clone())),
            },
            TuiEvent::Toggle => match self.selected()? {
                SidebarRow::Group(index) | SidebarRow::Item { group: index, .. } => {
                    Some(SidebarEvent::ToggleGroup(*index))
                }
            },
            _ => None,
        }
    }
}

pub struct Sidebar<'a> {
    pub nav: &'a Navigation,
    pub state: &'a SidebarState,
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .state
            .rows()
            .iter()
            .filter_map(|row| match row {
                SidebarRow::Group(index) => {
                    let group = self.nav.groups.get(*index)?;
                    let marker = if group.expanded { "▾" } else { "▸" };
                    Some(ListItem::new(Line::from(Span::styled(
                        format!("{} {}", marker, group.title),
                        Style::default().add_modifier(Modifier::BOLD),
                    ))))
                }
                SidebarRow::Item { group, page } => {
                    let item = self.nav.groups.get(*group)?.items.iter().find(|i| &i.page == page)?;
                    let style = if item.active {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Some(ListItem::new(Line::from(Span::styled(
                        format!("    {}", item.label),
                        style,
                    ))))
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::bordered().title("导航"))
            .highlight_style(Style::default().bg(Color::DarkGray));
        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
