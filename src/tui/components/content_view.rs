//! # ContentView Component
//!
//! Terminal rendition of the content region. The injected markup is
//! flattened to text (`dom::to_lines`), wrapped to the pane width and shown
//! inside a scroll view. When the statistics page has produced an hourly
//! chart it is drawn underneath as a sparkline.
//!
//! ```text
//! ┌ 数据统计 ────────────────────────┐
//! │ 总对局数                        ▲│
//! │ 15863                           █│
//! │ ...                             ▼│
//! ├ 在线人数 ────────────────────────┤
//! │ ▁▁▂▃▅▆█▇▆▅▃▂                    │
//! └──────────────────────────────────┘
//! ```
//!
//! Scroll position lives in [`ContentViewState`] and snaps back to the top
//! whenever a different fragment is injected.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Paragraph, Sparkline};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::dom::to_lines;
use crate::render::LineChart;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const CHART_HEIGHT: u16 = 6;

#[derive(Debug, Default)]
pub struct ContentViewState {
    pub scroll_state: ScrollViewState,
    shown: Option<(u64, Option<DateTime<Local>>)>,
}

impl ContentViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets scrolling when the content region changed since the last call.
    pub fn follow(&mut self, generation: u64, loaded_at: Option<DateTime<Local>>) {
        let stamp = Some((generation, loaded_at));
        if self.shown != stamp {
            self.scroll_state.scroll_to_top();
            self.shown = stamp;
        }
    }
}

impl EventHandler for ContentViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => {}
        }
        None
    }
}

/// Flattens markup and wraps every line to `width` columns.
pub fn wrap_markup(markup: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    to_lines(markup)
        .iter()
        .flat_map(|line| textwrap::wrap(line, width))
        .map(|line| line.into_owned())
        .collect()
}

pub struct ContentView<'a> {
    pub title: &'a str,
    pub markup: &'a str,
    pub failed: bool,
    pub chart: Option<&'a LineChart>,
    pub state: &'a mut ContentViewState,
}

impl ContentView<'_> {
    fn render_chart(chart: &LineChart, frame: &mut Frame, area: Rect) {
        let color = match chart.color.as_str() {
            "#1976D2" => Color::Blue,
            _ => Color::Cyan,
        };
        let sparkline = Sparkline::default()
            .block(Block::bordered().title(chart.label.as_str()))
            .data(chart.values.iter().copied())
            .style(Style::default().fg(color));
        frame.render_widget(sparkline, area);
    }
}

impl Component for ContentView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.failed {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        let block = Block::bordered().title(self.title).border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (text_area, chart_area) = match self.chart {
            Some(_) if inner.height > CHART_HEIGHT + 2 => {
                let [text, chart] =
                    Layout::vertical([Constraint::Min(0), Constraint::Length(CHART_HEIGHT)])
                        .areas(inner);
                (text, Some(chart))
            }
            _ => (inner, None),
        };

        // One column is reserved for the scrollbar.
        let content_width = text_area.width.saturating_sub(1);
        let lines = wrap_markup(self.markup, content_width);
        let total_height = (lines.len() as u16).max(1);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        let text = Text::from(lines.into_iter().map(Line::from).collect::<Vec<_>>());
        scroll_view.render_widget(
            Paragraph::new(text),
            Rect::new(0, 0, content_width, total_height),
        );
        frame.render_stateful_widget(scroll_view, text_area, &mut self.state.scroll_state);

        if let (Some(chart), Some(chart_area)) = (self.chart, chart_area) {
            Self::render_chart(chart, frame, chart_area);
        }
    }
}
