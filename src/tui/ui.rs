use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::page::Page;
use crate::core::state::{LoadState, Shell};
use crate::render::LineChart;
use crate::render::stats::chart_range_label;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ContentView, Sidebar, TitleBar};

pub const SIDEBAR_WIDTH: u16 = 24;

const HELP_TEXT: &str =
    "↑↓ 选择  Enter 打开  Space 折叠  b 侧栏  s 切换服务器  r 刷新小队  c 图表范围  F5 重新加载  q 退出";

pub fn draw_ui(frame: &mut Frame, shell: &Shell, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::from_shell(shell).render(frame, title_area);

    let content_area = if shell.sidebar_expanded {
        let [sidebar_area, content_area] =
            Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(main_area);
        tui.sidebar.sync(&shell.navigation);
        Sidebar {
            nav: &shell.navigation,
            state: &tui.sidebar,
        }
        .render(frame, sidebar_area);
        content_area
    } else {
        main_area
    };

    let chart = visible_chart(shell, tui);
    tui.content.follow(shell.generation, shell.loaded_at);
    ContentView {
        title: &content_title(shell),
        markup: shell.document.content(),
        failed: matches!(shell.load, LoadState::Failed(_)),
        chart: chart.as_ref(),
        state: &mut tui.content,
    }
    .render(frame, content_area);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn content_title(shell: &Shell) -> String {
    let label = match shell.current_page.page() {
        Some(page) => page.label(),
        None => shell.current_page.as_str(),
    };
    match shell.load {
        LoadState::Loading => format!("{} (加载中...)", label),
        _ => label.to_string(),
    }
}

/// The hourly chart belongs to the statistics page; it is only shown while
/// that page is open and loaded. A picked range is appended to its title.
fn visible_chart(shell: &Shell, tui: &TuiState) -> Option<LineChart> {
    if shell.current_page.page() != Some(Page::Stats) || shell.load != LoadState::Loaded {
        return None;
    }
    let (_, mut chart) = tui.charts.latest()?;
    if let Some(label) = shell.chart_range.as_deref().and_then(chart_range_label) {
        chart.label = format!("{} ({})", chart.label, label);
    }
    Some(chart)
}
