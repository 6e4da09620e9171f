//! # Page Identity
//!
//! `PageId` is the raw key carried by navigation triggers and CLI arguments;
//! `Page` is the closed set of pages the panel knows how to render. Unknown
//! ids are still loadable (their fragment is fetched) but never rendered.

use std::fmt;
use std::str::FromStr;

/// When a page's renderer runs relative to fragment injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTiming {
    /// Right after the fragment replaces the content region.
    Immediate,
    /// On the next frame of the event loop.
    NextFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Console,
    GameHistory,
    Kills,
    Downs,
    Squads,
    Chat,
    Players,
    Vips,
    Stats,
    Bans,
    Vote,
    Admins,
    Logs,
    Settings,
}

impl Page {
    pub const ALL: [Page; 14] = [
        Page::Console,
        Page::GameHistory,
        Page::Kills,
        Page::Downs,
        Page::Squads,
        Page::Chat,
        Page::Players,
        Page::Vips,
        Page::Stats,
        Page::Bans,
        Page::Vote,
        Page::Admins,
        Page::Logs,
        Page::Settings,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Page::Console => "console",
            Page::GameHistory => "game-history",
            Page::Kills => "kills",
            Page::Downs => "downs",
            Page::Squads => "squads",
            Page::Chat => "chat",
            Page::Players => "players",
            Page::Vips => "vips",
            Page::Stats => "stats",
            Page::Bans => "bans",
            Page::Vote => "vote",
            Page::Admins => "admins",
            Page::Logs => "logs",
            Page::Settings => "settings",
        }
    }

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Page::Console => "控制台",
            Page::GameHistory => "对局历史",
            Page::Kills => "击杀记录",
            Page::Downs => "倒地记录",
            Page::Squads => "小队记录",
            Page::Chat => "聊天记录",
            Page::Players => "玩家管理",
            Page::Vips => "VIP管理",
            Page::Stats => "数据统计",
            Page::Bans => "封禁管理",
            Page::Vote => "投票管理",
            Page::Admins => "管理员",
            Page::Logs => "系统日志",
            Page::Settings => "设置",
        }
    }

    pub fn render_timing(self) -> RenderTiming {
        match self {
            // The console fragment is queried a frame later.
            Page::Console => RenderTiming::NextFrame,
            _ => RenderTiming::Immediate,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl fmt::Display for UnknownPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown page: {}", self.0)
    }
}

impl std::error::Error for UnknownPage {}

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// Raw page identifier as carried by a navigation trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The known page this id names, if any.
    pub fn page(&self) -> Option<Page> {
        self.0.parse().ok()
    }

    /// Whether the id can be used as a file name under `pages/`. Only
    /// letters, digits, `-` and `_` are accepted, so an id never escapes the
    /// fragment directory.
    pub fn is_path_safe(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    }

    /// Fragment path relative to the fragment base.
    pub fn fragment_path(&self) -> String {
        format!("pages/{}.html", self.0)
    }
}

impl From<Page> for PageId {
    fn from(page: Page) -> Self {
        Self(page.id().to_string())
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
