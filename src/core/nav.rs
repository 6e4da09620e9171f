//! # Navigation
//!
//! Sidebar model: groups of page triggers. Exactly one item is active after
//! a successful switch; the group holding it is kept expanded.

use log::{debug, warn};

use super::page::{Page, PageId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub page: PageId,
    pub label: String,
    pub active: bool,
}

impl NavItem {
    pub fn new(page: PageId) -> Self {
        let label = page
            .page()
            .map(|p| p.label().to_string())
            .unwrap_or_else(|| page.to_string());
        Self {
            page,
            label,
            active: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavGroup {
    pub title: String,
    pub expanded: bool,
    pub items: Vec<NavItem>,
}

impl NavGroup {
    pub fn new(title: impl Into<String>, pages: impl IntoIterator<Item = PageId>) -> Self {
        Self {
            title: title.into(),
            expanded: false,
            items: pages.into_iter().map(NavItem::new).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub groups: Vec<NavGroup>,
}

impl Default for Navigation {
    fn default() -> Self {
        let group = |title: &str, pages: &[Page]| {
            NavGroup::new(title, pages.iter().map(|&p| PageId::from(p)))
        };
        let mut groups = vec![
            group("服务器管理", &[Page::Console, Page::Chat, Page::Vote]),
            group(
                "游戏记录",
                &[Page::GameHistory, Page::Kills, Page::Downs, Page::Squads],
            ),
            group("玩家管理", &[Page::Players, Page::Vips, Page::Bans]),
            group(
                "系统",
                &[Page::Stats, Page::Admins, Page::Logs, Page::Settings],
            ),
        ];
        groups[0].expanded = true;
        Self { groups }
    }
}

impl Navigation {
    pub fn new(groups: Vec<NavGroup>) -> Self {
        Self { groups }
    }

    pub fn items(&self) -> impl Iterator<Item = &NavItem> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    /// Pages of all items currently marked active.
    pub fn active_pages(&self) -> Vec<&PageId> {
        self.items().filter(|i| i.active).map(|i| &i.page).collect()
    }

    pub fn group_of(&self, page: &PageId) -> Option<usize> {
        self.groups
            .iter()
            .position(|g| g.items.iter().any(|i| &i.page == page))
    }

    /// Flips a group's expanded state. Returns false for an unknown index.
    pub fn toggle_group(&mut self, index: usize) -> bool {
        match self.groups.get_mut(index) {
            Some(group) => {
                group.expanded = !group.expanded;
                debug!("Group '{}' expanded={}", group.title, group.expanded);
                true
            }
            None => false,
        }
    }

    /// Clears every item's active mark, then marks `page` active and expands
    /// its group. Returns false (leaving nothing active) if no item has
    /// that page.
    pub fn activate(&mut self, page: &PageId) -> bool {
        for group in &mut self.groups {
            for item in &mut group.items {
                item.active = false;
            }
        }

        let mut found = false;
        for group in &mut self.groups {
            for item in &mut group.items {
                if &item.page == page && !found {
                    item.active = true;
                    found = true;
                }
            }
            if found {
                group.expanded = true;
                break;
            }
        }

        if !found {
            warn!("No navigation item for page '{}'", page);
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_covers_every_page_once() {
        let nav = Navigation::default();
        for page in Page::ALL {
            let count = nav.items().filter(|i| i.page == PageId::from(page)).count();
            assert_eq!(count, 1, "{page}");
        }
    }

    #[test]
    fn test_activate_marks_exactly_one_and_expands_group() {
        let mut nav = Navigation::default();
        let kills = PageId::from(Page::Kills);
        let group = nav.group_of(&kills).unwrap();
        assert!(!nav.groups[group].expanded);

        assert!(nav.activate(&kills));
        assert_eq!(nav.active_pages(), vec![&kills]);
        assert!(nav.groups[group].expanded);

        let vips = PageId::from(Page::Vips);
        assert!(nav.activate(&vips));
        assert_eq!(nav.active_pages(), vec![&vips]);
    }

    #[test]
    fn test_activate_unknown_clears_all() {
        let mut nav = Navigation::default();
        nav.activate(&PageId::from(Page::Console));
        assert!(!nav.activate(&PageId::from("missing")));
        assert!(nav.active_pages().is_empty());
    }

    #[test]
    fn test_toggle_group() {
        let mut nav = Navigation::default();
        assert!(nav.groups[0].expanded);
        assert!(nav.toggle_group(0));
        assert!(!nav.groups[0].expanded);
        assert!(!nav.toggle_group(99));
    }

    #[test]
    fn test_unknown_page_label_falls_back_to_id() {
        let item = NavItem::new(PageId::from("reports"));
        assert_eq!(item.label, "reports");
    }
}
