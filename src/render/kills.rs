//! Kill and down feeds. Both pages list one engagement per row between two
//! combatants, so they share the player block markup.

use super::{RenderContext, dataset, fill, team_class};
use crate::data::{Combatant, DownEvent, KillEvent};
use crate::dom::{Document, escape};

pub const KILLS_LIST_TARGET: &str = ".kills-list";
pub const DOWNS_LIST_TARGET: &str = ".downs-list";

pub fn render(doc: &mut Document, ctx: &RenderContext<'_>) {
    let Some(feed) = dataset(ctx.data.kills()) else {
        return;
    };
    let html: String = feed.kills.iter().map(kill_markup).collect();
    fill(doc, KILLS_LIST_TARGET, &html);
}

pub fn render_downs(doc: &mut Document, ctx: &RenderContext<'_>) {
    let Some(feed) = dataset(ctx.data.downs()) else {
        return;
    };
    let html: String = feed.downs.iter().map(down_markup).collect();
    fill(doc, DOWNS_LIST_TARGET, &html);
}

fn player_markup(role: &str, who: &Combatant) -> String {
    format!(
        r#"<div class="player {role}">
            <div class="player-details">
                <span class="name">{}</span>
                <span class="team {}">{}</span>
            </div>
        </div>"#,
        escape(&who.name),
        team_class(&who.team),
        escape(&who.team)
    )
}

pub fn kill_markup(kill: &KillEvent) -> String {
    let icon = if kill.is_headshot {
        "fa-bullseye"
    } else if kill.is_vehicle_kill {
        "fa-tank"
    } else {
        "fa-skull"
    };
    let mut tags = String::new();
    if kill.is_headshot {
        tags.push_str(r#"<span class="headshot-tag">爆头</span>"#);
    }
    if kill.is_vehicle_kill {
        tags.push_str(r#"<span class="vehicle-tag">载具击杀</span>"#);
    }

    format!(
        r#"
<div class="kill-item">
    <div class="kill-info">
        {killer}
        <div class="kill-details">
            <i class="fas {icon}"></i>
            <span class="weapon">{weapon}</span>
            <span class="distance">{distance}</span>
            {tags}
        </div>
        {victim}
    </div>
    <div class="kill-meta">
        <span class="time">{time}</span>
        <span class="map">{map}</span>
    </div>
</div>"#,
        killer = player_markup("killer", &kill.killer),
        victim = player_markup("victim", &kill.victim),
        weapon = escape(&kill.weapon),
        distance = escape(&kill.distance),
        time = escape(&kill.time),
        map = escape(&kill.map),
    )
}

pub fn down_markup(down: &DownEvent) -> String {
    let (status_class, icon, status) = match (&down.revived.medic, &down.revived.time) {
        (Some(medic), Some(time)) if down.revived.status => (
            "revived",
            "fa-heart",
            format!("已复活 - 由 {} 在 {}后救起", escape(medic), escape(time)),
        ),
        _ if down.revived.status => ("revived", "fa-heart", "已复活".to_string()),
        _ => ("dead", "fa-skull", "已阵亡".to_string()),
    };

    format!(
        r#"
<div class="down-item">
    <div class="down-info">
        {downer}
        <div class="down-details">
            <i class="fas fa-heart-broken"></i>
            <span class="weapon">{weapon}</span>
            <span class="distance">{distance}</span>
        </div>
        {downed}
    </div>
    <div class="down-status {status_class}">
        <i class="fas {icon}"></i>
        <span>{status}</span>
    </div>
    <div class="down-meta">
        <span class="time">{time}</span>
        <span class="map">{map}</span>
    </div>
</div>"#,
        downer = player_markup("downer", &down.downer),
        downed = player_markup("downed", &down.downed),
        weapon = escape(&down.weapon),
        distance = escape(&down.distance),
        time = escape(&down.time),
        map = escape(&down.map),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSource, MockData};
    use crate::dom::Selector;
    use crate::test_support::{BrokenData, render_ctx};

    #[test]
    fn test_one_entry_per_kill() {
        let mut doc = Document::from_markup(r#"<section><div class="kills-list"></div></section>"#);
        render(&mut doc, &render_ctx(&MockData));
        let expected = MockData.kills().unwrap().kills.len();
        assert_eq!(doc.count(&Selector::fixed(".kills-list .kill-item")), expected);
    }

    #[test]
    fn test_headshot_indicator_only_on_headshots() {
        for kill in MockData.kills().unwrap().kills {
            let html = kill_markup(&kill);
            assert_eq!(html.contains("headshot-tag"), kill.is_headshot, "kill {}", kill.id);
            assert_eq!(html.contains("fa-bullseye"), kill.is_headshot, "kill {}", kill.id);
        }
    }

    #[test]
    fn test_vehicle_kill_icon() {
        let kills = MockData.kills().unwrap().kills;
        let tank = kills.iter().find(|k| k.id == 2).unwrap();
        let html = kill_markup(tank);
        assert!(html.contains("fa-tank"));
        assert!(html.contains("vehicle-tag"));

        let plain = kills.iter().find(|k| k.id == 3).unwrap();
        assert!(kill_markup(plain).contains("fa-skull"));
    }

    #[test]
    fn test_team_classes() {
        let kills = MockData.kills().unwrap().kills;
        let html = kill_markup(&kills[0]);
        assert!(html.contains(r#"<span class="team us">美军</span>"#));
        assert!(html.contains(r#"<span class="team ru">俄军</span>"#));
    }

    #[test]
    fn test_down_status_revived_and_dead() {
        let downs = MockData.downs().unwrap().downs;
        let revived = down_markup(&downs[0]);
        assert!(revived.contains("down-status revived"));
        assert!(revived.contains("已复活 - 由 Medic_Pro 在 35秒后救起"));

        let dead = down_markup(&downs[1]);
        assert!(dead.contains("down-status dead"));
        assert!(dead.contains("已阵亡"));
    }

    #[test]
    fn test_downs_page_fills_downs_list() {
        let mut doc = Document::from_markup(r#"<div class="downs-list"></div>"#);
        render_downs(&mut doc, &render_ctx(&MockData));
        assert_eq!(doc.count(&Selector::fixed(".down-item")), 2);
    }

    #[test]
    fn test_broken_dataset_leaves_list_untouched() {
        let markup = r#"<div class="kills-list">loading</div>"#;
        let mut doc = Document::from_markup(markup);
        render(&mut doc, &render_ctx(&BrokenData));
        assert_eq!(doc.content(), markup);
    }
}
