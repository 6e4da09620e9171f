//! Console page: live server info and the squads of both teams.

use log::{info, warn};

use super::{RenderContext, dataset, fill};
use crate::data::{Battlefield, MAX_SQUAD_SIZE, ServerInfo, Squad};
use crate::dom::{Document, Selector, escape};

pub const SERVER_INFO_TARGET: &str = ".server-info";
pub const SQUAD_LIST_TARGET: &str = ".squad-list";

pub fn render(doc: &mut Document, ctx: &RenderContext<'_>) {
    info!("Loading squad data for server '{}'", ctx.server_id);
    let Some(battlefield) = dataset(ctx.data.battlefield(ctx.server_id)) else {
        return;
    };
    fill(doc, SERVER_INFO_TARGET, &server_info_markup(&battlefield.server_info));
    update_teams(doc, &battlefield);
}

fn info_tags(info: &ServerInfo) -> [(&'static str, String); 7] {
    [
        ("fa-map", format!("地图: {}", info.map)),
        ("fa-gamepad", format!("模式: {}", info.mode)),
        ("fa-users", format!("人数: {}", info.players)),
        ("fa-signal", format!("延迟: {}", info.ping)),
        ("fa-clock", format!("开局: {}", info.game_time)),
        ("fa-map-marked-alt", format!("下图: {}", info.next_map)),
        (
            "fa-ticket-alt",
            format!("票数: {} vs {}", info.tickets.team1, info.tickets.team2),
        ),
    ]
}

pub fn server_info_markup(info: &ServerInfo) -> String {
    info_tags(info)
        .iter()
        .map(|(icon, text)| {
            format!(
                r#"
<div class="info-tag">
    <i class="fas {icon}"></i>
    {}
</div>"#,
                escape(text)
            )
        })
        .collect()
}

/// Fills the n-th `.squad-list` with the n-th team's squads. Lists without a
/// matching team end up empty.
fn update_teams(doc: &mut Document, battlefield: &Battlefield) {
    let selector = Selector::fixed(SQUAD_LIST_TARGET);
    let lists = doc.count(&selector);
    if lists == 0 {
        warn!("Squad list containers not found");
        return;
    }

    for (index, team) in battlefield.teams.iter().enumerate().take(lists) {
        info!("Updating team {} with {} squads", index + 1, team.squads.len());
        let html: String = team.squads.iter().map(squad_markup).collect();
        doc.set_inner_html_nth(&selector, index, &html);
    }
    for index in battlefield.teams.len()..lists {
        doc.set_inner_html_nth(&selector, index, "");
    }
}

fn member_row(name: &str, icon: &str, class: &str, stats: (u32, u32, u32)) -> String {
    format!(
        r#"
        <tr class="{class}">
            <td class="member-name"><i class="fas {icon}"></i> {}</td>
            <td class="member-stats"><span class="kills">{}</span>-<span class="deaths">{}</span>-<span class="revives">{}</span></td>
        </tr>"#,
        escape(name),
        stats.0,
        stats.1,
        stats.2
    )
}

pub fn squad_markup(squad: &Squad) -> String {
    let (class, lock_icon, lock_button) = if squad.locked {
        (
            "squad locked",
            r#"<i class="fas fa-lock"></i>"#,
            r#"<button class="btn small warning" title="解锁"><i class="fas fa-unlock"></i></button>"#,
        )
    } else {
        (
            "squad",
            "",
            r#"<button class="btn small" title="锁定"><i class="fas fa-lock"></i></button>"#,
        )
    };

    // Per-member stats are placeholders until the backend reports them.
    let mut rows = member_row(&squad.members.leader, "fa-star", "member leader", (12, 3, 5));
    for soldier in &squad.members.soldiers {
        rows.push_str(&member_row(soldier, "fa-user", "member", (8, 6, 2)));
    }

    format!(
        r#"
<div class="{class}">
    <div class="squad-header">
        <span class="squad-name">{name}</span>
        <span class="squad-type {kind_class}">{kind}</span>
        {lock_icon}
    </div>
    <div class="squad-info">
        <span class="leader"><i class="fas fa-user-shield"></i> {leader}</span>
        <span class="members"><i class="fas fa-users"></i> {count}/{max}</span>
    </div>
    <div class="squad-members">
        <table class="members-table">{rows}
        </table>
    </div>
    <div class="squad-actions">
        <button class="btn small" title="查看详情"><i class="fas fa-info-circle"></i></button>
        <button class="btn small" title="发送消息"><i class="fas fa-comment"></i></button>
        {lock_button}
        <button class="btn small danger" title="解散"><i class="fas fa-times"></i></button>
    </div>
</div>"#,
        name = escape(&squad.name),
        kind_class = escape(&squad.kind.to_lowercase()),
        kind = escape(&squad.kind),
        leader = escape(&squad.members.leader),
        count = squad.member_count(),
        max = MAX_SQUAD_SIZE,
    )
}
