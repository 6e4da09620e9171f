use super::{RenderContext, dataset, fill};
use crate::data::Player;
use crate::dom::{Document, escape};

pub const PLAYERS_GRID_TARGET: &str = ".players-grid";

pub fn render(doc: &mut Document, ctx: &RenderContext<'_>) {
    let Some(roster) = dataset(ctx.data.players()) else {
        return;
    };
    let html: String = roster.players.iter().map(player_markup).collect();
    fill(doc, PLAYERS_GRID_TARGET, &html);
}

fn stat_item(label: &str, value: &str) -> String {
    format!(
        r#"
            <div class="stat-item">
                <span class="label">{label}</span>
                <span class="value">{}</span>
            </div>"#,
        escape(value)
    )
}

pub fn player_markup(player: &Player) -> String {
    let stats = &player.stats;
    let first_row = [
        stat_item("游戏时长", &stats.play_time),
        stat_item("K/D比", &stats.kd),
        stat_item("胜率", &stats.win_rate),
    ]
    .concat();
    let second_row = [
        stat_item("击杀", &stats.kills.to_string()),
        stat_item("死亡", &stats.deaths.to_string()),
        stat_item("救起", &stats.revives.to_string()),
    ]
    .concat();
    let roles: String = player
        .roles
        .iter()
        .map(|role| format!(r#"<span class="role-tag">{}</span>"#, escape(role)))
        .collect();

    format!(
        r#"
<div class="player-card">
    <div class="player-header">
        <img src="{avatar}" class="player-avatar">
        <div class="player-info">
            <h3>{name}</h3>
            <span class="steam-id">{steam_id}</span>
        </div>
        <div class="player-status {status}">{status}</div>
    </div>
    <div class="player-stats">
        <div class="stats-row">{first_row}
        </div>
        <div class="stats-row">{second_row}
        </div>
    </div>
    <div class="player-roles">{roles}</div>
    <div class="player-actions">
        <button class="btn"><i class="fas fa-user-shield"></i> 详细信息</button>
        <button class="btn"><i class="fas fa-ban"></i> 封禁</button>
    </div>
</div>"#,
        avatar = escape(&player.avatar),
        name = escape(&player.name),
        steam_id = escape(&player.steam_id),
        status = player.status.as_str(),
    )
}
