//! Statistics page: overview cards, aggregate player totals, per-map,
//! per-weapon and per-vehicle tables, and the hourly online chart.
//!
//! Each section is optional in the fragment. Missing sections are skipped
//! without affecting the others.

use log::debug;

use super::chart::init_hourly_chart;
use super::{RenderContext, dataset, fill};
use crate::data::{MapStat, Overview, PlayerTotals, ServerStats, VehicleStat, WeaponStat};
use crate::dom::{Document, Selector, escape};

pub const OVERVIEW_TARGET: &str = ".overview-stats";
pub const PLAYER_STATS_TARGET: &str = ".player-stats";
pub const MAP_STATS_TARGET: &str = ".map-stats table tbody";
pub const WEAPON_STATS_TARGET: &str = ".weapon-stats table tbody";
pub const VEHICLE_STATS_TARGET: &str = ".vehicle-stats table tbody";
pub const CHART_RANGE_TARGET: &str = ".chart-range";

/// Chart range options as `(value, label)`, in the order the select lists them.
pub const CHART_RANGES: [(&str, &str); 2] = [("24h", "24小时"), ("7d", "7天")];

pub fn chart_range_label(value: &str) -> Option<&'static str> {
    CHART_RANGES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
}

/// The range after `current`, wrapping around. No range yet means the
/// select still shows its first option.
pub fn next_chart_range(current: Option<&str>) -> &'static str {
    let index = current
        .and_then(|c| CHART_RANGES.iter().position(|(v, _)| *v == c))
        .unwrap_or(0);
    CHART_RANGES[(index + 1) % CHART_RANGES.len()].0
}

/// Option list for the range select with `selected` marked.
pub fn chart_range_options(selected: &str) -> String {
    CHART_RANGES
        .iter()
        .map(|(value, label)| {
            let mark = if *value == selected { " selected" } else { "" };
            format!(r#"<option value="{value}"{mark}>{label}</option>"#)
        })
        .collect()
}

pub fn render(doc: &mut Document, ctx: &RenderContext<'_>) {
    let Some(stats) = dataset(ctx.data.server_stats()) else {
        return;
    };
    fill_sections(doc, &stats);
    init_hourly_chart(doc, ctx.charts, &stats.time_stats);
}

/// Fills every section present in `doc` and returns the targets that were
/// missing.
fn fill_sections(doc: &mut Document, stats: &ServerStats) -> Vec<&'static str> {
    let sections = [
        (OVERVIEW_TARGET, overview_markup(&stats.overview)),
        (PLAYER_STATS_TARGET, player_totals_markup(&stats.player_stats)),
        (MAP_STATS_TARGET, stats.map_stats.iter().map(map_row).collect()),
        (
            WEAPON_STATS_TARGET,
            stats.weapon_stats.iter().map(weapon_row).collect(),
        ),
        (
            VEHICLE_STATS_TARGET,
            stats.vehicle_stats.iter().map(vehicle_row).collect(),
        ),
    ];
    let mut skipped = Vec::new();
    for (target, html) in sections {
        if doc.exists(&Selector::fixed(target)) {
            fill(doc, target, &html);
        } else {
            debug!("Stats section {} not in fragment, skipped", target);
            skipped.push(target);
        }
    }
    skipped
}

/// The six overview cards, in display order.
pub fn overview_cards(overview: &Overview) -> [(&'static str, String, &'static str); 6] {
    [
        ("fa-users", overview.total_players.to_string(), "总玩家数"),
        ("fa-user-check", overview.active_players.to_string(), "活跃玩家"),
        ("fa-clock", overview.total_play_time.clone(), "总游戏时长"),
        ("fa-chart-line", overview.avg_daily_players.to_string(), "平均玩家"),
        ("fa-trophy", overview.peak_players.to_string(), "最高在线"),
        ("fa-server", overview.server_uptime.clone(), "服务器运行时间"),
    ]
}

fn overview_markup(overview: &Overview) -> String {
    overview_cards(overview)
        .iter()
        .map(|(icon, value, label)| {
            format!(
                r#"
<div class="stat-card">
    <i class="fas {icon}"></i>
    <div class="stat-info">
        <span class="value">{}</span>
        <span class="label">{label}</span>
    </div>
</div>"#,
                escape(value)
            )
        })
        .collect()
}

fn stat_row(items: &[(&str, String)]) -> String {
    let cells: String = items
        .iter()
        .map(|(label, value)| {
            format!(
                r#"
    <div class="stat-item">
        <span class="label">{label}</span>
        <span class="value">{}</span>
    </div>"#,
                escape(value)
            )
        })
        .collect();
    format!("\n<div class=\"stat-row\">{cells}\n</div>")
}

fn player_totals_markup(totals: &PlayerTotals) -> String {
    let combat = stat_row(&[
        ("总击杀", totals.kills.to_string()),
        ("总死亡", totals.deaths.to_string()),
        ("K/D比", totals.kd.clone()),
        ("救起数", totals.revives.to_string()),
    ]);
    let misc = stat_row(&[
        ("误杀数", totals.teamkills.to_string()),
        ("载具击杀", totals.vehicle_kills.to_string()),
        ("爆头数", totals.headshots.to_string()),
        ("平均命中率", totals.accuracy.clone()),
    ]);
    combat + &misc
}

fn map_row(map: &MapStat) -> String {
    let us = escape(&map.win_rate.us);
    let ru = escape(&map.win_rate.ru);
    format!(
        r#"
<tr>
    <td>{}</td>
    <td>{}</td>
    <td>{}</td>
    <td>
        <div class="win-rate">
            <div class="us" style="width: {us}"></div>
            <div class="ru" style="width: {ru}"></div>
        </div>
        <div class="win-rate-text">
            <span class="us">{us}</span>
            <span class="ru">{ru}</span>
        </div>
    </td>
</tr>"#,
        escape(&map.name),
        map.play_count,
        escape(&map.avg_duration)
    )
}

fn weapon_row(weapon: &WeaponStat) -> String {
    format!(
        "\n<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape(&weapon.name),
        weapon.kills,
        weapon.headshots,
        escape(&weapon.accuracy)
    )
}

fn vehicle_row(vehicle: &VehicleStat) -> String {
    format!(
        "\n<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape(&vehicle.name),
        vehicle.kills,
        vehicle.losses,
        escape(&vehicle.kd)
    )
}
