//! Squad records: squads that existed during past matches, with their
//! lifetime stats and a timeline of what happened to them.

use super::{RenderContext, dataset, fill, team_class};
use crate::data::{SquadRecord, TimelineEvent};
use crate::dom::{Document, escape};

pub const SQUADS_LIST_TARGET: &str = ".squads-list";

pub fn render(doc: &mut Document, ctx: &RenderContext<'_>) {
    let Some(records) = dataset(ctx.data.squad_records()) else {
        return;
    };
    let html: String = records.squads.iter().map(record_markup).collect();
    fill(doc, SQUADS_LIST_TARGET, &html);
}

/// Lowercased event text with whitespace runs collapsed into `-`.
pub fn event_class(event: &str) -> String {
    event
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

fn timeline_markup(event: &TimelineEvent) -> String {
    format!(
        r#"
            <div class="timeline-event {}">
                <i class="fas {}"></i>
                <span>{} - {}</span>
            </div>"#,
        escape(&event_class(&event.event)),
        escape(&event.icon),
        escape(&event.time),
        escape(&event.event)
    )
}

pub fn record_markup(squad: &SquadRecord) -> String {
    let timeline: String = squad.timeline.iter().map(timeline_markup).collect();
    format!(
        r#"
<div class="squad-record">
    <div class="squad-header">
        <div class="squad-info">
            <div class="squad-type {kind_class}">
                <i class="fas fa-users"></i>
                {kind}
            </div>
            <h3>{name}</h3>
            <div class="team-tag {team_class}">{team}</div>
        </div>
        <div class="squad-stats">
            <div class="stat">
                <span class="label">存活时间</span>
                <span class="value">{duration}</span>
            </div>
            <div class="stat">
                <span class="label">最高人数</span>
                <span class="value">{max}人</span>
            </div>
            <div class="stat">
                <span class="label">击杀/死亡</span>
                <span class="value">{kills}/{deaths}</span>
            </div>
        </div>
    </div>
    <div class="squad-details">
        <div class="leader-info">
            <div class="leader-details">
                <span class="name">{leader}</span>
                <span class="steam-id">{steam_id}</span>
            </div>
        </div>
        <div class="squad-timeline">{timeline}
        </div>
    </div>
</div>"#,
        kind_class = escape(&squad.kind.to_lowercase()),
        kind = escape(&squad.kind),
        name = escape(&squad.name),
        team_class = team_class(&squad.team),
        team = escape(&squad.team),
        duration = escape(&squad.duration),
        max = squad.max_members,
        kills = squad.stats.kills,
        deaths = squad.stats.deaths,
        leader = escape(&squad.leader.name),
        steam_id = escape(&squad.leader.steam_id),
    )
}
