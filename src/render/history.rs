//! Match history page.

use super::{RenderContext, dataset, fill};
use crate::data::{MatchRecord, TeamResult};
use crate::dom::{Document, escape};

pub const HISTORY_LIST_TARGET: &str = ".history-list";

pub fn render(doc: &mut Document, ctx: &RenderContext<'_>) {
    let Some(history) = dataset(ctx.data.match_history()) else {
        return;
    };
    let html: String = history.matches.iter().map(match_markup).collect();
    fill(doc, HISTORY_LIST_TARGET, &html);
}

fn team_markup(team: &TeamResult) -> String {
    let class = if team.is_winner {
        "team-result winner"
    } else {
        "team-result"
    };
    format!(
        r#"<div class="{class}">
            <span class="team-name">{}</span>
            <span class="score">{}</span>
        </div>"#,
        escape(&team.name),
        team.score
    )
}

pub fn match_markup(record: &MatchRecord) -> String {
    format!(
        r#"
<div class="history-item">
    <div class="match-info">
        <h3>{map} - {mode}</h3>
        <div class="match-meta">
            <span class="time"><i class="fas fa-clock"></i> {time}</span>
            <span class="duration"><i class="fas fa-hourglass-half"></i> {duration}</span>
        </div>
    </div>
    <div class="teams-result">
        {team1}
        <div class="vs">VS</div>
        {team2}
    </div>
    <div class="match-actions">
        <button class="btn" title="查看详情"><i class="fas fa-info-circle"></i> 详情</button>
        <button class="btn" title="下载回放"><i class="fas fa-download"></i> 回放</button>
    </div>
</div>"#,
        map = escape(&record.map),
        mode = escape(&record.mode),
        time = escape(&record.time),
        duration = escape(&record.duration),
        team1 = team_markup(&record.teams.team1),
        team2 = team_markup(&record.teams.team2),
    )
}
