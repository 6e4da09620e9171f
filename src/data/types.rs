//! Dataset shapes consumed by the renderers.
//!
//! Field names follow the camelCase JSON the panel's backend is expected to
//! serve, so a real source can deserialize into the same types.

use serde::Deserialize;

/// Largest squad the game allows, leader included.
pub const MAX_SQUAD_SIZE: usize = 9;

// ============================================================================
// Console (live server)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battlefield {
    pub teams: Vec<Team>,
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub name: String,
    pub squads: Vec<Squad>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Squad {
    pub id: u32,
    pub name: String,
    pub leader: String,
    pub members: SquadMembers,
    #[serde(rename = "type")]
    pub kind: String,
    pub locked: bool,
}

impl Squad {
    /// Members including the leader.
    pub fn member_count(&self) -> usize {
        self.members.soldiers.len() + 1
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SquadMembers {
    pub leader: String,
    pub soldiers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub map: String,
    pub mode: String,
    pub players: String,
    pub ping: String,
    pub game_time: String,
    pub next_map: String,
    pub tickets: Tickets,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tickets {
    pub team1: u32,
    pub team2: u32,
}

// ============================================================================
// Match history
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MatchHistory {
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRecord {
    pub id: u32,
    pub map: String,
    pub mode: String,
    pub time: String,
    pub duration: String,
    pub teams: MatchTeams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchTeams {
    pub team1: TeamResult,
    pub team2: TeamResult,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResult {
    pub name: String,
    pub score: u32,
    pub is_winner: bool,
}

// ============================================================================
// Kill and down feeds
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub team: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KillFeed {
    pub kills: Vec<KillEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KillEvent {
    pub id: u32,
    pub killer: Combatant,
    pub victim: Combatant,
    pub weapon: String,
    pub distance: String,
    pub time: String,
    pub map: String,
    #[serde(default)]
    pub is_headshot: bool,
    #[serde(default)]
    pub is_vehicle_kill: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownFeed {
    pub downs: Vec<DownEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownEvent {
    pub id: u32,
    pub downer: Combatant,
    pub downed: Combatant,
    pub weapon: String,
    pub distance: String,
    pub time: String,
    pub map: String,
    pub revived: Revive,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Revive {
    pub status: bool,
    #[serde(default)]
    pub medic: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

// ============================================================================
// Squad records
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SquadRecords {
    pub squads: Vec<SquadRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadRecord {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub team: String,
    pub leader: SquadLeader,
    pub created_at: String,
    pub disbanded_at: String,
    pub duration: String,
    pub max_members: u32,
    pub stats: SquadStats,
    pub timeline: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadLeader {
    pub name: String,
    pub steam_id: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SquadStats {
    pub kills: u32,
    pub deaths: u32,
    pub revives: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEvent {
    pub time: String,
    pub event: String,
    pub icon: String,
}

// ============================================================================
// Players and VIPs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    Offline,
}

impl Presence {
    pub fn as_str(self) -> &'static str {
        match self {
            Presence::Online => "online",
            Presence::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRoster {
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub steam_id: String,
    pub avatar: String,
    pub status: Presence,
    pub stats: PlayerStats,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub play_time: String,
    pub kd: String,
    pub win_rate: String,
    pub kills: u32,
    pub deaths: u32,
    pub revives: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VipStatus {
    Active,
    Expired,
}

impl VipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VipStatus::Active => "active",
            VipStatus::Expired => "expired",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VipRoster {
    pub vips: Vec<Vip>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vip {
    pub id: u32,
    pub name: String,
    pub steam_id: String,
    pub avatar: String,
    pub status: VipStatus,
    pub start_date: String,
    pub end_date: String,
    pub level: String,
    pub admin: String,
    pub note: String,
    pub last_online: String,
}

// ============================================================================
// Statistics
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStats {
    pub overview: Overview,
    pub player_stats: PlayerTotals,
    pub map_stats: Vec<MapStat>,
    pub weapon_stats: Vec<WeaponStat>,
    pub vehicle_stats: Vec<VehicleStat>,
    pub time_stats: TimeStats,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_players: u64,
    pub active_players: u64,
    pub total_play_time: String,
    pub avg_daily_players: u64,
    pub peak_players: u64,
    pub server_uptime: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTotals {
    pub kills: u64,
    pub deaths: u64,
    pub kd: String,
    pub revives: u64,
    pub teamkills: u64,
    pub vehicle_kills: u64,
    pub headshots: u64,
    pub accuracy: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStat {
    pub name: String,
    pub play_count: u32,
    pub avg_duration: String,
    pub win_rate: WinRate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WinRate {
    pub us: String,
    pub ru: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeaponStat {
    pub name: String,
    pub kills: u64,
    pub headshots: u64,
    pub accuracy: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleStat {
    pub name: String,
    pub kills: u64,
    pub losses: u64,
    pub kd: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeStats {
    pub hourly: Vec<HourlyPoint>,
    pub weekly: Vec<DailyPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyPoint {
    pub hour: String,
    pub players: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyPoint {
    pub day: String,
    pub players: u64,
}
