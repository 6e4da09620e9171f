//! Mock datasets decoded from JSON fixtures compiled into the binary.

use log::debug;
use serde::de::DeserializeOwned;

use super::{
    Battlefield, DataError, DataSource, DownFeed, KillFeed, MatchHistory, PlayerRoster,
    ServerStats, SquadRecords, VipRoster,
};

const BATTLEFIELD: &str = include_str!("fixtures/battlefield.json");
const HISTORY: &str = include_str!("fixtures/history.json");
const KILLS: &str = include_str!("fixtures/kills.json");
const DOWNS: &str = include_str!("fixtures/downs.json");
const SQUAD_RECORDS: &str = include_str!("fixtures/squad_records.json");
const PLAYERS: &str = include_str!("fixtures/players.json");
const VIPS: &str = include_str!("fixtures/vips.json");
const STATS: &str = include_str!("fixtures/stats.json");

fn decode<T: DeserializeOwned>(dataset: &'static str, json: &str) -> Result<T, DataError> {
    serde_json::from_str(json).map_err(|e| DataError::Parse {
        dataset,
        message: e.to_string(),
    })
}

/// Hardcoded data standing in for the game-server backend. Every call
/// decodes a fresh copy; nothing is cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockData;

impl DataSource for MockData {
    fn battlefield(&self, server_id: &str) -> Result<Battlefield, DataError> {
        // Every server shows the same mock.
        debug!("Building mock battlefield for server '{}'", server_id);
        let battlefield: Battlefield = decode("battlefield", BATTLEFIELD)?;
        battlefield.validate()?;
        Ok(battlefield)
    }

    fn match_history(&self) -> Result<MatchHistory, DataError> {
        decode("match history", HISTORY)
    }

    fn kills(&self) -> Result<KillFeed, DataError> {
        decode("kills", KILLS)
    }

    fn downs(&self) -> Result<DownFeed, DataError> {
        decode("downs", DOWNS)
    }

    fn squad_records(&self) -> Result<SquadRecords, DataError> {
        decode("squad records", SQUAD_RECORDS)
    }

    fn players(&self) -> Result<PlayerRoster, DataError> {
        decode("players", PLAYERS)
    }

    fn vips(&self) -> Result<VipRoster, DataError> {
        decode("vips", VIPS)
    }

    fn server_stats(&self) -> Result<ServerStats, DataError> {
        decode("stats", STATS)
    }
}
