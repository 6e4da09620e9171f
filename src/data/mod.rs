//! # Datasets
//!
//! Renderers never build their data inline: they ask a [`DataSource`]. The
//! only source shipped is [`MockData`], which rebuilds every dataset from
//! bundled JSON fixtures on each call. A backend-backed source only has to
//! implement the trait.

pub mod mock;
pub mod types;

use std::fmt;

pub use mock::MockData;
pub use types::*;

#[derive(Debug)]
pub enum DataError {
    /// The dataset could not be decoded.
    Parse {
        dataset: &'static str,
        message: String,
    },
    /// The dataset decoded but violates an invariant renderers rely on.
    Shape {
        dataset: &'static str,
        reason: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Parse { dataset, message } => {
                write!(f, "failed to parse {dataset} dataset: {message}")
            }
            DataError::Shape { dataset, reason } => {
                write!(f, "invalid {dataset} dataset: {reason}")
            }
        }
    }
}

impl std::error::Error for DataError {}

/// Supplies the datasets each renderer draws from.
pub trait DataSource: Send + Sync {
    /// Live teams and server info. `server_id` names the server selected in
    /// the console; sources may ignore it.
    fn battlefield(&self, server_id: &str) -> Result<Battlefield, DataError>;
    fn match_history(&self) -> Result<MatchHistory, DataError>;
    fn kills(&self) -> Result<KillFeed, DataError>;
    fn downs(&self) -> Result<DownFeed, DataError>;
    fn squad_records(&self) -> Result<SquadRecords, DataError>;
    fn players(&self) -> Result<PlayerRoster, DataError>;
    fn vips(&self) -> Result<VipRoster, DataError>;
    fn server_stats(&self) -> Result<ServerStats, DataError>;
}

impl Battlefield {
    /// Rejects squads larger than the game allows.
    pub fn validate(&self) -> Result<(), DataError> {
        for team in &self.teams {
            if let Some(squad) = team
                .squads
                .iter()
                .find(|s| s.member_count() > MAX_SQUAD_SIZE)
            {
                return Err(DataError::Shape {
                    dataset: "battlefield",
                    reason: format!(
                        "squad '{}' of team '{}' has {} members (max {})",
                        squad.name,
                        team.name,
                        squad.member_count(),
                        MAX_SQUAD_SIZE
                    ),
                });
            }
        }
        Ok(())
    }
}
