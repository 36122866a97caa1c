use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TeamValues, WorldId};

/// Lightweight description of a match: who plays and when.
///
/// Returned by `/v2/wvw/matches/overview?id=...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOverview {
    /// Match identifier such as `2-1`.
    pub id: String,
    /// Main world of each team.
    pub worlds: TeamValues<WorldId>,
    /// Every world on each team, including linked worlds.
    pub all_worlds: TeamValues<Vec<WorldId>>,
    /// When the match began.
    pub start_time: DateTime<Utc>,
    /// When the match ends or ended.
    pub end_time: DateTime<Utc>,
}
