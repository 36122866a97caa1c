//! Minimal match records pairing each team's world ID with its name.

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    client::MatchSource,
    error::Result,
    models::{MatchOverview, Team, TeamValues, WorldId},
    worlds,
};

/// A match and its three competing worlds.
///
/// World names are looked up once, when the snapshot is built, and cannot be
/// set independently of the IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSnapshot {
    #[serde(rename = "matchID")]
    match_id: String,
    #[serde(rename = "redID")]
    red_id: WorldId,
    #[serde(rename = "blueID")]
    blue_id: WorldId,
    #[serde(rename = "greenID")]
    green_id: WorldId,
    #[serde(rename = "redWorldName")]
    red_world_name: Option<String>,
    #[serde(rename = "blueWorldName")]
    blue_world_name: Option<String>,
    #[serde(rename = "greenWorldName")]
    green_world_name: Option<String>,
}

impl MatchSnapshot {
    /// Build a snapshot, resolving each world through the name table.
    pub fn new(match_id: impl Into<String>, worlds: TeamValues<WorldId>) -> Self {
        let name = |id: WorldId| worlds::resolve_name(id).map(str::to_string);
        Self {
            match_id: match_id.into(),
            red_id: worlds.red,
            blue_id: worlds.blue,
            green_id: worlds.green,
            red_world_name: name(worlds.red),
            blue_world_name: name(worlds.blue),
            green_world_name: name(worlds.green),
        }
    }

    /// Snapshot of the match described by `overview`.
    pub fn from_overview(overview: &MatchOverview) -> Self {
        Self::new(overview.id.clone(), overview.worlds)
    }

    /// Match identifier such as `2-1`.
    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    /// World IDs of all three teams.
    pub fn worlds(&self) -> TeamValues<WorldId> {
        TeamValues {
            red: self.red_id,
            blue: self.blue_id,
            green: self.green_id,
        }
    }

    /// World ID of a competing team.
    pub fn world_id(&self, team: Team) -> Option<WorldId> {
        self.worlds().get(team).copied()
    }

    /// Resolved world name of a competing team; `None` for unknown worlds.
    pub fn world_name(&self, team: Team) -> Option<&str> {
        match team {
            Team::Red => self.red_world_name.as_deref(),
            Team::Blue => self.blue_world_name.as_deref(),
            Team::Green => self.green_world_name.as_deref(),
            Team::Neutral => None,
        }
    }

    /// Serialise with the field names used by the web frontend.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Fetch the overview of each match in order and turn it into a snapshot.
///
/// Requests are issued one at a time. The first failure aborts the batch and
/// is returned; no partial result is produced.
pub async fn build_snapshots<S, I>(source: &S, match_ids: &[I]) -> Result<Vec<MatchSnapshot>>
where
    S: MatchSource + Sync + ?Sized,
    I: AsRef<str> + Sync,
{
    let mut snapshots = Vec::with_capacity(match_ids.len());
    for match_id in match_ids {
        let overview = source.match_overview(match_id.as_ref()).await?;
        debug!(match_id = %overview.id, "overview fetched");
        snapshots.push(MatchSnapshot::from_overview(&overview));
    }
    Ok(snapshots)
}

/// Snapshots for every currently active match.
pub async fn generate_match_snapshots<S>(source: &S) -> Result<Vec<MatchSnapshot>>
where
    S: MatchSource + Sync + ?Sized,
{
    let match_ids = source.list_active_match_ids().await?;
    info!(count = match_ids.len(), "building match snapshots");
    build_snapshots(source, &match_ids).await
}
