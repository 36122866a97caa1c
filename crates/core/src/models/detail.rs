#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Team, TeamValues, WorldId};

/// Full state of a WvW match as returned by `/v2/wvw/matches/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    /// Match identifier such as `2-1`.
    pub id: String,
    /// When the match began.
    pub start_time: DateTime<Utc>,
    /// When the match ends or ended.
    pub end_time: DateTime<Utc>,
    /// Overall score across all skirmishes.
    pub scores: TeamValues<u64>,
    /// Main world of each team.
    pub worlds: TeamValues<WorldId>,
    /// Every world on each team, including linked worlds.
    pub all_worlds: TeamValues<Vec<WorldId>>,
    /// Total deaths per team.
    pub deaths: TeamValues<u64>,
    /// Total kills per team.
    pub kills: TeamValues<u64>,
    /// Victory points per team.
    pub victory_points: TeamValues<u64>,
    /// Skirmishes in chronological order, ids starting at 1.
    #[serde(default)]
    pub skirmishes: Vec<Skirmish>,
    /// The four battlegrounds.
    #[serde(default)]
    pub maps: Vec<WvwMap>,
}

impl MatchDetail {
    /// Skirmish with the highest id, i.e. the one currently being scored.
    pub fn current_skirmish(&self) -> Option<&Skirmish> {
        self.skirmishes.iter().max_by_key(|skirmish| skirmish.id)
    }

    /// Look up a map by type.
    pub fn map(&self, map_type: MapType) -> Option<&WvwMap> {
        self.maps.iter().find(|map| map.map_type == map_type)
    }
}

/// A fixed-duration scoring interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skirmish {
    pub id: u32,
    pub scores: TeamValues<u64>,
    #[serde(default)]
    pub map_scores: Vec<MapScores>,
}

/// Points scored on a single map during one skirmish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapScores {
    #[serde(rename = "type")]
    pub map_type: MapType,
    pub scores: TeamValues<u64>,
}

/// Battleground identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapType {
    /// Eternal Battlegrounds.
    Center,
    RedHome,
    BlueHome,
    GreenHome,
    /// Any map type this client does not know about.
    #[serde(other)]
    Unknown,
}

impl MapType {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            MapType::Center => "Eternal Battlegrounds",
            MapType::RedHome => "Red Borderlands",
            MapType::BlueHome => "Blue Borderlands",
            MapType::GreenHome => "Green Borderlands",
            MapType::Unknown => "Unknown map",
        }
    }
}

/// One battleground and its statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WvwMap {
    pub id: u32,
    #[serde(rename = "type")]
    pub map_type: MapType,
    pub scores: TeamValues<u64>,
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    pub deaths: TeamValues<u64>,
    pub kills: TeamValues<u64>,
}

impl WvwMap {
    /// Objectives currently held by `team`.
    pub fn objectives_owned_by(&self, team: Team) -> impl Iterator<Item = &Objective> {
        self.objectives
            .iter()
            .filter(move |objective| objective.owner == team)
    }
}

/// A map-wide bonus held by one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    #[serde(rename = "type")]
    pub bonus_type: String,
    pub owner: Team,
}

/// A capturable location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Identifier such as `38-6`.
    pub id: String,
    /// Objective kind, e.g. `Camp`, `Tower`, `Keep`, `Castle`.
    #[serde(rename = "type")]
    pub objective_type: String,
    pub owner: Team,
    pub last_flipped: Option<DateTime<Utc>>,
    /// Guild id of the claimant.
    #[serde(default)]
    pub claimed_by: Option<String>,
    #[serde(default)]
    pub claimed_at: Option<DateTime<Utc>>,
    /// Score granted to the owner every tick.
    pub points_tick: u32,
    /// Score granted once on capture.
    pub points_capture: u32,
    #[serde(default)]
    pub yaks_delivered: Option<u32>,
    #[serde(default)]
    pub guild_upgrades: Vec<u32>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE_DETAIL: &str = r#"{
        "id": "2-1",
        "start_time": "2024-03-08T18:00:00Z",
        "end_time": "2024-03-15T18:00:00Z",
        "scores": { "red": 120340, "blue": 98211, "green": 110004 },
        "worlds": { "red": 2104, "blue": 2301, "green": 2003 },
        "all_worlds": { "red": [2104, 2013], "blue": [2301, 2009], "green": [2003] },
        "deaths": { "red": 5012, "blue": 4870, "green": 5321 },
        "kills": { "red": 5402, "blue": 4511, "green": 5290 },
        "victory_points": { "red": 210, "blue": 174, "green": 201 },
        "skirmishes": [
            {
                "id": 1,
                "scores": { "red": 300, "blue": 210, "green": 250 },
                "map_scores": [
                    { "type": "Center", "scores": { "red": 100, "blue": 70, "green": 90 } },
                    { "type": "RedHome", "scores": { "red": 80, "blue": 40, "green": 60 } }
                ]
            },
            {
                "id": 2,
                "scores": { "red": 120, "blue": 140, "green": 90 },
                "map_scores": []
            }
        ],
        "maps": [
            {
                "id": 38,
                "type": "Center",
                "scores": { "red": 40000, "blue": 35000, "green": 39000 },
                "bonuses": [],
                "objectives": [
                    {
                        "id": "38-6",
                        "type": "Keep",
                        "owner": "Red",
                        "last_flipped": "2024-03-10T02:14:51Z",
                        "claimed_by": "1E9D0A4D-3F2B-E511-80D3-AC162DC0E835",
                        "claimed_at": "2024-03-10T02:15:20Z",
                        "points_tick": 4,
                        "points_capture": 8,
                        "yaks_delivered": 42,
                        "guild_upgrades": [178, 307]
                    },
                    {
                        "id": "38-15",
                        "type": "Spawn",
                        "owner": "Neutral",
                        "last_flipped": null,
                        "claimed_by": null,
                        "claimed_at": null,
                        "points_tick": 0,
                        "points_capture": 0
                    }
                ],
                "deaths": { "red": 2000, "blue": 1800, "green": 2100 },
                "kills": { "red": 2200, "blue": 1700, "green": 2050 }
            },
            {
                "id": 1099,
                "type": "RedHome",
                "scores": { "red": 30000, "blue": 20000, "green": 25000 },
                "bonuses": [ { "type": "Bloodlust", "owner": "Green" } ],
                "objectives": [],
                "deaths": { "red": 900, "blue": 800, "green": 1000 },
                "kills": { "red": 1000, "blue": 700, "green": 950 }
            }
        ]
    }"#;

    #[test]
    fn parses_full_match_detail() {
        let detail: MatchDetail = serde_json::from_str(SAMPLE_DETAIL).expect("valid detail");
        assert_eq!(detail.id, "2-1");
        assert_eq!(detail.worlds.red, WorldId(2104));
        assert_eq!(detail.victory_points.leader(), Some(Team::Red));
        assert_eq!(detail.skirmishes.len(), 2);
        assert_eq!(detail.current_skirmish().map(|s| s.id), Some(2));
        assert_eq!(
            detail.skirmishes[0].map_scores[1].map_type,
            MapType::RedHome
        );

        let center = detail.map(MapType::Center).expect("center map");
        assert_eq!(center.objectives_owned_by(Team::Red).count(), 1);
        let spawn = &center.objectives[1];
        assert_eq!(spawn.owner, Team::Neutral);
        assert!(spawn.last_flipped.is_none());
        assert!(spawn.claimed_by.is_none());
        assert!(spawn.yaks_delivered.is_none());
        assert!(spawn.guild_upgrades.is_empty());

        let red_home = detail.map(MapType::RedHome).expect("red borderlands");
        assert_eq!(red_home.bonuses[0].owner, Team::Green);
    }

    #[test]
    fn unknown_map_types_are_tolerated() {
        let raw = r#"{ "type": "EdgeOfTheMists", "scores": { "red": 1, "blue": 2, "green": 3 } }"#;
        let scores: MapScores = serde_json::from_str(raw).expect("map scores");
        assert_eq!(scores.map_type, MapType::Unknown);
    }
}
