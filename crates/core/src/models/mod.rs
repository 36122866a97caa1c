//! Typed representations of the WvW API payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

pub(crate) mod detail;
mod overview;

pub use detail::{Bonus, MapScores, MapType, MatchDetail, Objective, Skirmish, WvwMap};
pub use overview::MatchOverview;

/// Numeric identifier of a world (server shard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(pub u32);

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team colour. `Neutral` only appears as an objective or bonus owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Red team.
    Red,
    /// Blue team.
    Blue,
    /// Green team.
    Green,
    /// Unowned.
    Neutral,
}

impl Team {
    /// The three competing colours in display order.
    pub const COMPETING: [Team; 3] = [Team::Red, Team::Blue, Team::Green];

    /// Human-readable colour name.
    pub fn label(self) -> &'static str {
        match self {
            Team::Red => "Red",
            Team::Blue => "Blue",
            Team::Green => "Green",
            Team::Neutral => "Neutral",
        }
    }
}

/// One value per competing team.
///
/// The API repeats the `{red, blue, green}` shape for scores, kills, deaths,
/// victory points and world IDs; all of them deserialize into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamValues<T> {
    /// Red team's value.
    pub red: T,
    /// Blue team's value.
    pub blue: T,
    /// Green team's value.
    pub green: T,
}

impl<T> TeamValues<T> {
    /// Value for a competing team. `Neutral` has no entry.
    pub fn get(&self, team: Team) -> Option<&T> {
        match team {
            Team::Red => Some(&self.red),
            Team::Blue => Some(&self.blue),
            Team::Green => Some(&self.green),
            Team::Neutral => None,
        }
    }

    /// Iterate `(team, value)` in red, blue, green order.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        [
            (Team::Red, &self.red),
            (Team::Blue, &self.blue),
            (Team::Green, &self.green),
        ]
        .into_iter()
    }

    /// Apply `f` to every team's value.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> TeamValues<U> {
        TeamValues {
            red: f(&self.red),
            blue: f(&self.blue),
            green: f(&self.green),
        }
    }
}

impl<T: Ord> TeamValues<T> {
    /// Team holding the strictly highest value, `None` when tied for first.
    pub fn leader(&self) -> Option<Team> {
        let mut best: Option<(Team, &T)> = None;
        let mut tied = false;
        for (team, value) in self.iter() {
            match best {
                Some((_, current)) if value == current => tied = true,
                Some((_, current)) if value < current => {}
                _ => {
                    best = Some((team, value));
                    tied = false;
                }
            }
        }
        if tied {
            None
        } else {
            best.map(|(team, _)| team)
        }
    }
}
