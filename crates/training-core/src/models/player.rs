use serde::{Deserialize, Serialize};

use crate::models::sentinel;
use crate::models::SkillSeries;

/// Identity supplied by whoever discovered the player; never recomputed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub id: String,
    pub name: String,
    pub age: u32,
}

impl PlayerIdentity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
        }
    }

    /// Storage key `<surname>_<id>.json`. Single-word names use that word.
    pub fn record_key(&self) -> String {
        let mut words = self.name.split_whitespace();
        let first = words.next();
        let token = words.next().or(first).unwrap_or("player");
        format!("{}_{}.json", token, self.id)
    }
}

/// Series extracted from a single fetch, before merging with history.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerObservation {
    pub identity: PlayerIdentity,
    pub training_chart: Vec<SkillSeries>,
    pub player_cap: Option<i64>,
}

impl PlayerObservation {
    pub fn new(identity: PlayerIdentity, training_chart: Vec<SkillSeries>, player_cap: Option<i64>) -> Self {
        Self {
            identity,
            training_chart,
            player_cap,
        }
    }
}

/// Accumulated cross-run history for one player, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub training_chart: Vec<SkillSeries>,
    #[serde(default, with = "sentinel::cap")]
    pub player_cap: Option<i64>,
    #[serde(default)]
    pub player_pops: u32,
    #[serde(default)]
    pub player_drops: u32,
    #[serde(default, with = "sentinel::ratio")]
    pub player_pops_ratio: Option<f64>,
}

impl PlayerRecord {
    pub fn identity(&self) -> PlayerIdentity {
        PlayerIdentity::new(self.id.clone(), self.name.clone(), self.age)
    }

    pub fn record_key(&self) -> String {
        self.identity().record_key()
    }

    /// Only records with at least one pop or drop are worth persisting.
    pub fn has_defined_ratio(&self) -> bool {
        self.player_pops_ratio.is_some()
    }

    pub fn series(&self, label_en: &str) -> Option<&SkillSeries> {
        self.training_chart.iter().find(|s| s.key() == label_en)
    }
}
