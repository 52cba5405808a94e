use serde::{Deserialize, Serialize};

use crate::models::sentinel;

/// One observed rating on a chart date ("DD.MM.").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: String,
    pub value: i64,
}

impl DataPoint {
    pub fn new(date: impl Into<String>, value: i64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }

    /// Sort key as (month, day). Labels that don't start with "DD.MM" sort as (0, 0).
    pub fn sort_key(&self) -> (u32, u32) {
        parse_label_date(&self.date)
    }
}

/// Parse a "DD.MM." chart label into (month, day).
pub fn parse_label_date(label: &str) -> (u32, u32) {
    let day = label.get(0..2).and_then(|s| s.parse::<u32>().ok());
    let month = label.get(3..5).and_then(|s| s.parse::<u32>().ok());
    match (day, month) {
        (Some(day), Some(month)) => (month, day),
        _ => (0, 0),
    }
}

/// Time series of one skill for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSeries {
    pub label: String,
    pub label_en: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub data: Vec<DataPoint>,
    #[serde(default)]
    pub capped: bool,
    #[serde(default, with = "sentinel::cap")]
    pub cap: Option<i64>,
    #[serde(default)]
    pub pops: u32,
    #[serde(default)]
    pub drops: u32,
}

impl SkillSeries {
    pub fn new(label: String, label_en: String, hidden: bool, data: Vec<DataPoint>) -> Self {
        Self {
            label,
            label_en,
            hidden,
            data,
            capped: false,
            cap: None,
            pops: 0,
            drops: 0,
        }
    }

    /// Merge key: the English name, or the native one for records that predate translation.
    pub fn key(&self) -> &str {
        if self.label_en.is_empty() {
            &self.label
        } else {
            &self.label_en
        }
    }

    /// Stable chronological sort by (month, day).
    pub fn sort_chronologically(&mut self) {
        self.data.sort_by_key(DataPoint::sort_key);
    }

    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.data.iter().map(|p| p.value)
    }
}
