pub mod analysis;
pub mod data;
pub mod error;
pub mod merge;
pub mod models;
pub mod parser;
pub mod runner;
pub mod store;

pub use analysis::{analyze_chart, ChartSummary, MAX_RATING};
pub use data::{SkillDictionary, SkillKind};
pub use error::{Result, TrainingError};
pub use merge::merge;
pub use models::{DataPoint, PlayerIdentity, PlayerObservation, PlayerRecord, SkillSeries};
pub use parser::{TrainingChart, TrainingExtractor};
pub use runner::{ingest_player, ingest_roster, load_roster, RosterEntry, RunReport, RunTotals};
pub use store::RecordStore;
