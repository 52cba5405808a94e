pub mod player;
pub mod sentinel;
pub mod series;

pub use player::{PlayerIdentity, PlayerObservation, PlayerRecord};
pub use series::{DataPoint, SkillSeries};
