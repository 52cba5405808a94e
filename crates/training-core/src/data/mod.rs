pub mod skills;

pub use skills::{SkillDictionary, SkillKind, SkillName};
