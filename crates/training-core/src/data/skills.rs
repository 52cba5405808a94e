use std::collections::HashMap;

use crate::error::{Result, TrainingError};

/// Whether a chart label names a trainable skill or a position rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillKind {
    Skill,
    Position,
}

impl SkillKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "skill" => Some(SkillKind::Skill),
            "position" => Some(SkillKind::Position),
            _ => None,
        }
    }
}

/// A resolved (native, English) label pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillName<'a> {
    pub label: &'a str,
    pub label_en: &'a str,
    pub kind: SkillKind,
}

/// Bidirectional Slovenian <-> English chart label lookup, loaded from skills.csv.
#[derive(Debug)]
pub struct SkillDictionary {
    /// Native label -> English label
    to_english: HashMap<String, String>,
    /// English label -> native label
    to_native: HashMap<String, String>,
    /// English label -> kind
    kinds: HashMap<String, SkillKind>,
}

impl SkillDictionary {
    /// Load from CSV bytes (native,english,kind per line, no header).
    pub fn from_csv_bytes(data: &[u8]) -> Result<Self> {
        let mut to_english = HashMap::new();
        let mut to_native = HashMap::new();
        let mut kinds = HashMap::new();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(data);

        for result in rdr.records() {
            let record = result?;
            if record.len() < 3 {
                continue;
            }
            let native = record[0].trim().to_string();
            let english = record[1].trim().to_string();
            let kind = SkillKind::parse(record[2].trim()).ok_or_else(|| {
                TrainingError::Data(format!("Bad skill kind for '{}': {}", english, &record[2]))
            })?;
            if native.is_empty() || english.is_empty() {
                continue;
            }
            if to_english.contains_key(&native) || to_native.contains_key(&english) {
                return Err(TrainingError::Data(format!(
                    "Duplicate skill pair '{}' / '{}'",
                    native, english
                )));
            }

            kinds.insert(english.clone(), kind);
            to_native.insert(english.clone(), native.clone());
            to_english.insert(native, english);
        }

        log::info!("Loaded {} skill labels", to_english.len());
        Ok(Self {
            to_english,
            to_native,
            kinds,
        })
    }

    /// Load from the bundled skills.csv (compiled into the binary).
    pub fn bundled() -> Result<Self> {
        Self::from_csv_bytes(include_bytes!("../../data/skills.csv"))
    }

    /// Resolve a chart label given in either language.
    /// The native table is tried first; a miss there treats the label as English.
    pub fn resolve(&self, label: &str) -> Result<SkillName<'_>> {
        let label = label.trim();
        if let Some((native, english)) = self.to_english.get_key_value(label) {
            return Ok(self.pair(native, english));
        }
        if let Some((english, native)) = self.to_native.get_key_value(label) {
            return Ok(self.pair(native, english));
        }
        Err(TrainingError::UnknownSkill(label.to_string()))
    }

    fn pair<'a>(&'a self, native: &'a str, english: &'a str) -> SkillName<'a> {
        SkillName {
            label: native,
            label_en: english,
            kind: self.kinds.get(english).copied().unwrap_or(SkillKind::Skill),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_bundled_skills() {
        let db = SkillDictionary::bundled().unwrap();
        assert_eq!(db.to_english.len(), 25);
    }

    #[test]
    fn test_resolve_native_label() {
        let db = SkillDictionary::bundled().unwrap();
        let name = db.resolve("Strel na gol").unwrap();
        assert_eq!(name.label, "Strel na gol");
        assert_eq!(name.label_en, "Shooting");
        assert_eq!(name.kind, SkillKind::Skill);
    }

    #[test]
    fn test_resolve_english_label() {
        let db = SkillDictionary::bundled().unwrap();
        let name = db.resolve("First touch").unwrap();
        assert_eq!(name.label, "Kontrola žoge");
        assert_eq!(name.label_en, "First touch");
    }

    #[test]
    fn test_positions_are_tagged() {
        let db = SkillDictionary::bundled().unwrap();
        assert_eq!(db.resolve("Vratar").unwrap().kind, SkillKind::Position);
        assert_eq!(db.resolve("Forward").unwrap().kind, SkillKind::Position);
    }

    #[test]
    fn test_unknown_label_is_error() {
        let db = SkillDictionary::bundled().unwrap();
        match db.resolve("Juggling") {
            Err(TrainingError::UnknownSkill(name)) => assert_eq!(name, "Juggling"),
            other => panic!("expected UnknownSkill, got {:?}", other),
        }
    }

    #[test]
    fn test_translation_is_bijective() {
        let db = SkillDictionary::bundled().unwrap();
        for (native, english) in &db.to_english {
            assert_eq!(db.to_native.get(english), Some(native));
        }
        assert_eq!(db.to_english.len(), db.to_native.len());
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let csv = "Hitrost,Speed,skill\nHitrost,Pace,skill\n";
        assert!(SkillDictionary::from_csv_bytes(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_bad_kind_rejected() {
        let csv = "Hitrost,Speed,talent\n";
        assert!(matches!(
            SkillDictionary::from_csv_bytes(csv.as_bytes()),
            Err(TrainingError::Data(_))
        ));
    }
}
