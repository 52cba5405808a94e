use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::analysis::pops_ratio;
use crate::error::Result;
use crate::merge::merge;
use crate::models::{PlayerIdentity, PlayerRecord};
use crate::parser::TrainingExtractor;
use crate::store::RecordStore;

/// One player to process: identity plus the saved player page to read.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub identity: PlayerIdentity,
    pub page: PathBuf,
}

/// Load a roster file (JSON array of `{id, name, age, page}`).
/// Relative page paths are resolved against the roster's directory.
pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    let text = fs::read_to_string(path)?;
    let mut roster: Vec<RosterEntry> = serde_json::from_str(&text)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for entry in &mut roster {
        if entry.page.is_relative() {
            entry.page = base.join(&entry.page);
        }
    }
    log::info!("Loaded roster of {} players from {}", roster.len(), path.display());
    Ok(roster)
}

/// Result of folding one page into a player's record.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub record: PlayerRecord,
    pub key: String,
    pub written: bool,
}

/// Extract, merge with the stored record, and write if the ratio is defined.
///
/// Any error leaves the stored record untouched.
pub fn ingest_player(
    extractor: &TrainingExtractor,
    store: &RecordStore,
    identity: PlayerIdentity,
    html: &str,
) -> Result<IngestOutcome> {
    log::debug!("Processing training data for {} (id={})", identity.name, identity.id);
    let observation = extractor.observe(identity, html)?;
    let prior = store.load(&observation.identity)?;
    let (record, key) = merge(observation, prior);
    let written = store.write_if_ratio_defined(&record)?;
    Ok(IngestOutcome { record, key, written })
}

/// Counters for a whole roster run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunTotals {
    pub players: usize,
    pub written: usize,
    pub skipped: usize,
    pub too_old: usize,
    pub pops: u32,
    pub drops: u32,
}

impl RunTotals {
    pub fn ratio(&self) -> Option<f64> {
        pops_ratio(self.pops, self.drops)
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<IngestOutcome>,
    pub totals: RunTotals,
}

/// Process every roster entry up to `max_age`, one at a time.
///
/// A player whose page can't be read or parsed is logged and skipped; the
/// rest of the roster still runs.
pub fn ingest_roster(
    extractor: &TrainingExtractor,
    store: &RecordStore,
    roster: &[RosterEntry],
    max_age: u32,
) -> RunReport {
    let mut report = RunReport::default();

    for entry in roster {
        if entry.identity.age > max_age {
            log::debug!("Skipping {} (age {} > {})", entry.identity.name, entry.identity.age, max_age);
            report.totals.too_old += 1;
            continue;
        }

        let result = fs::read_to_string(&entry.page)
            .map_err(Into::into)
            .and_then(|html| ingest_player(extractor, store, entry.identity.clone(), &html));

        match result {
            Ok(outcome) => {
                report.totals.players += 1;
                report.totals.pops += outcome.record.player_pops;
                report.totals.drops += outcome.record.player_drops;
                if outcome.written {
                    report.totals.written += 1;
                }
                report.outcomes.push(outcome);
            }
            Err(e) => {
                log::warn!("Skipping {} (id={}): {}", entry.identity.name, entry.identity.id, e);
                report.totals.skipped += 1;
            }
        }
    }

    log::info!(
        "Processed {} players ({} written, {} skipped)",
        report.totals.players,
        report.totals.written,
        report.totals.skipped
    );
    report
}
