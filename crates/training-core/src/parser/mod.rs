pub mod chart;
pub mod locator;
pub mod normalizer;
pub mod page;
pub mod patterns;

use crate::analysis::analyze_chart;
use crate::data::SkillDictionary;
use crate::error::Result;
use crate::models::{PlayerIdentity, PlayerObservation, SkillSeries};
use crate::parser::chart::{assemble_chart, date_labels};
use crate::parser::locator::find_array_literal;
use crate::parser::normalizer::parse_array_literal;

const DATASETS_KEY: &str = "datasets";
const LABELS_KEY: &str = "labels";

/// Analysed series from one fetch, with the player cap they imply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingChart {
    pub series: Vec<SkillSeries>,
    pub player_cap: Option<i64>,
}

/// Turns the chart script of a player page into analysed skill series.
pub struct TrainingExtractor {
    skills: SkillDictionary,
}

impl TrainingExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            skills: SkillDictionary::bundled()?,
        })
    }

    /// Extract and analyse the training chart embedded in `raw`.
    ///
    /// A missing or unterminated `datasets` literal yields an empty chart. A
    /// missing `labels` literal leaves every series without points.
    pub fn extract_training_chart(&self, raw: &str) -> Result<TrainingChart> {
        let Some(datasets_literal) = find_array_literal(raw, DATASETS_KEY) else {
            log::debug!("No datasets literal found");
            return Ok(TrainingChart::default());
        };
        let datasets = parse_array_literal(datasets_literal)?;

        let dates = match find_array_literal(raw, LABELS_KEY) {
            Some(labels_literal) => date_labels(&parse_array_literal(labels_literal)?)?,
            None => {
                log::warn!("Chart has {} datasets but no date labels", datasets.len());
                Vec::new()
            }
        };

        let mut series = assemble_chart(&datasets, &dates, &self.skills)?;
        let summary = analyze_chart(&mut series);
        log::debug!(
            "Extracted {} series over {} dates (cap {:?})",
            series.len(),
            dates.len(),
            summary.player_cap
        );
        Ok(TrainingChart {
            series,
            player_cap: summary.player_cap,
        })
    }

    /// Extract from a full player page, reading only the chart scripts.
    pub fn extract_page(&self, html: &str) -> Result<TrainingChart> {
        match page::chart_script(html) {
            Some(script) => self.extract_training_chart(&script),
            None => {
                log::debug!("Page has no chart scripts");
                Ok(TrainingChart::default())
            }
        }
    }

    /// Build a fresh observation for `identity` from a player page.
    pub fn observe(&self, identity: PlayerIdentity, html: &str) -> Result<PlayerObservation> {
        let chart = self.extract_page(html)?;
        Ok(PlayerObservation::new(identity, chart.series, chart.player_cap))
    }
}
