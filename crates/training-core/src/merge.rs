use std::collections::{HashMap, HashSet};

use crate::analysis::analyze_chart;
use crate::models::{PlayerObservation, PlayerRecord, SkillSeries};

/// Fold a fresh observation into the player's stored history.
///
/// Returns the final record and the storage key it belongs under. Prior
/// points are never removed or changed; fresh points are added only for
/// dates the stored series doesn't have yet. Cap, pops and drops are always
/// recomputed over the merged history.
pub fn merge(observation: PlayerObservation, prior: Option<PlayerRecord>) -> (PlayerRecord, String) {
    let PlayerObservation {
        identity,
        training_chart,
        ..
    } = observation;

    let mut chart = match prior {
        Some(prior) => {
            log::debug!(
                "Merging {} fresh series into {} stored for {}",
                training_chart.len(),
                prior.training_chart.len(),
                identity.name
            );
            merge_charts(prior.training_chart, training_chart)
        }
        None => fold_duplicates(training_chart),
    };

    let summary = analyze_chart(&mut chart);
    let key = identity.record_key();
    let record = PlayerRecord {
        id: identity.id,
        name: identity.name,
        age: identity.age,
        training_chart: chart,
        player_cap: summary.player_cap,
        player_pops: summary.pops,
        player_drops: summary.drops,
        player_pops_ratio: summary.pops_ratio(),
    };
    (record, key)
}

/// Merge fresh series into stored ones by English name.
///
/// Output order is the fresh series first, then stored series the fresh
/// scrape no longer shows.
pub fn merge_charts(stored: Vec<SkillSeries>, fresh: Vec<SkillSeries>) -> Vec<SkillSeries> {
    let stored = fold_duplicates(stored);
    let mut order: Vec<String> = Vec::with_capacity(stored.len());
    let mut by_name: HashMap<String, SkillSeries> = HashMap::with_capacity(stored.len());
    for series in stored {
        let key = series.key().to_string();
        order.push(key.clone());
        by_name.insert(key, series);
    }

    let fresh = fold_duplicates(fresh);
    let mut merged = Vec::with_capacity(fresh.len() + order.len());
    for current in fresh {
        match by_name.remove(current.key()) {
            Some(existing) => merged.push(merge_series(existing, current)),
            None => merged.push(current),
        }
    }

    // Skills missing from the latest scrape are carried forward as stored
    merged.extend(order.into_iter().filter_map(|key| by_name.remove(&key)));
    merged
}

/// Collapse series sharing an English name into the first occurrence.
///
/// Later duplicates are merged in date by date, so no point is lost.
fn fold_duplicates(chart: Vec<SkillSeries>) -> Vec<SkillSeries> {
    let mut order: Vec<String> = Vec::with_capacity(chart.len());
    let mut by_name: HashMap<String, SkillSeries> = HashMap::with_capacity(chart.len());
    for series in chart {
        let key = series.key().to_string();
        match by_name.remove(&key) {
            Some(first) => {
                log::warn!("Chart lists series '{}' more than once; folding the points together", key);
                by_name.insert(key, merge_series(first, series));
            }
            None => {
                order.push(key.clone());
                by_name.insert(key, series);
            }
        }
    }
    order.into_iter().filter_map(|key| by_name.remove(&key)).collect()
}

/// Append fresh points with unseen dates, re-sort, and take metadata from the fresh series.
pub fn merge_series(mut existing: SkillSeries, current: SkillSeries) -> SkillSeries {
    let mut known: HashSet<String> = existing.data.iter().map(|p| p.date.clone()).collect();
    let before = existing.data.len();
    existing
        .data
        .extend(current.data.into_iter().filter(|p| known.insert(p.date.clone())));
    if existing.data.len() > before {
        log::debug!(
            "Added {} new points to '{}'",
            existing.data.len() - before,
            current.label_en
        );
    }
    existing.sort_chronologically();

    existing.hidden = current.hidden;
    existing.label = current.label;
    existing.label_en = current.label_en;
    existing
}
