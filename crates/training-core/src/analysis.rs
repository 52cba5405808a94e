use crate::models::{DataPoint, SkillSeries};

/// Highest rating the game hands out. Decreases from here are ceiling bounce, not drops.
pub const MAX_RATING: i64 = 50;

/// Player-level outcome of analysing a full chart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChartSummary {
    /// Minimum finite cap across all series, if any series is capped.
    pub player_cap: Option<i64>,
    pub pops: u32,
    pub drops: u32,
}

impl ChartSummary {
    /// pops / (pops + drops), or `None` when nothing moved either way.
    pub fn pops_ratio(&self) -> Option<f64> {
        pops_ratio(self.pops, self.drops)
    }
}

pub fn pops_ratio(pops: u32, drops: u32) -> Option<f64> {
    let total = pops + drops;
    if total == 0 {
        None
    } else {
        Some(pops as f64 / total as f64)
    }
}

/// The value just before the first strict decrease, or `None` if the series never decreases.
pub fn detect_cap(data: &[DataPoint]) -> Option<i64> {
    data.windows(2)
        .find(|w| w[1].value < w[0].value)
        .map(|w| w[0].value)
}

/// Minimum of the finite caps, `None` when no series is capped.
pub fn player_cap(caps: impl IntoIterator<Item = Option<i64>>) -> Option<i64> {
    caps.into_iter().flatten().min()
}

/// Cap used to classify pops: the player cap bounded by `MAX_RATING`.
pub fn effective_cap(player_cap: Option<i64>) -> i64 {
    player_cap.map_or(MAX_RATING, |cap| cap.min(MAX_RATING))
}

/// Count (pops, drops) over consecutive pairs.
///
/// A pop is an increase whose later value exceeds `cap`. A drop is a decrease
/// whose earlier value is not `MAX_RATING`.
pub fn count_pops_drops(data: &[DataPoint], cap: i64) -> (u32, u32) {
    let mut pops = 0;
    let mut drops = 0;
    for w in data.windows(2) {
        let (prev, next) = (w[0].value, w[1].value);
        if next < prev && prev != MAX_RATING {
            drops += 1;
        }
        if next > prev && next > cap {
            pops += 1;
        }
    }
    (pops, drops)
}

/// Recompute cap, pops and drops for every series and return the player totals.
///
/// Caps for all series are fixed first since pop classification depends on
/// the player-level minimum.
pub fn analyze_chart(chart: &mut [SkillSeries]) -> ChartSummary {
    for series in chart.iter_mut() {
        series.cap = detect_cap(&series.data);
        series.capped = series.cap.is_some();
    }

    let min_cap = player_cap(chart.iter().map(|s| s.cap));
    let cap = effective_cap(min_cap);

    let mut summary = ChartSummary {
        player_cap: min_cap,
        ..Default::default()
    };
    for series in chart.iter_mut() {
        let (pops, drops) = count_pops_drops(&series.data, cap);
        series.pops = pops;
        series.drops = drops;
        summary.pops += pops;
        summary.drops += drops;
    }

    log::debug!(
        "Analysed {} series: cap={:?} pops={} drops={}",
        chart.len(),
        summary.player_cap,
        summary.pops,
        summary.drops
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(values: &[i64]) -> Vec<DataPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| DataPoint::new(format!("{:02}.01.", i + 1), v))
            .collect()
    }

    fn series(label_en: &str, values: &[i64]) -> SkillSeries {
        SkillSeries::new(label_en.to_string(), label_en.to_string(), false, points(values))
    }

    #[test]
    fn test_cap_is_value_before_first_decrease() {
        assert_eq!(detect_cap(&points(&[40, 45, 50, 48, 52])), Some(50));
        assert_eq!(detect_cap(&points(&[10, 9, 12, 8])), Some(10));
    }

    #[test]
    fn test_no_decrease_means_no_cap() {
        assert_eq!(detect_cap(&points(&[10, 10, 11, 15])), None);
        assert_eq!(detect_cap(&points(&[7])), None);
        assert_eq!(detect_cap(&[]), None);
    }

    #[test]
    fn test_player_cap_is_min_finite() {
        assert_eq!(player_cap([None, Some(38), Some(31), None]), Some(31));
        assert_eq!(player_cap([None, None]), None);
        assert_eq!(effective_cap(None), MAX_RATING);
        assert_eq!(effective_cap(Some(31)), 31);
    }

    #[test]
    fn test_decrease_from_max_is_not_a_drop() {
        // 50 -> 48 is ceiling bounce; 48 -> 52 beats the cap of 50
        let (pops, drops) = count_pops_drops(&points(&[40, 45, 50, 48, 52]), 50);
        assert_eq!(pops, 1);
        assert_eq!(drops, 0);
    }

    #[test]
    fn test_drops_below_max() {
        let (pops, drops) = count_pops_drops(&points(&[30, 28, 29, 27]), 50);
        assert_eq!(pops, 0);
        assert_eq!(drops, 2);
    }

    #[test]
    fn test_increase_to_cap_is_not_a_pop() {
        let (pops, _) = count_pops_drops(&points(&[30, 31, 32]), 32);
        assert_eq!(pops, 0);
        let (pops, _) = count_pops_drops(&points(&[30, 31, 33]), 32);
        assert_eq!(pops, 1);
    }

    #[test]
    fn test_analyze_uses_player_cap_across_series() {
        // Speed caps at 30, so Strength climbing past 30 counts as pops
        let mut chart = vec![series("Speed", &[28, 30, 29]), series("Strength", &[29, 31, 32])];
        let summary = analyze_chart(&mut chart);

        assert_eq!(summary.player_cap, Some(30));
        assert!(chart[0].capped);
        assert_eq!(chart[0].cap, Some(30));
        assert_eq!(chart[0].drops, 1);
        assert!(!chart[1].capped);
        assert_eq!(chart[1].cap, None);
        assert_eq!(chart[1].pops, 2);
        assert_eq!(summary.pops, 2);
        assert_eq!(summary.drops, 1);
    }

    #[test]
    fn test_analyze_overwrites_stale_counts() {
        let mut chart = vec![series("Speed", &[10, 11])];
        chart[0].pops = 9;
        chart[0].cap = Some(3);
        chart[0].capped = true;
        let summary = analyze_chart(&mut chart);
        assert_eq!(chart[0].pops, 0);
        assert_eq!(chart[0].cap, None);
        assert!(!chart[0].capped);
        assert_eq!(summary, ChartSummary::default());
    }

    #[test]
    fn test_pops_ratio() {
        assert_eq!(pops_ratio(3, 1), Some(0.75));
        assert_eq!(pops_ratio(0, 2), Some(0.0));
        assert_eq!(pops_ratio(0, 0), None);
    }
}
