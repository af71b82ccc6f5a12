// src/utils/stats.rs

use serde::{Deserialize, Serialize};

/// Width of one histogram bin in points.
pub const BIN_WIDTH: i64 = 20;

/// Number of bins covering 0..=100. The last bin also holds 100.
pub const BIN_COUNT: usize = 5;

/// Lowest and highest legal vote values.
pub const MIN_POINT: i64 = 0;
pub const MAX_POINT: i64 = 100;

/// One bar of the score distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive label, e.g. "20-39".
    pub range: String,
    pub count: i64,
}

/// Aggregate statistics for one problem, computed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub average: f64,
    pub std_dev: f64,
    pub user_score: i64,
    /// T-score of `user_score`; not clamped.
    pub user_dev: f64,
    pub vote_count: i64,
    pub histogram: Vec<HistogramBin>,
}

/// Arithmetic mean, 0.0 for an empty set.
pub fn mean(points: &[i64]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let sum: f64 = points.iter().map(|&p| p as f64).sum();
    sum / points.len() as f64
}

/// Standard deviation dividing by N, 0.0 for an empty set.
pub fn population_std_dev(points: &[i64]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let avg = mean(points);
    let variance = points
        .iter()
        .map(|&p| {
            let d = p as f64 - avg;
            d * d
        })
        .sum::<f64>()
        / points.len() as f64;
    variance.sqrt()
}

/// `50 + 10 * (score - average) / std_dev`, or 50 when every vote is equal.
pub fn deviation_score(user_score: i64, average: f64, std_dev: f64) -> f64 {
    if std_dev > 0.0 {
        50.0 + 10.0 * (user_score as f64 - average) / std_dev
    } else {
        50.0
    }
}

fn bin_index(point: i64) -> usize {
    let clamped = point.clamp(MIN_POINT, MAX_POINT);
    ((clamped / BIN_WIDTH) as usize).min(BIN_COUNT - 1)
}

fn bin_label(index: usize) -> String {
    let low = index as i64 * BIN_WIDTH;
    let high = if index == BIN_COUNT - 1 {
        MAX_POINT
    } else {
        low + BIN_WIDTH - 1
    };
    format!("{}-{}", low, high)
}

/// Counts votes into the five fixed bins.
pub fn histogram(points: &[i64]) -> Vec<HistogramBin> {
    let mut counts = [0i64; BIN_COUNT];
    for &p in points {
        counts[bin_index(p)] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin {
            range: bin_label(i),
            count,
        })
        .collect()
}

/// Builds the full summary for `points` as seen by a voter who gave `user_score`.
pub fn summarize(points: &[i64], user_score: i64) -> ResultSummary {
    let average = mean(points);
    let std_dev = population_std_dev(points);

    ResultSummary {
        average,
        std_dev,
        user_score,
        user_dev: deviation_score(user_score, average, std_dev),
        vote_count: points.len() as i64,
        histogram: histogram(points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cover_whole_range() {
        let labels: Vec<String> = (0..BIN_COUNT).map(bin_label).collect();
        assert_eq!(labels, ["0-19", "20-39", "40-59", "60-79", "80-100"]);
    }

    #[test]
    fn out_of_range_points_clamp_to_end_bins() {
        assert_eq!(bin_index(-5), 0);
        assert_eq!(bin_index(150), BIN_COUNT - 1);
    }
}
