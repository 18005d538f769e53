use serde::Serialize;

use crate::dataset::{COL_CS_DIFF_10, COL_GOLD_DIFF_10, MatchRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrendMetric {
    GoldDiff10,
    CsDiff10,
}

impl TrendMetric {
    pub const ALL: [TrendMetric; 2] = [TrendMetric::GoldDiff10, TrendMetric::CsDiff10];

    /// Column name, also used as the series name in the legend.
    pub fn label(self) -> &'static str {
        match self {
            TrendMetric::GoldDiff10 => COL_GOLD_DIFF_10,
            TrendMetric::CsDiff10 => COL_CS_DIFF_10,
        }
    }

    fn value(self, row: &MatchRecord) -> Option<f64> {
        match self {
            TrendMetric::GoldDiff10 => row.gold_diff_10(),
            TrendMetric::CsDiff10 => row.cs_diff_10(),
        }
    }
}

/// One (match, metric) pair of the long-form series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub match_id: String,
    pub metric: TrendMetric,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TrendChart {
    /// Nominal x categories in order of first appearance.
    pub categories: Vec<String>,
    pub points: Vec<TrendPoint>,
}

impl TrendChart {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Chart coordinates for one metric: x is the category slot.
    pub fn series(&self, metric: TrendMetric) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter(|p| p.metric == metric)
            .filter_map(|p| {
                self.category_index(&p.match_id)
                    .map(|idx| (idx as f64, p.value))
            })
            .collect()
    }

    pub fn category_index(&self, match_id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == match_id)
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.categories.len().saturating_sub(1).max(1) as f64]
    }

    /// Value range padded by a tenth so lines do not sit on the frame.
    pub fn y_bounds(&self) -> [f64; 2] {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in &self.points {
            min = min.min(p.value);
            max = max.max(p.value);
        }
        if !min.is_finite() || !max.is_finite() {
            return [-1.0, 1.0];
        }
        let span = (max - min).abs();
        let pad = if span == 0.0 {
            min.abs().max(1.0) * 0.1
        } else {
            span * 0.1
        };
        [min - pad, max + pad]
    }
}

/// Folds the two diff columns into long form, gold before cs within a match.
/// Rows whose cell is not numeric contribute no point for that metric.
pub fn build_trend(rows: &[&MatchRecord]) -> TrendChart {
    let mut chart = TrendChart {
        categories: Vec::with_capacity(rows.len()),
        points: Vec::with_capacity(rows.len() * TrendMetric::ALL.len()),
    };
    for row in rows {
        if !chart.categories.iter().any(|c| c == &row.match_id) {
            chart.categories.push(row.match_id.clone());
        }
        for metric in TrendMetric::ALL {
            let Some(value) = metric.value(row).filter(|v| v.is_finite()) else {
                continue;
            };
            chart.points.push(TrendPoint {
                match_id: row.match_id.clone(),
                metric,
                value,
            });
        }
    }
    chart
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_cells_are_left_out() {
        let a = MatchRecord::new("A", "Ahri", "M1")
            .with_field(COL_GOLD_DIFF_10, 120.0)
            .with_field(COL_CS_DIFF_10, "n/a");
        let chart = build_trend(&[&a]);
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].metric, TrendMetric::GoldDiff10);
        assert_eq!(chart.categories, vec!["M1"]);
    }

    #[test]
    fn repeated_match_id_shares_a_category() {
        let a = MatchRecord::new("A", "Ahri", "M1")
            .with_field(COL_GOLD_DIFF_10, 1.0)
            .with_field(COL_CS_DIFF_10, 2.0);
        let b = MatchRecord::new("A", "Lux", "M1")
            .with_field(COL_GOLD_DIFF_10, 3.0)
            .with_field(COL_CS_DIFF_10, 4.0);
        let chart = build_trend(&[&a, &b]);
        assert_eq!(chart.categories.len(), 1);
        assert_eq!(
            chart.series(TrendMetric::GoldDiff10),
            vec![(0.0, 1.0), (0.0, 3.0)]
        );
    }

    #[test]
    fn flat_series_still_gets_a_range() {
        let a = MatchRecord::new("A", "Ahri", "M1")
            .with_field(COL_GOLD_DIFF_10, 0.0)
            .with_field(COL_CS_DIFF_10, 0.0);
        let [lo, hi] = build_trend(&[&a]).y_bounds();
        assert!(lo < 0.0 && hi > 0.0);
        assert_eq!(TrendChart::default().y_bounds(), [-1.0, 1.0]);
    }
}
