use serde::Serialize;

use crate::dataset::{Mode, ModelSummaryRecord};

use super::sort::ModelRow;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricBand {
    High,
    Medium,
    Low,
}

impl MetricBand {
    pub fn for_value(value: f64) -> Self {
        if value >= 70.0 {
            Self::High
        } else if value >= 50.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopPerformer {
    pub model: String,
    pub accuracy: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Insights {
    pub mode: Mode,
    pub top: Option<TopPerformer>,
    pub average_accuracy: Option<f64>,
    /// Mean of `with_search - no_search` accuracy; only reported for the search view.
    pub search_improvement: Option<f64>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// `rows` are the already-sorted leaderboard rows; the first is the top performer.
pub fn compute_insights(
    summaries: &[ModelSummaryRecord],
    rows: &[ModelRow],
    mode: Mode,
) -> Insights {
    let top = rows.first().map(|r| TopPerformer {
        model: r.model.clone(),
        accuracy: r.accuracy,
    });
    let average_accuracy = mean(rows.iter().map(|r| r.accuracy));
    let search_improvement = match mode {
        Mode::WithSearch => mean(summaries.iter().map(|s| {
            s.metrics(Mode::WithSearch).accuracy - s.metrics(Mode::NoSearch).accuracy
        })),
        Mode::NoSearch => None,
    };
    Insights {
        mode,
        top,
        average_accuracy,
        search_improvement,
    }
}
