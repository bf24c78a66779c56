use std::cmp::Ordering;

use serde::Serialize;

use crate::dataset::{Mode, ModelSummaryRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Model,
    Accuracy,
    Pass1,
    Pass3,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "model" | "name" => Some(Self::Model),
            "accuracy" | "acc" => Some(Self::Accuracy),
            "pass1" | "pass@1" => Some(Self::Pass1),
            "pass3" | "pass@3" => Some(Self::Pass3),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Accuracy => "accuracy",
            Self::Pass1 => "pass1",
            Self::Pass3 => "pass3",
        }
    }
}

/// One leaderboard row: a summary flattened to a single mode.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelRow {
    pub model: String,
    pub accuracy: f64,
    pub pass1: f64,
    pub pass3: f64,
}

impl ModelRow {
    fn metric(&self, key: SortKey) -> f64 {
        match key {
            SortKey::Model => 0.0,
            SortKey::Accuracy => self.accuracy,
            SortKey::Pass1 => self.pass1,
            SortKey::Pass3 => self.pass3,
        }
    }

    pub fn compare(&self, other: &Self, key: SortKey) -> Ordering {
        match key {
            SortKey::Model => self.model.cmp(&other.model),
            _ => self.metric(key).total_cmp(&other.metric(key)),
        }
    }
}

pub fn project_mode(summaries: &[ModelSummaryRecord], mode: Mode) -> Vec<ModelRow> {
    summaries
        .iter()
        .map(|s| {
            let m = s.metrics(mode);
            ModelRow {
                model: s.model.clone(),
                accuracy: m.accuracy,
                pass1: m.pass1,
                pass3: m.pass3,
            }
        })
        .collect()
}

/// Stable in both directions: rows that compare equal keep their input order.
pub fn sort_models(mut rows: Vec<ModelRow>, key: SortKey, ascending: bool) -> Vec<ModelRow> {
    if ascending {
        rows.sort_by(|a, b| a.compare(b, key));
    } else {
        rows.sort_by(|a, b| b.compare(a, key));
    }
    rows
}
