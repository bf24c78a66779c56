use std::collections::BTreeSet;

use crate::dataset::{Mode, QuestionRecord, ResponseRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Model,
    Mode,
    Category,
}

impl Dimension {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "model" | "models" => Some(Self::Model),
            "mode" | "modes" => Some(Self::Mode),
            "category" | "categories" => Some(Self::Category),
            _ => None,
        }
    }
}

/// Sorted, deduplicated values of `dimension` across the dataset.
pub fn extract_distinct_values(dataset: &[QuestionRecord], dimension: Dimension) -> Vec<String> {
    let mut set = BTreeSet::new();
    for q in dataset {
        match dimension {
            Dimension::Category => {
                if let Some(c) = q.category.as_deref() {
                    set.insert(c.to_string());
                }
            }
            Dimension::Model => {
                set.extend(q.responses.iter().map(|r| r.model.clone()));
            }
            Dimension::Mode => {
                set.extend(q.responses.iter().map(|r| r.mode.as_str().to_string()));
            }
        }
    }
    set.into_iter().collect()
}

/// Models with at least one response under `mode`; the explorer's columns.
pub fn models_for_mode(dataset: &[QuestionRecord], mode: Mode) -> Vec<String> {
    dataset
        .iter()
        .flat_map(|q| q.responses.iter())
        .filter(|r| r.mode == mode)
        .map(|r| r.model.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One explorer cell: a model's trials under `mode`, ordered by trial.
pub fn trial_responses<'a>(
    record: &'a QuestionRecord,
    model: &str,
    mode: Mode,
) -> Vec<&'a ResponseRecord> {
    let mut out: Vec<&ResponseRecord> = record
        .responses
        .iter()
        .filter(|r| r.model == model && r.mode == mode)
        .collect();
    out.sort_by_key(|r| r.trial);
    out
}

pub fn find_response<'a>(
    record: &'a QuestionRecord,
    model: &str,
    mode: Mode,
    trial: u32,
) -> Option<&'a ResponseRecord> {
    record
        .responses
        .iter()
        .find(|r| r.model == model && r.mode == mode && r.trial == trial)
}

pub fn find_question<'a>(dataset: &'a [QuestionRecord], id: &str) -> Option<&'a QuestionRecord> {
    dataset.iter().find(|q| q.id == id)
}
