use serde::Serialize;

use crate::dataset::{Mode, QuestionRecord, ResponseRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "correct" | "pass" | "true" => Some(Self::Correct),
            "incorrect" | "fail" | "false" => Some(Self::Incorrect),
            _ => None,
        }
    }

    pub fn matches(self, correct: bool) -> bool {
        match self {
            Self::Correct => correct,
            Self::Incorrect => !correct,
        }
    }
}

/// Each field is an equality predicate; `None` leaves that dimension unconstrained.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub mode: Option<Mode>,
    pub model: Option<String>,
    pub difficulty: Option<u8>,
    pub result: Option<Outcome>,
}

impl FilterState {
    pub fn is_unconstrained(&self) -> bool {
        !self.constrains_responses() && self.difficulty.is_none()
    }

    pub fn constrains_responses(&self) -> bool {
        self.mode.is_some() || self.model.is_some() || self.result.is_some()
    }

    pub fn matches_response(&self, response: &ResponseRecord) -> bool {
        if let Some(mode) = self.mode {
            if response.mode != mode {
                return false;
            }
        }
        if let Some(model) = self.model.as_deref() {
            if response.model != model {
                return false;
            }
        }
        if let Some(result) = self.result {
            if !result.matches(response.correct) {
                return false;
            }
        }
        true
    }

    pub fn matches_question(&self, question: &QuestionRecord) -> bool {
        if let Some(difficulty) = self.difficulty {
            if question.difficulty != difficulty {
                return false;
            }
        }
        if !self.constrains_responses() {
            return true;
        }
        question.responses.iter().any(|r| self.matches_response(r))
    }
}

/// Records with at least one response satisfying every active response
/// predicate, and matching the difficulty predicate. Input order is kept.
pub fn apply_filters<'a>(
    dataset: &'a [QuestionRecord],
    filter: &FilterState,
) -> Vec<&'a QuestionRecord> {
    dataset
        .iter()
        .filter(|q| filter.matches_question(q))
        .collect()
}

/// The responses of an already-selected record that pass mode/model/result.
pub fn apply_response_filters<'a>(
    record: &'a QuestionRecord,
    filter: &FilterState,
) -> Vec<&'a ResponseRecord> {
    record
        .responses
        .iter()
        .filter(|r| filter.matches_response(r))
        .collect()
}
