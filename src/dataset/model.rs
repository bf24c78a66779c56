use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    NoSearch,
    WithSearch,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::NoSearch, Mode::WithSearch];

    /// Accepts the data tags (`no_search`, `NO SEARCH`) and the UI tags
    /// (`no-search`) interchangeably.
    pub fn parse(value: &str) -> Option<Self> {
        let key: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "nosearch" => Some(Self::NoSearch),
            "withsearch" | "search" => Some(Self::WithSearch),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoSearch => "no_search",
            Self::WithSearch => "with_search",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NoSearch => "no search",
            Self::WithSearch => "with search",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Mode::parse(&raw).ok_or_else(|| de::Error::custom(format!("unknown mode '{raw}'")))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCorrectness {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawCorrectness {
    fn into_bool<E: de::Error>(self) -> Result<bool, E> {
        match self {
            RawCorrectness::Bool(b) => Ok(b),
            RawCorrectness::Int(n) => Ok(n != 0),
            RawCorrectness::Float(n) => Ok(n != 0.0),
            RawCorrectness::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" | "" => Ok(false),
                other => Err(E::custom(format!("invalid correctness value '{other}'"))),
            },
        }
    }
}

fn deserialize_reasoning<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponseRecord {
    pub model: String,
    pub mode: Mode,
    pub trial: u32,
    pub correct: bool,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<f64>,
}

/// On-disk shape. The verdict may arrive under any of three keys; null or
/// absent means incorrect.
#[derive(Deserialize)]
struct RawResponseRecord {
    model: String,
    mode: Mode,
    #[serde(default)]
    trial: u32,
    #[serde(default)]
    correct: Option<RawCorrectness>,
    #[serde(default)]
    is_correct: Option<RawCorrectness>,
    #[serde(default)]
    score: Option<RawCorrectness>,
    #[serde(alias = "answer", default)]
    response: Option<String>,
    #[serde(default, deserialize_with = "deserialize_reasoning")]
    reasoning: Option<String>,
    #[serde(default)]
    latency: Option<f64>,
}

impl<'de> Deserialize<'de> for ResponseRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawResponseRecord::deserialize(deserializer)?;
        let correct = match raw.correct.or(raw.is_correct).or(raw.score) {
            Some(verdict) => verdict.into_bool::<D::Error>()?,
            None => false,
        };
        Ok(ResponseRecord {
            model: raw.model,
            mode: raw.mode,
            trial: raw.trial,
            correct,
            response: raw.response.unwrap_or_default(),
            reasoning: raw.reasoning,
            latency: raw.latency,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuestionRecord {
    pub id: String,
    pub question: String,
    pub expected_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub difficulty: u8,
    pub accuracy: f64,
    pub responses: Vec<ResponseRecord>,
}

/// On-disk shape. `accuracy` and `difficulty` are derived when absent.
#[derive(Deserialize)]
struct RawQuestionRecord {
    #[serde(alias = "question_id")]
    id: String,
    #[serde(default)]
    question: String,
    #[serde(default)]
    expected_answer: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    difficulty: Option<i64>,
    #[serde(default)]
    accuracy: Option<f64>,
    #[serde(default)]
    responses: Vec<ResponseRecord>,
}

impl<'de> Deserialize<'de> for QuestionRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawQuestionRecord::deserialize(deserializer)?;
        let accuracy = raw
            .accuracy
            .filter(|a| a.is_finite())
            .unwrap_or_else(|| question_accuracy(&raw.responses));
        let difficulty = match raw.difficulty {
            Some(d) => d.clamp(1, 5) as u8,
            None => difficulty_for_accuracy(accuracy),
        };
        Ok(QuestionRecord {
            id: raw.id,
            question: raw.question,
            expected_answer: raw.expected_answer,
            category: raw.category.filter(|c| !c.trim().is_empty()),
            difficulty,
            accuracy,
            responses: raw.responses,
        })
    }
}

/// Percentage of correct responses, 0 when there are none.
pub fn question_accuracy(responses: &[ResponseRecord]) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    let correct = responses.iter().filter(|r| r.correct).count();
    correct as f64 / responses.len() as f64 * 100.0
}

/// 1 (very easy) through 5 (very hard); lower accuracy is harder.
pub fn difficulty_for_accuracy(accuracy: f64) -> u8 {
    if accuracy < 20.0 {
        5
    } else if accuracy < 40.0 {
        4
    } else if accuracy < 60.0 {
        3
    } else if accuracy < 80.0 {
        2
    } else {
        1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeMetrics {
    #[serde(default, deserialize_with = "deserialize_metric")]
    pub accuracy: f64,
    #[serde(default, alias = "pass@1", deserialize_with = "deserialize_metric")]
    pub pass1: f64,
    #[serde(default, alias = "pass@3", deserialize_with = "deserialize_metric")]
    pub pass3: f64,
}

// null and non-finite values read as 0.
fn deserialize_metric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.filter(|v| v.is_finite()).unwrap_or(0.0))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSummaryRecord {
    pub model: String,
    #[serde(default, deserialize_with = "deserialize_metrics")]
    pub no_search: Option<ModeMetrics>,
    #[serde(default, deserialize_with = "deserialize_metrics")]
    pub with_search: Option<ModeMetrics>,
}

// The conversion script writes `{}` for a mode with no runs.
fn deserialize_metrics<'de, D>(deserializer: D) -> Result<Option<ModeMetrics>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(map) if map.is_empty() => Ok(None),
        Some(map) => serde_json::from_value(serde_json::Value::Object(map))
            .map(Some)
            .map_err(de::Error::custom),
    }
}

impl ModelSummaryRecord {
    pub fn metrics(&self, mode: Mode) -> ModeMetrics {
        let block = match mode {
            Mode::NoSearch => self.no_search,
            Mode::WithSearch => self.with_search,
        };
        block.unwrap_or_default()
    }
}
