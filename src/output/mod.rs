pub mod report;
pub mod text;

use serde::Serialize;

use crate::dataset::{LoadState, Mode, ModelSummaryRecord, QuestionRecord, ResponseRecord};
use crate::engine::{self, FilterState, Insights, MetricBand, Page};
use crate::state::{SortState, ViewState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

pub fn rank_label(index: usize) -> String {
    match index {
        0 => "🥇".to_string(),
        1 => "🥈".to_string(),
        2 => "🥉".to_string(),
        n => format!("#{}", n + 1),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub rank_label: String,
    pub model: String,
    pub accuracy: f64,
    pub pass1: f64,
    pub pass3: f64,
    pub accuracy_band: MetricBand,
    pub pass1_band: MetricBand,
    pub pass3_band: MetricBand,
}

#[derive(Clone, Debug, Serialize)]
pub struct LeaderboardView {
    pub mode: Mode,
    pub sort: SortState,
    pub rows: Vec<RankedRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn build_leaderboard(
    summaries: &LoadState<ModelSummaryRecord>,
    state: &ViewState,
    with_insights: bool,
) -> LeaderboardView {
    let records = summaries.records();
    let rows = engine::sort_models(
        engine::project_mode(records, state.mode),
        state.sort.key,
        state.sort.ascending,
    );
    let insights =
        with_insights.then(|| engine::compute_insights(records, &rows, state.mode));
    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(i, r)| RankedRow {
            rank: i + 1,
            rank_label: rank_label(i),
            accuracy_band: MetricBand::for_value(r.accuracy),
            pass1_band: MetricBand::for_value(r.pass1),
            pass3_band: MetricBand::for_value(r.pass3),
            model: r.model,
            accuracy: r.accuracy,
            pass1: r.pass1,
            pass3: r.pass3,
        })
        .collect();
    LeaderboardView {
        mode: state.mode,
        sort: state.sort,
        rows,
        insights,
        error: summaries.error().map(|e| e.to_string()),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TrialMark {
    pub trial: u32,
    pub correct: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct TrialCell {
    pub model: String,
    pub trials: Vec<TrialMark>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExplorerRow {
    pub id: String,
    pub question: String,
    pub difficulty: u8,
    pub accuracy: f64,
    pub cells: Vec<TrialCell>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExplorerView {
    pub mode: Mode,
    pub filters: FilterState,
    pub models: Vec<String>,
    pub page: Page<ExplorerRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The explorer always shows one mode, so the page mode doubles as the mode predicate.
pub fn explorer_filter(state: &ViewState) -> FilterState {
    FilterState {
        mode: Some(state.mode),
        ..state.filters.clone()
    }
}

pub fn build_explorer(questions: &LoadState<QuestionRecord>, state: &ViewState) -> ExplorerView {
    let records = questions.records();
    let filter = explorer_filter(state);

    let mut models = engine::models_for_mode(records, state.mode);
    if let Some(model) = filter.model.as_deref() {
        models.retain(|m| m == model);
    }

    let rows: Vec<ExplorerRow> = engine::apply_filters(records, &filter)
        .into_iter()
        .map(|q| {
            let shown = engine::apply_response_filters(q, &filter);
            let cells = models
                .iter()
                .map(|model| {
                    let mut trials: Vec<TrialMark> = shown
                        .iter()
                        .filter(|r| &r.model == model)
                        .map(|r| TrialMark {
                            trial: r.trial,
                            correct: r.correct,
                        })
                        .collect();
                    trials.sort_by_key(|t| t.trial);
                    TrialCell {
                        model: model.clone(),
                        trials,
                    }
                })
                .collect();
            ExplorerRow {
                id: q.id.clone(),
                question: q.question.clone(),
                difficulty: q.difficulty,
                accuracy: q.accuracy,
                cells,
            }
        })
        .collect();

    ExplorerView {
        mode: state.mode,
        filters: filter,
        models,
        page: engine::paginate(&rows, state.page, state.page_size),
        error: questions.error().map(|e| e.to_string()),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DetailView {
    pub id: String,
    pub question: String,
    pub expected_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub difficulty: u8,
    pub accuracy: f64,
    pub responses: Vec<ResponseRecord>,
}

/// `None` when no question has `id`. With `trial` set only that trial is kept.
pub fn build_detail(
    questions: &[QuestionRecord],
    id: &str,
    filter: &FilterState,
    trial: Option<u32>,
) -> Option<DetailView> {
    let q = engine::find_question(questions, id)?;
    let responses = engine::apply_response_filters(q, filter)
        .into_iter()
        .filter(|r| trial.map_or(true, |t| r.trial == t))
        .cloned()
        .collect();
    Some(DetailView {
        id: q.id.clone(),
        question: q.question.clone(),
        expected_answer: q.expected_answer.clone(),
        category: q.category.clone(),
        difficulty: q.difficulty,
        accuracy: q.accuracy,
        responses,
    })
}

pub fn render_json<T: Serialize>(view: &T) -> Result<Vec<u8>, String> {
    let mut out =
        serde_json::to_vec_pretty(view).map_err(|e| format!("failed to serialize JSON: {e}"))?;
    out.push(b'\n');
    Ok(out)
}
