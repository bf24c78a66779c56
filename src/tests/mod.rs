use std::collections::HashSet;

use crate::dataset::{LoadError, LoadState, Mode, ModelSummaryRecord, QuestionRecord};
use crate::engine::{self, Dimension, FilterState, Outcome, SortKey};
use crate::state::ViewState;

fn questions(json: &str) -> Vec<QuestionRecord> {
    serde_json::from_str(json).unwrap()
}

fn summaries(json: &str) -> Vec<ModelSummaryRecord> {
    serde_json::from_str(json).unwrap()
}

/// Q1: A/no_search correct, B/with_search incorrect. Q2: A/no_search incorrect.
fn two_questions() -> Vec<QuestionRecord> {
    questions(
        r#"[
            {"id": "Q1", "question": "first?", "expected_answer": "1", "difficulty": 2, "accuracy": 50,
             "responses": [
                {"model": "A", "mode": "no_search", "trial": 1, "correct": true, "response": "1"},
                {"model": "B", "mode": "with-search", "trial": 1, "correct": "False", "response": "2",
                 "reasoning": "wrong number"}
             ]},
            {"id": "Q2", "question": "second?", "expected_answer": "2", "difficulty": 5, "accuracy": 0,
             "responses": [
                {"model": "A", "mode": "NO SEARCH", "trial": 1, "correct": "False", "response": "3"}
             ]}
        ]"#,
    )
}

fn ids(records: &[&QuestionRecord]) -> Vec<String> {
    records.iter().map(|q| q.id.clone()).collect()
}

fn many_questions() -> Vec<QuestionRecord> {
    let mut out = Vec::new();
    for i in 0..12u32 {
        let mode = if i % 3 == 0 { "with_search" } else { "no_search" };
        let model = if i % 2 == 0 { "A" } else { "B" };
        out.push(format!(
            r#"{{"id": "q{i:02}", "question": "q", "expected_answer": "a", "difficulty": {d},
                "responses": [
                    {{"model": "{model}", "mode": "{mode}", "trial": 1, "correct": {c}}},
                    {{"model": "C", "mode": "no_search", "trial": 1, "correct": {nc}}}
                ]}}"#,
            d = i % 5 + 1,
            c = i % 4 == 0,
            nc = i % 4 != 0,
        ));
    }
    questions(&format!("[{}]", out.join(",")))
}

fn filter_grid() -> Vec<FilterState> {
    let mut out = Vec::new();
    for mode in [None, Some(Mode::NoSearch), Some(Mode::WithSearch)] {
        for model in [None, Some("A".to_string()), Some("C".to_string())] {
            for difficulty in [None, Some(1), Some(3)] {
                for result in [None, Some(Outcome::Correct), Some(Outcome::Incorrect)] {
                    out.push(FilterState {
                        mode,
                        model: model.clone(),
                        difficulty,
                        result,
                    });
                }
            }
        }
    }
    out
}

#[test]
fn mode_filter_keeps_both_questions() {
    let data = two_questions();
    let filter = FilterState {
        mode: Some(Mode::NoSearch),
        ..FilterState::default()
    };
    assert_eq!(ids(&engine::apply_filters(&data, &filter)), ["Q1", "Q2"]);
}

#[test]
fn mode_and_result_filter_keeps_only_q1() {
    let data = two_questions();
    let filter = FilterState {
        mode: Some(Mode::NoSearch),
        result: Some(Outcome::Correct),
        ..FilterState::default()
    };
    assert_eq!(ids(&engine::apply_filters(&data, &filter)), ["Q1"]);
}

#[test]
fn predicates_must_hold_on_the_same_response() {
    // Q1 has a no_search response and an incorrect response, but not both at once.
    let data = two_questions();
    let filter = FilterState {
        mode: Some(Mode::NoSearch),
        result: Some(Outcome::Incorrect),
        ..FilterState::default()
    };
    assert_eq!(ids(&engine::apply_filters(&data, &filter)), ["Q2"]);
}

#[test]
fn difficulty_applies_to_the_record() {
    let data = two_questions();
    let filter = FilterState {
        difficulty: Some(5),
        ..FilterState::default()
    };
    assert_eq!(ids(&engine::apply_filters(&data, &filter)), ["Q2"]);
}

#[test]
fn unconstrained_filter_is_passthrough() {
    let data = many_questions();
    let out = engine::apply_filters(&data, &FilterState::default());
    assert_eq!(out.len(), data.len());
    for (a, b) in out.iter().zip(data.iter()) {
        assert!(std::ptr::eq(*a, b));
    }
}

#[test]
fn filtered_output_is_a_subsequence() {
    let data = many_questions();
    for filter in filter_grid() {
        let out = engine::apply_filters(&data, &filter);
        let mut positions = out
            .iter()
            .map(|q| data.iter().position(|d| std::ptr::eq(d, *q)).unwrap());
        let mut last: Option<usize> = None;
        for p in positions.by_ref() {
            assert!(last.map_or(true, |l| p > l), "{filter:?}");
            last = Some(p);
        }
        let unique: HashSet<_> = out.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(unique.len(), out.len());
    }
}

#[test]
fn filtering_is_idempotent() {
    let data = many_questions();
    for filter in filter_grid() {
        let first = ids(&engine::apply_filters(&data, &filter));
        let second = ids(&engine::apply_filters(&data, &filter));
        assert_eq!(first, second);
    }
}

#[test]
fn record_and_response_levels_agree() {
    let data = many_questions();
    for filter in filter_grid() {
        if !filter.constrains_responses() {
            continue;
        }
        let passed = ids(&engine::apply_filters(&data, &filter));
        for q in &data {
            let shown = engine::apply_response_filters(q, &filter);
            let difficulty_ok = filter.difficulty.map_or(true, |d| q.difficulty == d);
            assert_eq!(
                passed.contains(&q.id),
                difficulty_ok && !shown.is_empty(),
                "{} {filter:?}",
                q.id
            );
        }
    }
}

#[test]
fn response_filters_ignore_difficulty() {
    let data = two_questions();
    let filter = FilterState {
        difficulty: Some(1),
        model: Some("B".to_string()),
        ..FilterState::default()
    };
    let shown = engine::apply_response_filters(&data[0], &filter);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].model, "B");
    assert_eq!(shown[0].reasoning.as_deref(), Some("wrong number"));
}

#[test]
fn empty_dataset_yields_empty_outputs() {
    let data: Vec<QuestionRecord> = Vec::new();
    for filter in filter_grid() {
        assert!(engine::apply_filters(&data, &filter).is_empty());
    }
    assert!(engine::extract_distinct_values(&data, Dimension::Model).is_empty());
    assert!(engine::models_for_mode(&data, Mode::NoSearch).is_empty());
}

#[test]
fn distinct_values_are_sorted_and_unique() {
    let data = many_questions();
    assert_eq!(
        engine::extract_distinct_values(&data, Dimension::Model),
        ["A", "B", "C"]
    );
    assert_eq!(
        engine::extract_distinct_values(&data, Dimension::Mode),
        ["no_search", "with_search"]
    );
    assert!(engine::extract_distinct_values(&data, Dimension::Category).is_empty());
}

#[test]
fn models_for_mode_limits_columns() {
    let data = two_questions();
    assert_eq!(engine::models_for_mode(&data, Mode::NoSearch), ["A"]);
    assert_eq!(engine::models_for_mode(&data, Mode::WithSearch), ["B"]);
}

#[test]
fn trial_responses_are_ordered_by_trial() {
    let data = questions(
        r#"[{"id": "q", "responses": [
            {"model": "A", "mode": "no_search", "trial": 3, "correct": true},
            {"model": "A", "mode": "no_search", "trial": 1, "correct": false},
            {"model": "A", "mode": "with_search", "trial": 2, "correct": true},
            {"model": "A", "mode": "no_search", "trial": 2, "correct": true}
        ]}]"#,
    );
    let trials: Vec<u32> = engine::trial_responses(&data[0], "A", Mode::NoSearch)
        .iter()
        .map(|r| r.trial)
        .collect();
    assert_eq!(trials, [1, 2, 3]);
    let found = engine::find_response(&data[0], "A", Mode::WithSearch, 2).unwrap();
    assert!(found.correct);
    assert!(engine::find_response(&data[0], "A", Mode::WithSearch, 3).is_none());
}

#[test]
fn missing_with_search_reads_as_zero() {
    let data = summaries(r#"[{"model": "X", "no_search": {"accuracy": 80}}]"#);
    let rows = engine::project_mode(&data, Mode::WithSearch);
    assert_eq!(rows[0].accuracy, 0.0);
    assert_eq!(rows[0].pass1, 0.0);
    let rows = engine::project_mode(&data, Mode::NoSearch);
    assert_eq!(rows[0].accuracy, 80.0);
}

#[test]
fn accuracy_descending_example() {
    let data = summaries(
        r#"[
            {"model": "a", "no_search": {"accuracy": 55.0}},
            {"model": "b", "no_search": {"accuracy": 90.0}},
            {"model": "c", "no_search": {"accuracy": 70.0}}
        ]"#,
    );
    let rows = engine::sort_models(
        engine::project_mode(&data, Mode::NoSearch),
        SortKey::Accuracy,
        false,
    );
    let acc: Vec<f64> = rows.iter().map(|r| r.accuracy).collect();
    assert_eq!(acc, [90.0, 70.0, 55.0]);
}

#[test]
fn sorting_is_monotonic_and_reversible_without_ties() {
    let data = summaries(
        r#"[
            {"model": "m1", "with_search": {"accuracy": 12.5, "pass1": 40, "pass3": 61}},
            {"model": "m2", "with_search": {"accuracy": 88.0, "pass1": 10, "pass3": 62}},
            {"model": "m3", "with_search": {"accuracy": 47.0, "pass1": 75, "pass3": 63}},
            {"model": "m4", "with_search": {"accuracy": 63.0, "pass1": 33, "pass3": 60}}
        ]"#,
    );
    for key in [SortKey::Accuracy, SortKey::Pass1, SortKey::Pass3, SortKey::Model] {
        let rows = engine::project_mode(&data, Mode::WithSearch);
        let asc = engine::sort_models(rows.clone(), key, true);
        let desc = engine::sort_models(rows, key, false);
        for pair in asc.windows(2) {
            assert!(pair[0].compare(&pair[1], key).is_le(), "{key:?}");
        }
        let mut reversed = desc.clone();
        reversed.reverse();
        assert_eq!(asc, reversed, "{key:?}");
    }
}

#[test]
fn leaderboard_view_ranks_and_bands() {
    let data = summaries(
        r#"[
            {"model": "low", "no_search": {"accuracy": 20, "pass1": 20, "pass3": 30},
             "with_search": {"accuracy": 40}},
            {"model": "high", "no_search": {"accuracy": 75, "pass1": 70, "pass3": 80},
             "with_search": {"accuracy": 85}},
            {"model": "mid", "no_search": {"accuracy": 55, "pass1": 50, "pass3": 60}}
        ]"#,
    );
    let state = LoadState::Loaded(data);
    let view = crate::output::build_leaderboard(&state, &ViewState::default(), true);
    let names: Vec<_> = view.rows.iter().map(|r| r.model.as_str()).collect();
    assert_eq!(names, ["high", "mid", "low"]);
    assert_eq!(view.rows[0].rank_label, "🥇");
    assert_eq!(view.rows[0].accuracy_band, engine::MetricBand::High);
    assert_eq!(view.rows[1].accuracy_band, engine::MetricBand::Medium);
    let insights = view.insights.unwrap();
    assert_eq!(insights.top.unwrap().model, "high");
    assert!((insights.average_accuracy.unwrap() - 50.0).abs() < 1e-9);
    assert_eq!(insights.search_improvement, None);

    let with_search = ViewState::default().with_mode(Mode::WithSearch);
    let view = crate::output::build_leaderboard(&state, &with_search, true);
    // (20 + 10 - 55) / 3
    let delta = view.insights.unwrap().search_improvement.unwrap();
    assert!((delta - (-25.0 / 3.0)).abs() < 1e-9);
}

#[test]
fn failed_load_renders_error_state() {
    let failed: LoadState<ModelSummaryRecord> = LoadState::Failed(LoadError::InvalidUrl {
        url: "nope".to_string(),
    });
    let view = crate::output::build_leaderboard(&failed, &ViewState::default(), true);
    assert!(view.rows.is_empty());
    assert!(view.error.as_deref().unwrap().contains("nope"));
    let text = String::from_utf8(crate::output::text::render_leaderboard(&view, true)).unwrap();
    assert!(text.contains("failed to load data"));
    let html = String::from_utf8(crate::output::report::render_leaderboard(&view, true)).unwrap();
    assert!(html.contains("Failed to load data"));
}

#[test]
fn explorer_groups_trials_per_model_and_paginates() {
    let data = many_questions();
    let state = ViewState::default()
        .with_mode(Mode::NoSearch)
        .with_page_size(3)
        .with_page(1);
    let view = crate::output::build_explorer(&LoadState::Loaded(data.clone()), &state);
    assert_eq!(view.models, ["A", "B", "C"]);
    let expected_total = engine::apply_filters(&data, &crate::output::explorer_filter(&state)).len();
    assert_eq!(view.page.total, expected_total);
    assert_eq!(view.page.items.len(), 3);
    assert_eq!(view.page.start, 4);
    for row in &view.page.items {
        assert_eq!(row.cells.len(), 3);
        assert!(row.cells.iter().any(|c| !c.trials.is_empty()));
    }
}

#[test]
fn explorer_model_filter_narrows_columns() {
    let data = two_questions();
    let state = ViewState::default().with_model_filter(Some("A".to_string()));
    let view = crate::output::build_explorer(&LoadState::Loaded(data), &state);
    assert_eq!(view.models, ["A"]);
    assert_eq!(view.page.total, 2);
    let text = String::from_utf8(crate::output::text::render_explorer(&view)).unwrap();
    assert!(text.contains("Q1") && text.contains("Q2"));
}

#[test]
fn explorer_empty_result_is_not_an_error() {
    let data = two_questions();
    let state = ViewState::default().with_model_filter(Some("Z".to_string()));
    let view = crate::output::build_explorer(&LoadState::Loaded(data), &state);
    assert!(view.error.is_none());
    assert_eq!(view.page.total, 0);
    let text = String::from_utf8(crate::output::text::render_explorer(&view)).unwrap();
    assert!(text.contains("No questions match"));
}

#[test]
fn detail_omits_missing_reasoning() {
    colored::control::set_override(false);
    let data = two_questions();
    let view = crate::output::build_detail(&data, "Q1", &FilterState::default(), None).unwrap();
    assert_eq!(view.responses.len(), 2);
    let text = String::from_utf8(crate::output::text::render_detail(&view)).unwrap();
    assert_eq!(text.matches("Judge Reasoning").count(), 1);
    assert!(text.contains("wrong number"));

    let only_a = FilterState {
        model: Some("A".to_string()),
        ..FilterState::default()
    };
    let view = crate::output::build_detail(&data, "Q1", &only_a, Some(1)).unwrap();
    let html = String::from_utf8(crate::output::report::render_detail(&view)).unwrap();
    assert!(!html.contains("Judge Reasoning"));
    assert!(crate::output::build_detail(&data, "Q9", &only_a, None).is_none());
}

#[test]
fn html_escapes_record_text() {
    let data = questions(
        r#"[{"id": "x<1>", "question": "<script>alert(1)</script>", "expected_answer": "&",
             "responses": [{"model": "A", "mode": "no_search", "trial": 1, "correct": true}]}]"#,
    );
    let view = crate::output::build_explorer(&LoadState::Loaded(data), &ViewState::default());
    let html = String::from_utf8(crate::output::report::render_explorer(&view)).unwrap();
    assert!(!html.contains("<script>alert"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn json_view_serializes_canonical_modes() {
    let data = two_questions();
    let view = crate::output::build_detail(&data, "Q2", &FilterState::default(), None).unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&crate::output::render_json(&view).unwrap()).unwrap();
    assert_eq!(json["responses"][0]["mode"], "no_search");
    assert_eq!(json["responses"][0]["correct"], false);
    assert!(json["responses"][0].get("reasoning").is_none());
}
