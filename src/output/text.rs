use colored::{ColoredString, Colorize};
use itertools::Itertools;

use super::{DetailView, ExplorerView, LeaderboardView, TrialCell};
use crate::dataset::Mode;
use crate::engine::{MetricBand, SortKey};

const CHART_WIDTH: usize = 40;

fn paint_metric(value: f64, band: MetricBand) -> ColoredString {
    let text = format!("{value:>7.2}%");
    match band {
        MetricBand::High => text.green(),
        MetricBand::Medium => text.yellow(),
        MetricBand::Low => text.red(),
    }
}

fn sort_marker(active: bool, ascending: bool) -> &'static str {
    match (active, ascending) {
        (false, _) => " ",
        (true, true) => "▲",
        (true, false) => "▼",
    }
}

fn verdict(correct: bool) -> ColoredString {
    if correct {
        "✅ Correct".green().bold()
    } else {
        "❌ Incorrect".red().bold()
    }
}

pub fn render_leaderboard(view: &LeaderboardView, chart: bool) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({})\n\n",
        "Leaderboard".bold(),
        view.mode.label()
    ));

    if let Some(err) = view.error.as_deref() {
        out.push_str(&format!("{} {}\n", "failed to load data:".red().bold(), err));
        return out.into_bytes();
    }
    if view.rows.is_empty() {
        out.push_str("No models to show.\n");
        return out.into_bytes();
    }

    let name_width = view
        .rows
        .iter()
        .map(|r| r.model.chars().count())
        .max()
        .unwrap_or(0)
        .max("Model".len());
    let key = view.sort.key;
    let asc = view.sort.ascending;
    out.push_str(&format!(
        "{:<6} {:<name_width$}{} {:>8}{} {:>8}{} {:>8}{}\n",
        "Rank",
        "Model",
        sort_marker(key == SortKey::Model, asc),
        "Accuracy",
        sort_marker(key == SortKey::Accuracy, asc),
        "Pass@1",
        sort_marker(key == SortKey::Pass1, asc),
        "Pass@3",
        sort_marker(key == SortKey::Pass3, asc),
    ));
    for r in &view.rows {
        // Medal glyphs render two columns wide.
        let rank_pad = if r.rank <= 3 { 4 } else { 6 };
        out.push_str(&format!(
            "{:<rank_pad$} {:<name_width$}  {}  {}  {}\n",
            r.rank_label,
            r.model.bold(),
            paint_metric(r.accuracy, r.accuracy_band),
            paint_metric(r.pass1, r.pass1_band),
            paint_metric(r.pass3, r.pass3_band),
        ));
    }

    if chart {
        out.push('\n');
        out.push_str(&format!("{}\n", "Accuracy".bold()));
        for r in &view.rows {
            let filled = ((r.accuracy.clamp(0.0, 100.0) / 100.0) * CHART_WIDTH as f64).round()
                as usize;
            out.push_str(&format!(
                "{:<name_width$} {}{} {:.1}%\n",
                r.model,
                "█".repeat(filled).cyan(),
                "░".repeat(CHART_WIDTH - filled),
                r.accuracy
            ));
        }
    }

    if let Some(insights) = view.insights.as_ref() {
        out.push('\n');
        if let Some(top) = insights.top.as_ref() {
            let suffix = if insights.mode == Mode::WithSearch {
                " (with search)"
            } else {
                ""
            };
            out.push_str(&format!(
                "🏆 Top Performer: {} leads with {:.2}% accuracy{}.\n",
                top.model.bold(),
                top.accuracy,
                suffix
            ));
        }
        if let Some(avg) = insights.average_accuracy {
            let context = match insights.mode {
                Mode::NoSearch => "without search capabilities",
                Mode::WithSearch => "with search enabled",
            };
            out.push_str(&format!(
                "📊 Average Performance: models achieve an average accuracy of {avg:.2}% {context}.\n"
            ));
        }
        if let Some(delta) = insights.search_improvement {
            out.push_str(&format!(
                "📈 Search Impact: search changes accuracy by an average of {delta:+.2} percentage points.\n"
            ));
        }
    }

    out.into_bytes()
}

fn trial_boxes(cell: &TrialCell) -> String {
    if cell.trials.is_empty() {
        return "-".to_string();
    }
    cell.trials
        .iter()
        .map(|t| {
            if t.correct {
                "■".green().to_string()
            } else {
                "■".red().to_string()
            }
        })
        .join("")
}

fn truncate(value: &str, max: usize) -> String {
    let mut chars = value.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

pub fn render_explorer(view: &ExplorerView) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({})\n\n",
        "Question Explorer".bold(),
        view.mode.label()
    ));

    if let Some(err) = view.error.as_deref() {
        out.push_str(&format!("{} {}\n", "failed to load data:".red().bold(), err));
        return out.into_bytes();
    }
    if view.page.total == 0 {
        out.push_str("No questions match the current filters.\n");
        return out.into_bytes();
    }

    for row in &view.page.items {
        out.push_str(&format!(
            "{} {} {}\n",
            row.id.bold(),
            "★".repeat(row.difficulty as usize).yellow(),
            truncate(&row.question, 100)
        ));
        for cell in &row.cells {
            out.push_str(&format!("    {:<28} {}\n", cell.model, trial_boxes(cell)));
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "{} total results, showing {}-{} (page {}/{})\n",
        view.page.total,
        view.page.start,
        view.page.end,
        view.page.page + 1,
        view.page.total_pages
    ));
    out.into_bytes()
}

pub fn render_detail(view: &DetailView) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", view.id.bold(), view.question));
    out.push_str(&format!(
        "{} {}\n",
        "Expected Answer:".bold(),
        view.expected_answer
    ));
    if view.responses.is_empty() {
        out.push_str("\nNo responses match the current filters.\n");
        return out.into_bytes();
    }
    for r in &view.responses {
        out.push('\n');
        out.push_str(&format!("{} {}\n", r.model.bold(), verdict(r.correct)));
        out.push_str(&format!(
            "{}\n",
            format!("{} • Trial {} • {}", r.mode, r.trial, view.id).dimmed()
        ));
        out.push_str(&format!("{}\n{}\n", "Model's Response:".bold(), r.response));
        if let Some(reasoning) = r.reasoning.as_deref() {
            out.push_str(&format!("{}\n{}\n", "Judge Reasoning:".bold(), reasoning));
        }
    }
    out.into_bytes()
}

pub fn render_values(values: &[String]) -> Vec<u8> {
    let mut out = values.iter().join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out.into_bytes()
}
