use super::{DetailView, ExplorerView, LeaderboardView};
use crate::dataset::Mode;

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page(title: &str, body: &str) -> Vec<u8> {
    format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>{title}</title>
  <style>
    body {{ font-family: Inter, -apple-system, 'Segoe UI', sans-serif; background: #f8fafc; color: #0f172a; margin: 0; }}
    main {{ max-width: 1200px; margin: 0 auto; padding: 2rem; }}
    table {{ width: 100%; border-collapse: collapse; background: #fff; }}
    th, td {{ padding: .6rem 1rem; border-bottom: 1px solid #e2e8f0; text-align: left; vertical-align: top; }}
    th.active {{ color: #135bec; }}
    .rank.gold {{ color: #b7791f; }} .rank.silver {{ color: #718096; }} .rank.bronze {{ color: #9c4221; }}
    .metric.high {{ color: #15803d; }} .metric.medium {{ color: #b45309; }} .metric.low {{ color: #b91c1c; }}
    .chart-bar {{ display: flex; align-items: center; gap: 1rem; margin: .3rem 0; }}
    .chart-label {{ width: 14rem; }}
    .chart-bar-container {{ flex: 1; background: #e2e8f0; border-radius: .375rem; }}
    .chart-bar-fill {{ background: #135bec; color: #fff; border-radius: .375rem; padding: .2rem .5rem; white-space: nowrap; }}
    .insight-card {{ background: #fff; border: 1px solid #e2e8f0; border-radius: .75rem; padding: 1rem; margin: .5rem 0; }}
    .trial-box {{ display: inline-block; width: 1rem; height: 1rem; margin-right: .2rem; border-radius: .2rem; }}
    .correct {{ background: #16a34a; }} .incorrect {{ background: #dc2626; }}
    .modal-result.correct, .modal-result.incorrect {{ color: #fff; padding: 0 .4rem; border-radius: .2rem; }}
    .question-id {{ font-weight: 700; margin-right: .5rem; }}
    .empty, .error {{ padding: 1.5rem; border-radius: .75rem; background: #fff; border: 1px solid #e2e8f0; }}
    .error {{ border-color: #dc2626; color: #b91c1c; }}
    pre {{ white-space: pre-wrap; }}
  </style>
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"####,
        title = escape_html(title),
        body = body
    )
    .into_bytes()
}

fn error_block(err: &str) -> String {
    format!(
        "<div class=\"error\">Failed to load data: {}</div>\n",
        escape_html(err)
    )
}

fn mode_heading(mode: Mode) -> &'static str {
    match mode {
        Mode::NoSearch => "No Search",
        Mode::WithSearch => "With Search",
    }
}

pub fn render_leaderboard(view: &LeaderboardView, chart: bool) -> Vec<u8> {
    let mut body = format!("<h1>Leaderboard <small>{}</small></h1>\n", mode_heading(view.mode));

    if let Some(err) = view.error.as_deref() {
        body.push_str(&error_block(err));
        return page("Leaderboard", &body);
    }
    if view.rows.is_empty() {
        body.push_str("<div class=\"empty\">No models to show.</div>\n");
        return page("Leaderboard", &body);
    }

    let arrow = if view.sort.ascending { "▲" } else { "▼" };
    let header = |label: &str, key: &str| {
        if view.sort.key.as_str() == key {
            format!("<th class=\"sortable active\" data-sort=\"{key}\">{label} <span class=\"sort-icon\">{arrow}</span></th>")
        } else {
            format!("<th class=\"sortable\" data-sort=\"{key}\">{label} <span class=\"sort-icon\"></span></th>")
        }
    };
    body.push_str("<table>\n<thead><tr><th>Rank</th>");
    body.push_str(&header("Model", "model"));
    body.push_str(&header("Accuracy", "accuracy"));
    body.push_str(&header("Pass@1", "pass1"));
    body.push_str(&header("Pass@3", "pass3"));
    body.push_str("</tr></thead>\n<tbody>\n");
    for r in &view.rows {
        let rank_class = match r.rank {
            1 => "gold",
            2 => "silver",
            3 => "bronze",
            _ => "",
        };
        body.push_str(&format!(
            "<tr><td><span class=\"rank {rank_class}\">{}</span></td><td><span class=\"model-name\">{}</span></td>\
<td><span class=\"metric {}\">{:.2}%</span></td><td><span class=\"metric {}\">{:.2}%</span></td><td><span class=\"metric {}\">{:.2}%</span></td></tr>\n",
            escape_html(&r.rank_label),
            escape_html(&r.model),
            r.accuracy_band.as_str(),
            r.accuracy,
            r.pass1_band.as_str(),
            r.pass1,
            r.pass3_band.as_str(),
            r.pass3,
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    if chart {
        body.push_str("<h2>Accuracy</h2>\n<div id=\"performance-chart\">\n");
        for r in &view.rows {
            body.push_str(&format!(
                "<div class=\"chart-bar\"><div class=\"chart-label\">{}</div><div class=\"chart-bar-container\">\
<div class=\"chart-bar-fill\" style=\"width: {:.1}%\"><span class=\"chart-value\">{:.1}%</span></div></div></div>\n",
                escape_html(&r.model),
                r.accuracy.clamp(0.0, 100.0),
                r.accuracy
            ));
        }
        body.push_str("</div>\n");
    }

    if let Some(insights) = view.insights.as_ref() {
        body.push_str("<h2>Insights</h2>\n");
        if let Some(top) = insights.top.as_ref() {
            let suffix = if insights.mode == Mode::WithSearch {
                " (with search)"
            } else {
                ""
            };
            body.push_str(&format!(
                "<div class=\"insight-card\"><h4>🏆 Top Performer</h4><p><strong>{}</strong> leads with {:.2}% accuracy{}.</p></div>\n",
                escape_html(&top.model),
                top.accuracy,
                suffix
            ));
        }
        if let Some(avg) = insights.average_accuracy {
            let context = match insights.mode {
                Mode::NoSearch => "without search capabilities",
                Mode::WithSearch => "with search enabled",
            };
            body.push_str(&format!(
                "<div class=\"insight-card\"><h4>📊 Average Performance</h4><p>Models achieve an average accuracy of {avg:.2}% {context}.</p></div>\n"
            ));
        }
        if let Some(delta) = insights.search_improvement {
            body.push_str(&format!(
                "<div class=\"insight-card\"><h4>📈 Search Impact</h4><p>Search capabilities change performance by an average of {delta:+.2} percentage points.</p></div>\n"
            ));
        }
    }

    page("Leaderboard", &body)
}

pub fn render_explorer(view: &ExplorerView) -> Vec<u8> {
    let mut body = format!(
        "<h1>Question Explorer <small>{}</small></h1>\n",
        mode_heading(view.mode)
    );

    if let Some(err) = view.error.as_deref() {
        body.push_str(&error_block(err));
        return page("Question Explorer", &body);
    }
    if view.page.total == 0 {
        body.push_str("<div class=\"empty\">No questions match the current filters.</div>\n");
        return page("Question Explorer", &body);
    }

    body.push_str("<table id=\"results-table\">\n<thead><tr><th>Question</th>");
    for model in &view.models {
        body.push_str(&format!("<th>{}</th>", escape_html(model)));
    }
    body.push_str("</tr></thead>\n<tbody>\n");
    for row in &view.page.items {
        body.push_str(&format!(
            "<tr><td><span class=\"question-id\">{}</span><span class=\"question-text-cell\">{}</span></td>",
            escape_html(&row.id),
            escape_html(&row.question)
        ));
        for cell in &row.cells {
            body.push_str("<td><div class=\"trials-container\">");
            for t in &cell.trials {
                let class = if t.correct { "correct" } else { "incorrect" };
                body.push_str(&format!(
                    "<div class=\"trial-box {class}\" title=\"Trial {}\"></div>",
                    t.trial
                ));
            }
            body.push_str("</div></td>");
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");
    body.push_str(&format!(
        "<p id=\"results-total\">{} TOTAL RESULTS</p><p id=\"results-range\">Showing {}-{} (page {} of {})</p>\n",
        view.page.total,
        view.page.start,
        view.page.end,
        view.page.page + 1,
        view.page.total_pages
    ));

    page("Question Explorer", &body)
}

pub fn render_detail(view: &DetailView) -> Vec<u8> {
    let mut body = format!(
        "<div class=\"modal-question\"><h1><span class=\"question-id\">{}</span>{}</h1></div>\n",
        escape_html(&view.id),
        escape_html(&view.question)
    );
    body.push_str(&format!(
        "<div class=\"modal-section\"><div class=\"modal-section-title\">Expected Answer</div><div class=\"modal-expected\">{}</div></div>\n",
        escape_html(&view.expected_answer)
    ));
    if view.responses.is_empty() {
        body.push_str("<div class=\"empty\">No responses match the current filters.</div>\n");
    }
    for r in &view.responses {
        let (class, label) = if r.correct {
            ("correct", "✅ Correct")
        } else {
            ("incorrect", "❌ Incorrect")
        };
        body.push_str(&format!(
            "<section class=\"modal-body\">\n<div class=\"modal-model\">{} <span class=\"modal-result {class}\">{label}</span></div>\n\
<div class=\"modal-meta\">{} • Trial {} • {}</div>\n\
<div class=\"modal-section\"><div class=\"modal-section-title\">Model's Response</div><pre class=\"modal-response {class}-text\">{}</pre></div>\n",
            escape_html(&r.model),
            r.mode,
            r.trial,
            escape_html(&view.id),
            escape_html(&r.response)
        ));
        if let Some(reasoning) = r.reasoning.as_deref() {
            body.push_str(&format!(
                "<div class=\"modal-section\"><div class=\"modal-section-title\">Judge Reasoning</div><pre class=\"modal-reasoning\">{}</pre></div>\n",
                escape_html(reasoning)
            ));
        }
        body.push_str("</section>\n");
    }
    page(&view.id, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_covers_markup() {
        assert_eq!(
            escape_html(r#"<b a="1">'x' & y</b>"#),
            "&lt;b a=&quot;1&quot;&gt;&#39;x&#39; &amp; y&lt;/b&gt;"
        );
    }
}
