//! HTML report generator.
//!
//! Produces a self-contained HTML page with all CSS/JS inlined, coloured by
//! the user's theme.

use synapse_core::report::DetailedReport;
use synapse_prefs::Theme;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn theme_vars(theme: &Theme, font_size: u32) -> String {
    format!(
        ":root {{ --bg: {}; --text: {}; --frame: {}; --correct: {}; --wrong: {}; --neutral: {}; --btn: {}; --btnText: {}; --fs: {}px; }}\n",
        theme.background,
        theme.text,
        theme.frame,
        theme.correct,
        theme.wrong,
        theme.neutral,
        theme.button,
        theme.button_text,
        font_size
    )
}

/// Generate an HTML report page.
pub fn generate_html(report: &DetailedReport, theme: &Theme, font_size: u32) -> String {
    let summary = &report.summary;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<meta name=\"theme-color\" content=\"{}\">\n",
        theme.background
    ));
    html.push_str(&format!(
        "<title>Quiz report — {}/{}</title>\n",
        summary.score, summary.total
    ));
    html.push_str("<style>\n");
    html.push_str(&theme_vars(theme, font_size));
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Quiz finished!</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | {} order</p>\n",
        summary.total,
        if report.random_order {
            "random"
        } else {
            "original"
        }
    ));
    html.push_str("</header>\n");

    // Summary
    html.push_str("<section class=\"card\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str(&format!(
        "<p class=\"score\">Score: <strong>{}/{}</strong> ({}%)</p>\n",
        summary.score,
        summary.total,
        summary.percentage_display()
    ));
    let wrong = if summary.first_attempt_wrong.is_empty() {
        "None".to_string()
    } else {
        summary
            .first_attempt_wrong
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    html.push_str(&format!(
        "<p>Questions wrong on first attempt: {}</p>\n",
        html_escape(&wrong)
    ));
    html.push_str(&generate_score_bar(report));
    html.push_str("</section>\n");

    // Per-question results
    html.push_str("<section class=\"card\">\n");
    html.push_str("<h2>Detailed analysis</h2>\n");
    html.push_str("<table id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Question</th>");
    if report.random_order {
        html.push_str("<th>Text</th>");
    }
    html.push_str("<th onclick=\"sortTable(");
    html.push_str(if report.random_order { "2" } else { "1" });
    html.push_str(")\">Status</th><th>Answer path</th><th>Correct</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for entry in &report.entries {
        let class = if entry.first_try_correct {
            "correct"
        } else if entry.answer_path.is_empty() {
            "unanswered"
        } else {
            "wrong"
        };
        html.push_str(&format!(
            "<tr class=\"{class}\"><td>{}</td>",
            entry.original_number
        ));
        if let Some(text) = &entry.question_text {
            html.push_str(&format!("<td>{}</td>", html_escape(text)));
        }
        html.push_str(&format!(
            "<td>{}</td><td>{}</td><td>{}</td></tr>\n",
            entry.status(),
            html_escape(&entry.answer_path_display()),
            entry.correct_key
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Plain text version for copying
    html.push_str("<section class=\"card\">\n");
    html.push_str("<details>\n<summary>Plain text report</summary>\n");
    html.push_str("<pre>");
    html.push_str(&html_escape(&report.to_string()));
    html.push_str("</pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Stacked bar of first-try correct, wrong and unanswered questions.
fn generate_score_bar(report: &DetailedReport) -> String {
    let width = 400usize;
    let height = 24usize;
    let total = report.entries.len().max(1);

    let correct = report
        .entries
        .iter()
        .filter(|e| e.first_try_correct)
        .count();
    let unanswered = report
        .entries
        .iter()
        .filter(|e| e.answer_path.is_empty())
        .count();
    let wrong = report.entries.len() - correct - unanswered;

    let mut svg = format!(
        "<svg width=\"{width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );
    let mut x = 0usize;
    for (count, colour) in [
        (correct, "var(--correct)"),
        (wrong, "var(--wrong)"),
        (unanswered, "var(--neutral)"),
    ] {
        let w = count * width / total;
        if w > 0 {
            svg.push_str(&format!(
                "  <rect x=\"{x}\" y=\"0\" width=\"{w}\" height=\"{height}\" fill=\"{colour}\"/>\n"
            ));
        }
        x += w;
    }
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; font-size: var(--fs); margin: 0; padding: 2rem; background: var(--bg); color: var(--text); }
h1, h2 { margin-top: 1.5rem; }
.meta { color: var(--neutral); }
.card { background: var(--frame); border-radius: 8px; padding: 1rem 1.5rem; margin: 1rem 0; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--neutral); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--btn); color: var(--btnText); cursor: pointer; }
tr.correct td:first-child { border-left: 6px solid var(--correct); }
tr.wrong td:first-child { border-left: 6px solid var(--wrong); }
tr.unanswered td:first-child { border-left: 6px solid var(--neutral); }
pre { overflow-x: auto; white-space: pre-wrap; padding: 1rem; background: var(--bg); border-radius: 8px; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 0.5rem 0; border-radius: 4px; background: var(--bg); }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, { numeric: true }) : vb.localeCompare(va, undefined, { numeric: true });
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::finished_report;

    #[test]
    fn html_report_contains_required_elements() {
        let report = finished_report(false);
        let html = generate_html(&report, Theme::default_theme(), 18);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("--fs: 18px"));
        assert!(html.contains("--correct: #27ae60"));
        assert!(html.contains("Score: <strong>1/2</strong> (50.00%)"));
        assert!(html.contains("A -&gt; B"));
        assert!(html.contains("INCORRECT on first attempt"));
        assert!(!html.contains("<th>Text</th>"));
    }

    #[test]
    fn random_order_adds_question_text_column() {
        let report = finished_report(true);
        let forest = Theme::by_name("Forest").unwrap();
        let html = generate_html(&report, forest, 16);

        assert!(html.contains("<th>Text</th>"));
        assert!(html.contains("Is 1 &lt; 2?"));
        assert!(html.contains("--bg: #2d4a2e"));
    }

    #[test]
    fn score_bar_splits_by_outcome() {
        let report = finished_report(false);
        let svg = generate_score_bar(&report);
        assert!(svg.contains("width=\"200\" height=\"24\" fill=\"var(--correct)\""));
        assert!(svg.contains("fill=\"var(--wrong)\""));
        assert!(!svg.contains("var(--neutral)"));
    }
}
