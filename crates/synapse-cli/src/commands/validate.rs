//! The `synapse validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use synapse_core::parser;

const PREVIEW_CHARS: usize = 60;

fn preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() > PREVIEW_CHARS || text.contains('\n') {
        let cut: String = first_line.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        first_line.to_string()
    }
}

pub fn execute(file: PathBuf) -> Result<()> {
    let questions = parser::parse_file(&file)?;

    println!(
        "Question bank: {} ({} questions)",
        file.display(),
        questions.len()
    );

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Answer"]);
    for q in &questions {
        table.add_row(vec![
            q.original_number.to_string(),
            preview(&q.text),
            q.correct_key.to_string(),
        ]);
    }
    println!("{table}");

    let warnings = parser::validate_questions(&questions);
    for w in &warnings {
        let prefix = w
            .question
            .map(|n| format!("  [Q{n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates() {
        assert_eq!(preview("short"), "short");
        assert_eq!(preview("first\nsecond"), "first...");
        let long = "x".repeat(80);
        assert_eq!(preview(&long), format!("{}...", "x".repeat(60)));
    }
}
