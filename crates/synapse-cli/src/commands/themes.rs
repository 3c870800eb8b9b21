//! The `synapse themes` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use synapse_prefs::{load_preferences_from, THEMES};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let prefs = load_preferences_from(config_path.as_deref())?;
    let current = prefs.theme().name;

    let mut table = Table::new();
    table.set_header(vec!["", "Theme", "Background", "Text", "Correct", "Wrong"]);
    for theme in &THEMES {
        let marker = if theme.name == current { "*" } else { "" };
        table.add_row(vec![
            marker,
            theme.name,
            theme.background,
            theme.text,
            theme.correct,
            theme.wrong,
        ]);
    }
    println!("{table}");
    println!("Set a theme with: synapse prefs --theme \"<name>\"");

    Ok(())
}
