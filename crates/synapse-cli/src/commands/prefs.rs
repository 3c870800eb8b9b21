//! The `synapse prefs` command.

use std::path::PathBuf;

use anyhow::Result;

use synapse_prefs::PreferenceStore;

pub fn execute(
    theme: Option<String>,
    font_size: Option<u32>,
    random_order: Option<bool>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut store = PreferenceStore::open(config_path.as_deref())?;

    if let Some(name) = theme {
        store.set_theme(&name)?;
        println!("Theme set to {name}");
    }
    if let Some(size) = font_size {
        let stored = store.set_font_size(size)?;
        if stored != size {
            println!("Font size {size} is out of range, stored {stored}");
        } else {
            println!("Font size set to {stored}");
        }
    }
    if let Some(random) = random_order {
        store.set_random_order(random)?;
        println!("Random order {}", if random { "enabled" } else { "disabled" });
    }

    let prefs = store.preferences();
    println!("Preferences: {}", store.path().display());
    println!("  theme:     {}", prefs.theme_name);
    println!("  font size: {}", prefs.font_size);
    println!(
        "  order:     {}",
        if prefs.random_order { "random" } else { "original" }
    );

    Ok(())
}
