//! The `synapse init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("synapse.toml").exists() {
        println!("synapse.toml already exists, skipping.");
    } else {
        std::fs::write("synapse.toml", SAMPLE_PREFS)?;
        println!("Created synapse.toml");
    }

    let demo_path = std::path::Path::new("demo-quiz.txt");
    if demo_path.exists() {
        println!("demo-quiz.txt already exists, skipping.");
    } else {
        std::fs::write(demo_path, DEMO_QUIZ)?;
        println!("Created demo-quiz.txt");
    }

    println!("\nNext steps:");
    println!("  1. Run: synapse validate --file demo-quiz.txt");
    println!("  2. Run: synapse take --file demo-quiz.txt");
    println!("  3. Write your own bank: blank line between questions, five options A-E, one 'Answer:' line");

    Ok(())
}

const SAMPLE_PREFS: &str = r#"# synapse preferences

# One of: Default Dark, UCAT Light, Classic Blue, High Contrast, Forest, Crimson Night
theme_name = "Default Dark"

# Font size for exported HTML reports (10-30)
font_size = 16

# Shuffle questions when a quiz starts
random_order = false
"#;

const DEMO_QUIZ: &str = "\
Which structure separates the false pelvis from the true pelvis?
A) Anterior superior iliac spine
B) Iliac crest
C) Iliac fossa
D) Pelvic brim
E) Pubic tubercle
Answer: D

In anatomical position, the anterior superior iliac spine aligns with which bony prominence?
A) Iliac crest
B) Ischial spine
C) Ischial tuberosity
D) Pubic ramus
E) Pubic tubercle
Answer: E
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_quiz_parses() {
        let questions = synapse_core::parser::parse(DEMO_QUIZ).unwrap();
        assert_eq!(questions.len(), 2);
        assert!(synapse_core::parser::validate_questions(&questions).is_empty());
    }

    #[test]
    fn sample_prefs_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synapse.toml");
        std::fs::write(&path, SAMPLE_PREFS).unwrap();
        let store = synapse_prefs::PreferenceStore::open(Some(path.as_path())).unwrap();
        assert_eq!(store.preferences().font_size, 16);
        assert_eq!(store.preferences().theme_name, "Default Dark");
    }
}
