//! Built-in colour themes.

use serde::Serialize;

/// Colour roles used by every front end, as `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub frame: &'static str,
    pub correct: &'static str,
    pub wrong: &'static str,
    pub neutral: &'static str,
    pub button: &'static str,
    pub button_text: &'static str,
}

pub const DEFAULT_THEME: &str = "Default Dark";

pub const THEMES: [Theme; 6] = [
    Theme {
        name: "Default Dark",
        background: "#2c3e50",
        text: "#ecf0f1",
        frame: "#34495e",
        correct: "#27ae60",
        wrong: "#c0392b",
        neutral: "#7f8c8d",
        button: "#3498db",
        button_text: "#ffffff",
    },
    Theme {
        name: "UCAT Light",
        background: "#f0f0f0",
        text: "#000000",
        frame: "#ffffff",
        correct: "#27ae60",
        wrong: "#e74c3c",
        neutral: "#bdc3c7",
        button: "#3498db",
        button_text: "#ffffff",
    },
    Theme {
        name: "Classic Blue",
        background: "#aed6f1",
        text: "#17202a",
        frame: "#d6eaf8",
        correct: "#229954",
        wrong: "#cb4335",
        neutral: "#85929e",
        button: "#2980b9",
        button_text: "#ffffff",
    },
    Theme {
        name: "High Contrast",
        background: "#000000",
        text: "#ffffff",
        frame: "#222222",
        correct: "#00ff00",
        wrong: "#ff0000",
        neutral: "#888888",
        button: "#444444",
        button_text: "#ffffff",
    },
    Theme {
        name: "Forest",
        background: "#2d4a2e",
        text: "#f0f0f0",
        frame: "#3d5c3d",
        correct: "#5a9367",
        wrong: "#c7524a",
        neutral: "#8d8d8d",
        button: "#4a7c59",
        button_text: "#ffffff",
    },
    Theme {
        name: "Crimson Night",
        background: "#2C001E",
        text: "#F0E6EF",
        frame: "#4C0033",
        correct: "#79D70F",
        wrong: "#FF005C",
        neutral: "#8E05C2",
        button: "#AE00FB",
        button_text: "#ffffff",
    },
];

impl Theme {
    /// Look up a built-in theme by its exact name.
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.name == name)
    }

    pub fn default_theme() -> &'static Theme {
        &THEMES[0]
    }
}

/// Split `#rrggbb` into its components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
