//! synapse-prefs — theme palettes and persisted display preferences.
//!
//! Preferences are cosmetic except for the order mode, which decides whether
//! a newly started quiz is shuffled.

pub mod config;
pub mod error;
pub mod theme;

pub use config::{load_preferences, load_preferences_from, PreferenceStore, Preferences};
pub use error::PrefsError;
pub use theme::{Theme, THEMES};
