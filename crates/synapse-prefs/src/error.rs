//! Preference error types.

use thiserror::Error;

/// Errors raised when changing a preference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefsError {
    /// The name does not match any built-in theme.
    #[error("unknown theme: {0} (run `synapse themes` to list them)")]
    UnknownTheme(String),
}
