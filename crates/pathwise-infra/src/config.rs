//! Environment-based configuration.
//!
//! Two knobs, both read from the environment at startup:
//!
//! - `PATHWISE_DATA_DIR` picks where the SQLite database lives,
//!   defaulting to `~/.pathwise`;
//! - `GEMINI_API_KEY` selects between the real Gemini provider and the
//!   unconfigured stub. Absence is not an error: the app runs, and
//!   sends fail with a service-unavailable error.

use secrecy::SecretString;

/// Returns the data directory, honoring `PATHWISE_DATA_DIR`.
pub fn data_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("PATHWISE_DATA_DIR") {
        return std::path::PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".pathwise")
}

/// Returns the default database URL under the data directory.
pub fn default_database_url() -> String {
    format!("sqlite://{}?mode=rwc", data_dir().join("pathwise.db").display())
}

/// Reads the Gemini API key from `GEMINI_API_KEY`, if set and non-empty.
pub fn gemini_api_key() -> Option<SecretString> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
}
