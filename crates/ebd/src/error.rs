use thiserror::Error;

/// Failure classes the tool distinguishes. Config, version and argument
/// errors are fatal; remote errors are tolerated per profile.
#[derive(Debug, Error)]
pub enum Error {
    #[error("credentials file {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("profile not found: {0}")]
    UnknownProfile(String),

    #[error("profile [{profile}] is missing '{key}'")]
    MissingKey { profile: String, key: String },

    #[error("{0}")]
    Version(String),

    #[error("{0}")]
    Argument(String),

    #[error("{service}: {message}")]
    Remote { service: &'static str, message: String },
}
