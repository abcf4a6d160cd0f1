//! Error types for clinicnav

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unknown role '{0}'")]
    UnknownRole(String),

    #[error("Unknown login category '{0}'")]
    UnknownCategory(String),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("Config file not found. Run 'clinicnav init' first.")]
    ConfigNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a login attempt did not produce a session.
///
/// `Display` yields the text shown to the user.
#[derive(Error, Debug)]
pub enum LoginError {
    /// The server answered but refused the credentials
    #[error("Login failed: {}", .message.as_deref().unwrap_or("Invalid credentials"))]
    Rejected { message: Option<String> },

    /// The request never produced a usable response
    #[error("Login failed. Please try again.")]
    Transport(String),

    /// Credentials were accepted but the session could not be persisted
    #[error("Login failed. Please try again.")]
    Store(#[source] Error),
}

impl LoginError {
    /// Server-supplied rejection message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            LoginError::Rejected { message } => message.as_deref(),
            _ => None,
        }
    }
}
