use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("App not found: {0}")]
    AppNotFound(String),

    #[error("Invalid file name component: {0:?}")]
    InvalidFileName(String),

    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error("Gemini returned an empty response")]
    EmptyResponse,

    #[error("Gemini AI is not available (set GEMINI_API_KEY)")]
    AiUnavailable,
}

pub type Result<T> = std::result::Result<T, HubError>;
