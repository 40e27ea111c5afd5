//! Error types shared by the storage, clipboard and launcher services.

#[derive(Debug, thiserror::Error)]
pub enum QuickLinksError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Launch error: {url} - {reason}")]
    Launch { url: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QuickLinksError>;

impl QuickLinksError {
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    pub fn launch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Launch {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl From<arboard::Error> for QuickLinksError {
    fn from(err: arboard::Error) -> Self {
        Self::Clipboard(err.to_string())
    }
}
