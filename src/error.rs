use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server returned {status}: {body}")]
    Server {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Version creation failed: {0}")]
    VersionCreation(String),

    #[error("Asset upload failed: {0}")]
    AssetUpload(String),
}

pub type Result<T> = std::result::Result<T, PublishError>;
