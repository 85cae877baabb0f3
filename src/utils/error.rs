use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("輸入驗證失敗")]
    ValidationError { fields: serde_json::Value },

    #[error("JWE 解密失敗")]
    DecryptRejected { detail: serde_json::Value },

    #[error("Upstream error: {message}")]
    UpstreamError { message: String },

    #[error("Envelope error: {message}")]
    EnvelopeError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ScoutError>;
