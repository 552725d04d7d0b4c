use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocstoreError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("document store rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("authentication failed: {0}")]
    Auth(String),
}
