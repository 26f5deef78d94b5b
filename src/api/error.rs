use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("GraphQL error: {0}")]
    Graphql(String),
    #[error("response is missing `{0}`")]
    MissingData(&'static str),
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API key is not a valid header value")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    /// Short tag for log lines.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Graphql(_) => "graphql",
            Self::MissingData(_) => "missing-data",
            Self::Decode(_) => "decode",
            Self::InvalidApiKey(_) => "config",
        }
    }
}
