use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to reach generation endpoint: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("generation endpoint returned HTTP {status}")]
    Status { status: u16 },
    #[error("invalid generation response payload: {0}")]
    InvalidResponse(String),
    #[error("invalid identity token: {0}")]
    InvalidToken(String),
    #[error("session store I/O failed for '{path}': {source}")]
    StoreIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("session store is corrupt: {0}")]
    StoreCorrupt(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
