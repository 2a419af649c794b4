use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS, socket, timeout or body read failure.
    #[error("backend unreachable: {0}")]
    Transport(String),
    #[error("backend answered with unexpected status {0}")]
    UnexpectedStatus(StatusCode),
    #[error("backend payload could not be decoded: {0}")]
    Decode(String),
    #[error("invalid backend base url '{0}'")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// True for failures the controller reports as a lost connection.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::UnexpectedStatus(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
