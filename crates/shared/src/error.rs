use serde::{Deserialize, Serialize};

use crate::domain::string_or_null;

/// Application sub-codes the backend embeds in 409 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictCode {
    DuplicateNumber,
    DuplicateName,
}

impl ConflictCode {
    pub fn parse(status: &str) -> Option<Self> {
        match status.trim() {
            "409x2" => Some(Self::DuplicateNumber),
            "409x3" => Some(Self::DuplicateName),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateNumber => "409x2",
            Self::DuplicateName => "409x3",
        }
    }
}

/// Error body returned by the backend for non-success writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorApiResponses {
    #[serde(default, deserialize_with = "string_or_null")]
    pub status: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub message: String,
}

impl ErrorApiResponses {
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn conflict_code(&self) -> Option<ConflictCode> {
        ConflictCode::parse(&self.status)
    }
}
