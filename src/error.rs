//! Error types for collaborator failures
//!
//! None of these reach the render loop: the gate and the renderer log and
//! swallow them, degrading to "omit optional UI".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("action tracker unavailable: {0}")]
    ActionsUnavailable(String),

    #[error("analytics delivery failed: {0}")]
    Analytics(String),

    #[error("suggestions request failed: {0}")]
    Suggestions(#[from] reqwest::Error),

    #[error("suggestions endpoint returned HTTP {0}")]
    SuggestionsStatus(u16),
}

pub type Result<T> = std::result::Result<T, FeedError>;
