//! Layout error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid layout parameters: {reason}")]
    InvalidParams { reason: String },

    /// The item has no explicit ratio and no positive intrinsic height to derive one.
    #[error("item {index} has no usable aspect ratio")]
    UndefinedRatio { index: usize },
}

impl LayoutError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
