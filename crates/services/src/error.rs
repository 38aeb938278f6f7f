//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::session::QuizError;

use crate::provider::AssetError;

/// Errors emitted by the quiz loop service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}
