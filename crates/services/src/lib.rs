#![forbid(unsafe_code)]

pub mod error;
pub mod provider;
pub mod quiz;

pub use quiz_core::Clock;

pub use error::QuizServiceError;
pub use provider::{AssetError, DirectoryImageProvider, ShapeImageProvider};
pub use quiz::{QuizAnswerResult, QuizLoopService, QuizProgress, QuizQuestion};
