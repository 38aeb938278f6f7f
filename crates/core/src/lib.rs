#![forbid(unsafe_code)]

pub mod model;
pub mod session;
pub mod time;

pub use session::{AnswerVerdict, Outcome, QuizError, QuizPhase, QuizSession};
pub use time::Clock;
