use quiz_core::session::QuizSession;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based ordinal of the in-flight question, 0 before the first.
    pub question: u32,
    pub total: u32,
    pub answered: u32,
    pub is_complete: bool,
}

impl QuizProgress {
    #[must_use]
    pub fn of(session: &QuizSession) -> Self {
        Self {
            question: session.question(),
            total: session.total_questions(),
            answered: session.answered_count(),
            is_complete: session.is_complete(),
        }
    }
}
