use quiz_core::model::{QuizReport, ShapeId};
use quiz_core::session::{Outcome, QuizError, QuizSession};
use services::{QuizLoopService, QuizProgress, QuizQuestion, QuizServiceError};

use crate::views::ViewError;

/// User intents the quiz view dispatches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Submit(String),
    Next,
    RetryImage,
    Restart,
}

/// What the quiz view should render right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizVmPhase {
    /// A question is on screen, awaiting a guess.
    Prompt,
    /// The verdict for the last guess is on screen.
    Feedback,
    /// The session is over; show the report.
    Complete,
}

/// Feedback for the most recent answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub outcome: Outcome,
    pub correct_shape: ShapeId,
}

impl AnswerFeedback {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.outcome.is_correct()
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self.outcome {
            Outcome::Correct => "Correct! ✓".to_string(),
            Outcome::Incorrect => {
                format!("Incorrect! The correct answer is {}", self.correct_shape)
            }
        }
    }
}

/// View-model for one quiz run.
///
/// Owns the session exclusively; the view reads through accessors and
/// mutates only via the intent methods. Widget enabling derives from
/// `phase()` rather than being tracked separately.
pub struct QuizVm {
    session: QuizSession,
    question: Option<QuizQuestion>,
    feedback: Option<AnswerFeedback>,
    asset_error: bool,
}

impl QuizVm {
    /// Start a fresh session and draw its first question.
    #[must_use]
    pub fn start(quiz_loop: &QuizLoopService) -> Self {
        let mut session = quiz_loop.start_quiz();
        let mut question = None;
        let mut asset_error = false;

        if !session.is_complete() {
            match quiz_loop.next_question(&mut session) {
                Ok(q) => question = Some(q),
                // The question was drawn; only its image is missing.
                Err(_) => asset_error = true,
            }
        }

        Self {
            session,
            question,
            feedback: None,
            asset_error,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizVmPhase {
        if self.feedback.is_some() {
            QuizVmPhase::Feedback
        } else if self.session.is_complete() {
            QuizVmPhase::Complete
        } else {
            QuizVmPhase::Prompt
        }
    }

    #[must_use]
    pub fn question(&self) -> Option<&QuizQuestion> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    /// True when the in-flight question has no displayable image.
    #[must_use]
    pub fn asset_error(&self) -> bool {
        self.asset_error
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress::of(&self.session)
    }

    #[must_use]
    pub fn shape_count(&self) -> u8 {
        self.session.shape_count()
    }

    /// Final report, available once the session is complete.
    #[must_use]
    pub fn report(&self) -> Option<QuizReport> {
        self.session.is_complete().then(|| self.session.report())
    }

    /// Handle a submitted guess.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::InvalidGuess` for non-numeric or out-of-range
    /// input; the session is untouched and the caller re-prompts.
    pub fn submit(
        &mut self,
        quiz_loop: &QuizLoopService,
        raw_guess: &str,
    ) -> Result<(), ViewError> {
        let shape_count = self.session.shape_count();
        let Ok(guess) = raw_guess.trim().parse::<u8>() else {
            return Err(ViewError::InvalidGuess { shape_count });
        };

        match quiz_loop.answer_current(&mut self.session, guess) {
            Ok(result) => {
                self.feedback = Some(AnswerFeedback {
                    outcome: result.verdict.outcome,
                    correct_shape: result.verdict.shape,
                });
                Ok(())
            }
            Err(QuizServiceError::Quiz(QuizError::InvalidGuess { .. })) => {
                Err(ViewError::InvalidGuess { shape_count })
            }
            Err(_) => Err(ViewError::Unknown),
        }
    }

    /// Drop the feedback and draw the next question (or finish the session).
    ///
    /// A no-op outside the `Feedback` phase.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::AssetUnavailable` when the next question's image
    /// is missing; the question itself is in flight and can still be
    /// answered.
    pub fn next(&mut self, quiz_loop: &QuizLoopService) -> Result<(), ViewError> {
        if self.feedback.take().is_none() {
            return Ok(());
        }

        self.asset_error = false;
        self.question = None;

        if self.session.is_complete() {
            return Ok(());
        }

        match quiz_loop.next_question(&mut self.session) {
            Ok(question) => {
                self.question = Some(question);
                Ok(())
            }
            Err(QuizServiceError::Asset(_)) => {
                self.asset_error = true;
                Err(ViewError::AssetUnavailable)
            }
            Err(_) => Err(ViewError::Unknown),
        }
    }

    /// Try to re-render the in-flight question after an asset failure.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::AssetUnavailable` when the image is still missing.
    pub fn retry_image(&mut self, quiz_loop: &QuizLoopService) -> Result<(), ViewError> {
        match quiz_loop.render_current(&self.session) {
            Ok(question) => {
                self.question = Some(question);
                self.asset_error = false;
                Ok(())
            }
            Err(QuizServiceError::Asset(_)) => Err(ViewError::AssetUnavailable),
            Err(_) => Err(ViewError::Unknown),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
