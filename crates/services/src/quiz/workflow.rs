use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{QuizReport, QuizSettings, ShapeImage};
use quiz_core::session::{AnswerVerdict, QuizError, QuizSession};

use crate::error::QuizServiceError;
use crate::provider::ShapeImageProvider;

/// One question, drawn and rendered, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    /// 1-based position within the session.
    pub number: u32,
    pub total: u32,
    pub image: ShapeImage,
}

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAnswerResult {
    pub verdict: AnswerVerdict,
    pub is_complete: bool,
    /// Final report, attached once the last question is answered.
    pub report: Option<QuizReport>,
}

/// Orchestrates session start, question rendering and answering.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    settings: QuizSettings,
    provider: Arc<dyn ShapeImageProvider>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        settings: QuizSettings,
        provider: Arc<dyn ShapeImageProvider>,
    ) -> Self {
        Self {
            clock,
            settings,
            provider,
        }
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// Start a new session stamped from the service clock.
    ///
    /// Restarting mid-session is simply calling this again and replacing the
    /// old value; all in-flight state goes with it.
    #[must_use]
    pub fn start_quiz(&self) -> QuizSession {
        QuizSession::new(self.settings, self.clock.now())
    }

    /// Draw the next question and resolve its image.
    ///
    /// The draw happens before the asset lookup, so an `Asset` error leaves
    /// the drawn question in flight: the caller surfaces the failure for that
    /// question and may retry via [`Self::render_current`].
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` for state-machine violations and
    /// `QuizServiceError::Asset` when the image cannot be supplied.
    pub fn next_question(
        &self,
        session: &mut QuizSession,
    ) -> Result<QuizQuestion, QuizServiceError> {
        let mut rng = rand::rng();
        let shape = session.advance(&mut rng)?;
        let image = self.provider.render(shape)?;
        Ok(QuizQuestion {
            number: session.question(),
            total: session.total_questions(),
            image,
        })
    }

    /// Re-resolve the image for the question already in flight.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when no question is in flight and
    /// `QuizServiceError::Asset` when the image still cannot be supplied.
    pub fn render_current(
        &self,
        session: &QuizSession,
    ) -> Result<QuizQuestion, QuizServiceError> {
        let Some(shape) = session.current_shape() else {
            return Err(QuizError::InvalidTransition {
                op: "render_current",
                phase: session.phase(),
            }
            .into());
        };

        let image = self.provider.render(shape)?;
        Ok(QuizQuestion {
            number: session.question(),
            total: session.total_questions(),
            image,
        })
    }

    /// Check a guess against the current question.
    ///
    /// On the final answer the session's report is attached to the result.
    ///
    /// # Errors
    ///
    /// Propagates `QuizError` from the session (invalid guess, double answer,
    /// wrong state); the session stays usable in every case.
    pub fn answer_current(
        &self,
        session: &mut QuizSession,
        guess: u8,
    ) -> Result<QuizAnswerResult, QuizServiceError> {
        let verdict = session.check_answer(guess, self.clock.now())?;
        let is_complete = session.is_complete();

        Ok(QuizAnswerResult {
            verdict,
            is_complete,
            report: is_complete.then(|| session.report()),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
