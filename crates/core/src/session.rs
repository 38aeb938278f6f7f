use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;
use thiserror::Error;

use crate::model::{QuizReport, QuizSettings, ShapeId, ShapeTally};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors emitted by the quiz session state machine.
///
/// Every variant is recoverable: the session stays usable and the caller
/// decides how to surface the problem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("guess {guess} is outside 1..={shape_count}")]
    InvalidGuess { guess: u8, shape_count: u8 },

    #[error("the current question was already answered")]
    AlreadyAnswered,

    #[error("{op} is not valid in the {phase:?} phase")]
    InvalidTransition { op: &'static str, phase: QuizPhase },
}

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where the session sits between questions and answers.
///
/// Callers derive widget enable/disable behavior from this phase instead of
/// tracking it on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Ready to draw the next question.
    AwaitingAdvance,
    /// A question is on screen and has not been answered yet.
    AwaitingAnswer,
    /// The final question has been answered.
    Complete,
}

//
// ─── VERDICT ───────────────────────────────────────────────────────────────────
//

/// Whether a guess matched the drawn shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

/// Result of checking one answer.
///
/// Carries the correct shape so the caller can display it when the guess was
/// wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerVerdict {
    pub outcome: Outcome,
    pub shape: ShapeId,
    /// 1-based ordinal of the question this verdict belongs to.
    pub question: u32,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session over the fixed shape set.
///
/// Draws one shape per question uniformly at random, with replacement, and
/// steps through `total_questions` questions while keeping a per-shape tally.
/// Repeats across consecutive questions are expected, and a shape can go
/// unshown for a whole session.
pub struct QuizSession {
    settings: QuizSettings,
    question: u32,
    current_shape: Option<ShapeId>,
    phase: QuizPhase,
    tally: ShapeTally,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session: zeroed tally over every shape, no question drawn yet.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic. A zero-length session is complete immediately.
    ///
    /// Restarting is constructing a fresh value; dropping the old session
    /// discards all in-flight state unconditionally.
    #[must_use]
    pub fn new(settings: QuizSettings, started_at: DateTime<Utc>) -> Self {
        let phase = if settings.total_questions() == 0 {
            QuizPhase::Complete
        } else {
            QuizPhase::AwaitingAdvance
        };

        Self {
            tally: ShapeTally::new(settings.shape_count()),
            settings,
            question: 0,
            current_shape: None,
            phase,
            started_at,
            completed_at: (phase == QuizPhase::Complete).then_some(started_at),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// 1-based ordinal of the question currently in flight, 0 before the
    /// first `advance`.
    #[must_use]
    pub fn question(&self) -> u32 {
        self.question
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.settings.total_questions()
    }

    #[must_use]
    pub fn shape_count(&self) -> u8 {
        self.settings.shape_count()
    }

    /// Shape of the in-flight question. `None` before the first draw.
    #[must_use]
    pub fn current_shape(&self) -> Option<ShapeId> {
        self.current_shape
    }

    /// Number of questions that have been answered so far.
    #[must_use]
    pub fn answered_count(&self) -> u32 {
        self.tally.total_answered()
    }

    /// Number of questions not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.settings.total_questions().saturating_sub(self.question)
    }

    #[must_use]
    pub fn tally(&self) -> &ShapeTally {
        &self.tally
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// True once the final question has been answered, not merely displayed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Complete
    }

    /// Draw the next question's shape and move to `AwaitingAnswer`.
    ///
    /// Draws are independent and uniform over `1..=shape_count`; the caller
    /// supplies the rng so tests can seed it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` while a question is still
    /// unanswered or after the session has completed. Callers check
    /// `is_complete()` before advancing.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<ShapeId, QuizError> {
        if self.phase != QuizPhase::AwaitingAdvance {
            return Err(QuizError::InvalidTransition {
                op: "advance",
                phase: self.phase,
            });
        }

        self.question += 1;
        let shape = ShapeId::new(rng.random_range(1..=self.settings.shape_count()));
        self.current_shape = Some(shape);
        self.phase = QuizPhase::AwaitingAnswer;
        Ok(shape)
    }

    /// Check a guess against the in-flight question and record the outcome.
    ///
    /// A valid guess moves the session to `AwaitingAdvance`, or to `Complete`
    /// when it answers the final question (stamping `completed_at`).
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidGuess` for guesses outside the shape range;
    /// the session is left untouched so the caller can re-prompt.
    /// Returns `QuizError::AlreadyAnswered` when the current question has
    /// already been recorded, and `QuizError::InvalidTransition` when no
    /// question was ever drawn.
    pub fn check_answer(
        &mut self,
        guess: u8,
        answered_at: DateTime<Utc>,
    ) -> Result<AnswerVerdict, QuizError> {
        match self.phase {
            QuizPhase::AwaitingAnswer => {}
            _ if self.question == 0 => {
                return Err(QuizError::InvalidTransition {
                    op: "check_answer",
                    phase: self.phase,
                });
            }
            QuizPhase::AwaitingAdvance | QuizPhase::Complete => {
                return Err(QuizError::AlreadyAnswered);
            }
        }

        let Some(shape) = self.current_shape else {
            return Err(QuizError::InvalidTransition {
                op: "check_answer",
                phase: self.phase,
            });
        };

        if !self.settings.contains_guess(guess) {
            return Err(QuizError::InvalidGuess {
                guess,
                shape_count: self.settings.shape_count(),
            });
        }

        let outcome = if guess == shape.value() {
            self.tally.record_correct(shape);
            Outcome::Correct
        } else {
            self.tally.record_wrong(shape);
            Outcome::Incorrect
        };

        if self.question >= self.settings.total_questions() {
            self.phase = QuizPhase::Complete;
            self.completed_at = Some(answered_at);
        } else {
            self.phase = QuizPhase::AwaitingAdvance;
        }

        Ok(AnswerVerdict {
            outcome,
            shape,
            question: self.question,
        })
    }

    /// Aggregate totals and per-shape accuracy. Callable at any point.
    #[must_use]
    pub fn report(&self) -> QuizReport {
        QuizReport::from_tally(&self.tally, self.settings.total_questions())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("question", &self.question)
            .field("total_questions", &self.settings.total_questions())
            .field("current_shape", &self.current_shape)
            .field("phase", &self.phase)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn settings(total_questions: u32) -> QuizSettings {
        QuizSettings::new(total_questions, 5).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn wrong_guess_for(shape: ShapeId) -> u8 {
        if shape.value() == 1 { 2 } else { 1 }
    }

    #[test]
    fn new_session_awaits_the_first_advance() {
        let session = QuizSession::new(settings(3), fixed_now());
        assert_eq!(session.phase(), QuizPhase::AwaitingAdvance);
        assert_eq!(session.question(), 0);
        assert!(session.current_shape().is_none());
        assert!(!session.is_complete());
        assert_eq!(session.completed_at(), None);
    }

    #[test]
    fn advance_draws_within_range_and_increments_the_ordinal() {
        let mut session = QuizSession::new(settings(3), fixed_now());
        let shape = session.advance(&mut rng()).unwrap();

        assert!((1..=5).contains(&shape.value()));
        assert_eq!(session.question(), 1);
        assert_eq!(session.current_shape(), Some(shape));
        assert_eq!(session.phase(), QuizPhase::AwaitingAnswer);
    }

    #[test]
    fn advance_while_awaiting_answer_is_rejected() {
        let mut session = QuizSession::new(settings(3), fixed_now());
        let mut rng = rng();
        session.advance(&mut rng).unwrap();

        let err = session.advance(&mut rng).unwrap_err();
        assert!(matches!(err, QuizError::InvalidTransition { op: "advance", .. }));
        assert_eq!(session.question(), 1);
    }

    #[test]
    fn correct_guess_increments_exactly_one_counter() {
        let mut session = QuizSession::new(settings(3), fixed_now());
        let shape = session.advance(&mut rng()).unwrap();

        let verdict = session.check_answer(shape.value(), fixed_now()).unwrap();
        assert_eq!(verdict.outcome, Outcome::Correct);
        assert_eq!(verdict.shape, shape);
        assert_eq!(verdict.question, 1);
        assert_eq!(session.tally().correct(shape), 1);
        assert_eq!(session.tally().wrong(shape), 0);
        assert_eq!(session.tally().total_answered(), 1);
    }

    #[test]
    fn wrong_guess_records_against_the_drawn_shape() {
        let mut session = QuizSession::new(settings(3), fixed_now());
        let shape = session.advance(&mut rng()).unwrap();
        let guess = wrong_guess_for(shape);

        let verdict = session.check_answer(guess, fixed_now()).unwrap();
        assert_eq!(verdict.outcome, Outcome::Incorrect);
        assert_eq!(verdict.shape, shape);
        assert_eq!(session.tally().wrong(shape), 1);
        assert_eq!(session.tally().correct(shape), 0);
    }

    #[test]
    fn invalid_guess_leaves_the_session_untouched() {
        let mut session = QuizSession::new(settings(3), fixed_now());
        let shape = session.advance(&mut rng()).unwrap();

        let err = session.check_answer(6, fixed_now()).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidGuess {
                guess: 6,
                shape_count: 5
            }
        );
        assert_eq!(session.phase(), QuizPhase::AwaitingAnswer);
        assert_eq!(session.tally().total_answered(), 0);

        // The caller can re-prompt and answer the same question.
        let verdict = session.check_answer(shape.value(), fixed_now()).unwrap();
        assert_eq!(verdict.outcome, Outcome::Correct);
    }

    #[test]
    fn zero_is_an_invalid_guess() {
        let mut session = QuizSession::new(settings(1), fixed_now());
        session.advance(&mut rng()).unwrap();
        let err = session.check_answer(0, fixed_now()).unwrap_err();
        assert!(matches!(err, QuizError::InvalidGuess { guess: 0, .. }));
    }

    #[test]
    fn double_answer_is_guarded_and_leaves_the_tally_unchanged() {
        let mut session = QuizSession::new(settings(3), fixed_now());
        let shape = session.advance(&mut rng()).unwrap();
        session.check_answer(shape.value(), fixed_now()).unwrap();

        let err = session.check_answer(shape.value(), fixed_now()).unwrap_err();
        assert_eq!(err, QuizError::AlreadyAnswered);
        assert_eq!(session.tally().total_answered(), 1);
        assert_eq!(session.tally().correct(shape), 1);
    }

    #[test]
    fn answering_before_any_advance_is_an_invalid_transition() {
        let mut session = QuizSession::new(settings(3), fixed_now());
        let err = session.check_answer(1, fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidTransition {
                op: "check_answer",
                ..
            }
        ));
    }

    #[test]
    fn completion_requires_the_final_answer_not_just_the_final_draw() {
        let mut session = QuizSession::new(settings(1), fixed_now());
        let shape = session.advance(&mut rng()).unwrap();
        assert!(!session.is_complete());

        session.check_answer(shape.value(), fixed_now()).unwrap();
        assert!(session.is_complete());
        assert_eq!(session.phase(), QuizPhase::Complete);
        assert_eq!(session.completed_at(), Some(fixed_now()));
    }

    #[test]
    fn advance_after_completion_is_rejected() {
        let mut session = QuizSession::new(settings(1), fixed_now());
        let mut rng = rng();
        let shape = session.advance(&mut rng).unwrap();
        session.check_answer(shape.value(), fixed_now()).unwrap();

        let err = session.advance(&mut rng).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidTransition {
                op: "advance",
                phase: QuizPhase::Complete
            }
        ));
    }

    #[test]
    fn tally_sum_tracks_completed_answers() {
        let mut session = QuizSession::new(settings(10), fixed_now());
        let mut rng = rng();

        for answered in 1..=10 {
            let shape = session.advance(&mut rng).unwrap();
            assert_eq!(session.tally().total_answered(), answered - 1);
            session.check_answer(shape.value(), fixed_now()).unwrap();
            assert_eq!(session.tally().total_answered(), answered);
        }
        assert!(session.is_complete());
    }

    #[test]
    fn zero_question_session_is_complete_at_start() {
        let session = QuizSession::new(settings(0), fixed_now());
        assert!(session.is_complete());
        assert_eq!(session.completed_at(), Some(fixed_now()));

        let report = session.report();
        assert_eq!(report.overall_accuracy(), 0.0);
        assert_eq!(report.total_questions(), 0);
    }

    #[test]
    fn answering_a_zero_question_session_is_an_invalid_transition() {
        let mut session = QuizSession::new(settings(0), fixed_now());
        let err = session.check_answer(1, fixed_now()).unwrap_err();
        assert!(matches!(err, QuizError::InvalidTransition { .. }));
    }

    #[test]
    fn report_is_callable_mid_session() {
        let mut session = QuizSession::new(settings(4), fixed_now());
        let shape = session.advance(&mut rng()).unwrap();
        session.check_answer(shape.value(), fixed_now()).unwrap();

        let report = session.report();
        assert_eq!(report.total_correct(), 1);
        assert_eq!(report.total_questions(), 4);
    }

    #[test]
    fn three_question_walkthrough() {
        let mut session = QuizSession::new(settings(3), fixed_now());
        let mut rng = rng();

        // Question 1: answered correctly.
        let p1 = session.advance(&mut rng).unwrap();
        let verdict = session.check_answer(p1.value(), fixed_now()).unwrap();
        assert_eq!(verdict.outcome, Outcome::Correct);
        assert_eq!(session.tally().correct(p1), 1);
        assert_eq!(session.tally().wrong(p1), 0);

        // Question 2: one invalid guess, then a wrong one.
        let p2 = session.advance(&mut rng).unwrap();
        let before = session.tally().clone();
        assert!(matches!(
            session.check_answer(6, fixed_now()),
            Err(QuizError::InvalidGuess { .. })
        ));
        assert_eq!(session.tally(), &before);
        let verdict = session
            .check_answer(wrong_guess_for(p2), fixed_now())
            .unwrap();
        assert_eq!(verdict.outcome, Outcome::Incorrect);
        assert_eq!(session.tally().wrong(p2), 1);

        // Question 3: answered correctly, completing the session.
        let p3 = session.advance(&mut rng).unwrap();
        let verdict = session.check_answer(p3.value(), fixed_now()).unwrap();
        assert_eq!(verdict.outcome, Outcome::Correct);
        assert!(session.is_complete());

        let report = session.report();
        assert_eq!(report.total_correct(), 2);
        assert_eq!(report.total_wrong(), 1);
        assert_eq!(report.total_questions(), 3);
        assert!((report.overall_accuracy() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn report_totals_balance_after_a_full_session() {
        let mut session = QuizSession::new(settings(20), fixed_now());
        let mut rng = rng();

        for turn in 0..20 {
            let shape = session.advance(&mut rng).unwrap();
            let guess = if turn % 3 == 0 {
                wrong_guess_for(shape)
            } else {
                shape.value()
            };
            session.check_answer(guess, fixed_now()).unwrap();
        }

        let report = session.report();
        assert_eq!(report.total_correct() + report.total_wrong(), 20);
        let shown: u32 = report.shapes().iter().map(|s| s.shown).sum();
        assert_eq!(shown, 20);
    }

    #[test]
    fn draws_are_roughly_uniform_over_a_long_session() {
        let total = 10_000_u32;
        let mut session =
            QuizSession::new(QuizSettings::new(total, 5).unwrap(), fixed_now());
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [0_u32; 5];

        while !session.is_complete() {
            let shape = session.advance(&mut rng).unwrap();
            seen[usize::from(shape.value() - 1)] += 1;
            session.check_answer(shape.value(), fixed_now()).unwrap();
        }

        // Expected 2000 per shape; 200 is five sigma of slack, far from the
        // boundary for the seeded run while still catching a biased draw.
        let expected = total / 5;
        for count in seen {
            assert!(
                count.abs_diff(expected) < 200,
                "draw frequency {count} strays too far from {expected}"
            );
        }
    }
}
