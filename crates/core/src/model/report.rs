use crate::model::ids::ShapeId;
use crate::model::tally::ShapeTally;

//
// ─── PER-SHAPE REPORT ──────────────────────────────────────────────────────────
//

/// Per-shape slice of a session report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeReport {
    pub shape: ShapeId,
    pub correct: u32,
    pub wrong: u32,
    /// How many times this shape came up as a question.
    pub shown: u32,
    /// Fraction of correct answers for this shape, or `None` when the shape
    /// never came up ("Not shown in this quiz").
    pub accuracy: Option<f64>,
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Aggregate result of a quiz session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizReport {
    total_questions: u32,
    total_correct: u32,
    total_wrong: u32,
    overall_accuracy: f64,
    shapes: Vec<ShapeReport>,
}

impl QuizReport {
    /// Builds a report from a tally.
    ///
    /// `overall_accuracy` is `total_correct / total_questions` and is defined
    /// as `0.0` for a zero-question session.
    #[must_use]
    pub fn from_tally(tally: &ShapeTally, total_questions: u32) -> Self {
        let total_correct = tally.total_correct();
        let total_wrong = tally.total_wrong();

        let overall_accuracy = if total_questions == 0 {
            0.0
        } else {
            f64::from(total_correct) / f64::from(total_questions)
        };

        let shapes = tally
            .iter()
            .map(|(shape, correct, wrong)| {
                let shown = correct.saturating_add(wrong);
                let accuracy = if shown == 0 {
                    None
                } else {
                    Some(f64::from(correct) / f64::from(shown))
                };
                ShapeReport {
                    shape,
                    correct,
                    wrong,
                    shown,
                    accuracy,
                }
            })
            .collect();

        Self {
            total_questions,
            total_correct,
            total_wrong,
            overall_accuracy,
            shapes,
        }
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn total_correct(&self) -> u32 {
        self.total_correct
    }

    #[must_use]
    pub fn total_wrong(&self) -> u32 {
        self.total_wrong
    }

    /// Overall accuracy as a ratio in `0.0..=1.0`.
    #[must_use]
    pub fn overall_accuracy(&self) -> f64 {
        self.overall_accuracy
    }

    /// Per-shape results, lowest shape first, one entry per configured shape.
    #[must_use]
    pub fn shapes(&self) -> &[ShapeReport] {
        &self.shapes
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
