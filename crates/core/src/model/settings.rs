use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ShapeId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("shape count must be > 0")]
    InvalidShapeCount,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Configuration for a quiz session.
///
/// Controls how many questions a session asks and how many shapes the image
/// set contains. The shape count must match the number of image assets the
/// provider can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    total_questions: u32,
    shape_count: u8,
}

impl QuizSettings {
    pub const DEFAULT_TOTAL_QUESTIONS: u32 = 50;
    pub const DEFAULT_SHAPE_COUNT: u8 = 5;

    /// Creates settings after validating the shape count.
    ///
    /// `total_questions` may be zero: such a session is complete as soon as
    /// it starts and reports an overall accuracy of zero.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidShapeCount` if `shape_count` is zero.
    pub fn new(total_questions: u32, shape_count: u8) -> Result<Self, SettingsError> {
        if shape_count == 0 {
            return Err(SettingsError::InvalidShapeCount);
        }

        Ok(Self {
            total_questions,
            shape_count,
        })
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn shape_count(&self) -> u8 {
        self.shape_count
    }

    /// All valid shape identifiers, lowest first.
    #[must_use]
    pub fn shapes(&self) -> Vec<ShapeId> {
        (1..=self.shape_count).map(ShapeId::new).collect()
    }

    /// Returns true when `guess` names one of the configured shapes.
    #[must_use]
    pub fn contains_guess(&self, guess: u8) -> bool {
        (1..=self.shape_count).contains(&guess)
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            total_questions: Self::DEFAULT_TOTAL_QUESTIONS,
            shape_count: Self::DEFAULT_SHAPE_COUNT,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_configuration() {
        let settings = QuizSettings::default();
        assert_eq!(settings.total_questions(), 50);
        assert_eq!(settings.shape_count(), 5);
    }

    #[test]
    fn zero_shape_count_is_rejected() {
        let err = QuizSettings::new(10, 0).unwrap_err();
        assert_eq!(err, SettingsError::InvalidShapeCount);
    }

    #[test]
    fn zero_questions_are_allowed() {
        let settings = QuizSettings::new(0, 5).unwrap();
        assert_eq!(settings.total_questions(), 0);
    }

    #[test]
    fn shapes_enumerates_the_fixed_set() {
        let settings = QuizSettings::new(3, 3).unwrap();
        let shapes = settings.shapes();
        assert_eq!(shapes, vec![ShapeId::new(1), ShapeId::new(2), ShapeId::new(3)]);
    }

    #[test]
    fn contains_guess_covers_the_range_only() {
        let settings = QuizSettings::default();
        assert!(settings.contains_guess(1));
        assert!(settings.contains_guess(5));
        assert!(!settings.contains_guess(0));
        assert!(!settings.contains_guess(6));
    }
}
