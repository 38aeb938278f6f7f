/// Errors a view can surface to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The guess was not a number inside the shape range.
    InvalidGuess { shape_count: u8 },
    /// The current question's image could not be loaded.
    AssetUnavailable,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::InvalidGuess { shape_count } => {
                format!("Please enter a number between 1 and {shape_count}")
            }
            ViewError::AssetUnavailable => {
                "Could not load the image for this question.".to_string()
            }
            ViewError::Unknown => "Something went wrong. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_guess_message_names_the_range() {
        let err = ViewError::InvalidGuess { shape_count: 5 };
        assert_eq!(err.message(), "Please enter a number between 1 and 5");
    }
}
