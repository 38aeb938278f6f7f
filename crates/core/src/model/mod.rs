mod ids;
mod image;
mod report;
mod settings;
mod tally;

pub use ids::{ParseIdError, ShapeId};
pub use image::{ImageUri, ImageValidationError, ShapeImage};
pub use report::{QuizReport, ShapeReport};
pub use settings::{QuizSettings, SettingsError};
pub use tally::ShapeTally;
