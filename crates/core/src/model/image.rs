use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

use crate::model::ids::ShapeId;

//
// ─── ERRORS (domain validation) ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageValidationError {
    #[error("Image URI cannot be empty.")]
    EmptyImageUri,
}

//
// ─── IMAGE SOURCE ──────────────────────────────────────────────────────────────
//

/// Where a shape image can be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageUri {
    FilePath(PathBuf),
    Url(Url),
}

impl ImageUri {
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ImageValidationError> {
        let p = path.into();
        if p.as_os_str().is_empty() {
            return Err(ImageValidationError::EmptyImageUri);
        }
        Ok(ImageUri::FilePath(p))
    }

    pub fn from_url(url: impl AsRef<str>) -> Result<Self, ImageValidationError> {
        let s = url.as_ref().trim();
        if s.is_empty() {
            return Err(ImageValidationError::EmptyImageUri);
        }
        let u = Url::parse(s).map_err(|_| ImageValidationError::EmptyImageUri)?;
        Ok(ImageUri::Url(u))
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            ImageUri::FilePath(p) => Some(p.as_path()),
            ImageUri::Url(_) => None,
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match self {
            ImageUri::Url(u) => Some(u),
            ImageUri::FilePath(_) => None,
        }
    }

    /// String form suitable for an `img` `src` attribute.
    #[must_use]
    pub fn display_string(&self) -> String {
        match self {
            ImageUri::FilePath(p) => p.display().to_string(),
            ImageUri::Url(u) => u.as_str().to_string(),
        }
    }
}

//
// ─── SHAPE IMAGE ───────────────────────────────────────────────────────────────
//

/// A displayable image for one shape.
///
/// `flipped` requests a 180° rotation purely for visual variety; it never
/// affects which shape the answer is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeImage {
    shape: ShapeId,
    uri: ImageUri,
    flipped: bool,
}

impl ShapeImage {
    #[must_use]
    pub fn new(shape: ShapeId, uri: ImageUri, flipped: bool) -> Self {
        Self {
            shape,
            uri,
            flipped,
        }
    }

    #[must_use]
    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    #[must_use]
    pub fn uri(&self) -> &ImageUri {
        &self.uri
    }

    #[must_use]
    pub fn flipped(&self) -> bool {
        self.flipped
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_uri_rejects_empty_path() {
        let err = ImageUri::from_file("").unwrap_err();
        assert_eq!(err, ImageValidationError::EmptyImageUri);
    }

    #[test]
    fn file_uri_round_trips_the_path() {
        let uri = ImageUri::from_file("assets/shape1.jpg").unwrap();
        assert_eq!(uri.as_path(), Some(Path::new("assets/shape1.jpg")));
        assert!(uri.as_url().is_none());
    }

    #[test]
    fn url_uri_parses() {
        let uri = ImageUri::from_url("https://example.com/shape2.jpg").unwrap();
        assert!(uri.as_url().is_some());
        assert_eq!(uri.display_string(), "https://example.com/shape2.jpg");
    }

    #[test]
    fn url_uri_rejects_blank_and_invalid() {
        assert!(ImageUri::from_url("   ").is_err());
        assert!(ImageUri::from_url("not a url").is_err());
    }

    #[test]
    fn shape_image_keeps_flip_separate_from_shape() {
        let uri = ImageUri::from_file("shape3.jpg").unwrap();
        let image = ShapeImage::new(ShapeId::new(3), uri, true);
        assert_eq!(image.shape(), ShapeId::new(3));
        assert!(image.flipped());
    }
}
