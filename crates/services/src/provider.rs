use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

use quiz_core::model::{ImageUri, ShapeId, ShapeImage};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised while resolving shape images.
///
/// An asset failure is fatal to displaying that one question, never to the
/// process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssetError {
    #[error("no image asset for shape {} at {}", .shape, .path.display())]
    Missing { shape: ShapeId, path: PathBuf },
}

//
// ─── PROVIDER ──────────────────────────────────────────────────────────────────
//

/// Supplies a displayable image for a shape.
///
/// Implementations may flag a randomized 180° flip for visual variety; the
/// flip must never depend on or alter the shape used for scoring.
pub trait ShapeImageProvider: Send + Sync {
    /// Resolve the image for `shape`.
    ///
    /// # Errors
    ///
    /// Returns `AssetError` when the asset cannot be supplied.
    fn render(&self, shape: ShapeId) -> Result<ShapeImage, AssetError>;
}

//
// ─── DIRECTORY PROVIDER ────────────────────────────────────────────────────────
//

/// Resolves shape images from `shape{n}.jpg` files under an asset root.
#[derive(Debug, Clone)]
pub struct DirectoryImageProvider {
    root: PathBuf,
    shape_count: u8,
    flip: bool,
}

impl DirectoryImageProvider {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, shape_count: u8) -> Self {
        Self {
            root: root.into(),
            shape_count,
            flip: true,
        }
    }

    /// Enable or disable the random 180° flip. On by default.
    #[must_use]
    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn shape_count(&self) -> u8 {
        self.shape_count
    }

    fn asset_path(&self, shape: ShapeId) -> PathBuf {
        self.root.join(format!("shape{}.jpg", shape.value()))
    }

    /// Verify that every shape has an image file on disk.
    ///
    /// Callers run this once at startup so a missing asset fails the launch
    /// instead of the twentieth question.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::Missing` for the first shape without a file.
    pub fn scan(&self) -> Result<(), AssetError> {
        for n in 1..=self.shape_count {
            let shape = ShapeId::new(n);
            let path = self.asset_path(shape);
            if !path.is_file() {
                return Err(AssetError::Missing { shape, path });
            }
        }
        Ok(())
    }
}

impl ShapeImageProvider for DirectoryImageProvider {
    fn render(&self, shape: ShapeId) -> Result<ShapeImage, AssetError> {
        let path = self.asset_path(shape);
        if !path.is_file() {
            return Err(AssetError::Missing { shape, path });
        }

        let uri = ImageUri::from_file(&path).map_err(|_| AssetError::Missing {
            shape,
            path: path.clone(),
        })?;
        let flipped = self.flip && rand::rng().random_bool(0.5);
        Ok(ShapeImage::new(shape, uri, flipped))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
