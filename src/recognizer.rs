use tracing::info;

use crate::canonical::{Canonical, Canonicalizer};
use crate::error::{GeometryError, RecognitionError};
use crate::fingerprint::Extractor;
use crate::geometry::Geometry;
use crate::raster::{Capture, Raster};

/// The whole recognition pipeline: raster to fingerprints to a canonical [`Board`](crate::Board).
#[derive(Clone, Debug)]
pub struct Recognizer {
    extractor: Extractor,
    canonicalizer: Canonicalizer,
}

impl Recognizer {
    /// A recognizer sampling with `geometry` and grouping with `canonicalizer`.
    pub fn new(geometry: Geometry, canonicalizer: Canonicalizer) -> Result<Self, GeometryError> {
        Ok(Self {
            extractor: Extractor::new(geometry)?,
            canonicalizer,
        })
    }

    /// The geometry cells are sampled with, e.g. to turn a hint into click targets.
    pub fn geometry(&self) -> &Geometry {
        self.extractor.geometry()
    }

    /// Rebuild the board from a single raster.
    pub fn recognize<R: Raster>(&self, raster: &R) -> Result<Canonical, RecognitionError> {
        let grid = self.extractor.extract(raster)?;
        let canonical = self.canonicalizer.canonicalize(&grid);
        info!(
            types = canonical.board.type_count(),
            tiles = canonical.board.tiles_remaining(),
            rejected = canonical.rejected.len(),
            "refreshed board"
        );
        Ok(canonical)
    }

    /// Capture a fresh raster from `source` and recognize it.
    pub fn refresh<C: Capture>(&self, source: &mut C) -> Result<Canonical, RefreshError<C::Error>> {
        let frame = source.capture().map_err(RefreshError::Capture)?;
        Ok(self.recognize(&frame)?)
    }
}

/// Failure of one capture-and-recognize cycle.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError<E: std::error::Error> {
    /// The capture source could not produce a frame.
    #[error("capture failed: {0}")]
    Capture(E),
    /// The frame was captured but could not be recognized.
    #[error(transparent)]
    Recognition(#[from] RecognitionError),
}
