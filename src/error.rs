//! Error types for recognition, configuration, and pair requests.

use crate::fingerprint::Fingerprint;
use crate::location::Location;

/// A [`Geometry`](crate::geometry::Geometry) that cannot describe any board.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A cell or grid dimension is zero.
    #[error("geometry has a zero {0}")]
    ZeroDimension(&'static str),
    /// There is nothing to fingerprint.
    #[error("sample plan has no id points")]
    NoIdPoints,
    /// A sample or probe falls outside its cell.
    #[error("sample offset ({0}, {1}) lies outside a {2}x{3} cell")]
    OffsetOutsideCell(u32, u32, u32, u32),
    /// More samples than a [`Fingerprint`] can hold.
    #[error("{samples} samples need {bits} bits, more than the {max} available", max = Fingerprint::BITS)]
    TooManySamples {
        /// Id points in the plan.
        samples: usize,
        /// Bits those points would need.
        bits: u32,
    },
    /// The board's far edge lies beyond the largest addressable pixel.
    #[error("board extends past the largest representable pixel coordinate")]
    Overflow,
}

/// Failure to turn a captured raster into a fingerprint grid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    /// The configured board does not fit in the raster; every fingerprint would be garbage.
    #[error("board needs a raster of at least {required:?} (width, height) but the capture is {actual:?}")]
    GeometryMismatch {
        /// `(width, height)` the geometry samples up to.
        required: (u32, u32),
        /// `(width, height)` of the raster.
        actual: (u32, u32),
    },
    /// The geometry itself is unusable.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// A pixel buffer that does not match its declared size.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    /// The buffer holds `actual` bytes where `width * height * 4` were expected.
    #[error("expected {expected} bytes for the frame, got {actual}")]
    BufferSize {
        /// `width * height * 4`.
        expected: usize,
        /// Length of the buffer handed over.
        actual: usize,
    },
}

/// A call to [`connect`](crate::solver::connect) that breaks its contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPairRequest {
    /// A location off the padded board.
    #[error("{0:?} lies outside the board")]
    OutOfBounds(Location),
    /// Both ends are the same cell.
    #[error("a tile cannot be paired with itself at {0:?}")]
    SameLocation(Location),
    /// An end holds no tile.
    #[error("{0:?} is empty")]
    EmptyCell(Location),
    /// The ends hold different tiles.
    #[error("tiles at {0:?} and {1:?} differ")]
    Mismatched(Location, Location),
}

/// A geometry configuration file that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Not valid JSON for a geometry.
    #[error("malformed geometry: {0}")]
    Parse(#[from] serde_json::Error),
    /// Parsed, but fails validation.
    #[error("unusable geometry: {0}")]
    Invalid(#[from] GeometryError),
}
