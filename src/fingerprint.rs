use std::fmt::{Display, Formatter};

use std::num::NonZero;

use itertools::Itertools;
use ndarray::Array2;
use tracing::{debug, trace};

use crate::error::{GeometryError, RecognitionError};
use crate::geometry::{Geometry, SampleEncoding, SamplePlan};
use crate::location::{Dimension, Location};
use crate::raster::{luminance, Raster};

/// An opaque perceptual hash of one cell. Equal artwork gives equal fingerprints.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Fingerprint(pub u128);

impl Fingerprint {
    /// Background, misaligned, or otherwise unrecognizable cells.
    pub const EMPTY: Self = Self(0);
    /// Capacity in bits.
    pub const BITS: u32 = u128::BITS;

    /// Whether this is [`Self::EMPTY`].
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// One fingerprint per cell of a padded board. The border is always [`Fingerprint::EMPTY`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FingerprintGrid {
    pub(crate) cells: Array2<Fingerprint>,
}

impl FingerprintGrid {
    /// An all-empty grid with `(rows, cols)` playable cells.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            cells: Array2::from_elem((dims.0.get() + 2, dims.1.get() + 2), Fingerprint::EMPTY),
        }
    }

    /// Set the fingerprint at an interior `location`. Border and out of range locations are ignored.
    pub fn set(&mut self, location: Location, fingerprint: Fingerprint) -> &mut Self {
        let (rows, cols) = self.cells.dim();
        if (1..rows - 1).contains(&location.0) && (1..cols - 1).contains(&location.1) {
            self.cells[location.as_index()] = fingerprint;
        }

        self
    }

    /// The fingerprint at `location`, if it is on the grid.
    pub fn get(&self, location: Location) -> Option<Fingerprint> {
        self.cells.get(location.as_index()).copied()
    }

    /// All cells with their locations, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Location, Fingerprint)> + '_ {
        self.cells.indexed_iter().map(|(index, fingerprint)| (Location::from(index), *fingerprint))
    }
}

/// Samples cells of a captured raster into [`Fingerprint`]s.
#[derive(Clone, Debug)]
pub struct Extractor {
    geometry: Geometry,
    plan: SamplePlan,
    // rows, cols
    dims: (Dimension, Dimension),
}

impl Extractor {
    /// Build an extractor for a validated `geometry`.
    pub fn new(geometry: Geometry) -> Result<Self, GeometryError> {
        geometry.validate()?;
        let dims = (
            NonZero::new(geometry.rows as usize).ok_or(GeometryError::ZeroDimension("row count"))?,
            NonZero::new(geometry.cols as usize).ok_or(GeometryError::ZeroDimension("column count"))?,
        );
        let plan = geometry.sample_plan();
        debug!(encoding = %plan.encoding, id_points = plan.id_points.len(), "built extractor");
        Ok(Self { geometry, plan, dims })
    }

    /// The geometry this extractor samples with.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Fingerprint every playable cell of `raster`.
    ///
    /// Fails with [`RecognitionError::GeometryMismatch`] before sampling anything if the board does not fit in the raster.
    pub fn extract<R: Raster>(&self, raster: &R) -> Result<FingerprintGrid, RecognitionError> {
        self.geometry.check_raster(raster)?;

        let mut grid = FingerprintGrid::with_dims(self.dims);
        for (row, col) in (1..=self.dims.0.get()).cartesian_product(1..=self.dims.1.get()) {
            let location = Location(row, col);
            grid.set(location, self.sample(raster, location));
        }

        debug!(
            occupied = grid.iter().filter(|(_, fingerprint)| !fingerprint.is_empty()).count(),
            "extracted fingerprints"
        );
        Ok(grid)
    }

    /// Fingerprint the single cell at `location`. Locations off the board give [`Fingerprint::EMPTY`].
    ///
    /// Fails with [`RecognitionError::GeometryMismatch`] if the board does not fit in the raster.
    pub fn fingerprint<R: Raster>(&self, raster: &R, location: Location) -> Result<Fingerprint, RecognitionError> {
        self.geometry.check_raster(raster)?;
        Ok(self.sample(raster, location))
    }

    // `raster` has already passed `check_raster`
    fn sample<R: Raster>(&self, raster: &R, location: Location) -> Fingerprint {
        let Some((top, left)) = self.geometry.cell_origin(location) else {
            return Fingerprint::EMPTY;
        };
        let gray_at = |(dy, dx): (u32, u32)| luminance(raster.rgba(top + dy, left + dx));
        let threshold = self.plan.threshold;

        // a tile is light inside its frame and dark on the frame itself; anything else is background or misaligned
        if self.plan.light_probes.iter().any(|probe| gray_at(*probe) < threshold)
            || self.plan.dark_probes.iter().any(|probe| gray_at(*probe) >= threshold) {
            trace!(?location, "probe check failed");
            return Fingerprint::EMPTY;
        }

        let samples = self.plan.id_points.iter().map(|point| gray_at(*point)).collect_vec();
        let fingerprint = match self.plan.encoding {
            SampleEncoding::Threshold => {
                let dark = samples.iter().map(|gray| *gray < threshold).collect_vec();
                if dark.iter().all_equal() {
                    return Fingerprint::EMPTY;
                }
                dark.into_iter().fold(0u128, |hash, bit| (hash << 1) | bit as u128)
            }
            SampleEncoding::Luminance => {
                if samples.iter().all_equal() {
                    return Fingerprint::EMPTY;
                }
                samples.into_iter().fold(0u128, |hash, gray| (hash << 8) | gray as u128)
            }
        };

        trace!(?location, %fingerprint, "sampled cell");
        Fingerprint(fingerprint)
    }
}
