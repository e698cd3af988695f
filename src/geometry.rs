use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::{ConfigError, GeometryError, RecognitionError};
use crate::fingerprint::Fingerprint;
use crate::location::Location;
use crate::raster::Raster;

/// How each id point contributes to a [`Fingerprint`].
#[derive(Copy, Clone, Debug, Default, Display, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SampleEncoding {
    /// One bit per point: set when the point is darker than the threshold.
    #[default]
    Threshold,
    /// The full luminance byte of each point.
    Luminance,
}

impl SampleEncoding {
    pub(crate) fn bits_per_sample(&self) -> u32 {
        match self {
            Self::Threshold => 1,
            Self::Luminance => 8,
        }
    }
}

/// The constellation of pixels read inside every cell, as `(row, col)` offsets from the cell origin.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SamplePlan {
    /// Luminance below this counts as dark.
    pub threshold: u8,
    /// Bits or bytes per id point.
    #[serde(default)]
    pub encoding: SampleEncoding,
    /// Points hashed into the fingerprint, in order.
    pub id_points: Vec<(u32, u32)>,
    /// Points that must read light on a properly aligned tile.
    #[serde(default)]
    pub light_probes: Vec<(u32, u32)>,
    /// Points that must read dark on a properly aligned tile (the tile frame).
    #[serde(default)]
    pub dark_probes: Vec<(u32, u32)>,
}

impl SamplePlan {
    /// The plan tuned for the classic 50x40 tile artwork, scaled to a `cell_height` x `cell_width` cell.
    pub fn for_cell(cell_height: u32, cell_width: u32) -> Self {
        let id_points = (11..cell_height.saturating_sub(10))
            .step_by(4)
            .flat_map(|dy| (6..cell_width.saturating_sub(5)).step_by(4).map(move |dx| (dy, dx)))
            .collect();
        let (near_y, far_y) = (3, cell_height.saturating_sub(4));
        let (near_x, far_x) = (3, cell_width.saturating_sub(4));

        Self {
            threshold: 125,
            encoding: SampleEncoding::Threshold,
            id_points,
            light_probes: vec![(near_y, near_x), (near_y, far_x), (far_y, near_x), (far_y, far_x)],
            dark_probes: vec![(0, 0), (cell_height.saturating_sub(1), 0), (0, cell_width.saturating_sub(1))],
        }
    }

    fn validate(&self, cell_height: u32, cell_width: u32) -> Result<(), GeometryError> {
        if self.id_points.is_empty() {
            return Err(GeometryError::NoIdPoints);
        }

        let bits = self.id_points.len() as u32 * self.encoding.bits_per_sample();
        if bits > Fingerprint::BITS {
            return Err(GeometryError::TooManySamples { samples: self.id_points.len(), bits });
        }

        match self.id_points.iter()
            .chain(&self.light_probes)
            .chain(&self.dark_probes)
            .find(|(dy, dx)| *dy >= cell_height || *dx >= cell_width) {
            Some(&(dy, dx)) => Err(GeometryError::OffsetOutsideCell(dy, dx, cell_height, cell_width)),
            None => Ok(()),
        }
    }
}

/// Where the board sits inside the captured window and how each cell is sampled.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Pixel row of the first cell's top edge.
    pub top: u32,
    /// Pixel column of the first cell's left edge.
    pub left: u32,
    /// Pixel height of one cell.
    pub cell_height: u32,
    /// Pixel width of one cell.
    pub cell_width: u32,
    /// Playable rows, not counting the empty border.
    pub rows: u32,
    /// Playable columns, not counting the empty border.
    pub cols: u32,
    /// Falls back to [`SamplePlan::for_cell`] when absent.
    #[serde(default)]
    pub plan: Option<SamplePlan>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            top: 141,
            left: 64,
            cell_height: 50,
            cell_width: 40,
            rows: 9,
            cols: 16,
            plan: None,
        }
    }
}

impl Geometry {
    /// Parse a geometry from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let geometry: Self = serde_json::from_str(json)?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// The sample plan in effect.
    pub fn sample_plan(&self) -> SamplePlan {
        match &self.plan {
            Some(plan) => plan.clone(),
            None => SamplePlan::for_cell(self.cell_height, self.cell_width),
        }
    }

    /// Check that this geometry describes a board that can be sampled at all.
    pub fn validate(&self) -> Result<(), GeometryError> {
        for (value, name) in [
            (self.cell_height, "cell height"),
            (self.cell_width, "cell width"),
            (self.rows, "row count"),
            (self.cols, "column count"),
        ] {
            if value == 0 {
                return Err(GeometryError::ZeroDimension(name));
            }
        }

        if self.checked_size().is_none() {
            return Err(GeometryError::Overflow);
        }

        self.sample_plan().validate(self.cell_height, self.cell_width)
    }

    fn checked_size(&self) -> Option<(u32, u32)> {
        let width = self.cell_width.checked_mul(self.cols)?.checked_add(self.left)?;
        let height = self.cell_height.checked_mul(self.rows)?.checked_add(self.top)?;
        Some((width, height))
    }

    /// `(width, height)` a raster must have for every cell to be sampled.
    ///
    /// Saturates for geometries that fail [`Self::validate`] with [`GeometryError::Overflow`], so no raster is ever large enough for them.
    pub fn required_size(&self) -> (u32, u32) {
        self.checked_size().unwrap_or((u32::MAX, u32::MAX))
    }

    /// Fail with [`GeometryMismatch`](crate::error::RecognitionError::GeometryMismatch) if `raster` is too small for this board.
    pub fn check_raster<R: Raster>(&self, raster: &R) -> Result<(), RecognitionError> {
        let required = self.checked_size().ok_or(GeometryError::Overflow)?;
        let actual = (raster.width(), raster.height());
        if required.0 > actual.0 || required.1 > actual.1 {
            return Err(RecognitionError::GeometryMismatch { required, actual });
        }

        Ok(())
    }

    pub(crate) fn contains(&self, location: Location) -> bool {
        (1..=self.rows as usize).contains(&location.0) && (1..=self.cols as usize).contains(&location.1)
    }

    /// Top-left pixel `(row, col)` of the cell at `location`, or `None` for border and out of range locations.
    pub fn cell_origin(&self, location: Location) -> Option<(u32, u32)> {
        if !self.contains(location) {
            return None;
        }

        // padded coordinates: the first playable cell is (1, 1)
        let row = self.cell_height.checked_mul(location.0 as u32 - 1)?.checked_add(self.top)?;
        let col = self.cell_width.checked_mul(location.1 as u32 - 1)?.checked_add(self.left)?;
        Some((row, col))
    }

    /// The pixel `(row, col)` to click to select the tile at `location`.
    pub fn click_target(&self, location: Location) -> Option<(u32, u32)> {
        self.cell_origin(location)
            .map(|(y, x)| (y.saturating_add(self.cell_height / 2), x.saturating_add(self.cell_width / 2)))
    }
}
