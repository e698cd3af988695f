//! Hand-built boards, for fixtures, replays, and tests.

use std::num::NonZero;

use itertools::Itertools;
use ndarray::Array2;

use crate::board::{default_display, Board, TileId, EMPTY};
use crate::location::{Dimension, Location};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A tile was placed on the border or outside the dimensions of the builder.
    FeatureOutOfBounds,
    /// A tile was placed where another tile already is.
    OccupiedLocation,
    /// A picture passed to [`BoardBuilder::from_rows`] had rows of differing lengths, or no rows at all.
    MalformedPicture,
}

/// Functionality all builders must implement.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
pub trait Builder: Clone {
    /// Construct a new [`Self`] with the specified playable dimensions, in `(rows, cols)` order.
    fn with_dims(dims: (Dimension, Dimension)) -> Self;
    /// Place tiles of the type shown as `display` at every location in `locations`.
    /// Reusing a `display` adds more tiles of that type.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) or [`OccupiedLocation`](BuilderInvalidReason::OccupiedLocation) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    fn add_tiles(&mut self, display: char, locations: &[Location]) -> &mut Self;
    /// Remove every tile of the most recently introduced type.
    ///
    /// If the builder is in an invalid state or holds no tiles, this function does nothing.
    fn pop_tiles(&mut self) -> &mut Self;
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>>;
    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>>;
}

/// Builds rectangular boards by hand, for fixtures, replays, and tests.
#[derive(Clone)]
pub struct BoardBuilder {
    // rows, cols
    dims: (Dimension, Dimension),
    cells: Array2<TileId>,
    displays: Vec<char>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        // the classic 9 x 16 layout
        Self::with_dims((NonZero::new(9).unwrap(), NonZero::new(16).unwrap()))
    }
}

impl BoardBuilder {
    /// Read a picture of the playable area: one line per row, `.` for an empty cell, any other character for a tile of that type.
    ///
    /// Surrounding whitespace on each line is ignored, and so are blank lines.
    pub fn from_rows(picture: &str) -> Self {
        let rows = picture.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect_vec())
            .collect_vec();

        let width = rows.first().map_or(0, Vec::len);
        let dims = match (NonZero::new(rows.len()), NonZero::new(width)) {
            (Some(height), Some(width)) if rows.iter().all(|row| row.len() == width.get()) => (height, width),
            _ => {
                let mut builder = Self::with_dims((NonZero::<usize>::MIN, NonZero::<usize>::MIN));
                builder.invalid_reasons.push(BuilderInvalidReason::MalformedPicture);
                return builder;
            }
        };

        let mut builder = Self::with_dims(dims);
        let by_display = rows.iter().enumerate()
            .flat_map(|(row, line)| line.iter().enumerate().map(move |(col, display)| (*display, Location(row + 1, col + 1))))
            .filter(|(display, _)| *display != default_display(EMPTY))
            .into_group_map();
        // ids follow first appearance, the same order a canonicalizer would assign
        for (display, locations) in by_display.into_iter().sorted_by_key(|(_, locations)| locations[0]) {
            builder.add_tiles(display, &locations);
        }

        builder
    }

    fn in_bounds(&self, location: Location) -> bool {
        (1..=self.dims.0.get()).contains(&location.0) && (1..=self.dims.1.get()).contains(&location.1)
    }
}

impl Builder for BoardBuilder {
    fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::from_elem((dims.0.get() + 2, dims.1.get() + 2), EMPTY),
            displays: vec![default_display(EMPTY)],
            invalid_reasons: Default::default(),
        }
    }

    fn add_tiles(&mut self, display: char, locations: &[Location]) -> &mut Self {
        if !self.invalid_reasons.is_empty() || locations.is_empty() {
            return self;
        }

        for location in locations {
            if !self.in_bounds(*location) {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
                return self;
            }
            if self.cells[location.as_index()] != EMPTY || locations.iter().filter(|other| *other == location).count() > 1 {
                self.invalid_reasons.push(BuilderInvalidReason::OccupiedLocation);
                return self;
            }
        }

        // non-empty ids start at 1
        let id = match self.displays.iter().skip(1).position(|existing| *existing == display) {
            Some(index) => index + 1,
            None => {
                self.displays.push(display);
                self.displays.len() - 1
            }
        };
        for location in locations {
            self.cells[location.as_index()] = id;
        }

        self
    }

    fn pop_tiles(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() || self.displays.len() == 1 {
            return self;
        }

        let id_to_remove = self.displays.len() - 1;
        self.displays.pop();
        self.cells.map_inplace(|cell| if *cell == id_to_remove {
            *cell = EMPTY;
        });

        self
    }

    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        match self.invalid_reasons.is_empty() {
            true => None,
            false => Some(&self.invalid_reasons),
        }
    }

    fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if let Some(reasons) = self.is_valid() {
            return Err(reasons);
        }

        Ok(Board {
            cells: self.cells.clone(),
            type_count: self.displays.len() - 1,
            displays: self.displays.clone(),
        })
    }
}
