use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A board dimension. Boards always have at least one row and one column.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(row, col)` on a padded board.
///
/// Row `0`, column `0`, and the last row and column of a board are its empty border; playable cells start at `Location(1, 1)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The row of this location.
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column of this location.
    pub fn col(&self) -> Coord {
        self.1
    }

    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether `self` and `other` are orthogonal neighbors.
    pub fn is_adjacent_to(&self, other: Location) -> bool {
        (self.0 == other.0 && self.1.abs_diff(other.1) == 1) || (self.1 == other.1 && self.0.abs_diff(other.0) == 1)
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}
