use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use unordered_pair::UnorderedPair;

use crate::location::Location;
use crate::solver::Path;

/// A canonical tile type. Ids are dense, starting at 1; [`EMPTY`] marks a cell with nothing to match.
pub type TileId = usize;

/// The id of empty, border, and unrecognized cells.
pub const EMPTY: TileId = 0;

pub(crate) fn default_display(id: TileId) -> char {
    match id {
        EMPTY => '.',
        1..=9 => char::from(b'0' + id as u8),
        10..=35 => char::from(b'a' + (id - 10) as u8),
        36..=61 => char::from(b'A' + (id - 36) as u8),
        _ => '#',
    }
}

/// A grid of canonical tile ids surrounded by a one cell empty border.
///
/// Boards are rebuilt from scratch on every refresh, either by a [`Canonicalizer`](crate::canonical::Canonicalizer) or by hand with a [`Builder`](crate::builder::Builder).
/// Ids are not stable across rebuilds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    pub(crate) cells: Array2<TileId>,
    pub(crate) type_count: usize,
    // index 0 is the empty display
    pub(crate) displays: Vec<char>,
}

impl Board {
    /// Playable `(rows, cols)`, excluding the border.
    pub fn dims(&self) -> (usize, usize) {
        let (rows, cols) = self.cells.dim();
        (rows - 2, cols - 2)
    }

    /// The number of distinct tile types recognized when this board was built.
    pub fn type_count(&self) -> usize {
        self.type_count
    }

    /// The id at `location`, or `None` off the board.
    pub fn get(&self, location: Location) -> Option<TileId> {
        self.cells.get(location.as_index()).copied()
    }

    /// Whether `location` is on the board and holds no tile. The border is always vacant.
    pub fn is_vacant(&self, location: Location) -> bool {
        self.get(location) == Some(EMPTY)
    }

    /// Every playable location, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Location> {
        let (rows, cols) = self.dims();
        (1..=rows).cartesian_product(1..=cols).map(|(row, col)| Location(row, col))
    }

    /// Occupied locations grouped by id, in id order. Each group lists its locations row by row.
    pub fn groups(&self) -> Vec<(TileId, Vec<Location>)> {
        self.cells.indexed_iter()
            .filter(|(_, id)| **id != EMPTY)
            .map(|(index, id)| (*id, Location::from(index)))
            .into_group_map()
            .into_iter()
            .sorted_by_key(|(id, _)| *id)
            .collect_vec()
    }

    /// Ids whose tile count differs from `group_size`, with their counts.
    pub fn group_violations(&self, group_size: usize) -> Vec<(TileId, usize)> {
        self.groups().into_iter()
            .map(|(id, locations)| (id, locations.len()))
            .filter(|(_, count)| *count != group_size)
            .collect_vec()
    }

    /// The number of tiles still on the board.
    pub fn tiles_remaining(&self) -> usize {
        self.cells.iter().filter(|id| **id != EMPTY).count()
    }

    /// Remove a matched pair, as the game does after a successful move.
    /// Returns `false` and leaves the board alone unless both locations hold the same tile.
    pub fn clear(&mut self, pair: UnorderedPair<Location>) -> bool {
        let UnorderedPair(a, b) = pair;
        match (self.get(a), self.get(b)) {
            (Some(x), Some(y)) if a != b && x == y && x != EMPTY => {
                self.cells[a.as_index()] = EMPTY;
                self.cells[b.as_index()] = EMPTY;
                if !self.cells.iter().any(|id| *id == x) {
                    self.type_count -= 1;
                }
                true
            }
            _ => false,
        }
    }

    fn display_of(&self, id: TileId) -> char {
        self.displays.get(id).copied().unwrap_or_else(|| default_display(id))
    }

    /// Render this board with `path` drawn over it, border included.
    pub fn with_path<'a>(&'a self, path: &'a Path) -> HintView<'a> {
        HintView { board: self, path: Some(path) }
    }
}

/// Prints the playable area, one line per row.
impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (rows, cols) = self.dims();
        for row in 1..=rows {
            let line: String = (1..=cols).map(|col| self.display_of(self.cells[(row, col)])).collect();
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}

/// A framed, bordered rendering of a [`Board`], optionally marking a path: `*` at its ends and `+` at its turns.
pub struct HintView<'a> {
    board: &'a Board,
    path: Option<&'a Path>,
}

impl<'a> From<&'a Board> for HintView<'a> {
    fn from(board: &'a Board) -> Self {
        Self { board, path: None }
    }
}

impl Display for HintView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut glyphs = self.board.cells.map(|id| self.board.display_of(*id));
        if let Some(path) = self.path {
            let waypoints = path.waypoints();
            for turn in &waypoints[1..waypoints.len() - 1] {
                glyphs[turn.as_index()] = '+';
            }
            glyphs[path.start().as_index()] = '*';
            glyphs[path.end().as_index()] = '*';
        }

        let frame = format!("+{}+", "-".repeat(glyphs.ncols()));
        writeln!(f, "{frame}")?;
        for row in glyphs.rows() {
            writeln!(f, "|{}|", row.iter().collect::<String>())?;
        }
        writeln!(f, "{frame}")
    }
}
