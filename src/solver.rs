use std::cmp::{max, min};
use std::ops::Range;

use itertools::Itertools;
use strum::VariantArray;

use crate::board::{Board, EMPTY};
use crate::error::InvalidPairRequest;
use crate::location::{Coord, Location};

/// A connecting route between two tiles: its start, up to two turns, and its end.
///
/// Consecutive waypoints always differ in exactly one coordinate.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Path(Vec<Location>);

impl Path {
    /// Build a path through `points`, dropping repeated points and points in the middle of a straight run.
    pub(crate) fn through(points: impl IntoIterator<Item = Location>) -> Self {
        let mut waypoints: Vec<Location> = Vec::with_capacity(4);
        for point in points.into_iter().dedup() {
            while let [.., before, last] = waypoints[..] {
                let collinear = (before.0 == last.0 && last.0 == point.0) || (before.1 == last.1 && last.1 == point.1);
                if !collinear {
                    break;
                }
                waypoints.pop();
            }
            waypoints.push(point);
        }

        Self(waypoints)
    }

    /// The start, every turn, and the end, in order.
    pub fn waypoints(&self) -> &[Location] {
        &self.0
    }

    /// The first tile of the pair.
    pub fn start(&self) -> Location {
        self.0[0]
    }

    /// The second tile of the pair.
    pub fn end(&self) -> Location {
        self.0[self.0.len() - 1]
    }

    /// How many times the path changes direction.
    pub fn turns(&self) -> usize {
        self.0.len() - 2
    }

    /// Every cell the path touches, from start to end.
    pub fn cells(&self) -> Vec<Location> {
        let mut cells = vec![self.start()];
        for (from, to) in self.0.iter().tuple_windows() {
            let mut current = *from;
            let direction = Direction::VARIANTS.iter()
                .find(|direction| direction.points_from(*from, *to))
                .copied();
            let Some(direction) = direction else { continue };
            while current != *to {
                current = direction.attempt_from(current);
                cells.push(current);
            }
        }

        cells
    }

    /// The same route walked from the other end.
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }
}

#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
        }
    }

    // whether `to` lies straight ahead of `from`
    fn points_from(&self, from: Location, to: Location) -> bool {
        match self {
            Self::Up => from.1 == to.1 && to.0 < from.0,
            Self::Down => from.1 == to.1 && to.0 > from.0,
            Self::Left => from.0 == to.0 && to.1 < from.1,
            Self::Right => from.0 == to.0 && to.1 > from.1,
        }
    }

    // last vacant location walking away from `start`; the border guarantees the walk ends on the board
    fn extent(&self, board: &Board, start: Location) -> Location {
        let mut current = start;
        loop {
            let next = self.attempt_from(current);
            if !board.is_vacant(next) {
                return current;
            }
            current = next;
        }
    }
}

/// How far a tile could slide through empty cells, as half-open ranges including its own row and column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reach {
    /// Rows reachable up and down the tile's column.
    pub rows: Range<Coord>,
    /// Columns reachable left and right along the tile's row.
    pub cols: Range<Coord>,
}

impl Reach {
    /// The reach of the tile at `location`.
    pub fn of(board: &Board, location: Location) -> Self {
        Self {
            rows: Direction::Up.extent(board, location).0..Direction::Down.extent(board, location).0 + 1,
            cols: Direction::Left.extent(board, location).1..Direction::Right.extent(board, location).1 + 1,
        }
    }
}

fn intersect(a: &Range<Coord>, b: &Range<Coord>) -> Range<Coord> {
    max(a.start, b.start)..min(a.end, b.end)
}

// a search over shared rows walks lines of `Row`, sliding along columns; `Column` is the transpose
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Debug)]
enum Axis {
    Row,
    Column,
}

impl Axis {
    fn locate(&self, line: Coord, position: Coord) -> Location {
        match self {
            Self::Row => Location(line, position),
            Self::Column => Location(position, line),
        }
    }

    fn line_of(&self, location: Location) -> Coord {
        match self {
            Self::Row => location.0,
            Self::Column => location.1,
        }
    }

    fn position_of(&self, location: Location) -> Coord {
        match self {
            Self::Row => location.1,
            Self::Column => location.0,
        }
    }

    fn lines_of<'r>(&self, reach: &'r Reach) -> &'r Range<Coord> {
        match self {
            Self::Row => &reach.rows,
            Self::Column => &reach.cols,
        }
    }

    // every cell strictly between `a` and `b` when both are moved onto `line`
    fn clear_between(&self, board: &Board, line: Coord, a: Location, b: Location) -> bool {
        let (low, high) = (min(self.position_of(a), self.position_of(b)), max(self.position_of(a), self.position_of(b)));
        (low + 1..high).all(|position| board.is_vacant(self.locate(line, position)))
    }

    fn straight(&self, board: &Board, a: Location, b: Location) -> Option<Path> {
        (self.line_of(a) == self.line_of(b) && self.clear_between(board, self.line_of(a), a, b))
            .then(|| Path::through([a, b]))
    }

    fn via_shared_line(&self, board: &Board, a: Location, b: Location, reach_a: &Reach, reach_b: &Reach) -> Option<Path> {
        intersect(self.lines_of(reach_a), self.lines_of(reach_b))
            .find(|line| self.clear_between(board, *line, a, b))
            .map(|line| Path::through([
                a,
                self.locate(line, self.position_of(a)),
                self.locate(line, self.position_of(b)),
                b,
            ]))
    }
}

/// Check that `a` and `b` are a pair [`connect`] may be asked about: two distinct on-board locations holding the same tile.
pub fn check_pair(board: &Board, a: Location, b: Location) -> Result<(), InvalidPairRequest> {
    let id_a = board.get(a).ok_or(InvalidPairRequest::OutOfBounds(a))?;
    let id_b = board.get(b).ok_or(InvalidPairRequest::OutOfBounds(b))?;
    if a == b {
        return Err(InvalidPairRequest::SameLocation(a));
    }
    if id_a == EMPTY {
        return Err(InvalidPairRequest::EmptyCell(a));
    }
    if id_b == EMPTY {
        return Err(InvalidPairRequest::EmptyCell(b));
    }
    if id_a != id_b {
        return Err(InvalidPairRequest::Mismatched(a, b));
    }

    Ok(())
}

/// Find a path of at most two turns joining the tiles at `a` and `b`, whose interior cells are all empty.
///
/// Neighbors and clear straight lines connect directly.
/// Otherwise every row both tiles can slide to is tried top to bottom, then every shared column left to right, and the first clear one wins.
/// The search is symmetric: swapping `a` and `b` finds a path exactly when the original order does.
///
/// # Panics
/// If `a` and `b` fail [`check_pair`]. Callers only ever pair up distinct tiles of one type.
pub fn connect(board: &Board, a: Location, b: Location) -> Option<Path> {
    if let Err(reason) = check_pair(board, a, b) {
        panic!("invalid pair request: {reason}");
    }

    if a.is_adjacent_to(b) {
        return Some(Path::through([a, b]));
    }
    if let Some(path) = Axis::VARIANTS.iter().find_map(|axis| axis.straight(board, a, b)) {
        return Some(path);
    }

    let (reach_a, reach_b) = (Reach::of(board, a), Reach::of(board, b));
    Axis::VARIANTS.iter().find_map(|axis| axis.via_shared_line(board, a, b, &reach_a, &reach_b))
}
