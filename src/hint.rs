use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;
use unordered_pair::UnorderedPair;

use crate::board::{Board, TileId};
use crate::location::Location;
use crate::solver::{connect, Path};

/// A legal move: two tiles of one type and the route joining them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Hint {
    /// The tile type being matched.
    pub tile: TileId,
    /// Where the two tiles sit.
    pub pair: UnorderedPair<Location>,
    /// Starts at the earlier tile of the pair in row-major order.
    pub path: Path,
}

// pairs within a group, in the group's own order
fn first_connectable(board: &Board, tile: TileId, locations: &[Location]) -> Option<Hint> {
    locations.iter()
        .tuple_combinations()
        .find_map(|(a, b)| connect(board, *a, *b).map(|path| Hint {
            tile,
            pair: UnorderedPair(*a, *b),
            path,
        }))
}

fn checked_groups(board: &Board) -> Vec<(TileId, Vec<Location>)> {
    let groups = board.groups();
    assert_eq!(
        groups.len(),
        board.type_count(),
        "board holds {} tile types but was built with {}",
        groups.len(),
        board.type_count()
    );
    groups
}

/// Picks a legal move, visiting tile types in a random order so repeated requests on an unchanged board vary.
pub struct HintSelector<R: Rng> {
    rng: R,
}

impl HintSelector<StdRng> {
    /// A selector with a reproducible shuffle.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HintSelector<R> {
    /// A selector drawing its shuffles from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// The first connectable pair of the first tile type, in shuffled order, that has one.
    ///
    /// `None` means the board has no legal move, which is a real outcome and not an error.
    ///
    /// # Panics
    /// If the board's groups disagree with its [`type_count`](Board::type_count), i.e. it was assembled inconsistently.
    pub fn next_hint(&mut self, board: &Board) -> Option<Hint> {
        let mut groups = checked_groups(board);
        groups.shuffle(&mut self.rng);

        let hint = groups.iter().find_map(|(tile, locations)| first_connectable(board, *tile, locations));
        match &hint {
            Some(hint) => debug!(tile = hint.tile, turns = hint.path.turns(), "found hint"),
            None => debug!(types = groups.len(), "no hint available"),
        }
        hint
    }
}

/// Every connectable pair on the board, grouped by tile id in id order.
pub fn all_moves(board: &Board) -> Vec<Hint> {
    checked_groups(board).iter()
        .flat_map(|(tile, locations)| locations.iter()
            .tuple_combinations()
            .filter_map(move |(a, b)| connect(board, *a, *b).map(|path| Hint {
                tile: *tile,
                pair: UnorderedPair(*a, *b),
                path,
            })))
        .collect_vec()
}
