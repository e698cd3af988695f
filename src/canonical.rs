use std::collections::HashMap;

use ndarray::Array2;
use strum::{Display, EnumString};
use tracing::debug;

use crate::board::{default_display, Board, TileId, EMPTY};
use crate::fingerprint::{Fingerprint, FingerprintGrid};

/// Which fingerprint counts are believable as a set of matching tiles.
#[derive(Copy, Clone, Debug, Default, Display, EnumString, Eq, PartialEq, Hash)]
#[strum(serialize_all = "kebab-case")]
pub enum GroupRule {
    /// A fingerprint must appear exactly group-size times, and that must be even.
    #[default]
    Exact,
    /// A fingerprint must appear an even number of times, at most group-size.
    /// Keeps the remaining pairs of a partially cleared board.
    EvenAtMost,
}

impl GroupRule {
    fn accepts(&self, count: usize, group_size: usize) -> bool {
        match self {
            Self::Exact => count % 2 == 0 && count == group_size,
            Self::EvenAtMost => count % 2 == 0 && count <= group_size,
        }
    }
}

/// A fingerprint thrown out because it appeared an implausible number of times.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RejectedGroup {
    /// The fingerprint that was dropped.
    pub fingerprint: Fingerprint,
    /// How many cells carried it.
    pub count: usize,
}

/// The outcome of one canonicalization pass.
#[derive(Clone, Debug)]
pub struct Canonical {
    /// The recognized board; [`Board::type_count`] is 0 if nothing was recognized.
    pub board: Board,
    /// Groups forced to empty, in the order they were first met.
    pub rejected: Vec<RejectedGroup>,
}

// state for a single pass; never outlives `canonicalize`
struct CanonicalContext {
    counts: HashMap<Fingerprint, usize>,
    assigned: HashMap<Fingerprint, TileId>,
    next_id: TileId,
    rejected: Vec<RejectedGroup>,
}

impl CanonicalContext {
    fn tally(grid: &FingerprintGrid) -> Self {
        let mut counts = HashMap::new();
        for fingerprint in grid.cells.iter().filter(|fingerprint| !fingerprint.is_empty()) {
            *counts.entry(*fingerprint).or_insert(0) += 1;
        }

        Self {
            counts,
            assigned: HashMap::new(),
            next_id: 1,
            rejected: Vec::new(),
        }
    }

    fn id_for(&mut self, fingerprint: Fingerprint, rule: GroupRule, group_size: usize) -> TileId {
        if fingerprint.is_empty() {
            return EMPTY;
        }
        if let Some(id) = self.assigned.get(&fingerprint) {
            return *id;
        }

        let count = self.counts.get(&fingerprint).copied().unwrap_or(0);
        if !rule.accepts(count, group_size) {
            if !self.rejected.iter().any(|group| group.fingerprint == fingerprint) {
                debug!(%fingerprint, count, "rejecting ambiguous tile group");
                self.rejected.push(RejectedGroup { fingerprint, count });
            }
            return EMPTY;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.assigned.insert(fingerprint, id);
        id
    }
}

/// Turns raw fingerprints into a [`Board`] of dense tile ids.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Canonicalizer {
    /// How many copies of each tile a full board holds.
    pub group_size: usize,
    /// Which counts are kept.
    pub rule: GroupRule,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self { group_size: 4, rule: GroupRule::default() }
    }
}

impl Canonicalizer {
    /// Assign ids in row-major first-seen order, emptying every cell whose fingerprint count breaks [`Self::rule`].
    ///
    /// Never fails: an unrecognizable capture gives an all-empty board with a type count of 0.
    pub fn canonicalize(&self, grid: &FingerprintGrid) -> Canonical {
        let mut context = CanonicalContext::tally(grid);
        let mut cells = Array2::from_elem(grid.cells.raw_dim(), EMPTY);
        for (index, fingerprint) in grid.cells.indexed_iter() {
            cells[index] = context.id_for(*fingerprint, self.rule, self.group_size);
        }

        let type_count = context.next_id - 1;
        debug!(type_count, rejected = context.rejected.len(), "canonicalized board");

        Canonical {
            board: Board {
                cells,
                type_count,
                displays: (EMPTY..=type_count).map(default_display).collect(),
            },
            rejected: context.rejected,
        }
    }
}
