#![warn(missing_docs)]

//! # `pairlink`
//!
//! Board recognition and move hints for tile-matching puzzles in the style of lianliankan ("link link see"):
//! two identical tiles may be removed when a path of at most two turns, running only through empty cells, joins them.
//!
//! Start with a [`Recognizer`], built from a [`Geometry`] describing where the board sits in a captured window.
//! Feed it a [`Raster`](raster::Raster) on every refresh to get a [`Board`] of canonical tile ids,
//! then ask a [`HintSelector`] for a legal move, or [`connect`] two tiles yourself.
//! Boards can also be assembled by hand with a [`BoardBuilder`].
//!
//! # Internals
//! Recognition is a fixed perceptual hash: each cell is sampled at a constellation of points, every point is reduced to
//! luminance and thresholded, and the resulting bits are the cell's [`Fingerprint`].
//! Probe points on the tile frame reject background and misaligned cells before hashing.
//!
//! Fingerprints are then grouped. A fingerprint that does not appear a plausible number of times (see [`GroupRule`])
//! is treated as a misread and its cells are emptied, so every surviving tile type has a full set of tiles.
//! Surviving fingerprints receive dense ids in row-major order of first appearance.
//!
//! Boards carry a permanently empty border, so paths may run around the outside of the play area
//! and the solver never needs bounds checks. Restricting paths to two turns means no graph search is needed:
//! two tiles connect exactly when some row (or column) that both can slide to along their own column (or row)
//! is clear between them.

pub use board::{Board, HintView, TileId, EMPTY};
pub use builder::{Builder, BoardBuilder};
pub use canonical::{Canonical, Canonicalizer, GroupRule, RejectedGroup};
pub use fingerprint::{Extractor, Fingerprint, FingerprintGrid};
pub use geometry::{Geometry, SampleEncoding, SamplePlan};
pub use hint::{all_moves, Hint, HintSelector};
pub use location::{Dimension, Location};
pub use recognizer::{Recognizer, RefreshError};
pub use solver::{check_pair, connect, Path, Reach};

pub(crate) mod board;
pub mod builder;
pub(crate) mod canonical;
pub mod error;
pub(crate) mod fingerprint;
pub(crate) mod geometry;
pub(crate) mod hint;
pub(crate) mod location;
pub mod raster;
pub(crate) mod recognizer;
pub(crate) mod solver;
