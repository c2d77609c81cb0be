//! Errors used throughout the rules engine.
//!
//! This module defines the canonical error type returned by board
//! manipulation, notation parsing, and the oracle boundary. The enum
//! `ChessErrors` is the single error type across the crate so callers can
//! propagate with `?` and match on one taxonomy. Legality questions are
//! deliberately not errors: the validator and the game state machine answer
//! those with booleans and empty results.

use thiserror::Error;

use crate::board_location::BoardLocation;

/// Unified error type for the rules engine.
///
/// Each variant corresponds to a specific, identifiable failure mode and
/// carries contextual payload where useful so callers can log or display
/// precise diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// File or rank indices outside 0..=7 were used to name a square.
    #[error("file or rank out of range: ({0}, {1})")]
    InvalidFileOrRank(i8, i8),

    /// Stepping a location by the delta `(d_file, d_rank)` would leave the
    /// board.
    ///
    /// Payload: (origin location, d_file, d_rank)
    #[error("stepping by ({1}, {2}) from {0} leaves the board")]
    TriedToMoveOutOfBounds(BoardLocation, i8, i8),

    /// Attempted to view or edit a square that holds no piece.
    #[error("no piece occupies {0}")]
    TryToViewOrEditEmptySquare(BoardLocation),

    /// Attempted to remove a piece from an empty square.
    #[error("cannot remove a piece from empty square {0}")]
    CannotRemoveFromEmptyLocation(BoardLocation),

    /// Attempted to place a piece on an occupied square. Two pieces may
    /// never share a coordinate.
    #[error("square {0} is already occupied")]
    LocationAlreadyOccupied(BoardLocation),

    /// A single character used during algebraic parsing was invalid.
    #[error("invalid algebraic character {0:?}")]
    InvalidAlgebraicChar(char),

    /// An algebraic string failed to parse as a square or a move.
    #[error("invalid algebraic string {0:?}")]
    InvalidAlgebraicString(String),

    /// A position descriptor string had malformed structure.
    #[error("invalid position descriptor {0:?}")]
    InvalidPositionText(String),

    /// An oracle request was issued while a previous one is still
    /// outstanding. A game permits exactly one in-flight request.
    #[error("an oracle request is already outstanding")]
    OracleRequestAlreadyPending,

    /// The oracle cannot accept requests (worker lost or never started).
    #[error("the oracle is not able to accept requests")]
    OracleNotAvailable,

    /// A move or oracle request was issued after the game reached a
    /// terminal status.
    #[error("the game is over; no further moves are accepted")]
    GameAlreadyOver,
}
