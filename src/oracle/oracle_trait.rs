//! Move-suggestion oracle abstraction.
//!
//! The rules engine treats "give me a best move for this position" as an
//! opaque capability outside its trust boundary. An oracle receives a
//! position descriptor as text, works asynchronously, and later resolves
//! with a (from, to) pair or a failure. The game state machine owns the
//! turn-order consequences; implementors only answer positions.
//!
//! Typical usage:
//! - Construct a concrete implementor (e.g., `RandomOracle::new()`).
//! - Hand it to `GameState::request_oracle_move`, which serializes the
//!   position and calls `request_suggestion`.
//! - Poll through `GameState::poll_oracle` until the request resolves.
//!
//! Exactly one request may be in flight per oracle; `request_suggestion`
//! must refuse overlap so one ply can never receive two answers.

use thiserror::Error;

use crate::{board_location::BoardLocation, chess_errors::ChessErrors};

/// Where an oracle is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OracleLifecycle {
    /// Ready to accept a request.
    Idle,
    /// A request is outstanding and has not resolved yet.
    InFlight,
    /// The oracle can no longer serve requests (worker lost).
    Failed,
}

/// A (from, to) pair suggested by an oracle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SuggestedMove {
    pub start: BoardLocation,
    pub stop: BoardLocation,
}

/// Why an oracle request resolved without a usable move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleFailure {
    /// No answer arrived within the adapter's deadline.
    #[error("the oracle did not answer within its deadline")]
    Timeout,
    /// The oracle answered, but the text was not a move.
    #[error("the oracle answered with unusable text {0:?}")]
    Malformed(String),
    /// The transport to the oracle broke down.
    #[error("the oracle transport failed: {0}")]
    Transport(String),
    /// The oracle had no move to offer for the position.
    #[error("the oracle found no move to suggest")]
    NoMoveAvailable,
}

/// One non-blocking look at an outstanding request.
#[derive(Debug, Clone, PartialEq)]
pub enum OraclePoll {
    /// Nothing has resolved yet (or nothing was asked).
    Pending,
    /// The oracle proposed a move.
    Suggestion(SuggestedMove),
    /// The request resolved without a move.
    Failure(OracleFailure),
}

/// The move-suggestion capability the game depends on abstractly.
pub trait MoveOracle {
    /// Current lifecycle state.
    fn lifecycle(&self) -> OracleLifecycle;

    /// Submits a position descriptor for evaluation.
    ///
    /// # Returns
    /// * `Ok(())` once the request is accepted.
    /// * `Err(ChessErrors::OracleRequestAlreadyPending)` while a previous
    ///   request has not resolved.
    /// * `Err(ChessErrors::OracleNotAvailable)` if the oracle is failed.
    fn request_suggestion(&mut self, position_text: &str) -> Result<(), ChessErrors>;

    /// Non-blocking poll of the outstanding request. Returns
    /// `OraclePoll::Pending` until the request resolves; a resolution is
    /// handed out exactly once, after which the oracle is idle again.
    fn poll_suggestion(&mut self) -> OraclePoll;
}
