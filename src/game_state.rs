//! The game state machine.
//!
//! Owns turn order, the move history, and the derived status. This is the
//! only component that mutates turn-level state: it asks the validator for
//! a verdict, instructs the board to apply the move, appends the record,
//! flips the side to move, and recomputes the status from scratch.
//!
//! The one asynchronous concern, the external move-suggestion oracle, also
//! terminates here: the game serializes its position, forwards it to an
//! injected `MoveOracle`, tracks the single outstanding request, and checks
//! every late answer for staleness before letting it move a piece.

use std::fmt;

use log::warn;

use crate::{
    attack_analysis,
    board_location::BoardLocation,
    chess_board::ChessBoard,
    chess_errors::ChessErrors,
    game_status::GameStatus,
    move_record::MoveRecord,
    move_validator,
    oracle::oracle_trait::{MoveOracle, OracleFailure, OraclePoll, SuggestedMove},
    piece_class::PieceClass,
    piece_record::PieceRecord,
    piece_register::PieceRegister,
    piece_team::PieceTeam,
    utils::{position_notation, render_game_state},
};

/// Bookkeeping for the one oracle request a game may have outstanding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PendingOracleRequest {
    /// Which side the oracle is answering for.
    seat: PieceTeam,
    /// The game's reset epoch when the request was issued. An answer from
    /// before a reset no longer matches and is discarded.
    epoch: u32,
}

/// What one oracle poll did to the game.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleOutcome {
    /// The request has not resolved yet.
    Pending,
    /// The suggestion was legal and has been applied.
    Applied(MoveRecord),
    /// The suggestion was stale (reset, turn change, or game over) and was
    /// discarded without touching the board.
    DiscardedStale,
    /// The suggestion named an illegal move; the side does not move.
    RejectedIllegal(SuggestedMove),
    /// The request resolved in failure; the side does not move.
    Failed(OracleFailure),
}

/// A complete game: board, turn order, history, status, and the oracle
/// awaiting flag. Each instance is independent; nothing in the engine is
/// process-wide.
pub struct GameState {
    board: ChessBoard,
    turn: PieceTeam,
    status: GameStatus,
    history: Vec<MoveRecord>,
    half_move_clock: u16,
    full_move_count: u16,
    pending_oracle: Option<PendingOracleRequest>,
    reset_epoch: u32,
}

impl GameState {
    /// A fresh game: standard arrangement, Light to move, active status.
    pub fn new_game() -> Self {
        GameState {
            board: ChessBoard::new_game(),
            turn: PieceTeam::Light,
            status: GameStatus::Active,
            history: Vec::new(),
            half_move_clock: 0,
            full_move_count: 1,
            pending_oracle: None,
            reset_epoch: 0,
        }
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn turn(&self) -> PieceTeam {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The applied moves in order, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn half_move_clock(&self) -> u16 {
        self.half_move_clock
    }

    pub fn full_move_count(&self) -> u16 {
        self.full_move_count
    }

    /// Read-only piece lookup on the live board.
    pub fn piece_at(&self, x: BoardLocation) -> Option<&PieceRecord> {
        self.board.piece_at(x)
    }

    /// Every (location, piece) pair on the live board.
    pub fn pieces(&self) -> impl Iterator<Item = (&BoardLocation, &PieceRecord)> {
        self.board.pieces()
    }

    /// Whether an oracle request is outstanding for the side to move.
    pub fn awaiting_oracle(&self) -> bool {
        self.pending_oracle.is_some()
    }

    /// Attempts `start` → `stop` for the side to move.
    ///
    /// Fails silently, returning `false` with no mutation, when the game is
    /// over, when an oracle request is outstanding for the side to move, or
    /// when the validator rejects the move. On success the move is applied,
    /// recorded, the turn flips, and the status is recomputed.
    pub fn make_move(&mut self, start: BoardLocation, stop: BoardLocation) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        // The oracle's seat is spoken for until its request resolves;
        // accepting a human move now could produce two moves for one ply.
        if self
            .pending_oracle
            .map_or(false, |pending| pending.seat == self.turn)
        {
            return false;
        }
        self.commit_move(start, stop).is_some()
    }

    /// Every destination the piece on `from` may legally reach for the side
    /// to move. Empty when the square is empty, the piece belongs to the
    /// opponent, no destination is legal, or the game is over.
    pub fn possible_moves(&self, from: BoardLocation) -> Vec<BoardLocation> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        move_validator::possible_destinations(&self.board, from, self.turn)
    }

    /// True iff `team`'s king is attacked on the live board.
    pub fn is_in_check(&self, team: PieceTeam) -> bool {
        attack_analysis::is_king_in_check(&self.board, team)
    }

    /// True iff `team` is in check with no legal move on the live board.
    pub fn is_checkmate(&self, team: PieceTeam) -> bool {
        move_validator::is_checkmate(&self.board, team)
    }

    /// Restores the initial state: standard arrangement, Light to move,
    /// empty history, cleared counters. Any outstanding oracle request is
    /// abandoned; its answer, should it still arrive, will be discarded.
    pub fn reset(&mut self) {
        self.board.reset();
        self.turn = PieceTeam::Light;
        self.status = GameStatus::Active;
        self.history.clear();
        self.half_move_clock = 0;
        self.full_move_count = 1;
        self.pending_oracle = None;
        self.reset_epoch += 1;
    }

    /// Declares the game drawn. The transition function never derives a
    /// draw; this external call is the only road in, and it is terminal.
    pub fn declare_draw(&mut self) {
        self.status = GameStatus::Draw;
    }

    /// Installs an arbitrary position. The history and counters restart and
    /// the status is recomputed for the new side to move. Intended for
    /// tests and for the position-text parser, not for game progression.
    pub fn set_position(
        &mut self,
        register: PieceRegister,
        en_passant_target: Option<BoardLocation>,
        turn: PieceTeam,
    ) {
        self.board.set_state(register, en_passant_target);
        self.turn = turn;
        self.history.clear();
        self.half_move_clock = 0;
        self.full_move_count = 1;
        self.pending_oracle = None;
        self.reset_epoch += 1;
        self.status = Self::derive_status(&self.board, turn);
    }

    pub(crate) fn set_move_counters(&mut self, half_move_clock: u16, full_move_count: u16) {
        self.half_move_clock = half_move_clock;
        self.full_move_count = full_move_count;
    }

    /// Serializes the current position and forwards it to the oracle.
    ///
    /// # Returns
    /// * `Ok(())` once the request is in flight.
    /// * `Err(ChessErrors::GameAlreadyOver)` on a finished game.
    /// * `Err(ChessErrors::OracleRequestAlreadyPending)` while an earlier
    ///   request is outstanding. A game permits exactly one.
    /// * Any error the oracle itself raised.
    pub fn request_oracle_move(
        &mut self,
        oracle: &mut dyn MoveOracle,
    ) -> Result<(), ChessErrors> {
        if self.status.is_terminal() {
            return Err(ChessErrors::GameAlreadyOver);
        }
        if self.pending_oracle.is_some() {
            return Err(ChessErrors::OracleRequestAlreadyPending);
        }
        let position_text = position_notation::generate_position_text(self);
        oracle.request_suggestion(&position_text)?;
        self.pending_oracle = Some(PendingOracleRequest {
            seat: self.turn,
            epoch: self.reset_epoch,
        });
        Ok(())
    }

    /// Polls the oracle once and settles the outcome against the current
    /// game. A suggestion is applied only if the request is still the
    /// outstanding one, it is still that seat's turn, and the game is not
    /// over; anything else is discarded as stale. Failures cost the side
    /// its suggestion but never corrupt board state or turn order.
    pub fn poll_oracle(&mut self, oracle: &mut dyn MoveOracle) -> OracleOutcome {
        match oracle.poll_suggestion() {
            OraclePoll::Pending => OracleOutcome::Pending,
            OraclePoll::Suggestion(suggestion) => {
                let pending = match self.pending_oracle.take() {
                    Some(pending) => pending,
                    None => {
                        warn!(
                            "discarding oracle suggestion {}{}: no request is outstanding",
                            suggestion.start, suggestion.stop
                        );
                        return OracleOutcome::DiscardedStale;
                    }
                };
                if pending.epoch != self.reset_epoch
                    || pending.seat != self.turn
                    || self.status.is_terminal()
                {
                    warn!(
                        "discarding stale oracle suggestion {}{}",
                        suggestion.start, suggestion.stop
                    );
                    return OracleOutcome::DiscardedStale;
                }
                match self.commit_move(suggestion.start, suggestion.stop) {
                    Some(record) => OracleOutcome::Applied(record),
                    None => {
                        warn!(
                            "oracle suggested the illegal move {}{}; the side does not move",
                            suggestion.start, suggestion.stop
                        );
                        OracleOutcome::RejectedIllegal(suggestion)
                    }
                }
            }
            OraclePoll::Failure(failure) => {
                self.pending_oracle = None;
                warn!("oracle request failed: {failure}");
                OracleOutcome::Failed(failure)
            }
        }
    }

    /// Validates and applies one move for the side to move. Shared by the
    /// human path and the oracle path; all turn-level bookkeeping is here.
    fn commit_move(&mut self, start: BoardLocation, stop: BoardLocation) -> Option<MoveRecord> {
        if !move_validator::is_valid_move(&self.board, start, stop, self.turn) {
            return None;
        }
        let record = match self.board.apply_move(start, stop) {
            Ok(record) => record,
            Err(_) => return None,
        };

        // Pawn moves and captures restart the halfmove clock.
        if record.moved.class == PieceClass::Pawn || record.captured.is_some() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }
        if self.turn == PieceTeam::Dark {
            self.full_move_count += 1;
        }

        self.history.push(record);
        self.turn = self.turn.opponent();
        self.status = Self::derive_status(&self.board, self.turn);
        Some(record)
    }

    /// Status is a pure function of (board, side to move):
    /// in check without a legal move is checkmate, in check otherwise is
    /// check; no check and no legal move is stalemate, anything else is
    /// active. A draw never comes out of here.
    fn derive_status(board: &ChessBoard, to_move: PieceTeam) -> GameStatus {
        let in_check = attack_analysis::is_king_in_check(board, to_move);
        let any_move = move_validator::has_any_legal_move(board, to_move);
        match (in_check, any_move) {
            (true, false) => GameStatus::Checkmate,
            (true, true) => GameStatus::Check,
            (false, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::Active,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new_game()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render_game_state::render_game_state(self))
    }
}
