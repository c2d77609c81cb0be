//! The board component.
//!
//! Owns the piece collection and the per-ply en-passant vulnerability, and
//! applies moves together with their side effects: capture removal,
//! en-passant victim removal, automatic queen promotion, and the castling
//! rook relocation. Legality is decided elsewhere; `apply_move` only
//! requires that a piece occupies the start square.

use log::debug;

use crate::{
    board_location::BoardLocation,
    chess_errors::ChessErrors,
    move_record::{CapturedPiece, MoveKind, MoveRecord},
    piece_class::PieceClass,
    piece_register::PieceRegister,
    piece_record::PieceRecord,
    piece_team::PieceTeam,
};

/// Board state: the pieces and the square (if any) a pawn just double-stepped
/// across. Cloning a board is cheap enough that every legality check may take
/// a disposable copy for its hypothetical look-ahead.
#[derive(Clone, Debug, PartialEq)]
pub struct ChessBoard {
    register: PieceRegister,
    /// Square a pawn skipped over on the immediately preceding ply.
    /// Set only by a double step and cleared by the very next applied move,
    /// so en passant is honored against exactly one pawn for exactly one ply.
    en_passant_target: Option<BoardLocation>,
}

impl ChessBoard {
    /// A board holding the standard starting arrangement.
    pub fn new_game() -> Self {
        ChessBoard {
            register: PieceRegister::standard_arrangement(),
            en_passant_target: None,
        }
    }

    /// A board with no pieces, for positions assembled by hand.
    pub fn empty() -> Self {
        ChessBoard {
            register: PieceRegister::new(),
            en_passant_target: None,
        }
    }

    /// Read-only lookup reflecting the latest applied move.
    pub fn piece_at(&self, x: BoardLocation) -> Option<&PieceRecord> {
        self.register.view_piece_at_location(x)
    }

    /// Every (location, piece) pair on the board, in no particular order.
    pub fn pieces(&self) -> impl Iterator<Item = (&BoardLocation, &PieceRecord)> {
        self.register.iter()
    }

    pub fn locate_king(&self, team: PieceTeam) -> Option<BoardLocation> {
        self.register.locate_king(team)
    }

    pub fn en_passant_target(&self) -> Option<BoardLocation> {
        self.en_passant_target
    }

    /// Repopulates the standard starting arrangement, clearing all
    /// moved-flags and the en-passant vulnerability.
    pub fn reset(&mut self) {
        self.register = PieceRegister::standard_arrangement();
        self.en_passant_target = None;
    }

    /// Full state replacement. Used to install a hypothetical or hand-built
    /// snapshot; never part of real game progression.
    pub fn set_state(
        &mut self,
        register: PieceRegister,
        en_passant_target: Option<BoardLocation>,
    ) {
        self.register = register;
        self.en_passant_target = en_passant_target;
    }

    /// Applies `start` → `stop` in place and returns the record of what
    /// happened. The caller is expected to have validated legality first;
    /// the only precondition enforced here is that `start` is occupied.
    ///
    /// Side effects handled in this one call:
    /// * a piece on `stop` is captured and removed;
    /// * a pawn stepping diagonally onto an empty square captures the enemy
    ///   pawn beside its start square (en passant);
    /// * a pawn reaching its farthest rank is promoted to a queen;
    /// * a king moving two files drags the corresponding rook to the square
    ///   beside the king's destination;
    /// * the moved piece's moved-flag is set;
    /// * the en-passant vulnerability is set by a double step and cleared by
    ///   anything else.
    ///
    /// # Returns
    /// * `Ok(MoveRecord)` describing the applied move.
    /// * `Err(ChessErrors::TryToViewOrEditEmptySquare)` if `start` is empty.
    pub fn apply_move(
        &mut self,
        start: BoardLocation,
        stop: BoardLocation,
    ) -> Result<MoveRecord, ChessErrors> {
        let moved = match self.register.view_piece_at_location(start) {
            Some(piece) => *piece,
            None => {
                debug!("apply_move with empty start square {start}");
                return Err(ChessErrors::TryToViewOrEditEmptySquare(start));
            }
        };

        let d_file = stop.file() - start.file();
        let d_rank = stop.rank() - start.rank();
        let mut kind = MoveKind::Regular;

        // Capture: whatever occupies the destination, or for a pawn arriving
        // diagonally on an empty square, the enemy pawn beside the start
        // square. The latter path only records the capture; eligibility was
        // the validator's decision.
        let mut captured: Option<CapturedPiece> = None;
        if let Some(target) = self.register.view_piece_at_location(stop) {
            captured = Some(CapturedPiece {
                location: stop,
                record: *target,
            });
        } else if moved.class == PieceClass::Pawn && d_file.abs() == 1 && d_rank.abs() == 1 {
            let victim_square = BoardLocation::from_file_rank(stop.file(), start.rank())?;
            if let Some(victim) = self.register.view_piece_at_location(victim_square) {
                if victim.class == PieceClass::Pawn && victim.team != moved.team {
                    captured = Some(CapturedPiece {
                        location: victim_square,
                        record: *victim,
                    });
                    kind = MoveKind::EnPassant;
                }
            }
        }
        if let Some(capture) = captured {
            self.register.remove_piece_at_location(capture.location)?;
        }

        // Relocate the mover and set its moved-flag permanently.
        let mut record_after = moved;
        record_after.has_moved = true;

        // A pawn on its farthest rank is always promoted to a queen.
        if moved.class == PieceClass::Pawn && stop.rank() == moved.team.promotion_rank() {
            record_after.class = PieceClass::Queen;
            kind = MoveKind::Promotion(PieceClass::Queen);
        }

        self.register.remove_piece_at_location(start)?;
        self.register.add_piece_record(stop, record_after)?;

        // A king moving exactly two files castles; the rook hops to the
        // square beside the king's destination in this same call.
        if moved.class == PieceClass::King && d_file.abs() == 2 && d_rank == 0 {
            let rook_file = if d_file > 0 { 7 } else { 0 };
            let rook_start = BoardLocation::from_file_rank(rook_file, start.rank())?;
            let rook_stop = stop.offset_by(-d_file.signum(), 0)?;
            let mut rook = self.register.remove_piece_at_location(rook_start)?;
            rook.has_moved = true;
            self.register.add_piece_record(rook_stop, rook)?;
            kind = MoveKind::Castling {
                rook_start,
                rook_stop,
            };
        }

        // A pawn double step leaves the skipped square vulnerable.
        if moved.class == PieceClass::Pawn && d_file == 0 && d_rank.abs() == 2 {
            let behind = BoardLocation::from_file_rank(
                start.file(),
                (start.rank() + stop.rank()) / 2,
            )?;
            kind = MoveKind::DoubleStep(behind);
        }

        // The vulnerability lasts exactly one ply.
        self.en_passant_target = match kind {
            MoveKind::DoubleStep(behind) => Some(behind),
            _ => None,
        };

        Ok(MoveRecord {
            start,
            stop,
            moved,
            captured,
            kind,
        })
    }
}

impl Default for ChessBoard {
    fn default() -> Self {
        ChessBoard::new_game()
    }
}
