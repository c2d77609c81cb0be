//! Pawn movement geometry.
//!
//! Pawns are the one piece whose pushing squares and attacking squares
//! differ: they push straight ahead but capture diagonally forward, and the
//! diagonal is also where en passant lives. The en-passant test here honors
//! only the board's current vulnerability square, which exists for exactly
//! one ply after a double step.

use crate::{
    board_location::BoardLocation, chess_board::ChessBoard, piece_team::PieceTeam,
};

/// Whether a pawn of `team` may geometrically move `start` → `stop`.
///
/// Covers the single forward step, the double step from the pawn rank, the
/// diagonal capture, and the en-passant capture. Check safety is not
/// considered here.
pub fn is_geometric_pawn_move(
    board: &ChessBoard,
    start: BoardLocation,
    stop: BoardLocation,
    team: PieceTeam,
) -> bool {
    let direction = team.forward_direction();
    let d_file = stop.file() - start.file();
    let d_rank = stop.rank() - start.rank();

    // Single forward step into an empty square.
    if d_file == 0 && d_rank == direction {
        return board.piece_at(stop).is_none();
    }

    // Double step from the pawn rank; both the skipped square and the
    // destination must be empty.
    if d_file == 0 && d_rank == 2 * direction && start.rank() == team.pawn_rank() {
        let skipped = match start.offset_by(0, direction) {
            Ok(x) => x,
            Err(_) => return false,
        };
        return board.piece_at(skipped).is_none() && board.piece_at(stop).is_none();
    }

    // Diagonal: an enemy capture, or en passant onto the vulnerable square.
    if d_file.abs() == 1 && d_rank == direction {
        if let Some(target) = board.piece_at(stop) {
            return target.team != team;
        }
        return board.en_passant_target() == Some(stop);
    }

    false
}

/// Whether a pawn of `team` standing on `start` attacks `target`.
/// Pawns attack only their two forward diagonals, never their pushing squares.
pub fn is_pawn_attack(start: BoardLocation, target: BoardLocation, team: PieceTeam) -> bool {
    (target.file() - start.file()).abs() == 1
        && target.rank() - start.rank() == team.forward_direction()
}
