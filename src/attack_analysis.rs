//! Geometric attack analysis over a board snapshot.
//!
//! Everything here is a pure function of the board it is handed, which may
//! be the live board or a disposable clone under hypothetical mutation.
//! "Attacked" is geometry only: a square is attacked by a team if some piece
//! of that team could reach it under the piece's raw movement rule,
//! irrespective of whether actually making that move would be legal.

use log::warn;

use crate::{
    board_location::BoardLocation,
    chess_board::ChessBoard,
    moves::{bishop_moves, king_moves, knight_moves, pawn_moves, queen_moves, rook_moves},
    piece_class::PieceClass,
    piece_record::PieceRecord,
    piece_team::PieceTeam,
};

/// True iff any piece of `attacker` on `board` attacks `square`.
pub fn is_square_attacked(
    board: &ChessBoard,
    square: BoardLocation,
    attacker: PieceTeam,
) -> bool {
    board.pieces().any(|(location, piece)| {
        piece.team == attacker && piece_attacks_square(board, *location, piece, square)
    })
}

/// Whether one specific piece attacks `target` from `from`.
fn piece_attacks_square(
    board: &ChessBoard,
    from: BoardLocation,
    piece: &PieceRecord,
    target: BoardLocation,
) -> bool {
    match piece.class {
        PieceClass::Pawn => pawn_moves::is_pawn_attack(from, target, piece.team),
        PieceClass::Knight => knight_moves::is_knight_step(from, target),
        PieceClass::Bishop => {
            bishop_moves::is_bishop_line(from, target) && is_path_clear(board, from, target)
        }
        PieceClass::Rook => {
            rook_moves::is_rook_line(from, target) && is_path_clear(board, from, target)
        }
        PieceClass::Queen => {
            queen_moves::is_queen_line(from, target) && is_path_clear(board, from, target)
        }
        PieceClass::King => king_moves::is_king_step(from, target),
    }
}

/// True iff `team`'s king is attacked on `board`.
///
/// A board without that king reports not-in-check: such a state is
/// structurally unreachable through move application, so the safe default
/// beats a fault.
pub fn is_king_in_check(board: &ChessBoard, team: PieceTeam) -> bool {
    match board.locate_king(team) {
        Some(king_square) => is_square_attacked(board, king_square, team.opponent()),
        None => {
            warn!("check analysis found no {team:?} king on the board");
            false
        }
    }
}

/// A path is clear iff no square strictly between the endpoints holds a
/// piece. The endpoints themselves are never inspected. Walks by the unit
/// step vector toward `stop`, so the caller must hand in two squares that
/// share a rank, file, or diagonal.
pub fn is_path_clear(board: &ChessBoard, start: BoardLocation, stop: BoardLocation) -> bool {
    let d_file = (stop.file() - start.file()).signum();
    let d_rank = (stop.rank() - start.rank()).signum();
    let mut cursor = start;
    loop {
        cursor = match cursor.offset_by(d_file, d_rank) {
            Ok(next) => next,
            Err(_) => return false,
        };
        if cursor == stop {
            return true;
        }
        if board.piece_at(cursor).is_some() {
            return false;
        }
    }
}
