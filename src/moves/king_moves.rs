//! King movement geometry, including castling.
//!
//! The king walks one square in any direction. Castling is the one move
//! where two pieces relocate: the king slides two files toward an unmoved
//! rook of its own team, with an empty corridor between them, and the king
//! may not castle out of or through an attacked square. Whether the king
//! would *land* attacked is the validator's look-ahead to decide, like for
//! any other move.

use crate::{
    attack_analysis::{is_path_clear, is_square_attacked},
    board_location::BoardLocation,
    chess_board::ChessBoard,
    piece_class::PieceClass,
    piece_record::PieceRecord,
};

/// Whether `start` → `stop` is a single king step (Chebyshev distance one).
pub fn is_king_step(start: BoardLocation, stop: BoardLocation) -> bool {
    let d_file = (stop.file() - start.file()).abs();
    let d_rank = (stop.rank() - start.rank()).abs();
    d_file.max(d_rank) == 1
}

/// Whether the king described by `king` may geometrically move
/// `start` → `stop`: either a one-square step, or a castling slide.
///
/// Castling requires all of:
/// * the king has never moved, and `stop` is exactly two files away on the
///   same rank;
/// * an unmoved rook of the same team stands on the corner file of that
///   rank, with every square between king and rook empty;
/// * neither the king's current square nor the square it slides across is
///   attacked by the opposing team.
pub fn is_geometric_king_move(
    board: &ChessBoard,
    start: BoardLocation,
    stop: BoardLocation,
    king: &PieceRecord,
) -> bool {
    if is_king_step(start, stop) {
        return true;
    }

    let d_file = stop.file() - start.file();
    if king.has_moved || d_file.abs() != 2 || start.rank() != stop.rank() {
        return false;
    }

    // The corresponding rook must be unmoved on its corner square.
    let rook_file = if d_file > 0 { 7 } else { 0 };
    let rook_square = match BoardLocation::from_file_rank(rook_file, start.rank()) {
        Ok(x) => x,
        Err(_) => return false,
    };
    let rook = match board.piece_at(rook_square) {
        Some(piece) => piece,
        None => return false,
    };
    if rook.class != PieceClass::Rook || rook.team != king.team || rook.has_moved {
        return false;
    }

    // Clear corridor between king and rook.
    if !is_path_clear(board, start, rook_square) {
        return false;
    }

    // No castling out of check, and no sliding across an attacked square.
    let transit = match start.offset_by(d_file.signum(), 0) {
        Ok(x) => x,
        Err(_) => return false,
    };
    let enemy = king.team.opponent();
    if is_square_attacked(board, start, enemy) || is_square_attacked(board, transit, enemy) {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{piece_register::PieceRegister, piece_team::PieceTeam};

    fn square(file: i8, rank: i8) -> BoardLocation {
        BoardLocation::from_file_rank(file, rank).unwrap()
    }

    fn castling_board(extra: &[(i8, i8, PieceClass, PieceTeam)]) -> ChessBoard {
        let mut register = PieceRegister::new();
        register
            .add_piece_record(square(4, 0), PieceRecord::new(PieceClass::King, PieceTeam::Light))
            .unwrap();
        register
            .add_piece_record(square(7, 0), PieceRecord::new(PieceClass::Rook, PieceTeam::Light))
            .unwrap();
        register
            .add_piece_record(square(0, 0), PieceRecord::new(PieceClass::Rook, PieceTeam::Light))
            .unwrap();
        for (file, rank, class, team) in extra {
            register
                .add_piece_record(square(*file, *rank), PieceRecord::new(*class, *team))
                .unwrap();
        }
        let mut board = ChessBoard::empty();
        board.set_state(register, None);
        board
    }

    #[test]
    fn one_square_steps_in_every_direction() {
        let e4 = square(4, 3);
        assert!(is_king_step(e4, square(4, 4)));
        assert!(is_king_step(e4, square(3, 2)));
        assert!(!is_king_step(e4, square(4, 5)));
        assert!(!is_king_step(e4, e4));
    }

    #[test]
    fn castling_both_sides_with_clear_corridors() {
        let board = castling_board(&[]);
        let king = *board.piece_at(square(4, 0)).unwrap();
        assert!(is_geometric_king_move(&board, square(4, 0), square(6, 0), &king));
        assert!(is_geometric_king_move(&board, square(4, 0), square(2, 0), &king));
    }

    #[test]
    fn castling_needs_an_empty_corridor() {
        // A bishop on f1 blocks the kingside; a knight on b1 blocks the
        // queenside even though the king never crosses b1.
        let board = castling_board(&[
            (5, 0, PieceClass::Bishop, PieceTeam::Light),
            (1, 0, PieceClass::Knight, PieceTeam::Light),
        ]);
        let king = *board.piece_at(square(4, 0)).unwrap();
        assert!(!is_geometric_king_move(&board, square(4, 0), square(6, 0), &king));
        assert!(!is_geometric_king_move(&board, square(4, 0), square(2, 0), &king));
    }

    #[test]
    fn castling_is_refused_out_of_or_through_check() {
        // A rook on e8 attacks the king's square; one on f8 attacks the
        // transit square.
        let out_of_check = castling_board(&[(4, 7, PieceClass::Rook, PieceTeam::Dark)]);
        let king = *out_of_check.piece_at(square(4, 0)).unwrap();
        assert!(!is_geometric_king_move(&out_of_check, square(4, 0), square(6, 0), &king));

        let through_check = castling_board(&[(5, 7, PieceClass::Rook, PieceTeam::Dark)]);
        assert!(!is_geometric_king_move(&through_check, square(4, 0), square(6, 0), &king));
    }

    #[test]
    fn a_moved_rook_forfeits_castling() {
        let mut board = castling_board(&[]);
        // Walk the kingside rook out and back.
        board.apply_move(square(7, 0), square(7, 3)).unwrap();
        board.apply_move(square(7, 3), square(7, 0)).unwrap();
        let king = *board.piece_at(square(4, 0)).unwrap();
        assert!(!is_geometric_king_move(&board, square(4, 0), square(6, 0), &king));
        // The untouched queenside is still available.
        assert!(is_geometric_king_move(&board, square(4, 0), square(2, 0), &king));
    }
}
