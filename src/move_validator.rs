//! The move validator.
//!
//! Composes per-piece movement geometry with the check-safety gate to
//! produce a single legality verdict for a (from, to, mover) triple. The
//! gate works on a hypothetical board: clone, apply the candidate, and ask
//! the attack analyzer whether the mover's own king ended up attacked. The
//! live board is never touched here.

use crate::{
    attack_analysis,
    board_location::BoardLocation,
    chess_board::ChessBoard,
    moves::{bishop_moves, king_moves, knight_moves, pawn_moves, queen_moves, rook_moves},
    piece_class::PieceClass,
    piece_team::PieceTeam,
};

/// Decides whether `mover` may play `start` → `stop` on `board`.
///
/// Checks run cheapest first and short-circuit:
/// 1. a piece of `mover` occupies `start`;
/// 2. `stop` does not hold a piece of the same team;
/// 3. the piece's own movement geometry permits the step;
/// 4. applying the move on a cloned board does not leave the mover's king
///    attacked.
///
/// Coordinate range needs no check of its own: a `BoardLocation` cannot
/// name a square off the board.
pub fn is_valid_move(
    board: &ChessBoard,
    start: BoardLocation,
    stop: BoardLocation,
    mover: PieceTeam,
) -> bool {
    let piece = match board.piece_at(start) {
        Some(piece) => *piece,
        None => return false,
    };
    if piece.team != mover {
        return false;
    }
    if let Some(target) = board.piece_at(stop) {
        if target.team == mover {
            return false;
        }
    }

    let geometry_permits = match piece.class {
        PieceClass::Pawn => pawn_moves::is_geometric_pawn_move(board, start, stop, piece.team),
        PieceClass::Knight => knight_moves::is_knight_step(start, stop),
        PieceClass::Bishop => bishop_moves::is_geometric_bishop_move(board, start, stop),
        PieceClass::Rook => rook_moves::is_geometric_rook_move(board, start, stop),
        PieceClass::Queen => queen_moves::is_geometric_queen_move(board, start, stop),
        PieceClass::King => king_moves::is_geometric_king_move(board, start, stop, &piece),
    };
    if !geometry_permits {
        return false;
    }

    // Check-safety gate: try the move on a clone and look at the outcome.
    // A move that leaves or puts the mover's own king in check is illegal
    // no matter how sound its geometry was.
    let mut lookahead = board.clone();
    if lookahead.apply_move(start, stop).is_err() {
        return false;
    }
    !attack_analysis::is_king_in_check(&lookahead, mover)
}

/// Every destination square `mover` may legally reach from `start`.
/// Empty when `start` is empty, holds an opposing piece, or the piece has
/// no legal destination. The scan order is fixed, so two calls on the same
/// board return identical lists.
pub fn possible_destinations(
    board: &ChessBoard,
    start: BoardLocation,
    mover: PieceTeam,
) -> Vec<BoardLocation> {
    BoardLocation::all_squares()
        .filter(|stop| is_valid_move(board, start, *stop, mover))
        .collect()
}

/// Every legal (start, stop) pair for `team`, found by running the
/// single-move validator over the full destination grid of every piece.
pub fn all_legal_moves(
    board: &ChessBoard,
    team: PieceTeam,
) -> Vec<(BoardLocation, BoardLocation)> {
    let own_pieces: Vec<BoardLocation> = board
        .pieces()
        .filter(|(_, piece)| piece.team == team)
        .map(|(location, _)| *location)
        .collect();

    let mut legal = Vec::new();
    for start in own_pieces {
        for stop in possible_destinations(board, start, team) {
            legal.push((start, stop));
        }
    }
    legal
}

/// True iff some piece of `team` has at least one legal destination.
pub fn has_any_legal_move(board: &ChessBoard, team: PieceTeam) -> bool {
    let own_pieces: Vec<BoardLocation> = board
        .pieces()
        .filter(|(_, piece)| piece.team == team)
        .map(|(location, _)| *location)
        .collect();

    own_pieces.into_iter().any(|start| {
        BoardLocation::all_squares().any(|stop| is_valid_move(board, start, stop, team))
    })
}

/// True iff `team` is in check and owns no legal move at all.
pub fn is_checkmate(board: &ChessBoard, team: PieceTeam) -> bool {
    attack_analysis::is_king_in_check(board, team) && !has_any_legal_move(board, team)
}

/// True iff `team` is NOT in check and still owns no legal move.
pub fn is_stalemate(board: &ChessBoard, team: PieceTeam) -> bool {
    !attack_analysis::is_king_in_check(board, team) && !has_any_legal_move(board, team)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{piece_record::PieceRecord, piece_register::PieceRegister};

    fn square(file: i8, rank: i8) -> BoardLocation {
        BoardLocation::from_file_rank(file, rank).unwrap()
    }

    fn board_with(pieces: &[(i8, i8, PieceClass, PieceTeam)]) -> ChessBoard {
        let mut register = PieceRegister::new();
        for (file, rank, class, team) in pieces {
            register
                .add_piece_record(square(*file, *rank), PieceRecord::new(*class, *team))
                .unwrap();
        }
        let mut board = ChessBoard::empty();
        board.set_state(register, None);
        board
    }

    #[test]
    fn rejects_empty_start_and_wrong_team() {
        let board = ChessBoard::new_game();
        assert!(!is_valid_move(&board, square(4, 4), square(4, 5), PieceTeam::Light));
        // A dark pawn is not light's to move.
        assert!(!is_valid_move(&board, square(4, 6), square(4, 5), PieceTeam::Light));
    }

    #[test]
    fn rejects_a_destination_held_by_a_teammate() {
        let board = ChessBoard::new_game();
        // Rook a1 onto pawn a2.
        assert!(!is_valid_move(&board, square(0, 0), square(0, 1), PieceTeam::Light));
    }

    #[test]
    fn a_pinned_piece_may_not_expose_its_king() {
        // Light king e1, light bishop e2, dark rook e8. The bishop is
        // pinned to the file and may not step away.
        let board = board_with(&[
            (4, 0, PieceClass::King, PieceTeam::Light),
            (4, 1, PieceClass::Bishop, PieceTeam::Light),
            (4, 7, PieceClass::Rook, PieceTeam::Dark),
        ]);
        assert!(!is_valid_move(&board, square(4, 1), square(3, 2), PieceTeam::Light));
        // Along the pin line there is nothing legal for a bishop either,
        // but the king itself may step aside.
        assert!(is_valid_move(&board, square(4, 0), square(3, 0), PieceTeam::Light));
    }

    #[test]
    fn while_in_check_only_resolving_moves_are_legal() {
        // Light king e1 in check from the e8 rook; the a2 pawn push does
        // nothing about it and must be rejected even though the push
        // itself is geometrically sound.
        let board = board_with(&[
            (4, 0, PieceClass::King, PieceTeam::Light),
            (0, 1, PieceClass::Pawn, PieceTeam::Light),
            (4, 7, PieceClass::Rook, PieceTeam::Dark),
        ]);
        assert!(attack_analysis::is_king_in_check(&board, PieceTeam::Light));
        assert!(!is_valid_move(&board, square(0, 1), square(0, 2), PieceTeam::Light));
        assert!(is_valid_move(&board, square(4, 0), square(3, 0), PieceTeam::Light));
    }

    #[test]
    fn a_blocking_move_resolves_check() {
        let board = board_with(&[
            (4, 0, PieceClass::King, PieceTeam::Light),
            (0, 3, PieceClass::Rook, PieceTeam::Light),
            (4, 7, PieceClass::Rook, PieceTeam::Dark),
        ]);
        // Rook a4 to e4 interposes.
        assert!(is_valid_move(&board, square(0, 3), square(4, 3), PieceTeam::Light));
        // Rook a4 to b4 does not.
        assert!(!is_valid_move(&board, square(0, 3), square(1, 3), PieceTeam::Light));
    }

    #[test]
    fn checkmate_in_the_corner() {
        // Dark king b3 and dark queen b2 smother the light king on a1.
        let board = board_with(&[
            (0, 0, PieceClass::King, PieceTeam::Light),
            (1, 1, PieceClass::Queen, PieceTeam::Dark),
            (1, 2, PieceClass::King, PieceTeam::Dark),
        ]);
        assert!(is_checkmate(&board, PieceTeam::Light));
        assert!(!is_stalemate(&board, PieceTeam::Light));
        assert!(possible_destinations(&board, square(0, 0), PieceTeam::Light).is_empty());
    }

    #[test]
    fn stalemate_in_the_corner() {
        // Light king a1, dark queen b3: not in check, nowhere to go.
        let board = board_with(&[
            (0, 0, PieceClass::King, PieceTeam::Light),
            (1, 2, PieceClass::Queen, PieceTeam::Dark),
            (7, 7, PieceClass::King, PieceTeam::Dark),
        ]);
        assert!(is_stalemate(&board, PieceTeam::Light));
        assert!(!is_checkmate(&board, PieceTeam::Light));
    }

    #[test]
    fn twenty_legal_moves_from_the_starting_position() {
        let board = ChessBoard::new_game();
        assert_eq!(all_legal_moves(&board, PieceTeam::Light).len(), 20);
        assert_eq!(all_legal_moves(&board, PieceTeam::Dark).len(), 20);
    }

    #[test]
    fn destination_scans_are_idempotent() {
        let board = ChessBoard::new_game();
        let first = possible_destinations(&board, square(6, 0), PieceTeam::Light);
        let second = possible_destinations(&board, square(6, 0), PieceTeam::Light);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
