use crate::{
    board_location::BoardLocation,
    chess_board::ChessBoard,
    moves::{bishop_moves, rook_moves},
};

/// Whether the two squares share a rank, file, or diagonal.
pub fn is_queen_line(start: BoardLocation, stop: BoardLocation) -> bool {
    rook_moves::is_rook_line(start, stop) || bishop_moves::is_bishop_line(start, stop)
}

/// A queen moves like a rook or a bishop, so her geometry is the union of
/// both line moves.
pub fn is_geometric_queen_move(
    board: &ChessBoard,
    start: BoardLocation,
    stop: BoardLocation,
) -> bool {
    rook_moves::is_geometric_rook_move(board, start, stop)
        || bishop_moves::is_geometric_bishop_move(board, start, stop)
}
