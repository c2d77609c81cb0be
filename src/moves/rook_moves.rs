use crate::{
    attack_analysis::is_path_clear, board_location::BoardLocation, chess_board::ChessBoard,
};

/// Whether the two squares share a rank or a file.
pub fn is_rook_line(start: BoardLocation, stop: BoardLocation) -> bool {
    let same_file = start.file() == stop.file();
    let same_rank = start.rank() == stop.rank();
    same_file != same_rank
}

/// Whether a rook may geometrically move `start` → `stop`: a shared rank or
/// file with every intervening square empty.
pub fn is_geometric_rook_move(
    board: &ChessBoard,
    start: BoardLocation,
    stop: BoardLocation,
) -> bool {
    is_rook_line(start, stop) && is_path_clear(board, start, stop)
}
