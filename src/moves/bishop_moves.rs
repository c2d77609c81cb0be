use crate::{
    attack_analysis::is_path_clear, board_location::BoardLocation, chess_board::ChessBoard,
};

/// Whether the two squares share a diagonal.
pub fn is_bishop_line(start: BoardLocation, stop: BoardLocation) -> bool {
    let d_file = (stop.file() - start.file()).abs();
    let d_rank = (stop.rank() - start.rank()).abs();
    d_file == d_rank && d_file != 0
}

/// Whether a bishop may geometrically move `start` → `stop`: a shared
/// diagonal with every intervening square empty.
pub fn is_geometric_bishop_move(
    board: &ChessBoard,
    start: BoardLocation,
    stop: BoardLocation,
) -> bool {
    is_bishop_line(start, stop) && is_path_clear(board, start, stop)
}
