/// Derived game status, recomputed after every applied move.
///
/// Never a second source of truth: the game keeps only the result of the
/// latest computation, and recomputes from the board and side to move each
/// time a move lands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Play continues and the side to move is not in check.
    Active,
    /// The side to move is in check but has a legal move.
    Check,
    /// The side to move is in check with no legal move. Terminal.
    Checkmate,
    /// The side to move is not in check and has no legal move. Terminal.
    Stalemate,
    /// Agreed or externally declared draw. Terminal, and never derived by
    /// the transition function.
    Draw,
}

impl GameStatus {
    /// Whether the game is over and no further moves are accepted.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw
        )
    }
}
