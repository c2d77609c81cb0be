use crate::{piece_class::PieceClass, piece_team::PieceTeam};

/// Represents a chess piece with its class and team.
/// The board keys pieces by location, so the record itself only carries
/// what the piece is and whether it has ever been relocated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PieceRecord {
    /// The class (type) of the piece (e.g., pawn, knight).
    pub class: PieceClass,
    /// Piece team.
    pub team: PieceTeam,
    /// Set permanently true the first time the piece is relocated.
    /// Consulted by castling eligibility for kings and rooks.
    pub has_moved: bool,
}

impl PieceRecord {
    /// A piece that has not moved yet.
    pub fn new(class: PieceClass, team: PieceTeam) -> Self {
        PieceRecord {
            class,
            team,
            has_moved: false,
        }
    }
}
