use crate::{
    board_location::BoardLocation, piece_class::PieceClass, piece_record::PieceRecord,
};

/// Represents the move types in chess, such as promotion, castling,
/// en passant, and double pawn step.
/// Used to distinguish between regular moves and moves with special rules
/// and information.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// A regular move or regular capture.
    Regular,
    /// Double pawn step; (vulnerable square left behind).
    DoubleStep(BoardLocation),
    /// En passant capture. The captured snapshot holds the victim pawn.
    EnPassant,
    /// Castling move; (rook start square, rook stop square).
    Castling {
        rook_start: BoardLocation,
        rook_stop: BoardLocation,
    },
    /// Promotion; (class placed on the board).
    Promotion(PieceClass),
}

/// Snapshot of a captured piece: where it stood and what it was.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CapturedPiece {
    pub location: BoardLocation,
    pub record: PieceRecord,
}

/// Describes one applied move. Produced by the board once per application,
/// appended to the game history, and never mutated afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MoveRecord {
    /// Square the piece left.
    pub start: BoardLocation,
    /// Square the piece arrived on.
    pub stop: BoardLocation,
    /// The moving piece as it was before the move.
    pub moved: PieceRecord,
    /// The captured piece, if the move captured one.
    pub captured: Option<CapturedPiece>,
    /// What kind of move this was.
    pub kind: MoveKind,
}

impl MoveRecord {
    pub fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::Castling { .. })
    }

    pub fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// The class a pawn was promoted to, if the move promoted.
    pub fn promotion(&self) -> Option<PieceClass> {
        match self.kind {
            MoveKind::Promotion(class) => Some(class),
            _ => None,
        }
    }

    /// Renders this move in long algebraic notation (e.g., "e2e4", "e7e8q").
    pub fn to_long_algebraic(&self) -> String {
        let base = format!("{}{}", self.start, self.stop);
        match self.kind {
            MoveKind::Promotion(class) => {
                let suffix = match class {
                    PieceClass::Queen => 'q',
                    PieceClass::Rook => 'r',
                    PieceClass::Bishop => 'b',
                    _ => 'n',
                };
                format!("{}{}", base, suffix)
            }
            _ => base,
        }
    }
}
