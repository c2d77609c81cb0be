use std::collections::HashMap;

use crate::{
    board_location::BoardLocation, chess_errors::ChessErrors, piece_class::PieceClass,
    piece_record::PieceRecord, piece_team::PieceTeam,
};

/// The piece collection: every piece on the board, keyed by its location.
///
/// Keying by location makes the one structural invariant of the board, that
/// no two pieces ever share a coordinate, impossible to violate by
/// construction. Cloning a register is a structural copy of the map, which
/// is what the validator's hypothetical look-ahead relies on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieceRegister {
    pieces: HashMap<BoardLocation, PieceRecord>,
}

impl PieceRegister {
    /// An empty register, for positions assembled piece by piece.
    pub fn new() -> Self {
        PieceRegister {
            pieces: HashMap::new(),
        }
    }

    /// The standard 32-piece starting arrangement with all moved-flags clear.
    pub fn standard_arrangement() -> Self {
        let mut register = PieceRegister::new();
        let back_rank = [
            PieceClass::Rook,
            PieceClass::Knight,
            PieceClass::Bishop,
            PieceClass::Queen,
            PieceClass::King,
            PieceClass::Bishop,
            PieceClass::Knight,
            PieceClass::Rook,
        ];
        for team in [PieceTeam::Light, PieceTeam::Dark] {
            for (file, class) in back_rank.iter().enumerate() {
                let square = BoardLocation::from_file_rank(file as i8, team.home_rank())
                    .expect("standard squares are always in range");
                register.pieces.insert(square, PieceRecord::new(*class, team));
            }
            for file in 0..8 {
                let square = BoardLocation::from_file_rank(file, team.pawn_rank())
                    .expect("standard squares are always in range");
                register
                    .pieces
                    .insert(square, PieceRecord::new(PieceClass::Pawn, team));
            }
        }
        register
    }

    /// Read-only lookup of the piece at a location, if any.
    pub fn view_piece_at_location(&self, x: BoardLocation) -> Option<&PieceRecord> {
        self.pieces.get(&x)
    }

    /// Mutable access to the piece at a location.
    ///
    /// # Returns
    /// * `Ok(&mut PieceRecord)` if a piece occupies the square.
    /// * `Err(ChessErrors::TryToViewOrEditEmptySquare)` otherwise.
    pub fn edit_piece_at_location(
        &mut self,
        x: BoardLocation,
    ) -> Result<&mut PieceRecord, ChessErrors> {
        self.pieces
            .get_mut(&x)
            .ok_or(ChessErrors::TryToViewOrEditEmptySquare(x))
    }

    /// Removes and returns the piece at a location.
    ///
    /// # Returns
    /// * `Ok(PieceRecord)` with the removed piece.
    /// * `Err(ChessErrors::CannotRemoveFromEmptyLocation)` if the square is
    ///   empty.
    pub fn remove_piece_at_location(
        &mut self,
        x: BoardLocation,
    ) -> Result<PieceRecord, ChessErrors> {
        self.pieces
            .remove(&x)
            .ok_or(ChessErrors::CannotRemoveFromEmptyLocation(x))
    }

    /// Places a piece on an empty square.
    ///
    /// # Returns
    /// * `Ok(())` on success.
    /// * `Err(ChessErrors::LocationAlreadyOccupied)` if the square already
    ///   holds a piece.
    pub fn add_piece_record(
        &mut self,
        x: BoardLocation,
        piece: PieceRecord,
    ) -> Result<(), ChessErrors> {
        if self.pieces.contains_key(&x) {
            return Err(ChessErrors::LocationAlreadyOccupied(x));
        }
        self.pieces.insert(x, piece);
        Ok(())
    }

    /// Iterates over every (location, piece) pair in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&BoardLocation, &PieceRecord)> {
        self.pieces.iter()
    }

    /// The location of the given team's king, if it is on the board.
    pub fn locate_king(&self, team: PieceTeam) -> Option<BoardLocation> {
        self.pieces
            .iter()
            .find(|(_, piece)| piece.class == PieceClass::King && piece.team == team)
            .map(|(location, _)| *location)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
