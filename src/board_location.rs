use std::fmt;

use crate::chess_errors::ChessErrors;

/// A square on the board, addressed by a file and rank pair, each in 0..=7.
///
/// Two locations are equal iff both components match. No location outside
/// the board can be constructed: the constructor and the stepping helper
/// both reject out-of-range values, so every `BoardLocation` held anywhere
/// in the engine names a real square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardLocation {
    file: i8,
    rank: i8,
}

impl BoardLocation {
    /// Builds a location from zero-based file and rank indices.
    ///
    /// # Arguments
    /// * `file` - The file index, 0 ('a') through 7 ('h').
    /// * `rank` - The rank index, 0 (rank 1) through 7 (rank 8).
    ///
    /// # Returns
    /// * `Ok(BoardLocation)` if both indices are on the board.
    /// * `Err(ChessErrors::InvalidFileOrRank)` otherwise.
    pub fn from_file_rank(file: i8, rank: i8) -> Result<Self, ChessErrors> {
        if (file < 0) | (file > 7) | (rank < 0) | (rank > 7) {
            Err(ChessErrors::InvalidFileOrRank(file, rank))
        } else {
            Ok(BoardLocation { file, rank })
        }
    }

    pub fn file(&self) -> i8 {
        self.file
    }

    pub fn rank(&self) -> i8 {
        self.rank
    }

    /// Steps this location by a file and rank offset.
    ///
    /// # Arguments
    /// * `d_file` - The file offset.
    /// * `d_rank` - The rank offset.
    ///
    /// # Returns
    /// * `Ok(BoardLocation)` if the stepped location is within bounds.
    /// * `Err(ChessErrors::TriedToMoveOutOfBounds)` otherwise.
    pub fn offset_by(&self, d_file: i8, d_rank: i8) -> Result<Self, ChessErrors> {
        BoardLocation::from_file_rank(self.file + d_file, self.rank + d_rank)
            .map_err(|_| ChessErrors::TriedToMoveOutOfBounds(*self, d_file, d_rank))
    }

    /// Every square on the board, file-major within each rank, rank 0 first.
    /// The order is fixed so destination scans are reproducible.
    pub fn all_squares() -> impl Iterator<Item = BoardLocation> {
        (0..8).flat_map(|rank| (0..8).map(move |file| BoardLocation { file, rank }))
    }
}

impl fmt::Display for BoardLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file as u8),
            char::from(b'1' + self.rank as u8)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_rejects_out_of_range_indices() {
        assert!(BoardLocation::from_file_rank(0, 0).is_ok());
        assert!(BoardLocation::from_file_rank(7, 7).is_ok());
        assert!(BoardLocation::from_file_rank(-1, 0).is_err());
        assert!(BoardLocation::from_file_rank(0, 8).is_err());
        assert!(BoardLocation::from_file_rank(8, 3).is_err());
    }

    #[test]
    fn offset_stays_on_the_board_or_errors() {
        let e2 = BoardLocation::from_file_rank(4, 1).unwrap();
        let e4 = e2.offset_by(0, 2).unwrap();
        assert_eq!(e4, BoardLocation::from_file_rank(4, 3).unwrap());

        let a1 = BoardLocation::from_file_rank(0, 0).unwrap();
        assert!(matches!(
            a1.offset_by(-1, 0),
            Err(ChessErrors::TriedToMoveOutOfBounds(_, -1, 0))
        ));
    }

    #[test]
    fn displays_as_algebraic_text() {
        let e2 = BoardLocation::from_file_rank(4, 1).unwrap();
        assert_eq!(e2.to_string(), "e2");
        let h8 = BoardLocation::from_file_rank(7, 7).unwrap();
        assert_eq!(h8.to_string(), "h8");
    }

    #[test]
    fn all_squares_covers_the_board_once() {
        let squares: Vec<BoardLocation> = BoardLocation::all_squares().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].to_string(), "a1");
        assert_eq!(squares[63].to_string(), "h8");
    }
}
