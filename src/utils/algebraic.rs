//! Algebraic square and move text.
//!
//! The stable square-naming scheme shared with every external collaborator:
//! file letter plus rank digit, "a1" through "h8", and four-or-five
//! character long-algebraic moves such as "e2e4" and "e7e8q".

use crate::{board_location::BoardLocation, chess_errors::ChessErrors};

/// Renders a square as its algebraic name.
pub fn square_to_algebraic(square: BoardLocation) -> String {
    square.to_string()
}

/// Parses an algebraic square name like "e2".
///
/// # Returns
/// * `Ok(BoardLocation)` for a well-formed name.
/// * `Err(ChessErrors::InvalidAlgebraicString)` on the wrong length.
/// * `Err(ChessErrors::InvalidAlgebraicChar)` on a bad file or rank char.
pub fn square_from_algebraic(text: &str) -> Result<BoardLocation, ChessErrors> {
    let mut chars = text.chars();
    let (file_char, rank_char) = match (chars.next(), chars.next(), chars.next()) {
        (Some(file_char), Some(rank_char), None) => (file_char, rank_char),
        _ => return Err(ChessErrors::InvalidAlgebraicString(text.to_owned())),
    };
    let file = match file_char {
        'a'..='h' => file_char as i8 - 'a' as i8,
        _ => return Err(ChessErrors::InvalidAlgebraicChar(file_char)),
    };
    let rank = match rank_char {
        '1'..='8' => rank_char as i8 - '1' as i8,
        _ => return Err(ChessErrors::InvalidAlgebraicChar(rank_char)),
    };
    BoardLocation::from_file_rank(file, rank)
}

/// Parses a long-algebraic move like "e2e4" or "e7e8q" into its square
/// pair. A trailing promotion letter is accepted and discarded; promotion
/// is always to a queen on this board, so the squares carry everything.
pub fn move_from_long_algebraic(
    text: &str,
) -> Result<(BoardLocation, BoardLocation), ChessErrors> {
    let trimmed = text.trim();
    if !trimmed.is_ascii() || (trimmed.len() != 4 && trimmed.len() != 5) {
        return Err(ChessErrors::InvalidAlgebraicString(text.to_owned()));
    }
    let start = square_from_algebraic(&trimmed[0..2])?;
    let stop = square_from_algebraic(&trimmed[2..4])?;
    if let Some(promotion_char) = trimmed.chars().nth(4) {
        if !matches!(promotion_char, 'q' | 'r' | 'b' | 'n' | 'Q' | 'R' | 'B' | 'N') {
            return Err(ChessErrors::InvalidAlgebraicChar(promotion_char));
        }
    }
    Ok((start, stop))
}
