//! Terminal-oriented board renderer.
//!
//! Creates a human-readable board view for debugging, tests, and
//! diagnostics in text environments. This is not the renderer collaborator
//! the engine serves; that one queries the board and draws for itself.

use crate::{
    board_location::BoardLocation, game_state::GameState, piece_class::PieceClass,
    piece_record::PieceRecord, piece_team::PieceTeam,
};

/// Render the board to a string for terminal output, far rank on top,
/// with file and rank legends on all four edges.
pub fn render_game_state(game: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8).rev() {
        out.push(char::from(b'1' + rank as u8));
        out.push(' ');

        for file in 0..8 {
            let square = BoardLocation::from_file_rank(file, rank)
                .expect("loop indices stay in range");
            match game.piece_at(square) {
                Some(piece) => out.push(piece_letter(piece)),
                None => out.push('.'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank as u8));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_letter(piece: &PieceRecord) -> char {
    let base = match piece.class {
        PieceClass::Pawn => 'p',
        PieceClass::Knight => 'n',
        PieceClass::Bishop => 'b',
        PieceClass::Rook => 'r',
        PieceClass::Queen => 'q',
        PieceClass::King => 'k',
    };

    match piece.team {
        PieceTeam::Light => base.to_ascii_uppercase(),
        PieceTeam::Dark => base,
    }
}
