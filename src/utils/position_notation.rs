//! Position descriptor text.
//!
//! The one external data contract the engine keeps bit-exact: the board is
//! written rank by rank from the far rank to the near rank, each rank left
//! to right with run-length-encoded empty-square counts, followed by the
//! side to move, castling availability, the en-passant target square, the
//! halfmove clock, and the fullmove number. Castling availability is
//! derived from the king and rook moved-flags. The parser is the inverse
//! and doubles as the position fixture mechanism for tests.

use crate::{
    board_location::BoardLocation,
    chess_board::ChessBoard,
    chess_errors::ChessErrors,
    game_state::GameState,
    piece_class::PieceClass,
    piece_record::PieceRecord,
    piece_register::PieceRegister,
    piece_team::PieceTeam,
    utils::algebraic,
};

/// Serializes a game into descriptor text.
pub fn generate_position_text(game: &GameState) -> String {
    let board = generate_board_field(game.board());
    let side_to_move = match game.turn() {
        PieceTeam::Light => "w",
        PieceTeam::Dark => "b",
    };
    let castling = generate_castling_field(game.board());
    let en_passant = match game.board().en_passant_target() {
        Some(square) => algebraic::square_to_algebraic(square),
        None => "-".to_owned(),
    };

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        game.half_move_clock(),
        game.full_move_count()
    )
}

fn generate_board_field(board: &ChessBoard) -> String {
    let mut out = String::new();

    for rank in (0..8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8 {
            let square = BoardLocation::from_file_rank(file, rank)
                .expect("loop indices stay in range");
            if let Some(piece) = board.piece_at(square) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_text_char(piece));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn piece_text_char(piece: &PieceRecord) -> char {
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

fn generate_castling_field(board: &ChessBoard) -> String {
    let mut out = String::new();

    if castling_available(board, PieceTeam::Light, 7) {
        out.push('K');
    }
    if castling_available(board, PieceTeam::Light, 0) {
        out.push('Q');
    }
    if castling_available(board, PieceTeam::Dark, 7) {
        out.push('k');
    }
    if castling_available(board, PieceTeam::Dark, 0) {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

/// A wing is still available iff the team's king and that wing's rook both
/// stand on their home squares with clear moved-flags.
fn castling_available(board: &ChessBoard, team: PieceTeam, rook_file: i8) -> bool {
    let king_home = BoardLocation::from_file_rank(4, team.home_rank())
        .expect("home squares are in range");
    let rook_home = BoardLocation::from_file_rank(rook_file, team.home_rank())
        .expect("home squares are in range");

    let king_ready = matches!(
        board.piece_at(king_home),
        Some(piece) if piece.class == PieceClass::King && piece.team == team && !piece.has_moved
    );
    let rook_ready = matches!(
        board.piece_at(rook_home),
        Some(piece) if piece.class == PieceClass::Rook && piece.team == team && !piece.has_moved
    );

    king_ready && rook_ready
}

/// Parses descriptor text into a ready game.
///
/// Moved-flags are inferred: a piece away from a standard starting square
/// has moved, and an absent castling right marks the corresponding rook as
/// moved even when it stands at home.
///
/// # Returns
/// * `Ok(GameState)` with the described position installed and its status
///   recomputed.
/// * `Err(ChessErrors)` naming the offending character or field.
pub fn parse_position_text(text: &str) -> Result<GameState, ChessErrors> {
    let mut fields = text.split_ascii_whitespace();

    let board_field = fields
        .next()
        .ok_or_else(|| ChessErrors::InvalidPositionText(text.to_owned()))?;
    let register = parse_board_field(board_field, text)?;

    let turn = match fields.next() {
        Some("w") => PieceTeam::Light,
        Some("b") => PieceTeam::Dark,
        _ => return Err(ChessErrors::InvalidPositionText(text.to_owned())),
    };

    let castle_field = fields
        .next()
        .ok_or_else(|| ChessErrors::InvalidPositionText(text.to_owned()))?;
    let register = apply_castling_field(register, castle_field)?;

    let en_passant_field = fields
        .next()
        .ok_or_else(|| ChessErrors::InvalidPositionText(text.to_owned()))?;
    let en_passant_target = if en_passant_field == "-" {
        None
    } else {
        Some(algebraic::square_from_algebraic(en_passant_field)?)
    };

    let half_move_clock = parse_counter(fields.next(), text)?;
    let full_move_count = parse_counter(fields.next(), text)?;

    let mut game = GameState::new_game();
    game.set_position(register, en_passant_target, turn);
    game.set_move_counters(half_move_clock, full_move_count);
    Ok(game)
}

fn parse_board_field(board_field: &str, text: &str) -> Result<PieceRegister, ChessErrors> {
    let mut register = PieceRegister::new();
    let mut file: i8 = 0;
    let mut rank: i8 = 7;

    for c in board_field.chars() {
        match c {
            '/' => {
                if rank == 0 {
                    return Err(ChessErrors::InvalidPositionText(text.to_owned()));
                }
                rank -= 1;
                file = 0;
            }
            '1'..='8' => {
                file += c as i8 - '0' as i8;
            }
            _ => {
                let (class, team) =
                    piece_from_char(c).ok_or(ChessErrors::InvalidAlgebraicChar(c))?;
                let square = BoardLocation::from_file_rank(file, rank)?;
                let mut piece = PieceRecord::new(class, team);
                piece.has_moved = !is_standard_start_square(class, team, square);
                register.add_piece_record(square, piece)?;
                file += 1;
            }
        }
    }

    Ok(register)
}

fn piece_from_char(c: char) -> Option<(PieceClass, PieceTeam)> {
    let team = if c.is_ascii_uppercase() {
        PieceTeam::Light
    } else {
        PieceTeam::Dark
    };
    let class = match c.to_ascii_lowercase() {
        'p' => PieceClass::Pawn,
        'n' => PieceClass::Knight,
        'b' => PieceClass::Bishop,
        'r' => PieceClass::Rook,
        'q' => PieceClass::Queen,
        'k' => PieceClass::King,
        _ => return None,
    };
    Some((class, team))
}

/// Whether a piece of this class and team starts a standard game here.
fn is_standard_start_square(class: PieceClass, team: PieceTeam, square: BoardLocation) -> bool {
    match class {
        PieceClass::Pawn => square.rank() == team.pawn_rank(),
        PieceClass::Rook => {
            square.rank() == team.home_rank() && (square.file() == 0 || square.file() == 7)
        }
        PieceClass::Knight => {
            square.rank() == team.home_rank() && (square.file() == 1 || square.file() == 6)
        }
        PieceClass::Bishop => {
            square.rank() == team.home_rank() && (square.file() == 2 || square.file() == 5)
        }
        PieceClass::Queen => square.rank() == team.home_rank() && square.file() == 3,
        PieceClass::King => square.rank() == team.home_rank() && square.file() == 4,
    }
}

/// An absent right pins the corresponding rook's moved-flag, so the
/// regenerated field matches what was parsed.
fn apply_castling_field(
    mut register: PieceRegister,
    castle_field: &str,
) -> Result<PieceRegister, ChessErrors> {
    for c in castle_field.chars() {
        if !matches!(c, 'K' | 'Q' | 'k' | 'q' | '-') {
            return Err(ChessErrors::InvalidAlgebraicChar(c));
        }
    }

    let wings = [
        ('K', PieceTeam::Light, 7),
        ('Q', PieceTeam::Light, 0),
        ('k', PieceTeam::Dark, 7),
        ('q', PieceTeam::Dark, 0),
    ];
    for (right, team, rook_file) in wings {
        if castle_field.contains(right) {
            continue;
        }
        let rook_home = BoardLocation::from_file_rank(rook_file, team.home_rank())?;
        if let Ok(piece) = register.edit_piece_at_location(rook_home) {
            if piece.class == PieceClass::Rook && piece.team == team {
                piece.has_moved = true;
            }
        }
    }

    Ok(register)
}

fn parse_counter(field: Option<&str>, text: &str) -> Result<u16, ChessErrors> {
    field
        .and_then(|value| value.parse::<u16>().ok())
        .ok_or_else(|| ChessErrors::InvalidPositionText(text.to_owned()))
}
