//! Uniform random-move oracle.
//!
//! Selects uniformly from the legal moves of the position it is handed and
//! is primarily used for diagnostics, integration testing, and
//! low-strength gameplay. It answers from inside the process, so a request
//! resolves at the very next poll; this also makes it the reference
//! implementation of the capability contract.

use rand::prelude::IndexedRandom;

use crate::{
    chess_errors::ChessErrors,
    move_validator,
    oracle::oracle_trait::{
        MoveOracle, OracleFailure, OracleLifecycle, OraclePoll, SuggestedMove,
    },
    utils::position_notation,
};

pub struct RandomOracle {
    answer: Option<OraclePoll>,
}

impl RandomOracle {
    pub fn new() -> Self {
        RandomOracle { answer: None }
    }
}

impl Default for RandomOracle {
    fn default() -> Self {
        RandomOracle::new()
    }
}

impl MoveOracle for RandomOracle {
    fn lifecycle(&self) -> OracleLifecycle {
        if self.answer.is_some() {
            OracleLifecycle::InFlight
        } else {
            OracleLifecycle::Idle
        }
    }

    fn request_suggestion(&mut self, position_text: &str) -> Result<(), ChessErrors> {
        if self.answer.is_some() {
            return Err(ChessErrors::OracleRequestAlreadyPending);
        }
        let game = position_notation::parse_position_text(position_text)?;
        let legal_moves = move_validator::all_legal_moves(game.board(), game.turn());

        let mut rng = rand::rng();
        self.answer = Some(match legal_moves.as_slice().choose(&mut rng) {
            Some((start, stop)) => OraclePoll::Suggestion(SuggestedMove {
                start: *start,
                stop: *stop,
            }),
            None => OraclePoll::Failure(OracleFailure::NoMoveAvailable),
        });
        Ok(())
    }

    fn poll_suggestion(&mut self) -> OraclePoll {
        self.answer.take().unwrap_or(OraclePoll::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::{GameState, OracleOutcome};
    use crate::game_status::GameStatus;
    use crate::move_validator::is_valid_move;
    use crate::piece_team::PieceTeam;

    #[test]
    fn suggests_a_legal_move_for_the_starting_position() {
        let mut oracle = RandomOracle::new();
        oracle
            .request_suggestion("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();
        assert_eq!(oracle.lifecycle(), OracleLifecycle::InFlight);
        match oracle.poll_suggestion() {
            OraclePoll::Suggestion(suggestion) => {
                let game = GameState::new_game();
                assert!(is_valid_move(
                    game.board(),
                    suggestion.start,
                    suggestion.stop,
                    PieceTeam::Light
                ));
            }
            other => panic!("expected a suggestion, got {other:?}"),
        }
        // The resolution is handed out exactly once.
        assert_eq!(oracle.poll_suggestion(), OraclePoll::Pending);
    }

    #[test]
    fn reports_no_move_available_when_the_side_is_mated() {
        let mut oracle = RandomOracle::new();
        // Light king a1 smothered by the dark queen b2 and king b3.
        oracle
            .request_suggestion("8/8/8/8/8/1k6/1q6/K7 w - - 0 1")
            .unwrap();
        assert_eq!(
            oracle.poll_suggestion(),
            OraclePoll::Failure(OracleFailure::NoMoveAvailable)
        );
    }

    #[test]
    fn an_unreadable_position_is_refused_at_request_time() {
        let mut oracle = RandomOracle::new();
        assert!(oracle.request_suggestion("not a position").is_err());
        assert_eq!(oracle.lifecycle(), OracleLifecycle::Idle);
    }

    #[test]
    fn plays_a_handful_of_plies_through_the_game() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut game = GameState::new_game();
        let mut oracle = RandomOracle::new();
        for _ in 0..10 {
            if game.status() != GameStatus::Active && game.status() != GameStatus::Check {
                break;
            }
            let mover = game.turn();
            game.request_oracle_move(&mut oracle).unwrap();
            match game.poll_oracle(&mut oracle) {
                OracleOutcome::Applied(_) => {
                    assert_eq!(game.turn(), mover.opponent());
                }
                other => panic!("a random legal move should always apply, got {other:?}"),
            }
        }
        assert!(game.history().len() >= 10 || game.status().is_terminal());
    }
}
