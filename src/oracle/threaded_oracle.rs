//! Worker-thread oracle adapter.
//!
//! Bridges any blocking "position in, move text out" resolver into the
//! non-blocking `MoveOracle` capability. A dedicated worker thread owns the
//! resolver; mpsc channels carry one request out and one answer back. The
//! adapter enforces the single-outstanding-request rule, converts the
//! answer text into a suggestion, and writes a request off as timed out
//! when its monotonic deadline passes. A late answer to a written-off
//! request is swallowed, never surfaced for the wrong request.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::warn;

use crate::chess_errors::ChessErrors;
use crate::oracle::oracle_trait::{
    MoveOracle, OracleFailure, OracleLifecycle, OraclePoll, SuggestedMove,
};
use crate::utils::algebraic;

/// The blocking function the worker runs once per request: position
/// descriptor text in, long-algebraic move text out, or a description of
/// what broke.
pub type SuggestionResolver = Box<dyn FnMut(&str) -> Result<String, String> + Send>;

enum OracleCommand {
    Evaluate(String),
    Shutdown,
}

/// A `MoveOracle` backed by one worker thread and a per-request deadline.
pub struct ThreadedOracle {
    command_sender: Sender<OracleCommand>,
    response_receiver: Receiver<Result<String, String>>,
    worker: Option<JoinHandle<()>>,
    lifecycle: OracleLifecycle,
    timeout: Duration,
    deadline: Option<Instant>,
    /// How many queued answers belong to requests already written off.
    stale_responses: usize,
}

impl ThreadedOracle {
    /// Starts the worker and hands back an idle oracle.
    ///
    /// # Arguments
    /// * `resolver` - The blocking per-request function the worker runs.
    /// * `timeout` - How long a request may stay unanswered before it is
    ///   written off as failed.
    pub fn spawn(resolver: SuggestionResolver, timeout: Duration) -> Self {
        let (command_sender, command_receiver) = mpsc::channel();
        let (response_sender, response_receiver) = mpsc::channel();
        let worker = thread::spawn(move || {
            let mut resolver = resolver;
            while let Ok(command) = command_receiver.recv() {
                match command {
                    OracleCommand::Evaluate(position_text) => {
                        let answer = resolver(&position_text);
                        if response_sender.send(answer).is_err() {
                            break;
                        }
                    }
                    OracleCommand::Shutdown => break,
                }
            }
        });
        ThreadedOracle {
            command_sender,
            response_receiver,
            worker: Some(worker),
            lifecycle: OracleLifecycle::Idle,
            timeout,
            deadline: None,
            stale_responses: 0,
        }
    }

    /// Turns a worker answer into a poll result and returns to idle.
    fn settle(&mut self, answer: Result<String, String>) -> OraclePoll {
        self.lifecycle = OracleLifecycle::Idle;
        self.deadline = None;
        match answer {
            Ok(text) => match algebraic::move_from_long_algebraic(&text) {
                Ok((start, stop)) => OraclePoll::Suggestion(SuggestedMove { start, stop }),
                Err(_) => OraclePoll::Failure(OracleFailure::Malformed(text)),
            },
            Err(reason) => OraclePoll::Failure(OracleFailure::Transport(reason)),
        }
    }
}

impl MoveOracle for ThreadedOracle {
    fn lifecycle(&self) -> OracleLifecycle {
        self.lifecycle
    }

    fn request_suggestion(&mut self, position_text: &str) -> Result<(), ChessErrors> {
        match self.lifecycle {
            OracleLifecycle::InFlight => Err(ChessErrors::OracleRequestAlreadyPending),
            OracleLifecycle::Failed => Err(ChessErrors::OracleNotAvailable),
            OracleLifecycle::Idle => {
                let command = OracleCommand::Evaluate(position_text.to_owned());
                if self.command_sender.send(command).is_err() {
                    self.lifecycle = OracleLifecycle::Failed;
                    return Err(ChessErrors::OracleNotAvailable);
                }
                self.lifecycle = OracleLifecycle::InFlight;
                self.deadline = Some(Instant::now() + self.timeout);
                Ok(())
            }
        }
    }

    fn poll_suggestion(&mut self) -> OraclePoll {
        if self.lifecycle != OracleLifecycle::InFlight {
            return OraclePoll::Pending;
        }
        loop {
            match self.response_receiver.try_recv() {
                Ok(answer) => {
                    if self.stale_responses > 0 {
                        // This answer belongs to a request that already
                        // timed out; the one we want is further along.
                        self.stale_responses -= 1;
                        continue;
                    }
                    return self.settle(answer);
                }
                Err(TryRecvError::Empty) => {
                    if self.deadline.map_or(false, |deadline| Instant::now() >= deadline) {
                        warn!("oracle request timed out; any late answer will be dropped");
                        self.stale_responses += 1;
                        self.lifecycle = OracleLifecycle::Idle;
                        self.deadline = None;
                        return OraclePoll::Failure(OracleFailure::Timeout);
                    }
                    return OraclePoll::Pending;
                }
                Err(TryRecvError::Disconnected) => {
                    self.lifecycle = OracleLifecycle::Failed;
                    self.deadline = None;
                    return OraclePoll::Failure(OracleFailure::Transport(
                        "the oracle worker is gone".to_owned(),
                    ));
                }
            }
        }
    }
}

impl Drop for ThreadedOracle {
    fn drop(&mut self) {
        let _ = self.command_sender.send(OracleCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_location::BoardLocation;
    use crate::game_state::{GameState, OracleOutcome};

    fn square(file: i8, rank: i8) -> BoardLocation {
        BoardLocation::from_file_rank(file, rank).unwrap()
    }

    fn poll_until_resolved(oracle: &mut ThreadedOracle) -> OraclePoll {
        for _ in 0..400 {
            match oracle.poll_suggestion() {
                OraclePoll::Pending => thread::sleep(Duration::from_millis(5)),
                resolved => return resolved,
            }
        }
        panic!("the oracle never resolved");
    }

    #[test]
    fn a_scripted_answer_comes_back_as_a_suggestion() {
        let mut oracle = ThreadedOracle::spawn(
            Box::new(|_position| Ok("e7e5".to_owned())),
            Duration::from_secs(5),
        );
        oracle.request_suggestion("irrelevant").unwrap();
        assert_eq!(oracle.lifecycle(), OracleLifecycle::InFlight);
        let resolved = poll_until_resolved(&mut oracle);
        assert_eq!(
            resolved,
            OraclePoll::Suggestion(SuggestedMove {
                start: square(4, 6),
                stop: square(4, 4),
            })
        );
        assert_eq!(oracle.lifecycle(), OracleLifecycle::Idle);
    }

    #[test]
    fn unusable_answer_text_is_a_malformed_failure() {
        let mut oracle = ThreadedOracle::spawn(
            Box::new(|_position| Ok("zz99".to_owned())),
            Duration::from_secs(5),
        );
        oracle.request_suggestion("irrelevant").unwrap();
        let resolved = poll_until_resolved(&mut oracle);
        assert_eq!(
            resolved,
            OraclePoll::Failure(OracleFailure::Malformed("zz99".to_owned()))
        );
    }

    #[test]
    fn a_resolver_error_is_a_transport_failure() {
        let mut oracle = ThreadedOracle::spawn(
            Box::new(|_position| Err("engine crashed".to_owned())),
            Duration::from_secs(5),
        );
        oracle.request_suggestion("irrelevant").unwrap();
        let resolved = poll_until_resolved(&mut oracle);
        assert_eq!(
            resolved,
            OraclePoll::Failure(OracleFailure::Transport("engine crashed".to_owned()))
        );
    }

    #[test]
    fn a_slow_resolver_times_out() {
        let mut oracle = ThreadedOracle::spawn(
            Box::new(|_position| {
                thread::sleep(Duration::from_millis(300));
                Ok("e2e4".to_owned())
            }),
            Duration::from_millis(10),
        );
        oracle.request_suggestion("irrelevant").unwrap();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(
            oracle.poll_suggestion(),
            OraclePoll::Failure(OracleFailure::Timeout)
        );
        assert_eq!(oracle.lifecycle(), OracleLifecycle::Idle);
    }

    #[test]
    fn overlapping_requests_are_refused() {
        let mut oracle = ThreadedOracle::spawn(
            Box::new(|_position| {
                thread::sleep(Duration::from_millis(50));
                Ok("e2e4".to_owned())
            }),
            Duration::from_secs(5),
        );
        oracle.request_suggestion("first").unwrap();
        assert_eq!(
            oracle.request_suggestion("second"),
            Err(ChessErrors::OracleRequestAlreadyPending)
        );
        poll_until_resolved(&mut oracle);
    }

    #[test]
    fn the_game_applies_a_threaded_suggestion() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut game = GameState::new_game();
        let mut oracle = ThreadedOracle::spawn(
            Box::new(|_position| Ok("e2e4".to_owned())),
            Duration::from_secs(5),
        );
        game.request_oracle_move(&mut oracle).unwrap();
        let outcome = loop {
            match game.poll_oracle(&mut oracle) {
                OracleOutcome::Pending => thread::sleep(Duration::from_millis(5)),
                outcome => break outcome,
            }
        };
        match outcome {
            OracleOutcome::Applied(record) => {
                assert_eq!(record.to_long_algebraic(), "e2e4")
            }
            other => panic!("expected an applied move, got {other:?}"),
        }
        assert_eq!(game.turn(), crate::piece_team::PieceTeam::Dark);
    }
}
