//! Random self-play (batch simulation).
//!
//! Each game owns its board and its two random players; nothing is shared
//! between games, so batches can be split across threads. Every game's random
//! sources are derived from the batch seed and the game's index, which makes
//! a batch reproducible regardless of how many threads run it.

use std::thread;

use anyhow::anyhow;
use tracing::info;

use crate::board::Color;
use crate::game::{Game, Outcome};
use crate::players::RandomPlayer;

/// Aggregate results of a batch of games.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub ties: usize,
    /// Total moves over all games.
    pub moves: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: Outcome, moves: usize) {
        self.games += 1;
        self.moves += moves;
        match outcome.winner() {
            Some(Color::Black) => self.black_wins += 1,
            Some(Color::White) => self.white_wins += 1,
            None => self.ties += 1,
        }
    }

    fn merge(&mut self, other: BatchSummary) {
        self.games += other.games;
        self.black_wins += other.black_wins;
        self.white_wins += other.white_wins;
        self.ties += other.ties;
        self.moves += other.moves;
    }
}

/// Play one game between two random players and return the finished game.
pub fn random_game(seed: u64) -> anyhow::Result<Game> {
    let mut black = RandomPlayer::new(fastrand::Rng::with_seed(seed));
    let mut white = RandomPlayer::new(fastrand::Rng::with_seed(seed ^ 0x9E37_79B9_7F4A_7C15));
    let mut game = Game::new();
    game.run(&mut black, &mut white)?;
    Ok(game)
}

/// Play `games` random games on up to `threads` threads.
pub fn simulate(games: usize, seed: u64, threads: usize) -> anyhow::Result<BatchSummary> {
    let threads = threads.clamp(1, games.max(1));

    let partials = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                scope.spawn(move || -> anyhow::Result<BatchSummary> {
                    let mut summary = BatchSummary::default();
                    for i in (t..games).step_by(threads) {
                        let game = random_game(seed.wrapping_add(i as u64))?;
                        summary.record(game.outcome(), game.moves_played());
                    }
                    Ok(summary)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().map_err(|_| anyhow!("simulation thread panicked"))?)
            .collect::<anyhow::Result<Vec<_>>>()
    })?;

    let mut total = BatchSummary::default();
    for partial in partials {
        total.merge(partial);
    }
    info!(?total, seed, threads, "batch finished");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INITIAL_DISCS;

    #[test]
    fn test_random_game_finishes() {
        let game = random_game(3).unwrap();
        assert!(game.is_over());
        let outcome = game.outcome();
        assert_eq!(outcome.black + outcome.white, INITIAL_DISCS + game.moves_played() as u32);
    }

    #[test]
    fn test_random_game_is_reproducible() {
        let a = random_game(17).unwrap();
        let b = random_game(17).unwrap();
        assert_eq!(a.history(), b.history());
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_simulate_counts_every_game() {
        let summary = simulate(12, 5, 3).unwrap();
        assert_eq!(summary.games, 12);
        assert_eq!(summary.black_wins + summary.white_wins + summary.ties, 12);
        assert!(summary.moves > 0);
    }

    #[test]
    fn test_simulate_independent_of_thread_count() {
        let one = simulate(10, 99, 1).unwrap();
        let four = simulate(10, 99, 4).unwrap();
        assert_eq!(one, four);
    }

    #[test]
    fn test_simulate_zero_games() {
        assert_eq!(simulate(0, 1, 4).unwrap(), BatchSummary::default());
    }
}
