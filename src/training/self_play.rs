//! Self-play evaluation against a random opponent.
//!
//! Plays repeated games between the network (via `MoveSelector`) and an
//! `OpponentPolicy`, tallying results from the network's side.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::core::{Result, SeededRng};
use crate::game::{Board, Outcome, Player};
use crate::nn::NeuralNetwork;
use crate::policy::{MoveSelector, OpponentPolicy, RandomBoardGenerator, RandomMover};

/// Configuration for self-play evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Number of games per run.
    pub games: usize,

    /// Seed for the opponent's RNG.
    pub seed: u64,

    /// Whether the network plays Naught (moves first).
    pub network_moves_first: bool,

    /// Cap on rejection-sampling draws for one random move.
    pub max_random_attempts: usize,

    /// Cap on regenerating a random board that ended the game.
    pub max_board_retries: usize,

    /// Upper bound on random moves used to build a starting position.
    pub max_setup_moves: usize,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            games: 3500,
            seed: 0,
            network_moves_first: true,
            max_random_attempts: 1000,
            max_board_retries: 100,
            max_setup_moves: 5,
        }
    }
}

impl SelfPlayConfig {
    /// Create a new self-play config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of games.
    #[must_use]
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Set the opponent seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Choose whether the network moves first.
    #[must_use]
    pub fn with_network_first(mut self, first: bool) -> Self {
        self.network_moves_first = first;
        self
    }

    /// Set the upper bound on random moves used to build a starting position.
    #[must_use]
    pub fn with_max_setup_moves(mut self, moves: usize) -> Self {
        self.max_setup_moves = moves;
        self
    }

    /// Set the random move attempt cap.
    #[must_use]
    pub fn with_max_random_attempts(mut self, attempts: usize) -> Self {
        self.max_random_attempts = attempts;
        self
    }

    /// Set the random board retry cap.
    #[must_use]
    pub fn with_max_board_retries(mut self, retries: usize) -> Self {
        self.max_board_retries = retries;
        self
    }

    /// The side the network plays.
    pub fn network_side(&self) -> Player {
        if self.network_moves_first {
            Player::Naught
        } else {
            Player::Cross
        }
    }

    /// Random opponent honoring the attempt cap.
    pub fn random_mover(&self) -> RandomMover {
        RandomMover::new(self.max_random_attempts)
    }

    /// Random position generator honoring the caps.
    pub fn board_generator(&self) -> RandomBoardGenerator {
        RandomBoardGenerator::new(self.random_mover(), self.max_setup_moves, self.max_board_retries)
    }
}

/// Win/loss/draw tally for the network side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlayReport {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl SelfPlayReport {
    /// Count one finished game. Unfinished games are ignored.
    pub fn record(&mut self, outcome: Outcome, network: Player) {
        match outcome {
            Outcome::Won(p) if p == network => self.wins += 1,
            Outcome::Won(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => return,
        }
        self.games += 1;
    }

    fn percent(&self, count: usize) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            100.0 / self.games as f64 * count as f64
        }
    }

    #[must_use]
    pub fn win_pct(&self) -> f64 {
        self.percent(self.wins)
    }

    #[must_use]
    pub fn loss_pct(&self) -> f64 {
        self.percent(self.losses)
    }

    #[must_use]
    pub fn draw_pct(&self) -> f64 {
        self.percent(self.draws)
    }
}

impl fmt::Display for SelfPlayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wins: {} ({:.2}%) Losses: {} ({:.2}%) Draws: {} ({:.2}%)",
            self.wins,
            self.win_pct(),
            self.losses,
            self.loss_pct(),
            self.draws,
            self.draw_pct()
        )
    }
}

/// Runs evaluation games between a network and an opponent.
#[derive(Clone, Debug, Default)]
pub struct SelfPlayHarness {
    selector: MoveSelector,
    config: SelfPlayConfig,
}

impl SelfPlayHarness {
    pub fn new(selector: MoveSelector, config: SelfPlayConfig) -> Self {
        Self { selector, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Play `config.games` games against the uniform random opponent.
    pub fn run(&self, network: &NeuralNetwork) -> Result<SelfPlayReport> {
        let mut rng = SeededRng::new(self.config.seed);
        self.run_against(network, &self.config.random_mover(), &mut rng)
    }

    /// Play `config.games` games against any opponent.
    #[instrument(skip_all, fields(games = self.config.games))]
    pub fn run_against<O: OpponentPolicy>(
        &self,
        network: &NeuralNetwork,
        opponent: &O,
        rng: &mut SeededRng,
    ) -> Result<SelfPlayReport> {
        let side = self.config.network_side();
        let mut report = SelfPlayReport::default();
        let mut board = Board::new();

        for game in 0..self.config.games {
            let outcome = self.play_game(&mut board, network, opponent, rng)?;
            debug!(game, ?outcome, "game finished");
            report.record(outcome, side);
            board.reset();
        }

        info!(
            wins = report.wins,
            losses = report.losses,
            draws = report.draws,
            "{}",
            report
        );
        Ok(report)
    }

    /// Alternate moves on `board` until the game ends.
    pub fn play_game<O: OpponentPolicy>(
        &self,
        board: &mut Board,
        network: &NeuralNetwork,
        opponent: &O,
        rng: &mut SeededRng,
    ) -> Result<Outcome> {
        let side = self.config.network_side();
        while !board.is_terminal() {
            if board.turn() == side {
                self.selector.choose_move(board, network)?;
            } else {
                opponent.play(board, rng)?;
            }
        }
        Ok(board.outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NetworkConfig;

    fn network() -> NeuralNetwork {
        NetworkConfig::default().build(&mut SeededRng::new(42))
    }

    #[test]
    fn test_self_play_config_default() {
        let config = SelfPlayConfig::default();
        assert_eq!(config.games, 3500);
        assert!(config.network_moves_first);
        assert_eq!(config.network_side(), Player::Naught);
    }

    #[test]
    fn test_self_play_config_all_builders() {
        let config = SelfPlayConfig::new()
            .with_games(10)
            .with_seed(9)
            .with_network_first(false)
            .with_max_random_attempts(50)
            .with_max_board_retries(7)
            .with_max_setup_moves(2);

        assert_eq!(config.games, 10);
        assert_eq!(config.seed, 9);
        assert_eq!(config.network_side(), Player::Cross);
        assert_eq!(config.max_random_attempts, 50);
        assert_eq!(config.max_board_retries, 7);
        assert_eq!(config.max_setup_moves, 2);
    }

    #[test]
    fn test_setup_moves_bound_generated_positions() {
        let generator = SelfPlayConfig::new().with_max_setup_moves(1).board_generator();
        let mut rng = SeededRng::new(8);
        for _ in 0..20 {
            let board = generator.generate(&mut rng).unwrap();
            assert!(board.legal_moves().len() >= 8);
        }
    }

    #[test]
    fn test_report_record() {
        let mut report = SelfPlayReport::default();
        report.record(Outcome::Won(Player::Naught), Player::Naught);
        report.record(Outcome::Won(Player::Cross), Player::Naught);
        report.record(Outcome::Draw, Player::Naught);
        report.record(Outcome::Draw, Player::Naught);

        assert_eq!(report.games, 4);
        assert_eq!((report.wins, report.losses, report.draws), (1, 1, 2));
        assert_eq!(report.win_pct(), 25.0);
        assert_eq!(report.draw_pct(), 50.0);
    }

    #[test]
    fn test_report_empty_percentages() {
        let report = SelfPlayReport::default();
        assert_eq!(report.win_pct(), 0.0);
        assert_eq!(report.loss_pct(), 0.0);
    }

    #[test]
    fn test_counts_sum_to_games() {
        let harness = SelfPlayHarness::new(
            MoveSelector::default(),
            SelfPlayConfig::new().with_games(200).with_seed(3),
        );
        let report = harness.run(&network()).unwrap();

        assert_eq!(report.games, 200);
        assert_eq!(report.wins + report.losses + report.draws, 200);
        for pct in [report.win_pct(), report.loss_pct(), report.draw_pct()] {
            assert!((0.0..=100.0).contains(&pct));
        }
    }

    #[test]
    fn test_self_play_deterministic() {
        let config = SelfPlayConfig::new().with_games(50).with_seed(17);
        let a = SelfPlayHarness::new(MoveSelector::default(), config.clone())
            .run(&network())
            .unwrap();
        let b = SelfPlayHarness::new(MoveSelector::default(), config)
            .run(&network())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_network_second() {
        let harness = SelfPlayHarness::new(
            MoveSelector::default(),
            SelfPlayConfig::new().with_games(30).with_network_first(false),
        );
        let report = harness.run(&network()).unwrap();
        assert_eq!(report.wins + report.losses + report.draws, 30);
    }

    #[test]
    fn test_play_game_terminates() {
        let harness = SelfPlayHarness::default();
        let mut board = Board::new();
        let mut rng = SeededRng::new(1);
        let outcome = harness
            .play_game(&mut board, &network(), &RandomMover::default(), &mut rng)
            .unwrap();
        assert!(outcome.is_terminal());
        assert_eq!(board.outcome(), outcome);
    }
}
