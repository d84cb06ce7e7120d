use crate::event::GameListener;
use crate::game::HotKeyGame;
use crate::round::Round;
use crate::util::mean;

/// How one round went.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub category: String,
    pub description: String,
    pub attempts: u32,
    pub misses: u32,
    pub seconds: u64,
}

impl From<&Round> for RoundReport {
    fn from(round: &Round) -> Self {
        Self {
            category: round.category.clone(),
            description: round.description.clone(),
            attempts: round.attempt,
            misses: round.misses,
            seconds: round.elapsed_secs,
        }
    }
}

/// Summary shown once a game is over.
#[derive(Debug, Clone, PartialEq)]
pub struct GameReport {
    pub rounds: Vec<RoundReport>,
    pub total_secs: u64,
}

impl GameReport {
    pub fn new(rounds: &[Round], total_secs: u64) -> Self {
        Self {
            rounds: rounds.iter().map(RoundReport::from).collect(),
            total_secs,
        }
    }

    pub fn from_game<L: GameListener>(game: &HotKeyGame<L>) -> Self {
        Self::new(game.rounds(), game.elapsed_secs())
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn average_secs(&self) -> Option<f64> {
        let secs: Vec<f64> = self.rounds.iter().map(|r| r.seconds as f64).collect();
        mean(&secs)
    }

    /// Rounds that were not solved on the first try.
    pub fn retried_count(&self) -> usize {
        self.rounds.iter().filter(|r| r.misses > 0).count()
    }

    pub fn miss_count(&self) -> u32 {
        self.rounds.iter().map(|r| r.misses).sum()
    }

    pub fn first_try_count(&self) -> usize {
        self.round_count() - self.retried_count()
    }
}
