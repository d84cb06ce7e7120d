use crate::modifier::ModifierSet;
use crate::round::Round;
use crate::solution::ChordStep;

/// Default number of ticks the game waits after a verdict.
pub const DEFAULT_PAUSE_TICKS: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    Paused,
    Finished,
}

/// What a paused tick did to the countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownStep {
    Waiting(u32),
    Elapsed,
}

/// Ticks left before a paused game resumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PauseCountdown {
    remaining: u32,
}

impl PauseCountdown {
    pub fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Count one tick down. The tick that reaches zero reports `Elapsed`.
    pub fn tick(&mut self) -> CountdownStep {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            CountdownStep::Elapsed
        } else {
            CountdownStep::Waiting(self.remaining)
        }
    }
}

impl Default for PauseCountdown {
    fn default() -> Self {
        Self::new(DEFAULT_PAUSE_TICKS)
    }
}

/// Everything one game mutates while it is played.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub rounds: Vec<Round>,
    pub current: usize,
    pub revisiting_failures: bool,
    pub elapsed_secs: u64,
    pub phase: Phase,
    pub countdown: PauseCountdown,
    // Input for the current round
    pub active_modifiers: ModifierSet,
    pub input: Vec<ChordStep>,
}

impl GameSession {
    pub fn new(rounds: Vec<Round>) -> Self {
        Self {
            rounds,
            current: 0,
            revisiting_failures: false,
            elapsed_secs: 0,
            phase: Phase::Idle,
            countdown: PauseCountdown::default(),
            active_modifiers: ModifierSet::new(),
            input: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::Paused)
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.get(self.current)
    }

    pub fn failed_count(&self) -> usize {
        self.rounds.iter().filter(|r| r.failed).count()
    }

    /// First failed round other than the current one.
    pub fn next_failed_round(&self) -> Option<usize> {
        self.rounds
            .iter()
            .enumerate()
            .find(|(idx, round)| round.failed && *idx != self.current)
            .map(|(idx, _)| idx)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounds(n: usize) -> Vec<Round> {
        (0..n)
            .map(|i| Round::parse("Test", format!("round {i}"), "F1").unwrap())
            .collect()
    }

    #[test]
    fn countdown_elapses_on_the_tick_reaching_zero() {
        let mut countdown = PauseCountdown::new(2);
        assert_eq!(countdown.tick(), CountdownStep::Waiting(1));
        assert_eq!(countdown.tick(), CountdownStep::Elapsed);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn zero_length_countdown_elapses_immediately() {
        let mut countdown = PauseCountdown::new(0);
        assert_eq!(countdown.tick(), CountdownStep::Elapsed);
    }

    #[test]
    fn new_session_is_idle() {
        let session = GameSession::new(rounds(2));
        assert_eq!(session.phase, Phase::Idle);
        assert!(!session.is_active());
        assert_eq!(session.current, 0);
        assert_eq!(session.countdown.remaining(), DEFAULT_PAUSE_TICKS);
    }

    #[test]
    fn next_failed_round_skips_current() {
        let mut session = GameSession::new(rounds(4));
        session.rounds[1].failed = true;
        session.rounds[3].failed = true;

        session.current = 1;
        assert_eq!(session.next_failed_round(), Some(3));
        session.current = 3;
        assert_eq!(session.next_failed_round(), Some(1));
        assert_eq!(session.failed_count(), 2);
    }

    #[test]
    fn next_failed_round_none_when_only_current_failed() {
        let mut session = GameSession::new(rounds(3));
        session.rounds[2].failed = true;
        session.current = 2;
        assert_eq!(session.next_failed_round(), None);
    }
}
