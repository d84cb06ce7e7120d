//! Round sequencing for a hotkey drill.
//!
//! `HotKeyGame` consumes key-down/key-up and tick calls, matches the chords
//! the player types against the current round and walks the round list:
//! one pass over every round, then repeated passes over the rounds that were
//! failed until none remain. After every verdict the game pauses for a few
//! ticks so the front-end can show the result.

use log::{debug, info};

use crate::error::GameError;
use crate::event::{GameEvent, GameListener, RoundInfo};
use crate::matcher::{evaluate, MatchResult};
use crate::modifier::{ModifierKey, ModifierSet};
use crate::round::Round;
use crate::session::{
    CountdownStep, GameSession, PauseCountdown, Phase, DEFAULT_PAUSE_TICKS,
};
use crate::solution::{render_steps, ChordStep};

/// Engine-facing settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSettings {
    /// Ticks to wait after a correct or failed verdict.
    pub pause_ticks: u32,
    /// Main keys whose key-up is submitted as a chord.
    pub key_up_submit_keys: Vec<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            pause_ticks: DEFAULT_PAUSE_TICKS,
            key_up_submit_keys: Vec::new(),
        }
    }
}

pub struct HotKeyGame<L: GameListener> {
    session: GameSession,
    settings: GameSettings,
    listener: L,
}

impl<L: GameListener> HotKeyGame<L> {
    pub fn new(listener: L) -> Self {
        Self::with_settings(GameSettings::default(), listener)
    }

    pub fn with_settings(settings: GameSettings, listener: L) -> Self {
        Self {
            session: GameSession::default(),
            settings,
            listener,
        }
    }

    /// Replace the round list with `rounds`, reset their progress and show
    /// the first one.
    pub fn start_game(&mut self, mut rounds: Vec<Round>) -> Result<(), GameError> {
        if rounds.is_empty() {
            return Err(GameError::NoRounds);
        }
        for round in rounds.iter_mut() {
            round.reset_for_new_game();
        }

        info!("starting game with {} rounds", rounds.len());
        self.session = GameSession::new(rounds);
        self.session.phase = Phase::Playing;
        self.emit_playing();
        Ok(())
    }

    /// End the game. A forced stop aborts without announcing completion.
    pub fn stop_game(&mut self, force_stop: bool) {
        info!("stopping game (forced: {force_stop})");
        self.session.current = 0;
        self.session.revisiting_failures = false;
        self.session.input.clear();
        self.session.active_modifiers.clear();

        if force_stop {
            self.session.phase = Phase::Idle;
        } else {
            self.session.phase = Phase::Finished;
            self.listener.on_event(GameEvent::Finished);
        }
    }

    /// Enter the post-verdict pause, dropping any in-flight input.
    pub fn pause_game(&mut self) -> Result<(), GameError> {
        self.ensure_active()?;
        self.enter_pause();
        Ok(())
    }

    pub fn resume_game(&mut self) -> Result<(), GameError> {
        self.ensure_active()?;
        self.resume();
        Ok(())
    }

    /// One second of game time.
    pub fn on_tick(&mut self) -> Result<(), GameError> {
        match self.session.phase {
            Phase::Idle | Phase::Finished => return Err(GameError::NoActiveRound),
            Phase::Playing => {
                self.session.elapsed_secs += 1;
                if let Some(round) = self.session.rounds.get_mut(self.session.current) {
                    round.elapsed_secs += 1;
                }
            }
            Phase::Paused => {
                if let CountdownStep::Elapsed = self.session.countdown.tick() {
                    self.resume();
                }
            }
        }
        let paused = self.is_paused();
        self.listener.on_timer(self.session.elapsed_secs, paused);
        Ok(())
    }

    pub fn key_down(&mut self, key_id: &str) -> Result<(), GameError> {
        self.ensure_active()?;
        debug!("key down: {key_id}");
        if self.is_paused() {
            return Ok(());
        }

        match ModifierKey::from_key_id(key_id) {
            Some(modifier) => {
                self.session.active_modifiers.insert(modifier);
            }
            None => self.submit_chord(key_id),
        }
        Ok(())
    }

    /// Key releases outside a running, unpaused game are ignored.
    pub fn key_up(&mut self, key_id: &str) {
        debug!("key up: {key_id}");
        if self.session.phase != Phase::Playing {
            return;
        }

        if let Some(modifier) = ModifierKey::from_key_id(key_id) {
            self.session.active_modifiers.remove(modifier);
        } else if self.settings.key_up_submit_keys.iter().any(|k| k == key_id) {
            debug!("submitting {key_id} on key up");
            self.submit_chord(key_id);
        }
    }

    /// Move to the next round, or into and through the pass over failed
    /// rounds, or finish when nothing is left to play.
    pub fn advance_round(&mut self) -> Result<(), GameError> {
        self.ensure_active()?;
        self.advance();
        Ok(())
    }

    fn submit_chord(&mut self, key_id: &str) {
        let step = ChordStep::new(key_id, self.session.active_modifiers.clone());
        self.session.input.push(step);

        let steps = render_steps(&self.session.input);
        debug!("input steps: {steps}");
        self.listener.on_event(GameEvent::UserInputSteps { steps });

        let Some(round) = self.session.current_round() else {
            return;
        };
        match evaluate(&self.session.input, &round.solutions) {
            MatchResult::FullMatch => self.round_correct(),
            MatchResult::PartialMatch => {}
            MatchResult::NoMatch => self.round_failed(),
        }
    }

    fn round_correct(&mut self) {
        debug!("round {} correct", self.session.current + 1);
        let steps = render_steps(&self.session.input);
        self.listener.on_event(GameEvent::Correct { steps });

        self.session.rounds[self.session.current].failed = false;
        self.enter_verdict_pause();
    }

    fn round_failed(&mut self) {
        debug!("round {} failed", self.session.current + 1);
        let round = &mut self.session.rounds[self.session.current];
        round.failed = true;
        round.misses += 1;
        let solution = round.solutions.to_string();
        let steps = render_steps(&self.session.input);
        self.listener.on_event(GameEvent::Failed { solution, steps });

        self.enter_verdict_pause();
    }

    fn enter_verdict_pause(&mut self) {
        self.session.input.clear();
        self.enter_pause();
        // A zero-tick pause moves on at once
        if self.session.countdown.remaining() == 0 {
            self.resume();
        }
    }

    fn enter_pause(&mut self) {
        debug!("pausing for {} ticks", self.settings.pause_ticks);
        self.session.phase = Phase::Paused;
        self.session.countdown = PauseCountdown::new(self.settings.pause_ticks);
        self.session.active_modifiers.clear();
        self.session.input.clear();
    }

    fn resume(&mut self) {
        debug!("resuming");
        self.session.phase = Phase::Playing;
        self.advance();
    }

    fn advance(&mut self) {
        self.session.input.clear();

        let last = self.session.rounds.len().saturating_sub(1);
        if !self.session.revisiting_failures && self.session.current < last {
            self.session.current += 1;
        } else if self.session.failed_count() > 0 {
            if !self.session.revisiting_failures {
                info!("revisiting {} failed rounds", self.session.failed_count());
                self.session.revisiting_failures = true;
            }
            match self.session.next_failed_round() {
                Some(idx) => {
                    self.session.current = idx;
                    self.session.rounds[idx].attempt += 1;
                }
                None => debug!("only the current round is failed, replaying it"),
            }
        } else {
            info!("all rounds solved after {}s", self.session.elapsed_secs);
            self.stop_game(false);
            return;
        }

        self.emit_playing();
    }

    fn emit_playing(&mut self) {
        if let Some(info) = self.round_info() {
            debug!("playing round {}/{}", info.index, info.count);
            self.listener.on_event(GameEvent::Playing(info));
        }
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        if self.session.is_active() {
            Ok(())
        } else {
            Err(GameError::NoActiveRound)
        }
    }

    pub fn round_info(&self) -> Option<RoundInfo> {
        self.session.current_round().map(|round| RoundInfo {
            index: self.session.current + 1,
            count: self.session.rounds.len(),
            attempt: round.attempt,
            category: round.category.clone(),
            description: round.description.clone(),
        })
    }

    pub fn rounds(&self) -> &[Round] {
        &self.session.rounds
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.session.elapsed_secs
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn is_paused(&self) -> bool {
        self.session.phase == Phase::Paused
    }

    pub fn is_running(&self) -> bool {
        self.session.is_active()
    }

    pub fn current_index(&self) -> usize {
        self.session.current
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.session.current_round()
    }

    pub fn revisiting_failures(&self) -> bool {
        self.session.revisiting_failures
    }

    pub fn pause_remaining(&self) -> u32 {
        self.session.countdown.remaining()
    }

    pub fn input_steps(&self) -> &[ChordStep] {
        &self.session.input
    }

    pub fn active_modifiers(&self) -> &ModifierSet {
        &self.session.active_modifiers
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}
