/// The round now being played, as shown to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundInfo {
    /// 1-based position in the round list.
    pub index: usize,
    pub count: usize,
    pub attempt: u32,
    pub category: String,
    pub description: String,
}

/// State changes the game announces to its front-end.
#[derive(Clone, Debug, PartialEq, Eq, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum GameEvent {
    Playing(RoundInfo),
    /// The chords typed so far for the current round.
    UserInputSteps { steps: String },
    Correct { steps: String },
    Failed { solution: String, steps: String },
    Finished,
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Receives everything the game announces.
pub trait GameListener {
    fn on_event(&mut self, event: GameEvent);

    /// Called once per tick with the session's elapsed seconds.
    fn on_timer(&mut self, _elapsed_secs: u64, _paused: bool) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Event(GameEvent),
    Timer { elapsed_secs: u64, paused: bool },
}

/// Listener that records notifications until the owner drains them.
#[derive(Debug, Default)]
pub struct EventLog {
    notifications: Vec<Notification>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Recorded game events, skipping timer ticks.
    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.notifications.iter().filter_map(|n| match n {
            Notification::Event(event) => Some(event),
            Notification::Timer { .. } => None,
        })
    }
}

impl GameListener for EventLog {
    fn on_event(&mut self, event: GameEvent) {
        self.notifications.push(Notification::Event(event));
    }

    fn on_timer(&mut self, elapsed_secs: u64, paused: bool) {
        self.notifications.push(Notification::Timer {
            elapsed_secs,
            paused,
        });
    }
}
