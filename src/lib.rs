// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod keymap;
pub mod matcher;
pub mod modifier;
pub mod report;
pub mod round;
pub mod runtime;
pub mod session;
pub mod solution;
pub mod util;

pub use error::{Error, GameError, Result, SolutionSyntaxError};
pub use event::{EventLog, GameEvent, GameListener, Notification, RoundInfo};
pub use game::{GameSettings, HotKeyGame};
pub use matcher::MatchResult;
pub use round::Round;
pub use session::Phase;
pub use solution::{ChordStep, Solution, SolutionSet};
