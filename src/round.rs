use crate::error::SolutionSyntaxError;
use crate::solution::SolutionSet;

/// One shortcut being drilled, plus how the player fared on it this game.
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    pub category: String,
    pub description: String,
    pub solutions: SolutionSet,
    pub failed: bool,
    pub attempt: u32,
    /// Wrong answers given this game, replays in place included.
    pub misses: u32,
    pub elapsed_secs: u64,
}

impl Round {
    pub fn new(
        category: impl Into<String>,
        description: impl Into<String>,
        solutions: SolutionSet,
    ) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            solutions,
            failed: false,
            attempt: 1,
            misses: 0,
            elapsed_secs: 0,
        }
    }

    /// Build a round from its raw solution string.
    pub fn parse(
        category: impl Into<String>,
        description: impl Into<String>,
        keys: &str,
    ) -> Result<Self, SolutionSyntaxError> {
        Ok(Self::new(category, description, SolutionSet::parse(keys)?))
    }

    pub fn reset_for_new_game(&mut self) {
        self.failed = false;
        self.attempt = 1;
        self.misses = 0;
        self.elapsed_secs = 0;
    }
}
