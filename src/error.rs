use thiserror::Error;

/// Why a solution string was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxIssue {
    #[error("solution string is empty")]
    EmptyInput,
    #[error("empty alternative, step or key")]
    EmptySegment,
    #[error("step has no main key, only modifiers")]
    MissingMainKey,
    #[error("step has more than one main key")]
    MultipleMainKeys,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid solution syntax in {input:?}: {issue}")]
pub struct SolutionSyntaxError {
    pub input: String,
    pub issue: SyntaxIssue,
}

impl SolutionSyntaxError {
    pub fn new(input: &str, issue: SyntaxIssue) -> Self {
        Self {
            input: input.to_string(),
            issue,
        }
    }
}

/// Misuse of the game state machine by its caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("no active round: start a game first")]
    NoActiveRound,
    #[error("cannot start a game without rounds")]
    NoRounds,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SolutionSyntaxError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("catalog record {line}: {source}")]
    CatalogRecord {
        line: u64,
        #[source]
        source: SolutionSyntaxError,
    },
    #[error("bundled catalog {0:?} not found")]
    MissingCatalog(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
