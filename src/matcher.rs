use crate::solution::{ChordStep, SolutionSet};

/// How far a typed sequence of chords gets towards a target sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    PartialMatch,
    FullMatch,
}

/// Strict ordered-prefix comparison of `user` against `target`.
///
/// Every typed chord must equal the target chord at the same position; the
/// result is a full match only once the whole target has been typed.
pub fn matches(user: &[ChordStep], target: &[ChordStep]) -> MatchResult {
    if user.len() > target.len() {
        return MatchResult::NoMatch;
    }
    if !user.iter().zip(target).all(|(typed, wanted)| typed.matches(wanted)) {
        return MatchResult::NoMatch;
    }
    if user.len() == target.len() {
        MatchResult::FullMatch
    } else {
        MatchResult::PartialMatch
    }
}

/// Best result of `user` against any alternative of a round's solutions.
///
/// A full match on any alternative wins; otherwise one partial match keeps
/// the round open; otherwise the input is wrong.
pub fn evaluate(user: &[ChordStep], solutions: &SolutionSet) -> MatchResult {
    solutions
        .iter()
        .map(|solution| matches(user, solution.steps()))
        .fold(MatchResult::NoMatch, |best, result| match (best, result) {
            (MatchResult::FullMatch, _) | (_, MatchResult::FullMatch) => MatchResult::FullMatch,
            (MatchResult::PartialMatch, _) | (_, MatchResult::PartialMatch) => {
                MatchResult::PartialMatch
            }
            _ => MatchResult::NoMatch,
        })
}
