//! Structured form of a shortcut's accepted key sequences.
//!
//! A solution string lists alternatives separated by `||`; each alternative is
//! a comma separated list of steps; each step joins simultaneously held keys
//! with `+`:
//!
//! ```
//! use keydrill::solution::SolutionSet;
//!
//! let set: SolutionSet = "ControlKey+K, ControlKey+C || ControlKey+Divide".parse().unwrap();
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.to_string(), "Ctrl+K, Ctrl+C || Ctrl+Divide");
//! ```
//!
//! Tokens are trimmed and compared case-sensitively. Any empty alternative,
//! step or token is rejected, as is a step without exactly one main key.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::error::{SolutionSyntaxError, SyntaxIssue};
use crate::modifier::{ModifierKey, ModifierSet};

const ALTERNATIVE_SEPARATOR: &str = "||";
const STEP_SEPARATOR: char = ',';
const KEY_SEPARATOR: char = '+';

/// One key combination: a main key plus the modifiers held with it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChordStep {
    main_key: String,
    modifiers: ModifierSet,
}

impl ChordStep {
    pub fn new(main_key: impl Into<String>, modifiers: ModifierSet) -> Self {
        Self {
            main_key: main_key.into(),
            modifiers,
        }
    }

    pub fn main_key(&self) -> &str {
        &self.main_key
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    /// Same main key and same set of modifiers.
    pub fn matches(&self, other: &ChordStep) -> bool {
        self.main_key == other.main_key && self.modifiers == other.modifiers
    }

    fn parse(step: &str) -> Result<Self, SyntaxIssue> {
        let step = step.trim();
        if step.is_empty() {
            return Err(SyntaxIssue::EmptySegment);
        }

        let mut modifiers = ModifierSet::new();
        let mut main_key: Option<&str> = None;

        for token in step.split(KEY_SEPARATOR).map(str::trim) {
            if token.is_empty() {
                return Err(SyntaxIssue::EmptySegment);
            }
            if let Some(modifier) = ModifierKey::from_key_id(token) {
                modifiers.insert(modifier);
            } else if main_key.replace(token).is_some() {
                return Err(SyntaxIssue::MultipleMainKeys);
            }
        }

        main_key
            .map(|key| ChordStep::new(key, modifiers))
            .ok_or(SyntaxIssue::MissingMainKey)
    }
}

impl fmt::Display for ChordStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.modifiers.iter() {
            write!(f, "{modifier}{KEY_SEPARATOR}")?;
        }
        write!(f, "{}", self.main_key)
    }
}

/// Render a sequence of steps the way a solution is written: `Ctrl+K, Ctrl+C`.
pub fn render_steps(steps: &[ChordStep]) -> String {
    steps.iter().join(", ")
}

/// One acceptable way to perform a shortcut: a non-empty ordered list of steps.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Solution {
    steps: Vec<ChordStep>,
}

impl Solution {
    /// Returns `None` for an empty step list.
    pub fn new(steps: Vec<ChordStep>) -> Option<Self> {
        if steps.is_empty() {
            None
        } else {
            Some(Self { steps })
        }
    }

    pub fn steps(&self) -> &[ChordStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render_steps(&self.steps))
    }
}

/// Alternative solutions for one shortcut.
///
/// Duplicates collapse on insert and equality ignores the order alternatives
/// were listed in. Iteration and rendering keep first-seen order.
#[derive(Clone, Debug, Default)]
pub struct SolutionSet {
    solutions: Vec<Solution>,
}

impl SolutionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(input: &str) -> Result<Self, SolutionSyntaxError> {
        if input.trim().is_empty() {
            return Err(SolutionSyntaxError::new(input, SyntaxIssue::EmptyInput));
        }

        let mut set = SolutionSet::new();
        for alternative in input.split(ALTERNATIVE_SEPARATOR) {
            if alternative.trim().is_empty() {
                return Err(SolutionSyntaxError::new(input, SyntaxIssue::EmptySegment));
            }
            let steps = alternative
                .split(STEP_SEPARATOR)
                .map(ChordStep::parse)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|issue| SolutionSyntaxError::new(input, issue))?;
            if let Some(solution) = Solution::new(steps) {
                set.insert(solution);
            }
        }
        Ok(set)
    }

    /// Returns false when an equal solution is already present.
    pub fn insert(&mut self, solution: Solution) -> bool {
        if self.solutions.contains(&solution) {
            return false;
        }
        self.solutions.push(solution);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

impl PartialEq for SolutionSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|s| other.solutions.contains(s))
    }
}

impl Eq for SolutionSet {}

impl FromStr for SolutionSet {
    type Err = SolutionSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolutionSet::parse(s)
    }
}

impl<'a> IntoIterator for &'a SolutionSet {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for SolutionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.solutions.iter().join(" || "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn step(main_key: &str, modifiers: &[ModifierKey]) -> ChordStep {
        ChordStep::new(main_key, modifiers.iter().copied().collect())
    }

    #[test]
    fn parses_single_chord() {
        let set = SolutionSet::parse("ControlKey+c").unwrap();
        assert_eq!(set.len(), 1);

        let solution = set.iter().next().unwrap();
        assert_eq!(solution.steps(), &[step("c", &[ModifierKey::Ctrl])]);
    }

    #[test]
    fn parses_sequential_steps_in_order() {
        let set = SolutionSet::parse("ShiftKey+F2,Enter").unwrap();
        let solution = set.iter().next().unwrap();

        assert_eq!(
            solution.steps(),
            &[step("F2", &[ModifierKey::Shift]), step("Enter", &[])]
        );
    }

    #[test]
    fn parses_alternatives() {
        let set = SolutionSet::parse("A||Ctrl+A").unwrap();
        assert_eq!(set.len(), 2);

        let expected: SolutionSet = [
            Solution::new(vec![step("A", &[ModifierKey::Ctrl])]).unwrap(),
            Solution::new(vec![step("A", &[])]).unwrap(),
        ]
        .into_iter()
        .fold(SolutionSet::new(), |mut set, s| {
            set.insert(s);
            set
        });
        assert_eq!(set, expected);
    }

    #[test]
    fn duplicate_alternatives_collapse() {
        let set = SolutionSet::parse("ControlKey+S || Ctrl+S||ControlKey+S").unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn modifier_order_in_source_is_irrelevant() {
        let a = SolutionSet::parse("ShiftKey+ControlKey+T").unwrap();
        let b = SolutionSet::parse("ControlKey+ShiftKey+T").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn whitespace_around_tokens_is_trimmed() {
        let a = SolutionSet::parse(" ControlKey + K ,  ControlKey+C ").unwrap();
        let b = SolutionSet::parse("ControlKey+K,ControlKey+C").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn key_names_are_case_sensitive() {
        let a = SolutionSet::parse("ControlKey+c").unwrap();
        let b = SolutionSet::parse("ControlKey+C").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn modifier_only_step_is_rejected() {
        let err = SolutionSet::parse("ControlKey+ShiftKey").unwrap_err();
        assert_eq!(err.issue, SyntaxIssue::MissingMainKey);
        assert_eq!(err.input, "ControlKey+ShiftKey");

        let err = SolutionSet::parse("ControlKey+K,ShiftKey").unwrap_err();
        assert_eq!(err.issue, SyntaxIssue::MissingMainKey);
    }

    #[test]
    fn two_main_keys_in_one_step_are_rejected() {
        assert_matches!(
            SolutionSet::parse("ControlKey+K+C"),
            Err(SolutionSyntaxError {
                issue: SyntaxIssue::MultipleMainKeys,
                ..
            })
        );
    }

    #[test]
    fn empty_pieces_are_rejected() {
        for input in ["ControlKey+", "A,,B", "A||", "||A", "A, ", "A|| ||B"] {
            let err = SolutionSet::parse(input).unwrap_err();
            assert_eq!(err.issue, SyntaxIssue::EmptySegment, "input {input:?}");
        }
        assert_eq!(
            SolutionSet::parse("   ").unwrap_err().issue,
            SyntaxIssue::EmptyInput
        );
    }

    #[test]
    fn renders_display_form() {
        let set = SolutionSet::parse("ShiftKey+Menu+F2,Enter||ControlKey+Q").unwrap();
        assert_eq!(set.to_string(), "Alt+Shift+F2, Enter || Ctrl+Q");
    }

    #[test]
    fn rendered_form_parses_back_to_equal_set() {
        for input in [
            "ControlKey+c",
            "ShiftKey+F2,Enter",
            "A||Ctrl+A",
            "Menu+ControlKey+ShiftKey+Delete, Escape || F1",
            "ControlKey+K,ControlKey+C,ControlKey+U",
        ] {
            let parsed = SolutionSet::parse(input).unwrap();
            let reparsed = SolutionSet::parse(&parsed.to_string()).unwrap();
            assert_eq!(parsed, reparsed, "input {input:?}");
        }
    }

    #[test]
    fn chord_matching_is_symmetric() {
        let ctrl_c = step("c", &[ModifierKey::Ctrl]);
        let ctrl_shift_c = step("c", &[ModifierKey::Shift, ModifierKey::Ctrl]);
        let shift_ctrl_c = step("c", &[ModifierKey::Ctrl, ModifierKey::Shift]);

        assert!(ctrl_shift_c.matches(&shift_ctrl_c));
        assert!(shift_ctrl_c.matches(&ctrl_shift_c));
        assert!(!ctrl_c.matches(&ctrl_shift_c));
        assert!(!ctrl_shift_c.matches(&ctrl_c));
    }

    #[test]
    fn solution_requires_steps() {
        assert!(Solution::new(Vec::new()).is_none());
    }
}
