//! Translation of terminal key events into the key identifiers the game uses.
//!
//! Plain terminals only report a key press together with the modifier flags
//! held at that moment, so each press becomes: modifier downs, the main key
//! down, modifier ups. Terminals with keyboard enhancement additionally
//! report modifier keys and releases on their own; those map one to one.
//!
//! Without enhancement some chords never arrive as typed: `Ctrl+Shift+T`
//! reads as `Ctrl+T`, `Ctrl+/` as `Ctrl+7` and `Ctrl+Tab` as `Tab`.
//! [`legacy_round`] keeps only the alternatives such a terminal can report.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};
use log::debug;

use crate::error::GameError;
use crate::event::GameListener;
use crate::game::HotKeyGame;
use crate::modifier::ModifierKey;
use crate::round::Round;
use crate::solution::{ChordStep, SolutionSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Down(String),
    Up(String),
}

impl KeyAction {
    pub fn apply<L: GameListener>(&self, game: &mut HotKeyGame<L>) -> Result<(), GameError> {
        match self {
            KeyAction::Down(id) => game.key_down(id),
            KeyAction::Up(id) => {
                game.key_up(id);
                Ok(())
            }
        }
    }
}

/// Identifier for a main key, or `None` for keys the game cannot use.
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        // Characters the solution grammar reserves
        KeyCode::Char(',') => "Comma".to_string(),
        KeyCode::Char('+') => "Plus".to_string(),
        KeyCode::Char('|') => "Pipe".to_string(),
        KeyCode::Char(c) => c.to_uppercase().collect(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::PrintScreen => "PrintScreen".to_string(),
        KeyCode::Pause => "Pause".to_string(),
        _ => return None,
    };
    Some(name)
}

fn modifier_key(code: ModifierKeyCode) -> Option<ModifierKey> {
    match code {
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Some(ModifierKey::Alt),
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => Some(ModifierKey::Ctrl),
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Some(ModifierKey::Shift),
        _ => None,
    }
}

fn held_modifiers(event: &KeyEvent) -> Vec<ModifierKey> {
    let mut held = Vec::new();
    if event.modifiers.contains(KeyModifiers::ALT) {
        held.push(ModifierKey::Alt);
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        held.push(ModifierKey::Ctrl);
    }
    if event.modifiers.contains(KeyModifiers::SHIFT) || event.code == KeyCode::BackTab {
        held.push(ModifierKey::Shift);
    }
    held
}

/// Key downs and ups to feed the game for one terminal event.
pub fn key_actions(event: &KeyEvent) -> Vec<KeyAction> {
    if let KeyCode::Modifier(code) = event.code {
        let Some(modifier) = modifier_key(code) else {
            return Vec::new();
        };
        let id = modifier.key_id().to_string();
        return match event.kind {
            KeyEventKind::Press => vec![KeyAction::Down(id)],
            KeyEventKind::Release => vec![KeyAction::Up(id)],
            KeyEventKind::Repeat => Vec::new(),
        };
    }

    let Some(name) = key_name(event.code) else {
        return Vec::new();
    };
    match event.kind {
        KeyEventKind::Release => vec![KeyAction::Up(name)],
        // Held keys would submit the same chord again
        KeyEventKind::Repeat => Vec::new(),
        KeyEventKind::Press => {
            let held = held_modifiers(event);
            let mut actions: Vec<KeyAction> = held
                .iter()
                .map(|m| KeyAction::Down(m.key_id().to_string()))
                .collect();
            actions.push(KeyAction::Down(name));
            actions.extend(held.iter().map(|m| KeyAction::Up(m.key_id().to_string())));
            actions
        }
    }
}

/// Whether a terminal without keyboard enhancement can report `step`.
pub fn legacy_can_report(step: &ChordStep) -> bool {
    let ctrl = step.modifiers().contains(ModifierKey::Ctrl);
    let shift = step.modifiers().contains(ModifierKey::Shift);
    let key = step.main_key();

    match key {
        "Home" | "End" | "PageUp" | "PageDown" | "Left" | "Right" | "Up" | "Down" | "Delete"
        | "Insert" => true,
        "Tab" => !ctrl,
        "Enter" | "Backspace" | "Escape" => !ctrl && !shift,
        "Space" => !shift,
        "Comma" | "Plus" | "Pipe" => !ctrl && !shift,
        _ => {
            if let Some(n) = key.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=12).contains(&n);
            }
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return false;
            };
            if c.is_ascii_uppercase() {
                // Ctrl+I and Ctrl+M share their byte with Tab and Enter
                !ctrl || (!shift && c != 'I' && c != 'M')
            } else if c.is_ascii_lowercase() {
                false
            } else {
                !ctrl && !shift
            }
        }
    }
}

/// `round` narrowed to the alternatives a terminal without keyboard
/// enhancement can report, or `None` when it has none.
pub fn legacy_round(round: &Round) -> Option<Round> {
    let mut solutions = SolutionSet::new();
    for solution in round
        .solutions
        .iter()
        .filter(|s| s.steps().iter().all(legacy_can_report))
    {
        solutions.insert(solution.clone());
    }

    if solutions.is_empty() {
        debug!("{:?} cannot be typed without keyboard enhancement", round.description);
        return None;
    }
    Some(Round {
        solutions,
        ..round.clone()
    })
}
