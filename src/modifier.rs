use std::collections::BTreeSet;
use std::fmt;

/// Identifier the input layer reports for the Alt key.
pub const ALT_KEY_ID: &str = "Menu";
/// Identifier the input layer reports for the Control key.
pub const CTRL_KEY_ID: &str = "ControlKey";
/// Identifier the input layer reports for the Shift key.
pub const SHIFT_KEY_ID: &str = "ShiftKey";

/// A key that is held alongside a main key rather than pressed on its own.
///
/// Variant order is the order modifiers are rendered in: `Alt+Ctrl+Shift+X`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum_macros::Display,
)]
pub enum ModifierKey {
    Alt,
    Ctrl,
    Shift,
}

impl ModifierKey {
    pub const ALL: [ModifierKey; 3] = [ModifierKey::Alt, ModifierKey::Ctrl, ModifierKey::Shift];

    /// Look up the modifier a key identifier stands for.
    ///
    /// Accepts the identifiers emitted by input capture (`Menu`, `ControlKey`,
    /// `ShiftKey`) as well as the display names (`Alt`, `Ctrl`, `Shift`) so a
    /// rendered chord can be parsed back.
    pub fn from_key_id(key_id: &str) -> Option<Self> {
        match key_id {
            ALT_KEY_ID | "Alt" => Some(ModifierKey::Alt),
            CTRL_KEY_ID | "Ctrl" => Some(ModifierKey::Ctrl),
            SHIFT_KEY_ID | "Shift" => Some(ModifierKey::Shift),
            _ => None,
        }
    }

    /// The identifier input capture uses for this modifier.
    pub fn key_id(&self) -> &'static str {
        match self {
            ModifierKey::Alt => ALT_KEY_ID,
            ModifierKey::Ctrl => CTRL_KEY_ID,
            ModifierKey::Shift => SHIFT_KEY_ID,
        }
    }
}

pub fn is_modifier(key_id: &str) -> bool {
    ModifierKey::from_key_id(key_id).is_some()
}

/// Set of held modifiers. Equality ignores the order keys were pressed in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet {
    keys: BTreeSet<ModifierKey>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ModifierKey) -> bool {
        self.keys.insert(key)
    }

    pub fn remove(&mut self, key: ModifierKey) -> bool {
        self.keys.remove(&key)
    }

    pub fn contains(&self, key: ModifierKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Modifiers in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = ModifierKey> + '_ {
        self.keys.iter().copied()
    }
}

impl FromIterator<ModifierKey> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = ModifierKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for key in self.iter() {
            if !first {
                write!(f, "+")?;
            }
            write!(f, "{key}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_ids_map_to_modifiers() {
        assert_eq!(ModifierKey::from_key_id("Menu"), Some(ModifierKey::Alt));
        assert_eq!(ModifierKey::from_key_id("ControlKey"), Some(ModifierKey::Ctrl));
        assert_eq!(ModifierKey::from_key_id("ShiftKey"), Some(ModifierKey::Shift));
    }

    #[test]
    fn display_names_are_aliases() {
        for key in ModifierKey::ALL {
            assert_eq!(ModifierKey::from_key_id(&key.to_string()), Some(key));
            assert_eq!(ModifierKey::from_key_id(key.key_id()), Some(key));
        }
    }

    #[test]
    fn main_keys_are_not_modifiers() {
        assert!(!is_modifier("c"));
        assert!(!is_modifier("F12"));
        assert!(!is_modifier("control"));
        assert!(!is_modifier(""));
    }

    #[test]
    fn set_equality_ignores_press_order() {
        let mut a = ModifierSet::new();
        a.insert(ModifierKey::Shift);
        a.insert(ModifierKey::Ctrl);

        let b: ModifierSet = [ModifierKey::Ctrl, ModifierKey::Shift].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn set_never_holds_duplicates() {
        let mut set = ModifierSet::new();
        assert!(set.insert(ModifierKey::Alt));
        assert!(!set.insert(ModifierKey::Alt));
        assert_eq!(set.len(), 1);

        assert!(set.remove(ModifierKey::Alt));
        assert!(set.is_empty());
    }

    #[test]
    fn renders_in_fixed_order() {
        let set: ModifierSet = [ModifierKey::Shift, ModifierKey::Alt, ModifierKey::Ctrl]
            .into_iter()
            .collect();
        assert_eq!(set.to_string(), "Alt+Ctrl+Shift");
        assert_eq!(ModifierSet::new().to_string(), "");
    }
}
