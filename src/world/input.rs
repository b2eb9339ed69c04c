//! Held-key tracking for the free-roam world.

use std::collections::BTreeSet;

/// Physical keys the world reacts to. Anything else is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Shift,
    Control,
}

/// What a key does; several keys share one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    North,
    South,
    West,
    East,
    Fly,
    Ascend,
    Descend,
}

impl Key {
    /// Case-insensitive lookup of a DOM `KeyboardEvent.key` value.
    pub fn parse(name: &str) -> Option<Key> {
        if name == " " {
            return Some(Key::Space);
        }
        let key = match name.to_ascii_lowercase().as_str() {
            "w" => Key::W,
            "a" => Key::A,
            "s" => Key::S,
            "d" => Key::D,
            "arrowup" => Key::ArrowUp,
            "arrowdown" => Key::ArrowDown,
            "arrowleft" => Key::ArrowLeft,
            "arrowright" => Key::ArrowRight,
            "space" | "spacebar" => Key::Space,
            "shift" => Key::Shift,
            "control" => Key::Control,
            _ => return None,
        };
        Some(key)
    }

    pub fn action(self) -> Action {
        match self {
            Key::W | Key::ArrowUp => Action::North,
            Key::S | Key::ArrowDown => Action::South,
            Key::A | Key::ArrowLeft => Action::West,
            Key::D | Key::ArrowRight => Action::East,
            Key::Space => Action::Fly,
            Key::Shift => Action::Ascend,
            Key::Control => Action::Descend,
        }
    }
}

/// Keys currently down plus the flying flag. Read as a snapshot once per tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: BTreeSet<Key>,
    flying: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the key is not one the world uses.
    pub fn key_down(&mut self, name: &str) -> bool {
        let Some(key) = Key::parse(name) else { return false };
        self.held.insert(key);
        if key.action() == Action::Fly {
            self.flying = true;
        }
        true
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        let Some(key) = Key::parse(name) else { return false };
        self.held.remove(&key);
        if key.action() == Action::Fly {
            self.flying = false;
        }
        true
    }

    pub fn is_flying(&self) -> bool {
        self.flying
    }

    pub fn is_active(&self, action: Action) -> bool {
        self.held.iter().any(|k| k.action() == action)
    }

    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }

    /// Drops every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.flying = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Key::parse("W"), Some(Key::W));
        assert_eq!(Key::parse("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::parse(" "), Some(Key::Space));
        assert_eq!(Key::parse("Shift"), Some(Key::Shift));
        assert_eq!(Key::parse("q"), None);
        assert_eq!(Key::parse("Enter"), None);
    }

    #[test]
    fn fly_follows_press_and_release() {
        let mut input = InputState::new();
        assert!(input.key_down(" "));
        assert!(input.is_flying());
        // repeat keydown while held keeps flying
        input.key_down(" ");
        assert!(input.is_flying());
        input.key_up(" ");
        assert!(!input.is_flying());
    }

    #[test]
    fn aliases_keep_action_until_both_released() {
        let mut input = InputState::new();
        input.key_down("w");
        input.key_down("ArrowUp");
        input.key_up("W");
        assert!(input.is_active(Action::North));
        input.key_up("arrowup");
        assert!(!input.is_active(Action::North));
    }

    #[test]
    fn unknown_keys_ignored() {
        let mut input = InputState::new();
        assert!(!input.key_down("Tab"));
        assert_eq!(input.held().count(), 0);
        assert!(!input.key_up("Tab"));
    }
}
