use std::collections::HashSet;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
}

/// Snapshot of held keys, polled once per frame
///
/// Decouples the game loop from whichever windowing backend supplies input.
pub trait InputState {
    fn is_key_held(&self, key: Key) -> bool;
}

/// Plain set of held keys
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    held: HashSet<Key>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }
}

impl InputState for KeySet {
    fn is_key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
