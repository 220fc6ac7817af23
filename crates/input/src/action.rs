use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A discrete user intent, independent of which key produced it.
///
/// The pose core consumes commands derived from actions, never raw keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Select the next segment in the cycle.
    SelectNext,
    /// Select the previous segment in the cycle.
    SelectPrevious,
    /// Walk forward, or rotate the selection positively about X.
    Increase,
    /// Walk backward, or rotate the selection negatively about X.
    Decrease,
    /// Turn positively about Y.
    RotateLeft,
    /// Turn negatively about Y.
    RotateRight,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::SelectNext,
        Action::SelectPrevious,
        Action::Increase,
        Action::Decrease,
        Action::RotateLeft,
        Action::RotateRight,
    ];

    pub fn is_selection(self) -> bool {
        matches!(self, Action::SelectNext | Action::SelectPrevious)
    }
}

/// Key name to action bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keymap {
    bindings: BTreeMap<String, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Self::empty();
        keymap.bind("e", Action::SelectNext);
        keymap.bind("q", Action::SelectPrevious);
        keymap.bind("w", Action::Increase);
        keymap.bind("s", Action::Decrease);
        keymap.bind("a", Action::RotateLeft);
        keymap.bind("d", Action::RotateRight);
        keymap
    }
}

impl Keymap {
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: &str, action: Action) {
        self.bindings.insert(normalize(key), action);
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.bindings.get(&normalize(key)).copied()
    }

    /// Actions produced by the currently held keys. Unbound keys are ignored.
    pub fn actions<'a>(&self, held_keys: impl IntoIterator<Item = &'a str>) -> BTreeSet<Action> {
        held_keys
            .into_iter()
            .filter_map(|k| self.action_for(k))
            .collect()
    }

    pub fn bindings(&self) -> &BTreeMap<String, Action> {
        &self.bindings
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}
