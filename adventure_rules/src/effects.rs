//! Effects a choice declares, and the applier that lands them on a session.

use serde::{Deserialize, Serialize};

use crate::session_state::SessionState;

/// A side effect of taking a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Append a line to the player's journal.
    AddJournal { text: String },
    /// Append an item to the player's inventory. Duplicates are allowed.
    AddInventory { item: String },
}

impl Effect {
    pub fn add_journal(text: impl Into<String>) -> Self {
        Effect::AddJournal { text: text.into() }
    }

    pub fn add_inventory(item: impl Into<String>) -> Self {
        Effect::AddInventory { item: item.into() }
    }
}

/// Apply effects to the session in list order.
///
/// Every call appends; replaying the same list appends again.
pub fn apply_effects(effects: &[Effect], state: &mut SessionState) {
    for effect in effects {
        match effect {
            Effect::AddJournal { text } => state.journal.push(text.clone()),
            Effect::AddInventory { item } => state.inventory.push(item.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::SceneId;

    fn fresh_state() -> SessionState {
        SessionState::new(SceneId::new("intro"), None)
    }

    #[test]
    fn test_apply_in_order() {
        let mut state = fresh_state();
        let effects = vec![
            Effect::add_journal("Found a map."),
            Effect::add_inventory("map"),
            Effect::add_journal("The map is old."),
        ];

        apply_effects(&effects, &mut state);

        assert_eq!(state.journal(), ["Found a map.", "The map is old."]);
        assert_eq!(state.inventory(), ["map"]);
    }

    #[test]
    fn test_apply_empty_list() {
        let mut state = fresh_state();
        apply_effects(&[], &mut state);

        assert!(state.journal().is_empty());
        assert!(state.inventory().is_empty());
    }

    #[test]
    fn test_replay_appends_again() {
        let mut state = fresh_state();
        let effects = vec![Effect::add_inventory("coin")];

        apply_effects(&effects, &mut state);
        apply_effects(&effects, &mut state);

        assert_eq!(state.inventory(), ["coin", "coin"]);
    }

    #[test]
    fn test_effect_serde_tag() {
        let effect: Effect = toml::from_str(
            r#"
kind = "add_journal"
text = "hello"
"#,
        )
        .unwrap();
        assert_eq!(effect, Effect::add_journal("hello"));
    }
}
