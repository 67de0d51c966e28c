//! Session state - the only mutable record in the adventure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scenes::SceneId;

/// Opaque short token identifying one run of the adventure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Length of a generated token, in hex characters.
    pub const LEN: usize = 8;

    /// Generate a new random session ID.
    pub fn new() -> Self {
        let mut token = Uuid::new_v4().simple().to_string();
        token.truncate(Self::LEN);
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One step the player took through the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: SceneId,
    pub action: String,
    pub to: SceneId,
    pub timestamp: DateTime<Utc>,
}

/// Per-conversation progress through the adventure.
///
/// Owned by exactly one conversation. Journal, inventory, history and
/// choices-made are append-only until the next reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    session_id: SessionId,
    player_name: Option<String>,
    current_scene: SceneId,
    pub(crate) journal: Vec<String>,
    pub(crate) inventory: Vec<String>,
    history: Vec<TransitionRecord>,
    /// Mirrors `history`, one action identifier per transition.
    choices_made: Vec<String>,
    started_at: DateTime<Utc>,
}

impl SessionState {
    /// Create a fresh session standing in `entry`.
    pub fn new(entry: SceneId, player_name: Option<String>) -> Self {
        Self {
            session_id: SessionId::new(),
            player_name,
            current_scene: entry,
            journal: Vec::new(),
            inventory: Vec::new(),
            history: Vec::new(),
            choices_made: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Reset every field to its initial value.
    ///
    /// The new session ID is always distinct from the one being replaced.
    pub fn reset(&mut self, entry: SceneId, player_name: Option<String>) {
        let previous = self.session_id.clone();
        *self = Self::new(entry, player_name);
        while self.session_id == previous {
            self.session_id = SessionId::new();
        }
    }

    /// Record a taken transition and move to its target.
    pub fn record_transition(&mut self, action: impl Into<String>, to: SceneId) {
        let action = action.into();
        let from = std::mem::replace(&mut self.current_scene, to.clone());
        self.history.push(TransitionRecord {
            from,
            action: action.clone(),
            to,
            timestamp: Utc::now(),
        });
        self.choices_made.push(action);
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    pub fn current_scene(&self) -> &SceneId {
        &self.current_scene
    }

    pub fn journal(&self) -> &[String] {
        &self.journal
    }

    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    pub fn history(&self) -> &[TransitionRecord] {
        &self.history
    }

    pub fn choices_made(&self) -> &[String] {
        &self.choices_made
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The last `n` transitions, oldest first.
    pub fn recent_history(&self, n: usize) -> &[TransitionRecord] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{apply_effects, Effect};

    #[test]
    fn test_new_session() {
        let state = SessionState::new(SceneId::new("intro"), Some("Mira".to_string()));

        assert_eq!(state.current_scene(), &SceneId::new("intro"));
        assert_eq!(state.player_name(), Some("Mira"));
        assert_eq!(state.session_id().as_str().len(), SessionId::LEN);
        assert!(state.journal().is_empty());
        assert!(state.inventory().is_empty());
        assert!(state.history().is_empty());
        assert!(state.choices_made().is_empty());
    }

    #[test]
    fn test_session_id_is_hex() {
        let id = SessionId::new();
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_record_transition() {
        let mut state = SessionState::new(SceneId::new("intro"), None);
        state.record_transition("inspect_box", SceneId::new("box"));

        assert_eq!(state.current_scene(), &SceneId::new("box"));
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.choices_made(), ["inspect_box"]);

        let record = &state.history()[0];
        assert_eq!(record.from, SceneId::new("intro"));
        assert_eq!(record.to, SceneId::new("box"));
        assert_eq!(record.action, "inspect_box");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = SessionState::new(SceneId::new("intro"), Some("Mira".to_string()));
        apply_effects(
            &[Effect::add_journal("note"), Effect::add_inventory("key")],
            &mut state,
        );
        state.record_transition("go", SceneId::new("hall"));
        let old_id = state.session_id().clone();

        state.reset(SceneId::new("intro"), None);

        assert_eq!(state.current_scene(), &SceneId::new("intro"));
        assert!(state.player_name().is_none());
        assert!(state.journal().is_empty());
        assert!(state.inventory().is_empty());
        assert!(state.history().is_empty());
        assert!(state.choices_made().is_empty());
        assert_ne!(state.session_id(), &old_id);
    }

    #[test]
    fn test_recent_history_window() {
        let mut state = SessionState::new(SceneId::new("s0"), None);
        for i in 1..=8 {
            state.record_transition(format!("step{}", i), SceneId::new(format!("s{}", i)));
        }

        let recent = state.recent_history(6);
        assert_eq!(recent.len(), 6);
        assert_eq!(recent[0].action, "step3");
        assert_eq!(recent[5].action, "step8");

        assert_eq!(state.recent_history(20).len(), 8);
    }
}
