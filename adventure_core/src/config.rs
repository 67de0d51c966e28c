//! Engine configuration - the fixed strings and limits of the narration.

use serde::{Deserialize, Serialize};

/// Tunable text and limits used by the engine and its narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cue every prompting response ends with.
    pub prompt_cue: String,

    /// Number of history entries shown in the journal.
    pub history_window: usize,

    /// Greeting for `start`. `{name}` is replaced by the player's name.
    pub start_greeting: String,

    /// Greeting for `start` when no name was given.
    pub anonymous_greeting: String,

    /// Greeting for `restart`.
    pub restart_greeting: String,

    /// Lead-in for an action that matched no choice.
    pub not_understood: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prompt_cue: "What do you do?".to_string(),
            history_window: 6,
            start_greeting: "Welcome, {name}, to the Misty Tower.".to_string(),
            anonymous_greeting: "Welcome, traveller, to the Misty Tower.".to_string(),
            restart_greeting: "The mist swirls and the world resets. Your adventure begins anew."
                .to_string(),
            not_understood: "I didn't quite understand that.".to_string(),
        }
    }
}

impl EngineConfig {
    /// The greeting for `start`, personalised when a name is known.
    pub fn greeting_for(&self, player_name: Option<&str>) -> String {
        match player_name {
            Some(name) => self.start_greeting.replace("{name}", name),
            None => self.anonymous_greeting.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.prompt_cue, "What do you do?");
        assert_eq!(config.history_window, 6);
    }

    #[test]
    fn test_greeting_for() {
        let config = EngineConfig::default();
        assert_eq!(
            config.greeting_for(Some("Mira")),
            "Welcome, Mira, to the Misty Tower."
        );
        assert_eq!(config.greeting_for(None), config.anonymous_greeting);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{ "history_window": 3 }"#).unwrap();
        assert_eq!(config.history_window, 3);
        assert_eq!(config.prompt_cue, "What do you do?");
    }
}
