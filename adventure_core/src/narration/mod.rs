//! Narration - renders scenes, transitions and the journal as speakable text.

use adventure_rules::{Scene, SceneCatalog, SessionState};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::EngineConfig;

/// Formats engine output for the speech stage.
#[derive(Debug, Clone, Default)]
pub struct Narrator {
    config: EngineConfig,
}

impl Narrator {
    /// Create a narrator with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render a scene: its description, one line per choice in declared
    /// order, then the prompt cue. The title is not spoken.
    pub fn render_scene(&self, scene: &Scene) -> String {
        let mut text = String::new();
        text.push_str(&scene.description);
        text.push_str("\n\n");

        if scene.is_dead_end() {
            text.push_str("There is nothing to do here but restart the adventure.\n\n");
        } else {
            text.push_str("Your options:\n");
            for (i, (id, choice)) in scene.choices.iter().enumerate() {
                text.push_str(&format!("{}. {} (say: {})\n", i + 1, choice.description, id));
            }
            text.push('\n');
        }

        text.push_str(&self.config.prompt_cue);
        text
    }

    /// Render the scene the session currently stands in, or the void.
    pub fn render_current(&self, catalog: &SceneCatalog, state: &SessionState) -> String {
        self.render_scene(catalog.scene_or_void(state.current_scene()))
    }

    /// One-line acknowledgment of a taken choice.
    pub fn render_transition_note(&self, from: &Scene, action: &str, to: &Scene) -> String {
        if from.id == to.id {
            format!("You chose '{}' and remain in {}.", action, to.title)
        } else {
            format!(
                "You chose '{}' and move from {} to {}.",
                action, from.title, to.title
            )
        }
    }

    /// Render the journal, inventory and the most recent history entries.
    pub fn render_journal(&self, state: &SessionState) -> String {
        let mut text = String::new();

        text.push_str(&format!(
            "Session {}, started {}.\n",
            state.session_id(),
            format_timestamp(state.started_at())
        ));
        if let Some(name) = state.player_name() {
            text.push_str(&format!("Player: {}\n", name));
        }

        if state.journal().is_empty() {
            text.push_str("Journal: empty.\n");
        } else {
            text.push_str("Journal:\n");
            for entry in state.journal() {
                text.push_str(&format!("- {}\n", entry));
            }
        }

        if state.inventory().is_empty() {
            text.push_str("Inventory: none.\n");
        } else {
            text.push_str(&format!("Inventory: {}\n", state.inventory().join(", ")));
        }

        if state.history().is_empty() {
            text.push_str("Recent history: none yet.");
        } else {
            text.push_str("Recent history:");
            for record in state.recent_history(self.config.history_window) {
                text.push_str(&format!(
                    "\n{} | from {} -> {} via {}",
                    format_timestamp(record.timestamp),
                    record.from,
                    record.to,
                    record.action
                ));
            }
        }

        text
    }

    /// Append the prompt cue unless `text` already ends with it.
    pub fn ensure_cue(&self, text: String) -> String {
        if text.ends_with(&self.config.prompt_cue) {
            text
        } else {
            format!("{}\n\n{}", text.trim_end(), self.config.prompt_cue)
        }
    }
}

/// RFC 3339 timestamp with second precision.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
