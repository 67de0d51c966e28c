//! Tool-calling surface - what the LLM sees and how its calls reach the engine.
//!
//! The five adventure operations are exposed as named tools with JSON-schema
//! inputs. Decoding a call can fail (unknown name, malformed arguments); that
//! is a driver protocol problem and is reported as [`ToolError`]. Once decoded,
//! running a call never fails.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::engine::{AdventureEngine, ConversationContext};

pub const START_ADVENTURE: &str = "start_adventure";
pub const GET_CURRENT_SCENE: &str = "get_current_scene";
pub const PLAYER_ACTION: &str = "player_action";
pub const RESTART_ADVENTURE: &str = "restart_adventure";
pub const SHOW_JOURNAL: &str = "show_journal";

/// Errors decoding a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Definition of one tool, as handed to the LLM integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// A decoded tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    StartAdventure { player_name: Option<String> },
    GetCurrentScene,
    PlayerAction { action: String },
    RestartAdventure,
    ShowJournal,
}

#[derive(Debug, Default, Deserialize)]
struct StartArgs {
    #[serde(default)]
    player_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActionArgs {
    action: String,
}

impl ToolCall {
    /// Decode a call from its tool name and JSON arguments.
    ///
    /// `null` arguments are treated as an empty object. Tools without
    /// parameters ignore whatever arguments they are given.
    pub fn decode(name: &str, arguments: Value) -> Result<Self, ToolError> {
        let arguments = if arguments.is_null() {
            json!({})
        } else {
            arguments
        };
        let invalid = |source| ToolError::InvalidArguments {
            tool: name.to_string(),
            source,
        };

        match name {
            START_ADVENTURE => {
                let args: StartArgs = serde_json::from_value(arguments).map_err(invalid)?;
                Ok(ToolCall::StartAdventure {
                    player_name: args.player_name,
                })
            }
            GET_CURRENT_SCENE => Ok(ToolCall::GetCurrentScene),
            PLAYER_ACTION => {
                let args: ActionArgs = serde_json::from_value(arguments).map_err(invalid)?;
                Ok(ToolCall::PlayerAction {
                    action: args.action,
                })
            }
            RESTART_ADVENTURE => Ok(ToolCall::RestartAdventure),
            SHOW_JOURNAL => Ok(ToolCall::ShowJournal),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    /// The tool name this call was decoded from.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::StartAdventure { .. } => START_ADVENTURE,
            ToolCall::GetCurrentScene => GET_CURRENT_SCENE,
            ToolCall::PlayerAction { .. } => PLAYER_ACTION,
            ToolCall::RestartAdventure => RESTART_ADVENTURE,
            ToolCall::ShowJournal => SHOW_JOURNAL,
        }
    }

    /// Run the call against a conversation.
    pub fn invoke(&self, engine: &AdventureEngine, ctx: &mut ConversationContext) -> String {
        match self {
            ToolCall::StartAdventure { player_name } => engine.start(ctx, player_name.as_deref()),
            ToolCall::GetCurrentScene => engine.get_current_scene(ctx),
            ToolCall::PlayerAction { action } => engine.act(ctx, action),
            ToolCall::RestartAdventure => engine.restart(ctx),
            ToolCall::ShowJournal => engine.show_journal(ctx),
        }
    }
}

/// The adventure's tools, bound to one engine.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    engine: AdventureEngine,
}

impl ToolRegistry {
    pub fn new(engine: AdventureEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &AdventureEngine {
        &self.engine
    }

    /// All tool definitions, in a stable order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: START_ADVENTURE.to_string(),
                description: "Start a new adventure from the first scene. Call this when the \
                              player wants to begin playing."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "player_name": {
                            "type": "string",
                            "description": "The player's name, if they gave one"
                        }
                    }
                }),
            },
            ToolDefinition {
                name: GET_CURRENT_SCENE.to_string(),
                description: "Describe the current scene and the available choices again."
                    .to_string(),
                input_schema: empty_schema(),
            },
            ToolDefinition {
                name: PLAYER_ACTION.to_string(),
                description: "Perform an action in the story. Pass what the player said they \
                              want to do; it is matched against the current choices."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "required": ["action"],
                    "properties": {
                        "action": {
                            "type": "string",
                            "description": "The player's action, e.g. 'inspect the box' or 'take_map'"
                        }
                    }
                }),
            },
            ToolDefinition {
                name: RESTART_ADVENTURE.to_string(),
                description: "Throw away all progress and restart the adventure from the beginning."
                    .to_string(),
                input_schema: empty_schema(),
            },
            ToolDefinition {
                name: SHOW_JOURNAL.to_string(),
                description: "Read out the player's journal, inventory and recent path.".to_string(),
                input_schema: empty_schema(),
            },
        ]
    }

    /// Decode and run a tool call by name.
    pub fn dispatch(
        &self,
        ctx: &mut ConversationContext,
        name: &str,
        arguments: Value,
    ) -> Result<String, ToolError> {
        let call = ToolCall::decode(name, arguments)?;
        tracing::debug!(tool = call.name(), "dispatching tool call");
        Ok(call.invoke(&self.engine, ctx))
    }
}

fn empty_schema() -> Value {
    json!({ "type": "object", "properties": {} })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(AdventureEngine::with_defaults())
    }

    #[test]
    fn test_definitions_cover_all_tools() {
        let names: Vec<_> = registry()
            .definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();

        assert_eq!(
            names,
            vec![
                START_ADVENTURE,
                GET_CURRENT_SCENE,
                PLAYER_ACTION,
                RESTART_ADVENTURE,
                SHOW_JOURNAL
            ]
        );
    }

    #[test]
    fn test_player_action_schema_requires_action() {
        let defs = registry().definitions();
        let action = defs.iter().find(|d| d.name == PLAYER_ACTION).unwrap();
        assert_eq!(action.input_schema["required"], json!(["action"]));
    }

    #[test]
    fn test_decode_calls() {
        assert_eq!(
            ToolCall::decode(START_ADVENTURE, json!({ "player_name": "Mira" })).unwrap(),
            ToolCall::StartAdventure {
                player_name: Some("Mira".to_string())
            }
        );
        assert_eq!(
            ToolCall::decode(START_ADVENTURE, Value::Null).unwrap(),
            ToolCall::StartAdventure { player_name: None }
        );
        assert_eq!(
            ToolCall::decode(SHOW_JOURNAL, json!({ "verbose": true })).unwrap(),
            ToolCall::ShowJournal
        );
    }

    #[test]
    fn test_decode_unknown_tool() {
        let err = ToolCall::decode("cast_spell", json!({})).unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(name) if name == "cast_spell"));
    }

    #[test]
    fn test_decode_missing_action() {
        let err = ToolCall::decode(PLAYER_ACTION, json!({})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { tool, .. } if tool == PLAYER_ACTION));
    }

    #[test]
    fn test_dispatch_runs_engine() {
        let registry = registry();
        let mut ctx = ConversationContext::new();

        let text = registry
            .dispatch(&mut ctx, START_ADVENTURE, json!({ "player_name": "Mira" }))
            .unwrap();
        assert!(text.contains("Mira"));

        let text = registry
            .dispatch(&mut ctx, PLAYER_ACTION, json!({ "action": "inspect_box" }))
            .unwrap();
        assert!(text.contains("(say: take_map)"));
        assert_eq!(ctx.session().unwrap().choices_made(), ["inspect_box"]);
    }
}
