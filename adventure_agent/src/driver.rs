//! Conversation driver - one context per conversation, one tool call per line.
//!
//! Each input line is a JSON request naming a conversation and a tool:
//!
//! ```text
//! {"conversation": "room-1", "tool": "player_action", "arguments": {"action": "inspect the box"}}
//! ```
//!
//! The reply is a JSON line carrying the text the speech stage would speak.
//! A few tool names are reserved for the driver itself: `end_conversation`
//! drops the conversation's context, `list_tools` returns the tool
//! definitions as JSON, and `instructions` returns the game-master prompt.

use adventure_core::{game_master_instructions, ConversationContext, ToolRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const END_CONVERSATION: &str = "end_conversation";
pub const LIST_TOOLS: &str = "list_tools";
pub const INSTRUCTIONS: &str = "instructions";

/// One inbound tool call.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolRequest {
    pub conversation: String,
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

/// The driver's reply to one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<String>,
    pub ok: bool,
    pub text: String,
}

impl ToolReply {
    fn spoken(conversation: String, text: String) -> Self {
        Self {
            conversation: Some(conversation),
            ok: true,
            text,
        }
    }

    fn error(conversation: Option<String>, message: impl Into<String>) -> Self {
        Self {
            conversation,
            ok: false,
            text: message.into(),
        }
    }
}

/// Owns every live conversation and serialises calls into each of them.
pub struct ConversationDriver {
    registry: ToolRegistry,
    conversations: HashMap<String, ConversationContext>,
}

impl ConversationDriver {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            conversations: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Number of live conversations.
    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }

    /// Handle one raw input line.
    pub fn handle_line(&mut self, line: &str) -> ToolReply {
        match serde_json::from_str::<ToolRequest>(line) {
            Ok(request) => self.handle(request),
            Err(e) => {
                tracing::warn!(error = %e, "malformed request line");
                ToolReply::error(None, format!("malformed request: {}", e))
            }
        }
    }

    /// Handle one decoded request.
    pub fn handle(&mut self, request: ToolRequest) -> ToolReply {
        let ToolRequest {
            conversation,
            tool,
            arguments,
        } = request;

        match tool.as_str() {
            END_CONVERSATION => {
                let existed = self.conversations.remove(&conversation).is_some();
                tracing::info!(conversation = %conversation, existed, "conversation ended");
                return ToolReply::spoken(conversation, "Goodbye.".to_string());
            }
            LIST_TOOLS => {
                return match serde_json::to_string(&self.registry.definitions()) {
                    Ok(json) => ToolReply::spoken(conversation, json),
                    Err(e) => ToolReply::error(Some(conversation), e.to_string()),
                };
            }
            INSTRUCTIONS => {
                let prompt = game_master_instructions(self.registry.engine().catalog());
                return ToolReply::spoken(conversation, prompt);
            }
            _ => {}
        }

        let engine = self.registry.engine();
        let ctx = self
            .conversations
            .entry(conversation.clone())
            .or_insert_with(|| {
                tracing::info!(conversation = %conversation, "conversation opened");
                engine.new_conversation()
            });

        match self.registry.dispatch(ctx, &tool, arguments) {
            Ok(text) => ToolReply::spoken(conversation, text),
            Err(e) => {
                tracing::warn!(
                    conversation = %conversation,
                    tool = %tool,
                    error = %e,
                    "rejected tool call"
                );
                ToolReply::error(Some(conversation), e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adventure_core::AdventureEngine;

    fn driver() -> ConversationDriver {
        ConversationDriver::new(ToolRegistry::new(AdventureEngine::with_defaults()))
    }

    #[test]
    fn test_handle_start_line() {
        let mut driver = driver();
        let reply = driver.handle_line(
            r#"{"conversation": "c1", "tool": "start_adventure", "arguments": {"player_name": "Mira"}}"#,
        );

        assert!(reply.ok);
        assert_eq!(reply.conversation.as_deref(), Some("c1"));
        assert!(reply.text.contains("Mira"));
        assert_eq!(driver.conversation_count(), 1);
    }

    #[test]
    fn test_conversations_are_separate() {
        let mut driver = driver();
        driver.handle_line(r#"{"conversation": "a", "tool": "player_action", "arguments": {"action": "inspect_box"}}"#);
        let reply = driver.handle_line(r#"{"conversation": "b", "tool": "get_current_scene"}"#);

        assert!(reply.ok);
        assert!(reply.text.contains("(say: inspect_box)"));
        assert_eq!(driver.conversation_count(), 2);
    }

    #[test]
    fn test_end_conversation_drops_context() {
        let mut driver = driver();
        driver.handle_line(r#"{"conversation": "c1", "tool": "start_adventure"}"#);
        let reply = driver.handle_line(r#"{"conversation": "c1", "tool": "end_conversation"}"#);

        assert!(reply.ok);
        assert_eq!(driver.conversation_count(), 0);
    }

    #[test]
    fn test_list_tools_and_instructions() {
        let mut driver = driver();

        let tools = driver.handle_line(r#"{"conversation": "ops", "tool": "list_tools"}"#);
        assert!(tools.ok);
        let defs: Vec<adventure_core::ToolDefinition> = serde_json::from_str(&tools.text).unwrap();
        assert_eq!(defs.len(), 5);

        let prompt = driver.handle_line(r#"{"conversation": "ops", "tool": "instructions"}"#);
        assert!(prompt.ok);
        assert!(prompt.text.contains("Game Master"));

        assert_eq!(driver.conversation_count(), 0);
    }

    #[test]
    fn test_malformed_line() {
        let mut driver = driver();
        let reply = driver.handle_line("not json");

        assert!(!reply.ok);
        assert!(reply.conversation.is_none());
        assert!(reply.text.starts_with("malformed request"));
    }

    #[test]
    fn test_unknown_tool_is_reported() {
        let mut driver = driver();
        let reply = driver.handle_line(r#"{"conversation": "c1", "tool": "cast_spell"}"#);

        assert!(!reply.ok);
        assert_eq!(reply.text, "unknown tool: cast_spell");
    }
}
