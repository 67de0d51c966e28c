//! # Adventure Core
//!
//! The dialogue engine behind the voice adventure. This crate sits on top of
//! `adventure_rules`, turns free-form player utterances into scene
//! transitions, and narrates every outcome as speakable text.
//!
//! ## Core Components
//!
//! - **action_resolver**: Three-tier, first-match mapping of an utterance to a choice
//! - **narration**: Scene, transition and journal rendering, always ending in the prompt cue
//! - **engine**: The five operations a conversational driver invokes per turn
//! - **tools**: Tool definitions and name-based dispatch for the LLM tool caller
//! - **instructions**: The game-master system prompt
//!
//! ## Design Philosophy
//!
//! - **Never fail a turn**: Unknown actions and unknown scenes degrade to a re-prompt
//! - **Driver-owned state**: Each conversation owns its session; the engine holds none
//! - **Declared order wins**: Narration and matching follow the catalog's choice order

pub mod action_resolver;
pub mod config;
pub mod engine;
pub mod instructions;
pub mod narration;
pub mod tools;

pub use action_resolver::*;
pub use config::*;
pub use engine::*;
pub use instructions::*;
pub use narration::*;
pub use tools::*;
