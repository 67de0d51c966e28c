//! # Adventure Rules
//!
//! The "Story Bible" crate - the static scene graph, the effects a choice can
//! declare, and the per-conversation session record those effects land in.
//! This crate contains no matching or narration logic; it is the single
//! source of truth for what the story is and where a player currently stands.

pub mod effects;
pub mod scenes;
pub mod session_state;

pub use effects::*;
pub use scenes::*;
pub use session_state::*;
