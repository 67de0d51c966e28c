//! Scene definitions for the story graph.

mod builtin;
mod catalog;

pub use builtin::{BUILTIN_ENTRY, MAP_JOURNAL_ENTRY};
pub use catalog::*;

use serde::{Deserialize, Serialize};

use crate::effects::Effect;

/// Identifier of the dedicated fallback scene.
pub const VOID_SCENE_ID: &str = "void";

/// String key naming a scene in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    /// Create a scene ID from any string-like key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The fallback scene ID.
    pub fn void() -> Self {
        Self(VOID_SCENE_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_void(&self) -> bool {
        self.0 == VOID_SCENE_ID
    }
}

impl From<&str> for SceneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SceneId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transition the player can take out of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub description: String,
    pub target: SceneId,
    /// Applied in order when the choice is taken.
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl Choice {
    /// Create a choice with no effects.
    pub fn new(description: impl Into<String>, target: impl Into<SceneId>) -> Self {
        Self {
            description: description.into(),
            target: target.into(),
            effects: Vec::new(),
        }
    }

    /// Append an effect to this choice.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// A node of the story graph.
///
/// Choices are kept as an ordered list of `(identifier, Choice)` pairs: the
/// declared order is observable through narration and the resolver's
/// tie-breaks, so it must not depend on map iteration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub title: String,
    pub description: String,
    pub choices: Vec<(String, Choice)>,
}

impl Scene {
    /// Create a scene with no choices.
    pub fn new(
        id: impl Into<SceneId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            choices: Vec::new(),
        }
    }

    /// The featureless dead end used for any scene ID the catalog lacks.
    pub fn void() -> Self {
        Self::new(
            SceneId::void(),
            "The Void",
            "You drift in a featureless void. There is nothing to see, nothing to touch, and no way onward.",
        )
    }

    /// Append a choice; declaration order is preserved.
    pub fn with_choice(mut self, id: impl Into<String>, choice: Choice) -> Self {
        self.choices.push((id.into(), choice));
        self
    }

    /// Look up a choice by its identifier.
    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices
            .iter()
            .find(|(choice_id, _)| choice_id == id)
            .map(|(_, choice)| choice)
    }

    /// Iterate over choice identifiers in declared order.
    pub fn choice_ids(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|(id, _)| id.as_str())
    }

    /// A scene with no way out.
    pub fn is_dead_end(&self) -> bool {
        self.choices.is_empty()
    }
}
