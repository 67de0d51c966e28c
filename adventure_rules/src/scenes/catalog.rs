//! Scene catalog - the immutable story graph, loaded once at process start.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{Choice, Scene, SceneId};
use crate::effects::Effect;

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("entry scene '{0}' is not in the catalog")]
    MissingEntry(SceneId),

    #[error("scene '{0}' is defined more than once")]
    DuplicateScene(SceneId),

    #[error("scene id '{0}' is reserved for the fallback scene")]
    ReservedSceneId(SceneId),

    #[error("scene '{scene}' declares choice '{choice}' more than once")]
    DuplicateChoice { scene: SceneId, choice: String },

    #[error("choice '{choice}' in scene '{scene}' targets unknown scene '{target}'")]
    DanglingTarget {
        scene: SceneId,
        choice: String,
        target: SceneId,
    },
}

/// The story graph.
///
/// Lookups of unknown IDs never fail for consumers: [`SceneCatalog::scene_or_void`]
/// hands back the featureless void scene instead.
#[derive(Debug, Clone)]
pub struct SceneCatalog {
    entry: SceneId,
    scenes: Vec<Scene>,
    index: HashMap<SceneId, usize>,
    void: Scene,
}

impl SceneCatalog {
    /// Create an empty catalog whose adventure begins at `entry`.
    pub fn new(entry: impl Into<SceneId>) -> Self {
        Self {
            entry: entry.into(),
            scenes: Vec::new(),
            index: HashMap::new(),
            void: Scene::void(),
        }
    }

    /// Add a scene. Run [`SceneCatalog::validate`] once all scenes are in.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.index.insert(scene.id.clone(), self.scenes.len());
        self.scenes.push(scene);
        self
    }

    /// Parse and validate a catalog from a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        let catalog = file.into_catalog();
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse and validate a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            scenes = catalog.len(),
            entry = %catalog.entry,
            "loaded scene catalog"
        );
        Ok(catalog)
    }

    /// Check the graph invariants: the entry exists, IDs are unique, and
    /// every choice target resolves to a scene or the void.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for scene in &self.scenes {
            if scene.id.is_void() {
                return Err(CatalogError::ReservedSceneId(scene.id.clone()));
            }
            if !seen.insert(&scene.id) {
                return Err(CatalogError::DuplicateScene(scene.id.clone()));
            }
        }

        if !self.index.contains_key(&self.entry) {
            return Err(CatalogError::MissingEntry(self.entry.clone()));
        }

        for scene in &self.scenes {
            let mut choice_ids = HashSet::new();
            for (choice_id, choice) in &scene.choices {
                if !choice_ids.insert(choice_id.as_str()) {
                    return Err(CatalogError::DuplicateChoice {
                        scene: scene.id.clone(),
                        choice: choice_id.clone(),
                    });
                }
                if !choice.target.is_void() && !self.index.contains_key(&choice.target) {
                    return Err(CatalogError::DanglingTarget {
                        scene: scene.id.clone(),
                        choice: choice_id.clone(),
                        target: choice.target.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// The scene every session starts in.
    pub fn entry(&self) -> &SceneId {
        &self.entry
    }

    /// Get a scene by ID.
    pub fn lookup(&self, id: &SceneId) -> Option<&Scene> {
        self.index.get(id).map(|&i| &self.scenes[i])
    }

    /// Get a scene by ID, falling back to the void for unknown IDs.
    pub fn scene_or_void(&self, id: &SceneId) -> &Scene {
        match self.lookup(id) {
            Some(scene) => scene,
            None => {
                if !id.is_void() {
                    tracing::warn!(scene = %id, "unknown scene, falling back to the void");
                }
                &self.void
            }
        }
    }

    /// All scenes in declaration order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    /// Get the number of scenes, not counting the void.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl Default for SceneCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    entry: String,
    #[serde(default)]
    scenes: Vec<SceneEntry>,
}

#[derive(Debug, Deserialize)]
struct SceneEntry {
    id: String,
    title: String,
    description: String,
    #[serde(default)]
    choices: Vec<ChoiceEntry>,
}

#[derive(Debug, Deserialize)]
struct ChoiceEntry {
    id: String,
    description: String,
    target: String,
    /// Kept untyped so unrecognised effect kinds can be dropped one by one.
    #[serde(default)]
    effects: Vec<toml::Value>,
}

impl CatalogFile {
    fn into_catalog(self) -> SceneCatalog {
        self.scenes
            .into_iter()
            .fold(SceneCatalog::new(self.entry), |catalog, entry| {
                catalog.with_scene(entry.into_scene())
            })
    }
}

impl SceneEntry {
    fn into_scene(self) -> Scene {
        let scene_id = self.id;
        let choices = self
            .choices
            .into_iter()
            .map(|choice| {
                let effects = choice
                    .effects
                    .into_iter()
                    .filter_map(|raw| match raw.clone().try_into::<Effect>() {
                        Ok(effect) => Some(effect),
                        Err(e) => {
                            tracing::warn!(
                                scene = %scene_id,
                                choice = %choice.id,
                                effect = %raw,
                                error = %e,
                                "ignoring unrecognised effect"
                            );
                            None
                        }
                    })
                    .collect();
                let mut parsed = Choice::new(choice.description, choice.target.as_str());
                parsed.effects = effects;
                (choice.id, parsed)
            })
            .collect();

        Scene {
            id: SceneId::new(scene_id),
            title: self.title,
            description: self.description,
            choices,
        }
    }
}
