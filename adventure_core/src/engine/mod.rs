//! Adventure Engine - the operations a conversational driver invokes per turn.
//!
//! The engine itself is stateless between turns: each conversation owns a
//! [`ConversationContext`] holding its [`SessionState`], and the driver hands
//! that context to every call. Calls for one conversation must be serialised
//! by the driver; the engine takes no locks.
//!
//! No operation fails. Unresolvable actions and unknown scenes come back as
//! narratable re-prompts, because a live voice conversation has no better
//! recovery than saying something sensible.

use adventure_rules::{apply_effects, SceneCatalog, SessionState};
use std::sync::Arc;

use crate::action_resolver::resolve;
use crate::config::EngineConfig;
use crate::narration::Narrator;

/// Per-conversation slot the driver owns and passes to every operation.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    session: Option<SessionState>,
}

impl ConversationContext {
    /// Create a context with no session installed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context around an existing session.
    pub fn with_session(session: SessionState) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// The installed session, if any.
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Install a session, replacing any previous one.
    pub fn install(&mut self, session: SessionState) {
        self.session = Some(session);
    }
}

/// The dialogue engine: story graph plus narration settings.
#[derive(Debug, Clone)]
pub struct AdventureEngine {
    catalog: Arc<SceneCatalog>,
    narrator: Narrator,
}

impl AdventureEngine {
    /// Create an engine over a loaded catalog.
    pub fn new(catalog: Arc<SceneCatalog>, config: EngineConfig) -> Self {
        Self {
            catalog,
            narrator: Narrator::new(config),
        }
    }

    /// Create an engine over the built-in story with default settings.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(SceneCatalog::builtin()), EngineConfig::default())
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    /// Create a context with a fresh session already installed.
    pub fn new_conversation(&self) -> ConversationContext {
        ConversationContext::with_session(self.fresh_session(None))
    }

    /// Begin (or begin again) the adventure.
    ///
    /// Resets the session to the entry scene under a new session ID and
    /// returns a greeting followed by the entry scene.
    pub fn start(&self, ctx: &mut ConversationContext, player_name: Option<&str>) -> String {
        let player_name = player_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let greeting = self.narrator.config().greeting_for(player_name.as_deref());

        let state = self.reset(ctx, player_name);
        tracing::info!(
            session = %state.session_id(),
            player = state.player_name().unwrap_or("<anonymous>"),
            "adventure started"
        );

        let scene = self.narrator.render_current(&self.catalog, state);
        self.narrator.ensure_cue(format!("{}\n\n{}", greeting, scene))
    }

    /// Narrate the current scene without changing anything.
    pub fn get_current_scene(&self, ctx: &mut ConversationContext) -> String {
        let state = self.session_mut(ctx);
        let scene = self.narrator.render_current(&self.catalog, state);
        self.narrator.ensure_cue(scene)
    }

    /// Resolve a spoken action against the current scene and take it.
    ///
    /// An unmatched action changes nothing and re-prompts with the current
    /// scene. A matched action applies the choice's effects, records the
    /// transition and narrates the target scene.
    pub fn act(&self, ctx: &mut ConversationContext, raw_action: &str) -> String {
        let catalog = &*self.catalog;
        let state = self.session_mut(ctx);
        let from = catalog.scene_or_void(state.current_scene());

        let taken = resolve(raw_action, from)
            .and_then(|hit| from.choice(hit.choice_id).map(|choice| (hit.choice_id, choice)));

        let Some((choice_id, choice)) = taken else {
            tracing::info!(
                session = %state.session_id(),
                scene = %from.id,
                action = raw_action,
                "action not understood"
            );
            let text = format!(
                "{}\n\n{}",
                self.narrator.config().not_understood,
                self.narrator.render_scene(from)
            );
            return self.narrator.ensure_cue(text);
        };

        apply_effects(&choice.effects, state);
        state.record_transition(choice_id, choice.target.clone());

        let to = catalog.scene_or_void(&choice.target);
        tracing::info!(
            session = %state.session_id(),
            from = %from.id,
            to = %to.id,
            action = choice_id,
            effects = choice.effects.len(),
            "scene transition"
        );

        let text = format!(
            "{}\n\n{}",
            self.narrator.render_transition_note(from, choice_id, to),
            self.narrator.render_scene(to)
        );
        self.narrator.ensure_cue(text)
    }

    /// Reset the adventure; same as `start` without a player name.
    pub fn restart(&self, ctx: &mut ConversationContext) -> String {
        let state = self.reset(ctx, None);
        tracing::info!(session = %state.session_id(), "adventure restarted");

        let scene = self.narrator.render_current(&self.catalog, state);
        self.narrator.ensure_cue(format!(
            "{}\n\n{}",
            self.narrator.config().restart_greeting,
            scene
        ))
    }

    /// Read out the journal, inventory and recent history.
    pub fn show_journal(&self, ctx: &mut ConversationContext) -> String {
        let state = self.session_mut(ctx);
        self.narrator.render_journal(state)
    }

    fn fresh_session(&self, player_name: Option<String>) -> SessionState {
        SessionState::new(self.catalog.entry().clone(), player_name)
    }

    fn reset<'c>(
        &self,
        ctx: &'c mut ConversationContext,
        player_name: Option<String>,
    ) -> &'c SessionState {
        match ctx.session.as_mut() {
            Some(state) => state.reset(self.catalog.entry().clone(), player_name),
            None => ctx.install(self.fresh_session(player_name)),
        }
        self.session_mut(ctx)
    }

    fn session_mut<'c>(&self, ctx: &'c mut ConversationContext) -> &'c mut SessionState {
        ctx.session.get_or_insert_with(|| {
            let state = self.fresh_session(None);
            tracing::info!(session = %state.session_id(), "installed session for new conversation");
            state
        })
    }
}
