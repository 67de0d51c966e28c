//! Action Resolver - maps a free-form utterance to a choice of the current scene.
//!
//! Matching runs in three tiers; the first tier that produces a match wins,
//! and inside a tier the first choice in the scene's declared order wins:
//!
//! 1. **Exact**: the trimmed, lower-cased utterance equals a choice identifier
//! 2. **Leading words**: the identifier, or one of the first four words of the
//!    choice description, occurs inside the utterance
//! 3. **Keyword**: any word of the choice description occurs inside the utterance
//!
//! Precision comes first and recall last. Two choices may share words, so
//! tier order and declared order decide the outcome; do not collapse the tiers
//! into a single score.

use adventure_rules::Scene;

/// Number of description words consulted by the leading-words tier.
pub const LEADING_WORDS: usize = 4;

/// Which tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    LeadingWords,
    Keyword,
}

/// A successful resolution against a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub choice_id: &'a str,
    pub tier: MatchTier,
}

/// Resolve an utterance against the choices of `scene`.
///
/// Returns `None` when no tier matches; that is an ordinary outcome the
/// caller turns into a re-prompt.
pub fn resolve<'a>(raw_action: &str, scene: &'a Scene) -> Option<Resolution<'a>> {
    let action = raw_action.trim().to_lowercase();

    let resolution = exact_match(&action, scene)
        .map(|choice_id| Resolution {
            choice_id,
            tier: MatchTier::Exact,
        })
        .or_else(|| {
            leading_words_match(&action, scene).map(|choice_id| Resolution {
                choice_id,
                tier: MatchTier::LeadingWords,
            })
        })
        .or_else(|| {
            keyword_match(&action, scene).map(|choice_id| Resolution {
                choice_id,
                tier: MatchTier::Keyword,
            })
        });

    match &resolution {
        Some(hit) => tracing::debug!(
            scene = %scene.id,
            action = %action,
            choice = hit.choice_id,
            tier = ?hit.tier,
            "resolved player action"
        ),
        None => tracing::debug!(scene = %scene.id, action = %action, "no choice matched"),
    }

    resolution
}

/// Resolve an utterance to a choice identifier.
pub fn resolve_action<'a>(raw_action: &str, scene: &'a Scene) -> Option<&'a str> {
    resolve(raw_action, scene).map(|hit| hit.choice_id)
}

fn exact_match<'a>(action: &str, scene: &'a Scene) -> Option<&'a str> {
    scene
        .choices
        .iter()
        .find(|(id, _)| id == action)
        .map(|(id, _)| id.as_str())
}

fn leading_words_match<'a>(action: &str, scene: &'a Scene) -> Option<&'a str> {
    scene
        .choices
        .iter()
        .find(|(id, choice)| {
            action.contains(id.as_str())
                || choice
                    .description
                    .split_whitespace()
                    .take(LEADING_WORDS)
                    .any(|word| action.contains(&word.to_lowercase()))
        })
        .map(|(id, _)| id.as_str())
}

fn keyword_match<'a>(action: &str, scene: &'a Scene) -> Option<&'a str> {
    for (id, choice) in &scene.choices {
        for word in choice.description.split_whitespace() {
            if action.contains(&word.to_lowercase()) {
                return Some(id.as_str());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use adventure_rules::Choice;

    fn crossroads() -> Scene {
        Scene::new("crossroads", "Crossroads", "Roads meet here.")
            .with_choice("go_north", Choice::new("Walk north toward distant lighthouse", "north"))
            .with_choice("go_south", Choice::new("Wander south into marsh", "south"))
            .with_choice("rest", Choice::new("Sit by old milestone and rest a while", "crossroads"))
    }

    #[test]
    fn test_exact_match() {
        let scene = crossroads();
        let hit = resolve("  GO_SOUTH ", &scene).unwrap();

        assert_eq!(hit.choice_id, "go_south");
        assert_eq!(hit.tier, MatchTier::Exact);
    }

    #[test]
    fn test_identifier_inside_utterance() {
        let scene = crossroads();
        let hit = resolve("i choose go_south please", &scene).unwrap();

        assert_eq!(hit.choice_id, "go_south");
        assert_eq!(hit.tier, MatchTier::LeadingWords);
    }

    #[test]
    fn test_leading_description_word() {
        let scene = crossroads();
        let hit = resolve("I want to wander for a bit", &scene).unwrap();

        assert_eq!(hit.choice_id, "go_south");
        assert_eq!(hit.tier, MatchTier::LeadingWords);
    }

    #[test]
    fn test_keyword_beyond_leading_words() {
        let scene = crossroads();
        // "lighthouse" is the fifth word of go_north's description.
        let hit = resolve("head for the lighthouse", &scene).unwrap();

        assert_eq!(hit.choice_id, "go_north");
        assert_eq!(hit.tier, MatchTier::Keyword);
    }

    #[test]
    fn test_keyword_tier_scans_choices_in_order() {
        let scene = crossroads();
        // Only words past the rest description's first four occur here.
        let hit = resolve("wait a while", &scene).unwrap();

        assert_eq!(hit.choice_id, "rest");
        assert_eq!(hit.tier, MatchTier::Keyword);
    }

    #[test]
    fn test_no_match() {
        let scene = crossroads();
        assert!(resolve("xyzzy", &scene).is_none());
        assert!(resolve_action("", &scene).is_none());
        assert!(resolve_action("   ", &scene).is_none());
    }

    #[test]
    fn test_shared_keyword_prefers_declared_order() {
        let scene = Scene::new("shore", "Shore", "Waves.")
            .with_choice("inspect_boat", Choice::new("Inspect the boat", "boat"))
            .with_choice("board_boat", Choice::new("Board the boat", "sea"));

        assert_eq!(resolve_action("boat", &scene), Some("inspect_boat"));

        let reversed = Scene::new("shore", "Shore", "Waves.")
            .with_choice("board_boat", Choice::new("Board the boat", "sea"))
            .with_choice("inspect_boat", Choice::new("Inspect the boat", "boat"));

        assert_eq!(resolve_action("boat", &reversed), Some("board_boat"));
    }

    #[test]
    fn test_exact_beats_earlier_loose_match() {
        // The earlier description leads with "rest", but the exact tier runs first.
        let scene = Scene::new("glade", "Glade", "Quiet.")
            .with_choice("nap", Choice::new("Rest under the oak", "glade"))
            .with_choice("rest", Choice::new("Lie down", "glade"));

        assert_eq!(resolve_action("rest", &scene), Some("rest"));
    }

    #[test]
    fn test_case_insensitive_description_words() {
        let scene = Scene::new("gate", "Gate", "A gate.")
            .with_choice("enter", Choice::new("Knock on the Gate", "inside"));

        assert_eq!(resolve_action("KNOCK loudly", &scene), Some("enter"));
    }

    #[test]
    fn test_scene_without_choices() {
        let scene = Scene::void();
        assert!(resolve_action("anything at all", &scene).is_none());
    }
}
