//! The built-in adventure, "The Misty Tower".

use super::{Choice, Scene, SceneCatalog, SceneId};
use crate::effects::Effect;

/// Journal line written when the player takes the map from the box.
pub const MAP_JOURNAL_ENTRY: &str =
    "Found a map marking a hidden door behind the ivy at the foot of the tower.";

/// Entry scene of the built-in adventure.
pub const BUILTIN_ENTRY: &str = "intro";

impl SceneCatalog {
    /// The built-in story graph.
    pub fn builtin() -> Self {
        SceneCatalog::new(BUILTIN_ENTRY)
            .with_scene(
                Scene::new(
                    BUILTIN_ENTRY,
                    "The Forest Edge",
                    "You wake at the edge of a misty forest. Half-buried in the moss beside you \
                     lies a weathered wooden box, and through the trees a crooked stone tower \
                     rises above the fog.",
                )
                .with_choice(
                    "inspect_box",
                    Choice::new("Inspect weathered wooden box", "box"),
                )
                .with_choice(
                    "follow_path",
                    Choice::new("Follow overgrown path toward the tower", "tower_approach"),
                )
                .with_choice(
                    "call_out",
                    Choice::new("Shout into mist", "mist_echo").with_effect(
                        Effect::add_journal("Something in the mist answered with your name."),
                    ),
                ),
            )
            .with_scene(
                Scene::new(
                    "box",
                    "The Wooden Box",
                    "The lid creaks open. Inside, wrapped in oilcloth, lies a folded map beside \
                     a small brass key.",
                )
                .with_choice(
                    "take_map",
                    Choice::new("Study folded map before setting off", "tower_approach")
                        .with_effect(Effect::add_journal(MAP_JOURNAL_ENTRY))
                        .with_effect(Effect::add_inventory("map")),
                )
                .with_choice(
                    "take_key",
                    Choice::new("Pocket brass key", BUILTIN_ENTRY)
                        .with_effect(Effect::add_inventory("brass_key"))
                        .with_effect(Effect::add_journal("Took a small brass key from the box.")),
                )
                .with_choice(
                    "close_lid",
                    Choice::new("Close lid and step back", BUILTIN_ENTRY),
                ),
            )
            .with_scene(
                Scene::new(
                    "tower_approach",
                    "The Tower Approach",
                    "The path ends at the foot of the crooked tower. An iron door is set into \
                     the wall, and ivy hangs thick over the stones to its left.",
                )
                .with_choice("try_door", Choice::new("Try iron door", "locked_door"))
                .with_choice(
                    "part_ivy",
                    Choice::new("Part ivy along wall", "hidden_stair").with_effect(
                        Effect::add_journal("Behind the ivy, a narrow door stood open."),
                    ),
                )
                .with_choice(
                    "return_forest",
                    Choice::new("Walk back toward forest edge", BUILTIN_ENTRY),
                ),
            )
            .with_scene(
                Scene::new(
                    "locked_door",
                    "The Iron Door",
                    "The iron door does not budge. A keyhole, green with age, stares back at you.",
                )
                .with_choice(
                    "use_key",
                    Choice::new("Unlock door with brass key", "tower_hall").with_effect(
                        Effect::add_journal("The iron door swung open onto a dusty hall."),
                    ),
                )
                .with_choice(
                    "step_back",
                    Choice::new("Step away from door", "tower_approach"),
                ),
            )
            .with_scene(
                Scene::new(
                    "hidden_stair",
                    "The Hidden Stair",
                    "A narrow spiral stair climbs into darkness. Somewhere above, wind moans \
                     through an open window.",
                )
                .with_choice("climb_stair", Choice::new("Climb spiral stair", "tower_top"))
                .with_choice(
                    "leave_stair",
                    Choice::new("Leave stairwell", "tower_approach"),
                ),
            )
            .with_scene(
                Scene::new(
                    "tower_hall",
                    "The Tower Hall",
                    "Dust lies thick on a long oak table. A lantern hangs from a hook beside \
                     the stairs.",
                )
                .with_choice(
                    "take_lantern",
                    Choice::new("Grab lantern from its hook", "tower_hall")
                        .with_effect(Effect::add_inventory("lantern")),
                )
                .with_choice(
                    "climb_stairs",
                    Choice::new("Climb stairs toward the top", "tower_top"),
                )
                .with_choice(
                    "go_outside",
                    Choice::new("Leave through iron door", "tower_approach"),
                ),
            )
            .with_scene(
                Scene::new(
                    "tower_top",
                    "The Tower Top",
                    "Wind tears at your clothes. Below, the forest rolls away into fog, and in \
                     the middle of the floor a shimmering rift hangs in the air.",
                )
                .with_choice(
                    "enter_rift",
                    Choice::new("Step into shimmering rift", SceneId::void())
                        .with_effect(Effect::add_journal("You stepped into the rift.")),
                )
                .with_choice(
                    "descend",
                    Choice::new("Descend stairs toward hall", "tower_hall"),
                ),
            )
            .with_scene(
                Scene::new(
                    "mist_echo",
                    "Echoes in the Mist",
                    "Your voice comes back to you from every direction at once, and then, \
                     softly, something answers with your name.",
                )
                .with_choice(
                    "follow_voice",
                    Choice::new("Follow answering voice", "tower_approach").with_effect(
                        Effect::add_journal("A voice in the mist led you to the tower."),
                    ),
                )
                .with_choice(
                    "return_edge",
                    Choice::new("Walk back toward forest edge", BUILTIN_ENTRY),
                ),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let catalog = SceneCatalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.entry(), &SceneId::new(BUILTIN_ENTRY));
    }

    #[test]
    fn test_take_map_declares_map_entry() {
        let catalog = SceneCatalog::builtin();
        let take_map = catalog
            .lookup(&SceneId::new("box"))
            .and_then(|scene| scene.choice("take_map"))
            .unwrap();

        assert_eq!(take_map.target, SceneId::new("tower_approach"));
        let journal_effects: Vec<_> = take_map
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::AddJournal { .. }))
            .collect();
        assert_eq!(journal_effects, vec![&Effect::add_journal(MAP_JOURNAL_ENTRY)]);
    }

    #[test]
    fn test_inspect_box_has_no_effects() {
        let catalog = SceneCatalog::builtin();
        let inspect = catalog
            .lookup(&SceneId::new(BUILTIN_ENTRY))
            .and_then(|scene| scene.choice("inspect_box"))
            .unwrap();

        assert!(inspect.effects.is_empty());
        assert_eq!(inspect.target, SceneId::new("box"));
    }

    #[test]
    fn test_every_scene_has_a_way_out() {
        let catalog = SceneCatalog::builtin();
        assert!(catalog.scenes().all(|scene| !scene.is_dead_end()));
    }
}
