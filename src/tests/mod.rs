#![warn(clippy::all, clippy::pedantic)]

pub mod combo_tests;
pub mod components_tests;
pub mod powerups_tests;
pub mod round_tests;
pub mod time_tests;

// Import test utilities
#[cfg(test)]
pub mod test_utils {
    use crate::components::{Catalog, Category, ScreenShake};
    use crate::config::{GameplayConfig, WidgetStyle};
    use crate::persistence::MemoryStore;
    use crate::round::{RoundEngine, RoundEvent, RoundSettings};
    use crate::screen::ScreenMachine;
    use bevy_ecs::prelude::*;

    // Helper function to create a world holding the effect resources
    #[must_use]
    pub fn create_test_world() -> World {
        let mut world = World::new();
        world.insert_resource(ScreenShake::default());
        world.insert_resource(crate::Time::new());
        world
    }

    // Deterministic gameplay: fixed seed, no special items
    #[must_use]
    pub fn test_gameplay() -> GameplayConfig {
        GameplayConfig {
            special_item_chance: 0.0,
            seed: Some(7),
            ..GameplayConfig::default()
        }
    }

    #[must_use]
    pub fn test_settings() -> RoundSettings {
        RoundSettings::from(&test_gameplay())
    }

    #[must_use]
    pub fn create_test_engine(settings: RoundSettings) -> RoundEngine {
        RoundEngine::new(Catalog::fruits(), settings, fastrand::Rng::with_seed(7))
    }

    #[must_use]
    pub fn create_test_machine(config: GameplayConfig) -> ScreenMachine<MemoryStore> {
        ScreenMachine::new(
            config,
            Catalog::fruits(),
            WidgetStyle::Plain,
            MemoryStore::default(),
        )
    }

    // Confirms "Start" on the menu and lets the next dispatch apply it
    pub fn start_round(machine: &mut ScreenMachine<MemoryStore>) {
        machine.handle_input(crate::input::InputEvent::Confirm);
        machine.update(0.0);
    }

    // Category of the item the next selection is judged against
    #[must_use]
    pub fn active_category(engine: &RoundEngine) -> Category {
        engine
            .active_item()
            .map(|item| item.category)
            .expect("a falling item")
    }

    // Some category other than `category`
    #[must_use]
    pub fn other_category(engine: &RoundEngine, category: Category) -> Category {
        *engine
            .catalog()
            .iter()
            .find(|c| **c != category)
            .expect("catalog has more than one category")
    }

    // Catches whatever is falling, spawning first when needed
    pub fn catch_active(engine: &mut RoundEngine) -> Vec<RoundEvent> {
        if engine.active_item().is_none() {
            engine.spawn_next();
        }
        let category = active_category(engine);
        engine.resolve_selection(category)
    }
}
