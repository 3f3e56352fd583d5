#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::Catalog;
    use crate::config::MismatchPolicy;
    use crate::game::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
    use crate::powerups::PowerUpKind;
    use crate::round::{RoundEngine, RoundEvent, RoundSettings, is_round_over};
    use crate::tests::test_utils::{
        active_category, catch_active, create_test_engine, other_category, test_settings,
    };

    #[test]
    fn test_spawn_respects_batch_size() {
        let mut engine = create_test_engine(test_settings());

        assert!(engine.spawn_next().is_some());
        assert!(engine.spawn_next().is_none(), "Batch of one is already full");
        assert_eq!(engine.items().count(), 1);

        let item = engine.active_item().expect("spawned item");
        assert_eq!(item.position.y, 0.0);
        assert!(item.position.x >= 0.0 && item.position.x <= PLAYFIELD_WIDTH);
        assert_eq!(item.vertical_speed, 200.0);
    }

    #[test]
    fn test_larger_batch_fills_on_update() {
        let settings = RoundSettings {
            batch_size: 3,
            ..test_settings()
        };
        let mut engine = create_test_engine(settings);

        let events = engine.update(0.0);
        let spawned = events
            .iter()
            .filter(|e| matches!(e, RoundEvent::Spawned { .. }))
            .count();

        assert_eq!(spawned, 3);
        assert_eq!(engine.items().count(), 3);
    }

    #[test]
    fn test_tick_moves_items_by_speed() {
        let mut engine = create_test_engine(test_settings());
        engine.spawn_next();

        engine.tick(0.5);

        let item = engine.active_item().expect("item still falling");
        assert!((item.position.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_item_reaching_floor_is_missed_once() {
        let mut engine = create_test_engine(test_settings());
        engine.spawn_next();

        let events = engine.tick(3.0);

        let misses = events
            .iter()
            .filter(|e| matches!(e, RoundEvent::Missed { .. }))
            .count();
        assert_eq!(misses, 1);
        assert_eq!(engine.misses(), 1);
        assert!(engine.active_item().is_none());

        // Nothing left to miss
        let events = engine.tick(3.0);
        assert!(events.is_empty());
        assert_eq!(engine.misses(), 1);
    }

    #[test]
    fn test_item_just_above_floor_is_not_missed() {
        let mut engine = create_test_engine(test_settings());
        engine.spawn_next();

        engine.tick(2.9);

        assert_eq!(engine.misses(), 0);
        let item = engine.active_item().expect("item still falling");
        assert!(item.position.y < PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_miss_resets_combo() {
        let mut engine = create_test_engine(test_settings());
        catch_active(&mut engine);
        catch_active(&mut engine);
        assert_eq!(engine.score().combo_streak, 2);

        engine.spawn_next();
        engine.tick(3.0);

        assert_eq!(engine.score().combo_streak, 0);
        assert_eq!(engine.score().max_combo, 2);
    }

    #[test]
    fn test_matching_selection_scores_and_removes_item() {
        let mut engine = create_test_engine(test_settings());
        engine.spawn_next();
        let category = active_category(&engine);

        let events = engine.resolve_selection(category);

        assert!(matches!(
            events.as_slice(),
            [RoundEvent::Caught { points: 10, combo: 1, .. }]
        ));
        assert_eq!(engine.score().score, 10);
        assert!(engine.active_item().is_none());
        assert_eq!(engine.catches(), 1);
        assert_eq!(engine.catches_by_category().get(category.identifier), Some(&1));
    }

    #[test]
    fn test_fourth_catch_earns_double() {
        let mut engine = create_test_engine(test_settings());
        for _ in 0..3 {
            catch_active(&mut engine);
        }
        let events = catch_active(&mut engine);

        assert!(matches!(
            events.as_slice(),
            [RoundEvent::Caught { points: 20, .. }]
        ));
        assert_eq!(engine.score().score, 50);
    }

    #[test]
    fn test_mismatch_leaves_item_falling_by_default() {
        let mut engine = create_test_engine(test_settings());
        catch_active(&mut engine);
        engine.spawn_next();
        let expected = active_category(&engine);
        let wrong = other_category(&engine, expected);

        let events = engine.resolve_selection(wrong);

        assert_eq!(
            events,
            vec![RoundEvent::Mismatch {
                expected,
                selected: wrong,
                removed: false,
            }]
        );
        assert_eq!(engine.score().combo_streak, 0);
        assert_eq!(engine.mismatches(), 1);
        assert_eq!(engine.items().count(), 1);

        // The same item can still be caught
        let events = engine.resolve_selection(expected);
        assert!(matches!(events.as_slice(), [RoundEvent::Caught { .. }]));
    }

    #[test]
    fn test_mismatch_can_remove_item() {
        let settings = RoundSettings {
            mismatch_policy: MismatchPolicy::RemoveItem,
            ..test_settings()
        };
        let mut engine = create_test_engine(settings);
        engine.spawn_next();
        let expected = active_category(&engine);
        let wrong = other_category(&engine, expected);

        let events = engine.resolve_selection(wrong);

        assert!(matches!(
            events.as_slice(),
            [RoundEvent::Mismatch { removed: true, .. }]
        ));
        assert!(engine.active_item().is_none());
        assert_eq!(engine.misses(), 0, "A wrong basket is not a miss");
    }

    #[test]
    fn test_selection_without_item_is_noop() {
        let mut engine = create_test_engine(test_settings());
        let events = engine.resolve_selection(Catalog::fruits().get(0).expect("apple"));

        assert!(events.is_empty());
        assert_eq!(engine.score().score, 0);
        assert_eq!(engine.mismatches(), 0);
    }

    #[test]
    fn test_second_selection_in_same_tick_finds_nothing() {
        let mut engine = create_test_engine(test_settings());
        engine.spawn_next();
        let category = active_category(&engine);

        let first = engine.resolve_selection(category);
        let second = engine.resolve_selection(category);

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(engine.score().score, 10);
    }

    #[test]
    fn test_select_receptacle_out_of_range_is_noop() {
        let mut engine = create_test_engine(test_settings());
        engine.spawn_next();

        assert!(engine.select_receptacle(4).is_empty());
        assert!(engine.select_receptacle(usize::MAX).is_empty());
        assert_eq!(engine.items().count(), 1);
    }

    #[test]
    fn test_select_receptacle_resolves_its_category() {
        let mut engine = create_test_engine(test_settings());
        engine.spawn_next();
        let category = active_category(&engine);
        let index = engine
            .receptacles()
            .iter()
            .position(|r| r.category == category)
            .expect("every category has a receptacle");

        let events = engine.select_receptacle(index);

        assert!(matches!(events.as_slice(), [RoundEvent::Caught { .. }]));
    }

    #[test]
    fn test_double_points_power_up() {
        let mut engine = create_test_engine(test_settings());
        engine.apply_power_up(PowerUpKind::DoublePoints);

        let events = catch_active(&mut engine);

        assert!(matches!(
            events.as_slice(),
            [RoundEvent::Caught { points: 20, .. }]
        ));
    }

    #[test]
    fn test_slow_motion_halves_fall_speed() {
        let mut engine = create_test_engine(test_settings());
        engine.apply_power_up(PowerUpKind::SlowMotion);
        engine.spawn_next();

        engine.tick(1.0);

        let item = engine.active_item().expect("item still falling");
        assert!((item.position.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_power_up_expiry_is_reported() {
        let mut engine = create_test_engine(test_settings());
        engine.apply_power_up(PowerUpKind::SlowMotion);

        let events = engine.tick(10.5);

        assert!(events.contains(&RoundEvent::PowerUpExpired(PowerUpKind::SlowMotion)));
        assert!(!engine.power_ups().is_active(PowerUpKind::SlowMotion));
    }

    #[test]
    fn test_combo_booster_adds_streak() {
        let mut engine = create_test_engine(test_settings());
        engine.apply_power_up(PowerUpKind::ComboBooster);

        assert_eq!(engine.score().combo_streak, 3);
        assert!(engine.power_ups().active().is_empty());
    }

    #[test]
    fn test_special_item_grants_power_up() {
        let settings = RoundSettings {
            special_item_chance: 1.0,
            ..test_settings()
        };
        let mut engine = create_test_engine(settings);

        let events = catch_active(&mut engine);

        assert!(matches!(
            events.as_slice(),
            [RoundEvent::Caught { special: true, .. }, RoundEvent::PowerUp(_)]
        ));
    }

    #[test]
    fn test_speed_multiplier_applies_to_spawns() {
        let settings = RoundSettings {
            speed_multiplier: 1.5,
            ..test_settings()
        };
        let mut engine = create_test_engine(settings);
        engine.spawn_next();

        let item = engine.active_item().expect("spawned item");
        assert!((item.vertical_speed - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_starts_fresh_round() {
        let mut engine = create_test_engine(test_settings());
        catch_active(&mut engine);
        engine.spawn_next();
        engine.tick(3.0);

        engine.reset();

        assert_eq!(engine.score().score, 0);
        assert_eq!(engine.misses(), 0);
        assert_eq!(engine.catches(), 0);
        assert_eq!(engine.elapsed(), 0.0);
        assert_eq!(engine.items().count(), 0);
        assert_eq!(engine.receptacles().len(), 4);
    }

    #[test]
    fn test_restart_applies_new_settings() {
        let mut engine = create_test_engine(test_settings());
        catch_active(&mut engine);
        engine.spawn_next();

        let settings = RoundSettings {
            speed_multiplier: 1.3,
            multiplier_cap: 2,
            ..test_settings()
        };
        engine.restart(settings.clone(), fastrand::Rng::with_seed(9));

        assert_eq!(engine.settings(), &settings);
        assert_eq!(engine.score().score, 0);
        assert_eq!(engine.catches(), 0);
        assert_eq!(engine.items().count(), 0);

        for _ in 0..9 {
            catch_active(&mut engine);
        }
        assert_eq!(engine.score().multiplier(), 2, "New cap applies after restart");
    }

    #[test]
    fn test_empty_catalog_never_spawns() {
        let mut engine = RoundEngine::new(
            Catalog::new(Vec::new()),
            test_settings(),
            fastrand::Rng::with_seed(1),
        );

        assert!(engine.update(1.0).is_empty());
        assert!(engine.receptacles().is_empty());
        assert!(engine.select_receptacle(0).is_empty());
    }

    #[test]
    fn test_summary_reflects_round() {
        let mut engine = create_test_engine(test_settings());
        catch_active(&mut engine);
        catch_active(&mut engine);
        engine.spawn_next();
        engine.tick(3.0);

        let summary = engine.summary();
        assert_eq!(summary.score, 20);
        assert_eq!(summary.catches, 2);
        assert_eq!(summary.misses, 1);
        assert_eq!(summary.max_combo, 2);
        assert_eq!(summary.best_clean_streak, 2);
        assert!((summary.elapsed - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_mismatch_breaks_clean_streak() {
        let mut engine = create_test_engine(test_settings());
        for _ in 0..3 {
            catch_active(&mut engine);
        }
        engine.spawn_next();
        let expected = active_category(&engine);
        engine.resolve_selection(other_category(&engine, expected));
        // The item is still falling, so a second try catches it
        engine.resolve_selection(expected);

        assert_eq!(engine.catches(), 4);
        assert_eq!(engine.mismatches(), 1);
        assert_eq!(engine.best_clean_streak(), 3);
    }

    #[test]
    fn test_miss_breaks_clean_streak() {
        let mut engine = create_test_engine(test_settings());
        catch_active(&mut engine);
        catch_active(&mut engine);
        engine.spawn_next();
        engine.tick(3.0);
        catch_active(&mut engine);

        assert_eq!(engine.catches(), 3);
        assert_eq!(engine.misses(), 1);
        assert_eq!(engine.best_clean_streak(), 2);
    }

    #[test]
    fn test_is_round_over() {
        assert!(!is_round_over(0, 3));
        assert!(!is_round_over(2, 3));
        assert!(is_round_over(3, 3));
        assert!(is_round_over(4, 3));
    }
}
