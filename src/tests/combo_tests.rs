#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::combo::ScoreState;

    #[test]
    fn test_three_catches_double_multiplier() {
        let mut score = ScoreState::default();
        for _ in 0..3 {
            score.register_catch();
        }

        assert_eq!(score.combo_streak, 3);
        assert_eq!(score.multiplier(), 2);
    }

    #[test]
    fn test_multiplier_is_capped() {
        let mut score = ScoreState::default();
        for _ in 0..12 {
            score.register_catch();
        }
        assert_eq!(score.multiplier(), 5);

        for _ in 0..30 {
            score.register_catch();
        }
        assert_eq!(score.multiplier(), 5, "Multiplier should never exceed the cap");
    }

    #[test]
    fn test_multiplier_never_decreases_while_streak_grows() {
        let mut score = ScoreState::default();
        let mut previous = score.multiplier();
        for _ in 0..40 {
            score.register_catch();
            let current = score.multiplier();
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_award_uses_multiplier_before_increment() {
        let mut score = ScoreState::default();

        // Streak 0 -> x1
        assert_eq!(score.award(10), 10);
        assert_eq!(score.award(10), 10);
        assert_eq!(score.award(10), 10);

        // Streak is now 3 -> x2
        assert_eq!(score.award(10), 20);
        assert_eq!(score.score, 50);
        assert_eq!(score.combo_streak, 4);
    }

    #[test]
    fn test_miss_and_mismatch_reset_combo() {
        let mut score = ScoreState::default();
        score.register_catch();
        score.register_catch();
        score.register_miss();

        assert_eq!(score.combo_streak, 0);
        assert_eq!(score.combo_decay_remaining, 0.0);
        assert_eq!(score.max_combo, 2, "Best combo survives a miss");

        score.register_catch();
        score.register_mismatch();
        assert_eq!(score.combo_streak, 0);
        assert_eq!(score.multiplier(), 1);
    }

    #[test]
    fn test_combo_decays_after_window() {
        let mut score = ScoreState::new(2.0, 5);
        score.register_catch();
        assert_eq!(score.combo_decay_remaining, 2.0);

        score.tick(1.0);
        assert_eq!(score.combo_streak, 1);

        score.tick(1.5);
        assert_eq!(score.combo_streak, 0);
        assert!(score.combo_decay_remaining >= 0.0);
    }

    #[test]
    fn test_catch_refreshes_decay_window() {
        let mut score = ScoreState::new(2.0, 5);
        score.register_catch();
        score.tick(1.5);
        score.register_catch();
        score.tick(1.5);

        assert_eq!(score.combo_streak, 2);
    }

    #[test]
    fn test_boost_extends_streak() {
        let mut score = ScoreState::default();
        score.register_catch();
        score.boost(3);

        assert_eq!(score.combo_streak, 4);
        assert_eq!(score.max_combo, 4);
        assert_eq!(score.multiplier(), 2);
    }

    #[test]
    fn test_reset_keeps_tuning() {
        let mut score = ScoreState::new(1.0, 2);
        for _ in 0..10 {
            score.award(10);
        }
        score.reset();

        assert_eq!(score.score, 0);
        assert_eq!(score.combo_streak, 0);
        assert_eq!(score.max_combo, 0);

        for _ in 0..10 {
            score.register_catch();
        }
        assert_eq!(score.multiplier(), 2, "Cap should survive a reset");
    }
}
