#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::powerups::{PowerUpKind, PowerUpTimers};

    #[test]
    fn test_activate_starts_full_duration() {
        let mut timers = PowerUpTimers::new();
        timers.activate(PowerUpKind::DoublePoints);

        assert!(timers.is_active(PowerUpKind::DoublePoints));
        assert_eq!(timers.remaining(PowerUpKind::DoublePoints), Some(10.0));
        assert_eq!(timers.points_factor(), 2);
        assert!((timers.time_scale() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reactivation_refreshes_timer() {
        let mut timers = PowerUpTimers::new();
        timers.activate(PowerUpKind::SlowMotion);
        timers.update(7.0);
        timers.activate(PowerUpKind::SlowMotion);

        assert_eq!(timers.remaining(PowerUpKind::SlowMotion), Some(10.0));
        assert_eq!(timers.active().len(), 1, "Refreshing must not stack");
    }

    #[test]
    fn test_update_reports_expiry_once() {
        let mut timers = PowerUpTimers::new();
        timers.activate(PowerUpKind::SlowMotion);
        timers.activate(PowerUpKind::DoublePoints);
        timers.update(4.0);
        timers.activate(PowerUpKind::DoublePoints);

        let expired = timers.update(6.0);
        assert_eq!(expired, vec![PowerUpKind::SlowMotion]);
        assert!(!timers.is_active(PowerUpKind::SlowMotion));
        assert!(timers.is_active(PowerUpKind::DoublePoints));

        assert!(timers.update(1.0).is_empty());
        assert_eq!(timers.update(5.0), vec![PowerUpKind::DoublePoints]);
        assert!(timers.active().is_empty());
    }

    #[test]
    fn test_instant_kind_takes_no_slot() {
        let mut timers = PowerUpTimers::new();
        timers.activate(PowerUpKind::ComboBooster);

        assert!(PowerUpKind::ComboBooster.is_instant());
        assert!(!timers.is_active(PowerUpKind::ComboBooster));
        assert!(timers.active().is_empty());
    }

    #[test]
    fn test_active_is_in_stable_order() {
        let mut timers = PowerUpTimers::new();
        timers.activate(PowerUpKind::SlowMotion);
        timers.activate(PowerUpKind::DoublePoints);

        let kinds: Vec<PowerUpKind> = timers.active().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![PowerUpKind::DoublePoints, PowerUpKind::SlowMotion]
        );
    }

    #[test]
    fn test_slow_motion_scale_and_clear() {
        let mut timers = PowerUpTimers::new();
        timers.activate(PowerUpKind::SlowMotion);
        assert!((timers.time_scale() - 0.5).abs() < f32::EPSILON);

        timers.clear();
        assert!((timers.time_scale() - 1.0).abs() < f32::EPSILON);
        assert_eq!(timers.points_factor(), 1);
    }

    #[test]
    fn test_random_kind_is_known() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..20 {
            let kind = PowerUpKind::random(&mut rng);
            assert!(PowerUpKind::ALL.contains(&kind));
            assert!(!kind.label().is_empty());
        }
    }
}
