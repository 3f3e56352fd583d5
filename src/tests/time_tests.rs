#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::Time;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_time_starts_at_zero() {
        let time = Time::new();

        assert_eq!(time.delta_seconds(), 0.0);
        assert_eq!(time.elapsed_seconds(), 0.0);
    }

    #[test]
    fn test_time_update_measures_wall_clock() {
        let mut time = Time::new();

        sleep(Duration::from_millis(10));
        time.update();

        assert!(time.delta_seconds() >= 0.01);
        assert!(time.elapsed_seconds() >= time.delta_seconds());
    }

    #[test]
    fn test_advance_is_exact() {
        let mut time = Time::default();

        time.advance(0.25);
        time.advance(0.5);

        assert!((time.delta_seconds() - 0.5).abs() < 1e-6);
        assert!((time.elapsed_seconds() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_negative_advance_is_ignored() {
        let mut time = Time::new();

        time.advance(-1.0);

        assert_eq!(time.delta_seconds(), 0.0);
        assert_eq!(time.elapsed_seconds(), 0.0);
    }
}
