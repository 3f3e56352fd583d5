#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::{
        APPLE, BANANA, Catalog, FallingItem, GRAPE, ORANGE, Position, Receptacle,
    };
    use crate::game::{PLAYFIELD_WIDTH, RECEPTACLE_WIDTH, RECEPTACLE_Y};

    fn item_at(x: f32, horizontal_speed: f32) -> FallingItem {
        FallingItem {
            category: APPLE,
            position: Position::new(x, 0.0),
            vertical_speed: 100.0,
            horizontal_speed,
            spawn_time: 0.0,
            special: false,
        }
    }

    #[test]
    fn test_fruit_catalog() {
        let catalog = Catalog::fruits();

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(0), Some(APPLE));
        assert_eq!(catalog.get(3), Some(GRAPE));
        assert_eq!(catalog.get(4), None);

        let ids: Vec<&str> = catalog.iter().map(|c| c.identifier).collect();
        assert_eq!(ids, vec!["apple", "banana", "orange", "grape"]);
    }

    #[test]
    fn test_random_category_comes_from_catalog() {
        let catalog = Catalog::new(vec![BANANA, ORANGE]);
        let mut rng = fastrand::Rng::with_seed(11);

        for _ in 0..20 {
            let category = catalog.random(&mut rng).expect("non-empty catalog");
            assert!(category == BANANA || category == ORANGE);
        }
        assert_eq!(Catalog::new(Vec::new()).random(&mut rng), None);
    }

    #[test]
    fn test_receptacle_layout() {
        let receptacles = Receptacle::layout(&Catalog::fruits());

        let xs: Vec<f32> = receptacles.iter().map(|r| r.position.x).collect();
        assert_eq!(xs, vec![100.0, 300.0, 500.0, 700.0]);
        assert!(receptacles.iter().all(|r| r.position.y == RECEPTACLE_Y));
        assert_eq!(receptacles[1].category, BANANA);
    }

    #[test]
    fn test_hit_region_is_centered_on_receptacle() {
        let receptacles = Receptacle::layout(&Catalog::fruits());

        for receptacle in &receptacles {
            let region = receptacle.hit_region;
            assert!((region.x + region.width / 2.0 - receptacle.position.x).abs() < 1e-3);
            assert_eq!(region.y, RECEPTACLE_Y);
            assert_eq!(region.width, RECEPTACLE_WIDTH);
        }
    }

    #[test]
    fn test_advance_moves_item() {
        let mut item = item_at(400.0, 10.0);

        item.advance(0.5, PLAYFIELD_WIDTH);

        assert!((item.position.y - 50.0).abs() < 1e-4);
        assert!((item.position.x - 405.0).abs() < 1e-4);
    }

    #[test]
    fn test_advance_stays_inside_walls() {
        let mut left = item_at(1.0, -20.0);
        let mut right = item_at(PLAYFIELD_WIDTH - 1.0, 20.0);

        left.advance(1.0, PLAYFIELD_WIDTH);
        right.advance(1.0, PLAYFIELD_WIDTH);

        assert_eq!(left.position.x, 0.0);
        assert_eq!(right.position.x, PLAYFIELD_WIDTH);
    }
}
