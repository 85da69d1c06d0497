use glam::Vec2;
use proptest::prelude::*;
use tactics_core::{MAP_COLS, MAP_ROWS, MAX_SCALE, MIN_SCALE, TILE_SIZE};
use tactics_system_camera::{Camera, Minimap};

fn viewport() -> impl Strategy<Value = Vec2> {
    (0.0f32..2500.0, 0.0f32..2500.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn assert_clamped(camera: &Camera) -> Result<(), TestCaseError> {
    let limit_x =
        (MAP_COLS as f32 * TILE_SIZE as f32 * camera.scale() - camera.viewport().x).max(0.0);
    let limit_y =
        (MAP_ROWS as f32 * TILE_SIZE as f32 * camera.scale() - camera.viewport().y).max(0.0);
    prop_assert!(camera.scale() >= MIN_SCALE && camera.scale() <= MAX_SCALE);
    prop_assert!(camera.scroll().x >= 0.0 && camera.scroll().x <= limit_x + 1e-3);
    prop_assert!(camera.scroll().y >= 0.0 && camera.scroll().y <= limit_y + 1e-3);
    prop_assert!(camera.map_offset().x >= 0.0 && camera.map_offset().y >= 0.0);
    Ok(())
}

proptest! {
    #[test]
    fn any_operation_sequence_stays_clamped(
        size in viewport(),
        deltas in prop::collection::vec((-3000.0f32..3000.0, -3000.0f32..3000.0), 0..12),
        wheel in prop::collection::vec(-1.0f32..1.0, 0..12),
        resized in viewport(),
    ) {
        let mut camera = Camera::new(size);
        assert_clamped(&camera)?;

        for (dx, dy) in deltas {
            camera.scroll_by(Vec2::new(dx, dy));
            assert_clamped(&camera)?;
        }
        for delta in wheel {
            camera.zoom(delta, Vec2::new(size.x * 0.5, size.y * 0.5));
            assert_clamped(&camera)?;
        }

        let scale = camera.scale();
        camera.resize(resized);
        prop_assert_eq!(camera.scale(), scale);
        assert_clamped(&camera)?;
    }

    #[test]
    fn unclamped_zoom_preserves_anchor_point(
        start_scroll in (0.0f32..1000.0, 0.0f32..600.0),
        anchor in (0.0f32..640.0, 0.0f32..480.0),
        zoom_in in any::<bool>(),
    ) {
        let mut camera = Camera::new(Vec2::new(640.0, 480.0));
        camera.scroll_to(Vec2::new(start_scroll.0, start_scroll.1));
        let anchor = Vec2::new(anchor.0, anchor.1);
        let before = (anchor + camera.scroll() - camera.map_offset()) / camera.tile_pixels();

        camera.zoom(if zoom_in { -1.0 } else { 1.0 }, anchor);

        let scroll = camera.scroll();
        let limit = camera.max_scroll();
        let interior = scroll.x > 0.0 && scroll.y > 0.0 && scroll.x < limit.x && scroll.y < limit.y;
        prop_assume!(interior);

        let after = (anchor + scroll - camera.map_offset()) / camera.tile_pixels();
        prop_assert!((after - before).abs().max_element() < 1e-3);
    }

    #[test]
    fn minimap_focus_keeps_camera_clamped(
        size in viewport(),
        point in (-50.0f32..250.0, -50.0f32..170.0),
    ) {
        let minimap = Minimap::default();
        let mut camera = Camera::new(size);

        prop_assert!(minimap.focus(&mut camera, Vec2::new(point.0, point.1)));
        assert_clamped(&camera)?;
    }
}
