#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Viewport transform between canvas pixels and map tiles.
//!
//! The [`Camera`] keeps scroll, zoom scale, and the centring offset used when
//! the scaled map is smaller than the viewport. Every mutation re-establishes
//! the clamping invariants before returning, so collaborators never observe an
//! out-of-range scroll. The [`Minimap`] projects the whole map into a small
//! overview surface and converts overview clicks back into camera targets.

mod minimap;

use glam::Vec2;
use serde::Serialize;
use tactics_core::{
    TileCoord, DEFAULT_SCALE, MAP_COLS, MAP_ROWS, MAX_SCALE, MIN_SCALE, SCROLL_SPEED, TILE_SIZE,
    ZOOM_FACTOR,
};

pub use minimap::{Minimap, OverviewRect};

/// Arrow key directions that scroll the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Reveal the columns to the left.
    Left,
    /// Reveal the columns to the right.
    Right,
    /// Reveal the rows above.
    Up,
    /// Reveal the rows below.
    Down,
}

impl ScrollDirection {
    /// Scroll delta applied by a single key press.
    #[must_use]
    pub fn delta(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-SCROLL_SPEED, 0.0),
            Self::Right => Vec2::new(SCROLL_SPEED, 0.0),
            Self::Up => Vec2::new(0.0, -SCROLL_SPEED),
            Self::Down => Vec2::new(0.0, SCROLL_SPEED),
        }
    }
}

/// Scroll, zoom, and centring state of the main map view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    viewport: Vec2,
    scroll: Vec2,
    scale: f32,
    offset: Vec2,
}

impl Camera {
    /// Creates a camera for the provided viewport at the default zoom.
    #[must_use]
    pub fn new(viewport: Vec2) -> Self {
        let mut camera = Self {
            viewport: sanitize_viewport(viewport),
            scroll: Vec2::ZERO,
            scale: DEFAULT_SCALE,
            offset: Vec2::ZERO,
        };
        camera.reclamp();
        camera
    }

    /// Size of the canvas in pixels.
    #[must_use]
    pub const fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Pixel scroll of the map's top-left corner.
    #[must_use]
    pub const fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Current zoom scale.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Centring offset applied on axes where the map is smaller than the viewport.
    #[must_use]
    pub const fn map_offset(&self) -> Vec2 {
        self.offset
    }

    /// Edge length of a tile on screen.
    #[must_use]
    pub fn tile_pixels(&self) -> f32 {
        TILE_SIZE as f32 * self.scale
    }

    /// Size of the whole map on screen at the current scale.
    #[must_use]
    pub fn map_pixels(&self) -> Vec2 {
        map_pixels_at(self.scale)
    }

    /// Largest scroll permitted on each axis.
    #[must_use]
    pub fn max_scroll(&self) -> Vec2 {
        (self.map_pixels() - self.viewport).max(Vec2::ZERO)
    }

    /// Adds a raw pixel delta to the scroll and reclamps.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.scroll_to(self.scroll + delta);
    }

    /// Applies one arrow key press.
    pub fn scroll_step(&mut self, direction: ScrollDirection) {
        self.scroll_by(direction.delta());
    }

    /// Sets the scroll directly and reclamps.
    pub fn scroll_to(&mut self, target: Vec2) {
        if target.is_finite() {
            self.scroll = target;
        }
        self.reclamp();
    }

    /// Scrolls so the provided map point, in unscaled map pixels, sits in the
    /// middle of the viewport.
    pub fn center_on(&mut self, map_point: Vec2) {
        self.scroll_to(map_point * self.scale - self.viewport * 0.5);
    }

    /// Zooms by one wheel notch while keeping the map point under `anchor` fixed.
    ///
    /// A negative `delta_y` zooms in, a positive one zooms out, zero is ignored.
    pub fn zoom(&mut self, delta_y: f32, anchor: Vec2) {
        let target = if delta_y < 0.0 {
            self.scale * ZOOM_FACTOR
        } else if delta_y > 0.0 {
            self.scale / ZOOM_FACTOR
        } else {
            return;
        };
        self.zoom_to(target, anchor);
    }

    /// Sets the zoom scale while keeping the map point under `anchor` fixed.
    pub fn zoom_to(&mut self, scale: f32, anchor: Vec2) {
        if !scale.is_finite() || !anchor.is_finite() {
            return;
        }

        let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        let anchored = (anchor + self.scroll - self.offset) / self.tile_pixels();

        self.scale = scale;
        self.offset = centring_offset(self.viewport, self.map_pixels());
        self.scroll = anchored * self.tile_pixels() - anchor + self.offset;
        self.reclamp();
    }

    /// Updates the viewport size and reclamps without touching the scale.
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = sanitize_viewport(viewport);
        self.reclamp();
    }

    /// Map tile under the provided canvas pixel, if any.
    #[must_use]
    pub fn screen_to_tile(&self, point: Vec2) -> Option<TileCoord> {
        let map = (point + self.scroll - self.offset) / self.tile_pixels();
        if !map.is_finite() || map.x < 0.0 || map.y < 0.0 {
            return None;
        }

        let column = map.x.floor() as u32;
        let row = map.y.floor() as u32;
        let tile = TileCoord::new(column, row);
        tile.in_bounds().then_some(tile)
    }

    /// Canvas pixel of the top-left corner of a tile.
    #[must_use]
    pub fn tile_to_screen(&self, tile: TileCoord) -> Vec2 {
        Vec2::new(tile.column() as f32, tile.row() as f32) * self.tile_pixels() - self.scroll
            + self.offset
    }

    /// Serializable view of the camera for collaborators.
    #[must_use]
    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            scroll_x: self.scroll.x,
            scroll_y: self.scroll.y,
            scale: self.scale,
            map_offset_x: self.offset.x,
            map_offset_y: self.offset.y,
            viewport_width: self.viewport.x,
            viewport_height: self.viewport.y,
        }
    }

    fn reclamp(&mut self) {
        if !self.scale.is_finite() {
            self.scale = DEFAULT_SCALE;
        }
        self.scale = self.scale.clamp(MIN_SCALE, MAX_SCALE);
        self.offset = centring_offset(self.viewport, self.map_pixels());
        if !self.scroll.is_finite() {
            self.scroll = Vec2::ZERO;
        }
        self.scroll = self.scroll.clamp(Vec2::ZERO, self.max_scroll());
    }
}

/// Plain camera state exposed to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CameraSnapshot {
    /// Horizontal scroll in pixels.
    pub scroll_x: f32,
    /// Vertical scroll in pixels.
    pub scroll_y: f32,
    /// Zoom scale.
    pub scale: f32,
    /// Horizontal centring offset in pixels.
    pub map_offset_x: f32,
    /// Vertical centring offset in pixels.
    pub map_offset_y: f32,
    /// Canvas width in pixels.
    pub viewport_width: f32,
    /// Canvas height in pixels.
    pub viewport_height: f32,
}

fn map_pixels_at(scale: f32) -> Vec2 {
    Vec2::new(MAP_COLS as f32, MAP_ROWS as f32) * TILE_SIZE as f32 * scale
}

fn centring_offset(viewport: Vec2, map: Vec2) -> Vec2 {
    ((viewport - map) * 0.5).max(Vec2::ZERO)
}

fn sanitize_viewport(viewport: Vec2) -> Vec2 {
    if viewport.is_finite() {
        viewport.max(Vec2::ZERO)
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_camera_starts_at_default_scale_and_origin() {
        let camera = Camera::new(Vec2::new(800.0, 600.0));

        assert_eq!(camera.scale(), DEFAULT_SCALE);
        assert_eq!(camera.scroll(), Vec2::ZERO);
        assert_eq!(camera.map_offset(), Vec2::ZERO);
    }

    #[test]
    fn arrow_press_scrolls_exactly_one_step() {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));

        camera.scroll_step(ScrollDirection::Right);
        assert_eq!(camera.scroll().x, SCROLL_SPEED);

        camera.scroll_step(ScrollDirection::Left);
        camera.scroll_step(ScrollDirection::Left);
        assert_eq!(camera.scroll().x, 0.0, "scroll never goes negative");
    }

    #[test]
    fn scroll_clamps_to_map_extent() {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));

        camera.scroll_by(Vec2::splat(1.0e6));

        let expected = Vec2::new(960.0 * 2.0 - 800.0, 640.0 * 2.0 - 600.0);
        assert_eq!(camera.scroll(), expected);
    }

    #[test]
    fn small_map_is_centred_and_pinned() {
        let mut camera = Camera::new(Vec2::new(1280.0, 800.0));
        camera.zoom_to(MIN_SCALE, Vec2::ZERO);
        camera.scroll_by(Vec2::new(100.0, 100.0));

        assert_eq!(camera.scroll(), Vec2::ZERO);
        assert_eq!(camera.map_offset(), Vec2::new(160.0, 80.0));

        camera.zoom_to(MAX_SCALE, Vec2::ZERO);
        assert_eq!(camera.map_offset(), Vec2::ZERO);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));

        for _ in 0..20 {
            camera.zoom(-100.0, Vec2::new(400.0, 300.0));
        }
        assert_eq!(camera.scale(), MAX_SCALE);

        for _ in 0..20 {
            camera.zoom(100.0, Vec2::new(400.0, 300.0));
        }
        assert_eq!(camera.scale(), MIN_SCALE);
    }

    #[test]
    fn zoom_keeps_anchor_tile() {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));
        camera.scroll_to(Vec2::new(400.0, 300.0));
        let anchor = Vec2::new(400.0, 300.0);
        let before = camera.screen_to_tile(anchor);

        camera.zoom(-1.0, anchor);

        assert_eq!(camera.screen_to_tile(anchor), before);
        assert!(camera.scale() > DEFAULT_SCALE);
    }

    #[test]
    fn screen_to_tile_accounts_for_scroll_and_offset() {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));
        assert_eq!(
            camera.screen_to_tile(Vec2::new(65.0, 10.0)),
            Some(TileCoord::new(1, 0))
        );

        camera.scroll_to(Vec2::new(64.0, 64.0));
        assert_eq!(
            camera.screen_to_tile(Vec2::new(65.0, 10.0)),
            Some(TileCoord::new(2, 1))
        );
        assert_eq!(camera.tile_to_screen(TileCoord::new(2, 1)), Vec2::new(64.0, 0.0));
    }

    #[test]
    fn screen_to_tile_rejects_points_off_the_map() {
        let mut camera = Camera::new(Vec2::new(1280.0, 800.0));
        camera.zoom_to(MIN_SCALE, Vec2::ZERO);

        assert_eq!(camera.screen_to_tile(Vec2::new(10.0, 10.0)), None);
        assert_eq!(camera.screen_to_tile(Vec2::new(1270.0, 400.0)), None);
    }

    #[test]
    fn degenerate_viewport_does_not_panic() {
        let mut camera = Camera::new(Vec2::ZERO);
        camera.scroll_by(Vec2::new(10.0, 10.0));
        camera.zoom(-1.0, Vec2::ZERO);
        camera.resize(Vec2::new(f32::NAN, -5.0));

        assert_eq!(camera.viewport(), Vec2::ZERO);
        assert!(camera.scroll().is_finite());
        assert_eq!(camera.map_offset(), Vec2::ZERO);
    }

    #[test]
    fn resize_keeps_scale() {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));
        camera.scroll_by(Vec2::splat(1.0e6));

        camera.resize(Vec2::new(1600.0, 1200.0));

        assert_eq!(camera.scale(), DEFAULT_SCALE);
        assert_eq!(camera.scroll(), Vec2::new(320.0, 80.0));
    }
}
