//! Overview projection of the whole map.

use glam::Vec2;
use tactics_core::{TileCoord, MAP_COLS, MAP_ROWS, MINIMAP_HEIGHT, MINIMAP_WIDTH, TILE_SIZE};

use crate::Camera;

/// Axis-aligned rectangle in overview pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverviewRect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

/// Miniature overview surface showing the entire map.
///
/// The map is fitted uniformly into the surface and centred on the axis with
/// spare room. Points are expressed in overview pixels relative to the
/// surface's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimap {
    size: Vec2,
}

impl Default for Minimap {
    fn default() -> Self {
        Self::new(Vec2::new(MINIMAP_WIDTH, MINIMAP_HEIGHT))
    }
}

impl Minimap {
    /// Creates an overview surface of the provided pixel size.
    #[must_use]
    pub fn new(size: Vec2) -> Self {
        Self {
            size: if size.is_finite() {
                size.max(Vec2::ZERO)
            } else {
                Vec2::ZERO
            },
        }
    }

    /// Size of the surface in pixels.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Overview pixels per unscaled map pixel.
    #[must_use]
    pub fn fit_scale(&self) -> f32 {
        let map = unscaled_map();
        (self.size.x / map.x).min(self.size.y / map.y).max(0.0)
    }

    /// Area of the surface covered by the map.
    #[must_use]
    pub fn map_area(&self) -> OverviewRect {
        let size = unscaled_map() * self.fit_scale();
        OverviewRect {
            origin: ((self.size - size) * 0.5).max(Vec2::ZERO),
            size,
        }
    }

    /// Converts an overview point into unscaled map pixels, clamped onto the map.
    #[must_use]
    pub fn to_map_point(&self, point: Vec2) -> Option<Vec2> {
        let fit = self.fit_scale();
        if fit <= 0.0 || !point.is_finite() {
            return None;
        }

        let area = self.map_area();
        let local = (point - area.origin).clamp(Vec2::ZERO, area.size);
        Some(local / fit)
    }

    /// Centres the camera on the map point under the overview point.
    ///
    /// Returns `false` when the surface has no usable area.
    pub fn focus(&self, camera: &mut Camera, point: Vec2) -> bool {
        match self.to_map_point(point) {
            Some(map_point) => {
                camera.center_on(map_point);
                true
            }
            None => false,
        }
    }

    /// Overview rectangle outlining what the camera currently shows.
    #[must_use]
    pub fn viewport_outline(&self, camera: &Camera) -> OverviewRect {
        let fit = self.fit_scale();
        let area = self.map_area();
        let scale = camera.scale();
        let visible = camera.viewport().min(camera.map_pixels());
        OverviewRect {
            origin: area.origin + camera.scroll() / scale * fit,
            size: visible / scale * fit,
        }
    }

    /// Overview pixel at the centre of a tile, used for unit markers.
    #[must_use]
    pub fn tile_center(&self, tile: TileCoord) -> Vec2 {
        let tile_size = TILE_SIZE as f32;
        let center = (Vec2::new(tile.column() as f32, tile.row() as f32) + 0.5) * tile_size;
        self.map_area().origin + center * self.fit_scale()
    }
}

fn unscaled_map() -> Vec2 {
    Vec2::new(MAP_COLS as f32, MAP_ROWS as f32) * TILE_SIZE as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_minimap_fits_map_height() {
        let minimap = Minimap::default();

        assert_eq!(minimap.fit_scale(), 0.1875);
        let area = minimap.map_area();
        assert_eq!(area.size, Vec2::new(180.0, 120.0));
        assert_eq!(area.origin, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn focus_centres_camera_on_clicked_point() {
        let minimap = Minimap::default();
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));

        assert!(minimap.focus(&mut camera, Vec2::new(100.0, 60.0)));

        // Map centre at scale 2 is (960, 640); half the viewport is (400, 300).
        assert_eq!(camera.scroll(), Vec2::new(560.0, 340.0));
    }

    #[test]
    fn points_outside_map_area_clamp_to_edges() {
        let minimap = Minimap::default();

        assert_eq!(minimap.to_map_point(Vec2::new(0.0, 0.0)), Some(Vec2::ZERO));
        assert_eq!(
            minimap.to_map_point(Vec2::new(500.0, 500.0)),
            Some(Vec2::new(960.0, 640.0))
        );
    }

    #[test]
    fn empty_surface_never_moves_camera() {
        let minimap = Minimap::new(Vec2::ZERO);
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));

        assert!(!minimap.focus(&mut camera, Vec2::new(5.0, 5.0)));
        assert_eq!(camera.scroll(), Vec2::ZERO);
    }

    #[test]
    fn outline_tracks_scroll() {
        let minimap = Minimap::default();
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));
        camera.scroll_to(Vec2::new(640.0, 320.0));

        let outline = minimap.viewport_outline(&camera);

        assert_eq!(outline.origin, Vec2::new(10.0 + 60.0, 30.0));
        assert_eq!(outline.size, Vec2::new(75.0, 56.25));
    }
}
