//! Frame description assembled from a session and a theme.

use glam::Vec2;
use tactics_core::{HighlightKind, PlayerId, Terrain, TileCoord, UnitId, MAP_COLS, MAP_ROWS};
use tactics_session::Session;
use tactics_system_camera::{Camera, OverviewRect};
use tactics_world::query;

use crate::{Color, Theme};

const SELECTED_TINT: f32 = 0.35;

/// Terrain tile visible in the main canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainTile {
    /// Tile being drawn.
    pub tile: TileCoord,
    /// Canvas pixel of the tile's top-left corner.
    pub position: Vec2,
    /// Terrain kind of the tile.
    pub terrain: Terrain,
    /// Fill colour of the tile.
    pub color: Color,
}

/// Movement-range overlay for one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightSprite {
    /// Highlighted tile.
    pub tile: TileCoord,
    /// Canvas pixel of the tile's top-left corner.
    pub position: Vec2,
    /// Whether the tile is free or held by an enemy.
    pub kind: HighlightKind,
    /// Overlay colour.
    pub color: Color,
}

/// Unit marker in the main canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitSprite {
    /// Unit being drawn.
    pub id: UnitId,
    /// Display name.
    pub name: String,
    /// Tile the unit is drawn on; the animation node while moving.
    pub tile: TileCoord,
    /// Canvas pixel of the tile's top-left corner.
    pub position: Vec2,
    /// Owner colour, tinted towards white while selected.
    pub color: Color,
    /// Reduced once the unit has moved this turn.
    pub opacity: f32,
    /// Whether the unit is the current selection.
    pub selected: bool,
    /// Whether a click would select the unit right now.
    pub selectable: bool,
}

/// Resource line for one player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerStatus {
    /// Player described by the line.
    pub player: PlayerId,
    /// IG resource counter.
    pub ig: u32,
    /// CT resource counter.
    pub ct: u32,
    /// Units the player still fields.
    pub unit_count: usize,
    /// Player colour.
    pub color: Color,
}

/// Turn and resource summary shown above the map.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBar {
    /// Current turn counter.
    pub turn_number: u32,
    /// Phase label of the active player.
    pub phase: &'static str,
    /// Colour of the active player.
    pub phase_color: Color,
    /// One entry per player in phase order.
    pub players: Vec<PlayerStatus>,
}

impl StatusBar {
    /// Turn and phase rendered as a single label.
    #[must_use]
    pub fn turn_label(&self) -> String {
        format!("Turn {} {}", self.turn_number, self.phase)
    }
}

/// Unit details shown while hovering its tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverUnit {
    /// Display name.
    pub name: String,
    /// Current hit points.
    pub hp: u32,
    /// Maximum hit points.
    pub max_hp: u32,
    /// Movement allowance.
    pub movement: u32,
}

/// Details of the tile under the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverOverlay {
    /// Hovered tile.
    pub tile: TileCoord,
    /// Display name of the tile's terrain.
    pub terrain: &'static str,
    /// Unit standing on the tile, if any.
    pub unit: Option<HoverUnit>,
}

impl HoverOverlay {
    /// Text lines of the overlay, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("({}) {}", self.tile, self.terrain)];
        if let Some(unit) = &self.unit {
            lines.push(format!(
                "{} HP {}/{} MV {}",
                unit.name, unit.hp, unit.max_hp, unit.movement
            ));
        }
        lines
    }
}

/// Overview surface contents.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimapScene {
    /// Surface area covered by the map.
    pub map_area: OverviewRect,
    /// Outline of the camera's visible region.
    pub viewport: OverviewRect,
    /// Unit markers at tile centres, coloured by owner.
    pub markers: Vec<(Vec2, Color)>,
}

/// End-turn control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndTurnButton {
    /// Button text.
    pub label: String,
    /// Disabled while a move animation plays.
    pub enabled: bool,
}

/// Everything a backend paints in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Edge length of one tile in canvas pixels.
    pub tile_pixels: f32,
    /// Terrain tiles intersecting the canvas.
    pub terrain: Vec<TerrainTile>,
    /// Movement-range overlay of the selected unit.
    pub highlights: Vec<HighlightSprite>,
    /// Tile picked in free tile-pick mode, as a canvas pixel.
    pub selected_tile: Option<Vec2>,
    /// Units intersecting the canvas.
    pub units: Vec<UnitSprite>,
    /// Turn and resource summary.
    pub status: StatusBar,
    /// Pointer overlay.
    pub hover: Option<HoverOverlay>,
    /// Overview surface.
    pub minimap: MinimapScene,
    /// End-turn control.
    pub end_turn: EndTurnButton,
}

impl Scene {
    /// Assembles the frame for the session's current state.
    #[must_use]
    pub fn capture(session: &Session, theme: &Theme) -> Self {
        let world = session.world();
        let camera = session.camera();
        let tile_pixels = camera.tile_pixels();
        let selection = query::selection(world);
        let animation = query::animation(world);
        let units = query::unit_view(world);

        let terrain = (0..MAP_ROWS)
            .flat_map(|row| (0..MAP_COLS).map(move |column| TileCoord::new(column, row)))
            .filter_map(|tile| {
                let terrain = query::terrain_at(world, tile)?;
                let position = visible_position(camera, tile)?;
                Some(TerrainTile {
                    tile,
                    position,
                    terrain,
                    color: terrain_color(terrain),
                })
            })
            .collect();

        let highlights = query::highlights(world)
            .into_iter()
            .filter_map(|(tile, kind)| {
                let position = visible_position(camera, tile)?;
                let color = match kind {
                    HighlightKind::Reachable => theme.reachable_color(),
                    HighlightKind::Enemy => theme.enemy_color(),
                };
                Some(HighlightSprite {
                    tile,
                    position,
                    kind,
                    color,
                })
            })
            .collect();

        let draw_tile = |id: UnitId, tile: TileCoord| match &animation {
            Some(animation) if animation.unit == id => animation.draw_position().unwrap_or(tile),
            _ => tile,
        };

        let sprites = units
            .iter()
            .filter_map(|unit| {
                let tile = draw_tile(unit.id, unit.tile);
                let position = visible_position(camera, tile)?;
                let selected = selection.unit == Some(unit.id);
                let color = theme.player_color(unit.player);
                Some(UnitSprite {
                    id: unit.id,
                    name: unit.name.clone(),
                    tile,
                    position,
                    color: if selected {
                        color.lighten(SELECTED_TINT)
                    } else {
                        color
                    },
                    opacity: if unit.moved {
                        theme.moved_opacity()
                    } else {
                        1.0
                    },
                    selected,
                    selectable: query::is_selectable(world, unit.id),
                })
            })
            .collect();

        let turn = query::turn_info(world);
        let status = StatusBar {
            turn_number: turn.turn_number,
            phase: turn.phase(),
            phase_color: theme.player_color(turn.current_player),
            players: query::players(world)
                .into_iter()
                .map(|player| PlayerStatus {
                    player: player.player,
                    ig: player.ig,
                    ct: player.ct,
                    unit_count: player.unit_count,
                    color: theme.player_color(player.player),
                })
                .collect(),
        };

        let hover = query::hover(world).and_then(|tile| {
            let terrain = query::terrain_at(world, tile)?;
            Some(HoverOverlay {
                tile,
                terrain: terrain.name(),
                unit: query::unit_at(world, tile).map(|unit| HoverUnit {
                    name: unit.name,
                    hp: unit.hp,
                    max_hp: unit.max_hp,
                    movement: unit.movement,
                }),
            })
        });

        let overview = session.minimap();
        let minimap = MinimapScene {
            map_area: overview.map_area(),
            viewport: overview.viewport_outline(camera),
            markers: units
                .iter()
                .map(|unit| {
                    let tile = draw_tile(unit.id, unit.tile);
                    (overview.tile_center(tile), theme.player_color(unit.player))
                })
                .collect(),
        };

        Self {
            tile_pixels,
            terrain,
            highlights,
            selected_tile: selection.tile.map(|tile| camera.tile_to_screen(tile)),
            units: sprites,
            status,
            hover,
            minimap,
            end_turn: EndTurnButton {
                label: theme.end_turn_label().to_owned(),
                enabled: animation.is_none(),
            },
        }
    }
}

/// Canvas position of a tile, or `None` when it lies entirely off-canvas.
fn visible_position(camera: &Camera, tile: TileCoord) -> Option<Vec2> {
    let position = camera.tile_to_screen(tile);
    let far = position + Vec2::splat(camera.tile_pixels());
    let viewport = camera.viewport();
    let visible = far.x > 0.0 && far.y > 0.0 && position.x < viewport.x && position.y < viewport.y;
    visible.then_some(position)
}

fn terrain_color(terrain: Terrain) -> Color {
    match terrain {
        Terrain::Space => Color::from_rgb_u8(0x0b, 0x0d, 0x1a),
        Terrain::Plains => Color::from_rgb_u8(0x5a, 0x8f, 0x3c),
        Terrain::Forest => Color::from_rgb_u8(0x2f, 0x5d, 0x2a),
        Terrain::Asteroid => Color::from_rgb_u8(0x6b, 0x60, 0x55),
        Terrain::Underwater => Color::from_rgb_u8(0x1d, 0x4e, 0x89),
        Terrain::Desert => Color::from_rgb_u8(0xc9, 0xa8, 0x5c),
        Terrain::Atmosphere => Color::from_rgb_u8(0x7f, 0xb8, 0xd8),
        Terrain::Volcano => Color::from_rgb_u8(0x9c, 0x2b, 0x1b),
        Terrain::Colony => Color::from_rgb_u8(0x8a, 0x8a, 0x9e),
        Terrain::Base => Color::from_rgb_u8(0xb0, 0xb0, 0xc8),
        Terrain::BlackHole => Color::from_rgb_u8(0x00, 0x00, 0x00),
    }
}
