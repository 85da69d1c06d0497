//! Serializable snapshot of the whole session.

use serde::Serialize;
use tactics_core::{
    AnimationSnapshot, MovementRange, PlayerSnapshot, SelectionSnapshot, TileCoord, TurnInfo,
    UnitSnapshot,
};
use tactics_system_camera::{Camera, CameraSnapshot};
use tactics_world::{query, World};

/// Everything a presentation layer reads in one frame.
///
/// The snapshot is captured between commands, so it never shows a half-applied
/// move.
#[derive(Clone, Debug, Serialize)]
pub struct GameState {
    /// Camera scroll, zoom, and centring offset.
    pub camera: CameraSnapshot,
    /// Turn counter and active player.
    pub turn: TurnInfo,
    /// Current tile and unit selection.
    pub selection: SelectionSnapshot,
    /// Movement range of the selected unit, keyed by `"col,row"`.
    pub movement_range: MovementRange,
    /// Every unit in identifier order.
    pub units: Vec<UnitSnapshot>,
    /// Resource counters of both players.
    pub players: Vec<PlayerSnapshot>,
    /// Whether a move animation is in flight.
    pub is_animating: bool,
    /// In-flight animation, if any.
    pub animation: Option<AnimationSnapshot>,
    /// Tile under the pointer, if any.
    pub hover: Option<TileCoord>,
    /// Terrain ids, one inner vector per row.
    pub terrain: Vec<Vec<u8>>,
}

impl GameState {
    pub(crate) fn capture(world: &World, camera: &Camera) -> Self {
        let animation = query::animation(world);
        Self {
            camera: camera.snapshot(),
            turn: query::turn_info(world),
            selection: query::selection(world),
            movement_range: query::movement_range(world).clone(),
            units: query::unit_view(world).into_vec(),
            players: query::players(world),
            is_animating: animation.is_some(),
            animation,
            hover: query::hover(world),
            terrain: query::terrain_rows(world),
        }
    }
}
