#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Engine interface shared by interactive front-ends and scripted drivers.
//!
//! A [`Session`] owns the authoritative world together with the camera, the
//! minimap, and the input dispatcher. Every operation funnels through the
//! world's command/event surface; emitted events are recorded in a bounded
//! log. The input dispatcher reads the world's playback state when each input
//! batch arrives. The host drives animation by calling [`Session::advance`]
//! from its frame loop.

mod state;

use std::{collections::VecDeque, time::Duration};

use glam::Vec2;
use tactics_core::{Command, Event, MovementRange, TileCoord, TurnInfo, UnitId, UnitSnapshot};
use tactics_system_camera::{Camera, Minimap};
use tactics_system_input::{InputDispatcher, InputEvent};
use tactics_world::{self as world, query, World};
use tracing::debug;

pub use state::GameState;

/// Number of events retained in the session log.
pub const EVENT_LOG_CAPACITY: usize = 256;

/// Application root owning the simulation context and its view state.
#[derive(Debug)]
pub struct Session {
    world: World,
    camera: Camera,
    minimap: Minimap,
    input: InputDispatcher,
    log: VecDeque<Event>,
}

impl Session {
    /// Creates a session over a fresh world for the provided canvas size.
    #[must_use]
    pub fn new(viewport: Vec2) -> Self {
        Self {
            world: World::new(),
            camera: Camera::new(viewport),
            minimap: Minimap::default(),
            input: InputDispatcher::new(),
            log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
        }
    }

    /// Applies a world command and returns the events it produced.
    pub fn execute(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        for event in &events {
            if self.log.len() == EVENT_LOG_CAPACITY {
                let _ = self.log.pop_front();
            }
            self.log.push_back(event.clone());
        }
        events
    }

    /// Feeds a batch of raw input through the dispatcher.
    pub fn handle_input(&mut self, input: &[InputEvent]) {
        let mut commands = Vec::new();
        self.input.handle(
            query::is_animating(&self.world),
            input,
            &mut self.camera,
            &self.minimap,
            &mut commands,
        );
        for command in commands {
            let _ = self.execute(command);
        }
    }

    /// Advances simulated time, stepping any in-flight move animation.
    pub fn advance(&mut self, dt: Duration) {
        let _ = self.execute(Command::Tick { dt });
    }

    /// Toggles selection of a unit; returns whether it is selected afterwards.
    pub fn select_unit(&mut self, unit: UnitId) -> bool {
        let _ = self.execute(Command::SelectUnit { unit });
        query::selection(&self.world).unit == Some(unit)
    }

    /// Clicks a tile, resolving selection or starting a move.
    pub fn click_tile(&mut self, tile: TileCoord) {
        let _ = self.execute(Command::ClickTile { tile });
    }

    /// Clicks the tile under a canvas pixel; returns the tile, if any.
    pub fn click_screen(&mut self, point: Vec2) -> Option<TileCoord> {
        let tile = self.camera.screen_to_tile(point)?;
        self.click_tile(tile);
        Some(tile)
    }

    /// Clears tile selection, unit selection, and the movement range.
    pub fn clear_selection(&mut self) {
        let _ = self.execute(Command::ClearSelection);
    }

    /// Moves a unit immediately without animation; returns whether it moved.
    pub fn move_unit(&mut self, unit: UnitId, destination: TileCoord) -> bool {
        self.execute(Command::MoveUnit { unit, destination })
            .iter()
            .any(|event| matches!(event, Event::UnitMoved { .. }))
    }

    /// Places a unit on any in-bounds tile; returns whether it was placed.
    pub fn relocate_unit(&mut self, unit: UnitId, tile: TileCoord) -> bool {
        self.execute(Command::RelocateUnit { unit, tile })
            .iter()
            .any(|event| matches!(event, Event::UnitRelocated { .. }))
    }

    /// Computes a unit's movement range without side effects.
    #[must_use]
    pub fn calculate_movement_range(&self, unit: UnitId) -> MovementRange {
        query::calculate_movement_range(&self.world, unit)
    }

    /// Hands control to the other player; returns whether the phase changed.
    pub fn end_turn(&mut self) -> bool {
        self.execute(Command::EndTurn)
            .iter()
            .any(|event| matches!(event, Event::PhaseChanged { .. }))
    }

    /// Forces the opening phase and clears every moved flag.
    pub fn reset_turn(&mut self) {
        let _ = self.execute(Command::ResetTurn);
    }

    /// Sets the per-tile animation dwell time in milliseconds; zero moves instantly.
    pub fn set_animation_speed(&mut self, millis: u64) {
        let _ = self.execute(Command::SetAnimationSpeed {
            step_duration: Duration::from_millis(millis),
        });
    }

    /// Runs the animation to completion and returns the simulated time it took.
    pub fn wait_for_animation(&mut self) -> Duration {
        let mut waited = Duration::ZERO;
        let Some(animation) = query::animation(&self.world) else {
            return waited;
        };

        let remaining = animation.path.len().saturating_sub(animation.step);
        for _ in 0..=remaining {
            if !query::is_animating(&self.world) {
                break;
            }
            let step = query::step_duration(&self.world);
            self.advance(step);
            waited += step;
        }
        debug!(waited_ms = waited.as_millis() as u64, "animation settled");
        waited
    }

    /// Reports whether a move animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        query::is_animating(&self.world)
    }

    /// Tile on which the animating unit is currently drawn.
    #[must_use]
    pub fn animating_unit_draw_position(&self) -> Option<TileCoord> {
        query::animating_unit_draw_position(&self.world)
    }

    /// Unit standing on the tile, if any.
    #[must_use]
    pub fn unit_at(&self, tile: TileCoord) -> Option<UnitSnapshot> {
        query::unit_at(&self.world, tile)
    }

    /// Turn counter and active player.
    #[must_use]
    pub fn turn_info(&self) -> TurnInfo {
        query::turn_info(&self.world)
    }

    /// Scrolls the main view by a raw pixel delta.
    pub fn scroll(&mut self, delta: Vec2) {
        self.camera.scroll_by(delta);
    }

    /// Zooms the main view by one wheel notch around a canvas pixel.
    pub fn zoom(&mut self, delta_y: f32, anchor: Vec2) {
        self.camera.zoom(delta_y, anchor);
    }

    /// Updates the canvas size.
    pub fn resize(&mut self, viewport: Vec2) {
        self.camera.resize(viewport);
    }

    /// Read-only access to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Read-only access to the camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Read-only access to the minimap.
    #[must_use]
    pub fn minimap(&self) -> &Minimap {
        &self.minimap
    }

    /// Most recent events, oldest first.
    pub fn event_log(&self) -> impl Iterator<Item = &Event> {
        self.log.iter()
    }

    /// Captures a consistent snapshot of everything collaborators display.
    #[must_use]
    pub fn state(&self) -> GameState {
        GameState::capture(&self.world, &self.camera)
    }
}
