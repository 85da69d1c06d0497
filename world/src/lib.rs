#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the tactics engine.
//!
//! The world owns the terrain, the unit roster, selection, the turn state, and
//! any in-flight move animation. It only changes through [`apply`] and is read
//! through the functions in [`query`].

mod animation;
mod navigation;
mod roster;
mod terrain;
mod turn;

use std::time::Duration;

use tactics_core::{
    Command, Event, MovementRange, PlayerId, RejectionReason, TileCoord, UnitId,
    DEFAULT_STEP_DURATION,
};
use tracing::{debug, info};

use animation::MoveAnimation;
use navigation::{Occupancy, RangeSearch};
use roster::{Player, Roster, SAMPLE_PLAYERS};
use terrain::TerrainGrid;
use turn::TurnState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Selection {
    tile: Option<TileCoord>,
    unit: Option<UnitId>,
}

/// Represents the authoritative tactics world state.
#[derive(Debug)]
pub struct World {
    terrain: TerrainGrid,
    roster: Roster,
    players: [Player; 2],
    turn: TurnState,
    selection: Selection,
    search: Option<RangeSearch>,
    movement_range: MovementRange,
    animation: Option<MoveAnimation>,
    step_duration: Duration,
    hover: Option<TileCoord>,
}

impl World {
    /// Creates a world holding the sample battlefield and opening deployment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            terrain: TerrainGrid::sample(),
            roster: Roster::sample(),
            players: SAMPLE_PLAYERS,
            turn: TurnState::default(),
            selection: Selection::default(),
            search: None,
            movement_range: MovementRange::default(),
            animation: None,
            step_duration: DEFAULT_STEP_DURATION,
            hover: None,
        }
    }

    fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn eligibility(&self, unit: UnitId) -> Result<(), RejectionReason> {
        let Some(candidate) = self.roster.get(unit) else {
            return Err(RejectionReason::UnknownUnit);
        };
        if candidate.player != self.turn.current() {
            return Err(RejectionReason::NotCurrentPlayer);
        }
        if candidate.moved {
            return Err(RejectionReason::AlreadyMoved);
        }
        Ok(())
    }

    fn search_from(&self, unit: UnitId) -> Option<RangeSearch> {
        let mover = self.roster.get(unit)?;
        let terrain = &self.terrain;
        Some(RangeSearch::explore(
            mover.tile,
            mover.movement,
            terrain.columns(),
            terrain.rows(),
            |tile| {
                terrain
                    .terrain(tile)
                    .map(|kind| kind.cost_for(mover.locomotion))
            },
            |tile| self.occupancy_for(mover.id, mover.player, tile),
        ))
    }

    fn occupancy_for(&self, mover: UnitId, player: PlayerId, tile: TileCoord) -> Occupancy {
        match self.roster.occupant(tile, Some(mover)) {
            None => Occupancy::Free,
            Some(other) if other.player == player => Occupancy::Friendly,
            Some(_) => Occupancy::Enemy,
        }
    }

    fn select_unit(&mut self, unit: UnitId, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.eligibility(unit) {
            reject(reason, out_events);
            return;
        }

        let Some(search) = self.search_from(unit) else {
            reject(RejectionReason::UnknownUnit, out_events);
            return;
        };

        if let Some(tile) = self.selection.tile.take() {
            out_events.push(Event::TileDeselected { tile });
        }
        if let Some(previous) = self.selection.unit.take() {
            out_events.push(Event::UnitDeselected { unit: previous });
        }

        self.movement_range = search.range();
        self.search = Some(search);
        self.selection.unit = Some(unit);
        debug!(
            unit = unit.get(),
            reachable = self.movement_range.len(),
            "unit selected"
        );
        out_events.push(Event::UnitSelected {
            unit,
            reachable: self.movement_range.len(),
        });
    }

    fn toggle_unit(&mut self, unit: UnitId, out_events: &mut Vec<Event>) {
        if self.selection.unit == Some(unit) {
            self.deselect_unit(out_events);
        } else {
            self.select_unit(unit, out_events);
        }
    }

    fn deselect_unit(&mut self, out_events: &mut Vec<Event>) {
        self.search = None;
        self.movement_range = MovementRange::default();
        if let Some(unit) = self.selection.unit.take() {
            debug!(unit = unit.get(), "unit deselected");
            out_events.push(Event::UnitDeselected { unit });
        }
    }

    fn clear_selection(&mut self, out_events: &mut Vec<Event>) {
        if let Some(tile) = self.selection.tile.take() {
            out_events.push(Event::TileDeselected { tile });
        }
        self.deselect_unit(out_events);
    }

    fn click_tile(&mut self, tile: TileCoord, out_events: &mut Vec<Event>) {
        if !tile.in_bounds() {
            reject(RejectionReason::OutOfBounds, out_events);
            return;
        }

        if let Some(selected) = self.selection.unit {
            let origin = self.roster.get(selected).map(|unit| unit.tile);
            if origin == Some(tile) {
                self.deselect_unit(out_events);
                return;
            }

            if let Some(other) = self.selectable_at(tile) {
                self.select_unit(other, out_events);
                return;
            }

            if self.movement_range.contains(tile) {
                self.start_move(selected, tile, out_events);
            } else {
                self.deselect_unit(out_events);
            }
            return;
        }

        if let Some(unit) = self.selectable_at(tile) {
            self.select_unit(unit, out_events);
            return;
        }

        if self.selection.tile == Some(tile) {
            self.selection.tile = None;
            out_events.push(Event::TileDeselected { tile });
        } else {
            self.selection.tile = Some(tile);
            out_events.push(Event::TileSelected { tile });
        }
    }

    fn selectable_at(&self, tile: TileCoord) -> Option<UnitId> {
        let current = self.turn.current();
        self.roster
            .iter()
            .find(|unit| unit.tile == tile && unit.player == current && !unit.moved)
            .map(|unit| unit.id)
    }

    fn start_move(&mut self, unit: UnitId, destination: TileCoord, out_events: &mut Vec<Event>) {
        let Some(path) = self
            .search
            .as_ref()
            .and_then(|search| search.path_to(destination))
        else {
            reject(RejectionReason::OutOfRange, out_events);
            return;
        };

        self.clear_selection(out_events);
        debug!(unit = unit.get(), steps = path.len(), "move started");
        out_events.push(Event::MoveStarted {
            unit,
            path: path.clone(),
        });
        self.animation = Some(MoveAnimation::new(unit, path));

        if self.step_duration.is_zero() {
            self.advance_animation(Duration::ZERO, out_events);
        }
    }

    fn move_unit(&mut self, unit: UnitId, destination: TileCoord, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.eligibility(unit) {
            reject(reason, out_events);
            return;
        }
        if !destination.in_bounds() {
            reject(RejectionReason::OutOfBounds, out_events);
            return;
        }

        let path = self
            .search_from(unit)
            .and_then(|search| search.path_to(destination));
        match path {
            Some(path) => self.finish_move(MoveAnimation::new(unit, path), out_events),
            None => reject(RejectionReason::OutOfRange, out_events),
        }
    }

    fn advance_animation(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };

        let progress = animation.advance(dt, self.step_duration);
        let unit = animation.unit();
        for tile in progress.entered {
            out_events.push(Event::AnimationStepped { unit, tile });
        }

        if progress.finished {
            if let Some(animation) = self.animation.take() {
                self.finish_move(animation, out_events);
            }
        }
    }

    fn finish_move(&mut self, animation: MoveAnimation, out_events: &mut Vec<Event>) {
        let Some(destination) = animation.destination() else {
            return;
        };
        let id = animation.unit();
        let Some(unit) = self.roster.get_mut(id) else {
            return;
        };

        let from = unit.tile;
        let player = unit.player;
        let name = unit.name;
        unit.tile = destination;
        unit.moved = true;
        debug!(unit = id.get(), %from, to = %destination, "unit moved");
        out_events.push(Event::UnitMoved {
            unit: id,
            from,
            to: destination,
        });

        if let Some(defender) = self
            .roster
            .occupant(destination, Some(id))
            .filter(|other| other.player != player)
        {
            info!(
                "Battle: {} ({}) engages {} ({}) at {}",
                name,
                player.phase_label(),
                defender.name,
                defender.player.phase_label(),
                destination
            );
            out_events.push(Event::EngagementStarted {
                attacker: id,
                defender: defender.id,
                tile: destination,
            });
        }

        self.clear_selection(out_events);
    }

    fn end_turn(&mut self, out_events: &mut Vec<Event>) {
        self.clear_selection(out_events);
        let incoming = self.turn.advance();
        self.roster.refresh(incoming);
        let turn = self.turn.info();
        info!(
            turn = turn.turn_number,
            phase = turn.phase(),
            "phase changed"
        );
        out_events.push(Event::PhaseChanged { turn });
    }

    fn reset_turn(&mut self, out_events: &mut Vec<Event>) {
        // An in-flight move lands before the flags are cleared.
        if let Some(animation) = self.animation.take() {
            self.finish_move(animation, out_events);
        }
        self.clear_selection(out_events);
        self.turn = TurnState::default();
        self.roster.refresh_all();
        debug!("turn state reset");
        out_events.push(Event::TurnReset);
    }

    fn relocate(&mut self, id: UnitId, tile: TileCoord, out_events: &mut Vec<Event>) {
        if !tile.in_bounds() {
            reject(RejectionReason::OutOfBounds, out_events);
            return;
        }
        let Some(unit) = self.roster.get_mut(id) else {
            reject(RejectionReason::UnknownUnit, out_events);
            return;
        };

        let from = unit.tile;
        unit.tile = tile;
        out_events.push(Event::UnitRelocated { unit: id, from, to: tile });
        self.clear_selection(out_events);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn reject(reason: RejectionReason, out_events: &mut Vec<Event>) {
    debug!(?reason, "command rejected");
    out_events.push(Event::CommandRejected { reason });
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            world.advance_animation(dt, out_events);
        }
        Command::SetAnimationSpeed { step_duration } => {
            world.step_duration = step_duration;
            out_events.push(Event::AnimationSpeedChanged { step_duration });
            if step_duration.is_zero() {
                world.advance_animation(Duration::ZERO, out_events);
            }
        }
        Command::HoverTile { tile } => {
            let tile = tile.filter(TileCoord::in_bounds);
            if world.hover != tile {
                world.hover = tile;
                out_events.push(Event::HoverChanged { tile });
            }
        }
        Command::ClearSelection => world.clear_selection(out_events),
        Command::ResetTurn => world.reset_turn(out_events),
        _ if world.is_animating() => reject(RejectionReason::Animating, out_events),
        Command::SelectUnit { unit } => world.toggle_unit(unit, out_events),
        Command::ClickTile { tile } => world.click_tile(tile, out_events),
        Command::MoveUnit { unit, destination } => world.move_unit(unit, destination, out_events),
        Command::EndTurn => world.end_turn(out_events),
        Command::RelocateUnit { unit, tile } => world.relocate(unit, tile, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{navigation::Occupancy, World};
    use tactics_core::{
        AnimationSnapshot, HighlightKind, MovementRange, PlayerSnapshot, SelectionSnapshot,
        Terrain, TileCoord, TurnInfo, UnitId, UnitSnapshot, UnitView,
    };

    /// Terrain painted on the provided tile, if it lies inside the map.
    #[must_use]
    pub fn terrain_at(world: &World, tile: TileCoord) -> Option<Terrain> {
        world.terrain.terrain(tile)
    }

    /// Terrain ids of the whole map, one inner vector per row.
    #[must_use]
    pub fn terrain_rows(world: &World) -> Vec<Vec<u8>> {
        world.terrain.rows_of_ids()
    }

    /// Captures a read-only view of every unit.
    #[must_use]
    pub fn unit_view(world: &World) -> UnitView {
        UnitView::from_snapshots(world.roster.iter().map(|unit| unit.snapshot()).collect())
    }

    /// Snapshot of a single unit, or `None` for an unknown identifier.
    #[must_use]
    pub fn unit(world: &World, id: UnitId) -> Option<UnitSnapshot> {
        world.roster.get(id).map(|unit| unit.snapshot())
    }

    /// Unit standing on the tile; the lowest identifier wins when two units share it.
    #[must_use]
    pub fn unit_at(world: &World, tile: TileCoord) -> Option<UnitSnapshot> {
        world.roster.occupant(tile, None).map(|unit| unit.snapshot())
    }

    /// Reports whether the unit may be selected right now.
    #[must_use]
    pub fn is_selectable(world: &World, id: UnitId) -> bool {
        !world.is_animating() && world.eligibility(id).is_ok()
    }

    /// Current tile and unit selection.
    #[must_use]
    pub fn selection(world: &World) -> SelectionSnapshot {
        SelectionSnapshot {
            tile: world.selection.tile,
            unit: world.selection.unit,
        }
    }

    /// Movement range of the selected unit; empty when nothing is selected.
    #[must_use]
    pub fn movement_range(world: &World) -> &MovementRange {
        &world.movement_range
    }

    /// Classifies each tile of the current movement range for highlighting.
    #[must_use]
    pub fn highlights(world: &World) -> Vec<(TileCoord, HighlightKind)> {
        let Some(mover) = world.selection.unit.and_then(|id| world.roster.get(id)) else {
            return Vec::new();
        };

        world
            .movement_range
            .iter()
            .map(|(tile, _)| {
                let kind = match world.occupancy_for(mover.id, mover.player, tile) {
                    Occupancy::Enemy => HighlightKind::Enemy,
                    Occupancy::Free | Occupancy::Friendly => HighlightKind::Reachable,
                };
                (tile, kind)
            })
            .collect()
    }

    /// Computes the movement range of any unit without touching selection.
    ///
    /// Unknown identifiers yield an empty range.
    #[must_use]
    pub fn calculate_movement_range(world: &World, id: UnitId) -> MovementRange {
        world
            .search_from(id)
            .map(|search| search.range())
            .unwrap_or_default()
    }

    /// Turn counter and active player.
    #[must_use]
    pub fn turn_info(world: &World) -> TurnInfo {
        world.turn.info()
    }

    /// Reports whether a move animation is in flight.
    #[must_use]
    pub fn is_animating(world: &World) -> bool {
        world.is_animating()
    }

    /// Snapshot of the in-flight move animation, if any.
    #[must_use]
    pub fn animation(world: &World) -> Option<AnimationSnapshot> {
        world.animation.as_ref().map(|animation| animation.snapshot())
    }

    /// Tile on which the animating unit is currently drawn.
    #[must_use]
    pub fn animating_unit_draw_position(world: &World) -> Option<TileCoord> {
        animation(world).and_then(|snapshot| snapshot.draw_position())
    }

    /// Dwell time per tile applied to move animations.
    #[must_use]
    pub fn step_duration(world: &World) -> Duration {
        world.step_duration
    }

    /// Tile currently under the pointer, if any.
    #[must_use]
    pub fn hover(world: &World) -> Option<TileCoord> {
        world.hover
    }

    /// Resource counters and unit counts of both players in phase order.
    #[must_use]
    pub fn players(world: &World) -> Vec<PlayerSnapshot> {
        world
            .players
            .iter()
            .map(|player| PlayerSnapshot {
                player: player.id,
                ig: player.ig,
                ct: player.ct,
                unit_count: world.roster.count_for(player.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::SelectionSnapshot;

    fn run(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    #[test]
    fn selecting_twice_restores_unselected_state() {
        let mut world = World::new();

        let _ = run(&mut world, Command::SelectUnit { unit: UnitId::new(1) });
        assert_eq!(query::selection(&world).unit, Some(UnitId::new(1)));
        assert!(!query::movement_range(&world).is_empty());

        let events = run(&mut world, Command::SelectUnit { unit: UnitId::new(1) });
        assert_eq!(events, vec![Event::UnitDeselected { unit: UnitId::new(1) }]);
        assert_eq!(query::selection(&world), SelectionSnapshot::default());
        assert!(query::movement_range(&world).is_empty());
    }

    #[test]
    fn selecting_opponent_unit_is_rejected() {
        let mut world = World::new();

        let events = run(&mut world, Command::SelectUnit { unit: UnitId::new(5) });

        assert_eq!(
            events,
            vec![Event::CommandRejected {
                reason: RejectionReason::NotCurrentPlayer
            }]
        );
        assert_eq!(query::selection(&world).unit, None);
    }

    #[test]
    fn tile_selection_toggles() {
        let mut world = World::new();
        let tile = TileCoord::new(10, 10);

        let _ = run(&mut world, Command::ClickTile { tile });
        assert_eq!(query::selection(&world).tile, Some(tile));

        let _ = run(&mut world, Command::ClickTile { tile });
        assert_eq!(query::selection(&world).tile, None);
    }

    #[test]
    fn animation_blocks_end_turn_until_finished() {
        let mut world = World::new();
        let _ = run(&mut world, Command::SelectUnit { unit: UnitId::new(1) });
        let _ = run(
            &mut world,
            Command::ClickTile {
                tile: TileCoord::new(6, 2),
            },
        );
        assert!(query::is_animating(&world));

        let events = run(&mut world, Command::EndTurn);
        assert_eq!(
            events,
            vec![Event::CommandRejected {
                reason: RejectionReason::Animating
            }]
        );

        let _ = run(
            &mut world,
            Command::Tick {
                dt: DEFAULT_STEP_DURATION * 4,
            },
        );
        assert!(!query::is_animating(&world));
        assert_eq!(query::turn_info(&world).current_player, PlayerId::One);
    }
}
