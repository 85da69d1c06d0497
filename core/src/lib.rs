#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the tactics engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually changed. Requests the world refuses leave state untouched and are
//! reported through [`Event::CommandRejected`].

use std::{collections::BTreeMap, fmt, num::ParseIntError, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edge length of a square tile in pixels at scale `1.0`.
pub const TILE_SIZE: u32 = 32;

/// Number of tile columns in the map.
pub const MAP_COLS: u32 = 30;

/// Number of tile rows in the map.
pub const MAP_ROWS: u32 = 20;

/// Pixels scrolled by a single arrow key press.
pub const SCROLL_SPEED: f32 = 32.0;

/// Smallest permitted zoom scale.
pub const MIN_SCALE: f32 = 1.0;

/// Largest permitted zoom scale.
pub const MAX_SCALE: f32 = 4.0;

/// Zoom scale applied when a camera is created.
pub const DEFAULT_SCALE: f32 = 2.0;

/// Multiplicative scale change applied per wheel notch.
pub const ZOOM_FACTOR: f32 = 1.25;

/// Cumulative pointer travel, in pixels, after which a press becomes a drag.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Published sentinel for terrain that consumes all remaining movement.
pub const COST_ALL: i32 = -1;

/// Published sentinel for terrain a locomotion class can never enter.
pub const COST_BLOCKED: i32 = -2;

/// Time a move animation dwells on each tile unless reconfigured.
pub const DEFAULT_STEP_DURATION: Duration = Duration::from_millis(150);

/// Width of the minimap overview surface in pixels.
pub const MINIMAP_WIDTH: f32 = 200.0;

/// Height of the minimap overview surface in pixels.
pub const MINIMAP_HEIGHT: f32 = 120.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Selects a unit, or deselects it when it is already selected.
    SelectUnit {
        /// Identifier of the unit to toggle.
        unit: UnitId,
    },
    /// Reports a click on a map tile, resolved by the current selection mode.
    ClickTile {
        /// Tile that received the click.
        tile: TileCoord,
    },
    /// Clears tile selection, unit selection, and the movement range.
    ClearSelection,
    /// Moves a unit immediately, without animation.
    MoveUnit {
        /// Identifier of the unit to move.
        unit: UnitId,
        /// Tile the unit should end on.
        destination: TileCoord,
    },
    /// Hands control to the other player.
    EndTurn,
    /// Forces the turn state back to turn one, player one, and clears every moved flag.
    ResetTurn,
    /// Updates how long a move animation dwells on each tile.
    SetAnimationSpeed {
        /// Dwell time per tile; zero resolves moves synchronously.
        step_duration: Duration,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Records the tile under the pointer, or `None` when the pointer left the map.
    HoverTile {
        /// Hovered tile, if any.
        tile: Option<TileCoord>,
    },
    /// Places a unit on an arbitrary tile for scenario set-up.
    RelocateUnit {
        /// Identifier of the unit to place.
        unit: UnitId,
        /// Tile the unit should occupy.
        tile: TileCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a unit became the active selection.
    UnitSelected {
        /// Identifier of the selected unit.
        unit: UnitId,
        /// Number of tiles in the freshly computed movement range.
        reachable: usize,
    },
    /// Confirms that the selected unit was released.
    UnitDeselected {
        /// Identifier of the unit that is no longer selected.
        unit: UnitId,
    },
    /// Confirms that a tile became selected in free tile-pick mode.
    TileSelected {
        /// Tile that became selected.
        tile: TileCoord,
    },
    /// Confirms that the tile selection was released.
    TileDeselected {
        /// Tile that is no longer selected.
        tile: TileCoord,
    },
    /// Announces that an animated move began.
    MoveStarted {
        /// Identifier of the moving unit.
        unit: UnitId,
        /// Tiles visited by the move, including both endpoints.
        path: Vec<TileCoord>,
    },
    /// Reports that an animated unit arrived on the next tile of its path.
    AnimationStepped {
        /// Identifier of the moving unit.
        unit: UnitId,
        /// Tile currently displayed for the unit.
        tile: TileCoord,
    },
    /// Confirms that a move was committed.
    UnitMoved {
        /// Identifier of the unit that moved.
        unit: UnitId,
        /// Tile the unit left.
        from: TileCoord,
        /// Tile the unit now occupies.
        to: TileCoord,
    },
    /// Reports that a move ended on a tile held by an enemy unit.
    EngagementStarted {
        /// Unit that initiated the engagement.
        attacker: UnitId,
        /// Unit that occupied the destination tile.
        defender: UnitId,
        /// Tile where both units met.
        tile: TileCoord,
    },
    /// Announces that control passed to another phase.
    PhaseChanged {
        /// Turn state after the transition.
        turn: TurnInfo,
    },
    /// Confirms that the turn state was forced back to its initial phase.
    TurnReset,
    /// Confirms that the animation dwell time changed.
    AnimationSpeedChanged {
        /// Dwell time per tile now in effect.
        step_duration: Duration,
    },
    /// Reports that the hovered tile changed.
    HoverChanged {
        /// Tile under the pointer, if any.
        tile: Option<TileCoord>,
    },
    /// Confirms that a unit was placed by a set-up command.
    UnitRelocated {
        /// Identifier of the relocated unit.
        unit: UnitId,
        /// Tile the unit occupied before.
        from: TileCoord,
        /// Tile the unit occupies now.
        to: TileCoord,
    },
    /// Reports that a command was refused without touching any state.
    CommandRejected {
        /// Specific reason the command was refused.
        reason: RejectionReason,
    },
}

/// Reasons the world refuses a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    /// A move animation is in flight.
    Animating,
    /// No unit with the provided identifier exists.
    UnknownUnit,
    /// The unit belongs to the player who is not currently acting.
    NotCurrentPlayer,
    /// The unit already moved during its player's phase.
    AlreadyMoved,
    /// The destination is not part of the unit's movement range.
    OutOfRange,
    /// The tile lies outside the map.
    OutOfBounds,
}

/// Location of a single map tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Reports whether the tile lies inside the published map bounds.
    #[must_use]
    pub const fn in_bounds(&self) -> bool {
        self.column < MAP_COLS && self.row < MAP_ROWS
    }

    /// Computes the Manhattan distance between two tile coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: TileCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Textual `"col,row"` key used by collaborators that index tiles by string.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.column, self.row)
    }
}

impl FromStr for TileCoord {
    type Err = ParseTileKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (column, row) = value
            .split_once(',')
            .ok_or_else(|| ParseTileKeyError::MissingSeparator(value.to_owned()))?;
        let column = column
            .trim()
            .parse()
            .map_err(ParseTileKeyError::InvalidComponent)?;
        let row = row
            .trim()
            .parse()
            .map_err(ParseTileKeyError::InvalidComponent)?;
        Ok(Self::new(column, row))
    }
}

/// Errors produced while parsing a `"col,row"` tile key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseTileKeyError {
    /// The key did not contain a comma.
    #[error("tile key `{0}` is missing the `,` separator")]
    MissingSeparator(String),
    /// One of the components was not a non-negative integer.
    #[error("tile key component is not a valid index: {0}")]
    InvalidComponent(#[source] ParseIntError),
}

/// Unique identifier assigned to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// The two sides taking turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    /// The side that acts first in every turn.
    One,
    /// The side that acts second in every turn.
    Two,
}

impl PlayerId {
    /// Both players in phase order.
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Numeric player label, `1` or `2`.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// The player acting in the other phase.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Short phase label, `"P1"` or `"P2"`.
    #[must_use]
    pub const fn phase_label(self) -> &'static str {
        match self {
            Self::One => "P1",
            Self::Two => "P2",
        }
    }
}

/// Locomotion class that decides what each terrain costs a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locomotion {
    /// Ground and space mobile suits.
    General,
    /// Units equally at home under water.
    Amphibious,
    /// Capital ships.
    Ship,
}

/// Terrain kinds painted on the map, keyed by their numeric id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Open space.
    Space = 1,
    /// Planetary plains.
    Plains = 2,
    /// Forest.
    Forest = 3,
    /// Asteroid field.
    Asteroid = 4,
    /// Submerged terrain.
    Underwater = 5,
    /// Desert.
    Desert = 6,
    /// Atmospheric entry layer.
    Atmosphere = 7,
    /// Volcano.
    Volcano = 8,
    /// Space colony.
    Colony = 9,
    /// Military base.
    Base = 10,
    /// Black hole.
    BlackHole = 11,
}

impl Terrain {
    /// Every terrain kind in id order.
    pub const ALL: [Terrain; 11] = [
        Terrain::Space,
        Terrain::Plains,
        Terrain::Forest,
        Terrain::Asteroid,
        Terrain::Underwater,
        Terrain::Desert,
        Terrain::Atmosphere,
        Terrain::Volcano,
        Terrain::Colony,
        Terrain::Base,
        Terrain::BlackHole,
    ];

    /// Numeric terrain id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Resolves a numeric terrain id.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|terrain| terrain.id() == id)
    }

    /// Display name shown by the hover overlay.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Space => "Space",
            Self::Plains => "Plains",
            Self::Forest => "Forest",
            Self::Asteroid => "Asteroid",
            Self::Underwater => "Underwater",
            Self::Desert => "Desert",
            Self::Atmosphere => "Atmosphere",
            Self::Volcano => "Volcano",
            Self::Colony => "Colony",
            Self::Base => "Base",
            Self::BlackHole => "Black Hole",
        }
    }

    /// Cost a unit of the provided class pays to enter this terrain.
    #[must_use]
    pub const fn cost_for(self, locomotion: Locomotion) -> MovementCost {
        let row = &MOVEMENT_COST_TABLE[self as usize - 1];
        match locomotion {
            Locomotion::General => row.general,
            Locomotion::Amphibious => row.amphibious,
            Locomotion::Ship => row.ship,
        }
    }
}

/// Price of entering a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementCost {
    /// Consumes the given amount of movement.
    Steps(u32),
    /// Consumes all remaining movement; the tile is a terminal stop.
    All,
    /// The tile cannot be entered.
    Blocked,
}

impl MovementCost {
    /// Integer encoding published to collaborators, using [`COST_ALL`] and [`COST_BLOCKED`].
    #[must_use]
    pub const fn raw(self) -> i32 {
        match self {
            Self::Steps(steps) => steps as i32,
            Self::All => COST_ALL,
            Self::Blocked => COST_BLOCKED,
        }
    }

    /// Decodes the published integer encoding.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            COST_ALL => Some(Self::All),
            COST_BLOCKED => Some(Self::Blocked),
            steps if steps > 0 => Some(Self::Steps(steps as u32)),
            _ => None,
        }
    }
}

impl Serialize for MovementCost {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.raw())
    }
}

/// Row of the movement cost table for one terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CostRow {
    /// Terrain the row describes.
    pub terrain: Terrain,
    /// Cost for [`Locomotion::General`].
    pub general: MovementCost,
    /// Cost for [`Locomotion::Amphibious`].
    pub amphibious: MovementCost,
    /// Cost for [`Locomotion::Ship`].
    pub ship: MovementCost,
}

const fn row(
    terrain: Terrain,
    general: MovementCost,
    amphibious: MovementCost,
    ship: MovementCost,
) -> CostRow {
    CostRow {
        terrain,
        general,
        amphibious,
        ship,
    }
}

use MovementCost::{All, Blocked, Steps};

/// Cost of every terrain for every locomotion class, indexed by `terrain id - 1`.
pub const MOVEMENT_COST_TABLE: [CostRow; 11] = [
    row(Terrain::Space, Steps(1), Steps(1), Steps(1)),
    row(Terrain::Plains, Steps(1), Steps(1), Steps(2)),
    row(Terrain::Forest, Steps(2), Steps(2), Steps(1)),
    row(Terrain::Asteroid, Steps(3), Steps(3), Steps(1)),
    row(Terrain::Underwater, Steps(3), Steps(1), Steps(1)),
    row(Terrain::Desert, Steps(3), Steps(3), Steps(1)),
    row(Terrain::Atmosphere, All, All, All),
    row(Terrain::Volcano, Blocked, Blocked, Blocked),
    row(Terrain::Colony, Steps(1), Steps(1), Steps(2)),
    row(Terrain::Base, Steps(1), Steps(1), Steps(1)),
    row(Terrain::BlackHole, Blocked, Blocked, Blocked),
];

/// Turn counter and the player whose phase is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TurnInfo {
    /// One-based turn number; increments when player two hands back to player one.
    pub turn_number: u32,
    /// Player whose units may currently be selected.
    pub current_player: PlayerId,
}

impl TurnInfo {
    /// Phase label of the active player.
    #[must_use]
    pub const fn phase(&self) -> &'static str {
        self.current_player.phase_label()
    }
}

/// Immutable representation of a single unit's state used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnitSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: UnitId,
    /// Owning player.
    pub player: PlayerId,
    /// Display name.
    pub name: String,
    /// Tile currently occupied by the unit.
    pub tile: TileCoord,
    /// Locomotion class deciding terrain costs.
    pub locomotion: Locomotion,
    /// Movement allowance per turn.
    pub movement: u32,
    /// Whether the unit already moved in its player's phase.
    pub moved: bool,
    /// Remaining hit points.
    pub hp: u32,
    /// Maximum hit points.
    pub max_hp: u32,
}

/// Read-only snapshot describing all units on the map.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a new unit view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<UnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured unit snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a unit by identifier.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&UnitSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Number of units owned by the provided player.
    #[must_use]
    pub fn count_for(&self, player: PlayerId) -> usize {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.player == player)
            .count()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<UnitSnapshot> {
        self.snapshots
    }
}

/// Tiles reachable by a unit, mapped to the movement left after arriving.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementRange {
    remaining: BTreeMap<TileCoord, u32>,
}

impl MovementRange {
    /// Creates a range from tile/remaining pairs.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (TileCoord, u32)>) -> Self {
        Self {
            remaining: entries.into_iter().collect(),
        }
    }

    /// Movement left after arriving on the tile, if it is reachable.
    #[must_use]
    pub fn remaining(&self, tile: TileCoord) -> Option<u32> {
        self.remaining.get(&tile).copied()
    }

    /// Movement left for a `"col,row"` key, mirroring string-keyed collaborators.
    #[must_use]
    pub fn remaining_for_key(&self, key: &str) -> Option<u32> {
        key.parse().ok().and_then(|tile| self.remaining(tile))
    }

    /// Reports whether the tile is reachable.
    #[must_use]
    pub fn contains(&self, tile: TileCoord) -> bool {
        self.remaining.contains_key(&tile)
    }

    /// Iterator over reachable tiles in row-major order of their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, u32)> + '_ {
        self.remaining.iter().map(|(tile, left)| (*tile, *left))
    }

    /// Number of reachable tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Reports whether no tile is reachable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl Serialize for MovementRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.remaining.iter().map(|(tile, left)| (tile.key(), left)))
    }
}

/// How a movement-range tile should be highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum HighlightKind {
    /// Free destination.
    Reachable,
    /// Destination held by an enemy unit.
    Enemy,
}

/// Current tile and unit selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    /// Tile picked in free tile-pick mode.
    pub tile: Option<TileCoord>,
    /// Unit picked in unit mode.
    pub unit: Option<UnitId>,
}

/// State of an in-flight move animation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnimationSnapshot {
    /// Identifier of the moving unit.
    pub unit: UnitId,
    /// Tiles visited by the move, including both endpoints.
    pub path: Vec<TileCoord>,
    /// Index into `path` of the tile currently displayed.
    pub step: usize,
}

impl AnimationSnapshot {
    /// Tile the moving unit should be drawn on right now.
    ///
    /// The position jumps from node to node of the path; it never reports a
    /// point between two tiles.
    #[must_use]
    pub fn draw_position(&self) -> Option<TileCoord> {
        self.path.get(self.step).copied()
    }
}

/// Resource counters and roster size for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    /// Player the counters belong to.
    pub player: PlayerId,
    /// Industrial capacity counter.
    pub ig: u32,
    /// Capital counter.
    pub ct: u32,
    /// Number of units the player fields.
    pub unit_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = TileCoord::new(1, 1);
        let destination = TileCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn tile_key_uses_column_then_row() {
        assert_eq!(TileCoord::new(6, 2).key(), "6,2");
        assert_eq!("7,10".parse::<TileCoord>(), Ok(TileCoord::new(7, 10)));
    }

    #[test]
    fn tile_key_parse_rejects_malformed_input() {
        assert!(matches!(
            "72".parse::<TileCoord>(),
            Err(ParseTileKeyError::MissingSeparator(_))
        ));
        assert!(matches!(
            "-1,2".parse::<TileCoord>(),
            Err(ParseTileKeyError::InvalidComponent(_))
        ));
    }

    #[test]
    fn cost_table_is_indexed_by_terrain_id() {
        for (index, row) in MOVEMENT_COST_TABLE.iter().enumerate() {
            assert_eq!(usize::from(row.terrain.id()), index + 1);
        }
    }

    #[test]
    fn terrain_ids_resolve_back_to_their_kind() {
        for terrain in Terrain::ALL {
            assert_eq!(Terrain::from_id(terrain.id()), Some(terrain));
        }
        assert_eq!(Terrain::from_id(0), None);
        assert_eq!(Terrain::from_id(12), None);
    }

    #[test]
    fn general_costs_match_published_values() {
        assert_eq!(Terrain::Space.cost_for(Locomotion::General).raw(), 1);
        assert_eq!(Terrain::Plains.cost_for(Locomotion::General).raw(), 1);
        assert_eq!(Terrain::Forest.cost_for(Locomotion::General).raw(), 2);
        assert_eq!(Terrain::Asteroid.cost_for(Locomotion::General).raw(), 3);
        assert_eq!(Terrain::Underwater.cost_for(Locomotion::General).raw(), 3);
        assert_eq!(Terrain::Desert.cost_for(Locomotion::General).raw(), 3);
        assert_eq!(Terrain::Atmosphere.cost_for(Locomotion::General).raw(), COST_ALL);
        assert_eq!(Terrain::Volcano.cost_for(Locomotion::General).raw(), COST_BLOCKED);
        assert_eq!(Terrain::BlackHole.cost_for(Locomotion::General).raw(), COST_BLOCKED);
    }

    #[test]
    fn amphibious_and_ship_costs_favour_their_terrain() {
        assert_eq!(
            Terrain::Underwater.cost_for(Locomotion::Amphibious),
            MovementCost::Steps(1)
        );
        assert_eq!(Terrain::Forest.cost_for(Locomotion::Amphibious), MovementCost::Steps(2));
        assert_eq!(Terrain::Asteroid.cost_for(Locomotion::Amphibious), MovementCost::Steps(3));
        for terrain in [
            Terrain::Forest,
            Terrain::Asteroid,
            Terrain::Underwater,
            Terrain::Desert,
        ] {
            assert_eq!(terrain.cost_for(Locomotion::Ship), MovementCost::Steps(1));
        }
    }

    #[test]
    fn raw_cost_decoding_inverts_encoding() {
        assert_eq!(MovementCost::from_raw(COST_ALL), Some(MovementCost::All));
        assert_eq!(MovementCost::from_raw(COST_BLOCKED), Some(MovementCost::Blocked));
        assert_eq!(MovementCost::from_raw(3), Some(MovementCost::Steps(3)));
        assert_eq!(MovementCost::from_raw(0), None);
    }

    #[test]
    fn movement_range_serialises_with_string_keys() {
        let range = MovementRange::from_entries([(TileCoord::new(6, 2), 0)]);
        assert_eq!(range.remaining_for_key("6,2"), Some(0));
        assert_eq!(range.remaining_for_key("7,2"), None);

        let json = serde_json::to_string(&range).expect("serialize");
        assert_eq!(json, r#"{"6,2":0}"#);
    }

    #[test]
    fn turn_info_reports_phase_label() {
        let info = TurnInfo {
            turn_number: 3,
            current_player: PlayerId::Two,
        };
        assert_eq!(info.phase(), "P2");
        assert_eq!(PlayerId::Two.opponent(), PlayerId::One);
    }

    #[test]
    fn animation_draw_position_follows_step_index() {
        let snapshot = AnimationSnapshot {
            unit: UnitId::new(1),
            path: vec![TileCoord::new(2, 2), TileCoord::new(3, 2)],
            step: 1,
        };
        assert_eq!(snapshot.draw_position(), Some(TileCoord::new(3, 2)));
    }
}
