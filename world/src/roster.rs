//! Unit and player bookkeeping owned by the world.

use tactics_core::{Locomotion, PlayerId, TileCoord, UnitId, UnitSnapshot};

/// Authoritative state of a single unit.
#[derive(Clone, Debug)]
pub(crate) struct Unit {
    pub(crate) id: UnitId,
    pub(crate) player: PlayerId,
    pub(crate) name: &'static str,
    pub(crate) tile: TileCoord,
    pub(crate) locomotion: Locomotion,
    pub(crate) movement: u32,
    pub(crate) moved: bool,
    pub(crate) hp: u32,
    pub(crate) max_hp: u32,
}

impl Unit {
    pub(crate) fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            player: self.player,
            name: self.name.to_owned(),
            tile: self.tile,
            locomotion: self.locomotion,
            movement: self.movement,
            moved: self.moved,
            hp: self.hp,
            max_hp: self.max_hp,
        }
    }
}

/// Resource counters tracked for a player.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Player {
    pub(crate) id: PlayerId,
    pub(crate) ig: u32,
    pub(crate) ct: u32,
}

/// Units ordered by identifier.
#[derive(Clone, Debug, Default)]
pub(crate) struct Roster {
    units: Vec<Unit>,
}

impl Roster {
    /// Builds the opening deployment of both players.
    pub(crate) fn sample() -> Self {
        let units = SAMPLE_UNITS
            .iter()
            .map(|seed| Unit {
                id: UnitId::new(seed.id),
                player: seed.player,
                name: seed.name,
                tile: TileCoord::new(seed.column, seed.row),
                locomotion: seed.locomotion,
                movement: seed.movement,
                moved: false,
                hp: seed.max_hp,
                max_hp: seed.max_hp,
            })
            .collect();
        Self { units }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub(crate) fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    /// Lowest-id unit standing on the tile, optionally skipping one unit.
    pub(crate) fn occupant(&self, tile: TileCoord, except: Option<UnitId>) -> Option<&Unit> {
        self.units
            .iter()
            .filter(|unit| Some(unit.id) != except)
            .find(|unit| unit.tile == tile)
    }

    /// Clears the moved flag of every unit owned by `player`.
    pub(crate) fn refresh(&mut self, player: PlayerId) {
        self.units
            .iter_mut()
            .filter(|unit| unit.player == player)
            .for_each(|unit| unit.moved = false);
    }

    /// Clears the moved flag of every unit.
    pub(crate) fn refresh_all(&mut self) {
        self.units.iter_mut().for_each(|unit| unit.moved = false);
    }

    pub(crate) fn count_for(&self, player: PlayerId) -> usize {
        self.units.iter().filter(|unit| unit.player == player).count()
    }
}

/// Opening resource counters for both players.
pub(crate) const SAMPLE_PLAYERS: [Player; 2] = [
    Player {
        id: PlayerId::One,
        ig: 1500,
        ct: 300,
    },
    Player {
        id: PlayerId::Two,
        ig: 1200,
        ct: 250,
    },
];

struct UnitSeed {
    id: u32,
    player: PlayerId,
    name: &'static str,
    column: u32,
    row: u32,
    locomotion: Locomotion,
    movement: u32,
    max_hp: u32,
}

const SAMPLE_UNITS: [UnitSeed; 8] = [
    UnitSeed {
        id: 1,
        player: PlayerId::One,
        name: "ZAKU",
        column: 2,
        row: 2,
        locomotion: Locomotion::General,
        movement: 4,
        max_hp: 80,
    },
    UnitSeed {
        id: 2,
        player: PlayerId::One,
        name: "DOM",
        column: 3,
        row: 5,
        locomotion: Locomotion::General,
        movement: 4,
        max_hp: 100,
    },
    UnitSeed {
        id: 3,
        player: PlayerId::One,
        name: "ZGOK",
        column: 1,
        row: 12,
        locomotion: Locomotion::Amphibious,
        movement: 4,
        max_hp: 90,
    },
    UnitSeed {
        id: 4,
        player: PlayerId::One,
        name: "MUSAI",
        column: 1,
        row: 17,
        locomotion: Locomotion::Ship,
        movement: 5,
        max_hp: 200,
    },
    UnitSeed {
        id: 5,
        player: PlayerId::Two,
        name: "GM",
        column: 22,
        row: 2,
        locomotion: Locomotion::General,
        movement: 4,
        max_hp: 75,
    },
    UnitSeed {
        id: 6,
        player: PlayerId::Two,
        name: "GUNTANK",
        column: 24,
        row: 5,
        locomotion: Locomotion::General,
        movement: 3,
        max_hp: 110,
    },
    UnitSeed {
        id: 7,
        player: PlayerId::Two,
        name: "AQUA GM",
        column: 27,
        row: 12,
        locomotion: Locomotion::Amphibious,
        movement: 4,
        max_hp: 85,
    },
    UnitSeed {
        id: 8,
        player: PlayerId::Two,
        name: "SALAMIS",
        column: 27,
        row: 17,
        locomotion: Locomotion::Ship,
        movement: 5,
        max_hp: 220,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_roster_fields_four_units_per_player() {
        let roster = Roster::sample();
        assert_eq!(roster.count_for(PlayerId::One), 4);
        assert_eq!(roster.count_for(PlayerId::Two), 4);
    }

    #[test]
    fn occupant_prefers_lowest_identifier() {
        let mut roster = Roster::sample();
        let tile = TileCoord::new(4, 2);
        roster.get_mut(UnitId::new(5)).expect("gm").tile = tile;
        roster.get_mut(UnitId::new(1)).expect("zaku").tile = tile;

        assert_eq!(roster.occupant(tile, None).map(|unit| unit.id), Some(UnitId::new(1)));
        assert_eq!(
            roster.occupant(tile, Some(UnitId::new(1))).map(|unit| unit.id),
            Some(UnitId::new(5))
        );
    }

    #[test]
    fn refresh_only_touches_requested_player() {
        let mut roster = Roster::sample();
        roster.units.iter_mut().for_each(|unit| unit.moved = true);

        roster.refresh(PlayerId::Two);

        assert!(roster.iter().filter(|unit| unit.player == PlayerId::One).all(|unit| unit.moved));
        assert!(roster.iter().filter(|unit| unit.player == PlayerId::Two).all(|unit| !unit.moved));
    }
}
