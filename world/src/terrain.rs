//! Static terrain layout consulted by the movement range search.

use tactics_core::{TileCoord, Terrain, MAP_COLS, MAP_ROWS};

/// Dense row-major grid of terrain kinds.
///
/// The grid is filled once when the world is created and never mutated
/// afterwards; lookups outside the bounds yield `None` so callers can treat
/// them like walls.
#[derive(Clone, Debug)]
pub(crate) struct TerrainGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<Terrain>,
}

impl TerrainGrid {
    /// Creates a grid of the provided size filled with a single terrain.
    pub(crate) fn filled(columns: u32, rows: u32, terrain: Terrain) -> Self {
        let width = usize::try_from(columns).unwrap_or(0);
        let height = usize::try_from(rows).unwrap_or(0);
        let count = width.checked_mul(height).unwrap_or(0);
        Self {
            columns,
            rows,
            tiles: vec![terrain; count],
        }
    }

    /// Builds the sample battlefield: open space with painted features.
    pub(crate) fn sample() -> Self {
        let mut grid = Self::filled(MAP_COLS, MAP_ROWS, Terrain::Space);
        for &(column, row, terrain) in SAMPLE_FEATURES {
            grid.paint(TileCoord::new(column, row), terrain);
        }
        grid
    }

    /// Number of columns in the grid.
    pub(crate) const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    pub(crate) const fn rows(&self) -> u32 {
        self.rows
    }

    /// Terrain at the provided tile, if it lies inside the grid.
    pub(crate) fn terrain(&self, tile: TileCoord) -> Option<Terrain> {
        self.index(tile)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Terrain ids in row-major order, one inner vector per row.
    pub(crate) fn rows_of_ids(&self) -> Vec<Vec<u8>> {
        let width = usize::try_from(self.columns).unwrap_or(0).max(1);
        self.tiles
            .chunks(width)
            .map(|row| row.iter().map(|terrain| terrain.id()).collect())
            .collect()
    }

    fn paint(&mut self, tile: TileCoord, terrain: Terrain) {
        if let Some(slot) = self.index(tile).and_then(|index| self.tiles.get_mut(index)) {
            *slot = terrain;
        }
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        if tile.column() >= self.columns || tile.row() >= self.rows {
            return None;
        }

        let width = usize::try_from(self.columns).ok()?;
        let column = usize::try_from(tile.column()).ok()?;
        let row = usize::try_from(tile.row()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

const SAMPLE_FEATURES: &[(u32, u32, Terrain)] = &[
    // Plains and forest strip south of the first deployment row.
    (3, 5, Terrain::Plains),
    (4, 5, Terrain::Plains),
    (5, 5, Terrain::Forest),
    (7, 5, Terrain::Underwater),
    (7, 6, Terrain::Underwater),
    (8, 6, Terrain::Underwater),
    // Atmospheric pocket guarded by desert.
    (6, 9, Terrain::Plains),
    (5, 10, Terrain::Plains),
    (6, 11, Terrain::Plains),
    (6, 10, Terrain::Forest),
    (7, 10, Terrain::Atmosphere),
    (7, 9, Terrain::Desert),
    (8, 9, Terrain::Desert),
    (9, 9, Terrain::Desert),
    (8, 10, Terrain::Desert),
    (9, 10, Terrain::Desert),
    (7, 11, Terrain::Desert),
    (8, 11, Terrain::Desert),
    (9, 11, Terrain::Desert),
    // Volcanic ridge.
    (12, 7, Terrain::Volcano),
    (13, 7, Terrain::Volcano),
    (12, 8, Terrain::Volcano),
    (13, 8, Terrain::Volcano),
    (15, 3, Terrain::BlackHole),
    // Asteroid belt.
    (18, 12, Terrain::Asteroid),
    (19, 12, Terrain::Asteroid),
    (19, 13, Terrain::Asteroid),
    (20, 13, Terrain::Asteroid),
    (20, 14, Terrain::Asteroid),
    // Installations.
    (14, 15, Terrain::Colony),
    (15, 15, Terrain::Colony),
    (1, 1, Terrain::Base),
    (28, 1, Terrain::Base),
];
