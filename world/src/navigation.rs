//! Cost-aware reachability search used by the world crate.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use tactics_core::{MovementCost, MovementRange, TileCoord};

/// Classification of a tile from the point of view of the moving unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Occupancy {
    /// Nobody stands on the tile.
    Free,
    /// A unit of the moving player stands on the tile.
    Friendly,
    /// A unit of the opposing player stands on the tile.
    Enemy,
}

/// Best-remaining-movement search tree rooted at a unit's tile.
///
/// Each visited tile keeps the highest movement left after arriving and the
/// tile it was reached from, so the cheapest path to any reachable tile can be
/// rebuilt. Friendly tiles are traversed but never offered as destinations;
/// enemy tiles and tiles that consume all movement end their branch.
#[derive(Clone, Debug)]
pub(crate) struct RangeSearch {
    origin: TileCoord,
    visits: HashMap<TileCoord, Visit>,
}

#[derive(Clone, Copy, Debug)]
struct Visit {
    remaining: u32,
    parent: Option<TileCoord>,
    destination: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Frontier {
    remaining: u32,
    // Reversed so equal budgets pop in ascending tile order.
    tile: Reverse<TileCoord>,
}

impl RangeSearch {
    /// Explores every tile reachable from `origin` with `budget` movement.
    pub(crate) fn explore<C, O>(
        origin: TileCoord,
        budget: u32,
        width: u32,
        height: u32,
        mut cost: C,
        mut occupancy: O,
    ) -> Self
    where
        C: FnMut(TileCoord) -> Option<MovementCost>,
        O: FnMut(TileCoord) -> Occupancy,
    {
        let mut visits = HashMap::new();
        let mut heap = BinaryHeap::new();

        if origin.column() < width && origin.row() < height {
            let _ = visits.insert(
                origin,
                Visit {
                    remaining: budget,
                    parent: None,
                    destination: false,
                },
            );
            heap.push(Frontier {
                remaining: budget,
                tile: Reverse(origin),
            });
        }

        while let Some(Frontier {
            remaining,
            tile: Reverse(tile),
        }) = heap.pop()
        {
            let Some(visit) = visits.get(&tile) else {
                continue;
            };
            if visit.remaining > remaining {
                continue;
            }
            if tile != origin && !expands(&mut occupancy, &mut cost, tile) {
                continue;
            }
            if remaining == 0 {
                continue;
            }

            for neighbor in neighbors(tile, width, height) {
                let Some(step) = cost(neighbor) else {
                    continue;
                };
                let candidate = match step {
                    MovementCost::Steps(steps) => match remaining.checked_sub(steps) {
                        Some(left) => left,
                        None => continue,
                    },
                    MovementCost::All => 0,
                    MovementCost::Blocked => continue,
                };

                if neighbor == origin {
                    continue;
                }

                if let Some(previous) = visits.get(&neighbor) {
                    if previous.remaining >= candidate {
                        continue;
                    }
                }

                let destination = occupancy(neighbor) != Occupancy::Friendly;
                let _ = visits.insert(
                    neighbor,
                    Visit {
                        remaining: candidate,
                        parent: Some(tile),
                        destination,
                    },
                );
                heap.push(Frontier {
                    remaining: candidate,
                    tile: Reverse(neighbor),
                });
            }
        }

        Self { origin, visits }
    }

    /// Destinations mapped to the movement left on arrival.
    pub(crate) fn range(&self) -> MovementRange {
        MovementRange::from_entries(
            self.visits
                .iter()
                .filter(|(tile, visit)| **tile != self.origin && visit.destination)
                .map(|(tile, visit)| (*tile, visit.remaining)),
        )
    }

    /// Cheapest path from the origin to `destination`, inclusive of both ends.
    pub(crate) fn path_to(&self, destination: TileCoord) -> Option<Vec<TileCoord>> {
        let visit = self.visits.get(&destination)?;
        if destination == self.origin || !visit.destination {
            return None;
        }

        let mut path = vec![destination];
        let mut cursor = visit.parent;
        while let Some(tile) = cursor {
            path.push(tile);
            if tile == self.origin {
                break;
            }
            cursor = self.visits.get(&tile).and_then(|step| step.parent);
        }
        path.reverse();

        if path.first() == Some(&self.origin) {
            Some(path)
        } else {
            None
        }
    }
}

fn expands<C, O>(occupancy: &mut O, cost: &mut C, tile: TileCoord) -> bool
where
    C: FnMut(TileCoord) -> Option<MovementCost>,
    O: FnMut(TileCoord) -> Occupancy,
{
    occupancy(tile) != Occupancy::Enemy && cost(tile) != Some(MovementCost::All)
}

fn neighbors(tile: TileCoord, width: u32, height: u32) -> impl Iterator<Item = TileCoord> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(row) = tile.row().checked_sub(1) {
        candidates[count] = Some(TileCoord::new(tile.column(), row));
        count += 1;
    }

    if let Some(column) = tile.column().checked_add(1) {
        if column < width {
            candidates[count] = Some(TileCoord::new(column, tile.row()));
            count += 1;
        }
    }

    if let Some(row) = tile.row().checked_add(1) {
        if row < height {
            candidates[count] = Some(TileCoord::new(tile.column(), row));
            count += 1;
        }
    }

    if let Some(column) = tile.column().checked_sub(1) {
        candidates[count] = Some(TileCoord::new(column, tile.row()));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}
