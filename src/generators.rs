use crate::cells::ALL_DIRECTIONS;
use crate::dungeon::Dungeon;
use crate::utils::fnv_hashset;

use rand::{Rng, XorShiftRng};

/// Apply the random walk spanning tree algorithm to an empty dungeon.
///
/// Starting from a uniformly random cell the walk repeatedly tries the four
/// cardinal directions in a freshly shuffled order and carves a corridor to
/// the first in-bounds neighbour that has not been visited, which then becomes
/// the current cell. When every in-bounds neighbour is already visited the
/// walk is stuck: it relocates to a random visited cell without carving
/// anything and resumes from there. The walk ends once every cell has been
/// visited, at which point the carved corridors form a spanning tree of the
/// grid: connected, cycle free, cells - 1 corridors.
///
/// Relocation is a random restart, not a backtrack to the walk's parent cell.
/// Restarting anywhere in the visited region grows long isolated branches
/// rather than the corridor-dense clusters recursive backtracking produces.
///
/// The restart draws coordinates from the whole grid and rejects unvisited
/// ones. Near the end of generation most draws are rejected, costing up to
/// O(cells) per stuck event, which is fine at the tens-by-tens grid sizes this
/// library targets. Sampling the visited set directly would be cheaper for
/// huge grids but changes the output distribution, so it is deliberately not
/// done here.
pub fn random_walk(dungeon: &mut Dungeon, rng: &mut XorShiftRng) {
    let mut unvisited = fnv_hashset(dungeon.size().0);
    for coord in dungeon.iter() {
        unvisited.insert(coord);
    }

    let mut current = dungeon.random_cell(rng);
    dungeon.place_room(current);
    unvisited.remove(&current);

    while !unvisited.is_empty() {

        let mut directions = ALL_DIRECTIONS;
        rng.shuffle(&mut directions);

        let step = directions.iter()
            .filter_map(|&dir| {
                dungeon.neighbour_at_direction(current, dir)
                       .map(|neighbour| (dir, neighbour))
            })
            .find(|&(_, neighbour)| unvisited.contains(&neighbour));

        match step {
            Some((direction, next)) => {
                let _ = dungeon.carve(current, direction);
                unvisited.remove(&next);
                current = next;
            }
            None => {
                // Stuck in a dead end. Rejection sample the whole grid until
                // we land on a visited cell and continue the walk from there.
                loop {
                    let cell = dungeon.random_cell(rng);
                    if !unvisited.contains(&cell) {
                        current = cell;
                        break;
                    }
                }
            }
        }
    }
}
