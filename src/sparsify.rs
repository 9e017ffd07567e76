use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::dungeon::Dungeon;
use crate::units::SparsenessPasses;

/// Prune dead end rooms from a generated dungeon for the given number of
/// passes. Zero passes leave the dungeon untouched.
///
/// Each pass seals every cell that currently has exactly one exit: the cell's
/// mask is zeroed and the mirrored bit on its corridor neighbour is cleared.
/// A pass shortens every dead end branch by one cell, so a branch of length n
/// survives n passes before disappearing entirely. The pass count is the
/// caller's density knob: a handful of passes turns a corridor-saturated maze
/// into scattered rooms joined by the surviving trunk corridors.
pub fn sparsify(dungeon: &mut Dungeon, passes: SparsenessPasses) {
    let SparsenessPasses(rounds) = passes;
    for _ in 0..rounds {
        prune_dead_ends(dungeon);
    }
}

fn prune_dead_ends(dungeon: &mut Dungeon) {
    // Which cells are dead ends is decided against the state at the start of
    // the round. Erasing while deciding would make a pass sensitive to cell
    // visiting order: pruning one end of a two cell corridor turns the other
    // end into a fresh dead end mid-round.
    let dead_ends: Vec<(Cartesian2DCoordinate, CompassPrimary)> = dungeon.iter()
        .filter_map(|coord| {
            dungeon.exits(coord)
                   .and_then(|exits| exits.single_direction())
                   .map(|direction| (coord, direction))
        })
        .collect();

    for (coord, direction) in dead_ends {
        dungeon.erase(coord, direction);
    }
}
