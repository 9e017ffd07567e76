use crate::cells::{CompassPrimary, DirectionSmallVec, ALL_DIRECTIONS};

const SOUTH_BIT: u8 = 1;
const NORTH_BIT: u8 = 2;
const EAST_BIT: u8 = 4;
const WEST_BIT: u8 = 8;

/// The exit bitmask of one dungeon cell.
///
/// One bit per cardinal direction: SOUTH=1, NORTH=2, EAST=4, WEST=8.
/// A set bit means a corridor connects the cell to its neighbour in that
/// direction. The dungeon keeps these masks mirrored: an EAST bit on a cell
/// is always matched by a WEST bit on the cell's eastern neighbour.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Exits(u8);

fn direction_bit(direction: CompassPrimary) -> u8 {
    match direction {
        CompassPrimary::South => SOUTH_BIT,
        CompassPrimary::North => NORTH_BIT,
        CompassPrimary::East => EAST_BIT,
        CompassPrimary::West => WEST_BIT,
    }
}

impl Exits {
    pub fn none() -> Exits {
        Exits(0)
    }

    /// The raw 4 bit mask, as consumed by external renderers.
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, direction: CompassPrimary) -> bool {
        self.0 & direction_bit(direction) != 0
    }

    pub fn insert(&mut self, direction: CompassPrimary) {
        self.0 |= direction_bit(direction);
    }

    /// Clearing an already clear bit is a no-op, the mask never underflows.
    pub fn remove(&mut self, direction: CompassPrimary) {
        self.0 &= !direction_bit(direction);
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// The single corridor direction of a dead end cell.
    /// Returns None unless exactly one bit is set.
    pub fn single_direction(self) -> Option<CompassPrimary> {
        match self.0 {
            SOUTH_BIT => Some(CompassPrimary::South),
            NORTH_BIT => Some(CompassPrimary::North),
            EAST_BIT => Some(CompassPrimary::East),
            WEST_BIT => Some(CompassPrimary::West),
            _ => None,
        }
    }

    pub fn directions(self) -> DirectionSmallVec {
        ALL_DIRECTIONS.iter()
                      .cloned()
                      .filter(|&dir| self.contains(dir))
                      .collect::<DirectionSmallVec>()
    }
}
