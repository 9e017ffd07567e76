use smallvec::SmallVec;
use std::convert::From;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

pub const ALL_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                 CompassPrimary::South,
                                                 CompassPrimary::East,
                                                 CompassPrimary::West];

impl CompassPrimary {
    /// The direction pointing back at us from the neighbouring cell.
    pub fn reverse(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// Creates a new `Cartesian2DCoordinate` offset 1 cell away in the given direction.
/// Returns None if the Coordinate is not representable (x or y would be negative).
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary)
                         -> Option<Cartesian2DCoordinate> {
    let (x, y) = (coord.x, coord.y);
    match dir {
        CompassPrimary::North => {
            if y > 0 {
                Some(Cartesian2DCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        CompassPrimary::South => Some(Cartesian2DCoordinate { x, y: y + 1 }),
        CompassPrimary::East => Some(Cartesian2DCoordinate { x: x + 1, y }),
        CompassPrimary::West => {
            if x > 0 {
                Some(Cartesian2DCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn offsets_move_one_cell() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(offset_coordinate(gc(1, 1), CompassPrimary::North), Some(gc(1, 0)));
        assert_eq!(offset_coordinate(gc(1, 1), CompassPrimary::South), Some(gc(1, 2)));
        assert_eq!(offset_coordinate(gc(1, 1), CompassPrimary::East), Some(gc(2, 1)));
        assert_eq!(offset_coordinate(gc(1, 1), CompassPrimary::West), Some(gc(0, 1)));
    }

    #[test]
    fn unrepresentable_offsets_are_none() {
        let origin = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(offset_coordinate(origin, CompassPrimary::North), None);
        assert_eq!(offset_coordinate(origin, CompassPrimary::West), None);
    }

    #[test]
    fn reverse_is_an_involution() {
        for &dir in &ALL_DIRECTIONS {
            assert_eq!(dir.reverse().reverse(), dir);
            assert!(dir.reverse() != dir);
        }
    }
}
