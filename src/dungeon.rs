use crate::cells::{offset_coordinate, Cartesian2DCoordinate, CompassPrimary};
use crate::exits::Exits;
use crate::units::{Height, NodesCount, Width};
use crate::utils::{fnv_hashmap, FnvHashMap};

use rand::{Rng, XorShiftRng};
use std::fmt;

/// A rectangular dungeon grid. The dimensions are fixed at construction time.
///
/// Every cell that has been incorporated into the dungeon maps to an exit
/// bitmask (`Exits`). During generation cells missing from the map are the
/// unvisited ones; once generation completes every cell is present. A cell
/// whose mask is empty is open floor space with no room on it, which is how
/// sparsification leaves pruned dead ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dungeon {
    width: Width,
    height: Height,
    rooms: FnvHashMap<Cartesian2DCoordinate, Exits>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum DungeonCreationError {
    InvalidDimensions,
}

impl Dungeon {
    /// Create an empty dungeon. Fails before any state is built if either
    /// dimension is zero, there would be no cell to start generating from.
    pub fn new(width: Width, height: Height) -> Result<Dungeon, DungeonCreationError> {
        if width.0 == 0 || height.0 == 0 {
            return Err(DungeonCreationError::InvalidDimensions);
        }

        Ok(Dungeon {
            width,
            height,
            rooms: fnv_hashmap(width.0 * height.0),
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.width.0 * self.height.0)
    }

    /// The number of cells incorporated into the dungeon so far.
    #[inline]
    pub fn rooms_count(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        offset_coordinate(coord, direction)
            .and_then(|neighbour_coord| if self.is_valid_coordinate(neighbour_coord) {
                Some(neighbour_coord)
            } else {
                None
            })
    }

    pub fn random_cell(&self, rng: &mut XorShiftRng) -> Cartesian2DCoordinate {
        let index = rng.gen::<usize>() % self.size().0;
        self.index_to_coordinate(index)
    }

    /// The exit mask of a cell, None if the coordinate is out of bounds or the
    /// cell has not been incorporated into the dungeon yet.
    pub fn exits(&self, coord: Cartesian2DCoordinate) -> Option<Exits> {
        self.rooms.get(&coord).cloned()
    }

    pub fn is_room(&self, coord: Cartesian2DCoordinate) -> bool {
        self.rooms.contains_key(&coord)
    }

    /// Incorporate a cell with no exits carved yet. Used for the cell a
    /// generator walk starts from.
    pub fn place_room(&mut self, coord: Cartesian2DCoordinate) {
        if self.is_valid_coordinate(coord) {
            self.rooms.entry(coord).or_insert_with(Exits::none);
        }
    }

    /// Carve a corridor from a cell to its neighbour in the given direction,
    /// setting the exit bit on both sides so the masks stay mirrored. Both
    /// cells are incorporated into the dungeon if they were not already.
    ///
    /// Returns the neighbouring coordinate, None if it is out of bounds.
    pub fn carve(&mut self,
                 from: Cartesian2DCoordinate,
                 direction: CompassPrimary)
                 -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(from) {
            return None;
        }
        let to = self.neighbour_at_direction(from, direction)?;

        self.rooms.entry(from).or_insert_with(Exits::none).insert(direction);
        self.rooms.entry(to).or_insert_with(Exits::none).insert(direction.reverse());
        Some(to)
    }

    /// Remove the corridor leaving a cell in the given direction, clearing the
    /// exit bit on this cell and the mirrored bit on the neighbour. Clearing
    /// bits that are not set does nothing, so erasing is idempotent.
    ///
    /// Returns true if this cell actually had that exit.
    pub fn erase(&mut self, from: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        let to = match self.neighbour_at_direction(from, direction) {
            Some(neighbour_coord) => neighbour_coord,
            None => return false,
        };

        let mut had_exit = false;
        if let Some(exits) = self.rooms.get_mut(&from) {
            had_exit = exits.contains(direction);
            exits.remove(direction);
        }
        if let Some(exits) = self.rooms.get_mut(&to) {
            exits.remove(direction.reverse());
        }

        had_exit
    }

    /// Do all carved exits point at in-bounds neighbours carrying the mirrored
    /// exit bit back toward us?
    pub fn exits_mirrored(&self) -> bool {
        self.iter().all(|coord| {
            let exits = match self.exits(coord) {
                Some(exits) => exits,
                None => return true,
            };
            exits.directions().iter().all(|&dir| {
                self.neighbour_at_direction(coord, dir)
                    .and_then(|neighbour_coord| self.exits(neighbour_coord))
                    .map_or(false, |neighbour_exits| neighbour_exits.contains(dir.reverse()))
            })
        })
    }

    /// Convert a grid coordinate to a one dimensional index in the range
    /// 0...dungeon.size(). Returns None if the coordinate is out of bounds.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    fn index_to_coordinate(&self, one_dimensional_index: usize) -> Cartesian2DCoordinate {
        let y = one_dimensional_index / self.width.0;
        let x = one_dimensional_index - (y * self.width.0);
        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    /// Row major iteration over every cell coordinate of the grid, visited or not.
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            row_width: self.width.0,
            cells_count: self.size().0,
        }
    }
}

impl fmt::Display for Dungeon {
    /// Text rendering of the room map.
    ///
    /// `o` is a room (any cell with a non empty exit mask), `-` a horizontal
    /// corridor and `|` a vertical one. Corridors are only drawn once, from
    /// the east/south side, the mirrored bit on the neighbour covers the rest.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut output = String::new();

        for y in 0..self.height.0 {
            let mut room_line = String::with_capacity(2 * self.width.0);
            let mut corridor_line = String::with_capacity(2 * self.width.0);

            for x in 0..self.width.0 {
                let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
                let exits = self.exits(coord).unwrap_or_else(Exits::none);

                room_line.push(if exits.is_empty() { ' ' } else { 'o' });
                room_line.push(if exits.contains(CompassPrimary::East) { '-' } else { ' ' });
                corridor_line.push(if exits.contains(CompassPrimary::South) { '|' } else { ' ' });
                corridor_line.push(' ');
            }

            output.push_str(room_line.trim_end());
            output.push('\n');
            if y + 1 < self.height.0 {
                output.push_str(corridor_line.trim_end());
                output.push('\n');
            }
        }

        write!(f, "{}", output)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    row_width: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let y = self.current_cell_number / self.row_width;
            let x = self.current_cell_number - (y * self.row_width);
            self.current_cell_number += 1;
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        (lower_bound, Some(lower_bound))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{Height, Width};
    use rand::SeedableRng;
    use std::u32;

    fn dungeon(w: usize, h: usize) -> Dungeon {
        Dungeon::new(Width(w), Height(h)).expect("valid dimensions")
    }

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(Dungeon::new(Width(0), Height(5)).unwrap_err(),
                   DungeonCreationError::InvalidDimensions);
        assert_eq!(Dungeon::new(Width(5), Height(0)).unwrap_err(),
                   DungeonCreationError::InvalidDimensions);
        assert_eq!(Dungeon::new(Width(0), Height(0)).unwrap_err(),
                   DungeonCreationError::InvalidDimensions);
        assert!(Dungeon::new(Width(1), Height(1)).is_ok());
    }

    #[test]
    fn new_dungeon_is_empty() {
        let d = dungeon(4, 3);
        assert_eq!(d.size(), NodesCount(12));
        assert_eq!(d.rooms_count(), 0);
        assert!(d.iter().all(|coord| d.exits(coord).is_none()));
    }

    #[test]
    fn coordinate_validity() {
        let d = dungeon(3, 2);
        assert!(d.is_valid_coordinate(gc(0, 0)));
        assert!(d.is_valid_coordinate(gc(2, 1)));
        assert!(!d.is_valid_coordinate(gc(3, 0)));
        assert!(!d.is_valid_coordinate(gc(0, 2)));
        assert!(!d.is_valid_coordinate(gc(u32::MAX, u32::MAX)));
    }

    #[test]
    fn neighbours_respect_grid_bounds() {
        let d = dungeon(2, 2);
        assert_eq!(d.neighbour_at_direction(gc(0, 0), CompassPrimary::North), None);
        assert_eq!(d.neighbour_at_direction(gc(0, 0), CompassPrimary::West), None);
        assert_eq!(d.neighbour_at_direction(gc(0, 0), CompassPrimary::South), Some(gc(0, 1)));
        assert_eq!(d.neighbour_at_direction(gc(0, 0), CompassPrimary::East), Some(gc(1, 0)));

        assert_eq!(d.neighbour_at_direction(gc(1, 1), CompassPrimary::South), None);
        assert_eq!(d.neighbour_at_direction(gc(1, 1), CompassPrimary::East), None);
        assert_eq!(d.neighbour_at_direction(gc(1, 1), CompassPrimary::North), Some(gc(1, 0)));
        assert_eq!(d.neighbour_at_direction(gc(1, 1), CompassPrimary::West), Some(gc(0, 1)));
    }

    #[test]
    fn carving_mirrors_the_exit_bits() {
        let mut d = dungeon(3, 3);
        let carved = d.carve(gc(1, 1), CompassPrimary::East);
        assert_eq!(carved, Some(gc(2, 1)));

        assert!(d.exits(gc(1, 1)).unwrap().contains(CompassPrimary::East));
        assert!(d.exits(gc(2, 1)).unwrap().contains(CompassPrimary::West));
        assert_eq!(d.rooms_count(), 2);
        assert!(d.exits_mirrored());
    }

    #[test]
    fn carving_out_of_bounds_is_rejected() {
        let mut d = dungeon(2, 1);
        assert_eq!(d.carve(gc(1, 0), CompassPrimary::East), None);
        assert_eq!(d.carve(gc(0, 0), CompassPrimary::North), None);
        assert_eq!(d.carve(gc(5, 5), CompassPrimary::West), None);
        assert_eq!(d.rooms_count(), 0);
    }

    #[test]
    fn erasing_clears_both_sides() {
        let mut d = dungeon(2, 1);
        d.carve(gc(0, 0), CompassPrimary::East);

        assert!(d.erase(gc(0, 0), CompassPrimary::East));
        assert!(d.exits(gc(0, 0)).unwrap().is_empty());
        assert!(d.exits(gc(1, 0)).unwrap().is_empty());
        assert!(d.exits_mirrored());

        // already erased, nothing left to clear
        assert!(!d.erase(gc(0, 0), CompassPrimary::East));
        assert!(d.exits(gc(0, 0)).unwrap().is_empty());
    }

    #[test]
    fn random_cell_is_always_in_bounds() {
        let d = dungeon(4, 7);
        let mut rng = XorShiftRng::from_seed([7, 11, 13, 17]);
        for _ in 0..1000 {
            let coord = d.random_cell(&mut rng);
            assert!(d.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn cell_iter_is_row_major() {
        let d = dungeon(2, 2);
        assert_eq!(d.iter().collect::<Vec<Cartesian2DCoordinate>>(),
                   &[gc(0, 0), gc(1, 0), gc(0, 1), gc(1, 1)]);
        assert_eq!(d.iter().size_hint(), (4, Some(4)));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let d = dungeon(3, 3);
        let indices: Vec<Option<usize>> = d.iter()
            .map(|coord| d.grid_coordinate_to_index(coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(indices, expected);

        assert_eq!(d.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(d.grid_coordinate_to_index(gc(2, 3)), None);
    }

    #[test]
    fn display_draws_rooms_and_corridors() {
        let mut d = dungeon(2, 2);
        d.carve(gc(0, 0), CompassPrimary::East);
        d.carve(gc(1, 0), CompassPrimary::South);
        d.carve(gc(1, 1), CompassPrimary::West);

        let rendered = format!("{}", d);
        assert_eq!(rendered, "o-o\n  |\no-o\n");
    }

    #[test]
    fn display_skips_sealed_cells() {
        let mut d = dungeon(2, 1);
        d.carve(gc(0, 0), CompassPrimary::East);
        d.erase(gc(0, 0), CompassPrimary::East);

        // both masks are empty so neither cell renders as a room
        assert_eq!(format!("{}", d), "\n");
    }

    #[test]
    fn weak_rng_smoke() {
        let d = dungeon(5, 5);
        let mut rng = rand::weak_rng();
        assert!(d.is_valid_coordinate(d.random_cell(&mut rng)));
    }
}
