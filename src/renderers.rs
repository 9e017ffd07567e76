use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::dungeon::Dungeon;
use crate::exits::Exits;

use image::{ImageBuffer, Rgb, RgbImage};
use std::cmp;
use std::io;
use std::path::Path;

const BLACK: Rgb<u8> = Rgb { data: [0, 0, 0] };
const WHITE: Rgb<u8> = Rgb { data: [0xff, 0xff, 0xff] };

#[derive(Debug, Copy, Clone)]
pub struct RenderOptions<'path> {
    room_pixels: u8,
    output_file: Option<&'path Path>,
}

#[derive(Debug, Copy, Clone)]
pub struct RenderOptionsBuilder<'path> {
    options: RenderOptions<'path>,
}

impl<'path> RenderOptionsBuilder<'path> {
    pub fn new() -> RenderOptionsBuilder<'path> {
        RenderOptionsBuilder {
            options: RenderOptions {
                room_pixels: 10,
                output_file: None,
            },
        }
    }

    pub fn room_pixels(mut self, room_pixels: u8) -> RenderOptionsBuilder<'path> {
        self.options.room_pixels = room_pixels;
        self
    }

    pub fn output_file(mut self, path: Option<&'path Path>) -> RenderOptionsBuilder<'path> {
        self.options.output_file = path;
        self
    }

    pub fn build(self) -> RenderOptions<'path> {
        self.options
    }
}

/// Render the dungeon's room map to a PNG file, if an output file was set.
///
/// Any cell with a non zero exit mask is drawn as a room block; each set east
/// or south bit adds a corridor bar spanning the full gap to the neighbouring
/// room, so the mirrored bit on the other side needs no stub of its own.
/// Sealed cells (empty masks) stay background coloured.
pub fn render_dungeon(dungeon: &Dungeon, options: &RenderOptions) -> io::Result<()> {
    if let Some(path) = options.output_file {
        let image = dungeon_image(dungeon, options.room_pixels);
        image.save(path)?;
    }
    Ok(())
}

fn dungeon_image(dungeon: &Dungeon, room_pixels: u8) -> RgbImage {
    let geometry = RenderGeometry::new(room_pixels);
    let (image_width, image_height) = geometry.image_size(dungeon);
    let mut image: RgbImage = ImageBuffer::from_pixel(image_width, image_height, BLACK);

    for y in 0..dungeon.height().0 {
        for x in 0..dungeon.width().0 {
            let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
            let exits = dungeon.exits(coord).unwrap_or_else(Exits::none);
            if exits.is_empty() {
                continue;
            }

            let room_x = geometry.margin + x as u32 * geometry.room_delta;
            let room_y = geometry.margin + y as u32 * geometry.room_delta;
            fill_rect(&mut image, room_x, room_y, geometry.room, geometry.room, WHITE);

            if exits.contains(CompassPrimary::East) {
                fill_rect(&mut image,
                          room_x + geometry.room,
                          room_y + geometry.corridor_offset,
                          geometry.corridor_length,
                          geometry.corridor_thickness,
                          WHITE);
            }
            if exits.contains(CompassPrimary::South) {
                fill_rect(&mut image,
                          room_x + geometry.corridor_offset,
                          room_y + geometry.room,
                          geometry.corridor_thickness,
                          geometry.corridor_length,
                          WHITE);
            }
        }
    }

    image
}

#[derive(Debug, Copy, Clone)]
struct RenderGeometry {
    room: u32,
    corridor_length: u32,
    corridor_thickness: u32,
    corridor_offset: u32,
    room_delta: u32,
    margin: u32,
}

impl RenderGeometry {
    fn new(room_pixels: u8) -> RenderGeometry {
        let room = cmp::max(4, room_pixels as u32);
        let corridor_length = room / 2;
        let corridor_thickness = cmp::max(1, room * 3 / 10);
        RenderGeometry {
            room,
            corridor_length,
            corridor_thickness,
            corridor_offset: (room - corridor_thickness) / 2,
            room_delta: room + corridor_length,
            margin: room * 3,
        }
    }

    fn image_size(&self, dungeon: &Dungeon) -> (u32, u32) {
        // no corridor gap after the final row/column of rooms
        let width = dungeon.width().0 as u32 * self.room_delta - self.corridor_length +
                    2 * self.margin;
        let height = dungeon.height().0 as u32 * self.room_delta - self.corridor_length +
                     2 * self.margin;
        (width, height)
    }
}

fn fill_rect(image: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, colour: Rgb<u8>) {
    for px in x..(x + width) {
        for py in y..(y + height) {
            image.put_pixel(px, py, colour);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{Height, Width};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn image_size_accounts_for_margins_and_final_room() {
        let d = Dungeon::new(Width(3), Height(2)).expect("valid dimensions");
        let geometry = RenderGeometry::new(10);
        // room 10, corridor 5, margin 30: 3*15 - 5 + 60 by 2*15 - 5 + 60
        assert_eq!(geometry.image_size(&d), (100, 85));
    }

    #[test]
    fn rooms_and_corridors_are_painted() {
        let mut d = Dungeon::new(Width(2), Height(1)).expect("valid dimensions");
        d.carve(gc(0, 0), CompassPrimary::East);

        let image = dungeon_image(&d, 10);

        // centre of the left room
        assert_eq!(*image.get_pixel(35, 35), WHITE);
        // centre of the corridor between the two rooms
        assert_eq!(*image.get_pixel(42, 35), WHITE);
        // centre of the right room
        assert_eq!(*image.get_pixel(50, 35), WHITE);
        // margin stays background coloured
        assert_eq!(*image.get_pixel(5, 5), BLACK);
    }

    #[test]
    fn sealed_cells_are_not_painted() {
        let mut d = Dungeon::new(Width(2), Height(1)).expect("valid dimensions");
        d.carve(gc(0, 0), CompassPrimary::East);
        d.erase(gc(0, 0), CompassPrimary::East);

        let image = dungeon_image(&d, 10);
        assert_eq!(*image.get_pixel(35, 35), BLACK);
        assert_eq!(*image.get_pixel(50, 35), BLACK);
    }

    #[test]
    fn tiny_room_pixel_requests_are_clamped() {
        let geometry = RenderGeometry::new(0);
        assert!(geometry.room >= 4);
        assert!(geometry.corridor_thickness >= 1);
    }

    #[test]
    fn rendering_without_an_output_file_is_a_no_op() {
        let d = Dungeon::new(Width(2), Height(2)).expect("valid dimensions");
        let options = RenderOptionsBuilder::new().room_pixels(8).build();
        assert!(render_dungeon(&d, &options).is_ok());
    }
}
