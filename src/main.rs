use docopt::Docopt;
use dungeons::{
    dungeon::Dungeon,
    generators, graph,
    renderers::{self, RenderOptionsBuilder},
    sparsify,
    units::{Height, SparsenessPasses, Width},
};
use rand::{SeedableRng, XorShiftRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path,
};

const USAGE: &str = "Dungeons

Usage:
    dungeons_driver -h | --help
    dungeons_driver [--grid-width=<w> --grid-height=<h>] [--sparseness=<n>] [--seed=<s>] [text --text-out=<path>] [image --image-out=<path> --room-pixels=<n>] [--save-edges=<path>]

Options:
    -h --help            Show this screen.
    --grid-width=<w>     The grid width in a w*h grid [default: 60].
    --grid-height=<h>    The grid height in a w*h grid [default: 40].
    --sparseness=<n>     Dead end pruning passes to run after generation [default: 0].
    --seed=<s>           Seed the random number generator for reproducible dungeons.
    --text-out=<path>    Output file path for a textual rendering of the dungeon.
    --image-out=<path>   Output file path for an image rendering of the dungeon. Always PNG format.
    --room-pixels=<n>    Pixel count to render one room [default: 10] max 255.
    --save-edges=<path>  Serialize the dungeon corridors to a text file: each line is a pair of numbers. Line 1: n(#cells) m(#corridors). Line 2+ corridor between cells. Uses 1-based cell indices.
";

#[derive(Debug, Deserialize)]
struct DungeonArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_sparseness: usize,
    flag_seed: Option<u32>,
    cmd_text: bool,
    flag_text_out: String,
    cmd_image: bool,
    flag_image_out: String,
    flag_room_pixels: u8,
    flag_save_edges: String,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: DungeonArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut dungeon = Dungeon::new(Width(args.flag_grid_width), Height(args.flag_grid_height))
        .map_err(|_| "Invalid dungeon dimensions: grid width and height must both be positive")?;

    let mut rng = make_rng(args.flag_seed);
    generators::random_walk(&mut dungeon, &mut rng);
    sparsify::sparsify(&mut dungeon, SparsenessPasses(args.flag_sparseness));

    // Default to a text render on stdout if not asked for anything specific
    let do_text_render = args.cmd_text || !args.cmd_image;

    if do_text_render {
        if args.flag_text_out.is_empty() {
            println!("{}", dungeon);
        } else {
            write_text_to_file(&format!("{}", dungeon), &args.flag_text_out)
                .chain_err(|| {
                    format!("Failed to write dungeon to text file {}", args.flag_text_out)
                })?;
        }
    }

    if args.cmd_image {
        let out_image_path = if args.flag_image_out.is_empty() {
            None
        } else {
            Some(Path::new(&args.flag_image_out))
        };
        let render_options = RenderOptionsBuilder::new()
            .room_pixels(args.flag_room_pixels)
            .output_file(out_image_path)
            .build();
        renderers::render_dungeon(&dungeon, &render_options)
            .chain_err(|| format!("Failed to write dungeon image {}", args.flag_image_out))?;
    }

    if !args.flag_save_edges.is_empty() {
        save_dungeon_graph(&dungeon, &args.flag_save_edges)?;
    }

    Ok(())
}

fn make_rng(seed: Option<u32>) -> XorShiftRng {
    match seed {
        Some(seed_value) => {
            // XorShift forbids an all zero seed state
            let word = if seed_value == 0 { 0x9E37_79B9 } else { seed_value };
            XorShiftRng::from_seed([word,
                                    word.wrapping_add(0x9E37_79B9),
                                    word.wrapping_add(0x3C6E_F372),
                                    word.wrapping_add(0xDAA6_6D2B)])
        }
        None => rand::weak_rng(),
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_dungeon_graph(dungeon: &Dungeon, file_path: &str) -> Result<()> {

    let dungeon_graph = graph::room_graph(dungeon);

    let mut graph_data = String::new();
    graph_data.push_str(dungeon_graph.node_count().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(dungeon_graph.edge_count().to_string().as_ref());
    graph_data.push('\n');

    for edge in dungeon_graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write dungeon graph to text file {}", file_path))?;

    Ok(())
}
