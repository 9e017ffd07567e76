//! **dungeons** is a dungeon maze generation, sparsification and rendering library.
//!
//! A dungeon is generated in two stages: a randomized spanning tree walk carves
//! corridors until every cell has been visited, then an optional number of
//! sparsification passes prune dead end rooms to open up the layout.

pub mod cells;
pub mod dungeon;
pub mod exits;
pub mod generators;
pub mod graph;
pub mod renderers;
pub mod sparsify;
pub mod units;
mod utils;
