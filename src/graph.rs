use crate::cells::CompassPrimary;
use crate::dungeon::Dungeon;
use crate::units::{EdgesCount, NodesCount};

use petgraph::algo::connected_components;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};

pub type DungeonGraph = Graph<(), (), Undirected, u32>;

/// Build an undirected graph of the dungeon's connectivity: one node per grid
/// cell, one edge per mirrored corridor pair. Only south and east exits are
/// scanned, the mirror invariant makes the north/west bits redundant.
pub fn room_graph(dungeon: &Dungeon) -> DungeonGraph {
    let NodesCount(nodes_count) = dungeon.size();
    let mut graph = Graph::with_capacity(nodes_count, nodes_count.saturating_sub(1));
    for _ in 0..nodes_count {
        let _ = graph.add_node(());
    }

    for (index, coord) in dungeon.iter().enumerate() {
        let exits = match dungeon.exits(coord) {
            Some(exits) => exits,
            None => continue,
        };

        for &direction in &[CompassPrimary::South, CompassPrimary::East] {
            if exits.contains(direction) {
                if let Some(neighbour_index) = dungeon.neighbour_at_direction(coord, direction)
                    .and_then(|neighbour| dungeon.grid_coordinate_to_index(neighbour)) {

                    let _ = graph.update_edge(NodeIndex::new(index),
                                              NodeIndex::new(neighbour_index),
                                              ());
                }
            }
        }
    }

    graph
}

/// The number of distinct corridors carved into the dungeon.
pub fn corridors_count(dungeon: &Dungeon) -> EdgesCount {
    EdgesCount(room_graph(dungeon).edge_count())
}

/// Is the dungeon's connectivity a spanning tree of the whole grid?
/// True for any fully generated, unsparsified dungeon: every cell reachable
/// from every other and exactly cells - 1 corridors, hence no cycles.
pub fn is_perfect_maze(dungeon: &Dungeon) -> bool {
    let graph = room_graph(dungeon);
    let NodesCount(nodes_count) = dungeon.size();
    connected_components(&graph) == 1 && graph.edge_count() == nodes_count - 1
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::Cartesian2DCoordinate;
    use crate::units::{Height, Width};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn corridor_ring() -> Dungeon {
        // 2x2 cycle, connected but one edge too many to be a tree
        let mut d = Dungeon::new(Width(2), Height(2)).expect("valid dimensions");
        d.carve(gc(0, 0), CompassPrimary::East);
        d.carve(gc(0, 0), CompassPrimary::South);
        d.carve(gc(1, 0), CompassPrimary::South);
        d.carve(gc(0, 1), CompassPrimary::East);
        d
    }

    #[test]
    fn empty_dungeon_graph_has_no_edges() {
        let d = Dungeon::new(Width(3), Height(3)).expect("valid dimensions");
        let graph = room_graph(&d);
        assert_eq!(graph.node_count(), 9);
        assert_eq!(graph.edge_count(), 0);
        assert!(!is_perfect_maze(&d));
    }

    #[test]
    fn mirrored_corridors_become_single_edges() {
        let mut d = Dungeon::new(Width(2), Height(1)).expect("valid dimensions");
        d.carve(gc(0, 0), CompassPrimary::East);
        assert_eq!(corridors_count(&d), EdgesCount(1));
        assert!(is_perfect_maze(&d));
    }

    #[test]
    fn a_cycle_is_not_a_perfect_maze() {
        let d = corridor_ring();
        assert_eq!(corridors_count(&d), EdgesCount(4));
        assert!(!is_perfect_maze(&d));
    }

    #[test]
    fn a_disconnected_tree_is_not_a_perfect_maze() {
        // two separate corridors on a 2x2 grid: right number of edges for a
        // path but split into two components
        let mut d = Dungeon::new(Width(2), Height(2)).expect("valid dimensions");
        d.carve(gc(0, 0), CompassPrimary::East);
        d.carve(gc(0, 1), CompassPrimary::East);
        assert_eq!(corridors_count(&d), EdgesCount(2));
        assert!(!is_perfect_maze(&d));
    }
}
