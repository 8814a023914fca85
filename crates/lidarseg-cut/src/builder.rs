//! Graph assembly
//!
//! Combines the regional and smoothness terms into the capacitated graph
//! the solver consumes: one node per pixel in row-major order, terminal
//! capacities from the data term (with seed hard constraints already
//! applied), one symmetric neighbor edge per 8-neighbor pair.

use crate::error::CutResult;
use crate::regional::RegionalTerm;
use crate::smoothness::SmoothnessTerm;
use lidarseg_graph::FlowGraph;

/// Build the flow graph for one cut
pub fn build_graph(regional: &RegionalTerm, smoothness: &SmoothnessTerm) -> CutResult<FlowGraph> {
    let num_nodes = regional.t_source.len() as u32;
    let mut graph = FlowGraph::new(num_nodes);

    for node in 0..num_nodes {
        let i = node as usize;
        graph.set_terminal_caps(node, regional.t_source[i], regional.t_sink[i])?;
    }
    for link in &smoothness.links {
        graph.add_edge(link.a, link.b, link.weight)?;
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difference::Difference;
    use crate::params::SegmentationParams;
    use lidarseg_core::{Coord, RgbdImage, SeedSet};

    #[test]
    fn test_graph_shape_matches_image() {
        let mut img = RgbdImage::new(3, 2, 4).unwrap();
        img.set_pixel(0, 0, &[0.2, 0.2, 0.2, 0.1]).unwrap();
        img.set_pixel(2, 1, &[0.8, 0.8, 0.8, 0.9]).unwrap();

        let seeds = SeedSet::from_coords(vec![Coord::new(0, 0)], vec![Coord::new(2, 1)]);
        let params = SegmentationParams::default();
        let regional = RegionalTerm::build(&img, &seeds, &params);
        let smoothness = SmoothnessTerm::build(&img, Difference::Depth);

        let graph = build_graph(&regional, &smoothness).unwrap();
        assert_eq!(graph.num_nodes(), 6);
        // 3x2 grid: 4 horizontal + 3 vertical + 2*2 diagonal pairs
        assert_eq!(graph.edges().len(), 11);

        // seed hard constraints survive assembly
        let (s0, t0) = graph.terminal_caps(0).unwrap();
        assert_eq!(s0, regional.hard_cap);
        assert_eq!(t0, 0.0);
        let (s5, t5) = graph.terminal_caps(5).unwrap();
        assert_eq!(s5, 0.0);
        assert_eq!(t5, regional.hard_cap);
    }

    #[test]
    fn test_duplicate_seeds_single_terminal_assignment() {
        let img = RgbdImage::new(2, 1, 4).unwrap();
        let seeds = SeedSet::from_coords(
            vec![Coord::new(0, 0), Coord::new(0, 0)],
            vec![Coord::new(1, 0)],
        );
        let params = SegmentationParams::default();
        let regional = RegionalTerm::build(&img, &seeds, &params);
        let smoothness = SmoothnessTerm::build(&img, Difference::Depth);
        let graph = build_graph(&regional, &smoothness).unwrap();

        // duplicates overwrite the same terminal slots: exactly one
        // terminal capacity per pixel per side
        assert_eq!(
            graph.terminal_caps(0).unwrap(),
            (regional.hard_cap, 0.0)
        );
    }
}
