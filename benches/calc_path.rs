//! Measure finding a path across a terraced world without the region search
//!
//! World is 200 cells by 200 cells
//!

use bevy_hierarchical_pathfinding_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Create a grid of 8x8 blocks of random elevation along with its graphs
fn prepare_graphs(columns: usize, rows: usize) -> (CellGrid, NodeGraph, RegionGraph) {
	let mut rng = StdRng::seed_from_u64(42);
	let blocks_per_row = columns.div_ceil(8);
	let blocks: Vec<u8> = (0..blocks_per_row * rows.div_ceil(8))
		.map(|_| rng.random_range(0..=2))
		.collect();
	let mut cells = Vec::with_capacity(columns * rows);
	for row in 0..rows {
		for column in 0..columns {
			cells.push(Cell::flat(blocks[column / 8 + (row / 8) * blocks_per_row]));
		}
	}
	let mut grid = CellGrid::from_cells(columns, rows, cells);
	let node_graph = NodeGraph::new(&grid);
	let region_graph = RegionGraph::new(&mut grid, &node_graph);
	(grid, node_graph, region_graph)
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(50);
	let (grid, node_graph, region_graph) = prepare_graphs(200, 200);
	let settings = PathfinderSettings::default();
	let mut pathfinder = Pathfinder::new(&grid, &node_graph, &region_graph, &settings);
	// south-west to north-east corner
	let start = NodeID::new(0);
	let goal = NodeID::new(grid.len() - 1);
	let options = PathOptions::new(false, true, false, false, false);
	group.bench_function("calc_path", |b| {
		b.iter(|| pathfinder.get_path(black_box(start), black_box(goal), &options))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
