use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use scenic_nav_lib::cost::euclidean_heuristic;
use scenic_nav_lib::{
    a_star, approximate_tsp, construct_path, dijkstra, kruskal, optimize_tour, CostMode, Dataset,
    EdgeType, Graph, Spot, SpotId,
};
use std::hint::black_box;

const GRID_SIDE: SpotId = 40;

static SAMPLE: Lazy<Dataset> = Lazy::new(|| Dataset::sample(false).expect("sample loads"));

/// Undirected grid with unit spacing; every fifth row is crowded.
static GRID: Lazy<Graph> = Lazy::new(|| {
    let mut graph = Graph::undirected();
    let id = |row: SpotId, col: SpotId| row * GRID_SIDE + col;
    for row in 0..GRID_SIDE {
        for col in 0..GRID_SIDE {
            let spot = Spot::new(id(row, col), "格点", format!("Cell {row}/{col}"))
                .with_position(col as f64, row as f64);
            graph.add_vertex(spot);
        }
    }
    for row in 0..GRID_SIDE {
        for col in 0..GRID_SIDE {
            if col + 1 < GRID_SIDE {
                graph.add_edge(id(row, col), id(row, col + 1), 1.0, EdgeType::Walking);
                if row % 5 == 0 {
                    graph.set_crowded(id(row, col), id(row, col + 1), true);
                }
            }
            if row + 1 < GRID_SIDE {
                graph.add_edge(id(row, col), id(row + 1, col), 1.0, EdgeType::Walking);
            }
        }
    }
    graph
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let grid = &*GRID;
    let corner = GRID_SIDE * GRID_SIDE - 1;

    c.bench_function("dijkstra_grid_corner_to_corner", |b| {
        b.iter(|| {
            let tree = dijkstra(grid, 0, &CostMode::AvoidCrowds);
            black_box(construct_path(grid, &tree, corner).len())
        });
    });

    c.bench_function("astar_grid_corner_to_corner", |b| {
        b.iter(|| {
            let path = a_star(grid, 0, corner, &CostMode::Distance, euclidean_heuristic);
            black_box(path.len())
        });
    });

    c.bench_function("kruskal_grid", |b| {
        b.iter(|| black_box(kruskal(grid, &CostMode::Distance).len()));
    });

    c.bench_function("approximate_tsp_sample", |b| {
        let graph = &SAMPLE.graph;
        b.iter(|| black_box(approximate_tsp(graph, 9, &CostMode::Distance).len()));
    });

    c.bench_function("optimize_tour_sample_subset", |b| {
        let graph = &SAMPLE.graph;
        b.iter(|| black_box(optimize_tour(graph, &[9, 1, 5, 6, 3, 2], &CostMode::AvoidCrowds).len()));
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
