//! Shared fixtures for the integration tests.

use scenic_nav_lib::{Dataset, EdgeType, Graph, Spot, SpotId};

/// Plain spot with a name derived from its id.
#[allow(dead_code)]
pub fn spot(id: SpotId) -> Spot {
    Spot::new(id, format!("景点{id}"), format!("Spot {id}"))
}

#[allow(dead_code)]
pub fn spot_at(id: SpotId, x: f64, y: f64) -> Spot {
    spot(id).with_position(x, y)
}

/// Four spots where only congestion decides the best route from 1 to 2.
///
/// Undirected edges: 1-3 (300), 3-2 (`direct`), 3-4 (250, crowded both
/// ways), 4-2 (150).
#[allow(dead_code)]
pub fn crowding_graph(direct: f64) -> Graph {
    let mut graph = Graph::undirected();
    for id in 1..=4 {
        graph.add_vertex(spot(id));
    }
    graph.add_edge(1, 3, 300.0, EdgeType::Walking);
    graph.add_edge(3, 2, direct, EdgeType::Walking);
    graph.add_edge(3, 4, 250.0, EdgeType::Stairs);
    graph.add_edge(4, 2, 150.0, EdgeType::Walking);
    graph.set_crowded(3, 4, true);
    graph.set_crowded(4, 3, true);
    graph
}

/// Complete undirected graph over planar points, weighted by Euclidean
/// distance so the triangle inequality holds.
#[allow(dead_code)]
pub fn metric_graph(points: &[(f64, f64)]) -> Graph {
    let mut graph = Graph::undirected();
    for (index, (x, y)) in points.iter().enumerate() {
        graph.add_vertex(spot_at(index as SpotId + 1, *x, *y));
    }
    let ids: Vec<SpotId> = graph.vertex_ids().collect();
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            let distance = graph
                .spot(a)
                .zip(graph.spot(b))
                .map(|(sa, sb)| sa.distance_to(sb))
                .expect("both spots present");
            graph.add_edge(a, b, distance, EdgeType::Walking);
        }
    }
    graph
}

/// The bundled Temple of Heaven data, loaded undirected.
#[allow(dead_code)]
pub fn temple_of_heaven() -> Dataset {
    Dataset::sample(false).expect("bundled sample data loads")
}

#[allow(dead_code)]
pub fn ids(spots: &[&Spot]) -> Vec<SpotId> {
    spots.iter().map(|spot| spot.id()).collect()
}
