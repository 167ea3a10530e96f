//! Scenic-area navigation engine.
//!
//! This crate holds the spot catalog, the adjacency-list graph of walkable
//! connections, and the algorithms that plan visitor routes over it: shortest
//! paths (Dijkstra, A*, weighted multi-criteria), minimum spanning trees and
//! the MST-based tour approximation. Front-ends (the CLI) load records through
//! [`dataset`] and should only depend on the functions exported here.
//!
//! Every algorithm takes an [`EdgeCost`], so the same graph answers both
//! "shortest distance" and "avoid the crowds" queries.

#![deny(warnings)]

pub mod catalog;
pub mod collection;
pub mod cost;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod path;
pub mod preference;
pub mod route;
pub mod search;
pub mod sort;
pub mod spot;
pub mod tour;

pub use catalog::{SpotOrder, SpotQuery};
pub use collection::SpotList;
pub use cost::{CostMode, EdgeCost, EffectiveWeight, RawWeight, WeightedSum};
pub use dataset::{seed_graph, Dataset, EdgeRecord, SeedReport, SpotRecord};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeType, Graph, Vertex};
pub use path::{
    a_star, construct_path, dijkstra, find_path, multi_criteria_shortest_path, path_length,
    PathAlgorithm, ShortestPathTree,
};
pub use preference::UserPreference;
pub use route::{Route, RouteStop, RouteType};
pub use sort::SortAlgorithm;
pub use spot::{Category, Language, Position, Spot, SpotId};
pub use tour::{approximate_tsp, construct_mst_path, kruskal, optimize_tour, prim, DisjointSet};
