//! Edge cost strategies injected into every path and tree algorithm.
//!
//! Algorithms never read an edge's weight directly. They ask an [`EdgeCost`]
//! instead, so the same solver can answer "shortest distance" and "avoid the
//! crowds" queries. Any `Fn(&Edge) -> f64` closure is a valid cost function.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Edge, Vertex};

/// Maps an edge to a non-negative traversal cost.
pub trait EdgeCost {
    fn cost(&self, edge: &Edge) -> f64;
}

impl<F> EdgeCost for F
where
    F: Fn(&Edge) -> f64,
{
    fn cost(&self, edge: &Edge) -> f64 {
        self(edge)
    }
}

/// The edge's stored weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawWeight;

impl EdgeCost for RawWeight {
    fn cost(&self, edge: &Edge) -> f64 {
        edge.weight
    }
}

/// The crowding-adjusted weight (see [`Edge::effective_weight`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectiveWeight;

impl EdgeCost for EffectiveWeight {
    fn cost(&self, edge: &Edge) -> f64 {
        edge.effective_weight()
    }
}

/// Named cost modes offered to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    /// Raw edge weight.
    #[default]
    Distance,
    /// Crowded edges cost 50% more.
    AvoidCrowds,
}

impl EdgeCost for CostMode {
    fn cost(&self, edge: &Edge) -> f64 {
        match self {
            CostMode::Distance => RawWeight.cost(edge),
            CostMode::AvoidCrowds => EffectiveWeight.cost(edge),
        }
    }
}

/// Linear combination `sum(cost_i(edge) * weight_i)` of several criteria.
pub struct WeightedSum<'a> {
    criteria: Vec<(&'a dyn EdgeCost, f64)>,
}

impl<'a> WeightedSum<'a> {
    /// Pair each cost function with its weight. The two lists must have the
    /// same length.
    pub fn new(costs: &[&'a dyn EdgeCost], weights: &[f64]) -> Result<Self> {
        if costs.len() != weights.len() {
            return Err(Error::InvalidArgument {
                message: format!(
                    "{} cost functions but {} weights; lists must have equal length",
                    costs.len(),
                    weights.len()
                ),
            });
        }
        Ok(Self {
            criteria: costs.iter().copied().zip(weights.iter().copied()).collect(),
        })
    }
}

impl EdgeCost for WeightedSum<'_> {
    fn cost(&self, edge: &Edge) -> f64 {
        self.criteria
            .iter()
            .map(|(criterion, weight)| criterion.cost(edge) * weight)
            .sum()
    }
}

/// Straight-line distance between the two vertices' spots. Admissible only
/// when edge costs are at least the coordinate distance.
pub fn euclidean_heuristic(current: &Vertex, target: &Vertex) -> f64 {
    current.spot().distance_to(target.spot())
}

/// Heuristic that turns A* into Dijkstra.
pub fn zero_heuristic(_current: &Vertex, _target: &Vertex) -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeType;

    fn crowded_edge() -> Edge {
        let mut edge = Edge::new(1, 2, 100.0, EdgeType::Walking);
        edge.crowded = true;
        edge
    }

    #[test]
    fn cost_modes_select_weight_flavour() {
        let edge = crowded_edge();
        assert_eq!(CostMode::Distance.cost(&edge), 100.0);
        assert_eq!(CostMode::AvoidCrowds.cost(&edge), 150.0);
    }

    #[test]
    fn closures_are_cost_functions() {
        let hops = |_: &Edge| 1.0;
        assert_eq!(hops.cost(&crowded_edge()), 1.0);
    }

    #[test]
    fn weighted_sum_combines_criteria() {
        let hops = |_: &Edge| 1.0;
        let sum = WeightedSum::new(&[&RawWeight, &EffectiveWeight, &hops], &[0.5, 1.0, 10.0])
            .expect("matching lengths");
        assert_eq!(sum.cost(&crowded_edge()), 50.0 + 150.0 + 10.0);
    }

    #[test]
    fn weighted_sum_rejects_mismatched_lists() {
        let result = WeightedSum::new(&[&RawWeight], &[1.0, 2.0]);
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }
}
