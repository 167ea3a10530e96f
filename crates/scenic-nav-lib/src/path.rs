use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::cost::{euclidean_heuristic, CostMode, EdgeCost, WeightedSum};
use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::spot::{Spot, SpotId};

/// Shortest-path algorithms exposed to route planning front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathAlgorithm {
    #[default]
    Dijkstra,
    /// A* guided by straight-line distance between spots.
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PathAlgorithm::Dijkstra => "dijkstra",
            PathAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

/// Result of a single-source Dijkstra run.
///
/// Holds an entry for every vertex reached from the source. The source maps to
/// `None` (no predecessor); unreachable vertices are absent. A run from an
/// unknown source produces an empty tree.
#[derive(Debug, Clone, Default)]
pub struct ShortestPathTree {
    source: Option<SpotId>,
    predecessors: HashMap<SpotId, Option<SpotId>>,
    distances: HashMap<SpotId, f64>,
}

impl ShortestPathTree {
    pub fn source(&self) -> Option<SpotId> {
        self.source
    }

    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// Number of reached vertices, the source included.
    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    pub fn contains(&self, id: SpotId) -> bool {
        self.predecessors.contains_key(&id)
    }

    /// `Some(None)` for the source, `Some(Some(p))` for other reached
    /// vertices and `None` for vertices that were not reached.
    pub fn predecessor(&self, id: SpotId) -> Option<Option<SpotId>> {
        self.predecessors.get(&id).copied()
    }

    /// Total cost from the source, if `id` was reached.
    pub fn distance(&self, id: SpotId) -> Option<f64> {
        self.distances.get(&id).copied()
    }

    pub fn predecessors(&self) -> &HashMap<SpotId, Option<SpotId>> {
        &self.predecessors
    }
}

/// Run Dijkstra's algorithm from `source` over the whole graph.
///
/// Each vertex is settled at most once. Equal tentative costs are popped in
/// the order they were queued, so results are stable within a run.
pub fn dijkstra<C>(graph: &Graph, source: SpotId, cost: &C) -> ShortestPathTree
where
    C: EdgeCost + ?Sized,
{
    if !graph.contains_vertex(source) {
        return ShortestPathTree::default();
    }

    let mut distances: HashMap<SpotId, f64> = HashMap::new();
    let mut predecessors: HashMap<SpotId, Option<SpotId>> = HashMap::new();
    let mut settled: HashSet<SpotId> = HashSet::new();
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;

    distances.insert(source, 0.0);
    predecessors.insert(source, None);
    queue.push(QueueEntry::new(source, 0.0, sequence));

    while let Some(entry) = queue.pop() {
        if !settled.insert(entry.node) {
            continue;
        }
        let current_distance = entry.cost.0;

        for edge in graph.neighbours(entry.node) {
            let next = edge.to();
            if settled.contains(&next) {
                continue;
            }

            let next_cost = current_distance + cost.cost(edge);
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                predecessors.insert(next, Some(entry.node));
                sequence += 1;
                queue.push(QueueEntry::new(next, next_cost, sequence));
            }
        }
    }

    debug!(source, settled = settled.len(), "dijkstra finished");
    ShortestPathTree {
        source: Some(source),
        predecessors,
        distances,
    }
}

/// Walk the predecessor chain back from `target` and return the spots from
/// source to target.
///
/// Returns an empty path when the target was not reached (or no longer exists
/// in `graph`), and the single source spot when `target` is the source.
pub fn construct_path<'g>(
    graph: &'g Graph,
    tree: &ShortestPathTree,
    target: SpotId,
) -> Vec<&'g Spot> {
    if !tree.contains(target) {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = Some(target);
    while let Some(node) = current {
        let Some(spot) = graph.spot(node) else {
            return Vec::new();
        };
        path.push(spot);
        if path.len() > tree.len() {
            // A predecessor chain longer than the tree itself means the tree
            // does not belong to this graph.
            return Vec::new();
        }
        current = tree.predecessor(node).flatten();
    }
    path.reverse();
    path
}

/// Run A* search from `source` to `target`, ordering the frontier by
/// `g + heuristic(current, target)`.
///
/// Admissibility of `heuristic` is the caller's responsibility; with an
/// inadmissible heuristic the returned path may be suboptimal. Returns an
/// empty path when either endpoint is unknown or the target is unreachable.
pub fn a_star<'g, C, H>(
    graph: &'g Graph,
    source: SpotId,
    target: SpotId,
    cost: &C,
    heuristic: H,
) -> Vec<&'g Spot>
where
    C: EdgeCost + ?Sized,
    H: Fn(&Vertex, &Vertex) -> f64,
{
    let (Some(start), Some(goal)) = (graph.vertex(source), graph.vertex(target)) else {
        return Vec::new();
    };
    if source == target {
        return vec![start.spot()];
    }

    let mut g_score: HashMap<SpotId, f64> = HashMap::new();
    let mut parents: HashMap<SpotId, Option<SpotId>> = HashMap::new();
    let mut closed: HashSet<SpotId> = HashSet::new();
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;

    g_score.insert(source, 0.0);
    parents.insert(source, None);
    queue.push(AStarEntry::new(source, 0.0, heuristic(start, goal), sequence));

    while let Some(entry) = queue.pop() {
        if entry.node == target {
            let tree = ShortestPathTree {
                source: Some(source),
                predecessors: parents,
                distances: g_score,
            };
            return construct_path(graph, &tree, target);
        }
        if !closed.insert(entry.node) {
            continue;
        }
        let current_score = entry.cost.0;

        for edge in graph.neighbours(entry.node) {
            let next = edge.to();
            if closed.contains(&next) {
                continue;
            }
            let Some(next_vertex) = graph.vertex(next) else {
                continue;
            };

            let tentative_g = current_score + cost.cost(edge);
            if tentative_g < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, Some(entry.node));
                sequence += 1;
                queue.push(AStarEntry::new(
                    next,
                    tentative_g,
                    heuristic(next_vertex, goal),
                    sequence,
                ));
            }
        }
    }

    debug!(source, target, expanded = closed.len(), "a* found no path");
    Vec::new()
}

/// Shortest path under a weighted combination of several cost functions.
///
/// Fails with `InvalidArgument` when `costs` and `weights` differ in length.
pub fn multi_criteria_shortest_path<'g>(
    graph: &'g Graph,
    source: SpotId,
    target: SpotId,
    costs: &[&dyn EdgeCost],
    weights: &[f64],
) -> Result<Vec<&'g Spot>> {
    let combined = WeightedSum::new(costs, weights)?;
    let tree = dijkstra(graph, source, &combined);
    Ok(construct_path(graph, &tree, target))
}

/// Sum `cost` over consecutive stops of `path`.
///
/// Each pair contributes its first connecting edge. A pair with no direct
/// edge contributes nothing rather than failing, so partial or hand-edited
/// routes still get a length.
pub fn path_length<C>(graph: &Graph, path: &[&Spot], cost: &C) -> f64
where
    C: EdgeCost + ?Sized,
{
    path.windows(2)
        .filter_map(|pair| graph.edge_between(pair[0].id(), pair[1].id()))
        .map(|edge| cost.cost(edge))
        .sum()
}

/// Convenience entry point: find a path with the chosen algorithm and cost
/// mode. A* uses [`euclidean_heuristic`].
pub fn find_path(
    graph: &Graph,
    source: SpotId,
    target: SpotId,
    algorithm: PathAlgorithm,
    mode: CostMode,
) -> Vec<&Spot> {
    match algorithm {
        PathAlgorithm::Dijkstra => {
            let tree = dijkstra(graph, source, &mode);
            construct_path(graph, &tree, target)
        }
        PathAlgorithm::AStar => a_star(graph, source, target, &mode, euclidean_heuristic),
    }
}

/// Total ordering wrapper so costs can live in a `BinaryHeap`.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: SpotId,
    cost: FloatOrd,
    sequence: u64,
}

impl QueueEntry {
    fn new(node: SpotId, cost: f64, sequence: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            sequence,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then by
        // arrival order.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: SpotId,
    cost: FloatOrd,
    estimate: FloatOrd,
    sequence: u64,
}

impl AStarEntry {
    fn new(node: SpotId, cost: f64, heuristic: f64, sequence: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
            sequence,
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_pops_lowest_cost_then_earliest() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry::new(1, 5.0, 0));
        heap.push(QueueEntry::new(2, 1.0, 1));
        heap.push(QueueEntry::new(3, 1.0, 2));

        assert_eq!(heap.pop().map(|e| e.node), Some(2));
        assert_eq!(heap.pop().map(|e| e.node), Some(3));
        assert_eq!(heap.pop().map(|e| e.node), Some(1));
    }

    #[test]
    fn empty_tree_reports_nothing() {
        let tree = ShortestPathTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.source(), None);
        assert_eq!(tree.predecessor(1), None);
    }
}
