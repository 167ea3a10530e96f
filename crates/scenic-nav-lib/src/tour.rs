//! Minimum spanning trees and the MST-based tour approximation.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::cost::EdgeCost;
use crate::graph::{Edge, Graph};
use crate::path::FloatOrd;
use crate::sort::merge_sort;
use crate::spot::{Spot, SpotId};

/// Union-find over a fixed set of spot ids.
///
/// Ids are compacted to dense indices once at construction; `find` uses path
/// compression and `union` joins by rank.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    index: HashMap<SpotId, usize>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = SpotId>,
    {
        let mut index = HashMap::new();
        for id in ids {
            let next = index.len();
            index.entry(id).or_insert(next);
        }
        let len = index.len();
        Self {
            index,
            parent: (0..len).collect(),
            rank: vec![0; len],
            components: len,
        }
    }

    /// Representative index of the set containing `id`, or `None` for ids the
    /// structure was not built with.
    pub fn find(&mut self, id: SpotId) -> Option<usize> {
        let slot = *self.index.get(&id)?;
        Some(self.find_root(slot))
    }

    fn find_root(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = slot;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`. Returns `false` when they were
    /// already joined or either id is unknown.
    pub fn union(&mut self, a: SpotId, b: SpotId) -> bool {
        let (Some(root_a), Some(root_b)) = (self.find(a), self.find(b)) else {
            return false;
        };
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            Ordering::Less => self.parent[root_a] = root_b,
            Ordering::Greater => self.parent[root_b] = root_a,
            Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        self.components -= 1;
        true
    }

    pub fn connected(&mut self, a: SpotId, b: SpotId) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(root_a), Some(root_b)) => root_a == root_b,
            _ => false,
        }
    }

    /// Number of disjoint sets remaining.
    pub fn components(&self) -> usize {
        self.components
    }
}

/// Kruskal's algorithm over every directed edge of the graph.
///
/// Edges are considered by ascending cost (ties in listing order). For a
/// disconnected graph the result is a spanning forest with fewer than
/// `vertex_count - 1` edges.
pub fn kruskal<'g, C>(graph: &'g Graph, cost: &C) -> Vec<&'g Edge>
where
    C: EdgeCost + ?Sized,
{
    let target = graph.vertex_count().saturating_sub(1);
    let mut candidates: Vec<(f64, &Edge)> = graph.edges().map(|e| (cost.cost(e), e)).collect();
    merge_sort(&mut candidates, |a, b| a.0.total_cmp(&b.0));

    let mut sets = DisjointSet::new(graph.vertex_ids());
    let mut tree = Vec::with_capacity(target);
    for (_, edge) in candidates {
        if tree.len() == target {
            break;
        }
        if sets.union(edge.from(), edge.to()) {
            tree.push(edge);
        }
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = tree.len(),
        components = sets.components(),
        "kruskal finished"
    );
    tree
}

/// Prim's algorithm grown from `start`.
///
/// Frontier edges stay queued once pushed; an edge whose target has already
/// joined the tree is discarded when popped. Returns an empty tree when
/// `start` is absent. Only the component containing `start` is spanned.
pub fn prim<'g, C>(graph: &'g Graph, start: SpotId, cost: &C) -> Vec<&'g Edge>
where
    C: EdgeCost + ?Sized,
{
    if !graph.contains_vertex(start) {
        return Vec::new();
    }

    let mut included = HashSet::from([start]);
    let mut tree = Vec::new();
    let mut frontier = BinaryHeap::new();
    let mut sequence = 0u64;

    for edge in graph.neighbours(start) {
        frontier.push(FrontierEntry::new(edge, cost.cost(edge), sequence));
        sequence += 1;
    }

    while let Some(FrontierEntry { edge, .. }) = frontier.pop() {
        let next = edge.to();
        if !included.insert(next) {
            continue;
        }
        tree.push(edge);
        if included.len() == graph.vertex_count() {
            break;
        }

        for candidate in graph.neighbours(next) {
            if included.contains(&candidate.to()) {
                continue;
            }
            frontier.push(FrontierEntry::new(candidate, cost.cost(candidate), sequence));
            sequence += 1;
        }
    }

    debug!(start, edges = tree.len(), "prim finished");
    tree
}

/// MST-based 2-approximation of the shortest closed tour from `start`.
///
/// Visits spots in pre-order of the Prim tree rooted at `start` and returns to
/// `start` at the end, so a tour over `n > 1` spots has `n + 1` entries. The
/// factor-two bound only holds when `cost` satisfies the triangle inequality.
/// Unknown `start` gives an empty tour; an isolated `start` gives `[start]`.
pub fn approximate_tsp<'g, C>(graph: &'g Graph, start: SpotId, cost: &C) -> Vec<&'g Spot>
where
    C: EdgeCost + ?Sized,
{
    let Some(origin) = graph.spot(start) else {
        return Vec::new();
    };
    let mst = prim(graph, start, cost);

    let mut tour = preorder_walk(graph, &mst, start);
    if tour.is_empty() {
        tour.push(origin);
    }
    if tour.len() > 1 && tour.last().map(|spot| spot.id()) != Some(start) {
        tour.push(origin);
    }
    tour
}

/// Depth-first pre-order walk over an already built MST for display.
///
/// `start = None` anchors the walk at the first edge's source. Returns an empty
/// sequence for an empty edge set or a start that no edge touches.
pub fn construct_mst_path<'g>(
    graph: &'g Graph,
    mst_edges: &[&Edge],
    start: Option<SpotId>,
) -> Vec<&'g Spot> {
    let Some(first) = mst_edges.first() else {
        return Vec::new();
    };
    let start = start.unwrap_or_else(|| first.from());
    preorder_walk(graph, mst_edges, start)
}

/// Working-set tour: build the complete sub-graph over `ids` and run
/// [`approximate_tsp`] from the first known id.
///
/// The returned spots borrow from `graph`, not from the temporary sub-graph.
pub fn optimize_tour<'g, C>(graph: &'g Graph, ids: &[SpotId], cost: &C) -> Vec<&'g Spot>
where
    C: EdgeCost + ?Sized,
{
    let working = graph.tour_subgraph(ids);
    let Some(start) = working.vertex_ids().next() else {
        return Vec::new();
    };

    approximate_tsp(&working, start, cost)
        .into_iter()
        .filter_map(|spot| graph.spot(spot.id()))
        .collect()
}

/// Sum of `cost` over a set of tree edges.
pub fn tree_weight<C>(edges: &[&Edge], cost: &C) -> f64
where
    C: EdgeCost + ?Sized,
{
    edges.iter().map(|edge| cost.cost(edge)).sum()
}

fn preorder_walk<'g>(graph: &'g Graph, edges: &[&Edge], start: SpotId) -> Vec<&'g Spot> {
    let mut adjacency: HashMap<SpotId, Vec<SpotId>> = HashMap::new();
    for edge in edges {
        adjacency.entry(edge.from()).or_default().push(edge.to());
        adjacency.entry(edge.to()).or_default().push(edge.from());
    }
    if !adjacency.contains_key(&start) {
        return Vec::new();
    }

    let mut visited = HashSet::new();
    let mut walk = Vec::new();
    visit(graph, &adjacency, start, &mut visited, &mut walk);
    walk
}

// Recursive on purpose: only ever runs over a tree, and callers keep tours to
// small working sets.
fn visit<'g>(
    graph: &'g Graph,
    adjacency: &HashMap<SpotId, Vec<SpotId>>,
    current: SpotId,
    visited: &mut HashSet<SpotId>,
    walk: &mut Vec<&'g Spot>,
) {
    if !visited.insert(current) {
        return;
    }
    if let Some(spot) = graph.spot(current) {
        walk.push(spot);
    }
    if let Some(children) = adjacency.get(&current) {
        for &child in children {
            visit(graph, adjacency, child, visited, walk);
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct FrontierEntry<'g> {
    edge: &'g Edge,
    cost: FloatOrd,
    sequence: u64,
}

impl<'g> FrontierEntry<'g> {
    fn new(edge: &'g Edge, cost: f64, sequence: u64) -> Self {
        Self {
            edge,
            cost: FloatOrd(cost),
            sequence,
        }
    }
}

impl PartialEq for FrontierEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry<'_> {}

impl Ord for FrontierEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
