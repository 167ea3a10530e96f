use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::spot::{Language, Spot, SpotId};

/// Multiplier applied to an edge's weight while it is flagged as crowded.
pub const CROWDED_FACTOR: f64 = 1.5;

/// Classification for the path an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeType {
    Walking,
    Wheelchair,
    Shuttle,
    Stairs,
}

impl EdgeType {
    pub fn description(self, language: Language) -> &'static str {
        match (self, language) {
            (EdgeType::Walking, Language::Zh) => "步行",
            (EdgeType::Wheelchair, Language::Zh) => "轮椅通道",
            (EdgeType::Shuttle, Language::Zh) => "景区摆渡车",
            (EdgeType::Stairs, Language::Zh) => "台阶",
            (EdgeType::Walking, Language::En) => "Walking path",
            (EdgeType::Wheelchair, Language::En) => "Wheelchair path",
            (EdgeType::Shuttle, Language::En) => "Shuttle",
            (EdgeType::Stairs, Language::En) => "Stairs",
        }
    }

    /// Tag used by the persisted edge records.
    pub fn as_tag(self) -> &'static str {
        match self {
            EdgeType::Walking => "WALKING",
            EdgeType::Wheelchair => "WHEELCHAIR",
            EdgeType::Shuttle => "SHUTTLE",
            EdgeType::Stairs => "STAIRS",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for EdgeType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "WALKING" => Ok(EdgeType::Walking),
            "WHEELCHAIR" => Ok(EdgeType::Wheelchair),
            "SHUTTLE" => Ok(EdgeType::Shuttle),
            "STAIRS" => Ok(EdgeType::Stairs),
            _ => Err(Error::UnknownEdgeType {
                value: value.to_string(),
            }),
        }
    }
}

/// Directed, weighted connection between two vertices.
///
/// Endpoints are stored as spot ids into the owning [`Graph`]. Equality and
/// hashing only consider the ordered endpoint pair.
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    from: SpotId,
    to: SpotId,
    pub weight: f64,
    pub kind: EdgeType,
    pub crowded: bool,
}

impl Edge {
    pub fn new(from: SpotId, to: SpotId, weight: f64, kind: EdgeType) -> Self {
        Self {
            from,
            to,
            weight,
            kind,
            crowded: false,
        }
    }

    pub fn from(&self) -> SpotId {
        self.from
    }

    pub fn to(&self) -> SpotId {
        self.to
    }

    /// Weight adjusted by [`CROWDED_FACTOR`] while the edge is crowded.
    pub fn effective_weight(&self) -> f64 {
        if self.crowded {
            self.weight * CROWDED_FACTOR
        } else {
            self.weight
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

/// Graph node wrapping one spot and its outgoing edges in insertion order.
#[derive(Debug, Clone)]
pub struct Vertex {
    spot: Spot,
    adjacent: Vec<Edge>,
}

impl Vertex {
    fn new(spot: Spot) -> Self {
        Self {
            spot,
            adjacent: Vec::new(),
        }
    }

    pub fn id(&self) -> SpotId {
        self.spot.id()
    }

    pub fn spot(&self) -> &Spot {
        &self.spot
    }

    /// Mutable access to the descriptive fields; the id stays fixed.
    pub fn spot_mut(&mut self) -> &mut Spot {
        &mut self.spot
    }

    pub fn edges(&self) -> &[Edge] {
        &self.adjacent
    }

    /// First outgoing edge towards `to`.
    pub fn edge_to(&self, to: SpotId) -> Option<&Edge> {
        self.adjacent.iter().find(|edge| edge.to == to)
    }

    pub fn degree(&self) -> usize {
        self.adjacent.len()
    }
}

/// Adjacency-list graph over spots.
///
/// Vertices live in an id-keyed arena that preserves insertion order; every
/// edge is owned by its source vertex. In undirected mode each added edge gets
/// an independent mirror whose crowded flag is tracked separately.
#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    vertices: IndexMap<SpotId, Vertex>,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            vertices: IndexMap::new(),
        }
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Add a vertex for `spot`. Returns `false` when the id is already present.
    pub fn add_vertex(&mut self, spot: Spot) -> bool {
        if self.vertices.contains_key(&spot.id()) {
            return false;
        }
        self.vertices.insert(spot.id(), Vertex::new(spot));
        true
    }

    /// Connect `from` to `to`. Returns `false` when either endpoint is absent.
    ///
    /// Callers must not add a second edge for an ordered pair that is already
    /// connected; the graph does not deduplicate.
    pub fn add_edge(&mut self, from: SpotId, to: SpotId, weight: f64, kind: EdgeType) -> bool {
        if !self.vertices.contains_key(&from) || !self.vertices.contains_key(&to) {
            return false;
        }

        self.push_edge(Edge::new(from, to, weight, kind));
        if !self.directed && from != to {
            self.push_edge(Edge::new(to, from, weight, kind));
        }
        true
    }

    fn push_edge(&mut self, edge: Edge) {
        if let Some(vertex) = self.vertices.get_mut(&edge.from) {
            vertex.adjacent.push(edge);
        }
    }

    /// Remove a vertex together with every edge leading to or from it.
    pub fn remove_vertex(&mut self, id: SpotId) -> Option<Spot> {
        let vertex = self.vertices.shift_remove(&id)?;
        let mut purged = vertex.adjacent.len();
        for other in self.vertices.values_mut() {
            let before = other.adjacent.len();
            other.adjacent.retain(|edge| edge.to != id && edge.from != id);
            purged += before - other.adjacent.len();
        }
        debug!(spot = id, edges = purged, "removed vertex");
        Some(vertex.spot)
    }

    /// Remove the directed edge(s) `from -> to`, plus the mirror in undirected
    /// mode. Returns whether a `from -> to` edge existed.
    pub fn remove_edge(&mut self, from: SpotId, to: SpotId) -> bool {
        if !self.vertices.contains_key(&from) || !self.vertices.contains_key(&to) {
            return false;
        }

        let removed = self.remove_directed(from, to);
        if !self.directed {
            self.remove_directed(to, from);
        }
        removed
    }

    fn remove_directed(&mut self, from: SpotId, to: SpotId) -> bool {
        let Some(vertex) = self.vertices.get_mut(&from) else {
            return false;
        };
        let before = vertex.adjacent.len();
        vertex.adjacent.retain(|edge| edge.to != to);
        vertex.adjacent.len() != before
    }

    pub fn contains_vertex(&self, id: SpotId) -> bool {
        self.vertices.contains_key(&id)
    }

    pub fn vertex(&self, id: SpotId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn vertex_mut(&mut self, id: SpotId) -> Option<&mut Vertex> {
        self.vertices.get_mut(&id)
    }

    pub fn spot(&self, id: SpotId) -> Option<&Spot> {
        self.vertices.get(&id).map(Vertex::spot)
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = SpotId> + '_ {
        self.vertices.keys().copied()
    }

    /// Every directed edge: vertices in insertion order, each vertex's edges
    /// in adjacency order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.vertices.values().flat_map(|vertex| vertex.adjacent.iter())
    }

    /// Return the outgoing edges for a given spot identifier.
    pub fn neighbours(&self, id: SpotId) -> &[Edge] {
        self.vertices
            .get(&id)
            .map(|vertex| vertex.adjacent.as_slice())
            .unwrap_or(&[])
    }

    /// First edge matching the ordered endpoint pair.
    pub fn edge_between(&self, from: SpotId, to: SpotId) -> Option<&Edge> {
        self.vertices.get(&from)?.edge_to(to)
    }

    pub fn edge_between_mut(&mut self, from: SpotId, to: SpotId) -> Option<&mut Edge> {
        self.vertices
            .get_mut(&from)?
            .adjacent
            .iter_mut()
            .find(|edge| edge.to == to)
    }

    /// Flag a single directed edge as crowded (or clear it). The mirror edge of
    /// an undirected connection is left untouched.
    pub fn set_crowded(&mut self, from: SpotId, to: SpotId, crowded: bool) -> bool {
        match self.edge_between_mut(from, to) {
            Some(edge) => {
                edge.crowded = crowded;
                true
            }
            None => false,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices
            .values()
            .map(|vertex| vertex.adjacent.len())
            .sum()
    }

    /// Depth-first traversal from `start`, children visited in adjacency
    /// order. An unknown start yields an empty sequence.
    pub fn dfs(&self, start: SpotId) -> Vec<&Spot> {
        let Some(origin) = self.vertices.get(&start) else {
            return Vec::new();
        };

        let mut visited = HashSet::from([start]);
        let mut order = vec![origin.spot()];
        // (vertex, index of the next adjacency entry to explore)
        let mut stack: Vec<(SpotId, usize)> = vec![(start, 0)];

        while let Some((current, cursor)) = stack.last_mut() {
            let Some(edge) = self.neighbours(*current).get(*cursor) else {
                stack.pop();
                continue;
            };
            *cursor += 1;

            let next = edge.to;
            if visited.insert(next) {
                if let Some(vertex) = self.vertices.get(&next) {
                    order.push(vertex.spot());
                }
                stack.push((next, 0));
            }
        }

        order
    }

    /// Breadth-first traversal from `start`. An unknown start yields an empty
    /// sequence.
    pub fn bfs(&self, start: SpotId) -> Vec<&Spot> {
        if !self.vertices.contains_key(&start) {
            return Vec::new();
        }

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut order = Vec::new();

        while let Some(current) = queue.pop_front() {
            if let Some(vertex) = self.vertices.get(&current) {
                order.push(vertex.spot());
            }
            for edge in self.neighbours(current) {
                if visited.insert(edge.to) {
                    queue.push_back(edge.to);
                }
            }
        }

        order
    }

    /// Enumerate every path from `from` to `to` without repeated vertices.
    ///
    /// Exponential in the worst case; meant for small working sets such as a
    /// tour sub-graph, not the whole map.
    pub fn all_simple_paths(&self, from: SpotId, to: SpotId) -> Vec<Vec<&Spot>> {
        let Some(start) = self.vertices.get(&from) else {
            return Vec::new();
        };
        if !self.vertices.contains_key(&to) {
            return Vec::new();
        }

        let mut paths = Vec::new();
        let mut visited = HashSet::from([from]);
        let mut current = vec![start.spot()];
        self.collect_simple_paths(from, to, &mut visited, &mut current, &mut paths);
        paths
    }

    fn collect_simple_paths<'g>(
        &'g self,
        current: SpotId,
        goal: SpotId,
        visited: &mut HashSet<SpotId>,
        path: &mut Vec<&'g Spot>,
        paths: &mut Vec<Vec<&'g Spot>>,
    ) {
        if current == goal {
            paths.push(path.clone());
            return;
        }

        for edge in self.neighbours(current) {
            let next = edge.to;
            let Some(vertex) = self.vertices.get(&next) else {
                continue;
            };
            if !visited.insert(next) {
                continue;
            }
            path.push(vertex.spot());
            self.collect_simple_paths(next, goal, visited, path, paths);
            path.pop();
            visited.remove(&next);
        }
    }

    /// Build the undirected complete working graph a tour is optimised over.
    ///
    /// Every pair of requested spots is connected: by the existing edge's
    /// weight, type and per-direction crowded flags when this graph links
    /// them directly, otherwise by a walking edge weighted with the Euclidean
    /// distance. Unknown and repeated ids are skipped.
    pub fn tour_subgraph(&self, ids: &[SpotId]) -> Graph {
        let mut subgraph = Graph::undirected();
        let mut members = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(spot) = self.spot(id) {
                if subgraph.add_vertex(spot.clone()) {
                    members.push(spot);
                }
            }
        }

        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                let forward = self.edge_between(a.id(), b.id());
                let backward = self.edge_between(b.id(), a.id());
                let (weight, kind) = match forward.or(backward) {
                    Some(edge) => (edge.weight, edge.kind),
                    None => (a.distance_to(b), EdgeType::Walking),
                };
                subgraph.add_edge(a.id(), b.id(), weight, kind);
                if let Some(edge) = forward {
                    subgraph.set_crowded(a.id(), b.id(), edge.crowded);
                }
                if let Some(edge) = backward {
                    subgraph.set_crowded(b.id(), a.id(), edge.crowded);
                }
            }
        }

        debug!(
            vertices = subgraph.vertex_count(),
            edges = subgraph.edge_count(),
            "built tour working graph"
        );
        subgraph
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::undirected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_graph(directed: bool) -> Graph {
        let mut graph = Graph::new(directed);
        for id in 1..=3 {
            graph.add_vertex(Spot::new(id, format!("点{id}"), format!("P{id}")));
        }
        graph.add_edge(1, 2, 1.0, EdgeType::Walking);
        graph.add_edge(2, 3, 2.0, EdgeType::Stairs);
        graph
    }

    #[test]
    fn edge_equality_uses_endpoints_only() {
        let a = Edge::new(1, 2, 10.0, EdgeType::Walking);
        let b = Edge::new(1, 2, 99.0, EdgeType::Shuttle);
        let c = Edge::new(2, 1, 10.0, EdgeType::Walking);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn effective_weight_applies_crowding_factor() {
        let mut edge = Edge::new(1, 2, 200.0, EdgeType::Walking);
        assert_eq!(edge.effective_weight(), 200.0);
        edge.crowded = true;
        assert_eq!(edge.effective_weight(), 300.0);
    }

    #[test]
    fn directed_graph_has_no_mirror() {
        let graph = line_graph(true);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edge_between(2, 1).is_none());
    }

    #[test]
    fn undirected_self_loop_is_not_mirrored() {
        let mut graph = line_graph(false);
        let before = graph.edge_count();
        assert!(graph.add_edge(1, 1, 0.5, EdgeType::Walking));
        assert_eq!(graph.edge_count(), before + 1);
    }

    #[test]
    fn edge_type_tags_round_trip() {
        for kind in [
            EdgeType::Walking,
            EdgeType::Wheelchair,
            EdgeType::Shuttle,
            EdgeType::Stairs,
        ] {
            assert_eq!(kind.as_tag().parse::<EdgeType>().unwrap(), kind);
        }
        assert!("ESCALATOR".parse::<EdgeType>().is_err());
    }
}
