//! Persisted record shapes and the codecs that move them in and out of the
//! engine.
//!
//! Spots are stored as a JSON array of camelCase records, edges as CSV with
//! the header `FromId,ToId,Weight,Type,IsCrowded`. Every codec works on
//! readers and writers; opening files is the caller's business.

use std::collections::HashSet;
use std::io::{Read, Write};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::collection::SpotList;
use crate::error::{Error, Result};
use crate::graph::{Edge, EdgeType, Graph};
use crate::spot::{Category, Language, Spot, SpotId};

/// Bundled Temple of Heaven spot records.
pub const SAMPLE_SPOTS_JSON: &str = include_str!("../data/spots.json");
/// Bundled edge records for [`SAMPLE_SPOTS_JSON`], both directions listed.
pub const SAMPLE_EDGES_CSV: &str = include_str!("../data/graph.csv");

/// Persisted form of a [`Spot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotRecord {
    pub id: SpotId,
    pub name_zh: String,
    pub name_en: String,
    #[serde(default)]
    pub description_zh: String,
    #[serde(default)]
    pub description_en: String,
    pub x: f64,
    pub y: f64,
    /// Chinese category label, or the English name.
    pub category: String,
    /// Suggested visit duration in minutes.
    #[serde(default)]
    pub visit_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub popularity: u8,
    #[serde(default = "default_accessible")]
    pub accessible: bool,
    #[serde(default)]
    pub entrance_fee: f64,
}

fn default_accessible() -> bool {
    true
}

impl From<&Spot> for SpotRecord {
    fn from(spot: &Spot) -> Self {
        Self {
            id: spot.id(),
            name_zh: spot.name_zh.clone(),
            name_en: spot.name_en.clone(),
            description_zh: spot.description_zh.clone(),
            description_en: spot.description_en.clone(),
            x: spot.position.x,
            y: spot.position.y,
            category: spot.category.label(Language::Zh).to_string(),
            visit_time: spot.visit_minutes,
            image_url: spot.image_path.clone(),
            popularity: spot.popularity(),
            accessible: spot.accessible,
            entrance_fee: spot.entrance_fee,
        }
    }
}

impl TryFrom<SpotRecord> for Spot {
    type Error = Error;

    fn try_from(record: SpotRecord) -> Result<Self> {
        let category: Category = record.category.parse()?;
        let mut spot = Spot::new(record.id, record.name_zh, record.name_en)
            .with_descriptions(record.description_zh, record.description_en)
            .with_position(record.x, record.y)
            .with_category(category)
            .with_visit_minutes(record.visit_time)
            .with_accessible(record.accessible)
            .with_entrance_fee(record.entrance_fee);
        spot.image_path = record.image_url;
        spot.set_popularity(record.popularity)
            .map_err(|err| Error::DatasetValidation {
                message: format!("spot {}: {err}", record.id),
            })?;
        Ok(spot)
    }
}

/// Persisted form of one directed [`Edge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(rename = "FromId")]
    pub from: SpotId,
    #[serde(rename = "ToId")]
    pub to: SpotId,
    #[serde(rename = "Weight")]
    pub weight: f64,
    #[serde(rename = "Type")]
    pub kind: EdgeType,
    #[serde(rename = "IsCrowded")]
    pub crowded: bool,
}

impl From<&Edge> for EdgeRecord {
    fn from(edge: &Edge) -> Self {
        Self {
            from: edge.from(),
            to: edge.to(),
            weight: edge.weight,
            kind: edge.kind,
            crowded: edge.crowded,
        }
    }
}

impl Graph {
    /// Every directed edge as a record, in listing order (vertex insertion
    /// order, then adjacency order). Undirected graphs list both directions.
    pub fn edge_records(&self) -> Vec<EdgeRecord> {
        self.edges().map(EdgeRecord::from).collect()
    }
}

/// Decode a JSON array of spot records. Duplicate ids are rejected.
pub fn read_spots<R: Read>(reader: R) -> Result<Vec<Spot>> {
    let records: Vec<SpotRecord> = serde_json::from_reader(reader)?;
    let mut seen = HashSet::with_capacity(records.len());
    let mut spots = Vec::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id) {
            return Err(Error::DatasetValidation {
                message: format!("duplicate spot id {}", record.id),
            });
        }
        spots.push(Spot::try_from(record)?);
    }
    Ok(spots)
}

/// Encode spots as a pretty-printed JSON array.
pub fn write_spots<'a, W, I>(writer: W, spots: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Spot>,
{
    let records: Vec<SpotRecord> = spots.into_iter().map(SpotRecord::from).collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Decode edge records from CSV. Negative or non-finite weights are rejected.
pub fn read_edges<R: Read>(reader: R) -> Result<Vec<EdgeRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut records = Vec::new();
    let mut row_num: usize = 1; // header is line 1
    for result in csv_reader.deserialize::<EdgeRecord>() {
        row_num += 1;
        let record = result.map_err(|err| Error::DatasetValidation {
            message: format!("edge row {row_num}: {err}"),
        })?;
        if !record.weight.is_finite() || record.weight < 0.0 {
            return Err(Error::DatasetValidation {
                message: format!(
                    "edge row {row_num}: weight must be a non-negative number, got {}",
                    record.weight
                ),
            });
        }
        records.push(record);
    }
    Ok(records)
}

/// Encode every directed edge of `graph` as CSV, header first.
pub fn write_edges<W: Write>(writer: W, graph: &Graph) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    for record in graph.edge_records() {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Outcome counters of [`seed_graph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Records that created a new connection.
    pub added: usize,
    /// Records naming an unknown endpoint.
    pub skipped: usize,
    /// Records for an ordered pair that already existed, typically the
    /// explicit mirror row of an undirected connection.
    pub merged: usize,
}

/// Build a graph from spot and edge records.
///
/// Every spot becomes a vertex, then each edge record is applied in order. A
/// record whose ordered pair already exists only updates that edge's crowded
/// flag, so files listing both directions of an undirected connection load
/// without multi-edges and keep per-direction congestion.
pub fn seed_graph<I>(directed: bool, spots: I, edges: &[EdgeRecord]) -> (Graph, SeedReport)
where
    I: IntoIterator<Item = Spot>,
{
    let mut graph = Graph::new(directed);
    for spot in spots {
        let id = spot.id();
        if !graph.add_vertex(spot) {
            warn!(spot = id, "duplicate spot ignored while seeding graph");
        }
    }

    let mut report = SeedReport::default();
    for record in edges {
        if let Some(existing) = graph.edge_between_mut(record.from, record.to) {
            existing.crowded = record.crowded;
            report.merged += 1;
            continue;
        }
        if !graph.add_edge(record.from, record.to, record.weight, record.kind) {
            warn!(
                from = record.from,
                to = record.to,
                "edge references unknown spot; skipping"
            );
            report.skipped += 1;
            continue;
        }
        graph.set_crowded(record.from, record.to, record.crowded);
        report.added += 1;
    }

    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        added = report.added,
        merged = report.merged,
        skipped = report.skipped,
        "seeded scenic graph"
    );
    (graph, report)
}

/// Spots and graph loaded together, sharing the same spot records.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub spots: SpotList,
    pub graph: Graph,
    pub report: SeedReport,
}

impl Dataset {
    /// Decode both record streams and seed the graph.
    pub fn from_readers<S, E>(spots: S, edges: E, directed: bool) -> Result<Self>
    where
        S: Read,
        E: Read,
    {
        let spots = read_spots(spots)?;
        let edges = read_edges(edges)?;
        let (graph, report) = seed_graph(directed, spots.iter().cloned(), &edges);
        Ok(Self {
            spots: spots.into(),
            graph,
            report,
        })
    }

    /// The bundled Temple of Heaven data set.
    pub fn sample(directed: bool) -> Result<Self> {
        Self::from_readers(
            SAMPLE_SPOTS_JSON.as_bytes(),
            SAMPLE_EDGES_CSV.as_bytes(),
            directed,
        )
    }
}
