//! `mst`: minimum spanning tree of the map and a walk over it.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use scenic_nav_cli::output::{print_json, OutputFormat, SpotView};
use scenic_nav_lib::tour::tree_weight;
use scenic_nav_lib::{construct_mst_path, kruskal, prim, EdgeCost, EdgeType, SpotId};

use super::{mode_label, CommandContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MstAlgorithm {
    Kruskal,
    Prim,
}

pub struct MstArgs {
    pub algorithm: MstAlgorithm,
    pub start: Option<SpotId>,
    pub avoid_crowds: bool,
}

#[derive(Serialize)]
struct TreeEdge {
    from: SpotId,
    to: SpotId,
    kind: EdgeType,
    crowded: bool,
    cost: f64,
}

#[derive(Serialize)]
struct MstOutput {
    algorithm: MstAlgorithm,
    mode: &'static str,
    total_cost: f64,
    edges: Vec<TreeEdge>,
    walk: Vec<SpotView>,
}

pub fn handle_mst(context: &CommandContext, args: &MstArgs) -> Result<()> {
    if let Some(start) = args.start {
        context.require_spot(start)?;
    }
    let graph = &context.dataset.graph;
    let mode = context.cost_mode(args.avoid_crowds);

    let edges = match args.algorithm {
        MstAlgorithm::Kruskal => kruskal(graph, &mode),
        MstAlgorithm::Prim => match args.start.or_else(|| graph.vertex_ids().next()) {
            Some(start) => prim(graph, start, &mode),
            None => Vec::new(),
        },
    };
    let walk = construct_mst_path(graph, &edges, args.start);

    let output = MstOutput {
        algorithm: args.algorithm,
        mode: mode_label(mode),
        total_cost: tree_weight(&edges, &mode),
        edges: edges
            .iter()
            .map(|edge| TreeEdge {
                from: edge.from(),
                to: edge.to(),
                kind: edge.kind,
                crowded: edge.crowded,
                cost: mode.cost(edge),
            })
            .collect(),
        walk: walk
            .iter()
            .map(|spot| SpotView::new(spot, context.language()))
            .collect(),
    };

    match context.format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Text => print!("{}", render_mst(&output)),
    }
    Ok(())
}

fn render_mst(output: &MstOutput) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Spanning tree ({:?}, {}):",
        output.algorithm, output.mode
    );
    for edge in &output.edges {
        let _ = writeln!(
            out,
            "  {:>4} - {:<4} {:>8.1}{}",
            edge.from,
            edge.to,
            edge.cost,
            if edge.crowded { "  crowded" } else { "" }
        );
    }
    let _ = writeln!(
        out,
        "edges: {}  total: {:.1}",
        output.edges.len(),
        output.total_cost
    );
    if !output.walk.is_empty() {
        let names: Vec<&str> = output.walk.iter().map(|spot| spot.name.as_str()).collect();
        let _ = writeln!(out, "walk: {}", names.join(" -> "));
    }
    out
}
