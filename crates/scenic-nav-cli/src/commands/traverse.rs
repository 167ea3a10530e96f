//! `traverse`: depth- or breadth-first visiting order.

use anyhow::Result;
use clap::ValueEnum;

use scenic_nav_cli::output::{print_json, render_spots, OutputFormat, SpotView};
use scenic_nav_lib::SpotId;

use super::CommandContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TraversalOrder {
    Dfs,
    Bfs,
}

pub struct TraverseArgs {
    pub start: SpotId,
    pub order: TraversalOrder,
}

pub fn handle_traverse(context: &CommandContext, args: &TraverseArgs) -> Result<()> {
    context.require_spot(args.start)?;
    let graph = &context.dataset.graph;
    let visited = match args.order {
        TraversalOrder::Dfs => graph.dfs(args.start),
        TraversalOrder::Bfs => graph.bfs(args.start),
    };
    let views: Vec<SpotView> = visited
        .iter()
        .map(|spot| SpotView::new(spot, context.language()))
        .collect();

    match context.format {
        OutputFormat::Json => print_json(&views)?,
        OutputFormat::Text => print!("{}", render_spots(&views)),
    }
    Ok(())
}
