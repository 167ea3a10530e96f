//! `route`: shortest path between two spots.

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use scenic_nav_cli::output::{print_json, render_path, OutputFormat, PathView};
use scenic_nav_lib::{find_path, path_length, CostMode, PathAlgorithm, SpotId};

use super::{mode_label, CommandContext};

pub struct RouteArgs {
    pub from: SpotId,
    pub to: SpotId,
    pub algorithm: PathAlgorithm,
    pub avoid_crowds: bool,
}

#[derive(Serialize)]
struct RouteOutput {
    from: SpotId,
    to: SpotId,
    algorithm: PathAlgorithm,
    mode: CostMode,
    found: bool,
    path: Option<PathView>,
}

/// Returns `false` when the target cannot be reached from the source.
pub fn handle_route(context: &CommandContext, args: &RouteArgs) -> Result<bool> {
    let source = context.require_spot(args.from)?;
    let target = context.require_spot(args.to)?;
    let graph = &context.dataset.graph;
    let mode = context.cost_mode(args.avoid_crowds);

    let path = find_path(graph, args.from, args.to, args.algorithm, mode);
    let view = if path.is_empty() {
        None
    } else {
        let cost = path_length(graph, &path, &mode);
        info!(
            from = args.from,
            to = args.to,
            algorithm = %args.algorithm,
            hops = path.len().saturating_sub(1),
            cost,
            "route found"
        );
        let title = format!(
            "{} -> {} ({}, {})",
            source.name(context.language()),
            target.name(context.language()),
            args.algorithm,
            mode_label(mode)
        );
        Some(PathView::new(title, &path, cost, context.language()))
    };

    let found = view.is_some();
    match context.format {
        OutputFormat::Json => print_json(&RouteOutput {
            from: args.from,
            to: args.to,
            algorithm: args.algorithm,
            mode,
            found,
            path: view,
        })?,
        OutputFormat::Text => match &view {
            Some(view) => print!("{}", render_path(view)),
            None => println!(
                "No route from {} to {}",
                source.name(context.language()),
                target.name(context.language())
            ),
        },
    }
    Ok(found)
}
