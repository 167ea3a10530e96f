//! `paths`: enumerate simple paths between two spots, cheapest first.

use anyhow::Result;
use tracing::debug;

use scenic_nav_cli::output::{print_json, render_path, OutputFormat, PathView};
use scenic_nav_lib::sort::merge_sort;
use scenic_nav_lib::{path_length, SpotId};

use super::CommandContext;

pub struct PathsArgs {
    pub from: SpotId,
    pub to: SpotId,
    pub limit: usize,
    pub avoid_crowds: bool,
}

pub fn handle_paths(context: &CommandContext, args: &PathsArgs) -> Result<()> {
    context.require_spot(args.from)?;
    context.require_spot(args.to)?;
    let graph = &context.dataset.graph;
    let mode = context.cost_mode(args.avoid_crowds);

    let mut ranked: Vec<_> = graph
        .all_simple_paths(args.from, args.to)
        .into_iter()
        .map(|path| (path_length(graph, &path, &mode), path))
        .collect();
    debug!(count = ranked.len(), "enumerated simple paths");
    merge_sort(&mut ranked, |a, b| a.0.total_cmp(&b.0));

    let total = ranked.len();
    let views: Vec<PathView> = ranked
        .iter()
        .take(args.limit)
        .enumerate()
        .map(|(rank, (cost, path))| {
            PathView::new(
                format!("Path {}", rank + 1),
                path,
                *cost,
                context.language(),
            )
        })
        .collect();

    match context.format {
        OutputFormat::Json => print_json(&views)?,
        OutputFormat::Text => {
            for view in &views {
                print!("{}", render_path(view));
            }
            println!("{} of {} path(s) shown", views.len(), total);
        }
    }
    Ok(())
}
