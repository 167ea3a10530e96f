//! `tour`: closed approximate tour through a chosen set of spots.

use anyhow::{bail, Result};

use scenic_nav_cli::output::{print_json, render_path, OutputFormat, PathView};
use scenic_nav_lib::{optimize_tour, path_length, SpotId};

use super::{mode_label, CommandContext};

pub struct TourArgs {
    pub stops: Vec<SpotId>,
    pub avoid_crowds: bool,
}

pub fn handle_tour(context: &CommandContext, args: &TourArgs) -> Result<()> {
    if args.stops.is_empty() {
        bail!("at least one stop is required");
    }
    for &id in &args.stops {
        context.require_spot(id)?;
    }

    let graph = &context.dataset.graph;
    let mode = context.cost_mode(args.avoid_crowds);
    let tour = optimize_tour(graph, &args.stops, &mode);

    // Legs between stops may be synthesised, so cost them on the working graph.
    let working = graph.tour_subgraph(&args.stops);
    let cost = path_length(&working, &tour, &mode);
    let title = format!("Tour of {} stop(s) ({})", args.stops.len(), mode_label(mode));
    let view = PathView::new(title, &tour, cost, context.language());

    match context.format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Text => print!("{}", render_path(&view)),
    }
    Ok(())
}
