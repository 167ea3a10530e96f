// CLI subcommand handlers.
//
// main.rs parses arguments and loads the dataset; each module here turns one
// subcommand into library calls and prints the result.

pub mod mst;
pub mod paths;
pub mod route;
pub mod search;
pub mod tour;
pub mod traverse;

use anyhow::{anyhow, Result};

use scenic_nav_cli::output::OutputFormat;
use scenic_nav_lib::{CostMode, Dataset, Language, Spot, SpotId, UserPreference};

/// Everything a handler needs once the data files are loaded.
pub struct CommandContext {
    pub dataset: Dataset,
    /// Visitor settings from the global flags.
    pub preference: UserPreference,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn language(&self) -> Language {
        self.preference.language
    }

    /// Cost mode for one command; `--avoid-crowds` on the command switches
    /// crowd avoidance on for that run.
    pub fn cost_mode(&self, avoid_crowds: bool) -> CostMode {
        let mut preference = self.preference.clone();
        preference.avoid_crowds |= avoid_crowds;
        preference.cost_mode()
    }

    /// Look up a spot in the graph, failing with the offending id.
    pub fn require_spot(&self, id: SpotId) -> Result<&Spot> {
        self.dataset
            .graph
            .spot(id)
            .ok_or_else(|| anyhow!("unknown spot id {id}"))
    }
}

pub fn mode_label(mode: CostMode) -> &'static str {
    match mode {
        CostMode::Distance => "distance",
        CostMode::AvoidCrowds => "avoid-crowds",
    }
}
