//! `search`: catalog lookup by name, category and accessibility.

use anyhow::Result;
use clap::ValueEnum;

use scenic_nav_cli::output::{print_json, render_spots, OutputFormat, SpotView};
use scenic_nav_lib::{Category, Language, SpotOrder, SpotQuery};

use super::CommandContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Name,
    Popularity,
    VisitTime,
}

impl SortKey {
    fn order(self, language: Language) -> SpotOrder {
        match self {
            SortKey::Name => SpotOrder::Name(language),
            SortKey::Popularity => SpotOrder::Popularity,
            SortKey::VisitTime => SpotOrder::VisitTime,
        }
    }
}

pub struct SearchArgs {
    pub text: String,
    pub category: Option<Category>,
    pub accessible_only: bool,
    pub fuzzy: bool,
    pub sort: Option<SortKey>,
}

pub fn handle_search(context: &CommandContext, args: &SearchArgs) -> Result<()> {
    let query = SpotQuery {
        text: args.text.clone(),
        category: args.category,
        accessible_only: args.accessible_only,
        fuzzy: args.fuzzy,
        language: context.language(),
    };
    let mut found = query.apply(&context.dataset.spots);
    if let Some(key) = args.sort {
        key.order(context.language()).sort(&mut found);
    }

    let views: Vec<SpotView> = found
        .iter()
        .map(|spot| SpotView::new(spot, context.language()))
        .collect();
    match context.format {
        OutputFormat::Json => print_json(&views)?,
        OutputFormat::Text => print!("{}", render_spots(&views)),
    }
    Ok(())
}
