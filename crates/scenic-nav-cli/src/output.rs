//! Output formatting for command results.
//!
//! Every command builds a serializable view first; `text` renders it for
//! humans and `json` prints it as-is so scripts can consume it.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use scenic_nav_lib::{Language, Route, RouteType, Spot, SpotId};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One spot as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotView {
    pub id: SpotId,
    pub name: String,
    pub category: String,
    pub x: f64,
    pub y: f64,
    pub visit_minutes: u32,
    pub popularity: u8,
    pub accessible: bool,
}

impl SpotView {
    pub fn new(spot: &Spot, language: Language) -> Self {
        Self {
            id: spot.id(),
            name: spot.name(language).to_string(),
            category: spot.category.label(language).to_string(),
            x: spot.position.x,
            y: spot.position.y,
            visit_minutes: spot.visit_minutes,
            popularity: spot.popularity(),
            accessible: spot.accessible,
        }
    }
}

/// An ordered sequence of stops with its totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathView {
    pub title: String,
    pub stops: Vec<SpotView>,
    /// Sum of the selected cost function over the legs.
    pub cost: f64,
    /// Straight-line distance over the legs.
    pub distance: f64,
    pub estimated_minutes: u32,
    pub accessible: bool,
}

impl PathView {
    pub fn new(title: impl Into<String>, spots: &[&Spot], cost: f64, language: Language) -> Self {
        let route = Route::from_spots(0, "", "", RouteType::Classic, spots);
        Self {
            title: title.into(),
            stops: spots
                .iter()
                .map(|spot| SpotView::new(spot, language))
                .collect(),
            cost,
            distance: route.total_distance(),
            estimated_minutes: route.estimated_minutes(),
            accessible: route.is_accessible(),
        }
    }
}

/// Print any view as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    println!("{rendered}");
    Ok(())
}

pub fn render_path(view: &PathView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}:", view.title);
    for (index, stop) in view.stops.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {} ({})", index + 1, stop.name, stop.id);
    }
    let _ = writeln!(
        out,
        "stops: {}  cost: {:.1}  distance: {:.1}  time: {} min{}",
        view.stops.len(),
        view.cost,
        view.distance,
        view.estimated_minutes,
        if view.accessible { "" } else { "  (not step-free)" }
    );
    out
}

pub fn render_spots(spots: &[SpotView]) -> String {
    let mut out = String::new();
    for spot in spots {
        let _ = writeln!(
            out,
            "{:>4}  {}  [{}]  {} min  popularity {}{}",
            spot.id,
            spot.name,
            spot.category,
            spot.visit_minutes,
            spot.popularity,
            if spot.accessible { "" } else { "  (not step-free)" }
        );
    }
    let _ = writeln!(out, "{} spot(s)", spots.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spots() -> Vec<Spot> {
        vec![
            Spot::new(1, "祈年殿", "Hall of Prayer").with_visit_minutes(45),
            Spot::new(3, "皇穹宇", "Imperial Vault")
                .with_position(3.0, 4.0)
                .with_visit_minutes(20)
                .with_accessible(false),
        ]
    }

    #[test]
    fn path_view_derives_totals() {
        let owned = spots();
        let refs: Vec<&Spot> = owned.iter().collect();
        let view = PathView::new("Route", &refs, 300.0, Language::En);

        assert_eq!(view.stops[1].name, "Imperial Vault");
        assert_eq!(view.distance, 5.0);
        assert_eq!(view.estimated_minutes, 45 + 20 + 10);
        assert!(!view.accessible);
    }

    #[test]
    fn text_rendering_lists_every_stop() {
        let owned = spots();
        let refs: Vec<&Spot> = owned.iter().collect();
        let text = render_path(&PathView::new("路线", &refs, 300.0, Language::Zh));

        assert!(text.contains(" 1. 祈年殿 (1)"));
        assert!(text.contains(" 2. 皇穹宇 (3)"));
        assert!(text.contains("cost: 300.0"));
        assert!(text.contains("not step-free"));
    }
}
