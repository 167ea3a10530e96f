use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::spot::{Language, Spot};

/// Walking allowance added between two consecutive stops.
pub const MINUTES_PER_LEG: u32 = 10;

/// Theme of a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    #[default]
    Classic,
    Cultural,
    Photography,
    QuickTour,
    Accessible,
    Historical,
}

impl RouteType {
    pub fn name(self, language: Language) -> &'static str {
        match (self, language) {
            (RouteType::Classic, Language::Zh) => "经典路线",
            (RouteType::Cultural, Language::Zh) => "文化体验",
            (RouteType::Photography, Language::Zh) => "摄影精选",
            (RouteType::QuickTour, Language::Zh) => "快速游览",
            (RouteType::Accessible, Language::Zh) => "无障碍路线",
            (RouteType::Historical, Language::Zh) => "历史探索",
            (RouteType::Classic, Language::En) => "Classic Route",
            (RouteType::Cultural, Language::En) => "Cultural Experience",
            (RouteType::Photography, Language::En) => "Photography Highlights",
            (RouteType::QuickTour, Language::En) => "Quick Tour",
            (RouteType::Accessible, Language::En) => "Accessible Route",
            (RouteType::Historical, Language::En) => "Historical Exploration",
        }
    }
}

/// One stop of a route: a spot and how long to stay there.
#[derive(Debug, Clone, Serialize)]
pub struct RouteStop {
    pub spot: Spot,
    pub stay_minutes: u32,
    pub note_zh: String,
    pub note_en: String,
}

impl RouteStop {
    /// Stop using the spot's suggested visit duration.
    pub fn new(spot: Spot) -> Self {
        let stay_minutes = spot.visit_minutes;
        Self::with_stay(spot, stay_minutes)
    }

    pub fn with_stay(spot: Spot, stay_minutes: u32) -> Self {
        Self {
            spot,
            stay_minutes,
            note_zh: String::new(),
            note_en: String::new(),
        }
    }

    pub fn note(&self, language: Language) -> &str {
        match language {
            Language::Zh => &self.note_zh,
            Language::En => &self.note_en,
        }
    }
}

/// Ordered sequence of stops with derived totals.
///
/// Duration, distance and accessibility are recomputed after every change to
/// the stop sequence and can only be read, never set.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub id: i64,
    pub name_zh: String,
    pub name_en: String,
    pub description_zh: String,
    pub description_en: String,
    pub kind: RouteType,
    pub popularity: u8,
    stops: Vec<RouteStop>,
    estimated_minutes: u32,
    total_distance: f64,
    accessible: bool,
}

impl Route {
    pub fn new(
        id: i64,
        name_zh: impl Into<String>,
        name_en: impl Into<String>,
        kind: RouteType,
    ) -> Self {
        Self {
            id,
            name_zh: name_zh.into(),
            name_en: name_en.into(),
            description_zh: String::new(),
            description_en: String::new(),
            kind,
            popularity: 0,
            stops: Vec::new(),
            estimated_minutes: 0,
            total_distance: 0.0,
            accessible: true,
        }
    }

    /// Turn a solver result into a route, one default stop per spot.
    pub fn from_spots(
        id: i64,
        name_zh: impl Into<String>,
        name_en: impl Into<String>,
        kind: RouteType,
        spots: &[&Spot],
    ) -> Self {
        let mut route = Self::new(id, name_zh, name_en, kind);
        route.stops = spots
            .iter()
            .map(|spot| RouteStop::new((*spot).clone()))
            .collect();
        route.update_stats();
        route
    }

    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn add_stop(&mut self, stop: RouteStop) {
        self.stops.push(stop);
        self.update_stats();
    }

    /// Insert before `index`; `index == len()` appends.
    pub fn insert_stop(&mut self, index: usize, stop: RouteStop) -> Result<()> {
        if index > self.stops.len() {
            return Err(self.out_of_range(index));
        }
        self.stops.insert(index, stop);
        self.update_stats();
        Ok(())
    }

    pub fn remove_stop(&mut self, index: usize) -> Result<RouteStop> {
        if index >= self.stops.len() {
            return Err(self.out_of_range(index));
        }
        let removed = self.stops.remove(index);
        self.update_stats();
        Ok(removed)
    }

    pub fn swap_stops(&mut self, a: usize, b: usize) -> Result<()> {
        for index in [a, b] {
            if index >= self.stops.len() {
                return Err(self.out_of_range(index));
            }
        }
        self.stops.swap(a, b);
        self.update_stats();
        Ok(())
    }

    /// Total stay time plus [`MINUTES_PER_LEG`] for every leg.
    pub fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    pub fn estimated_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.estimated_minutes) * 60)
    }

    /// Straight-line distance summed over consecutive stops.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// `true` when every stop is accessible (vacuously for an empty route).
    pub fn is_accessible(&self) -> bool {
        self.accessible
    }

    pub fn name(&self, language: Language) -> &str {
        match language {
            Language::Zh => &self.name_zh,
            Language::En => &self.name_en,
        }
    }

    pub fn description(&self, language: Language) -> &str {
        match language {
            Language::Zh => &self.description_zh,
            Language::En => &self.description_en,
        }
    }

    fn update_stats(&mut self) {
        let stays: u32 = self.stops.iter().map(|stop| stop.stay_minutes).sum();
        let legs = self.stops.len().saturating_sub(1) as u32;
        self.estimated_minutes = stays + legs * MINUTES_PER_LEG;
        self.total_distance = self
            .stops
            .windows(2)
            .map(|pair| pair[0].spot.distance_to(&pair[1].spot))
            .sum();
        self.accessible = self.stops.iter().all(|stop| stop.spot.accessible);
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::OutOfRange {
            index,
            len: self.stops.len(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} stops, {} min, {:.1} units)",
            self.name_en,
            self.stops.len(),
            self.estimated_minutes,
            self.total_distance
        )
    }
}
