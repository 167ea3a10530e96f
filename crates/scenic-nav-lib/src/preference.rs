use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cost::CostMode;
use crate::error::{Error, Result};
use crate::route::{Route, RouteType};
use crate::spot::{Category, Language, Spot};

pub const MIN_WALKING_SPEED: u8 = 1;
pub const MAX_WALKING_SPEED: u8 = 5;
pub const MIN_BUDGET_LEVEL: u8 = 1;
pub const MAX_BUDGET_LEVEL: u8 = 3;

const BASE_SCORE: i32 = 50;

/// Visitor settings used to rank spots and routes.
///
/// Walking speed and budget level are validated on every write, including
/// deserialization, so a value outside its closed range can never be observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PreferenceRecord")]
pub struct UserPreference {
    pub language: Language,
    pub interested_categories: BTreeSet<Category>,
    pub minutes_available: u32,
    pub need_accessible: bool,
    walking_speed: u8,
    pub avoid_crowds: bool,
    /// Zero means no limit.
    pub max_photo_spots: u32,
    pub include_history: bool,
    budget_level: u8,
}

/// Unvalidated wire shape of [`UserPreference`].
#[derive(Deserialize)]
struct PreferenceRecord {
    language: Language,
    interested_categories: BTreeSet<Category>,
    minutes_available: u32,
    need_accessible: bool,
    walking_speed: u8,
    avoid_crowds: bool,
    max_photo_spots: u32,
    include_history: bool,
    budget_level: u8,
}

impl TryFrom<PreferenceRecord> for UserPreference {
    type Error = Error;

    fn try_from(record: PreferenceRecord) -> Result<Self> {
        let mut preference = UserPreference {
            language: record.language,
            interested_categories: record.interested_categories,
            minutes_available: record.minutes_available,
            need_accessible: record.need_accessible,
            avoid_crowds: record.avoid_crowds,
            max_photo_spots: record.max_photo_spots,
            include_history: record.include_history,
            ..UserPreference::default()
        };
        preference.set_walking_speed(record.walking_speed)?;
        preference.set_budget_level(record.budget_level)?;
        Ok(preference)
    }
}

impl Default for UserPreference {
    fn default() -> Self {
        Self {
            language: Language::Zh,
            interested_categories: BTreeSet::new(),
            minutes_available: 180,
            need_accessible: false,
            walking_speed: 3,
            avoid_crowds: false,
            max_photo_spots: 0,
            include_history: true,
            budget_level: 2,
        }
    }
}

impl UserPreference {
    pub fn walking_speed(&self) -> u8 {
        self.walking_speed
    }

    pub fn set_walking_speed(&mut self, speed: u8) -> Result<()> {
        check_range("walking speed", speed, MIN_WALKING_SPEED, MAX_WALKING_SPEED)?;
        self.walking_speed = speed;
        Ok(())
    }

    pub fn budget_level(&self) -> u8 {
        self.budget_level
    }

    pub fn set_budget_level(&mut self, level: u8) -> Result<()> {
        check_range("budget level", level, MIN_BUDGET_LEVEL, MAX_BUDGET_LEVEL)?;
        self.budget_level = level;
        Ok(())
    }

    pub fn add_interest(&mut self, category: Category) {
        self.interested_categories.insert(category);
    }

    pub fn remove_interest(&mut self, category: Category) {
        self.interested_categories.remove(&category);
    }

    /// Cost function matching the crowd setting: effective weight when
    /// avoiding crowds, raw weight otherwise.
    pub fn cost_mode(&self) -> CostMode {
        if self.avoid_crowds {
            CostMode::AvoidCrowds
        } else {
            CostMode::Distance
        }
    }

    /// Relevance of a spot for this visitor, clamped to `0..=100`.
    pub fn spot_score(&self, spot: &Spot) -> u8 {
        let mut score = BASE_SCORE;
        if self.interested_categories.contains(&spot.category) {
            score += 20;
        }
        if self.need_accessible && !spot.accessible {
            score -= 40;
        }

        let popularity = i32::from(spot.popularity());
        if self.avoid_crowds {
            score -= popularity / 5;
        } else {
            score += popularity / 10;
        }

        if self.budget_level == 1 && spot.entrance_fee > 50.0 {
            score -= 15;
        } else if self.budget_level == 3 && spot.entrance_fee > 80.0 {
            score += 10;
        }
        clamp_score(score)
    }

    /// Fit of a route for this visitor, clamped to `0..=100`.
    pub fn route_score(&self, route: &Route) -> u8 {
        let mut score = BASE_SCORE;
        let route_minutes = f64::from(route.estimated_minutes());
        let available = f64::from(self.minutes_available);

        if route_minutes > available * 1.1 {
            score -= 30;
        } else if route_minutes >= available * 0.9 {
            score += 20;
        } else if route_minutes < available * 0.7 {
            score -= 10;
        }

        if self.need_accessible && !route.is_accessible() {
            score -= 50;
        }

        let themed = match route.kind {
            RouteType::QuickTour => self.avoid_crowds,
            RouteType::Photography => self.max_photo_spots > 0,
            RouteType::Historical => self.include_history,
            _ => false,
        };
        if themed {
            score += 15;
        }
        clamp_score(score)
    }
}

fn check_range(name: &str, value: u8, min: u8, max: u8) -> Result<()> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(Error::InvalidArgument {
        message: format!("{name} must be within {min}..={max}, got {value}"),
    })
}

fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_reject_out_of_range_values() {
        let mut preference = UserPreference::default();
        assert!(preference.set_walking_speed(0).is_err());
        assert!(preference.set_walking_speed(6).is_err());
        assert!(preference.set_budget_level(4).is_err());
        assert_eq!(preference.walking_speed(), 3);
        assert_eq!(preference.budget_level(), 2);

        preference.set_walking_speed(5).expect("upper bound accepted");
        preference.set_budget_level(1).expect("lower bound accepted");
        assert_eq!(preference.walking_speed(), 5);
        assert_eq!(preference.budget_level(), 1);
    }

    #[test]
    fn deserializing_validates_ranges() {
        let mut value = serde_json::to_value(UserPreference::default()).expect("serializes");
        value["walking_speed"] = serde_json::json!(9);
        let err = serde_json::from_value::<UserPreference>(value.clone())
            .expect_err("speed 9 is out of range");
        assert!(err.to_string().contains("walking speed"), "{err}");

        value["walking_speed"] = serde_json::json!(4);
        value["budget_level"] = serde_json::json!(0);
        assert!(serde_json::from_value::<UserPreference>(value.clone()).is_err());

        value["budget_level"] = serde_json::json!(3);
        let preference: UserPreference = serde_json::from_value(value).expect("in range");
        assert_eq!(preference.walking_speed(), 4);
        assert_eq!(preference.budget_level(), 3);
    }

    #[test]
    fn spot_score_combines_signals() {
        let spot = Spot::new(1, "祈年殿", "Hall of Prayer")
            .with_category(Category::Palace)
            .with_popularity(100)
            .expect("valid popularity")
            .with_entrance_fee(60.0);

        let mut preference = UserPreference::default();
        assert_eq!(preference.spot_score(&spot), 60);

        preference.add_interest(Category::Palace);
        preference.avoid_crowds = true;
        preference.set_budget_level(1).expect("valid level");
        assert_eq!(preference.spot_score(&spot), 50 + 20 - 20 - 15);
    }

    #[test]
    fn cost_mode_follows_crowd_setting() {
        let mut preference = UserPreference::default();
        assert_eq!(preference.cost_mode(), CostMode::Distance);
        preference.avoid_crowds = true;
        assert_eq!(preference.cost_mode(), CostMode::AvoidCrowds);
    }

    #[test]
    fn route_score_rewards_good_time_fit() {
        let preference = UserPreference::default();
        let spot = Spot::new(1, "a", "a").with_visit_minutes(170);
        let route = Route::from_spots(1, "a", "a", RouteType::Historical, &[&spot]);
        assert_eq!(preference.route_score(&route), 50 + 20 + 15);

        let empty = Route::new(2, "b", "b", RouteType::Classic);
        assert_eq!(preference.route_score(&empty), 40);
    }
}
