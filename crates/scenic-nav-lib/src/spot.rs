use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Numeric identifier for a point of interest.
pub type SpotId = i64;

/// Upper bound for [`Spot::popularity`].
pub const MAX_POPULARITY: u8 = 100;

/// Display language for the bilingual spot fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

/// Planar coordinates of a spot (longitude/latitude or local plane units).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Closed set of spot categories used by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Building,
    Altar,
    StoneCarving,
    Palace,
    Passage,
    Landscape,
    Pavilion,
    Entrance,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Building,
        Category::Altar,
        Category::StoneCarving,
        Category::Palace,
        Category::Passage,
        Category::Landscape,
        Category::Pavilion,
        Category::Entrance,
    ];

    /// Localised label for the category.
    pub fn label(self, language: Language) -> &'static str {
        match language {
            Language::Zh => self.zh_label(),
            Language::En => self.en_label(),
        }
    }

    fn zh_label(self) -> &'static str {
        match self {
            Category::Building => "建筑",
            Category::Altar => "祭坛",
            Category::StoneCarving => "石刻",
            Category::Palace => "宫殿",
            Category::Passage => "通道",
            Category::Landscape => "景观",
            Category::Pavilion => "亭子",
            Category::Entrance => "入口",
        }
    }

    fn en_label(self) -> &'static str {
        match self {
            Category::Building => "building",
            Category::Altar => "altar",
            Category::StoneCarving => "stone_carving",
            Category::Palace => "palace",
            Category::Passage => "passage",
            Category::Landscape => "landscape",
            Category::Pavilion => "pavilion",
            Category::Entrance => "entrance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.en_label())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Accepts either the Chinese label or the English name (case-insensitive,
    /// `-` and `_` interchangeable).
    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let normalized = trimmed.to_ascii_lowercase().replace('-', "_");
        Category::ALL
            .into_iter()
            .find(|category| category.zh_label() == trimmed || category.en_label() == normalized)
            .ok_or_else(|| Error::UnknownCategory {
                value: value.to_string(),
            })
    }
}

/// A point of interest in the scenic area.
///
/// Identity is the numeric id alone: two spots with the same id compare equal
/// and hash identically regardless of their descriptive fields. The id cannot
/// be changed after construction; everything else is freely mutable.
#[derive(Debug, Clone, Serialize)]
pub struct Spot {
    id: SpotId,
    pub name_zh: String,
    pub name_en: String,
    pub description_zh: String,
    pub description_en: String,
    pub position: Position,
    pub category: Category,
    /// Suggested visit duration in minutes.
    pub visit_minutes: u32,
    pub image_path: Option<String>,
    popularity: u8,
    pub accessible: bool,
    pub entrance_fee: f64,
}

impl Spot {
    /// Create a spot with the given identity and names. Remaining fields
    /// default to an accessible, free, zero-popularity building at the origin.
    pub fn new(id: SpotId, name_zh: impl Into<String>, name_en: impl Into<String>) -> Self {
        Self {
            id,
            name_zh: name_zh.into(),
            name_en: name_en.into(),
            description_zh: String::new(),
            description_en: String::new(),
            position: Position::default(),
            category: Category::Building,
            visit_minutes: 0,
            image_path: None,
            popularity: 0,
            accessible: true,
            entrance_fee: 0.0,
        }
    }

    pub fn id(&self) -> SpotId {
        self.id
    }

    pub fn popularity(&self) -> u8 {
        self.popularity
    }

    /// Update the popularity score, rejecting values above [`MAX_POPULARITY`].
    pub fn set_popularity(&mut self, popularity: u8) -> Result<()> {
        if popularity > MAX_POPULARITY {
            return Err(Error::invalid_argument(format!(
                "popularity must be within 0..={MAX_POPULARITY}, got {popularity}"
            )));
        }
        self.popularity = popularity;
        Ok(())
    }

    pub fn with_popularity(mut self, popularity: u8) -> Result<Self> {
        self.set_popularity(popularity)?;
        Ok(self)
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_visit_minutes(mut self, minutes: u32) -> Self {
        self.visit_minutes = minutes;
        self
    }

    pub fn with_descriptions(
        mut self,
        description_zh: impl Into<String>,
        description_en: impl Into<String>,
    ) -> Self {
        self.description_zh = description_zh.into();
        self.description_en = description_en.into();
        self
    }

    pub fn with_accessible(mut self, accessible: bool) -> Self {
        self.accessible = accessible;
        self
    }

    pub fn with_entrance_fee(mut self, fee: f64) -> Self {
        self.entrance_fee = fee;
        self
    }

    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
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

    /// Euclidean distance between the two spots' coordinates.
    pub fn distance_to(&self, other: &Spot) -> f64 {
        self.position.distance_to(&other.position)
    }

    /// Default catalog ordering: most popular first.
    pub fn cmp_popularity(&self, other: &Spot) -> Ordering {
        other.popularity.cmp(&self.popularity)
    }
}

impl PartialEq for Spot {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Spot {}

impl Hash for Spot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name_en, self.id)
    }
}
