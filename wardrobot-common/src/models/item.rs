// File: wardrobot-common/src/models/item.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Garment categories as emitted by the zero-shot image classifier.
/// Stored as TEXT using the classifier's lowercase labels.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GarmentKind {
    Shirt,
    #[sqlx(rename = "t-shirt")]
    #[serde(rename = "t-shirt")]
    TShirt,
    Jacket,
    Pants,
    Shorts,
    Footwear,
    Headwear,
    Dress,
    Underwear,
    Accessory,
    Swimwear,
}

impl fmt::Display for GarmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GarmentKind::Shirt => write!(f, "shirt"),
            GarmentKind::TShirt => write!(f, "t-shirt"),
            GarmentKind::Jacket => write!(f, "jacket"),
            GarmentKind::Pants => write!(f, "pants"),
            GarmentKind::Shorts => write!(f, "shorts"),
            GarmentKind::Footwear => write!(f, "footwear"),
            GarmentKind::Headwear => write!(f, "headwear"),
            GarmentKind::Dress => write!(f, "dress"),
            GarmentKind::Underwear => write!(f, "underwear"),
            GarmentKind::Accessory => write!(f, "accessory"),
            GarmentKind::Swimwear => write!(f, "swimwear"),
        }
    }
}

impl FromStr for GarmentKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        // The classifier occasionally returns composite labels such as
        // "thermal underwear"; anything containing "underwear" collapses.
        if lowered.contains("underwear") {
            return Ok(GarmentKind::Underwear);
        }
        match lowered.as_str() {
            "shirt" => Ok(GarmentKind::Shirt),
            "t-shirt" => Ok(GarmentKind::TShirt),
            "jacket" => Ok(GarmentKind::Jacket),
            "pants" => Ok(GarmentKind::Pants),
            "shorts" => Ok(GarmentKind::Shorts),
            "footwear" => Ok(GarmentKind::Footwear),
            "headwear" => Ok(GarmentKind::Headwear),
            "dress" => Ok(GarmentKind::Dress),
            "accessory" => Ok(GarmentKind::Accessory),
            "swimwear" => Ok(GarmentKind::Swimwear),
            _ => Err(format!("Unknown garment kind: {}", s)),
        }
    }
}

/// Season suitability labels. "spring wear" doubles as the all-season tag and
/// is always included in generation queries alongside the requested season.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum SeasonTag {
    #[sqlx(rename = "summer wear")]
    #[serde(rename = "summer wear")]
    Summer,
    #[sqlx(rename = "winter wear")]
    #[serde(rename = "winter wear")]
    Winter,
    #[sqlx(rename = "spring wear")]
    #[serde(rename = "spring wear")]
    Spring,
}

impl fmt::Display for SeasonTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonTag::Summer => write!(f, "summer wear"),
            SeasonTag::Winter => write!(f, "winter wear"),
            SeasonTag::Spring => write!(f, "spring wear"),
        }
    }
}

impl FromStr for SeasonTag {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summer wear" | "summer" => Ok(SeasonTag::Summer),
            "winter wear" | "winter" => Ok(SeasonTag::Winter),
            "spring wear" | "spring" => Ok(SeasonTag::Spring),
            _ => Err(format!("Unknown season tag: {}", s)),
        }
    }
}

/// Occasion labels, matching the zero-shot candidate list used when an item
/// is registered and when free text is resolved at generation time.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum OccasionTag {
    #[sqlx(rename = "casual wear")]
    #[serde(rename = "casual wear")]
    Casual,
    #[sqlx(rename = "formal wear")]
    #[serde(rename = "formal wear")]
    Formal,
    #[sqlx(rename = "sports wear")]
    #[serde(rename = "sports wear")]
    Sports,
    #[sqlx(rename = "all rounder wear")]
    #[serde(rename = "all rounder wear")]
    AllRounder,
}

impl fmt::Display for OccasionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OccasionTag::Casual => write!(f, "casual wear"),
            OccasionTag::Formal => write!(f, "formal wear"),
            OccasionTag::Sports => write!(f, "sports wear"),
            OccasionTag::AllRounder => write!(f, "all rounder wear"),
        }
    }
}

impl FromStr for OccasionTag {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "casual wear" | "casual" => Ok(OccasionTag::Casual),
            "formal wear" | "formal" => Ok(OccasionTag::Formal),
            "sports wear" | "sports" => Ok(OccasionTag::Sports),
            "all rounder wear" | "all rounder" => Ok(OccasionTag::AllRounder),
            _ => Err(format!("Unknown occasion tag: {}", s)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct ClothingItem {
    pub item_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub kind: GarmentKind,
    pub color: String,
    pub season: SeasonTag,
    pub occasion: OccasionTag,
    pub location: String,
    pub used_times: i32,
    pub is_washing: bool,
    pub created_at: DateTime<Utc>,
    /// Doubles as the wash-state anchor: `start_washing` stamps it, and the
    /// laundry sweep measures elapsed time against it.
    pub updated_at: Option<DateTime<Utc>>,
}

impl ClothingItem {
    /// A freshly registered item: clean, never worn.
    pub fn new(
        owner_id: Uuid,
        name: &str,
        kind: GarmentKind,
        color: &str,
        season: SeasonTag,
        occasion: OccasionTag,
        location: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            item_id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            kind,
            color: color.to_string(),
            season,
            occasion,
            location: location.to_string(),
            used_times: 0,
            is_washing: false,
            created_at: now,
            updated_at: Some(now),
        }
    }
}
