//! Clothing item model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::messages;

use crate::models::ObjectId;
use crate::validation::{NAME_MAX, NAME_MIN, is_valid_url};

/// Weather a clothing item is suited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Hot,
    Warm,
    Cold,
}

impl Weather {
    /// Parse the lowercase wire form.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hot" => Some(Self::Hot),
            "warm" => Some(Self::Warm),
            "cold" => Some(Self::Cold),
            _ => None,
        }
    }
}

/// Clothing item entity.
///
/// `owner` is set from the authenticated subject at creation and never
/// changes. `likes` has set semantics: a user appears at most once.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: ObjectId,
    pub name: String,
    pub weather: Weather,
    pub image_url: String,
    pub owner: ObjectId,
    pub likes: Vec<ObjectId>,
    pub created_at: DateTime<Utc>,
}

/// Validated creation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewClothingItem {
    pub name: String,
    pub weather: Weather,
    pub image_url: String,
}

impl NewClothingItem {
    /// Schema-level constraint check, mirroring what the document store
    /// enforces independently of request validation.
    pub fn constraint_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let len = self.name.chars().count();
        if len < NAME_MIN {
            violations.push(messages::NAME_TOO_SHORT.to_string());
        } else if len > NAME_MAX {
            violations.push(messages::NAME_TOO_LONG.to_string());
        }
        if !is_valid_url(&self.image_url) {
            violations.push(messages::INVALID_URL.to_string());
        }
        violations
    }
}

/// Validated query filter for listing items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemFilter {
    pub weather: Option<Weather>,
    pub owner: Option<ObjectId>,
}

impl ClothingItem {
    pub fn matches(&self, filter: &ItemFilter) -> bool {
        if let Some(weather) = filter.weather {
            if self.weather != weather {
                return false;
            }
        }
        if let Some(owner) = filter.owner {
            if self.owner != owner {
                return false;
            }
        }
        true
    }
}
