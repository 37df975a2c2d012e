//! Tour record schema, payload types, and validation rules.
//!
//! The [`Tour`] struct is the canonical record stored by the repository.
//! Create and update payloads arrive as [`TourDraft`] and [`TourPatch`]
//! and must pass [`TourDraft::into_tour`] / [`Tour::validate`] before they
//! reach the store. Validation collects every violated rule so the client
//! sees all messages at once rather than the first failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::api::TourId;

/// Tour difficulty rating.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Difficult,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Difficult => "difficult",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "difficult" => Ok(Difficulty::Difficult),
            _ => Err("Difficulty is either easy, medium or difficult".to_string()),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tour record as stored by the repository.
///
/// Field names serialize in camelCase to match the public JSON API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: TourId,
    pub name: String,
    /// URL-friendly form of the name, derived on create and on rename.
    pub slug: String,
    /// Tour length in days.
    pub duration: f64,
    pub max_group_size: u32,
    pub difficulty: Difficulty,
    pub ratings_average: f64,
    pub ratings_quantity: u64,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_discount: Option<f64>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_cover: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Set by the store when the record is created.
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub start_dates: Vec<DateTime<Utc>>,
    /// Secret tours are excluded from every read path and report.
    #[serde(default)]
    pub secret: bool,
}

impl Tour {
    /// Tour length in weeks, derived from `duration`.
    ///
    /// Included as `durationWeeks` in serialized documents.
    pub fn duration_weeks(&self) -> f64 {
        self.duration / 7.0
    }

    /// Check the field-level constraints that apply to a fully
    /// materialized record. Used after applying a [`TourPatch`].
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut messages = Vec::new();
        check_fields(
            &mut messages,
            &self.name,
            self.ratings_average,
            self.price_discount,
            Some(self.price),
        );
        ValidationErrors::from_messages(messages)
    }
}

/// Accumulated schema-validation failures for a create or update payload.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", .messages.join(". "))]
pub struct ValidationErrors {
    pub messages: Vec<String>,
}

impl ValidationErrors {
    fn from_messages(messages: Vec<String>) -> Result<(), Self> {
        if messages.is_empty() {
            Ok(())
        } else {
            Err(Self { messages })
        }
    }
}

/// Payload for creating a tour.
///
/// Required fields are modeled as `Option` so that a single pass can
/// report every missing field instead of failing on the first one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDraft {
    pub name: Option<String>,
    pub duration: Option<f64>,
    pub max_group_size: Option<u32>,
    /// Kept as a raw string until validation so an unknown value yields
    /// the schema message rather than a deserialization error.
    pub difficulty: Option<String>,
    pub ratings_average: Option<f64>,
    pub ratings_quantity: Option<u64>,
    pub price: Option<f64>,
    pub price_discount: Option<f64>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_cover: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub start_dates: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub secret: bool,
}

impl TourDraft {
    /// Validate the draft and materialize it into a [`Tour`].
    ///
    /// String fields are trimmed, the slug is derived from the name, and
    /// `ratingsAverage` / `ratingsQuantity` fall back to their schema
    /// defaults (4.5 and 0).
    pub fn into_tour(self, id: TourId, created_at: DateTime<Utc>) -> Result<Tour, ValidationErrors> {
        let mut messages = Vec::new();

        let name = required_trimmed(&mut messages, self.name, "A tour must have a name");
        let duration = required(&mut messages, self.duration, "A tour must have a duration");
        let max_group_size = required(
            &mut messages,
            self.max_group_size,
            "A tour must have a maxGroupSize",
        );
        let price = required(&mut messages, self.price, "A tour must have a price");
        let summary = required_trimmed(&mut messages, self.summary, "A tour must have a summary");
        let image_cover = required_trimmed(
            &mut messages,
            self.image_cover,
            "A tour must have a imageCover",
        );

        let difficulty = match self.difficulty.as_deref() {
            None => {
                messages.push("A tour must have a difficulty".to_string());
                None
            }
            Some(raw) => match raw.parse::<Difficulty>() {
                Ok(d) => Some(d),
                Err(msg) => {
                    messages.push(msg);
                    None
                }
            },
        };

        let ratings_average = self.ratings_average.unwrap_or(4.5);
        check_fields(
            &mut messages,
            name.as_deref().unwrap_or_default(),
            ratings_average,
            self.price_discount,
            price,
        );

        ValidationErrors::from_messages(messages)?;

        // All required fields are present once validation passed.
        let name = name.unwrap_or_default();
        Ok(Tour {
            id,
            slug: slugify(&name),
            name,
            duration: duration.unwrap_or_default(),
            max_group_size: max_group_size.unwrap_or_default(),
            difficulty: difficulty.unwrap_or(Difficulty::Easy),
            ratings_average,
            ratings_quantity: self.ratings_quantity.unwrap_or(0),
            price: price.unwrap_or_default(),
            price_discount: self.price_discount,
            summary: summary.unwrap_or_default(),
            description: self.description.map(|d| d.trim().to_string()),
            image_cover: image_cover.unwrap_or_default(),
            images: self.images,
            created_at,
            start_dates: self.start_dates,
            secret: self.secret,
        })
    }
}

/// Partial update payload. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPatch {
    pub name: Option<String>,
    pub duration: Option<f64>,
    pub max_group_size: Option<u32>,
    pub difficulty: Option<String>,
    pub ratings_average: Option<f64>,
    pub ratings_quantity: Option<u64>,
    pub price: Option<f64>,
    pub price_discount: Option<f64>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_cover: Option<String>,
    pub images: Option<Vec<String>>,
    pub start_dates: Option<Vec<DateTime<Utc>>>,
    pub secret: Option<bool>,
}

impl TourPatch {
    /// Apply the patch to an existing record, re-deriving the slug when
    /// the name changes. The caller re-validates the resulting record.
    pub fn apply_to(self, tour: &mut Tour) -> Result<(), ValidationErrors> {
        if let Some(name) = self.name {
            let name = name.trim().to_string();
            tour.slug = slugify(&name);
            tour.name = name;
        }
        if let Some(duration) = self.duration {
            tour.duration = duration;
        }
        if let Some(max_group_size) = self.max_group_size {
            tour.max_group_size = max_group_size;
        }
        if let Some(raw) = self.difficulty {
            tour.difficulty = raw
                .parse::<Difficulty>()
                .map_err(|msg| ValidationErrors { messages: vec![msg] })?;
        }
        if let Some(ratings_average) = self.ratings_average {
            tour.ratings_average = ratings_average;
        }
        if let Some(ratings_quantity) = self.ratings_quantity {
            tour.ratings_quantity = ratings_quantity;
        }
        if let Some(price) = self.price {
            tour.price = price;
        }
        if let Some(price_discount) = self.price_discount {
            tour.price_discount = Some(price_discount);
        }
        if let Some(summary) = self.summary {
            tour.summary = summary.trim().to_string();
        }
        if let Some(description) = self.description {
            tour.description = Some(description.trim().to_string());
        }
        if let Some(image_cover) = self.image_cover {
            tour.image_cover = image_cover.trim().to_string();
        }
        if let Some(images) = self.images {
            tour.images = images;
        }
        if let Some(start_dates) = self.start_dates {
            tour.start_dates = start_dates;
        }
        if let Some(secret) = self.secret {
            tour.secret = secret;
        }

        tour.validate()
    }
}

/// Derive a URL-friendly slug: lowercase, runs of non-alphanumeric
/// characters collapsed into single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn required<T>(messages: &mut Vec<String>, value: Option<T>, message: &str) -> Option<T> {
    if value.is_none() {
        messages.push(message.to_string());
    }
    value
}

fn required_trimmed(
    messages: &mut Vec<String>,
    value: Option<String>,
    message: &str,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => {
            messages.push(message.to_string());
            None
        }
    }
}

/// Shared field-level constraints for drafts and materialized records.
fn check_fields(
    messages: &mut Vec<String>,
    name: &str,
    ratings_average: f64,
    price_discount: Option<f64>,
    price: Option<f64>,
) {
    if !name.is_empty() {
        if name.chars().count() < 5 {
            messages.push("A tour name must have at least 5 characters".to_string());
        }
        if name.chars().count() > 40 {
            messages.push("A tour name must have at most 40 characters".to_string());
        }
    }
    if ratings_average < 1.0 {
        messages.push("A rating must be above 1.0".to_string());
    }
    if ratings_average > 5.0 {
        messages.push("A rating must be below 5.0".to_string());
    }
    if let (Some(discount), Some(price)) = (price_discount, price) {
        if discount >= price {
            messages.push("The discount price cannot exceed the price of the tour.".to_string());
        }
    }
}
