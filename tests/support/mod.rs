//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use tours_backend::api::TourId;
use tours_backend::db::repositories::LocalRepository;
use tours_backend::db::repository::TourRepository;
use tours_backend::models::tour::TourDraft;
use tours_backend::query::RawParams;

/// Build a draft with the required fields filled in.
pub fn draft(name: &str, difficulty: &str, price: f64) -> TourDraft {
    TourDraft {
        name: Some(name.to_string()),
        duration: Some(7.0),
        max_group_size: Some(15),
        difficulty: Some(difficulty.to_string()),
        price: Some(price),
        summary: Some(format!("{} summary", name)),
        image_cover: Some("cover.jpg".to_string()),
        ..Default::default()
    }
}

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
}

struct CatalogEntry {
    name: &'static str,
    difficulty: &'static str,
    price: f64,
    rating: f64,
    quantity: u64,
    starts: &'static [(i32, u32, u32)],
}

const CATALOG: [CatalogEntry; 12] = [
    CatalogEntry {
        name: "The Forest Hiker",
        difficulty: "easy",
        price: 397.0,
        rating: 4.7,
        quantity: 37,
        starts: &[(2021, 4, 25), (2021, 7, 20), (2021, 10, 5)],
    },
    CatalogEntry {
        name: "The Sea Explorer",
        difficulty: "medium",
        price: 497.0,
        rating: 4.8,
        quantity: 23,
        starts: &[(2021, 6, 19), (2021, 7, 20), (2021, 8, 18)],
    },
    CatalogEntry {
        name: "The Snow Adventurer",
        difficulty: "difficult",
        price: 997.0,
        rating: 4.5,
        quantity: 13,
        starts: &[(2022, 1, 5), (2021, 3, 10)],
    },
    CatalogEntry {
        name: "The City Wanderer",
        difficulty: "easy",
        price: 1197.0,
        rating: 4.6,
        quantity: 27,
        starts: &[(2021, 3, 11), (2021, 5, 2)],
    },
    CatalogEntry {
        name: "The Park Camper",
        difficulty: "easy",
        price: 1497.0,
        rating: 4.9,
        quantity: 19,
        starts: &[(2021, 8, 5)],
    },
    CatalogEntry {
        name: "The Sports Lover",
        difficulty: "difficult",
        price: 2997.0,
        rating: 3.9,
        quantity: 8,
        starts: &[(2021, 7, 20)],
    },
    CatalogEntry {
        name: "The Wine Taster",
        difficulty: "easy",
        price: 1997.0,
        rating: 4.4,
        quantity: 30,
        starts: &[(2021, 2, 12)],
    },
    CatalogEntry {
        name: "The Star Gazer",
        difficulty: "medium",
        price: 2997.0,
        rating: 4.7,
        quantity: 28,
        starts: &[(2021, 3, 23)],
    },
    CatalogEntry {
        name: "The Northern Lights",
        difficulty: "medium",
        price: 1497.0,
        rating: 4.9,
        quantity: 33,
        starts: &[(2021, 12, 16)],
    },
    CatalogEntry {
        name: "The River Rafter",
        difficulty: "difficult",
        price: 997.0,
        rating: 4.1,
        quantity: 11,
        starts: &[(2021, 6, 1)],
    },
    CatalogEntry {
        name: "The Desert Trekker",
        difficulty: "medium",
        price: 797.0,
        rating: 4.2,
        quantity: 15,
        starts: &[(2021, 9, 9)],
    },
    CatalogEntry {
        name: "The Island Hopper",
        difficulty: "easy",
        price: 697.0,
        rating: 4.8,
        quantity: 21,
        starts: &[(2021, 5, 12), (2021, 6, 19)],
    },
];

/// Seed twelve visible tours plus one secret tour.
///
/// Creation timestamps are staggered one day apart in catalog order, so
/// the default newest-first sort returns "The Island Hopper" first and
/// "The Forest Hiker" last.
pub async fn seed_catalog(repo: &LocalRepository) -> Vec<(String, TourId)> {
    let base = date(2021, 1, 1);
    let mut ids = Vec::new();

    for (i, entry) in CATALOG.iter().enumerate() {
        let mut d = draft(entry.name, entry.difficulty, entry.price);
        d.ratings_average = Some(entry.rating);
        d.ratings_quantity = Some(entry.quantity);
        d.duration = Some(5.0 + i as f64);
        d.start_dates = entry
            .starts
            .iter()
            .map(|&(y, m, day)| date(y, m, day))
            .collect();

        let id = TourId::generate();
        let tour = d
            .into_tour(id, base + Duration::days(i as i64))
            .expect("catalog drafts are valid");
        repo.insert_tour(tour).await.expect("catalog insert");
        ids.push((entry.name.to_string(), id));
    }

    // A secret tour that must never be observable through any read path.
    let mut hidden = draft("The Secret Society Tour", "easy", 9999.0);
    hidden.ratings_average = Some(4.9);
    hidden.ratings_quantity = Some(3);
    hidden.secret = true;
    hidden.start_dates = vec![date(2021, 7, 4)];
    let tour = hidden
        .into_tour(TourId::generate(), base + Duration::days(30))
        .expect("secret draft is valid");
    repo.insert_tour(tour).await.expect("secret insert");

    ids
}

/// Look up the id seeded for `name`.
pub fn id_of(ids: &[(String, TourId)], name: &str) -> TourId {
    ids.iter()
        .find(|(n, _)| n == name)
        .map(|(_, id)| *id)
        .expect("known catalog name")
}

/// Build a parameter map from `key=value` pairs.
pub fn params(pairs: &[(&str, &str)]) -> RawParams {
    RawParams::from_pairs(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
    )
}

/// Extract the string value of `field` from a returned document.
pub fn field_str(doc: &tours_backend::db::Document, field: &str) -> String {
    doc.get(field)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Extract the numeric value of `field` from a returned document.
pub fn field_f64(doc: &tours_backend::db::Document, field: &str) -> f64 {
    doc.get(field).and_then(|v| v.as_f64()).unwrap_or(f64::NAN)
}
