//! End-to-end tests for the list query pipeline: filter, sort, field
//! projection, and pagination running through the service layer against
//! the local repository.

mod support;

use support::{field_f64, field_str, params, seed_catalog};
use tours_backend::db::repositories::LocalRepository;
use tours_backend::db::services;

#[tokio::test]
async fn filtered_sorted_projected_page() {
    let repo = LocalRepository::new();
    seed_catalog(&repo).await;

    // ?difficulty=easy&sort=-price&limit=3&page=1&fields=name,price
    let docs = services::list_tours(
        &repo,
        params(&[
            ("difficulty", "easy"),
            ("sort", "-price"),
            ("limit", "3"),
            ("page", "1"),
            ("fields", "name,price"),
        ]),
    )
    .await
    .unwrap();

    assert_eq!(docs.len(), 3);
    let names: Vec<String> = docs.iter().map(|d| field_str(d, "name")).collect();
    assert_eq!(
        names,
        vec!["The Wine Taster", "The Park Camper", "The City Wanderer"]
    );
    let prices: Vec<f64> = docs.iter().map(|d| field_f64(d, "price")).collect();
    assert_eq!(prices, vec![1997.0, 1497.0, 1197.0]);

    // Exactly name, price, and the identifier.
    for doc in &docs {
        let mut keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["id", "name", "price"]);
    }
}

#[tokio::test]
async fn default_listing_is_newest_first_with_full_fields() {
    let repo = LocalRepository::new();
    seed_catalog(&repo).await;

    let docs = services::list_tours(&repo, params(&[])).await.unwrap();

    assert_eq!(docs.len(), 12);
    assert_eq!(field_str(&docs[0], "name"), "The Island Hopper");
    assert_eq!(field_str(&docs[11], "name"), "The Forest Hiker");

    // All fields except the internal revision counter.
    for doc in &docs {
        assert!(!doc.contains_key("revision"));
        assert!(doc.contains_key("durationWeeks"));
        assert!(doc.contains_key("createdAt"));
    }

    // Deterministic: a second identical query returns the same order.
    let again = services::list_tours(&repo, params(&[])).await.unwrap();
    let order: Vec<String> = docs.iter().map(|d| field_str(d, "name")).collect();
    let order_again: Vec<String> = again.iter().map(|d| field_str(d, "name")).collect();
    assert_eq!(order, order_again);
}

#[tokio::test]
async fn multi_key_sort_breaks_ties_left_to_right() {
    let repo = LocalRepository::new();
    seed_catalog(&repo).await;

    let docs = services::list_tours(&repo, params(&[("sort", "-ratingsAverage,price")]))
        .await
        .unwrap();

    let head: Vec<(String, f64)> = docs
        .iter()
        .take(4)
        .map(|d| (field_str(d, "name"), field_f64(d, "ratingsAverage")))
        .collect();
    // Two tours share the 4.9 top rating (and the same price); the 4.8
    // pair below them is ordered by ascending price.
    assert_eq!(head[0].1, 4.9);
    assert_eq!(head[1].1, 4.9);
    assert_eq!(head[2], ("The Sea Explorer".to_string(), 4.8));
    assert_eq!(head[3], ("The Island Hopper".to_string(), 4.8));
}

#[tokio::test]
async fn range_operator_filters() {
    let repo = LocalRepository::new();
    seed_catalog(&repo).await;

    let docs = services::list_tours(&repo, params(&[("price[gte]", "1497")]))
        .await
        .unwrap();
    assert_eq!(docs.len(), 5);
    assert!(docs.iter().all(|d| field_f64(d, "price") >= 1497.0));

    let docs = services::list_tours(
        &repo,
        params(&[("price[gt]", "497"), ("price[lt]", "997")]),
    )
    .await
    .unwrap();
    let names: Vec<String> = docs.iter().map(|d| field_str(d, "name")).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"The Desert Trekker".to_string()));
    assert!(names.contains(&"The Island Hopper".to_string()));
}

#[tokio::test]
async fn pagination_windows_and_overrun() {
    let repo = LocalRepository::new();
    seed_catalog(&repo).await;

    let page1 = services::list_tours(&repo, params(&[("limit", "5"), ("page", "1")]))
        .await
        .unwrap();
    let page2 = services::list_tours(&repo, params(&[("limit", "5"), ("page", "2")]))
        .await
        .unwrap();
    let page3 = services::list_tours(&repo, params(&[("limit", "5"), ("page", "3")]))
        .await
        .unwrap();

    assert_eq!(page1.len(), 5);
    assert_eq!(page2.len(), 5);
    assert_eq!(page3.len(), 2);

    // Pages tile the newest-first ordering without overlap.
    let all: Vec<String> = services::list_tours(&repo, params(&[]))
        .await
        .unwrap()
        .iter()
        .map(|d| field_str(d, "name"))
        .collect();
    let paged: Vec<String> = page1
        .iter()
        .chain(&page2)
        .chain(&page3)
        .map(|d| field_str(d, "name"))
        .collect();
    assert_eq!(all, paged);

    // A page past the end is an empty sequence, not an error.
    let beyond = services::list_tours(&repo, params(&[("limit", "5"), ("page", "4")]))
        .await
        .unwrap();
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn malformed_page_and_limit_fall_back_to_defaults() {
    let repo = LocalRepository::new();
    seed_catalog(&repo).await;

    let docs = services::list_tours(&repo, params(&[("page", "abc"), ("limit", "-5")]))
        .await
        .unwrap();
    // Defaults: first page of up to 100.
    assert_eq!(docs.len(), 12);
}

#[tokio::test]
async fn equality_filter_on_boolean_field() {
    let repo = LocalRepository::new();
    seed_catalog(&repo).await;

    // All visible tours have secret=false; filtering on it is a no-op.
    let docs = services::list_tours(&repo, params(&[("secret", "false")]))
        .await
        .unwrap();
    assert_eq!(docs.len(), 12);

    // And asking for secret=true cannot resurface hidden records.
    let docs = services::list_tours(&repo, params(&[("secret", "true")]))
        .await
        .unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn top_tours_alias_presets_parameters() {
    let repo = LocalRepository::new();
    seed_catalog(&repo).await;

    let docs = services::top_tours(&repo, params(&[])).await.unwrap();

    assert_eq!(docs.len(), 5);
    let ratings: Vec<f64> = docs.iter().map(|d| field_f64(d, "ratingsAverage")).collect();
    let mut sorted = ratings.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_eq!(ratings, sorted);

    for doc in &docs {
        let mut keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["difficulty", "id", "name", "price", "ratingsAverage", "summary"]
        );
    }

    // Caller filters still compose with the preset.
    let easy = services::top_tours(&repo, params(&[("difficulty", "easy")]))
        .await
        .unwrap();
    assert!(easy.len() <= 5);
    assert!(easy
        .iter()
        .all(|d| field_str(d, "difficulty") == "easy"));
}
