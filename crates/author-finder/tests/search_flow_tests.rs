//! Search, resolution and listing over a live in-memory cache.

mod common;

use std::sync::Arc;
use std::time::Duration;

use author_finder::config::Config;
use author_finder::error::FinderError;
use author_finder::keys::{AuthorId, fingerprint};
use author_finder::pagination::PageSlot;
use author_finder::search::{ProfileLookup, ResultListing, SearchOrchestrator, StaleQueryResolver};

use common::{StubAggregator, author, authors, cache, query};

const LONG: Duration = Duration::from_secs(600);
const SHORT: Duration = Duration::from_millis(150);
const PAST_SHORT: Duration = Duration::from_millis(400);

fn orchestrator(aggregator: StubAggregator, cache: &author_finder::ResultCache) -> SearchOrchestrator {
    SearchOrchestrator::new(Arc::new(aggregator), cache.clone())
}

// =============================================================================
// Orchestrator
// =============================================================================

#[tokio::test]
async fn test_search_caches_records_and_pointers() {
    let cache = cache(LONG, LONG);
    let records = vec![author("Ada Lovelace", "Analytical Engines"), author("Alan Turing", "NPL")];
    let search = orchestrator(StubAggregator::new().with_engine("dblp", records.clone()), &cache);

    let q = query("Lovelace", &["dblp"]);
    let key = search.run(&q).await.unwrap();
    assert_eq!(key, fingerprint(&q));

    let ids = cache.get_query(&key).await.unwrap().unwrap();
    assert_eq!(ids, records.iter().map(AuthorId::of).collect::<Vec<_>>());

    for record in &records {
        let cached = cache.get_author(&AuthorId::of(record)).await.unwrap();
        assert_eq!(cached.as_ref(), Some(record));
    }
}

#[tokio::test]
async fn test_search_concatenates_in_sorted_engine_order() {
    let cache = cache(LONG, LONG);
    let aggregator = StubAggregator::new()
        .with_engine("dblp", vec![author("B", "x")])
        .with_engine("scholar", vec![author("A", "y")]);
    let search = orchestrator(aggregator, &cache);

    let key = search.run(&query("x", &["scholar", "dblp"])).await.unwrap();
    let resolved = StaleQueryResolver::new(cache).resolve(&key).await.unwrap();

    let names: Vec<_> = resolved.authors.iter().map(|a| a.record.display_name()).collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[tokio::test]
async fn test_empty_result_is_cached() {
    let cache = cache(LONG, LONG);
    let search = orchestrator(StubAggregator::new().with_engine("dblp", Vec::new()), &cache);

    let key = search.run(&query("Nobody", &["dblp"])).await.unwrap();
    let ids = cache.get_query(&key).await.unwrap();
    assert_eq!(ids, Some(Vec::new()));
}

#[tokio::test]
async fn test_aggregator_failure_writes_nothing() {
    let cache = cache(LONG, LONG);
    let records = vec![author("Ada Lovelace", "Analytical Engines")];
    let aggregator =
        StubAggregator::new().with_engine("dblp", records.clone()).with_failing_engine("scholar");
    let search = orchestrator(aggregator, &cache);

    let q = query("Lovelace", &["dblp", "scholar"]);
    let err = search.run(&q).await.unwrap_err();
    assert!(matches!(err, FinderError::Aggregator(_)));

    assert_eq!(cache.get_query(&fingerprint(&q)).await.unwrap(), None);
    assert_eq!(cache.get_author(&AuthorId::of(&records[0])).await.unwrap(), None);
}

#[tokio::test]
async fn test_invalid_query_never_reaches_aggregator() {
    let cache = cache(LONG, LONG);
    let aggregator = Arc::new(StubAggregator::new().with_engine("dblp", Vec::new()));
    let search = SearchOrchestrator::new(aggregator.clone(), cache);

    let err = search.run(&query("", &["dblp"])).await.unwrap_err();
    assert!(matches!(err, FinderError::Validation { .. }));

    let err = search.run(&query("Lovelace", &[])).await.unwrap_err();
    assert!(matches!(err, FinderError::Validation { ref field, .. } if field == "engines"));

    let err = search.run(&query("Lovelace", &["bing"])).await.unwrap_err();
    assert!(err.to_user_message().contains("bing"));

    assert_eq!(aggregator.calls(), 0);
}

#[tokio::test]
async fn test_repeat_search_overwrites_entry() {
    let cache = cache(LONG, LONG);
    let search = orchestrator(StubAggregator::new().with_engine("dblp", authors("A", 3)), &cache);

    let q = query("A", &["dblp"]);
    let first = search.run(&q).await.unwrap();
    let second = search.run(&q).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(cache.get_query(&first).await.unwrap().map(|ids| ids.len()), Some(3));
}

// =============================================================================
// Expiry and partial recovery
// =============================================================================

#[tokio::test]
async fn test_query_expired_while_authors_alive() {
    let cache = cache(SHORT, LONG);
    let records = authors("Author", 3);
    let search = orchestrator(StubAggregator::new().with_engine("dblp", records.clone()), &cache);

    let key = search.run(&query("Author", &["dblp"])).await.unwrap();
    tokio::time::sleep(PAST_SHORT).await;

    let err = StaleQueryResolver::new(cache.clone()).resolve(&key).await.unwrap_err();
    assert!(matches!(err, FinderError::QueryExpired));

    // Author entries outlive the query and remain reachable directly.
    let profile = ProfileLookup::new(cache).fetch(&AuthorId::of(&records[0])).await.unwrap();
    assert_eq!(profile, records[0]);
}

#[tokio::test]
async fn test_partial_author_expiry_keeps_order() {
    let cache = cache(LONG, LONG);
    let records = authors("Author", 3);
    let search = orchestrator(StubAggregator::new().with_engine("dblp", records.clone()), &cache);
    let key = search.run(&query("Author", &["dblp"])).await.unwrap();

    // Rewrite the middle record with a short TTL.
    let middle = AuthorId::of(&records[1]);
    let payload = serde_json::to_string(&records[1]).unwrap();
    cache.put(middle.as_str(), payload, SHORT).await;
    tokio::time::sleep(PAST_SHORT).await;

    let resolved = StaleQueryResolver::new(cache.clone()).resolve(&key).await.unwrap();
    assert!(resolved.is_partial());
    assert_eq!(resolved.dropped, vec![1]);
    let kept: Vec<_> = resolved.authors.iter().map(|a| a.record.clone()).collect();
    assert_eq!(kept, vec![records[0].clone(), records[2].clone()]);

    let err = ProfileLookup::new(cache).fetch(&middle).await.unwrap_err();
    assert!(matches!(err, FinderError::ProfileExpired { ref id } if id == middle.as_str()));
}

#[tokio::test]
async fn test_rewrite_restarts_ttl() {
    let cache = cache(Duration::from_millis(300), LONG);
    let search = orchestrator(StubAggregator::new().with_engine("dblp", authors("A", 1)), &cache);
    let q = query("A", &["dblp"]);

    let key = search.run(&q).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    search.run(&q).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // 400ms after the first write, 200ms after the second.
    assert!(cache.get_query(&key).await.unwrap().is_some());
}

#[tokio::test]
async fn test_malformed_token_is_expired() {
    let resolver = StaleQueryResolver::new(cache(LONG, LONG));
    for token in [None, Some(""), Some("not-a-key"), Some("q1-zz")] {
        let err = resolver.resolve_token(token).await.unwrap_err();
        assert!(matches!(err, FinderError::QueryExpired), "token {token:?}");
    }
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_listing_pages() {
    let cache = cache(LONG, LONG);
    let records = authors("Author", 117);
    let search = orchestrator(StubAggregator::new().with_engine("dblp", records.clone()), &cache);
    let key = search.run(&query("Author", &["dblp"])).await.unwrap();

    let listing = ResultListing::new(cache, &Config::default());

    let first = listing.page(&key, 1).await.unwrap();
    assert_eq!(first.window.pages(), 12);
    assert_eq!(first.authors.len(), 10);
    assert_eq!(first.authors[0].name, "Author 0");
    assert!(!first.window.has_prev());
    assert!(first.window.has_next());

    let last = listing.page(&key, 12).await.unwrap();
    assert_eq!(last.authors.len(), 7);
    assert_eq!(last.authors[6].name, "Author 116");
    assert!(!last.window.has_next());

    let fifth = listing.page(&key, 5).await.unwrap();
    assert_eq!(fifth.slots[8], PageSlot::Page(9));
    assert_eq!(fifth.slots[9], PageSlot::Gap);
    assert_eq!(fifth.authors[0].name, "Author 40");
}

#[tokio::test]
async fn test_listing_page_out_of_range() {
    let cache = cache(LONG, LONG);
    let search = orchestrator(StubAggregator::new().with_engine("dblp", authors("A", 25)), &cache);
    let key = search.run(&query("A", &["dblp"])).await.unwrap();
    let listing = ResultListing::new(cache, &Config::default());

    let err = listing.page(&key, 4).await.unwrap_err();
    assert!(matches!(err, FinderError::PageOutOfRange { page: 4, pages: 3 }));

    let err = listing.page(&key, 0).await.unwrap_err();
    assert!(matches!(err, FinderError::Validation { .. }));
}

#[tokio::test]
async fn test_listing_empty_results() {
    let cache = cache(LONG, LONG);
    let search = orchestrator(StubAggregator::new().with_engine("dblp", Vec::new()), &cache);
    let key = search.run(&query("Nobody", &["dblp"])).await.unwrap();
    let listing = ResultListing::new(cache, &Config::default());

    let page = listing.page(&key, 1).await.unwrap();
    assert!(page.authors.is_empty());
    assert!(page.slots.is_empty());
    assert_eq!(page.window.pages(), 0);

    assert!(matches!(
        listing.page(&key, 2).await.unwrap_err(),
        FinderError::PageOutOfRange { page: 2, pages: 0 }
    ));
}

#[tokio::test]
async fn test_listing_uses_default_image() {
    let cache = cache(LONG, LONG);
    let mut with_image = author("Grace Hopper", "Navy");
    with_image.image = Some("https://example.org/grace.png".to_string());
    let records = vec![with_image, author("Ada Lovelace", "Analytical Engines")];
    let search = orchestrator(StubAggregator::new().with_engine("dblp", records), &cache);
    let key = search.run(&query("x", &["dblp"])).await.unwrap();

    let config = Config::default();
    let page = ResultListing::new(cache, &config).page(&key, 1).await.unwrap();
    assert_eq!(page.authors[0].image, "https://example.org/grace.png");
    assert_eq!(page.authors[1].image, config.default_image);
}

#[tokio::test]
async fn test_listing_reports_dropped_records() {
    let cache = cache(LONG, LONG);
    let records = authors("Author", 3);
    let search = orchestrator(StubAggregator::new().with_engine("dblp", records.clone()), &cache);
    let key = search.run(&query("Author", &["dblp"])).await.unwrap();

    let payload = serde_json::to_string(&records[0]).unwrap();
    cache.put(AuthorId::of(&records[0]).as_str(), payload, SHORT).await;
    tokio::time::sleep(PAST_SHORT).await;

    let page = ResultListing::new(cache, &Config::default()).page(&key, 1).await.unwrap();
    assert_eq!(page.window.total_count, 2);
    assert_eq!(page.dropped, vec![0]);
    assert!(page.warning().unwrap().contains("1 result"));
}
