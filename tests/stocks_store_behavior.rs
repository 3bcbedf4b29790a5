//! Behavior-driven tests for the paged stocks store.
//!
//! The store is driven through its public actions against a scripted API,
//! then its snapshot and the requests it produced are inspected.

use tickerdash_core::{SortField, SortOrder, StocksStore, ViewMode};
use tickerdash_tests::{error_json, page_json, scripted_api, search_json, HttpMethod, BASE_URL};

// =============================================================================
// Mode selection
// =============================================================================

#[tokio::test]
async fn when_no_query_or_filter_is_set_the_store_lists_by_sort() {
    // Given
    let (client, api) = scripted_api();
    client.respond(200, page_json(3, 3));
    let store = StocksStore::new(api);
    store.set_sort(SortField::Ticker);
    store.set_order(SortOrder::Asc);

    // When
    store.fetch().await;

    // Then
    let state = store.snapshot();
    assert_eq!(state.mode, ViewMode::List);
    assert_eq!(state.items.len(), 3);
    assert_eq!(state.total, 3);
    assert!(!state.loading);
    assert!(state.error.is_none());

    let sent = &client.requests()[0];
    assert_eq!(sent.method, HttpMethod::Get);
    assert_eq!(sent.url, format!("{BASE_URL}/stocks"));
    assert_eq!(sent.query_value("sort"), Some("ticker"));
    assert_eq!(sent.query_value("order"), Some("asc"));
    assert_eq!(sent.query_value("limit"), Some("20"));
}

#[tokio::test]
async fn when_a_query_is_set_search_wins_and_offset_resets() {
    // Given: a list session already on page three
    let (client, api) = scripted_api();
    client
        .respond(200, page_json(20, 60))
        .respond(200, page_json(20, 60))
        .respond(200, page_json(20, 60))
        .respond(200, search_json("AAPL", 2));
    let store = StocksStore::new(api);
    store.fetch().await;
    store.next_page();
    store.fetch().await;
    store.next_page();
    store.fetch().await;
    assert_eq!(store.snapshot().params.offset, 40);

    // When: a search term arrives alongside an active filter
    store.set_action_filter("upgraded by");
    store.set_query("  AAPL ");
    store.fetch().await;

    // Then: search takes priority and sends the trimmed term
    let state = store.snapshot();
    assert_eq!(state.mode, ViewMode::Search);
    assert_eq!(state.params.offset, 0);
    assert_eq!(state.total, 2);

    let sent = client.requests();
    let search = &sent[3];
    assert_eq!(search.url, format!("{BASE_URL}/stocks/search"));
    assert_eq!(search.query_value("q"), Some("AAPL"));
    assert_eq!(search.query_value("limit"), Some("20"));
    assert_eq!(search.query_value("offset"), None);
}

#[tokio::test]
async fn when_a_page_advance_precedes_the_first_search_fetch_offset_still_resets() {
    // Given: a list page, then a query typed and a page advanced before refetching
    let (client, api) = scripted_api();
    client
        .respond(200, page_json(20, 100))
        .respond(200, search_json("AAPL", 2));
    let store = StocksStore::new(api);
    store.fetch().await;
    store.set_query("AAPL");
    assert!(store.next_page());
    assert_eq!(store.snapshot().params.offset, 20);

    // When
    store.fetch().await;

    // Then: the search result always lands on offset zero
    let state = store.snapshot();
    assert_eq!(state.mode, ViewMode::Search);
    assert_eq!(state.params.offset, 0);
    assert_eq!(state.total, 2);
    assert_eq!(client.requests()[1].url, format!("{BASE_URL}/stocks/search"));
}

#[tokio::test]
async fn when_only_an_action_filter_is_set_only_action_is_sent() {
    // Given
    let (client, api) = scripted_api();
    client.respond(
        200,
        r#"{"filters":{"action":"upgraded by","rating":""},"data":[],
        "total":0,"limit":20,"offset":0}"#,
    );
    let store = StocksStore::new(api);
    store.set_action_filter("upgraded by");

    // When
    store.fetch().await;

    // Then
    let state = store.snapshot();
    assert_eq!(state.mode, ViewMode::Filter);
    assert!(state.error.is_none());

    let sent = &client.requests()[0];
    assert_eq!(sent.url, format!("{BASE_URL}/stocks/filter"));
    assert_eq!(sent.query_value("action"), Some("upgraded by"));
    assert_eq!(sent.query_value("rating"), None);
    assert_eq!(sent.query_value("offset"), Some("0"));
}

#[tokio::test]
async fn when_filters_are_whitespace_the_store_reports_the_missing_filter_error() {
    // Given
    let (client, api) = scripted_api();
    let store = StocksStore::new(api);
    store.set_rating_filter("   ");

    // When
    store.fetch().await;

    // Then: filter mode is chosen, but no request leaves the client
    let state = store.snapshot();
    assert_eq!(state.mode, ViewMode::Filter);
    assert_eq!(
        state.error.as_deref(),
        Some("At least one filter (action or rating) is required")
    );
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn when_filters_are_cleared_the_store_returns_to_list_mode() {
    // Given
    let (client, api) = scripted_api();
    client.respond(200, page_json(1, 1));
    let store = StocksStore::new(api);
    store.set_action_filter("downgraded by");
    store.set_rating_filter("Sell");

    // When
    store.clear_filters();
    store.fetch().await;

    // Then
    assert_eq!(store.snapshot().mode, ViewMode::List);
    assert_eq!(client.requests()[0].url, format!("{BASE_URL}/stocks"));
}

// =============================================================================
// Failure handling
// =============================================================================

#[tokio::test]
async fn when_a_fetch_fails_previous_items_survive_and_error_is_set() {
    // Given: a loaded first page
    let (client, api) = scripted_api();
    client
        .respond(200, page_json(5, 5))
        .respond(400, error_json("invalid sort field"));
    let store = StocksStore::new(api);
    store.fetch().await;

    // When
    store.set_sort(SortField::Brokerage);
    store.fetch().await;

    // Then
    let state = store.snapshot();
    assert_eq!(state.items.len(), 5);
    assert_eq!(state.total, 5);
    assert_eq!(state.error.as_deref(), Some("invalid sort field"));
    assert!(!state.loading);
}

#[tokio::test]
async fn when_a_later_fetch_succeeds_the_error_is_cleared() {
    // Given
    let (client, api) = scripted_api();
    client
        .respond(404, "")
        .respond(200, page_json(2, 2));
    let store = StocksStore::new(api);
    store.fetch().await;
    assert_eq!(
        store.snapshot().error.as_deref(),
        Some("Request failed with status code 404")
    );

    // When
    store.fetch().await;

    // Then
    let state = store.snapshot();
    assert!(state.error.is_none());
    assert_eq!(state.items.len(), 2);
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn when_paging_through_45_records_the_last_page_starts_at_40() {
    // Given
    let (client, api) = scripted_api();
    client
        .respond(200, page_json(20, 45))
        .respond(200, page_json(20, 45))
        .respond(200, page_json(5, 45));
    let store = StocksStore::new(api);
    store.fetch().await;

    // When / Then: two advances are allowed, the third is refused
    assert_eq!(store.snapshot().total_pages(), 3);
    assert!(store.next_page());
    store.fetch().await;
    assert_eq!(store.snapshot().params.offset, 20);
    assert_eq!(store.snapshot().current_page(), 2);

    assert!(store.next_page());
    store.fetch().await;
    let state = store.snapshot();
    assert_eq!(state.params.offset, 40);
    assert_eq!(state.current_page(), 3);
    assert!(!state.can_go_next());

    assert!(!store.next_page());
    assert_eq!(store.snapshot().params.offset, 40);

    let offsets: Vec<_> = client
        .requests()
        .iter()
        .map(|request| request.query_value("offset").map(str::to_owned))
        .collect();
    assert_eq!(
        offsets,
        vec![
            Some(String::from("0")),
            Some(String::from("20")),
            Some(String::from("40"))
        ]
    );
}

#[tokio::test]
async fn when_paging_changes_offset_no_request_is_made() {
    // Given
    let (client, api) = scripted_api();
    client.respond(200, page_json(20, 100));
    let store = StocksStore::new(api);
    store.fetch().await;

    // When
    assert!(store.next_page());

    // Then
    assert_eq!(client.request_count(), 1);
    assert_eq!(store.snapshot().params.offset, 20);
}

#[tokio::test]
async fn when_on_the_first_page_prev_page_is_refused() {
    // Given
    let (client, api) = scripted_api();
    client.respond(200, page_json(20, 100));
    let store = StocksStore::new(api);
    store.fetch().await;

    // When / Then
    assert!(!store.snapshot().can_go_prev());
    assert!(!store.prev_page());

    assert!(store.next_page());
    assert!(store.snapshot().can_go_prev());
    assert!(store.prev_page());
    assert_eq!(store.snapshot().params.offset, 0);
}

#[tokio::test]
async fn when_any_parameter_changes_offset_resets_to_zero() {
    // Given: a store advanced to offset 20
    let (client, api) = scripted_api();
    client.respond(200, page_json(20, 100));
    let store = StocksStore::new(api);
    store.fetch().await;

    let setters: Vec<Box<dyn Fn(&StocksStore)>> = vec![
        Box::new(|s: &StocksStore| s.set_sort(SortField::Company)),
        Box::new(|s: &StocksStore| s.set_order(SortOrder::Asc)),
        Box::new(|s: &StocksStore| s.set_query("MSFT")),
        Box::new(|s: &StocksStore| s.set_action_filter("reiterated by")),
        Box::new(|s: &StocksStore| s.set_rating_filter("Buy")),
        Box::new(|s: &StocksStore| s.clear_filters()),
        Box::new(|s: &StocksStore| s.set_limit(50)),
    ];

    for apply in setters {
        // When
        assert!(store.next_page());
        assert_eq!(store.snapshot().params.offset, 20);
        apply(&store);

        // Then
        assert_eq!(store.snapshot().params.offset, 0);
    }

    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn when_limit_is_out_of_range_it_is_clamped() {
    // Given
    let (_client, api) = scripted_api();
    let store = StocksStore::new(api);

    // When / Then
    store.set_limit(500);
    assert_eq!(store.snapshot().params.limit, 200);
    store.set_limit(0);
    assert_eq!(store.snapshot().params.limit, 1);
}

#[tokio::test]
async fn when_total_is_zero_there_is_still_one_page() {
    // Given
    let (client, api) = scripted_api();
    client.respond(200, page_json(0, 0));
    let store = StocksStore::new(api);

    // When
    store.fetch().await;

    // Then
    let state = store.snapshot();
    assert_eq!(state.total_pages(), 1);
    assert_eq!(state.current_page(), 1);
    assert!(!state.can_go_next());
}

// =============================================================================
// Observation
// =============================================================================

#[tokio::test]
async fn when_a_fetch_runs_subscribers_see_the_final_state() {
    // Given
    let (client, api) = scripted_api();
    client.respond(200, page_json(4, 4));
    let store = StocksStore::new(api);
    let mut changes = store.subscribe();

    // When
    store.fetch().await;

    // Then
    assert!(changes.has_changed().expect("store alive"));
    let seen = changes.borrow_and_update().clone();
    assert!(!seen.loading);
    assert_eq!(seen.items.len(), 4);
}
