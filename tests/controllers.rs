//! End-to-end controller scenarios over a canned fetcher and the in-memory view.

use std::collections::HashMap;
use std::sync::Mutex;

use haveit::api::Fetcher;
use haveit::constants::cards::PLACEHOLDER_HREF;
use haveit::constants::messages;
use haveit::listing::ListingController;
use haveit::search::{SearchController, SearchState};
use haveit::surface::{Element, RenderTarget};
use haveit::types::ApiResponse;
use haveit::view::ViewModel;
use serde_json::json;

/// Answers from a fixed endpoint table and records every call.
#[derive(Default)]
struct CannedFetcher {
    routes: HashMap<String, ApiResponse>,
    calls: Mutex<Vec<String>>,
}

impl CannedFetcher {
    fn route(mut self, endpoint: &str, response: ApiResponse) -> Self {
        self.routes.insert(endpoint.to_string(), response);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Fetcher for CannedFetcher {
    async fn fetch(&self, endpoint: &str) -> ApiResponse {
        self.calls.lock().unwrap().push(endpoint.to_string());
        self.routes
            .get(endpoint)
            .cloned()
            .unwrap_or_else(|| ApiResponse::Error(messages::NOTHING_FOUND.to_string()))
    }
}

fn listing_page(names: &[&str], page: u32, has_next: bool, has_prev: bool) -> ApiResponse {
    let results: Vec<_> = names.iter().map(|n| json!({"name": n, "desc": format!("{n} desc")})).collect();
    ApiResponse::Body(json!({
        "results": results, "has_next": has_next, "has_prev": has_prev,
        "page": page, "total_results": 42
    }))
}

#[tokio::test]
async fn search_hit_renders_one_card() {
    let fetcher = CannedFetcher::default().route(
        "/search?q=numpy",
        ApiResponse::Body(json!({"response": "true", "results": [{"name": "numpy", "desc": "arrays", "link": "https://x"}]})),
    );
    let mut view = ViewModel::new();
    let mut search = SearchController::new();

    let state = search.submit("  NumPy ", &fetcher, &mut view).await;

    assert_eq!(state, SearchState::Rendered);
    let cards = view.cards(Element::SearchResults);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "numpy");
    assert_eq!(cards[0].href, "https://x");
    assert!(cards[0].new_tab);
    assert_eq!(view.banner(), None);
    assert!(!view.is_visible(Element::Loading));
}

#[tokio::test]
async fn search_miss_shows_suggest_banner() {
    let fetcher = CannedFetcher::default()
        .route("/search?q=xyzzy", ApiResponse::Body(json!({"response": "false", "results": []})));
    let mut view = ViewModel::new();
    let mut search = SearchController::new();

    search.submit("xyzzy", &fetcher, &mut view).await;

    assert_eq!(view.banner(), Some(messages::NO_MATCH));
    assert!(view.is_visible(Element::SuggestButton));
    assert!(view.cards(Element::SearchResults).is_empty());
}

#[tokio::test]
async fn empty_search_makes_no_request() {
    let fetcher = CannedFetcher::default();
    let mut view = ViewModel::new();
    let mut search = SearchController::new();

    let state = search.submit("   ", &fetcher, &mut view).await;

    assert_eq!(state, SearchState::EmptyInput);
    assert!(fetcher.calls().is_empty());
    assert!(view.is_visible(Element::EmptyInputNotice));
    assert_eq!(view.banner(), None);
}

#[tokio::test]
async fn every_search_ends_in_cards_or_banner() {
    let fetcher = CannedFetcher::default()
        .route("/search?q=a", ApiResponse::Body(json!({"response": "true", "results": [{"name": "a"}]})))
        .route("/search?q=b", ApiResponse::Body(json!({"response": "true", "results": []})))
        .route("/search?q=c", ApiResponse::Body(json!([1, 2, 3])))
        .route("/search?q=d", ApiResponse::Error(messages::OFFLINE.to_string()));

    for q in ["a", "b", "c", "d", "e"] {
        let mut view = ViewModel::new();
        let mut search = SearchController::new();
        search.submit(q, &fetcher, &mut view).await;

        let has_cards = !view.cards(Element::SearchResults).is_empty();
        let has_banner = view.banner().is_some();
        assert!(has_cards ^ has_banner, "query {q:?}: cards={has_cards} banner={has_banner}");
    }
}

#[tokio::test]
async fn initial_listing_load() {
    let fetcher = CannedFetcher::default().route("/all", listing_page(&["a", "b", "c"], 1, true, false));
    let mut view = ViewModel::new();
    let mut listing = ListingController::new(None);

    let req = listing.init();
    assert!(listing.load(req, &fetcher, &mut view).await);

    assert_eq!(view.cards(Element::Listing).len(), 3);
    assert!(!view.is_disabled(Element::NextButtons));
    assert!(view.is_disabled(Element::PrevButtons));
    assert!(view.text(Element::ListingLabel).contains("42"));
    assert_eq!(view.text(Element::PageFields), "1");
}

#[tokio::test]
async fn paging_forward_and_back() {
    let fetcher = CannedFetcher::default()
        .route("/all", listing_page(&["a"], 1, true, false))
        .route("/all?page=2", listing_page(&["b"], 2, false, true))
        .route("/all?page=1", listing_page(&["a"], 1, true, false));
    let mut view = ViewModel::new();
    let mut listing = ListingController::new(None);

    let req = listing.init();
    listing.load(req, &fetcher, &mut view).await;

    let req = listing.next(&view).unwrap();
    listing.load(req, &fetcher, &mut view).await;
    assert_eq!(listing.state().current_page, 2);
    assert_eq!(view.cards(Element::Listing)[0].title, "b");

    // no next page: clicking next sends nothing
    assert!(listing.next(&view).is_none());

    let req = listing.previous(&view).unwrap();
    listing.load(req, &fetcher, &mut view).await;
    assert_eq!(listing.state().current_page, 1);

    assert_eq!(fetcher.calls(), vec!["/all", "/all?page=2", "/all?page=1"]);
}

#[tokio::test]
async fn offline_listing_shows_banner_and_disables_navigation() {
    let fetcher = CannedFetcher::default().route("/all", ApiResponse::Error(messages::OFFLINE.to_string()));
    let mut view = ViewModel::new();
    let mut listing = ListingController::new(None);

    let req = listing.init();
    listing.load(req, &fetcher, &mut view).await;

    assert_eq!(view.banner(), Some(messages::OFFLINE));
    assert!(view.is_disabled(Element::NextButtons));
    assert!(view.is_disabled(Element::PrevButtons));
    assert!(listing.next(&view).is_none());
    assert!(!listing.is_loaded());
}

#[tokio::test]
async fn mistyped_fields_keep_the_rest_of_the_card() {
    let fetcher = CannedFetcher::default().route(
        "/all",
        ApiResponse::Body(json!({
            "results": [
                {"name": "numpy", "desc": "arrays", "link": 123},
                {"name": "pandas", "desc": "frames", "category": ["data"]}
            ],
            "has_next": null, "has_prev": null
        })),
    );
    let mut view = ViewModel::new();
    let mut listing = ListingController::new(None);

    let req = listing.init();
    listing.load(req, &fetcher, &mut view).await;

    let cards = view.cards(Element::Listing);
    let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
    let bodies: Vec<_> = cards.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(titles, vec!["numpy", "pandas"]);
    assert_eq!(bodies, vec!["arrays", "frames"]);
    assert_eq!(cards[0].href, PLACEHOLDER_HREF);
    assert_eq!(cards[1].category, None);
    assert_eq!(view.banner(), None);
}
