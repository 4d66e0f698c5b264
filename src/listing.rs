//! Paginated "all libraries" listing.
//!
//! The requested page travels with its [`ListingRequest`] and is only
//! committed to [`PageState`] once a non-error response for it arrives, so a
//! run of failed fetches never moves the counter away from what is on screen.

use crate::api::Fetcher;
use crate::cards::render_cards;
use crate::presenter;
use crate::surface::{Element, RenderTarget};
use crate::types::{ApiResponse, ListingPage};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
    pub total_results: u64,
    /// Only known when the server reports it
    pub total_pages: Option<u32>,
}

impl Default for PageState {
    fn default() -> Self {
        Self { current_page: 1, has_next: false, has_prev: false, total_results: 0, total_pages: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingRequest {
    pub id: u64,
    /// `None` for the initial load, which omits the page parameter
    pub page: Option<u32>,
    endpoint: String,
}

impl ListingRequest {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn requested_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

fn listing_endpoint(page: Option<u32>, page_size: Option<u32>) -> String {
    let mut params = Vec::with_capacity(2);
    if let Some(p) = page {
        params.push(format!("page={p}"));
    }
    if let Some(lim) = page_size {
        params.push(format!("lim={lim}"));
    }
    if params.is_empty() {
        "/all".to_string()
    } else {
        format!("/all?{}", params.join("&"))
    }
}

pub fn listing_label(total: u64) -> String {
    format!("listing {total} libraries")
}

#[derive(Debug)]
pub struct ListingController {
    state: PageState,
    page_size: Option<u32>,
    latest: u64,
    loaded: bool,
}

impl ListingController {
    pub fn new(page_size: Option<u32>) -> Self {
        Self { state: PageState::default(), page_size, latest: 0, loaded: false }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Whether at least one page has been rendered.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn request(&mut self, page: Option<u32>) -> ListingRequest {
        self.latest += 1;
        let endpoint = listing_endpoint(page, self.page_size);
        log::debug!("[listing] request #{} {endpoint}", self.latest);
        ListingRequest { id: self.latest, page, endpoint }
    }

    /// First page, no explicit page parameter.
    pub fn init(&mut self) -> ListingRequest {
        self.request(None)
    }

    pub fn next(&mut self, target: &dyn RenderTarget) -> Option<ListingRequest> {
        if target.is_disabled(Element::NextButtons) || !self.state.has_next {
            return None;
        }
        let page = self.state.current_page.saturating_add(1);
        Some(self.request(Some(page)))
    }

    pub fn previous(&mut self, target: &dyn RenderTarget) -> Option<ListingRequest> {
        if target.is_disabled(Element::PrevButtons) || !self.state.has_prev || self.state.current_page <= 1 {
            return None;
        }
        let page = self.state.current_page - 1;
        Some(self.request(Some(page)))
    }

    /// Re-fetch what is on screen; the retry path after a failure.
    pub fn reload(&mut self) -> ListingRequest {
        if self.loaded {
            self.request(Some(self.state.current_page))
        } else {
            self.init()
        }
    }

    /// Apply a response. Returns `false` if a newer request superseded it.
    pub fn complete(&mut self, req: &ListingRequest, response: ApiResponse, target: &mut dyn RenderTarget) -> bool {
        if req.id != self.latest {
            log::debug!("[listing] dropping stale response #{} (latest #{})", req.id, self.latest);
            return false;
        }

        match response.decode::<ListingPage>() {
            Err(msg) => {
                log::warn!("[listing] {} failed: {msg}", req.endpoint);
                presenter::show_error(target, true, Some(&msg), false);
                if !self.loaded {
                    // nothing on screen yet: no page to move to either way
                    self.sync_controls(target);
                }
            }
            Ok(page) => {
                presenter::hide_error(target);
                self.state = PageState {
                    current_page: page.page.filter(|p| *p >= 1).unwrap_or(req.requested_page()),
                    has_next: page.has_next,
                    has_prev: page.has_prev,
                    total_results: page.total_results.unwrap_or(self.state.total_results),
                    total_pages: page.total_pages.or(self.state.total_pages),
                };
                self.loaded = true;
                log::info!(
                    "[listing] page {} ({} cards, next={} prev={})",
                    self.state.current_page,
                    page.results.len(),
                    self.state.has_next,
                    self.state.has_prev
                );
                target.set_cards(Element::Listing, render_cards(&page.results));
                self.sync_controls(target);
                target.set_text(Element::PageFields, &self.state.current_page.to_string());
                target.set_text(Element::ListingLabel, &listing_label(self.state.total_results));
            }
        }
        true
    }

    fn sync_controls(&self, target: &mut dyn RenderTarget) {
        target.set_disabled(Element::PrevButtons, !self.state.has_prev);
        target.set_disabled(Element::NextButtons, !self.state.has_next);
    }

    /// Fetch and apply one request.
    pub async fn load<F>(&mut self, req: ListingRequest, fetcher: &F, target: &mut dyn RenderTarget) -> bool
    where
        F: Fetcher + ?Sized,
    {
        let response = fetcher.fetch(req.endpoint()).await;
        self.complete(&req, response, target)
    }
}
