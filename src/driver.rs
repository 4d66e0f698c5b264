//! Runs the controllers' async side on tokio.
//!
//! Timers and fetches are spawned as tasks that report back over an
//! unbounded channel; the UI loop owns the controllers and applies the
//! resulting [`AppEvent`]s one at a time.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::api::Fetcher;
use crate::listing::ListingRequest;
use crate::search::SearchTicket;
use crate::types::ApiResponse;

#[derive(Debug)]
pub enum AppEvent {
    /// Debounce window for this ticket elapsed
    SearchDue(SearchTicket),
    SearchDone { id: u64, response: ApiResponse },
    ListingDone { request: ListingRequest, response: ApiResponse },
}

pub type SharedFetcher = Arc<dyn Fetcher + Send + Sync>;

pub struct Driver {
    fetcher: SharedFetcher,
    debounce: Duration,
    tx: UnboundedSender<AppEvent>,
    pending_search: Option<JoinHandle<()>>,
}

impl Driver {
    pub fn new(fetcher: SharedFetcher, debounce: Duration, tx: UnboundedSender<AppEvent>) -> Self {
        Self { fetcher, debounce, tx, pending_search: None }
    }

    /// Start the debounce timer for `ticket`, cancelling any pending one.
    pub fn schedule_search(&mut self, ticket: SearchTicket) {
        self.cancel_search();
        let tx = self.tx.clone();
        let delay = self.debounce;
        self.pending_search = Some(tokio::spawn(async move {
            crate::platform::sleep(delay).await;
            let _ = tx.send(AppEvent::SearchDue(ticket));
        }));
    }

    /// Drop the pending debounce timer, if any.
    pub fn cancel_search(&mut self) {
        if let Some(prev) = self.pending_search.take() {
            prev.abort();
        }
    }

    pub fn fetch_search(&self, id: u64, endpoint: String) {
        let tx = self.tx.clone();
        let fetcher = Arc::clone(&self.fetcher);
        tokio::spawn(async move {
            let response = fetcher.fetch(&endpoint).await;
            let _ = tx.send(AppEvent::SearchDone { id, response });
        });
    }

    pub fn fetch_listing(&self, request: ListingRequest) {
        let tx = self.tx.clone();
        let fetcher = Arc::clone(&self.fetcher);
        tokio::spawn(async move {
            let response = fetcher.fetch(request.endpoint()).await;
            let _ = tx.send(AppEvent::ListingDone { request, response });
        });
    }
}
