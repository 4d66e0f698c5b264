//! Search controller.
//!
//! The controller is a synchronous state machine; the host runtime owns the
//! debounce timer and the fetch. Every trigger issues a [`SearchTicket`] with
//! a fresh id. A ticket only turns into a request if no newer trigger arrived
//! before its timer fired, and a response is only applied if its id is still
//! the latest one issued.

use crate::api::Fetcher;
use crate::cards::render_cards;
use crate::constants::messages;
use crate::presenter;
use crate::surface::{Element, RenderTarget};
use crate::types::{ApiResponse, SearchPayload};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    EmptyInput,
    Debouncing,
    Fetching,
    Rendered,
    NoMatch,
    Errored,
}

/// A pending search, handed to the runtime to wait out the debounce window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTicket {
    pub id: u64,
    pub query: String,
}

impl SearchTicket {
    pub fn endpoint(&self) -> String {
        format!("/search?q={}", urlencoding::encode(&self.query))
    }
}

/// Trimmed, lower-cased query text.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Debug)]
pub struct SearchController {
    latest: u64,
    state: SearchState,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    pub fn new() -> Self {
        Self { latest: 0, state: SearchState::Idle }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Id of the most recent trigger.
    pub fn latest_id(&self) -> u64 {
        self.latest
    }

    /// Button click or Enter. Returns the ticket to schedule, or `None` when
    /// the input is empty.
    pub fn trigger(&mut self, raw: &str, target: &mut dyn RenderTarget) -> Option<SearchTicket> {
        let query = normalize_query(raw);
        if query.is_empty() {
            // a blank submit still supersedes whatever is pending
            self.latest += 1;
            // remove-then-add restarts the shake
            target.set_visible(Element::InputShake, false);
            target.set_visible(Element::InputShake, true);
            target.set_text(Element::EmptyInputNotice, messages::EMPTY_INPUT);
            target.set_visible(Element::EmptyInputNotice, true);
            presenter::show_loading(target, false);
            self.state = SearchState::EmptyInput;
            return None;
        }

        presenter::show_loading(target, true);
        target.set_cards(Element::SearchResults, Vec::new());
        self.latest += 1;
        self.state = SearchState::Debouncing;
        log::debug!("[search] trigger #{} q={query:?}", self.latest);
        Some(SearchTicket { id: self.latest, query })
    }

    /// The debounce timer for `ticket` elapsed. Returns the endpoint to fetch
    /// if the ticket was not superseded.
    pub fn fire(&mut self, ticket: &SearchTicket, target: &mut dyn RenderTarget) -> Option<String> {
        if ticket.id != self.latest {
            log::debug!("[search] ticket #{} superseded by #{}", ticket.id, self.latest);
            return None;
        }
        presenter::hide_error(target);
        self.state = SearchState::Fetching;
        Some(ticket.endpoint())
    }

    /// Apply a response. Returns `false` if it belonged to a stale request
    /// and was dropped.
    pub fn complete(&mut self, id: u64, response: ApiResponse, target: &mut dyn RenderTarget) -> bool {
        if id != self.latest {
            log::debug!("[search] dropping stale response #{id} (latest #{})", self.latest);
            return false;
        }

        match response.decode::<SearchPayload>() {
            Err(msg) => {
                presenter::show_error(target, true, Some(&msg), false);
                self.state = SearchState::Errored;
            }
            Ok(payload) if payload.is_match() && !payload.results.is_empty() => {
                presenter::hide_error(target);
                log::info!("[search] #{id}: {} result(s)", payload.results.len());
                target.set_cards(Element::SearchResults, render_cards(&payload.results));
                self.state = SearchState::Rendered;
            }
            Ok(payload) => {
                log::info!("[search] #{id}: no match ({})", payload.message.as_deref().unwrap_or("no results"));
                presenter::show_error(target, true, Some(messages::NO_MATCH), true);
                self.state = SearchState::NoMatch;
            }
        }
        presenter::show_loading(target, false);
        true
    }

    /// Typing clears the inline empty-input notice.
    pub fn input_changed(&mut self, target: &mut dyn RenderTarget) {
        target.set_visible(Element::EmptyInputNotice, false);
    }

    /// The shake animation finished.
    pub fn animation_ended(&mut self, target: &mut dyn RenderTarget) {
        target.set_visible(Element::InputShake, false);
    }

    /// Trigger, fire and complete in one go, skipping the debounce wait.
    pub async fn submit<F>(&mut self, raw: &str, fetcher: &F, target: &mut dyn RenderTarget) -> SearchState
    where
        F: Fetcher + ?Sized,
    {
        let Some(ticket) = self.trigger(raw, target) else {
            return self.state;
        };
        if let Some(endpoint) = self.fire(&ticket, target) {
            let response = fetcher.fetch(&endpoint).await;
            self.complete(ticket.id, response, target);
        }
        self.state
    }
}
