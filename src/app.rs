use std::time::{Duration, Instant};

use crate::config::Config;
use crate::constants::{app as timing, messages};
use crate::driver::{AppEvent, Driver};
use crate::listing::{ListingController, PageState};
use crate::search::{SearchController, SearchState};
use crate::surface::{Card, Element};
use crate::theme::Theme;
use crate::view::ViewModel;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pane {
    Search,
    Listing,
}

/// Terminal front end state.
///
/// Owns both controllers and the view model they render into. Keys call the
/// methods below; async completions come back through [`App::on_event`].
pub struct App {
    quit: bool,
    pane: Pane,
    input: String,

    view: ViewModel,
    search: SearchController,
    listing: ListingController,
    driver: Driver,

    sel_search: usize,
    sel_listing: usize,

    fps: u32,
    api_url: String,
    theme: Theme,

    // Input shake mark clears itself once this passes
    shake_until: Option<Instant>,

    // Toast notification state
    toast_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(cfg: &Config, driver: Driver) -> Self {
        Self {
            quit: false,
            pane: Pane::Search,
            input: String::new(),
            view: ViewModel::new(),
            search: SearchController::new(),
            listing: ListingController::new(cfg.page_size),
            driver,
            sel_search: 0,
            sel_listing: 0,
            fps: cfg.render_fps,
            api_url: cfg.api_url.clone(),
            theme: Theme::default(),
            shake_until: None,
            toast_message: None,
        }
    }

    /// Kick off the first listing page.
    pub fn start(&mut self) {
        let req = self.listing.init();
        self.driver.fetch_listing(req);
    }

    pub fn fps(&self) -> u32 { self.fps }
    pub fn quit_flag(&self) -> bool { self.quit }
    pub fn quit(&mut self) { self.quit = true; }
    pub fn pane(&self) -> Pane { self.pane }
    pub fn input(&self) -> &str { &self.input }
    pub fn view(&self) -> &ViewModel { &self.view }
    pub fn theme(&self) -> &Theme { &self.theme }
    pub fn api_url(&self) -> &str { &self.api_url }
    pub fn search_state(&self) -> SearchState { self.search.state() }
    pub fn page_state(&self) -> &PageState { self.listing.state() }

    pub fn selection(&self, pane: Pane) -> usize {
        match pane {
            Pane::Search => self.sel_search,
            Pane::Listing => self.sel_listing,
        }
    }

    pub fn cards(&self, pane: Pane) -> &[Card] {
        match pane {
            Pane::Search => self.view.cards(Element::SearchResults),
            Pane::Listing => self.view.cards(Element::Listing),
        }
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards(self.pane).get(self.selection(self.pane))
    }

    pub fn toggle_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Search => Pane::Listing,
            Pane::Listing => Pane::Search,
        };
    }

    pub fn focus(&mut self, pane: Pane) {
        self.pane = pane;
    }

    // ----- search input -----

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.search.input_changed(&mut self.view);
    }

    pub fn backspace(&mut self) {
        if self.input.pop().is_some() {
            self.search.input_changed(&mut self.view);
        }
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.search.input_changed(&mut self.view);
    }

    /// Enter in the search box.
    pub fn submit_search(&mut self) {
        match self.search.trigger(&self.input, &mut self.view) {
            Some(ticket) => {
                self.sel_search = 0;
                self.driver.schedule_search(ticket);
            }
            None => {
                self.driver.cancel_search();
                self.shake_until = Some(Instant::now() + Duration::from_millis(timing::SHAKE_MS));
            }
        }
    }

    // ----- listing -----

    pub fn next_page(&mut self) {
        if let Some(req) = self.listing.next(&self.view) {
            self.driver.fetch_listing(req);
        }
    }

    pub fn prev_page(&mut self) {
        if let Some(req) = self.listing.previous(&self.view) {
            self.driver.fetch_listing(req);
        }
    }

    pub fn reload_listing(&mut self) {
        let req = self.listing.reload();
        self.driver.fetch_listing(req);
    }

    // ----- selection -----

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.cards(self.pane).len();
        let sel = match self.pane {
            Pane::Search => &mut self.sel_search,
            Pane::Listing => &mut self.sel_listing,
        };
        if len == 0 {
            *sel = 0;
            return;
        }
        *sel = sel.saturating_add_signed(delta).min(len - 1);
    }

    /// Copy the selected card's link; returns the link that was copied.
    pub fn copy_selected(&mut self) -> Option<String> {
        let href = self.selected_card()?.href.clone();
        if crate::platform::copy_to_clipboard(&href) {
            self.show_toast(messages::COPY_LINK.to_string());
            Some(href)
        } else {
            self.show_toast(messages::COPY_FAILED.to_string());
            None
        }
    }

    // ----- events -----

    pub fn on_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::SearchDue(ticket) => {
                if let Some(endpoint) = self.search.fire(&ticket, &mut self.view) {
                    self.driver.fetch_search(ticket.id, endpoint);
                }
            }
            AppEvent::SearchDone { id, response } => {
                if self.search.complete(id, response, &mut self.view) {
                    self.sel_search = 0;
                }
            }
            AppEvent::ListingDone { request, response } => {
                if self.listing.complete(&request, response, &mut self.view) {
                    self.sel_listing = 0;
                }
            }
        }
    }

    /// Time-driven housekeeping, called once per frame.
    pub fn tick(&mut self) {
        if self.shake_until.is_some_and(|t| Instant::now() >= t) {
            self.shake_until = None;
            self.search.animation_ended(&mut self.view);
        }
    }

    /// Show a toast notification for a couple of seconds
    pub fn show_toast(&mut self, msg: String) {
        self.toast_message = Some((msg, Instant::now()));
    }

    /// Get current toast message if still active
    pub fn toast_message(&self) -> Option<&str> {
        self.toast_message.as_ref().and_then(|(msg, time)| {
            (time.elapsed() < Duration::from_secs(timing::TOAST_DURATION_SECS)).then_some(msg.as_str())
        })
    }
}
