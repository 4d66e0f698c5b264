//! haveit - search and browse a catalog of libraries
//!
//! Client for a catalog API that answers `GET /search?q=` and a paginated
//! `GET /all`. The controllers (search with debounce, listing with
//! pagination) are plain state machines that render through the
//! [`surface::RenderTarget`] trait, so the same logic drives both front ends.
//!
//! ## Architecture
//!
//! haveit is built to work in two modes:
//! - **Native**: Terminal UI using crossterm and ratatui
//! - **Web**: Browser DOM bound through web-sys
//!
//! ## Usage
//!
//! For native builds:
//! ```bash
//! cargo build --features native
//! ```
//!
//! For web builds:
//! ```bash
//! cargo build --target wasm32-unknown-unknown --no-default-features --features dom-web --bin haveit-web-dom
//! ```

// Core modules (available on all platforms)
pub mod constants;
pub mod types;
pub mod api;
pub mod surface;
pub mod presenter;
pub mod cards;
pub mod search;
pub mod listing;
pub mod view;

// Configuration (CLI/env)
pub mod config;

// Platform abstraction layer
pub mod platform;

// Terminal front end (native-only)
#[cfg(feature = "native")]
pub mod driver;
#[cfg(feature = "native")]
pub mod theme;
#[cfg(feature = "native")]
pub mod app;
#[cfg(feature = "native")]
pub mod ui;

// Re-export commonly used types
pub use api::{ApiClient, Connectivity, FetchError, Fetcher, OnlineFlag};
pub use config::Config;
pub use listing::{ListingController, PageState};
pub use search::{SearchController, SearchState};
pub use surface::{Card, Element, RenderTarget};
pub use types::{ApiResponse, LibraryRecord};
