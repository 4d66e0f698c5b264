//! Application constants
//!
//! Centralized defaults, timing values and user-facing strings used by the
//! controllers and both front ends.

/// Catalog API defaults
pub mod api {
    /// Base URL of the catalog API when nothing else is configured
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

    /// Per-request timeout (milliseconds)
    pub const DEFAULT_TIMEOUT_MS: u64 = 8000;

    /// Largest page size the listing endpoint honors (`lim` is clamped server-side)
    pub const MAX_PAGE_SIZE: u32 = 60;
}

/// Application state and behavior constants
pub mod app {
    /// Quiet period before a search trigger turns into a request (milliseconds)
    pub const DEBOUNCE_MS: u64 = 100;

    /// Target UI rendering FPS for the terminal front end
    pub const DEFAULT_RENDER_FPS: u32 = 30;

    /// How long the input shake mark stays up before the animation ends
    pub const SHAKE_MS: u64 = 400;

    /// Duration to show toast notifications (seconds)
    pub const TOAST_DURATION_SECS: u64 = 2;
}

/// Card rendering constants
pub mod cards {
    /// Link target used when a record carries no link
    pub const PLACEHOLDER_HREF: &str = "about:blank";
}

/// User-facing message strings
pub mod messages {
    pub const OFFLINE: &str =
        "looks like you're offline, please check your internet connection.";

    pub const UNREACHABLE: &str = "we couldn't reach the server. maybe it's taking a nap?";

    pub const SERVER_SLEEPING: &str = "our server seems to be sleeping, try again later.";

    pub const NOTHING_FOUND: &str = "we couldn't find anything matching your request.";

    pub const STRANGE_RESPONSE: &str =
        "hmm, we got something strange from the server, please try again.";

    /// Banner text when the banner is shown without a message
    pub const FALLBACK_ERROR: &str = "oops, something went wrong.";

    /// Search came back without a match; the only case that offers the suggest button
    pub const NO_MATCH: &str = "no library found with that keyword. wanna suggest one?";

    /// Inline notice below the search input
    pub const EMPTY_INPUT: &str = "please type something to search for.";

    /// Toast message when copying a card link
    pub const COPY_LINK: &str = "Copied link";

    /// Toast message when clipboard operation fails
    pub const COPY_FAILED: &str = "Copy failed";
}
