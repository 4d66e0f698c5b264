//! Catalog API client.
//!
//! Every failure mode (offline, transport, HTTP status, unparseable body) is
//! folded into [`ApiResponse::Error`] here; nothing past this boundary sees a
//! `Result`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::constants::{api, messages};
use crate::types::ApiResponse;

/// Client-side failure taxonomy. `Display` is the text the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{}", messages::OFFLINE)]
    Offline,
    #[error("{}", messages::UNREACHABLE)]
    Transport,
    #[error("{}", messages::SERVER_SLEEPING)]
    Server,
    #[error("{}", messages::NOTHING_FOUND)]
    Client,
    #[error("unexpected server response ({0}).")]
    UnexpectedStatus(u16),
    #[error("{}", messages::STRANGE_RESPONSE)]
    Parse,
}

impl FetchError {
    /// Map a non-success HTTP status onto the taxonomy.
    pub fn from_status(status: u16) -> Self {
        match status {
            500..=u16::MAX => FetchError::Server,
            400..=499 => FetchError::Client,
            other => FetchError::UnexpectedStatus(other),
        }
    }
}

impl From<FetchError> for ApiResponse {
    fn from(err: FetchError) -> Self {
        ApiResponse::Error(err.to_string())
    }
}

/// Source of truth for "is the network up".
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Shared online switch; clones observe the same state.
#[derive(Clone, Debug)]
pub struct OnlineFlag(Arc<AtomicBool>);

impl OnlineFlag {
    pub fn new(online: bool) -> Self {
        Self(Arc::new(AtomicBool::new(online)))
    }

    pub fn set(&self, online: bool) {
        self.0.store(online, Ordering::Relaxed);
    }
}

impl Default for OnlineFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity for OnlineFlag {
    fn is_online(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// `navigator.onLine` as seen by the browser.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct NavigatorOnline;

#[cfg(target_arch = "wasm32")]
impl Connectivity for NavigatorOnline {
    fn is_online(&self) -> bool {
        web_sys::window()
            .map(|w| w.navigator().on_line())
            .unwrap_or(true)
    }
}

/// Anything that can resolve an endpoint into an [`ApiResponse`].
///
/// Controllers only ever see this trait, so tests can swap in canned
/// responses.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait Fetcher {
    async fn fetch(&self, endpoint: &str) -> ApiResponse;
}

/// HTTP client bound to one catalog base URL.
pub struct ApiClient<C = OnlineFlag> {
    base_url: String,
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    timeout: Duration,
    http: reqwest::Client,
    connectivity: C,
}

impl<C: Connectivity> ApiClient<C> {
    pub fn new(base_url: &str, timeout_ms: u64, connectivity: C) -> anyhow::Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .build()?;

        #[cfg(target_arch = "wasm32")]
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(timeout_ms),
            http,
            connectivity,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path such as `/all?page=2`.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET an endpoint. Never fails; see the module docs.
    pub async fn get(&self, endpoint: &str) -> ApiResponse {
        match self.try_get(endpoint).await {
            Ok(body) => ApiResponse::from_body(body),
            Err(err) => {
                log::warn!("[api] GET {endpoint} failed: {err:?}");
                err.into()
            }
        }
    }

    async fn try_get(&self, endpoint: &str) -> Result<Value, FetchError> {
        if !self.connectivity.is_online() {
            return Err(FetchError::Offline);
        }

        let url = self.url_for(endpoint);
        log::debug!("[api] GET {url}");

        let request = self.http.get(&url);
        #[cfg(not(target_arch = "wasm32"))]
        let request = request.timeout(self.timeout);

        let response = request.send().await.map_err(|e| {
            log::debug!("[api] transport error: {e}");
            FetchError::Transport
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16()));
        }

        response.json::<Value>().await.map_err(|e| {
            log::debug!("[api] body parse error: {e}");
            FetchError::Parse
        })
    }
}

impl ApiClient<OnlineFlag> {
    /// Client with the default base URL and an always-online flag.
    pub fn with_defaults() -> anyhow::Result<Self> {
        Self::new(api::DEFAULT_BASE_URL, api::DEFAULT_TIMEOUT_MS, OnlineFlag::default())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl<C: Connectivity> Fetcher for ApiClient<C> {
    async fn fetch(&self, endpoint: &str) -> ApiResponse {
        self.get(endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_groups_ranges() {
        assert_eq!(FetchError::from_status(404), FetchError::from_status(499));
        assert_eq!(FetchError::from_status(500), FetchError::from_status(503));
        assert_eq!(FetchError::from_status(400), FetchError::Client);
        assert_eq!(FetchError::from_status(302), FetchError::UnexpectedStatus(302));
    }

    #[test]
    fn unexpected_status_interpolates_code() {
        assert_eq!(
            FetchError::UnexpectedStatus(304).to_string(),
            "unexpected server response (304)."
        );
        assert_eq!(FetchError::Server.to_string(), messages::SERVER_SLEEPING);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/", 1000, OnlineFlag::default()).unwrap();
        assert_eq!(client.url_for("/all?page=2"), "http://localhost:8000/all?page=2");
    }

    #[test]
    fn online_flag_clones_share_state() {
        let flag = OnlineFlag::default();
        let other = flag.clone();
        other.set(false);
        assert!(!flag.is_online());
    }
}
