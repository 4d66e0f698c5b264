use anyhow::{anyhow, Result};
use clap::Parser;

use crate::constants::{api, app};

/// haveit - search and browse a catalog of libraries
///
/// Terminal client for the catalog search/listing API.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug, Default)]
#[command(name = "haveit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search and browse a catalog of libraries", long_about = None)]
pub struct CliArgs {
    /// Catalog API base URL
    #[arg(long, env = "HAVEIT_API_URL")]
    pub api_url: Option<String>,

    /// Quiet period before a search is sent, in milliseconds (0-5000)
    #[arg(long, env = "DEBOUNCE_MS")]
    pub debounce_ms: Option<u64>,

    /// HTTP request timeout in milliseconds (1000-60000)
    #[arg(long, env = "REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// Libraries per listing page (1-60); server default when unset
    #[arg(long, env = "PAGE_SIZE")]
    pub page_size: Option<u32>,

    /// Start in offline mode (no requests are sent)
    #[arg(long, env = "HAVEIT_OFFLINE")]
    pub offline: bool,

    /// Target UI rendering FPS (1-120)
    #[arg(long, env = "RENDER_FPS")]
    pub render_fps: Option<u32>,

    /// Write logs to this file (honors RUST_LOG)
    #[arg(long, env = "HAVEIT_LOG_FILE")]
    pub log_file: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub debounce_ms: u64,
    pub request_timeout_ms: u64,
    pub page_size: Option<u32>,
    pub offline: bool,
    pub render_fps: u32,
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: api::DEFAULT_BASE_URL.to_string(),
            debounce_ms: app::DEBOUNCE_MS,
            request_timeout_ms: api::DEFAULT_TIMEOUT_MS,
            page_size: None,
            offline: false,
            render_fps: app::DEFAULT_RENDER_FPS,
            log_file: None,
        }
    }
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

/// Load configuration from CLI args and environment variables
/// Priority: CLI args > Environment variables > Defaults
pub fn load() -> Result<Config> {
    from_args(CliArgs::parse())
}

/// Build a validated [`Config`] from parsed arguments.
pub fn from_args(args: CliArgs) -> Result<Config> {
    let defaults = Config::default();

    let api_url = args.api_url.unwrap_or(defaults.api_url);
    validate_url(&api_url, "HAVEIT_API_URL")?;

    let debounce_ms = validate_in_range(
        args.debounce_ms.unwrap_or(defaults.debounce_ms),
        0,
        5000,
        "DEBOUNCE_MS",
    )?;

    let request_timeout_ms = validate_in_range(
        args.request_timeout_ms.unwrap_or(defaults.request_timeout_ms),
        1000,
        60000,
        "REQUEST_TIMEOUT_MS",
    )?;

    let page_size = args
        .page_size
        .map(|n| validate_in_range(n, 1, api::MAX_PAGE_SIZE, "PAGE_SIZE"))
        .transpose()?;

    let render_fps = validate_in_range(
        args.render_fps.unwrap_or(defaults.render_fps),
        1,
        120,
        "RENDER_FPS",
    )?;

    Ok(Config {
        api_url,
        debounce_ms,
        request_timeout_ms,
        page_size,
        offline: args.offline,
        render_fps,
        log_file: args.log_file,
    })
}

impl Config {
    /// Print current configuration (useful for debugging)
    pub fn log_summary(&self) {
        log::info!("haveit configuration:");
        log::info!("  API URL: {}", self.api_url);
        log::info!("  Debounce: {}ms", self.debounce_ms);
        log::info!("  Request Timeout: {}ms", self.request_timeout_ms);
        match self.page_size {
            Some(n) => log::info!("  Page Size: {n}"),
            None => log::info!("  Page Size: server default"),
        }
        if self.offline {
            log::info!("  Offline: yes");
        }
        log::info!("  Render FPS: {}", self.render_fps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = from_args(CliArgs::default()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.debounce_ms, 100);
    }

    #[test]
    fn rejects_bad_url() {
        let args = CliArgs { api_url: Some("ftp://example.com".into()), ..Default::default() };
        assert!(from_args(args).is_err());
    }

    #[test]
    fn page_size_is_capped_at_server_limit() {
        let args = CliArgs { page_size: Some(61), ..Default::default() };
        let err = from_args(args).unwrap_err().to_string();
        assert!(err.contains("PAGE_SIZE"), "{err}");

        let args = CliArgs { page_size: Some(60), ..Default::default() };
        assert_eq!(from_args(args).unwrap().page_size, Some(60));
    }

    #[test]
    fn cli_parses_flags() {
        let args = CliArgs::try_parse_from(["haveit", "--offline", "--debounce-ms", "250"]).unwrap();
        let cfg = from_args(args).unwrap();
        assert!(cfg.offline);
        assert_eq!(cfg.debounce_ms, 250);
    }
}
