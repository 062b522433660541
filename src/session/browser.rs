//! Browser-driven credential harvesting
//!
//! Opens the login page in a controlled Chrome instance, waits for the
//! post-login redirect to land, and reads the `skey`/`uin` session cookies
//! out of the browser context. The browser process lives only for the
//! duration of one harvest call and is terminated on every exit path.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use percent_encoding::percent_decode_str;
use tracing::{debug, info};

use crate::{Error, Result, config::Settings, types::CookiePair};

/// Poll cadence while waiting for the login redirect
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Source of login session cookies
///
/// Abstracts the browser so callers and tests can substitute a fake that
/// never launches a real Chrome process.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Run the login flow and return the harvested cookie pair
    async fn harvest(&self) -> Result<CookiePair>;
}

/// Harvester driving a real Chrome via the DevTools protocol
#[derive(Debug)]
pub struct BrowserHarvester {
    /// Shared configuration
    settings: Arc<Settings>,
}

impl BrowserHarvester {
    /// Create a new harvester
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl CredentialSource for BrowserHarvester {
    /// Drive the login flow in a blocking task
    ///
    /// The underlying automation crate is synchronous, so the whole flow
    /// runs under `spawn_blocking` to keep the async runtime free.
    async fn harvest(&self) -> Result<CookiePair> {
        let settings = Arc::clone(&self.settings);
        tokio::task::spawn_blocking(move || harvest_blocking(&settings))
            .await
            .map_err(|e| Error::internal(format!("login task aborted: {e}")))?
    }
}

/// Open the login URL, wait for redirect + full load, read the cookies
fn harvest_blocking(settings: &Settings) -> Result<CookiePair> {
    let options = LaunchOptions::default_builder()
        .headless(settings.login.headless)
        .build()
        .map_err(|e| Error::browser(format!("Failed to assemble launch options: {e}")))?;

    let browser =
        Browser::new(options).map_err(|e| Error::browser(format!("Failed to launch Chrome: {e}")))?;
    let tab = browser
        .new_tab()
        .map_err(|e| Error::browser(format!("Failed to open tab: {e}")))?;

    info!("Opening login page: {}", settings.login.url);
    tab.navigate_to(&settings.login.url)
        .map_err(|e| Error::browser(format!("Navigation failed: {e}")))?;

    // One deadline covers both wait conditions: the URL must change away
    // from the login page AND the landed page must finish loading.
    let deadline = Instant::now() + settings.login_timeout();
    while !login_finished(&tab, &settings.login.url)? {
        if Instant::now() >= deadline {
            return Err(Error::browser(format!(
                "Login did not complete within {}s",
                settings.login.timeout_secs
            )));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
    debug!("Login redirect landed at {}", tab.get_url());

    let mut cookies: HashMap<String, String> = tab
        .get_cookies()
        .map_err(|e| Error::browser(format!("Failed to read cookies: {e}")))?
        .into_iter()
        .map(|c| (c.name, decode_cookie_value(&c.value)))
        .collect();

    let pair = CookiePair::new(
        cookies.remove("skey").unwrap_or_default(),
        cookies.remove("uin").unwrap_or_default(),
    );
    if !pair.is_complete() {
        return Err(Error::authentication(
            "Login session did not yield skey/uin cookies",
        ));
    }

    info!("Harvested session cookies for uin {}", pair.normalized_uin());
    Ok(pair)
    // `browser` drops here, closing the Chrome process on success and
    // on every error path above
}

/// Whether the redirect happened and the landed page finished loading
fn login_finished(tab: &Tab, login_url: &str) -> Result<bool> {
    if tab.get_url() == login_url {
        return Ok(false);
    }

    let ready_state = tab
        .evaluate("document.readyState", false)
        .map_err(|e| Error::browser(format!("Failed to query readyState: {e}")))?;
    Ok(matches!(
        ready_state.value,
        Some(serde_json::Value::String(ref s)) if s == "complete"
    ))
}

/// URL-decode a raw cookie value
///
/// Invalid percent sequences pass through untouched rather than failing
/// the harvest.
fn decode_cookie_value(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
