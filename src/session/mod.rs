//! Redemption pipeline
//!
//! This module ties the pipeline stages together: browser-driven
//! credential harvesting, saas token exchange, per-code redemption and the
//! bounded-concurrency batch orchestrator. [`RedeemPipeline`] is the
//! caller-facing facade; each stage is also usable on its own.

pub mod batch;
pub mod browser;
pub mod exchange;
pub mod redeem;
pub mod signature;

pub use batch::{parse_code_lines, redeem_all};
pub use browser::{BrowserHarvester, CredentialSource};
pub use exchange::TokenExchanger;
pub use redeem::{RedeemClient, Redeemer};
pub use signature::csrf_code;

use std::sync::Arc;

use reqwest::Client;

use crate::{
    Error, Result,
    config::Settings,
    types::{CookiePair, RedeemOutcome, SaasToken},
};

/// Convenience type alias for the pipeline with the real browser harvester
pub type RedeemPipeline = RedeemPipelineGeneric<BrowserHarvester>;

/// Caller-facing facade over the three pipeline operations
///
/// One instance owns the shared HTTP session used by both the token
/// exchange and every concurrent redemption call. The pipeline holds no
/// mutable credential state: the cookie pair and token are explicit values
/// passed back in by the caller, so any caller (CLI, GUI, test harness)
/// decides how to sequence and await the operations.
#[derive(Debug)]
pub struct RedeemPipelineGeneric<S: CredentialSource = BrowserHarvester> {
    /// Shared configuration
    settings: Arc<Settings>,
    /// Shared HTTP client / connection pool
    client: Client,
    /// Login cookie source
    credential_source: S,
}

impl RedeemPipelineGeneric<BrowserHarvester> {
    /// Create a pipeline that harvests credentials with a real browser
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let credential_source = BrowserHarvester::new(Arc::clone(&settings));
        Self::assemble(settings, credential_source)
    }
}

impl<S: CredentialSource> RedeemPipelineGeneric<S> {
    /// Create a pipeline over a custom credential source
    ///
    /// Lets embedders and tests substitute the browser login with their
    /// own cookie acquisition.
    pub fn with_credential_source(settings: Settings, credential_source: S) -> Self {
        Self::assemble(Arc::new(settings), credential_source)
    }

    fn assemble(settings: Arc<Settings>, credential_source: S) -> Self {
        let client = Client::builder()
            .user_agent(&settings.api.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            settings,
            client,
            credential_source,
        }
    }

    /// Run the browser login flow and harvest the session cookies
    pub async fn harvest_credentials(&self) -> Result<CookiePair> {
        self.credential_source.harvest().await
    }

    /// Exchange harvested cookies for a saas token
    ///
    /// An incomplete cookie pair is a terminal failure for the session;
    /// no retry is attempted.
    pub async fn exchange_token(&self, cookies: &CookiePair) -> Result<SaasToken> {
        if !cookies.is_complete() {
            return Err(Error::authentication(
                "skey/uin cookie missing, cannot exchange a token",
            ));
        }

        TokenExchanger::new(self.client.clone(), Arc::clone(&self.settings))
            .exchange(cookies)
            .await
    }

    /// Redeem a batch of codes under the configured concurrency cap
    ///
    /// Returns one outcome per input code, in completion order.
    pub async fn redeem_batch(&self, token: &SaasToken, codes: &[String]) -> Vec<RedeemOutcome> {
        let client = RedeemClient::new(self.client.clone(), Arc::clone(&self.settings));
        redeem_all(&client, token, codes, self.settings.batch.concurrency).await
    }

    /// The pipeline's effective configuration
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
