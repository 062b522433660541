//! Redemption client
//!
//! Submits one redeem code per request against the coupon endpoint. The
//! client never lets a failure escape its boundary: transport errors,
//! rejected HTTP statuses and unparseable bodies all come back as
//! [`RedeemOutcome::Failed`] values carrying the code, so one bad code
//! never aborts the rest of a batch.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::debug;

use crate::{
    Result,
    config::Settings,
    session::signature::csrf_code,
    types::{RedeemEnvelope, RedeemOutcome, RedeemRequest, SaasToken},
};

/// Status shown when the upstream receipt carries no status field
const DEFAULT_STATUS: &str = "unknown status";
/// Message shown when the upstream receipt carries no message field
const DEFAULT_MESSAGE: &str = "no message";

/// Submitter of individual redeem codes
///
/// The batch orchestrator is generic over this trait so tests can drive it
/// with an instrumented fake instead of a live endpoint.
#[async_trait]
pub trait Redeemer: Send + Sync {
    /// Submit one code under the given token, always yielding an outcome
    async fn redeem(&self, token: &SaasToken, code: &str) -> RedeemOutcome;
}

/// Client for the coupon redemption endpoint
#[derive(Debug, Clone)]
pub struct RedeemClient {
    /// Shared HTTP client
    client: Client,
    /// Shared configuration
    settings: Arc<Settings>,
}

impl RedeemClient {
    /// Create a new client over the shared HTTP session
    pub fn new(client: Client, settings: Arc<Settings>) -> Self {
        Self { client, settings }
    }

    /// POST one code and parse the response envelope
    async fn submit(&self, token: &SaasToken, code: &str) -> Result<RedeemEnvelope> {
        let response = self
            .client
            .post(&self.settings.api.redeem_url)
            .header(header::REFERER, &self.settings.api.referer)
            .header(header::USER_AGENT, &self.settings.api.user_agent)
            .header("x-csrfcode", csrf_code(&token.key))
            .header(header::COOKIE, token.cookie_header())
            .json(&RedeemRequest::consume(code))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Redeemer for RedeemClient {
    async fn redeem(&self, token: &SaasToken, code: &str) -> RedeemOutcome {
        debug!("Submitting redeem code {code}");
        match self.submit(token, code).await {
            Ok(envelope) => outcome_from_envelope(code, envelope),
            Err(e) => RedeemOutcome::failed(code, e.to_string()),
        }
    }
}

/// Map a response envelope to an outcome, defaulting absent fields
///
/// The upstream does not guarantee field presence per code; already-used,
/// invalid and successful codes report different status values which pass
/// through untouched.
fn outcome_from_envelope(code: &str, envelope: RedeemEnvelope) -> RedeemOutcome {
    let (status, message) = match envelope.data {
        Some(receipt) => (
            receipt.code.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            receipt.message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
        ),
        None => (DEFAULT_STATUS.to_string(), DEFAULT_MESSAGE.to_string()),
    };
    RedeemOutcome::accepted(code, status, message)
}
