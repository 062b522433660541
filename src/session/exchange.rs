//! Saas token exchange
//!
//! Converts the harvested login cookies into the API token that authorizes
//! redemption calls. The exchange is a single GET against the token
//! endpoint carrying a signed query and the raw session cookies; its
//! failures are fatal to the run, there is no fallback path to redemption
//! without a valid token.

use std::sync::Arc;

use rand::Rng;
use reqwest::{Client, header};
use tracing::{debug, info};
use url::Url;

use crate::{
    Error, Result,
    config::Settings,
    types::{CookiePair, SaasToken, TokenEnvelope},
};

/// Client for the saas token endpoint
#[derive(Debug, Clone)]
pub struct TokenExchanger {
    /// Shared HTTP client
    client: Client,
    /// Shared configuration
    settings: Arc<Settings>,
}

impl TokenExchanger {
    /// Create a new exchanger over the shared HTTP client
    pub fn new(client: Client, settings: Arc<Settings>) -> Self {
        Self { client, settings }
    }

    /// Exchange a cookie pair for a saas token
    ///
    /// Sends the `uin` cookie already o-stripped; the raw cookie value is
    /// never used downstream. A non-zero envelope code maps to
    /// [`Error::TokenApi`], transport failures to [`Error::Network`].
    pub async fn exchange(&self, cookies: &CookiePair) -> Result<SaasToken> {
        let url = self.build_token_url()?;
        let uin = cookies.normalized_uin();
        debug!("Requesting saas token for uin {uin}");

        let response = self
            .client
            .get(url)
            .header(header::REFERER, &self.settings.api.referer)
            .header(header::USER_AGENT, &self.settings.api.user_agent)
            .header(
                header::COOKIE,
                format!("uin={uin}; skey={};", cookies.skey),
            )
            .send()
            .await?
            .error_for_status()?;

        let envelope: TokenEnvelope = response.json().await?;
        if envelope.code != 0 {
            return Err(Error::token_api(
                envelope.code,
                envelope
                    .msg
                    .unwrap_or_else(|| "token endpoint refused the exchange".to_string()),
            ));
        }

        let grant = envelope.data.ok_or_else(|| {
            Error::token_api(envelope.code, "token endpoint returned no data object")
        })?;
        if grant.key.is_empty() {
            return Err(Error::token_api(
                envelope.code,
                "token endpoint returned an empty key",
            ));
        }

        info!("Obtained saas token for uin {} (owner {})", grant.uin, grant.owner_uin);
        Ok(SaasToken::new(grant.key, grant.uin, grant.owner_uin))
    }

    /// Build the token URL with its four query parameters
    ///
    /// `random` is a fresh 6-digit draw per call, leading zeros allowed.
    /// It is an anti-caching nonce, not a secret.
    fn build_token_url(&self) -> Result<Url> {
        let nonce = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32));
        Url::parse_with_params(
            &self.settings.api.token_url,
            &[
                ("platform", self.settings.api.platform.as_str()),
                ("random", nonce.as_str()),
                ("s_url", self.settings.api.s_url.as_str()),
                ("clientUA", self.settings.api.user_agent.as_str()),
            ],
        )
        .map_err(|e| Error::config(format!("Invalid token URL: {e}")))
    }
}
