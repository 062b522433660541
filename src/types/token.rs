//! Saas API token
//!
//! Produced once by the token exchange from a valid cookie pair. The token
//! is immutable after creation and shared read-only by every concurrent
//! redemption call in a batch; there is no refresh or expiry handling.

/// Exchanged API credential authorizing redemption calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaasToken {
    /// The saas token value, also the input of the csrf signature
    pub key: String,
    /// Acting user's account id (already o-stripped)
    pub uin: String,
    /// Account-owner identifier required by the redemption API
    pub owner_uin: String,
}

impl SaasToken {
    /// Create a new token
    pub fn new(
        key: impl Into<String>,
        uin: impl Into<String>,
        owner_uin: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            uin: uin.into(),
            owner_uin: owner_uin.into(),
        }
    }

    /// Assemble the `Cookie` header sent with every redemption request
    pub fn cookie_header(&self) -> String {
        format!(
            "saas_uin={}; saas_ownerUin={}; saas_token={}",
            self.uin, self.owner_uin, self.key
        )
    }
}
