//! Wire types for the token and redemption endpoints
//!
//! The token endpoint wraps its payload in a `{code, msg, data}` envelope;
//! the redemption endpoint nests status and message under an optional
//! `data` object whose exact schema is not contractually specified beyond
//! those two fields.

use serde::{Deserialize, Serialize};

use crate::types::serde_helpers::{deserialize_opt_stringlike, deserialize_stringlike};

/// Response envelope of the token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEnvelope {
    /// Zero on success
    pub code: i64,
    /// Error message carried alongside a non-zero code
    pub msg: Option<String>,
    /// Token payload, present on success
    pub data: Option<TokenGrant>,
}

/// Token payload nested in the envelope
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// The saas token value
    pub key: String,
    /// Acting user's account id
    pub uin: String,
    /// Owner account id; a string or a number on the wire
    #[serde(rename = "ownerUin", deserialize_with = "deserialize_stringlike")]
    pub owner_uin: String,
}

/// Request body of the redemption endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RedeemRequest {
    /// Fixed action selector
    #[serde(rename = "Action")]
    pub action: String,
    /// Action payload
    #[serde(rename = "Data")]
    pub data: RedeemPayload,
}

/// Payload nested in the redemption request
#[derive(Debug, Clone, Serialize)]
pub struct RedeemPayload {
    /// The redeem code being submitted
    pub code: String,
}

impl RedeemRequest {
    /// Build a `redeem/consume` request for one code
    pub fn consume(code: impl Into<String>) -> Self {
        Self {
            action: "redeem/consume".to_string(),
            data: RedeemPayload { code: code.into() },
        }
    }
}

/// Response envelope of the redemption endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RedeemEnvelope {
    /// Receipt object; field presence is not guaranteed per code
    pub data: Option<RedeemReceipt>,
}

/// Status and message nested in the redemption response
///
/// Both fields are opaque pass-through values. Success, already-used and
/// invalid codes map to different status values upstream, but the set is
/// not enumerated anywhere; callers display them as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct RedeemReceipt {
    /// Upstream status value; a string or a number on the wire
    #[serde(default, deserialize_with = "deserialize_opt_stringlike")]
    pub code: Option<String>,
    /// Human-readable explanation, when the upstream provides one
    pub message: Option<String>,
}
