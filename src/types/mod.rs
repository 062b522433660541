//! Type definitions for the redemption pipeline
//!
//! This module contains the main data structures used for credentials,
//! tokens, wire envelopes and per-code redemption outcomes.

pub mod api;
pub mod credentials;
pub mod outcome;
pub mod serde_helpers;
pub mod token;

pub use api::{RedeemEnvelope, RedeemReceipt, RedeemRequest, TokenEnvelope, TokenGrant};
pub use credentials::CookiePair;
pub use outcome::RedeemOutcome;
pub use token::SaasToken;
