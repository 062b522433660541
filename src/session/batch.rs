//! Batch orchestration
//!
//! Fans a code list out to the redemption client under a fixed concurrency
//! cap. Outcomes are collected in completion order, so callers must match
//! them to codes by the `code` field rather than by position. Every input
//! code yields exactly one outcome; per-code failures are already captured
//! inside the [`Redeemer`] and never abort the batch.

use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::{
    session::redeem::Redeemer,
    types::{RedeemOutcome, SaasToken},
};

/// Split raw multi-line input into a code list
///
/// Lines are trimmed and blank/whitespace-only lines dropped. Duplicates
/// survive: each occurrence is submitted independently.
pub fn parse_code_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Redeem every code with at most `concurrency` requests in flight
///
/// The one redeemer (and its underlying HTTP session) is shared across all
/// in-flight calls; the token is immutable, so no locking is needed. An
/// empty input returns immediately without touching the network.
pub async fn redeem_all<R: Redeemer>(
    redeemer: &R,
    token: &SaasToken,
    codes: &[String],
    concurrency: usize,
) -> Vec<RedeemOutcome> {
    if codes.is_empty() {
        return Vec::new();
    }

    let cap = concurrency.max(1);
    debug!("Redeeming {} codes, at most {cap} in flight", codes.len());

    stream::iter(codes.iter().map(|code| redeemer.redeem(token, code)))
        .buffer_unordered(cap)
        .collect()
        .await
}
