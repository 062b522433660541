//! Per-code redemption outcomes
//!
//! Every submitted code yields exactly one outcome, success or failure.
//! Outcomes are matched to codes by the `code` field, never by position:
//! the batch orchestrator collects them in completion order.

use std::fmt;

/// Result of submitting one redeem code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// The upstream accepted the request and returned a receipt
    ///
    /// `status` and `message` are opaque pass-through values; an
    /// already-used code is still an `Accepted` outcome with whatever
    /// status the upstream reports for it.
    Accepted {
        /// The submitted code
        code: String,
        /// Upstream status value
        status: String,
        /// Upstream explanation
        message: String,
    },
    /// The request itself failed (transport, HTTP status or parse error)
    Failed {
        /// The submitted code
        code: String,
        /// Human-readable failure detail
        detail: String,
    },
}

impl RedeemOutcome {
    /// Create an accepted outcome
    pub fn accepted(
        code: impl Into<String>,
        status: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Accepted {
            code: code.into(),
            status: status.into(),
            message: message.into(),
        }
    }

    /// Create a failed outcome
    pub fn failed(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Failed {
            code: code.into(),
            detail: detail.into(),
        }
    }

    /// The code this outcome belongs to
    pub fn code(&self) -> &str {
        match self {
            Self::Accepted { code, .. } | Self::Failed { code, .. } => code,
        }
    }

    /// Whether the request failed before yielding a receipt
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for RedeemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted {
                code,
                status,
                message,
            } => write!(f, "[{code}] -> {status} | {message}"),
            Self::Failed { code, detail } => write!(f, "[{code}] request failed: {detail}"),
        }
    }
}
