//! EdgeOne Coupon Redemption Pipeline
//!
//! Automates claiming promotional redeem codes on the EdgeOne console:
//! a browser login yields the `skey`/`uin` session cookies, those cookies
//! are exchanged for a saas API token, and redeem codes are submitted
//! against the coupon API under a bounded concurrency cap.
//!
//! # Architecture
//!
//! The pipeline consists of three independently invokable operations:
//! - **Credential harvesting**: drives a real browser through the login
//!   flow and extracts the two session cookies
//! - **Token exchange**: converts the cookies into a [`SaasToken`]
//! - **Batch redemption**: fans a code list out to the coupon API with at
//!   most a fixed number of requests in flight
//!
//! Callers (CLI, GUI, test harness) compose the operations and decide how
//! to await or display them; the library holds no process-global state.
//!
//! # Examples
//!
//! ```rust,no_run
//! use edgeone_redeem::{RedeemPipeline, Settings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::default();
//! let pipeline = RedeemPipeline::new(settings);
//!
//! let cookies = pipeline.harvest_credentials().await?;
//! let token = pipeline.exchange_token(&cookies).await?;
//! let outcomes = pipeline
//!     .redeem_batch(&token, &["CODE-1".to_string(), "CODE-2".to_string()])
//!     .await;
//! for outcome in &outcomes {
//!     println!("{outcome}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod utils;

pub use config::Settings;
pub use error::{Error, Result};
pub use session::RedeemPipeline;
pub use types::{CookiePair, RedeemOutcome, SaasToken};
