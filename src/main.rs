//! CLI entry point for the redemption pipeline
//!
//! Thin composition layer over the library: runs the browser login, the
//! token exchange and one redemption batch, logging one line per outcome.
//! Codes are read from a file or stdin, one per line; blank lines are
//! ignored.
//!
//! # Usage
//!
//! ```bash
//! edgeone-redeem --codes-file codes.txt
//! cat codes.txt | edgeone-redeem
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edgeone_redeem::{
    RedeemPipeline, Result,
    config::{ConfigLoader, Settings},
    session::parse_code_lines,
    utils::get_version,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "edgeone-redeem")]
struct Cli {
    /// File with one redeem code per line (default: read stdin)
    #[arg(short = 'f', long, value_name = "CODES_FILE")]
    codes_file: Option<PathBuf>,

    /// Override the login page URL
    #[arg(long, value_name = "LOGIN_URL")]
    login_url: Option<String>,

    /// Run the login browser headless
    #[arg(long)]
    headless: bool,

    /// Override the maximum number of in-flight redemption requests
    #[arg(short = 'n', long, value_name = "CONCURRENCY")]
    concurrency: Option<usize>,

    /// Configuration file (default: the platform config directory)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log to stderr so piped stdout stays clean
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("edgeone-redeem {} starting", get_version());

    let config_path = cli.config.clone().or_else(default_config_path);
    let settings = match build_settings(&cli, config_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let codes = match read_codes(cli.codes_file.as_deref()) {
        Ok(codes) => codes,
        Err(e) => {
            error!("Failed to read codes: {e}");
            std::process::exit(1);
        }
    };
    if codes.is_empty() {
        info!("No redeem codes supplied, nothing to do");
        return Ok(());
    }

    let concurrency = settings.batch.concurrency;
    let pipeline = RedeemPipeline::new(settings);

    info!("Waiting for login to complete in the browser window...");
    let cookies = match pipeline.harvest_credentials().await {
        Ok(cookies) => cookies,
        Err(e) => {
            error!("Login failed: {e}");
            std::process::exit(1);
        }
    };

    let token = match pipeline.exchange_token(&cookies).await {
        Ok(token) => token,
        Err(e) => {
            error!("Token exchange failed: {e}");
            std::process::exit(1);
        }
    };

    info!(
        "Redeeming {} codes (at most {concurrency} in flight)...",
        codes.len()
    );
    let outcomes = pipeline.redeem_batch(&token, &codes).await;

    for outcome in &outcomes {
        if outcome.is_failure() {
            error!("{outcome}");
        } else {
            info!("{outcome}");
        }
    }

    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    info!(
        "Done: {} responses received, {} requests failed",
        outcomes.len() - failed,
        failed
    );

    Ok(())
}

/// Resolve settings with file < env < CLI flag precedence
fn build_settings(cli: &Cli, config_path: Option<&Path>) -> Result<Settings> {
    let mut settings = ConfigLoader::new().load(config_path)?;

    if let Some(ref url) = cli.login_url {
        settings.login.url = url.clone();
    }
    if cli.headless {
        settings.login.headless = true;
    }
    if let Some(concurrency) = cli.concurrency {
        settings.batch.concurrency = concurrency;
    }

    // CLI overrides can invalidate what the loader already accepted
    settings.validate()?;
    Ok(settings)
}

/// Read the raw code list from a file or stdin
fn read_codes(path: Option<&Path>) -> Result<Vec<String>> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(parse_code_lines(&raw))
}

/// Default config file location under the platform config directory
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("edgeone-redeem").join("config.toml"))
}
