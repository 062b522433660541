//! Configuration management for the redemption pipeline
//!
//! This module handles loading and managing configuration settings for the
//! login flow, the upstream API endpoints and the batch orchestrator.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::Settings;
