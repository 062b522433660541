//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

/// Test helper functions
pub mod helpers {
    use edgeone_redeem::{Settings, types::SaasToken};

    /// Create settings pointing both API endpoints at a mock server
    pub fn mock_settings(base_url: &str) -> Settings {
        let mut settings = Settings::default();
        settings.api.token_url = format!("{base_url}/account/login/saas/getTokenFormSass");
        settings.api.redeem_url = format!("{base_url}/common/portal-user");
        settings
    }

    /// A token as the exchange would produce it
    pub fn test_token() -> SaasToken {
        SaasToken::new("K", "100", "200")
    }
}
