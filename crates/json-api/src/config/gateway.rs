//! Gateway Config

use std::time::Duration;

use clap::Args;
use storefront_app::gateway::{DEFAULT_API_BASE, RazorpayConfig};

/// Payment gateway credentials and limits.
#[derive(Args)]
pub struct GatewayConfig {
    /// Razorpay key id
    #[arg(long = "razorpay-key-id", env = "RAZORPAY_KEY_ID")]
    pub key_id: String,

    /// Razorpay key secret, also the payment signature HMAC key
    #[arg(long = "razorpay-key-secret", env = "RAZORPAY_KEY_SECRET", hide_env_values = true)]
    pub key_secret: String,

    /// Razorpay API base URL
    #[arg(long = "razorpay-api-base", env = "RAZORPAY_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Upper bound on each gateway call, in seconds
    #[arg(long, env = "GATEWAY_TIMEOUT_SECONDS", default_value_t = 10)]
    pub timeout_seconds: u64,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl GatewayConfig {
    /// Per-call gateway timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Client configuration for the Razorpay adapter.
    #[must_use]
    pub fn razorpay(&self) -> RazorpayConfig {
        RazorpayConfig::new(
            self.key_id.clone(),
            self.key_secret.clone(),
            Some(self.api_base.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        gateway: GatewayConfig,
    }

    #[test]
    fn defaults_apply_when_only_credentials_are_given() -> Result<(), clap::Error> {
        let harness = Harness::try_parse_from([
            "test",
            "--razorpay-key-id",
            "rzp_test_key",
            "--razorpay-key-secret",
            "shh",
        ])?;

        assert_eq!(harness.gateway.api_base, DEFAULT_API_BASE);
        assert_eq!(harness.gateway.timeout(), Duration::from_secs(10));

        Ok(())
    }

    #[test]
    fn debug_output_redacts_secret() -> Result<(), clap::Error> {
        let harness = Harness::try_parse_from([
            "test",
            "--razorpay-key-id",
            "rzp_test_key",
            "--razorpay-key-secret",
            "super-secret-value",
        ])?;

        let rendered = format!("{:?}", harness.gateway);

        assert!(!rendered.contains("super-secret-value"), "secret leaked: {rendered}");
        assert!(rendered.contains("rzp_test_key"), "key id missing: {rendered}");

        Ok(())
    }
}
