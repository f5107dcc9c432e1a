//! Client configuration

use std::{path::PathBuf, time::Duration};

use clap::Args;
use stepshop::{coupons::CouponCatalog, fixtures::FixtureError};

use crate::{gateway::HttpGatewayConfig, observability::LoggingConfig};

/// Stepshop client configuration
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Commerce backend address
    #[arg(long, env = "STEPSHOP_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "STEPSHOP_TIMEOUT_SECS", default_value_t = 10u64)]
    pub timeout_secs: u64,

    /// YAML file of coupon definitions; the built-in set is used when omitted
    #[arg(long, env = "STEPSHOP_COUPONS")]
    pub coupons: Option<PathBuf>,

    /// Account username
    #[arg(long, env = "STEPSHOP_USERNAME")]
    pub username: Option<String>,

    /// Account password
    #[arg(long, env = "STEPSHOP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Gateway settings derived from this configuration.
    #[must_use]
    pub fn gateway_config(&self) -> HttpGatewayConfig {
        HttpGatewayConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// The coupon catalog to validate codes against.
    ///
    /// # Errors
    ///
    /// Returns an error if the coupon file cannot be read or parsed.
    pub fn coupon_catalog(&self) -> Result<CouponCatalog, FixtureError> {
        match &self.coupons {
            Some(path) => CouponCatalog::from_yaml_file(path),
            None => Ok(CouponCatalog::builtin()),
        }
    }
}
