//! Coupon Catalog Fixtures
//!
//! Coupon catalogs can be described in YAML:
//!
//! ```yaml
//! coupons:
//!   WELCOME10:
//!     name: Welcome 10% off
//!     discount:
//!       type: percentage
//!       value: "0.10"
//!   SAVE100:
//!     name: 100P off
//!     discount:
//!       type: fixed_amount
//!       value: 100
//! ```

use std::{fs, path::Path, str::FromStr};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::coupons::{CouponCatalog, CouponDefinition, CouponError, CouponKind};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Coupon definition rejected
    #[error("Invalid coupon {code}: {source}")]
    Coupon {
        /// Offending coupon code
        code: String,

        /// Why it was rejected
        #[source]
        source: CouponError,
    },
}

/// Wrapper for coupons in YAML
#[derive(Debug, Deserialize)]
pub struct CouponsFixture {
    /// Map of coupon code -> coupon fixture
    pub coupons: FxHashMap<String, CouponFixture>,
}

/// Coupon fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Coupon display name
    pub name: String,

    /// Discount configuration
    pub discount: DiscountFixture,
}

/// Discount configuration for a coupon fixture
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountFixture {
    /// Fractional discount, e.g. `"0.10"` for 10% off
    Percentage {
        /// Fraction between 0 and 1, written as a string to keep it exact
        value: String,
    },

    /// Fixed number of points off
    FixedAmount {
        /// Points
        value: u64,
    },
}

impl DiscountFixture {
    /// Convert into a coupon kind for the coupon with the given code.
    ///
    /// # Errors
    ///
    /// Returns an error if a percentage is malformed or outside (0, 1).
    pub fn into_kind(self, code: &str) -> Result<CouponKind, FixtureError> {
        match self {
            Self::FixedAmount { value } => Ok(CouponKind::FixedAmount(value)),
            Self::Percentage { value } => {
                let fraction = Decimal::from_str(value.trim())
                    .map_err(|_err| FixtureError::InvalidPercentage(value.clone()))?;

                CouponKind::percentage(fraction).map_err(|source| FixtureError::Coupon {
                    code: code.to_string(),
                    source,
                })
            }
        }
    }
}

impl CouponsFixture {
    /// Parse a coupons fixture from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Convert the fixture into a catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if any coupon has an invalid discount.
    pub fn into_catalog(self) -> Result<CouponCatalog, FixtureError> {
        let definitions = self
            .coupons
            .into_iter()
            .map(|(code, fixture)| {
                let kind = fixture.discount.into_kind(&code)?;

                Ok(CouponDefinition::new(&code, fixture.name, kind))
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(CouponCatalog::new(definitions))
    }
}

impl CouponCatalog {
    /// Load a coupon catalog from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a coupon is invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FixtureError> {
        CouponsFixture::from_yaml_str(yaml)?.into_catalog()
    }

    /// Load a coupon catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }
}
