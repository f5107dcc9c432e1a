//! Coupons
//!
//! Coupons are client-side promotional adjustments looked up by code in a
//! fixed catalog. Applying one produces an [`AppliedCoupon`], a snapshot of the
//! discount against the subtotal at the moment of application.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer, ser::SerializeStructVariant};
use thiserror::Error;

/// Errors raised while defining or applying coupons.
#[derive(Debug, Error, PartialEq)]
pub enum CouponError {
    /// The percentage was outside the open interval (0, 1).
    #[error("coupon percentage must be greater than 0 and less than 1, got {0}")]
    InvalidPercentage(Decimal),

    /// The percentage discount could not be represented in whole points.
    #[error("percentage discount overflowed")]
    PercentConversion,
}

/// How a coupon reduces the subtotal.
#[derive(Clone, Copy, PartialEq)]
pub enum CouponKind {
    /// A fractional discount of the subtotal, rounded down to whole points.
    Percentage(Percentage),

    /// A fixed number of points off.
    FixedAmount(u64),
}

impl CouponKind {
    /// Build a percentage coupon kind, rejecting fractions outside (0, 1).
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::InvalidPercentage`] when `fraction <= 0` or `fraction >= 1`.
    pub fn percentage(fraction: Decimal) -> Result<Self, CouponError> {
        if fraction <= Decimal::ZERO || fraction >= Decimal::ONE {
            return Err(CouponError::InvalidPercentage(fraction));
        }

        Ok(Self::Percentage(Percentage::from(fraction)))
    }

    /// Discount in points for the given subtotal, clamped to `[0, subtotal]`.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::PercentConversion`] if the percentage discount
    /// cannot be represented as a `u64`.
    pub fn discount_points(&self, subtotal: u64) -> Result<u64, CouponError> {
        let discount = match self {
            Self::FixedAmount(points) => *points,
            Self::Percentage(percent) => percent_of_points(percent, subtotal)?,
        };

        Ok(discount.min(subtotal))
    }
}

impl fmt::Debug for CouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage(percent) => f
                .debug_tuple("Percentage")
                .field(&fraction(percent))
                .finish(),
            Self::FixedAmount(points) => f.debug_tuple("FixedAmount").field(points).finish(),
        }
    }
}

impl Serialize for CouponKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Percentage(percent) => {
                let mut state =
                    serializer.serialize_struct_variant("CouponKind", 0, "percentage", 1)?;
                state.serialize_field("value", &fraction(percent))?;
                state.end()
            }
            Self::FixedAmount(points) => {
                let mut state =
                    serializer.serialize_struct_variant("CouponKind", 1, "fixed_amount", 1)?;
                state.serialize_field("value", points)?;
                state.end()
            }
        }
    }
}

/// A coupon the catalog knows about.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouponDefinition {
    /// Normalised (uppercase) code.
    pub code: String,

    /// Human readable name.
    pub name: String,

    /// Discount rule.
    pub kind: CouponKind,
}

impl CouponDefinition {
    /// Create a definition, normalising the code.
    pub fn new(code: &str, name: impl Into<String>, kind: CouponKind) -> Self {
        Self {
            code: normalize_code(code),
            name: name.into(),
            kind,
        }
    }

    /// Apply this coupon to a subtotal, producing a discount snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::PercentConversion`] if the discount overflows.
    pub fn apply(&self, subtotal: u64) -> Result<AppliedCoupon, CouponError> {
        Ok(AppliedCoupon {
            code: self.code.clone(),
            name: self.name.clone(),
            kind: self.kind,
            discount_points: self.kind.discount_points(subtotal)?,
        })
    }
}

/// A coupon applied to a particular cart snapshot.
///
/// The discount is fixed at application time and is not recomputed when the
/// cart changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedCoupon {
    /// Normalised code.
    pub code: String,

    /// Human readable name.
    pub name: String,

    /// Discount rule the snapshot was computed from.
    pub kind: CouponKind,

    /// Points taken off the subtotal.
    pub discount_points: u64,
}

/// The set of coupon codes a client accepts.
#[derive(Debug, Clone, Default)]
pub struct CouponCatalog {
    coupons: FxHashMap<String, CouponDefinition>,
}

impl CouponCatalog {
    /// Build a catalog from definitions. Later duplicates replace earlier ones.
    pub fn new(definitions: impl IntoIterator<Item = CouponDefinition>) -> Self {
        Self {
            coupons: definitions
                .into_iter()
                .map(|definition| (definition.code.clone(), definition))
                .collect(),
        }
    }

    /// The catalog shipped with the client.
    pub fn builtin() -> Self {
        Self::new([
            CouponDefinition::new(
                "WELCOME10",
                "Welcome 10% off",
                CouponKind::Percentage(Percentage::from(Decimal::new(1, 1))),
            ),
            CouponDefinition::new("SAVE100", "100P off", CouponKind::FixedAmount(100)),
            CouponDefinition::new(
                "CATEGORY20",
                "Category 20% off",
                CouponKind::Percentage(Percentage::from(Decimal::new(2, 1))),
            ),
        ])
    }

    /// Look up a coupon by code, ignoring case and surrounding whitespace.
    pub fn lookup(&self, code: &str) -> Option<&CouponDefinition> {
        self.coupons.get(&normalize_code(code))
    }

    /// Number of coupons in the catalog.
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }

    /// Codes in the catalog, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.coupons.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

/// Normalise a user supplied coupon code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn fraction(percent: &Percentage) -> Decimal {
    // decimal_percentage doesn't expose the underlying Decimal
    *percent * Decimal::ONE
}

fn percent_of_points(percent: &Percentage, points: u64) -> Result<u64, CouponError> {
    fraction(percent)
        .checked_mul(Decimal::from(points))
        .ok_or(CouponError::PercentConversion)?
        .floor()
        .to_u64()
        .ok_or(CouponError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn welcome10_takes_ten_percent() -> TestResult {
        let catalog = CouponCatalog::builtin();
        let coupon = catalog.lookup("WELCOME10").ok_or("WELCOME10 missing")?;

        let applied = coupon.apply(1000)?;

        assert_eq!(applied.discount_points, 100);
        assert_eq!(applied.code, "WELCOME10");

        Ok(())
    }

    #[test]
    fn percentage_discount_rounds_down() -> TestResult {
        let kind = CouponKind::percentage(Decimal::new(1, 1))?;

        assert_eq!(kind.discount_points(999)?, 99);
        assert_eq!(kind.discount_points(9)?, 0);

        Ok(())
    }

    #[test]
    fn fixed_amount_is_clamped_to_subtotal() -> TestResult {
        let catalog = CouponCatalog::builtin();
        let coupon = catalog.lookup("SAVE100").ok_or("SAVE100 missing")?;

        assert_eq!(coupon.apply(50)?.discount_points, 50);
        assert_eq!(coupon.apply(0)?.discount_points, 0);
        assert_eq!(coupon.apply(500)?.discount_points, 100);

        Ok(())
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let catalog = CouponCatalog::builtin();

        assert!(catalog.lookup("  category20 ").is_some());
        assert!(catalog.lookup("Save100").is_some());
        assert!(catalog.lookup("notreal").is_none());
    }

    #[test]
    fn builtin_catalog_has_three_codes() {
        let catalog = CouponCatalog::builtin();

        assert_eq!(catalog.codes(), ["CATEGORY20", "SAVE100", "WELCOME10"]);
    }

    #[test]
    fn percentage_rejects_out_of_range_fractions() {
        assert_eq!(
            CouponKind::percentage(Decimal::ZERO),
            Err(CouponError::InvalidPercentage(Decimal::ZERO))
        );
        assert_eq!(
            CouponKind::percentage(Decimal::ONE),
            Err(CouponError::InvalidPercentage(Decimal::ONE))
        );
        assert!(CouponKind::percentage(Decimal::new(-5, 1)).is_err());
    }

    #[test]
    fn large_subtotal_does_not_overflow() -> TestResult {
        let kind = CouponKind::percentage(Decimal::new(5, 1))?;

        assert_eq!(kind.discount_points(u64::MAX)?, u64::MAX / 2);

        Ok(())
    }

    #[test]
    fn definition_normalises_code() {
        let definition = CouponDefinition::new(" spring5 ", "Spring", CouponKind::FixedAmount(5));

        assert_eq!(definition.code, "SPRING5");
    }
}
