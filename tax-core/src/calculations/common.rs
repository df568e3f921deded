//! Shared numeric helpers.
//!
//! Engine arithmetic is exact and unrounded; rounding to cents only happens
//! when a result is presented, through [`round_half_up`] or [`rounded_summary`].

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{BucketSummary, TaxBucket, TaxSummary};

/// Rounds to two decimal places, midpoints away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Copy of `summary` with every amount rounded to cents, for display.
///
/// `tax_due` is rounded from the exact value, not re-summed from the
/// rounded buckets.
pub fn rounded_summary(summary: &TaxSummary) -> TaxSummary {
    let mut rounded = TaxSummary {
        tax_due: round_half_up(summary.tax_due),
        ..TaxSummary::default()
    };

    for &bucket in TaxBucket::all() {
        let view = summary.bucket(bucket);
        rounded.set_bucket(
            bucket,
            BucketSummary {
                total_sales: round_half_up(view.total_sales),
                profit: round_half_up(view.profit),
                taxable_profit: round_half_up(view.taxable_profit),
            },
        );
    }

    rounded
}
