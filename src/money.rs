//! Currency arithmetic helpers.
//!
//! Every ledger value in the simulation is a [`Decimal`] kept at two decimal
//! places. Rounding is applied after each arithmetic step so no drift builds
//! up over long games.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to cents, midpoint away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `quantity * unit_price`, rounded to cents.
pub fn total_cost(quantity: Decimal, unit_price: Decimal) -> Decimal {
    round2(quantity * unit_price)
}

/// How many whole units `budget` buys at `unit_price`. Zero for a
/// non-positive price or budget.
pub fn whole_units(budget: Decimal, unit_price: Decimal) -> u32 {
    if unit_price <= Decimal::ZERO || budget <= Decimal::ZERO {
        return 0;
    }
    (budget / unit_price).floor().to_u32().unwrap_or(u32::MAX)
}

/// Add a signed delta to a count, clamping at zero.
pub fn apply_count_delta(count: u32, delta: i32) -> u32 {
    let next = i64::from(count) + i64::from(delta);
    u32::try_from(next.max(0)).unwrap_or(u32::MAX)
}
