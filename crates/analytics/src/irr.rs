use crate::error::AnalyticsError;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

/// Implied compound annual growth rate, in percent rounded to two decimals,
/// of moving from `current_price` to `objective_price` by `objective_year`.
///
/// A target year that is not after `current_year` is treated as a one-year
/// horizon. A non-positive current price has no meaningful return and yields
/// zero. A target below the current price gives a negative rate.
pub fn calculate_irr(
    current_price: Decimal,
    objective_price: Decimal,
    objective_year: i32,
    current_year: i32,
) -> Result<Decimal, AnalyticsError> {
    if current_price <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    if objective_price.is_sign_negative() {
        return Err(AnalyticsError::InvalidInput(
            "irr".to_string(),
            format!("objective price {objective_price} is negative"),
        ));
    }

    let years = (objective_year - current_year).max(1);
    let ratio = objective_price.checked_div(current_price).ok_or_else(|| {
        AnalyticsError::Calculation(format!(
            "Price ratio {objective_price} / {current_price} is out of range"
        ))
    })?;

    let growth = if years == 1 || ratio.is_zero() {
        ratio
    } else {
        let exponent = Decimal::ONE / Decimal::from(years);
        ratio.checked_powd(exponent).ok_or_else(|| {
            AnalyticsError::Calculation(format!(
                "Failed to take the {years}-year root of the price ratio {ratio}"
            ))
        })?
    };

    let irr = (growth - Decimal::ONE)
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| AnalyticsError::Calculation(format!("Growth factor {growth} is out of range")))?;
    tracing::debug!(%current_price, %objective_price, years, %irr, "Computed target IRR.");
    Ok(irr.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
