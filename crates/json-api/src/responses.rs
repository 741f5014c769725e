//! Shared response shapes.

use rust_decimal::{Decimal, RoundingStrategy};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Human-readable outcome of a command endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub(crate) fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Render a money amount with exactly two decimal places.
pub(crate) fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_always_carry_two_decimals() {
        assert_eq!(format_amount(Decimal::new(25, 0)), "25.00");
        assert_eq!(format_amount(Decimal::new(1050, 2)), "10.50");
        assert_eq!(format_amount(Decimal::new(10_005, 3)), "10.01");
    }
}
