use super::consumption::parse_consumption;
use super::vat::VatRate;
use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Currency symbol appended to displayed totals
pub const CURRENCY_SYMBOL: &str = "€";

/// Total payment for the given consumption text, price per kWh and VAT choice.
///
/// Unparseable consumption counts as zero. The result is not rounded.
pub fn compute(consumption_text: &str, price_per_kwh: Decimal, vat_reduced: bool) -> Decimal {
    breakdown(consumption_text, price_per_kwh, vat_reduced).total
}

/// Same as [`compute`] but keeps the intermediate values
pub fn breakdown(
    consumption_text: &str,
    price_per_kwh: Decimal,
    vat_reduced: bool,
) -> PaymentBreakdown {
    let consumption = parse_consumption(consumption_text);
    PaymentBreakdown::new(consumption, price_per_kwh, VatRate::from_reduced(vat_reduced))
}

/// Cost of consumption before and after VAT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentBreakdown {
    /// Consumption in kWh (0 when the input was not a number)
    #[schemars(with = "String")]
    pub consumption_kwh: Decimal,
    /// Price per kWh
    #[schemars(with = "String")]
    pub price_per_kwh: Decimal,
    /// VAT rate as a fraction (0.10 reduced, 0.24 standard)
    #[schemars(with = "String")]
    pub vat_rate: Decimal,
    /// consumption_kwh * price_per_kwh
    #[schemars(with = "String")]
    pub cost: Decimal,
    /// VAT due on the cost
    #[schemars(with = "String")]
    pub vat: Decimal,
    /// Amount payable, unrounded
    #[schemars(with = "String")]
    pub total: Decimal,
    /// Amount payable as displayed, e.g. "275€"
    pub display: String,
}

impl PaymentBreakdown {
    pub fn new(consumption_kwh: Decimal, price_per_kwh: Decimal, vat: VatRate) -> Self {
        let cost = saturating_mul(consumption_kwh, price_per_kwh);
        let total = saturating_mul(cost, vat.multiplier());
        log::debug!(
            "{} kWh at {} = {}, with VAT {} = {}",
            consumption_kwh,
            price_per_kwh,
            cost,
            vat,
            total
        );
        PaymentBreakdown {
            consumption_kwh,
            price_per_kwh,
            vat_rate: vat.rate(),
            cost: cost.normalize(),
            vat: total.saturating_sub(cost).normalize(),
            total: total.normalize(),
            display: display_total(total),
        }
    }
}

/// Round to a whole amount (half away from zero) and append the currency symbol
pub fn display_total(total: Decimal) -> String {
    let rounded = total.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{}", rounded.normalize(), CURRENCY_SYMBOL)
}

// Only reachable with inputs close to Decimal::MAX, clamp rather than panic
fn saturating_mul(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_mul(rhs).unwrap_or_else(|| {
        log::warn!("{} * {} overflows, clamping", lhs, rhs);
        if lhs.is_sign_negative() != rhs.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}
