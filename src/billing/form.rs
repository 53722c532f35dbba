use super::payment::{self, PaymentBreakdown};
use super::vat::VatRate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

pub const DEFAULT_CONSUMPTION: &str = "1000";
pub const DEFAULT_PRICE_PER_KWH: Decimal = dec!(0.25);
pub const MIN_PRICE_PER_KWH: Decimal = dec!(0);
pub const MAX_PRICE_PER_KWH: Decimal = dec!(1);

/// The calculator's inputs as entered by the user.
///
/// Holds no result: the total is derived from the three fields on every read,
/// so it can never be out of date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    consumption_input: String,
    price_per_kwh: Decimal,
    vat_reduced: bool,
}

/// A single change made to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ConsumptionChanged(String),
    PriceChanged(Decimal),
    VatReducedChanged(bool),
    VatToggled,
    Reset,
}

impl Default for PaymentForm {
    fn default() -> Self {
        PaymentForm {
            consumption_input: DEFAULT_CONSUMPTION.to_string(),
            price_per_kwh: DEFAULT_PRICE_PER_KWH,
            vat_reduced: VatRate::default().is_reduced(),
        }
    }
}

impl PaymentForm {
    pub fn new(consumption_input: impl Into<String>, price_per_kwh: Decimal, vat_reduced: bool) -> Self {
        PaymentForm {
            consumption_input: consumption_input.into(),
            price_per_kwh: clamp_price(price_per_kwh),
            vat_reduced,
        }
    }

    pub fn apply(&mut self, event: FormEvent) {
        log::debug!("Form event: {:?}", event);
        match event {
            FormEvent::ConsumptionChanged(text) => self.consumption_input = text,
            FormEvent::PriceChanged(price) => self.price_per_kwh = clamp_price(price),
            FormEvent::VatReducedChanged(reduced) => self.vat_reduced = reduced,
            FormEvent::VatToggled => self.vat_reduced = !self.vat_reduced,
            FormEvent::Reset => *self = PaymentForm::default(),
        }
    }

    pub fn consumption_input(&self) -> &str {
        &self.consumption_input
    }

    pub fn price_per_kwh(&self) -> Decimal {
        self.price_per_kwh
    }

    pub fn vat_reduced(&self) -> bool {
        self.vat_reduced
    }

    pub fn vat_rate(&self) -> VatRate {
        VatRate::from_reduced(self.vat_reduced)
    }

    pub fn total(&self) -> Decimal {
        payment::compute(&self.consumption_input, self.price_per_kwh, self.vat_reduced)
    }

    pub fn breakdown(&self) -> PaymentBreakdown {
        payment::breakdown(&self.consumption_input, self.price_per_kwh, self.vat_reduced)
    }

    pub fn display_total(&self) -> String {
        payment::display_total(self.total())
    }

    /// Slider caption, e.g. "Price/kWh 0.25"
    pub fn price_label(&self) -> String {
        let price = self
            .price_per_kwh
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("Price/kWh {:.2}", price)
    }
}

/// Keep a price within the slider's range
pub fn clamp_price(price: Decimal) -> Decimal {
    let clamped = price.clamp(MIN_PRICE_PER_KWH, MAX_PRICE_PER_KWH);
    if clamped != price {
        log::warn!(
            "Price {} outside {}..{}, using {}",
            price,
            MIN_PRICE_PER_KWH,
            MAX_PRICE_PER_KWH,
            clamped
        );
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let form = PaymentForm::default();
        assert_eq!(form.consumption_input(), "1000");
        assert_eq!(form.price_per_kwh(), dec!(0.25));
        assert!(form.vat_reduced());
        assert_eq!(form.vat_rate(), VatRate::Reduced);
        assert_eq!(form.display_total(), "275€");
    }

    #[test]
    fn unchecking_reduced_vat_recomputes() {
        let mut form = PaymentForm::default();
        form.apply(FormEvent::VatReducedChanged(false));
        assert_eq!(form.total(), dec!(310));
        assert_eq!(form.display_total(), "310€");
    }

    #[test]
    fn clearing_consumption_gives_zero() {
        let mut form = PaymentForm::default();
        form.apply(FormEvent::PriceChanged(dec!(0.5)));
        form.apply(FormEvent::ConsumptionChanged(String::new()));
        assert_eq!(form.consumption_input(), "");
        assert_eq!(form.display_total(), "0€");
    }

    #[test]
    fn every_keystroke_recomputes() {
        let mut form = PaymentForm::new("", dec!(1), false);
        let mut totals = Vec::new();
        for text in ["5", "50", "500"] {
            form.apply(FormEvent::ConsumptionChanged(text.to_string()));
            totals.push(form.display_total());
        }
        assert_eq!(totals, vec!["6€", "62€", "620€"]);
    }

    #[test]
    fn toggle_flips_vat() {
        let mut form = PaymentForm::default();
        form.apply(FormEvent::VatToggled);
        assert!(!form.vat_reduced());
        form.apply(FormEvent::VatToggled);
        assert!(form.vat_reduced());
    }

    #[test]
    fn price_is_clamped_to_slider_range() {
        let mut form = PaymentForm::default();
        form.apply(FormEvent::PriceChanged(dec!(1.5)));
        assert_eq!(form.price_per_kwh(), dec!(1));
        form.apply(FormEvent::PriceChanged(dec!(-0.2)));
        assert_eq!(form.price_per_kwh(), dec!(0));
        assert_eq!(PaymentForm::new("1", dec!(3), true).price_per_kwh(), dec!(1));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = PaymentForm::new("42", dec!(0.9), false);
        form.apply(FormEvent::Reset);
        assert_eq!(form, PaymentForm::default());
    }

    #[test]
    fn breakdown_matches_total() {
        let form = PaymentForm::new("320", dec!(0.4), false);
        assert_eq!(form.breakdown().total, form.total());
    }

    #[test]
    fn price_label_two_decimals() {
        assert_eq!(PaymentForm::default().price_label(), "Price/kWh 0.25");
        assert_eq!(PaymentForm::new("1", dec!(0.5), true).price_label(), "Price/kWh 0.50");
        assert_eq!(PaymentForm::new("1", dec!(0.125), true).price_label(), "Price/kWh 0.13");
        assert_eq!(PaymentForm::new("1", dec!(1), true).price_label(), "Price/kWh 1.00");
    }
}
