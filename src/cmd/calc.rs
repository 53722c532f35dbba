//! Calc command - one-shot payment quote

use crate::billing::form::{DEFAULT_CONSUMPTION, DEFAULT_PRICE_PER_KWH};
use crate::billing::{PaymentBreakdown, PaymentForm};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct CalcCommand {
    /// Consumption in kWh (anything that is not a number counts as 0)
    #[arg(short, long, default_value = DEFAULT_CONSUMPTION, allow_hyphen_values = true)]
    consumption: String,

    /// Price per kWh (0.00 to 1.00)
    #[arg(short, long, default_value_t = DEFAULT_PRICE_PER_KWH)]
    price: Decimal,

    /// Apply standard VAT (24%) instead of reduced VAT (10%)
    #[arg(long)]
    standard_vat: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl CalcCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let form = PaymentForm::new(self.consumption.as_str(), self.price, !self.standard_vat);
        let breakdown = form.breakdown();
        log::info!(
            "{:?} kWh at {} with VAT {}: {}",
            form.consumption_input(),
            form.price_per_kwh(),
            form.vat_rate(),
            breakdown.display
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        } else {
            print_breakdown(&breakdown);
        }
        Ok(())
    }
}

fn print_breakdown(breakdown: &PaymentBreakdown) {
    println!("Consumption:  {} kWh", breakdown.consumption_kwh);
    println!("Price/kWh:    {:.2}", breakdown.price_per_kwh.round_dp(2));
    println!("Cost:         {:.2}", breakdown.cost.round_dp(2));
    println!(
        "VAT {:>3}%:     {:.2}",
        (breakdown.vat_rate * Decimal::ONE_HUNDRED).normalize(),
        breakdown.vat.round_dp(2)
    );
    println!("Total:        {}", breakdown.display);
}
