//! Compare command - totals across the whole price range for one consumption

use crate::billing::form::{DEFAULT_CONSUMPTION, MAX_PRICE_PER_KWH, MIN_PRICE_PER_KWH};
use crate::billing::{display_total, parse_consumption, PaymentBreakdown, VatRate};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Smallest price difference the two-decimal price column can show
const MIN_STEP: Decimal = dec!(0.01);

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Consumption in kWh (anything that is not a number counts as 0)
    #[arg(short, long, default_value = DEFAULT_CONSUMPTION, allow_hyphen_values = true)]
    consumption: String,

    /// Price increment between rows (0.01 to 1.00)
    #[arg(short, long, default_value_t = dec!(0.05))]
    step: Decimal,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if self.step < MIN_STEP || self.step > MAX_PRICE_PER_KWH {
            anyhow::bail!(
                "Step must be between {} and {}, got {}",
                MIN_STEP,
                MAX_PRICE_PER_KWH,
                self.step
            );
        }

        let consumption = parse_consumption(&self.consumption);
        let rows = build_rows(consumption, self.step);
        log::info!("Compared {} prices for {} kWh", rows.len(), consumption);

        if self.csv {
            self.write_csv(&rows)
        } else {
            self.print_table(consumption, &rows);
            Ok(())
        }
    }

    fn print_table(&self, consumption: Decimal, rows: &[CompareRow]) {
        println!("Consumption: {} kWh", consumption);
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn write_csv(&self, rows: &[CompareRow]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Row for the compare table output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
pub struct CompareRow {
    #[tabled(rename = "Price/kWh")]
    pub price_per_kwh: String,

    #[tabled(rename = "Cost")]
    pub cost: String,

    #[tabled(rename = "VAT 10%")]
    pub total_reduced_vat: String,

    #[tabled(rename = "VAT 24%")]
    pub total_standard_vat: String,
}

/// One row per price from the bottom to the top of the slider range.
/// The top of the range is always included even when the step does not land on it.
pub fn build_rows(consumption: Decimal, step: Decimal) -> Vec<CompareRow> {
    let mut rows = Vec::new();
    let mut price = MIN_PRICE_PER_KWH;
    loop {
        rows.push(row(consumption, price));
        if price >= MAX_PRICE_PER_KWH {
            break;
        }
        price = (price + step).min(MAX_PRICE_PER_KWH);
    }
    rows
}

fn row(consumption: Decimal, price: Decimal) -> CompareRow {
    let reduced = PaymentBreakdown::new(consumption, price, VatRate::Reduced);
    let standard = PaymentBreakdown::new(consumption, price, VatRate::Standard);
    CompareRow {
        price_per_kwh: format!("{:.2}", price.round_dp(2)),
        cost: format!("{:.2}", reduced.cost.round_dp(2)),
        total_reduced_vat: display_total(reduced.total),
        total_standard_vat: display_total(standard.total),
    }
}
