//! Schema command - print the format of `calc --json` output

use crate::billing::PaymentBreakdown;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the quote
    JsonSchema,
    /// Field descriptions
    Fields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::Fields => self.print_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(PaymentBreakdown);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_fields(&self) -> anyhow::Result<()> {
        println!("Quote Output Format");
        println!("===================");
        println!();
        for (name, description) in FIELD_DESCRIPTIONS {
            println!("{:16}  {}", name, description);
        }
        println!();
        println!("Decimal values are written as strings to keep them exact");
        Ok(())
    }
}

const FIELD_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "consumption_kwh",
        "Consumption in kWh (0 when the input was not a number)",
    ),
    ("price_per_kwh", "Price per kWh, between 0 and 1"),
    ("vat_rate", "0.10 (reduced) or 0.24 (standard)"),
    ("cost", "consumption_kwh * price_per_kwh"),
    ("vat", "VAT due on the cost"),
    ("total", "Amount payable, unrounded"),
    ("display", "Total rounded to a whole amount with currency symbol"),
];
