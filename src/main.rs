use clap::{Parser, Subcommand};

use crate::billing::PaymentForm;
use crate::cmd::{
    calc::CalcCommand, compare::CompareCommand, schema::SchemaCommand, session::SessionCommand,
};

mod billing;
mod cmd;

/// Calculate the cost of electricity including VAT
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive calculator (the default when no command is given)
    Session(SessionCommand),
    /// Calculate a single payment
    Calc(CalcCommand),
    /// Compare payments across the price range
    Compare(CompareCommand),
    /// Print the format of the JSON quote
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    log::debug!("{:?}", opts);

    match opts.command {
        Some(Command::Session(session)) => session.exec(),
        Some(Command::Calc(calc)) => calc.exec(),
        Some(Command::Compare(compare)) => compare.exec(),
        Some(Command::Schema(schema)) => schema.exec(),
        None => cmd::session::run_stdio(PaymentForm::default()),
    }
}
