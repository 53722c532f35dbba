//! Session command - the calculator form as an interactive prompt

use crate::billing::form::{DEFAULT_CONSUMPTION, DEFAULT_PRICE_PER_KWH};
use crate::billing::{FormEvent, PaymentForm, VatRate};
use clap::Args;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

#[derive(Args, Debug)]
pub struct SessionCommand {
    /// Initial consumption in kWh (anything that is not a number counts as 0)
    #[arg(short, long, default_value = DEFAULT_CONSUMPTION, allow_hyphen_values = true)]
    consumption: String,

    /// Initial price per kWh (0.00 to 1.00)
    #[arg(short, long, default_value_t = DEFAULT_PRICE_PER_KWH)]
    price: Decimal,

    /// Start with standard VAT (24%) instead of reduced VAT (10%)
    #[arg(long)]
    standard_vat: bool,
}

impl SessionCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let form = PaymentForm::new(self.consumption.as_str(), self.price, !self.standard_vat);
        run_stdio(form)
    }
}

/// Run a session on stdin/stdout
pub fn run_stdio(form: PaymentForm) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(form, stdout.lock()).run(stdin.lock())
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown command '{0}', type 'help' for a list of commands")]
    UnknownCommand(String),
    #[error("'{0}' needs a value")]
    MissingArgument(&'static str),
    #[error("invalid price '{0}'")]
    InvalidPrice(String),
    #[error("expected on, off, reduced or standard, got '{0}'")]
    InvalidToggle(String),
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(FormEvent),
    Show,
    Help,
    Quit,
}

/// Parse one line of input. Blank lines parse to `None`.
pub fn parse_input(line: &str) -> Result<Option<Input>, SessionError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    let input = match command.to_lowercase().as_str() {
        // an empty value clears the field
        "c" | "consumption" => Input::Event(FormEvent::ConsumptionChanged(arg.to_string())),
        "p" | "price" => {
            if arg.is_empty() {
                return Err(SessionError::MissingArgument("price"));
            }
            let price = Decimal::from_str(arg)
                .map_err(|_| SessionError::InvalidPrice(arg.to_string()))?;
            Input::Event(FormEvent::PriceChanged(price))
        }
        "v" | "vat" => match arg.to_lowercase().as_str() {
            "" => Input::Event(FormEvent::VatToggled),
            "on" => Input::Event(FormEvent::VatReducedChanged(true)),
            "off" => Input::Event(FormEvent::VatReducedChanged(false)),
            other => match VatRate::from_str(other) {
                Some(rate) => Input::Event(FormEvent::VatReducedChanged(rate.is_reduced())),
                None => return Err(SessionError::InvalidToggle(arg.to_string())),
            },
        },
        "reset" => Input::Event(FormEvent::Reset),
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(SessionError::UnknownCommand(other.to_string())),
    };
    Ok(Some(input))
}

/// Interactive calculator. Every change is applied and the result redrawn
/// before the next line is read.
pub struct Session<W: Write> {
    form: PaymentForm,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(form: PaymentForm, out: W) -> Self {
        Session { form, out }
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> anyhow::Result<()> {
        self.render_form()?;
        self.prompt()?;
        for line in input.lines() {
            let line = line?;
            match parse_input(&line) {
                Ok(Some(Input::Quit)) => break,
                Ok(Some(input)) => self.handle(input)?,
                Ok(None) => {}
                Err(e) => {
                    log::debug!("Rejected input {:?}: {}", line, e);
                    writeln!(self.out, "error: {}", e)?;
                }
            }
            self.prompt()?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn handle(&mut self, input: Input) -> io::Result<()> {
        match input {
            Input::Event(FormEvent::Reset) => {
                self.form.apply(FormEvent::Reset);
                self.render_form()
            }
            Input::Event(event) => {
                self.form.apply(event);
                self.render_result()
            }
            Input::Show => self.render_form(),
            Input::Help => self.render_help(),
            Input::Quit => Ok(()),
        }
    }

    fn render_form(&mut self) -> io::Result<()> {
        let checkbox = if self.form.vat_reduced() { "[x]" } else { "[ ]" };
        writeln!(self.out, "Cost of electricity")?;
        writeln!(self.out, "Consumption in kWh: {}", self.form.consumption_input())?;
        writeln!(self.out, "{}", self.form.price_label())?;
        writeln!(self.out, "{} {}", checkbox, VatRate::Reduced.label())?;
        self.render_result()
    }

    fn render_result(&mut self) -> io::Result<()> {
        writeln!(self.out, "Total: {}", self.form.display_total())
    }

    fn render_help(&mut self) -> io::Result<()> {
        for (usage, description) in HELP {
            writeln!(self.out, "  {:20} {}", usage, description)?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }
}

const HELP: &[(&str, &str)] = &[
    ("c, consumption <kWh>", "set consumption (blank clears)"),
    ("p, price <value>", "set price per kWh (0.00 to 1.00)"),
    ("v, vat [on|off]", "toggle or set reduced VAT (10%)"),
    ("show", "show the whole form"),
    ("reset", "restore default values"),
    ("help", "show this list"),
    ("quit", "leave"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn run(form: PaymentForm, input: &str) -> (PaymentForm, String) {
        let mut out = Vec::new();
        let form = {
            let mut session = Session::new(form, &mut out);
            session.run(Cursor::new(input)).unwrap();
            session.form.clone()
        };
        (form, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parse_consumption_keeps_text() {
        assert_eq!(
            parse_input("c 1200").unwrap(),
            Some(Input::Event(FormEvent::ConsumptionChanged("1200".to_string())))
        );
        assert_eq!(
            parse_input("consumption abc").unwrap(),
            Some(Input::Event(FormEvent::ConsumptionChanged("abc".to_string())))
        );
        assert_eq!(
            parse_input("c").unwrap(),
            Some(Input::Event(FormEvent::ConsumptionChanged(String::new())))
        );
    }

    #[test]
    fn parse_price() {
        assert_eq!(
            parse_input("p 0.3").unwrap(),
            Some(Input::Event(FormEvent::PriceChanged(dec!(0.3))))
        );
        assert_eq!(
            parse_input("price x"),
            Err(SessionError::InvalidPrice("x".to_string()))
        );
        assert_eq!(parse_input("price"), Err(SessionError::MissingArgument("price")));
    }

    #[test]
    fn parse_vat() {
        assert_eq!(parse_input("v").unwrap(), Some(Input::Event(FormEvent::VatToggled)));
        assert_eq!(
            parse_input("vat off").unwrap(),
            Some(Input::Event(FormEvent::VatReducedChanged(false)))
        );
        assert_eq!(
            parse_input("vat standard").unwrap(),
            Some(Input::Event(FormEvent::VatReducedChanged(false)))
        );
        assert_eq!(
            parse_input("VAT Reduced").unwrap(),
            Some(Input::Event(FormEvent::VatReducedChanged(true)))
        );
        assert_eq!(
            parse_input("vat maybe"),
            Err(SessionError::InvalidToggle("maybe".to_string()))
        );
    }

    #[test]
    fn parse_other_commands() {
        assert_eq!(parse_input("   ").unwrap(), None);
        assert_eq!(parse_input("show").unwrap(), Some(Input::Show));
        assert_eq!(parse_input("quit").unwrap(), Some(Input::Quit));
        assert_eq!(parse_input("reset").unwrap(), Some(Input::Event(FormEvent::Reset)));
        assert_eq!(
            parse_input("jump 3"),
            Err(SessionError::UnknownCommand("jump".to_string()))
        );
    }

    #[test]
    fn initial_render_shows_defaults() {
        let (_, out) = run(PaymentForm::default(), "");
        assert!(out.contains("Cost of electricity"));
        assert!(out.contains("Consumption in kWh: 1000"));
        assert!(out.contains("Price/kWh 0.25"));
        assert!(out.contains("[x] VAT 10%"));
        assert!(out.contains("Total: 275€"));
    }

    #[test]
    fn each_change_redraws_total() {
        let (form, out) = run(PaymentForm::default(), "v\nc 500\np 1\nquit\nc 1\n");
        let totals: Vec<_> = out.lines().filter_map(|l| l.split("Total: ").nth(1)).collect();
        assert_eq!(totals, vec!["275€", "310€", "155€", "620€"]);
        // input after quit is ignored
        assert_eq!(form.consumption_input(), "500");
    }

    #[test]
    fn cleared_consumption_shows_zero() {
        let (_, out) = run(PaymentForm::new("1000", dec!(0.5), true), "c\n");
        assert!(out.contains("Total: 0€"));
    }

    #[test]
    fn errors_keep_session_alive() {
        let (form, out) = run(PaymentForm::default(), "fly\np abc\nvat off\n");
        assert!(out.contains("error: unknown command 'fly'"));
        assert!(out.contains("error: invalid price 'abc'"));
        assert!(out.contains("Total: 310€"));
        assert!(!form.vat_reduced());
    }

    #[test]
    fn reset_redraws_form() {
        let (form, out) = run(PaymentForm::new("5", dec!(0.9), false), "reset\n");
        assert_eq!(form, PaymentForm::default());
        assert!(out.contains("[ ] VAT 10%"));
        assert!(out.ends_with("Total: 275€\n> \n"));
    }

    #[test]
    fn price_above_range_is_clamped() {
        let (form, out) = run(PaymentForm::default(), "p 7\nshow\n");
        assert_eq!(form.price_per_kwh(), dec!(1));
        assert!(out.contains("Price/kWh 1.00"));
    }
}
