use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a consumption field (kWh) into a decimal.
///
/// Accepts plain decimal notation ("1000", "12.5", ".5", "-3") and scientific
/// notation ("1e3"). Surrounding whitespace is ignored. Numbers beyond the range
/// of `Decimal` saturate at `Decimal::MAX`/`Decimal::MIN`. Anything else,
/// including an empty field, is treated as zero consumption: the field never
/// blocks input and never reports an error.
pub fn parse_consumption(text: &str) -> Decimal {
    match try_parse(text) {
        Some(value) => value,
        None => {
            log::debug!("Consumption {:?} is not a number, using 0", text);
            Decimal::ZERO
        }
    }
}

fn try_parse(text: &str) -> Option<Decimal> {
    let text = text.trim();
    // rust_decimal tolerates digit separators, a plain number field does not
    if text.is_empty() || text.contains('_') {
        return None;
    }
    let parsed = if text.contains(|c| c == 'e' || c == 'E') {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str(text).ok()
    };
    parsed.or_else(|| saturate(text))
}

// Numeric text that Decimal cannot hold: too large saturates, too small is 0
fn saturate(text: &str) -> Option<Decimal> {
    let value = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if value.abs() < 1.0 {
        return Some(Decimal::from_f64(value).unwrap_or(Decimal::ZERO));
    }
    log::debug!("Consumption {} out of range, saturating", text);
    if value.is_sign_negative() {
        Some(Decimal::MIN)
    } else {
        Some(Decimal::MAX)
    }
}
