use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// VAT rate applied on top of the electricity cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VatRate {
    #[default]
    Reduced,
    Standard,
}

impl VatRate {
    /// Reduced rate when the checkbox is ticked, standard otherwise
    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            VatRate::Reduced
        } else {
            VatRate::Standard
        }
    }

    pub fn from_str(s: &str) -> Option<VatRate> {
        match s.to_lowercase().as_str() {
            "reduced" => Some(VatRate::Reduced),
            "standard" => Some(VatRate::Standard),
            _ => None,
        }
    }

    /// Rate as a fraction (e.g. 0.10 for 10%)
    pub fn rate(&self) -> Decimal {
        match self {
            VatRate::Reduced => dec!(0.10),  // 10%
            VatRate::Standard => dec!(0.24), // 24%
        }
    }

    /// Multiplier turning a net cost into the amount payable
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE + self.rate()
    }

    pub fn is_reduced(&self) -> bool {
        matches!(self, VatRate::Reduced)
    }

    /// Rate as a whole percentage
    pub fn percent(&self) -> Decimal {
        (self.rate() * dec!(100)).normalize()
    }

    /// Checkbox label, e.g. "VAT 10%"
    pub fn label(&self) -> String {
        format!("VAT {}", self)
    }
}

impl std::fmt::Display for VatRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
