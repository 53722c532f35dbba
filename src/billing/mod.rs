pub mod consumption;
pub mod form;
pub mod payment;
pub mod vat;

// Flat public surface for the calculator.
pub use consumption::parse_consumption;
pub use form::{FormEvent, PaymentForm};
pub use payment::{display_total, PaymentBreakdown};
pub use vat::VatRate;
