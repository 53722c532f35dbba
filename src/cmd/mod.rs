pub mod calc;
pub mod compare;
pub mod schema;
pub mod session;
