//! Helper functions

pub mod date;

pub use date::{DateFormat, Locale};
