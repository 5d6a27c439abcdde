pub mod error;
pub mod formatter;
pub mod locale;
pub mod parser;
pub mod types;

// Main API
pub use error::{FormatError, LocaleError, PatternErrorReason, PatternSyntaxError};
pub use formatter::{
    Formatter, currency_formatter, integer_formatter, number_formatter, percent_formatter,
};
pub use locale::{CurrencySymbolProvider, LocaleDataProvider, LocaleStore};
pub use parser::compile_pattern;
pub use types::*;

#[cfg(test)]
mod tests;
