//! Number formatting module
//!
//! This module builds locale-aware formatters. The four family constructors
//! (`number_formatter`, `integer_formatter`, `currency_formatter`,
//! `percent_formatter`) resolve a pattern and symbols through the locale
//! inheritance chain, compile the pattern once and return a `Formatter`
//! that can format any number of values.

mod core;
mod digits;

use std::any::Any;
use std::sync::Arc;

use tracing::debug;

use crate::error::FormatError;
use crate::locale::{
    CurrencySymbolProvider, LocaleDataProvider, resolve_currency, resolve_pattern, resolve_symbols,
};
use crate::parser::{compile_pattern, integer_only_pattern};
use crate::types::{
    Currency, CurrencyCode, FormatKind, FormatterConfig, LocaleIdentifier, NumberPattern,
    NumericValue, RoundingMode, SymbolSet, UNBOUNDED_DIGITS,
};

/// A compiled pattern plus the mutable settings used to format values
///
/// Formatting takes `&self`; every setter takes `&mut self`. A formatter can
/// be cloned cheaply (the compiled pattern is shared), so give each thread
/// its own clone if the settings are going to change.
#[derive(Debug, Clone)]
pub struct Formatter {
    kind: FormatKind,
    locale: LocaleIdentifier,
    pattern: Arc<NumberPattern>,
    symbols: SymbolSet,
    config: FormatterConfig,
}

/// Formatter for general numbers using the locale's decimal pattern
///
/// # Examples
/// ```
/// use cldr_number_format::formatter::number_formatter;
/// use cldr_number_format::locale::LocaleStore;
/// use cldr_number_format::types::LocaleIdentifier;
///
/// let store = LocaleStore::embedded().unwrap();
/// let formatter = number_formatter(&store, &LocaleIdentifier::root()).unwrap();
/// assert_eq!(formatter.format(1234.5).unwrap(), "1,234.5");
/// ```
pub fn number_formatter<P: LocaleDataProvider + ?Sized>(
    data: &P,
    locale: &LocaleIdentifier,
) -> Result<Formatter, FormatError> {
    let pattern = resolve_pattern(data, locale, FormatKind::Number.category())?;
    let mut formatter = Formatter::build(FormatKind::Number, data, locale, pattern)?;
    formatter.config.digits.set_max_integer(UNBOUNDED_DIGITS);
    Ok(formatter)
}

/// Formatter for whole numbers
///
/// Uses the decimal pattern cut at its first unquoted `.`, so fractions are
/// rounded away and no decimal separator is printed.
pub fn integer_formatter<P: LocaleDataProvider + ?Sized>(
    data: &P,
    locale: &LocaleIdentifier,
) -> Result<Formatter, FormatError> {
    let pattern = resolve_pattern(data, locale, FormatKind::Integer.category())?;
    let mut formatter =
        Formatter::build(FormatKind::Integer, data, locale, integer_only_pattern(pattern))?;
    formatter.config.digits.set_max_fraction(0);
    formatter.config.parse_integer_only = true;
    formatter.config.decimal_separator_always_shown = false;
    Ok(formatter)
}

/// Formatter for amounts in the locale's default currency
///
/// The default currency is taken from the nearest locale that names one and
/// its symbol comes from `currencies`. A locale with no default currency
/// renders the generic `¤` sign until `set_currency` is called.
pub fn currency_formatter<P, C>(
    data: &P,
    currencies: &C,
    locale: &LocaleIdentifier,
) -> Result<Formatter, FormatError>
where
    P: LocaleDataProvider + ?Sized,
    C: CurrencySymbolProvider + ?Sized,
{
    let pattern = resolve_pattern(data, locale, FormatKind::Currency.category())?;
    let mut formatter = Formatter::build(FormatKind::Currency, data, locale, pattern)?;
    if let Some(code) = resolve_currency(data, locale)? {
        formatter.set_currency_code(code, currencies);
    }
    Ok(formatter)
}

/// Formatter for ratios, scaled by 100 and rounded to whole percent
pub fn percent_formatter<P: LocaleDataProvider + ?Sized>(
    data: &P,
    locale: &LocaleIdentifier,
) -> Result<Formatter, FormatError> {
    let pattern = resolve_pattern(data, locale, FormatKind::Percent.category())?;
    let mut formatter = Formatter::build(FormatKind::Percent, data, locale, pattern)?;
    formatter.config.digits.set_max_fraction(0);
    formatter.config.set_multiplier(100)?;
    Ok(formatter)
}

impl Formatter {
    fn build<P: LocaleDataProvider + ?Sized>(
        kind: FormatKind,
        data: &P,
        locale: &LocaleIdentifier,
        pattern: &str,
    ) -> Result<Self, FormatError> {
        let compiled = compile_pattern(pattern)?;
        let symbols = resolve_symbols(data, locale)?;
        debug!(?kind, %locale, pattern, "built formatter");
        Ok(Self {
            kind,
            locale: locale.clone(),
            config: FormatterConfig::for_pattern(&compiled),
            pattern: Arc::new(compiled),
            symbols,
        })
    }

    /// Format a value
    ///
    /// Fails only with `RoundingNecessary` when the rounding mode is
    /// `Unnecessary` and the value has more fraction digits than allowed.
    pub fn format(&self, value: impl Into<NumericValue>) -> Result<String, FormatError> {
        self::core::format_value(value.into(), &self.pattern, &self.config, &self.symbols)
    }

    /// Format a dynamically typed value
    ///
    /// Accepts every primitive integer and float type up to 64 bits, `usize`,
    /// `isize` and `NumericValue`; anything else is `NotANumber`.
    pub fn format_any(&self, value: &dyn Any) -> Result<String, FormatError> {
        let numeric = numeric_from_any(value).ok_or(FormatError::NotANumber)?;
        self.format(numeric)
    }

    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    pub fn locale(&self) -> &LocaleIdentifier {
        &self.locale
    }

    pub fn pattern(&self) -> &NumberPattern {
        &self.pattern
    }

    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    pub fn is_grouping_used(&self) -> bool {
        self.config.grouping_used
    }

    pub fn set_grouping_used(&mut self, used: bool) {
        self.config.grouping_used = used;
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.config.rounding_mode
    }

    pub fn set_rounding_mode(&mut self, mode: RoundingMode) {
        self.config.rounding_mode = mode;
    }

    pub fn multiplier(&self) -> i64 {
        self.config.multiplier()
    }

    /// Set the factor applied before rounding; zero is rejected and leaves
    /// the current multiplier in place
    pub fn set_multiplier(&mut self, multiplier: i64) -> Result<(), FormatError> {
        self.config.set_multiplier(multiplier)
    }

    pub fn min_integer_digits(&self) -> usize {
        self.config.digits.min_integer()
    }

    pub fn set_min_integer_digits(&mut self, digits: usize) {
        self.config.digits.set_min_integer(digits);
    }

    pub fn max_integer_digits(&self) -> usize {
        self.config.digits.max_integer()
    }

    /// Values with more integer digits lose their most significant ones
    pub fn set_max_integer_digits(&mut self, digits: usize) {
        self.config.digits.set_max_integer(digits);
    }

    pub fn min_fraction_digits(&self) -> usize {
        self.config.digits.min_fraction()
    }

    pub fn set_min_fraction_digits(&mut self, digits: usize) {
        self.config.digits.set_min_fraction(digits);
    }

    pub fn max_fraction_digits(&self) -> usize {
        self.config.digits.max_fraction()
    }

    pub fn set_max_fraction_digits(&mut self, digits: usize) {
        self.config.digits.set_max_fraction(digits);
    }

    pub fn currency(&self) -> Option<&Currency> {
        self.config.currency.as_ref()
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.config.currency = Some(currency);
    }

    /// Switch currency, looking its symbol up for this formatter's locale
    pub fn set_currency_code<C: CurrencySymbolProvider + ?Sized>(
        &mut self,
        code: impl Into<CurrencyCode>,
        currencies: &C,
    ) {
        let code = code.into();
        let symbol = currencies.symbol_for(&code, &self.locale);
        self.config.currency = Some(Currency::new(code, symbol));
    }

    pub fn is_parse_integer_only(&self) -> bool {
        self.config.parse_integer_only
    }

    pub fn set_parse_integer_only(&mut self, integer_only: bool) {
        self.config.parse_integer_only = integer_only;
    }

    pub fn is_decimal_separator_always_shown(&self) -> bool {
        self.config.decimal_separator_always_shown
    }

    pub fn set_decimal_separator_always_shown(&mut self, shown: bool) {
        self.config.decimal_separator_always_shown = shown;
    }
}

fn numeric_from_any(value: &dyn Any) -> Option<NumericValue> {
    macro_rules! try_downcast {
        ($($t:ty),*) => {
            $(if let Some(v) = value.downcast_ref::<$t>() {
                return Some(NumericValue::from(*v));
            })*
        };
    }

    try_downcast!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
    value.downcast_ref::<NumericValue>().copied()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::LocaleNode;

    fn tiny_data() -> HashMap<LocaleIdentifier, LocaleNode> {
        let root = LocaleNode::new(LocaleIdentifier::root())
            .with_pattern(crate::types::PatternCategory::Decimal, "#,##0.###")
            .with_pattern(crate::types::PatternCategory::Currency, "¤#,##0.00")
            .with_pattern(crate::types::PatternCategory::Percent, "#,##0%");
        HashMap::from([(root.id.clone(), root)])
    }

    #[test]
    fn test_format_any() {
        let data = tiny_data();
        let formatter = number_formatter(&data, &LocaleIdentifier::root()).unwrap();
        assert_eq!(formatter.format_any(&1234_i32).unwrap(), "1,234");
        assert_eq!(formatter.format_any(&7_u8).unwrap(), "7");
        assert_eq!(formatter.format_any(&0.5_f32).unwrap(), "0.5");
        assert_eq!(
            formatter.format_any(&NumericValue::Real(2.25)).unwrap(),
            "2.25"
        );
        assert_eq!(
            formatter.format_any(&"12"),
            Err(FormatError::NotANumber)
        );
    }

    #[test]
    fn test_kind_defaults() {
        let data = tiny_data();
        let root = LocaleIdentifier::root();

        let integer = integer_formatter(&data, &root).unwrap();
        assert_eq!(integer.kind(), FormatKind::Integer);
        assert_eq!(integer.max_fraction_digits(), 0);
        assert!(integer.is_parse_integer_only());

        let percent = percent_formatter(&data, &root).unwrap();
        assert_eq!(percent.multiplier(), 100);
        assert_eq!(percent.max_fraction_digits(), 0);

        let number = number_formatter(&data, &root).unwrap();
        assert_eq!(number.max_integer_digits(), UNBOUNDED_DIGITS);
        assert_eq!(number.multiplier(), 1);
    }

    #[test]
    fn test_zero_multiplier_keeps_previous_value() {
        let data = tiny_data();
        let mut formatter = percent_formatter(&data, &LocaleIdentifier::root()).unwrap();
        assert_eq!(formatter.set_multiplier(0), Err(FormatError::ZeroMultiplier));
        assert_eq!(formatter.multiplier(), 100);
    }
}
