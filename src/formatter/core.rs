use crate::error::FormatError;
use crate::formatter::digits::DigitList;
use crate::types::{
    Affix, AffixToken, CurrencyDisplay, FormatterConfig, NumberPattern, NumericValue, SymbolSet,
};

/// Rendered for `¤` when no currency is configured
pub(super) const GENERIC_CURRENCY_SIGN: &str = "¤";
/// Rendered for `¤¤` when no currency is configured
pub(super) const UNKNOWN_CURRENCY_CODE: &str = "XXX";

/// Format a value with a compiled pattern and a formatter's current settings
///
/// NaN renders as the NaN symbol alone. Infinities render the infinity
/// symbol inside the affixes of their sign. Everything else goes through an
/// exact digit list: multiplier, rounding, digit clamps, grouping, affixes.
pub(super) fn format_value(
    value: NumericValue,
    pattern: &NumberPattern,
    config: &FormatterConfig,
    symbols: &SymbolSet,
) -> Result<String, FormatError> {
    let multiplier = config.multiplier();

    let (mut negative, mut digits) = match value.normalized() {
        NumericValue::Real(v) if v.is_nan() => return Ok(symbols.nan.clone()),
        NumericValue::Real(v) if v.is_infinite() => {
            let negative = (v < 0.0) != (multiplier < 0);
            return Ok(wrap_in_affixes(&symbols.infinity, negative, pattern, config, symbols));
        }
        NumericValue::Real(v) => (v.is_sign_negative(), DigitList::from_f64(v)),
        NumericValue::Integer(i) => (i < 0, DigitList::from_integer(i.unsigned_abs())),
        NumericValue::Unsigned(u) => (false, DigitList::from_integer(u)),
    };

    digits.multiply(multiplier.unsigned_abs());
    if multiplier < 0 {
        negative = !negative;
    }

    digits.round(config.digits.max_fraction(), config.rounding_mode, negative)?;
    if digits.is_zero() {
        negative = false;
    }

    let body = render_number(&digits, pattern.grouping_size, config, symbols);
    Ok(wrap_in_affixes(&body, negative, pattern, config, symbols))
}

/// Digits, grouping and decimal separator, without sign or affixes
fn render_number(
    digits: &DigitList,
    grouping_size: usize,
    config: &FormatterConfig,
    symbols: &SymbolSet,
) -> String {
    let bounds = &config.digits;

    let mut integer = digits.integer_digits();
    if integer.len() > bounds.max_integer() {
        integer = integer.split_off(integer.len() - bounds.max_integer());
    }
    if integer.len() < bounds.min_integer() {
        integer = format!("{integer:0>width$}", width = bounds.min_integer());
    }

    let mut fraction = digits.fraction_digits();
    while fraction.len() < bounds.min_fraction() {
        fraction.push('0');
    }

    if integer.is_empty() && fraction.is_empty() {
        integer.push('0');
    }

    let mut result = if config.grouping_used && grouping_size > 0 {
        group_digits(&integer, grouping_size, &symbols.group)
    } else {
        integer
    };

    if !fraction.is_empty() || config.decimal_separator_always_shown {
        result.push_str(&symbols.decimal);
        result.push_str(&fraction);
    }
    result
}

/// Insert `separator` every `size` digits counting from the right
fn group_digits(integer: &str, size: usize, separator: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + (len / size) * separator.len());
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % size == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

fn wrap_in_affixes(
    body: &str,
    negative: bool,
    pattern: &NumberPattern,
    config: &FormatterConfig,
    symbols: &SymbolSet,
) -> String {
    let mut result = String::new();
    let sub = match (&pattern.negative, negative) {
        (Some(explicit), true) => explicit,
        (None, true) => {
            result.push_str(&symbols.minus_sign);
            &pattern.positive
        }
        (_, false) => &pattern.positive,
    };

    write_affix(&mut result, &sub.prefix, config, symbols);
    result.push_str(body);
    write_affix(&mut result, &sub.suffix, config, symbols);
    result
}

fn write_affix(out: &mut String, affix: &Affix, config: &FormatterConfig, symbols: &SymbolSet) {
    for token in &affix.tokens {
        let text = match token {
            AffixToken::Literal(text) => text.as_str(),
            AffixToken::Percent => &symbols.percent_sign,
            AffixToken::PerMille => &symbols.per_mille,
            AffixToken::Minus => &symbols.minus_sign,
            AffixToken::Plus => &symbols.plus_sign,
            AffixToken::Currency(CurrencyDisplay::Symbol) => match &config.currency {
                Some(currency) => &currency.symbol,
                None => GENERIC_CURRENCY_SIGN,
            },
            AffixToken::Currency(CurrencyDisplay::IsoCode) => match &config.currency {
                Some(currency) => currency.code.as_str(),
                None => UNKNOWN_CURRENCY_CODE,
            },
        };
        out.push_str(text);
    }
}
