use tracing::trace;

use crate::error::{PatternErrorReason, PatternSyntaxError};
use crate::parser::sections::{build_sub_pattern, char_position, parse_sub_pattern_tokens};
use crate::types::*;

/// Compile a CLDR decimal pattern
///
/// This is the main entry point of the parser. A pattern is a positive
/// sub-pattern optionally followed by `;` and a negative sub-pattern. Digit
/// counts and grouping come from the positive sub-pattern; the negative one
/// only contributes its prefix and suffix.
///
/// # Arguments
/// * `pattern` - The pattern string, e.g. `#,##0.###`
///
/// # Returns
/// * `Result<NumberPattern, PatternSyntaxError>` - The compiled pattern, or the
///   position and reason of the first syntax error
///
/// # Examples
/// ```
/// use cldr_number_format::parser::compile_pattern;
///
/// let pattern = compile_pattern("#,##0.###").unwrap();
/// assert_eq!(pattern.grouping_size, 3);
/// assert_eq!(pattern.max_fraction_digits, 3);
/// ```
pub fn compile_pattern(pattern: &str) -> Result<NumberPattern, PatternSyntaxError> {
    trace!(pattern, "compiling number pattern");
    let mut input = pattern;

    let positive_tokens = parse_sub_pattern_tokens(&mut input, pattern)?;

    let mut negative_tokens = None;
    if let Some(rest) = input.strip_prefix(';') {
        input = rest;
        negative_tokens = Some(parse_sub_pattern_tokens(&mut input, pattern)?);
    }

    if !input.is_empty() {
        return Err(PatternSyntaxError::new(
            char_position(pattern, input),
            PatternErrorReason::TooManySubPatterns,
        ));
    }

    let (positive, body) = build_sub_pattern(&positive_tokens)?;
    let negative = match negative_tokens {
        Some(tokens) if !tokens.is_empty() => Some(build_sub_pattern(&tokens)?.0),
        _ => None,
    };
    let body = body.unwrap_or_default();

    let has_currency_placeholder = [Some(&positive), negative.as_ref()]
        .into_iter()
        .flatten()
        .any(|sub| sub.prefix.has_currency() || sub.suffix.has_currency());

    Ok(NumberPattern {
        positive,
        negative,
        grouping_size: body.grouping_size,
        min_integer_digits: body.min_integer_digits,
        max_integer_digits: UNBOUNDED_DIGITS,
        min_fraction_digits: body.min_fraction_digits,
        max_fraction_digits: body.max_fraction_digits,
        decimal_separator_always_shown: body.decimal_separator_always_shown,
        has_currency_placeholder,
    })
}

/// Cut a pattern at its first unquoted `.`
///
/// Used to derive integer patterns from decimal ones: `#,##0.###` becomes
/// `#,##0`. Quoted dots such as `'.'` are kept.
pub fn integer_only_pattern(pattern: &str) -> &str {
    let mut in_quote = false;
    for (idx, c) in pattern.char_indices() {
        match c {
            '\'' => in_quote = !in_quote,
            '.' if !in_quote => return &pattern[..idx],
            _ => {}
        }
    }
    pattern
}
