use winnow::combinator::alt;
use winnow::{ModalResult, Parser};

use crate::parser::tokens::*;
use crate::types::*;

/// Parse a single token from a sub-pattern
///
/// `;` is never consumed here: it separates the positive and negative
/// sub-patterns and is handled by the caller.
pub fn parse_single_token(input: &mut &str) -> ModalResult<PatternToken> {
    let number_body = alt((
        parse_required_digit,
        parse_optional_digit,
        parse_decimal_point,
        parse_grouping_separator,
    ));

    let symbols = alt((
        parse_percent,
        parse_per_mille,
        parse_minus,
        parse_plus,
        parse_currency,
    ));

    let literals = alt((
        parse_escaped_quote,
        parse_quoted_text,
        parse_literal_passthrough,
    ));

    alt((number_body, symbols, literals)).parse_next(input)
}
