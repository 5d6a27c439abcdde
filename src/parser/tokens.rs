use winnow::combinator::{alt, cut_err, preceded, repeat, terminated};
use winnow::token::{literal, none_of, take_while};
use winnow::{ModalResult, Parser};

use crate::types::*;

// Number body parsers
pub fn parse_required_digit(input: &mut &str) -> ModalResult<PatternToken> {
    literal("0")
        .value(PatternToken::RequiredDigit)
        .parse_next(input)
}

pub fn parse_optional_digit(input: &mut &str) -> ModalResult<PatternToken> {
    literal("#")
        .value(PatternToken::OptionalDigit)
        .parse_next(input)
}

pub fn parse_decimal_point(input: &mut &str) -> ModalResult<PatternToken> {
    literal(".")
        .value(PatternToken::DecimalPoint)
        .parse_next(input)
}

pub fn parse_grouping_separator(input: &mut &str) -> ModalResult<PatternToken> {
    literal(",")
        .value(PatternToken::GroupingSeparator)
        .parse_next(input)
}

// Symbol placeholders
pub fn parse_percent(input: &mut &str) -> ModalResult<PatternToken> {
    literal("%").value(PatternToken::Percent).parse_next(input)
}

pub fn parse_per_mille(input: &mut &str) -> ModalResult<PatternToken> {
    literal("‰").value(PatternToken::PerMille).parse_next(input)
}

pub fn parse_minus(input: &mut &str) -> ModalResult<PatternToken> {
    literal("-").value(PatternToken::Minus).parse_next(input)
}

pub fn parse_plus(input: &mut &str) -> ModalResult<PatternToken> {
    literal("+").value(PatternToken::Plus).parse_next(input)
}

pub fn parse_currency(input: &mut &str) -> ModalResult<PatternToken> {
    take_while(1.., '¤')
        .map(|signs: &str| {
            if signs.chars().count() == 1 {
                PatternToken::Currency(CurrencyDisplay::Symbol)
            } else {
                PatternToken::Currency(CurrencyDisplay::IsoCode)
            }
        })
        .parse_next(input)
}

// Literal parsers
pub fn parse_escaped_quote(input: &mut &str) -> ModalResult<PatternToken> {
    literal("''")
        .value(PatternToken::LiteralChar('\''))
        .parse_next(input)
}

/// Quoted literal; once the opening quote matched, a missing closing quote is a hard error
pub fn parse_quoted_text(input: &mut &str) -> ModalResult<PatternToken> {
    let content_parser = repeat(0.., alt((literal("''").value('\''), none_of(['\'']))))
        .map(|chars: Vec<char>| chars.into_iter().collect::<String>());

    preceded('\'', cut_err(terminated(content_parser, '\'')))
        .map(PatternToken::QuotedText)
        .parse_next(input)
}

pub fn parse_literal_passthrough(input: &mut &str) -> ModalResult<PatternToken> {
    none_of([';', '\''])
        .map(PatternToken::LiteralChar)
        .parse_next(input)
}
