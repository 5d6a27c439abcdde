use crate::error::{PatternErrorReason, PatternSyntaxError};
use crate::parser::combinators::parse_single_token;
use crate::types::*;

/// A token with the character index it started at
pub type SpannedToken = (usize, PatternToken);

/// Digit layout derived from a number body such as `#,##0.00`
#[derive(Debug, Clone, PartialEq)]
pub struct NumberBody {
    pub grouping_size: usize,
    pub min_integer_digits: usize,
    pub min_fraction_digits: usize,
    pub max_fraction_digits: usize,
    pub decimal_separator_always_shown: bool,
}

impl Default for NumberBody {
    fn default() -> Self {
        Self {
            grouping_size: 0,
            min_integer_digits: 1,
            min_fraction_digits: 0,
            max_fraction_digits: 0,
            decimal_separator_always_shown: false,
        }
    }
}

/// Character index of `remaining` within `source`
pub fn char_position(source: &str, remaining: &str) -> usize {
    source[..source.len() - remaining.len()].chars().count()
}

/// Parse tokens up to the next unquoted `;` or the end of input
pub fn parse_sub_pattern_tokens(
    input: &mut &str,
    source: &str,
) -> Result<Vec<SpannedToken>, PatternSyntaxError> {
    let mut tokens = Vec::new();
    while !input.is_empty() && !input.starts_with(';') {
        let position = char_position(source, input);
        match parse_single_token(input) {
            Ok(token) => tokens.push((position, token)),
            // Every character but a quote tokenizes, so a failure is an open quote
            Err(_) => {
                return Err(PatternSyntaxError::new(
                    position,
                    PatternErrorReason::UnterminatedQuote,
                ));
            }
        }
    }
    Ok(tokens)
}

/// Split a sub-pattern into prefix, number body and suffix
///
/// The number body spans from the first to the last digit or separator
/// marker. A sub-pattern without any marker is all prefix.
pub fn build_sub_pattern(
    tokens: &[SpannedToken],
) -> Result<(SubPattern, Option<NumberBody>), PatternSyntaxError> {
    let first = tokens.iter().position(|(_, t)| t.is_number_body());
    let last = tokens.iter().rposition(|(_, t)| t.is_number_body());

    let (Some(first), Some(last)) = (first, last) else {
        let sub_pattern = SubPattern {
            prefix: build_affix(tokens),
            suffix: Affix::default(),
        };
        return Ok((sub_pattern, None));
    };

    let body = analyze_number_body(&tokens[first..=last])?;
    let sub_pattern = SubPattern {
        prefix: build_affix(&tokens[..first]),
        suffix: build_affix(&tokens[last + 1..]),
    };
    Ok((sub_pattern, Some(body)))
}

fn build_affix(tokens: &[SpannedToken]) -> Affix {
    let mut affix = Affix::default();
    for (_, token) in tokens {
        let part = match token {
            PatternToken::LiteralChar(c) => {
                push_literal(&mut affix, c.encode_utf8(&mut [0; 4]));
                continue;
            }
            PatternToken::QuotedText(text) => {
                push_literal(&mut affix, text);
                continue;
            }
            PatternToken::Percent => AffixToken::Percent,
            PatternToken::PerMille => AffixToken::PerMille,
            PatternToken::Minus => AffixToken::Minus,
            PatternToken::Plus => AffixToken::Plus,
            PatternToken::Currency(display) => AffixToken::Currency(*display),
            PatternToken::RequiredDigit
            | PatternToken::OptionalDigit
            | PatternToken::DecimalPoint
            | PatternToken::GroupingSeparator => continue,
        };
        affix.tokens.push(part);
    }
    affix
}

fn push_literal(affix: &mut Affix, text: &str) {
    if text.is_empty() {
        return;
    }
    match affix.tokens.last_mut() {
        Some(AffixToken::Literal(existing)) => existing.push_str(text),
        _ => affix.tokens.push(AffixToken::Literal(text.to_string())),
    }
}

fn analyze_number_body(body: &[SpannedToken]) -> Result<NumberBody, PatternSyntaxError> {
    let mut in_fraction = false;
    let mut integer_required = 0;
    let mut fraction_required = 0;
    let mut fraction_optional = 0;
    let mut last_grouping: Option<usize> = None;
    let mut digits_since_grouping = 0;

    for (position, token) in body {
        let error = |reason| Err(PatternSyntaxError::new(*position, reason));
        match token {
            PatternToken::OptionalDigit if in_fraction => fraction_optional += 1,
            PatternToken::OptionalDigit => {
                if integer_required > 0 {
                    return error(PatternErrorReason::OptionalAfterRequired);
                }
                digits_since_grouping += 1;
            }
            PatternToken::RequiredDigit if in_fraction => {
                if fraction_optional > 0 {
                    return error(PatternErrorReason::RequiredAfterOptional);
                }
                fraction_required += 1;
            }
            PatternToken::RequiredDigit => {
                integer_required += 1;
                digits_since_grouping += 1;
            }
            PatternToken::DecimalPoint => {
                if in_fraction {
                    return error(PatternErrorReason::MultipleDecimalSeparators);
                }
                check_last_group(last_grouping, digits_since_grouping)?;
                in_fraction = true;
            }
            PatternToken::GroupingSeparator => {
                if in_fraction {
                    return error(PatternErrorReason::GroupingInFraction);
                }
                last_grouping = Some(*position);
                digits_since_grouping = 0;
            }
            _ => return error(PatternErrorReason::LiteralInNumberBody),
        }
    }
    if !in_fraction {
        check_last_group(last_grouping, digits_since_grouping)?;
    }

    let max_fraction_digits = fraction_required + fraction_optional;
    Ok(NumberBody {
        // Only the innermost group counts
        grouping_size: if last_grouping.is_some() {
            digits_since_grouping
        } else {
            0
        },
        min_integer_digits: integer_required,
        min_fraction_digits: fraction_required,
        max_fraction_digits,
        decimal_separator_always_shown: in_fraction && max_fraction_digits == 0,
    })
}

fn check_last_group(
    last_grouping: Option<usize>,
    digits_since_grouping: usize,
) -> Result<(), PatternSyntaxError> {
    match last_grouping {
        Some(position) if digits_since_grouping == 0 => Err(PatternSyntaxError::new(
            position,
            PatternErrorReason::EmptyGroup,
        )),
        _ => Ok(()),
    }
}
