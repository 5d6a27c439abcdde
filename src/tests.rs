use pretty_assertions::assert_eq;

use crate::error::*;
use crate::parser::*;
use crate::types::*;

fn literal(text: &str) -> Affix {
    Affix {
        tokens: vec![AffixToken::Literal(text.to_string())],
    }
}

fn syntax_error(pattern: &str) -> (usize, PatternErrorReason) {
    let error = compile_pattern(pattern).unwrap_err();
    (error.position, error.reason)
}

#[test]
fn test_standard_decimal_pattern() {
    let result = compile_pattern("#,##0.###").unwrap();
    assert_eq!(result.grouping_size, 3);
    assert_eq!(result.min_integer_digits, 1);
    assert_eq!(result.max_integer_digits, UNBOUNDED_DIGITS);
    assert_eq!(result.min_fraction_digits, 0);
    assert_eq!(result.max_fraction_digits, 3);
    assert!(!result.decimal_separator_always_shown);
    assert!(!result.has_currency_placeholder);
    assert!(result.positive.prefix.is_empty());
    assert!(result.positive.suffix.is_empty());
    assert!(result.negative.is_none());
}

#[test]
fn test_empty_pattern() {
    assert_eq!(compile_pattern("").unwrap(), NumberPattern::default());
}

#[test]
fn test_fixed_fraction() {
    let result = compile_pattern("0.00").unwrap();
    assert_eq!(result.grouping_size, 0);
    assert_eq!(result.min_integer_digits, 1);
    assert_eq!(result.min_fraction_digits, 2);
    assert_eq!(result.max_fraction_digits, 2);
}

#[test]
fn test_only_innermost_group_counts() {
    let result = compile_pattern("#,##,##0.###").unwrap();
    assert_eq!(result.grouping_size, 3);

    let result = compile_pattern("#,#0").unwrap();
    assert_eq!(result.grouping_size, 2);
}

#[test]
fn test_negative_sub_pattern() {
    let result = compile_pattern("#,##0.00;(#,##0.00)").unwrap();
    let negative = result.negative.unwrap();
    assert_eq!(negative.prefix, literal("("));
    assert_eq!(negative.suffix, literal(")"));
    assert_eq!(result.min_fraction_digits, 2);

    // Digit counts come only from the positive side
    let result = compile_pattern("0.0;-0.000").unwrap();
    assert_eq!(result.max_fraction_digits, 1);
    assert_eq!(
        result.negative.unwrap().prefix.tokens,
        vec![AffixToken::Minus]
    );
}

#[test]
fn test_empty_negative_is_absent() {
    let result = compile_pattern("#,##0;").unwrap();
    assert!(result.negative.is_none());
}

#[test]
fn test_currency_placeholders() {
    let result = compile_pattern("¤#,##0.00").unwrap();
    assert!(result.has_currency_placeholder);
    assert_eq!(
        result.positive.prefix.tokens,
        vec![AffixToken::Currency(CurrencyDisplay::Symbol)]
    );

    let result = compile_pattern("¤¤ #,##0.00").unwrap();
    assert_eq!(
        result.positive.prefix.tokens,
        vec![
            AffixToken::Currency(CurrencyDisplay::IsoCode),
            AffixToken::Literal(" ".to_string()),
        ]
    );

    let result = compile_pattern("#,##0.00;¤-#,##0.00").unwrap();
    assert!(result.has_currency_placeholder);
}

#[test]
fn test_percent_suffix() {
    let result = compile_pattern("#,##0%").unwrap();
    assert_eq!(result.positive.suffix.tokens, vec![AffixToken::Percent]);
    assert_eq!(result.max_fraction_digits, 0);

    let result = compile_pattern("#,##0\u{a0}%").unwrap();
    assert_eq!(
        result.positive.suffix.tokens,
        vec![
            AffixToken::Literal("\u{a0}".to_string()),
            AffixToken::Percent,
        ]
    );
}

#[test]
fn test_quoted_literals() {
    let result = compile_pattern("'#'#").unwrap();
    assert_eq!(result.positive.prefix, literal("#"));
    assert_eq!(result.min_integer_digits, 0);

    let result = compile_pattern("'o''clock' #").unwrap();
    assert_eq!(result.positive.prefix, literal("o'clock "));

    let result = compile_pattern("#''").unwrap();
    assert_eq!(result.positive.suffix, literal("'"));

    let result = compile_pattern("'-'0").unwrap();
    assert_eq!(result.positive.prefix, literal("-"));
}

#[test]
fn test_trailing_decimal_point() {
    let result = compile_pattern("#,##0.").unwrap();
    assert!(result.decimal_separator_always_shown);
    assert_eq!(result.max_fraction_digits, 0);
}

#[test]
fn test_pattern_without_number_body() {
    let result = compile_pattern("abc").unwrap();
    assert_eq!(result.positive.prefix, literal("abc"));
    assert_eq!(result.min_integer_digits, 1);
    assert_eq!(result.max_fraction_digits, 0);
}

#[test]
fn test_syntax_errors() {
    use PatternErrorReason::*;

    assert_eq!(syntax_error("#.#.#"), (3, MultipleDecimalSeparators));
    assert_eq!(syntax_error("#,.00"), (1, EmptyGroup));
    assert_eq!(syntax_error("#,##0,"), (5, EmptyGroup));
    assert_eq!(syntax_error("'abc"), (0, UnterminatedQuote));
    assert_eq!(syntax_error("0;0;0"), (3, TooManySubPatterns));
    assert_eq!(syntax_error("#0#"), (2, OptionalAfterRequired));
    assert_eq!(syntax_error("0.#0"), (3, RequiredAfterOptional));
    assert_eq!(syntax_error("0 0"), (1, LiteralInNumberBody));
    assert_eq!(syntax_error("0.0,0"), (3, GroupingInFraction));
}

#[test]
fn test_error_positions_count_characters() {
    assert_eq!(
        syntax_error("¤¤#.#.#"),
        (5, PatternErrorReason::MultipleDecimalSeparators)
    );
}

#[test]
fn test_error_display() {
    let error = compile_pattern("'abc").unwrap_err();
    assert_eq!(
        error.to_string(),
        "pattern syntax error at position 0: unterminated quoted literal"
    );
    let wrapped: FormatError = error.into();
    assert_eq!(
        wrapped.to_string(),
        "pattern syntax error at position 0: unterminated quoted literal"
    );
}

#[test]
fn test_integer_only_pattern() {
    assert_eq!(integer_only_pattern("#,##0.###"), "#,##0");
    assert_eq!(integer_only_pattern("#,##0"), "#,##0");
    assert_eq!(integer_only_pattern("'.'#0.00"), "'.'#0");
    assert_eq!(integer_only_pattern("0.0;(0.0)"), "0");
}
