//! Property-based tests for formatting and pattern compilation.
//!
//! Random locales, values and pattern strings check that:
//! 1. every locale, known or not, yields working formatters
//! 2. grouping and rounding never change the digits they should keep
//! 3. the pattern compiler rejects or accepts input without panicking

use std::sync::OnceLock;

use cldr_number_format::types::{LocaleIdentifier, RoundingMode};
use cldr_number_format::{
    LocaleStore, compile_pattern, currency_formatter, integer_formatter, number_formatter,
    percent_formatter,
};
use proptest::prelude::*;

fn store() -> &'static LocaleStore {
    static STORE: OnceLock<LocaleStore> = OnceLock::new();
    STORE.get_or_init(|| LocaleStore::embedded().unwrap())
}

/// Mix of embedded identifiers and made-up ones
fn locale_strategy() -> impl Strategy<Value = LocaleIdentifier> {
    let known: Vec<LocaleIdentifier> = store().available_locales().into_iter().cloned().collect();
    let made_up = (
        "[a-z]{2,3}",
        proptest::option::of("[A-Z][a-z]{3}"),
        proptest::option::of("[A-Z]{2}"),
    )
        .prop_map(|(language, script, territory)| {
            let mut id = LocaleIdentifier::new(language);
            if let Some(script) = script {
                id = id.with_script(script);
            }
            if let Some(territory) = territory {
                id = id.with_territory(territory);
            }
            id
        });
    prop_oneof![proptest::sample::select(known), made_up]
}

proptest! {
    #[test]
    fn every_locale_builds_every_formatter(id in locale_strategy(), value in -1e9f64..1e9f64) {
        let store = store();
        for formatter in [
            number_formatter(store, &id),
            integer_formatter(store, &id),
            currency_formatter(store, store, &id),
            percent_formatter(store, &id),
        ] {
            let formatter = formatter.unwrap();
            prop_assert!(!formatter.format(value).unwrap().is_empty());
        }
    }

    #[test]
    fn grouping_only_inserts_separators(value in any::<i64>()) {
        let formatter = number_formatter(store(), &LocaleIdentifier::root()).unwrap();
        let output = formatter.format(value).unwrap();
        prop_assert_eq!(output.replace(',', ""), value.to_string());
    }

    #[test]
    fn disabled_grouping_has_no_separators(value in -1e12f64..1e12f64) {
        let mut formatter = number_formatter(store(), &LocaleIdentifier::root()).unwrap();
        formatter.set_grouping_used(false);
        prop_assert!(!formatter.format(value).unwrap().contains(','));
    }

    #[test]
    fn integer_output_has_no_decimal_separator(value in -1e12f64..1e12f64) {
        let formatter = integer_formatter(store(), &LocaleIdentifier::root()).unwrap();
        prop_assert!(!formatter.format(value).unwrap().contains('.'));
    }

    #[test]
    fn fraction_never_exceeds_maximum(value in -1e6f64..1e6f64, max_fraction in 0usize..6) {
        let mut formatter = number_formatter(store(), &LocaleIdentifier::root()).unwrap();
        formatter.set_max_fraction_digits(max_fraction);
        let output = formatter.format(value).unwrap();
        let fraction_len = output.split_once('.').map_or(0, |(_, f)| f.len());
        prop_assert!(fraction_len <= max_fraction, "{} has too many fraction digits", output);
    }

    #[test]
    fn half_even_ties_land_on_even(n in 0i64..1_000_000) {
        let mut formatter = number_formatter(store(), &LocaleIdentifier::root()).unwrap();
        formatter.set_grouping_used(false);
        formatter.set_max_fraction_digits(0);
        formatter.set_rounding_mode(RoundingMode::HalfEven);
        let output = formatter.format(n as f64 + 0.5).unwrap();
        let rounded: i64 = output.parse().unwrap();
        prop_assert_eq!(rounded % 2, 0);
        prop_assert!(rounded == n || rounded == n + 1);
    }

    #[test]
    fn formatting_is_idempotent(id in locale_strategy(), value in any::<f64>()) {
        let formatter = number_formatter(store(), &id).unwrap();
        prop_assert_eq!(formatter.format(value), formatter.format(value));
    }

    #[test]
    fn compile_pattern_never_panics(pattern in "[#0,.;%‰¤'a-z +\\-]{0,20}") {
        let _ = compile_pattern(&pattern);
    }
}
