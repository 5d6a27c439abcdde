use std::fs;
use std::path::Path;

use cldr_number_format::types::{FormatKind, LocaleIdentifier, NumericValue};
use cldr_number_format::{
    Formatter, LocaleStore, currency_formatter, integer_formatter, number_formatter,
    percent_formatter,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CaseValue {
    Integer(i64),
    Real(f64),
}

impl From<&CaseValue> for NumericValue {
    fn from(value: &CaseValue) -> Self {
        match value {
            CaseValue::Integer(v) => NumericValue::Integer(*v),
            CaseValue::Real(v) => NumericValue::Real(*v),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Number,
    Integer,
    Currency,
    Percent,
}

#[derive(Debug, Deserialize)]
struct TestCase {
    locale: String,
    kind: Kind,
    value: CaseValue,
    expected: String,
}

#[derive(Debug, Deserialize)]
struct TestCases {
    cases: Vec<TestCase>,
}

/// `zh_Hant_TW` style names; a four-letter second part is a script
fn parse_locale(name: &str) -> LocaleIdentifier {
    let mut parts = name.split('_');
    let mut id = LocaleIdentifier::new(parts.next().unwrap_or_default());
    for part in parts {
        if part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic()) && id.script.is_none()
        {
            id = id.with_script(part);
        } else if id.territory.is_none() && (part.len() == 2 || part.len() == 3) {
            id = id.with_territory(part);
        } else {
            id = id.with_variant(part);
        }
    }
    id
}

fn build_formatter(store: &LocaleStore, case: &TestCase) -> Formatter {
    let id = parse_locale(&case.locale);
    let formatter = match case.kind {
        Kind::Number => number_formatter(store, &id),
        Kind::Integer => integer_formatter(store, &id),
        Kind::Currency => currency_formatter(store, store, &id),
        Kind::Percent => percent_formatter(store, &id),
    };
    formatter.unwrap_or_else(|e| panic!("Failed to build formatter for {id}: {e}"))
}

fn run_test_case(store: &LocaleStore, case: &TestCase) -> Result<(), String> {
    let formatter = build_formatter(store, case);
    let result = formatter
        .format(NumericValue::from(&case.value))
        .map_err(|e| format!("Format error for {case:?}: {e}"))?;

    if result != case.expected {
        return Err(format!(
            "\n✗ Mismatch for value: {:?}\nLocale:     {} ({:?})\nExpected:   {:?}\nActual:     {:?}",
            case.value, case.locale, case.kind, case.expected, result
        ));
    }
    Ok(())
}

#[test]
fn test_parse_locale_names() {
    assert_eq!(parse_locale("root"), LocaleIdentifier::root());
    assert_eq!(
        parse_locale("zh_Hant_TW"),
        LocaleIdentifier::new("zh")
            .with_script("Hant")
            .with_territory("TW")
    );
    assert_eq!(
        parse_locale("es_419"),
        LocaleIdentifier::new("es").with_territory("419")
    );
    assert_eq!(
        parse_locale("en_US_POSIX"),
        LocaleIdentifier::new("en")
            .with_territory("US")
            .with_variant("POSIX")
    );
}

#[test]
fn test_cldr_format_cases() {
    let toml_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("cldr_format_cases.toml");
    let toml_content = fs::read_to_string(&toml_path)
        .unwrap_or_else(|e| panic!("Failed to read TOML file {}: {}", toml_path.display(), e));
    let suite: TestCases = toml::from_str(&toml_content)
        .unwrap_or_else(|e| panic!("Failed to parse TOML file {}: {}", toml_path.display(), e));
    assert!(!suite.cases.is_empty());

    let store = LocaleStore::embedded().unwrap();
    let failures: Vec<String> = suite
        .cases
        .iter()
        .filter_map(|case| run_test_case(&store, case).err())
        .collect();

    assert!(
        failures.is_empty(),
        "{} of {} cases failed:{}",
        failures.len(),
        suite.cases.len(),
        failures.join("\n")
    );
}

#[test]
fn test_every_kind_is_covered() {
    let kinds = [
        FormatKind::Number,
        FormatKind::Integer,
        FormatKind::Currency,
        FormatKind::Percent,
    ];
    let store = LocaleStore::embedded().unwrap();
    let root = LocaleIdentifier::root();
    for kind in kinds {
        let formatter = match kind {
            FormatKind::Number => number_formatter(&store, &root),
            FormatKind::Integer => integer_formatter(&store, &root),
            FormatKind::Currency => currency_formatter(&store, &store, &root),
            FormatKind::Percent => percent_formatter(&store, &root),
        }
        .unwrap();
        assert_eq!(formatter.kind(), kind);
    }
}
