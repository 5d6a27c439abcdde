//! Type definitions for locale-aware number formatting
//!
//! This module defines the data model shared by the locale store, the pattern
//! compiler and the formatting engine: locale identifiers and nodes, compiled
//! patterns, symbol sets and the mutable formatter configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Sentinel for "no upper bound" on integer digits
pub const UNBOUNDED_DIGITS: usize = usize::MAX;

/// Language of the distinguished root locale
pub const ROOT_LANGUAGE: &str = "root";

/// A structured locale key: language, optional script, territory and variant
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct LocaleIdentifier {
    /// Language subtag, or `root` for the root locale
    pub language: String,
    /// Script subtag, e.g. `Hans`
    #[serde(default)]
    pub script: Option<String>,
    /// Territory subtag, e.g. `US` or `419`
    #[serde(default)]
    pub territory: Option<String>,
    /// Variant subtag, e.g. `POSIX`
    #[serde(default)]
    pub variant: Option<String>,
}

impl LocaleIdentifier {
    /// Create a language-only identifier
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            script: None,
            territory: None,
            variant: None,
        }
    }

    /// The root identifier every inheritance chain ends at
    pub fn root() -> Self {
        Self::new(ROOT_LANGUAGE)
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_territory(mut self, territory: impl Into<String>) -> Self {
        self.territory = Some(territory.into());
        self
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Checks if this is the root identifier
    pub fn is_root(&self) -> bool {
        self.language == ROOT_LANGUAGE
            && self.script.is_none()
            && self.territory.is_none()
            && self.variant.is_none()
    }

    /// Number of locale-naming components; 0 for root
    ///
    /// A parent must always be strictly less specific than its child, which
    /// is what keeps inheritance chains finite.
    pub fn specificity(&self) -> usize {
        if self.is_root() {
            return 0;
        }
        1 + [&self.script, &self.territory, &self.variant]
            .iter()
            .filter(|part| part.is_some())
            .count()
    }
}

impl fmt::Display for LocaleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        for part in [&self.script, &self.territory, &self.variant]
            .into_iter()
            .flatten()
        {
            write!(f, "_{part}")?;
        }
        Ok(())
    }
}

/// The three pattern categories a locale node may define
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternCategory {
    /// Plain decimal numbers (also used for integers)
    Decimal,
    /// Currency amounts
    Currency,
    /// Percentages
    Percent,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 3] = [
        PatternCategory::Decimal,
        PatternCategory::Currency,
        PatternCategory::Percent,
    ];
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternCategory::Decimal => "decimal",
            PatternCategory::Currency => "currency",
            PatternCategory::Percent => "percent",
        };
        f.write_str(name)
    }
}

/// ISO-4217 currency code, stored upper-case
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A currency code together with the display symbol resolved for a locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub code: CurrencyCode,
    pub symbol: String,
}

impl Currency {
    pub fn new(code: impl Into<CurrencyCode>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
        }
    }
}

/// Literal strings a locale uses when rendering numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSet {
    pub decimal: String,
    pub group: String,
    pub minus_sign: String,
    pub plus_sign: String,
    pub percent_sign: String,
    pub per_mille: String,
    pub infinity: String,
    pub nan: String,
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self {
            decimal: ".".to_string(),
            group: ",".to_string(),
            minus_sign: "-".to_string(),
            plus_sign: "+".to_string(),
            percent_sign: "%".to_string(),
            per_mille: "‰".to_string(),
            infinity: "∞".to_string(),
            nan: "NaN".to_string(),
        }
    }
}

/// Per-locale symbol data; absent fields are inherited from the parent locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SymbolOverrides {
    pub decimal: Option<String>,
    pub group: Option<String>,
    pub minus_sign: Option<String>,
    pub plus_sign: Option<String>,
    pub percent_sign: Option<String>,
    pub per_mille: Option<String>,
    pub infinity: Option<String>,
    pub nan: Option<String>,
}

impl SymbolOverrides {
    /// Fill every field of `target` that is still unset from these overrides
    pub(crate) fn fill_missing(&self, target: &mut SymbolOverrides) {
        fn fill(slot: &mut Option<String>, value: &Option<String>) {
            if slot.is_none() {
                slot.clone_from(value);
            }
        }
        fill(&mut target.decimal, &self.decimal);
        fill(&mut target.group, &self.group);
        fill(&mut target.minus_sign, &self.minus_sign);
        fill(&mut target.plus_sign, &self.plus_sign);
        fill(&mut target.percent_sign, &self.percent_sign);
        fill(&mut target.per_mille, &self.per_mille);
        fill(&mut target.infinity, &self.infinity);
        fill(&mut target.nan, &self.nan);
    }

    /// Complete the overrides with the Latin defaults
    pub(crate) fn into_symbol_set(self) -> SymbolSet {
        let defaults = SymbolSet::default();
        SymbolSet {
            decimal: self.decimal.unwrap_or(defaults.decimal),
            group: self.group.unwrap_or(defaults.group),
            minus_sign: self.minus_sign.unwrap_or(defaults.minus_sign),
            plus_sign: self.plus_sign.unwrap_or(defaults.plus_sign),
            percent_sign: self.percent_sign.unwrap_or(defaults.percent_sign),
            per_mille: self.per_mille.unwrap_or(defaults.per_mille),
            infinity: self.infinity.unwrap_or(defaults.infinity),
            nan: self.nan.unwrap_or(defaults.nan),
        }
    }
}

/// One locale's own (non-inherited) formatting data
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocaleNode {
    pub id: LocaleIdentifier,
    /// Parent by identifier; `None` on a non-root node means root
    #[serde(default)]
    pub parent: Option<LocaleIdentifier>,
    #[serde(default)]
    pub decimal_pattern: Option<String>,
    #[serde(default)]
    pub currency_pattern: Option<String>,
    #[serde(default)]
    pub percent_pattern: Option<String>,
    /// Default currency of the locale
    #[serde(default)]
    pub currency: Option<CurrencyCode>,
    #[serde(default)]
    pub symbols: SymbolOverrides,
    /// Display symbols keyed by ISO code
    #[serde(default)]
    pub currency_symbols: BTreeMap<String, String>,
}

impl LocaleNode {
    pub fn new(id: LocaleIdentifier) -> Self {
        Self {
            id,
            parent: None,
            decimal_pattern: None,
            currency_pattern: None,
            percent_pattern: None,
            currency: None,
            symbols: SymbolOverrides::default(),
            currency_symbols: BTreeMap::new(),
        }
    }

    pub fn with_parent(mut self, parent: LocaleIdentifier) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_pattern(mut self, category: PatternCategory, pattern: impl Into<String>) -> Self {
        let pattern = Some(pattern.into());
        match category {
            PatternCategory::Decimal => self.decimal_pattern = pattern,
            PatternCategory::Currency => self.currency_pattern = pattern,
            PatternCategory::Percent => self.percent_pattern = pattern,
        }
        self
    }

    pub fn with_currency(mut self, code: impl Into<CurrencyCode>) -> Self {
        self.currency = Some(code.into());
        self
    }

    pub fn with_currency_symbol(mut self, code: &str, symbol: impl Into<String>) -> Self {
        self.currency_symbols
            .insert(code.to_ascii_uppercase(), symbol.into());
        self
    }

    /// The node's own pattern for a category, if any
    pub fn pattern(&self, category: PatternCategory) -> Option<&str> {
        match category {
            PatternCategory::Decimal => self.decimal_pattern.as_deref(),
            PatternCategory::Currency => self.currency_pattern.as_deref(),
            PatternCategory::Percent => self.percent_pattern.as_deref(),
        }
    }

    /// Effective parent: the explicit one, root for other non-root nodes,
    /// nothing for root itself
    pub fn parent_id(&self) -> Option<LocaleIdentifier> {
        match &self.parent {
            Some(parent) => Some(parent.clone()),
            None if self.id.is_root() => None,
            None => Some(LocaleIdentifier::root()),
        }
    }
}

/// Represents a single token of a decimal pattern
#[derive(Debug, Clone, PartialEq)]
pub enum PatternToken {
    /// Required digit (0)
    RequiredDigit,
    /// Optional digit (#)
    OptionalDigit,
    /// Decimal separator (.)
    DecimalPoint,
    /// Grouping separator (,)
    GroupingSeparator,
    /// Percent sign placeholder (%)
    Percent,
    /// Per-mille sign placeholder (‰)
    PerMille,
    /// Minus sign placeholder (-)
    Minus,
    /// Plus sign placeholder (+)
    Plus,
    /// Currency placeholder, one or more ¤
    Currency(CurrencyDisplay),
    /// Single literal character
    LiteralChar(char),
    /// Quoted literal, like 'text'
    QuotedText(String),
}

impl PatternToken {
    /// Checks if the token belongs to the number body
    pub fn is_number_body(&self) -> bool {
        matches!(
            self,
            PatternToken::RequiredDigit
                | PatternToken::OptionalDigit
                | PatternToken::DecimalPoint
                | PatternToken::GroupingSeparator
        )
    }
}

/// How a currency placeholder is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyDisplay {
    /// ¤: the locale's display symbol
    Symbol,
    /// ¤¤: the ISO code
    IsoCode,
}

/// Part of a prefix or suffix
#[derive(Debug, Clone, PartialEq)]
pub enum AffixToken {
    Literal(String),
    Percent,
    PerMille,
    Minus,
    Plus,
    Currency(CurrencyDisplay),
}

/// Literal text and symbol placeholders surrounding the number body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Affix {
    pub tokens: Vec<AffixToken>,
}

impl Affix {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn has_currency(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| matches!(t, AffixToken::Currency(_)))
    }
}

/// Prefix and suffix of one sub-pattern
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubPattern {
    pub prefix: Affix,
    pub suffix: Affix,
}

/// A compiled decimal pattern
#[derive(Debug, Clone, PartialEq)]
pub struct NumberPattern {
    /// Affixes for non-negative values
    pub positive: SubPattern,
    /// Affixes for negative values, if the pattern has a second sub-pattern
    pub negative: Option<SubPattern>,
    /// Digits per group counting left from the decimal point; 0 disables grouping
    pub grouping_size: usize,
    pub min_integer_digits: usize,
    pub max_integer_digits: usize,
    pub min_fraction_digits: usize,
    pub max_fraction_digits: usize,
    /// Set by a trailing `.` without fraction digits
    pub decimal_separator_always_shown: bool,
    pub has_currency_placeholder: bool,
}

impl Default for NumberPattern {
    fn default() -> Self {
        Self {
            positive: SubPattern::default(),
            negative: None,
            grouping_size: 0,
            min_integer_digits: 1,
            max_integer_digits: UNBOUNDED_DIGITS,
            min_fraction_digits: 0,
            max_fraction_digits: 0,
            decimal_separator_always_shown: false,
            has_currency_placeholder: false,
        }
    }
}

/// Rounding rule applied when dropping fraction digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Ties go to the even neighbour
    #[default]
    HalfEven,
    /// Ties go away from zero
    HalfUp,
    /// Ties go toward zero
    HalfDown,
    /// Away from zero
    Up,
    /// Toward zero
    Down,
    /// Toward positive infinity
    Ceiling,
    /// Toward negative infinity
    Floor,
    /// Fail unless the value is already exact
    Unnecessary,
}

/// The four formatter families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Number,
    Integer,
    Currency,
    Percent,
}

impl FormatKind {
    /// The pattern category a formatter of this kind is built from
    pub fn category(self) -> PatternCategory {
        match self {
            FormatKind::Number | FormatKind::Integer => PatternCategory::Decimal,
            FormatKind::Currency => PatternCategory::Currency,
            FormatKind::Percent => PatternCategory::Percent,
        }
    }
}

/// A numeric input: an exact integer or a floating value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Integer(i64),
    /// Unsigned integers above `i64::MAX`
    Unsigned(u64),
    Real(f64),
}

/// Largest magnitude at which every integer is exactly representable in f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl NumericValue {
    /// Select the integer path for floats with no fractional part
    pub fn normalized(self) -> Self {
        match self {
            NumericValue::Real(v)
                if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_EXACT_INTEGER =>
            {
                NumericValue::Integer(v as i64)
            }
            other => other,
        }
    }
}

macro_rules! numeric_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for NumericValue {
            fn from(value: $t) -> Self {
                NumericValue::Integer(i64::from(value))
            }
        })*
    };
}

numeric_from_signed!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for NumericValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => NumericValue::Integer(v),
            Err(_) => NumericValue::Unsigned(value),
        }
    }
}

impl From<usize> for NumericValue {
    fn from(value: usize) -> Self {
        NumericValue::from(value as u64)
    }
}

impl From<isize> for NumericValue {
    fn from(value: isize) -> Self {
        NumericValue::Integer(value as i64)
    }
}

impl From<f32> for NumericValue {
    fn from(value: f32) -> Self {
        NumericValue::Real(f64::from(value))
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        NumericValue::Real(value)
    }
}

/// Largest minimum integer digit count a formatter accepts
pub const MAX_INTEGER_DIGITS: usize = 309;

/// Largest minimum fraction digit count a formatter accepts
pub const MAX_FRACTION_DIGITS: usize = 340;

/// Digit-count clamps held by a formatter
///
/// Setters keep `min <= max` for both pairs: raising a minimum above its
/// maximum raises the maximum, lowering a maximum below its minimum lowers
/// the minimum. Minimums are capped at `MAX_INTEGER_DIGITS` and
/// `MAX_FRACTION_DIGITS`, since they are padded out with zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitBounds {
    min_integer: usize,
    max_integer: usize,
    min_fraction: usize,
    max_fraction: usize,
}

impl DigitBounds {
    pub fn from_pattern(pattern: &NumberPattern) -> Self {
        Self {
            min_integer: pattern.min_integer_digits,
            max_integer: pattern.max_integer_digits,
            min_fraction: pattern.min_fraction_digits,
            max_fraction: pattern.max_fraction_digits,
        }
    }

    pub fn min_integer(&self) -> usize {
        self.min_integer
    }

    pub fn max_integer(&self) -> usize {
        self.max_integer
    }

    pub fn min_fraction(&self) -> usize {
        self.min_fraction
    }

    pub fn max_fraction(&self) -> usize {
        self.max_fraction
    }

    pub fn set_min_integer(&mut self, digits: usize) {
        let digits = digits.min(MAX_INTEGER_DIGITS);
        self.min_integer = digits;
        self.max_integer = self.max_integer.max(digits);
    }

    pub fn set_max_integer(&mut self, digits: usize) {
        self.max_integer = digits;
        self.min_integer = self.min_integer.min(digits);
    }

    pub fn set_min_fraction(&mut self, digits: usize) {
        let digits = digits.min(MAX_FRACTION_DIGITS);
        self.min_fraction = digits;
        self.max_fraction = self.max_fraction.max(digits);
    }

    pub fn set_max_fraction(&mut self, digits: usize) {
        self.max_fraction = digits;
        self.min_fraction = self.min_fraction.min(digits);
    }
}

/// Mutable per-formatter configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FormatterConfig {
    pub grouping_used: bool,
    pub parse_integer_only: bool,
    pub rounding_mode: RoundingMode,
    pub decimal_separator_always_shown: bool,
    pub currency: Option<Currency>,
    pub digits: DigitBounds,
    multiplier: i64,
}

impl FormatterConfig {
    /// Defaults for a freshly compiled pattern
    pub fn for_pattern(pattern: &NumberPattern) -> Self {
        Self {
            grouping_used: true,
            parse_integer_only: false,
            rounding_mode: RoundingMode::default(),
            decimal_separator_always_shown: pattern.decimal_separator_always_shown,
            currency: None,
            digits: DigitBounds::from_pattern(pattern),
            multiplier: 1,
        }
    }

    pub fn multiplier(&self) -> i64 {
        self.multiplier
    }

    /// Set the scale factor applied before rounding; zero is rejected
    pub fn set_multiplier(&mut self, multiplier: i64) -> Result<(), crate::error::FormatError> {
        if multiplier == 0 {
            return Err(crate::error::FormatError::ZeroMultiplier);
        }
        self.multiplier = multiplier;
        Ok(())
    }
}
