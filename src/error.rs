//! Error types for pattern compilation, locale data and formatting

use thiserror::Error;

use crate::types::{LocaleIdentifier, PatternCategory};

/// Why a pattern string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatternErrorReason {
    #[error("multiple decimal separators")]
    MultipleDecimalSeparators,
    #[error("grouping separator not followed by digits")]
    EmptyGroup,
    #[error("grouping separator in fraction part")]
    GroupingInFraction,
    #[error("unterminated quoted literal")]
    UnterminatedQuote,
    #[error("literal inside number body")]
    LiteralInNumberBody,
    #[error("'#' after '0' in integer part")]
    OptionalAfterRequired,
    #[error("'0' after '#' in fraction part")]
    RequiredAfterOptional,
    #[error("more than two sub-patterns")]
    TooManySubPatterns,
}

/// A malformed pattern string; `position` is a character index
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pattern syntax error at position {position}: {reason}")]
pub struct PatternSyntaxError {
    pub position: usize,
    pub reason: PatternErrorReason,
}

impl PatternSyntaxError {
    pub fn new(position: usize, reason: PatternErrorReason) -> Self {
        Self { position, reason }
    }
}

/// Errors raised while resolving locale data or formatting a value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error(transparent)]
    PatternSyntax(#[from] PatternSyntaxError),

    /// The inheritance chain ended without defining the category
    #[error("root locale defines no {0} pattern")]
    MissingRootPattern(PatternCategory),

    #[error("locale {child} names {parent} as parent, which is not less specific")]
    InvalidParent {
        child: LocaleIdentifier,
        parent: LocaleIdentifier,
    },

    #[error("locale inheritance cycle through {0}")]
    InheritanceCycle(LocaleIdentifier),

    #[error("rounding necessary to fit {fraction_digits} fraction digits")]
    RoundingNecessary { fraction_digits: usize },

    #[error("value is not a number")]
    NotANumber,

    #[error("multiplier must be non-zero")]
    ZeroMultiplier,
}

/// Errors raised while building a locale store
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to parse locale data: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read locale data: {0}")]
    Io(#[from] std::io::Error),

    #[error("locale {0} is defined twice")]
    DuplicateLocale(LocaleIdentifier),

    #[error("locale data has no root locale")]
    MissingRoot,

    #[error("root locale defines no {0} pattern")]
    MissingRootPattern(PatternCategory),

    #[error("locale {child} names unknown parent {parent}")]
    UnknownParent {
        child: LocaleIdentifier,
        parent: LocaleIdentifier,
    },

    #[error("locale {child} names {parent} as parent, which is not less specific")]
    InvalidParent {
        child: LocaleIdentifier,
        parent: LocaleIdentifier,
    },

    #[error("invalid {category} pattern for locale {locale}: {source}")]
    Pattern {
        locale: LocaleIdentifier,
        category: PatternCategory,
        #[source]
        source: PatternSyntaxError,
    },
}
