//! Locale inheritance resolution
//!
//! A locale that lacks some piece of data uses its nearest ancestor's. The
//! walk is an explicit loop over parent identifiers that refuses to revisit a
//! node and refuses parents that are not strictly less specific than their
//! child, so malformed data cannot make it spin.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::FormatError;
use crate::locale::LocaleDataProvider;
use crate::types::{
    CurrencyCode, LocaleIdentifier, LocaleNode, PatternCategory, SymbolOverrides, SymbolSet,
};

enum Step<'a> {
    Node(&'a LocaleNode),
    Failed(FormatError),
    Done,
}

/// Iterator over a locale and its ancestors, nearest first, ending at root
///
/// An identifier the provider does not know is treated as root; so is an
/// unknown parent halfway up the chain.
pub struct InheritanceChain<'a, P: ?Sized> {
    provider: &'a P,
    step: Step<'a>,
    visited: HashSet<LocaleIdentifier>,
}

impl<'a, P: LocaleDataProvider + ?Sized> InheritanceChain<'a, P> {
    pub fn new(provider: &'a P, start: &LocaleIdentifier) -> Self {
        let mut chain = Self {
            provider,
            step: Step::Done,
            visited: HashSet::new(),
        };
        chain.step = match provider.lookup(start) {
            Some(node) => Step::Node(node),
            None => {
                if !start.is_root() {
                    warn!(locale = %start, "unknown locale, falling back to root");
                }
                chain.root_step()
            }
        };
        chain
    }

    fn root_step(&self) -> Step<'a> {
        match self.provider.lookup(&LocaleIdentifier::root()) {
            Some(root) => Step::Node(root),
            None => Step::Done,
        }
    }

    fn advance(&self, node: &LocaleNode) -> Step<'a> {
        let Some(parent) = node.parent_id() else {
            return Step::Done;
        };
        if parent.specificity() >= node.id.specificity() {
            return Step::Failed(FormatError::InvalidParent {
                child: node.id.clone(),
                parent,
            });
        }
        match self.provider.lookup(&parent) {
            Some(next) => {
                debug!(locale = %node.id, parent = %parent, "inheriting from parent locale");
                Step::Node(next)
            }
            None => {
                warn!(locale = %node.id, parent = %parent, "unknown parent locale, falling back to root");
                self.root_step()
            }
        }
    }
}

impl<'a, P: LocaleDataProvider + ?Sized> Iterator for InheritanceChain<'a, P> {
    type Item = Result<&'a LocaleNode, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.step, Step::Done) {
            Step::Done => None,
            Step::Failed(error) => Some(Err(error)),
            Step::Node(node) => {
                if !self.visited.insert(node.id.clone()) {
                    return Some(Err(FormatError::InheritanceCycle(node.id.clone())));
                }
                self.step = self.advance(node);
                Some(Ok(node))
            }
        }
    }
}

/// Raw pattern text for `category`, from `start` or its nearest ancestor
pub fn resolve_pattern<'a, P: LocaleDataProvider + ?Sized>(
    provider: &'a P,
    start: &LocaleIdentifier,
    category: PatternCategory,
) -> Result<&'a str, FormatError> {
    for node in InheritanceChain::new(provider, start) {
        if let Some(pattern) = node?.pattern(category) {
            return Ok(pattern);
        }
    }
    Err(FormatError::MissingRootPattern(category))
}

/// Symbol set for `start`, each symbol taken from the nearest locale defining it
pub fn resolve_symbols<P: LocaleDataProvider + ?Sized>(
    provider: &P,
    start: &LocaleIdentifier,
) -> Result<SymbolSet, FormatError> {
    let mut symbols = SymbolOverrides::default();
    for node in InheritanceChain::new(provider, start) {
        node?.symbols.fill_missing(&mut symbols);
    }
    Ok(symbols.into_symbol_set())
}

/// Default currency of `start` or its nearest ancestor that has one
pub fn resolve_currency<P: LocaleDataProvider + ?Sized>(
    provider: &P,
    start: &LocaleIdentifier,
) -> Result<Option<CurrencyCode>, FormatError> {
    for node in InheritanceChain::new(provider, start) {
        if let Some(code) = &node?.currency {
            return Ok(Some(code.clone()));
        }
    }
    Ok(None)
}
