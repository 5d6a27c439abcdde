//! Locale data store
//!
//! This module holds the immutable registry of locale nodes and the two
//! interfaces the formatting core reads locale data through:
//! `LocaleDataProvider` for patterns and symbols, `CurrencySymbolProvider`
//! for currency display symbols.

mod resolver;

use std::collections::HashMap;
use std::fs;
use std::hash::BuildHasher;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::LocaleError;
use crate::parser::compile_pattern;
use crate::types::{CurrencyCode, LocaleIdentifier, LocaleNode, PatternCategory};

pub use resolver::{InheritanceChain, resolve_currency, resolve_pattern, resolve_symbols};

type Result<T> = std::result::Result<T, LocaleError>;

/// Source of per-locale formatting data
pub trait LocaleDataProvider {
    /// The node stored for exactly this identifier
    fn lookup(&self, id: &LocaleIdentifier) -> Option<&LocaleNode>;
}

/// Source of currency display symbols
pub trait CurrencySymbolProvider {
    /// Display symbol of `code` in `locale`
    fn symbol_for(&self, code: &CurrencyCode, locale: &LocaleIdentifier) -> String;
}

/// Unvalidated provider, mainly useful for tests and ad-hoc data
impl<S: BuildHasher> LocaleDataProvider for HashMap<LocaleIdentifier, LocaleNode, S> {
    fn lookup(&self, id: &LocaleIdentifier) -> Option<&LocaleNode> {
        self.get(id)
    }
}

#[derive(Debug, Deserialize)]
struct LocaleDataFile {
    #[serde(default, rename = "locale")]
    locales: Vec<LocaleNode>,
}

/// Validated, read-only locale registry
///
/// Built once and then shared by reference; nothing mutates it after
/// construction, so it can be read from any number of threads.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    nodes: HashMap<LocaleIdentifier, LocaleNode>,
}

impl LocaleStore {
    /// Build a store from nodes, rejecting data that could break resolution
    ///
    /// The root node must exist and define every pattern category; every
    /// explicit parent must exist and be strictly less specific than its
    /// child; every pattern must compile.
    pub fn new(nodes: impl IntoIterator<Item = LocaleNode>) -> Result<Self> {
        let mut map = HashMap::new();
        for node in nodes {
            if map.contains_key(&node.id) {
                return Err(LocaleError::DuplicateLocale(node.id));
            }
            map.insert(node.id.clone(), node);
        }

        let root = map
            .get(&LocaleIdentifier::root())
            .ok_or(LocaleError::MissingRoot)?;
        for category in PatternCategory::ALL {
            if root.pattern(category).is_none() {
                return Err(LocaleError::MissingRootPattern(category));
            }
        }

        let mut ids: Vec<&LocaleIdentifier> = map.keys().collect();
        ids.sort();
        for id in ids {
            let node = &map[id];
            if let Some(parent) = &node.parent {
                if parent.specificity() >= id.specificity() {
                    return Err(LocaleError::InvalidParent {
                        child: id.clone(),
                        parent: parent.clone(),
                    });
                }
                if !map.contains_key(parent) {
                    return Err(LocaleError::UnknownParent {
                        child: id.clone(),
                        parent: parent.clone(),
                    });
                }
            }
            for category in PatternCategory::ALL {
                if let Some(pattern) = node.pattern(category) {
                    compile_pattern(pattern).map_err(|source| LocaleError::Pattern {
                        locale: id.clone(),
                        category,
                        source,
                    })?;
                }
            }
        }

        debug!(locales = map.len(), "locale store built");
        Ok(Self { nodes: map })
    }

    /// Build a store from TOML locale data (a `[[locale]]` array of nodes)
    pub fn from_toml_str(data: &str) -> Result<Self> {
        let file: LocaleDataFile = toml::from_str(data)?;
        Self::new(file.locales)
    }

    /// Build a store from a TOML file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    /// Build a store from the locale data bundled with the crate
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(include_str!("locale/locale_data.toml"))
    }

    /// All identifiers in the store, sorted
    pub fn available_locales(&self) -> Vec<&LocaleIdentifier> {
        let mut ids: Vec<&LocaleIdentifier> = self.nodes.keys().collect();
        ids.sort();
        ids
    }

    pub fn contains(&self, id: &LocaleIdentifier) -> bool {
        self.nodes.contains_key(id)
    }
}

impl LocaleDataProvider for LocaleStore {
    fn lookup(&self, id: &LocaleIdentifier) -> Option<&LocaleNode> {
        self.nodes.get(id)
    }
}

impl CurrencySymbolProvider for LocaleStore {
    /// Nearest ancestor's symbol for the code, or the code itself
    fn symbol_for(&self, code: &CurrencyCode, locale: &LocaleIdentifier) -> String {
        for node in InheritanceChain::new(self, locale) {
            let Ok(node) = node else { break };
            if let Some(symbol) = node.currency_symbols.get(code.as_str()) {
                return symbol.clone();
            }
        }
        code.to_string()
    }
}
