//! Decimal pattern compilation module
//!
//! This module parses CLDR decimal pattern strings and compiles them into a
//! `NumberPattern`. The main entry point is the `compile_pattern` function.

mod combinators;
mod format;
mod sections;
mod tokens;

pub use format::{compile_pattern, integer_only_pattern};
