//! theme-check - translation consistency checks for Shopify themes
//!
//! theme-check is a CLI tool and library that inspects a theme's locale
//! catalogs and reports keys that are missing from a translation or that
//! have no counterpart in the default locale.
//!
//! ## Module Structure
//!
//! - `checks`: The `Check` contract and the built-in checks
//! - `cli`: Command-line interface layer
//! - `config`: `.theme-check.yml` loading and root resolution
//! - `core`: Workspace resolution, project snapshots, locale context
//! - `error`: Typed errors callers may want to match on
//! - `offense`: Offense and severity types
//! - `runner`: Concurrent check execution and aggregation

pub mod checks;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod offense;
pub mod runner;
