//! # mdscan-rules
//!
//! Style rules over tokenized Markdown.
//!
//! A rule is a [`RulePlugin`]: a small state machine that sees every source
//! line and then every token of one document, and reports [`RuleViolation`]s
//! through a [`PluginScanContext`]. The [`PluginManager`] owns the rules,
//! applies enable/disable configuration, tokenizes each document and drives
//! the lifecycle hooks.
//!
//! ## Modules
//!
//! - **`plugin`**: the `RulePlugin` trait and `RuleDetails`
//! - **`context`**: `PluginScanContext` and `RuleViolation`
//! - **`manager`**: `PluginManager` and `RuleError`
//! - **`rules`**: the built-in rule set

pub mod context;
pub mod manager;
pub mod plugin;
pub mod rules;

pub use context::{PluginScanContext, RuleViolation};
pub use manager::{PluginManager, RuleError};
pub use plugin::{RuleDetails, RulePlugin};
