//! widgetstore-core: data access for the widget catalog
//!
//! Provides the scoped database client and the single query this
//! system exists for: fetching widgets carrying a given tag, with
//! their full tag and dongle id lists aggregated per widget.
//!
//! Binary crates (widgetstore-cli) can use `anyhow` for convenience;
//! library consumers get structured, composable errors via [`DbError`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::{ConfigError, DbConfig};
pub use db::{DbClient, WidgetRepo};
pub use error::DbError;
pub use models::{Dongle, Tag, Widget};
