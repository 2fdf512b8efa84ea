//! Database layer - scoped connection client and repositories
//!
//! # Design Principles
//!
//! - One connection per operation, explicitly closed on both paths -
//!   no pool, no shared state across invocations
//! - Prepared-statement parameter binding - no string interpolation of
//!   caller input into SQL
//! - Aggregation via JOINs in a single statement - no N+1 queries

pub mod client;
pub mod repos;

pub use client::DbClient;
pub use repos::WidgetRepo;
