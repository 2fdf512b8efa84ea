//! Repository implementations for catalog access
//!
//! Each operation opens its own connection, runs one statement, and
//! closes the connection before returning.

pub mod widgets;

pub use widgets::WidgetRepo;
