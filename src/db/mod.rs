//! SQLite-backed key-value store.
//!
//! Values are opaque strings (JSON in practice). The employee directory is
//! kept as one JSON array under a single key.

mod init;
mod operations;

#[cfg(test)]
mod tests;

pub use init::{migrate, open_at};
pub use operations::{get_value, set_value, StoredValue};
