//! Keyed diff of two indexed sources.
//!
//! Rows are matched by [`RowKey`](crate::key::RowKey). A key is classified
//! as an add, delete, update or move. Re-parented rows (same child identity,
//! new parent) are recognised by pairing a left-only key with a later
//! right-only key and are never reported as a delete.
mod builder;
mod engine;
mod options;
mod row;
mod types;

#[cfg(test)]
mod tests;

pub use engine::diff_sources;
pub use options::{DiffOptions, EqualityFn};
pub use types::{Diff, DiffSummary, DiffType, FieldValue, SiblingPosition};
