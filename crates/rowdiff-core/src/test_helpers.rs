//! Shared fixtures for unit tests.
//!
//! Integration tests under `crates/rowdiff-core/tests/` define their own
//! helpers because this module only exists in test builds of the library.
#![allow(clippy::expect_used)]

use crate::config::{KeySpec, SourceConfig};
use crate::source::{Cells, Source};

/// Converts string literals into owned, non-null cells.
pub fn rows(data: &[&[&str]]) -> Vec<Cells> {
    data.iter()
        .map(|row| row.iter().map(|c| Some((*c).to_owned())).collect())
        .collect()
}

/// Account hierarchy, "before" snapshot.
pub fn data1() -> Vec<Cells> {
    rows(&[
        &["Parent", "Child", "Description"],
        &["A", "A1", "Account1"],
        &["A", "A2", "Account 2"],
        &["A", "A3", "Account 3"],
        &["A", "A4", "Account 4"],
        &["A", "A6", "Account 6"],
    ])
}

/// Account hierarchy, "after" snapshot.
pub fn data2() -> Vec<Cells> {
    rows(&[
        &["Parent", "Child", "Description"],
        &["A", "A1", "Account1"],
        &["A", "A2", "Account2"],
        &["A", "a3", "ACCOUNT 3"],
        &["A", "A5", "Account 5"],
        &["B", "A6", "Account 6"],
        &["C", "A6", "Account 6c"],
    ])
}

/// Parent = column 0, child = column 1.
pub fn parent_child_config() -> SourceConfig {
    SourceConfig::new(KeySpec::parent_child(0, 1))
}

/// Builds a source, panicking on configuration errors.
pub fn source(data: Vec<Cells>, config: &SourceConfig) -> Source {
    Source::build(data, config).expect("valid source")
}
