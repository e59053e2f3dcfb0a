//! Hierarchical table generator and benchmark utilities for rowdiff.
//!
//! This crate provides deterministic generation of parent/child tables and
//! mutated copies of them, for benchmarking and invariant testing of
//! `rowdiff-core`.

pub mod generator;

pub use generator::{
    GeneratorConfig, MutationConfig, MutationCounts, SizeTier, TablePair, generate_pair,
    generate_table,
};
