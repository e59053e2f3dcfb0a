#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod changeset;
pub mod config;
pub mod diff;
pub mod error;
pub mod fields;
pub mod filter;
pub mod key;
pub mod source;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use changeset::{Changeset, ChangesetOptions};
pub use config::{KeySpec, OneOrMany, SourceConfig, SourceOptions};
pub use diff::{
    Diff, DiffOptions, DiffSummary, DiffType, EqualityFn, FieldValue, SiblingPosition,
    diff_sources,
};
pub use error::{ConfigError, DiffError, Error, Side};
pub use fields::{FieldResolver, FieldSpec};
pub use filter::{FilterExpr, FilterFn, FilterMode, RowFilter};
pub use key::{ChildId, KEY_DELIMITER, ParentKey, RowKey, fold_case};
pub use source::{Cells, Source, build_source};
