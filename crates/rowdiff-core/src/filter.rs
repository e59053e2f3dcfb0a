//! Row filters: per-field include/exclude predicates.
//!
//! An include filter keeps a row only when the field matches; an exclude
//! filter drops a row when the field matches. Fields are checked in column
//! order and evaluation stops at the first failing field.
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::ConfigError;
use crate::fields::{FieldResolver, FieldSpec};
use crate::key::fold_case;

/// Caller-supplied predicate over a (possibly missing) cell value.
pub type FilterFn = Arc<dyn Fn(Option<&str>) -> bool + Send + Sync>;

/// How a single field value is tested.
#[derive(Clone)]
pub enum FilterExpr {
    /// Whole-value equality, case-folded when the source is case-insensitive.
    Literal(String),
    /// Regular expression searched anywhere in the value.
    Pattern(Regex),
    /// Arbitrary predicate.
    Predicate(FilterFn),
}

impl FilterExpr {
    /// Compiles `pattern` into a [`FilterExpr::Pattern`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFilter`] if the pattern does not compile.
    pub fn pattern(field: &str, pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|e| ConfigError::InvalidFilter {
                field: field.to_owned(),
                detail: e.to_string(),
            })
    }

    /// Wraps a closure as a [`FilterExpr::Predicate`].
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(Option<&str>) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Returns `true` if `value` matches this expression.
    ///
    /// Missing values are tested as the empty string by literals and patterns.
    pub fn matches(&self, value: Option<&str>, case_sensitive: bool) -> bool {
        match self {
            Self::Literal(expected) => {
                let actual = value.unwrap_or_default();
                if case_sensitive {
                    actual == expected
                } else {
                    fold_case(actual) == fold_case(expected)
                }
            }
            Self::Pattern(re) => re.is_match(value.unwrap_or_default()),
            Self::Predicate(f) => f(value),
        }
    }
}

impl fmt::Debug for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Whether a filter keeps or drops matching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Keep the row only if the field matches.
    Include,
    /// Drop the row if the field matches.
    Exclude,
}

#[derive(Debug, Clone)]
struct FieldFilter {
    column: usize,
    mode: FilterMode,
    expr: FilterExpr,
}

/// Include/exclude filters resolved against a source's columns.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    filters: Vec<FieldFilter>,
    case_sensitive: bool,
}

impl RowFilter {
    /// Resolves the configured include and exclude filters to column indexes.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a filter names a field that does not exist.
    pub fn resolve(
        resolver: &FieldResolver<'_>,
        include: &[(FieldSpec, FilterExpr)],
        exclude: &[(FieldSpec, FilterExpr)],
        case_sensitive: bool,
    ) -> Result<Self, ConfigError> {
        let mut filters = Vec::with_capacity(include.len() + exclude.len());
        for (mode, specs) in [(FilterMode::Include, include), (FilterMode::Exclude, exclude)] {
            for (spec, expr) in specs {
                filters.push(FieldFilter {
                    column: resolver.resolve(spec)?,
                    mode,
                    expr: expr.clone(),
                });
            }
        }
        // Column order, includes before excludes within a column.
        filters.sort_by_key(|f| (f.column, f.mode == FilterMode::Exclude));
        Ok(Self {
            filters,
            case_sensitive,
        })
    }

    /// Returns `true` if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns `true` if the row passes every filter.
    pub fn accepts(&self, cells: &[Option<String>]) -> bool {
        self.filters.iter().all(|filter| {
            let value = cells.get(filter.column).and_then(Option::as_deref);
            let matched = filter.expr.matches(value, self.case_sensitive);
            match filter.mode {
                FilterMode::Include => matched,
                FilterMode::Exclude => !matched,
            }
        })
    }
}
