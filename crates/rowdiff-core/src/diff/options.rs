use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Custom equality for one field. Receives the left and right values.
pub type EqualityFn = Arc<dyn Fn(Option<&str>, Option<&str>) -> bool + Send + Sync>;

/// Controls which categories the diff engine reports and how fields compare.
#[derive(Clone)]
pub struct DiffOptions {
    /// Report keys present on the right only.
    pub include_adds: bool,
    /// Report keys present on the left only.
    pub include_deletes: bool,
    /// Report field changes.
    pub include_updates: bool,
    /// Report sibling reorders and re-parented rows.
    pub include_moves: bool,
    /// Per-field equality overriding the default string comparison.
    pub equality: HashMap<String, EqualityFn>,
}

impl DiffOptions {
    /// Registers a custom equality predicate for `field`.
    #[must_use]
    pub fn with_equality<F>(mut self, field: impl Into<String>, eq: F) -> Self
    where
        F: Fn(Option<&str>, Option<&str>) -> bool + Send + Sync + 'static,
    {
        self.equality.insert(field.into(), Arc::new(eq));
        self
    }
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            include_adds: true,
            include_deletes: true,
            include_updates: true,
            include_moves: true,
            equality: HashMap::new(),
        }
    }
}

impl fmt::Debug for DiffOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&String> = self.equality.keys().collect();
        fields.sort();
        f.debug_struct("DiffOptions")
            .field("include_adds", &self.include_adds)
            .field("include_deletes", &self.include_deletes)
            .field("include_updates", &self.include_updates)
            .field("include_moves", &self.include_moves)
            .field("equality", &fields)
            .finish()
    }
}
