//! Run-scoped validator registry.
//!
//! Holds at most one [`CompiledValidator`] per [`DocumentKind`]. The
//! registry is filled completely before any document is validated and is
//! read-only afterwards, so validation tasks share it through `Arc`s
//! without locking.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use profcheck_core::{DocumentKind, RunConfig, Strictness};

use crate::loader::{load_validator, CompiledValidator, SchemaError};

#[derive(Debug, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<DocumentKind, Arc<CompiledValidator>>,
}

impl ValidatorRegistry {
    /// Load validators for the given kinds concurrently.
    ///
    /// Duplicate kinds are loaded once. Every load is awaited before the
    /// first error is returned; in-flight work is not cancelled.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] in kind order.
    pub async fn load<I>(
        config: &RunConfig,
        strictness: Strictness,
        kinds: I,
    ) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = DocumentKind>,
    {
        let kinds: BTreeSet<DocumentKind> = kinds.into_iter().collect();

        let handles: Vec<_> = kinds
            .into_iter()
            .map(|kind| {
                let root = config.schema_root.clone();
                let version = config.schema_version.clone();
                let handle = tokio::spawn(async move {
                    load_validator(kind, &root, &version, strictness).await
                });
                (kind, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (kind, handle) in handles {
            let result = handle.await.map_err(|e| SchemaError::Interrupted {
                kind,
                reason: e.to_string(),
            });
            results.push(result.and_then(|inner| inner));
        }

        let mut registry = Self::default();
        for result in results {
            registry.insert(result?);
        }
        Ok(registry)
    }

    /// Register a validator, replacing any previous one for its kind.
    pub fn insert(&mut self, validator: CompiledValidator) {
        self.validators.insert(validator.kind(), Arc::new(validator));
    }

    pub fn get(&self, kind: DocumentKind) -> Option<Arc<CompiledValidator>> {
        self.validators.get(&kind).cloned()
    }

    pub fn contains(&self, kind: DocumentKind) -> bool {
        self.validators.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}
