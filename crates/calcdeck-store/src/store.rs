//! JSON-document-backed calculator store

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use calcdeck_formula::try_extract_variables;

use crate::calculator::{Calculator, CalculatorDraft};
use crate::document::Document;
use crate::error::StoreResult;

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the JSON document holding all records
    pub path: PathBuf,
}

impl StoreConfig {
    /// Configuration for a store at the given document path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// CRUD store for calculator records
///
/// Backed by a single JSON document. An absent or unreadable document reads
/// as the empty collection. Mutations are serialized by an internal lock, so
/// a store shared between threads behaves as a single writer; multi-process
/// coordination is out of scope.
///
/// The store maintains the record invariant that `variables` always reflects
/// the current `formula`: both create and update re-derive it and reject
/// formulas that do not parse.
#[derive(Debug)]
pub struct CalculatorStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CalculatorStore {
    /// Open a store over the configured document path
    ///
    /// The document itself is created lazily on first write.
    pub fn open(config: StoreConfig) -> Self {
        Self {
            path: config.path,
            write_lock: Mutex::new(()),
        }
    }

    /// The document path this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, in stored order
    ///
    /// Callers that want newest-first should sort by `created_at` themselves;
    /// ordering is a presentation concern, not a store guarantee.
    pub fn list(&self) -> StoreResult<Vec<Calculator>> {
        Ok(self.read_document()?.calculators)
    }

    /// Look up a record by id
    pub fn get(&self, id: Uuid) -> StoreResult<Option<Calculator>> {
        Ok(self
            .read_document()?
            .calculators
            .into_iter()
            .find(|c| c.id == id))
    }

    /// Create a new record from a draft
    ///
    /// Validates the draft, derives `variables` from the formula (rejecting
    /// formulas that fail to parse), assigns a fresh id, and stamps
    /// `created_at = updated_at = now`.
    pub fn create(&self, draft: CalculatorDraft) -> StoreResult<Calculator> {
        draft.validate()?;
        let variables = try_extract_variables(&draft.formula)?;

        let now = Utc::now();
        let record = Calculator {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            formula: draft.formula,
            variables,
            variable_labels: draft.variable_labels.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let _guard = self.lock_writes();
        let mut doc = self.read_document()?;
        doc.calculators.push(record.clone());
        self.write_document(&doc)?;

        log::debug!("created calculator {}", record.id);
        Ok(record)
    }

    /// Update an existing record from a draft
    ///
    /// Returns `None` if no record has the given id. On success `variables`
    /// is re-derived and `updated_at` refreshed; `created_at` and `id` never
    /// change. A `None` description or label map leaves the stored value
    /// untouched.
    pub fn update(&self, id: Uuid, draft: CalculatorDraft) -> StoreResult<Option<Calculator>> {
        draft.validate()?;
        let variables = try_extract_variables(&draft.formula)?;

        let _guard = self.lock_writes();
        let mut doc = self.read_document()?;
        let Some(record) = doc.calculators.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        record.title = draft.title;
        record.formula = draft.formula;
        record.variables = variables;
        if let Some(description) = draft.description {
            record.description = Some(description);
        }
        if let Some(labels) = draft.variable_labels {
            record.variable_labels = labels;
        }
        record.updated_at = Utc::now();

        let updated = record.clone();
        self.write_document(&doc)?;

        log::debug!("updated calculator {id}");
        Ok(Some(updated))
    }

    /// Delete a record by id
    ///
    /// Returns whether a record existed and was removed. Deleting an already
    /// deleted id reports `false`.
    pub fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let _guard = self.lock_writes();
        let mut doc = self.read_document()?;
        let before = doc.calculators.len();
        doc.calculators.retain(|c| c.id != id);
        if doc.calculators.len() == before {
            return Ok(false);
        }
        self.write_document(&doc)?;

        log::debug!("deleted calculator {id}");
        Ok(true)
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // The guarded data lives on disk; a poisoned lock left it no more
        // inconsistent than a crash between writes would have.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_document(&self) -> StoreResult<Document> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Document::default());
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(doc) => Ok(doc),
            Err(err) => {
                log::warn!(
                    "calculator document at {} is unreadable, treating as empty: {err}",
                    self.path.display()
                );
                Ok(Document::default())
            }
        }
    }

    fn write_document(&self, doc: &Document) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec_pretty(doc)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
