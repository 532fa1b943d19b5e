//! RIASEC Storage - Store Trait, Mock Backend, and Persistence Writer
//!
//! Defines the append-only tabular store abstraction the survey writes
//! to, an in-memory mock with failure injection, and the ordered
//! four-stage write sequence. The production backend (a spreadsheet
//! service behind an already-authorized handle) lives outside this
//! workspace.

pub mod schema;
pub mod writer;

pub use schema::{
    choices_header, expected_header, scores_header, submissions_header, Table, ANSWERS_HEADER,
};
pub use writer::{ensure_schema, persist_submission, WriteFailure, WriteStage};

use riasec_core::StoreError;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

// ============================================================================
// STORE TRAIT
// ============================================================================

/// An append-only tabular store holding the four survey tables.
///
/// The store is assumed to serialize concurrent appends; this crate
/// adds no locking of its own. Every method is a single remote call
/// that either succeeds or fails - no retries here.
pub trait SheetStore: Send + Sync {
    /// The table's current header row. Empty for a table that does not
    /// exist yet or has no header.
    fn read_header(&self, table: Table) -> Result<Vec<String>, StoreError>;

    /// Replace the table's header row, creating the table if missing.
    /// Existing data rows are not touched.
    fn write_header(&self, table: Table, header: &[String]) -> Result<(), StoreError>;

    /// Append one data row.
    fn append_row(&self, table: Table, row: Vec<String>) -> Result<(), StoreError>;

    /// Append a batch of data rows.
    fn append_rows(&self, table: Table, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        for row in rows {
            self.append_row(table, row)?;
        }
        Ok(())
    }
}

// ============================================================================
// MOCK STORE
// ============================================================================

#[derive(Debug, Default, Clone)]
struct MockTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// In-memory mock store for testing.
///
/// Failure injection is per table and per operation kind: appends can
/// be made to fail (simulating quota/network errors mid-sequence) and
/// header writes can be made to fail (simulating a schema-repair
/// failure), independently.
#[derive(Debug, Default)]
pub struct MockSheetStore {
    tables: Arc<RwLock<HashMap<Table, MockTable>>>,
    fail_appends: Arc<RwLock<HashSet<Table>>>,
    fail_headers: Arc<RwLock<HashSet<Table>>>,
}

impl MockSheetStore {
    /// Create an empty mock store with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every append to this table fail with a store/API error.
    pub fn fail_appends_on(&self, table: Table) {
        self.fail_appends.write().unwrap().insert(table);
    }

    /// Make every header write to this table fail with a store/API error.
    pub fn fail_headers_on(&self, table: Table) {
        self.fail_headers.write().unwrap().insert(table);
    }

    /// Clear all injected failures.
    pub fn clear_failures(&self) {
        self.fail_appends.write().unwrap().clear();
        self.fail_headers.write().unwrap().clear();
    }

    /// Pre-seed a table with an arbitrary header and data rows, for
    /// schema-repair tests.
    pub fn seed(&self, table: Table, header: Vec<String>, rows: Vec<Vec<String>>) {
        self.tables
            .write()
            .unwrap()
            .insert(table, MockTable { header, rows });
    }

    /// The table's current header, empty if the table does not exist.
    pub fn header(&self, table: Table) -> Vec<String> {
        self.tables
            .read()
            .unwrap()
            .get(&table)
            .map(|t| t.header.clone())
            .unwrap_or_default()
    }

    /// All data rows of a table, in append order.
    pub fn rows(&self, table: Table) -> Vec<Vec<String>> {
        self.tables
            .read()
            .unwrap()
            .get(&table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    /// Number of data rows in a table.
    pub fn row_count(&self, table: Table) -> usize {
        self.tables
            .read()
            .unwrap()
            .get(&table)
            .map(|t| t.rows.len())
            .unwrap_or(0)
    }
}

impl SheetStore for MockSheetStore {
    fn read_header(&self, table: Table) -> Result<Vec<String>, StoreError> {
        Ok(self.header(table))
    }

    fn write_header(&self, table: Table, header: &[String]) -> Result<(), StoreError> {
        if self.fail_headers.read().unwrap().contains(&table) {
            return Err(StoreError::Api {
                reason: format!("injected header-write failure on '{}'", table.name()),
            });
        }
        let mut tables = self.tables.write().unwrap();
        tables.entry(table).or_default().header = header.to_vec();
        Ok(())
    }

    fn append_row(&self, table: Table, row: Vec<String>) -> Result<(), StoreError> {
        if self.fail_appends.read().unwrap().contains(&table) {
            return Err(StoreError::Api {
                reason: format!("injected append failure on '{}'", table.name()),
            });
        }
        let mut tables = self.tables.write().unwrap();
        match tables.get_mut(&table) {
            Some(t) => {
                t.rows.push(row);
                Ok(())
            }
            None => Err(StoreError::Api {
                reason: format!("worksheet not found: '{}'", table.name()),
            }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
