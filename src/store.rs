// 🗄️ Expense Store - owns the record sequence and its file
//
// The store is the only mutation surface: the UI calls add/remove/query and
// renders whatever comes back. The whole sequence lives in memory and the
// file is rewritten wholesale after every mutation. A single running
// instance owns the file; there is no locking and no atomic replace.

use crate::category::Category;
use crate::record::Expense;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Default store file, kept next to the running application.
pub const STORE_FILE: &str = "expenses.json";

/// The in-memory expense sequence plus the file it persists to.
pub struct ExpenseStore {
    path: PathBuf,
    records: Vec<Expense>,
}

impl ExpenseStore {
    /// Creates an empty store that will persist to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        ExpenseStore {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Loads the store from `path`.
    ///
    /// A missing file is not an error - it yields an empty store. An
    /// unreadable or unparseable file is an error; the caller reports it to
    /// the user and falls back to `ExpenseStore::empty`, so a bad file never
    /// blocks startup (its contents are gone after the next save).
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(ExpenseStore {
                    path,
                    records: Vec::new(),
                });
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read expenses file {}", path.display()));
            }
        };

        let records: Vec<Expense> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse expenses file {}", path.display()))?;

        Ok(ExpenseStore { path, records })
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validates and appends a new record, then rewrites the file.
    ///
    /// Amounts must be strictly positive; anything else aborts with no state
    /// change. If the append succeeds but the save fails, the record stays
    /// in memory and the error is returned - memory runs ahead of disk
    /// until the next successful save.
    pub fn add(
        &mut self,
        date: NaiveDate,
        category: Category,
        amount: f64,
        description: impl Into<String>,
    ) -> Result<Uuid> {
        if !(amount > 0.0) {
            bail!("Amount must be greater than 0!");
        }

        let expense = Expense::new(date, category, amount, description);
        let id = expense.id;
        self.records.push(expense);
        self.save()?;
        Ok(id)
    }

    /// Removes the record with the given id, then rewrites the file.
    ///
    /// Returns `false` (without touching the file) when no record has that
    /// id. Identity-based removal means exactly one record goes away even
    /// when duplicates of its visible fields exist.
    pub fn remove(&mut self, id: Uuid) -> Result<bool> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        self.records.remove(index);
        self.save()?;
        Ok(true)
    }

    /// Records ordered for display: date descending (most recent first),
    /// ties kept in insertion order.
    pub fn sorted_desc(&self) -> Vec<&Expense> {
        let mut sorted: Vec<&Expense> = self.records.iter().collect();
        // sort_by is stable, so reversing the comparator keeps ties in
        // insertion order.
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Rewrites the whole file from the in-memory sequence.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)
            .context("Failed to serialize expenses to JSON")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write expenses file {}", self.path.display()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
