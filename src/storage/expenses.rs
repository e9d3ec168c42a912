//! JSON-file record store for expenses
//!
//! Keeps every stored document in memory, writes `expenses.json` atomically
//! after each create, and pushes full per-owner snapshots to live
//! subscriptions.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ExpensioError, ExpensioResult};
use crate::models::{Expense, ExpenseId, Money, NewExpense, UserId, DEFAULT_CATEGORY};

use super::file_io::{modified_at, read_json, write_json_atomic};
use super::subscription::{SubscriberRegistry, Subscription};
use super::traits::RecordStore;

/// A stored document as found on disk
///
/// Documents written by other tools may lack fields; they are repaired or
/// skipped when materialized, never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExpenseDocument {
    id: ExpenseId,
    owner: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl ExpenseDocument {
    fn from_expense(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            owner: expense.owner,
            title: Some(expense.title.clone()),
            category: Some(expense.category.clone()),
            amount: Some(expense.amount),
            created_at: Some(expense.created_at),
        }
    }

    /// Materialize a record; documents without a title are skipped
    fn to_expense(&self, now: DateTime<Utc>) -> Option<Expense> {
        let title = self.title.clone()?;
        Some(Expense {
            id: self.id,
            owner: self.owner,
            title,
            category: self
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            amount: self.amount.unwrap_or_default(),
            created_at: self.created_at.unwrap_or(now),
        })
    }
}

/// Serializable file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExpenseData {
    expenses: Vec<ExpenseDocument>,
}

/// File-backed [`RecordStore`]
pub struct JsonExpenseStore {
    path: PathBuf,
    documents: RwLock<Vec<ExpenseDocument>>,
    /// Modification time of the file as of the last load or save
    synced_at: Mutex<Option<SystemTime>>,
    registry: Arc<SubscriberRegistry>,
}

impl JsonExpenseStore {
    /// Create a store for `path` without touching the disk
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            documents: RwLock::new(Vec::new()),
            synced_at: Mutex::new(None),
            registry: SubscriberRegistry::new(),
        }
    }

    /// Create a store and load whatever is already on disk
    pub fn open(path: PathBuf) -> ExpensioResult<Self> {
        let store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load documents from disk, replacing the in-memory copy
    pub fn load(&self) -> ExpensioResult<()> {
        let file_data: ExpenseData = read_json(&self.path)?;
        let count = file_data.expenses.len();

        *self.documents.write().map_err(|e| {
            ExpensioError::Store(format!("Failed to acquire write lock: {}", e))
        })? = file_data.expenses;
        self.mark_synced()?;

        debug!(path = %self.path.display(), count, "expenses loaded");
        Ok(())
    }

    /// Re-read the file if another process changed it
    ///
    /// Returns `true` when the file had changed; every live subscription then
    /// receives a fresh snapshot (or the load error).
    pub fn reload(&self) -> ExpensioResult<bool> {
        let current = modified_at(&self.path);
        let previous = *self
            .synced_at
            .lock()
            .map_err(|e| ExpensioError::Store(format!("Failed to acquire sync lock: {}", e)))?;

        if current == previous {
            return Ok(false);
        }

        let owners = self.registry.owners()?;
        if let Err(err) = self.load() {
            warn!(error = %err, "reload failed");
            for owner in &owners {
                self.registry.publish_error(owner, &err.to_string())?;
            }
            return Err(err);
        }

        for owner in &owners {
            self.registry.publish(owner, &self.snapshot_for(owner)?)?;
        }
        Ok(true)
    }

    /// Number of stored documents, including ones that would be skipped
    pub fn count(&self) -> ExpensioResult<usize> {
        Ok(self
            .documents
            .read()
            .map_err(|e| ExpensioError::Store(format!("Failed to acquire read lock: {}", e)))?
            .len())
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.registry.active_count()
    }

    fn save(&self) -> ExpensioResult<()> {
        let documents = self
            .documents
            .read()
            .map_err(|e| ExpensioError::Store(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(
            &self.path,
            &ExpenseData {
                expenses: documents.clone(),
            },
        )?;
        drop(documents);

        self.mark_synced()
    }

    fn mark_synced(&self) -> ExpensioResult<()> {
        *self
            .synced_at
            .lock()
            .map_err(|e| ExpensioError::Store(format!("Failed to acquire sync lock: {}", e)))? =
            modified_at(&self.path);
        Ok(())
    }

    fn snapshot_for(&self, owner: &UserId) -> ExpensioResult<Vec<Expense>> {
        let now = Utc::now();
        let documents = self
            .documents
            .read()
            .map_err(|e| ExpensioError::Store(format!("Failed to acquire read lock: {}", e)))?;

        Ok(documents
            .iter()
            .filter(|d| d.owner == *owner)
            .filter_map(|d| d.to_expense(now))
            .collect())
    }
}

impl RecordStore for JsonExpenseStore {
    fn create(&self, new: NewExpense) -> ExpensioResult<Expense> {
        let owner = new.owner;
        let expense = new.into_expense(ExpenseId::new(), Utc::now());

        self.documents
            .write()
            .map_err(|e| ExpensioError::Store(format!("Failed to acquire write lock: {}", e)))?
            .push(ExpenseDocument::from_expense(&expense));

        if let Err(err) = self.save() {
            // Roll back so memory matches the file
            if let Ok(mut documents) = self.documents.write() {
                documents.retain(|d| d.id != expense.id);
            }
            self.registry.publish_error(&owner, &err.to_string())?;
            return Err(err);
        }

        info!(expense = %expense.id, owner = %owner, "expense created");
        self.registry.publish(&owner, &self.snapshot_for(&owner)?)?;
        Ok(expense)
    }

    fn query(&self, owner: &UserId) -> ExpensioResult<Vec<Expense>> {
        self.snapshot_for(owner)
    }

    fn subscribe(&self, owner: &UserId) -> ExpensioResult<Subscription> {
        let initial = self.snapshot_for(owner)?;
        self.registry.register(*owner, initial)
    }
}
