use crate::models::transaction::{Transaction, TransactionEntry};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed transactions file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("expense type '{0}' not found")]
    UnknownCategory(String),
    #[error("invalid transaction index {index} for expense type '{category}'")]
    InvalidIndex { category: String, index: usize },
}

/// Canonical collection of transactions grouped by category, backed by a
/// single JSON file. Every successful mutation rewrites the whole file;
/// the file is the only durable copy between runs.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    categories: BTreeMap<String, Vec<Transaction>>,
}

impl Store {
    /// Loads the store from `path`. An absent file is the normal
    /// first-run state and yields an empty store; unreadable or
    /// malformed content is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let categories = match fs::read_to_string(&path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                    path: path.display().to_string(),
                    source,
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        log::debug!(
            "loaded {} categories from {}",
            categories.len(),
            path.display()
        );
        Ok(Self { path, categories })
    }

    /// Serializes the full mapping to the backing file, pretty-printed,
    /// overwriting whatever was there.
    pub fn save(&self) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(&self.categories).map_err(|source| StoreError::Parse {
                path: self.path.display().to_string(),
                source,
            })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        log::debug!(
            "saved {} categories to {}",
            self.categories.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Appends a transaction to the canonical form of `category`,
    /// creating the category if needed, then persists.
    pub fn add(&mut self, category: &str, amount: Decimal, date: &str) -> Result<(), StoreError> {
        let key = canonical_category(category);
        self.categories
            .entry(key)
            .or_default()
            .push(Transaction::new(amount, date));
        self.save()
    }

    /// Replaces the transaction at the 1-based `index` wholesale. The
    /// store is left untouched when the category or index is invalid.
    pub fn update(
        &mut self,
        category: &str,
        index: usize,
        amount: Decimal,
        date: &str,
    ) -> Result<(), StoreError> {
        let key = canonical_category(category);
        let transactions = self
            .categories
            .get_mut(&key)
            .ok_or_else(|| StoreError::UnknownCategory(key.clone()))?;
        if index == 0 || index > transactions.len() {
            return Err(StoreError::InvalidIndex {
                category: key,
                index,
            });
        }
        transactions[index - 1] = Transaction::new(amount, date);
        self.save()
    }

    /// Removes the transaction at the 1-based `index`, shifting later
    /// transactions left. An emptied category keeps its key; callers
    /// relying on indices must re-read them after a delete.
    pub fn remove(&mut self, category: &str, index: usize) -> Result<(), StoreError> {
        let key = canonical_category(category);
        let transactions = self
            .categories
            .get_mut(&key)
            .ok_or_else(|| StoreError::UnknownCategory(key.clone()))?;
        if index == 0 || index > transactions.len() {
            return Err(StoreError::InvalidIndex {
                category: key,
                index,
            });
        }
        transactions.remove(index - 1);
        self.save()
    }

    /// Appends a batch of pre-parsed records, canonicalizing each
    /// category, then persists once for the whole batch.
    pub fn merge(&mut self, records: Vec<(String, Transaction)>) -> Result<(), StoreError> {
        for (category, transaction) in records {
            self.categories
                .entry(canonical_category(&category))
                .or_default()
                .push(transaction);
        }
        self.save()
    }

    /// Per-category totals. Empty categories are still listed with a
    /// total of zero.
    pub fn summarize(&self) -> BTreeMap<String, Decimal> {
        self.categories
            .iter()
            .map(|(category, transactions)| {
                let total: Decimal = transactions.iter().map(|t| t.amount).sum();
                (category.clone(), total)
            })
            .collect()
    }

    /// Category-major projection of every transaction, in mapping
    /// iteration order and then insertion order within a category.
    pub fn flatten(&self) -> Vec<TransactionEntry> {
        self.categories
            .iter()
            .flat_map(|(category, transactions)| {
                transactions.iter().map(|t| TransactionEntry {
                    category: category.clone(),
                    amount: t.amount,
                    date: t.date.clone(),
                })
            })
            .collect()
    }

    pub fn categories(&self) -> &BTreeMap<String, Vec<Transaction>> {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Canonical category form: first character uppercased, the rest
/// lowercased, so "food", "FOOD" and "Food" share one key.
pub fn canonical_category(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
