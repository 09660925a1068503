//! ENFORCED STOCK LEDGER - the authoritative item -> quantity map.
//!
//! This is the single source of truth for stock levels. ALL mutations go
//! through [`StockLedger::reserve`].
//!
//! # Invariants (ENFORCED by private fields):
//! - A quantity never goes negative; a reservation that would overdraw is
//!   rejected, not clamped.
//! - check-then-decrement is atomic per item: the entry's shard write guard
//!   is held across the sufficiency check and the subtraction, so no two
//!   concurrent reservations can both pass the check and jointly overdraw.
//! - Reads never mutate; repeated snapshots with no intervening reservation
//!   are identical.

use std::collections::BTreeMap;

use dashmap::DashMap;
use thiserror::Error;

/// Catalog every process starts from. No persistence: a restart resets to it.
pub const SEED_CATALOG: [(&str, u64); 3] = [("item1", 100), ("item2", 50), ("item3", 200)];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    /// The item is not a known ledger key. Ledger unchanged.
    #[error("Item not found")]
    ItemNotFound,
    /// The item exists but holds fewer units than requested. Ledger unchanged.
    #[error("Insufficient stock")]
    InsufficientStock { available: u64, requested: u64 },
}

/// Concurrency-safe stock ledger.
///
/// Backed by a sharded-lock map keyed by item identifier. The ledger is the
/// only piece of mutable shared state in the system and is owned exclusively
/// by the inventory service.
#[derive(Debug)]
pub struct StockLedger {
    items: DashMap<String, u64>,
}

impl StockLedger {
    /// Ledger seeded with the fixed initial catalog.
    pub fn seeded() -> Self {
        Self::from_entries(SEED_CATALOG)
    }

    /// Ledger from arbitrary entries.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, u64)>,
    {
        let items = DashMap::new();
        for (item, quantity) in entries {
            items.insert(item.into(), quantity);
        }
        Self { items }
    }

    /// Current level for one item.
    pub fn level(&self, item: &str) -> Option<u64> {
        self.items.get(item).map(|entry| *entry)
    }

    /// Full ledger copy, read-only, always succeeds.
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.items
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Atomically check and decrement `item` by `quantity`.
    ///
    /// Returns the new level on success. The write guard returned by the
    /// map pins the item's shard for the whole check-then-decrement, which
    /// makes the operation linearizable per item.
    pub fn reserve(&self, item: &str, quantity: u64) -> Result<u64, StockError> {
        let mut entry = self.items.get_mut(item).ok_or(StockError::ItemNotFound)?;
        let available = *entry;
        if available < quantity {
            return Err(StockError::InsufficientStock {
                available,
                requested: quantity,
            });
        }
        *entry = available - quantity;
        Ok(*entry)
    }
}
