//! Local record of which brands the user has saved.
//!
//! The book is a cache of the backend's answer, updated optimistically while
//! a toggle is in flight. Brands never seen count as unsaved.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::BrandId;

/// Shared per-brand saved flags.
#[derive(Debug, Clone, Default)]
pub struct SaveStateBook {
    flags: Arc<Mutex<BTreeMap<BrandId, bool>>>,
}

impl SaveStateBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn flags(&self) -> MutexGuard<'_, BTreeMap<BrandId, bool>> {
        self.flags.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The recorded flag for `brand`; `false` when unknown.
    pub fn is_saved(&self, brand: BrandId) -> bool {
        self.flags().get(&brand).copied().unwrap_or(false)
    }

    /// Record `saved` for `brand`, returning the previous flag.
    pub fn record(&self, brand: BrandId, saved: bool) -> bool {
        self.flags().insert(brand, saved).unwrap_or(false)
    }

    /// Overwrite the flags for every brand in `flags`.
    pub fn replace_all(&self, flags: &BTreeMap<BrandId, bool>) {
        let mut current = self.flags();
        for (brand, saved) in flags {
            current.insert(*brand, *saved);
        }
    }

    /// Brands currently recorded as saved.
    pub fn saved_brands(&self) -> Vec<BrandId> {
        self.flags()
            .iter()
            .filter_map(|(brand, saved)| saved.then_some(*brand))
            .collect()
    }
}
