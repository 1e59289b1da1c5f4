//! Driven port for the user's saved ("찜") brands.

use std::collections::BTreeMap;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use super::BackendApiError;
use crate::domain::{Brand, BrandId, UserId};

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveToggleOutcome {
    /// New flag, when the backend reported it.
    pub saved: Option<bool>,
}

/// Saved-brand endpoints, authenticated with `User-Id`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedBrandApi: Send + Sync {
    /// One page of the brands `user` has saved.
    async fn saved_brands(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Page<Brand>, BackendApiError>;

    /// Flip the saved flag of `brand`.
    async fn toggle_saved(
        &self,
        user: UserId,
        brand: BrandId,
    ) -> Result<SaveToggleOutcome, BackendApiError>;

    /// Saved flags for `brands`. Brands missing from the answer are unsaved.
    async fn save_status(
        &self,
        user: UserId,
        brands: &[BrandId],
    ) -> Result<BTreeMap<BrandId, bool>, BackendApiError>;
}
