//! Saved-brand service with the optimistic toggle.
//!
//! The local [`SaveStateBook`] flips before the toggle request is sent and
//! is restored when the request fails. After a successful toggle the
//! backend's flag wins: either the one it reported or, failing that, the one
//! it answers to a save-status query. Overlapping toggles are not
//! serialised; the last response to land decides the flag.

use std::collections::BTreeMap;
use std::sync::Arc;

use pagination::{Page, PageRequest};
use tracing::{debug, warn};

use super::ports::SavedBrandApi;
use super::service_errors::{SAVE_TOGGLE_FAILED, SAVED_LIST_FAILED, map_backend_error};
use super::{Brand, BrandId, Error, SaveStateBook, SessionContext, UserId};

/// Service behind the saved-brands view and the save buttons.
#[derive(Clone)]
pub struct SavedBrandService<A> {
    api: Arc<A>,
    session: SessionContext,
    book: SaveStateBook,
}

impl<A> SavedBrandService<A> {
    pub fn new(api: Arc<A>, session: SessionContext, book: SaveStateBook) -> Self {
        Self { api, session, book }
    }

    /// The local flags this service maintains.
    pub fn book(&self) -> &SaveStateBook {
        &self.book
    }
}

impl<A> SavedBrandService<A>
where
    A: SavedBrandApi,
{
    /// One page of the user's saved brands. Every listed brand is recorded
    /// as saved.
    pub async fn saved_brands(&self, page: PageRequest) -> Result<Page<Brand>, Error> {
        let user = self.session.require_user()?;
        let page = self
            .api
            .saved_brands(user, page)
            .await
            .map_err(|err| map_backend_error("saved_brands", SAVED_LIST_FAILED, err))?;
        for brand in &page.content {
            self.book.record(brand.id, true);
        }
        Ok(page)
    }

    /// Replace the local flags of `brands` with the backend's answer.
    /// Brands the backend leaves out are unsaved.
    pub async fn refresh(&self, brands: &[BrandId]) -> Result<BTreeMap<BrandId, bool>, Error> {
        let user = self.session.require_user()?;
        let reported = self
            .api
            .save_status(user, brands)
            .await
            .map_err(|err| map_backend_error("save_status", SAVED_LIST_FAILED, err))?;
        let flags: BTreeMap<BrandId, bool> = brands
            .iter()
            .map(|brand| (*brand, reported.get(brand).copied().unwrap_or(false)))
            .collect();
        self.book.replace_all(&flags);
        Ok(flags)
    }

    /// Flip the saved flag of `brand` and return the flag now in effect.
    ///
    /// # Errors
    /// Unauthorized without a logged-in user; otherwise the toggle failure,
    /// after the local flag has been restored.
    pub async fn toggle(&self, brand: BrandId) -> Result<bool, Error> {
        let user = self.session.require_user()?;
        let previous = self.book.is_saved(brand);
        self.book.record(brand, !previous);
        debug!(%brand, saved = !previous, "optimistic save toggle");

        let outcome = match self.api.toggle_saved(user, brand).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.book.record(brand, previous);
                warn!(%brand, saved = previous, "save toggle failed, flag restored");
                return Err(map_backend_error("toggle_saved", SAVE_TOGGLE_FAILED, err));
            }
        };

        let saved = match outcome.saved {
            Some(saved) => saved,
            None => self.reread(user, brand, !previous).await,
        };
        self.book.record(brand, saved);
        Ok(saved)
    }

    /// Toggle `brand` and move its save counter by one when the flag in
    /// effect changed.
    ///
    /// # Errors
    /// As [`Self::toggle`]; the counter is left alone on failure.
    pub async fn toggle_brand(&self, brand: &mut Brand) -> Result<bool, Error> {
        let before = self.book.is_saved(brand.id);
        let saved = self.toggle(brand.id).await?;
        if saved != before {
            brand.record_save_toggle(saved);
        }
        Ok(saved)
    }

    async fn reread(&self, user: UserId, brand: BrandId, assumed: bool) -> bool {
        match self.api.save_status(user, &[brand]).await {
            Ok(flags) => flags.get(&brand).copied().unwrap_or(false),
            Err(err) => {
                warn!(%brand, error = %err, "save status re-read failed, keeping toggled flag");
                assumed
            }
        }
    }
}

#[cfg(test)]
#[path = "saved_brand_service_tests.rs"]
mod tests;
