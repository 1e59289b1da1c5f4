//! Driven port for the public brand listing endpoints.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use super::BackendApiError;
use crate::domain::{Brand, BrandCategory, BrandDetail, BrandId, CategoryId};

/// Anonymous, read-only access to brands and categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandCatalogue: Send + Sync {
    /// One page of all brands.
    async fn list_brands(&self, page: PageRequest) -> Result<Page<Brand>, BackendApiError>;

    /// One page of the brands in `category`.
    async fn brands_in_category(
        &self,
        category: CategoryId,
        page: PageRequest,
    ) -> Result<Page<Brand>, BackendApiError>;

    /// One page of brands matching `keyword`.
    async fn search_brands(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Page<Brand>, BackendApiError>;

    /// Detail of one brand.
    async fn brand_detail(&self, brand: BrandId) -> Result<BrandDetail, BackendApiError>;

    /// All categories.
    async fn categories(&self) -> Result<Vec<BrandCategory>, BackendApiError>;
}
