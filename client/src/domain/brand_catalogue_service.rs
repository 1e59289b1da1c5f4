//! Brand browsing service.
//!
//! Public listings need no identity; failures are reduced to the listing's
//! generic message unless the backend explained itself.

use std::sync::Arc;

use pagination::{Page, PageRequest};
use tracing::debug;

use super::ports::BrandCatalogue;
use super::service_errors::{
    BRAND_LIST_FAILED, BRAND_LOAD_FAILED, CATEGORY_LOAD_FAILED, map_backend_error,
};
use super::{Brand, BrandCategory, BrandDetail, BrandId, CategoryId, Error};

/// Service behind the brand list, search, category and detail views.
#[derive(Clone)]
pub struct BrandCatalogueService<C> {
    catalogue: Arc<C>,
}

impl<C> BrandCatalogueService<C> {
    pub fn new(catalogue: Arc<C>) -> Self {
        Self { catalogue }
    }
}

impl<C> BrandCatalogueService<C>
where
    C: BrandCatalogue,
{
    /// One page of all brands.
    pub async fn browse(&self, page: PageRequest) -> Result<Page<Brand>, Error> {
        self.catalogue
            .list_brands(page)
            .await
            .map_err(|err| map_backend_error("list_brands", BRAND_LIST_FAILED, err))
    }

    /// Brands matching `keyword`. A blank keyword lists every brand.
    pub async fn search(&self, keyword: &str, page: PageRequest) -> Result<Page<Brand>, Error> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            debug!("blank search keyword, listing all brands");
            return self.browse(page).await;
        }
        self.catalogue
            .search_brands(keyword, page)
            .await
            .map_err(|err| map_backend_error("search_brands", BRAND_LIST_FAILED, err))
    }

    pub async fn by_category(
        &self,
        category: CategoryId,
        page: PageRequest,
    ) -> Result<Page<Brand>, Error> {
        self.catalogue
            .brands_in_category(category, page)
            .await
            .map_err(|err| map_backend_error("brands_in_category", BRAND_LIST_FAILED, err))
    }

    pub async fn detail(&self, brand: BrandId) -> Result<BrandDetail, Error> {
        self.catalogue
            .brand_detail(brand)
            .await
            .map_err(|err| map_backend_error("brand_detail", BRAND_LOAD_FAILED, err))
    }

    pub async fn categories(&self) -> Result<Vec<BrandCategory>, Error> {
        self.catalogue
            .categories()
            .await
            .map_err(|err| map_backend_error("categories", CATEGORY_LOAD_FAILED, err))
    }
}

#[cfg(test)]
#[path = "brand_catalogue_service_tests.rs"]
mod tests;
