//! Public brand catalogue endpoints.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use reqwest::Method;

use super::client::{Caller, HttpBackend, invalid_data};
use super::dto::{BrandDetailDto, BrandDto, CategoryDto};
use crate::domain::ports::{BackendApiError, BrandCatalogue};
use crate::domain::{Brand, BrandCategory, BrandDetail, BrandId, CategoryId};

impl HttpBackend {
    async fn brand_page(
        &self,
        path: &str,
        page: PageRequest,
        keyword: Option<&str>,
    ) -> Result<Page<Brand>, BackendApiError> {
        let mut request = self.request(Method::GET, path, Caller::Public)?;
        if let Some(keyword) = keyword {
            request = request.query(&[("keyword", keyword)]);
        }
        let page: Page<BrandDto> = self.fetch(request.query(&page.query_pairs())).await?;
        page.try_map(BrandDto::into_domain).map_err(invalid_data)
    }
}

#[async_trait]
impl BrandCatalogue for HttpBackend {
    async fn list_brands(&self, page: PageRequest) -> Result<Page<Brand>, BackendApiError> {
        self.brand_page("api/public/brands", page, None).await
    }

    async fn brands_in_category(
        &self,
        category: CategoryId,
        page: PageRequest,
    ) -> Result<Page<Brand>, BackendApiError> {
        self.brand_page(&format!("api/public/brands/category/{category}"), page, None)
            .await
    }

    async fn search_brands(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Page<Brand>, BackendApiError> {
        self.brand_page("api/public/brands/search", page, Some(keyword))
            .await
    }

    async fn brand_detail(&self, brand: BrandId) -> Result<BrandDetail, BackendApiError> {
        let request = self.request(Method::GET, &format!("api/public/brands/{brand}"), Caller::Public)?;
        let detail: BrandDetailDto = self.fetch(request).await?;
        detail.into_domain().map_err(invalid_data)
    }

    async fn categories(&self) -> Result<Vec<BrandCategory>, BackendApiError> {
        let request = self.request(Method::GET, "api/public/categories", Caller::Public)?;
        let categories: Vec<CategoryDto> = self.fetch(request).await?;
        categories
            .into_iter()
            .map(CategoryDto::into_domain)
            .collect::<Result<_, _>>()
            .map_err(invalid_data)
    }
}
