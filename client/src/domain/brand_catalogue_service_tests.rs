//! Tests for the brand catalogue service.

use std::sync::Arc;

use mockall::predicate::eq;
use pagination::{Page, PageRequest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{BackendApiError, MockBrandCatalogue};
use crate::test_support::{brand_id, sample_brand};

fn one_brand_page() -> Page<Brand> {
    Page::from_items(vec![sample_brand(42, "교촌치킨")], PageRequest::default())
}

#[tokio::test]
async fn blank_search_falls_back_to_the_full_listing() {
    let mut catalogue = MockBrandCatalogue::new();
    catalogue.expect_search_brands().times(0);
    catalogue
        .expect_list_brands()
        .times(1)
        .return_once(|_| Ok(one_brand_page()));

    let service = BrandCatalogueService::new(Arc::new(catalogue));
    let page = service
        .search("   ", PageRequest::default())
        .await
        .expect("listing succeeds");

    assert_eq!(page.content.len(), 1);
}

#[tokio::test]
async fn search_trims_the_keyword() {
    let mut catalogue = MockBrandCatalogue::new();
    catalogue
        .expect_search_brands()
        .withf(|keyword, _| keyword.to_string() == "치킨")
        .times(1)
        .return_once(|_, _| Ok(one_brand_page()));

    let service = BrandCatalogueService::new(Arc::new(catalogue));
    let page = service
        .search(" 치킨 ", PageRequest::default())
        .await
        .expect("search succeeds");

    assert_eq!(page.content[0].name, "교촌치킨");
}

#[tokio::test]
async fn detail_failures_use_the_brand_message() {
    let mut catalogue = MockBrandCatalogue::new();
    catalogue
        .expect_brand_detail()
        .with(eq(brand_id(7)))
        .return_once(|_| Err(BackendApiError::transport("connection refused")));

    let service = BrandCatalogueService::new(Arc::new(catalogue));
    let error = service
        .detail(brand_id(7))
        .await
        .expect_err("detail fails");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(error.message(), BRAND_LOAD_FAILED);
}

#[tokio::test]
async fn missing_brand_keeps_the_backend_message() {
    let mut catalogue = MockBrandCatalogue::new();
    catalogue.expect_brand_detail().return_once(|_| {
        Err(BackendApiError::rejected(
            404_u16,
            Some("BRAND_NOT_FOUND".to_owned()),
            "브랜드를 찾을 수 없습니다.",
        ))
    });

    let service = BrandCatalogueService::new(Arc::new(catalogue));
    let error = service
        .detail(brand_id(9))
        .await
        .expect_err("detail fails");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "브랜드를 찾을 수 없습니다.");
}

#[tokio::test]
async fn categories_are_passed_through() {
    let mut catalogue = MockBrandCatalogue::new();
    catalogue.expect_categories().return_once(|| {
        Ok(vec![BrandCategory {
            id: CategoryId::new(1).expect("category id"),
            name: "외식".to_owned(),
            description: None,
        }])
    });

    let service = BrandCatalogueService::new(Arc::new(catalogue));
    let categories = service.categories().await.expect("categories load");

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "외식");
}
