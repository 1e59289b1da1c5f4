//! Endpoints authenticated with the `User-Id` header.

use std::collections::BTreeMap;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use reqwest::Method;

use super::client::{Caller, HttpBackend, invalid_data};
use super::dto::{
    ConsultationDto, ConsultationRequestDto, RescheduleResponseDto, SaveStatusRequestDto,
    SaveToggleDto, SavedListDto, parse_save_status,
};
use crate::domain::ports::{
    BackendApiError, SaveToggleOutcome, SavedBrandApi, UserConsultationApi,
};
use crate::domain::{
    Brand, BrandId, Consultation, ConsultationId, NewConsultation, RescheduleResponse, UserId,
};

#[async_trait]
impl SavedBrandApi for HttpBackend {
    async fn saved_brands(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Page<Brand>, BackendApiError> {
        let request = self
            .request(Method::GET, "api/user/brands/saved", Caller::User(user))?
            .query(&page.query_pairs());
        let listed: SavedListDto = self.fetch(request).await?;
        listed.into_page(page).map_err(invalid_data)
    }

    async fn toggle_saved(
        &self,
        user: UserId,
        brand: BrandId,
    ) -> Result<SaveToggleOutcome, BackendApiError> {
        let request = self.request(
            Method::POST,
            &format!("api/user/brands/{brand}/save"),
            Caller::User(user),
        )?;
        let toggled: Option<SaveToggleDto> = self.fetch_optional(request).await?;
        Ok(SaveToggleOutcome {
            saved: toggled.and_then(|dto| dto.saved),
        })
    }

    async fn save_status(
        &self,
        user: UserId,
        brands: &[BrandId],
    ) -> Result<BTreeMap<BrandId, bool>, BackendApiError> {
        let body = SaveStatusRequestDto {
            brand_ids: brands.iter().map(|brand| brand.get()).collect(),
        };
        let request = self
            .request(Method::POST, "api/user/brands/save-status", Caller::User(user))?
            .json(&body);
        let raw: Option<BTreeMap<String, bool>> = self.fetch_optional(request).await?;
        parse_save_status(raw.unwrap_or_default()).map_err(invalid_data)
    }
}

#[async_trait]
impl UserConsultationApi for HttpBackend {
    async fn create(
        &self,
        user: UserId,
        request: &NewConsultation,
    ) -> Result<Consultation, BackendApiError> {
        let request = self
            .request(Method::POST, "api/user/consultations", Caller::User(user))?
            .json(&ConsultationRequestDto::from(request));
        self.fetch_consultation(request).await
    }

    async fn list(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Page<Consultation>, BackendApiError> {
        let request = self
            .request(Method::GET, "api/user/consultations", Caller::User(user))?
            .query(&page.query_pairs());
        let page: Page<ConsultationDto> = self.fetch(request).await?;
        page.try_map(ConsultationDto::into_domain).map_err(invalid_data)
    }

    async fn get(&self, user: UserId, id: ConsultationId) -> Result<Consultation, BackendApiError> {
        let request = self.request(
            Method::GET,
            &format!("api/user/consultations/{id}"),
            Caller::User(user),
        )?;
        self.fetch_consultation(request).await
    }

    async fn respond(
        &self,
        user: UserId,
        id: ConsultationId,
        response: RescheduleResponse,
    ) -> Result<Consultation, BackendApiError> {
        let request = self
            .request(
                Method::POST,
                &format!("api/user/consultations/{id}/reschedule-response"),
                Caller::User(user),
            )?
            .json(&RescheduleResponseDto::from(response));
        self.fetch_consultation(request).await
    }

    async fn cancel(
        &self,
        user: UserId,
        id: ConsultationId,
    ) -> Result<Consultation, BackendApiError> {
        let request = self.request(
            Method::PUT,
            &format!("api/user/consultations/{id}/cancel"),
            Caller::User(user),
        )?;
        self.fetch_consultation(request).await
    }
}
