//! Endpoints authenticated with the `Manager-Id` header.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use reqwest::Method;

use super::client::{Caller, HttpBackend, invalid_data};
use super::dto::{ConsultationDto, RescheduleRequestDto};
use crate::domain::ports::{BackendApiError, ManagerConsultationApi};
use crate::domain::{Consultation, ConsultationId, ManagerId, RescheduleProposal};

#[async_trait]
impl ManagerConsultationApi for HttpBackend {
    async fn list(
        &self,
        manager: ManagerId,
        page: PageRequest,
    ) -> Result<Page<Consultation>, BackendApiError> {
        let request = self
            .request(Method::GET, "api/manager/consultations", Caller::Manager(manager))?
            .query(&page.query_pairs());
        let page: Page<ConsultationDto> = self.fetch(request).await?;
        page.try_map(ConsultationDto::into_domain).map_err(invalid_data)
    }

    async fn confirm(
        &self,
        manager: ManagerId,
        id: ConsultationId,
    ) -> Result<Consultation, BackendApiError> {
        let request = self.request(
            Method::PUT,
            &format!("api/manager/consultations/{id}/confirm"),
            Caller::Manager(manager),
        )?;
        self.fetch_consultation(request).await
    }

    async fn propose_reschedule(
        &self,
        manager: ManagerId,
        id: ConsultationId,
        proposal: &RescheduleProposal,
    ) -> Result<Consultation, BackendApiError> {
        let request = self
            .request(
                Method::PUT,
                &format!("api/manager/consultations/{id}/reschedule"),
                Caller::Manager(manager),
            )?
            .json(&RescheduleRequestDto::from(proposal));
        self.fetch_consultation(request).await
    }

    async fn cancel(
        &self,
        manager: ManagerId,
        id: ConsultationId,
    ) -> Result<Consultation, BackendApiError> {
        let request = self.request(
            Method::PUT,
            &format!("api/manager/consultations/{id}/cancel"),
            Caller::Manager(manager),
        )?;
        self.fetch_consultation(request).await
    }
}
