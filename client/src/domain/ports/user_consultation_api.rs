//! Driven port for the end user's consultation endpoints.
//!
//! Mutations answer with the consultation as stored after the change.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use super::BackendApiError;
use crate::domain::{Consultation, ConsultationId, NewConsultation, RescheduleResponse, UserId};

/// Consultation endpoints authenticated with `User-Id`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserConsultationApi: Send + Sync {
    /// Submit a new consultation request.
    async fn create(
        &self,
        user: UserId,
        request: &NewConsultation,
    ) -> Result<Consultation, BackendApiError>;

    /// One page of `user`'s consultations, newest first.
    async fn list(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Page<Consultation>, BackendApiError>;

    async fn get(&self, user: UserId, id: ConsultationId)
    -> Result<Consultation, BackendApiError>;

    /// Accept or reject a reschedule proposal.
    async fn respond(
        &self,
        user: UserId,
        id: ConsultationId,
        response: RescheduleResponse,
    ) -> Result<Consultation, BackendApiError>;

    async fn cancel(
        &self,
        user: UserId,
        id: ConsultationId,
    ) -> Result<Consultation, BackendApiError>;
}
