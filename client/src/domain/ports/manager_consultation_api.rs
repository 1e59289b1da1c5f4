//! Driven port for the brand manager's consultation endpoints.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use super::BackendApiError;
use crate::domain::{Consultation, ConsultationId, ManagerId, RescheduleProposal};

/// Consultation endpoints authenticated with `Manager-Id`.
///
/// The backend offers no lookup by id for managers; callers page through
/// [`ManagerConsultationApi::list`] instead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagerConsultationApi: Send + Sync {
    /// One page of the consultations addressed to `manager`'s brands.
    async fn list(
        &self,
        manager: ManagerId,
        page: PageRequest,
    ) -> Result<Page<Consultation>, BackendApiError>;

    /// Confirm a pending consultation as requested.
    async fn confirm(
        &self,
        manager: ManagerId,
        id: ConsultationId,
    ) -> Result<Consultation, BackendApiError>;

    /// Propose another slot for a pending consultation.
    async fn propose_reschedule(
        &self,
        manager: ManagerId,
        id: ConsultationId,
        proposal: &RescheduleProposal,
    ) -> Result<Consultation, BackendApiError>;

    async fn cancel(
        &self,
        manager: ManagerId,
        id: ConsultationId,
    ) -> Result<Consultation, BackendApiError>;
}
