//! The brand manager's consultation service.
//!
//! Managers cannot fetch a single consultation, so every action first
//! locates the consultation in the manager's paged listing and checks the
//! transition locally before calling the backend.

use std::sync::Arc;

use mockable::Clock;
use pagination::{MAX_PAGE_SIZE, Page, PageRequest};
use tracing::info;

use super::page_scan::find_in_pages;
use super::ports::ManagerConsultationApi;
use super::service_errors::{
    CONSULTATION_CANCEL_FAILED, CONSULTATION_CONFIRM_FAILED, CONSULTATION_LIST_FAILED,
    CONSULTATION_NOT_FOUND, RESCHEDULE_FAILED, map_backend_error, map_transition_error,
};
use super::{
    Actor, Consultation, ConsultationEventKind, ConsultationId, Error, ManagerId, RescheduleForm,
    SessionContext, StatusTally,
};

/// One page of the manager's consultations with its per-status counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationBoard {
    pub page: Page<Consultation>,
    pub tally: StatusTally,
}

/// Service behind the manager's consultation dashboard.
#[derive(Clone)]
pub struct ManagerConsultationService<A> {
    api: Arc<A>,
    session: SessionContext,
    clock: Arc<dyn Clock>,
}

impl<A> ManagerConsultationService<A> {
    pub fn new(api: Arc<A>, session: SessionContext, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            session,
            clock,
        }
    }
}

impl<A> ManagerConsultationService<A>
where
    A: ManagerConsultationApi,
{
    /// One page of consultations for the manager's brands, tallied by status.
    pub async fn board(&self, page: PageRequest) -> Result<ConsultationBoard, Error> {
        let manager = self.session.require_manager()?;
        let page = self
            .api
            .list(manager, page)
            .await
            .map_err(|err| map_backend_error("list_manager_consultations", CONSULTATION_LIST_FAILED, err))?;
        let tally = StatusTally::of(&page.content);
        Ok(ConsultationBoard { page, tally })
    }

    /// Locate consultation `id` in the manager's listing.
    ///
    /// # Errors
    /// `NotFound` when no page of the listing contains it.
    pub async fn find(&self, id: ConsultationId) -> Result<Consultation, Error> {
        let manager = self.session.require_manager()?;
        self.locate(manager, id, CONSULTATION_LIST_FAILED).await
    }

    pub async fn confirm(&self, id: ConsultationId) -> Result<Consultation, Error> {
        let manager = self.session.require_manager()?;
        self.check(manager, id, ConsultationEventKind::Confirm, CONSULTATION_CONFIRM_FAILED)
            .await?;
        let confirmed = self
            .api
            .confirm(manager, id)
            .await
            .map_err(|err| map_backend_error("confirm_consultation", CONSULTATION_CONFIRM_FAILED, err))?;
        info!(consultation = %id, "consultation confirmed");
        Ok(confirmed)
    }

    /// Validate `form` and propose its slot for consultation `id`.
    ///
    /// The form is checked before the consultation is looked up, so an
    /// incomplete form never reaches the backend.
    pub async fn propose_reschedule(
        &self,
        id: ConsultationId,
        form: &RescheduleForm,
    ) -> Result<Consultation, Error> {
        let manager = self.session.require_manager()?;
        let today = self.clock.local().date_naive();
        let proposal = form.validate(today)?;
        self.check(manager, id, ConsultationEventKind::ProposeReschedule, RESCHEDULE_FAILED)
            .await?;

        let proposed = self
            .api
            .propose_reschedule(manager, id, &proposal)
            .await
            .map_err(|err| map_backend_error("propose_reschedule", RESCHEDULE_FAILED, err))?;
        info!(consultation = %id, slot = %proposal.schedule, "reschedule proposed");
        Ok(proposed)
    }

    pub async fn cancel(&self, id: ConsultationId) -> Result<Consultation, Error> {
        let manager = self.session.require_manager()?;
        self.check(manager, id, ConsultationEventKind::Cancel, CONSULTATION_CANCEL_FAILED)
            .await?;
        let cancelled = self
            .api
            .cancel(manager, id)
            .await
            .map_err(|err| map_backend_error("cancel_consultation", CONSULTATION_CANCEL_FAILED, err))?;
        info!(consultation = %id, "consultation cancelled by manager");
        Ok(cancelled)
    }

    async fn locate(
        &self,
        manager: ManagerId,
        id: ConsultationId,
        fallback: &'static str,
    ) -> Result<Consultation, Error> {
        find_in_pages(
            MAX_PAGE_SIZE,
            |page| self.api.list(manager, page),
            |consultation: &Consultation| consultation.id() == id,
        )
        .await
        .map_err(|err| map_backend_error("list_manager_consultations", fallback, err))?
        .ok_or_else(|| Error::not_found(CONSULTATION_NOT_FOUND))
    }

    async fn check(
        &self,
        manager: ManagerId,
        id: ConsultationId,
        event: ConsultationEventKind,
        fallback: &'static str,
    ) -> Result<(), Error> {
        let current = self.locate(manager, id, fallback).await?;
        current
            .ensure_allows(event, Actor::Manager)
            .map(|_| ())
            .map_err(|err| map_transition_error("manager_transition", fallback, err))
    }
}

#[cfg(test)]
#[path = "manager_consultation_service_tests.rs"]
mod tests;
