//! The end user's consultation service.
//!
//! Requests are validated against the clock's local date and checked for a
//! live consultation with the same brand before anything is submitted.
//! Answers and cancellations are checked against the status machine using
//! the consultation as the backend currently reports it.

use std::sync::Arc;

use mockable::Clock;
use pagination::{MAX_PAGE_SIZE, Page, PageRequest};
use tracing::{debug, info};

use super::page_scan::find_in_pages;
use super::ports::UserConsultationApi;
use super::service_errors::{
    CONSULTATION_CANCEL_FAILED, CONSULTATION_LIST_FAILED, CONSULTATION_REQUEST_FAILED,
    CONSULTATION_RESPONSE_FAILED, DUPLICATE_CONSULTATION, map_backend_error, map_transition_error,
};
use super::{
    Actor, Consultation, ConsultationEventKind, ConsultationId, ConsultationRequestForm, Error,
    RescheduleResponse, SessionContext, UserId,
};

/// Service behind the user's consultation pages.
#[derive(Clone)]
pub struct ConsultationService<A> {
    api: Arc<A>,
    session: SessionContext,
    clock: Arc<dyn Clock>,
}

impl<A> ConsultationService<A> {
    pub fn new(api: Arc<A>, session: SessionContext, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            session,
            clock,
        }
    }
}

impl<A> ConsultationService<A>
where
    A: UserConsultationApi,
{
    /// Validate and submit a consultation request.
    ///
    /// # Errors
    /// - `InvalidRequest` with the form's message when validation fails; no
    ///   request is sent.
    /// - `Conflict` when the user already has a live consultation with the
    ///   brand, whether found locally or reported by the backend.
    pub async fn request(&self, form: &ConsultationRequestForm) -> Result<Consultation, Error> {
        let user = self.session.require_user()?;
        let today = self.clock.local().date_naive();
        let new_consultation = form.validate(today)?;

        let existing = find_in_pages(
            MAX_PAGE_SIZE,
            |page| self.api.list(user, page),
            |consultation: &Consultation| consultation.blocks_request_for(new_consultation.brand_id),
        )
        .await
        .map_err(|err| map_backend_error("list_consultations", CONSULTATION_REQUEST_FAILED, err))?;
        if let Some(existing) = existing {
            debug!(
                consultation = %existing.id(),
                brand = %new_consultation.brand_id,
                "live consultation already exists"
            );
            return Err(Error::conflict(DUPLICATE_CONSULTATION));
        }

        let created = self
            .api
            .create(user, &new_consultation)
            .await
            .map_err(|err| map_backend_error("create_consultation", CONSULTATION_REQUEST_FAILED, err))?;
        info!(consultation = %created.id(), brand = %created.brand().id, "consultation requested");
        Ok(created)
    }

    /// One page of the user's consultations.
    pub async fn list(&self, page: PageRequest) -> Result<Page<Consultation>, Error> {
        let user = self.session.require_user()?;
        self.api
            .list(user, page)
            .await
            .map_err(|err| map_backend_error("list_consultations", CONSULTATION_LIST_FAILED, err))
    }

    pub async fn show(&self, id: ConsultationId) -> Result<Consultation, Error> {
        let user = self.session.require_user()?;
        self.load(user, id, CONSULTATION_LIST_FAILED).await
    }

    /// Accept or reject the manager's proposal.
    pub async fn respond(
        &self,
        id: ConsultationId,
        response: RescheduleResponse,
    ) -> Result<Consultation, Error> {
        let user = self.session.require_user()?;
        let current = self.load(user, id, CONSULTATION_RESPONSE_FAILED).await?;
        current
            .ensure_allows(response.event_kind(), Actor::User)
            .map_err(|err| {
                map_transition_error("respond_to_reschedule", CONSULTATION_RESPONSE_FAILED, err)
            })?;

        let updated = self
            .api
            .respond(user, id, response)
            .await
            .map_err(|err| {
                map_backend_error("respond_to_reschedule", CONSULTATION_RESPONSE_FAILED, err)
            })?;
        info!(consultation = %id, response = response.as_str(), "reschedule answered");
        Ok(updated)
    }

    pub async fn accept(&self, id: ConsultationId) -> Result<Consultation, Error> {
        self.respond(id, RescheduleResponse::Accept).await
    }

    pub async fn reject(&self, id: ConsultationId) -> Result<Consultation, Error> {
        self.respond(id, RescheduleResponse::Reject).await
    }

    pub async fn cancel(&self, id: ConsultationId) -> Result<Consultation, Error> {
        let user = self.session.require_user()?;
        let current = self.load(user, id, CONSULTATION_CANCEL_FAILED).await?;
        current
            .ensure_allows(ConsultationEventKind::Cancel, Actor::User)
            .map_err(|err| map_transition_error("cancel_consultation", CONSULTATION_CANCEL_FAILED, err))?;

        let updated = self
            .api
            .cancel(user, id)
            .await
            .map_err(|err| map_backend_error("cancel_consultation", CONSULTATION_CANCEL_FAILED, err))?;
        info!(consultation = %id, "consultation cancelled by user");
        Ok(updated)
    }

    async fn load(
        &self,
        user: UserId,
        id: ConsultationId,
        fallback: &'static str,
    ) -> Result<Consultation, Error> {
        self.api
            .get(user, id)
            .await
            .map_err(|err| map_backend_error("get_consultation", fallback, err))
    }
}

#[cfg(test)]
#[path = "consultation_service_tests.rs"]
mod tests;
