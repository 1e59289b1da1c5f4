//! Consultation aggregate and reschedule negotiation.
//!
//! A consultation is a user's request to meet a brand's manager. Its status
//! follows the fixed table in [`ConsultationStatus::next`]; [`Consultation::apply`]
//! is the only way to move a consultation value between statuses, which keeps
//! the side effects (confirmation timestamp, adopted reschedule slot) next
//! to the transition that causes them.

use chrono::NaiveDateTime;

use super::{BrandId, ConsultationId, UserId};

mod schedule;
mod status;

pub use schedule::{
    DATE_FORMAT, Schedule, TIME_FORMAT, is_offered_slot, offered_slots, parse_date, parse_time,
};
pub use status::{Actor, ConsultationEventKind, ConsultationStatus, ParseConsultationStatusError};

/// Brand a consultation is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandRef {
    pub id: BrandId,
    pub name: String,
}

/// The user who requested a consultation, as far as the backend reveals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Requester {
    pub id: Option<UserId>,
    pub name: Option<String>,
}

/// Alternative slot proposed by a manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleProposal {
    pub schedule: Schedule,
    pub reason: Option<String>,
    pub manager_note: Option<String>,
}

/// Validated payload for a new consultation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConsultation {
    pub brand_id: BrandId,
    pub schedule: Schedule,
    pub message: String,
}

/// A user's answer to a reschedule proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RescheduleResponse {
    Accept,
    Reject,
}

impl RescheduleResponse {
    /// Wire value sent to the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "ACCEPT",
            Self::Reject => "REJECT",
        }
    }

    /// The status-machine event this answer triggers.
    pub fn event_kind(self) -> ConsultationEventKind {
        match self {
            Self::Accept => ConsultationEventKind::AcceptReschedule,
            Self::Reject => ConsultationEventKind::RejectReschedule,
        }
    }
}

/// An event applied to a consultation, with the data it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsultationEvent {
    Confirm,
    ProposeReschedule(RescheduleProposal),
    AcceptReschedule,
    RejectReschedule,
    Cancel,
}

impl ConsultationEvent {
    /// The kind used by the transition table.
    pub fn kind(&self) -> ConsultationEventKind {
        match self {
            Self::Confirm => ConsultationEventKind::Confirm,
            Self::ProposeReschedule(_) => ConsultationEventKind::ProposeReschedule,
            Self::AcceptReschedule => ConsultationEventKind::AcceptReschedule,
            Self::RejectReschedule => ConsultationEventKind::RejectReschedule,
            Self::Cancel => ConsultationEventKind::Cancel,
        }
    }
}

impl From<RescheduleResponse> for ConsultationEvent {
    fn from(value: RescheduleResponse) -> Self {
        match value {
            RescheduleResponse::Accept => Self::AcceptReschedule,
            RescheduleResponse::Reject => Self::RejectReschedule,
        }
    }
}

/// Rejected status transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The transition table has no edge for this status and event.
    #[error("cannot {event} a consultation in status {from}")]
    NotAllowed {
        from: ConsultationStatus,
        event: ConsultationEventKind,
    },
    /// The event belongs to the other party.
    #[error("a {actor} may not {event} a consultation")]
    ActorNotPermitted {
        event: ConsultationEventKind,
        actor: Actor,
    },
}

/// Validation errors raised by [`Consultation::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsultationValidationError {
    #[error("consultation {id} awaits a reschedule answer but carries no proposal")]
    MissingProposal { id: ConsultationId },
}

/// Input payload for [`Consultation::new`].
#[derive(Debug, Clone)]
pub struct ConsultationDraft {
    pub id: ConsultationId,
    pub brand: BrandRef,
    pub requester: Requester,
    pub preferred: Schedule,
    pub status: ConsultationStatus,
    pub proposal: Option<RescheduleProposal>,
    pub message: Option<String>,
    pub created_at: NaiveDateTime,
    pub confirmed_at: Option<NaiveDateTime>,
}

/// One consultation as last seen from the backend.
///
/// ## Invariants
/// - A `RESCHEDULE_REQUEST` consultation always carries a proposal.
/// - `schedule()` is the slot the meeting will take place in: the preferred
///   slot, or the proposed one once a reschedule has been accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consultation {
    id: ConsultationId,
    brand: BrandRef,
    requester: Requester,
    preferred: Schedule,
    schedule: Schedule,
    status: ConsultationStatus,
    proposal: Option<RescheduleProposal>,
    message: Option<String>,
    created_at: NaiveDateTime,
    confirmed_at: Option<NaiveDateTime>,
}

impl Consultation {
    /// Creates a validated consultation.
    ///
    /// A confirmed consultation that still carries a proposal was confirmed
    /// by accepting it, so its effective schedule is the proposed slot.
    pub fn new(draft: ConsultationDraft) -> Result<Self, ConsultationValidationError> {
        let ConsultationDraft {
            id,
            brand,
            requester,
            preferred,
            status,
            proposal,
            message,
            created_at,
            confirmed_at,
        } = draft;

        if status == ConsultationStatus::RescheduleRequest && proposal.is_none() {
            return Err(ConsultationValidationError::MissingProposal { id });
        }
        let schedule = match (&proposal, status) {
            (Some(proposal), ConsultationStatus::Confirmed) => proposal.schedule,
            _ => preferred,
        };

        Ok(Self {
            id,
            brand,
            requester,
            preferred,
            schedule,
            status,
            proposal,
            message,
            created_at,
            confirmed_at,
        })
    }

    pub fn id(&self) -> ConsultationId {
        self.id
    }

    pub fn brand(&self) -> &BrandRef {
        &self.brand
    }

    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    /// Slot originally requested by the user.
    pub fn preferred(&self) -> Schedule {
        self.preferred
    }

    /// Effective slot.
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn status(&self) -> ConsultationStatus {
        self.status
    }

    pub fn proposal(&self) -> Option<&RescheduleProposal> {
        self.proposal.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn confirmed_at(&self) -> Option<NaiveDateTime> {
        self.confirmed_at
    }

    /// Whether the consultation still blocks a new request for its brand.
    pub fn is_active(&self) -> bool {
        self.status != ConsultationStatus::Cancelled
    }

    /// Whether this consultation rules out a new request for `brand`.
    pub fn blocks_request_for(&self, brand: BrandId) -> bool {
        self.is_active() && self.brand.id == brand
    }

    /// Check that `actor` may trigger `event` in the current status.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// # let consultation = sample_pending_consultation();
    /// use franchise_client::domain::{Actor, ConsultationEventKind};
    ///
    /// assert!(consultation.ensure_allows(ConsultationEventKind::Confirm, Actor::Manager).is_ok());
    /// assert!(consultation.ensure_allows(ConsultationEventKind::Confirm, Actor::User).is_err());
    /// ```
    pub fn ensure_allows(
        &self,
        event: ConsultationEventKind,
        actor: Actor,
    ) -> Result<ConsultationStatus, TransitionError> {
        if !event.permits(actor) {
            return Err(TransitionError::ActorNotPermitted { event, actor });
        }
        self.status.next(event).ok_or(TransitionError::NotAllowed {
            from: self.status,
            event,
        })
    }

    /// Apply `event` on behalf of `actor` at time `at`.
    pub fn apply(
        mut self,
        event: ConsultationEvent,
        actor: Actor,
        at: NaiveDateTime,
    ) -> Result<Self, TransitionError> {
        let next = self.ensure_allows(event.kind(), actor)?;
        match event {
            ConsultationEvent::Confirm => self.confirmed_at = Some(at),
            ConsultationEvent::ProposeReschedule(proposal) => self.proposal = Some(proposal),
            ConsultationEvent::AcceptReschedule => {
                if let Some(proposal) = &self.proposal {
                    self.schedule = proposal.schedule;
                }
                self.confirmed_at = Some(at);
            }
            ConsultationEvent::RejectReschedule | ConsultationEvent::Cancel => {}
        }
        self.status = next;
        Ok(self)
    }
}

/// Number of consultations per status, as shown on the manager dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusTally {
    pub pending: usize,
    pub reschedule_requested: usize,
    pub confirmed: usize,
    pub cancelled: usize,
}

impl StatusTally {
    /// Count `consultations` by status.
    pub fn of<'a>(consultations: impl IntoIterator<Item = &'a Consultation>) -> Self {
        consultations
            .into_iter()
            .fold(Self::default(), |mut tally, consultation| {
                match consultation.status() {
                    ConsultationStatus::Pending => tally.pending += 1,
                    ConsultationStatus::RescheduleRequest => tally.reschedule_requested += 1,
                    ConsultationStatus::Confirmed => tally.confirmed += 1,
                    ConsultationStatus::Cancelled => tally.cancelled += 1,
                }
                tally
            })
    }
}
