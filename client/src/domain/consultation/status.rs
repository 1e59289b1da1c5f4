//! Consultation status enumeration and its transition table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a consultation.
///
/// `Pending` is initial. `Cancelled` is terminal. `Confirmed` ends the
/// reschedule negotiation but can still be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsultationStatus {
    Pending,
    RescheduleRequest,
    Confirmed,
    Cancelled,
}

/// Who triggers a consultation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    User,
    Manager,
}

/// Event kinds accepted by the status machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsultationEventKind {
    /// Manager confirms a pending request as-is.
    Confirm,
    /// Manager proposes another slot for a pending request.
    ProposeReschedule,
    /// User accepts the proposed slot.
    AcceptReschedule,
    /// User rejects the proposed slot.
    RejectReschedule,
    /// Either party cancels.
    Cancel,
}

/// Error returned when parsing a status from its wire name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConsultationStatusError(pub String);

impl ConsultationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::RescheduleRequest,
        Self::Confirmed,
        Self::Cancelled,
    ];

    /// Wire name used by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::RescheduleRequest => "RESCHEDULE_REQUEST",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Korean display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "신청 중",
            Self::RescheduleRequest => "일정 조정 중",
            Self::Confirmed => "확정",
            Self::Cancelled => "취소",
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The status reached by applying `event`, or `None` when the table has
    /// no such transition.
    ///
    /// # Examples
    /// ```
    /// use franchise_client::domain::{ConsultationEventKind, ConsultationStatus};
    ///
    /// let next = ConsultationStatus::RescheduleRequest
    ///     .next(ConsultationEventKind::AcceptReschedule);
    /// assert_eq!(next, Some(ConsultationStatus::Confirmed));
    /// assert_eq!(
    ///     ConsultationStatus::Cancelled.next(ConsultationEventKind::Cancel),
    ///     None
    /// );
    /// ```
    pub fn next(self, event: ConsultationEventKind) -> Option<Self> {
        use ConsultationEventKind as Event;

        match (self, event) {
            (Self::Pending, Event::Confirm) => Some(Self::Confirmed),
            (Self::Pending, Event::ProposeReschedule) => Some(Self::RescheduleRequest),
            (Self::RescheduleRequest, Event::AcceptReschedule) => Some(Self::Confirmed),
            (Self::RescheduleRequest, Event::RejectReschedule) => Some(Self::Cancelled),
            (Self::Pending | Self::RescheduleRequest | Self::Confirmed, Event::Cancel) => {
                Some(Self::Cancelled)
            }
            _ => None,
        }
    }

    /// Whether `event` is valid from this status.
    pub fn allows(self, event: ConsultationEventKind) -> bool {
        self.next(event).is_some()
    }
}

impl ConsultationEventKind {
    /// Whether `actor` may trigger this event.
    pub fn permits(self, actor: Actor) -> bool {
        match self {
            Self::Confirm | Self::ProposeReschedule => actor == Actor::Manager,
            Self::AcceptReschedule | Self::RejectReschedule => actor == Actor::User,
            Self::Cancel => true,
        }
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ConsultationEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Confirm => "confirm",
            Self::ProposeReschedule => "propose reschedule",
            Self::AcceptReschedule => "accept reschedule",
            Self::RejectReschedule => "reject reschedule",
            Self::Cancel => "cancel",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Manager => f.write_str("manager"),
        }
    }
}

impl fmt::Display for ParseConsultationStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid consultation status {:?}", self.0)
    }
}

impl std::error::Error for ParseConsultationStatusError {}

impl FromStr for ConsultationStatus {
    type Err = ParseConsultationStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value.trim())
            .ok_or_else(|| ParseConsultationStatusError(value.to_owned()))
    }
}
