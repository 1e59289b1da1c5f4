//! Client-side validation of the consultation and reschedule forms.
//!
//! Both forms are checked before anything is sent; the backend repeats the
//! checks but its wording is not relied upon. The field order of the checks
//! determines which message the user sees first.

use chrono::NaiveDate;

use super::consultation::{
    NewConsultation, RescheduleProposal, Schedule, is_offered_slot, parse_date, parse_time,
};
use super::{BrandId, Error};

pub const MISSING_FIELDS: &str = "모든 필드를 입력해주세요.";
pub const INVALID_PREFERRED_DATE: &str = "희망 상담일 형식이 올바르지 않습니다.";
pub const PAST_PREFERRED_DATE: &str = "희망 상담일은 오늘 이후로 선택해주세요.";
pub const UNAVAILABLE_SLOT: &str = "상담 가능한 시간을 선택해주세요.";
pub const MISSING_ADJUSTED_SLOT: &str = "조정할 날짜와 시간을 모두 선택해주세요.";
pub const INVALID_ADJUSTED_DATE: &str = "조정할 날짜 형식이 올바르지 않습니다.";
pub const PAST_ADJUSTED_DATE: &str = "조정할 날짜는 오늘 이후로 선택해주세요.";

/// A form field rejected during validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FormError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FormError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl From<FormError> for Error {
    fn from(value: FormError) -> Self {
        Error::invalid_request(value.message)
    }
}

/// Raw input of the consultation request form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultationRequestForm {
    pub brand_id: Option<BrandId>,
    pub preferred_date: String,
    pub preferred_time: String,
    pub message: String,
}

impl ConsultationRequestForm {
    /// Validate the form against `today`.
    ///
    /// # Errors
    /// Returns the first failing field, in form order.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use franchise_client::domain::{BrandId, ConsultationRequestForm};
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    /// let form = ConsultationRequestForm {
    ///     brand_id: BrandId::new(42).ok(),
    ///     preferred_date: "2026-10-15".into(),
    ///     preferred_time: "14:00".into(),
    ///     message: "창업 상담을 원합니다".into(),
    /// };
    /// let err = form.validate(today).unwrap_err();
    /// assert_eq!(err.message, "희망 상담일은 오늘 이후로 선택해주세요.");
    /// ```
    pub fn validate(&self, today: NaiveDate) -> Result<NewConsultation, FormError> {
        let message = self.message.trim();
        let Some(brand_id) = self.brand_id else {
            return Err(FormError::new("brandId", MISSING_FIELDS));
        };
        if [self.preferred_date.as_str(), self.preferred_time.as_str(), message]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(FormError::new("form", MISSING_FIELDS));
        }

        let date = parse_date(&self.preferred_date)
            .ok_or_else(|| FormError::new("preferredDate", INVALID_PREFERRED_DATE))?;
        if date < today {
            return Err(FormError::new("preferredDate", PAST_PREFERRED_DATE));
        }
        let time = parse_time(&self.preferred_time)
            .filter(|time| is_offered_slot(*time))
            .ok_or_else(|| FormError::new("preferredTime", UNAVAILABLE_SLOT))?;

        Ok(NewConsultation {
            brand_id,
            schedule: Schedule::new(date, time),
            message: message.to_owned(),
        })
    }
}

/// Raw input of the manager's reschedule form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RescheduleForm {
    pub adjusted_date: String,
    pub adjusted_time: String,
    pub adjustment_reason: String,
    pub manager_note: String,
}

impl RescheduleForm {
    /// Validate the form against `today`. Blank reason and note become
    /// `None`.
    ///
    /// # Errors
    /// Returns the first failing field.
    pub fn validate(&self, today: NaiveDate) -> Result<RescheduleProposal, FormError> {
        if self.adjusted_date.trim().is_empty() || self.adjusted_time.trim().is_empty() {
            return Err(FormError::new("adjustedSlot", MISSING_ADJUSTED_SLOT));
        }
        let date = parse_date(&self.adjusted_date)
            .ok_or_else(|| FormError::new("adjustedDate", INVALID_ADJUSTED_DATE))?;
        if date < today {
            return Err(FormError::new("adjustedDate", PAST_ADJUSTED_DATE));
        }
        let time = parse_time(&self.adjusted_time)
            .filter(|time| is_offered_slot(*time))
            .ok_or_else(|| FormError::new("adjustedTime", UNAVAILABLE_SLOT))?;

        Ok(RescheduleProposal {
            schedule: Schedule::new(date, time),
            reason: non_blank(&self.adjustment_reason),
            manager_note: non_blank(&self.manager_note),
        })
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
