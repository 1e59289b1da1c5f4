//! Shared fixtures and test doubles.
//!
//! Compiled for unit tests and, behind the `test-support` feature, for the
//! integration tests under `tests/`.

mod in_memory;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Brand, BrandId, BrandRef, Consultation, ConsultationDraft, ConsultationId,
    ConsultationStatus, Requester, RescheduleProposal, Schedule, UserId,
};

pub use in_memory::InMemoryFranchiseBackend;

/// Clock frozen at one local instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    /// Freeze at `naive`, read as local time.
    pub fn at_local(naive: NaiveDateTime) -> Self {
        let now = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(|| Local.from_utc_datetime(&naive));
        Self { now }
    }

    /// Freeze at local noon on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::at_local(date.and_time(NaiveTime::MIN) + TimeDelta::hours(12))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// `date` at `hour`:00.
pub fn slot(date: NaiveDate, hour: u32) -> Schedule {
    Schedule::new(
        date,
        NaiveTime::from_hms_opt(hour, 0, 0).expect("valid fixture hour"),
    )
}

pub fn brand_id(id: i64) -> BrandId {
    BrandId::new(id).expect("valid fixture brand id")
}

pub fn consultation_id(id: i64) -> ConsultationId {
    ConsultationId::new(id).expect("valid fixture consultation id")
}

pub fn user_id(id: i64) -> UserId {
    UserId::new(id).expect("valid fixture user id")
}

/// A brand listing with round figures.
pub fn sample_brand(id: i64, name: &str) -> Brand {
    Brand {
        id: brand_id(id),
        name: name.to_owned(),
        category_name: Some("외식".to_owned()),
        description: Some(format!("{name} 가맹 안내")),
        initial_cost: Some(50_000_000),
        total_investment: Some(120_000_000),
        avg_monthly_revenue: Some(30_000_000),
        store_count: Some(120),
        view_count: 10,
        save_count: 3,
    }
}

/// The proposal attached by [`sample_consultation`] to reschedule requests.
pub fn sample_proposal() -> RescheduleProposal {
    RescheduleProposal {
        schedule: slot(date(2026, 10, 22), 15),
        reason: Some("오전 일정이 있습니다".to_owned()),
        manager_note: Some("본사에서 뵙겠습니다".to_owned()),
    }
}

/// A consultation for brand `brand` preferring 2026-10-20 14:00.
pub fn sample_consultation(id: i64, brand: i64, status: ConsultationStatus) -> Consultation {
    let created_at = date(2026, 10, 16).and_time(NaiveTime::MIN) + TimeDelta::hours(9);
    Consultation::new(ConsultationDraft {
        id: consultation_id(id),
        brand: BrandRef {
            id: brand_id(brand),
            name: format!("브랜드 {brand}"),
        },
        requester: Requester {
            id: Some(user_id(1)),
            name: Some("김창업".to_owned()),
        },
        preferred: slot(date(2026, 10, 20), 14),
        status,
        proposal: (status == ConsultationStatus::RescheduleRequest).then(sample_proposal),
        message: Some("창업 비용이 궁금합니다".to_owned()),
        created_at,
        confirmed_at: (status == ConsultationStatus::Confirmed).then_some(created_at),
    })
    .expect("valid fixture consultation")
}
