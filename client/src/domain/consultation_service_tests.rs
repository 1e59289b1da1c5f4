//! Tests for the user's consultation service.

use std::sync::Arc;

use mockable::Clock;
use mockall::predicate::eq;
use pagination::Page;

use super::*;
use crate::domain::ports::{BackendApiError, MockUserConsultationApi};
use crate::domain::{ConsultationStatus, ErrorCode, Identity};
use crate::test_support::{
    FixedClock, brand_id, consultation_id, date, sample_consultation, user_id,
};

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::on(date(2026, 10, 16)))
}

fn user_session() -> SessionContext {
    SessionContext::with_identity(Identity::User(user_id(1)))
}

fn form(brand: i64, preferred_date: &str) -> ConsultationRequestForm {
    ConsultationRequestForm {
        brand_id: Some(brand_id(brand)),
        preferred_date: preferred_date.to_owned(),
        preferred_time: "14:00".to_owned(),
        message: "가맹 조건이 궁금합니다".to_owned(),
    }
}

fn service(api: MockUserConsultationApi) -> ConsultationService<MockUserConsultationApi> {
    ConsultationService::new(Arc::new(api), user_session(), fixed_clock())
}

#[tokio::test]
async fn request_submits_after_an_empty_duplicate_check() {
    let mut api = MockUserConsultationApi::new();
    api.expect_list()
        .times(1)
        .returning(|_, request| Ok(Page::from_items(Vec::new(), request)));
    api.expect_create()
        .withf(|user, request| *user == user_id(1) && request.brand_id == brand_id(42))
        .times(1)
        .return_once(|_, _| Ok(sample_consultation(10, 42, ConsultationStatus::Pending)));

    let created = service(api)
        .request(&form(42, "2026-10-20"))
        .await
        .expect("request succeeds");

    assert_eq!(created.status(), ConsultationStatus::Pending);
}

#[tokio::test]
async fn yesterday_is_blocked_before_any_call() {
    let mut api = MockUserConsultationApi::new();
    api.expect_list().times(0);
    api.expect_create().times(0);

    let error = service(api)
        .request(&form(42, "2026-10-15"))
        .await
        .expect_err("past date is refused");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "희망 상담일은 오늘 이후로 선택해주세요.");
}

#[tokio::test]
async fn a_live_consultation_blocks_a_second_request() {
    let mut api = MockUserConsultationApi::new();
    api.expect_list().returning(|_, request| {
        Ok(Page::from_items(
            vec![
                sample_consultation(3, 42, ConsultationStatus::Cancelled),
                sample_consultation(4, 42, ConsultationStatus::RescheduleRequest),
            ],
            request,
        ))
    });
    api.expect_create().times(0);

    let error = service(api)
        .request(&form(42, "2026-10-20"))
        .await
        .expect_err("duplicate is refused");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), DUPLICATE_CONSULTATION);
}

#[tokio::test]
async fn cancelled_consultations_do_not_block_a_new_request() {
    let mut api = MockUserConsultationApi::new();
    api.expect_list().returning(|_, request| {
        Ok(Page::from_items(
            vec![sample_consultation(3, 42, ConsultationStatus::Cancelled)],
            request,
        ))
    });
    api.expect_create()
        .times(1)
        .return_once(|_, _| Ok(sample_consultation(5, 42, ConsultationStatus::Pending)));

    assert!(service(api).request(&form(42, "2026-10-20")).await.is_ok());
}

#[tokio::test]
async fn backend_duplicate_is_a_conflict() {
    let mut api = MockUserConsultationApi::new();
    api.expect_list()
        .returning(|_, request| Ok(Page::from_items(Vec::new(), request)));
    api.expect_create().return_once(|_, _| {
        Err(BackendApiError::rejected(
            400_u16,
            Some("CONSULTATION_DUPLICATE".to_owned()),
            "이미 신청한 상담이 있습니다.",
        ))
    });

    let error = service(api)
        .request(&form(42, "2026-10-20"))
        .await
        .expect_err("backend refuses");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "이미 신청한 상담이 있습니다.");
    assert_eq!(error.backend_code(), Some("CONSULTATION_DUPLICATE"));
}

#[tokio::test]
async fn request_failure_without_a_message_uses_the_generic_text() {
    let mut api = MockUserConsultationApi::new();
    api.expect_list()
        .returning(|_, request| Ok(Page::from_items(Vec::new(), request)));
    api.expect_create()
        .return_once(|_, _| Err(BackendApiError::transport("connection reset")));

    let error = service(api)
        .request(&form(42, "2026-10-20"))
        .await
        .expect_err("transport fails");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(error.message(), CONSULTATION_REQUEST_FAILED);
}

#[tokio::test]
async fn accept_is_sent_for_a_pending_proposal() {
    let mut api = MockUserConsultationApi::new();
    api.expect_get()
        .with(eq(user_id(1)), eq(consultation_id(4)))
        .return_once(|_, _| Ok(sample_consultation(4, 42, ConsultationStatus::RescheduleRequest)));
    api.expect_respond()
        .with(
            eq(user_id(1)),
            eq(consultation_id(4)),
            eq(RescheduleResponse::Accept),
        )
        .times(1)
        .return_once(|_, _, _| {
            let proposed = sample_consultation(4, 42, ConsultationStatus::RescheduleRequest);
            let now = FixedClock::on(date(2026, 10, 16)).local().naive_local();
            Ok(proposed
                .apply(crate::domain::ConsultationEvent::AcceptReschedule, Actor::User, now)
                .expect("accept applies"))
        });

    let accepted = service(api)
        .accept(consultation_id(4))
        .await
        .expect("accept succeeds");

    assert_eq!(accepted.status(), ConsultationStatus::Confirmed);
    assert_eq!(accepted.schedule().to_string(), "2026-10-22 15:00");
}

#[tokio::test]
async fn answering_without_a_proposal_is_refused_locally() {
    let mut api = MockUserConsultationApi::new();
    api.expect_get()
        .return_once(|_, _| Ok(sample_consultation(4, 42, ConsultationStatus::Pending)));
    api.expect_respond().times(0);

    let error = service(api)
        .reject(consultation_id(4))
        .await
        .expect_err("nothing to reject");

    assert_eq!(error.code(), ErrorCode::InvalidTransition);
    assert_eq!(error.message(), CONSULTATION_RESPONSE_FAILED);
}

#[tokio::test]
async fn cancelled_consultations_cannot_be_cancelled_again() {
    let mut api = MockUserConsultationApi::new();
    api.expect_get()
        .return_once(|_, _| Ok(sample_consultation(6, 42, ConsultationStatus::Cancelled)));
    api.expect_cancel().times(0);

    let error = service(api)
        .cancel(consultation_id(6))
        .await
        .expect_err("already cancelled");

    assert_eq!(error.code(), ErrorCode::InvalidTransition);
    assert_eq!(error.message(), CONSULTATION_CANCEL_FAILED);
}

#[tokio::test]
async fn managers_cannot_use_the_user_service() {
    let mut api = MockUserConsultationApi::new();
    api.expect_list().times(0);

    let service = ConsultationService::new(
        Arc::new(api),
        SessionContext::with_identity(Identity::Manager(
            crate::domain::ManagerId::new(2).expect("manager id"),
        )),
        fixed_clock(),
    );
    let error = service
        .list(pagination::PageRequest::default())
        .await
        .expect_err("manager is not a user");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "로그인이 필요합니다.");
}
