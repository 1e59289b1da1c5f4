//! HTTP adapter behaviour against a stub franchise backend served by Actix.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use franchise_client::domain::ports::{
    BackendApiError, BrandCatalogue, ManagerConsultationApi, SavedBrandApi, UserConsultationApi,
};
use franchise_client::domain::{
    BrandId, CategoryId, ConsultationId, ConsultationStatus, ManagerId, NewConsultation,
    RescheduleProposal, RescheduleResponse, UserId,
};
use franchise_client::outbound::http::HttpBackend;
use franchise_client::test_support::{date, slot};
use pagination::PageRequest;
use reqwest::Url;
use serde_json::{Value, json};

/// One request as the stub saw it.
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    query: String,
    user_id: Option<String>,
    manager_id: Option<String>,
    body: Option<Value>,
}

type Journal = Arc<Mutex<Vec<Recorded>>>;

fn ok(data: Value) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "요청이 성공했습니다.",
        "data": data,
        "timestamp": "2026-10-16T10:00:00"
    }))
}

fn paged(content: Value) -> Value {
    let total = content.as_array().map_or(0, Vec::len);
    json!({
        "content": content,
        "pageInfo": {
            "page": 0, "size": 10, "totalElements": total, "totalPages": 1,
            "first": true, "last": true, "hasNext": false, "hasPrevious": false
        }
    })
}

fn consultation_json(id: i64, status: Value, adjusted: Option<(&str, &str)>) -> Value {
    let mut value = json!({
        "consultationId": id,
        "brand": { "brandId": 42, "brandName": "교촌치킨" },
        "user": { "id": 3, "name": "김창업" },
        "preferredDate": "2026-10-20",
        "preferredTime": "14:00",
        "status": status,
        "message": "창업 비용이 궁금합니다",
        "createdAt": "2026-10-16T09:30:00"
    });
    if let Some((adjusted_date, adjusted_time)) = adjusted {
        value["adjustedDate"] = json!(adjusted_date);
        value["adjustedTime"] = json!(adjusted_time);
    }
    value
}

fn header(request: &HttpRequest, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn stub(
    request: HttpRequest,
    body: web::Bytes,
    journal: web::Data<Journal>,
) -> HttpResponse {
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    let recorded = Recorded {
        method: request.method().to_string(),
        path: request.path().to_owned(),
        query: request.query_string().to_owned(),
        user_id: header(&request, "User-Id"),
        manager_id: header(&request, "Manager-Id"),
        body: body.clone(),
    };
    journal.lock().expect("journal lock").push(recorded.clone());
    let query: HashMap<String, String> =
        web::Query::<HashMap<String, String>>::from_query(request.query_string())
            .map(web::Query::into_inner)
            .unwrap_or_default();

    match (recorded.method.as_str(), recorded.path.as_str()) {
        ("GET", "/api/public/brands") | ("GET", "/api/public/brands/search") => {
            let keyword = query.get("keyword").cloned().unwrap_or_default();
            ok(paged(json!([{
                "brandId": 42,
                "brandName": format!("교촌치킨{keyword}"),
                "categoryName": "치킨",
                "initialCost": 50000000,
                "viewCount": 120,
                "savedCount": 8
            }])))
        }
        ("GET", "/api/public/brands/category/1") => ok(paged(json!([
            { "brandId": 42, "brandName": "교촌치킨", "category": { "name": "치킨" } },
            { "brandId": 43, "brandName": "BBQ", "category": { "name": "치킨" } }
        ]))),
        ("GET", "/api/user/brands/saved") => {
            let brands = json!([
                { "brandId": 42, "brandName": "교촌치킨", "savedCount": 8 },
                { "brandId": 7, "brandName": "메가커피", "savedCount": 2 }
            ]);
            if recorded.user_id.as_deref() == Some("4") {
                ok(paged(brands))
            } else {
                ok(brands)
            }
        }
        ("GET", "/api/public/brands/42") => ok(json!({
            "id": 42,
            "name": "교촌치킨",
            "category": { "id": 1, "name": "치킨" },
            "stats": { "viewCount": 121, "savedCount": 8, "consultationCount": 5 }
        })),
        ("GET", "/api/public/categories") => ok(json!([
            { "id": 1, "name": "치킨", "description": "치킨 전문점" },
            { "categoryId": 2, "categoryName": "카페" }
        ])),
        ("POST", "/api/user/brands/42/save") => ok(json!({ "saved": true })),
        ("POST", "/api/user/brands/7/save") => HttpResponse::Ok().json(json!({ "success": true })),
        ("POST", "/api/user/brands/save-status") => ok(json!({ "42": true, "7": false })),
        ("POST", "/api/user/consultations") => {
            let brand = body.as_ref().and_then(|body| body["brandId"].as_i64());
            if brand == Some(7) {
                HttpResponse::Conflict().json(json!({
                    "success": false,
                    "message": "이미 해당 브랜드에 진행 중인 상담이 있습니다.",
                    "errorCode": "CONSULTATION_DUPLICATE"
                }))
            } else if brand == Some(8) {
                HttpResponse::BadRequest().json(json!({
                    "success": false,
                    "message": "입력값이 올바르지 않습니다.",
                    "errorCode": "INVALID_PARAMETER",
                    "data": { "message": "문의 내용을 입력해주세요." }
                }))
            } else {
                ok(consultation_json(11, json!("PENDING"), None))
            }
        }
        ("POST", "/api/user/consultations/5/reschedule-response") => ok(consultation_json(
            5,
            json!({ "statusName": "CONFIRMED", "description": "확정" }),
            Some(("2026-10-22", "15:00")),
        )),
        ("GET", "/api/user/consultations") => ok(paged(json!([
            consultation_json(6, json!("PENDING"), None),
            consultation_json(5, json!({ "statusName": "CONFIRMED" }), None)
        ]))),
        ("GET", "/api/user/consultations/5") => ok(consultation_json(
            5,
            json!("RESCHEDULE_REQUEST"),
            Some(("2026-10-22", "15:00")),
        )),
        ("PUT", "/api/user/consultations/5/cancel") => ok(consultation_json(
            5,
            json!("CANCELLED"),
            None,
        )),
        ("PUT", "/api/manager/consultations/5/reschedule") => {
            let adjusted_date = body
                .as_ref()
                .and_then(|body| body["adjustedDate"].as_str())
                .unwrap_or_default()
                .to_owned();
            let adjusted_time = body
                .as_ref()
                .and_then(|body| body["adjustedTime"].as_str())
                .unwrap_or_default()
                .to_owned();
            ok(consultation_json(
                5,
                json!("RESCHEDULE_REQUEST"),
                Some((adjusted_date.as_str(), adjusted_time.as_str())),
            ))
        }
        ("GET", "/api/manager/consultations") if recorded.manager_id.as_deref() == Some("9") => {
            HttpResponse::BadGateway()
                .content_type("text/html")
                .body("<html><body>bad gateway</body></html>")
        }
        ("GET", "/api/manager/consultations") => ok(paged(json!([
            consultation_json(5, json!("PENDING"), None),
            consultation_json(4, json!("CANCELLED"), None)
        ]))),
        ("PUT", "/api/manager/consultations/5/confirm") => ok(consultation_json(
            5,
            json!("CONFIRMED"),
            None,
        )),
        ("PUT", "/api/manager/consultations/5/cancel") => ok(consultation_json(
            5,
            json!("CANCELLED"),
            None,
        )),
        ("PUT", "/api/manager/consultations/6/confirm") => {
            actix_rt::time::sleep(Duration::from_millis(800)).await;
            ok(consultation_json(6, json!("CONFIRMED"), None))
        }
        _ => HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "요청한 리소스를 찾을 수 없습니다.",
            "errorCode": "NOT_FOUND"
        })),
    }
}

struct StubBackend {
    backend: HttpBackend,
    journal: Journal,
    handle: ServerHandle,
}

impl StubBackend {
    async fn start(timeout: Duration) -> Self {
        let journal: Journal = Arc::default();
        let data = web::Data::new(Arc::clone(&journal));
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(stub))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen on stub socket")
        .run();
        let handle = server.handle();
        actix_rt::spawn(server);

        let base = Url::parse(&format!("http://{addr}")).expect("stub url");
        let backend = HttpBackend::new(base, timeout).expect("client builds");
        Self {
            backend,
            journal,
            handle,
        }
    }

    fn last(&self) -> Recorded {
        self.journal
            .lock()
            .expect("journal lock")
            .last()
            .cloned()
            .expect("a request was recorded")
    }

    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

fn user() -> UserId {
    UserId::new(3).expect("user id")
}

fn manager() -> ManagerId {
    ManagerId::new(7).expect("manager id")
}

fn brand(id: i64) -> BrandId {
    BrandId::new(id).expect("brand id")
}

fn consultation(id: i64) -> ConsultationId {
    ConsultationId::new(id).expect("consultation id")
}

#[actix_rt::test]
async fn lists_brands_with_paging_parameters() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;
    let request = PageRequest::new(2, 20).expect("page request");

    let page = stub.backend.list_brands(request).await.expect("listing decodes");

    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].name, "교촌치킨");
    assert_eq!(page.content[0].save_count, 8);
    let recorded = stub.last();
    assert_eq!(recorded.query, "page=2&size=20");
    assert!(recorded.user_id.is_none());
    stub.stop().await;
}

#[actix_rt::test]
async fn search_sends_the_keyword() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let page = stub
        .backend
        .search_brands("치킨", PageRequest::default())
        .await
        .expect("search decodes");

    assert_eq!(page.content[0].name, "교촌치킨치킨");
    assert!(stub.last().query.starts_with("keyword="));
    stub.stop().await;
}

#[actix_rt::test]
async fn detail_and_categories_accept_alternate_field_names() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let detail = stub.backend.brand_detail(brand(42)).await.expect("detail decodes");
    assert_eq!(detail.brand.category_name.as_deref(), Some("치킨"));
    assert_eq!(detail.brand.view_count, 121);
    assert_eq!(detail.consultation_count, 5);

    let categories = stub.backend.categories().await.expect("categories decode");
    let names: Vec<&str> = categories.iter().map(|category| category.name.as_str()).collect();
    assert_eq!(names, ["치킨", "카페"]);
    stub.stop().await;
}

#[actix_rt::test]
async fn category_listing_targets_the_category_path() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;
    let category = CategoryId::new(1).expect("category id");

    let page = stub
        .backend
        .brands_in_category(category, PageRequest::new(0, 5).expect("page request"))
        .await
        .expect("category listing decodes");

    let names: Vec<&str> = page.content.iter().map(|brand| brand.name.as_str()).collect();
    assert_eq!(names, ["교촌치킨", "BBQ"]);
    assert_eq!(page.content[1].category_name.as_deref(), Some("치킨"));
    let recorded = stub.last();
    assert_eq!(recorded.method, "GET");
    assert_eq!(recorded.path, "/api/public/brands/category/1");
    assert_eq!(recorded.query, "page=0&size=5");
    assert!(recorded.user_id.is_none());
    stub.stop().await;
}

#[actix_rt::test]
async fn saved_brands_accept_a_bare_list() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let page = stub
        .backend
        .saved_brands(user(), PageRequest::default())
        .await
        .expect("saved list decodes");

    let ids: Vec<i64> = page.content.iter().map(|brand| brand.id.get()).collect();
    assert_eq!(ids, [42, 7]);
    assert_eq!(page.page_info.total_elements, 2);
    let recorded = stub.last();
    assert_eq!(recorded.method, "GET");
    assert_eq!(recorded.path, "/api/user/brands/saved");
    assert_eq!(recorded.query, "page=0&size=10");
    assert_eq!(recorded.user_id.as_deref(), Some("3"));
    stub.stop().await;
}

#[actix_rt::test]
async fn saved_brands_accept_a_paged_envelope() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;
    let other_user = UserId::new(4).expect("user id");

    let page = stub
        .backend
        .saved_brands(other_user, PageRequest::default())
        .await
        .expect("saved page decodes");

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[1].save_count, 2);
    assert_eq!(stub.last().user_id.as_deref(), Some("4"));
    stub.stop().await;
}

#[actix_rt::test]
async fn user_listing_sends_paging_and_the_user_header() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;
    let request = PageRequest::new(1, 20).expect("page request");

    let page = UserConsultationApi::list(&stub.backend, user(), request)
        .await
        .expect("listing decodes");

    let statuses: Vec<ConsultationStatus> =
        page.content.iter().map(|consultation| consultation.status()).collect();
    assert_eq!(
        statuses,
        [ConsultationStatus::Pending, ConsultationStatus::Confirmed]
    );
    let recorded = stub.last();
    assert_eq!(recorded.method, "GET");
    assert_eq!(recorded.path, "/api/user/consultations");
    assert_eq!(recorded.query, "page=1&size=20");
    assert_eq!(recorded.user_id.as_deref(), Some("3"));
    assert!(recorded.manager_id.is_none());
    stub.stop().await;
}

#[actix_rt::test]
async fn user_detail_decodes_the_pending_proposal() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let detail = UserConsultationApi::get(&stub.backend, user(), consultation(5))
        .await
        .expect("detail decodes");

    assert_eq!(detail.status(), ConsultationStatus::RescheduleRequest);
    assert_eq!(
        detail.proposal().map(|proposal| proposal.schedule),
        Some(slot(date(2026, 10, 22), 15))
    );
    assert_eq!(detail.requester().name.as_deref(), Some("김창업"));
    let recorded = stub.last();
    assert_eq!(recorded.method, "GET");
    assert_eq!(recorded.path, "/api/user/consultations/5");
    assert_eq!(recorded.user_id.as_deref(), Some("3"));
    stub.stop().await;
}

#[actix_rt::test]
async fn manager_listing_sends_the_manager_header() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let page = ManagerConsultationApi::list(&stub.backend, manager(), PageRequest::default())
        .await
        .expect("listing decodes");

    let ids: Vec<i64> = page.content.iter().map(|consultation| consultation.id().get()).collect();
    assert_eq!(ids, [5, 4]);
    let recorded = stub.last();
    assert_eq!(recorded.method, "GET");
    assert_eq!(recorded.path, "/api/manager/consultations");
    assert_eq!(recorded.query, "page=0&size=10");
    assert_eq!(recorded.manager_id.as_deref(), Some("7"));
    assert!(recorded.user_id.is_none());
    stub.stop().await;
}

#[actix_rt::test]
async fn manager_confirm_uses_put() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let confirmed = stub
        .backend
        .confirm(manager(), consultation(5))
        .await
        .expect("confirm succeeds");

    assert_eq!(confirmed.status(), ConsultationStatus::Confirmed);
    let recorded = stub.last();
    assert_eq!(recorded.method, "PUT");
    assert_eq!(recorded.path, "/api/manager/consultations/5/confirm");
    assert_eq!(recorded.manager_id.as_deref(), Some("7"));
    stub.stop().await;
}

#[actix_rt::test]
async fn manager_cancel_uses_put() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let cancelled = ManagerConsultationApi::cancel(&stub.backend, manager(), consultation(5))
        .await
        .expect("cancel succeeds");

    assert_eq!(cancelled.status(), ConsultationStatus::Cancelled);
    let recorded = stub.last();
    assert_eq!(recorded.method, "PUT");
    assert_eq!(recorded.path, "/api/manager/consultations/5/cancel");
    assert_eq!(recorded.manager_id.as_deref(), Some("7"));
    assert!(recorded.user_id.is_none());
    stub.stop().await;
}

#[actix_rt::test]
async fn toggle_reports_the_flag_when_present() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let reported = stub
        .backend
        .toggle_saved(user(), brand(42))
        .await
        .expect("toggle succeeds");
    assert_eq!(reported.saved, Some(true));
    let recorded = stub.last();
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.user_id.as_deref(), Some("3"));

    let silent = stub
        .backend
        .toggle_saved(user(), brand(7))
        .await
        .expect("toggle without data succeeds");
    assert_eq!(silent.saved, None);
    stub.stop().await;
}

#[actix_rt::test]
async fn save_status_posts_ids_and_parses_the_map() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let flags = stub
        .backend
        .save_status(user(), &[brand(42), brand(7)])
        .await
        .expect("status decodes");

    assert_eq!(flags.get(&brand(42)), Some(&true));
    assert_eq!(flags.get(&brand(7)), Some(&false));
    assert_eq!(stub.last().body, Some(json!({ "brandIds": [42, 7] })));
    stub.stop().await;
}

#[actix_rt::test]
async fn create_sends_the_wire_body() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;
    let request = NewConsultation {
        brand_id: brand(42),
        schedule: slot(date(2026, 10, 20), 14),
        message: "창업 비용이 궁금합니다".to_owned(),
    };

    let created = stub
        .backend
        .create(user(), &request)
        .await
        .expect("create succeeds");

    assert_eq!(created.status(), ConsultationStatus::Pending);
    assert_eq!(
        stub.last().body,
        Some(json!({
            "brandId": 42,
            "preferredDate": "2026-10-20",
            "preferredTime": "14:00",
            "message": "창업 비용이 궁금합니다"
        }))
    );
    stub.stop().await;
}

#[actix_rt::test]
async fn duplicate_and_validation_failures_keep_backend_details() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;
    let request = |brand_id| NewConsultation {
        brand_id: brand(brand_id),
        schedule: slot(date(2026, 10, 20), 14),
        message: "문의".to_owned(),
    };

    let duplicate = stub
        .backend
        .create(user(), &request(7))
        .await
        .expect_err("duplicate is rejected");
    assert_eq!(duplicate.status(), Some(409));
    assert_eq!(duplicate.backend_code(), Some("CONSULTATION_DUPLICATE"));

    let invalid = stub
        .backend
        .create(user(), &request(8))
        .await
        .expect_err("validation fails");
    assert_eq!(invalid.backend_message(), Some("문의 내용을 입력해주세요."));
    stub.stop().await;
}

#[actix_rt::test]
async fn accepting_decodes_the_adopted_slot() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let confirmed = stub
        .backend
        .respond(user(), consultation(5), RescheduleResponse::Accept)
        .await
        .expect("response succeeds");

    assert_eq!(confirmed.status(), ConsultationStatus::Confirmed);
    assert_eq!(confirmed.schedule(), slot(date(2026, 10, 22), 15));
    assert_eq!(stub.last().body, Some(json!({ "response": "ACCEPT" })));
    stub.stop().await;
}

#[actix_rt::test]
async fn user_cancel_uses_put() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let cancelled = UserConsultationApi::cancel(&stub.backend, user(), consultation(5))
        .await
        .expect("cancel succeeds");

    assert_eq!(cancelled.status(), ConsultationStatus::Cancelled);
    let recorded = stub.last();
    assert_eq!(recorded.method, "PUT");
    assert_eq!(recorded.path, "/api/user/consultations/5/cancel");
    stub.stop().await;
}

#[actix_rt::test]
async fn manager_reschedule_carries_the_manager_header() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;
    let proposal = RescheduleProposal {
        schedule: slot(date(2026, 10, 22), 15),
        reason: Some("오전 일정이 있습니다".to_owned()),
        manager_note: None,
    };

    let proposed = stub
        .backend
        .propose_reschedule(manager(), consultation(5), &proposal)
        .await
        .expect("proposal succeeds");

    assert_eq!(proposed.status(), ConsultationStatus::RescheduleRequest);
    assert_eq!(
        proposed.proposal().map(|proposal| proposal.schedule),
        Some(proposal.schedule)
    );
    let recorded = stub.last();
    assert_eq!(recorded.manager_id.as_deref(), Some("7"));
    assert!(recorded.user_id.is_none());
    assert_eq!(
        recorded.body,
        Some(json!({
            "adjustedDate": "2026-10-22",
            "adjustedTime": "15:00",
            "adjustmentReason": "오전 일정이 있습니다"
        }))
    );
    stub.stop().await;
}

#[actix_rt::test]
async fn html_error_pages_become_rejections() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let gateway_down = ManagerId::new(9).expect("manager id");
    let error = ManagerConsultationApi::list(&stub.backend, gateway_down, PageRequest::default())
        .await
        .expect_err("gateway failure");

    assert_eq!(error.status(), Some(502));
    assert_eq!(error.backend_message(), None);
    stub.stop().await;
}

#[actix_rt::test]
async fn unknown_routes_are_rejected_with_404() {
    let stub = StubBackend::start(Duration::from_secs(5)).await;

    let error = UserConsultationApi::get(&stub.backend, user(), consultation(99))
        .await
        .expect_err("not found");

    assert_eq!(error.status(), Some(404));
    assert_eq!(error.backend_code(), Some("NOT_FOUND"));
    stub.stop().await;
}

#[actix_rt::test]
async fn slow_responses_time_out() {
    let stub = StubBackend::start(Duration::from_millis(200)).await;

    let error = stub
        .backend
        .confirm(manager(), consultation(6))
        .await
        .expect_err("request times out");

    assert!(matches!(error, BackendApiError::Timeout { .. }));
    stub.stop().await;
}
