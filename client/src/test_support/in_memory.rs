//! In-memory franchise backend implementing every port.
//!
//! Mirrors the server's rules closely enough for service and scenario
//! tests: duplicate consultations are refused, transitions follow the status
//! machine, and managers only see consultations for brands they own.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use mockable::Clock;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    BackendApiError, BrandCatalogue, ManagerConsultationApi, SaveToggleOutcome, SavedBrandApi,
    UserConsultationApi,
};
use crate::domain::{
    Actor, Brand, BrandCategory, BrandDetail, BrandId, BrandRef, CategoryId, Consultation,
    ConsultationDraft, ConsultationEvent, ConsultationId, ConsultationStatus, ManagerId,
    NewConsultation, Requester, RescheduleProposal, RescheduleResponse, TransitionError, UserId,
};

struct BrandEntry {
    brand: Brand,
    category: Option<CategoryId>,
    manager: Option<ManagerId>,
}

struct StoredConsultation {
    owner: UserId,
    consultation: Consultation,
}

#[derive(Default)]
struct State {
    brands: BTreeMap<BrandId, BrandEntry>,
    categories: Vec<BrandCategory>,
    saved: BTreeSet<(UserId, BrandId)>,
    consultations: BTreeMap<ConsultationId, StoredConsultation>,
    last_consultation_id: i64,
    fail_toggles: bool,
    omit_toggle_state: bool,
    requests: usize,
}

/// Backend double holding brands, saved flags and consultations in memory.
pub struct InMemoryFranchiseBackend {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

fn not_found(code: &str, message: &str) -> BackendApiError {
    BackendApiError::rejected(404_u16, Some(code.to_owned()), message)
}

fn refused(error: TransitionError) -> BackendApiError {
    BackendApiError::rejected(
        400_u16,
        Some("INVALID_PARAMETER".to_owned()),
        error.to_string(),
    )
}

impl InMemoryFranchiseBackend {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock,
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.local().naive_local()
    }

    /// Register `brand`, optionally filed under `category` and owned by
    /// `manager`.
    pub fn add_brand(&self, brand: Brand, category: Option<CategoryId>, manager: Option<ManagerId>) {
        self.state().brands.insert(
            brand.id,
            BrandEntry {
                brand,
                category,
                manager,
            },
        );
    }

    pub fn add_category(&self, category: BrandCategory) {
        self.state().categories.push(category);
    }

    /// Store `consultation` as requested by `owner`.
    pub fn seed_consultation(&self, owner: UserId, consultation: Consultation) {
        let mut state = self.state();
        state.last_consultation_id = state.last_consultation_id.max(consultation.id().get());
        state.consultations.insert(
            consultation.id(),
            StoredConsultation {
                owner,
                consultation,
            },
        );
    }

    /// Make every save toggle fail with a server error.
    pub fn fail_toggles(&self, fail: bool) {
        self.state().fail_toggles = fail;
    }

    /// Answer toggles without reporting the new flag.
    pub fn omit_toggle_state(&self, omit: bool) {
        self.state().omit_toggle_state = omit;
    }

    /// Number of port calls served so far.
    pub fn request_count(&self) -> usize {
        self.state().requests
    }

    pub fn consultation(&self, id: ConsultationId) -> Option<Consultation> {
        self.state()
            .consultations
            .get(&id)
            .map(|stored| stored.consultation.clone())
    }

    pub fn is_saved(&self, user: UserId, brand: BrandId) -> bool {
        self.state().saved.contains(&(user, brand))
    }

    fn served(&self) -> MutexGuard<'_, State> {
        let mut state = self.state();
        state.requests += 1;
        state
    }

    fn apply_as_user(
        &self,
        user: UserId,
        id: ConsultationId,
        event: ConsultationEvent,
    ) -> Result<Consultation, BackendApiError> {
        let now = self.now();
        let mut state = self.served();
        let stored = state
            .consultations
            .get_mut(&id)
            .filter(|stored| stored.owner == user)
            .ok_or_else(|| not_found("CONSULTATION_NOT_FOUND", "상담을 찾을 수 없습니다."))?;
        let updated = stored
            .consultation
            .clone()
            .apply(event, Actor::User, now)
            .map_err(refused)?;
        stored.consultation = updated.clone();
        Ok(updated)
    }

    fn apply_as_manager(
        &self,
        manager: ManagerId,
        id: ConsultationId,
        event: ConsultationEvent,
    ) -> Result<Consultation, BackendApiError> {
        let now = self.now();
        let mut state = self.served();
        let brand = state
            .consultations
            .get(&id)
            .map(|stored| stored.consultation.brand().id)
            .ok_or_else(|| not_found("CONSULTATION_NOT_FOUND", "상담을 찾을 수 없습니다."))?;
        let owned = state
            .brands
            .get(&brand)
            .is_some_and(|entry| entry.manager == Some(manager));
        if !owned {
            return Err(BackendApiError::rejected(
                403_u16,
                Some("ACCESS_DENIED".to_owned()),
                "해당 상담에 대한 권한이 없습니다.",
            ));
        }
        let stored = state
            .consultations
            .get_mut(&id)
            .ok_or_else(|| not_found("CONSULTATION_NOT_FOUND", "상담을 찾을 수 없습니다."))?;
        let updated = stored
            .consultation
            .clone()
            .apply(event, Actor::Manager, now)
            .map_err(refused)?;
        stored.consultation = updated.clone();
        Ok(updated)
    }
}

fn newest_first<'a>(consultations: impl Iterator<Item = &'a Consultation>) -> Vec<Consultation> {
    let mut listed: Vec<Consultation> = consultations.cloned().collect();
    listed.sort_by_key(|consultation| std::cmp::Reverse(consultation.id()));
    listed
}

#[async_trait]
impl BrandCatalogue for InMemoryFranchiseBackend {
    async fn list_brands(&self, page: PageRequest) -> Result<Page<Brand>, BackendApiError> {
        let state = self.served();
        let brands = state.brands.values().map(|entry| entry.brand.clone()).collect();
        Ok(Page::from_items(brands, page))
    }

    async fn brands_in_category(
        &self,
        category: CategoryId,
        page: PageRequest,
    ) -> Result<Page<Brand>, BackendApiError> {
        let state = self.served();
        let brands = state
            .brands
            .values()
            .filter(|entry| entry.category == Some(category))
            .map(|entry| entry.brand.clone())
            .collect();
        Ok(Page::from_items(brands, page))
    }

    async fn search_brands(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Page<Brand>, BackendApiError> {
        let state = self.served();
        let brands = state
            .brands
            .values()
            .filter(|entry| entry.brand.name.contains(keyword))
            .map(|entry| entry.brand.clone())
            .collect();
        Ok(Page::from_items(brands, page))
    }

    async fn brand_detail(&self, brand: BrandId) -> Result<BrandDetail, BackendApiError> {
        let state = self.served();
        let entry = state
            .brands
            .get(&brand)
            .ok_or_else(|| not_found("BRAND_NOT_FOUND", "브랜드를 찾을 수 없습니다."))?;
        let consultation_count = state
            .consultations
            .values()
            .filter(|stored| stored.consultation.brand().id == brand)
            .count();
        Ok(BrandDetail {
            brand: entry.brand.clone(),
            consultation_count: i64::try_from(consultation_count).unwrap_or(i64::MAX),
        })
    }

    async fn categories(&self) -> Result<Vec<BrandCategory>, BackendApiError> {
        Ok(self.served().categories.clone())
    }
}

#[async_trait]
impl SavedBrandApi for InMemoryFranchiseBackend {
    async fn saved_brands(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Page<Brand>, BackendApiError> {
        let state = self.served();
        let brands = state
            .saved
            .iter()
            .filter(|(owner, _)| *owner == user)
            .filter_map(|(_, brand)| state.brands.get(brand))
            .map(|entry| entry.brand.clone())
            .collect();
        Ok(Page::from_items(brands, page))
    }

    async fn toggle_saved(
        &self,
        user: UserId,
        brand: BrandId,
    ) -> Result<SaveToggleOutcome, BackendApiError> {
        let mut state = self.served();
        if state.fail_toggles {
            return Err(BackendApiError::rejected(
                500_u16,
                Some("INTERNAL_ERROR".to_owned()),
                "",
            ));
        }
        if !state.brands.contains_key(&brand) {
            return Err(not_found("BRAND_NOT_FOUND", "브랜드를 찾을 수 없습니다."));
        }
        let saved = if state.saved.remove(&(user, brand)) {
            false
        } else {
            state.saved.insert((user, brand));
            true
        };
        Ok(SaveToggleOutcome {
            saved: (!state.omit_toggle_state).then_some(saved),
        })
    }

    async fn save_status(
        &self,
        user: UserId,
        brands: &[BrandId],
    ) -> Result<BTreeMap<BrandId, bool>, BackendApiError> {
        let state = self.served();
        Ok(brands
            .iter()
            .map(|brand| (*brand, state.saved.contains(&(user, *brand))))
            .collect())
    }
}

#[async_trait]
impl UserConsultationApi for InMemoryFranchiseBackend {
    async fn create(
        &self,
        user: UserId,
        request: &NewConsultation,
    ) -> Result<Consultation, BackendApiError> {
        let now = self.now();
        let mut state = self.served();
        let brand_name = state
            .brands
            .get(&request.brand_id)
            .map(|entry| entry.brand.name.clone())
            .ok_or_else(|| not_found("BRAND_NOT_FOUND", "브랜드를 찾을 수 없습니다."))?;
        let duplicate = state.consultations.values().any(|stored| {
            stored.owner == user && stored.consultation.blocks_request_for(request.brand_id)
        });
        if duplicate {
            return Err(BackendApiError::rejected(
                409_u16,
                Some("CONSULTATION_DUPLICATE".to_owned()),
                "이미 해당 브랜드에 진행 중인 상담이 있습니다.",
            ));
        }

        state.last_consultation_id += 1;
        let id = ConsultationId::new(state.last_consultation_id)
            .map_err(|err| BackendApiError::decode(err.to_string()))?;
        let consultation = Consultation::new(ConsultationDraft {
            id,
            brand: BrandRef {
                id: request.brand_id,
                name: brand_name,
            },
            requester: Requester {
                id: Some(user),
                name: None,
            },
            preferred: request.schedule,
            status: ConsultationStatus::Pending,
            proposal: None,
            message: Some(request.message.clone()),
            created_at: now,
            confirmed_at: None,
        })
        .map_err(|err| BackendApiError::decode(err.to_string()))?;
        state.consultations.insert(
            id,
            StoredConsultation {
                owner: user,
                consultation: consultation.clone(),
            },
        );
        Ok(consultation)
    }

    async fn list(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Page<Consultation>, BackendApiError> {
        let state = self.served();
        let owned = state
            .consultations
            .values()
            .filter(|stored| stored.owner == user)
            .map(|stored| &stored.consultation);
        Ok(Page::from_items(newest_first(owned), page))
    }

    async fn get(
        &self,
        user: UserId,
        id: ConsultationId,
    ) -> Result<Consultation, BackendApiError> {
        self.served()
            .consultations
            .get(&id)
            .filter(|stored| stored.owner == user)
            .map(|stored| stored.consultation.clone())
            .ok_or_else(|| not_found("CONSULTATION_NOT_FOUND", "상담을 찾을 수 없습니다."))
    }

    async fn respond(
        &self,
        user: UserId,
        id: ConsultationId,
        response: RescheduleResponse,
    ) -> Result<Consultation, BackendApiError> {
        self.apply_as_user(user, id, response.into())
    }

    async fn cancel(
        &self,
        user: UserId,
        id: ConsultationId,
    ) -> Result<Consultation, BackendApiError> {
        self.apply_as_user(user, id, ConsultationEvent::Cancel)
    }
}

#[async_trait]
impl ManagerConsultationApi for InMemoryFranchiseBackend {
    async fn list(
        &self,
        manager: ManagerId,
        page: PageRequest,
    ) -> Result<Page<Consultation>, BackendApiError> {
        let state = self.served();
        let owned = state
            .consultations
            .values()
            .map(|stored| &stored.consultation)
            .filter(|consultation| {
                state
                    .brands
                    .get(&consultation.brand().id)
                    .is_some_and(|entry| entry.manager == Some(manager))
            });
        Ok(Page::from_items(newest_first(owned), page))
    }

    async fn confirm(
        &self,
        manager: ManagerId,
        id: ConsultationId,
    ) -> Result<Consultation, BackendApiError> {
        self.apply_as_manager(manager, id, ConsultationEvent::Confirm)
    }

    async fn propose_reschedule(
        &self,
        manager: ManagerId,
        id: ConsultationId,
        proposal: &RescheduleProposal,
    ) -> Result<Consultation, BackendApiError> {
        self.apply_as_manager(
            manager,
            id,
            ConsultationEvent::ProposeReschedule(proposal.clone()),
        )
    }

    async fn cancel(
        &self,
        manager: ManagerId,
        id: ConsultationId,
    ) -> Result<Consultation, BackendApiError> {
        self.apply_as_manager(manager, id, ConsultationEvent::Cancel)
    }
}
