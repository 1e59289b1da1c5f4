//! Wire DTOs for the franchise backend.
//!
//! The backend is not consistent about naming (`id` vs `brandId`, `name` vs
//! `brandName`, bare vs object statuses), so the DTOs accept every variant
//! observed and map into domain types in one pass.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Brand, BrandCategory, BrandDetail, BrandId, BrandRef, CategoryId, Consultation,
    ConsultationDraft, ConsultationId, ConsultationStatus, NewConsultation, Requester,
    RescheduleProposal, RescheduleResponse, Schedule, UserId,
};
use crate::domain::consultation::{DATE_FORMAT, TIME_FORMAT, parse_date, parse_time};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CategoryDto {
    #[serde(alias = "categoryId")]
    id: i64,
    #[serde(alias = "categoryName")]
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamedCategoryDto {
    #[serde(default, alias = "categoryName")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BrandDto {
    #[serde(alias = "brandId")]
    id: i64,
    #[serde(alias = "brandName")]
    name: String,
    #[serde(default)]
    category_name: Option<String>,
    #[serde(default)]
    category: Option<NamedCategoryDto>,
    #[serde(default, alias = "brandDescription")]
    description: Option<String>,
    #[serde(default)]
    initial_cost: Option<i64>,
    #[serde(default)]
    total_investment: Option<i64>,
    #[serde(default)]
    avg_monthly_revenue: Option<i64>,
    #[serde(default)]
    store_count: Option<i64>,
    #[serde(default)]
    view_count: Option<i64>,
    #[serde(default, alias = "savedCount")]
    save_count: Option<i64>,
}

/// Saved brands arrive either paged or as the whole list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SavedListDto {
    Paged(Page<BrandDto>),
    Bare(Vec<BrandDto>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrandStatsDto {
    #[serde(default)]
    view_count: Option<i64>,
    #[serde(default, alias = "savedCount")]
    save_count: Option<i64>,
    #[serde(default)]
    consultation_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BrandDetailDto {
    #[serde(flatten)]
    brand: BrandDto,
    #[serde(default)]
    consultation_count: Option<i64>,
    #[serde(default)]
    stats: Option<BrandStatsDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrandRefDto {
    #[serde(alias = "brandId")]
    id: i64,
    #[serde(default, alias = "brandName")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRefDto {
    #[serde(default, alias = "userId")]
    id: Option<i64>,
    #[serde(default, alias = "userName")]
    name: Option<String>,
}

/// Status as a bare wire name or as `{ statusName, description }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusDto {
    Bare(ConsultationStatus),
    Described {
        #[serde(rename = "statusName", alias = "name")]
        status_name: ConsultationStatus,
    },
}

impl From<StatusDto> for ConsultationStatus {
    fn from(value: StatusDto) -> Self {
        match value {
            StatusDto::Bare(status) | StatusDto::Described { status_name: status } => status,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ConsultationDto {
    #[serde(alias = "consultationId")]
    id: i64,
    #[serde(default)]
    brand: Option<BrandRefDto>,
    #[serde(default)]
    brand_id: Option<i64>,
    #[serde(default)]
    brand_name: Option<String>,
    #[serde(default)]
    user: Option<UserRefDto>,
    #[serde(default)]
    user_id: Option<i64>,
    #[serde(default)]
    user_name: Option<String>,
    preferred_date: String,
    preferred_time: String,
    status: StatusDto,
    #[serde(default)]
    adjusted_date: Option<String>,
    #[serde(default)]
    adjusted_time: Option<String>,
    #[serde(default)]
    adjustment_reason: Option<String>,
    #[serde(default)]
    manager_note: Option<String>,
    #[serde(default)]
    message: Option<String>,
    created_at: String,
    #[serde(default)]
    confirmed_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SaveToggleDto {
    #[serde(default, alias = "isSaved")]
    pub(super) saved: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SaveStatusRequestDto {
    pub(super) brand_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ConsultationRequestDto {
    brand_id: i64,
    preferred_date: String,
    preferred_time: String,
    message: String,
}

#[derive(Debug, Serialize)]
pub(super) struct RescheduleResponseDto {
    response: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RescheduleRequestDto {
    adjusted_date: String,
    adjusted_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    adjustment_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    manager_note: Option<String>,
}

impl From<&NewConsultation> for ConsultationRequestDto {
    fn from(value: &NewConsultation) -> Self {
        Self {
            brand_id: value.brand_id.get(),
            preferred_date: value.schedule.date.format(DATE_FORMAT).to_string(),
            preferred_time: value.schedule.time.format(TIME_FORMAT).to_string(),
            message: value.message.clone(),
        }
    }
}

impl From<RescheduleResponse> for RescheduleResponseDto {
    fn from(value: RescheduleResponse) -> Self {
        Self {
            response: value.as_str(),
        }
    }
}

impl From<&RescheduleProposal> for RescheduleRequestDto {
    fn from(value: &RescheduleProposal) -> Self {
        Self {
            adjusted_date: value.schedule.date.format(DATE_FORMAT).to_string(),
            adjusted_time: value.schedule.time.format(TIME_FORMAT).to_string(),
            adjustment_reason: value.reason.clone(),
            manager_note: value.manager_note.clone(),
        }
    }
}

impl CategoryDto {
    pub(super) fn into_domain(self) -> Result<BrandCategory, String> {
        Ok(BrandCategory {
            id: CategoryId::new(self.id).map_err(|err| err.to_string())?,
            name: self.name,
            description: self.description,
        })
    }
}

impl BrandDto {
    pub(super) fn into_domain(self) -> Result<Brand, String> {
        let category_name = self
            .category_name
            .or_else(|| self.category.and_then(|category| category.name));
        Ok(Brand {
            id: BrandId::new(self.id).map_err(|err| err.to_string())?,
            name: self.name,
            category_name,
            description: self.description,
            initial_cost: self.initial_cost,
            total_investment: self.total_investment,
            avg_monthly_revenue: self.avg_monthly_revenue,
            store_count: self.store_count,
            view_count: self.view_count.unwrap_or(0),
            save_count: self.save_count.unwrap_or(0),
        })
    }
}

impl SavedListDto {
    /// The page addressed by `request`; a bare list is sliced locally.
    pub(super) fn into_page(self, request: PageRequest) -> Result<Page<Brand>, String> {
        let page = match self {
            Self::Paged(page) => page,
            Self::Bare(brands) => Page::from_items(brands, request),
        };
        page.try_map(BrandDto::into_domain)
    }
}

impl BrandDetailDto {
    pub(super) fn into_domain(self) -> Result<BrandDetail, String> {
        let stats = self.stats.unwrap_or_default();
        let mut brand = self.brand.into_domain()?;
        if let Some(view_count) = stats.view_count {
            brand.view_count = view_count;
        }
        if let Some(save_count) = stats.save_count {
            brand.save_count = save_count;
        }
        Ok(BrandDetail {
            brand,
            consultation_count: self
                .consultation_count
                .or(stats.consultation_count)
                .unwrap_or(0),
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    trimmed
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|at| at.naive_local()))
}

fn schedule(date: &str, time: &str, what: &str) -> Result<Schedule, String> {
    let date = parse_date(date).ok_or_else(|| format!("invalid {what} date {date:?}"))?;
    let time = parse_time(time).ok_or_else(|| format!("invalid {what} time {time:?}"))?;
    Ok(Schedule::new(date, time))
}

impl ConsultationDto {
    pub(super) fn into_domain(self) -> Result<Consultation, String> {
        let id = ConsultationId::new(self.id).map_err(|err| err.to_string())?;
        let (brand_id, brand_name) = match self.brand {
            Some(brand) => (Some(brand.id), brand.name),
            None => (self.brand_id, None),
        };
        let brand_id = brand_id.ok_or_else(|| format!("consultation {id} names no brand"))?;
        let brand = BrandRef {
            id: BrandId::new(brand_id).map_err(|err| err.to_string())?,
            name: brand_name.or(self.brand_name).unwrap_or_default(),
        };

        let (user_id, user_name) = match self.user {
            Some(user) => (user.id, user.name),
            None => (self.user_id, self.user_name),
        };
        let requester = Requester {
            id: user_id.map(UserId::new).transpose().map_err(|err| err.to_string())?,
            name: user_name,
        };

        let proposal = match (self.adjusted_date.as_deref(), self.adjusted_time.as_deref()) {
            (Some(date), Some(time)) if !date.trim().is_empty() && !time.trim().is_empty() => {
                Some(RescheduleProposal {
                    schedule: schedule(date, time, "adjusted")?,
                    reason: self.adjustment_reason,
                    manager_note: self.manager_note,
                })
            }
            _ => None,
        };

        let created_at = parse_timestamp(&self.created_at)
            .ok_or_else(|| format!("invalid createdAt {:?}", self.created_at))?;
        let confirmed_at = match self.confirmed_at.as_deref() {
            Some(raw) => Some(
                parse_timestamp(raw).ok_or_else(|| format!("invalid confirmedAt {raw:?}"))?,
            ),
            None => None,
        };

        Consultation::new(ConsultationDraft {
            id,
            brand,
            requester,
            preferred: schedule(&self.preferred_date, &self.preferred_time, "preferred")?,
            status: self.status.into(),
            proposal,
            message: self.message,
            created_at,
            confirmed_at,
        })
        .map_err(|err| err.to_string())
    }
}

/// Parse the save-status map, whose keys arrive as strings.
pub(super) fn parse_save_status(raw: BTreeMap<String, bool>) -> Result<BTreeMap<BrandId, bool>, String> {
    raw.into_iter()
        .map(|(key, saved)| {
            key.parse::<BrandId>()
                .map(|brand| (brand, saved))
                .map_err(|err| err.to_string())
        })
        .collect()
}
