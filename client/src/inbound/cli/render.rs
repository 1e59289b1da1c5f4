//! Plain-text rendering for command output.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use pagination::{Page, PageInfo};

use crate::domain::{
    Brand, BrandCategory, BrandDetail, BrandId, Consultation, ConsultationBoard, SaveStateBook,
};

pub(super) const CONSULTATION_REQUESTED: &str = "상담 신청이 완료되었습니다.";
pub(super) const CONSULTATION_CONFIRMED: &str = "상담이 확정되었습니다.";
pub(super) const CONSULTATION_CANCELLED: &str = "상담이 취소되었습니다.";
pub(super) const RESCHEDULE_SENT: &str = "일정 조정 요청을 보냈습니다.";
pub(super) const BRAND_SAVED: &str = "찜 목록에 추가했습니다.";
pub(super) const BRAND_UNSAVED: &str = "찜 목록에서 제거했습니다.";

const NO_BRANDS: &str = "브랜드가 없습니다.";
const NO_CONSULTATIONS: &str = "상담 내역이 없습니다.";
const NOT_SET: &str = "-";

/// `50000000` → `50,000,000원`.
fn won(amount: Option<i64>) -> String {
    let Some(amount) = amount else {
        return NOT_SET.to_owned();
    };
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped}원")
}

fn footer(info: &PageInfo) -> String {
    format!(
        "{}/{} 페이지 · 총 {}건",
        info.page.saturating_add(1),
        info.total_pages.max(1),
        info.total_elements
    )
}

fn brand_line(brand: &Brand, saved: bool) -> String {
    let mark = if saved { "♥ " } else { "" };
    let category = brand.category_name.as_deref().unwrap_or(NOT_SET);
    format!(
        "{mark}#{} {} [{category}] 창업비용 {} · 조회 {} · 찜 {}",
        brand.id,
        brand.name,
        won(brand.initial_cost),
        brand.view_count,
        brand.save_count
    )
}

/// One page of brands, marking the ones `book` knows to be saved.
pub(super) fn brand_page(page: &Page<Brand>, book: &SaveStateBook) -> String {
    if page.is_empty() {
        return NO_BRANDS.to_owned();
    }
    let mut out = String::new();
    for brand in &page.content {
        let _ = writeln!(out, "{}", brand_line(brand, book.is_saved(brand.id)));
    }
    out.push_str(&footer(&page.page_info));
    out
}

pub(super) fn brand_detail(detail: &BrandDetail) -> String {
    let brand = &detail.brand;
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", brand.id, brand.name);
    let _ = writeln!(
        out,
        "카테고리: {}",
        brand.category_name.as_deref().unwrap_or(NOT_SET)
    );
    if let Some(description) = &brand.description {
        let _ = writeln!(out, "{description}");
    }
    let _ = writeln!(out, "창업비용: {}", won(brand.initial_cost));
    let _ = writeln!(out, "총 투자금: {}", won(brand.total_investment));
    let _ = writeln!(out, "월 평균 매출: {}", won(brand.avg_monthly_revenue));
    let stores = brand
        .store_count
        .map_or_else(|| NOT_SET.to_owned(), |count| format!("{count}개"));
    let _ = writeln!(out, "가맹점 수: {stores}");
    let _ = write!(
        out,
        "조회 {} · 찜 {} · 상담 {}",
        brand.view_count, brand.save_count, detail.consultation_count
    );
    out
}

pub(super) fn categories(categories: &[BrandCategory]) -> String {
    categories
        .iter()
        .map(|category| match &category.description {
            Some(description) => format!("#{} {} - {description}", category.id, category.name),
            None => format!("#{} {}", category.id, category.name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn save_flags(flags: &BTreeMap<BrandId, bool>) -> String {
    flags
        .iter()
        .map(|(brand, saved)| format!("#{brand} {}", if *saved { "찜함" } else { "찜 안 함" }))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn toggled(saved: bool) -> &'static str {
    if saved { BRAND_SAVED } else { BRAND_UNSAVED }
}

fn consultation_line(consultation: &Consultation) -> String {
    format!(
        "#{} {} · {} · {}",
        consultation.id(),
        consultation.brand().name,
        consultation.schedule(),
        consultation.status().label()
    )
}

/// Full view of one consultation, including any pending proposal.
pub(super) fn consultation(consultation: &Consultation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", consultation_line(consultation));
    let requester = consultation.requester();
    if let Some(name) = &requester.name {
        let _ = writeln!(out, "신청자: {name}");
    }
    let _ = writeln!(out, "희망 일정: {}", consultation.preferred());
    if let Some(proposal) = consultation.proposal() {
        let _ = writeln!(out, "조정 일정: {}", proposal.schedule);
        if let Some(reason) = &proposal.reason {
            let _ = writeln!(out, "조정 사유: {reason}");
        }
        if let Some(note) = &proposal.manager_note {
            let _ = writeln!(out, "담당자 메모: {note}");
        }
    }
    if let Some(message) = consultation.message() {
        let _ = writeln!(out, "문의 내용: {message}");
    }
    let _ = write!(
        out,
        "신청일시: {}",
        consultation.created_at().format("%Y-%m-%d %H:%M")
    );
    if let Some(confirmed_at) = consultation.confirmed_at() {
        let _ = write!(out, "\n확정일시: {}", confirmed_at.format("%Y-%m-%d %H:%M"));
    }
    out
}

/// The confirmation line followed by the consultation as it now stands.
pub(super) fn acknowledged(message: &str, updated: &Consultation) -> String {
    format!("{message}\n{}", consultation_line(updated))
}

pub(super) fn consultation_page(page: &Page<Consultation>) -> String {
    if page.is_empty() {
        return NO_CONSULTATIONS.to_owned();
    }
    let mut out = String::new();
    for consultation in &page.content {
        let _ = writeln!(out, "{}", consultation_line(consultation));
    }
    out.push_str(&footer(&page.page_info));
    out
}

/// Status counts above the manager's listing.
pub(super) fn board(board: &ConsultationBoard) -> String {
    let tally = &board.tally;
    format!(
        "신청 중 {} · 일정 조정 중 {} · 확정 {} · 취소 {}\n{}",
        tally.pending,
        tally.reschedule_requested,
        tally.confirmed,
        tally.cancelled,
        consultation_page(&board.page)
    )
}
