//! Brand read models.
//!
//! Brands are owned and edited by managers elsewhere; this client only reads
//! them, so the types are plain records with public fields.

use super::{BrandId, CategoryId};

/// A brand category such as food service or retail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandCategory {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

/// A franchise listing with cost, revenue and store-count metadata.
///
/// Monetary figures are whole won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub category_name: Option<String>,
    pub description: Option<String>,
    pub initial_cost: Option<i64>,
    pub total_investment: Option<i64>,
    pub avg_monthly_revenue: Option<i64>,
    pub store_count: Option<i64>,
    pub view_count: i64,
    pub save_count: i64,
}

impl Brand {
    /// Move the displayed save counter after the saved flag changed to
    /// `saved`. The counter never drops below zero.
    pub fn record_save_toggle(&mut self, saved: bool) {
        self.save_count = if saved {
            self.save_count.saturating_add(1)
        } else {
            self.save_count.saturating_sub(1).max(0)
        };
    }
}

/// Brand detail page payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandDetail {
    pub brand: Brand,
    pub consultation_count: i64,
}
