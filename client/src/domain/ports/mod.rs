//! Domain ports for the franchise backend.

mod macros;
pub(crate) use macros::define_port_error;

mod backend_error;
mod brand_catalogue;
mod manager_consultation_api;
mod saved_brand_api;
mod user_consultation_api;

pub use backend_error::BackendApiError;
pub use brand_catalogue::BrandCatalogue;
#[cfg(test)]
pub use brand_catalogue::MockBrandCatalogue;
pub use manager_consultation_api::ManagerConsultationApi;
#[cfg(test)]
pub use manager_consultation_api::MockManagerConsultationApi;
#[cfg(test)]
pub use saved_brand_api::MockSavedBrandApi;
pub use saved_brand_api::{SaveToggleOutcome, SavedBrandApi};
#[cfg(test)]
pub use user_consultation_api::MockUserConsultationApi;
pub use user_consultation_api::UserConsultationApi;
