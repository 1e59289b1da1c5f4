//! Domain primitives, the consultation state machine and the services.
//!
//! Purpose: hold everything that does not depend on how the franchise
//! backend is reached. Services drive the traits in [`ports`]; the HTTP
//! adapter and the in-memory test backend implement them.
//!
//! Public surface:
//! - Error / ErrorCode: user-facing failure and its category.
//! - Consultation and ConsultationStatus: the aggregate and its lifecycle.
//! - ConsultationRequestForm / RescheduleForm: client-side validation.
//! - SessionContext / SaveStateBook: shared client state.
//! - BrandCatalogueService, SavedBrandService, ConsultationService,
//!   ManagerConsultationService: the operations behind each screen.

pub mod brand;
pub mod consultation;
pub mod error;
pub mod forms;
pub mod ids;
pub mod ports;
pub mod save_state;
pub mod service_errors;
pub mod session;

mod brand_catalogue_service;
mod consultation_service;
mod manager_consultation_service;
mod page_scan;
mod saved_brand_service;

pub use self::brand::{Brand, BrandCategory, BrandDetail};
pub use self::brand_catalogue_service::BrandCatalogueService;
pub use self::consultation::{
    Actor, BrandRef, Consultation, ConsultationDraft, ConsultationEvent, ConsultationEventKind,
    ConsultationStatus, ConsultationValidationError, NewConsultation, Requester,
    RescheduleProposal, RescheduleResponse, Schedule, StatusTally, TransitionError,
};
pub use self::consultation_service::ConsultationService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::forms::{ConsultationRequestForm, FormError, RescheduleForm};
pub use self::ids::{BrandId, CategoryId, ConsultationId, IdValidationError, ManagerId, UserId};
pub use self::manager_consultation_service::{ConsultationBoard, ManagerConsultationService};
pub use self::save_state::SaveStateBook;
pub use self::saved_brand_service::SavedBrandService;
pub use self::session::{Identity, LOGIN_REQUIRED, SessionContext};

/// Result alias for service operations.
pub type ServiceResult<T> = Result<T, Error>;
