//! Translation of port failures into user-facing domain errors.
//!
//! The backend's `errorCode` is checked before the HTTP status. The message
//! shown to the user is the backend's own when it sent one, otherwise the
//! failing operation's generic text.

use tracing::warn;

use super::ports::BackendApiError;
use super::{Error, ErrorCode, TransitionError};

pub const BRAND_LOAD_FAILED: &str = "브랜드 정보를 불러오는데 실패했습니다.";
pub const BRAND_LIST_FAILED: &str = "브랜드 목록을 불러오는데 실패했습니다.";
pub const CATEGORY_LOAD_FAILED: &str = "카테고리 목록 조회에 실패했습니다.";
pub const SAVED_LIST_FAILED: &str = "찜한 브랜드 목록을 불러오는데 실패했습니다.";
pub const SAVE_TOGGLE_FAILED: &str = "찜하기 처리에 실패했습니다.";
pub const CONSULTATION_REQUEST_FAILED: &str = "상담 신청에 실패했습니다.";
pub const CONSULTATION_LIST_FAILED: &str = "상담 목록을 불러오는데 실패했습니다.";
pub const CONSULTATION_CONFIRM_FAILED: &str = "상담 확정에 실패했습니다.";
pub const RESCHEDULE_FAILED: &str = "일정 조정 요청에 실패했습니다.";
pub const CONSULTATION_CANCEL_FAILED: &str = "상담 취소에 실패했습니다.";
pub const CONSULTATION_RESPONSE_FAILED: &str = "상담 응답에 실패했습니다.";
pub const CONSULTATION_NOT_FOUND: &str = "상담 정보를 찾을 수 없습니다.";
pub const DUPLICATE_CONSULTATION: &str = "이미 해당 브랜드에 진행 중인 상담이 있습니다.";

fn code_for(error: &BackendApiError) -> ErrorCode {
    match error.backend_code() {
        Some("CONSULTATION_DUPLICATE") => return ErrorCode::Conflict,
        Some("INVALID_PARAMETER") => return ErrorCode::InvalidRequest,
        Some("INTERNAL_ERROR") => return ErrorCode::InternalError,
        _ => {}
    }
    match error {
        BackendApiError::Transport { .. } | BackendApiError::Timeout { .. } => {
            ErrorCode::ServiceUnavailable
        }
        BackendApiError::Decode { .. } => ErrorCode::InternalError,
        BackendApiError::Rejected { status, .. } => match *status {
            401 => ErrorCode::Unauthorized,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            409 => ErrorCode::Conflict,
            500..=u16::MAX => ErrorCode::InternalError,
            _ => ErrorCode::InvalidRequest,
        },
    }
}

/// Map a port failure for `operation`, falling back to `fallback` as the
/// user-facing message.
pub(crate) fn map_backend_error(
    operation: &'static str,
    fallback: &'static str,
    error: BackendApiError,
) -> Error {
    warn!(operation, error = %error, "franchise backend call failed");
    let code = code_for(&error);
    let message = error.backend_message().unwrap_or(fallback);
    let mapped = Error::new(code, message);
    match error.backend_code() {
        Some(backend_code) => mapped.with_backend_code(backend_code),
        None => mapped,
    }
}

/// Map a transition the status machine refused before any request was sent.
pub(crate) fn map_transition_error(
    operation: &'static str,
    fallback: &'static str,
    error: TransitionError,
) -> Error {
    warn!(operation, error = %error, "consultation transition refused locally");
    match error {
        TransitionError::NotAllowed { .. } => Error::invalid_transition(fallback),
        TransitionError::ActorNotPermitted { .. } => Error::forbidden(fallback),
    }
}
