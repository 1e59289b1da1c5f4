//! Domain-level error type.
//!
//! These errors are transport agnostic. The CLI prints `message()` verbatim,
//! so it always holds text meant for the person at the keyboard; the stable
//! [`ErrorCode`] and the optional backend `errorCode` string are kept for
//! callers that branch on the failure category.

use std::fmt;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// No identity is available, or the backend refused it.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request clashes with existing state (for example a duplicate
    /// consultation).
    Conflict,
    /// The consultation status does not allow the attempted action.
    InvalidTransition,
    /// The backend could not be reached or timed out.
    ServiceUnavailable,
    /// An unexpected error occurred.
    InternalError,
}

impl ErrorCode {
    /// Fallback wording used when an error is built with a blank message.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "입력하신 정보를 다시 확인해주세요.",
            Self::Unauthorized => "로그인이 필요합니다.",
            Self::Forbidden => "권한이 없습니다.",
            Self::NotFound => "요청한 정보를 찾을 수 없습니다.",
            Self::Conflict => "이미 처리된 요청입니다.",
            Self::InvalidTransition => "현재 상태에서는 처리할 수 없는 요청입니다.",
            Self::ServiceUnavailable => "네트워크 연결을 확인하거나 잠시 후 다시 시도해주세요.",
            Self::InternalError => "서버에 문제가 발생했습니다. 잠시 후 다시 시도해주세요.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::InvalidTransition => "invalid_transition",
            Self::ServiceUnavailable => "service_unavailable",
            Self::InternalError => "internal_error",
        };
        f.write_str(label)
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use franchise_client::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("상담을 찾을 수 없습니다.");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    backend_code: Option<String>,
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    EmptyMessage,
}

impl fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error, substituting the code's default wording for a
    /// blank message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: code.default_message().to_owned(),
            backend_code: None,
        })
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            backend_code: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message to show the user.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// The backend's `errorCode`, when the failure came from the backend.
    pub fn backend_code(&self) -> Option<&str> {
        self.backend_code.as_deref()
    }

    /// Attach the backend's `errorCode`.
    ///
    /// # Examples
    /// ```
    /// use franchise_client::domain::Error;
    ///
    /// let err = Error::conflict("이미 신청한 상담입니다.")
    ///     .with_backend_code("CONSULTATION_DUPLICATE");
    /// assert_eq!(err.backend_code(), Some("CONSULTATION_DUPLICATE"));
    /// ```
    pub fn with_backend_code(mut self, backend_code: impl Into<String>) -> Self {
        self.backend_code = Some(backend_code.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidTransition`].
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTransition, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
