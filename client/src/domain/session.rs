//! Acting identity shared by the services.
//!
//! The backend trusts the `User-Id` or `Manager-Id` header, so "logging in"
//! amounts to remembering which identity to send. The context is cheap to
//! clone; clones share the same slot.

use std::sync::{Arc, PoisonError, RwLock};

use super::{Error, ManagerId, UserId};

/// Message shown when an action needs an identity that is not present.
pub const LOGIN_REQUIRED: &str = "로그인이 필요합니다.";

/// Who the client is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    User(UserId),
    Manager(ManagerId),
}

/// Shared, mutable session slot.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Identity>>>,
}

impl SessionContext {
    /// A context with no identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A context already holding `identity`.
    pub fn with_identity(identity: Identity) -> Self {
        let context = Self::default();
        context.login(identity);
        context
    }

    /// Replace the current identity.
    pub fn login(&self, identity: Identity) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(identity);
    }

    /// Forget the current identity.
    pub fn logout(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn current(&self) -> Option<Identity> {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// The acting user.
    ///
    /// # Errors
    /// [`ErrorCode::Unauthorized`](super::ErrorCode::Unauthorized) when no
    /// user is logged in, including when a manager is.
    pub fn require_user(&self) -> Result<UserId, Error> {
        match self.current() {
            Some(Identity::User(id)) => Ok(id),
            _ => Err(Error::unauthorized(LOGIN_REQUIRED)),
        }
    }

    /// The acting manager.
    ///
    /// # Errors
    /// [`ErrorCode::Unauthorized`](super::ErrorCode::Unauthorized) when no
    /// manager is logged in.
    pub fn require_manager(&self) -> Result<ManagerId, Error> {
        match self.current() {
            Some(Identity::Manager(id)) => Ok(id),
            _ => Err(Error::unauthorized(LOGIN_REQUIRED)),
        }
    }
}
