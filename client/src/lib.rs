//! Franchise directory client.
//!
//! Browses franchise brands, keeps the user's saved ("찜") brands in sync
//! with an optimistic toggle, and negotiates consultations between end users
//! and brand managers against the franchise backend's REST API.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
