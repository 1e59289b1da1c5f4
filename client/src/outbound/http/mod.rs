//! HTTP adapter for the franchise backend REST API.
//!
//! [`HttpBackend`] implements every outbound port: the public catalogue,
//! the user's saved brands and consultations, and the manager's
//! consultation endpoints. Responses arrive wrapped in a common envelope
//! which is unwrapped in `envelope`.

mod client;
mod dto;
mod envelope;
mod manager_api;
mod public_brands;
mod user_api;

pub use client::HttpBackend;
