//! Reqwest-backed franchise backend adapter.
//!
//! This adapter owns transport details only: building URLs, attaching the
//! caller headers, timeout and transport error mapping, and envelope
//! decoding. The port implementations live in the sibling modules, one per
//! actor.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::ConsultationDto;
use super::envelope::{decode_data, require_data};
use crate::domain::ports::BackendApiError;
use crate::domain::{Consultation, ManagerId, UserId};

const DEFAULT_USER_AGENT: &str = concat!("franchise-client/", env!("CARGO_PKG_VERSION"));
const USER_ID_HEADER: &str = "User-Id";
const MANAGER_ID_HEADER: &str = "Manager-Id";

/// Who a request is made on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Caller {
    Public,
    User(UserId),
    Manager(ManagerId),
}

/// Franchise backend adapter implementing every outbound port over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl HttpBackend {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    /// ```rust,ignore
    /// let backend = HttpBackend::new(Url::parse("http://localhost:8080")?, timeout);
    /// assert!(backend.is_ok() || backend.is_err());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(base_url, timeout, DEFAULT_USER_AGENT)
    }

    /// Build an adapter that identifies itself with `user_agent`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_user_agent(
        base_url: Url,
        timeout: Duration,
        user_agent: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
            user_agent: user_agent.into(),
        })
    }

    /// Root that every endpoint path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, BackendApiError> {
        self.base_url
            .join(path)
            .map_err(|error| BackendApiError::transport(format!("invalid endpoint {path:?}: {error}")))
    }

    /// Start a request with the identity headers for `caller`.
    pub(super) fn request(
        &self,
        method: Method,
        path: &str,
        caller: Caller,
    ) -> Result<RequestBuilder, BackendApiError> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "franchise backend request");
        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json");
        Ok(match caller {
            Caller::Public => builder,
            Caller::User(user) => builder.header(USER_ID_HEADER, user.get().to_string()),
            Caller::Manager(manager) => builder.header(MANAGER_ID_HEADER, manager.get().to_string()),
        })
    }

    /// Send `request` and decode the envelope's required `data`.
    pub(super) async fn fetch<T>(&self, request: RequestBuilder) -> Result<T, BackendApiError>
    where
        T: DeserializeOwned,
    {
        let (status, body) = send(request).await?;
        require_data(status, &body)
    }

    /// Send `request` and decode the envelope's optional `data`.
    pub(super) async fn fetch_optional<T>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, BackendApiError>
    where
        T: DeserializeOwned,
    {
        let (status, body) = send(request).await?;
        decode_data(status, &body)
    }

    /// Send `request` and decode the consultation it answers with.
    pub(super) async fn fetch_consultation(
        &self,
        request: RequestBuilder,
    ) -> Result<Consultation, BackendApiError> {
        let consultation: ConsultationDto = self.fetch(request).await?;
        consultation.into_domain().map_err(invalid_data)
    }
}

async fn send(request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), BackendApiError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    debug!(status = status.as_u16(), bytes = body.len(), "franchise backend response");
    Ok((status, body.to_vec()))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn map_transport_error(error: reqwest::Error) -> BackendApiError {
    if error.is_timeout() {
        BackendApiError::timeout(error.to_string())
    } else {
        BackendApiError::transport(error.to_string())
    }
}

/// Decode failure for DTOs that parsed but did not map onto the domain.
pub(super) fn invalid_data(detail: String) -> BackendApiError {
    BackendApiError::decode(format!("invalid response data: {detail}"))
}

#[cfg(test)]
mod tests {
    //! URL resolution and request construction.

    use super::*;
    use rstest::rstest;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(Url::parse(base).expect("base url"), Duration::from_secs(5))
            .expect("client builds")
    }

    #[rstest]
    #[case("http://localhost:8080", "http://localhost:8080/api/public/categories")]
    #[case("http://gateway.test/franchise", "http://gateway.test/franchise/api/public/categories")]
    #[case("http://gateway.test/franchise/", "http://gateway.test/franchise/api/public/categories")]
    fn endpoints_resolve_under_the_base_path(#[case] base: &str, #[case] expected: &str) {
        let url = backend(base)
            .endpoint("api/public/categories")
            .expect("endpoint resolves");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn caller_headers_are_attached() {
        let backend = backend("http://localhost:8080");
        let user = UserId::new(3).expect("user id");
        let request = backend
            .request(Method::GET, "api/user/consultations", Caller::User(user))
            .expect("request builds")
            .build()
            .expect("request is valid");

        assert_eq!(
            request.headers().get(USER_ID_HEADER).and_then(|v| v.to_str().ok()),
            Some("3")
        );
        assert!(request.headers().get(MANAGER_ID_HEADER).is_none());
        assert_eq!(
            request
                .headers()
                .get(reqwest::header::ACCEPT)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[rstest]
    fn public_requests_carry_no_identity() {
        let request = backend("http://localhost:8080")
            .request(Method::GET, "api/public/brands", Caller::Public)
            .expect("request builds")
            .build()
            .expect("request is valid");
        assert!(request.headers().get(USER_ID_HEADER).is_none());
        assert!(request.headers().get(MANAGER_ID_HEADER).is_none());
    }
}
