//! # HTTP Backend
//!
//! One shared [`reqwest::Client`] plus the resolved base URL. Every endpoint
//! wrapper funnels through here, so the request discipline lives in exactly
//! one place:
//!
//! 1. Attach the bearer token from the caller's [`Session`].
//! 2. Tag the request with a fresh UUID for log correlation.
//! 3. Map HTTP 401/403 to [`ApiError::Unauthorized`], any other non-success
//!    status to [`ApiError::HttpStatus`].
//! 4. Decode the body as an [`Envelope`] and hand it back undisturbed, so
//!    the wrapper decides between payload and ack.
//!
//! Nothing here retries. A failed request is reported once and the caller
//! chooses what to do next.

use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult};
use crate::session::Session;

/// Shared HTTP transport for all endpoint wrappers.
#[derive(Debug, Clone)]
pub struct Backend {
    client: reqwest::Client,
    base_url: Url,
}

impl Backend {
    /// Builds the transport from a validated configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut base_url = Url::parse(config.base_url())?;

        // Endpoint paths are joined relative to the base, which only works
        // when the base path ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Resolves a relative endpoint path (no leading slash) against the base.
    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// GET request returning the raw envelope.
    pub(crate) async fn get<T>(&self, session: &Session, path: &str) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self
            .client
            .get(url)
            .header(AUTHORIZATION, session.bearer());
        self.dispatch(request, Method::GET, path).await
    }

    /// Request with a JSON body returning the raw envelope.
    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        session: &Session,
        path: &str,
        body: &B,
    ) -> ApiResult<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, session.bearer())
            .json(body);
        self.dispatch(request, method, path).await
    }

    /// Body-less request returning the raw envelope.
    pub(crate) async fn send_empty<T>(
        &self,
        method: Method,
        session: &Session,
        path: &str,
    ) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, session.bearer());
        self.dispatch(request, method, path).await
    }

    /// Sends a prepared request and decodes the envelope.
    async fn dispatch<T>(
        &self,
        request: reqwest::RequestBuilder,
        method: Method,
        path: &str,
    ) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        debug!(%request_id, %method, path, "Sending API request");

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            warn!(%request_id, status = status.as_u16(), path, "Session rejected");
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            warn!(%request_id, status = status.as_u16(), path, "Request failed");
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        debug!(%request_id, success = envelope.success, path, "API response received");
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_with(base: &str) -> Backend {
        let mut config = ApiConfig::default();
        config.api.base_url = base.to_string();
        Backend::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_relative_paths() {
        let backend = backend_with("http://localhost:8000/api");
        let url = backend.endpoint("cart/add").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/cart/add");
    }

    #[test]
    fn test_base_without_trailing_slash_keeps_prefix() {
        // Without normalization, joining would drop the /api prefix.
        let backend = backend_with("https://shop.example.com/api");
        let url = backend.endpoint("order/view/42").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api/order/view/42");
    }

    #[test]
    fn test_base_with_trailing_slash() {
        let backend = backend_with("https://shop.example.com/api/");
        let url = backend.endpoint("cart").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api/cart");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = ApiConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            Backend::new(&config),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
