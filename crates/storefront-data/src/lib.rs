//! Catalog HTTP client for the storefront state manager.
//!
//! Requests are described up front and only sent when the caller resolves
//! them, so the state manager can hand out a [`PendingRequest`] and leave
//! error handling to whoever drives the UI.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::FetchClient;
//!
//! let client = FetchClient::native(std::time::Duration::from_secs(10))?
//!     .with_base_url("https://shop.example.com");
//!
//! let products: Vec<Product> = client.get("/products.json").json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

use std::collections::HashMap;
use std::rc::Rc;

pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;
#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;
pub use transport::Transport;

/// HTTP client that builds requests against an optional base URL.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Rc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client that sends through the given transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport: Rc::new(transport),
        }
    }

    /// Create a client using the blocking reqwest transport.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn native(timeout: std::time::Duration) -> Result<Self, FetchError> {
        Ok(Self::new(ReqwestTransport::new(timeout)?))
    }

    /// Prepend `base_url` to every relative request path.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header included in every request.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Describe a GET request without sending it.
    pub fn get(&self, url: impl Into<String>) -> PendingRequest {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let builder = RequestBuilder::get(full_url)
            .accept("application/json")
            .headers(self.default_headers.clone());

        PendingRequest {
            builder,
            transport: Rc::clone(&self.transport),
        }
    }
}

/// A request that has been described but not yet sent.
///
/// Nothing touches the network until [`send`](Self::send) or
/// [`json`](Self::json) is called. Dropping it cancels nothing because
/// nothing has started.
#[must_use = "a pending request does nothing until it is sent"]
pub struct PendingRequest {
    builder: RequestBuilder,
    transport: Rc<dyn Transport>,
}

impl std::fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRequest")
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

impl PendingRequest {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// The request as it will be sent.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and return the raw response, whatever its status.
    pub fn send(self) -> Result<Response, FetchError> {
        tracing::debug!(url = self.builder.url(), "sending request");
        self.transport.execute(&self.builder)
    }

    /// Send the request, reject non-2xx statuses and parse the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(self) -> Result<T, FetchError> {
        self.send()?.error_for_status()?.json()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, PendingRequest, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingTransport {
        urls: RefCell<Vec<String>>,
        status: u16,
        body: &'static str,
    }

    impl Transport for RecordingTransport {
        fn execute(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
            self.urls.borrow_mut().push(request.url().to_string());
            Ok(Response::new(self.status, HashMap::new(), self.body.as_bytes().to_vec()))
        }
    }

    fn transport(status: u16, body: &'static str) -> Rc<RecordingTransport> {
        Rc::new(RecordingTransport {
            urls: RefCell::new(Vec::new()),
            status,
            body,
        })
    }

    #[test]
    fn test_base_url_is_prepended() {
        let client = FetchClient::new(transport(200, "[]")).with_base_url("https://shop.test/");
        let pending = client.get("/products.json");
        assert_eq!(pending.request().url(), "https://shop.test/products.json");
    }

    #[test]
    fn test_absolute_url_is_kept() {
        let client = FetchClient::new(transport(200, "[]")).with_base_url("https://shop.test");
        let pending = client.get("https://cdn.test/products.json");
        assert_eq!(pending.request().url(), "https://cdn.test/products.json");
    }

    #[test]
    fn test_nothing_is_sent_until_resolved() {
        let t = transport(200, "[1, 2]");
        let client = FetchClient::new(Rc::clone(&t)).with_default_header("X-Shop", "demo");
        let pending = client.get("/products.json");
        assert!(t.urls.borrow().is_empty());
        assert_eq!(pending.request().header_map()["X-Shop"], "demo");

        let values: Vec<u32> = pending.json().unwrap();
        assert_eq!(values, vec![1, 2]);
        assert_eq!(t.urls.borrow().as_slice(), ["/products.json"]);
    }

    #[test]
    fn test_json_rejects_error_status() {
        let client = FetchClient::new(transport(404, "missing"));
        let result: Result<Vec<u32>, _> = client.get("/products/zz.json").json();
        assert!(matches!(result, Err(FetchError::HttpError { status: 404, .. })));
    }
}
