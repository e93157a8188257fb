//! Transports that actually move a request over the wire.

use crate::{FetchError, RequestBuilder, Response};

/// Sends a described request and returns the raw response.
///
/// Implementations perform exactly one attempt per call.
pub trait Transport {
    fn execute(&self, request: &RequestBuilder) -> Result<Response, FetchError>;
}

impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    fn execute(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
        (**self).execute(request)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::HashMap;
    use std::time::Duration;

    use reqwest::blocking::Client;
    use reqwest::header::HeaderMap;

    use super::Transport;
    use crate::{FetchError, RequestBuilder, Response};

    /// Blocking transport backed by reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        pub fn new(timeout: Duration) -> Result<Self, FetchError> {
            let client = Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| FetchError::Client(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl Transport for ReqwestTransport {
        fn execute(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
            let url = request.url();
            let mut builder = self.client.get(url);
            for (key, value) in request.header_map() {
                builder = builder.header(key.as_str(), value.as_str());
            }

            let response = builder.send().map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                    }
                } else if e.is_builder() {
                    FetchError::InvalidUrl(url.to_string())
                } else {
                    FetchError::Request {
                        url: url.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;

            let status = response.status().as_u16();
            let headers = collect_headers(response.headers());
            let body = response
                .bytes()
                .map_err(|e| FetchError::Request {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?
                .to_vec();

            Ok(Response::new(status, headers, body))
        }
    }

    // Header values are not guaranteed to be UTF-8; keep what decodes.
    fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect()
    }

}
