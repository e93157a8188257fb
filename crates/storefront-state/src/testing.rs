//! Recording collaborators for tests and demos.

use std::cell::RefCell;
use std::collections::HashMap;

use storefront_data::{FetchError, RequestBuilder, Response, Transport};

use crate::ports::{Navigator, Notifier, Severity, ToastOptions};

/// Remembers every route it was asked to navigate to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.borrow_mut().push(route.to_string());
    }
}

/// Remembers every toast it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: RefCell<Vec<(Severity, ToastOptions)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<(Severity, ToastOptions)> {
        self.toasts.borrow().clone()
    }

    /// Messages only, in order.
    pub fn messages(&self) -> Vec<String> {
        self.toasts
            .borrow()
            .iter()
            .map(|(_, options)| options.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, options: ToastOptions) {
        self.toasts.borrow_mut().push((severity, options));
    }
}

/// Answers requests from canned bodies keyed by URL; anything else is a 404.
#[derive(Debug, Default)]
pub struct CannedTransport {
    responses: HashMap<String, (u16, String)>,
    requested: RefCell<Vec<String>>,
}

impl CannedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(
        mut self,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.responses.insert(url.into(), (status, body.into()));
        self
    }

    /// URLs requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Transport for CannedTransport {
    fn execute(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
        self.requested.borrow_mut().push(request.url().to_string());
        let (status, body) = self
            .responses
            .get(request.url())
            .cloned()
            .unwrap_or_else(|| (404, "Not Found".to_string()));
        Ok(Response::new(status, HashMap::new(), body.into_bytes()))
    }
}
