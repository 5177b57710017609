//! Navigator that turns a route transition into an HTTP response.

use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use tiffin_core::{Navigator, Route};

use crate::htmx::HX_REDIRECT;

/// Records the last requested route and renders it as a redirect.
///
/// HTMX requests get an `HX-Redirect` header so the browser performs a full
/// navigation; plain form posts get `303 See Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseNavigator {
    htmx: bool,
    target: Option<Route>,
}

impl ResponseNavigator {
    /// Create a navigator for a request.
    #[must_use]
    pub const fn new(htmx: bool) -> Self {
        Self { htmx, target: None }
    }

    /// Build the response, falling back to `fallback` when no navigation
    /// was requested.
    #[must_use]
    pub fn into_response_or(self, fallback: Route) -> Response {
        let path = self.target.unwrap_or(fallback).path();
        if self.htmx {
            (AppendHeaders([(HX_REDIRECT, path)]), ()).into_response()
        } else {
            Redirect::to(path).into_response()
        }
    }
}

impl Navigator for ResponseNavigator {
    fn push(&mut self, route: Route) {
        self.target = Some(route);
    }
}
