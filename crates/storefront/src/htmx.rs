//! HTMX request detection and response headers.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Request header set by HTMX on every AJAX request.
pub const HX_REQUEST: &str = "hx-request";

/// Response header that fires client-side events.
pub const HX_TRIGGER: &str = "HX-Trigger";

/// Response header that makes HTMX perform a full client-side redirect.
pub const HX_REDIRECT: &str = "HX-Redirect";

/// Origin serving the pinned HTMX release.
pub const HTMX_ORIGIN: &str = "https://unpkg.com";

/// Pinned HTMX release loaded by every page.
pub const HTMX_SCRIPT_URL: &str = "https://unpkg.com/htmx.org@2.0.4/dist/htmx.min.js";

/// Event fired after any cart mutation so badges can refresh.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Whether the request was issued by HTMX (and wants a fragment back).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HxRequest(pub bool);

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_htmx = parts
            .headers
            .get(HX_REQUEST)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));
        Ok(Self(is_htmx))
    }
}
