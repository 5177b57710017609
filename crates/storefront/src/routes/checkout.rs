//! Checkout success page.
//!
//! There is no payment or order flow behind it; reaching this page only means
//! the cart was emptied by `POST /cart/checkout`.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tiffin_core::Route;

/// Checkout success page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct CheckoutSuccessTemplate {
    pub menu_path: &'static str,
}

/// Display the checkout success page.
pub async fn success() -> impl IntoResponse {
    CheckoutSuccessTemplate {
        menu_path: Route::Menu.path(),
    }
}
