//! Integration tests for the storefront cart pages.
//!
//! Every test spawns its own storefront with in-memory sessions, so they run
//! without a database.
//!
//! Run with: cargo test -p tiffin-integration-tests

use reqwest::StatusCode;
use reqwest::header::LOCATION;
use tiffin_core::{Price, PricingPolicy};
use tiffin_integration_tests::TestApp;
use tiffin_storefront::config::StorefrontConfig;
use tiffin_storefront::htmx::{HTMX_ORIGIN, HTMX_SCRIPT_URL};

fn location(resp: &reqwest::Response) -> &str {
    resp.headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

// ============================================================================
// Cart Page
// ============================================================================

#[tokio::test]
async fn test_empty_cart_links_to_menu() {
    let app = TestApp::spawn().await;

    let resp = app.get("/cart").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Your Shopping Cart"));
    assert!(body.contains("Your cart is empty"));
    assert!(body.contains(r#"href="/menu""#));
    assert!(!body.contains("Order Summary"));
}

#[tokio::test]
async fn test_added_items_render_with_summary() {
    let app = TestApp::spawn().await;

    let resp = app.add_item("biryani", "Chicken Biryani", "120", "2").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart");

    let body = app.cart_page().await;
    assert!(body.contains("Chicken Biryani"));
    assert!(body.contains("mains"));
    assert!(body.contains("৳120.00"));
    // Subtotal and line total
    assert!(body.contains("৳240.00"));
    assert!(body.contains("Delivery Fee"));
    assert!(body.contains("৳45.00"));
    // Total is subtotal plus the surcharge
    assert!(body.contains("৳245.00"));
    assert!(body.contains(r#"href="/products""#));
    assert!(body.contains("Proceed to Checkout"));
}

#[tokio::test]
async fn test_adding_same_item_merges_quantity() {
    let app = TestApp::spawn().await;

    app.add_item("samosa", "Samosa", "30", "1").await;
    app.add_item("samosa", "Samosa", "30", "2").await;

    let body = app.cart_page().await;
    assert_eq!(body.matches("Samosa</div>").count(), 1);
    assert!(body.contains(r#"name="quantity" min="1" value="3""#));
    assert!(body.contains("৳90.00"));
}

#[tokio::test]
async fn test_add_rejects_invalid_price() {
    let app = TestApp::spawn().await;

    let resp = app.add_item("bad", "Bad", "-5", "1").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.add_item("bad", "Bad", "free", "1").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(app.cart_page().await.contains("Your cart is empty"));
}

// ============================================================================
// Quantity Updates
// ============================================================================

#[tokio::test]
async fn test_set_quantity() {
    let app = TestApp::spawn().await;
    app.add_item("dal", "Dal Makhani", "80", "1").await;

    let resp = app
        .post_form(
            "/cart/update",
            &[("line_id", "dal"), ("quantity", "4"), ("action", "set")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart");

    let body = app.cart_page().await;
    assert!(body.contains(r#"name="quantity" min="1" value="4""#));
    assert!(body.contains("৳320.00"));
}

#[tokio::test]
async fn test_increment_and_decrement_buttons() {
    let app = TestApp::spawn().await;
    app.add_item("dal", "Dal Makhani", "80", "2").await;

    app.post_form(
        "/cart/update",
        &[("line_id", "dal"), ("quantity", "2"), ("action", "increment")],
    )
    .await;
    assert!(app.cart_page().await.contains(r#"min="1" value="3""#));

    app.post_form(
        "/cart/update",
        &[("line_id", "dal"), ("quantity", "3"), ("action", "decrement")],
    )
    .await;
    assert!(app.cart_page().await.contains(r#"min="1" value="2""#));
}

#[tokio::test]
async fn test_decrement_below_one_is_ignored() {
    let app = TestApp::spawn().await;
    app.add_item("naan", "Garlic Naan", "25", "1").await;

    let resp = app
        .post_form(
            "/cart/update",
            &[("line_id", "naan"), ("quantity", "1"), ("action", "decrement")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = app.cart_page().await;
    assert!(body.contains("Garlic Naan"));
    assert!(body.contains(r#"min="1" value="1""#));
}

#[tokio::test]
async fn test_unparseable_quantity_becomes_one() {
    let app = TestApp::spawn().await;
    app.add_item("naan", "Garlic Naan", "25", "5").await;

    app.post_form(
        "/cart/update",
        &[("line_id", "naan"), ("quantity", "abc"), ("action", "set")],
    )
    .await;
    assert!(app.cart_page().await.contains(r#"min="1" value="1""#));

    app.post_form(
        "/cart/update",
        &[("line_id", "naan"), ("quantity", "-2"), ("action", "set")],
    )
    .await;
    assert!(app.cart_page().await.contains(r#"min="1" value="1""#));
}

#[tokio::test]
async fn test_buttons_step_from_cart_not_from_page() {
    let app = TestApp::spawn().await;
    app.add_item("dal", "Dal Makhani", "80", "2").await;

    // A stale page still showing 50 must not jump the line to 51.
    app.post_form(
        "/cart/update",
        &[("line_id", "dal"), ("quantity", "50"), ("action", "increment")],
    )
    .await;
    assert!(app.cart_page().await.contains(r#"min="1" value="3""#));

    app.post_form(
        "/cart/update",
        &[("line_id", "dal"), ("quantity", "50"), ("action", "decrement")],
    )
    .await;
    assert!(app.cart_page().await.contains(r#"min="1" value="2""#));
}

// ============================================================================
// Large Values
// ============================================================================

#[tokio::test]
async fn test_add_past_total_ceiling_is_rejected() {
    let app = TestApp::spawn().await;
    app.add_item("dal", "Dal Makhani", "80", "1").await;

    let resp = app
        .add_item("gold", "Gold Thali", "100000000000000000000", "1000000000")
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.add_item("gold", "Gold Thali", "1000000000000", "2").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.get("/cart").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Dal Makhani"));
    assert!(!body.contains("Gold Thali"));
    assert!(body.contains("৳80.00"));
}

#[tokio::test]
async fn test_merge_past_quantity_limit_is_rejected() {
    let app = TestApp::spawn().await;
    app.add_item("naan", "Garlic Naan", "25", "4294967295").await;

    let resp = app.add_item("naan", "Garlic Naan", "25", "1").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.get("/cart").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(r#"min="1" value="4294967295""#));
}

#[tokio::test]
async fn test_increment_at_quantity_limit_is_ignored() {
    let app = TestApp::spawn().await;
    app.add_item("naan", "Garlic Naan", "25", "4294967295").await;

    let resp = app
        .post_form(
            "/cart/update",
            &[("line_id", "naan"), ("quantity", "4294967295"), ("action", "increment")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = app.get("/cart").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(r#"min="1" value="4294967295""#));
}

#[tokio::test]
async fn test_update_past_total_ceiling_is_ignored() {
    let app = TestApp::spawn().await;
    app.add_item("thali", "Royal Thali", "1000000", "1").await;

    let resp = app
        .post_form(
            "/cart/update",
            &[("line_id", "thali"), ("quantity", "4294967295"), ("action", "set")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = app
        .htmx_post(
            "/cart/update",
            &[("line_id", "thali"), ("quantity", "99999999"), ("action", "set")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("hx-trigger").is_none());

    let resp = app.get("/cart").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Royal Thali"));
    assert!(body.contains(r#"min="1" value="1""#));
}

// ============================================================================
// Remove & Clear
// ============================================================================

#[tokio::test]
async fn test_remove_item() {
    let app = TestApp::spawn().await;
    app.add_item("a", "Aloo Paratha", "60", "1").await;
    app.add_item("b", "Butter Chicken", "180", "1").await;

    let resp = app.post_form("/cart/remove", &[("line_id", "a")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = app.cart_page().await;
    assert!(!body.contains("Aloo Paratha"));
    assert!(body.contains("Butter Chicken"));

    app.post_form("/cart/remove", &[("line_id", "b")]).await;
    assert!(app.cart_page().await.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_clear_asks_for_confirmation() {
    let app = TestApp::spawn().await;

    let resp = app.get("/cart/clear").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Are you sure you want to clear your cart?"));
    assert!(body.contains(r#"value="yes""#));
    assert!(body.contains(r#"value="no""#));
}

#[tokio::test]
async fn test_declined_clear_keeps_items() {
    let app = TestApp::spawn().await;
    app.add_item("lassi", "Mango Lassi", "50", "2").await;

    let resp = app.post_form("/cart/clear", &[("confirm", "no")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(app.cart_page().await.contains("Mango Lassi"));

    app.post_form("/cart/clear", &[]).await;
    assert!(app.cart_page().await.contains("Mango Lassi"));
}

#[tokio::test]
async fn test_confirmed_clear_empties_cart() {
    let app = TestApp::spawn().await;
    app.add_item("lassi", "Mango Lassi", "50", "2").await;

    let resp = app.post_form("/cart/clear", &[("confirm", "yes")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart");

    assert!(app.cart_page().await.contains("Your cart is empty"));
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_empties_cart_and_redirects() {
    let app = TestApp::spawn().await;
    app.add_item("thali", "Veg Thali", "220", "1").await;

    let resp = app.post_form("/cart/checkout", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/checkout-success");

    let resp = app.get("/checkout-success").await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(app.cart_page().await.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_still_redirects() {
    let app = TestApp::spawn().await;

    let resp = app.post_form("/cart/checkout", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/checkout-success");
}

#[tokio::test]
async fn test_htmx_checkout_uses_hx_redirect() {
    let app = TestApp::spawn().await;
    app.add_item("thali", "Veg Thali", "220", "1").await;

    let resp = app.htmx_post("/cart/checkout", &[]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("hx-redirect")
            .and_then(|value| value.to_str().ok()),
        Some("/checkout-success")
    );
}

// ============================================================================
// HTMX Fragments
// ============================================================================

#[tokio::test]
async fn test_htmx_update_returns_fragment_and_trigger() {
    let app = TestApp::spawn().await;
    app.add_item("dal", "Dal Makhani", "80", "1").await;

    let resp = app
        .htmx_post(
            "/cart/update",
            &[("line_id", "dal"), ("quantity", "2"), ("action", "set")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("hx-trigger")
            .and_then(|value| value.to_str().ok()),
        Some("cart-updated")
    );

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.trim_start().starts_with(r#"<div id="cart-items">"#));
    assert!(!body.contains("<html"));
    assert!(body.contains("৳160.00"));
}

#[tokio::test]
async fn test_htmx_ignored_update_has_no_trigger() {
    let app = TestApp::spawn().await;
    app.add_item("dal", "Dal Makhani", "80", "1").await;

    let resp = app
        .htmx_post(
            "/cart/update",
            &[("line_id", "dal"), ("quantity", "1"), ("action", "decrement")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("hx-trigger").is_none());
}

#[tokio::test]
async fn test_htmx_clear_prompt_is_fragment() {
    let app = TestApp::spawn().await;

    let resp = app.htmx_get("/cart/clear").await;
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Are you sure you want to clear your cart?"));
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn test_cart_count_badge() {
    let app = TestApp::spawn().await;

    let body = app
        .htmx_get("/cart/count")
        .await
        .text()
        .await
        .expect("Failed to read response");
    assert!(!body.contains("cart-count-badge"));

    app.add_item("a", "Aloo Paratha", "60", "2").await;
    app.add_item("b", "Butter Chicken", "180", "3").await;

    let body = app
        .htmx_get("/cart/count")
        .await
        .text()
        .await
        .expect("Failed to read response");
    assert!(body.contains(">5<"));
}

#[tokio::test]
async fn test_htmx_add_returns_badge() {
    let app = TestApp::spawn().await;

    let resp = app
        .htmx_post(
            "/cart/add",
            &[("id", "a"), ("name", "Aloo Paratha"), ("price", "60")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("hx-trigger").is_some());
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(">1<"));
}

// ============================================================================
// Configuration & Plumbing
// ============================================================================

#[tokio::test]
async fn test_configured_pricing_is_rendered() {
    let config = StorefrontConfig {
        pricing: PricingPolicy::new(
            Price::from_minor_units(6000).expect("valid price"),
            Price::from_minor_units(6000).expect("valid price"),
        ),
        ..StorefrontConfig::default()
    };
    let app = TestApp::spawn_with(config).await;
    app.add_item("thali", "Veg Thali", "200", "1").await;

    let body = app.cart_page().await;
    assert!(body.contains("৳60.00"));
    assert!(body.contains("৳260.00"));
}

#[tokio::test]
async fn test_carts_are_per_browser() {
    let app = TestApp::spawn().await;
    app.add_item("thali", "Veg Thali", "220", "1").await;

    // A fresh client has no session cookie
    let body = reqwest::get(app.url("/cart"))
        .await
        .expect("GET request failed")
        .text()
        .await
        .expect("Failed to read response");
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::spawn().await;

    let resp = app.get("/does-not-exist").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::spawn().await;

    let resp = app.get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read response"), "ok");

    // No session database configured
    let resp = app.get("/health/ready").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let app = TestApp::spawn().await;

    let resp = app.get("/cart").await;
    let headers = resp.headers();
    assert_eq!(
        headers.get("x-frame-options").and_then(|v| v.to_str().ok()),
        Some("DENY")
    );
    assert!(headers.get("content-security-policy").is_some());
    assert!(headers.get("x-request-id").is_some());
    assert_eq!(
        headers.get("cache-control").and_then(|v| v.to_str().ok()),
        Some("no-store, max-age=0")
    );
}

// ============================================================================
// Assets
// ============================================================================

#[tokio::test]
async fn test_htmx_script_is_allowed_by_csp() {
    let app = TestApp::spawn().await;

    let resp = app.get("/cart").await;
    let csp = resp
        .headers()
        .get("content-security-policy")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(csp.contains(&format!("script-src 'self' {HTMX_ORIGIN};")));

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(&format!(r#"<script src="{HTMX_SCRIPT_URL}""#)));
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let app = TestApp::spawn().await;

    let resp = app.get("/static/css/cart.css").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.get("/static/css/missing.css").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
