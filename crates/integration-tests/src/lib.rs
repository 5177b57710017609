//! Integration tests for the Tiffin storefront.
//!
//! Each test spawns the real router on an ephemeral port with in-memory
//! sessions and drives it over HTTP. The client keeps cookies, so one
//! [`TestApp`] behaves like one browser.
//!
//! Run with: `cargo test -p tiffin-integration-tests`

use reqwest::{Client, Response, redirect::Policy};
use tiffin_storefront::config::StorefrontConfig;
use tiffin_storefront::middleware::create_memory_session_layer;
use tiffin_storefront::state::AppState;
use tokio::net::TcpListener;

/// A running storefront plus a cookie-keeping client.
pub struct TestApp {
    base_url: String,
    client: Client,
}

impl TestApp {
    /// Spawn a storefront with default configuration.
    pub async fn spawn() -> Self {
        Self::spawn_with(StorefrontConfig::default()).await
    }

    /// Spawn a storefront with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn spawn_with(config: StorefrontConfig) -> Self {
        let session_layer = create_memory_session_layer(&config);
        let router = tiffin_storefront::app(AppState::new(config, None), session_layer);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server error");
        });

        // Redirects are asserted on, not followed
        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    /// Absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a path.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// GET a path as HTMX would.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn htmx_get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .header("HX-Request", "true")
            .send()
            .await
            .expect("HTMX GET request failed")
    }

    /// POST a form as a plain browser would.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// POST a form as HTMX would.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn htmx_post(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .expect("HTMX POST request failed")
    }

    /// Put an item in the cart through `/cart/add`.
    pub async fn add_item(&self, id: &str, name: &str, price: &str, quantity: &str) -> Response {
        self.post_form(
            "/cart/add",
            &[
                ("id", id),
                ("name", name),
                ("price", price),
                ("image", "/static/img/placeholder.jpg"),
                ("category", "mains"),
                ("quantity", quantity),
            ],
        )
        .await
    }

    /// Body of the cart page.
    ///
    /// # Panics
    ///
    /// Panics if the page cannot be read.
    pub async fn cart_page(&self) -> String {
        self.get("/cart")
            .await
            .text()
            .await
            .expect("Failed to read cart page")
    }
}
