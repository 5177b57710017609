//! Cart route handlers.
//!
//! Every request mounts a fresh [`CartViewModel`] over the browser's
//! session, applies at most one mutation and renders the result. HTMX
//! requests get fragments back; plain form posts are redirected to the cart
//! page so the flow also works without JavaScript.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tiffin_core::view_model::CLEAR_CART_PROMPT;
use tiffin_core::{
    CartViewModel, IgnoreReason, LineItem, LineItemId, MAX_SUBTOTAL, Mutation, Price, Quantity,
    Route, parse_quantity_input,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::htmx::{CART_UPDATED_EVENT, HX_TRIGGER, HxRequest};
use crate::services::{ResponseNavigator, SessionCartStore};
use crate::state::AppState;

type SessionCart = CartViewModel<SessionCartStore>;

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            category: item.category.clone(),
            image: item.image_ref.clone(),
            quantity: item.quantity.get(),
            price: item.unit_price.display(),
            line_price: item.line_total().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub loading: bool,
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub delivery_fee: String,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Whether there is nothing to show in the table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&SessionCart> for CartView {
    fn from(model: &SessionCart) -> Self {
        let summary = model.summary();
        Self {
            loading: model.is_loading(),
            items: model.items().iter().map(CartItemView::from).collect(),
            subtotal: summary.subtotal.display(),
            delivery_fee: summary.delivery_fee.display(),
            total: summary.total.display(),
            item_count: summary.item_count,
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    pub quantity: Option<String>,
}

impl AddToCartForm {
    fn into_line_item(self) -> Result<LineItem> {
        if self.id.trim().is_empty() {
            return Err(AppError::BadRequest("missing item id".to_string()));
        }
        let unit_price = self
            .price
            .parse::<Price>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let quantity = match self.quantity.as_deref() {
            Some(text) => Quantity::new(parse_quantity_input(text))
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
            None => Quantity::ONE,
        };

        Ok(LineItem {
            id: LineItemId::new(self.id),
            name: self.name,
            unit_price,
            image_ref: self.image,
            quantity,
            category: self.category,
        })
    }
}

/// Which quantity control was used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityAction {
    /// The numeric input was edited.
    #[default]
    Set,
    /// The "+" button.
    Increment,
    /// The "-" button.
    Decrement,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: String,
    /// Input text for `set`. The buttons post the displayed quantity, which
    /// is only used when the line is no longer in the cart.
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub action: QuantityAction,
}

impl UpdateCartForm {
    /// Quantity the user asked for, given the line's stored quantity. May be
    /// below 1, which the view-model ignores.
    ///
    /// The buttons step from the stored quantity so a stale page cannot
    /// reset the line to whatever it displayed.
    fn requested_quantity(&self, stored: Option<Quantity>) -> i64 {
        let current = || {
            stored.map_or_else(
                || parse_quantity_input(&self.quantity),
                |quantity| i64::from(quantity.get()),
            )
        };
        match self.action {
            QuantityAction::Set => parse_quantity_input(&self.quantity),
            QuantityAction::Increment => current().saturating_add(1),
            QuantityAction::Decrement => current().saturating_sub(1),
        }
    }
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: String,
}

/// Answer to the clear-cart prompt.
#[derive(Debug, Deserialize)]
pub struct ClearCartForm {
    pub confirm: Option<String>,
}

impl ClearCartForm {
    /// Only an explicit "yes" confirms.
    fn confirmed(&self) -> bool {
        self.confirm
            .as_deref()
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("yes"))
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Clear-cart confirmation page.
#[derive(Template, WebTemplate)]
#[template(path = "cart/clear_confirm.html")]
pub struct ClearConfirmTemplate {
    pub prompt: &'static str,
}

/// Clear-cart confirmation fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/clear_confirm.html")]
pub struct ClearConfirmFragment {
    pub prompt: &'static str,
}

// =============================================================================
// Helpers
// =============================================================================

/// Mount the view-model for this request's session.
async fn mount(state: &AppState, session: Session) -> SessionCart {
    CartViewModel::mount(SessionCartStore::new(session), state.pricing()).await
}

/// Respond to a mutation: a fragment for HTMX, a redirect otherwise.
fn mutation_response(
    model: &SessionCart,
    HxRequest(htmx): HxRequest,
    mutation: Mutation,
) -> Response {
    if !htmx {
        return Redirect::to(Route::Cart.path()).into_response();
    }

    let fragment = CartItemsTemplate {
        cart: CartView::from(model),
    };
    if mutation.is_applied() {
        (AppendHeaders([(HX_TRIGGER, CART_UPDATED_EVENT)]), fragment).into_response()
    } else {
        fragment.into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let model = mount(&state, session).await;
    CartShowTemplate {
        cart: CartView::from(&model),
    }
}

/// Add item to cart.
///
/// Merges into an existing line when the id is already in the cart.
#[instrument(skip(state, session, form), fields(id = %form.id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let item = form.into_line_item()?;
    let mut model = mount(&state, session).await;
    let mutation = model.add_item(item).await;
    tracing::debug!(applied = mutation.is_applied(), "add to cart");
    match mutation {
        Mutation::Ignored(IgnoreReason::TotalTooLarge) => {
            return Err(AppError::BadRequest(format!(
                "cart total would exceed {MAX_SUBTOTAL}"
            )));
        }
        Mutation::Ignored(IgnoreReason::QuantityTooLarge) => {
            return Err(AppError::BadRequest("line quantity is too large".to_string()));
        }
        _ => {}
    }

    if !hx.0 {
        return Ok(Redirect::to(Route::Cart.path()).into_response());
    }
    let badge = CartCountTemplate {
        count: model.item_count(),
    };
    if mutation.is_applied() {
        Ok((AppendHeaders([(HX_TRIGGER, CART_UPDATED_EVENT)]), badge).into_response())
    } else {
        Ok(badge.into_response())
    }
}

/// Update cart item quantity.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let mut model = mount(&state, session).await;
    let id = LineItemId::new(form.line_id.as_str());
    let requested = form.requested_quantity(model.cart().quantity_of(&id));
    let mutation = model.update_quantity(&id, requested).await;
    mutation_response(&model, hx, mutation)
}

/// Remove item from cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let mut model = mount(&state, session).await;
    let mutation = model.remove_item(&LineItemId::new(form.line_id)).await;
    mutation_response(&model, hx, mutation)
}

/// Ask the user to confirm clearing the cart.
pub async fn clear_prompt(HxRequest(htmx): HxRequest) -> Response {
    if htmx {
        ClearConfirmFragment {
            prompt: CLEAR_CART_PROMPT,
        }
        .into_response()
    } else {
        ClearConfirmTemplate {
            prompt: CLEAR_CART_PROMPT,
        }
        .into_response()
    }
}

/// Apply the user's answer to the clear-cart prompt.
#[instrument(skip(state, session))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<ClearCartForm>,
) -> Response {
    let mut model = mount(&state, session).await;
    let mutation = model.clear_cart(&form.confirmed()).await;
    if mutation.is_applied() {
        add_breadcrumb("cart", "Cleared cart", None);
    }
    mutation_response(&model, hx, mutation)
}

/// Get cart count badge.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let model = mount(&state, session).await;
    CartCountTemplate {
        count: model.item_count(),
    }
}

/// Checkout placeholder: empty the cart and go to the success page.
#[instrument(skip(state, session))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    HxRequest(htmx): HxRequest,
) -> Response {
    let mut model = mount(&state, session).await;
    let count = model.item_count().to_string();
    let mut navigator = ResponseNavigator::new(htmx);

    if model.checkout(&mut navigator).await.is_applied() {
        add_breadcrumb("cart", "Checkout placeholder", Some(&[("units", count.as_str())]));
    }
    navigator.into_response_or(Route::Cart)
}
