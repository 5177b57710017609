//! Navigation and confirmation ports used by the cart page.

use std::fmt;
use std::future::Future;

/// Destinations the cart page can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The cart page itself.
    Cart,
    /// Menu browsing, offered when the cart is empty.
    Menu,
    /// Product listing ("continue shopping").
    Products,
    /// Landing page after the checkout placeholder.
    CheckoutSuccess,
}

impl Route {
    /// URL path of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Cart => "/cart",
            Self::Menu => "/menu",
            Self::Products => "/products",
            Self::CheckoutSuccess => "/checkout-success",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Performs route transitions.
pub trait Navigator {
    /// Navigate to `route`.
    fn push(&mut self, route: Route);
}

/// Records every navigation, in order.
impl Navigator for Vec<Route> {
    fn push(&mut self, route: Route) {
        Self::push(self, route);
    }
}

/// Asks the user a yes/no question and waits for the answer.
pub trait Confirmation: Sync {
    /// Resolve to `true` when the user confirms.
    fn confirm(&self, prompt: &str) -> impl Future<Output = bool> + Send;
}

/// A decision that is already known, e.g. submitted with a form.
impl Confirmation for bool {
    async fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}
