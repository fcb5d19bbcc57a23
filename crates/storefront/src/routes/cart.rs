//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every successful mutation responds with an `HX-Trigger: cart-updated`
//! header; the count badge, cart panel and toast listen for it and re-fetch.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use fashion_forward_core::{CartLineItem, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::cart::CartStore;
use crate::error::Result;
use crate::state::AppState;
use crate::storage::KeyValueStorage;

/// HTMX event fired after the cart changes.
pub const CART_UPDATED_TRIGGER: &str = "cart-updated";

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: u32,
    pub name: String,
    pub img: String,
    pub price: String,
    pub quantity: u32,
    pub line_price: String,
    /// Quantity requested by the "-" button. May be 0; the store clamps it.
    pub decrement: i64,
    pub increment: i64,
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        let quantity = i64::from(line.quantity);
        Self {
            id: line.id().as_u32(),
            name: line.product.name.clone(),
            img: line.product.img.clone(),
            price: line.product.price.display(),
            quantity: line.quantity,
            line_price: line.line_total().display(),
            decrement: quantity - 1,
            increment: quantity + 1,
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl<S: KeyValueStorage> From<&CartStore<S>> for CartView {
    fn from(cart: &CartStore<S>) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: u32,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: u32,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: u32,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(
    ext = "html",
    source = r##"{% if cart.items.is_empty() %}
<div class="empty-cart">
  <div class="empty-cart-icon">🛍️</div>
  <p>Your cart is empty</p>
  <small>Add some items to get started!</small>
</div>
{% else %}
{% for item in cart.items %}
<div class="cart-item">
  <img src="{{ item.img }}" alt="{{ item.name }}" class="cart-item-image">
  <div class="cart-item-info">
    <div class="cart-item-name">{{ item.name }}</div>
    <div class="cart-item-price">{{ item.price }} × {{ item.quantity }} = {{ item.line_price }}</div>
    <div class="cart-item-qty">
      <form hx-post="/cart/update" hx-target="#cart-items">
        <input type="hidden" name="product_id" value="{{ item.id }}">
        <input type="hidden" name="quantity" value="{{ item.decrement }}">
        <button type="submit" aria-label="Decrease quantity">-</button>
      </form>
      <span>{{ item.quantity }}</span>
      <form hx-post="/cart/update" hx-target="#cart-items">
        <input type="hidden" name="product_id" value="{{ item.id }}">
        <input type="hidden" name="quantity" value="{{ item.increment }}">
        <button type="submit" aria-label="Increase quantity">+</button>
      </form>
    </div>
  </div>
  <form hx-post="/cart/remove" hx-target="#cart-items">
    <input type="hidden" name="product_id" value="{{ item.id }}">
    <button type="submit" class="cart-item-remove" title="Remove">×</button>
  </form>
</div>
{% endfor %}
{% endif %}
<div class="cart-total">Total: <span id="cart-total">{{ cart.total }}</span></div>"##
)]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(
    ext = "html",
    source = r#"<span id="cart-count" class="cart-count"{% if count == 0 %} style="display: none"{% endif %} hx-get="/cart/count" hx-trigger="cart-updated from:body" hx-swap="outerHTML">{{ count }}</span>"#
)]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Checkout result fragment template.
#[derive(Template, WebTemplate)]
#[template(
    ext = "html",
    source = r#"<div class="checkout-result">
{% if let Some(total) = total %}
  <p>Checkout initiated!</p>
  <p>Total: {{ total }}</p>
  <p>Thank you for shopping with Fashion Forward! 🎉</p>
{% else %}
  <p>Your cart is empty!</p>
{% endif %}
</div>"#
)]
pub struct CheckoutTemplate {
    /// `None` when there was nothing to check out.
    pub total: Option<String>,
}

fn cart_updated(body: impl IntoResponse) -> Response {
    (AppendHeaders([("HX-Trigger", CART_UPDATED_TRIGGER)]), body).into_response()
}

/// Display cart items and total.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<CartItemsTemplate> {
    let cart = state.cart()?;
    Ok(CartItemsTemplate {
        cart: CartView::from(&*cart),
    })
}

/// Add item to cart (HTMX).
///
/// Returns the count badge. Unknown products leave the cart and badge as they
/// were and fire no trigger.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let mut cart = state.cart()?;
    let added = cart.add_item(ProductId::new(form.product_id), form.quantity.unwrap_or(1));
    let badge = CartCountTemplate {
        count: cart.item_count(),
    };

    if added {
        Ok(cart_updated(badge))
    } else {
        Ok(badge.into_response())
    }
}

/// Update cart item quantity (HTMX).
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut cart = state.cart()?;
    cart.update_quantity(ProductId::new(form.product_id), form.quantity);
    Ok(cart_updated(CartItemsTemplate {
        cart: CartView::from(&*cart),
    }))
}

/// Remove item from cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = state.cart()?;
    cart.remove_item(ProductId::new(form.product_id));
    Ok(cart_updated(CartItemsTemplate {
        cart: CartView::from(&*cart),
    }))
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<CartCountTemplate> {
    let cart = state.cart()?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}

/// Check out: show the total and empty the cart.
///
/// There is no order processing; an empty cart just says so.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Response> {
    let mut cart = state.cart()?;
    if cart.item_count() == 0 {
        return Ok(CheckoutTemplate { total: None }.into_response());
    }

    let total = cart.total();
    cart.clear();
    tracing::info!(total = total.amount(), "Checkout completed, cart cleared");

    Ok(cart_updated(CheckoutTemplate {
        total: Some(total.display()),
    }))
}
