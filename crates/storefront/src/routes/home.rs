//! Home page route handler.
//!
//! The home page is the whole storefront: hero, product grid, cart panel and
//! toast. Everything after first paint is HTMX fragments from the cart and
//! product routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use super::products::ProductView;
use crate::error::Result;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(
    ext = "html",
    source = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Fashion Forward - Premium T-Shirts</title>
  <script src="https://unpkg.com/htmx.org@2.0.4"></script>
  <style>
    body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; }
    header { display: flex; justify-content: space-between; align-items: center; padding: 1rem 2rem; }
    nav a { margin-right: 1rem; color: inherit; text-decoration: none; }
    .product-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 1.5rem; padding: 2rem; }
    .product-card { border: 1px solid #e5e7eb; border-radius: 12px; overflow: hidden; }
    .product-image-wrapper { position: relative; }
    .product-image { width: 100%; aspect-ratio: 5 / 6; object-fit: cover; background: #f0f0f0; }
    .product-badge { position: absolute; top: 15px; right: 15px; background: #111827; color: #fff; padding: 2px 10px; border-radius: 999px; }
    .discount-badge { right: auto; left: 15px; background: #10b981; }
    .product-info { padding: 1rem; }
    .was { color: #9ca3af; text-decoration: line-through; }
    .cart-count { background: #ef4444; color: #fff; border-radius: 999px; padding: 0 8px; }
    .cart-panel { position: fixed; top: 0; right: 0; width: 360px; height: 100%; background: #fff; box-shadow: -4px 0 16px rgba(0, 0, 0, .1); padding: 1rem; overflow-y: auto; }
    .cart-item { display: flex; gap: 10px; margin-bottom: 1rem; }
    .cart-item-image { width: 64px; height: 64px; object-fit: cover; }
    .cart-item-qty { display: flex; gap: 10px; align-items: center; }
    .cart-item-qty form, .cart-item form { display: inline; }
    .toast { position: fixed; bottom: 2rem; left: 50%; transform: translateX(-50%); }
    .toast-message { background: #111827; color: #fff; padding: .75rem 1.5rem; border-radius: 8px; }
  </style>
</head>
<body>
  <header>
    <h1>Fashion Forward</h1>
    <nav>
      <a href="#home">Home</a>
      <a href="#products">Shop</a>
      <button type="button" onclick="document.getElementById('cart').hidden = false" aria-label="Open cart">
        Cart
        <span id="cart-count" class="cart-count"{% if count == 0 %} style="display: none"{% endif %} hx-get="/cart/count" hx-trigger="cart-updated from:body" hx-swap="outerHTML">{{ count }}</span>
      </button>
    </nav>
  </header>

  <section id="home">
    <h2>Premium T-Shirts for Every Style</h2>
  </section>

  <section id="products">
    <div id="product-list" class="product-grid">
      {% for product in products %}
      <div class="product-card">
        <div class="product-image-wrapper">
          {% if let Some(badge) = product.badge %}<span class="product-badge">{{ badge }}</span>{% endif %}
          {% if product.discount_percent > 0 %}<span class="product-badge discount-badge">-{{ product.discount_percent }}%</span>{% endif %}
          <img src="{{ product.img }}" alt="{{ product.name }}" class="product-image" loading="lazy">
          <button type="button" class="quick-view-btn" hx-get="/products/{{ product.id }}/quick-view" hx-target="#quick-view">Quick View</button>
        </div>
        <div class="product-info">
          <h3 class="product-name">{{ product.name }}</h3>
          <div>
            <span class="product-price">{{ product.price }}</span>
            {% if let Some(original) = product.original_price %}<span class="was">{{ original }}</span>{% endif %}
          </div>
          <p>{{ product.description }}</p>
          <form hx-post="/cart/add" hx-target="#cart-count" hx-swap="outerHTML">
            <input type="hidden" name="product_id" value="{{ product.id }}">
            <button type="submit" class="add-to-cart-btn">Add to Cart</button>
          </form>
        </div>
      </div>
      {% endfor %}
    </div>
    <div id="quick-view"></div>
  </section>

  <aside id="cart" class="cart-panel" hidden>
    <button type="button" onclick="document.getElementById('cart').hidden = true" aria-label="Close cart">×</button>
    <h2>Your Cart</h2>
    <div id="cart-items" hx-get="/cart" hx-trigger="load, cart-updated from:body"></div>
    <form hx-post="/checkout" hx-target="#checkout-result">
      <button type="submit">Checkout</button>
    </form>
    <div id="checkout-result"></div>
  </aside>

  <div id="toast" class="toast" hx-get="/toast" hx-trigger="cart-updated from:body, every 1s"></div>
</body>
</html>"##
)]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub count: u64,
}

/// Display the storefront.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<HomeTemplate> {
    let products = state.catalog().iter().map(ProductView::from).collect();
    let count = state.cart()?.item_count();

    Ok(HomeTemplate { products, count })
}
