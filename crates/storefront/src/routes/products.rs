//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use fashion_forward_core::{Product, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: String,
    /// Set only when the product is discounted.
    pub original_price: Option<String>,
    pub discount_percent: u64,
    pub img: String,
    pub badge: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_u32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            original_price: product
                .has_discount()
                .then(|| product.original_price.display()),
            discount_percent: product.discount_percent(),
            img: product.img.clone(),
            badge: product.badge.clone(),
        }
    }
}

/// Quick view fragment template.
#[derive(Template, WebTemplate)]
#[template(
    ext = "html",
    source = r#"<div class="quick-view" role="dialog" aria-label="{{ product.name }}">
  <h3>{{ product.name }}</h3>
  <p>{{ product.description }}</p>
  <p>Price: {{ product.price }}</p>
  {% if let Some(original) = product.original_price %}<p class="was">Was: {{ original }}</p>{% endif %}
</div>"#
)]
pub struct QuickViewTemplate {
    pub product: ProductView,
}

/// Display quick view fragment (for HTMX).
///
/// Unknown or malformed ids are client errors, not cart errors.
#[instrument(skip(state))]
pub async fn quick_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<QuickViewTemplate> {
    let id = id
        .parse::<ProductId>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let product = state
        .catalog()
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(QuickViewTemplate {
        product: ProductView::from(product),
    })
}
