//! Catalog listing and product details.

use std::fmt::Write as _;

use fashion_forward_core::{Product, ProductCatalog, ProductId};

/// One line per product: id, name, price and badge.
pub fn list() -> String {
    render_list(&ProductCatalog::builtin())
}

/// Details for a single product.
///
/// # Errors
///
/// Returns an error if the catalog has no product with this id.
pub fn quick_view(id: ProductId) -> Result<String, String> {
    ProductCatalog::builtin()
        .get(id)
        .map(render_details)
        .ok_or_else(|| format!("Unknown product: {id}"))
}

fn render_list(catalog: &ProductCatalog) -> String {
    let mut out = String::new();
    for product in catalog {
        let _ = write!(
            out,
            "{:>3}  {:<24} {:>7}",
            product.id,
            product.name,
            product.price.display()
        );
        if let Some(badge) = &product.badge {
            let _ = write!(out, "  [{badge}]");
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

fn render_details(product: &Product) -> String {
    let mut out = format!("{}\n{}\n", product.name, product.description);
    let _ = write!(out, "Price: {}", product.price.display());
    if product.has_discount() {
        let _ = write!(
            out,
            " (was {}, save {}%)",
            product.original_price.display(),
            product.discount_percent()
        );
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_has_a_line_per_product() {
        let listing = list();

        assert_eq!(listing.lines().count(), 6);
        assert!(listing.lines().next().unwrap().contains("Classic White Tee"));
        assert!(listing.contains("[Bestseller]"));
        assert!(listing.contains("₹749"));
    }

    #[test]
    fn test_quick_view_shows_discount() {
        let details = quick_view(ProductId::new(1)).unwrap();

        assert!(details.starts_with("Classic White Tee\n"));
        assert!(details.contains("Price: ₹499 (was ₹699, save 29%)"));
    }

    #[test]
    fn test_quick_view_unknown_product() {
        let err = quick_view(ProductId::new(42)).unwrap_err();
        assert_eq!(err, "Unknown product: 42");
    }
}
