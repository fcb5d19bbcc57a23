//! The compiled-in product catalog.
//!
//! The catalog is immutable: it is built once and only ever read. Lookups are
//! by [`ProductId`]; iteration preserves listing order.

use crate::types::{Price, Product, ProductId};

/// An immutable, ordered list of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Build a catalog from an ordered product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            product(
                1,
                "Classic White Tee",
                499,
                699,
                "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQFXkCP9qhmSYybPd5etFPW3CoeaCIaQoVWDDyuQd8I-1lFrmNFDaZfl9pYECwpXXZ3mRg&usqp=CAU",
                Some("Bestseller"),
                "Premium cotton blend with perfect fit",
            ),
            product(
                2,
                "Premium Black Classic",
                599,
                799,
                "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRi9PF-1u2Dw1w7iWBCD1u_OiTO-UwWpboNiA&s",
                Some("New"),
                "Sleek black design for any occasion",
            ),
            product(
                3,
                "Graphic Statement Tee",
                699,
                899,
                "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcSX6WFZ-KrnGy2rIDFmNNIJbsEz02H-LZIYwQ6_Wby7Ad1L2-s9BIHA9UbeMa_7eD3F7EA&usqp=CAU",
                Some("Hot"),
                "Bold graphics that make a statement",
            ),
            product(
                4,
                "Navy Blue Essential",
                549,
                749,
                "https://m.media-amazon.com/images/I/610qUTIcavL._SX569_.jpg",
                Some("Limited"),
                "Essential wardrobe piece in navy",
            ),
            product(
                5,
                "Charcoal Premium",
                649,
                849,
                "https://i.pinimg.com/736x/56/86/d1/5686d14ae33045a3a9d4984d4b3e323a.jpg",
                Some("Premium"),
                "Luxury feel with premium materials",
            ),
            product(
                6,
                "Urban Street Style",
                749,
                999,
                "https://img.thecdn.in/454640/SKU-0007_0-1753517120641.png?width=600&format=webp",
                Some("Trending"),
                "Street-inspired design for the bold",
            ),
        ])
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a ProductCatalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

fn product(
    id: u32,
    name: &str,
    price: u64,
    original_price: u64,
    img: &str,
    badge: Option<&str>,
    description: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::new(price),
        original_price: Price::new(original_price),
        img: img.to_string(),
        badge: badge.map(String::from),
        description: description.to_string(),
    }
}
