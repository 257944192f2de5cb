//! Static product catalog.
//!
//! The catalog is read-only and loaded once at startup; product content
//! never changes at runtime. Filtering is a pure function over the loaded
//! list, recomputed per request.

use serde::Serialize;

use solstice_core::{ColorHex, ColorHexError, Price, ProductId};

/// Category wildcard that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub tagline: String,
    pub price: Price,
    pub original_price: Price,
    pub discount: String,
    pub default_color: ColorHex,
    pub colors: Vec<ColorHex>,
    pub badge: Option<String>,
    pub category: String,
    /// Path to a bundled GLB/GLTF model, when the product ships with one.
    pub model_path: Option<String>,
    /// Selectable sizes, for products that come in sizes.
    pub sizes: Option<Vec<String>>,
    pub features: Vec<String>,
    pub description: Option<String>,
}

/// The read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if any product color literal fails to parse; the
    /// shipped content is valid, so this only fires on a bad edit.
    pub fn load() -> Result<Self, ColorHexError> {
        Ok(Self {
            products: products()?,
        })
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up one product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Filter by category equality (or the `"all"` wildcard) AND a
    /// case-insensitive substring match of `query` against name or tagline.
    #[must_use]
    pub fn filter(&self, category: &str, query: &str) -> Vec<&Product> {
        let query = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| category == ALL_CATEGORIES || p.category == category)
            .filter(|p| {
                query.is_empty()
                    || p.name.to_lowercase().contains(&query)
                    || p.tagline.to_lowercase().contains(&query)
            })
            .collect()
    }
}

struct ProductSpec {
    id: &'static str,
    name: &'static str,
    tagline: &'static str,
    price: i64,
    original_price: i64,
    discount: &'static str,
    default_color: &'static str,
    colors: &'static [&'static str],
    badge: Option<&'static str>,
    category: &'static str,
    model_path: Option<&'static str>,
    sizes: Option<&'static [&'static str]>,
    features: &'static [&'static str],
    description: Option<&'static str>,
}

impl ProductSpec {
    fn build(&self) -> Result<Product, ColorHexError> {
        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name.to_string(),
            tagline: self.tagline.to_string(),
            price: Price::usd(self.price),
            original_price: Price::usd(self.original_price),
            discount: self.discount.to_string(),
            default_color: ColorHex::parse(self.default_color)?,
            colors: self
                .colors
                .iter()
                .map(|c| ColorHex::parse(c))
                .collect::<Result<_, _>>()?,
            badge: self.badge.map(str::to_string),
            category: self.category.to_string(),
            model_path: self.model_path.map(str::to_string),
            sizes: self
                .sizes
                .map(|sizes| sizes.iter().map(|&s| s.to_string()).collect()),
            features: self.features.iter().map(|&f| f.to_string()).collect(),
            description: self.description.map(str::to_string),
        })
    }
}

fn products() -> Result<Vec<Product>, ColorHexError> {
    CONTENT.iter().map(ProductSpec::build).collect()
}

const CONTENT: &[ProductSpec] = &[
    ProductSpec {
        id: "hypersonic-x1",
        name: "HyperSonic X1",
        tagline: "Premium Performance Sneaker",
        price: 299,
        original_price: 399,
        discount: "25% OFF",
        default_color: "#a855f7",
        colors: &["#a855f7", "#00d9ff", "#ff006e", "#fb923c", "#22c55e", "#6366f1"],
        badge: Some("New Release"),
        category: "Footwear",
        model_path: Some("/models/black_sneakers.glb"),
        sizes: Some(&["US 7", "US 8", "US 9", "US 10", "US 11", "US 12"]),
        features: &[
            "Advanced cushioning technology",
            "Breathable mesh upper",
            "Ultra-lightweight construction",
            "Premium materials",
        ],
        description: Some(
            "The HyperSonic X1 pairs a breathable mesh upper with responsive \
             cushioning for all-day wear, on the street or on the track.",
        ),
    },
    ProductSpec {
        id: "velocity-pro",
        name: "Velocity Pro",
        tagline: "Elite Racing Edition",
        price: 349,
        original_price: 449,
        discount: "22% OFF",
        default_color: "#00d9ff",
        colors: &["#00d9ff", "#a855f7", "#22c55e", "#fb923c"],
        badge: Some("Best Seller"),
        category: "Footwear",
        model_path: None,
        sizes: Some(&["US 7", "US 8", "US 9", "US 10", "US 11", "US 12"]),
        features: &[
            "Carbon fiber plate",
            "Energy return foam",
            "Aerodynamic design",
            "Competition ready",
        ],
        description: None,
    },
    ProductSpec {
        id: "urban-runner",
        name: "Urban Runner",
        tagline: "City Street Essential",
        price: 199,
        original_price: 259,
        discount: "23% OFF",
        default_color: "#ff006e",
        colors: &["#ff006e", "#6366f1", "#a855f7", "#00d9ff"],
        badge: None,
        category: "Footwear",
        model_path: None,
        sizes: Some(&["US 6", "US 7", "US 8", "US 9", "US 10", "US 11"]),
        features: &[
            "All-day comfort",
            "Durable rubber outsole",
            "Reflective details",
            "Versatile style",
        ],
        description: None,
    },
    ProductSpec {
        id: "sport-watch",
        name: "ChronoSport Pro",
        tagline: "Smart Fitness Tracker",
        price: 249,
        original_price: 329,
        discount: "24% OFF",
        default_color: "#6366f1",
        colors: &["#6366f1", "#a855f7", "#00d9ff", "#22c55e", "#fb923c"],
        badge: Some("Tech"),
        category: "Accessories",
        model_path: None,
        sizes: None,
        features: &[
            "Heart rate monitoring",
            "GPS tracking",
            "Water resistant 50m",
            "7-day battery life",
        ],
        description: None,
    },
    ProductSpec {
        id: "backpack-pro",
        name: "UrbanPack Elite",
        tagline: "Premium Travel Backpack",
        price: 179,
        original_price: 229,
        discount: "22% OFF",
        default_color: "#22c55e",
        colors: &["#22c55e", "#a855f7", "#ff006e", "#6366f1"],
        badge: None,
        category: "Accessories",
        model_path: None,
        sizes: None,
        features: &[
            "Laptop compartment up to 17\"",
            "Water-resistant material",
            "Anti-theft design",
            "USB charging port",
        ],
        description: None,
    },
    ProductSpec {
        id: "gaming-chair",
        name: "ErgoGamer X",
        tagline: "Professional Gaming Chair",
        price: 399,
        original_price: 549,
        discount: "27% OFF",
        default_color: "#a855f7",
        colors: &["#a855f7", "#ff006e", "#00d9ff", "#22c55e"],
        badge: Some("Hot"),
        category: "Furniture",
        model_path: None,
        sizes: None,
        features: &[
            "Ergonomic lumbar support",
            "Adjustable armrests",
            "Recline up to 180\u{b0}",
            "Premium leather finish",
        ],
        description: None,
    },
    ProductSpec {
        id: "desk-lamp",
        name: "LumiDesk Pro",
        tagline: "Smart LED Desk Lamp",
        price: 129,
        original_price: 179,
        discount: "28% OFF",
        default_color: "#00d9ff",
        colors: &["#00d9ff", "#6366f1", "#fb923c", "#a855f7"],
        badge: None,
        category: "Furniture",
        model_path: None,
        sizes: None,
        features: &[
            "Adjustable color temperature",
            "Touch controls",
            "USB charging port",
            "Memory function",
        ],
        description: None,
    },
    ProductSpec {
        id: "headphones-pro",
        name: "AudioMax Elite",
        tagline: "Noise Cancelling Headphones",
        price: 299,
        original_price: 399,
        discount: "25% OFF",
        default_color: "#fb923c",
        colors: &["#fb923c", "#a855f7", "#6366f1", "#00d9ff"],
        badge: Some("Premium"),
        category: "Electronics",
        model_path: None,
        sizes: None,
        features: &[
            "Active noise cancellation",
            "40-hour battery life",
            "Hi-Res audio certified",
            "Foldable design",
        ],
        description: Some(
            "AudioMax Elite shuts the world out with studio-grade active noise \
             cancellation and keeps playing for 40 hours on a charge.",
        ),
    },
    ProductSpec {
        id: "laptop-stand",
        name: "ElevateDesk",
        tagline: "Adjustable Laptop Stand",
        price: 89,
        original_price: 129,
        discount: "31% OFF",
        default_color: "#22c55e",
        colors: &["#22c55e", "#6366f1", "#a855f7"],
        badge: None,
        category: "Electronics",
        model_path: None,
        sizes: None,
        features: &[
            "Aluminum construction",
            "360\u{b0} rotation",
            "Cable management",
            "Fits laptops up to 17\"",
        ],
        description: None,
    },
    ProductSpec {
        id: "water-bottle",
        name: "HydroTech Pro",
        tagline: "Smart Water Bottle",
        price: 59,
        original_price: 79,
        discount: "25% OFF",
        default_color: "#00d9ff",
        colors: &["#00d9ff", "#22c55e", "#a855f7", "#ff006e"],
        badge: None,
        category: "Accessories",
        model_path: None,
        sizes: None,
        features: &[
            "Temperature display",
            "Hydration reminders",
            "BPA-free stainless steel",
            "Keeps cold 24h, hot 12h",
        ],
        description: None,
    },
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builds_full_catalog() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.all().len(), 10);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::load().unwrap();
        let product = catalog.get(&ProductId::new("hypersonic-x1")).unwrap();
        assert_eq!(product.name, "HyperSonic X1");
        assert_eq!(product.price, Price::usd(299));
        assert!(product.colors.contains(&product.default_color));
    }

    #[test]
    fn test_get_unknown_id() {
        let catalog = Catalog::load().unwrap();
        assert!(catalog.get(&ProductId::new("no-such-product")).is_none());
    }

    #[test]
    fn test_filter_category_and_query() {
        // "Footwear" + "x1" matches HyperSonic X1 but not ChronoSport Pro
        let catalog = Catalog::load().unwrap();
        let hits = catalog.filter("Footwear", "x1");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "HyperSonic X1");
    }

    #[test]
    fn test_filter_is_case_insensitive_on_query() {
        let catalog = Catalog::load().unwrap();
        let lower = catalog.filter(ALL_CATEGORIES, "hypersonic");
        let upper = catalog.filter(ALL_CATEGORIES, "HYPERSONIC");
        assert_eq!(lower.len(), 1);
        assert_eq!(lower.len(), upper.len());
    }

    #[test]
    fn test_filter_matches_tagline() {
        let catalog = Catalog::load().unwrap();
        let hits = catalog.filter(ALL_CATEGORIES, "racing");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Velocity Pro");
    }

    #[test]
    fn test_filter_all_wildcard() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.filter(ALL_CATEGORIES, "").len(), 10);
    }

    #[test]
    fn test_filter_category_is_exact() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.filter("Footwear", "").len(), 3);
        assert!(catalog.filter("footwear", "").is_empty());
    }

    #[test]
    fn test_sizes_only_on_sized_products() {
        let catalog = Catalog::load().unwrap();
        for product in catalog.all() {
            match product.category.as_str() {
                "Footwear" => {
                    let sizes = product.sizes.as_ref().unwrap();
                    assert!(!sizes.is_empty(), "{} has an empty size list", product.id);
                }
                _ => assert!(product.sizes.is_none(), "{} should not be sized", product.id),
            }
        }
    }

    #[test]
    fn test_every_default_color_is_selectable() {
        let catalog = Catalog::load().unwrap();
        for product in catalog.all() {
            assert!(
                product.colors.contains(&product.default_color),
                "{} default color missing from its color list",
                product.id
            );
        }
    }
}
