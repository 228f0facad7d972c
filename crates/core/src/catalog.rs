//! The static product catalog.
//!
//! The storefront has no data layer: every product is compiled into the
//! binary and built once on first access.

use std::sync::LazyLock;

use crate::types::{Price, Product, ProductId};

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(build_catalog);

/// All products in catalog order.
#[must_use]
pub fn all() -> &'static [Product] {
    &PRODUCTS
}

/// Look up a product by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// The first `n` products, shown as "latest drops" on the home page.
#[must_use]
pub fn featured(n: usize) -> &'static [Product] {
    PRODUCTS.get(..n.min(PRODUCTS.len())).unwrap_or_default()
}

/// Up to `n` products other than `id`, in catalog order.
#[must_use]
pub fn related(id: &ProductId, n: usize) -> Vec<&'static Product> {
    PRODUCTS.iter().filter(|p| &p.id != id).take(n).collect()
}

/// Distinct category labels in catalog order.
#[must_use]
pub fn categories() -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for product in PRODUCTS.iter() {
        if !seen.contains(&product.category.as_str()) {
            seen.push(product.category.as_str());
        }
    }
    seen
}

/// Products in `category` (case-insensitive).
#[must_use]
pub fn in_category(category: &str) -> Vec<&'static Product> {
    PRODUCTS.iter().filter(|p| p.in_category(category)).collect()
}

struct Entry {
    id: &'static str,
    name: &'static str,
    price: u32,
    short_description: &'static str,
    description: &'static str,
    images: [u32; 3],
    rating: f32,
    reviews_count: u32,
    tags: &'static [&'static str],
    category: &'static str,
    materials: &'static str,
    shipping: &'static str,
}

impl From<&Entry> for Product {
    fn from(entry: &Entry) -> Self {
        Self {
            id: ProductId::new(entry.id),
            name: entry.name.to_string(),
            price: Price::whole(entry.price),
            description: entry.description.to_string(),
            short_description: entry.short_description.to_string(),
            images: entry
                .images
                .iter()
                .map(|photo| format!("https://picsum.photos/id/{photo}/800/1000"))
                .collect(),
            rating: entry.rating,
            reviews_count: entry.reviews_count,
            tags: entry.tags.iter().map(ToString::to_string).collect(),
            category: entry.category.to_string(),
            materials: entry.materials.to_string(),
            shipping: entry.shipping.to_string(),
        }
    }
}

fn build_catalog() -> Vec<Product> {
    ENTRIES.iter().map(Product::from).collect()
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "p1",
        name: "VINTAGE 1992 BOMBER",
        price: 245,
        short_description: "Authentic 90s aviator silhouette with distressed leather finish.",
        description: "This rare find from the early 90s features heavy-duty brass hardware and a quilted lining. The leather has developed a unique patina over decades of wear, making it a true one-of-a-kind archival piece. Perfect for layering in transitional weather.",
        images: [1005, 1006, 1009],
        rating: 4.8,
        reviews_count: 12,
        tags: &["#Vintage", "#90s", "#Leather", "#Outerwear"],
        category: "Jackets",
        materials: "100% Genuine Leather, Acetate Lining.",
        shipping: "Ships within 24 hours. Global express available.",
    },
    Entry {
        id: "p2",
        name: "ACID WASH HEAVY TEE",
        price: 65,
        short_description: "Boxy fit heavyweight cotton with artisanal acid wash treatment.",
        description: "Constructed from 280gsm French Terry cotton, this tee offers a structured drape that holds its shape. The acid wash process is done by hand in our studio, ensuring no two pieces are exactly alike.",
        images: [1012, 1011, 1013],
        rating: 4.9,
        reviews_count: 45,
        tags: &["#Streetwear", "#AcidWash", "#Essentials"],
        category: "Tees",
        materials: "100% Heavyweight Cotton.",
        shipping: "Standard 3-5 day shipping.",
    },
    Entry {
        id: "p3",
        name: "PARACHUTE CARGO PANTS",
        price: 180,
        short_description: "Tech-wear inspired wide leg trousers with multiple utility pockets.",
        description: "Redefining utility, these parachute pants feature adjustable toggle cuffs and an elasticated waistband for versatility. The nylon blend fabric is water-resistant and durable, suitable for the urban explorer.",
        images: [103, 104, 106],
        rating: 4.7,
        reviews_count: 28,
        tags: &["#Techwear", "#Utility", "#Pants"],
        category: "Pants",
        materials: "Nylon/Cotton Blend.",
        shipping: "Free shipping on orders over $150.",
    },
    Entry {
        id: "p4",
        name: "DISTRESSED DENIM TYPE-III",
        price: 210,
        short_description: "Hand-distressed Japanese selvedge denim jacket.",
        description: "A brutalist take on the classic trucker jacket. Sourced from Okayama, this 14oz selvedge denim has been rigorously distressed to mimic 10 years of hard wear. Features iron buttons and contrast stitching.",
        images: [342, 343, 344],
        rating: 5.0,
        reviews_count: 8,
        tags: &["#Denim", "#Japanese", "#Workwear"],
        category: "Jackets",
        materials: "100% Cotton Selvedge Denim.",
        shipping: "Ships within 48 hours.",
    },
    Entry {
        id: "p5",
        name: "ARCHIVE HOODIE - ONYX",
        price: 120,
        short_description: "Oversized silhouette with drop shoulders and raw hem.",
        description: "The ultimate everyday layer. This hoodie features a double-lined hood and a kangaroo pocket. The raw hem adds a grunge aesthetic, while the ultra-soft fleece interior ensures maximum comfort.",
        images: [338, 339, 340],
        rating: 4.6,
        reviews_count: 62,
        tags: &["#Streetwear", "#Hoodie", "#BlackOnBlack"],
        category: "Hoodies",
        materials: "80% Cotton, 20% Polyester.",
        shipping: "Standard shipping rates apply.",
    },
    Entry {
        id: "p6",
        name: "PATCHWORK FLANNEL",
        price: 155,
        short_description: "Reconstructed flannel shirt made from vintage fabrics.",
        description: "Sustainability meets style. Each shirt is reconstructed from upcycled vintage flannel shirts, creating a unique patchwork design. No two shirts have the same pattern layout.",
        images: [445, 446, 447],
        rating: 4.8,
        reviews_count: 15,
        tags: &["#Sustainable", "#Upcycled", "#Flannel"],
        category: "Shirts",
        materials: "Mixed Cotton Flannel Fabrics.",
        shipping: "Eco-friendly packaging included.",
    },
];
