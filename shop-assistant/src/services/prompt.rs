//! Prompt builder - renders matched products into the user message sent to the model

use rust_decimal::Decimal;
use shared::models::{Catalog, Product};
use std::collections::BTreeSet;
use std::fmt;

/// At most this many matched products are described to the model
pub const MAX_PROMPT_PRODUCTS: usize = 5;

const PLACEHOLDER: &str = "N/A";

/// Instructions sent as the `system` message of every completion
pub const SYSTEM_PROMPT: &str = "\
You are a helpful product assistant. Your job is to help customers find and learn about products.
When answering questions:
- Be friendly and conversational
- Provide specific product details when available (price, rating, stock, warranty, shipping)
- If multiple products match, mention the most relevant ones
- If no products match, politely say so and suggest alternatives
- Format prices with $ symbol
- Mention ratings out of 5 stars
- Keep responses concise but informative";

/// Sorted unique category and brand names of a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
}

impl CatalogSummary {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut categories = BTreeSet::new();
        let mut brands = BTreeSet::new();

        for product in &catalog.products {
            if !product.category.is_empty() {
                categories.insert(product.category.clone());
            }
            if let Some(brand) = product.brand.as_ref().filter(|b| !b.is_empty()) {
                brands.insert(brand.clone());
            }
        }

        Self {
            categories: categories.into_iter().collect(),
            brands: brands.into_iter().collect(),
        }
    }
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Available categories: {}. Available brands: {}.",
            self.categories.join(", "),
            self.brands.join(", ")
        )
    }
}

/// Build the user message for `query`
///
/// With no matches the catalog summary is offered instead, so the model can
/// point the customer at something that exists.
pub fn build_prompt(query: &str, matches: &[&Product], summary: &CatalogSummary) -> String {
    if matches.is_empty() {
        return format!(
            "User question: {query}\n\n{summary}\n\n\
             No specific products found matching the query. Please provide a helpful \
             response suggesting they browse categories or ask about specific products."
        );
    }

    let products_info: String = matches
        .iter()
        .take(MAX_PROMPT_PRODUCTS)
        .map(|product| product_block(product))
        .collect();

    format!(
        "User question: {query}\n\nRelevant products found:\n{products_info}\n\n\
         Please provide a natural, conversational response about these products \
         based on the user's question."
    )
}

fn product_block(product: &Product) -> String {
    let mut block = format!(
        "\nProduct: {}\nDescription: {}\nCategory: {}\nPrice: ${}\nRating: {}/5 stars\n\
         Stock: {} units\nBrand: {}\nWarranty: {}\nShipping: {}\nAvailability: {}\n",
        product.title,
        product.description,
        product.category,
        format_price(product.price),
        format_rating(product.rating),
        product.stock,
        or_placeholder(&product.brand),
        or_placeholder(&product.warranty_information),
        or_placeholder(&product.shipping_information),
        or_placeholder(&product.availability_status),
    );

    if !product.reviews.is_empty() {
        block.push_str(&format!(
            "Reviews: {} customer reviews\n",
            product.reviews.len()
        ));
    }

    block
}

fn or_placeholder(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(PLACEHOLDER)
}

/// Whole amounts keep one decimal place (`10.0`); others print as-is (`2.5`)
fn format_price(price: Decimal) -> String {
    let price = price.normalize();
    if price.scale() == 0 {
        format!("{price}.0")
    } else {
        price.to_string()
    }
}

fn format_rating(rating: f64) -> String {
    if rating.is_finite() && rating.fract() == 0.0 {
        format!("{rating:.1}")
    } else {
        rating.to_string()
    }
}
