//! Keyword matcher - selects catalog products relevant to a free-text query
//!
//! A product is an *exact* match when one of the query's word tokens is a whole
//! word of its title. Otherwise it is a *partial* match when a query token is a
//! substring of the title, category, description, any tag, or the brand.
//! Exact matches come first; within each group catalog order is kept.

use regex::Regex;
use shared::models::{Catalog, Product};
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Lowercase word tokens of `text`, in order of appearance
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Products matching `query`: exact title-word matches, then partial matches
pub fn search<'a>(query: &str, catalog: &'a Catalog) -> Vec<&'a Product> {
    let tokens = tokenize(query);
    let mut exact = Vec::new();
    let mut partial = Vec::new();

    if !tokens.is_empty() {
        for product in &catalog.products {
            let title = product.title.to_lowercase();
            let title_words: HashSet<&str> = WORD.find_iter(&title).map(|m| m.as_str()).collect();

            if tokens.iter().any(|t| title_words.contains(t.as_str())) {
                exact.push(product);
                continue;
            }

            if is_partial_match(&tokens, product, &title) {
                partial.push(product);
            }
        }
    }

    exact.extend(partial);

    tracing::debug!(
        query,
        matches = exact.len(),
        top = exact.first().map(|p| p.title.as_str()),
        "Product search"
    );

    exact
}

fn is_partial_match(tokens: &[String], product: &Product, title: &str) -> bool {
    let contains = |field: &str| tokens.iter().any(|t| field.contains(t.as_str()));

    contains(title)
        || contains(&product.category.to_lowercase())
        || contains(&product.description.to_lowercase())
        || product.tags.iter().any(|tag| contains(&tag.to_lowercase()))
        || contains(&product.brand.as_deref().unwrap_or_default().to_lowercase())
}
