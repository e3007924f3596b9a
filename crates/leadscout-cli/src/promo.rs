//! Promotional image references keyed by lead category.
//!
//! The sales team keeps one outreach asset pack per supported category; an
//! unrecognized category falls back to the generic business pack.

const PROMO_BASE: &str =
    "https://drive.google.com/drive/folders/1CMZzEObCHPTl6vFZBcdM1BI_CVqq7K9t";

const PROMO_CATEGORIES: [&str; 4] = ["restaurant", "salon", "clinic", "gym"];

const DEFAULT_PROMO_KEY: &str = "business";

/// Derive the promotional image reference for a category.
#[must_use]
pub fn promo_image_for_category(category: &str) -> String {
    let normalized = category.trim().to_lowercase();
    let key = if PROMO_CATEGORIES.contains(&normalized.as_str()) {
        normalized.as_str()
    } else {
        DEFAULT_PROMO_KEY
    };
    format!("{PROMO_BASE}?resourcekey={key}")
}
