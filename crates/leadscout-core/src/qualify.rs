//! The qualification engine: filter and score a batch of enriched places.
//!
//! Pure functions, no I/O. A place qualifies as an outreach lead when it
//! looks like an established business (enough reviews), has no web presence
//! of its own, can be reached over WhatsApp, and is currently operating.

use crate::lead::{LeadScore, QualifiedLead};
use crate::place::Place;

/// Minimum review count for a business to count as established.
pub const MIN_REVIEW_COUNT: u32 = 10;

/// Minimum digit count for a phone number to be dialable over WhatsApp.
const MIN_PHONE_DIGITS: usize = 9;

/// Filter a batch of places down to qualified leads, preserving input order.
///
/// Every returned lead satisfies all four predicates: review count at or
/// above [`MIN_REVIEW_COUNT`], no usable website, a WhatsApp-dialable phone,
/// and an operational business status. Missing rating or review count is
/// treated as zero, never as an error.
#[must_use]
pub fn qualify(places: Vec<Place>) -> Vec<QualifiedLead> {
    places.into_iter().filter_map(qualify_place).collect()
}

fn qualify_place(place: Place) -> Option<QualifiedLead> {
    if place.review_count.unwrap_or(0) < MIN_REVIEW_COUNT {
        return None;
    }
    if has_website(&place) {
        return None;
    }
    if !place.is_operational() {
        return None;
    }
    let whatsapp_phone = whatsapp_number(
        place.international_phone.as_deref(),
        place.national_phone.as_deref(),
    )?;

    let score = score(place.rating.unwrap_or(0.0), place.review_count.unwrap_or(0));
    Some(QualifiedLead {
        place,
        score,
        whatsapp_phone,
    })
}

fn has_website(place: &Place) -> bool {
    place
        .website
        .as_deref()
        .is_some_and(|site| !site.trim().is_empty())
}

/// Score a lead from its rating and review volume.
///
/// Simple threshold ladder: strong rating with real volume is Hot, a decent
/// rating at the qualification floor is Warm, everything else is Cold.
#[must_use]
pub fn score(rating: f64, review_count: u32) -> LeadScore {
    if rating >= 4.5 && review_count >= 15 {
        LeadScore::Hot
    } else if rating >= 4.0 && review_count >= MIN_REVIEW_COUNT {
        LeadScore::Warm
    } else {
        LeadScore::Cold
    }
}

/// Derive a WhatsApp-dialable number from the provider phone fields.
///
/// Prefers the international number because it carries the country code;
/// normalization keeps digits only. Returns `None` when neither field
/// yields at least [`MIN_PHONE_DIGITS`] digits.
#[must_use]
pub fn whatsapp_number(international: Option<&str>, national: Option<&str>) -> Option<String> {
    if let Some(number) = international {
        let digits = digits_of(number);
        if digits.len() >= MIN_PHONE_DIGITS {
            return Some(format!("+{digits}"));
        }
    }
    if let Some(number) = national {
        let digits = digits_of(number);
        if digits.len() >= MIN_PHONE_DIGITS {
            return Some(digits);
        }
    }
    None
}

fn digits_of(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
#[path = "qualify_test.rs"]
mod tests;
