//! The search orchestrator: one two-phase provider search, qualified.
//!
//! Phase one is a biased text search; phase two enriches the capped
//! candidate set with concurrent detail lookups, then hands the surviving
//! batch to the qualification engine. Detail-fetch completion order never
//! affects output order — the gather preserves text-search ranking.

use futures::future::join_all;
use thiserror::Error;

use leadscout_core::{qualify, QualifiedLead, MIN_REVIEW_COUNT};

use crate::client::PlacesClient;
use crate::error::PlacesError;

/// Cap on candidates enriched per search, bounding detail-request cost.
pub const MAX_DETAIL_LOOKUPS: usize = 20;

/// Result of one search: qualified leads plus the counts the caller needs
/// to explain an empty outcome.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Qualified leads in text-search ranking order.
    pub leads: Vec<QualifiedLead>,
    /// Candidates that survived detail enrichment, before qualification.
    pub raw_count: usize,
    /// Explanatory message when candidates were found but none qualified.
    pub notice: Option<String>,
}

#[derive(Debug, Error)]
pub enum SearchError {
    /// Empty or whitespace-only query, rejected before any provider call.
    #[error("search query must not be empty")]
    EmptyQuery,

    #[error(transparent)]
    Provider(#[from] PlacesError),
}

/// Run one lead search: text search, capped concurrent detail enrichment,
/// qualification.
///
/// Per-item detail failures are logged and dropped, never propagated; a
/// text-search failure aborts the whole search.
///
/// # Errors
///
/// Returns [`SearchError::EmptyQuery`] for a blank query and
/// [`SearchError::Provider`] when the text search itself fails.
pub async fn search_leads(
    client: &PlacesClient,
    query: &str,
) -> Result<SearchOutcome, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let summaries = client.text_search(query).await?;
    let candidate_count = summaries.len();
    let capped: Vec<_> = summaries.into_iter().take(MAX_DETAIL_LOOKUPS).collect();
    if capped.len() < candidate_count {
        tracing::debug!(
            candidates = candidate_count,
            cap = MAX_DETAIL_LOOKUPS,
            "capping candidate set before detail enrichment"
        );
    }

    // All detail lookups settle before filtering; join_all keeps the
    // futures in candidate order, so ranking survives the concurrency.
    let detail_results = join_all(
        capped
            .iter()
            .map(|summary| client.place_details(&summary.place_id)),
    )
    .await;

    let enriched: Vec<_> = detail_results
        .into_iter()
        .zip(&capped)
        .filter_map(|(result, summary)| match result {
            Ok(place) => Some(place),
            Err(err) => {
                tracing::warn!(
                    place_id = %summary.place_id,
                    error = %err,
                    "detail lookup failed; dropping candidate"
                );
                None
            }
        })
        .collect();

    let raw_count = enriched.len();
    let leads = qualify(enriched);
    tracing::info!(raw_count, qualified = leads.len(), query, "search complete");

    let notice = if leads.is_empty() && raw_count > 0 {
        Some(format!(
            "Found {raw_count} businesses, but none match the outreach criteria \
             (no website, WhatsApp-reachable phone, {MIN_REVIEW_COUNT}+ reviews)"
        ))
    } else {
        None
    };

    Ok(SearchOutcome {
        leads,
        raw_count,
        notice,
    })
}
