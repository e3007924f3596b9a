//! The `search` command: one provider search, printed and optionally saved.

use anyhow::Context;

use leadscout_core::AppConfig;
use leadscout_places::{search_leads, PlacesClient, SearchOutcome};

use crate::pipeline;
use crate::promo;

pub async fn run(
    config: &AppConfig,
    query: &str,
    save: &[String],
    save_all: bool,
) -> anyhow::Result<()> {
    // A missing API key is a setup problem; say so instead of a generic
    // search failure.
    let client = PlacesClient::from_config(config)
        .context("search is not available without a places API key")?;

    let outcome = search_leads(&client, query).await?;
    print_results(&outcome);

    if save_all || !save.is_empty() {
        let mut store = pipeline::open_store(config).await?;
        for lead in &outcome.leads {
            if save_all || save.contains(&lead.place.place_id) {
                pipeline::add_lead(&mut store, &client, lead).await?;
            }
        }
        for place_id in save {
            if !outcome.leads.iter().any(|l| &l.place.place_id == place_id) {
                println!("No qualified lead with place id {place_id} in this search");
            }
        }
    }

    Ok(())
}

fn print_results(outcome: &SearchOutcome) {
    if let Some(notice) = &outcome.notice {
        println!("{notice}");
        return;
    }
    if outcome.leads.is_empty() {
        println!("No businesses found.");
        return;
    }

    println!(
        "{} qualified leads ({} candidates checked):",
        outcome.leads.len(),
        outcome.raw_count
    );
    println!();

    for lead in &outcome.leads {
        let place = &lead.place;
        let category = place.categories.first().map_or("business", String::as_str);
        let rating = place
            .rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        let reviews = place.review_count.unwrap_or(0);

        println!(
            "[{}] {} — {}",
            lead.score,
            place.name,
            place.address.as_deref().unwrap_or("address unknown"),
        );
        println!(
            "      rating {rating} ({reviews} reviews)  phone {}  whatsapp {}",
            lead.phone(),
            lead.whatsapp_phone,
        );
        println!(
            "      place id {}  promo {}",
            place.place_id,
            promo::promo_image_for_category(category),
        );
    }
}
