//! The pipeline coordinator: composes search output with the store adapter
//! and exposes the pipeline management commands.

use anyhow::Context;
use clap::Subcommand;

use leadscout_core::{AppConfig, LeadStatus, QualifiedLead};
use leadscout_db::{
    ContactField, CreateOutcome, NewPipelineLead, PipelineLeadRow, PipelineStore,
};
use leadscout_places::PlacesClient;

/// Category label used when a lead carries no category tags.
const DEFAULT_CATEGORY: &str = "Business";

#[derive(Debug, Subcommand)]
pub enum PipelineCommand {
    /// List saved leads, newest first.
    List,
    /// Set the sales status of a lead (New, Contacted, Interested, Closed, Lost).
    Status { id: i64, status: String },
    /// Replace the notes on a lead.
    Notes { id: i64, notes: String },
    /// Set user-entered contact fields on a lead.
    Contact {
        id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        website: Option<String>,
    },
    /// Remove a lead from the pipeline.
    Delete { id: i64 },
}

/// Connect to the store, run pending migrations, and load the mirror.
pub async fn open_store(config: &AppConfig) -> anyhow::Result<PipelineStore> {
    let pool_config = leadscout_db::PoolConfig::from_app_config(config);
    let pool = leadscout_db::connect_pool(&config.database_url, pool_config)
        .await
        .context("failed to connect to the pipeline store")?;
    leadscout_db::run_migrations(&pool).await?;
    let store = PipelineStore::connect(pool).await?;
    Ok(store)
}

pub async fn run(config: &AppConfig, command: PipelineCommand) -> anyhow::Result<()> {
    let mut store = open_store(config).await?;

    match command {
        PipelineCommand::List => print_pipeline(store.leads()),
        PipelineCommand::Status { id, status } => {
            let status: LeadStatus = status.parse()?;
            store.update_status(id, status).await?;
            println!("Lead #{id} status set to {status}");
        }
        PipelineCommand::Notes { id, notes } => {
            store.update_notes(id, &notes).await?;
            println!("Lead #{id} notes updated");
        }
        PipelineCommand::Contact { id, email, website } => {
            if email.is_none() && website.is_none() {
                anyhow::bail!("provide --email and/or --website");
            }
            if let Some(email) = email {
                store.update_contact(id, ContactField::Email, &email).await?;
                println!("Lead #{id} email updated");
            }
            if let Some(website) = website {
                store
                    .update_contact(id, ContactField::WebUrl, &website)
                    .await?;
                println!("Lead #{id} website updated");
            }
        }
        PipelineCommand::Delete { id } => {
            store.delete(id).await?;
            println!("Lead #{id} removed from the pipeline");
        }
    }
    Ok(())
}

/// Save one qualified lead through the dedup-checked add path and print the
/// outcome.
pub async fn add_lead(
    store: &mut PipelineStore,
    client: &PlacesClient,
    lead: &QualifiedLead,
) -> anyhow::Result<()> {
    let image_url = first_image_url(client, lead);
    match store.create(lead_to_new(lead, image_url)).await? {
        CreateOutcome::Created(row) => {
            println!("Added {} to the pipeline (lead #{})", row.business_name, row.id);
        }
        CreateOutcome::AlreadyExists => {
            println!("{} is already in the pipeline", lead.place.name);
        }
    }
    Ok(())
}

/// Map a qualified lead into the persisted shape.
///
/// The first category tag becomes the category, defaulting to a generic
/// label; `image_url` is the resolved first photo, when available.
pub fn lead_to_new(lead: &QualifiedLead, image_url: Option<String>) -> NewPipelineLead {
    let category = lead
        .place
        .categories
        .iter()
        .find(|c| !c.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    NewPipelineLead {
        place_id: lead.place.place_id.clone(),
        business_name: lead.place.name.clone(),
        category,
        rating: lead.place.rating,
        review_count: lead
            .place
            .review_count
            .map(|count| i32::try_from(count).unwrap_or(i32::MAX)),
        lead_score: lead.score.as_str().to_string(),
        phone: lead.phone().to_string(),
        whatsapp_phone: lead.whatsapp_phone.clone(),
        address: lead.place.address.clone().unwrap_or_default(),
        images: image_url.into_iter().collect(),
    }
}

/// Resolve the first photo reference into a displayable URL.
///
/// Missing references or a failed URL build degrade to no image.
fn first_image_url(client: &PlacesClient, lead: &QualifiedLead) -> Option<String> {
    let reference = lead.place.photo_references.first()?;
    client.photo_url(reference)
}

fn print_pipeline(leads: &[PipelineLeadRow]) {
    if leads.is_empty() {
        println!("Pipeline is empty — run `leadscout search` to find leads.");
        return;
    }

    // Status summary in pipeline display order.
    let summary: Vec<String> = LeadStatus::ALL
        .into_iter()
        .map(|status| {
            let count = leads
                .iter()
                .filter(|lead| lead.status == status.as_str())
                .count();
            format!("{status}: {count}")
        })
        .collect();
    println!("{}", summary.join("  "));
    println!();

    for lead in leads {
        println!(
            "#{} [{}] {} ({}) — {} — added {}",
            lead.id,
            lead.lead_score,
            lead.business_name,
            lead.category,
            lead.status,
            lead.created_at.format("%Y-%m-%d"),
        );
        println!("      phone {}  whatsapp {}", lead.phone, lead.whatsapp_phone);
        if !lead.notes.is_empty() {
            println!("      notes: {}", lead.notes);
        }
    }
}
