//! Row types and queries for the `pipeline_leads` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Input record for inserting a pipeline lead.
///
/// `email` and `web_url` are user-entered later through contact updates and
/// start empty; `status` starts at `New`; `created_at` is server-assigned.
#[derive(Debug, Clone)]
pub struct NewPipelineLead {
    pub place_id: String,
    pub business_name: String,
    pub category: String,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub lead_score: String,
    pub phone: String,
    pub whatsapp_phone: String,
    pub address: String,
    pub images: Vec<String>,
}

/// A row from the `pipeline_leads` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PipelineLeadRow {
    pub id: i64,
    pub public_id: Uuid,
    /// External place identifier; unique across the table.
    pub place_id: String,
    pub business_name: String,
    pub category: String,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub lead_score: String,
    pub phone: String,
    pub whatsapp_phone: String,
    pub address: String,
    pub email: String,
    pub web_url: String,
    pub images: Vec<String>,
    pub status: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// User-editable contact columns reachable through partial update.
///
/// A closed set: partial updates can only ever name these columns, never an
/// arbitrary caller-supplied field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Email,
    WebUrl,
}

impl ContactField {
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            ContactField::Email => "email",
            ContactField::WebUrl => "web_url",
        }
    }

    /// Apply the same patch locally that [`update_lead_contact`] applies
    /// remotely.
    pub fn apply(self, row: &mut PipelineLeadRow, value: &str) {
        match self {
            ContactField::Email => row.email = value.to_owned(),
            ContactField::WebUrl => row.web_url = value.to_owned(),
        }
    }
}

/// List all pipeline leads, newest first.
///
/// The store id breaks ties between rows created in the same timestamp
/// tick, keeping the order stable under concurrent creates.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_leads(pool: &PgPool) -> Result<Vec<PipelineLeadRow>, sqlx::Error> {
    sqlx::query_as::<_, PipelineLeadRow>(
        "SELECT id, public_id, place_id, business_name, category, rating, \
                review_count, lead_score, phone, whatsapp_phone, address, \
                email, web_url, images, status, notes, created_at \
         FROM pipeline_leads \
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}

/// Equality lookup on the natural key.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn lead_exists(pool: &PgPool, place_id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM pipeline_leads WHERE place_id = $1)")
        .bind(place_id)
        .fetch_one(pool)
        .await
}

/// Insert a new lead and return the stored row, including the
/// server-assigned `created_at` and generated identifiers.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the insert fails — including a unique
/// violation on `place_id` when a concurrent create won the race.
pub async fn insert_lead(
    pool: &PgPool,
    lead: &NewPipelineLead,
) -> Result<PipelineLeadRow, sqlx::Error> {
    sqlx::query_as::<_, PipelineLeadRow>(
        "INSERT INTO pipeline_leads \
             (place_id, business_name, category, rating, review_count, \
              lead_score, phone, whatsapp_phone, address, images) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING id, public_id, place_id, business_name, category, rating, \
                   review_count, lead_score, phone, whatsapp_phone, address, \
                   email, web_url, images, status, notes, created_at",
    )
    .bind(&lead.place_id)
    .bind(&lead.business_name)
    .bind(&lead.category)
    .bind(lead.rating)
    .bind(lead.review_count)
    .bind(&lead.lead_score)
    .bind(&lead.phone)
    .bind(&lead.whatsapp_phone)
    .bind(&lead.address)
    .bind(&lead.images)
    .fetch_one(pool)
    .await
}

/// Patch only the `status` column. Returns the number of rows affected.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn update_lead_status(pool: &PgPool, id: i64, status: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE pipeline_leads SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Patch only the `notes` column. Returns the number of rows affected.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn update_lead_notes(pool: &PgPool, id: i64, notes: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE pipeline_leads SET notes = $2 WHERE id = $1")
        .bind(id)
        .bind(notes)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Patch exactly one named contact column. Returns the number of rows
/// affected.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn update_lead_contact(
    pool: &PgPool,
    id: i64,
    field: ContactField,
    value: &str,
) -> Result<u64, sqlx::Error> {
    // Static statements per field; the column name never comes from input.
    let sql = match field {
        ContactField::Email => "UPDATE pipeline_leads SET email = $2 WHERE id = $1",
        ContactField::WebUrl => "UPDATE pipeline_leads SET web_url = $2 WHERE id = $1",
    };
    let result = sqlx::query(sql).bind(id).bind(value).execute(pool).await?;
    Ok(result.rows_affected())
}

/// Delete a lead by store id. Returns the number of rows affected.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn delete_lead(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM pipeline_leads WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
