//! The pipeline store adapter: remote writes with an in-memory mirror.
//!
//! Cache-aside: the mirror is a read-through copy of the `pipeline_leads`
//! table, repaired in full by [`PipelineStore::refresh`]. Every mutation is
//! remote-write-then-local-patch. The two steps are not transactional — a
//! crash between them leaves the mirror stale until the next refresh, which
//! is always safe because the store remains the source of truth. A failed
//! remote write leaves the mirror untouched.

use sqlx::PgPool;
use thiserror::Error;

use leadscout_core::LeadStatus;

use crate::leads::{self, ContactField, NewPipelineLead, PipelineLeadRow};

/// Failure of one store operation, with a fixed human-readable reason.
///
/// Callers decide whether to retry; the adapter never retries on its own.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to load leads from the pipeline store")]
    List(#[source] sqlx::Error),

    #[error("failed to add lead to the pipeline")]
    Create(#[source] sqlx::Error),

    #[error("failed to update lead status")]
    UpdateStatus(#[source] sqlx::Error),

    #[error("failed to update lead notes")]
    UpdateNotes(#[source] sqlx::Error),

    #[error("failed to update lead contact info")]
    UpdateContact(#[source] sqlx::Error),

    #[error("failed to delete lead")]
    Delete(#[source] sqlx::Error),

    #[error("lead {id} not found in the pipeline store")]
    NotFound { id: i64 },
}

/// Outcome of a dedup-checked create.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(PipelineLeadRow),
    /// A lead with the same place id is already tracked; nothing was
    /// written.
    AlreadyExists,
}

/// Owns the pool and the in-memory mirror of the pipeline.
pub struct PipelineStore {
    pool: PgPool,
    mirror: Vec<PipelineLeadRow>,
}

impl PipelineStore {
    /// A store with an empty mirror; call [`PipelineStore::refresh`] before
    /// reading.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            mirror: Vec::new(),
        }
    }

    /// Construct and perform the initial full scan.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::List`] if the scan fails.
    pub async fn connect(pool: PgPool) -> Result<Self, StoreError> {
        let mut store = Self::new(pool);
        store.refresh().await?;
        Ok(store)
    }

    /// Reconcile the mirror with the store: full scan, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::List`] if the scan fails; the previous mirror
    /// contents are kept in that case.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let rows = leads::list_leads(&self.pool)
            .await
            .map_err(StoreError::List)?;
        self.mirror = rows;
        Ok(())
    }

    /// The mirrored pipeline, newest first.
    #[must_use]
    pub fn leads(&self) -> &[PipelineLeadRow] {
        &self.mirror
    }

    /// Dedup-checked create: an existing lead with the same place id yields
    /// [`CreateOutcome::AlreadyExists`] without writing.
    ///
    /// The existence check and the insert are not atomic; the unique index
    /// on `place_id` backstops the race, and a unique violation maps to the
    /// same duplicate outcome.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Create`] if the lookup or insert fails for any
    /// other reason; the mirror is left untouched.
    pub async fn create(&mut self, new: NewPipelineLead) -> Result<CreateOutcome, StoreError> {
        let exists = leads::lead_exists(&self.pool, &new.place_id)
            .await
            .map_err(StoreError::Create)?;
        if exists {
            return Ok(CreateOutcome::AlreadyExists);
        }

        match leads::insert_lead(&self.pool, &new).await {
            Ok(row) => {
                tracing::info!(place_id = %row.place_id, id = row.id, "lead added to pipeline");
                self.mirror.insert(0, row.clone());
                Ok(CreateOutcome::Created(row))
            }
            Err(err) if is_unique_violation(&err) => Ok(CreateOutcome::AlreadyExists),
            Err(err) => Err(StoreError::Create(err)),
        }
    }

    /// Patch the `status` column remotely, then mirror the patch locally.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no row matched, or
    /// [`StoreError::UpdateStatus`] on a write failure; the mirror is
    /// untouched in both cases.
    pub async fn update_status(&mut self, id: i64, status: LeadStatus) -> Result<(), StoreError> {
        let affected = leads::update_lead_status(&self.pool, id, status.as_str())
            .await
            .map_err(StoreError::UpdateStatus)?;
        if affected == 0 {
            return Err(StoreError::NotFound { id });
        }
        patch_lead(&mut self.mirror, id, |row| {
            row.status = status.as_str().to_owned();
        });
        Ok(())
    }

    /// Patch the `notes` column remotely, then mirror the patch locally.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no row matched, or
    /// [`StoreError::UpdateNotes`] on a write failure.
    pub async fn update_notes(&mut self, id: i64, notes: &str) -> Result<(), StoreError> {
        let affected = leads::update_lead_notes(&self.pool, id, notes)
            .await
            .map_err(StoreError::UpdateNotes)?;
        if affected == 0 {
            return Err(StoreError::NotFound { id });
        }
        patch_lead(&mut self.mirror, id, |row| {
            row.notes = notes.to_owned();
        });
        Ok(())
    }

    /// Patch one named contact column remotely, then mirror the patch
    /// locally.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no row matched, or
    /// [`StoreError::UpdateContact`] on a write failure.
    pub async fn update_contact(
        &mut self,
        id: i64,
        field: ContactField,
        value: &str,
    ) -> Result<(), StoreError> {
        let affected = leads::update_lead_contact(&self.pool, id, field, value)
            .await
            .map_err(StoreError::UpdateContact)?;
        if affected == 0 {
            return Err(StoreError::NotFound { id });
        }
        patch_lead(&mut self.mirror, id, |row| field.apply(row, value));
        Ok(())
    }

    /// Delete remotely, then drop the row from the mirror.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no row matched, or
    /// [`StoreError::Delete`] on a write failure.
    pub async fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let affected = leads::delete_lead(&self.pool, id)
            .await
            .map_err(StoreError::Delete)?;
        if affected == 0 {
            return Err(StoreError::NotFound { id });
        }
        remove_lead(&mut self.mirror, id);
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Apply a patch to the mirror row with the given store id, if present.
///
/// A missing row is not an error here: the mirror may legitimately lag the
/// store until the next refresh.
fn patch_lead(mirror: &mut [PipelineLeadRow], id: i64, patch: impl FnOnce(&mut PipelineLeadRow)) {
    if let Some(row) = mirror.iter_mut().find(|row| row.id == id) {
        patch(row);
    }
}

fn remove_lead(mirror: &mut Vec<PipelineLeadRow>, id: i64) {
    mirror.retain(|row| row.id != id);
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn sample_row(id: i64, place_id: &str) -> PipelineLeadRow {
        PipelineLeadRow {
            id,
            public_id: Uuid::new_v4(),
            place_id: place_id.to_string(),
            business_name: format!("Business {place_id}"),
            category: "restaurant".to_string(),
            rating: Some(4.2),
            review_count: Some(25),
            lead_score: "Warm".to_string(),
            phone: "077 123 4567".to_string(),
            whatsapp_phone: "+94771234567".to_string(),
            address: "Colombo".to_string(),
            email: String::new(),
            web_url: String::new(),
            images: vec![],
            status: "New".to_string(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn patch_lead_touches_only_the_matching_row() {
        let mut mirror = vec![sample_row(1, "a"), sample_row(2, "b")];
        patch_lead(&mut mirror, 2, |row| row.status = "Contacted".to_string());

        assert_eq!(mirror[0].status, "New");
        assert_eq!(mirror[1].status, "Contacted");
    }

    #[test]
    fn patch_lead_ignores_unknown_ids() {
        let mut mirror = vec![sample_row(1, "a")];
        patch_lead(&mut mirror, 99, |row| row.status = "Lost".to_string());

        assert_eq!(mirror[0].status, "New");
    }

    #[test]
    fn remove_lead_drops_only_the_matching_row() {
        let mut mirror = vec![sample_row(1, "a"), sample_row(2, "b")];
        remove_lead(&mut mirror, 1);

        assert_eq!(mirror.len(), 1);
        assert_eq!(mirror[0].id, 2);
    }
}
