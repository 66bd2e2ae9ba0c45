use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::metrics::Metrics;
use crate::patch::{OperationKind, PatchDocument, PatchEngine, PatchError, PatchErrorKind};
use crate::store::HouseStore;

use super::aggregate::House;
use super::commands::{HouseListItem, HouseRequest, HouseUpdate};
use super::projection::HousePatch;

// ============================================================================
// House Service - Partial Update Orchestrator
// ============================================================================
//
// Orchestrates: request → load → project → PatchEngine → merge → persist
//
// Malformed requests and unknown ids are rejected before anything is touched.
// A patch the engine rejects is never merged, so the stored house only ever
// sees fully applied documents.
//
// ============================================================================

/// Why an update use case did not complete
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("There is no house with id {0}")]
    NotFound(Uuid),

    #[error("Patch could not be applied: {0}")]
    SemanticallyInvalid(#[from] PatchError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl UpdateError {
    /// Label used in metrics and logs
    pub fn outcome(&self) -> &'static str {
        match self {
            UpdateError::Malformed(_) => "malformed",
            UpdateError::NotFound(_) => "not_found",
            UpdateError::SemanticallyInvalid(_) => "semantically_invalid",
            UpdateError::Unexpected(_) => "unexpected",
        }
    }
}

/// Outward result of an update request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum UpdateOutcome {
    Applied,
    Malformed {
        reason: String,
    },
    NotFound {
        id: Uuid,
    },
    SemanticallyInvalid {
        kind: PatchErrorKind,
        index: usize,
        path: String,
        message: String,
    },
}

impl UpdateOutcome {
    /// Map a use case result to its outcome.
    ///
    /// Unexpected failures are not an outcome and are handed back unchanged.
    pub fn from_result(result: Result<(), UpdateError>) -> anyhow::Result<Self> {
        match result {
            Ok(()) => Ok(UpdateOutcome::Applied),
            Err(UpdateError::Malformed(reason)) => Ok(UpdateOutcome::Malformed { reason }),
            Err(UpdateError::NotFound(id)) => Ok(UpdateOutcome::NotFound { id }),
            Err(UpdateError::SemanticallyInvalid(error)) => Ok(UpdateOutcome::SemanticallyInvalid {
                kind: error.kind,
                index: error.index,
                path: error.path.clone(),
                message: error.source.to_string(),
            }),
            Err(UpdateError::Unexpected(error)) => Err(error),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied)
    }
}

pub struct HouseService<S: HouseStore> {
    store: Arc<S>,
    engine: PatchEngine,
    config: ServiceConfig,
    metrics: Option<Arc<Metrics>>,
}

impl<S: HouseStore> HouseService<S> {
    pub fn new(store: Arc<S>, config: ServiceConfig) -> Self {
        Self {
            store,
            engine: PatchEngine::new(),
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    // ========================================================================
    // Update Use Cases
    // ========================================================================

    /// Apply a patch document to the house with `id`
    pub async fn update_by_patch(
        &self,
        patch: Option<PatchDocument>,
        id: Uuid,
    ) -> Result<(), UpdateError> {
        let result = self.apply_patch(patch, id).await;
        self.record("patch", id, &result);
        result
    }

    /// Overwrite name, color and area of the house with `id`
    pub async fn update_by_replacement(
        &self,
        update: Option<HouseUpdate>,
        id: Uuid,
    ) -> Result<(), UpdateError> {
        let result = self.apply_replacement(update, id).await;
        self.record("replacement", id, &result);
        result
    }

    async fn apply_patch(&self, patch: Option<PatchDocument>, id: Uuid) -> Result<(), UpdateError> {
        ensure_id(id)?;
        let patch = patch.ok_or_else(|| UpdateError::Malformed("patch document is missing".into()))?;

        if patch.len() > self.config.max_patch_operations {
            return Err(UpdateError::Malformed(format!(
                "patch has {} operations, at most {} are accepted",
                patch.len(),
                self.config.max_patch_operations
            )));
        }

        let mut house = self.load(id).await?;
        let projection = HousePatch::from(&house);

        let patched = self
            .engine
            .apply(patch.operations(), &projection)
            .inspect_err(|error| {
                if let Some(metrics) = &self.metrics {
                    metrics.record_engine_failure(error.kind.as_str());
                }
            })?;

        patched.merge_into(&mut house);
        self.store.persist(&house).await?;

        if let Some(metrics) = &self.metrics {
            // Every kind parsed during apply; label by the canonical name
            let kinds = patch
                .operations()
                .iter()
                .filter_map(|op| op.op.parse::<OperationKind>().ok())
                .map(|kind| kind.as_str());
            metrics.record_applied_operations(kinds);
        }

        tracing::info!(
            house_id = %id,
            operations = patch.len(),
            "Applied patch to house"
        );
        Ok(())
    }

    async fn apply_replacement(
        &self,
        update: Option<HouseUpdate>,
        id: Uuid,
    ) -> Result<(), UpdateError> {
        ensure_id(id)?;
        let update =
            update.ok_or_else(|| UpdateError::Malformed("replacement document is missing".into()))?;

        let mut house = self.load(id).await?;
        house.apply_update(&update);
        self.store.persist(&house).await?;

        tracing::info!(house_id = %id, "Replaced house fields");
        Ok(())
    }

    // ========================================================================
    // Read, Create and Remove Use Cases
    // ========================================================================

    pub async fn get_house_by_id(&self, id: Uuid) -> Result<House, UpdateError> {
        ensure_id(id)?;
        self.load(id).await
    }

    pub async fn list_houses(&self) -> Result<Vec<HouseListItem>, UpdateError> {
        let houses = self.store.find_all().await?;
        Ok(houses.iter().map(HouseListItem::from).collect())
    }

    pub async fn create_house(&self, request: Option<HouseRequest>) -> Result<House, UpdateError> {
        let request =
            request.ok_or_else(|| UpdateError::Malformed("creation document is missing".into()))?;

        let house = House::create(
            Uuid::new_v4(),
            request.name,
            request.color,
            request.area,
            None,
            Vec::new(),
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected house creation");
            UpdateError::Malformed(e.to_string())
        })?;

        self.store.insert(&house).await?;

        tracing::info!(house_id = %house.id, "Created house");
        Ok(house)
    }

    pub async fn remove_house_by_id(&self, id: Uuid) -> Result<(), UpdateError> {
        ensure_id(id)?;

        if !self.store.remove(id).await? {
            tracing::warn!(house_id = %id, "Cannot remove unknown house");
            return Err(UpdateError::NotFound(id));
        }

        tracing::info!(house_id = %id, "Removed house");
        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn load(&self, id: Uuid) -> Result<House, UpdateError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(UpdateError::NotFound(id))
    }

    fn record(&self, style: &'static str, id: Uuid, result: &Result<(), UpdateError>) {
        match result {
            Ok(()) => {}
            Err(UpdateError::SemanticallyInvalid(error)) => {
                tracing::warn!(
                    house_id = %id,
                    style = style,
                    kind = %error.kind,
                    path = %error.path,
                    index = error.index,
                    error = %error.source,
                    "Rejected invalid patch"
                );
            }
            Err(UpdateError::Unexpected(error)) => {
                tracing::error!(house_id = %id, style = style, error = %error, "Update failed");
            }
            Err(error) => {
                tracing::warn!(house_id = %id, style = style, error = %error, "Rejected update");
            }
        }

        if let Some(metrics) = &self.metrics {
            let outcome = result.as_ref().map_or_else(UpdateError::outcome, |_| "applied");
            metrics.record_update(style, outcome);
        }
    }
}

fn ensure_id(id: Uuid) -> Result<(), UpdateError> {
    if id.is_nil() {
        return Err(UpdateError::Malformed("house id must not be nil".into()));
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
