use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use house_patch::config::ServiceConfig;
use house_patch::domain::house::{HouseService, HouseUpdate, UpdateOutcome};
use house_patch::metrics::{self, Metrics};
use house_patch::patch::{OperationRecord, PatchDocument};
use house_patch::store::seed::{HOMELESS_HOUSE_ID, SECOND_HOUSE_ID};
use house_patch::store::{seeded_houses, InMemoryHouseStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,house_patch=debug")),
        )
        .init();

    tracing::info!("🚀 Starting House Patch Demo");

    // === 1. Configuration and metrics ===
    let config = ServiceConfig::from_env()?;
    tracing::info!(
        max_patch_operations = config.max_patch_operations,
        "Loaded service configuration"
    );

    let metrics = Arc::new(Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 2. Seed the in-memory store ===
    let store = Arc::new(InMemoryHouseStore::with_houses(seeded_houses()?));
    let service = HouseService::new(store.clone(), config).with_metrics(metrics.clone());

    for item in service.list_houses().await? {
        tracing::info!(house_id = %item.id, name = %item.name, "Seeded house");
    }

    // === 3. Patch documents ===
    let requests = vec![
        (
            "replace street",
            SECOND_HOUSE_ID,
            PatchDocument::new(vec![OperationRecord::replace(
                "/address/street",
                "New street name",
            )]),
        ),
        (
            "append room",
            SECOND_HOUSE_ID,
            PatchDocument::from_json(
                r#"[{"op": "add", "path": "/rooms/-", "value": {"name": "Room1", "color": "Red", "area": 12.2}}]"#,
            )?,
        ),
        (
            "street of a house without address",
            HOMELESS_HOUSE_ID,
            PatchDocument::new(vec![OperationRecord::replace("/address/street", "Nowhere")]),
        ),
        (
            "guarded rename",
            SECOND_HOUSE_ID,
            PatchDocument::new(vec![
                OperationRecord::test("/color", "Red"),
                OperationRecord::replace("/name", "Renamed House"),
            ]),
        ),
        (
            "unknown house",
            uuid::Uuid::new_v4(),
            PatchDocument::new(vec![OperationRecord::remove("/area")]),
        ),
    ];

    for (label, id, patch) in requests {
        let outcome = UpdateOutcome::from_result(service.update_by_patch(Some(patch), id).await)?;
        tracing::info!(
            request = label,
            applied = outcome.is_applied(),
            outcome = %serde_json::to_string(&outcome)?,
            "Patch request handled"
        );
    }

    // === 4. Replacement document ===
    let outcome = UpdateOutcome::from_result(
        service
            .update_by_replacement(
                Some(HouseUpdate {
                    name: "Second House".to_string(),
                    color: "Blue".to_string(),
                    area: 30.0,
                }),
                SECOND_HOUSE_ID,
            )
            .await,
    )?;
    tracing::info!(outcome = %serde_json::to_string(&outcome)?, "Replacement request handled");

    let house = service.get_house_by_id(SECOND_HOUSE_ID).await?;
    tracing::info!(house = %serde_json::to_string_pretty(&house)?, "✅ Final state");
    tracing::info!(persisted = store.persist_count(), "Store writes");

    // === 5. Dump metrics ===
    println!("{}", metrics::render(metrics.registry())?);

    tracing::info!("🎉 Demo complete!");

    Ok(())
}
