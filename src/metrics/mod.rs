// Private module declaration
mod export;

use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use export::render;

// ============================================================================
// Metrics Module - Prometheus metrics for the update use cases
// ============================================================================
//
// Provides metrics for:
// - Update requests by style (patch, replacement) and outcome
// - Patch engine failures by error kind
// - Applied operations by kind and patch document sizes
//
// All metrics are registered with a private Registry and can be rendered in
// the Prometheus text format with `render`.
// ============================================================================

/// Central metrics registry for the house update service
pub struct Metrics {
    registry: Registry,

    // Use case outcomes
    pub house_updates: IntCounterVec,

    // Patch engine
    pub patch_engine_failures: IntCounterVec,
    pub patch_operations_applied: IntCounterVec,
    pub patch_document_size: Histogram,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let house_updates = IntCounterVec::new(
            Opts::new("house_updates_total", "Total house update requests by style and outcome"),
            &["style", "outcome"],
        )?;
        registry.register(Box::new(house_updates.clone()))?;

        let patch_engine_failures = IntCounterVec::new(
            Opts::new("patch_engine_failures_total", "Patch documents rejected by the engine"),
            &["kind"],
        )?;
        registry.register(Box::new(patch_engine_failures.clone()))?;

        let patch_operations_applied = IntCounterVec::new(
            Opts::new(
                "patch_operations_applied_total",
                "Operations of successfully applied patch documents",
            ),
            &["op"],
        )?;
        registry.register(Box::new(patch_operations_applied.clone()))?;

        let patch_document_size = Histogram::with_opts(
            HistogramOpts::new("patch_document_operations", "Operations per patch document")
                .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
        )?;
        registry.register(Box::new(patch_document_size.clone()))?;

        Ok(Self {
            registry,
            house_updates,
            patch_engine_failures,
            patch_operations_applied,
            patch_document_size,
        })
    }

    /// Get the Prometheus registry for exporting metrics
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record the outcome of an update request
    pub fn record_update(&self, style: &str, outcome: &str) {
        self.house_updates.with_label_values(&[style, outcome]).inc();
    }

    /// Helper to record an engine rejection
    pub fn record_engine_failure(&self, kind: &str) {
        self.patch_engine_failures.with_label_values(&[kind]).inc();
    }

    /// Helper to record the operations of an applied document
    pub fn record_applied_operations<'a>(&self, ops: impl IntoIterator<Item = &'a str>) {
        let mut count = 0u32;
        for op in ops {
            self.patch_operations_applied.with_label_values(&[op]).inc();
            count += 1;
        }
        self.patch_document_size.observe(f64::from(count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        metrics.record_update("patch", "applied");
        assert!(!metrics.registry.gather().is_empty());
    }

    #[test]
    fn test_record_update() {
        let metrics = Metrics::new().unwrap();
        metrics.record_update("patch", "applied");
        metrics.record_update("patch", "applied");
        metrics.record_update("replacement", "not_found");

        let gathered = metrics.registry.gather();
        let updates = gathered.iter().find(|m| m.name() == "house_updates_total").unwrap();
        assert_eq!(updates.metric.len(), 2); // Two label combinations
        assert_eq!(
            metrics.house_updates.with_label_values(&["patch", "applied"]).get(),
            2
        );
    }

    #[test]
    fn test_record_engine_failure() {
        let metrics = Metrics::new().unwrap();
        metrics.record_engine_failure("unresolvable");

        assert_eq!(
            metrics.patch_engine_failures.with_label_values(&["unresolvable"]).get(),
            1
        );
    }

    #[test]
    fn test_record_applied_operations() {
        let metrics = Metrics::new().unwrap();
        metrics.record_applied_operations(["replace", "add", "replace"]);

        assert_eq!(
            metrics.patch_operations_applied.with_label_values(&["replace"]).get(),
            2
        );
        assert_eq!(metrics.patch_document_size.get_sample_count(), 1);
        assert_eq!(metrics.patch_document_size.get_sample_sum(), 3.0);
    }
}
