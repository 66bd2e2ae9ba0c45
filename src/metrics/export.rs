use prometheus::{Encoder, Registry, TextEncoder};

/// Render every metric of `registry` in the Prometheus text format
pub fn render(registry: &Registry) -> anyhow::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();

    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;

    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metrics;

    #[test]
    fn test_render_text_format() {
        let metrics = Metrics::new().unwrap();
        metrics.record_engine_failure("type-mismatch");

        let text = render(metrics.registry()).unwrap();
        assert!(text.contains("# TYPE patch_engine_failures_total counter"));
        assert!(text.contains(r#"patch_engine_failures_total{kind="type-mismatch"} 1"#));
    }
}
