use anyhow::{Context, Result};

// ============================================================================
// Service Configuration
// ============================================================================

pub const MAX_PATCH_OPERATIONS_ENV: &str = "HOUSE_PATCH_MAX_OPERATIONS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Patch documents with more operations are rejected as malformed
    pub max_patch_operations: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_patch_operations: 256,
        }
    }
}

impl ServiceConfig {
    /// Defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAX_PATCH_OPERATIONS_ENV) {
            config.max_patch_operations = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {:?}", MAX_PATCH_OPERATIONS_ENV, raw))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = ServiceConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.max_patch_operations, 256);
    }

    #[test]
    fn test_max_operations_override() {
        let config = ServiceConfig::from_lookup(|key| {
            (key == MAX_PATCH_OPERATIONS_ENV).then(|| " 12 ".to_string())
        })
        .unwrap();
        assert_eq!(config.max_patch_operations, 12);
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let err = ServiceConfig::from_lookup(|_| Some("many".to_string())).unwrap_err();
        assert!(err.to_string().contains(MAX_PATCH_OPERATIONS_ENV));
    }
}
