//! Collector Registry
//!
//! Maps collector names to factories so the scrape driver can build collectors
//! without knowing their concrete types. The registry is an ordinary value
//! populated by explicit [`CollectorRegistry::register`] calls at startup.

use super::{CollectionContext, Collector, ZfsCollector};
use crate::error::{ExporterError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Builds a collector from the startup context
pub type CollectorFactory =
    Box<dyn Fn(&CollectionContext<'_>) -> Result<Arc<dyn Collector>> + Send + Sync>;

#[derive(Default)]
pub struct CollectorRegistry {
    factories: BTreeMap<String, CollectorFactory>,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in collector
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .factories
            .insert("zfs".to_string(), Box::new(ZfsCollector::from_context));
        registry
    }

    /// Fails if `name` is already taken
    pub fn register(&mut self, name: &str, factory: CollectorFactory) -> Result<()> {
        if self.factories.contains_key(name) {
            return Err(ExporterError::Registry(format!(
                "collector {:?} is already registered",
                name
            )));
        }
        self.factories.insert(name.to_string(), factory);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Construct the collectors enabled in `metrics.collectors`, in that order
    ///
    /// Unknown names, duplicates and factory failures are all startup errors.
    pub fn build(&self, ctx: &CollectionContext<'_>) -> Result<Vec<(String, Arc<dyn Collector>)>> {
        let mut built: Vec<(String, Arc<dyn Collector>)> = Vec::new();

        for name in &ctx.config.metrics.collectors {
            if built.iter().any(|(existing, _)| existing == name) {
                return Err(ExporterError::Registry(format!(
                    "collector {:?} is enabled more than once",
                    name
                )));
            }
            let factory = self.factories.get(name).ok_or_else(|| {
                ExporterError::Registry(format!(
                    "unknown collector {:?} (available: {})",
                    name,
                    self.names().collect::<Vec<_>>().join(", ")
                ))
            })?;
            built.push((name.clone(), factory(ctx)?));
            info!("Enabled collector: {}", name);
        }

        Ok(built)
    }
}
