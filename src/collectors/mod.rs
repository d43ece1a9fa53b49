//! Metrics Collectors
//!
//! A collector owns a fixed set of metric descriptors and, once per scrape,
//! queries its data source and emits samples for those descriptors.
//!
//! # Architecture
//!
//! Collectors follow a consistent pattern:
//! - Build every [`Desc`](crate::metrics::Desc) in the constructor and keep them
//!   for the collector's lifetime
//! - Implement [`Collector::update`], which performs the query and sends
//!   [`Sample`](crate::metrics::Sample)s on the provided sink
//! - Register a factory under a unique name in the [`CollectorRegistry`]
//!
//! # Error Handling
//!
//! `update` returns the query error instead of hiding it. The scrape driver marks
//! that collector as failed for the current scrape and keeps the output of every
//! other collector.

use crate::config::Config;
use crate::error::Result;
use crate::metrics::SampleSender;

/// A unit producing one family of related metrics on demand
///
/// `update` may block on I/O; the scrape driver runs it on the blocking pool and
/// never invokes it concurrently with itself. The sink belongs to the driver:
/// implementations send on it and must not keep it past the call.
pub trait Collector: Send + Sync {
    fn update(&self, sink: &SampleSender) -> Result<()>;
}

/// Shared context handed to collector factories at startup
#[derive(Clone, Copy)]
pub struct CollectionContext<'a> {
    pub config: &'a Config,
}

impl<'a> CollectionContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Metric name prefix, e.g. `node`
    pub fn namespace(&self) -> &'a str {
        &self.config.metrics.namespace
    }
}

pub mod registry;
pub mod zfs;

pub use registry::{CollectorFactory, CollectorRegistry};
pub use zfs::ZfsCollector;
