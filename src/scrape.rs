//! Scrape Driver
//!
//! One scrape runs every enabled collector in parallel, one blocking worker per
//! collector, all sending into a single sample channel. Once every worker has
//! returned the channel is drained and two framework metrics are appended per
//! collector:
//!
//! - `<namespace>_scrape_collector_success` - 1 if `update` returned Ok, else 0
//!   - Labels: collector
//! - `<namespace>_scrape_collector_duration_seconds` - Wall time of `update`
//!   - Labels: collector
//!
//! Each collector has its own lock, held by the blocking worker for as long as
//! `update` runs. A scrape that is cancelled mid-flight (client disconnect,
//! timeout) leaves its workers holding their locks, so the next scrape waits for
//! them instead of entering the same collector twice.

use crate::collectors::{CollectionContext, Collector, CollectorRegistry};
use crate::config::Config;
use crate::error::{ExporterError, Result};
use crate::metrics::{self, Desc, Sample};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// How one collector fared during a scrape
#[derive(Debug)]
pub struct CollectorOutcome {
    pub collector: String,
    pub result: Result<()>,
    pub duration: Duration,
}

impl CollectorOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything one scrape produced
#[derive(Debug)]
pub struct ScrapeReport {
    /// Collector samples in channel order, followed by the framework metrics
    pub samples: Vec<Sample>,
    pub outcomes: Vec<CollectorOutcome>,
}

/// A built collector and the lock guarding its `update`
struct ScrapeTarget {
    name: String,
    collector: Arc<dyn Collector>,
    in_flight: Arc<Mutex<()>>,
}

pub struct Exporter {
    targets: Vec<ScrapeTarget>,
    success_desc: Arc<Desc>,
    duration_desc: Arc<Desc>,
}

impl Exporter {
    pub fn new(namespace: &str, collectors: Vec<(String, Arc<dyn Collector>)>) -> Result<Self> {
        let success_desc = Desc::new(
            namespace,
            "scrape",
            "collector_success",
            "Whether a collector succeeded.",
            &["collector"],
        )?;
        let duration_desc = Desc::new(
            namespace,
            "scrape",
            "collector_duration_seconds",
            "Duration of a collector scrape.",
            &["collector"],
        )?;

        let targets = collectors
            .into_iter()
            .map(|(name, collector)| ScrapeTarget {
                name,
                collector,
                in_flight: Arc::new(Mutex::new(())),
            })
            .collect();

        Ok(Self {
            targets,
            success_desc: Arc::new(success_desc),
            duration_desc: Arc::new(duration_desc),
        })
    }

    /// Build the collectors enabled in `config` from `registry`
    pub fn from_config(config: &Config, registry: &CollectorRegistry) -> Result<Self> {
        let ctx = CollectionContext::new(config);
        let collectors = registry.build(&ctx)?;
        info!("Built {} collector(s)", collectors.len());
        Self::new(ctx.namespace(), collectors)
    }

    pub fn collector_names(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|target| target.name.as_str())
    }

    /// Run every collector once and gather their samples
    ///
    /// A failing collector only marks its own success metric as 0. The returned
    /// error is reserved for failures of the driver itself.
    pub async fn scrape(&self) -> Result<ScrapeReport> {
        let (sink, mut drain) = metrics::sample_channel();

        let mut workers = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            // Moved into the worker: released when `update` returns, not when
            // this future is dropped
            let guard = Arc::clone(&target.in_flight).lock_owned().await;
            let collector = Arc::clone(&target.collector);
            let sink = sink.clone();
            let handle = tokio::task::spawn_blocking(move || {
                let _guard = guard;
                let start = Instant::now();
                let result = collector.update(&sink);
                (result, start.elapsed())
            });
            workers.push((target.name.clone(), handle));
        }
        // Workers hold the only remaining senders
        drop(sink);

        let mut outcomes = Vec::with_capacity(workers.len());
        for (name, handle) in workers {
            let (result, duration) = match handle.await {
                Ok(finished) => finished,
                Err(join_error) => (
                    Err(ExporterError::Collector {
                        name: name.clone(),
                        reason: join_error.to_string(),
                    }),
                    Duration::ZERO,
                ),
            };

            match &result {
                Ok(()) => debug!("Collector {} succeeded in {:?}", name, duration),
                Err(e) => error!("Collector {} failed after {:?}: {}", name, duration, e),
            }
            outcomes.push(CollectorOutcome {
                collector: name,
                result,
                duration,
            });
        }

        let mut samples = Vec::new();
        while let Some(sample) = drain.recv().await {
            samples.push(sample);
        }

        for outcome in &outcomes {
            let success = if outcome.is_success() { 1.0 } else { 0.0 };
            samples.push(Sample::gauge(
                &self.success_desc,
                success,
                [outcome.collector.as_str()],
            )?);
            samples.push(Sample::gauge(
                &self.duration_desc,
                outcome.duration.as_secs_f64(),
                [outcome.collector.as_str()],
            )?);
        }

        Ok(ScrapeReport { samples, outcomes })
    }

    /// Scrape and encode in Prometheus text format
    pub async fn render(&self) -> Result<String> {
        let report = self.scrape().await?;
        metrics::render(&report.samples)
    }
}
