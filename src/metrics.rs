//! Metric Descriptors, Samples and Text Rendering
//!
//! Collectors do not own live Prometheus metric objects. Instead they declare
//! immutable [`Desc`]riptors once at construction and, on every scrape, push
//! [`Sample`]s onto a [`SampleSender`] owned by the scrape driver. The driver drains
//! the channel and hands the samples to [`render`], which materializes them into a
//! throwaway Prometheus registry and encodes the text exposition format.
//!
//! # Metric Types
//!
//! Every sample is a **gauge**: an instantaneous reading with no monotonicity
//! guarantee. A fresh registry per scrape means nothing survives between scrapes.

use crate::error::{ExporterError, Result};
use prometheus::core::Describer;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

/// Immutable identity of a metric family: fully-qualified name, help text and
/// the ordered label names every sample must supply values for.
#[derive(Debug)]
pub struct Desc {
    inner: prometheus::core::Desc,
}

impl Desc {
    /// Builds `<namespace>_<subsystem>_<name>`, skipping empty parts.
    ///
    /// Fails when the resulting name or any label name is not a valid Prometheus
    /// identifier, or when `help` is empty.
    pub fn new(
        namespace: &str,
        subsystem: &str,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<Self> {
        let inner = Opts::new(name, help)
            .namespace(namespace)
            .subsystem(subsystem)
            .variable_labels(label_names.iter().map(|l| l.to_string()).collect())
            .describe()?;
        Ok(Self { inner })
    }

    pub fn fq_name(&self) -> &str {
        &self.inner.fq_name
    }

    pub fn help(&self) -> &str {
        &self.inner.help
    }

    pub fn label_names(&self) -> &[String] {
        &self.inner.variable_labels
    }
}

/// One gauge observation for a descriptor
#[derive(Debug, Clone)]
pub struct Sample {
    desc: Arc<Desc>,
    value: f64,
    label_values: Vec<String>,
}

impl Sample {
    /// Label values are positional and must match `desc.label_names()` in count.
    pub fn gauge<S: Into<String>>(
        desc: &Arc<Desc>,
        value: f64,
        label_values: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let label_values: Vec<String> = label_values.into_iter().map(Into::into).collect();
        let expect = desc.label_names().len();
        if label_values.len() != expect {
            return Err(prometheus::Error::InconsistentCardinality {
                expect,
                got: label_values.len(),
            }
            .into());
        }
        Ok(Self {
            desc: Arc::clone(desc),
            value,
            label_values,
        })
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label_values(&self) -> &[String] {
        &self.label_values
    }

    /// Label value for `name`, if the descriptor declares such a label
    pub fn label(&self, name: &str) -> Option<&str> {
        self.desc
            .label_names()
            .iter()
            .position(|l| l == name)
            .map(|i| self.label_values[i].as_str())
    }
}

/// Write half handed to collectors for the duration of one scrape
pub type SampleSender = mpsc::UnboundedSender<Sample>;
/// Read half drained by the scrape driver
pub type SampleReceiver = mpsc::UnboundedReceiver<Sample>;

pub fn sample_channel() -> (SampleSender, SampleReceiver) {
    mpsc::unbounded_channel()
}

/// Push one sample, mapping a dropped receiver to [`ExporterError::ChannelClosed`]
pub fn emit(sink: &SampleSender, sample: Sample) -> Result<()> {
    sink.send(sample).map_err(|_| ExporterError::ChannelClosed)
}

/// Render samples in Prometheus text format
///
/// Samples are grouped by fully-qualified name. A repeated (name, label values)
/// pair keeps the last value seen. The first descriptor seen for a name fixes its
/// label names; later samples under that name with other label names are dropped
/// with a warning so one misbehaving collector cannot fail the whole scrape.
pub fn render(samples: &[Sample]) -> Result<String> {
    let registry = Registry::new();
    let mut families: HashMap<String, (GaugeVec, Vec<String>)> = HashMap::new();

    for sample in samples {
        let desc = sample.desc();
        let gauges = match families.get(desc.fq_name()) {
            Some((gauges, label_names)) => {
                if label_names.as_slice() != desc.label_names() {
                    warn!(
                        "Dropping {} sample: label names {:?} conflict with {:?}",
                        desc.fq_name(),
                        desc.label_names(),
                        label_names
                    );
                    continue;
                }
                gauges.clone()
            }
            None => {
                let label_names: Vec<&str> =
                    desc.label_names().iter().map(String::as_str).collect();
                let gauges = GaugeVec::new(
                    Opts::new(desc.fq_name(), desc.help()),
                    label_names.as_slice(),
                )?;
                registry.register(Box::new(gauges.clone()))?;
                families.insert(
                    desc.fq_name().to_string(),
                    (gauges.clone(), desc.label_names().to_vec()),
                );
                gauges
            }
        };

        let label_values: Vec<&str> = sample.label_values().iter().map(String::as_str).collect();
        gauges
            .get_metric_with_label_values(label_values.as_slice())?
            .set(sample.value());
    }

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
