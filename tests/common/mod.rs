//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Mutex;
use zfs_exporter::error::{ExporterError, Result};
use zfs_exporter::metrics::{sample_channel, Sample};
use zfs_exporter::collectors::Collector;
use zfs_exporter::zfs::{Filesystem, FilesystemSource};

/// Data source returning a fixed answer and recording the filters it was asked for
pub struct FakeSource {
    answer: std::result::Result<Vec<Filesystem>, String>,
    pub filters: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with(filesystems: Vec<Filesystem>) -> Self {
        Self {
            answer: Ok(filesystems),
            filters: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            filters: Mutex::new(Vec::new()),
        }
    }
}

impl FilesystemSource for FakeSource {
    fn list_filesystems(&self, filter: &str) -> Result<Vec<Filesystem>> {
        self.filters.lock().unwrap().push(filter.to_string());
        match &self.answer {
            Ok(filesystems) => Ok(filesystems.clone()),
            Err(message) => Err(ExporterError::Command(message.clone())),
        }
    }
}

pub fn filesystem(name: &str, mountpoint: &str, used: u64, avail: u64, logical_used: u64) -> Filesystem {
    Filesystem {
        name: name.to_string(),
        mountpoint: mountpoint.to_string(),
        used,
        avail,
        logical_used,
    }
}

/// Run one update and return everything it sent
pub fn run_update(collector: &dyn Collector) -> (Result<()>, Vec<Sample>) {
    let (sink, mut drain) = sample_channel();
    let result = collector.update(&sink);
    drop(sink);

    let mut samples = Vec::new();
    while let Ok(sample) = drain.try_recv() {
        samples.push(sample);
    }
    (result, samples)
}
