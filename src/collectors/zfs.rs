//! ZFS Filesystem Collector
//!
//! Reports space usage for every ZFS filesystem returned by the data source.
//!
//! # Metrics Produced
//! - `<namespace>_zfs_size` - Bytes used by the filesystem
//!   - Labels: name, mountpoint
//! - `<namespace>_zfs_avail` - Bytes available to the filesystem
//!   - Labels: name, mountpoint
//! - `<namespace>_zfs_refer` - Logical (uncompressed) bytes referenced
//!   - Labels: name, mountpoint

use super::{CollectionContext, Collector};
use crate::error::Result;
use crate::metrics::{emit, Desc, Sample, SampleSender};
use crate::zfs::{Filesystem, FilesystemSource, ZfsCommand};
use std::sync::Arc;
use tracing::{debug, error};

pub const SUBSYSTEM: &str = "zfs";
pub const LABEL_NAMES: [&str; 2] = ["name", "mountpoint"];

pub struct ZfsCollector {
    used_desc: Arc<Desc>,
    avail_desc: Arc<Desc>,
    refer_desc: Arc<Desc>,
    source: Arc<dyn FilesystemSource>,
    pool_filter: String,
    suppress_query_errors: bool,
}

impl ZfsCollector {
    /// Fails only when `namespace` makes the metric names invalid
    pub fn new(namespace: &str, source: Arc<dyn FilesystemSource>) -> Result<Self> {
        let used_desc = Desc::new(
            namespace,
            SUBSYSTEM,
            "size",
            "zfs filesystem used in bytes.",
            &LABEL_NAMES,
        )?;
        let avail_desc = Desc::new(
            namespace,
            SUBSYSTEM,
            "avail",
            "zfs filesystem available in bytes.",
            &LABEL_NAMES,
        )?;
        let refer_desc = Desc::new(
            namespace,
            SUBSYSTEM,
            "refer",
            "zfs filesystem referred size in bytes.",
            &LABEL_NAMES,
        )?;

        Ok(Self {
            used_desc: Arc::new(used_desc),
            avail_desc: Arc::new(avail_desc),
            refer_desc: Arc::new(refer_desc),
            source,
            pool_filter: String::new(),
            suppress_query_errors: false,
        })
    }

    /// Factory registered as `"zfs"`: runs the configured `zfs` binary
    pub fn from_context(ctx: &CollectionContext<'_>) -> Result<Arc<dyn Collector>> {
        let zfs = &ctx.config.zfs;
        let collector = Self::new(ctx.namespace(), Arc::new(ZfsCommand::new(&zfs.binary)))?
            .with_pool_filter(&zfs.pool_filter)
            .with_suppress_query_errors(zfs.suppress_query_errors);
        Ok(Arc::new(collector))
    }

    /// Only list filesystems under this pool or dataset
    pub fn with_pool_filter(mut self, filter: impl Into<String>) -> Self {
        self.pool_filter = filter.into();
        self
    }

    /// Log query failures and report no filesystems instead of failing the update.
    /// Hides the difference between "no filesystems" and "query failed".
    pub fn with_suppress_query_errors(mut self, suppress: bool) -> Self {
        self.suppress_query_errors = suppress;
        self
    }

    pub fn descriptors(&self) -> [&Desc; 3] {
        [
            self.used_desc.as_ref(),
            self.avail_desc.as_ref(),
            self.refer_desc.as_ref(),
        ]
    }

    fn list_filesystems(&self) -> Result<Vec<Filesystem>> {
        match self.source.list_filesystems(&self.pool_filter) {
            Ok(filesystems) => Ok(filesystems),
            Err(e) if self.suppress_query_errors => {
                error!("Error reading filesystems: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl Collector for ZfsCollector {
    fn update(&self, sink: &SampleSender) -> Result<()> {
        let filesystems = self.list_filesystems()?;

        for fs in &filesystems {
            let labels = [fs.name.as_str(), fs.mountpoint.as_str()];
            emit(sink, Sample::gauge(&self.used_desc, fs.used as f64, labels)?)?;
            emit(sink, Sample::gauge(&self.avail_desc, fs.avail as f64, labels)?)?;
            emit(
                sink,
                Sample::gauge(&self.refer_desc, fs.logical_used as f64, labels)?,
            )?;
        }

        debug!("Emitted zfs metrics for {} filesystems", filesystems.len());
        Ok(())
    }
}
