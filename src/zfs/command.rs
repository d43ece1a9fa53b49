//! `zfs list` Query
//!
//! Runs the `zfs` binary in scripted mode (`-H`: no header, tab separated) with
//! exact byte values (`-p`) and parses one [`Filesystem`] per output line.
//!
//! # Example
//!
//! ```no_run
//! use zfs_exporter::zfs::{FilesystemSource, ZfsCommand};
//!
//! # fn example() -> zfs_exporter::error::Result<()> {
//! let source = ZfsCommand::new("zfs");
//! for fs in source.list_filesystems("")? {
//!     println!("{} on {}: {} bytes used", fs.name, fs.mountpoint, fs.used);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{ExporterError, Result};
use crate::zfs::types::Filesystem;
use std::process::Command;
use tracing::debug;

/// Properties requested from `zfs list`, in column order
const LIST_PROPERTIES: &str = "name,mountpoint,used,avail,logicalused";
const LIST_COLUMNS: usize = 5;

/// Source of filesystem usage records
///
/// `filter` names a pool or dataset whose subtree is listed. An empty filter
/// lists every filesystem of every imported pool. Implementations may block.
pub trait FilesystemSource: Send + Sync {
    fn list_filesystems(&self, filter: &str) -> Result<Vec<Filesystem>>;
}

/// [`FilesystemSource`] backed by the `zfs` command line tool
#[derive(Debug, Clone)]
pub struct ZfsCommand {
    binary: String,
}

impl ZfsCommand {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl FilesystemSource for ZfsCommand {
    fn list_filesystems(&self, filter: &str) -> Result<Vec<Filesystem>> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["list", "-H", "-p", "-t", "filesystem", "-o", LIST_PROPERTIES]);
        if !filter.is_empty() {
            cmd.args(["-r", filter]);
        }

        debug!("Running {:?}", cmd);
        let output = cmd.output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExporterError::Command(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        parse_list_bytes(output.stdout)
    }
}

/// Parse raw `zfs list` stdout
///
/// Dataset names and mount points become label values, so invalid UTF-8 is an
/// error rather than being replaced.
pub fn parse_list_bytes(stdout: Vec<u8>) -> Result<Vec<Filesystem>> {
    parse_list_output(&String::from_utf8(stdout)?)
}

/// Parse `zfs list -H -p -o name,mountpoint,used,avail,logicalused` output
///
/// Blank lines are skipped. A numeric column of `-` (property not applicable)
/// reads as zero.
pub fn parse_list_output(output: &str) -> Result<Vec<Filesystem>> {
    output
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_line(index + 1, line))
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Result<Filesystem> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != LIST_COLUMNS {
        return Err(ExporterError::Parse(format!(
            "line {}: expected {} tab-separated fields, got {}",
            line_no,
            LIST_COLUMNS,
            fields.len()
        )));
    }

    let name = fields[0];
    Ok(Filesystem {
        name: name.to_string(),
        mountpoint: fields[1].to_string(),
        used: parse_bytes(line_no, name, "used", fields[2])?,
        avail: parse_bytes(line_no, name, "avail", fields[3])?,
        logical_used: parse_bytes(line_no, name, "logicalused", fields[4])?,
    })
}

fn parse_bytes(line_no: usize, name: &str, property: &str, raw: &str) -> Result<u64> {
    if raw == "-" {
        return Ok(0);
    }
    raw.parse::<u64>().map_err(|e| {
        ExporterError::Parse(format!(
            "line {}: invalid {} value {:?} for {}: {}",
            line_no, property, raw, name, e
        ))
    })
}
