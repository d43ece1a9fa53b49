//! ZFS Prometheus Exporter
//!
//! Reports used, available and referenced bytes for every ZFS filesystem,
//! labeled by filesystem name and mount point.
//!
//! # Architecture
//!
//! ```text
//!                 GET /metrics
//! ┌────────────┐ ◄──────────── ┌──────────────────────────────────────┐
//! │ Prometheus │               │ Exporter                             │
//! └────────────┘ ────────────► │  ┌──────────┐ samples ┌────────────┐ │  zfs list
//!                  text format │  │  scrape  │ ◄────── │ collectors │ │ ─────────► pools
//!                              │  └──────────┘         └────────────┘ │
//!                              └──────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`collectors`] - Collector trait, registry and the ZFS collector
//! - [`scrape`] - Parallel scrape driver and framework metrics
//! - [`metrics`] - Metric descriptors, samples and text rendering
//! - [`zfs`] - `zfs list` data source
//! - [`server`] - HTTP server
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use zfs_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod scrape;
pub mod server;
pub mod zfs;
