//! ZFS Filesystem Data Source
//!
//! The collectors treat the pool subsystem as an opaque source of
//! [`Filesystem`] records. [`ZfsCommand`] is the production source backed by the
//! `zfs` command line tool.

pub mod command;
pub mod types;

pub use command::{parse_list_bytes, parse_list_output, FilesystemSource, ZfsCommand};
pub use types::Filesystem;
