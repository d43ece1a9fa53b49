//! Configuration validation tests
//!
//! Tests that verify configuration defaults and validation rules.

use zfs_exporter::config::{Config, MetricsConfig, ServerConfig, ZfsConfig};
use zfs_exporter::error::ExporterError;

#[test]
fn test_default_server_config() {
    // Given: ServerConfig with default values
    let config = ServerConfig::default();

    // Then: Should listen on all interfaces on the zfs exporter port
    assert_eq!(config.addr, "0.0.0.0");
    assert_eq!(config.port, 9134);
}

#[test]
fn test_default_metrics_config() {
    let config = MetricsConfig::default();

    assert_eq!(config.namespace, "node");
    assert_eq!(config.collectors, ["zfs"]);
}

#[test]
fn test_default_zfs_config_propagates_errors() {
    // Given: Default zfs settings
    let config = ZfsConfig::default();

    // Then: All pools are listed and query errors are not hidden
    assert_eq!(config.binary, "zfs");
    assert!(config.pool_filter.is_empty());
    assert!(!config.suppress_query_errors);
}

#[test]
fn test_default_config_is_valid() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_zero_port_is_rejected() {
    let mut config = Config::default();
    config.server.port = 0;

    match config.validate() {
        Err(ExporterError::Config(message)) => assert!(message.contains("server.port")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_no_collectors_is_rejected() {
    let mut config = Config::default();
    config.metrics.collectors.clear();

    assert!(matches!(config.validate(), Err(ExporterError::Config(_))));
}

#[test]
fn test_blank_zfs_binary_is_rejected() {
    let mut config = Config::default();
    config.zfs.binary = "  ".to_string();

    match config.validate() {
        Err(ExporterError::Config(message)) => assert!(message.contains("zfs.binary")),
        other => panic!("expected config error, got {:?}", other),
    }
}
