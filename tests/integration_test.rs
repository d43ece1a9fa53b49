use zfs_exporter::config::Config;

#[test]
fn test_config_load() {
    // This assumes config/Default.toml exists relative to where cargo test is run
    let config_res = Config::load("config/Default.toml");
    assert!(config_res.is_ok(), "Failed to load default config");

    let config = config_res.unwrap();
    assert_eq!(config.metrics.collectors, ["zfs"]);
    assert!(!config.zfs.suppress_query_errors);
}

#[test]
fn test_config_load_without_file_uses_defaults() {
    let config = Config::load("config/does-not-exist").expect("Missing file should be optional");

    assert_eq!(config.server.port, 9134);
    assert_eq!(config.metrics.namespace, "node");
}
