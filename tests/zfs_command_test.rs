//! `zfs list` parsing and command failure tests

use zfs_exporter::error::ExporterError;
use zfs_exporter::zfs::{
    parse_list_bytes, parse_list_output, Filesystem, FilesystemSource, ZfsCommand,
};

#[test]
fn test_parse_scripted_output() {
    // Given: Output of `zfs list -H -p -o name,mountpoint,used,avail,logicalused`
    let output = "tank\t/tank\t1048576\t2097152\t524288\n\
                  tank/data\t/data\t1024\t2048\t512\n";

    // When: Parsing
    let filesystems = parse_list_output(output).expect("Failed to parse");

    // Then: One record per line in source order
    assert_eq!(
        filesystems,
        vec![
            Filesystem {
                name: "tank".to_string(),
                mountpoint: "/tank".to_string(),
                used: 1048576,
                avail: 2097152,
                logical_used: 524288,
            },
            Filesystem {
                name: "tank/data".to_string(),
                mountpoint: "/data".to_string(),
                used: 1024,
                avail: 2048,
                logical_used: 512,
            },
        ]
    );
}

#[test]
fn test_parse_empty_output() {
    assert!(parse_list_output("").unwrap().is_empty());
    assert!(parse_list_output("\n\n").unwrap().is_empty());
}

#[test]
fn test_parse_dash_reads_as_zero() {
    let filesystems = parse_list_output("tank/vm\tlegacy\t-\t100\t-\n").unwrap();

    assert_eq!(filesystems[0].mountpoint, "legacy");
    assert_eq!(filesystems[0].used, 0);
    assert_eq!(filesystems[0].avail, 100);
    assert_eq!(filesystems[0].logical_used, 0);
}

#[test]
fn test_parse_keeps_spaces_in_names() {
    let filesystems = parse_list_output("tank/my data\t/mnt/my data\t1\t2\t3\n").unwrap();

    assert_eq!(filesystems[0].name, "tank/my data");
    assert_eq!(filesystems[0].mountpoint, "/mnt/my data");
}

#[test]
fn test_parse_rejects_wrong_column_count() {
    let result = parse_list_output("tank\t/tank\t1\t2\n");

    match result {
        Err(ExporterError::Parse(message)) => {
            assert!(message.contains("line 1"));
            assert!(message.contains("expected 5"));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_parse_rejects_human_readable_sizes() {
    // `zfs list` without -p prints sizes like 1.5G
    let result = parse_list_output("tank\t/tank\t1\t2\t3\ntank/data\t/data\t1.5G\t2\t3\n");

    match result {
        Err(ExporterError::Parse(message)) => {
            assert!(message.contains("line 2"));
            assert!(message.contains("used"));
            assert!(message.contains("tank/data"));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_parse_rejects_negative_values() {
    assert!(matches!(
        parse_list_output("tank\t/tank\t-5\t2\t3\n"),
        Err(ExporterError::Parse(_))
    ));
}

#[test]
fn test_missing_binary_is_io_error() {
    let source = ZfsCommand::new("/nonexistent/path/to/zfs");

    let result = source.list_filesystems("");

    assert!(matches!(result, Err(ExporterError::Io(_))));
}

#[cfg(unix)]
#[test]
fn test_non_zero_exit_is_command_error() {
    // `false` ignores its arguments and exits 1
    let source = ZfsCommand::new("false");

    let result = source.list_filesystems("tank");

    match result {
        Err(ExporterError::Command(message)) => assert!(message.starts_with("false exited with")),
        other => panic!("expected command error, got {:?}", other),
    }
}

#[test]
fn test_non_utf8_output_is_rejected() {
    // Given: A dataset name containing a byte that is not valid UTF-8
    let stdout = b"tank/\xff\t/tank\t1\t2\t3\n".to_vec();

    // When: Parsing raw stdout
    let result = parse_list_bytes(stdout);

    // Then: The name is not silently rewritten
    assert!(matches!(result, Err(ExporterError::Utf8(_))));
}

#[test]
fn test_utf8_bytes_parse_like_text() {
    let stdout = "tank/données\t/mnt/données\t1\t2\t3\n".as_bytes().to_vec();

    let filesystems = parse_list_bytes(stdout).unwrap();

    assert_eq!(filesystems[0].name, "tank/données");
    assert_eq!(filesystems[0].mountpoint, "/mnt/données");
}
