use motdstats::core::config::{Config, Layout};
use motdstats::core::system_info::{PortSpec, Protocol};
use motdstats::MotdError;
use tempfile::TempDir;

use super::support::config_file;

#[test]
fn test_missing_explicit_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.ini");

    let config = Config::load(Some(&path)).unwrap();
    assert!(config.source.is_none());
    assert_eq!(config.display.col_width, 32);
    assert_eq!(config.display.max_lines, 15);
    assert!(config.services.is_empty());
    assert!(config.ports.is_empty());
}

#[test]
fn test_full_file() {
    let file = config_file(
        "\
[display]
col_width = 40
max_lines = 5
layout = stacked
color = false

[threshold.disk]
warning = 70
critical = 85

[threshold.load]
warning = 0.7
critical = 1.0
per_cpu = true

[services]
names = sshd, cron, sshd

[ports]
listen = tcp:22, udp6:53

[ignore_partitions]
mount_points = /boot/efi
",
    );

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.source.as_deref(), Some(file.path()));
    assert_eq!(config.display.col_width, 40);
    assert_eq!(config.display.max_lines, 5);
    assert_eq!(config.display.layout, Layout::Stacked);
    assert!(!config.display.color);
    assert_eq!(config.thresholds.disk.warning, 70.0);
    assert_eq!(config.thresholds.disk.critical, 85.0);
    assert!(config.thresholds.load_per_cpu);
    assert_eq!(config.services, vec!["cron", "sshd"]);
    assert_eq!(
        config.ports,
        vec![
            PortSpec::new(Protocol::Tcp, 22),
            PortSpec::new(Protocol::Udp6, 53)
        ]
    );
    assert!(config.is_partition_ignored("/boot/efi", "vfat"));
    assert!(!config.is_partition_ignored("/", "ext4"));
}

#[test]
fn test_legacy_layout() {
    let file = config_file(
        "\
[threshold]
disk_warning = 60
disk_critical = 75

[services]
services_to_monitor = nginx

[ports]
tcp_ports_to_monitor = 443, 80
",
    );

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.thresholds.disk.warning, 60.0);
    assert_eq!(config.services, vec!["nginx"]);
    assert_eq!(
        config.ports,
        vec![
            PortSpec::new(Protocol::Tcp, 80),
            PortSpec::new(Protocol::Tcp, 443)
        ]
    );
}

#[test]
fn test_inverted_thresholds_are_fatal() {
    let file = config_file(
        "\
[threshold.memory]
warning = 95
critical = 90
",
    );

    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, MotdError::InvalidThreshold { .. }));
    assert!(err.to_string().contains("threshold.memory"));
}

#[test]
fn test_non_numeric_threshold_is_fatal() {
    let file = config_file(
        "\
[threshold.disk]
warning = lots
",
    );

    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_bad_port_is_fatal() {
    let file = config_file(
        "\
[ports]
listen = tcp:99999
",
    );

    assert!(Config::load(Some(file.path())).unwrap_err().is_fatal());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let file = config_file(
        "\
[display]
sparkles = yes

[weather]
city = Oslo
",
    );

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.display.col_width, 32);
}
