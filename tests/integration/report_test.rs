use motdstats::core::config::Config;
use motdstats::core::system_info::{collect_report, LoadAverage, Protocol, ListeningSocket};
use motdstats::core::thresholds::Classification;
use motdstats::core::system_info::collector::UNKNOWN_HOST;

use super::support::{partition, FakeSource, GIB};

#[test]
fn test_healthy_host() {
    let mut config = Config::default();
    config.services = vec!["sshd".to_string()];
    config.ports = vec!["tcp:22".parse().unwrap()];

    let report = collect_report(&FakeSource::default(), &config);

    assert_eq!(report.hostname, "testbox");
    assert_eq!(report.network.value, "192.168.1.10/eth0");
    assert_eq!(report.users.value, "2 user(s), 3 session(s)");
    assert_eq!(report.processes.value, "3");
    assert_eq!(report.uptime.value, "up 2 days, 5 hours, 1 minute");
    assert_eq!(report.cpus.value, "2");
    assert_eq!(report.disks.len(), 1);
    assert_eq!(report.disks[0].name, "/");
    assert_eq!(report.disk_status(), Classification::Ok);
    assert_eq!(report.memory_status(), Classification::Ok);
    assert_eq!(report.services_status(), Classification::Ok);
    assert_eq!(report.services[0].status(), "running");
    assert_eq!(report.ports[0].status(), "listening");
}

#[test]
fn test_load_classification_end_to_end() {
    let config = Config::default();

    let idle = FakeSource::default();
    let report = collect_report(&idle, &config);
    assert_eq!(report.load.classification, Classification::Ok);
    assert_eq!(report.load.value, "0.50 (1min) / 0.30 (5min) / 0.10 (15min)");

    let busy = FakeSource {
        load: LoadAverage {
            one: 3.0,
            five: 2.5,
            fifteen: 2.0,
        },
        ..FakeSource::default()
    };
    let report = collect_report(&busy, &config);
    assert_eq!(report.load.classification, Classification::Critical);
}

#[test]
fn test_failing_collectors_degrade_to_unknown() {
    let source = FakeSource::failing(&["hostname", "sessions", "load_average", "meminfo"]);
    let report = collect_report(&source, &Config::default());

    assert_eq!(report.hostname, UNKNOWN_HOST);
    assert!(report.users.is_unknown());
    assert!(report.load.is_unknown());
    assert_eq!(report.memory.len(), 1);
    assert!(report.memory[0].is_unknown());
    assert_eq!(report.memory_status(), Classification::Unknown);

    // the rest still ran
    assert_eq!(report.network.value, "192.168.1.10/eth0");
    assert_eq!(report.processes.value, "3");
    assert_eq!(report.cpus.value, "2");
    assert_eq!(report.disks[0].name, "/");
}

#[test]
fn test_unreadable_socket_tables_mark_ports_unknown() {
    let mut config = Config::default();
    config.ports = vec!["tcp:22".parse().unwrap(), "udp:53".parse().unwrap()];

    let report = collect_report(&FakeSource::failing(&["listening_sockets"]), &config);
    assert!(report.ports.iter().all(|p| p.listening.is_none()));
    assert_eq!(report.services_status(), Classification::Unknown);
}

#[test]
fn test_missing_service_and_port_are_critical() {
    let mut config = Config::default();
    config.services = vec!["postgres".to_string()];
    config.ports = vec!["tcp:5432".parse().unwrap()];

    let source = FakeSource {
        sockets: vec![ListeningSocket {
            protocol: Protocol::Tcp6,
            port: 5432,
        }],
        ..FakeSource::default()
    };
    let report = collect_report(&source, &config);

    assert_eq!(report.services[0].status(), "KO");
    // tcp6 does not satisfy a tcp check
    assert_eq!(report.ports[0].status(), "KO");
    assert_eq!(report.services_status(), Classification::Critical);
}

#[test]
fn test_disk_classification_and_filters() {
    let mut config = Config::default();
    config.ignore_partitions = vec!["/boot".to_string()];

    let source = FakeSource {
        partitions: vec![
            partition("/var", 100 * GIB, 5 * GIB),
            partition("/", 100 * GIB, 15 * GIB),
            partition("/boot", 100 * GIB, GIB),
            partition("/proc", 0, 0),
        ],
        ..FakeSource::default()
    };
    let report = collect_report(&source, &config);

    let names: Vec<&str> = report.disks.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["/", "/var"]);
    assert_eq!(report.disks[0].classification, Classification::Warning);
    assert_eq!(report.disks[1].classification, Classification::Critical);
    assert_eq!(report.disk_status(), Classification::Critical);
}

#[test]
fn test_report_serializes_to_json() {
    let report = collect_report(&FakeSource::default(), &Config::default());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["hostname"], "testbox");
    assert_eq!(json["load"]["classification"], "OK");
    assert!(json["disks"].is_array());
}
