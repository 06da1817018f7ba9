use motdstats::core::config::{Config, Layout};
use motdstats::core::system_info::collect_report;
use motdstats::ui::formatters::display_width;
use motdstats::ui::report_formatters::{render_report, RenderOptions};

use super::support::{partition, FakeSource, GIB};

fn options(max_lines: usize) -> RenderOptions {
    RenderOptions {
        col_width: 32,
        max_lines,
        layout: Layout::Columns,
    }
}

fn many_partitions(count: usize) -> FakeSource {
    FakeSource {
        partitions: (0..count)
            .map(|i| partition(&format!("/data/{:02}", i), 100 * GIB, 50 * GIB))
            .collect(),
        ..FakeSource::default()
    }
}

#[test]
fn test_max_lines_summary() {
    colored::control::set_override(false);
    let report = collect_report(&many_partitions(9), &Config::default());
    let text = render_report(&report, &options(4));

    let shown = text.lines().filter(|l| l.starts_with("/data/")).count();
    assert_eq!(shown, 4);
    assert!(text.contains("+5 more"));
}

#[test]
fn test_summary_absent_within_limit() {
    colored::control::set_override(false);
    let report = collect_report(&many_partitions(4), &Config::default());
    let text = render_report(&report, &options(4));

    assert_eq!(text.lines().filter(|l| l.starts_with("/data/")).count(), 4);
    assert!(!text.contains("more"));
}

#[test]
fn test_every_block_line_has_full_width() {
    colored::control::set_override(false);
    let mut config = Config::default();
    config.services = vec!["a-service-with-a-really-long-unit-name".to_string()];

    let source = FakeSource {
        partitions: vec![partition(
            "/mnt/some/deeply/nested/mount/point/on/this/machine",
            100 * GIB,
            50 * GIB,
        )],
        ..FakeSource::default()
    };
    let report = collect_report(&source, &config);
    let text = render_report(&report, &options(15));

    let block_lines: Vec<&str> = text.lines().filter(|l| l.contains(" | ")).collect();
    assert!(!block_lines.is_empty());
    for line in block_lines {
        assert_eq!(display_width(line), 32 * 3 + 6, "{:?}", line);
    }
    assert!(text.contains('…'));
}

#[test]
fn test_unknown_values_render_as_not_available() {
    colored::control::set_override(false);
    let source = FakeSource::failing(&["uptime", "partitions"]);
    let report = collect_report(&source, &Config::default());
    let text = render_report(&report, &options(15));

    assert!(text.contains("Uptime: n/a"));
    assert!(text.contains("Disks"));
}
