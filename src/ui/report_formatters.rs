//! Fixed-width text rendering of a collected [`Report`].
//!
//! Every item line is exactly one column wide. Emphasis only ever wraps the
//! value field, so the visible width never depends on whether colors are on.

use colored::{ColoredString, Colorize};

use crate::core::config::{DisplayConfig, Layout};
use crate::core::system_info::types::{MetricResult, Report};
use crate::core::thresholds::Classification;
use crate::ui::formatters::{center, display_width, fit, fit_right, rjust, truncate};

/// Between two side-by-side blocks
pub const SEPARATOR: &str = " | ";

/// Width of the right-aligned label column of the summary lines
const SUMMARY_LABEL_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub col_width: usize,
    pub max_lines: usize,
    pub layout: Layout,
}

impl RenderOptions {
    pub fn from_display(display: &DisplayConfig) -> Self {
        Self {
            col_width: display.col_width,
            max_lines: display.max_lines,
            layout: display.layout,
        }
    }

    /// Widen the columns to use a terminal of `term_cols` columns. Never
    /// narrows below the configured width.
    pub fn fit_terminal(mut self, term_cols: usize) -> Self {
        let available = match self.layout {
            Layout::Columns => term_cols.saturating_sub(SEPARATOR.len() * 2 + 1) / 3,
            Layout::Stacked => term_cols.saturating_sub(1),
        };
        self.col_width = self.col_width.max(available);
        self
    }

    /// Width of the header, footer and summary lines
    pub fn total_width(&self) -> usize {
        match self.layout {
            Layout::Columns => self.col_width * 3 + SEPARATOR.len() * 2,
            Layout::Stacked => self.col_width,
        }
    }
}

struct Row {
    label: String,
    value: String,
    classification: Classification,
}

impl From<&MetricResult> for Row {
    fn from(metric: &MetricResult) -> Self {
        Row {
            label: metric.name.clone(),
            value: metric.value.clone(),
            classification: metric.classification,
        }
    }
}

/// One status block: title, column header and item rows
struct Block {
    title: &'static str,
    header_label: &'static str,
    header_value: &'static str,
    /// Columns reserved for the right-aligned value field
    value_width: usize,
    status: Classification,
    rows: Vec<Row>,
}

/// Visual marker for a classification
pub fn emphasize(text: &str, classification: Classification) -> ColoredString {
    match classification {
        Classification::Ok => text.green(),
        Classification::Warning => text.yellow(),
        Classification::Critical => text.red().bold(),
        Classification::Unknown => text.dimmed(),
    }
}

/// One item line of exactly `col_width` columns: label left, value right.
///
/// The label gives way first; a value wider than the whole column is
/// truncated as well.
pub fn render_row(
    label: &str,
    value: &str,
    classification: Classification,
    col_width: usize,
    value_width: usize,
) -> String {
    let value_width = value_width
        .max(display_width(value))
        .min(col_width.saturating_sub(2));
    let label_width = col_width.saturating_sub(value_width + 1);

    format!(
        "{} {}",
        fit(label, label_width),
        emphasize(&fit_right(value, value_width), classification)
    )
}

fn block_lines(block: &Block, options: &RenderOptions) -> Vec<String> {
    let col = options.col_width;
    let mut lines = Vec::with_capacity(block.rows.len().min(options.max_lines) + 3);

    lines.push(
        emphasize(&center(block.title, col, '.'), block.status)
            .bold()
            .to_string(),
    );

    let label_width = col.saturating_sub(block.value_width + 1);
    let header = format!(
        "{} {}",
        fit(block.header_label, label_width),
        fit_right(block.header_value, block.value_width)
    );
    lines.push(header.bold().to_string());

    for row in block.rows.iter().take(options.max_lines) {
        lines.push(render_row(
            &row.label,
            &row.value,
            row.classification,
            col,
            block.value_width,
        ));
    }

    if block.rows.len() > options.max_lines {
        let more = format!("+{} more", block.rows.len() - options.max_lines);
        lines.push(fit(&more, col).dimmed().to_string());
    }

    lines
}

fn blocks(report: &Report) -> [Block; 3] {
    let disk = Block {
        title: "Disk status",
        header_label: "Partition",
        header_value: "free use%",
        value_width: 9,
        status: report.disk_status(),
        rows: report.disks.iter().map(Row::from).collect(),
    };

    let memory = Block {
        title: "Memory status",
        header_label: "Memory used",
        header_value: "MB    %",
        value_width: 11,
        status: report.memory_status(),
        rows: report.memory.iter().map(Row::from).collect(),
    };

    let services = Block {
        title: "Services status",
        header_label: "Services/ports",
        header_value: "status",
        value_width: 9,
        status: report.services_status(),
        rows: report
            .services
            .iter()
            .map(|s| Row {
                label: s.name.clone(),
                value: s.status().to_string(),
                classification: s.classification(),
            })
            .chain(report.ports.iter().map(|p| Row {
                label: p.spec.to_string(),
                value: p.status().to_string(),
                classification: p.classification(),
            }))
            .collect(),
    };

    [disk, memory, services]
}

/// `    Load: 0.50 (1min) / ...`, cut to `width`. Only metrics that are not
/// OK get emphasis here.
pub fn summary_line(metric: &MetricResult, width: usize) -> String {
    let prefix = format!("{:>w$}: ", metric.name, w = SUMMARY_LABEL_WIDTH);
    let prefix = truncate(&prefix, width);
    let value = truncate(&metric.value, width.saturating_sub(display_width(&prefix)));

    match metric.classification {
        Classification::Ok => format!("{}{}", prefix, value),
        other => format!("{}{}", prefix, emphasize(&value, other)),
    }
}

fn header_line(report: &Report, width: usize) -> String {
    let title = format!(
        "System status for {} at {}",
        report.hostname,
        report.generated_at.format("%a %b %e %H:%M:%S %Y")
    );
    center(&title, width, '.').blue().bold().to_string()
}

fn footer_line(width: usize) -> String {
    let signature = format!("motdstats {}", crate::VERSION);
    rjust(&signature, width, '.').blue().bold().to_string()
}

/// Status blocks laid out according to `options.layout`
pub fn render_blocks(report: &Report, options: &RenderOptions) -> Vec<String> {
    let columns: Vec<Vec<String>> = blocks(report)
        .iter()
        .map(|block| block_lines(block, options))
        .collect();

    match options.layout {
        Layout::Columns => {
            let height = columns.iter().map(Vec::len).max().unwrap_or(0);
            let blank = " ".repeat(options.col_width);
            (0..height)
                .map(|i| {
                    columns
                        .iter()
                        .map(|column| column.get(i).map(String::as_str).unwrap_or(blank.as_str()))
                        .collect::<Vec<&str>>()
                        .join(SEPARATOR)
                })
                .collect()
        }
        Layout::Stacked => columns.join(&String::new()),
    }
}

/// The complete text report, newline terminated
pub fn render_report(report: &Report, options: &RenderOptions) -> String {
    let width = options.total_width();

    let mut lines = vec![String::new(), header_line(report, width), String::new()];
    lines.extend(report.summary().iter().map(|m| summary_line(m, width)));
    lines.push(String::new());
    lines.extend(render_blocks(report, options));
    lines.push(String::new());
    lines.push(footer_line(width));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
