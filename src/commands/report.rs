use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::system_info::collect_report;
use crate::platform::HostSource;
use crate::ui::report_formatters::{render_report, RenderOptions};

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let explicit = matches.get_one::<PathBuf>("config");
    let config = Config::load(explicit.map(PathBuf::as_path))
        .context("Failed to load configuration")?;

    if let Some(path) = &config.source {
        info!("Using configuration from {}", path.display());
    }

    let color = config.display.color && !matches.get_flag("no-color");
    colored::control::set_override(color);

    let source = HostSource::new();
    let report = collect_report(&source, &config);

    let output = if matches.get_flag("json") {
        let mut json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize report")?;
        json.push('\n');
        json
    } else {
        render_report(&report, &render_options(&config))
    };

    // A closed pipe is not worth a failing exit status for a login banner
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
        debug!("Failed to write report: {}", e);
    }

    Ok(())
}

fn render_options(config: &Config) -> RenderOptions {
    let options = RenderOptions::from_display(&config.display);

    if !config.display.auto_width || !std::io::stdout().is_terminal() {
        return options;
    }

    match crossterm::terminal::size() {
        Ok((cols, _rows)) => {
            debug!("Terminal is {} columns wide", cols);
            options.fit_terminal(cols as usize)
        }
        Err(e) => {
            debug!("Failed to read terminal size: {}", e);
            options
        }
    }
}
