use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use motdstats::commands;

fn main() -> Result<()> {
    let matches = Command::new("motdstats")
        .version(motdstats::VERSION)
        .about("Print a system status report suitable for a message of the day")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Configuration file (default: /etc/motdstats.ini, then the user config dir)")
                .value_parser(clap::value_parser!(PathBuf))
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable ANSI colors even when the configuration enables them")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the collected report as JSON")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Log collection details to stderr")
                .action(ArgAction::SetTrue)
        )
        .get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    motdstats::init_logging(matches.get_flag("verbose"));

    commands::report(&matches)
}
