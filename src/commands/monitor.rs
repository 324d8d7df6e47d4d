//! Dashboard command handler.
//!
//! Resolves configuration from the config file and CLI flags, then runs either
//! the TUI or the JSON stream.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::core::config::{DashboardConfig, ProcessBackend};
use crate::core::system_monitor::{MetricsRuntime, TemperatureMode};
use crate::ui::monitor_tui::run_monitor_app;

/// Command-line interface definition
pub fn build_cli() -> Command {
    Command::new("sysdash")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Live terminal dashboard for network, process and temperature metrics")
        .arg(
            Arg::new("fahrenheit")
                .short('f')
                .long("fahrenheit")
                .help("Show temperatures in Fahrenheit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('x')
                .long("exclude")
                .value_name("IFACE")
                .help("Leave an interface out of the network totals (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("ps")
                .long("ps")
                .help("Read processes from fixed-column `ps` output instead of sysinfo")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the dashboard state as JSON once per second instead of the TUI")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to a JSON config file")
                .value_parser(value_parser!(PathBuf)),
        )
}

/// Build the effective configuration: file values first, then CLI overrides.
pub fn resolve_config(matches: &ArgMatches) -> Result<DashboardConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => DashboardConfig::load_from(path),
        None => DashboardConfig::load().context("Failed to load configuration")?,
    };

    if matches.get_flag("fahrenheit") {
        config.temperature_mode = TemperatureMode::Fahrenheit;
    }

    if matches.get_flag("ps") {
        config.process_backend = ProcessBackend::Ps;
    }

    if let Some(excluded) = matches.get_many::<String>("exclude") {
        config.excluded_interfaces = excluded.cloned().collect();
    }

    config.validate()?;
    Ok(config)
}

/// Execute the dashboard command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let json_output = matches.get_flag("json");

    if json_output {
        crate::init_logging();
    } else {
        let log_path = DashboardConfig::log_path()?;
        crate::init_file_logging(&log_path)
            .with_context(|| format!("Failed to open log file {:?}", log_path))?;
    }

    let config = resolve_config(matches)?;
    log::info!("Starting dashboard with {:?}", config);

    if json_output {
        return run_json_output(&config);
    }

    run_monitor_app(&config).context("Failed to run dashboard")
}

/// Print the published state as one JSON document per second (for scripting)
fn run_json_output(config: &DashboardConfig) -> Result<()> {
    let runtime = MetricsRuntime::new(config)?;

    loop {
        std::thread::sleep(Duration::from_secs(1));
        let line = runtime.gate.read(|state| serde_json::to_string(state))?;
        println!("{}", line);
    }
}
