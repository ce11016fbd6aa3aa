mod cli;
mod color;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ConfigCommands, OutputFormat};
use config::Config;
use log::LevelFilter;
use output::output_error;
use serde::Serialize;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    color::init(cli.color_mode);
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        // The registry's answer was already printed
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            output_error(&e, cli.format);
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<bool> {
    if let Commands::Completions { shell } = &cli.command {
        Cli::generate_completions(*shell);
        return Ok(true);
    }

    let mut config = Config::load(cli.config.clone())?;
    config.merge_with_cli(cli.url.clone(), cli.session_file.clone());
    log::debug!("resolved config: {:?}", config);

    match &cli.command {
        Commands::Labels(action) => commands::labels::handle_labels(&config, action, cli.format),
        Commands::Config { action } => {
            handle_config(&config, cli.config.as_deref(), action, cli.format)?;
            Ok(true)
        }
        Commands::Completions { .. } => unreachable!("completions are handled before config load"),
    }
}

#[derive(Serialize)]
struct ConfigPathEntry {
    path: String,
    exists: bool,
}

fn handle_config(
    config: &Config,
    explicit: Option<&std::path::Path>,
    action: &ConfigCommands,
    format: OutputFormat,
) -> Result<()> {
    match action {
        ConfigCommands::Show => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(config)?);
            }
            OutputFormat::Text => {
                let rendered = toml::to_string_pretty(config)?;
                if rendered.trim().is_empty() {
                    println!("No configuration set.");
                    println!("Set the registry URL with --url, HARBOR_URL, or a config.toml file.");
                } else {
                    print!("{}", rendered);
                }
            }
        },
        ConfigCommands::Path => {
            let entries: Vec<ConfigPathEntry> = config::config_paths(explicit)
                .into_iter()
                .map(|p| ConfigPathEntry {
                    exists: p.exists(),
                    path: p.display().to_string(),
                })
                .collect();

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Text => {
                    for entry in &entries {
                        let marker = if entry.exists { " (found)" } else { "" };
                        println!("{}{}", entry.path, marker);
                    }
                }
            }
        }
    }
    Ok(())
}
