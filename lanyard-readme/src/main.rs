// ABOUTME: Main entry point for the lanyard-readme CLI application
// ABOUTME: Wires logging, configuration, and the embed/transcode commands together

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use lanyard_readme::cli::{Cli, Commands};
use lanyard_readme::cli_output::CliOutput;
use lanyard_readme::commands::{self, TranscodeArgs};
use lanyard_readme::config::Config;
use lanyard_readme::constants::timeouts;
use std::env;
use std::io::IsTerminal;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Determine if color should be used
    let use_color = !cli.no_color
        && env::var("NO_COLOR").is_err()
        && env::var("TERM").unwrap_or_default() != "dumb"
        && std::io::stderr().is_terminal();
    let output = CliOutput::with_color(use_color);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            output.warning(&format!("{:#}", e));
            output.warning("Continuing with default settings");
            Config::default()
        }
    };

    if let Err(e) = run(cli.command, &config, &output).await {
        output.failure(&e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

async fn run(command: Commands, config: &Config, output: &CliOutput) -> Result<()> {
    match command {
        Commands::Embed {
            user_id,
            format,
            base_url,
        } => {
            let text = commands::embed(&user_id, format, base_url.as_deref(), config)?;
            println!("{}", text);
        }
        Commands::Transcode {
            url,
            size,
            output: output_path,
            data_uri,
            timeout,
            max_size,
        } => {
            let args = TranscodeArgs {
                url,
                size,
                timeout_secs: timeout,
                max_size,
            };

            let spinner = start_spinner(&args.url);
            let result = commands::transcode(&args, config).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let image = result?;

            match output_path {
                Some(path) => {
                    commands::write_output(&image, &path)?;
                    output.written(&image, &path);
                }
                None if data_uri => println!("{}", image.to_data_uri()),
                None => println!("{}", image.to_base64()),
            }
        }
    }

    Ok(())
}

fn start_spinner(url: &str) -> Option<ProgressBar> {
    if !std::io::stderr().is_terminal() {
        return None;
    }

    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .ok()?;
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);

    let filename = url.rsplit('/').next().unwrap_or("image");
    spinner.set_message(format!("Transcoding {}", filename));
    spinner.enable_steady_tick(Duration::from_millis(timeouts::PROGRESS_BAR_TICK_MS));
    Some(spinner)
}
