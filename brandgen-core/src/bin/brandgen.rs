//! brandgen CLI - regenerate the logo set
//!
//! With no arguments: render every variant under the working directory,
//! write README.md and print a completion message.
//! Returns 2 when any image failed or the config does not validate.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use brandgen_core::{
    BatchOrchestrator, BrandConfig, ImageGenerator, ResvgRasterizer, Validator, plan,
};

#[derive(Parser)]
#[command(name = "brandgen")]
#[command(about = "Recolor and rasterize the brand logo into favicon and standard PNGs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON brand config; built-in palette when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output root; the source SVG and all outputs are relative to it
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    /// Print the batch report as JSON instead of the completion message
    #[arg(long, global = true)]
    json: bool,

    /// Log debug detail to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every variant and write README.md (default)
    Generate,

    /// Print the planned outputs without rendering
    Plan,

    /// Check the brand config
    Validate,
}

fn setup_logger(verbose: bool, quiet: bool) {
    use tracing::Level;
    use tracing_subscriber::{
        filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry,
    };

    let level = match (verbose, quiet) {
        (true, _) => Level::DEBUG,
        (_, true) => Level::WARN,
        _ => Level::INFO,
    };

    Registry::default()
        .with(LevelFilter::from(level))
        .with(layer().with_writer(std::io::stderr).with_target(false).without_time())
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<BrandConfig, String> {
    match path {
        Some(path) => BrandConfig::load_from_file(path).map_err(|e| e.to_string()),
        None => Ok(BrandConfig::default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logger(cli.verbose, cli.quiet);

    let config = match load_config(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Plan => match plan(&config) {
            Ok(planned) => {
                let files: Vec<_> = planned.iter()
                    .map(|p| serde_json::json!({
                        "path": p.file_path(&config.extension),
                        "color": p.color,
                        "size": p.size,
                        "variant": p.variant,
                    }))
                    .collect();
                match serde_json::to_string_pretty(&files) {
                    Ok(out) => {
                        println!("{}", out);
                        ExitCode::SUCCESS
                    }
                    Err(e) => {
                        tracing::error!("{}", e);
                        ExitCode::FAILURE
                    }
                }
            }
            Err(e) => {
                tracing::error!("{}", e);
                ExitCode::FAILURE
            }
        },

        Commands::Validate => {
            let result = Validator::new().validate(&config);
            match serde_json::to_string_pretty(&result) {
                Ok(out) => println!("{}", out),
                Err(e) => {
                    tracing::error!("{}", e);
                    return ExitCode::FAILURE;
                }
            }
            if result.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)  // Validation failure
            }
        }

        Commands::Generate => {
            let orchestrator = BatchOrchestrator::new(config, &cli.root);
            let generator = ImageGenerator::new(orchestrator.source_path(), ResvgRasterizer::new());

            let report = match orchestrator.run(&generator) {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!("{}", e);
                    return ExitCode::FAILURE;
                }
            };

            if let Err(e) = orchestrator.write_readme(&report) {
                tracing::error!("Failed to write README: {}", e);
                return ExitCode::FAILURE;
            }

            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        tracing::error!("{}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else if report.is_complete() {
                println!("Logo images generated successfully!");
            } else {
                println!(
                    "Logo images generated with {} failure(s)",
                    report.failures().count()
                );
            }

            if report.is_complete() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)  // Partial batch
            }
        }
    }
}
