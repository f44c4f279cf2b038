use clap::Parser;
use std::process;
use tikawrap::{Cli, OutputFormatter, TikaApp, TikaError, TikaWrapper, UserFriendlyError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = Cli::parse();

    setup_logging(cli.verbosity_level(), cli.quiet);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    if cli.list_formats {
        let formatter = OutputFormatter::new(cli.output_mode, cli.verbosity_level(), cli.quiet);
        formatter.print_formats(TikaWrapper::output_formats());
        return 0;
    }

    let app = match TikaApp::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&cli, &e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return match app.dry_run() {
            Ok(_) => 0,
            Err(e) => {
                app.handle_error(&e);
                exit_code_for(&e)
            }
        };
    }

    let result = match app.extract().await {
        Ok(report) => app.deliver(&report, cli.output.as_deref()),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &TikaError) -> i32 {
    match error {
        TikaError::InvalidFile { .. } => 2,
        TikaError::UnsupportedFormat { .. } => 3,
        TikaError::CommandFailed(_) => 4,
        TikaError::UnsupportedEncoding(_) => 5,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "tikawrap.toml".to_string());

    match TikaApp::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  tikawrap <file> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(cli: &Cli, error: &TikaError) {
    let formatter = OutputFormatter::new(cli.output_mode, cli.verbosity_level(), false);
    formatter.print_user_friendly_error(error);
}

fn setup_logging(verbosity: u8, quiet: bool) {
    let default_level = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("tikawrap={}", default_level))),
        )
        .init();
}
