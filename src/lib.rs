pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod ui;

// Public API re-exports
pub use cli::Cli;
pub use config::{CliOverrides, Config, TikaConfig};
pub use error::{CommandFailure, Result, TikaError, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    CommandLogger, ExtractionReport, NullLogger, OutputFormat, TikaWrapper, TracingLogger,
};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use console::Term;
use std::path::Path;
use std::time::Instant;

/// Command-line front end: a configured wrapper plus terminal output.
pub struct TikaApp {
    wrapper: TikaWrapper,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl TikaApp {
    pub fn new(wrapper: TikaWrapper, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let show_spinner =
            output_mode == OutputMode::Human && !quiet && Term::stderr().is_term();
        let progress_manager = ProgressManager::new(show_spinner);

        Self {
            wrapper,
            output_formatter,
            progress_manager,
        }
    }

    /// Build the wrapper from config file, CLI flags and the document
    /// argument. Format and file are validated here, before anything runs.
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let mut wrapper = TikaWrapper::from_config(&config.tika).with_logger(TracingLogger);

        if let Some(ref format) = cli_args.format {
            wrapper.set_output_format(format)?;
        }

        if let Some(ref file) = cli_args.file {
            wrapper.set_file(file)?;
        }

        Ok(Self::new(
            wrapper,
            cli_args.output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Run Tika once and collect the result.
    pub async fn extract(&self) -> Result<ExtractionReport> {
        let command = self.wrapper.build_command()?;
        let file = self
            .wrapper
            .file()
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        self.output_formatter
            .start_operation(&format!("Extracting {} with Tika", file));
        self.output_formatter.debug(&command);

        let spinner = self
            .progress_manager
            .create_spinner(&format!("Running Tika on {}", file));
        let start_time = Instant::now();
        let result = self.wrapper.extract_async().await;
        ui::progress::finish_spinner(&spinner);

        let content = result?;

        Ok(ExtractionReport::new(
            file,
            self.wrapper.output_format(),
            self.wrapper.output_encoding().to_string(),
            command,
            content,
            start_time.elapsed(),
        ))
    }

    /// Write the extracted content to `path`, or print it.
    pub fn deliver(&self, report: &ExtractionReport, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                std::fs::write(path, &report.content)?;
                self.output_formatter
                    .success(&format!("Wrote {} bytes to {}", report.content_bytes, path.display()));
                if self.output_formatter.mode() == OutputMode::Json {
                    self.output_formatter.print_extraction(report);
                }
            }
            None => self.output_formatter.print_extraction(report),
        }

        self.output_formatter.print_summary(report);
        Ok(())
    }

    /// Render the command line without running it.
    pub fn dry_run(&self) -> Result<String> {
        let command = self.wrapper.build_command()?;
        self.output_formatter.print_command(&command);
        Ok(command)
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(TikaError::Io)?;
        Ok(())
    }

    pub fn wrapper(&self) -> &TikaWrapper {
        &self.wrapper
    }

    pub fn handle_error(&self, error: &TikaError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Extract plain UTF-8 text from `path` with default settings.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut wrapper = TikaWrapper::new();
    wrapper.set_file(path)?;
    wrapper.extract()
}

pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn document() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "content").unwrap();
        file
    }

    #[test]
    fn test_from_cli_applies_flags() {
        let doc = document();
        let cli = Cli::try_parse_from([
            "tikawrap",
            doc.path().to_str().unwrap(),
            "--format",
            "metadata",
            "--encoding",
            "UTF-16",
            "--jar",
            "/opt/tika/tika-app.jar",
            "-q",
        ])
        .unwrap();

        let app = TikaApp::from_cli(&cli).unwrap();
        assert_eq!(app.wrapper().output_format(), OutputFormat::Metadata);
        assert_eq!(app.wrapper().output_encoding(), "UTF-16");
        assert_eq!(app.wrapper().jar_path(), Path::new("/opt/tika/tika-app.jar"));
        assert_eq!(app.wrapper().file(), Some(doc.path()));
    }

    #[test]
    fn test_from_cli_rejects_bad_format() {
        let doc = document();
        let cli = Cli::try_parse_from([
            "tikawrap",
            doc.path().to_str().unwrap(),
            "--format",
            "PLOPO",
        ])
        .unwrap();

        assert!(matches!(
            TikaApp::from_cli(&cli),
            Err(TikaError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_dry_run_renders_command() {
        let doc = document();
        let mut wrapper = TikaWrapper::new();
        wrapper.set_file(doc.path()).unwrap();

        let app = TikaApp::new(wrapper, OutputMode::Plain, 0, true);
        let command = app.dry_run().unwrap();
        assert!(command.starts_with("'java' '-jar' 'tika-app.jar' '--text' '--encoding=UTF8'"));
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("tikawrap.toml");

        TikaApp::generate_sample_config(&config_path).unwrap();

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[tika]"));
    }

    #[test]
    fn test_extract_text_rejects_missing_file() {
        assert!(matches!(
            extract_text("/definitely/not/here.pdf"),
            Err(TikaError::InvalidFile { .. })
        ));
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
