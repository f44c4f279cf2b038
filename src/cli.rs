use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tikawrap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract text and metadata from documents with Apache Tika")]
#[command(
    long_about = "tikawrap runs the Apache Tika app (java -jar tika-app.jar) on a single \
                  document and prints the extracted text, markup or metadata."
)]
#[command(after_help = "EXAMPLES:\n  \
    tikawrap report.pdf\n  \
    tikawrap slides.pptx --format metadata\n  \
    tikawrap page.html --format text-main --encoding ISO-8859-15 -o page.txt\n  \
    tikawrap scan.pdf --jar /opt/tika/tika-app.jar --timeout 300\n  \
    tikawrap --list-formats")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Document to extract
    #[arg(required_unless_present_any = ["list_formats", "generate_config"])]
    pub file: Option<PathBuf>,

    /// Tika output format (see --list-formats)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output text encoding passed to Tika
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Java runtime used to launch Tika
    #[arg(long, env = "TIKA_JAVA")]
    pub java: Option<PathBuf>,

    /// Path to the tika-app jar
    #[arg(long, env = "TIKA_JAR")]
    pub jar: Option<PathBuf>,

    /// Timeout for the Tika process (seconds)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Write extracted content to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How results and messages are printed
    #[arg(long, value_enum, default_value_t = OutputMode::Human)]
    pub output_mode: OutputMode,

    /// Print the command that would run, without running it
    #[arg(long)]
    pub dry_run: bool,

    /// List supported output formats
    #[arg(long)]
    pub list_formats: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_java_binary(self.java.clone())
            .with_jar_path(self.jar.clone())
            .with_timeout(self.timeout)
            .with_output_encoding(self.encoding.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
