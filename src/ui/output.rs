use crate::error::{TikaError, UserFriendlyError};
use crate::extractor::{ExtractionReport, OutputFormat};
use clap::ValueEnum;
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Content on stdout, colored messages on stderr
    Human,
    /// A JSON extraction report
    Json,
    /// Content only
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

/// Extracted content goes to stdout; everything else goes to stderr so
/// the content can be piped.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stderr().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn success(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => eprintln!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!("  {}", style(message).dim());
                    } else {
                        eprintln!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => eprintln!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) && self.mode == OutputMode::Human {
            if self.use_colors {
                eprintln!("{}{}", ROCKET, style(operation).bold());
            } else {
                eprintln!("> {}", operation);
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &TikaError) {
        self.error(&error.user_message());

        if self.verbose_level >= 1 {
            if let Some(failure) = error.command_failure() {
                self.print_diagnostics("Command", &failure.command);
                self.print_diagnostics("Tika output", failure.error_output.trim());
            }
        }

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    eprintln!(
                        "{}",
                        serde_json::json!({
                            "type": "suggestion",
                            "message": suggestion
                        })
                    );
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    /// Print the extracted content (or the whole report in JSON mode).
    pub fn print_extraction(&self, report: &ExtractionReport) {
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Human | OutputMode::Plain => println!("{}", report.content),
        }
    }

    pub fn print_summary(&self, report: &ExtractionReport) {
        if !self.should_show_message(1) || self.mode != OutputMode::Human {
            return;
        }

        let line = format!(
            "Extracted {} as {} in {}",
            format_bytes(report.content_bytes as u64),
            report.format,
            format_duration(report.duration)
        );
        if self.use_colors {
            eprintln!("{}{}", CHECKMARK, style(line).green());
        } else {
            eprintln!("✓ {}", line);
        }
        self.debug(&report.display_summary());
    }

    pub fn print_formats(&self, formats: &[OutputFormat]) {
        match self.mode {
            OutputMode::Json => {
                let names: Vec<&str> = formats.iter().map(OutputFormat::as_str).collect();
                self.print_json_object(&serde_json::json!({ "formats": names }));
            }
            OutputMode::Human | OutputMode::Plain => {
                for format in formats {
                    println!("{}", format);
                }
            }
        }
    }

    pub fn print_command(&self, command: &str) {
        match self.mode {
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({ "command": command }));
            }
            OutputMode::Human | OutputMode::Plain => println!("{}", command),
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_diagnostics(&self, label: &str, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.use_colors {
            eprintln!("  {} {}", style(format!("{}:", label)).bold(), style(text).dim());
        } else {
            eprintln!("  {}: {}", label, text);
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (CHECKMARK, style(message).green().bold()),
                MessageType::Error => (CROSS, style(message).red().bold()),
            };
            eprintln!("{}{}", emoji, styled);
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
            };
            eprintln!("{} {}", prefix, message);
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({
                "type": "message",
                "level": level,
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })
        );
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_creation() {
        let formatter = OutputFormatter::new(OutputMode::Json, 1, false);
        assert_eq!(formatter.mode(), OutputMode::Json);
        assert_eq!(formatter.verbose_level, 1);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(formatter.quiet);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
    }

    #[test]
    fn test_should_show_message() {
        let formatter = OutputFormatter::new(OutputMode::Human, 1, false);
        assert!(formatter.should_show_message(0));
        assert!(formatter.should_show_message(1));
        assert!(!formatter.should_show_message(2));

        let quiet_formatter = OutputFormatter::new(OutputMode::Human, 0, true);
        assert!(!quiet_formatter.should_show_message(0));
    }
}
