use thiserror::Error;

/// Diagnostic payload shared by every failure of the external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    /// Rendered, shell-quoted command line that was invoked.
    pub command: String,
    /// Exit status, or `None` when the process was killed or never started.
    pub exit_code: Option<i32>,
    pub output: String,
    pub error_output: String,
}

#[derive(Error, Debug)]
pub enum TikaError {
    #[error("Invalid input file {path}: {reason}")]
    InvalidFile { path: String, reason: String },

    #[error("The \"{format}\" format is not valid, use one of these: {supported}")]
    UnsupportedFormat { format: String, supported: String },

    #[error("Command {} produced error: {}", .0.command, .0.error_output)]
    CommandFailed(CommandFailure),

    #[error("Unsupported encoding, command {} produced error: {}", .0.command, .0.error_output)]
    UnsupportedEncoding(CommandFailure),

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl TikaError {
    /// Payload of a command failure. `UnsupportedEncoding` is a specialised
    /// `CommandFailed`, so both variants answer here.
    pub fn command_failure(&self) -> Option<&CommandFailure> {
        match self {
            TikaError::CommandFailed(failure) | TikaError::UnsupportedEncoding(failure) => {
                Some(failure)
            }
            _ => None,
        }
    }

    pub fn is_command_failure(&self) -> bool {
        self.command_failure().is_some()
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for TikaError {
    fn user_message(&self) -> String {
        match self {
            TikaError::InvalidFile { path, reason } => {
                format!("Cannot use {}: {}", path, reason)
            }
            TikaError::UnsupportedFormat { format, .. } => {
                format!("Unsupported output format: {}", format)
            }
            TikaError::CommandFailed(failure) => {
                let detail = first_line(&failure.error_output)
                    .or_else(|| first_line(&failure.output))
                    .unwrap_or("no diagnostic output");
                match failure.exit_code {
                    Some(code) => format!("Extraction failed (exit code {}): {}", code, detail),
                    None => format!("Extraction failed: {}", detail),
                }
            }
            TikaError::UnsupportedEncoding(_) => {
                "The requested output encoding is not supported by Tika".to_string()
            }
            TikaError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            TikaError::InvalidFile { .. } => Some(
                "Check that the path points to an existing regular file and that you have read permission.".to_string()
            ),
            TikaError::UnsupportedFormat { supported, .. } => Some(format!(
                "Use one of the supported formats: {}",
                supported
            )),
            TikaError::CommandFailed(failure) => Some(if failure.exit_code.is_none() {
                "Check the Java and Tika paths (--java, --jar) or raise the limit with --timeout.".to_string()
            } else {
                "Run with -vv to see the full command line and check the Tika output above.".to_string()
            }),
            TikaError::UnsupportedEncoding(_) => Some(
                "Use a Java charset name such as UTF8, UTF-16 or ISO-8859-15 with --encoding.".to_string()
            ),
            TikaError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for TikaError {
    fn from(error: toml::de::Error) -> Self {
        TikaError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TikaError>;

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(exit_code: Option<i32>, error_output: &str) -> CommandFailure {
        CommandFailure {
            command: "'java' '-jar' 'tika-app.jar'".to_string(),
            exit_code,
            output: String::new(),
            error_output: error_output.to_string(),
        }
    }

    #[test]
    fn test_user_friendly_messages() {
        let error = TikaError::InvalidFile {
            path: "/tmp/missing.pdf".to_string(),
            reason: "does not exist".to_string(),
        };
        assert!(error.user_message().contains("/tmp/missing.pdf"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_command_failure_display_carries_command_and_error() {
        let error = TikaError::CommandFailed(failure(Some(1), "boom"));
        let message = error.to_string();
        assert!(message.contains("'java' '-jar' 'tika-app.jar'"));
        assert!(message.contains("produced error: boom"));
    }

    #[test]
    fn test_unsupported_encoding_is_a_command_failure() {
        let error = TikaError::UnsupportedEncoding(failure(
            Some(1),
            "java.io.UnsupportedEncodingException: PLOPO",
        ));
        assert!(error.is_command_failure());
        assert_eq!(error.command_failure().unwrap().exit_code, Some(1));
        assert!(error.to_string().contains("java.io.UnsupportedEncodingException"));
    }

    #[test]
    fn test_non_command_errors_have_no_failure_payload() {
        let error = TikaError::Config {
            message: "bad".to_string(),
        };
        assert!(!error.is_command_failure());
    }

    #[test]
    fn test_user_message_uses_first_error_line() {
        let error = TikaError::CommandFailed(failure(Some(2), "\n  first problem\nsecond"));
        assert_eq!(
            error.user_message(),
            "Extraction failed (exit code 2): first problem"
        );
    }
}
