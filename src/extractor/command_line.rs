use crate::error::{CommandFailure, TikaError};
use regex::{Regex, RegexBuilder};
use std::ffi::OsString;
use std::sync::OnceLock;

/// Printed by the Tika app when the JVM dumps an uncaught exception to
/// stdout while still exiting with status 0.
pub const INTERNAL_EXCEPTION_MARKER: &str = "produced error: Exception in thread \"main\"";

/// Class name Tika reports when the requested output charset is unknown.
pub const ENCODING_ERROR_MARKER: &str = "java.io.UnsupportedEncodingException";

/// Quote a single token for a POSIX shell.
pub fn escape_argument(argument: &str) -> String {
    if argument.is_empty() {
        return "''".to_string();
    }

    let sanitized = argument.replace('\0', "?");
    format!("'{}'", sanitized.replace('\'', "'\\''"))
}

/// Render a full argument vector as one shell-quoted line. Display only;
/// execution always passes the vector directly.
pub fn render_command_line(arguments: &[OsString]) -> String {
    arguments
        .iter()
        .map(|argument| escape_argument(&argument.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn has_internal_exception(output: &str) -> bool {
    output.contains(INTERNAL_EXCEPTION_MARKER)
}

/// Classify a failed invocation from its captured output.
///
/// Stdout and stderr are searched together for the encoding marker,
/// ignoring case.
pub fn classify_failure(failure: CommandFailure) -> TikaError {
    let combined = format!("{}\n{}", failure.output, failure.error_output);

    if encoding_error_pattern().is_match(&combined) {
        TikaError::UnsupportedEncoding(failure)
    } else {
        TikaError::CommandFailed(failure)
    }
}

fn encoding_error_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        RegexBuilder::new(&regex::escape(ENCODING_ERROR_MARKER))
            .case_insensitive(true)
            .build()
            .expect("escaped literal is a valid pattern")
    })
}
