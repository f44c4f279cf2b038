pub mod command_line;
pub mod logger;
pub mod output_format;
pub mod report;
pub mod tika_wrapper;

pub use command_line::{escape_argument, render_command_line, ENCODING_ERROR_MARKER, INTERNAL_EXCEPTION_MARKER};
pub use logger::{CommandLogger, NullLogger, TracingLogger};
pub use output_format::OutputFormat;
pub use report::ExtractionReport;
pub use tika_wrapper::{TikaWrapper, DEFAULT_JAR_PATH, DEFAULT_JAVA_BINARY, DEFAULT_OUTPUT_ENCODING, DEFAULT_TIMEOUT};
