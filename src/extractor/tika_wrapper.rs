use crate::config::TikaConfig;
use crate::error::{CommandFailure, Result, TikaError};
use crate::extractor::command_line::{classify_failure, has_internal_exception, render_command_line};
use crate::extractor::logger::{CommandLogger, NullLogger};
use crate::extractor::output_format::OutputFormat;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::runtime::{Builder, Handle, RuntimeFlavor};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_JAVA_BINARY: &str = "java";
pub const DEFAULT_JAR_PATH: &str = "tika-app.jar";
pub const DEFAULT_OUTPUT_ENCODING: &str = "UTF8";

/// Runs `java -jar tika-app.jar --<format> --encoding=<enc> <file>` and
/// returns what Tika printed.
///
/// The wrapper keeps only configuration; every call to [`extract`] starts
/// and finishes its own process.
///
/// [`extract`]: TikaWrapper::extract
#[derive(Clone)]
pub struct TikaWrapper {
    java_binary: PathBuf,
    jar_path: PathBuf,
    timeout: Duration,
    file: Option<PathBuf>,
    output_format: OutputFormat,
    output_encoding: String,
    logger: Arc<dyn CommandLogger>,
}

impl TikaWrapper {
    pub fn new() -> Self {
        Self {
            java_binary: PathBuf::from(DEFAULT_JAVA_BINARY),
            jar_path: PathBuf::from(DEFAULT_JAR_PATH),
            timeout: DEFAULT_TIMEOUT,
            file: None,
            output_format: OutputFormat::default(),
            output_encoding: DEFAULT_OUTPUT_ENCODING.to_string(),
            logger: Arc::new(NullLogger),
        }
    }

    pub fn from_config(config: &TikaConfig) -> Self {
        Self {
            java_binary: config.java_binary.clone(),
            jar_path: config.jar_path.clone(),
            timeout: Duration::from_secs(config.timeout),
            output_format: config.output_format,
            output_encoding: config.output_encoding.clone(),
            ..Self::new()
        }
    }

    pub fn with_logger<L>(mut self, logger: L) -> Self
    where
        L: CommandLogger + 'static,
    {
        self.logger = Arc::new(logger);
        self
    }

    pub fn set_logger(&mut self, logger: Arc<dyn CommandLogger>) -> &mut Self {
        self.logger = logger;
        self
    }

    pub fn logger(&self) -> &dyn CommandLogger {
        self.logger.as_ref()
    }

    pub fn java_binary(&self) -> &Path {
        &self.java_binary
    }

    pub fn set_java_binary<P: Into<PathBuf>>(&mut self, java_binary: P) -> &mut Self {
        self.java_binary = java_binary.into();
        self
    }

    pub fn jar_path(&self) -> &Path {
        &self.jar_path
    }

    pub fn set_jar_path<P: Into<PathBuf>>(&mut self, jar_path: P) -> &mut Self {
        self.jar_path = jar_path.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// A zero duration disables the deadline.
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    pub fn output_encoding(&self) -> &str {
        &self.output_encoding
    }

    /// Not validated here; Tika itself rejects unknown charsets at run time.
    pub fn set_output_encoding<S: Into<String>>(&mut self, encoding: S) -> &mut Self {
        self.output_encoding = encoding.into();
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Select the extraction mode by its Tika identifier. On error the
    /// current format is kept.
    pub fn set_output_format(&mut self, format: &str) -> Result<&mut Self> {
        self.output_format = format.parse()?;
        Ok(self)
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Set the document to extract. The path must name a readable regular
    /// file; it is stored as given and passed to Tika unchanged.
    pub fn set_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();

        let is_file = fs::metadata(path)
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(invalid_file(path, "does not exist"));
        }
        check_readable(path, fs::File::open(path).map(drop))?;

        self.file = Some(path.to_path_buf());
        Ok(self)
    }

    pub fn output_formats() -> &'static [OutputFormat] {
        &OutputFormat::ALL
    }

    /// Tool arguments in the order Tika's parser expects: format flag,
    /// encoding, document path.
    pub fn build_command_arguments(&self) -> Result<Vec<OsString>> {
        let file = self.file.as_ref().ok_or_else(|| TikaError::InvalidFile {
            path: String::new(),
            reason: "no file has been set".to_string(),
        })?;

        Ok(vec![
            OsString::from(self.output_format.flag()),
            OsString::from(format!("--encoding={}", self.output_encoding)),
            file.clone().into_os_string(),
        ])
    }

    /// The full command line, shell-quoted, for display and logging.
    pub fn build_command(&self) -> Result<String> {
        let arguments = self.build_command_arguments()?;
        Ok(render_command_line(&self.full_command(arguments)))
    }

    /// Run Tika and return its trimmed output, blocking the calling thread.
    ///
    /// Callable from inside a tokio runtime too: a multi-threaded runtime
    /// gives up the current worker through `block_in_place`, a
    /// current-thread runtime hands the run to a scoped thread. Async code
    /// should prefer [`extract_async`](TikaWrapper::extract_async).
    pub fn extract(&self) -> Result<String> {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.extract_async()))
            }
            Ok(_) => std::thread::scope(|scope| {
                match scope.spawn(|| self.extract_on_own_runtime()).join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }),
            Err(_) => self.extract_on_own_runtime(),
        }
    }

    fn extract_on_own_runtime(&self) -> Result<String> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(self.extract_async())
    }

    pub async fn extract_async(&self) -> Result<String> {
        let arguments = self.build_command_arguments()?;
        let output = self.execute(arguments).await?;

        Ok(output.trim().to_string())
    }

    fn full_command(&self, arguments: Vec<OsString>) -> Vec<OsString> {
        let mut command = Vec::with_capacity(arguments.len() + 3);
        command.push(self.java_binary.clone().into_os_string());
        command.push(OsString::from("-jar"));
        command.push(self.jar_path.clone().into_os_string());
        command.extend(arguments);
        command
    }

    async fn execute(&self, arguments: Vec<OsString>) -> Result<String> {
        let argv = self.full_command(arguments);
        let command_line = render_command_line(&argv);

        self.logger.log_command(&command_line);

        let mut command = Command::new(&argv[0]);
        command
            .args(&argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| {
            TikaError::CommandFailed(CommandFailure {
                command: command_line.clone(),
                exit_code: None,
                output: String::new(),
                error_output: format!("Failed to start process: {}", e),
            })
        })?;

        // Dropping the pending wait on timeout kills the child.
        let wait = child.wait_with_output();
        let waited = if self.timeout.is_zero() {
            Ok(wait.await)
        } else {
            tokio::time::timeout(self.timeout, wait).await
        };

        let output = match waited {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(TikaError::CommandFailed(CommandFailure {
                    command: command_line,
                    exit_code: None,
                    output: String::new(),
                    error_output: format!("Failed to collect process output: {}", e),
                }));
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "tika process timed out and was killed");
                return Err(TikaError::CommandFailed(CommandFailure {
                    command: command_line,
                    exit_code: None,
                    output: String::new(),
                    error_output: format!("The process exceeded the timeout of {:?}.", self.timeout),
                }));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        tracing::trace!(status = ?output.status, stdout_len = stdout.len(), "tika process finished");

        // Tika sometimes exits 0 after printing a JVM exception trace.
        if !output.status.success() || has_internal_exception(&stdout) {
            return Err(classify_failure(CommandFailure {
                command: command_line,
                exit_code: output.status.code(),
                output: stdout,
                error_output: stderr,
            }));
        }

        Ok(stdout)
    }
}

impl Default for TikaWrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TikaWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TikaWrapper")
            .field("java_binary", &self.java_binary)
            .field("jar_path", &self.jar_path)
            .field("timeout", &self.timeout)
            .field("file", &self.file)
            .field("output_format", &self.output_format)
            .field("output_encoding", &self.output_encoding)
            .finish_non_exhaustive()
    }
}

fn check_readable(path: &Path, opened: io::Result<()>) -> Result<()> {
    opened.map_err(|e| {
        tracing::trace!(path = %path.display(), error = %e, "file open check failed");
        invalid_file(path, "is not readable")
    })
}

fn invalid_file(path: &Path, reason: &str) -> TikaError {
    TikaError::InvalidFile {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
