/// Sink for the command line of each external invocation.
pub trait CommandLogger: Send + Sync {
    fn log_command(&self, command_line: &str);
}

/// Discards everything. Default for a freshly constructed wrapper.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl CommandLogger for NullLogger {
    fn log_command(&self, _command_line: &str) {}
}

/// Forwards command lines to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl CommandLogger for TracingLogger {
    fn log_command(&self, command_line: &str) {
        tracing::debug!(target: "tikawrap::command", command = %command_line, "running tika");
    }
}
