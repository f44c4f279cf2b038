use crate::extractor::OutputFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub file: String,
    pub format: OutputFormat,
    pub encoding: String,
    pub command: String,
    pub content: String,
    pub content_bytes: usize,
    pub extracted_at: DateTime<Utc>,
    pub duration: Duration,
}

impl ExtractionReport {
    pub fn new(
        file: String,
        format: OutputFormat,
        encoding: String,
        command: String,
        content: String,
        duration: Duration,
    ) -> Self {
        Self {
            file,
            format,
            encoding,
            command,
            content_bytes: content.len(),
            content,
            extracted_at: Utc::now(),
            duration,
        }
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    pub fn display_summary(&self) -> String {
        format!(
            "File: {}\nFormat: {}\nEncoding: {}\nSize: {} bytes, {} lines",
            self.file,
            self.format,
            self.encoding,
            self.content_bytes,
            self.line_count()
        )
    }
}
