use crate::error::TikaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Extraction modes understood by the Tika app, each passed as `--<identifier>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum OutputFormat {
    /// XHTML content
    #[serde(rename = "xml")]
    Xml,
    #[serde(rename = "html")]
    Html,
    /// Plain text content
    #[serde(rename = "text")]
    Text,
    /// Plain text of the main content only
    #[serde(rename = "text-main")]
    TextMain,
    #[serde(rename = "metadata")]
    Metadata,
    /// Metadata as JSON
    #[serde(rename = "json")]
    Json,
    /// Metadata as XMP
    #[serde(rename = "xmp")]
    Xmp,
    /// Metadata and content of all embedded documents, as JSON
    #[serde(rename = "jsonRecursive")]
    JsonRecursive,
    #[serde(rename = "language")]
    Language,
    /// Document type detection
    #[serde(rename = "detect")]
    Detect,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 10] = [
        OutputFormat::Xml,
        OutputFormat::Html,
        OutputFormat::Text,
        OutputFormat::TextMain,
        OutputFormat::Metadata,
        OutputFormat::Json,
        OutputFormat::Xmp,
        OutputFormat::JsonRecursive,
        OutputFormat::Language,
        OutputFormat::Detect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Html => "html",
            OutputFormat::Text => "text",
            OutputFormat::TextMain => "text-main",
            OutputFormat::Metadata => "metadata",
            OutputFormat::Json => "json",
            OutputFormat::Xmp => "xmp",
            OutputFormat::JsonRecursive => "jsonRecursive",
            OutputFormat::Language => "language",
            OutputFormat::Detect => "detect",
        }
    }

    /// The command-line flag selecting this format.
    pub fn flag(&self) -> String {
        format!("--{}", self.as_str())
    }

    /// Comma-separated identifiers in declared order, for messages.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(OutputFormat::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = TikaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| TikaError::UnsupportedFormat {
                format: s.to_string(),
                supported: Self::supported_list(),
            })
    }
}
