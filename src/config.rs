use crate::error::{Result, TikaError};
use crate::extractor::{
    OutputFormat, DEFAULT_JAR_PATH, DEFAULT_JAVA_BINARY, DEFAULT_OUTPUT_ENCODING, DEFAULT_TIMEOUT,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tika: TikaConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TikaConfig {
    pub java_binary: PathBuf,
    pub jar_path: PathBuf,
    /// Seconds
    pub timeout: u64,
    pub output_format: OutputFormat,
    pub output_encoding: String,
}

impl Default for TikaConfig {
    fn default() -> Self {
        Self {
            java_binary: PathBuf::from(DEFAULT_JAVA_BINARY),
            jar_path: PathBuf::from(DEFAULT_JAR_PATH),
            timeout: DEFAULT_TIMEOUT.as_secs(),
            output_format: OutputFormat::default(),
            output_encoding: DEFAULT_OUTPUT_ENCODING.to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(TikaError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| TikaError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| TikaError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["tikawrap.toml", ".tikawrap.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref java_binary) = cli_args.java_binary {
            self.tika.java_binary = java_binary.clone();
        }

        if let Some(ref jar_path) = cli_args.jar_path {
            self.tika.jar_path = jar_path.clone();
        }

        if let Some(timeout) = cli_args.timeout {
            self.tika.timeout = timeout;
        }

        if let Some(ref encoding) = cli_args.output_encoding {
            self.tika.output_encoding = encoding.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| TikaError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| TikaError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.tika.timeout == 0 {
            return Err(TikaError::Config {
                message: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.tika.java_binary.as_os_str().is_empty() {
            return Err(TikaError::Config {
                message: "Java binary path must not be empty".to_string(),
            });
        }

        if self.tika.jar_path.as_os_str().is_empty() {
            return Err(TikaError::Config {
                message: "Tika jar path must not be empty".to_string(),
            });
        }

        if self.tika.output_encoding.trim().is_empty() {
            return Err(TikaError::Config {
                message: "Output encoding must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.tika.timeout)
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

/// Settings given on the command line, applied over the loaded file.
/// The output format is not here: it goes through the wrapper's own
/// validation instead.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub java_binary: Option<PathBuf>,
    pub jar_path: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub output_encoding: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_java_binary(mut self, java_binary: Option<PathBuf>) -> Self {
        self.java_binary = java_binary;
        self
    }

    pub fn with_jar_path(mut self, jar_path: Option<PathBuf>) -> Self {
        self.jar_path = jar_path;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_output_encoding(mut self, encoding: Option<String>) -> Self {
        self.output_encoding = encoding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tika.timeout, 60);
        assert_eq!(config.tika.output_format, OutputFormat::Text);
        assert_eq!(config.tika.output_encoding, "UTF8");
        assert_eq!(config.timeout_duration(), Duration::from_secs(60));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.tika.timeout = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tika.output_encoding = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.tika.output_format = OutputFormat::JsonRecursive;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.tika.timeout, config.tika.timeout);
        assert_eq!(loaded_config.tika.output_format, OutputFormat::JsonRecursive);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[tika]\njar_path = \"/opt/tika/tika-app-2.9.jar\"").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.tika.jar_path, PathBuf::from("/opt/tika/tika-app-2.9.jar"));
        assert_eq!(config.tika.java_binary, PathBuf::from("java"));
        assert_eq!(config.tika.timeout, 60);
    }

    #[test]
    fn test_unknown_format_in_file_is_config_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[tika]\noutput_format = \"PLOPO\"").unwrap();

        assert!(matches!(
            Config::load_from_file(temp_file.path()),
            Err(TikaError::Config { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::load_from_file("/definitely/not/tikawrap.toml").is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_timeout(Some(600))
            .with_output_encoding(Some("ISO-8859-15".to_string()))
            .with_jar_path(Some(PathBuf::from("tika.jar")));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.tika.timeout, 600);
        assert_eq!(config.tika.output_encoding, "ISO-8859-15");
        assert_eq!(config.tika.jar_path, PathBuf::from("tika.jar"));
        assert_eq!(config.tika.java_binary, PathBuf::from("java"));
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[tika]"));
        assert!(sample.contains("output_format = \"text\""));
    }
}
