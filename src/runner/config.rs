//! Isolate configuration file parsing.

use std::fmt;
use std::fs;
use std::path::Path;

use log::warn;

use crate::runner::ds::heap::HeapConfig;

/// Error raised while reading an isolate configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(String),
    /// A line could not be understood.
    Parse { line: usize, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config read error: {}", msg),
            ConfigError::Parse { line, message } => {
                write!(f, "Config parse error on line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for a single isolate.
#[derive(Debug, Clone, PartialEq)]
pub struct IsolateConfig {
    /// Handle arena settings.
    pub heap: HeapConfig,
    /// Emit a `trace!` record for every boundary call.
    pub trace_boundary_calls: bool,
}

impl IsolateConfig {
    pub fn new() -> Self {
        IsolateConfig {
            heap: HeapConfig::default(),
            trace_boundary_calls: false,
        }
    }

    pub fn with_heap(mut self, heap: HeapConfig) -> Self {
        self.heap = heap;
        self
    }

    pub fn with_trace_boundary_calls(mut self, enabled: bool) -> Self {
        self.trace_boundary_calls = enabled;
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// [heap]
    /// initial_capacity = 256
    /// max_handles = 100000
    ///
    /// [trace]
    /// boundary_calls = true
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read config file: {}", e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Only the flat subset shown in
    /// [`IsolateConfig::load`] is understood.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = IsolateConfig::new();
        let mut current_section = String::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = match raw_line.find('#') {
                Some(pos) => &raw_line[..pos],
                None => raw_line,
            }
            .trim();

            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].trim().to_string();
                continue;
            }

            let (key, value) = match line.find('=') {
                Some(pos) => (line[..pos].trim(), line[pos + 1..].trim()),
                None => {
                    return Err(ConfigError::Parse {
                        line: line_no,
                        message: format!("expected `key = value`, found `{}`", line),
                    })
                }
            };

            match (current_section.as_str(), key) {
                ("heap", "initial_capacity") => {
                    config.heap.initial_capacity = parse_usize(line_no, key, value)?;
                }
                ("heap", "max_handles") => {
                    config.heap.max_handles = Some(parse_usize(line_no, key, value)?);
                }
                ("trace", "boundary_calls") => {
                    config.trace_boundary_calls = parse_bool(line_no, key, value)?;
                }
                (section, key) => {
                    warn!("ignoring unknown config key `{}` in section [{}]", key, section);
                }
            }
        }

        Ok(config)
    }
}

impl Default for IsolateConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_usize(line: usize, key: &str, value: &str) -> Result<usize, ConfigError> {
    value.replace('_', "").parse().map_err(|_| ConfigError::Parse {
        line,
        message: format!("`{}` expects a non-negative integer, found `{}`", key, value),
    })
}

fn parse_bool(line: usize, key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::Parse {
            line,
            message: format!("`{}` expects true or false, found `{}`", key, value),
        }),
    }
}
