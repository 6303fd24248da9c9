//! Generator configuration.
//!
//! Loaded from `rasterfont.toml` in the working directory when present;
//! every field has a default so the tool runs without any config file.
//! Command-line cell dimensions override the config values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub cell: CellConfig,
    /// Codepoint ranges exported on the outline path, in increasing order.
    pub ranges: Vec<CodepointRange>,
    pub output: OutputConfig,
}

/// Target cell size for outline rasterization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CellConfig {
    pub width: usize,
    pub height: usize,
}

/// An inclusive scalar range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for generated tables. Defaults to the working directory.
    pub dir: Option<PathBuf>,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 16,
        }
    }
}

impl CodepointRange {
    pub fn to_range(self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl GeneratorConfig {
    /// Default export coverage: printable ASCII plus the Cyrillic block.
    pub fn default_ranges() -> Vec<CodepointRange> {
        vec![
            CodepointRange {
                start: 32,
                end: 126,
            },
            CodepointRange {
                start: 0x0400,
                end: 0x04FF,
            },
        ]
    }

    /// Ranges from config, or the defaults when the config names none.
    pub fn effective_ranges(&self) -> Vec<std::ops::RangeInclusive<u32>> {
        let ranges = if self.ranges.is_empty() {
            Self::default_ranges()
        } else {
            self.ranges.clone()
        };
        ranges.into_iter().map(CodepointRange::to_range).collect()
    }

    /// Load config from `path`. Returns defaults if the file doesn't exist
    /// or can't be parsed.
    pub fn load(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("config: failed to read {}: {e}", path.display());
                }
                return Self::default();
            }
        };
        match toml::from_str(&data) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("config: failed to parse {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

/// Default config file location: `rasterfont.toml` beside the invocation.
pub fn config_path() -> PathBuf {
    PathBuf::from("rasterfont.toml")
}
