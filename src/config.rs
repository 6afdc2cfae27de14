//! @ai:module:intent Configuration structs for the tokenization benchmark
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchConfig, PathConfig, ReportConfig, HubConfig
//! @ai:module:stateless true

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the optional TOML configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "csstok.toml";

/// @ai:intent Main configuration for the benchmark system
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub hub: HubConfig,
}

/// @ai:intent Path configuration for input/output files
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_corpus_file")]
    pub corpus_file: PathBuf,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
    #[serde(default = "default_readme_file")]
    pub readme_file: PathBuf,
}

/// @ai:intent Which conventions are compared and how savings are projected
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Convention being evaluated against the baselines
    #[serde(default = "default_candidate")]
    pub candidate: String,
    /// First entry is the primary baseline; rows without it are skipped
    #[serde(default = "default_baselines")]
    pub baselines: Vec<String>,
    #[serde(default = "default_page_components")]
    pub page_components: u32,
    #[serde(default = "default_iteration_cycles")]
    pub iteration_cycles: u32,
}

/// @ai:intent Hugging Face Hub access settings
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Environment variable holding the access token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            corpus_file: default_corpus_file(),
            results_dir: default_results_dir(),
            report_dir: default_report_dir(),
            readme_file: default_readme_file(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            candidate: default_candidate(),
            baselines: default_baselines(),
            page_components: default_page_components(),
            iteration_cycles: default_iteration_cycles(),
        }
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
        }
    }
}

fn default_corpus_file() -> PathBuf {
    PathBuf::from("data/test_cases.json")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_readme_file() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_candidate() -> String {
    "Blocktail".to_string()
}

fn default_baselines() -> Vec<String> {
    vec!["Traditional".to_string(), "BEM".to_string()]
}

fn default_page_components() -> u32 {
    20
}

fn default_iteration_cycles() -> u32 {
    5
}

fn default_token_env() -> String {
    "HF_AUTH_TOKEN".to_string()
}

impl BenchConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BenchError::ConfigurationMissing {
                path: path.to_path_buf(),
            },
            _ => BenchError::io(path, e),
        })?;

        toml::from_str(&content).map_err(|e| BenchError::InvalidConfiguration {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// @ai:intent Load an explicit config, else the default file if present, else defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);

                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ReportConfig {
    /// @ai:intent The baseline a comparison row cannot do without
    /// @ai:effects pure
    pub fn primary_baseline(&self) -> Option<&str> {
        self.baselines.first().map(String::as_str)
    }
}
