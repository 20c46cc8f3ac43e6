//! Configuration files for `dg`.
//!
//! Two optional TOML files are read:
//!
//! - project: `./dgraph.toml` (input parsing and rendering)
//! - user: `<config_dir>/dgraph/config.toml` (preferred output format)
//!
//! A missing file means defaults. A file that exists but cannot be read or
//! parsed is an error naming the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROJECT_CONFIG_FILE: &str = "dgraph.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Lines starting with this prefix are skipped. Empty disables comments.
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
    /// Drop repeated `src -> dst` lines before building the graph.
    #[serde(default)]
    pub dedup_edges: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            comment_prefix: default_comment_prefix(),
            dedup_edges: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Sort the members of each component by name when rendering.
    #[serde(default = "default_true")]
    pub sort_members: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sort_members: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Preferred output format: `pretty`, `text` or `json`.
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    load_toml(&project_root.join(PROJECT_CONFIG_FILE))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_toml(&user_config_path(&config_dir))
}

fn user_config_path(config_dir: &Path) -> PathBuf {
    config_dir.join("dgraph/config.toml")
}

pub fn resolve_config(project_root: &Path) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;
    Ok(EffectiveConfig { project, user })
}

fn load_toml<T>(path: &Path) -> Result<T>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");

    toml::from_str::<T>(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_true() -> bool {
    true
}

fn default_comment_prefix() -> String {
    "#".to_string()
}
