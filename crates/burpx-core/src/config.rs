use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::extract::ExtractOptions;

/// Global configuration loaded from `~/.config/burpx/config.toml`.
///
/// Every switch here is a default; command-line flags can turn an option on
/// but never off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurpxConfig {
    /// Write records that map to an already-written path with an `_N` suffix.
    #[serde(default)]
    pub write_duplicates: bool,
    /// Skip records whose response status is outside 200..=299.
    #[serde(default)]
    pub skip_non_success: bool,
    /// Skip records whose request method is not `GET`.
    #[serde(default)]
    pub skip_non_get: bool,
    /// Extra `mime.types` file merged into the extension registry.
    #[serde(default)]
    pub mime_types: Option<PathBuf>,
    /// If set, a JSON manifest with this file name is written into the output root.
    #[serde(default)]
    pub manifest_name: Option<String>,
}

impl BurpxConfig {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            write_duplicates: self.write_duplicates,
            skip_non_success: self.skip_non_success,
            skip_non_get: self.skip_non_get,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("burpx")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BurpxConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BurpxConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: BurpxConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = BurpxConfig::default();
        assert!(!cfg.write_duplicates);
        assert!(!cfg.skip_non_success);
        assert!(!cfg.skip_non_get);
        assert!(cfg.mime_types.is_none());
        assert!(cfg.manifest_name.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = BurpxConfig {
            write_duplicates: true,
            mime_types: Some(PathBuf::from("/etc/extra.types")),
            ..BurpxConfig::default()
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: BurpxConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_empty_file_uses_defaults() {
        let cfg: BurpxConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, BurpxConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            write_duplicates = true
            skip_non_success = true
            skip_non_get = false
            manifest_name = "manifest.json"
        "#;
        let cfg: BurpxConfig = toml::from_str(toml).unwrap();
        assert!(cfg.write_duplicates);
        assert!(cfg.skip_non_success);
        assert!(!cfg.skip_non_get);
        assert_eq!(cfg.manifest_name.as_deref(), Some("manifest.json"));

        let opts = cfg.extract_options();
        assert!(opts.write_duplicates);
        assert!(opts.skip_non_success);
        assert!(!opts.skip_non_get);
    }
}
