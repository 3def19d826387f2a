//! Layout configuration loading.

use std::path::Path;

use kt_layout::LayoutConfig;

use crate::error::{AppError, AppResult};

/// Load a `LayoutConfig` from a YAML file.
///
/// Fields missing from the file keep their defaults; an empty file yields
/// the default config.
pub fn load_layout_config(path: &Path) -> AppResult<LayoutConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = if content.trim().is_empty() {
        LayoutConfig::default()
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse {}: {}", path.display(), e)))?
    };

    config
        .validate()
        .map_err(|e| AppError::Config(e.to_string()))?;
    Ok(config)
}
