// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::error::{ConfigError, ModelError};
use crate::model::data_cube::title_case;
use crate::model::{AppSettings, DataCube, DimensionKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "yml" | "yaml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                format: if extension.is_empty() {
                    path.display().to_string()
                } else {
                    extension
                },
            }),
        }
    }
}

/// Application settings and the data cubes queries can be built against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwivConfig {
    #[serde(default)]
    pub app_settings: AppSettings,
    #[serde(default)]
    pub data_cubes: Vec<DataCube>,
}

impl SwivConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileError {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), ?format, "loading configuration");
        Self::from_str_with_format(&content, format)
    }

    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let mut config: SwivConfig = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        config.fill_titles();
        config.validate()?;
        Ok(config)
    }

    fn fill_titles(&mut self) {
        for cube in &mut self.data_cubes {
            if cube.title.is_empty() {
                cube.title = title_case(&cube.name);
            }
            for dimension in &mut cube.dimensions {
                if dimension.title.is_empty() {
                    dimension.title = title_case(&dimension.name);
                }
            }
            for measure in &mut cube.measures {
                if measure.title.is_empty() {
                    measure.title = title_case(&measure.name);
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_settings.visualization_colors.is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "visualizationColors must not be empty".to_string(),
            });
        }
        let mut cube_names = HashSet::new();
        for cube in &self.data_cubes {
            if !cube_names.insert(cube.name.as_str()) {
                return Err(ConfigError::DuplicateDataCube {
                    name: cube.name.clone(),
                });
            }
            validate_data_cube(cube)?;
        }
        if self.data_cubes.is_empty() {
            warn!("configuration declares no data cubes");
        }
        Ok(())
    }

    pub fn data_cube(&self, name: &str) -> Result<&DataCube, ConfigError> {
        self.data_cubes
            .iter()
            .find(|cube| cube.name == name)
            .ok_or_else(|| ConfigError::DataCubeNotFound {
                name: name.to_string(),
            })
    }

    pub fn shared_data_cube(&self, name: &str) -> Result<Arc<DataCube>, ConfigError> {
        self.data_cube(name).map(|cube| Arc::new(cube.clone()))
    }

    pub fn shared_app_settings(&self) -> Arc<AppSettings> {
        Arc::new(self.app_settings.clone())
    }
}

fn validate_data_cube(cube: &DataCube) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::ValidationFailed {
        reason: format!("data cube '{}': {reason}", cube.name),
    };
    if cube.dimensions.is_empty() {
        return Err(invalid(
            ModelError::NoDimensions {
                name: cube.name.clone(),
            }
            .to_string(),
        ));
    }
    if cube.max_splits == Some(0) {
        return Err(invalid("maxSplits must be greater than 0".to_string()));
    }
    let mut names = HashSet::new();
    for dimension in &cube.dimensions {
        if !names.insert(dimension.name.as_str()) {
            return Err(invalid(format!("duplicate dimension '{}'", dimension.name)));
        }
        if dimension.limits.is_empty() {
            // only time splits may go unlimited
            if dimension.kind != DimensionKind::Time {
                return Err(invalid(format!(
                    "dimension '{}' declares no limits",
                    dimension.name
                )));
            }
            warn!(
                data_cube = %cube.name,
                dimension = %dimension.name,
                "time dimension declares no limits"
            );
        }
    }
    let mut names = HashSet::new();
    for measure in &cube.measures {
        if !names.insert(measure.name.as_str()) {
            return Err(invalid(format!("duplicate measure '{}'", measure.name)));
        }
    }
    for name in &cube.default_selected_measures {
        cube.try_measure(name)
            .map_err(|err| invalid(err.to_string()))?;
    }
    Ok(())
}
