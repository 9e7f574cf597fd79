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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwivError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Dimension '{name}' not found in data cube '{data_cube}'")]
    DimensionNotFound { data_cube: String, name: String },
    #[error("Measure '{name}' not found in data cube '{data_cube}'")]
    MeasureNotFound { data_cube: String, name: String },
    #[error("Series '{key}' is already selected")]
    DuplicateSeries { key: String },
    #[error("Data cube '{name}' has no dimensions")]
    NoDimensions { name: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Visualization '{name}' is not registered")]
    UnknownVisualization { name: String },
    #[error("{title} must be ready after automatic adjustment, got {state}")]
    NotReadyAfterAdjustment { title: String, state: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML configuration: {source}")]
    YamlParseError {
        #[from]
        source: serde_yaml::Error,
    },
    #[error("Failed to parse JSON configuration: {source}")]
    JsonParseError {
        #[from]
        source: serde_json::Error,
    },
    #[error("Unsupported configuration format: {format}")]
    UnsupportedFormat { format: String },
    #[error("Duplicate data cube name found: '{name}'")]
    DuplicateDataCube { name: String },
    #[error("Data cube '{name}' not found in configuration")]
    DataCubeNotFound { name: String },
    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },
}

pub type Result<T> = std::result::Result<T, SwivError>;
