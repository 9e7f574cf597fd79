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

pub mod config;
pub mod error;
pub mod essence;
pub mod manifests;
pub mod model;
pub mod rules;

pub use config::{ConfigFormat, SwivConfig};
pub use error::{ConfigError, ModelError, ResolveError, Result, SwivError};
pub use essence::{best_visualization, rank_visualizations, Essence, VisStrategy};
pub use manifests::{manifest_by_name, manifests, try_manifest_by_name, VisualizationManifest};
pub use model::{
    AppSettings, DataCube, Dimension, DimensionKind, Measure, Series, SeriesList, Sort,
    SortDirection, Split, SplitType, Splits,
};

pub use rules::{Adjustment, Resolution, Resolve, ResolveState};
use std::path::Path;
use std::sync::Arc;

/// Entry point tying a loaded configuration to the visualization rules.
pub struct VisualizationResolver {
    config: SwivConfig,
    app_settings: Arc<AppSettings>,
}

impl VisualizationResolver {
    pub fn new(config: SwivConfig) -> Self {
        let app_settings = config.shared_app_settings();
        Self {
            config,
            app_settings,
        }
    }

    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(SwivConfig::load_from_file(path)?))
    }

    pub fn config(&self) -> &SwivConfig {
        &self.config
    }

    /// Fresh essence on `data_cube`: no splits, default measures.
    pub fn essence(&self, data_cube: &str) -> Result<Essence> {
        let cube = self.config.shared_data_cube(data_cube)?;
        Essence::from_data_cube(cube, Arc::clone(&self.app_settings))
    }

    /// Default split on a dimension of `data_cube`.
    pub fn split_on(&self, data_cube: &str, dimension: &str) -> Result<Split> {
        let cube = self.config.data_cube(data_cube)?;
        Ok(Split::from_dimension(cube.try_dimension(dimension)?))
    }

    /// Series for the named measures, in order. Naming a measure twice is an error.
    pub fn series_of(&self, data_cube: &str, measures: &[String]) -> Result<SeriesList> {
        let cube = self.config.data_cube(data_cube)?;
        let mut series = SeriesList::empty();
        for name in measures {
            let measure = cube.try_measure(name)?;
            series = series.add_series(Series::from_measure(measure))?;
        }
        Ok(series)
    }
}
