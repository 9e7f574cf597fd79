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

pub mod actions;
pub mod adjustments;
pub mod builder;
pub mod independent;
pub mod predicates;
pub mod resolve;

pub use actions::{Actions, Resolutions, LOWEST_PRIORITY_ACTION, NORMAL_PRIORITY_ACTION};
pub use builder::{CompleteRules, PartialRule, RulesEvaluator, RulesEvaluatorBuilder};
pub use independent::{visualization_independent_evaluator, IndependentVariables};
pub use resolve::{Adjustment, Resolution, Resolve, ResolveState};

use crate::model::{AppSettings, DataCube, SeriesList, Splits};
use std::sync::Arc;

/// Anything rules can read the cube and the selected series from.
pub trait CubeVariables {
    fn data_cube(&self) -> &DataCube;
    fn series(&self) -> &SeriesList;
}

/// Inputs of a visualization's rule table.
#[derive(Debug, Clone)]
pub struct RuleVariables {
    pub data_cube: Arc<DataCube>,
    pub splits: Splits,
    pub series: SeriesList,
    pub app_settings: Arc<AppSettings>,
    pub is_selected_visualization: bool,
}

impl RuleVariables {
    pub fn new(
        data_cube: Arc<DataCube>,
        app_settings: Arc<AppSettings>,
        splits: Splits,
        series: SeriesList,
    ) -> Self {
        Self {
            data_cube,
            splits,
            series,
            app_settings,
            is_selected_visualization: false,
        }
    }

    pub fn selected(mut self, is_selected_visualization: bool) -> Self {
        self.is_selected_visualization = is_selected_visualization;
        self
    }

    pub fn with_splits(&self, splits: Splits) -> Self {
        Self {
            splits,
            ..self.clone()
        }
    }
}

impl CubeVariables for RuleVariables {
    fn data_cube(&self) -> &DataCube {
        &self.data_cube
    }

    fn series(&self) -> &SeriesList {
        &self.series
    }
}

pub type VisualizationEvaluator = RulesEvaluator<RuleVariables>;
pub type VisualizationRulesBuilder = RulesEvaluatorBuilder<RuleVariables>;
