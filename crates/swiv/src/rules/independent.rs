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

use super::actions::Actions;
use super::builder::{RulesEvaluator, RulesEvaluatorBuilder};
use super::predicates::no_selected_measures;
use super::resolve::Resolve;
use super::CubeVariables;
use crate::model::{DataCube, SeriesList};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Inputs of checks that hold regardless of the chosen visualization.
#[derive(Debug, Clone)]
pub struct IndependentVariables {
    pub data_cube: Arc<DataCube>,
    pub series: SeriesList,
    pub is_selected_visualization: bool,
}

impl CubeVariables for IndependentVariables {
    fn data_cube(&self) -> &DataCube {
        &self.data_cube
    }

    fn series(&self) -> &SeriesList {
        &self.series
    }
}

static EVALUATOR: Lazy<RulesEvaluator<IndependentVariables>> = Lazy::new(|| {
    RulesEvaluatorBuilder::<IndependentVariables>::empty()
        .when(no_selected_measures())
        .then(Actions::manual_measures_selection())
        .otherwise(|_: &IndependentVariables| Resolve::ready(10))
        .build()
});

pub fn visualization_independent_evaluator() -> &'static RulesEvaluator<IndependentVariables> {
    &EVALUATOR
}
