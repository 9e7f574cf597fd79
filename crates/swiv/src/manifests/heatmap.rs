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

use super::{VisualizationManifest, VisualizationSettings};
use crate::rules::adjustments::{adjust_limit, adjust_sort, thread};
use crate::rules::predicates::{number_of_series_is_not, number_of_splits_is_not};
use crate::rules::{
    Adjustment, Resolutions, Resolve, RuleVariables, VisualizationRulesBuilder,
    NORMAL_PRIORITY_ACTION,
};
use serde_json::json;

pub const NAME: &str = "heatmap";
pub const TITLE: &str = "Heatmap";
const REQUIRED_SPLITS: usize = 2;
const SCORE: i32 = 3;

fn exact_splits(variables: &RuleVariables) -> Resolve {
    let RuleVariables {
        data_cube, splits, ..
    } = variables;
    let resolutions = if splits.len() > REQUIRED_SPLITS {
        Resolutions::remove_last_splits(splits, REQUIRED_SPLITS)
    } else {
        Resolutions::add_split_on(
            splits,
            &data_cube.dimensions,
            REQUIRED_SPLITS - splits.len(),
        )
    };
    Resolve::manual(
        NORMAL_PRIORITY_ACTION,
        "Heatmap needs exactly 2 splits",
        resolutions,
    )
}

fn single_measure(variables: &RuleVariables) -> Resolve {
    let resolutions = if variables.series.is_empty() {
        Resolutions::first_measure(&variables.data_cube)
    } else {
        Resolutions::show_only_series(&variables.data_cube, &variables.series)
    };
    Resolve::manual(
        NORMAL_PRIORITY_ACTION,
        "Heatmap needs exactly 1 measure",
        resolutions,
    )
}

fn normalise(variables: &RuleVariables) -> Resolve {
    let RuleVariables {
        data_cube,
        splits,
        series,
        is_selected_visualization,
        ..
    } = variables;
    let new_splits = splits.map(|split| {
        let dimension = data_cube.dimension(&split.reference);
        thread(
            split.clone(),
            &[&adjust_limit(dimension), &adjust_sort(dimension, series)],
        )
    });
    if &new_splits == splits {
        Resolve::ready(if *is_selected_visualization { 10 } else { SCORE })
    } else {
        Resolve::automatic(SCORE, Adjustment::splits(new_splits))
    }
}

pub fn manifest() -> VisualizationManifest {
    let evaluator = VisualizationRulesBuilder::empty()
        .when(number_of_splits_is_not(REQUIRED_SPLITS))
        .then(exact_splits)
        .when(number_of_series_is_not(1))
        .then(single_measure)
        .otherwise(normalise)
        .build();
    VisualizationManifest::new(
        NAME,
        TITLE,
        evaluator,
        VisualizationSettings::new(json!({})),
    )
}
