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
use crate::model::SeriesList;
use crate::rules::adjustments::{adjust_limit, adjust_sort, thread};
use crate::rules::predicates::{number_of_series_is_not, number_of_splits_is_not};
use crate::rules::{
    Adjustment, Resolution, Resolutions, Resolve, RuleVariables, VisualizationRulesBuilder,
    NORMAL_PRIORITY_ACTION,
};
use serde_json::json;

pub const NAME: &str = "scatterplot";
pub const TITLE: &str = "Scatterplot";
const REQUIRED_SERIES: usize = 2;
const SCORE: i32 = 3;

fn two_measures(variables: &RuleVariables) -> Vec<Resolution> {
    let measures = &variables.data_cube.measures;
    if measures.len() < REQUIRED_SERIES {
        return Vec::new();
    }
    let chosen = &measures[..REQUIRED_SERIES];
    vec![Resolution::new(
        format!(
            "Select {} and {}",
            chosen[0].display_title(),
            chosen[1].display_title()
        ),
        Adjustment::series(SeriesList::from_measures(chosen)),
    )]
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
        .when(number_of_series_is_not(REQUIRED_SERIES))
        .then(|variables: &RuleVariables| {
            Resolve::manual(
                NORMAL_PRIORITY_ACTION,
                "The Scatterplot needs exactly 2 measures",
                two_measures(variables),
            )
        })
        .when(number_of_splits_is_not(1))
        .then(|variables: &RuleVariables| {
            let resolutions = if variables.splits.is_empty() {
                Resolutions::some_dimensions(&variables.data_cube)
            } else {
                Resolutions::remove_last_splits(&variables.splits, 1)
            };
            Resolve::manual(
                NORMAL_PRIORITY_ACTION,
                "The Scatterplot needs exactly 1 split",
                resolutions,
            )
        })
        .otherwise(normalise)
        .build();
    VisualizationManifest::new(
        NAME,
        TITLE,
        evaluator,
        VisualizationSettings::new(json!({ "showSummary": false })),
    )
}
