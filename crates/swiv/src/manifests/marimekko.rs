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
use crate::model::{DimensionKind, Splits};
use crate::rules::adjustments::{adjust_color_split, adjust_finite_limit, adjust_sort, thread};
use crate::rules::predicates::{
    are_exact_split_kinds, lacks_dimension_kinds, no_splits, number_of_series_is_not,
};
use crate::rules::{
    Actions, Adjustment, Resolutions, Resolve, RuleVariables, VisualizationRulesBuilder,
    NORMAL_PRIORITY_ACTION,
};
use serde_json::json;

pub const NAME: &str = "marimekko";
pub const TITLE: &str = "Marimekko";
const MAX_SPLITS: usize = 2;
const SCORE: i32 = 2;
const BAR_LIMITS: [u32; 3] = [5, 10, 25];

fn normalise(variables: &RuleVariables) -> Resolve {
    let RuleVariables {
        data_cube,
        splits,
        series,
        app_settings,
        is_selected_visualization,
    } = variables;
    let new_splits: Splits = splits
        .iter()
        .enumerate()
        .map(|(index, split)| {
            let dimension = data_cube.dimension(&split.reference);
            if index == 0 {
                thread(
                    split.clone(),
                    &[
                        &adjust_finite_limit(BAR_LIMITS.iter().copied().map(Some).collect()),
                        &adjust_sort(dimension, series),
                    ],
                )
            } else {
                adjust_color_split(
                    split.clone(),
                    dimension,
                    series,
                    &app_settings.visualization_colors,
                )
            }
        })
        .collect();
    if &new_splits == splits {
        Resolve::ready(if *is_selected_visualization { 10 } else { SCORE })
    } else {
        Resolve::automatic(SCORE, Adjustment::splits(new_splits))
    }
}

pub fn manifest() -> VisualizationManifest {
    let evaluator = VisualizationRulesBuilder::empty()
        .when(lacks_dimension_kinds(&[DimensionKind::String, DimensionKind::Boolean]))
        .then(|_: &RuleVariables| Resolve::NEVER)
        .when(no_splits())
        .then(Actions::manual_dimension_selection(
            "The Marimekko requires at least one split",
        ))
        .when(|variables: &RuleVariables| variables.splits.len() > MAX_SPLITS)
        .then(|variables: &RuleVariables| {
            Resolve::manual(
                NORMAL_PRIORITY_ACTION,
                "The Marimekko supports at most 2 splits",
                Resolutions::remove_last_splits(&variables.splits, MAX_SPLITS),
            )
        })
        .when(number_of_series_is_not(1))
        .then(|variables: &RuleVariables| {
            let resolutions = if variables.series.is_empty() {
                Resolutions::first_measure(&variables.data_cube)
            } else {
                Resolutions::show_only_series(&variables.data_cube, &variables.series)
            };
            Resolve::manual(
                NORMAL_PRIORITY_ACTION,
                "The Marimekko needs exactly 1 measure",
                resolutions,
            )
        })
        .when(are_exact_split_kinds(&["!time"]))
        .or(are_exact_split_kinds(&["!time", "!time"]))
        .then(normalise)
        .otherwise(|variables: &RuleVariables| {
            let categorical = variables
                .data_cube
                .dimensions
                .iter()
                .filter(|dimension| dimension.kind != DimensionKind::Time);
            Resolve::manual(
                NORMAL_PRIORITY_ACTION,
                "The Marimekko needs categorical splits",
                Resolutions::split_on_instead(categorical.take(MAX_SPLITS)),
            )
        })
        .build();
    VisualizationManifest::new(
        NAME,
        TITLE,
        evaluator,
        VisualizationSettings::new(json!({})),
    )
}
