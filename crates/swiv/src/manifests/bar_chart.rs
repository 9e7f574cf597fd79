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
use crate::model::{DimensionKind, Sort, SortDirection, Split, Splits};
use crate::rules::adjustments::{adjust_color_split, adjust_limit, adjust_sort};
use crate::rules::predicates::{are_exact_split_kinds, no_splits, supported_splits_count};
use crate::rules::{
    Actions, Adjustment, Resolution, Resolutions, Resolve, RuleVariables,
    VisualizationRulesBuilder, NORMAL_PRIORITY_ACTION,
};
use serde_json::json;

pub const NAME: &str = "bar-chart";
pub const TITLE: &str = "Bar Chart";
const BASE_SCORE: i32 = 5;
const READY_SCORE: i32 = 7;
const NUMBER_BOOST: i32 = 4;
const DEFAULT_BAR_LIMIT: u32 = 25;
const SUGGESTED_DIMENSIONS: usize = 2;

fn settle(variables: &RuleVariables, automatic: i32, ready: i32, new_splits: Splits) -> Resolve {
    if new_splits == variables.splits {
        Resolve::ready(if variables.is_selected_visualization {
            10
        } else {
            ready
        })
    } else {
        Resolve::automatic(automatic, Adjustment::splits(new_splits))
    }
}

/// Time on the axis, ascending; an optional second split colours the bars.
fn time_bars(variables: &RuleVariables) -> Resolve {
    let RuleVariables {
        data_cube,
        splits,
        series,
        app_settings,
        ..
    } = variables;
    let new_splits = Splits::from_splits(
        splits
            .iter()
            .enumerate()
            .map(|(index, split)| {
                let dimension = data_cube.dimension(&split.reference);
                if index == 0 {
                    let ascending =
                        Sort::by_dimension(split.reference.clone(), SortDirection::Ascending);
                    adjust_limit(dimension)(split.change_sort(ascending))
                } else {
                    adjust_color_split(
                        split.clone(),
                        dimension,
                        series,
                        &app_settings.visualization_colors,
                    )
                }
            })
            .collect(),
    );
    settle(variables, BASE_SCORE, BASE_SCORE, new_splits)
}

fn category_bar(variables: &RuleVariables, split: &Split) -> Split {
    let dimension = variables.data_cube.dimension(&split.reference);
    let mut adjusted = adjust_sort(dimension, &variables.series)(split.clone());
    if dimension.can_bucket_by_default() && adjusted.sort.reference() != adjusted.reference {
        let self_sort = Sort::by_dimension(adjusted.reference.clone(), adjusted.sort.direction());
        adjusted = adjusted.change_sort(self_sort);
    }
    if adjusted.limit.is_none() && dimension.kind != DimensionKind::Time {
        adjusted = adjusted.change_limit(Some(DEFAULT_BAR_LIMIT));
    }
    adjusted
}

fn category_bars(variables: &RuleVariables) -> Resolve {
    let boost = if variables
        .splits
        .iter()
        .any(|split| variables.data_cube.dimension(&split.reference).kind == DimensionKind::Number)
    {
        NUMBER_BOOST
    } else {
        0
    };
    let new_splits = variables.splits.map(|split| category_bar(variables, split));
    settle(
        variables,
        BASE_SCORE + boost,
        READY_SCORE + boost,
        new_splits,
    )
}

fn category_suggestions(variables: &RuleVariables) -> Vec<Resolution> {
    let candidates: Vec<_> = variables
        .data_cube
        .dimensions
        .iter()
        .filter(|dimension| dimension.kind != DimensionKind::Time)
        .take(SUGGESTED_DIMENSIONS)
        .collect();
    let mut resolutions = Resolutions::split_on_instead(candidates.iter().copied());
    if let [first, second] = candidates.as_slice() {
        resolutions.push(Resolution::new(
            format!(
                "Split on {} and {} instead",
                first.display_title(),
                second.display_title()
            ),
            Adjustment::splits(Splits::from_splits(vec![
                Split::from_dimension(first),
                Split::from_dimension(second),
            ])),
        ));
    }
    resolutions
}

pub fn manifest() -> VisualizationManifest {
    let evaluator = VisualizationRulesBuilder::empty()
        .when(no_splits())
        .then(Actions::manual_dimension_selection(
            "The Bar Chart requires at least one split",
        ))
        .when(supported_splits_count())
        .then(Actions::remove_excessive_splits(TITLE))
        .when(are_exact_split_kinds(&["time"]))
        .or(are_exact_split_kinds(&["time", "*"]))
        .then(time_bars)
        .when(are_exact_split_kinds(&["*"]))
        .or(are_exact_split_kinds(&["*", "*"]))
        .then(category_bars)
        .otherwise(|variables: &RuleVariables| {
            Resolve::manual(
                NORMAL_PRIORITY_ACTION,
                "The Bar Chart needs one or two category splits",
                category_suggestions(variables),
            )
        })
        .build();
    VisualizationManifest::new(
        NAME,
        TITLE,
        evaluator,
        VisualizationSettings::new(json!({ "hideBars": false })),
    )
}
