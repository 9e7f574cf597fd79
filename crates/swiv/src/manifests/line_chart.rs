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
use crate::model::{DimensionKind, Split, Splits};
use crate::rules::adjustments::{adjust_color_split, adjust_continuous_split};
use crate::rules::predicates::{
    are_exact_split_kinds, have_at_least_split_kinds, lacks_dimension_kinds, no_splits,
};
use crate::rules::{
    Adjustment, Resolution, Resolve, RuleVariables, VisualizationRulesBuilder,
    NORMAL_PRIORITY_ACTION,
};
use serde_json::json;

pub const NAME: &str = "line-chart";
pub const TITLE: &str = "Line Chart";
const BASE_SCORE: i32 = 4;
const TIME_BOOST: i32 = 3;

fn continuous_score(kind: DimensionKind) -> i32 {
    if kind == DimensionKind::Time {
        BASE_SCORE + TIME_BOOST
    } else {
        BASE_SCORE
    }
}

fn continuous_suggestions(variables: &RuleVariables, verb: &str, suffix: &str) -> Vec<Resolution> {
    variables
        .data_cube
        .continuous_dimensions()
        .into_iter()
        .map(|dimension| {
            Resolution::new(
                format!("{verb} {}{suffix}", dimension.display_title()),
                Adjustment::splits(Splits::from_split(adjust_continuous_split(
                    Split::from_dimension(dimension),
                ))),
            )
        })
        .collect()
}

fn settle(variables: &RuleVariables, score: i32, new_splits: Splits) -> Resolve {
    if new_splits == variables.splits {
        Resolve::ready(if variables.is_selected_visualization {
            10
        } else {
            score
        })
    } else {
        Resolve::automatic(score, Adjustment::splits(new_splits))
    }
}

fn single_continuous(variables: &RuleVariables) -> Resolve {
    let Some(split) = variables.splits.first() else {
        return Resolve::NEVER;
    };
    let kind = variables.data_cube.dimension(&split.reference).kind;
    let new_splits = Splits::from_split(adjust_continuous_split(split.clone()));
    settle(variables, continuous_score(kind), new_splits)
}

/// Continuous split at `axis`, the other split becomes the colour split in front.
fn continuous_with_color(variables: &RuleVariables, axis: usize) -> Resolve {
    let RuleVariables {
        data_cube,
        splits,
        series,
        app_settings,
        ..
    } = variables;
    let (Some(axis_split), Some(color_split)) = (splits.get(axis), splits.get(1 - axis)) else {
        return Resolve::NEVER;
    };
    let kind = data_cube.dimension(&axis_split.reference).kind;
    let color_dimension = data_cube.dimension(&color_split.reference);
    let new_splits = Splits::from_splits(vec![
        adjust_color_split(
            color_split.clone(),
            color_dimension,
            series,
            &app_settings.visualization_colors,
        ),
        adjust_continuous_split(axis_split.clone()),
    ]);
    settle(variables, continuous_score(kind), new_splits)
}

fn too_many_splits(variables: &RuleVariables) -> Resolve {
    let resolutions = variables
        .splits
        .iter()
        .find(|split| variables.data_cube.dimension(&split.reference).kind == DimensionKind::Time)
        .map(|time_split| {
            vec![Resolution::new(
                "Remove all but the time split",
                Adjustment::splits(Splits::from_split(adjust_continuous_split(
                    time_split.clone(),
                ))),
            )]
        })
        .unwrap_or_default();
    Resolve::manual(
        NORMAL_PRIORITY_ACTION,
        "Too many splits on the line chart",
        resolutions,
    )
}

pub fn manifest() -> VisualizationManifest {
    let evaluator = VisualizationRulesBuilder::empty()
        .when(lacks_dimension_kinds(&[DimensionKind::Time, DimensionKind::Number]))
        .then(|_: &RuleVariables| Resolve::NEVER)
        .when(no_splits())
        .then(|variables: &RuleVariables| {
            Resolve::manual(
                NORMAL_PRIORITY_ACTION,
                "The Line Chart requires a continuous dimension split",
                continuous_suggestions(variables, "Add a split on", ""),
            )
        })
        .when(are_exact_split_kinds(&["time"]))
        .or(are_exact_split_kinds(&["number"]))
        .then(single_continuous)
        .when(are_exact_split_kinds(&["time", "!time"]))
        .then(|variables: &RuleVariables| continuous_with_color(variables, 0))
        .when(are_exact_split_kinds(&["*", "time"]))
        .or(are_exact_split_kinds(&["*", "number"]))
        .then(|variables: &RuleVariables| continuous_with_color(variables, 1))
        .when(have_at_least_split_kinds(&[DimensionKind::Time]))
        .then(too_many_splits)
        .otherwise(|variables: &RuleVariables| {
            Resolve::manual(
                NORMAL_PRIORITY_ACTION,
                "The Line Chart needs one continuous dimension split",
                continuous_suggestions(variables, "Split on", " instead"),
            )
        })
        .build();
    VisualizationManifest::new(
        NAME,
        TITLE,
        evaluator,
        VisualizationSettings::new(json!({ "groupSeries": false })),
    )
}
