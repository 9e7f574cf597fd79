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
use crate::rules::predicates::{no_splits, supported_splits_count};
use crate::rules::{Actions, Adjustment, Resolve, RuleVariables, VisualizationRulesBuilder};
use serde_json::json;

pub const NAME: &str = "table";
pub const TITLE: &str = "Table";

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
        Resolve::ready(if *is_selected_visualization { 10 } else { 8 })
    } else {
        Resolve::automatic(6, Adjustment::splits(new_splits))
    }
}

pub fn manifest() -> VisualizationManifest {
    let evaluator = VisualizationRulesBuilder::empty()
        .when(no_splits())
        .then(Actions::manual_dimension_selection(
            "The Table requires at least one split",
        ))
        .when(supported_splits_count())
        .then(Actions::remove_excessive_splits(TITLE))
        .otherwise(normalise)
        .build();
    VisualizationManifest::new(
        NAME,
        TITLE,
        evaluator,
        VisualizationSettings::new(json!({ "collapseRows": false })),
    )
}
