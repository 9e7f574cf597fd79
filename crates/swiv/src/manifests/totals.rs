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
use crate::model::Splits;
use crate::rules::predicates::no_splits;
use crate::rules::{Actions, Adjustment, Resolve, RuleVariables, VisualizationRulesBuilder};
use serde_json::json;

pub const NAME: &str = "totals";
pub const TITLE: &str = "Totals";

pub fn manifest() -> VisualizationManifest {
    let evaluator = VisualizationRulesBuilder::empty()
        .when(no_splits())
        .then(Actions::ready(10))
        .otherwise(|_: &RuleVariables| Resolve::automatic(3, Adjustment::splits(Splits::empty())))
        .build();
    VisualizationManifest::new(NAME, TITLE, evaluator, VisualizationSettings::new(json!({})))
}
