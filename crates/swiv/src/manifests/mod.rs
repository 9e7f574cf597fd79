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

pub mod bar_chart;
pub mod grid;
pub mod heatmap;
pub mod line_chart;
pub mod marimekko;
pub mod scatterplot;
pub mod table;
pub mod totals;

use crate::error::ResolveError;
use crate::rules::{Resolve, RuleVariables, VisualizationEvaluator};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Settings owned by the rendering layer; carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct VisualizationSettings {
    pub defaults: Value,
}

impl VisualizationSettings {
    pub fn new(defaults: Value) -> Self {
        Self { defaults }
    }
}

pub struct VisualizationManifest {
    pub name: &'static str,
    pub title: &'static str,
    evaluator: VisualizationEvaluator,
    pub visualization_settings: VisualizationSettings,
}

impl VisualizationManifest {
    pub fn new(
        name: &'static str,
        title: &'static str,
        evaluator: VisualizationEvaluator,
        visualization_settings: VisualizationSettings,
    ) -> Self {
        Self {
            name,
            title,
            evaluator,
            visualization_settings,
        }
    }

    pub fn evaluate_rules(&self, variables: &RuleVariables) -> Resolve {
        self.evaluator.evaluate(variables)
    }
}

impl PartialEq for VisualizationManifest {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for VisualizationManifest {}

impl fmt::Debug for VisualizationManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisualizationManifest")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("rules", &self.evaluator.rule_count())
            .finish()
    }
}

impl fmt::Display for VisualizationManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title)
    }
}

static MANIFESTS: Lazy<Vec<VisualizationManifest>> = Lazy::new(|| {
    vec![
        totals::manifest(),
        table::manifest(),
        line_chart::manifest(),
        bar_chart::manifest(),
        heatmap::manifest(),
        grid::manifest(),
        scatterplot::manifest(),
        marimekko::manifest(),
    ]
});

/// Every registered visualization, in tie-break order.
pub fn manifests() -> &'static [VisualizationManifest] {
    &MANIFESTS
}

pub fn manifest_by_name(name: &str) -> Option<&'static VisualizationManifest> {
    MANIFESTS.iter().find(|m| m.name == name)
}

pub fn try_manifest_by_name(name: &str) -> Result<&'static VisualizationManifest, ResolveError> {
    manifest_by_name(name).ok_or_else(|| ResolveError::UnknownVisualization {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_every_visualization_once() {
        let names: Vec<_> = manifests().iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            [
                "totals",
                "table",
                "line-chart",
                "bar-chart",
                "heatmap",
                "grid",
                "scatterplot",
                "marimekko"
            ]
        );
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(manifest_by_name("bar-chart").map(|m| m.title), Some("Bar Chart"));
        assert!(manifest_by_name("pie-chart").is_none());
        assert_eq!(
            try_manifest_by_name("pie-chart").unwrap_err(),
            ResolveError::UnknownVisualization {
                name: "pie-chart".into()
            }
        );
    }
}
