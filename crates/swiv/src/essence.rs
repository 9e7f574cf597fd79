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

//! The query shape a user is looking at, together with the visualization
//! chosen for it.
//!
//! An [`Essence`] is immutable. Every change produces a new value whose
//! visualization has already been resolved.

use crate::error::{ModelError, ResolveError, Result};
use crate::manifests::{manifests, VisualizationManifest};
use crate::model::{AppSettings, DataCube, SeriesList, Split, Splits};
use crate::rules::{
    visualization_independent_evaluator, Adjustment, IndependentVariables, Resolve, RuleVariables,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// How eagerly a change of splits may switch visualizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisStrategy {
    /// Every visualization competes on equal terms.
    #[default]
    FairGame,
    /// The current visualization competes with its selection bonus.
    UnfairGame,
    /// Keep the current visualization while it stays ready.
    KeepIfReady,
    KeepAlways,
}

impl fmt::Display for VisStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VisStrategy::FairGame => "fair-game",
            VisStrategy::UnfairGame => "unfair-game",
            VisStrategy::KeepIfReady => "keep-if-ready",
            VisStrategy::KeepAlways => "keep-always",
        };
        f.write_str(name)
    }
}

/// Evaluates every registered visualization, `current` as the selected one.
pub fn rank_visualizations(
    data_cube: &Arc<DataCube>,
    app_settings: &Arc<AppSettings>,
    splits: &Splits,
    series: &SeriesList,
    current: Option<&VisualizationManifest>,
) -> Vec<(&'static VisualizationManifest, Resolve)> {
    let variables = RuleVariables::new(
        Arc::clone(data_cube),
        Arc::clone(app_settings),
        splits.clone(),
        series.clone(),
    );
    manifests()
        .iter()
        .map(|manifest| {
            let selected = current.is_some_and(|c| c == manifest);
            let resolve = manifest.evaluate_rules(&variables.clone().selected(selected));
            trace!(visualization = manifest.name, %resolve, "evaluated");
            (manifest, resolve)
        })
        .collect()
}

/// Highest scoring visualization; ties go to the earlier registration.
pub fn best_visualization(
    data_cube: &Arc<DataCube>,
    app_settings: &Arc<AppSettings>,
    splits: &Splits,
    series: &SeriesList,
    current: Option<&VisualizationManifest>,
) -> &'static VisualizationManifest {
    // min_by keeps the first of equally scored entries
    let (best, resolve) = rank_visualizations(data_cube, app_settings, splits, series, current)
        .into_iter()
        .min_by(|(_, a), (_, b)| Resolve::compare(a, b))
        .unwrap_or_else(|| unreachable!("no visualizations registered"));
    debug!(visualization = best.name, score = resolve.score(), "best visualization");
    best
}

#[derive(Debug, Clone)]
pub struct Essence {
    data_cube: Arc<DataCube>,
    app_settings: Arc<AppSettings>,
    visualization: &'static VisualizationManifest,
    splits: Splits,
    series: SeriesList,
    vis_resolve: Resolve,
}

impl Essence {
    /// Resolves the visualization for the given query shape.
    ///
    /// Without a pinned visualization the best one is chosen. An automatic
    /// verdict is applied once and must leave the visualization ready.
    pub fn new(
        data_cube: Arc<DataCube>,
        app_settings: Arc<AppSettings>,
        visualization: Option<&'static VisualizationManifest>,
        splits: Splits,
        series: SeriesList,
    ) -> Result<Self> {
        validate_references(&data_cube, &splits, &series)?;
        let visualization = match visualization {
            Some(visualization) => visualization,
            None => best_visualization(&data_cube, &app_settings, &splits, &series, None),
        };

        let evaluate = |splits: &Splits, series: &SeriesList| {
            visualization.evaluate_rules(
                &RuleVariables::new(
                    Arc::clone(&data_cube),
                    Arc::clone(&app_settings),
                    splits.clone(),
                    series.clone(),
                )
                .selected(true),
            )
        };

        let mut splits = splits;
        let mut series = series;
        let mut vis_resolve = evaluate(&splits, &series);
        if let Some(adjustment) = vis_resolve.adjustment().cloned() {
            debug!(
                visualization = visualization.name,
                score = vis_resolve.score(),
                "applying automatic adjustment"
            );
            (splits, series) = adjust(splits, series, adjustment);
            vis_resolve = evaluate(&splits, &series);
            if !vis_resolve.is_ready() {
                return Err(ResolveError::NotReadyAfterAdjustment {
                    title: visualization.title.to_string(),
                    state: vis_resolve.state().to_string(),
                }
                .into());
            }
        }

        if vis_resolve.is_ready() {
            vis_resolve = visualization_independent_evaluator().evaluate(&IndependentVariables {
                data_cube: Arc::clone(&data_cube),
                series: series.clone(),
                is_selected_visualization: true,
            });
        }

        Ok(Self {
            data_cube,
            app_settings,
            visualization,
            splits,
            series,
            vis_resolve,
        })
    }

    /// No splits, the cube's default measures selected.
    pub fn from_data_cube(data_cube: Arc<DataCube>, app_settings: Arc<AppSettings>) -> Result<Self> {
        let series = SeriesList::from_measures(data_cube.default_measures());
        Self::new(data_cube, app_settings, None, Splits::empty(), series)
    }

    pub fn data_cube(&self) -> &DataCube {
        &self.data_cube
    }

    pub fn app_settings(&self) -> &AppSettings {
        &self.app_settings
    }

    pub fn visualization(&self) -> &'static VisualizationManifest {
        self.visualization
    }

    pub fn splits(&self) -> &Splits {
        &self.splits
    }

    pub fn series(&self) -> &SeriesList {
        &self.series
    }

    pub fn vis_resolve(&self) -> &Resolve {
        &self.vis_resolve
    }

    /// Every visualization's verdict on this query, the current one as selected.
    pub fn rank(&self) -> Vec<(&'static VisualizationManifest, Resolve)> {
        rank_visualizations(
            &self.data_cube,
            &self.app_settings,
            &self.splits,
            &self.series,
            Some(self.visualization),
        )
    }

    pub fn change_splits(&self, splits: Splits, strategy: VisStrategy) -> Result<Self> {
        let mut strategy = strategy;
        if self.vis_resolve.is_manual() {
            strategy = VisStrategy::KeepAlways;
        }
        if !self.splits.is_empty() && !splits.is_empty() {
            strategy = VisStrategy::UnfairGame;
        }
        debug!(%strategy, splits = %splits, "changing splits");

        let visualization = match strategy {
            VisStrategy::KeepAlways => self.visualization,
            VisStrategy::UnfairGame => self.best_for(&splits, Some(self.visualization)),
            VisStrategy::FairGame => self.best_for(&splits, None),
            VisStrategy::KeepIfReady => {
                let variables = RuleVariables::new(
                    Arc::clone(&self.data_cube),
                    Arc::clone(&self.app_settings),
                    splits.clone(),
                    self.series.clone(),
                )
                .selected(true);
                if self.visualization.evaluate_rules(&variables).is_ready() {
                    self.visualization
                } else {
                    self.best_for(&splits, None)
                }
            }
        };
        self.rebuild(Some(visualization), splits, self.series.clone())
    }

    pub fn add_split(&self, split: Split, strategy: VisStrategy) -> Result<Self> {
        self.change_splits(self.splits.add_split(split), strategy)
    }

    pub fn remove_split(&self, reference: &str, strategy: VisStrategy) -> Result<Self> {
        self.change_splits(self.splits.remove_split(reference), strategy)
    }

    /// Keeps the visualization and re-resolves it against `series`.
    pub fn change_series(&self, series: SeriesList) -> Result<Self> {
        self.rebuild(Some(self.visualization), self.splits.clone(), series)
    }

    pub fn change_visualization(&self, visualization: &'static VisualizationManifest) -> Result<Self> {
        self.rebuild(Some(visualization), self.splits.clone(), self.series.clone())
    }

    /// Applies a resolution picked from a manual verdict.
    pub fn apply_adjustment(&self, adjustment: &Adjustment) -> Result<Self> {
        let (splits, series) = adjust(self.splits.clone(), self.series.clone(), adjustment.clone());
        self.rebuild(Some(self.visualization), splits, series)
    }

    fn best_for(
        &self,
        splits: &Splits,
        current: Option<&VisualizationManifest>,
    ) -> &'static VisualizationManifest {
        best_visualization(
            &self.data_cube,
            &self.app_settings,
            splits,
            &self.series,
            current,
        )
    }

    fn rebuild(
        &self,
        visualization: Option<&'static VisualizationManifest>,
        splits: Splits,
        series: SeriesList,
    ) -> Result<Self> {
        Self::new(
            Arc::clone(&self.data_cube),
            Arc::clone(&self.app_settings),
            visualization,
            splits,
            series,
        )
    }
}

fn adjust(splits: Splits, series: SeriesList, adjustment: Adjustment) -> (Splits, SeriesList) {
    (
        adjustment.splits.unwrap_or(splits),
        adjustment.series.unwrap_or(series),
    )
}

fn validate_references(
    data_cube: &DataCube,
    splits: &Splits,
    series: &SeriesList,
) -> std::result::Result<(), ModelError> {
    for split in splits {
        data_cube.try_dimension(&split.reference)?;
    }
    for s in series {
        data_cube.try_measure(s.key())?;
    }
    Ok(())
}
