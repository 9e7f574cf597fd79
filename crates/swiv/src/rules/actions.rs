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

use super::resolve::{Adjustment, Resolution, Resolve};
use super::{CubeVariables, RuleVariables};
use crate::model::{DataCube, Dimension, DimensionKind, SeriesList, Split, Splits};

pub const NORMAL_PRIORITY_ACTION: i32 = 4;
pub const LOWEST_PRIORITY_ACTION: i32 = 0;
const SUGGESTED_SPLIT_DIMENSIONS: usize = 2;

/// Generators for the alternatives offered with a manual verdict.
pub struct Resolutions;

impl Resolutions {
    pub fn some_dimensions(data_cube: &DataCube) -> Vec<Resolution> {
        data_cube
            .dimensions_by_kind(DimensionKind::String)
            .into_iter()
            .take(SUGGESTED_SPLIT_DIMENSIONS)
            .map(|dimension| {
                Resolution::new(
                    format!("Add a split on {}", dimension.display_title()),
                    Adjustment::splits(Splits::from_dimension(dimension)),
                )
            })
            .collect()
    }

    pub fn default_selected_measures(data_cube: &DataCube) -> Vec<Resolution> {
        let measures = data_cube.default_measures();
        if measures.is_empty() {
            return Vec::new();
        }
        let titles: Vec<&str> = measures.iter().map(|m| m.display_title()).collect();
        vec![Resolution::new(
            format!("Select default measures: {}", titles.join(", ")),
            Adjustment::series(SeriesList::from_measures(measures.iter().copied())),
        )]
    }

    pub fn first_measure(data_cube: &DataCube) -> Vec<Resolution> {
        data_cube
            .measures
            .first()
            .map(|measure| {
                vec![Resolution::new(
                    format!("Select {}", measure.display_title()),
                    Adjustment::series(SeriesList::from_measures([measure])),
                )]
            })
            .unwrap_or_default()
    }

    pub fn split_on_instead<'a, I>(dimensions: I) -> Vec<Resolution>
    where
        I: IntoIterator<Item = &'a Dimension>,
    {
        dimensions
            .into_iter()
            .map(|dimension| {
                Resolution::new(
                    format!("Split on {} instead", dimension.display_title()),
                    Adjustment::splits(Splits::from_dimension(dimension)),
                )
            })
            .collect()
    }

    /// Suggests adding a split on dimensions not already split on.
    pub fn add_split_on<'a, I>(splits: &Splits, dimensions: I, count: usize) -> Vec<Resolution>
    where
        I: IntoIterator<Item = &'a Dimension>,
    {
        dimensions
            .into_iter()
            .filter(|dimension| !splits.has_split_on(dimension))
            .take(count)
            .map(|dimension| {
                Resolution::new(
                    format!("Add a split on {}", dimension.display_title()),
                    Adjustment::splits(splits.add_split(Split::from_dimension(dimension))),
                )
            })
            .collect()
    }

    pub fn remove_last_splits(splits: &Splits, keep: usize) -> Vec<Resolution> {
        let excess = splits.len().saturating_sub(keep);
        if excess == 0 {
            return Vec::new();
        }
        let description = if excess == 1 {
            "Remove last split".to_string()
        } else {
            format!("Remove last {excess} splits")
        };
        vec![Resolution::new(
            description,
            Adjustment::splits(splits.slice(0, keep)),
        )]
    }

    pub fn show_only_series(data_cube: &DataCube, series: &SeriesList) -> Vec<Resolution> {
        series
            .iter()
            .map(|s| {
                let title = data_cube
                    .get_measure(s.key())
                    .map_or(s.key(), |m| m.display_title());
                Resolution::new(
                    format!("Show only {title}"),
                    Adjustment::series(std::iter::once(s.clone()).collect()),
                )
            })
            .collect()
    }
}

/// Reusable actions shared by the visualization rule tables.
pub struct Actions;

impl Actions {
    pub fn ready(score: i32) -> impl Fn(&RuleVariables) -> Resolve + Send + Sync + 'static {
        move |_: &RuleVariables| Resolve::ready(score)
    }

    pub fn manual_dimension_selection(
        message: &str,
    ) -> impl Fn(&RuleVariables) -> Resolve + Send + Sync + 'static {
        let message = message.to_string();
        move |variables: &RuleVariables| {
            Resolve::manual(
                NORMAL_PRIORITY_ACTION,
                message.clone(),
                Resolutions::some_dimensions(&variables.data_cube),
            )
        }
    }

    pub fn remove_excessive_splits(
        visualization_title: &str,
    ) -> impl Fn(&RuleVariables) -> Resolve + Send + Sync + 'static {
        let title = visualization_title.to_string();
        move |variables: &RuleVariables| {
            let max_splits = variables.data_cube.max_splits();
            let kept = variables.splits.slice(0, max_splits);
            let removed: Vec<&str> = variables
                .splits
                .iter()
                .skip(max_splits)
                .map(|split| {
                    variables
                        .data_cube
                        .dimension(&split.reference)
                        .display_title()
                })
                .collect();
            Resolve::manual(
                NORMAL_PRIORITY_ACTION,
                format!("{title} supports only {max_splits} splits"),
                vec![Resolution::new(
                    format!("Remove excessive splits: {}", removed.join(", ")),
                    Adjustment::splits(kept),
                )],
            )
        }
    }

    pub fn manual_measures_selection<V>() -> impl Fn(&V) -> Resolve + Send + Sync + 'static
    where
        V: CubeVariables + 'static,
    {
        |variables: &V| {
            let data_cube = variables.data_cube();
            let defaults = Resolutions::default_selected_measures(data_cube);
            let resolutions = if defaults.is_empty() {
                Resolutions::first_measure(data_cube)
            } else {
                defaults
            };
            Resolve::manual(
                NORMAL_PRIORITY_ACTION,
                "At least one of the measures should be selected",
                resolutions,
            )
        }
    }
}
