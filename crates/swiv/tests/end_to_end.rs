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

use anyhow::Result;
use std::sync::Arc;
use swiv::model::Bucket;
use swiv::rules::RuleVariables;
use swiv::{
    manifest_by_name, AppSettings, DataCube, Dimension, DimensionKind, Essence, Measure,
    ResolveState, SeriesList, Sort, SortDirection, Split, SplitType, Splits, VisStrategy,
};

fn wiki() -> Arc<DataCube> {
    Arc::new(
        DataCube::new("wiki")
            .with_dimension(Dimension::new("time", DimensionKind::Time))
            .with_dimension(Dimension::new("commentLength", DimensionKind::Number))
            .with_measure(Measure::new("added"))
            .with_default_selected_measures(vec!["added".into()]),
    )
}

fn settings() -> Arc<AppSettings> {
    Arc::new(AppSettings::default())
}

fn number_split_combine(reference: &str) -> Split {
    Split::new(SplitType::Number, reference)
        .change_bucket(Some(Bucket::Number(10.0)))
        .change_sort(Sort::by_dimension(reference, SortDirection::Ascending))
}

#[test]
fn time_split_resolves_to_ready_line_chart() -> Result<()> {
    let cube = wiki();
    let essence = Essence::from_data_cube(Arc::clone(&cube), settings())?;
    assert!(essence.splits().is_empty());

    let time = Split::from_dimension(cube.dimension("time"));
    let essence = essence.add_split(time, VisStrategy::FairGame)?;

    assert_eq!(essence.visualization().name, "line-chart");
    assert_eq!(essence.vis_resolve().state(), ResolveState::Ready);
    let split = essence.splits().first().expect("time split");
    assert_eq!(split.limit, None);
    assert_eq!(split.sort, Sort::by_dimension("time", SortDirection::Ascending));
    Ok(())
}

#[test]
fn number_split_resolves_to_ready_bar_chart() -> Result<()> {
    let essence = Essence::from_data_cube(wiki(), settings())?
        .add_split(number_split_combine("commentLength"), VisStrategy::FairGame)?;

    assert_eq!(essence.visualization().name, "bar-chart");
    assert_eq!(essence.vis_resolve().state(), ResolveState::Ready);
    let split = essence.splits().first().expect("number split");
    assert_eq!(split.limit, Some(25));
    assert_eq!(split.bucket, Some(Bucket::Number(10.0)));
    Ok(())
}

#[test]
fn bar_chart_without_splits_asks_for_one() {
    let bar_chart = manifest_by_name("bar-chart").expect("bar chart registered");
    let variables = RuleVariables::new(
        wiki(),
        settings(),
        Splits::empty(),
        SeriesList::from_keys(["added"]),
    );

    let resolve = bar_chart.evaluate_rules(&variables);

    assert!(resolve.is_manual());
    assert_eq!(resolve.message(), Some("The Bar Chart requires at least one split"));
}

#[test]
fn heatmap_with_three_splits_suggests_removal() {
    let cube = Arc::new(
        DataCube::new("wiki")
            .with_dimension(Dimension::new("channel", DimensionKind::String))
            .with_dimension(Dimension::new("page", DimensionKind::String))
            .with_dimension(Dimension::new("user", DimensionKind::String))
            .with_measure(Measure::new("added")),
    );
    let splits: Splits = ["channel", "page", "user"]
        .iter()
        .map(|name| Split::from_dimension(cube.dimension(name)))
        .collect();
    let heatmap = manifest_by_name("heatmap").expect("heatmap registered");

    let resolve = heatmap.evaluate_rules(&RuleVariables::new(
        cube,
        settings(),
        splits,
        SeriesList::from_keys(["added"]),
    ));

    assert!(resolve.is_manual());
    assert!(resolve
        .message()
        .is_some_and(|m| m.contains("needs exactly 2 splits")));
    let removal = &resolve.resolutions()[0];
    assert_eq!(removal.description, "Remove last split");
    assert_eq!(
        removal.adjustment.splits.as_ref().map(Splits::references),
        Some(vec!["channel", "page"])
    );
}

#[test]
fn pinned_visualization_is_kept_across_split_changes() -> Result<()> {
    let cube = wiki();
    let table = manifest_by_name("table").expect("table registered");
    let essence = Essence::new(
        Arc::clone(&cube),
        settings(),
        Some(table),
        Splits::from_dimension(cube.dimension("commentLength")),
        SeriesList::from_keys(["added"]),
    )?;
    assert_eq!(essence.visualization().name, "table");
    assert!(essence.vis_resolve().is_ready());

    // non-empty to non-empty favours the current visualization
    let time = Split::from_dimension(cube.dimension("time"))
        .change_sort(Sort::by_dimension("time", SortDirection::Descending));
    let splits = essence.splits().add_split(time);
    let essence = essence.change_splits(splits, VisStrategy::FairGame)?;
    assert_eq!(essence.visualization().name, "table");
    assert_eq!(essence.splits().references(), ["commentLength", "time"]);
    Ok(())
}
