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

use std::sync::Arc;
use swiv::rules::RuleVariables;
use swiv::{
    manifest_by_name, manifests, AppSettings, DataCube, Dimension, DimensionKind, Measure,
    Resolve, SeriesList, Sort, SortDirection, Split, Splits,
};

fn wiki() -> Arc<DataCube> {
    Arc::new(
        DataCube::new("wiki")
            .with_dimension(Dimension::new("time", DimensionKind::Time))
            .with_dimension(Dimension::new("channel", DimensionKind::String))
            .with_dimension(Dimension::new("page", DimensionKind::String))
            .with_dimension(Dimension::new("user", DimensionKind::String))
            .with_dimension(Dimension::new("isRobot", DimensionKind::Boolean))
            .with_dimension(Dimension::new("commentLength", DimensionKind::Number))
            .with_measure(Measure::new("added"))
            .with_measure(Measure::new("deleted"))
            .with_max_splits(3),
    )
}

fn numbers_only() -> Arc<DataCube> {
    Arc::new(
        DataCube::new("metrics")
            .with_dimension(Dimension::new("time", DimensionKind::Time))
            .with_dimension(Dimension::new("latency", DimensionKind::Number))
            .with_measure(Measure::new("count")),
    )
}

fn strings_only() -> Arc<DataCube> {
    Arc::new(
        DataCube::new("catalog")
            .with_dimension(Dimension::new("category", DimensionKind::String))
            .with_measure(Measure::new("count")),
    )
}

fn splits_on(cube: &DataCube, references: &[&str]) -> Splits {
    references
        .iter()
        .map(|r| Split::from_dimension(cube.dimension(r)))
        .collect()
}

fn evaluate_on(cube: Arc<DataCube>, name: &str, splits: Splits, series: &[&str]) -> Resolve {
    let manifest = manifest_by_name(name).expect("registered visualization");
    manifest.evaluate_rules(&RuleVariables::new(
        cube,
        Arc::new(AppSettings::default()),
        splits,
        SeriesList::from_keys(series.iter().copied()),
    ))
}

fn evaluate(name: &str, references: &[&str], series: &[&str]) -> Resolve {
    let cube = wiki();
    let splits = splits_on(&cube, references);
    evaluate_on(cube, name, splits, series)
}

fn adjusted_splits(resolve: &Resolve) -> &Splits {
    resolve
        .adjustment()
        .and_then(|a| a.splits.as_ref())
        .expect("adjustment with splits")
}

fn descriptions(resolve: &Resolve) -> Vec<&str> {
    resolve
        .resolutions()
        .iter()
        .map(|r| r.description.as_str())
        .collect()
}

#[test]
fn totals_clears_splits() {
    assert_eq!(evaluate("totals", &[], &["added"]), Resolve::ready(10));
    let resolve = evaluate("totals", &["channel"], &["added"]);
    assert!(resolve.is_automatic());
    assert_eq!(resolve.score(), 3);
    assert!(adjusted_splits(&resolve).is_empty());
}

#[test]
fn table_limits_excessive_splits() {
    let resolve = evaluate("table", &["channel", "page", "user", "time"], &["added"]);
    assert!(resolve.is_manual());
    assert_eq!(resolve.message(), Some("Table supports only 3 splits"));
    assert_eq!(descriptions(&resolve), ["Remove excessive splits: Time"]);
}

#[test]
fn table_fills_limit_and_sort() {
    let resolve = evaluate("table", &["channel"], &["added"]);
    assert!(resolve.is_automatic());
    assert_eq!(resolve.score(), 6);
    let channel = adjusted_splits(&resolve).first().unwrap();
    assert_eq!(channel.limit, Some(5));
    assert_eq!(channel.sort, Sort::by_series("added", SortDirection::Descending));
}

#[test]
fn line_chart_needs_a_continuous_dimension() {
    let never = evaluate_on(strings_only(), "line-chart", Splits::empty(), &["count"]);
    assert!(never.is_never());
    assert_eq!(never.score(), -1);

    let resolve = evaluate("line-chart", &["channel"], &["added"]);
    assert!(resolve.is_manual());
    assert_eq!(
        resolve.message(),
        Some("The Line Chart needs one continuous dimension split")
    );
    assert_eq!(
        descriptions(&resolve),
        ["Split on Time instead", "Split on Comment Length instead"]
    );
}

#[test]
fn line_chart_puts_colour_split_first() {
    for references in [["time", "channel"], ["channel", "time"]] {
        let resolve = evaluate("line-chart", &references, &["added"]);
        assert!(resolve.is_automatic(), "{references:?}: {resolve}");
        assert_eq!(resolve.score(), 7);
        let splits = adjusted_splits(&resolve);
        assert_eq!(splits.references(), ["channel", "time"]);
        assert_eq!(splits.get(0).unwrap().limit, Some(5));
        assert_eq!(
            splits.get(1).unwrap().sort,
            Sort::by_dimension("time", SortDirection::Ascending)
        );
    }
}

#[test]
fn line_chart_offers_to_keep_only_time() {
    let resolve = evaluate("line-chart", &["channel", "page", "time"], &["added"]);
    assert!(resolve.is_manual());
    assert_eq!(resolve.message(), Some("Too many splits on the line chart"));
    assert_eq!(
        adjusted_splits_of_resolution(&resolve, 0).references(),
        ["time"]
    );
}

fn adjusted_splits_of_resolution(resolve: &Resolve, index: usize) -> &Splits {
    resolve.resolutions()[index]
        .adjustment
        .splits
        .as_ref()
        .expect("resolution with splits")
}

#[test]
fn bar_chart_normalises_category_splits() {
    let resolve = evaluate("bar-chart", &["channel", "page"], &["added"]);
    assert!(resolve.is_automatic());
    assert_eq!(resolve.score(), 5);
    let splits = adjusted_splits(&resolve).clone();
    assert!(splits.iter().all(|s| s.limit == Some(25)));

    let cube = wiki();
    let ready = evaluate_on(cube, "bar-chart", splits, &["added"]);
    assert_eq!(ready, Resolve::ready(7));
}

#[test]
fn bar_chart_sorts_bucketed_numbers_by_themselves() {
    let cube = wiki();
    let split = Split::from_dimension(cube.dimension("commentLength"))
        .change_sort(Sort::by_series("added", SortDirection::Ascending));
    let resolve = evaluate_on(cube, "bar-chart", Splits::from_split(split), &["added"]);
    assert_eq!(resolve.score(), 9);
    let adjusted = adjusted_splits(&resolve).first().unwrap();
    assert_eq!(
        adjusted.sort,
        Sort::by_dimension("commentLength", SortDirection::Ascending)
    );
}

#[test]
fn bar_chart_keeps_time_unlimited() {
    let resolve = evaluate("bar-chart", &["time", "channel"], &["added"]);
    assert!(resolve.is_automatic());
    let splits = adjusted_splits(&resolve);
    assert_eq!(splits.references(), ["time", "channel"]);
    assert_eq!(splits.get(0).unwrap().limit, None);
    assert_eq!(splits.get(1).unwrap().limit, Some(5));
}

#[test]
fn bar_chart_suggests_category_splits_otherwise() {
    let resolve = evaluate("bar-chart", &["time", "channel", "page"], &["added"]);
    assert!(resolve.is_manual());
    assert_eq!(
        resolve.message(),
        Some("The Bar Chart needs one or two category splits")
    );
    assert_eq!(
        descriptions(&resolve),
        [
            "Split on Channel instead",
            "Split on Page instead",
            "Split on Channel and Page instead"
        ]
    );
}

#[test]
fn heatmap_cardinality() {
    let resolve = evaluate("heatmap", &["channel"], &["added"]);
    assert_eq!(resolve.message(), Some("Heatmap needs exactly 2 splits"));
    assert_eq!(descriptions(&resolve), ["Add a split on Time"]);

    let resolve = evaluate("heatmap", &["channel", "page"], &["added", "deleted"]);
    assert_eq!(resolve.message(), Some("Heatmap needs exactly 1 measure"));
    assert_eq!(descriptions(&resolve), ["Show only Added", "Show only Deleted"]);

    let resolve = evaluate("heatmap", &["channel", "page"], &[]);
    assert_eq!(descriptions(&resolve), ["Select Added"]);

    let resolve = evaluate("heatmap", &["channel", "page"], &["added"]);
    assert!(resolve.is_automatic());
    assert_eq!(resolve.score(), 3);
}

#[test]
fn grid_sorts_rows_by_any_split() {
    let cube = wiki();
    let splits = Splits::from_splits(vec![
        Split::from_dimension(cube.dimension("channel"))
            .change_sort(Sort::by_dimension("page", SortDirection::Ascending))
            .change_limit(Some(10)),
        Split::from_dimension(cube.dimension("page")).change_limit(Some(10)),
    ]);
    let resolve = evaluate_on(cube, "grid", splits, &["added"]);
    assert!(resolve.is_automatic());
    assert_eq!(resolve.score(), 4);
    let adjusted = adjusted_splits(&resolve);
    let rows = adjusted.get(0).unwrap();
    assert_eq!(rows.sort, Sort::by_dimension("page", SortDirection::Ascending));
    assert_eq!(rows.limit, Some(10));
    assert_eq!(adjusted.get(1).unwrap().limit, None);

    let resolve = evaluate("grid", &[], &["added"]);
    assert_eq!(resolve.message(), Some("The Grid requires at least one split"));
}

#[test]
fn scatterplot_needs_two_measures_and_one_split() {
    let resolve = evaluate("scatterplot", &["channel"], &["added"]);
    assert_eq!(
        resolve.message(),
        Some("The Scatterplot needs exactly 2 measures")
    );
    assert_eq!(descriptions(&resolve), ["Select Added and Deleted"]);

    let resolve = evaluate("scatterplot", &["channel", "page"], &["added", "deleted"]);
    assert_eq!(resolve.message(), Some("The Scatterplot needs exactly 1 split"));
    assert_eq!(descriptions(&resolve), ["Remove last split"]);

    let resolve = evaluate("scatterplot", &["channel"], &["added", "deleted"]);
    assert!(resolve.is_automatic());
    assert_eq!(resolve.score(), 3);
}

#[test]
fn marimekko_wants_categorical_splits() {
    let never = evaluate_on(numbers_only(), "marimekko", Splits::empty(), &["count"]);
    assert!(never.is_never());

    let resolve = evaluate("marimekko", &["time"], &["added"]);
    assert_eq!(resolve.message(), Some("The Marimekko needs categorical splits"));

    let resolve = evaluate("marimekko", &["channel", "page", "user"], &["added"]);
    assert_eq!(descriptions(&resolve), ["Remove last split"]);

    let resolve = evaluate("marimekko", &["channel", "isRobot"], &["added"]);
    assert!(resolve.is_automatic());
    assert_eq!(resolve.score(), 2);
    let splits = adjusted_splits(&resolve);
    assert_eq!(splits.get(0).unwrap().limit, Some(5));
    assert_eq!(splits.get(1).unwrap().limit, Some(5));
}

#[test]
fn automatic_adjustments_settle_in_one_step() {
    let cube = wiki();
    let names: Vec<&str> = cube.dimensions.iter().map(|d| d.name.as_str()).collect();
    let mut shapes: Vec<Vec<&str>> = names.iter().map(|n| vec![*n]).collect();
    for first in &names {
        for second in &names {
            if first != second {
                shapes.push(vec![*first, *second]);
            }
        }
    }
    for manifest in manifests() {
        for shape in &shapes {
            let variables = RuleVariables::new(
                Arc::clone(&cube),
                Arc::new(AppSettings::default()),
                splits_on(&cube, shape),
                SeriesList::from_keys(["added"]),
            )
            .selected(true);
            let resolve = manifest.evaluate_rules(&variables);
            if let Some(adjustment) = resolve.adjustment() {
                let splits = adjustment.splits.clone().unwrap_or_else(|| variables.splits.clone());
                let settled = manifest.evaluate_rules(&variables.with_splits(splits));
                assert!(
                    settled.is_ready(),
                    "{} on {shape:?} did not settle: {settled}",
                    manifest.name
                );
            }
        }
    }
}
