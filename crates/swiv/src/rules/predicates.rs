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

use super::{CubeVariables, RuleVariables};
use crate::model::DimensionKind;

pub const ANY_KIND: &str = "*";
pub const NOT_PREFIX: char = '!';

/// `*` matches anything, `!kind` matches anything but `kind`, any other
/// selector must equal the kind exactly.
pub fn test_kind(kind: &str, selector: &str) -> bool {
    if selector == ANY_KIND {
        return true;
    }
    match selector.strip_prefix(NOT_PREFIX) {
        Some(excluded) => kind != excluded,
        None => kind == selector,
    }
}

/// Positional match of `kinds` against `selectors`; lengths must agree.
pub fn strict_compare<S, K>(selectors: &[S], kinds: &[K]) -> bool
where
    S: AsRef<str>,
    K: AsRef<str>,
{
    selectors.len() == kinds.len()
        && selectors
            .iter()
            .zip(kinds)
            .all(|(selector, kind)| test_kind(kind.as_ref(), selector.as_ref()))
}

fn split_kinds(variables: &RuleVariables) -> Vec<DimensionKind> {
    variables
        .splits
        .iter()
        .map(|split| variables.data_cube.dimension(&split.reference).kind)
        .collect()
}

pub fn no_splits() -> impl Fn(&RuleVariables) -> bool + Send + Sync + 'static {
    |variables: &RuleVariables| variables.splits.is_empty()
}

pub fn number_of_splits_is_not(n: usize) -> impl Fn(&RuleVariables) -> bool + Send + Sync + 'static {
    move |variables: &RuleVariables| variables.splits.len() != n
}

pub fn number_of_series_is_not(n: usize) -> impl Fn(&RuleVariables) -> bool + Send + Sync + 'static {
    move |variables: &RuleVariables| variables.series.count() != n
}

pub fn are_exact_split_kinds(
    selectors: &[&str],
) -> impl Fn(&RuleVariables) -> bool + Send + Sync + 'static {
    let selectors: Vec<String> = selectors.iter().map(|s| s.to_string()).collect();
    move |variables: &RuleVariables| {
        if selectors.len() != variables.splits.len() {
            return false;
        }
        let kinds: Vec<&str> = split_kinds(variables).iter().map(|k| k.as_str()).collect();
        strict_compare(&selectors, &kinds)
    }
}

pub fn have_at_least_split_kinds(
    kinds: &[DimensionKind],
) -> impl Fn(&RuleVariables) -> bool + Send + Sync + 'static {
    let required = kinds.to_vec();
    move |variables: &RuleVariables| {
        let actual = split_kinds(variables);
        required.iter().all(|kind| actual.contains(kind))
    }
}

/// True when there are more splits than the data cube allows.
pub fn supported_splits_count() -> impl Fn(&RuleVariables) -> bool + Send + Sync + 'static {
    |variables: &RuleVariables| variables.data_cube.max_splits() < variables.splits.len()
}

pub fn no_selected_measures<V>() -> impl Fn(&V) -> bool + Send + Sync + 'static
where
    V: CubeVariables + 'static,
{
    |variables: &V| variables.series().is_empty()
}

pub fn lacks_dimension_kinds(
    kinds: &[DimensionKind],
) -> impl Fn(&RuleVariables) -> bool + Send + Sync + 'static {
    let kinds = kinds.to_vec();
    move |variables: &RuleVariables| {
        !kinds
            .iter()
            .any(|kind| variables.data_cube.has_dimension_of_kind(*kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppSettings, DataCube, Dimension, Measure, SeriesList, Split, Splits};
    use proptest::prelude::*;
    use std::sync::Arc;

    const KINDS: [&str; 4] = ["string", "number", "time", "boolean"];

    fn cube() -> DataCube {
        DataCube::new("wiki")
            .with_dimension(Dimension::new("time", DimensionKind::Time))
            .with_dimension(Dimension::new("channel", DimensionKind::String))
            .with_dimension(Dimension::new("page", DimensionKind::String))
            .with_dimension(Dimension::new("commentLength", DimensionKind::Number))
            .with_measure(Measure::new("added"))
            .with_max_splits(2)
    }

    fn variables(references: &[&str], series: &[&str]) -> RuleVariables {
        let cube = cube();
        let splits: Splits = references
            .iter()
            .map(|r| Split::from_dimension(cube.dimension(r)))
            .collect();
        RuleVariables {
            data_cube: Arc::new(cube),
            splits,
            series: SeriesList::from_keys(series.iter().copied()),
            app_settings: Arc::new(AppSettings::default()),
            is_selected_visualization: false,
        }
    }

    #[test]
    fn strict_compare_examples() {
        assert!(strict_compare(&["time", "*"], &["time", "tut"]));
        assert!(!strict_compare(&["time", "*"], &["pouet", "time"]));
        assert!(!strict_compare(&["time"], &["time", "string"]));
        assert!(strict_compare(&["!time", "number"], &["string", "number"]));
        assert!(strict_compare::<&str, &str>(&[], &[]));
    }

    #[test]
    fn exact_split_kinds_is_positional() {
        let vars = variables(&["time", "channel"], &["added"]);
        assert!(are_exact_split_kinds(&["time", "string"])(&vars));
        assert!(are_exact_split_kinds(&["time", "*"])(&vars));
        assert!(!are_exact_split_kinds(&["string", "time"])(&vars));
        assert!(!are_exact_split_kinds(&["*"])(&vars));
        assert!(are_exact_split_kinds(&["!number", "!time"])(&vars));
    }

    #[test]
    fn at_least_split_kinds_ignores_order() {
        let vars = variables(&["channel", "time"], &[]);
        assert!(have_at_least_split_kinds(&[DimensionKind::Time])(&vars));
        assert!(have_at_least_split_kinds(&[
            DimensionKind::Time,
            DimensionKind::String
        ])(&vars));
        assert!(!have_at_least_split_kinds(&[DimensionKind::Number])(&vars));
    }

    #[test]
    fn arity_predicates() {
        let none = variables(&[], &[]);
        let two = variables(&["channel", "page"], &["added"]);
        assert!(no_splits()(&none));
        assert!(!no_splits()(&two));
        assert!(number_of_splits_is_not(1)(&two));
        assert!(!number_of_splits_is_not(2)(&two));
        assert!(number_of_series_is_not(2)(&two));
        assert!(no_selected_measures::<RuleVariables>()(&none));
        assert!(!no_selected_measures::<RuleVariables>()(&two));
    }

    #[test]
    fn split_count_predicate_fires_above_max_splits() {
        assert!(!supported_splits_count()(&variables(&["channel", "page"], &[])));
        assert!(supported_splits_count()(&variables(
            &["channel", "page", "time"],
            &[]
        )));
    }

    proptest! {
        #[test]
        fn kind_matcher_rules(kind in prop::sample::select(KINDS.to_vec()),
                              other in prop::sample::select(KINDS.to_vec())) {
            prop_assert!(test_kind(kind, "*"));
            prop_assert_eq!(test_kind(kind, other), kind == other);
            let negated = format!("!{other}");
            prop_assert_eq!(test_kind(kind, &negated), kind != other);
        }
    }
}
