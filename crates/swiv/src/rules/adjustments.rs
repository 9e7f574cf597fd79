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

//! Split normalisation steps composed by the rule tables with [`thread`].

use crate::model::{Dimension, DimensionKind, SeriesList, Sort, SortDirection, Split, SplitType};

pub const COLOR_LIMITS: [u32; 5] = [3, 5, 7, 9, 10];
pub const DEFAULT_COLOR_LIMIT: u32 = 5;
pub const SELF_SORT_STRATEGY: &str = "self";

/// Passes `value` through `steps` left to right.
pub fn thread<T>(value: T, steps: &[&dyn Fn(T) -> T]) -> T {
    steps.iter().fold(value, |acc, step| step(acc))
}

/// Full range, naturally ordered: no limit, ascending on the split itself.
pub fn adjust_continuous_split(split: Split) -> Split {
    let sort = Sort::by_dimension(split.reference.clone(), SortDirection::Ascending);
    split.change_sort(sort).change_limit(None)
}

/// Snaps a limit outside `available_limits` to the first allowed value.
pub fn adjust_finite_limit(available_limits: Vec<Option<u32>>) -> impl Fn(Split) -> Split {
    let default_limit = available_limits.first().copied().flatten();
    adjust_finite_limit_with_default(available_limits, default_limit)
}

pub fn adjust_finite_limit_with_default(
    available_limits: Vec<Option<u32>>,
    default_limit: Option<u32>,
) -> impl Fn(Split) -> Split {
    move |split: Split| {
        if available_limits.contains(&split.limit) {
            split
        } else {
            split.change_limit(default_limit)
        }
    }
}

/// Limits declared on the dimension; time splits may also stay unlimited.
pub fn available_limits(dimension: &Dimension) -> Vec<Option<u32>> {
    let mut limits: Vec<Option<u32>> = dimension.limits.iter().copied().map(Some).collect();
    if dimension.kind == DimensionKind::Time {
        limits.push(None);
    }
    limits
}

pub fn adjust_limit(dimension: &Dimension) -> impl Fn(Split) -> Split {
    adjust_finite_limit(available_limits(dimension))
}

pub fn adjust_sort<'a>(
    dimension: &'a Dimension,
    series: &'a SeriesList,
) -> impl Fn(Split) -> Split + 'a {
    adjust_sort_within(dimension, series, vec![dimension.name.clone()])
}

/// Repairs a dimension sort that points outside `available_dimensions`.
///
/// Series sorts and dimension sorts on an available dimension pass through.
/// Otherwise the dimension's sort strategy picks the replacement, falling back
/// to the first series for string splits and to the dimension itself for the
/// rest. Replacements are always descending.
pub fn adjust_sort_within<'a>(
    dimension: &'a Dimension,
    series: &'a SeriesList,
    available_dimensions: Vec<String>,
) -> impl Fn(Split) -> Split + 'a {
    move |split: Split| {
        let reference = match &split.sort {
            Sort::Series(_) => return split,
            Sort::Dimension(sort) => sort.reference.as_str(),
        };
        if available_dimensions.iter().any(|d| d == reference) {
            return split;
        }
        let self_sort = Sort::by_dimension(dimension.name.clone(), SortDirection::Descending);
        if let Some(strategy) = dimension.sort_strategy.as_deref() {
            if strategy == SELF_SORT_STRATEGY || strategy == split.reference {
                return split.change_sort(self_sort);
            }
            if series.has_measure_series(strategy) {
                return split.change_sort(Sort::by_series(strategy, SortDirection::Descending));
            }
        }
        match (split.split_type, series.first()) {
            (SplitType::String, Some(first)) => {
                let sort = Sort::by_series(first.key(), SortDirection::Descending);
                split.change_sort(sort)
            }
            _ => split.change_sort(self_sort),
        }
    }
}

/// Colour limits that fit the palette, or the palette size when none do.
pub fn color_limits(colors: &[String]) -> Vec<u32> {
    let palette = u32::try_from(colors.len()).unwrap_or(u32::MAX);
    let limits: Vec<u32> = COLOR_LIMITS
        .iter()
        .copied()
        .filter(|limit| *limit <= palette)
        .collect();
    if limits.is_empty() {
        vec![palette.max(1)]
    } else {
        limits
    }
}

pub fn adjust_color_split(
    split: Split,
    dimension: &Dimension,
    series: &SeriesList,
    colors: &[String],
) -> Split {
    let limits = color_limits(colors);
    let default_limit = limits
        .iter()
        .copied()
        .filter(|limit| *limit <= DEFAULT_COLOR_LIMIT)
        .max()
        .or_else(|| limits.first().copied());
    let available = limits.into_iter().map(Some).collect();
    thread(
        split,
        &[
            &adjust_sort(dimension, series),
            &adjust_finite_limit_with_default(available, default_limit),
        ],
    )
}
