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

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

/// Which value of a series a sort looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesDerivation {
    #[default]
    Current,
    Previous,
    Delta,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DimensionSort {
    pub reference: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesSort {
    pub reference: String,
    pub direction: SortDirection,
    #[serde(default)]
    pub period: SeriesDerivation,
}

/// Ordering applied to the rows produced by a split.
///
/// A sort with an empty reference is "empty": the split has not been given an
/// ordering yet and rule sets are expected to pick one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "sortType", rename_all = "lowercase")]
pub enum Sort {
    Dimension(DimensionSort),
    Series(SeriesSort),
}

impl Default for Sort {
    fn default() -> Self {
        Sort::Dimension(DimensionSort::default())
    }
}

impl Sort {
    pub fn by_dimension(reference: impl Into<String>, direction: SortDirection) -> Self {
        Sort::Dimension(DimensionSort {
            reference: reference.into(),
            direction,
        })
    }

    pub fn by_series(reference: impl Into<String>, direction: SortDirection) -> Self {
        Sort::Series(SeriesSort {
            reference: reference.into(),
            direction,
            period: SeriesDerivation::Current,
        })
    }

    pub fn by_series_period(
        reference: impl Into<String>,
        direction: SortDirection,
        period: SeriesDerivation,
    ) -> Self {
        Sort::Series(SeriesSort {
            reference: reference.into(),
            direction,
            period,
        })
    }

    pub fn reference(&self) -> &str {
        match self {
            Sort::Dimension(sort) => &sort.reference,
            Sort::Series(sort) => &sort.reference,
        }
    }

    pub fn direction(&self) -> SortDirection {
        match self {
            Sort::Dimension(sort) => sort.direction,
            Sort::Series(sort) => sort.direction,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reference().is_empty()
    }

    pub fn is_series_sort(&self) -> bool {
        matches!(self, Sort::Series(_))
    }

    pub fn change_direction(&self, direction: SortDirection) -> Self {
        match self {
            Sort::Dimension(sort) => Sort::Dimension(DimensionSort {
                direction,
                ..sort.clone()
            }),
            Sort::Series(sort) => Sort::Series(SeriesSort {
                direction,
                ..sort.clone()
            }),
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Dimension(sort) if sort.reference.is_empty() => write!(f, "unsorted"),
            Sort::Dimension(sort) => write!(f, "{} {}", sort.reference, sort.direction),
            Sort::Series(sort) => match sort.period {
                SeriesDerivation::Current => write!(f, "{} {}", sort.reference, sort.direction),
                SeriesDerivation::Previous => {
                    write!(f, "{} (previous) {}", sort.reference, sort.direction)
                }
                SeriesDerivation::Delta => {
                    write!(f, "{} (delta) {}", sort.reference, sort.direction)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_flips_direction() {
        assert_eq!(SortDirection::Ascending.reverse(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.reverse().reverse(), SortDirection::Descending);
        let sort = Sort::by_series("added", SortDirection::Descending);
        let flipped = sort.change_direction(sort.direction().reverse());
        assert_eq!(flipped.direction(), SortDirection::Ascending);
        assert_eq!(flipped.reference(), "added");
    }

    #[test]
    fn default_sort_is_empty_dimension_sort() {
        let sort = Sort::default();
        assert!(sort.is_empty());
        assert!(!sort.is_series_sort());
        assert_eq!(sort.direction(), SortDirection::Descending);
    }

    #[test]
    fn equality_covers_variant_and_period() {
        let current = Sort::by_series("added", SortDirection::Descending);
        let previous =
            Sort::by_series_period("added", SortDirection::Descending, SeriesDerivation::Previous);
        assert_ne!(current, previous);
        assert_ne!(current, Sort::by_dimension("added", SortDirection::Descending));
        assert_eq!(
            current.change_direction(SortDirection::Ascending),
            Sort::by_series("added", SortDirection::Ascending)
        );
    }

    #[test]
    fn sort_type_tag_round_trips_through_json() {
        let sort = Sort::by_dimension("channel", SortDirection::Ascending);
        let json = serde_json::to_value(&sort).unwrap();
        assert_eq!(json["sortType"], "dimension");
        assert_eq!(json["direction"], "ascending");
        let back: Sort = serde_json::from_value(json).unwrap();
        assert_eq!(back, sort);
    }
}
