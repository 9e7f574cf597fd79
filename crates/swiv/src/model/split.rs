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

use super::data_cube::{Dimension, DimensionKind};
use super::sort::Sort;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TIME_BUCKET: &str = "P1D";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    String,
    Number,
    Time,
    Boolean,
}

impl From<DimensionKind> for SplitType {
    fn from(kind: DimensionKind) -> Self {
        match kind {
            DimensionKind::String => SplitType::String,
            DimensionKind::Number => SplitType::Number,
            DimensionKind::Time => SplitType::Time,
            DimensionKind::Boolean => SplitType::Boolean,
        }
    }
}

/// Granularity of a continuous split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bucket {
    Duration(String),
    Number(f64),
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Duration(duration) => f.write_str(duration),
            Bucket::Number(width) => write!(f, "{width}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    #[serde(rename = "type")]
    pub split_type: SplitType,
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<Bucket>,
    #[serde(default)]
    pub sort: Sort,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl Split {
    pub fn new(split_type: SplitType, reference: impl Into<String>) -> Self {
        Self {
            split_type,
            reference: reference.into(),
            bucket: None,
            sort: Sort::default(),
            limit: None,
        }
    }

    pub fn from_dimension(dimension: &Dimension) -> Self {
        let bucket = match dimension.kind {
            DimensionKind::Time => Some(Bucket::Duration(DEFAULT_TIME_BUCKET.to_string())),
            _ => None,
        };
        Self {
            bucket,
            ..Self::new(dimension.kind.into(), dimension.name.clone())
        }
    }

    pub fn change_sort(&self, sort: Sort) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    pub fn change_limit(&self, limit: Option<u32>) -> Self {
        Self {
            limit,
            ..self.clone()
        }
    }

    pub fn change_bucket(&self, bucket: Option<Bucket>) -> Self {
        Self {
            bucket,
            ..self.clone()
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference)?;
        if let Some(bucket) = &self.bucket {
            write!(f, " by {bucket}")?;
        }
        write!(f, " [{}]", self.sort)?;
        if let Some(limit) = self.limit {
            write!(f, " limit {limit}")?;
        }
        Ok(())
    }
}

/// Ordered list of splits; position defines pivot nesting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Splits {
    splits: Vec<Split>,
}

impl Splits {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_split(split: Split) -> Self {
        Self {
            splits: vec![split],
        }
    }

    pub fn from_splits(splits: Vec<Split>) -> Self {
        Self { splits }
    }

    pub fn from_dimension(dimension: &Dimension) -> Self {
        Self::from_split(Split::from_dimension(dimension))
    }

    pub fn len(&self) -> usize {
        self.splits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Split> {
        self.splits.get(index)
    }

    pub fn first(&self) -> Option<&Split> {
        self.splits.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Split> {
        self.splits.iter()
    }

    pub fn as_slice(&self) -> &[Split] {
        &self.splits
    }

    pub fn has_split_on(&self, dimension: &Dimension) -> bool {
        self.find_split_for_dimension(&dimension.name).is_some()
    }

    pub fn find_split_for_dimension(&self, reference: &str) -> Option<&Split> {
        self.splits.iter().find(|s| s.reference == reference)
    }

    /// Appends `split`, replacing any existing split on the same dimension.
    pub fn add_split(&self, split: Split) -> Self {
        let mut splits: Vec<Split> = self
            .splits
            .iter()
            .filter(|s| s.reference != split.reference)
            .cloned()
            .collect();
        splits.push(split);
        Self { splits }
    }

    pub fn insert(&self, index: usize, split: Split) -> Self {
        let mut splits = self.splits.clone();
        splits.insert(index.min(splits.len()), split);
        Self { splits }
    }

    pub fn remove_split(&self, reference: &str) -> Self {
        Self {
            splits: self
                .splits
                .iter()
                .filter(|s| s.reference != reference)
                .cloned()
                .collect(),
        }
    }

    pub fn replace(&self, index: usize, split: Split) -> Self {
        let mut splits = self.splits.clone();
        if let Some(slot) = splits.get_mut(index) {
            *slot = split;
        }
        Self { splits }
    }

    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.splits.len());
        let start = start.min(end);
        Self {
            splits: self.splits[start..end].to_vec(),
        }
    }

    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(&Split) -> Split,
    {
        Self {
            splits: self.splits.iter().map(f).collect(),
        }
    }

    pub fn references(&self) -> Vec<&str> {
        self.splits.iter().map(|s| s.reference.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Splits {
    type Item = &'a Split;
    type IntoIter = std::slice::Iter<'a, Split>;

    fn into_iter(self) -> Self::IntoIter {
        self.splits.iter()
    }
}

impl FromIterator<Split> for Splits {
    fn from_iter<I: IntoIterator<Item = Split>>(iter: I) -> Self {
        Self {
            splits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Splits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.splits.is_empty() {
            return f.write_str("(no splits)");
        }
        let rendered: Vec<String> = self.splits.iter().map(|s| s.to_string()).collect();
        f.write_str(&rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sort::SortDirection;

    fn time() -> Dimension {
        Dimension::new("time", DimensionKind::Time)
    }

    fn channel() -> Dimension {
        Dimension::new("channel", DimensionKind::String)
    }

    #[test]
    fn from_dimension_sets_type_and_default_bucket() {
        let split = Split::from_dimension(&time());
        assert_eq!(split.split_type, SplitType::Time);
        assert_eq!(split.bucket, Some(Bucket::Duration("P1D".into())));
        assert!(split.sort.is_empty());
        assert_eq!(split.limit, None);

        let split = Split::from_dimension(&channel());
        assert_eq!(split.split_type, SplitType::String);
        assert_eq!(split.bucket, None);
    }

    #[test]
    fn change_methods_leave_original_untouched() {
        let split = Split::from_dimension(&channel());
        let limited = split
            .change_limit(Some(5))
            .change_sort(Sort::by_series("added", SortDirection::Descending));
        assert_eq!(split.limit, None);
        assert!(split.sort.is_empty());
        assert_eq!(limited.limit, Some(5));
        assert_eq!(limited.sort.reference(), "added");
    }

    #[test]
    fn replace_swaps_in_range_and_ignores_out_of_range() {
        let splits = Splits::from_dimension(&channel()).add_split(Split::from_dimension(&time()));
        let replaced = splits.replace(0, Split::from_dimension(&channel()).change_limit(Some(25)));
        assert_eq!(replaced.references(), ["channel", "time"]);
        assert_eq!(replaced.get(0).and_then(|s| s.limit), Some(25));
        assert_eq!(splits.get(0).and_then(|s| s.limit), None);
        assert_eq!(splits.replace(5, Split::from_dimension(&channel())), splits);
    }

    #[test]
    fn add_split_replaces_split_on_same_dimension() {
        let splits = Splits::from_dimension(&channel()).add_split(Split::from_dimension(&time()));
        let splits = splits.add_split(Split::from_dimension(&channel()).change_limit(Some(10)));
        assert_eq!(splits.references(), ["time", "channel"]);
        assert_eq!(splits.get(1).and_then(|s| s.limit), Some(10));
    }

    #[test]
    fn slice_clamps_to_bounds() {
        let splits = Splits::from_splits(vec![
            Split::from_dimension(&time()),
            Split::from_dimension(&channel()),
        ]);
        assert_eq!(splits.slice(0, 1).references(), ["time"]);
        assert_eq!(splits.slice(1, 10).references(), ["channel"]);
        assert!(splits.slice(5, 10).is_empty());
    }

    #[test]
    fn splits_serialise_as_plain_array() {
        let splits = Splits::from_dimension(&channel());
        let json = serde_json::to_value(&splits).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["type"], "string");
        assert_eq!(json[0]["reference"], "channel");
    }
}
