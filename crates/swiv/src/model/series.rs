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

use super::data_cube::Measure;
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A measure selected for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Series {
    pub reference: String,
}

impl Series {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    pub fn from_measure(measure: &Measure) -> Self {
        Self::new(measure.name.clone())
    }

    pub fn key(&self) -> &str {
        &self.reference
    }
}

/// Ordered, duplicate-free list of series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Series>", into = "Vec<Series>")]
pub struct SeriesList {
    series: Vec<Series>,
}

impl SeriesList {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_measures<'a, I>(measures: I) -> Self
    where
        I: IntoIterator<Item = &'a Measure>,
    {
        measures.into_iter().map(Series::from_measure).collect()
    }

    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter().map(Series::new).collect()
    }

    pub fn count(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn first(&self) -> Option<&Series> {
        self.series.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.series.iter().map(Series::key).collect()
    }

    pub fn has_measure_series(&self, reference: &str) -> bool {
        self.series.iter().any(|s| s.reference == reference)
    }

    pub fn get_series(&self, key: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.key() == key)
    }

    pub fn add_series(&self, series: Series) -> Result<Self, ModelError> {
        if self.get_series(series.key()).is_some() {
            return Err(ModelError::DuplicateSeries {
                key: series.key().to_string(),
            });
        }
        let mut next = self.series.clone();
        next.push(series);
        Ok(Self { series: next })
    }

    pub fn remove_series(&self, key: &str) -> Self {
        Self {
            series: self
                .series
                .iter()
                .filter(|s| s.key() != key)
                .cloned()
                .collect(),
        }
    }
}

impl FromIterator<Series> for SeriesList {
    fn from_iter<I: IntoIterator<Item = Series>>(iter: I) -> Self {
        let mut series: Vec<Series> = Vec::new();
        for s in iter {
            if !series.iter().any(|existing| existing.key() == s.key()) {
                series.push(s);
            }
        }
        Self { series }
    }
}

impl From<Vec<Series>> for SeriesList {
    fn from(series: Vec<Series>) -> Self {
        series.into_iter().collect()
    }
}

impl From<SeriesList> for Vec<Series> {
    fn from(list: SeriesList) -> Self {
        list.series
    }
}

impl<'a> IntoIterator for &'a SeriesList {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}

impl fmt::Display for SeriesList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.series.is_empty() {
            return f.write_str("(no series)");
        }
        f.write_str(&self.keys().join(", "))
    }
}
