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

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MAX_SPLITS: usize = 3;
pub const DEFAULT_LIMITS: [u32; 5] = [5, 10, 25, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    String,
    Number,
    Time,
    Boolean,
}

impl DimensionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionKind::String => "string",
            DimensionKind::Number => "number",
            DimensionKind::Time => "time",
            DimensionKind::Boolean => "boolean",
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, DimensionKind::Time | DimensionKind::Number)
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BucketingStrategy {
    DefaultBucket,
    DefaultNoBucket,
}

fn default_limits() -> Vec<u32> {
    DEFAULT_LIMITS.to_vec()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub kind: DimensionKind,
    /// `"self"` or the name of a measure/dimension to order this dimension by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucketing_strategy: Option<BucketingStrategy>,
    #[serde(default = "default_limits")]
    pub limits: Vec<u32>,
}

impl Dimension {
    pub fn new(name: impl Into<String>, kind: DimensionKind) -> Self {
        let name = name.into();
        Self {
            title: title_case(&name),
            name,
            kind,
            sort_strategy: None,
            bucketing_strategy: None,
            limits: default_limits(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_sort_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.sort_strategy = Some(strategy.into());
        self
    }

    pub fn with_bucketing_strategy(mut self, strategy: BucketingStrategy) -> Self {
        self.bucketing_strategy = Some(strategy);
        self
    }

    pub fn with_limits(mut self, limits: Vec<u32>) -> Self {
        self.limits = limits;
        self
    }

    pub fn is_continuous(&self) -> bool {
        self.kind.is_continuous()
    }

    pub fn can_bucket_by_default(&self) -> bool {
        self.is_continuous() && self.bucketing_strategy != Some(BucketingStrategy::DefaultNoBucket)
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    #[serde(default)]
    pub title: String,
}

impl Measure {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: title_case(&name),
            name,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

/// Schema root: the dimension and measure catalogs a query is built against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCube {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub measures: Vec<Measure>,
    #[serde(default)]
    pub default_selected_measures: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_splits: Option<usize>,
}

impl DataCube {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: title_case(&name),
            name,
            dimensions: Vec::new(),
            measures: Vec::new(),
            default_selected_measures: Vec::new(),
            max_splits: None,
        }
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measures.push(measure);
        self
    }

    pub fn with_default_selected_measures(mut self, measures: Vec<String>) -> Self {
        self.default_selected_measures = measures;
        self
    }

    pub fn with_max_splits(mut self, max_splits: usize) -> Self {
        self.max_splits = Some(max_splits);
        self
    }

    pub fn max_splits(&self) -> usize {
        self.max_splits.unwrap_or(DEFAULT_MAX_SPLITS)
    }

    pub fn get_dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Looks up a dimension that split or sort construction already checked.
    ///
    /// # Panics
    ///
    /// Panics when `name` is not a dimension of this cube. Rule evaluation
    /// relies on referential integrity established by whoever built the splits.
    pub fn dimension(&self, name: &str) -> &Dimension {
        self.get_dimension(name)
            .unwrap_or_else(|| panic!("dimension not found: '{name}' in '{}'", self.name))
    }

    pub fn try_dimension(&self, name: &str) -> Result<&Dimension, ModelError> {
        self.get_dimension(name)
            .ok_or_else(|| ModelError::DimensionNotFound {
                data_cube: self.name.clone(),
                name: name.to_string(),
            })
    }

    pub fn get_measure(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name == name)
    }

    pub fn try_measure(&self, name: &str) -> Result<&Measure, ModelError> {
        self.get_measure(name).ok_or_else(|| ModelError::MeasureNotFound {
            data_cube: self.name.clone(),
            name: name.to_string(),
        })
    }

    pub fn dimensions_by_kind(&self, kind: DimensionKind) -> Vec<&Dimension> {
        self.dimensions.iter().filter(|d| d.kind == kind).collect()
    }

    pub fn has_dimension_of_kind(&self, kind: DimensionKind) -> bool {
        self.dimensions.iter().any(|d| d.kind == kind)
    }

    pub fn continuous_dimensions(&self) -> Vec<&Dimension> {
        let mut dimensions = self.dimensions_by_kind(DimensionKind::Time);
        dimensions.extend(self.dimensions_by_kind(DimensionKind::Number));
        dimensions
    }

    pub fn default_measures(&self) -> Vec<&Measure> {
        self.default_selected_measures
            .iter()
            .filter_map(|name| self.get_measure(name))
            .collect()
    }
}

pub(crate) fn title_case(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '_' || c == '-' {
            title.push(' ');
            upper_next = true;
        } else if upper_next {
            title.extend(c.to_uppercase());
            upper_next = false;
        } else if c.is_uppercase() {
            title.push(' ');
            title.push(c);
        } else {
            title.push(c);
        }
    }
    title
}
