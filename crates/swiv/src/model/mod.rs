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

pub mod data_cube;
pub mod series;
pub mod sort;
pub mod split;

pub use data_cube::{BucketingStrategy, DataCube, Dimension, DimensionKind, Measure};
pub use series::{Series, SeriesList};
pub use sort::{DimensionSort, SeriesDerivation, SeriesSort, Sort, SortDirection};
pub use split::{Bucket, Split, SplitType, Splits};

use serde::{Deserialize, Serialize};

pub const DEFAULT_VISUALIZATION_COLORS: [&str; 10] = [
    "#2D95CA", "#EFB925", "#DA4E99", "#4CC873", "#745CBD", "#EA7136", "#E68EE0", "#218C35",
    "#B0B510", "#904064",
];

fn default_colors() -> Vec<String> {
    DEFAULT_VISUALIZATION_COLORS
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Application wide settings the rule sets consult.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default = "default_colors")]
    pub visualization_colors: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            visualization_colors: default_colors(),
        }
    }
}

impl AppSettings {
    pub fn with_colors(colors: Vec<String>) -> Self {
        Self {
            visualization_colors: colors,
        }
    }
}
