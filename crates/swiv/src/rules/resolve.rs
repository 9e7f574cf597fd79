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

use crate::model::{SeriesList, Splits};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;
pub const NEVER_SCORE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveState {
    Ready,
    Automatic,
    Manual,
    Never,
}

impl fmt::Display for ResolveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResolveState::Ready => "ready",
            ResolveState::Automatic => "automatic",
            ResolveState::Manual => "manual",
            ResolveState::Never => "never",
        })
    }
}

/// A proposed patch to the query. Absent parts are left as they are.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Adjustment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splits: Option<Splits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<SeriesList>,
}

impl Adjustment {
    pub fn splits(splits: Splits) -> Self {
        Self {
            splits: Some(splits),
            series: None,
        }
    }

    pub fn series(series: SeriesList) -> Self {
        Self {
            splits: None,
            series: Some(series),
        }
    }

    pub fn with_series(mut self, series: SeriesList) -> Self {
        self.series = Some(series);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub description: String,
    pub adjustment: Adjustment,
}

impl Resolution {
    pub fn new(description: impl Into<String>, adjustment: Adjustment) -> Self {
        Self {
            description: description.into(),
            adjustment,
        }
    }
}

/// Verdict of one visualization's rules for the current query shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolve {
    score: i32,
    state: ResolveState,
    #[serde(skip_serializing_if = "Option::is_none")]
    adjustment: Option<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    resolutions: Vec<Resolution>,
}

impl Resolve {
    /// The visualization can never be offered for this data cube.
    pub const NEVER: Resolve = Resolve {
        score: NEVER_SCORE,
        state: ResolveState::Never,
        adjustment: None,
        message: None,
        resolutions: Vec::new(),
    };

    fn new(
        score: i32,
        state: ResolveState,
        adjustment: Option<Adjustment>,
        message: Option<String>,
        resolutions: Vec<Resolution>,
    ) -> Self {
        Self {
            score: score.clamp(MIN_SCORE, MAX_SCORE),
            state,
            adjustment,
            message,
            resolutions,
        }
    }

    pub fn ready(score: i32) -> Self {
        Self::new(score, ResolveState::Ready, None, None, Vec::new())
    }

    pub fn automatic(score: i32, adjustment: Adjustment) -> Self {
        Self::new(score, ResolveState::Automatic, Some(adjustment), None, Vec::new())
    }

    pub fn manual(score: i32, message: impl Into<String>, resolutions: Vec<Resolution>) -> Self {
        Self::new(
            score,
            ResolveState::Manual,
            None,
            Some(message.into()),
            resolutions,
        )
    }

    /// Orders verdicts best first.
    pub fn compare(a: &Resolve, b: &Resolve) -> Ordering {
        b.score.cmp(&a.score)
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn state(&self) -> ResolveState {
        self.state
    }

    pub fn adjustment(&self) -> Option<&Adjustment> {
        self.adjustment.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    pub fn is_ready(&self) -> bool {
        self.state == ResolveState::Ready
    }

    pub fn is_automatic(&self) -> bool {
        self.state == ResolveState::Automatic
    }

    pub fn is_manual(&self) -> bool {
        self.state == ResolveState::Manual
    }

    pub fn is_never(&self) -> bool {
        self.state == ResolveState::Never
    }
}

impl fmt::Display for Resolve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.state, self.score)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}
