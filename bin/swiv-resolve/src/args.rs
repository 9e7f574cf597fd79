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

use clap::Parser;
use swiv::VisStrategy;

#[derive(Parser, Debug)]
#[command(
    name = "swiv-resolve",
    version,
    about = "Pick and auto-correct the visualization for a split/measure query shape"
)]
pub struct Args {
    #[arg(
        long,
        default_value = "config/wikipedia.yml",
        help = "YAML or JSON file with app settings and data cubes"
    )]
    pub config: String,
    #[arg(long, default_value = "wiki", help = "Data cube to query")]
    pub cube: String,
    #[arg(
        long = "split",
        help = "Dimension to split on, in order; repeat for more splits"
    )]
    pub splits: Vec<String>,
    #[arg(
        long = "measure",
        help = "Measure to show; repeat for more, defaults to the cube's default measures"
    )]
    pub measures: Vec<String>,
    #[arg(long, help = "Pin a visualization by name, e.g. bar-chart")]
    pub visualization: Option<String>,
    #[arg(long, value_enum, default_value_t = StrategyArg::Fair)]
    pub strategy: StrategyArg,
    #[arg(long, help = "List every visualization's verdict")]
    pub all: bool,
    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,
    #[arg(long, short, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum StrategyArg {
    Fair,
    Unfair,
    KeepIfReady,
    KeepAlways,
}

impl From<StrategyArg> for VisStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Fair => VisStrategy::FairGame,
            StrategyArg::Unfair => VisStrategy::UnfairGame,
            StrategyArg::KeepIfReady => VisStrategy::KeepIfReady,
            StrategyArg::KeepAlways => VisStrategy::KeepAlways,
        }
    }
}
