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

mod args;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use serde::Serialize;
use swiv::{try_manifest_by_name, Essence, Resolve, SeriesList, Splits, VisualizationResolver};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    data_cube: &'a str,
    visualization: &'static str,
    splits: &'a Splits,
    series: &'a SeriesList,
    resolve: &'a Resolve,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ranking: Vec<Verdict>,
}

#[derive(Serialize)]
struct Verdict {
    visualization: &'static str,
    resolve: Resolve,
}

fn resolve_query(args: &Args) -> Result<Essence> {
    let resolver = VisualizationResolver::from_config_file(&args.config)
        .with_context(|| format!("loading {}", args.config))?;
    let mut essence = resolver.essence(&args.cube)?;
    if !args.measures.is_empty() {
        essence = essence.change_series(resolver.series_of(&args.cube, &args.measures)?)?;
    }
    if let Some(name) = &args.visualization {
        essence = essence.change_visualization(try_manifest_by_name(name)?)?;
    }
    for reference in &args.splits {
        let split = resolver.split_on(&args.cube, reference)?;
        debug!(split = %split, "adding split");
        essence = essence
            .add_split(split, args.strategy.into())
            .with_context(|| format!("adding split on {reference}"))?;
    }
    Ok(essence)
}

fn print_text(essence: &Essence, ranking: &[Verdict]) {
    println!("Visualization: {}", essence.visualization());
    println!("Verdict:       {}", essence.vis_resolve());
    println!("Splits:        {}", essence.splits());
    println!("Series:        {}", essence.series());
    for resolution in essence.vis_resolve().resolutions() {
        println!("  - {}", resolution.description);
    }
    if !ranking.is_empty() {
        println!();
        for verdict in ranking {
            println!("{:<12} {}", verdict.visualization, verdict.resolve);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let essence = resolve_query(&args)?;
    info!(
        visualization = essence.visualization().name,
        state = %essence.vis_resolve().state(),
        "resolved"
    );

    let ranking: Vec<Verdict> = if args.all {
        essence
            .rank()
            .into_iter()
            .map(|(manifest, resolve)| Verdict {
                visualization: manifest.name,
                resolve,
            })
            .collect()
    } else {
        Vec::new()
    };

    if args.json {
        let report = Report {
            data_cube: &args.cube,
            visualization: essence.visualization().name,
            splits: essence.splits(),
            series: essence.series(),
            resolve: essence.vis_resolve(),
            ranking,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&essence, &ranking);
    }
    Ok(())
}
