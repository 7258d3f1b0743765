use std::fs;
use std::path::{Path, PathBuf};

use annulus::prelude::*;
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "annulus-cli")]
#[command(about = "Minimum-width annulus solver for planar point sets")]
struct Cmd {
    /// Site file: first line holds n, followed by n lines of "x y".
    input: PathBuf,

    /// Fix the randomized insertion order for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the full result as JSON instead of the plain width.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    center: [f64; 2],
    r_inner: f64,
    r_outer: f64,
    width: f64,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();

    let sites = read_sites(&cmd.input)
        .with_context(|| format!("reading sites from {}", cmd.input.display()))?;
    tracing::info!(sites = sites.len(), "solving");
    let ann = solve(sites, cmd.seed);

    let width = ann.width();
    let width = if width < 1e-6 { 0.0 } else { width };
    if cmd.json {
        let report = Report {
            center: [ann.center.x, ann.center.y],
            r_inner: ann.r_inner,
            r_outer: ann.r_outer,
            width,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Roundness = {width:.2}");
    }
    Ok(())
}

/// Parse the whitespace-separated site file; indices follow input order.
fn read_sites(path: &Path) -> Result<Vec<Site>> {
    let text = fs::read_to_string(path)?;
    let mut tokens = text.split_whitespace();
    let n: usize = tokens
        .next()
        .context("missing site count")?
        .parse()
        .context("site count is not an integer")?;
    if n < 2 {
        bail!("need at least 2 sites, got {n}");
    }

    let mut sites = Vec::with_capacity(n);
    for i in 0..n {
        let x: f64 = tokens
            .next()
            .with_context(|| format!("missing x coordinate of site {i}"))?
            .parse()
            .with_context(|| format!("bad x coordinate of site {i}"))?;
        let y: f64 = tokens
            .next()
            .with_context(|| format!("missing y coordinate of site {i}"))?
            .parse()
            .with_context(|| format!("bad y coordinate of site {i}"))?;
        sites.push(Site::new(x, y, i));
    }
    Ok(sites)
}
