//! End-to-end solver: two diagram producers, one finder, three OS threads.
//!
//! The producers run concurrently and synchronize only through the model's
//! mutex; their join handles are the completion handles the finder blocks on,
//! so it always observes both diagrams fully built. Started work runs to
//! completion; there is no cancellation path.

use std::sync::Arc;

use crate::farthest::FarthestVoronoi;
use crate::finder::AnnulusFinder;
use crate::geom::{Annulus, Site};
use crate::model::Model;
use crate::nearest::NearestVoronoi;

/// Solve the minimum-width annulus problem for at least two sites. `seed`
/// fixes the farthest-point insertion order for reproducible runs.
pub fn solve(sites: Vec<Site>, seed: Option<u64>) -> Annulus {
    assert!(sites.len() >= 2, "the annulus needs at least two sites");
    let model = Arc::new(Model::new(sites));

    let nearest = NearestVoronoi::spawn(Arc::clone(&model));
    let farthest = FarthestVoronoi::spawn(Arc::clone(&model), seed);
    let finder = AnnulusFinder::spawn(Arc::clone(&model), nearest, farthest);

    finder.join().expect("annulus finder panicked");
    model.annulus()
}

/// Convenience entry point: coordinates in input order become sites 0..n.
pub fn solve_points(points: &[(f64, f64)], seed: Option<u64>) -> Annulus {
    let sites = points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Site::new(x, y, i))
        .collect();
    solve(sites, seed)
}

#[cfg(test)]
mod tests;
