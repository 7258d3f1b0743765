use std::sync::Arc;

use super::*;
use crate::farthest::FarthestVoronoi;
use crate::geom::{dist, Site};
use crate::model::Model;
use crate::nearest::NearestVoronoi;

fn sites(pts: &[(f64, f64)]) -> Vec<Site> {
    pts.iter()
        .enumerate()
        .map(|(i, &(x, y))| Site::new(x, y, i))
        .collect()
}

fn build_both(pts: &[(f64, f64)], seed: u64) -> Arc<Model> {
    let model = Arc::new(Model::new(sites(pts)));
    NearestVoronoi::new(Arc::clone(&model)).build();
    FarthestVoronoi::new(Arc::clone(&model), Some(seed)).build();
    model
}

/// Query points on an irrational grid over the site bounding box; skip
/// near-ties so the expected answer is unambiguous.
fn grid(pts: &[(f64, f64)]) -> Vec<Vec2> {
    let (mut x1, mut y1, mut x2, mut y2) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
    for &(x, y) in pts {
        x1 = x1.min(x);
        y1 = y1.min(y);
        x2 = x2.max(x);
        y2 = y2.max(y);
    }
    let mut out = Vec::new();
    let mut x = x1 - 8.31;
    while x < x2 + 8.31 {
        let mut y = y1 - 8.77;
        while y < y2 + 8.77 {
            out.push(Vec2::new(x, y));
            y += 1.618;
        }
        x += 1.414;
    }
    out
}

#[test]
fn nearest_locator_matches_brute_force() {
    let pts = [
        (0.0, 0.0),
        (10.0, 0.0),
        (5.0, 1.0),
        (5.0, 9.0),
        (10.0, 10.0),
        (2.0, 6.0),
    ];
    let model = build_both(&pts, 3);
    let state = model.lock();
    let locator = PointLocator::load(&state.nearest);

    for p in grid(&pts) {
        let mut best = 0usize;
        let mut runner_up = f64::MAX;
        for (i, s) in state.sites.iter().enumerate() {
            let d = dist(p, s.pos);
            if d < dist(p, state.sites[best].pos) {
                runner_up = dist(p, state.sites[best].pos);
                best = i;
            } else if i != best {
                runner_up = runner_up.min(d);
            }
        }
        if runner_up - dist(p, state.sites[best].pos) < 1e-6 {
            continue; // ambiguous query
        }
        assert_eq!(locator.locate(p), best, "query {p:?}");
    }
}

#[test]
fn farthest_locator_matches_brute_force() {
    let pts = [
        (0.0, 0.0),
        (10.0, 0.0),
        (5.0, 1.0),
        (5.0, 9.0),
        (10.0, 10.0),
        (2.0, 6.0),
    ];
    for seed in [0u64, 5] {
        let model = build_both(&pts, seed);
        let state = model.lock();
        let locator = PointLocator::load(&state.farthest);

        for p in grid(&pts) {
            let mut best = 0usize;
            let mut runner_up = f64::MIN;
            for (i, h) in state.hull.iter().enumerate() {
                let d = dist(p, h.pos);
                if d > dist(p, state.hull[best].pos) {
                    runner_up = dist(p, state.hull[best].pos);
                    best = i;
                } else if i != best {
                    runner_up = runner_up.max(d);
                }
            }
            if dist(p, state.hull[best].pos) - runner_up < 1e-6 {
                continue;
            }
            assert_eq!(locator.locate(p), best, "seed {seed}, query {p:?}");
        }
    }
}

#[test]
fn all_vertical_diagram_splits_left_right() {
    let model = build_both(&[(0.0, 0.0), (4.0, 0.0)], 0);
    let state = model.lock();

    let nearest = PointLocator::load(&state.nearest);
    assert_eq!(nearest.locate(Vec2::new(1.0, 0.5)), 0);
    assert_eq!(nearest.locate(Vec2::new(3.0, -0.5)), 1);

    let farthest = PointLocator::load(&state.farthest);
    // Hull indices: 0 is the far extreme (4,0), 1 the minimum (0,0).
    assert_eq!(farthest.locate(Vec2::new(1.0, 0.5)), 0);
    assert_eq!(farthest.locate(Vec2::new(3.0, -0.5)), 1);
}
