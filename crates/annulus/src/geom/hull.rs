//! Graham-scan convex hull.

use std::cmp::Ordering;

use super::ops::{dist, turn};
use super::types::Site;

/// Convex hull in counter-clockwise order with no three collinear points,
/// anchored at the lowest point (ties broken towards smaller x). Input sites
/// keep their `idx`.
pub fn graham_scan_hull(points: &[Site]) -> Vec<Site> {
    let mut start = points[0];
    for p in points {
        if p.y() < start.y() || (p.y() == start.y() && p.x() < start.x()) {
            start = *p;
        }
    }

    struct HullPoint {
        p: Site,
        ang: f64,
        dist: f64,
    }

    let mut all: Vec<HullPoint> = points
        .iter()
        .map(|&p| HullPoint {
            p,
            ang: (p.y() - start.y()).atan2(p.x() - start.x()),
            dist: dist(p.pos, start.pos),
        })
        .collect();
    all.sort_by(|a, b| match a.ang.total_cmp(&b.ang) {
        Ordering::Equal => a.dist.total_cmp(&b.dist),
        o => o,
    });

    let mut hull: Vec<Site> = vec![all[0].p, all[1].p];
    for hp in &all[2..] {
        // Discard the last hull point while it fails to make a strict left
        // turn with the incoming one; `<= 0` also drops collinear interiors.
        while hull.len() >= 2
            && turn(hull[hull.len() - 2].pos, hull[hull.len() - 1].pos, hp.p.pos) <= 0
        {
            hull.pop();
        }
        hull.push(hp.p);
    }
    hull
}
