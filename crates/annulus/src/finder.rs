//! Candidate enumeration and selection of the minimum-width annulus.
//!
//! The optimal center is a vertex of the overlay of the two diagrams, so it
//! is enough to score three candidate families: nearest-diagram vertices,
//! farthest-diagram vertices, and crossings of one edge from each. For every
//! candidate the tight annulus radii are read off the two diagrams (one via
//! the incident face, the other via a point-location query).

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::dcel::{Dcel, HedgeId};
use crate::geom::{
    all_collinear, check_halfline_side, check_order, dist, line_intersect, midpoint, parallel,
    Annulus, Site, Vec2,
};
use crate::locate::PointLocator;
use crate::model::Model;

pub struct AnnulusFinder {
    model: Arc<Model>,
}

impl AnnulusFinder {
    pub fn new(model: Arc<Model>) -> Self {
        Self { model }
    }

    /// Run on a worker thread once both producers resolve.
    pub fn spawn(
        model: Arc<Model>,
        nearest: JoinHandle<()>,
        farthest: JoinHandle<()>,
    ) -> JoinHandle<()> {
        thread::spawn(move || Self::new(model).merge_and_find(nearest, farthest))
    }

    pub fn merge_and_find(self, nearest: JoinHandle<()>, farthest: JoinHandle<()>) {
        nearest.join().expect("nearest Voronoi worker panicked");
        farthest.join().expect("farthest-point Voronoi worker panicked");

        let mut guard = self.model.lock();
        let state = &mut *guard;
        let nearest_pl = PointLocator::load(&state.nearest);
        let farthest_pl = PointLocator::load(&state.farthest);

        Self::generate_candidates(
            &state.sites,
            &state.hull,
            &state.nearest,
            &state.farthest,
            &nearest_pl,
            &farthest_pl,
            &mut state.candidates,
        );
        state.find_best_annulus();

        let width = state.annulus.width();
        tracing::info!(
            candidates = state.candidates.len(),
            width,
            "minimum-width annulus selected"
        );
    }

    fn generate_candidates(
        sites: &[Site],
        hull: &[Site],
        nearest: &Dcel,
        farthest: &Dcel,
        nearest_pl: &PointLocator,
        farthest_pl: &PointLocator,
        candidates: &mut Vec<Annulus>,
    ) {
        // Fully collinear input: the annulus degenerates to the circle pair
        // through the two extremes; every finite center is strictly worse.
        if all_collinear(sites) {
            let center = midpoint(hull[0].pos, hull[1].pos);
            let r = dist(hull[0].pos, hull[1].pos) / 2.0;
            candidates.push(Annulus {
                center,
                r_inner: r,
                r_outer: r,
            });
        }

        // Family 1: nearest-diagram vertices.
        for (_, vert) in nearest.vertices() {
            if vert.is_box {
                continue;
            }
            let he = vert.incident.expect("diagram vertex has an incident edge");
            let site = nearest.hedge_site(he);
            let center = vert.point;
            candidates.push(Annulus {
                center,
                r_inner: dist(center, sites[site].pos),
                r_outer: dist(center, hull[farthest_pl.locate(center)].pos),
            });
        }

        // Family 2: farthest-diagram vertices.
        for (_, vert) in farthest.vertices() {
            if vert.is_box {
                continue;
            }
            let he = vert.incident.expect("diagram vertex has an incident edge");
            let hull_idx = farthest.hedge_site(he);
            let center = vert.point;
            candidates.push(Annulus {
                center,
                r_inner: dist(center, sites[nearest_pl.locate(center)].pos),
                r_outer: dist(center, hull[hull_idx].pos),
            });
        }

        // Family 3: crossings of a nearest edge with a farthest edge.
        for e1 in Self::diagram_edges(nearest) {
            for e2 in Self::diagram_edges(farthest) {
                let l1 = nearest.hedge(e1).line;
                let l2 = farthest.hedge(e2).line;
                if parallel(l1, l2) {
                    continue;
                }
                let inter = line_intersect(l1, l2);
                if !Self::on_edge(nearest, e1, inter) || !Self::on_edge(farthest, e2, inter) {
                    continue;
                }
                candidates.push(Annulus {
                    center: inter,
                    r_inner: dist(inter, sites[nearest.hedge_site(e1)].pos),
                    r_outer: dist(inter, hull[farthest.hedge_site(e2)].pos),
                });
            }
        }
    }

    /// One representative per non-box twin pair, oriented to start at its
    /// interior endpoint.
    fn diagram_edges(dcel: &Dcel) -> Vec<HedgeId> {
        let mut out = Vec::new();
        for (id, he) in dcel.hedges() {
            if dcel.hedge_site(id) < dcel.hedge_site(he.twin) {
                continue;
            }
            let origin_box = dcel.vert(dcel.origin_vertex(id)).is_box;
            let twin_origin_box = dcel.vert(dcel.origin_vertex(he.twin)).is_box;
            if origin_box && twin_origin_box {
                continue;
            }
            out.push(if origin_box { he.twin } else { id });
        }
        out
    }

    /// Does a point on the supporting line actually lie on the (possibly
    /// clipped) edge?
    fn on_edge(dcel: &Dcel, e: HedgeId, p: Vec2) -> bool {
        let twin = dcel.hedge(e).twin;
        if dcel.vert(dcel.origin_vertex(twin)).is_box {
            check_halfline_side(p, dcel.hedge(e).line, dcel.origin_point(e))
        } else {
            check_order(dcel.origin_point(e), p, dcel.origin_point(twin))
        }
    }
}
