//! Farthest-point Voronoi diagram, built incrementally over the convex hull.
//!
//! Purpose
//! - Randomized incremental construction: start from the diagram of three
//!   hull points, then insert the remaining hull points in shuffled order,
//!   carving each new unbounded cell out of the existing ones.
//! - Only hull vertices have non-empty cells; face sites are hull indices in
//!   CCW order.
//!
//! The shuffle is reproducible through an optional seed; unseeded runs draw
//! from entropy.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::bbox;
use crate::dcel::{Dcel, FaceId, HedgeId, VertexId};
use crate::geom::{
    all_collinear, bisector, check_halfline_side, check_order, circumcenter, dist,
    graham_scan_hull, line_intersect, midpoint, turn, Dir, Line, LineEq, Site, Vec2,
};
use crate::model::Model;

pub struct FarthestVoronoi {
    model: Arc<Model>,
    sites: Vec<Site>,
    seed: Option<u64>,
    open_face: FaceId,
    /// Cyclic neighbor maps over hull indices; entries of removed points stay
    /// frozen at their sub-hull neighbors for the re-insertion walk.
    cw: Vec<usize>,
    ccw: Vec<usize>,
    /// Hull index -> position in the shuffled order.
    inv: Vec<usize>,
    /// One boundary half-edge per face; the face lies right of the edge.
    first_edge: HashMap<usize, HedgeId>,
    verts_pruned: HashSet<VertexId>,
    edges_pruned: HashSet<HedgeId>,
}

enum Step {
    Split { inter: Vec2, opt: Site },
    Close,
}

impl FarthestVoronoi {
    pub fn new(model: Arc<Model>, seed: Option<u64>) -> Self {
        let sites = model.sites();
        Self {
            model,
            sites,
            seed,
            open_face: FaceId(0),
            cw: Vec::new(),
            ccw: Vec::new(),
            inv: Vec::new(),
            first_edge: HashMap::new(),
            verts_pruned: HashSet::new(),
            edges_pruned: HashSet::new(),
        }
    }

    pub fn spawn(model: Arc<Model>, seed: Option<u64>) -> JoinHandle<()> {
        thread::spawn(move || Self::new(model, seed).build())
    }

    pub fn build(mut self) {
        if all_collinear(&self.sites) {
            self.process_all_collinear();
        } else {
            self.process_regular();
        }

        let model = Arc::clone(&self.model);
        let mut guard = model.lock();
        let state = &mut *guard;
        bbox::add_box(&self.sites, self.open_face, &mut state.farthest);
        bbox::wire_components(&mut state.farthest, self.open_face);
        tracing::info!(
            hull = state.hull.len(),
            "farthest-point Voronoi diagram completed"
        );
    }

    /// Collinear input: only the two extreme sites have cells, split by their
    /// bisector (same strip shape as the nearest diagram's degenerate case).
    fn process_all_collinear(&mut self) {
        let mut min = self.sites[0];
        for s in &self.sites {
            if s.x() < min.x() || (s.x() == min.x() && s.y() < min.y()) {
                min = *s;
            }
        }
        let mut max = self.sites[if self.sites[0].idx == min.idx { 1 } else { 0 }];
        for s in &self.sites {
            if s.idx == min.idx {
                continue;
            }
            if dist(s.pos, min.pos) > dist(max.pos, min.pos) {
                max = *s;
            }
        }

        // Hull order: the cell of `max` covers the side nearer to `min`.
        let hull = vec![max, min];
        self.inv = vec![0, 1];
        self.open_face = FaceId(2);

        let mut guard = self.model.lock();
        let state = &mut *guard;
        state.hull = hull;

        state.farthest.push_face(0);
        state.farthest.push_face(1);
        state.farthest.push_face(2); // outer face

        let v = state.farthest.push_vertex(midpoint(min.pos, max.pos), false);
        let (upper_up, upper_down) = state.farthest.push_twins(bisector(min.pos, max.pos));
        let (lower_up, lower_down) = state.farthest.push_twins(bisector(min.pos, max.pos));

        state.farthest.hedge_mut(upper_up).origin = Some(v);
        state.farthest.hedge_mut(lower_down).origin = Some(v);
        state.farthest.vert_mut(v).incident = Some(upper_up);

        state.farthest.link(lower_up, upper_up);
        state.farthest.link(upper_down, lower_down);

        state.farthest.hedge_mut(upper_up).face = Some(FaceId(1));
        state.farthest.hedge_mut(lower_up).face = Some(FaceId(1));
        state.farthest.hedge_mut(upper_down).face = Some(FaceId(0));
        state.farthest.hedge_mut(lower_down).face = Some(FaceId(0));

        let (first, second) = if state.farthest.hedge(upper_up).line.is_vertical() {
            (Dir::Up, Dir::Down)
        } else if min.y() < max.y() {
            (Dir::Left, Dir::Right)
        } else {
            (Dir::Right, Dir::Left)
        };
        state.farthest.hedge_mut(upper_up).line.dir = first;
        state.farthest.hedge_mut(upper_down).line.dir = first;
        state.farthest.hedge_mut(lower_up).line.dir = second;
        state.farthest.hedge_mut(lower_down).line.dir = second;
    }

    fn process_regular(&mut self) {
        let mut hull = graham_scan_hull(&self.sites);
        let hsz = hull.len();
        for (i, h) in hull.iter_mut().enumerate() {
            h.idx = i;
        }
        for i in 0..hsz {
            self.ccw.push((i + 1) % hsz);
            self.cw.push((i + hsz - 1) % hsz);
        }
        self.model.lock().hull = hull.clone();

        let mut rng = match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        hull.shuffle(&mut rng);
        self.inv = vec![0; hsz];
        for (i, h) in hull.iter().enumerate() {
            self.inv[h.idx] = i;
        }

        // Reverse deletion: unlink each late point from the cyclic maps so
        // its own entries stay frozen at its neighbors in the sub-hull it
        // will be inserted into.
        for i in (4..hsz).rev() {
            let idx = hull[i].idx;
            self.ccw[self.cw[idx]] = self.ccw[idx];
            self.cw[self.ccw[idx]] = self.cw[idx];
        }

        {
            let mut state = self.model.lock();
            for i in 0..hsz {
                state.farthest.push_face(i);
            }
            state.farthest.push_face(hsz); // outer face
        }
        self.open_face = FaceId(hsz);

        self.initial_solution(hull[0], hull[1], hull[2]);
        let model = Arc::clone(&self.model);
        for &pt in &hull[3..] {
            {
                let mut guard = model.lock();
                let state = &mut *guard;
                self.add_point(&hull, pt, &mut state.farthest);
            }
            self.prune();
        }
    }

    /// Physically drop everything recorded during the last insertion.
    fn prune(&mut self) {
        let mut state = self.model.lock();
        for &he in &self.edges_pruned {
            state.farthest.kill_hedge(he);
        }
        for &v in &self.verts_pruned {
            state.farthest.kill_vertex(v);
        }
        self.edges_pruned.clear();
        self.verts_pruned.clear();
    }

    /// Point the bisector of (a, b) outward along the hull.
    fn orient_outward(bis: &mut Line, a: Vec2, b: Vec2) {
        match bis.eq {
            LineEq::Vertical { .. } => {
                bis.dir = if a.x > b.x { Dir::Down } else { Dir::Up };
            }
            LineEq::Slanted { .. } => {
                bis.dir = if a.y > b.y { Dir::Right } else { Dir::Left };
            }
        }
    }

    /// Orient a freshly created cell bisector so it grows away from the old
    /// edge (left of the L -> R support).
    fn orient_off_edge(mut bis: Line, l: Vec2, r: Vec2, from: Vec2) -> Line {
        bis.dir = match bis.eq {
            LineEq::Vertical { .. } => Dir::Down,
            LineEq::Slanted { .. } => Dir::Left,
        };
        if turn(l, r, bis.forward_point(from)) == 1 {
            bis.dir = match bis.eq {
                LineEq::Vertical { .. } => Dir::Up,
                LineEq::Slanted { .. } => Dir::Right,
            };
        }
        bis
    }

    /// Twinned pair on `bis` fanning out of `vertex`; `fst` owns the out
    /// half-edge, `snd` the in one. Returns (in, out).
    fn add_edge_pair(
        dcel: &mut Dcel,
        vertex: VertexId,
        bis: Line,
        fst: usize,
        snd: usize,
    ) -> (HedgeId, HedgeId) {
        let (in_he, out_he) = dcel.push_twins(bis);
        dcel.hedge_mut(out_he).origin = Some(vertex);
        dcel.hedge_mut(out_he).face = Some(FaceId(fst));
        dcel.hedge_mut(in_he).face = Some(FaceId(snd));
        (in_he, out_he)
    }

    /// Diagram of the first three hull points: their circumcenter with three
    /// outward bisectors, in-edges forming a CCW fan and out-edges closing
    /// the triangle of cells dually.
    fn initial_solution(&mut self, a: Site, b: Site, c: Site) {
        let (b, c) = if turn(a.pos, b.pos, c.pos) == -1 {
            (c, b)
        } else {
            (b, c)
        };

        let center = circumcenter(a.pos, b.pos, c.pos);
        let mut ab = bisector(a.pos, b.pos);
        let mut bc = bisector(b.pos, c.pos);
        let mut ca = bisector(c.pos, a.pos);
        Self::orient_outward(&mut ab, a.pos, b.pos);
        Self::orient_outward(&mut bc, b.pos, c.pos);
        Self::orient_outward(&mut ca, c.pos, a.pos);

        let mut guard = self.model.lock();
        let state = &mut *guard;
        let dcel = &mut state.farthest;
        let vertex = dcel.push_vertex(center, false);
        let (ab_in, ab_out) = Self::add_edge_pair(dcel, vertex, ab, a.idx, b.idx);
        let (bc_in, bc_out) = Self::add_edge_pair(dcel, vertex, bc, b.idx, c.idx);
        let (ca_in, ca_out) = Self::add_edge_pair(dcel, vertex, ca, c.idx, a.idx);

        self.first_edge.insert(a.idx, ca_in);
        self.first_edge.insert(b.idx, ab_in);
        self.first_edge.insert(c.idx, bc_in);
        dcel.vert_mut(vertex).incident = Some(ab_out);

        dcel.link(ab_in, bc_out);
        dcel.link(bc_in, ca_out);
        dcel.link(ca_in, ab_out);
    }

    /// Insert `pt` into the current diagram: walk the faces its cell will
    /// carve through, starting from its CCW neighbor's first edge, splitting
    /// every crossed edge at the intersection with bisector(pt, face site),
    /// and close back on the CW neighbor's face. Crossed-over geometry goes
    /// into the pruning sets.
    fn add_point(&mut self, hull: &[Site], pt: Site, dcel: &mut Dcel) {
        let mut curr = self.first_edge[&self.ccw[pt.idx]];
        let mut last_pt_fwd: Option<HedgeId> = None;
        let mut last_opt_bwd: Option<HedgeId> = None;
        let mut last_pt_bwd: Option<HedgeId> = None;
        let mut last_vertex: Option<VertexId> = None;

        loop {
            // Walk the current face until its boundary crosses the new
            // bisector, or until the boundary runs out (the final face).
            let step = loop {
                if !self.edges_pruned.is_empty() {
                    match dcel.hedge(curr).next {
                        Some(next) => curr = next,
                        None => break Step::Close,
                    }
                }
                if let Some(o) = dcel.hedge(curr).origin {
                    self.verts_pruned.insert(o);
                }
                self.edges_pruned.insert(curr);
                self.edges_pruned.insert(dcel.hedge(curr).twin);

                let opt = hull[self.inv[dcel.hedge_site(curr)]];
                let bis = bisector(pt.pos, opt.pos);
                let inter = line_intersect(dcel.hedge(curr).line, bis);

                let twin = dcel.hedge(curr).twin;
                let crossed = if dcel.hedge(curr).origin.is_none()
                    || dcel.hedge(twin).origin.is_none()
                {
                    // Half-infinite edge.
                    let orig = match dcel.hedge(curr).origin {
                        Some(v) => dcel.vert(v).point,
                        None => dcel.origin_point(twin),
                    };
                    check_halfline_side(inter, dcel.hedge(curr).line, orig)
                } else {
                    check_order(dcel.origin_point(curr), inter, dcel.origin_point(twin))
                };
                if crossed {
                    break Step::Split { inter, opt };
                }
            };

            // Endpoints of the crossed support, substituting a far point for
            // a missing one.
            let twin = dcel.hedge(curr).twin;
            let l = match dcel.hedge(curr).origin {
                Some(v) => dcel.vert(v).point,
                None => dcel
                    .hedge(twin)
                    .line
                    .forward_point(dcel.origin_point(twin)),
            };
            let r = match dcel.hedge(twin).origin {
                Some(v) => dcel.vert(v).point,
                None => dcel
                    .hedge(curr)
                    .line
                    .forward_point(dcel.origin_point(curr)),
            };

            match step {
                Step::Close => {
                    // The walk ran into the open end left by the previous
                    // split: add the final bisector towards the CW neighbor
                    // and stop; the cell stays open towards infinity.
                    let opt = hull[self.inv[self.cw[pt.idx]]];
                    let anchor = dcel
                        .vert(last_vertex.expect("closing after at least one split"))
                        .point;
                    let bis =
                        Self::orient_off_edge(bisector(pt.pos, opt.pos), l, r, anchor);

                    let (pt_fwd, pt_bwd) = dcel.push_twins(bis);
                    self.first_edge.insert(pt.idx, pt_fwd);
                    dcel.hedge_mut(pt_bwd).origin = last_vertex;
                    dcel.hedge_mut(pt_fwd).face = Some(FaceId(pt.idx));
                    dcel.hedge_mut(pt_bwd).face = Some(FaceId(opt.idx));

                    if let Some(lob) = last_opt_bwd {
                        dcel.link(lob, pt_bwd);
                    }
                    if let Some(lpf) = last_pt_fwd {
                        dcel.hedge_mut(pt_fwd).next = Some(lpf);
                        dcel.hedge_mut(lpf).prev = Some(pt_fwd);
                    }
                    return;
                }
                Step::Split { inter, opt } => {
                    let vertex = dcel.push_vertex(inter, false);
                    let bis = Self::orient_off_edge(bisector(pt.pos, opt.pos), l, r, inter);
                    let (pt_fwd, pt_bwd) = dcel.push_twins(bis);
                    let (opt_fwd, opt_bwd) = dcel.push_twins(dcel.hedge(curr).line);

                    let twin_origin = dcel.hedge(twin).origin;
                    if let Some(tv) = twin_origin {
                        dcel.vert_mut(tv).incident = Some(opt_bwd);
                    }
                    dcel.vert_mut(vertex).incident = Some(pt_fwd);
                    dcel.hedge_mut(pt_fwd).origin = Some(vertex);
                    dcel.hedge_mut(opt_fwd).origin = Some(vertex);
                    dcel.hedge_mut(opt_bwd).origin = twin_origin;
                    dcel.hedge_mut(pt_bwd).origin = last_vertex;

                    dcel.hedge_mut(pt_fwd).face = Some(FaceId(pt.idx));
                    dcel.hedge_mut(pt_bwd).face = Some(FaceId(opt.idx));
                    dcel.hedge_mut(opt_fwd).face = Some(FaceId(opt.idx));
                    let beyond = dcel.hedge_site(twin);
                    dcel.hedge_mut(opt_bwd).face = Some(FaceId(beyond));

                    dcel.link(pt_bwd, opt_fwd);
                    if let Some(lob) = last_opt_bwd {
                        dcel.link(lob, pt_bwd);
                    }
                    let curr_next = dcel.hedge(curr).next;
                    dcel.hedge_mut(opt_fwd).next = curr_next;
                    if let Some(cn) = curr_next {
                        dcel.hedge_mut(cn).prev = Some(opt_fwd);
                    }
                    if let Some(lpf) = last_pt_fwd {
                        dcel.hedge_mut(pt_fwd).next = Some(lpf);
                        dcel.hedge_mut(lpf).prev = Some(pt_fwd);
                    }
                    let twin_prev = dcel.hedge(twin).prev;
                    dcel.hedge_mut(opt_bwd).prev = twin_prev;
                    if let Some(tp) = twin_prev {
                        dcel.hedge_mut(tp).next = Some(opt_bwd);
                    }

                    // The first split's pt_bwd bounds the CCW neighbor's
                    // cell; later opt_bwd edges without an origin become the
                    // entry edges of their cells.
                    if last_pt_bwd.is_none() {
                        self.first_edge.insert(opt.idx, pt_bwd);
                    }
                    if dcel.hedge(opt_bwd).origin.is_none() {
                        self.first_edge.insert(beyond, opt_bwd);
                    }

                    last_opt_bwd = Some(opt_bwd);
                    last_pt_fwd = Some(pt_fwd);
                    last_pt_bwd = Some(pt_bwd);
                    last_vertex = Some(vertex);
                    curr = twin;
                }
            }
        }
    }
}
