//! Nearest-point Voronoi diagram via Fortune's sweep.
//!
//! Purpose
//! - Drive the beach line and event queue over the site set, filling the
//!   model's nearest DCEL one event at a time under the shared lock.
//! - Handle the degenerate all-collinear input with a dedicated strip
//!   construction instead of the sweep.
//!
//! Code cross-refs: `beach::BeachLine`, `events::EventQueue`,
//! `crate::bbox::add_box`.

pub mod beach;
pub mod events;

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::bbox;
use crate::dcel::FaceId;
use crate::geom::{
    all_collinear, bisector, circumcenter, dist, midpoint, parabola_intersect, turn, Dir, Site,
    Vec2,
};
use crate::model::{Model, ModelState};

use beach::{BeachLine, NodeId};
use events::{Event, EventQueue};

pub struct NearestVoronoi {
    model: Arc<Model>,
    sites: Vec<Site>,
    beach: BeachLine,
    queue: EventQueue,
}

impl NearestVoronoi {
    pub fn new(model: Arc<Model>) -> Self {
        let sites = model.sites();
        Self {
            beach: BeachLine::new(sites.clone()),
            queue: EventQueue::new(),
            sites,
            model,
        }
    }

    /// Run the construction on its own OS thread; the handle doubles as the
    /// completion handle the finder waits on.
    pub fn spawn(model: Arc<Model>) -> JoinHandle<()> {
        thread::spawn(move || Self::new(model).build())
    }

    pub fn build(mut self) {
        let n = self.sites.len();
        {
            let mut state = self.model.lock();
            for i in 0..n {
                state.nearest.push_face(i);
            }
            state.nearest.push_face(n); // outer face
        }

        if all_collinear(&self.sites) {
            self.process_all_collinear();
        } else {
            self.process_events();
        }

        {
            let mut guard = self.model.lock();
            let state = &mut *guard;
            let open_face = FaceId(n);
            bbox::add_box(&self.sites, open_face, &mut state.nearest);
            bbox::wire_components(&mut state.nearest, open_face);
        }
        tracing::info!(sites = n, "nearest Voronoi diagram completed");
    }

    /// Collinear sites produce parallel strips: a vertex at each consecutive
    /// midpoint with two anti-parallel ray pairs through it.
    fn process_all_collinear(&mut self) {
        let mut min = self.sites[0];
        for s in &self.sites {
            if s.x() < min.x() || (s.x() == min.x() && s.y() < min.y()) {
                min = *s;
            }
        }
        let mut ordered = self.sites.clone();
        ordered.sort_by(|a, b| dist(min.pos, a.pos).total_cmp(&dist(min.pos, b.pos)));

        let mut state = self.model.lock();
        for pair in ordered.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let v = state.nearest.push_vertex(midpoint(a.pos, b.pos), false);
            let (upper_up, upper_down) = state.nearest.push_twins(bisector(a.pos, b.pos));
            let (lower_up, lower_down) = state.nearest.push_twins(bisector(a.pos, b.pos));

            state.nearest.hedge_mut(upper_up).origin = Some(v);
            state.nearest.hedge_mut(lower_down).origin = Some(v);
            state.nearest.vert_mut(v).incident = Some(upper_up);

            state.nearest.link(lower_up, upper_up);
            state.nearest.link(upper_down, lower_down);

            state.nearest.hedge_mut(upper_up).face = Some(FaceId(b.idx));
            state.nearest.hedge_mut(lower_up).face = Some(FaceId(b.idx));
            state.nearest.hedge_mut(upper_down).face = Some(FaceId(a.idx));
            state.nearest.hedge_mut(lower_down).face = Some(FaceId(a.idx));

            let (first, second) = if state.nearest.hedge(upper_up).line.is_vertical() {
                (Dir::Up, Dir::Down)
            } else if a.y() < b.y() {
                (Dir::Left, Dir::Right)
            } else {
                (Dir::Right, Dir::Left)
            };
            state.nearest.hedge_mut(upper_up).line.dir = first;
            state.nearest.hedge_mut(upper_down).line.dir = first;
            state.nearest.hedge_mut(lower_up).line.dir = second;
            state.nearest.hedge_mut(lower_down).line.dir = second;
        }
    }

    fn process_events(&mut self) {
        let model = Arc::clone(&self.model);
        let mut max_y = self.sites[0].y();
        for s in &self.sites {
            self.queue.push_site(s);
            max_y = max_y.max(s.y());
        }

        while let Some(event) = self.queue.pop() {
            let mut guard = model.lock();
            let state = &mut *guard;
            state.sweep_y = event.y();
            if state.sweep_y == max_y {
                // The sweep has not moved yet: a site event at the starting
                // height, inserted next to the current leftmost arc.
                let Event::Site { site, .. } = event else {
                    unreachable!("circle event cannot fire at the sweep start")
                };
                self.handle_initial_site_event(site, state);
            } else {
                match event {
                    Event::Site { site, .. } => self.handle_site_event(site, state),
                    Event::Circle { y, center, arc, id } => {
                        // Stale id = false alarm; drop silently.
                        if self.beach.arc_event(arc) == Some(id) {
                            self.handle_circle_event(y, center, arc, state);
                        }
                    }
                }
            }
        }

        // Park the sweep safely below everything, then label the directions
        // of the still-growing edges.
        let mut guard = model.lock();
        let state = &mut *guard;
        let mut y = state.sweep_y;
        for (_, v) in state.nearest.vertices() {
            y = y.min(v.point.y);
        }
        state.sweep_y = y - 10.0;
        let sweep_y = state.sweep_y;
        self.beach.set_orientations(&mut state.nearest, sweep_y);
    }

    fn handle_initial_site_event(&mut self, site: usize, state: &mut ModelState) {
        if self.beach.is_empty() {
            self.beach.set_root_arc(site);
            return;
        }
        let first = self.beach.first_leaf().expect("beach line is non-empty");
        let first_site = self.beach.arc_site(first);

        // Trace a vertical ray upward between the two starting arcs.
        let mut line = bisector(self.sites[site].pos, self.sites[first_site].pos);
        line.dir = Dir::Up;
        let (up, _down) = state.nearest.push_twins(line);
        self.beach.initial_insert(site, up);
    }

    fn handle_site_event(&mut self, site: usize, state: &mut ModelState) {
        let pos = self.sites[site].pos;
        let arc = self
            .beach
            .find_arc_above(pos.x, pos.y)
            .expect("beach line is non-empty below the first event");

        let line = bisector(pos, self.sites[self.beach.arc_site(arc)].pos);
        let (upper, lower) = state.nearest.push_twins(line);

        // The split orphans any circle event scheduled on the old arc.
        let node = self.beach.insert(arc, site, upper, lower);

        let left = self.beach.find_pred(node).expect("split leaves a left arc");
        let right = self.beach.find_succ(node).expect("split leaves a right arc");
        if let Some(far_left) = self.beach.find_pred(left) {
            self.schedule_circle_event(far_left, left, node, pos.y);
        }
        if let Some(far_right) = self.beach.find_succ(right) {
            self.schedule_circle_event(node, right, far_right, pos.y);
        }
    }

    fn handle_circle_event(&mut self, y: f64, center: Vec2, arc: NodeId, state: &mut ModelState) {
        let site = self.beach.arc_site(arc);
        let vertex = state.nearest.push_vertex(center, false);

        let pred = self.beach.find_pred(arc).expect("squeezed arc has a predecessor");
        let succ = self.beach.find_succ(arc).expect("squeezed arc has a successor");
        let (pred_site, succ_site) = (self.beach.arc_site(pred), self.beach.arc_site(succ));

        // The merged breakpoint starts tracing the pred/succ bisector down
        // from the new vertex.
        let line = bisector(self.sites[pred_site].pos, self.sites[succ_site].pos);
        let (down, up) = state.nearest.push_twins(line);
        {
            let he = state.nearest.hedge_mut(down);
            he.origin = Some(vertex);
            he.face = Some(FaceId(pred_site));
        }
        state.nearest.hedge_mut(up).face = Some(FaceId(succ_site));
        state.nearest.vert_mut(vertex).incident = Some(down);

        let (first, second) = self.beach.delete(arc, up);

        self.refresh_circle_event(pred, y);
        self.refresh_circle_event(succ, y);

        // Terminate the two squeezed edges at the vertex and close the
        // counter-clockwise fan around it.
        let first_twin = state.nearest.hedge(first).twin;
        let second_twin = state.nearest.hedge(second).twin;
        {
            let he = state.nearest.hedge_mut(first);
            he.origin = Some(vertex);
            he.face = Some(FaceId(site));
        }
        state.nearest.hedge_mut(first_twin).face = Some(FaceId(pred_site));
        {
            let he = state.nearest.hedge_mut(second);
            he.origin = Some(vertex);
            he.face = Some(FaceId(succ_site));
        }
        state.nearest.hedge_mut(second_twin).face = Some(FaceId(site));

        state.nearest.link(second_twin, first);
        state.nearest.link(up, second);
        state.nearest.link(first_twin, down);
    }

    /// Drop the arc's scheduled event (if any) and re-detect against its
    /// current neighborhood.
    fn refresh_circle_event(&mut self, arc: NodeId, sweep_y: f64) {
        self.beach.set_arc_event(arc, None);
        let (Some(pred), Some(succ)) = (self.beach.find_pred(arc), self.beach.find_succ(arc))
        else {
            return;
        };
        self.schedule_circle_event(pred, arc, succ, sweep_y);
    }

    fn schedule_circle_event(&mut self, a: NodeId, b: NodeId, c: NodeId, sweep_y: f64) {
        let Some((y, center)) = self.detect_circle_event(a, b, c, sweep_y) else {
            return;
        };
        let id = self.queue.push_circle(y, center, b);
        self.beach.set_arc_event(b, Some(id));
    }

    /// Circle event for the arc triple (a, b, c), if the breakpoints
    /// converge below the sweep.
    fn detect_circle_event(
        &self,
        a: NodeId,
        b: NodeId,
        c: NodeId,
        sweep_y: f64,
    ) -> Option<(f64, Vec2)> {
        let (sa, sb, sc) = (
            self.beach.arc_site(a),
            self.beach.arc_site(b),
            self.beach.arc_site(c),
        );
        if sa == sc || self.sites[sb].y() == sweep_y {
            return None;
        }
        let (pa, pb, pc) = (self.sites[sa].pos, self.sites[sb].pos, self.sites[sc].pos);

        // Already coincident breakpoints squeeze the arc right now.
        let ab = parabola_intersect(pa, pb, sweep_y);
        let bc = parabola_intersect(pb, pc, sweep_y);
        if dist(ab, bc) <= 1e-6 {
            return Some((sweep_y, ab));
        }

        if turn(pa, pb, pc) == 0 {
            return None;
        }
        let center = circumcenter(pa, pb, pc);
        let radius = dist(pa, center);
        let bottom = center.y - radius;
        if bottom >= sweep_y {
            return None;
        }
        // Left turn: the breakpoints diverge.
        if turn(pa, pb, pc) == 1 {
            return None;
        }
        Some((bottom, center))
    }
}

#[cfg(test)]
mod tests;
