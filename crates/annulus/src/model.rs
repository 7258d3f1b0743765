//! Shared solver state under one coarse mutex.
//!
//! Both diagram producers and the annulus finder mutate `ModelState` while
//! holding the lock for the duration of a structural step (one Fortune event,
//! one incremental insertion, a bounding-box pass, a candidate append).
//! Snapshot readers take the same lock on their own cadence.

use std::sync::{Mutex, MutexGuard};

use crate::dcel::Dcel;
use crate::geom::{Annulus, Site};

#[derive(Debug)]
pub struct ModelState {
    pub sites: Vec<Site>,
    /// Current Fortune sweep position; starts above every site.
    pub sweep_y: f64,
    pub nearest: Dcel,
    pub farthest: Dcel,
    /// Convex hull in CCW order, written once by the farthest producer.
    pub hull: Vec<Site>,
    pub candidates: Vec<Annulus>,
    pub annulus: Annulus,
}

impl ModelState {
    /// Sort candidates by width and promote the narrowest to the answer.
    pub fn find_best_annulus(&mut self) {
        assert!(
            !self.candidates.is_empty(),
            "no annulus candidates for this input"
        );
        self.candidates
            .sort_by(|a, b| a.width().total_cmp(&b.width()));
        self.annulus = self.candidates[0];
    }
}

#[derive(Debug)]
pub struct Model {
    state: Mutex<ModelState>,
}

impl Model {
    pub fn new(sites: Vec<Site>) -> Self {
        let mut sweep_y = sites[0].y() + 10.0;
        for s in &sites {
            sweep_y = sweep_y.max(s.y() + 10.0);
        }
        Self {
            state: Mutex::new(ModelState {
                sites,
                sweep_y,
                nearest: Dcel::new(),
                farthest: Dcel::new(),
                hull: Vec::new(),
                candidates: Vec::new(),
                annulus: Annulus::unset(),
            }),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, ModelState> {
        self.state.lock().expect("model mutex poisoned")
    }

    pub fn sites(&self) -> Vec<Site> {
        self.lock().sites.clone()
    }

    pub fn hull(&self) -> Vec<Site> {
        self.lock().hull.clone()
    }

    pub fn annulus(&self) -> Annulus {
        self.lock().annulus
    }
}
