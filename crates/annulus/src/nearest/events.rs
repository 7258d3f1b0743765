//! Event queue for the Fortune sweep.
//!
//! A max-heap keyed by (y, x): the highest event pops first, and among events
//! at the same height the one further right wins. The initial-insert protocol
//! relies on that secondary order (ties at the starting height arrive
//! right-to-left, each becoming the new leftmost arc).
//!
//! Circle events carry the id they were created with; the consumer discards
//! any event whose id no longer matches its arc's current id. That replaces
//! a shared mutable false-alarm flag between tree and queue.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::geom::{Site, Vec2};

use super::beach::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EventId(pub u64);

#[derive(Clone, Copy, Debug)]
pub enum Event {
    Site {
        x: f64,
        y: f64,
        site: usize,
    },
    Circle {
        /// Bottom of the event circle; the sweep position where it fires.
        y: f64,
        center: Vec2,
        arc: NodeId,
        id: EventId,
    },
}

impl Event {
    #[inline]
    pub fn y(&self) -> f64 {
        match *self {
            Event::Site { y, .. } | Event::Circle { y, .. } => y,
        }
    }

    #[inline]
    fn x(&self) -> f64 {
        match *self {
            Event::Site { x, .. } => x,
            Event::Circle { center, .. } => center.x,
        }
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y()
            .total_cmp(&other.y())
            .then_with(|| self.x().total_cmp(&other.x()))
    }
}

#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Event>,
    next_id: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_site(&mut self, site: &Site) {
        self.heap.push(Event::Site {
            x: site.x(),
            y: site.y(),
            site: site.idx,
        });
    }

    /// Schedule a circle event and hand back its fresh id for the arc's
    /// back-reference. Ids are never reused.
    pub fn push_circle(&mut self, y: f64, center: Vec2, arc: NodeId) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        self.heap.push(Event::Circle { y, center, arc, id });
        id
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop()
    }
}
