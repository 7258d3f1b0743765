//! Geometry kernel.
//!
//! Purpose
//! - Provide the planar types (`Site`, `Line`, `Rect`, `Annulus`) and the
//!   pure predicates/constructions the subdivision engine is built from.
//! - Keep numerics explicit: exact f64 comparisons by default, a documented
//!   1e-6 tolerance only where the algorithms require one.
//!
//! Code cross-refs: `crate::nearest` (sweep), `crate::farthest`,
//! `crate::locate`, `crate::finder`.

pub mod hull;
mod ops;
mod types;

pub use hull::graham_scan_hull;
pub use ops::{
    all_collinear, bisector, check_halfline_side, check_order, circumcenter, dist, do_intersect,
    line_intersect, midpoint, parabola_intersect, parallel, rect_halfline_intersect, same_side,
    turn,
};
pub use types::{Annulus, Dir, Line, LineEq, Rect, Site, Vec2};

#[cfg(test)]
mod tests;
