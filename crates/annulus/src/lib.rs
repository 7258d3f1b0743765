//! Minimum-width annulus engine.
//!
//! Computes the thinnest pair of concentric circles enclosing a planar point
//! set, the classic roundness-certification problem. The solver overlays two
//! planar subdivisions: the nearest-point Voronoi diagram (Fortune's sweep)
//! and the farthest-point Voronoi diagram over the convex hull (randomized
//! incremental), both as half-edge DCELs, then scores every overlay vertex
//! through vertical-slab point location.

pub mod bbox;
pub mod dcel;
pub mod farthest;
pub mod finder;
pub mod geom;
pub mod locate;
pub mod model;
pub mod nearest;
pub mod pipeline;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{Annulus, Line, Rect, Site, Vec2};
pub use pipeline::{solve, solve_points};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{Annulus, Dir, Line, LineEq, Rect, Site, Vec2};
    pub use crate::locate::PointLocator;
    pub use crate::model::Model;
    pub use crate::pipeline::{solve, solve_points};
}
