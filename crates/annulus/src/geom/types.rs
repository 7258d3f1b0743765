//! Basic planar types shared by the subdivision engine.
//!
//! - `Site`: input point plus its stable index into the site (or hull) array.
//! - `Line`: supporting line of a Voronoi edge, vertical or slanted, with a
//!   growth direction tag used while the edge is still half-infinite.
//! - `Rect`, `Annulus`: axis-aligned box and the answer type.

use nalgebra::Vector2;

pub type Vec2 = Vector2<f64>;

/// An input point. `idx` is the back-reference into the site array for the
/// nearest diagram and into the hull array (CCW order) for the farthest one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    pub pos: Vec2,
    pub idx: usize,
}

impl Site {
    #[inline]
    pub fn new(x: f64, y: f64, idx: usize) -> Self {
        Self {
            pos: Vec2::new(x, y),
            idx,
        }
    }
    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.pos.y
    }
}

/// Growth direction of a half-infinite edge along its supporting line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

/// Line equation: vertical lines are anchored by x, everything else by
/// slope/intercept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineEq {
    Vertical { x: f64 },
    Slanted { k: f64, n: f64 },
}

/// A directed supporting line. While an edge is still growing (or clipped on
/// one side) `dir` points along the unbounded half; for finished interior
/// edges the tag is meaningless.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub eq: LineEq,
    pub dir: Dir,
}

impl Line {
    /// Vertical line x = const. The direction tag starts out unset
    /// (`Right`); orientation passes overwrite it.
    #[inline]
    pub fn vertical(x: f64) -> Self {
        Self {
            eq: LineEq::Vertical { x },
            dir: Dir::Right,
        }
    }

    /// Non-vertical line y = k x + n.
    #[inline]
    pub fn slanted(k: f64, n: f64) -> Self {
        Self {
            eq: LineEq::Slanted { k, n },
            dir: Dir::Right,
        }
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        matches!(self.eq, LineEq::Vertical { .. })
    }

    /// y at a given x. Only meaningful for slanted lines.
    #[inline]
    pub fn y_at(&self, x: f64) -> f64 {
        match self.eq {
            LineEq::Slanted { k, n } => k * x + n,
            LineEq::Vertical { .. } => unreachable!("vertical line has no y(x)"),
        }
    }

    /// A point a fixed offset along `dir` from `start` (assumed on the line).
    pub fn forward_point(&self, start: Vec2) -> Vec2 {
        let offset = 100.0;
        match self.eq {
            LineEq::Vertical { .. } => match self.dir {
                Dir::Up => Vec2::new(start.x, start.y + offset),
                _ => Vec2::new(start.x, start.y - offset),
            },
            LineEq::Slanted { k, n } => {
                let x = if self.dir == Dir::Left {
                    start.x - offset
                } else {
                    start.x + offset
                };
                Vec2::new(x, k * x + n)
            }
        }
    }
}

/// Axis-aligned rectangle, x1 <= x2 and y1 <= y2.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

/// A pair of concentric circles; the answer of the solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Annulus {
    pub center: Vec2,
    pub r_inner: f64,
    pub r_outer: f64,
}

impl Annulus {
    /// Sentinel "not computed yet" state.
    #[inline]
    pub fn unset() -> Self {
        Self {
            center: Vec2::zeros(),
            r_inner: -1.0,
            r_outer: -1.0,
        }
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.r_inner >= 0.0
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.r_outer - self.r_inner
    }
}

impl Default for Annulus {
    fn default() -> Self {
        Self::unset()
    }
}
