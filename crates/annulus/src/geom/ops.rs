//! Pure geometric predicates and constructions.
//!
//! Comparisons are exact f64 unless a tolerance is explicitly documented;
//! candidate enumeration depends on that for reproducibility.

use super::types::{Dir, Line, LineEq, Rect, Site, Vec2};

/// Perpendicular bisector of two distinct points. Equal x gives a horizontal
/// line, equal y a vertical one.
pub fn bisector(a: Vec2, b: Vec2) -> Line {
    if a.x == b.x {
        return Line::slanted(0.0, (a.y + b.y) / 2.0);
    }
    if a.y == b.y {
        return Line::vertical((a.x + b.x) / 2.0);
    }
    let mid = midpoint(a, b);
    let k = -1.0 / ((a.y - b.y) / (a.x - b.x));
    Line::slanted(k, mid.y - k * mid.x)
}

#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) / 2.0
}

pub fn parallel(a: Line, b: Line) -> bool {
    match (a.eq, b.eq) {
        (LineEq::Vertical { .. }, LineEq::Vertical { .. }) => true,
        (LineEq::Slanted { k: ka, .. }, LineEq::Slanted { k: kb, .. }) => ka == kb,
        _ => false,
    }
}

/// Intersection of two undirected lines. Parallel input is an invariant
/// violation, not a recoverable condition.
pub fn line_intersect(a: Line, b: Line) -> Vec2 {
    assert!(!parallel(a, b), "parallel lines have no intersection");
    match (a.eq, b.eq) {
        (LineEq::Vertical { x }, LineEq::Slanted { k, n }) => Vec2::new(x, k * x + n),
        (LineEq::Slanted { k, n }, LineEq::Vertical { x }) => Vec2::new(x, k * x + n),
        (LineEq::Slanted { k: ka, n: na }, LineEq::Slanted { k: kb, n: nb }) => {
            let x = (nb - na) / (ka - kb);
            Vec2::new(x, ka * x + na)
        }
        _ => unreachable!(),
    }
}

#[inline]
pub fn dist(a: Vec2, b: Vec2) -> f64 {
    (b - a).norm()
}

/// Turn taken by a -> b -> c: 1 = left, -1 = right, 0 = collinear.
#[inline]
pub fn turn(a: Vec2, b: Vec2, c: Vec2) -> i32 {
    let cross = (b.x - a.x) * (c.y - b.y) - (c.x - b.x) * (b.y - a.y);
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

/// Are a and b on the same side of the line through c, d?
/// 1 = same, -1 = different, 0 = at least one lies on cd.
#[inline]
pub fn same_side(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> i32 {
    turn(c, d, a) * turn(c, d, b)
}

/// Closed-segment intersection test for ab and cd.
pub fn do_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    same_side(a, b, c, d) <= 0
        && same_side(c, d, a, b) <= 0
        && a.x.min(b.x) <= c.x.max(d.x)
        && c.x.min(d.x) <= a.x.max(b.x)
        && a.y.min(b.y) <= c.y.max(d.y)
        && c.y.min(d.y) <= a.y.max(b.y)
}

/// Circumcenter of the triangle abc. Undefined for collinear input.
pub fn circumcenter(a: Vec2, b: Vec2, c: Vec2) -> Vec2 {
    let d = (a.x - c.x) * (b.y - c.y) - (b.x - c.x) * (a.y - c.y);

    let x = (((a.x - c.x) * (a.x + c.x) + (a.y - c.y) * (a.y + c.y)) / 2.0 * (b.y - c.y)
        - ((b.x - c.x) * (b.x + c.x) + (b.y - c.y) * (b.y + c.y)) / 2.0 * (a.y - c.y))
        / d;

    let y = (((b.x - c.x) * (b.x + c.x) + (b.y - c.y) * (b.y + c.y)) / 2.0 * (a.x - c.x)
        - ((a.x - c.x) * (a.x + c.x) + (a.y - c.y) * (a.y + c.y)) / 2.0 * (b.x - c.x))
        / d;

    Vec2::new(x, y)
}

/// Intersection of the parabolas with foci `l`, `r` and shared directrix
/// y = `sweep_y`, resolved to the breakpoint that separates the arc of `l`
/// (left) from the arc of `r` (right).
pub fn parabola_intersect(l: Vec2, r: Vec2, sweep_y: f64) -> Vec2 {
    // Parabola vertices and focal lengths.
    let lv = Vec2::new(l.x, (sweep_y + l.y) / 2.0);
    let rv = Vec2::new(r.x, (sweep_y + r.y) / 2.0);
    let lf = (l.y - lv.y).abs();
    let rf = (r.y - rv.y).abs();

    // A focus on the sweep line degenerates to a vertical drop.
    if lf == 0.0 {
        let x = lv.x;
        return Vec2::new(x, (x - rv.x) * (x - rv.x) / (4.0 * rf) + rv.y);
    }
    if rf == 0.0 {
        let x = rv.x;
        return Vec2::new(x, (x - lv.x) * (x - lv.x) / (4.0 * lf) + lv.y);
    }

    let a = rf - lf;
    let b = 2.0 * (lf * rv.x - rf * lv.x);
    let c = rf * lv.x * lv.x - lf * rv.x * rv.x + 4.0 * lf * rf * (lv.y - rv.y);

    let (x1, x2) = if a == 0.0 {
        // Equal focal lengths: a single intersection, valid only left-to-right.
        assert!(l.x < r.x, "coincident arcs queried out of order");
        let x = -c / b;
        (x, x)
    } else {
        let sqrt_d = (b * b - 4.0 * a * c).sqrt();
        ((-b + sqrt_d) / (2.0 * a), (-b - sqrt_d) / (2.0 * a))
    };

    // Keep the root matching the queried breakpoint ordering.
    let x = if l.y > r.y { x1.min(x2) } else { x1.max(x2) };
    Vec2::new(x, (x - lv.x) * (x - lv.x) / (4.0 * lf) + lv.y)
}

/// The unique point where the directed half-line starting at `origin`
/// (inside `rect`) exits the rectangle.
pub fn rect_halfline_intersect(rect: Rect, line: Line, origin: Vec2) -> Vec2 {
    // A second point safely past the rectangle, to reuse the segment test.
    let offset = 10.0;
    let other = match line.eq {
        LineEq::Vertical { x } => match line.dir {
            Dir::Up => Vec2::new(x, rect.y2 + offset),
            _ => Vec2::new(x, rect.y1 - offset),
        },
        LineEq::Slanted { k, n } => {
            let x = if line.dir == Dir::Right {
                rect.x2 + offset
            } else {
                rect.x1 - offset
            };
            Vec2::new(x, k * x + n)
        }
    };

    let bl = Vec2::new(rect.x1, rect.y1);
    let br = Vec2::new(rect.x2, rect.y1);
    let tl = Vec2::new(rect.x1, rect.y2);
    let tr = Vec2::new(rect.x2, rect.y2);

    // Exactly one rectangle side is crossed since the origin is inside.
    if do_intersect(origin, other, tl, tr) {
        return line_intersect(line, Line::slanted(0.0, rect.y2));
    }
    if do_intersect(origin, other, bl, br) {
        return line_intersect(line, Line::slanted(0.0, rect.y1));
    }
    if do_intersect(origin, other, bl, tl) {
        return line_intersect(line, Line::vertical(rect.x1));
    }
    if do_intersect(origin, other, br, tr) {
        return line_intersect(line, Line::vertical(rect.x2));
    }

    unreachable!("half-line anchored inside the box must exit it")
}

/// Is `pt` (on the supporting line) on the forward side of the half-line
/// anchored at `orig`?
pub fn check_halfline_side(pt: Vec2, line: Line, orig: Vec2) -> bool {
    match line.dir {
        Dir::Up => pt.y >= orig.y,
        Dir::Down => pt.y <= orig.y,
        Dir::Left => pt.x <= orig.x,
        Dir::Right => pt.x >= orig.x,
    }
}

/// Is `b` inside the axis-aligned bounding box of the segment a--c?
pub fn check_order(a: Vec2, b: Vec2, c: Vec2) -> bool {
    let x = b.x >= a.x.min(c.x) && b.x <= a.x.max(c.x);
    let y = b.y >= a.y.min(c.y) && b.y <= a.y.max(c.y);
    x && y
}

/// All sites on a single line? Two sites always are.
pub fn all_collinear(points: &[Site]) -> bool {
    if points.len() <= 2 {
        return true;
    }
    points[2..]
        .iter()
        .all(|p| turn(points[0].pos, points[1].pos, p.pos) == 0)
}
