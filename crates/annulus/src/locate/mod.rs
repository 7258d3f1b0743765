//! Vertical-slab point location over a closed DCEL.
//!
//! Preprocessing cuts the plane at every non-box vertex x (plus one sentinel
//! slab past the rightmost), and stacks into each slab the non-vertical edge
//! lines crossing it, each annotated with the cell below and above it. A
//! query binary-searches the slab, then the stack. Twin pairs are
//! deduplicated by the stable site pair, so runs are reproducible.

use crate::dcel::Dcel;
use crate::geom::{Dir, Line, LineEq, Vec2};

#[derive(Clone, Copy, Debug)]
struct SlabLine {
    line: Line,
    site_below: usize,
    site_above: usize,
}

#[derive(Clone, Debug)]
pub struct PointLocator {
    /// (right x, lines sorted bottom-to-top at that x).
    slabs: Vec<(f64, Vec<SlabLine>)>,
    /// Set while no non-vertical line has been recorded: the diagram is a
    /// single vertical split.
    verticals: bool,
    vert_left: usize,
    vert_right: usize,
    vert_thresh: f64,
}

impl PointLocator {
    /// Index of the first slab whose right x is not below `x`.
    fn lower_bound(slabs: &[(f64, Vec<SlabLine>)], x: f64) -> usize {
        slabs.partition_point(|(sx, _)| *sx < x)
    }

    pub fn load(dcel: &Dcel) -> Self {
        let mut xs: Vec<f64> = dcel
            .vertices()
            .filter(|(_, v)| !v.is_box)
            .map(|(_, v)| v.point.x)
            .collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup();
        let max_x = *xs.last().expect("diagram has at least one vertex");
        xs.push(max_x + 100.0);

        let mut slabs: Vec<(f64, Vec<SlabLine>)> =
            xs.into_iter().map(|x| (x, Vec::new())).collect();
        let mut verticals = true;
        let mut vert_left = 0usize;
        let mut vert_right = 0usize;
        let mut vert_thresh = 0.0f64;

        for (id, he) in dcel.hedges() {
            // One half-edge per twin pair, chosen by the stable site order.
            if dcel.hedge_site(id) < dcel.hedge_site(he.twin) {
                continue;
            }
            let origin_box = dcel.vert(dcel.origin_vertex(id)).is_box;
            let twin_origin_box = dcel.vert(dcel.origin_vertex(he.twin)).is_box;
            if origin_box && twin_origin_box {
                continue; // box boundary
            }

            if !origin_box && !twin_origin_box {
                // Interior edge: spans the slabs between its endpoints.
                let e = if dcel.origin_point(id).x > dcel.origin_point(he.twin).x {
                    he.twin
                } else {
                    id
                };
                let e_twin = dcel.hedge(e).twin;
                let lo_x = dcel.origin_point(e).x;
                let hi_x = dcel.origin_point(e_twin).x;
                let line = dcel.hedge(e).line;
                let info = SlabLine {
                    line,
                    site_below: dcel.hedge_site(e),
                    site_above: dcel.hedge_site(e_twin),
                };
                let mut i = Self::lower_bound(&slabs, lo_x) + 1;
                while i < slabs.len()
                    && (slabs[i].0 < hi_x || (slabs[i].0 - hi_x).abs() < 1e-6)
                {
                    slabs[i].1.push(info);
                    verticals = false;
                    i += 1;
                }
            } else {
                // Clipped edge: anchored inside, running to the box in `dir`.
                let e = if origin_box { he.twin } else { id };
                let e_twin = dcel.hedge(e).twin;
                let line = dcel.hedge(e).line;

                if line.is_vertical() {
                    // A single vertical split; only relevant when the whole
                    // diagram turns out vertical.
                    vert_left = if line.dir == Dir::Down {
                        dcel.hedge_site(e)
                    } else {
                        dcel.hedge_site(e_twin)
                    };
                    vert_right = if line.dir == Dir::Up {
                        dcel.hedge_site(e)
                    } else {
                        dcel.hedge_site(e_twin)
                    };
                    if let LineEq::Vertical { x } = line.eq {
                        vert_thresh = x;
                    }
                    continue;
                }

                let (site_below, site_above) = if line.dir == Dir::Right {
                    (dcel.hedge_site(e), dcel.hedge_site(e_twin))
                } else {
                    (dcel.hedge_site(e_twin), dcel.hedge_site(e))
                };
                let info = SlabLine {
                    line,
                    site_below,
                    site_above,
                };
                let start = Self::lower_bound(&slabs, dcel.origin_point(e).x);
                if line.dir == Dir::Right {
                    let mut i = start + 1;
                    while i < slabs.len() {
                        slabs[i].1.push(info);
                        verticals = false;
                        i += 1;
                    }
                } else {
                    let mut i = start;
                    loop {
                        slabs[i].1.push(info);
                        verticals = false;
                        if i == 0 {
                            break;
                        }
                        i -= 1;
                    }
                }
            }
        }

        if !verticals {
            // Order each slab's lines bottom-to-top at its right x; near-ties
            // are resolved at the previous slab's x (1e-6).
            let mut last_x = slabs[0].0 - 10.0;
            for (x, lines) in slabs.iter_mut() {
                let x = *x;
                lines.sort_by(|a, b| {
                    let ay = a.line.y_at(x);
                    let by = b.line.y_at(x);
                    if (ay - by).abs() < 1e-6 {
                        a.line.y_at(last_x).total_cmp(&b.line.y_at(last_x))
                    } else {
                        ay.total_cmp(&by)
                    }
                });
                last_x = x;
            }
        }

        Self {
            slabs,
            verticals,
            vert_left,
            vert_right,
            vert_thresh,
        }
    }

    /// Site of the cell containing `p` (inside the box).
    pub fn locate(&self, p: Vec2) -> usize {
        if self.verticals {
            return if p.x <= self.vert_thresh {
                self.vert_left
            } else {
                self.vert_right
            };
        }

        let mut si = Self::lower_bound(&self.slabs, p.x);
        if si == self.slabs.len() {
            si -= 1;
        }
        let lines = &self.slabs[si].1;
        assert!(!lines.is_empty(), "slab has no separating lines");

        // Lowest line at or above the query.
        let mut lo = 0usize;
        let mut hi = lines.len() - 1;
        while lo < hi {
            let pivot = (lo + hi) / 2;
            if lines[pivot].line.y_at(p.x) >= p.y {
                hi = pivot;
            } else {
                lo = pivot + 1;
            }
        }

        if lines[lo].line.y_at(p.x) > p.y {
            lines[lo].site_below
        } else {
            lines[lines.len() - 1].site_above
        }
    }
}

#[cfg(test)]
mod tests;
