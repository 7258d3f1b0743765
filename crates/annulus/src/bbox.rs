//! Bounding box: clips half-infinite edges and closes every face cycle.

use crate::dcel::{Dcel, FaceId, HedgeId, VertexId};
use crate::geom::{rect_halfline_intersect, Line, Rect, Site, Vec2};

/// Surround the diagram with a square box: every half-edge whose twin has no
/// origin is clipped against it, the box boundary is wired into the DCEL, and
/// a half-edge incident to the outer face is returned.
pub fn add_box(sites: &[Site], open_face: FaceId, dcel: &mut Dcel) -> HedgeId {
    let mut rect = Rect {
        x1: sites[0].x(),
        x2: sites[0].x(),
        y1: sites[0].y(),
        y2: sites[0].y(),
    };
    for s in sites {
        rect.x1 = rect.x1.min(s.x());
        rect.y1 = rect.y1.min(s.y());
        rect.x2 = rect.x2.max(s.x());
        rect.y2 = rect.y2.max(s.y());
    }
    for (_, v) in dcel.vertices() {
        rect.x1 = rect.x1.min(v.point.x);
        rect.y1 = rect.y1.min(v.point.y);
        rect.x2 = rect.x2.max(v.point.x);
        rect.y2 = rect.y2.max(v.point.y);
    }

    // Pad, then square up to the longer side.
    rect.x1 -= 50.0;
    rect.y1 -= 50.0;
    rect.x2 += 50.0;
    rect.y2 += 50.0;
    let size = (rect.y2 - rect.y1).max(rect.x2 - rect.x1);
    let x_diff = size - (rect.x2 - rect.x1);
    rect.x1 -= x_diff / 2.0;
    rect.x2 += x_diff / 2.0;
    let y_diff = size - (rect.y2 - rect.y1);
    rect.y1 -= y_diff / 2.0;
    rect.y2 += y_diff / 2.0;

    let mut box_verts: Vec<VertexId> = Vec::new();
    for p in [
        Vec2::new(rect.x1, rect.y1),
        Vec2::new(rect.x2, rect.y2),
        Vec2::new(rect.x1, rect.y2),
        Vec2::new(rect.x2, rect.y1),
    ] {
        box_verts.push(dcel.push_vertex(p, true));
    }

    // Clip every half-infinite edge; coincident exit points share a vertex.
    let hedge_ids: Vec<HedgeId> = dcel.hedges().map(|(id, _)| id).collect();
    for id in hedge_ids {
        let twin = dcel.hedge(id).twin;
        if dcel.hedge(twin).origin.is_some() {
            continue;
        }
        let origin = dcel.origin_point(id);
        let inter = rect_halfline_intersect(rect, dcel.hedge(id).line, origin);
        let vid = match box_verts
            .iter()
            .copied()
            .find(|&v| dcel.vert(v).point == inter)
        {
            Some(v) => v,
            None => {
                let v = dcel.push_vertex(inter, true);
                box_verts.push(v);
                v
            }
        };
        dcel.hedge_mut(twin).origin = Some(vid);
        dcel.vert_mut(vid).incident = Some(twin);
    }

    // Walk the box clockwise (descending atan2 around its center).
    let mid = Vec2::new((rect.x1 + rect.x2) / 2.0, (rect.y1 + rect.y2) / 2.0);
    box_verts.sort_by(|&a, &b| {
        let pa = dcel.vert(a).point;
        let pb = dcel.vert(b).point;
        let ang_a = (mid.y - pa.y).atan2(mid.x - pa.x);
        let ang_b = (mid.y - pb.y).atan2(mid.x - pb.x);
        ang_b.total_cmp(&ang_a)
    });

    // One twinned pair per consecutive vertex pair; created up front because
    // the wiring below reaches across the wrap-around.
    let sz = box_verts.len();
    let mut fwds: Vec<HedgeId> = Vec::with_capacity(sz);
    let mut bwds: Vec<HedgeId> = Vec::with_capacity(sz);
    for i in 0..sz {
        let a = dcel.vert(box_verts[i]).point;
        let b = dcel.vert(box_verts[(i + 1) % sz]).point;
        let line = if a.x == b.x {
            Line::vertical(a.x)
        } else {
            let k = (b.y - a.y) / (b.x - a.x);
            Line::slanted(k, a.y - k * a.x)
        };
        let (f, bw) = dcel.push_twins(line);
        fwds.push(f);
        bwds.push(bw);
    }

    for i in 0..sz {
        let i_nxt = (i + 1) % sz;
        let i_prev = (i + sz - 1) % sz;
        let fwd = fwds[i];
        let bwd = bwds[i];

        dcel.hedge_mut(fwd).origin = Some(box_verts[i]);
        dcel.hedge_mut(bwd).origin = Some(box_verts[i_nxt]);
        dcel.hedge_mut(bwd).face = Some(open_face);

        // The inward side belongs to the cell of the nearest preceding
        // non-corner vertex's clipped edge.
        let mut idx = i;
        while dcel.vert(box_verts[idx]).incident.is_none() {
            idx = (idx + sz - 1) % sz;
        }
        let inc = dcel.vert(box_verts[idx]).incident.expect("checked above");
        let inc_twin = dcel.hedge(inc).twin;
        let inward_face = dcel.hedge(inc_twin).face;
        dcel.hedge_mut(fwd).face = inward_face;

        // The outer-face cycle runs counter to the fwd ring.
        dcel.link(bwds[i], bwds[i_prev]);
        let incident = dcel.vert(box_verts[i]).incident;
        match incident {
            None => {
                // Corner: the inward ring passes straight through.
                dcel.link(fwds[i_prev], fwds[i]);
                dcel.vert_mut(box_verts[i]).incident = Some(fwds[i]);
            }
            Some(inc_i) => {
                // Clip vertex: splice around the clipped edge.
                let inc_twin_i = dcel.hedge(inc_i).twin;
                dcel.link(inc_twin_i, fwds[i]);
                dcel.link(fwds[i_prev], inc_i);
            }
        }
    }

    bwds[0]
}

/// After the box closes the subdivision, point every bounded face at one of
/// its boundary edges and register those edges as holes of the outer face.
pub fn wire_components(dcel: &mut Dcel, open_face: FaceId) {
    let hedge_ids: Vec<HedgeId> = dcel.hedges().map(|(id, _)| id).collect();
    for id in hedge_ids {
        let face = dcel.hedge(id).face.expect("closed diagram");
        if face != open_face && dcel.face(face).outer.is_none() {
            dcel.face_mut(face).outer = Some(id);
            dcel.face_mut(open_face).inner.push(id);
        }
    }
}
