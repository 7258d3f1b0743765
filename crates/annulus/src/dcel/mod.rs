//! Doubly-connected edge list over index arenas.
//!
//! Vertices, faces and half-edges live in three parallel `Vec`s addressed by
//! newtype handles; producers rewire the subdivision directly through
//! `&mut Dcel`. Removal tombstones the entry (`alive = false`) so handles
//! held elsewhere stay valid; every iterator skips dead entries.
//!
//! Faces are pushed in site order, so `FaceId(site)` is the face of `site`
//! (the outer face comes last). Half-edges only exist in twinned pairs.

use crate::geom::{Line, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HedgeId(pub usize);

#[derive(Clone, Debug)]
pub struct Vertex {
    pub point: Vec2,
    pub incident: Option<HedgeId>,
    pub is_box: bool,
    alive: bool,
}

#[derive(Clone, Debug)]
pub struct Face {
    /// Site index this cell belongs to (input index for the nearest diagram,
    /// hull index for the farthest one; the outer face gets n).
    pub site: usize,
    pub outer: Option<HedgeId>,
    pub inner: Vec<HedgeId>,
}

#[derive(Clone, Debug)]
pub struct Hedge {
    pub origin: Option<VertexId>,
    pub twin: HedgeId,
    pub face: Option<FaceId>,
    pub next: Option<HedgeId>,
    pub prev: Option<HedgeId>,
    pub line: Line,
    alive: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Dcel {
    verts: Vec<Vertex>,
    faces: Vec<Face>,
    hedges: Vec<Hedge>,
}

impl Dcel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_vertex(&mut self, point: Vec2, is_box: bool) -> VertexId {
        let id = VertexId(self.verts.len());
        self.verts.push(Vertex {
            point,
            incident: None,
            is_box,
            alive: true,
        });
        id
    }

    pub fn push_face(&mut self, site: usize) -> FaceId {
        let id = FaceId(self.faces.len());
        self.faces.push(Face {
            site,
            outer: None,
            inner: Vec::new(),
        });
        id
    }

    /// Create a twinned pair of half-edges carrying the same supporting line.
    pub fn push_twins(&mut self, line: Line) -> (HedgeId, HedgeId) {
        let a = HedgeId(self.hedges.len());
        let b = HedgeId(self.hedges.len() + 1);
        self.hedges.push(Hedge {
            origin: None,
            twin: b,
            face: None,
            next: None,
            prev: None,
            line,
            alive: true,
        });
        self.hedges.push(Hedge {
            origin: None,
            twin: a,
            face: None,
            next: None,
            prev: None,
            line,
            alive: true,
        });
        (a, b)
    }

    #[inline]
    pub fn vert(&self, id: VertexId) -> &Vertex {
        &self.verts[id.0]
    }
    #[inline]
    pub fn vert_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.verts[id.0]
    }
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.0]
    }
    #[inline]
    pub fn face_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id.0]
    }
    #[inline]
    pub fn hedge(&self, id: HedgeId) -> &Hedge {
        &self.hedges[id.0]
    }
    #[inline]
    pub fn hedge_mut(&mut self, id: HedgeId) -> &mut Hedge {
        &mut self.hedges[id.0]
    }

    /// a -> b along a face boundary.
    #[inline]
    pub fn link(&mut self, a: HedgeId, b: HedgeId) {
        self.hedges[a.0].next = Some(b);
        self.hedges[b.0].prev = Some(a);
    }

    /// Origin vertex of a half-edge that is known to be anchored.
    #[inline]
    pub fn origin_vertex(&self, id: HedgeId) -> VertexId {
        self.hedge(id)
            .origin
            .expect("half-edge expected to be anchored")
    }

    #[inline]
    pub fn origin_point(&self, id: HedgeId) -> Vec2 {
        self.vert(self.origin_vertex(id)).point
    }

    /// Site of the cell a half-edge borders.
    #[inline]
    pub fn hedge_site(&self, id: HedgeId) -> usize {
        let face = self.hedge(id).face.expect("half-edge has no face yet");
        self.face(face).site
    }

    pub fn kill_vertex(&mut self, id: VertexId) {
        self.verts[id.0].alive = false;
    }

    pub fn kill_hedge(&mut self, id: HedgeId) {
        self.hedges[id.0].alive = false;
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.verts
            .iter()
            .enumerate()
            .filter(|(_, v)| v.alive)
            .map(|(i, v)| (VertexId(i), v))
    }

    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter().enumerate().map(|(i, f)| (FaceId(i), f))
    }

    pub fn hedges(&self) -> impl Iterator<Item = (HedgeId, &Hedge)> {
        self.hedges
            .iter()
            .enumerate()
            .filter(|(_, h)| h.alive)
            .map(|(i, h)| (HedgeId(i), h))
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Structural self-check: twin/next/prev/origin agreement and the Euler
    /// relation on the closed subdivision. Intended for diagnostics after the
    /// bounding box pass.
    pub fn assert_consistent(&self) {
        let mut v = 0usize;
        let mut e2 = 0usize;
        for (_, vert) in self.vertices() {
            v += 1;
            assert!(vert.incident.is_some(), "vertex without incident edge");
        }
        for (id, he) in self.hedges() {
            e2 += 1;
            assert_eq!(self.hedge(he.twin).twin, id, "twin.twin != self");
            assert!(he.alive);
            let next = he.next.expect("open boundary after closing");
            let prev = he.prev.expect("open boundary after closing");
            assert_eq!(self.hedge(next).prev, Some(id), "next.prev != self");
            assert_eq!(self.hedge(prev).next, Some(id), "prev.next != self");
            let prev_twin = self.hedge(prev).twin;
            assert_eq!(
                he.origin,
                self.hedge(prev_twin).origin,
                "origin != prev.twin.origin"
            );
            assert_ne!(
                he.face,
                self.hedge(he.twin).face,
                "half-edge and twin share a face"
            );
        }
        let f = self.faces.len();
        assert_eq!(
            v as i64 - (e2 / 2) as i64 + f as i64,
            2,
            "Euler relation violated"
        );

        // Every bounded face's outer cycle stays on that face and closes.
        for (fid, face) in self.faces() {
            let Some(start) = face.outer else { continue };
            let mut curr = start;
            let mut steps = 0usize;
            loop {
                assert_eq!(self.hedge(curr).face, Some(fid), "outer cycle leaves face");
                curr = self.hedge(curr).next.expect("outer cycle broken");
                steps += 1;
                assert!(steps <= e2, "outer cycle does not close");
                if curr == start {
                    break;
                }
            }
        }
    }
}
