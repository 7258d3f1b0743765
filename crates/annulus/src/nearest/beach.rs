//! Beach-line BST for the Fortune sweep.
//!
//! Leaves are parabolic arcs (site plus the id of their currently scheduled
//! circle event, if any); internal nodes are breakpoints (ordered site pair
//! plus the still-growing half-edge they trace). Keys are implicit: a
//! breakpoint's position is the parabola intersection of its site pair at the
//! current sweep, so the tree is searched by recomputing intersections on the
//! way down. No rebalancing; depth is not a correctness concern.

use crate::dcel::{Dcel, HedgeId};
use crate::geom::{parabola_intersect, Dir, LineEq, Site};

use super::events::EventId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug)]
enum NodeKind {
    Arc {
        site: usize,
        event: Option<EventId>,
    },
    Breakpoint {
        /// (left arc's site, right arc's site).
        sites: (usize, usize),
        edge: HedgeId,
        left: NodeId,
        right: NodeId,
    },
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

#[derive(Clone, Debug)]
pub struct BeachLine {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    sites: Vec<Site>,
}

impl BeachLine {
    pub fn new(sites: Vec<Site>) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            sites,
        }
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn new_arc(&mut self, site: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            kind: NodeKind::Arc { site, event: None },
        });
        id
    }

    fn new_breakpoint(
        &mut self,
        sites: (usize, usize),
        edge: HedgeId,
        left: NodeId,
        right: NodeId,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            kind: NodeKind::Breakpoint {
                sites,
                edge,
                left,
                right,
            },
        });
        self.node_mut(left).parent = Some(id);
        self.node_mut(right).parent = Some(id);
        id
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Arc { .. })
    }

    fn children(&self, id: NodeId) -> (NodeId, NodeId) {
        match self.node(id).kind {
            NodeKind::Breakpoint { left, right, .. } => (left, right),
            NodeKind::Arc { .. } => unreachable!("arc has no children"),
        }
    }

    pub fn arc_site(&self, id: NodeId) -> usize {
        match self.node(id).kind {
            NodeKind::Arc { site, .. } => site,
            NodeKind::Breakpoint { .. } => unreachable!("breakpoint is not an arc"),
        }
    }

    /// Id of the circle event currently scheduled for this arc. A queued
    /// event whose id no longer matches is a false alarm.
    pub fn arc_event(&self, id: NodeId) -> Option<EventId> {
        match self.node(id).kind {
            NodeKind::Arc { event, .. } => event,
            NodeKind::Breakpoint { .. } => None,
        }
    }

    pub fn set_arc_event(&mut self, id: NodeId, ev: Option<EventId>) {
        if let NodeKind::Arc { event, .. } = &mut self.node_mut(id).kind {
            *event = ev;
        }
    }

    fn bp_edge(&self, id: NodeId) -> HedgeId {
        match self.node(id).kind {
            NodeKind::Breakpoint { edge, .. } => edge,
            NodeKind::Arc { .. } => unreachable!("arc traces no edge"),
        }
    }

    /// Leftmost arc.
    pub fn first_leaf(&self) -> Option<NodeId> {
        let mut curr = self.root?;
        while !self.is_leaf(curr) {
            curr = self.children(curr).0;
        }
        Some(curr)
    }

    /// The arc vertically above x for the given sweep position.
    pub fn find_arc_above(&self, x: f64, sweep_y: f64) -> Option<NodeId> {
        let mut curr = self.root?;
        loop {
            match self.node(curr).kind {
                NodeKind::Arc { .. } => return Some(curr),
                NodeKind::Breakpoint {
                    sites: (l, r),
                    left,
                    right,
                    ..
                } => {
                    let inter =
                        parabola_intersect(self.sites[l].pos, self.sites[r].pos, sweep_y);
                    curr = if inter.x < x { right } else { left };
                }
            }
        }
    }

    /// Breakpoint between a leaf and its in-order predecessor.
    pub fn find_pred_lca(&self, leaf: NodeId) -> Option<NodeId> {
        let mut curr = leaf;
        loop {
            let parent = self.node(curr).parent?;
            if self.children(parent).0 == curr {
                curr = parent;
            } else {
                return Some(parent);
            }
        }
    }

    pub fn find_pred(&self, leaf: NodeId) -> Option<NodeId> {
        let lca = self.find_pred_lca(leaf)?;
        let mut curr = self.children(lca).0;
        while !self.is_leaf(curr) {
            curr = self.children(curr).1;
        }
        Some(curr)
    }

    /// Breakpoint between a leaf and its in-order successor.
    pub fn find_succ_lca(&self, leaf: NodeId) -> Option<NodeId> {
        let mut curr = leaf;
        loop {
            let parent = self.node(curr).parent?;
            if self.children(parent).1 == curr {
                curr = parent;
            } else {
                return Some(parent);
            }
        }
    }

    pub fn find_succ(&self, leaf: NodeId) -> Option<NodeId> {
        let lca = self.find_succ_lca(leaf)?;
        let mut curr = self.children(lca).1;
        while !self.is_leaf(curr) {
            curr = self.children(curr).0;
        }
        Some(curr)
    }

    /// First arc ever: the beach line is a single leaf.
    pub fn set_root_arc(&mut self, site: usize) {
        assert!(self.root.is_none(), "beach line already seeded");
        let leaf = self.new_arc(site);
        self.root = Some(leaf);
    }

    /// Insertion while the sweep still sits at its initial position: the new
    /// site becomes the leftmost arc, separated from the previous leftmost by
    /// a breakpoint tracing `he` (a vertical ray growing upward).
    pub fn initial_insert(&mut self, site: usize, he: HedgeId) {
        let old_root = self.root.expect("initial insert needs a seeded root");
        let leftmost = self.first_leaf().expect("tree has a leftmost leaf");
        let leftmost_site = self.arc_site(leftmost);
        let leaf = self.new_arc(site);
        let new_root = self.new_breakpoint((site, leftmost_site), he, leaf, old_root);
        self.root = Some(new_root);
    }

    /// Split `arc` under a new `site`: three leaves (old, new, old) joined by
    /// two breakpoints tracing `upper` and `lower`. Any circle event
    /// scheduled on the split arc is orphaned here, turning its queue entry
    /// into a false alarm. Returns the middle leaf.
    pub fn insert(
        &mut self,
        arc: NodeId,
        site: usize,
        upper: HedgeId,
        lower: HedgeId,
    ) -> NodeId {
        let other = self.arc_site(arc);
        let parent = self.node(arc).parent;
        let arc_is_left = parent.map(|p| self.children(p).0 == arc);
        self.set_arc_event(arc, None);

        let leaf1 = self.new_arc(other);
        let leaf2 = self.new_arc(site);
        let leaf3 = self.new_arc(other);
        let internal2 = self.new_breakpoint((site, other), lower, leaf2, leaf3);
        let internal1 = self.new_breakpoint((other, site), upper, leaf1, internal2);

        match (parent, arc_is_left) {
            (None, _) => self.root = Some(internal1),
            (Some(p), Some(true)) => {
                if let NodeKind::Breakpoint { left, .. } = &mut self.node_mut(p).kind {
                    *left = internal1;
                }
                self.node_mut(internal1).parent = Some(p);
            }
            (Some(p), _) => {
                if let NodeKind::Breakpoint { right, .. } = &mut self.node_mut(p).kind {
                    *right = internal1;
                }
                self.node_mut(internal1).parent = Some(p);
            }
        }
        leaf2
    }

    /// Remove a squeezed arc. Of the two breakpoints meeting at the event,
    /// the deeper one (the arc's parent) disappears with it; the surviving
    /// ancestor takes over `new_edge` and the merged site pair. Returns the
    /// two half-edges terminated at the event vertex, predecessor side first.
    pub fn delete(&mut self, arc: NodeId, new_edge: HedgeId) -> (HedgeId, HedgeId) {
        let pred = self.find_pred(arc).expect("squeezed arc has a predecessor");
        let succ = self.find_succ(arc).expect("squeezed arc has a successor");
        let parent = self.node(arc).parent.expect("squeezed arc is not the root");
        let arc_is_left = self.children(parent).0 == arc;
        let sibling = if arc_is_left {
            self.children(parent).1
        } else {
            self.children(parent).0
        };

        // Climb to the other breakpoint adjacent to the arc.
        let mut down = parent;
        let mut up = self
            .node(parent)
            .parent
            .expect("interior arc has a grandparent");
        loop {
            let (l, r) = self.children(up);
            if (arc_is_left && l == down) || (!arc_is_left && r == down) {
                down = up;
                up = self
                    .node(up)
                    .parent
                    .expect("adjacent breakpoint exists above");
            } else {
                break;
            }
        }
        let other_lca = up;

        let terminated = if arc_is_left {
            (self.bp_edge(other_lca), self.bp_edge(parent))
        } else {
            (self.bp_edge(parent), self.bp_edge(other_lca))
        };

        let (pred_site, succ_site) = (self.arc_site(pred), self.arc_site(succ));
        if let NodeKind::Breakpoint { sites, edge, .. } = &mut self.node_mut(other_lca).kind {
            *edge = new_edge;
            if arc_is_left {
                sites.1 = succ_site;
            } else {
                sites.0 = pred_site;
            }
        }

        // Splice the sibling into the grandparent; the arc and its parent
        // become unreachable.
        let grandpa = self.node(parent).parent.expect("checked above");
        let parent_is_left = self.children(grandpa).0 == parent;
        if let NodeKind::Breakpoint { left, right, .. } = &mut self.node_mut(grandpa).kind {
            if parent_is_left {
                *left = sibling;
            } else {
                *right = sibling;
            }
        }
        self.node_mut(sibling).parent = Some(grandpa);
        self.set_arc_event(arc, None);

        terminated
    }

    /// Post-sweep pass: give every still-growing edge a direction tag by
    /// comparing its anchored end with the breakpoint position at the final
    /// sweep.
    pub fn set_orientations(&self, dcel: &mut Dcel, sweep_y: f64) {
        if let Some(root) = self.root {
            if !self.is_leaf(root) {
                self.orient(root, dcel, sweep_y);
            }
        }
    }

    fn orient(&self, id: NodeId, dcel: &mut Dcel, sweep_y: f64) {
        let NodeKind::Breakpoint {
            sites: (l, r),
            edge,
            left,
            right,
        } = self.node(id).kind
        else {
            return;
        };

        // Work on the anchored twin.
        let e = if dcel.hedge(edge).origin.is_none() {
            dcel.hedge(edge).twin
        } else {
            edge
        };
        let near = dcel.origin_point(e);
        let far = parabola_intersect(self.sites[l].pos, self.sites[r].pos, sweep_y);

        let he = dcel.hedge_mut(e);
        match he.line.eq {
            LineEq::Vertical { .. } => {
                he.line.dir = if near.y < far.y { Dir::Up } else { Dir::Down };
            }
            LineEq::Slanted { .. } => {
                if near.x < far.x {
                    he.line.dir = Dir::Right;
                } else if near.x > far.x {
                    he.line.dir = Dir::Left;
                }
            }
        }

        if !self.is_leaf(left) {
            self.orient(left, dcel, sweep_y);
        }
        if !self.is_leaf(right) {
            self.orient(right, dcel, sweep_y);
        }
    }
}
