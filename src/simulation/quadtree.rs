//! # Barnes-Hut quadtree (2D)
//!
//! Approximates gravitational acceleration in an N-body system by
//! replacing distant clusters of bodies with a single pseudo-body at
//! their center of mass, turning the naive `O(N²)` all-pairs sum into
//! an `O(N log N)` tree traversal.
//!
//! - Space is recursively subdivided into 4 quadrants.
//! - Each node aggregates the total mass and center of mass (COM) of
//!   everything inserted beneath it; aggregates are maintained
//!   incrementally during insertion.
//! - Region bounds are not stored on the nodes; they are passed down
//!   during insertion and traversal, reconstructed from the root square.
//!
//! Nodes live in a contiguous arena (`Vec<QuadNode>`) and reference each
//! other by index, so building a tree is a handful of reallocations
//! rather than one heap allocation per node. The tree is rebuilt from
//! scratch every step and discarded after the force pass.

use anyhow::{bail, Result};

use crate::simulation::states::{NVec2, System};

/// Subdivision stops at this depth: a leaf that would split again simply
/// absorbs the incoming body into its aggregate. Without the cap, two
/// bodies at identical coordinates would recurse forever.
pub const MAX_DEPTH: u32 = 48;

/// Occupancy state of a node. An explicit tag instead of a sentinel on
/// the aggregate fields, so "empty" and "holds one body at the origin"
/// cannot be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Never inserted into; aggregate fields are meaningless.
    Empty,
    /// Holds exactly one body (or, past `MAX_DEPTH`, a merged point mass).
    Leaf,
    /// Subdivided; aggregate covers every body in the subtree.
    Internal,
}

/// A single quadtree node: aggregate mass/COM plus up to four children,
/// stored as indices into [`QuadTree::nodes`].
#[derive(Debug, Clone)]
pub struct QuadNode {
    pub kind: NodeKind,
    pub mass: f64,
    pub com: NVec2,
    pub children: [Option<usize>; 4],
}

impl QuadNode {
    fn empty() -> Self {
        Self {
            kind: NodeKind::Empty,
            mass: 0.0,
            com: NVec2::zeros(),
            children: [None; 4],
        }
    }
}

/// A complete quadtree over a square region: node arena, root index, and
/// the bounding square (origin + side length) everything was inserted
/// against.
pub struct QuadTree {
    pub nodes: Vec<QuadNode>,
    pub root: usize,
    origin: NVec2,
    size: f64,
}

impl QuadTree {
    /// Empty tree over an explicit square region.
    pub fn from_bounds(origin_x: f64, origin_y: f64, size: f64) -> Self {
        Self {
            nodes: vec![QuadNode::empty()],
            root: 0,
            origin: NVec2::new(origin_x, origin_y),
            size,
        }
    }

    /// Build a tree over the current state of `sys`.
    ///
    /// Computes the axis-aligned min/max over all positions, forms a
    /// square from the larger span, inflates the origin by -1 and the
    /// side by +2 so float rounding cannot push a body outside its own
    /// bounds, then inserts every body in array order.
    pub fn build(sys: &System) -> Result<Self> {
        if sys.is_empty() {
            return Ok(Self::from_bounds(-1.0, -1.0, 2.0));
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for i in 0..sys.len() {
            min_x = min_x.min(sys.px[i]);
            min_y = min_y.min(sys.py[i]);
            max_x = max_x.max(sys.px[i]);
            max_y = max_y.max(sys.py[i]);
        }
        let size = (max_x - min_x).max(max_y - min_y).abs();

        let mut tree = Self::from_bounds(min_x - 1.0, min_y - 1.0, size + 2.0);
        for i in 0..sys.len() {
            tree.insert(sys.px[i], sys.py[i], sys.mass[i])?;
        }
        Ok(tree)
    }

    pub fn origin(&self) -> NVec2 {
        self.origin
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn root(&self) -> &QuadNode {
        &self.nodes[self.root]
    }

    /// Insert one body. Fails if the body lies outside the bounding
    /// square; with bounds derived from the same data this is a
    /// defensive invariant check, not an expected runtime case.
    pub fn insert(&mut self, x: f64, y: f64, mass: f64) -> Result<()> {
        if x < self.origin.x
            || y < self.origin.y
            || self.origin.x + self.size < x
            || self.origin.y + self.size < y
        {
            bail!(
                "body at ({x}, {y}) is outside the tree bounds (origin ({}, {}), size {})",
                self.origin.x,
                self.origin.y,
                self.size
            );
        }
        let (min_x, min_y, size, root) = (self.origin.x, self.origin.y, self.size, self.root);
        self.insert_at(root, min_x, min_y, size, 0, x, y, mass);
        Ok(())
    }

    fn insert_at(
        &mut self,
        node_idx: usize,
        min_x: f64,
        min_y: f64,
        size: f64,
        depth: u32,
        x: f64,
        y: f64,
        mass: f64,
    ) {
        match self.nodes[node_idx].kind {
            NodeKind::Empty => {
                // First body in this region: the node becomes a leaf and
                // the body itself is the aggregate.
                let node = &mut self.nodes[node_idx];
                node.kind = NodeKind::Leaf;
                node.com = NVec2::new(x, y);
                node.mass = mass;
            }
            NodeKind::Leaf => {
                if depth >= MAX_DEPTH {
                    // Coincident (or nearly so) with the occupant: merge
                    // into a single point mass instead of subdividing.
                    self.fold_into_aggregate(node_idx, x, y, mass);
                    return;
                }
                // Subdivide: push the existing occupant down, then the new
                // body (quadrants computed independently). The node still
                // carries the occupant as its aggregate, so the final fold
                // yields the correct combined mass/COM.
                let occupant = self.nodes[node_idx].com;
                let occupant_mass = self.nodes[node_idx].mass;
                self.nodes[node_idx].kind = NodeKind::Internal;
                self.insert_into_quadrant(
                    node_idx,
                    min_x,
                    min_y,
                    size,
                    depth,
                    occupant.x,
                    occupant.y,
                    occupant_mass,
                );
                self.insert_into_quadrant(node_idx, min_x, min_y, size, depth, x, y, mass);
                self.fold_into_aggregate(node_idx, x, y, mass);
            }
            NodeKind::Internal => {
                self.fold_into_aggregate(node_idx, x, y, mass);
                self.insert_into_quadrant(node_idx, min_x, min_y, size, depth, x, y, mass);
            }
        }
    }

    /// Weighted-average update of a node's aggregate:
    /// `com = (com*m_old + p*m) / (m_old + m)`, `mass = m_old + m`.
    fn fold_into_aggregate(&mut self, node_idx: usize, x: f64, y: f64, mass: f64) {
        let node = &mut self.nodes[node_idx];
        let total = node.mass + mass;
        node.com.x = (node.com.x * node.mass + x * mass) / total;
        node.com.y = (node.com.y * node.mass + y * mass) / total;
        node.mass = total;
    }

    /// Descend into the quadrant containing `(x, y)`, creating the child
    /// node lazily. `x < mid` selects the left half, `y < mid` the top
    /// half; midpoint ties go right/bottom.
    fn insert_into_quadrant(
        &mut self,
        node_idx: usize,
        min_x: f64,
        min_y: f64,
        size: f64,
        depth: u32,
        x: f64,
        y: f64,
        mass: f64,
    ) {
        let half = size / 2.0;
        let mid_x = min_x + half;
        let mid_y = min_y + half;

        let mut quadrant = 0;
        let mut child_min_x = min_x;
        let mut child_min_y = min_y;
        if x >= mid_x {
            quadrant |= 1;
            child_min_x = mid_x;
        }
        if y >= mid_y {
            quadrant |= 2;
            child_min_y = mid_y;
        }

        let child_idx = match self.nodes[node_idx].children[quadrant] {
            Some(idx) => idx,
            None => {
                let new_idx = self.nodes.len();
                self.nodes.push(QuadNode::empty());
                self.nodes[node_idx].children[quadrant] = Some(new_idx);
                new_idx
            }
        };
        self.insert_at(child_idx, child_min_x, child_min_y, half, depth + 1, x, y, mass);
    }

    /// Approximate gravitational acceleration at `(x, y)` due to every
    /// body in the tree.
    ///
    /// Leaves contribute the exact softened two-body term. An internal
    /// node whose squared-size-to-squared-distance ratio falls below
    /// `theta` is treated as a single point mass at its aggregate COM;
    /// otherwise its four children are visited and summed. `theta = 0`
    /// never accepts, so the traversal degrades to exact summation.
    pub fn acceleration_at(&self, x: f64, y: f64, g: f64, eps: f64, theta: f64) -> NVec2 {
        self.traverse(self.root, self.size, NVec2::new(x, y), g, eps, theta)
    }

    fn traverse(&self, node_idx: usize, size: f64, p: NVec2, g: f64, eps: f64, theta: f64) -> NVec2 {
        let node = &self.nodes[node_idx];
        match node.kind {
            NodeKind::Empty => NVec2::zeros(),
            NodeKind::Leaf => softened_accel(p, node.com, node.mass, g, eps),
            NodeKind::Internal => {
                let d = node.com - p;
                let dist_sq = d.dot(&d);
                // Acceptance test kept exactly as the reference
                // simulation wrote it: squared size ratio against an
                // unsquared theta. A query point sitting on the COM gives
                // an infinite ratio and forces descent.
                if size * size / dist_sq < theta {
                    softened_accel(p, node.com, node.mass, g, eps)
                } else {
                    let half = size / 2.0;
                    let mut acc = NVec2::zeros();
                    for &child in node.children.iter().flatten() {
                        acc += self.traverse(child, half, p, g, eps, theta);
                    }
                    acc
                }
            }
        }
    }
}

/// Softened two-body gravitational acceleration at `p` due to a point
/// mass at `other`: magnitude `G*m / (r² + ε²)`, direction `(dx, dy)/r`
/// (Plummer softening keeps the magnitude finite as `r → 0`).
///
/// Coincident points return zero, which doubles as the self-interaction
/// guard when a body queries the tree containing it.
pub fn softened_accel(p: NVec2, other: NVec2, mass: f64, g: f64, eps: f64) -> NVec2 {
    if p == other {
        return NVec2::zeros();
    }
    let d = other - p;
    let r2 = d.dot(&d);
    let r = r2.sqrt();
    let a = g * mass / (r2 + eps * eps);
    (a / r) * d
}
