//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait seam, direct Newtonian gravity and the
//! Barnes-Hut-accelerated variant

use anyhow::Result;
use rayon::prelude::*;

use crate::simulation::quadtree::QuadTree;
use crate::simulation::states::{NVec2, System};

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are
/// summed into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, sys: &System, out: &mut [NVec2]) -> Result<()> {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(sys, out)?;
        }
        Ok(())
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]) -> Result<()>;
}

/// Direct-summation Newtonian gravity with Plummer softening.
///
/// The exact O(N²) reference path: every unordered pair is evaluated
/// once and applied to both bodies with opposite sign, so momentum is
/// conserved to rounding. Uses the same softened kernel as the tree
/// leaves, which is what makes the theta -> 0 equivalence hold.
pub struct NewtonianGravity {
    pub g: f64,   // gravitational constant
    pub eps: f64, // softening length
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]) -> Result<()> {
        let n = sys.len();
        let eps2 = self.eps * self.eps;

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let pi = NVec2::new(sys.px[i], sys.py[i]);
            let mi = sys.mass[i];

            for j in (i + 1)..n {
                let pj = NVec2::new(sys.px[j], sys.py[j]);

                // Coincident bodies exert no force on each other
                if pi == pj {
                    continue;
                }

                let d = pj - pi;
                let r2 = d.dot(&d);
                let r = r2.sqrt();

                // a = G * m / (r² + ε²), direction d / r
                let coef = self.g / ((r2 + eps2) * r);

                // Equal and opposite:
                // a_i += G * m_j / (r² + ε²) * d/r
                // a_j -= G * m_i / (r² + ε²) * d/r
                out[i] += coef * sys.mass[j] * d;
                out[j] -= coef * mi * d;
            }
        }
        Ok(())
    }
}

/// Newtonian gravity evaluated through a Barnes-Hut quadtree.
///
/// Builds a fresh [`QuadTree`] from the current positions on every call
/// (the tree is a per-step derived index, never kept across steps) and
/// queries it once per body. The tree is immutable during the query
/// phase and the per-body queries are independent reads, so they run in
/// parallel with rayon.
pub struct NewtonianGravityBarnesHut {
    pub g: f64,     // gravitational constant
    pub eps: f64,   // softening length
    pub theta: f64, // multipole acceptance parameter
}

impl Acceleration for NewtonianGravityBarnesHut {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]) -> Result<()> {
        if sys.is_empty() {
            return Ok(());
        }
        let tree = QuadTree::build(sys)?;
        out.par_iter_mut().enumerate().for_each(|(i, a)| {
            *a += tree.acceleration_at(sys.px[i], sys.py[i], self.g, self.eps, self.theta);
        });
        Ok(())
    }
}
