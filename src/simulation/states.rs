//! Core state for the 2D N-body simulation.
//!
//! Body state is kept as a structure-of-arrays: five parallel vectors
//! (`px`, `py`, `vx`, `vy`, `mass`) plus a frame counter. A body's
//! identity is its index; the invariant is that all five vectors have
//! equal length at all times.

use anyhow::{bail, Result};
use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// Structure-of-arrays body state plus the current frame number.
///
/// Fields are crate-private so external callers can only observe the
/// state through read-only views or snapshot copies; all mutation goes
/// through the integrator and the add/factory methods.
#[derive(Debug, Clone, Default)]
pub struct System {
    pub(crate) px: Vec<f64>,
    pub(crate) py: Vec<f64>,
    pub(crate) vx: Vec<f64>,
    pub(crate) vy: Vec<f64>,
    pub(crate) mass: Vec<f64>,
    pub(crate) frame: u64,
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a system from complete initial-state arrays.
    /// Fails if the arrays do not all have the same length.
    pub fn from_initial_state(
        px: Vec<f64>,
        py: Vec<f64>,
        vx: Vec<f64>,
        vy: Vec<f64>,
        mass: Vec<f64>,
    ) -> Result<Self> {
        let n = px.len();
        if py.len() != n || vx.len() != n || vy.len() != n || mass.len() != n {
            bail!(
                "initial state arrays must have equal lengths (got {}, {}, {}, {}, {})",
                n,
                py.len(),
                vx.len(),
                vy.len(),
                mass.len()
            );
        }
        Ok(Self {
            px,
            py,
            vx,
            vy,
            mass,
            frame: 0,
        })
    }

    /// Append a single body. Used for initialization, not during stepping.
    pub fn add_body(&mut self, x: f64, y: f64, vx: f64, vy: f64, mass: f64) {
        self.px.push(x);
        self.py.push(y);
        self.vx.push(vx);
        self.vy.push(vy);
        self.mass.push(mass);
    }

    /// Append every body of `other`, preserving its array order.
    pub fn add_bodies(&mut self, other: &System) {
        self.px.extend_from_slice(&other.px);
        self.py.extend_from_slice(&other.py);
        self.vx.extend_from_slice(&other.vx);
        self.vy.extend_from_slice(&other.vy);
        self.mass.extend_from_slice(&other.mass);
    }

    pub fn len(&self) -> usize {
        self.px.len()
    }

    pub fn is_empty(&self) -> bool {
        self.px.is_empty()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn total_mass(&self) -> f64 {
        self.mass.iter().sum()
    }

    // Read-only views: cheap per-frame access without exposing anything
    // mutable.

    pub fn px(&self) -> &[f64] {
        &self.px
    }

    pub fn py(&self) -> &[f64] {
        &self.py
    }

    pub fn vx(&self) -> &[f64] {
        &self.vx
    }

    pub fn vy(&self) -> &[f64] {
        &self.vy
    }

    pub fn masses(&self) -> &[f64] {
        &self.mass
    }

    /// Snapshot copy of positions, `(px, py)`.
    pub fn positions(&self) -> (Vec<f64>, Vec<f64>) {
        (self.px.clone(), self.py.clone())
    }

    /// Snapshot copy of velocities, `(vx, vy)`.
    pub fn velocities(&self) -> (Vec<f64>, Vec<f64>) {
        (self.vx.clone(), self.vy.clone())
    }
}
