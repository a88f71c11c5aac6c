//! Deterministic Gaussian-disk galaxy generator
//!
//! Places one massive central attractor plus a disk of unit-mass bodies
//! sampled from a 2D Gaussian, then sets each body on a circular orbit
//! around the local gravitational field. The random generator is passed
//! in explicitly so repeated runs with the same seed are reproducible.

use anyhow::Result;
use log::debug;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::simulation::params::Parameters;
use crate::simulation::quadtree::QuadTree;
use crate::simulation::states::System;

/// Samples with squared radius at or below this are rejected, keeping a
/// hole around the central attractor so the disk has no singular core.
const CORE_EXCLUSION_R2: f64 = 100.0;

/// Generate a Gaussian-disk galaxy of `n` bodies centered at
/// `(cx, cy)`, moving with uniform drift `(drift_vx, drift_vy)`.
///
/// The first body is a central attractor of mass `n`; the remaining
/// `n - 1` bodies have unit mass and positions drawn from a 2D Gaussian
/// with standard deviation `std_dev` around the center (core-excluded).
/// Orbital speeds come from the centripetal balance `v = sqrt(|a| * r)`
/// against the field of the fully placed disk, with the velocity
/// perpendicular to the local acceleration, so the disk starts in
/// near-circular rotation.
pub fn gaussian_galaxy(
    n: usize,
    cx: f64,
    cy: f64,
    drift_vx: f64,
    drift_vy: f64,
    std_dev: f64,
    params: &Parameters,
    theta: f64,
    rng: &mut StdRng,
) -> Result<System> {
    let mut galaxy = System::new();
    if n == 0 {
        return Ok(galaxy);
    }

    galaxy.add_body(cx, cy, 0.0, 0.0, n as f64);

    let normal = Normal::new(0.0, std_dev)?;
    let mut placed = 1;
    while placed < n {
        let x = normal.sample(rng);
        let y = normal.sample(rng);
        if x * x + y * y > CORE_EXCLUSION_R2 {
            galaxy.add_body(cx + x, cy + y, 0.0, 0.0, 1.0);
            placed += 1;
        }
    }

    // Circular-orbit velocities from the local field of the placed disk.
    let tree = QuadTree::build(&galaxy)?;
    for i in 0..galaxy.len() {
        let a = tree.acceleration_at(galaxy.px[i], galaxy.py[i], params.g, params.eps, theta);
        let a_mag = a.norm();
        if a_mag == 0.0 {
            // No local field (degenerate placement): drift only.
            galaxy.vx[i] = drift_vx;
            galaxy.vy[i] = drift_vy;
            continue;
        }

        let dx = cx - galaxy.px[i];
        let dy = cy - galaxy.py[i];
        let r = (dx * dx + dy * dy).sqrt();
        let speed = (a_mag * r).sqrt();

        // Velocity perpendicular to the local acceleration (rotate the
        // unit acceleration by -90 degrees), plus the galaxy-wide drift.
        // The central body has r = 0, so it gets the drift alone.
        galaxy.vx[i] = a.y / a_mag * speed + drift_vx;
        galaxy.vy[i] = -a.x / a_mag * speed + drift_vy;
    }

    debug!("generated {} body galaxy at ({cx}, {cy}), std_dev {std_dev}", galaxy.len());
    Ok(galaxy)
}
