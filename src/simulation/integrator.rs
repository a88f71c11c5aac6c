//! Fixed-step leapfrog integrator for the N-body system
//!
//! Drift-kick-drift with a single force evaluation per step, driven by
//! `AccelSet` and `Parameters`

use anyhow::Result;

use super::forces::AccelSet;
use super::params::Parameters;
use super::states::{NVec2, System};

/// Advance the system by one step using drift-kick-drift leapfrog.
///
/// One force evaluation per step, at the half-stepped positions:
/// - Drift: `x_n+1/2 = x_n + (dt/2) * v_n`
/// - Kick:  `v_n+1 = v_n + dt * a(x_n+1/2)`
/// - Drift: `x_n+1 = x_n+1/2 + (dt/2) * v_n+1`
///
/// Updates positions, velocities, and the frame counter in-place with
/// fixed step `dt = params.dt`.
pub fn leapfrog_integrator(sys: &mut System, forces: &AccelSet, params: &Parameters) -> Result<()> {
    let n = sys.len();
    let dt = params.dt;
    let half_dt = 0.5 * dt;

    // First drift: x += (dt/2) * v
    for i in 0..n {
        sys.px[i] += sys.vx[i] * half_dt;
        sys.py[i] += sys.vy[i] * half_dt;
    }

    // Accelerations at the half-stepped positions (the Barnes-Hut term
    // rebuilds its tree from these)
    let mut acc = vec![NVec2::zeros(); n];
    forces.accumulate_accels(&*sys, &mut acc)?;

    // Kick: v += dt * a
    for (i, a) in acc.iter().enumerate() {
        sys.vx[i] += a.x * dt;
        sys.vy[i] += a.y * dt;
    }

    // Second drift: x += (dt/2) * v
    for i in 0..n {
        sys.px[i] += sys.vx[i] * half_dt;
        sys.py[i] += sys.vy[i] * half_dt;
    }

    sys.frame += 1;
    Ok(())
}
