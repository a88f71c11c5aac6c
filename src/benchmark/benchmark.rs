use std::time::Instant;

use crate::simulation::forces::{AccelSet, Acceleration, NewtonianGravity, NewtonianGravityBarnesHut};
use crate::simulation::integrator::leapfrog_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, System};

/// Deterministic test system: bodies scattered on trigonometric curves,
/// no rng needed.
fn scattered_system(n: usize) -> System {
    let mut sys = System::new();
    for i in 0..n {
        let i_f = i as f64;
        sys.add_body(
            (i_f * 0.37).sin() * 500.0,
            (i_f * 0.13).cos() * 500.0,
            0.0,
            0.0,
            1.0,
        );
    }
    sys
}

/// Time a single full acceleration pass, direct vs Barnes-Hut, over a
/// range of system sizes.
pub fn bench_gravity() {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    let parameters = Parameters::default();

    for n in ns {
        let sys = scattered_system(n);
        let mut out = vec![NVec2::zeros(); n];

        let direct = NewtonianGravity {
            g: parameters.g,
            eps: parameters.eps,
        };
        let bh = NewtonianGravityBarnesHut {
            g: parameters.g,
            eps: parameters.eps,
            theta: 0.5,
        };

        // Warm up
        let _ = direct.acceleration(&sys, &mut out);
        let _ = bh.acceleration(&sys, &mut out);

        // Time direct
        let t0 = Instant::now();
        let _ = direct.acceleration(&sys, &mut out);
        let dt_direct = t0.elapsed().as_secs_f64();

        // Time Barnes-Hut
        let t1 = Instant::now();
        let _ = bh.acceleration(&sys, &mut out);
        let dt_bh = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, direct = {dt_direct:8.6} s, BH = {dt_bh:8.6} s");
    }
}

/// Time full leapfrog steps (tree rebuild included) for both force
/// models over a range of system sizes.
pub fn bench_leapfrog() {
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let steps = 10;

    let parameters = Parameters::default();

    for n in ns {
        let direct = AccelSet::new().with(NewtonianGravity {
            g: parameters.g,
            eps: parameters.eps,
        });
        let bh = AccelSet::new().with(NewtonianGravityBarnesHut {
            g: parameters.g,
            eps: parameters.eps,
            theta: 0.5,
        });

        let mut sys_direct = scattered_system(n);
        let t0 = Instant::now();
        for _ in 0..steps {
            let _ = leapfrog_integrator(&mut sys_direct, &direct, &parameters);
        }
        let dt_direct = t0.elapsed().as_secs_f64() / steps as f64;

        let mut sys_bh = scattered_system(n);
        let t1 = Instant::now();
        for _ in 0..steps {
            let _ = leapfrog_integrator(&mut sys_bh, &bh, &parameters);
        }
        let dt_bh = t1.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, direct step = {dt_direct:8.6} s, BH step = {dt_bh:8.6} s");
    }
}
