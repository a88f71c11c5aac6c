//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at frame 0)
//! - active force set (`AccelSet`)
//!
//! The bundle is also the interface a renderer or driver consumes:
//! `advance_step` plus the snapshot accessors on [`System`].

use anyhow::Result;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{ForceConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{AccelSet, NewtonianGravity, NewtonianGravityBarnesHut};
use crate::simulation::galaxy::gaussian_galaxy;
use crate::simulation::integrator::leapfrog_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::System;

/// A fully-initialized simulation scenario: engine settings, parameters,
/// current system state, and the set of active force laws.
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
}

impl Scenario {
    /// Build a runtime scenario from its YAML-facing configuration.
    ///
    /// Explicit bodies are placed first, then each configured galaxy is
    /// generated and appended. All galaxies share one generator seeded
    /// from `parameters.seed`, so the whole initial state is a pure
    /// function of the configuration.
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            dt: p_cfg.dt,
            eps: p_cfg.eps,
            g: p_cfg.g,
            seed: p_cfg.seed,
        };

        let engine = Engine {
            force: cfg.engine.force,
            theta: cfg.engine.theta.unwrap_or(0.5),
        };

        let mut system = System::new();
        for bc in &cfg.bodies {
            system.add_body(bc.x[0], bc.x[1], bc.v[0], bc.v[1], bc.m);
        }

        let mut rng = StdRng::seed_from_u64(parameters.seed);
        for gc in &cfg.galaxies {
            let galaxy = gaussian_galaxy(
                gc.n,
                gc.center[0],
                gc.center[1],
                gc.drift[0],
                gc.drift[1],
                gc.std_dev,
                &parameters,
                engine.theta,
                &mut rng,
            )?;
            system.add_bodies(&galaxy);
        }

        let forces = Self::force_set(&engine, &parameters);

        debug!(
            "scenario built: {} bodies, force = {:?}, theta = {}",
            system.len(),
            engine.force,
            engine.theta
        );

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
        })
    }

    /// Build a scenario directly from initial-state arrays.
    pub fn from_initial_state(
        px: Vec<f64>,
        py: Vec<f64>,
        vx: Vec<f64>,
        vy: Vec<f64>,
        mass: Vec<f64>,
        parameters: Parameters,
        engine: Engine,
    ) -> Result<Self> {
        let system = System::from_initial_state(px, py, vx, vy, mass)?;
        let forces = Self::force_set(&engine, &parameters);
        Ok(Self {
            engine,
            parameters,
            system,
            forces,
        })
    }

    fn force_set(engine: &Engine, parameters: &Parameters) -> AccelSet {
        match engine.force {
            ForceConfig::Direct => AccelSet::new().with(NewtonianGravity {
                g: parameters.g,
                eps: parameters.eps,
            }),
            ForceConfig::BarnesHut => AccelSet::new().with(NewtonianGravityBarnesHut {
                g: parameters.g,
                eps: parameters.eps,
                theta: engine.theta,
            }),
        }
    }

    /// Advance the simulation by one fixed time step.
    pub fn advance_step(&mut self) -> Result<()> {
        leapfrog_integrator(&mut self.system, &self.forces, &self.parameters)
    }

    pub fn body_count(&self) -> usize {
        self.system.len()
    }

    pub fn frame(&self) -> u64 {
        self.system.frame()
    }
}
