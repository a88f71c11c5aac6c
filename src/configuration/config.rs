//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – force model selection and acceptance parameter
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`BodyConfig`]       – initial state for each explicit body
//! - [`GalaxyConfig`]     – a generated Gaussian-disk galaxy
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   force: "barnes_hut"     # or "direct"
//!   theta: 0.5
//!
//! parameters:
//!   t_end: 30.0             # total simulation time
//!   dt: 0.03                # fixed step size
//!   eps: 7.0                # softening length
//!   g: 0.3                  # gravitational constant
//!   seed: 0                 # deterministic seed for generated galaxies
//!
//! bodies:
//!   - x: [ -0.5, 0.0 ]
//!     v: [  0.0, 1.0 ]
//!     m: 1.0
//!
//! galaxies:
//!   - n: 3000
//!     center: [ 700.0, 700.0 ]
//!     drift: [ 0.0, 0.0 ]
//!     std_dev: 120.0
//! ```
//!
//! `bodies` and `galaxies` both default to empty and can be combined.
//! The engine maps this configuration into its runtime scenario
//! representation.

use serde::Deserialize;

/// Which force model the engine uses
/// `force: "direct"` or `force: "barnes_hut"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceConfig {
    #[serde(rename = "direct")] // exact pairwise O(N^2) summation
    Direct,

    #[serde(rename = "barnes_hut")] // quadtree multipole approximation, O(N log N)
    BarnesHut,
}

/// High-level engine configuration
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub force: ForceConfig, // force evaluation strategy
    pub theta: Option<f64>, // acceptance parameter; a node passing the size/distance test is taken as a point mass instead of descending
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub dt: f64,    // fixed time step size
    pub eps: f64,   // softening length - prevents singular forces at very small separations
    pub g: f64,     // gravitational constant
    pub seed: u64,  // deterministic seed to make generated scenarios reproducible
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position in simulation units
    pub v: [f64; 2], // initial velocity in simulation units per time unit
    pub m: f64,      // mass of the body
}

/// Configuration for a generated Gaussian-disk galaxy
#[derive(Deserialize, Debug)]
pub struct GalaxyConfig {
    pub n: usize,         // number of bodies, including the central attractor
    pub center: [f64; 2], // disk center
    pub drift: [f64; 2],  // uniform drift velocity applied to the whole galaxy
    pub std_dev: f64,     // standard deviation of body positions around the center
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,         // engine-level configuration
    pub parameters: ParametersConfig, // global numerical and physical parameters
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // explicitly placed bodies
    #[serde(default)]
    pub galaxies: Vec<GalaxyConfig>, // generated galaxies, appended after the explicit bodies
}
