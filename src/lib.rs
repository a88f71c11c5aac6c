pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{NVec2, System};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::quadtree::{softened_accel, NodeKind, QuadNode, QuadTree, MAX_DEPTH};
pub use simulation::forces::{AccelSet, Acceleration, NewtonianGravity, NewtonianGravityBarnesHut};
pub use simulation::integrator::leapfrog_integrator;
pub use simulation::galaxy::gaussian_galaxy;
pub use simulation::scenario::Scenario;

pub use configuration::config::{
    BodyConfig, EngineConfig, ForceConfig, GalaxyConfig, ParametersConfig, ScenarioConfig,
};

pub use benchmark::benchmark::{bench_gravity, bench_leapfrog};
