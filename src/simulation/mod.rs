pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod quadtree;
pub mod galaxy;
pub mod scenario;
