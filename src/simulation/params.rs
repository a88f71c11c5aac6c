//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed integration step size and end time,
//! - softening length and gravitational constant (`eps`, `G`),
//! - random seed for generated initial conditions

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub dt: f64,    // fixed step size
    pub eps: f64,   // softening length (Plummer)
    pub g: f64,     // gravitational constant
    pub seed: u64,  // deterministic seed
}

impl Default for Parameters {
    // Constants of the classic galaxy scenario.
    fn default() -> Self {
        Self {
            t_end: 30.0,
            dt: 0.03,
            eps: 7.0,
            g: 0.3,
            seed: 0,
        }
    }
}
