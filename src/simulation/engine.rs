//! High-level runtime engine settings
//!
//! Selects the force model (direct or Barnes-Hut) and the multipole
//! acceptance parameter used when building and running a `Scenario`

use crate::configuration::config::ForceConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub force: ForceConfig, // direct N^2 sum or Barnes-Hut tree
    pub theta: f64,         // multipole acceptance parameter
}
