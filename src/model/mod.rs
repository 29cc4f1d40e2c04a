use crate::astro::Body;

pub mod diagnostics;
mod report;
mod simulator;

pub use report::{format_scientific, Report};
pub use simulator::{SimulationConfig, Simulator};

/// Initial conditions for a run.
#[derive(Debug, Clone)]
pub struct Universe {
    // Only used to scale the picture; it plays no part in the physics.
    pub radius: f64,
    // Order matters: it's the order bodies are updated, drawn and reported in.
    pub bodies: Vec<Body>,
}
