pub mod autopilot;
pub mod constants;
pub mod engine;
pub mod maze;
pub mod rng;
pub mod types;
