pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod effects;
pub mod integrator;
pub mod collisions;
pub mod scenario;
