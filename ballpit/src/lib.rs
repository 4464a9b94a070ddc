pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Ball, Pit, Palette, Pointer, Surface, NVec2};
pub use simulation::forces::{VelocityTerm, TermSet, TickContext, Gravity, Friction, PointerFlow, ImpulseField};
pub use simulation::effects::{ImpulseEffect, Effects};
pub use simulation::integrator::{euler_step, reflect_walls, contain};
pub use simulation::collisions::{resolve_collisions, resolve_pair};
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;
pub use simulation::engine::{EngineState, SimulationPlugin, SimulationSet};

pub use configuration::config::{SimulationConfig, PhysicsConfig, RenderConfig, WindowConfig, load_config};

pub use visualization::ballpit_vis2d::{run_2d, ViewerPlugin};

pub use benchmark::benchmark::bench_tick;

pub use error::{Error, Result};
