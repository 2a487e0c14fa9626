pub mod body;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod scalar;
pub mod simulation;
pub mod utils;
pub mod vector;

pub use body::{Body, BodyId};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use scalar::Scalar;
pub use simulation::Simulation;
pub use vector::Vector3;
