use crate::{
    body::Body,
    config::EngineConfig,
    engine::Engine,
    scalar::Scalar,
    utils,
    vector::Vector3,
};

/// Drives an [`Engine`] at a fixed step and keeps the current snapshot of bodies.
///
/// This is the caller side of the engine: it owns the bodies, elapsed time and
/// step count. Trails and any other display state stay with the presentation layer.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// Time step per frame.
    pub dt: Scalar,
    /// Number of steps taken since the last reset.
    pub frame: u64,
    /// Simulated time since the last reset.
    pub time: Scalar,
    /// Current snapshot of all bodies.
    pub bodies: Vec<Body>,
    /// Physics engine and its constants.
    pub engine: Engine,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Default constants.
    pub const DEFAULT_DT: f64 = 0.01;

    /// Initializes a new simulation with default constants and the triangle preset.
    pub fn new() -> Self {
        Self::with_bodies(utils::triangle(), Scalar::new(Self::DEFAULT_DT), Engine::default())
    }

    /// Initializes a new simulation from settings and an initial set of bodies.
    pub fn from_config(config: &EngineConfig, bodies: Vec<Body>) -> Self {
        Self::with_bodies(bodies, config.time_step, Engine::from_config(config))
    }

    /// Initializes a new simulation with the given bodies, step and engine.
    pub fn with_bodies(bodies: Vec<Body>, dt: Scalar, engine: Engine) -> Self {
        Self {
            dt,
            frame: 0,
            time: Scalar::ZERO,
            bodies,
            engine,
        }
    }

    /// Replaces the bodies and rewinds time and the step count.
    pub fn reset(&mut self, bodies: Vec<Body>) {
        self.bodies = bodies;
        self.time = Scalar::ZERO;
        self.frame = 0;
    }

    /// Advances the simulation by one step.
    pub fn step(&mut self) {
        let bodies = std::mem::take(&mut self.bodies);
        self.bodies = self.engine.advance(bodies, self.dt);
        self.time = self.time.add(self.dt);
        self.frame += 1;
    }

    /// Advances the simulation by `steps` steps.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Total kinetic energy of all bodies.
    pub fn kinetic_energy(&self) -> Scalar {
        self.bodies
            .iter()
            .fold(Scalar::ZERO, |acc, body| acc.add(body.kinetic_energy()))
    }

    /// Total linear momentum of all bodies.
    pub fn momentum(&self) -> Vector3 {
        self.bodies
            .iter()
            .fold(Vector3::ZERO, |acc, body| acc.add(body.momentum()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_tracks_time_and_frames() {
        let mut sim = Simulation::new();
        assert_eq!(sim.bodies.len(), 3);
        sim.run(3);
        assert_eq!(sim.frame, 3);
        assert!((sim.time.to_number() - 0.03).abs() < 1e-15);
        assert_eq!(sim.bodies.len(), 3);
    }

    #[test]
    fn triangle_starts_to_collapse() {
        let mut sim = Simulation::new();
        let before = sim.bodies[0].position;
        sim.step();
        // Body 1 is pulled toward the other two, i.e. into the first quadrant.
        let after = sim.bodies[0].position;
        assert!(before.x.is_less_than(after.x));
        assert!(before.y.is_less_than(after.y));
        assert!(sim.bodies.iter().all(|b| !b.acceleration.magnitude().is_zero()));
    }

    #[test]
    fn reset_rewinds() {
        let mut sim = Simulation::new();
        sim.run(5);
        sim.reset(utils::three_body());
        assert_eq!(sim.frame, 0);
        assert_eq!(sim.time, Scalar::ZERO);
        assert_eq!(sim.bodies, utils::three_body());
    }

    #[test]
    fn from_config_uses_time_step() {
        let config = EngineConfig {
            time_step: Scalar::new(0.5),
            ..EngineConfig::default()
        };
        let mut sim = Simulation::from_config(&config, utils::three_body());
        sim.step();
        assert_eq!(sim.time, Scalar::new(0.5));
        assert_eq!(sim.engine.gravitational_constant(), config.gravitational_constant);
    }
}
