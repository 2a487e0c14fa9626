use crate::{body::Body, config::EngineConfig, scalar::Scalar, vector::Vector3};

use rayon::prelude::*;

/// Pairwise Newtonian gravity with a fixed-step kinematic update.
///
/// The engine owns only its two constants. Bodies are handed in for a single
/// step and handed back; nothing about them is retained between calls.
#[derive(Clone, Debug, PartialEq)]
pub struct Engine {
    /// Gravitational constant `G`.
    gravitational_constant: Scalar,
    /// Pairs closer than this exert no force on each other.
    min_distance: Scalar,
    /// Evaluate pair forces on the rayon pool.
    use_rayon: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(
            Scalar::new(Self::DEFAULT_G),
            Scalar::new(Self::DEFAULT_MIN_DISTANCE),
        )
    }
}

impl Engine {
    /// Default constants.
    pub const DEFAULT_G: f64 = 6.67e-11;
    pub const DEFAULT_MIN_DISTANCE: f64 = 1.0;

    pub fn new(gravitational_constant: Scalar, min_distance: Scalar) -> Self {
        Self {
            gravitational_constant,
            min_distance,
            use_rayon: false,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut engine = Self::new(config.gravitational_constant, config.min_distance);
        engine.use_rayon = config.parallel;
        engine
    }

    pub fn gravitational_constant(&self) -> Scalar {
        self.gravitational_constant
    }

    pub fn min_distance(&self) -> Scalar {
        self.min_distance
    }

    /// Replaces `G`; takes effect on the next step.
    pub fn set_gravitational_constant(&mut self, g: Scalar) {
        self.gravitational_constant = g;
    }

    /// Replaces the minimum-distance floor; takes effect on the next step.
    pub fn set_min_distance(&mut self, min_distance: Scalar) {
        self.min_distance = min_distance;
    }

    /// Sets whether to use Rayon for the pair force pass.
    /// Results are identical either way.
    pub fn set_use_rayon(&mut self, use_rayon: bool) {
        self.use_rayon = use_rayon;
    }

    pub fn use_rayon(&self) -> bool {
        self.use_rayon
    }

    /// Euclidean distance between two positions.
    pub fn distance(&self, a: Vector3, b: Vector3) -> Scalar {
        a.subtract(b).magnitude()
    }

    /// Force exerted on `a` by `b`: `G m_a m_b / r^2` along the unit vector from `a` to `b`.
    /// Zero when the pair is closer than the minimum distance.
    pub fn gravitational_force(&self, a: &Body, b: &Body) -> Vector3 {
        let distance = self.distance(a.position, b.position);
        if distance.is_less_than(self.min_distance) {
            return Vector3::ZERO;
        }

        let magnitude = self
            .gravitational_constant
            .multiply(a.mass)
            .multiply(b.mass)
            .divide(distance.pow(2.0));

        let d = b.position.subtract(a.position);
        Vector3 {
            x: magnitude.multiply(d.x).divide(distance),
            y: magnitude.multiply(d.y).divide(distance),
            z: magnitude.multiply(d.z).divide(distance),
        }
    }

    /// Net force on every body, indexed like `bodies`.
    ///
    /// Pairs are summed in ascending `(i, j)` order, `i < j`, with `+F` added to
    /// `i` and `-F` to `j`. The forces of an isolated system sum to zero.
    pub fn net_forces(&self, bodies: &[Body]) -> Vec<Vector3> {
        let n = bodies.len();
        let mut forces = vec![Vector3::ZERO; n];

        if self.use_rayon {
            let pairs: Vec<(usize, usize)> = (0..n)
                .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
                .collect();
            let pair_forces: Vec<Vector3> = pairs
                .par_iter()
                .map(|&(i, j)| self.gravitational_force(&bodies[i], &bodies[j]))
                .collect();
            // Reduce sequentially so the summation order matches the serial path.
            for (&(i, j), &force) in pairs.iter().zip(pair_forces.iter()) {
                forces[i] = forces[i].add(force);
                forces[j] = forces[j].add(-force);
            }
        } else {
            for i in 0..n {
                for j in i + 1..n {
                    let force = self.gravitational_force(&bodies[i], &bodies[j]);
                    forces[i] = forces[i].add(force);
                    forces[j] = forces[j].add(-force);
                }
            }
        }

        forces
    }

    /// Advances a snapshot of bodies by one step of `dt` and returns the next snapshot.
    pub fn advance(&self, mut bodies: Vec<Body>, dt: Scalar) -> Vec<Body> {
        self.advance_in_place(&mut bodies, dt);
        bodies
    }

    /// Advances the bodies by one step of `dt`, mutating position, velocity and acceleration.
    ///
    /// 1. Acceleration is reset, then set to `F / m` from the pairwise forces.
    /// 2. `x += v dt + a dt^2 / 2`, then `v += a dt`, using the same `a` for both.
    pub fn advance_in_place(&self, bodies: &mut [Body], dt: Scalar) {
        for body in bodies.iter_mut() {
            body.acceleration = Vector3::ZERO;
        }

        let forces = self.net_forces(bodies);
        for (body, force) in bodies.iter_mut().zip(forces) {
            body.acceleration = Vector3 {
                x: force.x.divide(body.mass),
                y: force.y.divide(body.mass),
                z: force.z.divide(body.mass),
            };
        }

        let half_dt_sq = dt.multiply(dt).multiply(Scalar::new(0.5));
        for body in bodies.iter_mut() {
            let (p, v, a) = (body.position, body.velocity, body.acceleration);
            body.position = Vector3 {
                x: p.x.add(v.x.multiply(dt)).add(a.x.multiply(half_dt_sq)),
                y: p.y.add(v.y.multiply(dt)).add(a.y.multiply(half_dt_sq)),
                z: p.z.add(v.z.multiply(dt)).add(a.z.multiply(half_dt_sq)),
            };
            body.velocity = Vector3 {
                x: v.x.add(a.x.multiply(dt)),
                y: v.y.add(a.y.multiply(dt)),
                z: v.z.add(a.z.multiply(dt)),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(id: u32, mass: f64, pos: [f64; 3], vel: [f64; 3]) -> Body {
        Body::new(id, format!("Body {id}"), mass, pos.into(), vel.into())
    }

    #[test]
    fn force_points_from_a_to_b() {
        let engine = Engine::new(Scalar::ONE, Scalar::new(0.1));
        let a = body(0, 10.0, [0.0, 0.0, 0.0], [0.0; 3]);
        let b = body(1, 10.0, [20.0, 0.0, 0.0], [0.0; 3]);
        let f = engine.gravitational_force(&a, &b);
        assert_eq!(f, Vector3::new(0.25, 0.0, 0.0));
        assert_eq!(engine.gravitational_force(&b, &a), Vector3::new(-0.25, 0.0, 0.0));
    }

    #[test]
    fn force_is_zero_below_floor() {
        let engine = Engine::new(Scalar::ONE, Scalar::new(1.0));
        let a = body(0, 5.0, [0.0, 0.0, 0.0], [0.0; 3]);
        let b = body(1, 5.0, [0.5, 0.0, 0.0], [0.0; 3]);
        assert_eq!(engine.gravitational_force(&a, &b), Vector3::ZERO);
        // Exactly at the floor is not below it.
        let c = body(2, 5.0, [1.0, 0.0, 0.0], [0.0; 3]);
        assert_eq!(engine.gravitational_force(&a, &c), Vector3::new(25.0, 0.0, 0.0));
    }

    #[test]
    fn coincident_bodies_feel_nothing() {
        let engine = Engine::new(Scalar::ONE, Scalar::new(0.1));
        let bodies = vec![body(0, 1.0, [3.0, 3.0, 3.0], [0.0; 3]), body(1, 1.0, [3.0, 3.0, 3.0], [0.0; 3])];
        let out = engine.advance(bodies, Scalar::ONE);
        assert!(out.iter().all(|b| b.acceleration == Vector3::ZERO));
        assert!(out.iter().all(|b| b.position == Vector3::new(3.0, 3.0, 3.0)));
    }

    #[test]
    fn kinematic_update_order() {
        // A constant pull: position uses the old velocity plus a dt^2/2, velocity adds a dt.
        let engine = Engine::new(Scalar::ONE, Scalar::new(0.1));
        let bodies = vec![
            body(0, 1.0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            body(1, 4.0, [0.0, 2.0, 0.0], [0.0; 3]),
        ];
        let out = engine.advance(bodies, Scalar::new(2.0));
        // F = 1 * 1 * 4 / 4 = 1 toward +y, a0 = 1, a1 = -0.25
        assert_eq!(out[0].acceleration, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(out[1].acceleration, Vector3::new(0.0, -0.25, 0.0));
        assert_eq!(out[0].position, Vector3::new(2.0, 2.0, 0.0));
        assert_eq!(out[0].velocity, Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(out[1].position, Vector3::new(0.0, 1.5, 0.0));
        assert_eq!(out[1].velocity, Vector3::new(0.0, -0.5, 0.0));
    }

    #[test]
    fn stale_acceleration_is_discarded() {
        let engine = Engine::new(Scalar::ONE, Scalar::new(0.1));
        let mut lone = body(0, 1.0, [0.0; 3], [0.0; 3]);
        lone.acceleration = Vector3::new(9.0, 9.0, 9.0);
        let out = engine.advance(vec![lone], Scalar::ONE);
        assert_eq!(out[0].acceleration, Vector3::ZERO);
        assert_eq!(out[0].position, Vector3::ZERO);
    }

    #[test]
    fn setters_replace_constants() {
        let mut engine = Engine::default();
        assert_eq!(engine.gravitational_constant().to_number(), 6.67e-11);
        assert_eq!(engine.min_distance(), Scalar::ONE);
        engine.set_gravitational_constant(Scalar::new(2.0));
        engine.set_min_distance(Scalar::new(0.5));
        assert_eq!(engine.gravitational_constant(), Scalar::new(2.0));
        assert_eq!(engine.min_distance(), Scalar::new(0.5));
    }

    #[test]
    fn rayon_path_matches_serial_bits() {
        let bodies: Vec<Body> = (0..12)
            .map(|i| {
                let t = i as f64;
                body(i, 1.0 + t * 0.37, [t.cos() * 10.0, t.sin() * 7.0, t * 0.3], [0.0; 3])
            })
            .collect();
        let mut engine = Engine::new(Scalar::new(1.3), Scalar::new(0.01));
        let serial = engine.net_forces(&bodies);
        engine.set_use_rayon(true);
        assert_eq!(engine.net_forces(&bodies), serial);
    }
}
