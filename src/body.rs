use crate::{
    error::{Error, Result},
    scalar::Scalar,
    vector::Vector3,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a body, assigned by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a point mass in the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    /// Display name.
    pub name: String,
    /// Mass of the body. Expected to be positive, see [`Body::check_mass`].
    pub mass: Scalar,
    /// Position vector.
    pub position: Vector3,
    /// Velocity vector.
    pub velocity: Vector3,
    /// Acceleration from the last step (reset each step).
    #[serde(default)]
    pub acceleration: Vector3,
    /// Display color, e.g. `#3B82F6`.
    #[serde(default)]
    pub color: String,
    /// Visual radius of the body.
    #[serde(default)]
    pub radius: f64,
    /// Past positions kept by the presentation layer. The engine never touches it.
    #[serde(default)]
    pub trail: Vec<[f64; 3]>,
}

impl Body {
    /// Creates a new Body with the given properties.
    /// Initial acceleration is zero.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        mass: impl Into<Scalar>,
        position: Vector3,
        velocity: Vector3,
    ) -> Self {
        Self {
            id: BodyId(id),
            name: name.into(),
            mass: mass.into(),
            position,
            velocity,
            acceleration: Vector3::ZERO,
            color: String::from("#FFFFFF"),
            radius: 1.0,
            trail: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// 1/2 m |v|^2
    pub fn kinetic_energy(&self) -> Scalar {
        let speed = self.velocity.magnitude();
        Scalar::new(0.5).multiply(self.mass).multiply(speed.multiply(speed))
    }

    /// m v
    pub fn momentum(&self) -> Vector3 {
        self.velocity.scale(self.mass)
    }

    /// Checks that the mass is strictly positive.
    ///
    /// The engine does not enforce this: a zero or negative mass is integrated
    /// as given. Callers that want the restriction enforced call this (or
    /// [`validate_bodies`]) before handing bodies to the engine.
    pub fn check_mass(&self) -> Result<()> {
        if Scalar::ZERO.is_less_than(self.mass) {
            Ok(())
        } else {
            Err(Error::NonPositiveMass {
                id: self.id,
                mass: self.mass,
            })
        }
    }
}

/// Runs [`Body::check_mass`] over a collection, failing on the first offender.
pub fn validate_bodies(bodies: &[Body]) -> Result<()> {
    bodies.iter().try_for_each(Body::check_mass)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_body_has_zero_acceleration() {
        let b = Body::new(3, "Probe", 2.0, Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0))
            .with_color("#EF4444")
            .with_radius(8.0);
        assert_eq!(b.id, BodyId(3));
        assert_eq!(b.acceleration, Vector3::ZERO);
        assert_eq!(b.color, "#EF4444");
        assert_eq!(b.radius, 8.0);
        assert!(b.trail.is_empty());
    }

    #[test]
    fn energy_and_momentum() {
        let b = Body::new(0, "a", 2.0, Vector3::ZERO, Vector3::new(3.0, 4.0, 0.0));
        assert_eq!(b.kinetic_energy().to_number(), 25.0);
        assert_eq!(b.momentum(), Vector3::new(6.0, 8.0, 0.0));
    }

    #[test]
    fn non_positive_mass_rejected() {
        let ok = Body::new(0, "ok", 1.0, Vector3::ZERO, Vector3::ZERO);
        let zero = Body::new(1, "zero", 0.0, Vector3::ZERO, Vector3::ZERO);
        let negative = Body::new(2, "neg", -4.0, Vector3::ZERO, Vector3::ZERO);
        assert!(ok.check_mass().is_ok());
        let msg = zero.check_mass().unwrap_err().to_string();
        assert!(msg.contains("#1"));
        assert!(matches!(
            validate_bodies(&[ok, negative]),
            Err(Error::NonPositiveMass { id: BodyId(2), .. })
        ));
    }
}
