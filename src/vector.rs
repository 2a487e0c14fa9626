use crate::scalar::Scalar;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};
use ultraviolet::DVec3;

/// An immutable 3-component vector of [`Scalar`]s.
/// Used for position, velocity, acceleration and force.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: Scalar,
    pub y: Scalar,
    pub z: Scalar,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: Scalar::ZERO,
        y: Scalar::ZERO,
        z: Scalar::ZERO,
    };

    pub fn new(x: impl Into<Scalar>, y: impl Into<Scalar>, z: impl Into<Scalar>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    pub fn add(self, other: Vector3) -> Vector3 {
        Vector3 {
            x: self.x.add(other.x),
            y: self.y.add(other.y),
            z: self.z.add(other.z),
        }
    }

    #[inline]
    pub fn subtract(self, other: Vector3) -> Vector3 {
        Vector3 {
            x: self.x.subtract(other.x),
            y: self.y.subtract(other.y),
            z: self.z.subtract(other.z),
        }
    }

    /// Multiplies every component by `factor`.
    #[inline]
    pub fn scale(self, factor: Scalar) -> Vector3 {
        Vector3 {
            x: self.x.multiply(factor),
            y: self.y.multiply(factor),
            z: self.z.multiply(factor),
        }
    }

    /// Euclidean norm.
    #[inline]
    pub fn magnitude(self) -> Scalar {
        self.x
            .multiply(self.x)
            .add(self.y.multiply(self.y))
            .add(self.z.multiply(self.z))
            .sqrt()
    }

    /// Unit vector in the same direction; the zero vector maps to itself.
    pub fn normalize(self) -> Vector3 {
        let mag = self.magnitude();
        if mag.is_zero() {
            return Self::ZERO;
        }
        Vector3 {
            x: self.x.divide(mag),
            y: self.y.divide(mag),
            z: self.z.divide(mag),
        }
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x.to_number(), self.y.to_number(), self.z.to_number()]
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        DVec3::new(v.x.to_number(), v.y.to_number(), v.z.to_number())
    }
}

impl From<DVec3> for Vector3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::add(self, rhs)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Vector3) -> Vector3 {
        self.subtract(rhs)
    }
}

impl Mul<Scalar> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: Scalar) -> Vector3 {
        self.scale(rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        Vector3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}
