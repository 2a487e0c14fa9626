use crate::{body::BodyId, scalar::Scalar};
use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the edges of the crate.
///
/// The numeric core (scalar, vector and engine stepping) never produces these;
/// they come from configuration loading and opt-in body validation.
#[derive(Debug, Error)]
pub enum Error {
    /// A body whose mass is zero or negative.
    #[error("body {id} has non-positive mass {mass}")]
    NonPositiveMass { id: BodyId, mass: Scalar },

    /// Configuration values that cannot drive a simulation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::NonPositiveMass {
            id: BodyId(7),
            mass: Scalar::new(-2.5),
        };
        let msg = e.to_string();
        assert!(msg.contains("#7"));
        assert!(msg.contains("-2.5"));

        let e = Error::InvalidConfig("time_step must be non-zero".to_string());
        assert!(e.to_string().contains("time_step"));
    }
}
