//! Serde-deserializable engine settings.
//!
//! Every field has a default, so a partial document is enough. Numeric fields
//! accept either JSON numbers or decimal strings:
//!
//! ```json
//! {
//!   "gravitational_constant": "0.0000000000667",
//!   "min_distance": 1,
//!   "time_step": 0.01,
//!   "parallel": false
//! }
//! ```

use crate::{
    engine::Engine,
    error::{Error, Result},
    scalar::Scalar,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Gravitational constant `G`.
    #[serde(default = "default_gravitational_constant")]
    pub gravitational_constant: Scalar,
    /// Pairs closer than this exert no force.
    #[serde(default = "default_min_distance")]
    pub min_distance: Scalar,
    /// Fixed step used by [`crate::Simulation`].
    #[serde(default = "default_time_step")]
    pub time_step: Scalar,
    /// Evaluate pair forces on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

fn default_gravitational_constant() -> Scalar {
    Scalar::new(Engine::DEFAULT_G)
}

fn default_min_distance() -> Scalar {
    Scalar::new(Engine::DEFAULT_MIN_DISTANCE)
}

fn default_time_step() -> Scalar {
    Scalar::new(0.01)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: default_gravitational_constant(),
            min_distance: default_min_distance(),
            time_step: default_time_step(),
            parallel: false,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that cannot drive a simulation.
    ///
    /// The engine accepts any values; this is for callers loading settings from outside.
    pub fn validate(&self) -> Result<()> {
        if self.min_distance.is_less_than(Scalar::ZERO) {
            return Err(Error::InvalidConfig(format!(
                "min_distance must be >= 0, got {}",
                self.min_distance
            )));
        }
        if self.time_step.is_zero() {
            return Err(Error::InvalidConfig("time_step must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() -> Result<()> {
        let config = EngineConfig::from_json("{}")?;
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.gravitational_constant.to_number(), 6.67e-11);
        assert_eq!(config.min_distance, Scalar::ONE);
        assert_eq!(config.time_step.to_number(), 0.01);
        assert!(!config.parallel);
        Ok(())
    }

    #[test]
    fn string_constants_are_accepted() -> Result<()> {
        let config = EngineConfig::from_json(
            r#"{ "gravitational_constant": "1", "min_distance": "0.1", "parallel": true }"#,
        )?;
        assert_eq!(config.gravitational_constant, Scalar::ONE);
        assert_eq!(config.min_distance.to_number(), 0.1);
        assert!(config.parallel);

        let engine = Engine::from_config(&config);
        assert_eq!(engine.gravitational_constant(), Scalar::ONE);
        assert!(engine.use_rayon());
        Ok(())
    }

    #[test]
    fn invalid_values_rejected() {
        let err = EngineConfig::from_json(r#"{ "min_distance": -1 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("min_distance"));

        let err = EngineConfig::from_json(r#"{ "time_step": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("time_step"));

        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn serializes_back_to_numbers() -> Result<()> {
        let text = serde_json::to_string(&EngineConfig::default())?;
        assert!(text.contains("\"min_distance\":1.0"));
        assert_eq!(EngineConfig::from_json(&text)?, EngineConfig::default());
        Ok(())
    }
}
