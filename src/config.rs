//! Tunable simulation constants.
//!
//! Force generators read these from the owning [`Scene`](crate::world::Scene)
//! when they are registered.

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Numeric policy knobs shared by a scene and its force generators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Newtonian gravity never uses a separation smaller than this.
    pub gravity_min_distance: f64,
    /// Kinetic friction snaps velocity to zero below this speed.
    pub friction_threshold: f64,
    /// Per-component speed tolerance for `Scene::is_still`.
    pub rest_epsilon: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity_min_distance: 5.0,
            friction_threshold: 1.0,
            rest_epsilon: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        log::debug!("loaded simulation config: {:?}", config);
        Ok(config)
    }

    /// Like [`SimulationConfig::from_json`], falling back to the defaults on any error.
    pub fn from_json_or_default(text: &str) -> Self {
        Self::from_json(text).unwrap_or_else(|err| {
            log::warn!("ignoring simulation config: {err}");
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every field is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !(self.gravity_min_distance.is_finite() && self.gravity_min_distance >= 0.0) {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "gravity_min_distance must be finite and >= 0",
            });
        }
        if !(self.friction_threshold.is_finite() && self.friction_threshold >= 0.0) {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "friction_threshold must be finite and >= 0",
            });
        }
        if !(self.rest_epsilon.is_finite() && self.rest_epsilon > 0.0) {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "rest_epsilon must be finite and > 0",
            });
        }
        Ok(())
    }
}
