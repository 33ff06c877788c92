//! Simulation tuning.
//!
//! All constants default to the values the layout was tuned with. Every
//! struct deserializes from a partial camelCase object so JavaScript only
//! has to name the fields it overrides.

use serde::{Deserialize, Serialize};

use super::error::{SimulationError, SimulationResult};

/// Damped spring parameters shared by every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpringConfig {
    /// Spring constant (default: 10.0).
    pub stiffness: f32,
    /// Relative-velocity damping (default: 0.03).
    pub damping: f32,
    /// Edge length at which the spring exerts no force (default: 150.0).
    pub rest_length: f32,
    /// Distance substituted when both endpoints coincide; must be positive
    /// (default: 1.0).
    pub zero_distance: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 10.0,
            damping: 0.03,
            rest_length: 150.0,
            zero_distance: 1.0,
        }
    }
}

/// Optional inverse-square repulsion between every pair of nodes.
///
/// Disabled by default. Enabling it allocates the N(N-1)/2 pair list at
/// construction and adds an O(N^2) pass to every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepulsionConfig {
    /// Whether the pair pass runs (default: false).
    pub enabled: bool,
    /// Push applied at unit distance (default: 5000.0).
    pub strength: f32,
    /// Distances are clamped up to this before squaring; must be positive
    /// (default: 1.0).
    pub min_distance: f32,
}

impl Default for RepulsionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            strength: 5000.0,
            min_distance: 1.0,
        }
    }
}

/// Full set of simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub spring: SpringConfig,
    pub repulsion: RepulsionConfig,
    /// Velocity components at or below this magnitude snap to zero
    /// (default: 0.0001).
    pub velocity_floor: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            repulsion: RepulsionConfig::default(),
            velocity_floor: 0.0001,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter the force passes divide by or compare against.
    ///
    /// All values must be finite. `zero_distance` and `min_distance` must be
    /// positive so coincident nodes get a finite force; `velocity_floor` may
    /// be zero, which disables flooring.
    pub fn validate(&self) -> SimulationResult<()> {
        Bound::Finite.check("spring.stiffness", self.spring.stiffness)?;
        Bound::Finite.check("spring.damping", self.spring.damping)?;
        Bound::Finite.check("spring.restLength", self.spring.rest_length)?;
        Bound::Positive.check("spring.zeroDistance", self.spring.zero_distance)?;
        Bound::Finite.check("repulsion.strength", self.repulsion.strength)?;
        Bound::Positive.check("repulsion.minDistance", self.repulsion.min_distance)?;
        Bound::NonNegative.check("velocityFloor", self.velocity_floor)?;
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Bound {
    Finite,
    Positive,
    NonNegative,
}

impl Bound {
    fn check(self, field: &'static str, value: f32) -> SimulationResult<()> {
        let (ok, expected) = match self {
            Bound::Finite => (value.is_finite(), "finite"),
            Bound::Positive => (value.is_finite() && value > 0.0, "finite and positive"),
            Bound::NonNegative => (value.is_finite() && value >= 0.0, "finite and non-negative"),
        };
        if ok {
            Ok(())
        } else {
            Err(SimulationError::InvalidConfig { field, expected, value })
        }
    }
}

/// Bounds for the initial random placement, typically the canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
