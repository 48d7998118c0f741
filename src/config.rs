//! Configuration consumed when building a [`ParticleGroup`](crate::ParticleGroup).
//!
//! Every type here is serde-serializable so a shell can keep simulations in
//! JSON files. Missing sections fall back to their defaults.
//!
//! ```ignore
//! let config = CondensationConfig::default()
//!     .with_enclosure(Vec3::splat(-50.0), Vec3::splat(50.0))
//!     .with_speed(0.25)
//!     .with_seed(7);
//! let group = ParticleGroup::new(config)?;
//! ```

use crate::error::ConfigError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which geometric test decides that two same-index sides are touching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    /// The side normals point at each other (dot <= -threshold).
    #[default]
    Opposed,
    /// Opposed, and the two faces lie on the same plane within
    /// `plane_distance_threshold`.
    Coplanar,
    /// Opposed, and at least one atom's side normal points along its body's
    /// trajectory (dot >= threshold).
    AlongTrajectory,
}

/// How a freshly formed molecule is oriented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoleculeOrientation {
    /// Random XYZ Euler angles.
    #[default]
    Random,
    /// No rotation.
    Identity,
    /// Copy the rotation of the first atom of the pair.
    FirstAtom,
}

/// Thresholds for the bonding predicates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondingConfig {
    /// Minimum |dot| for two unit normals to count as collinear.
    pub collinear_threshold: f32,
    /// Maximum face-to-face distance for [`Alignment::Coplanar`].
    pub plane_distance_threshold: f32,
    pub alignment: Alignment,
}

impl Default for BondingConfig {
    fn default() -> Self {
        Self {
            collinear_threshold: 0.99,
            plane_distance_threshold: 0.01,
            alignment: Alignment::Opposed,
        }
    }
}

/// Walls of the simulated volume.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnclosureConfig {
    pub min: Vec3,
    pub max: Vec3,
    /// Fraction of each axis kept free when picking random spawn points.
    pub clearance: f32,
}

impl Default for EnclosureConfig {
    fn default() -> Self {
        Self {
            min: Vec3::splat(-100.0),
            max: Vec3::splat(100.0),
            clearance: 0.1,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CondensationConfig {
    pub enclosure: EnclosureConfig,
    pub bonding: BondingConfig,
    /// Distance travelled per tick, in world units.
    pub speed: f32,
    /// XYZ Euler angles (radians) added to every top-level body each tick.
    pub rotation_increment: Vec3,
    /// Edge length of an atom cube, in world units.
    pub atom_size: f32,
    pub molecule_orientation: MoleculeOrientation,
    /// Seed for spawn and fallback randomness. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for CondensationConfig {
    fn default() -> Self {
        Self {
            enclosure: EnclosureConfig::default(),
            bonding: BondingConfig::default(),
            speed: 0.5,
            rotation_increment: Vec3::new(0.01, 0.002, 0.004),
            atom_size: 5.0,
            molecule_orientation: MoleculeOrientation::Random,
            seed: None,
        }
    }
}

impl CondensationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enclosure corners.
    pub fn with_enclosure(mut self, min: Vec3, max: Vec3) -> Self {
        self.enclosure.min = min;
        self.enclosure.max = max;
        self
    }

    /// Set a cube enclosure from `-half_size` to `+half_size` on every axis.
    pub fn with_bounds(self, half_size: f32) -> Self {
        self.with_enclosure(Vec3::splat(-half_size), Vec3::splat(half_size))
    }

    pub fn with_clearance(mut self, clearance: f32) -> Self {
        self.enclosure.clearance = clearance;
        self
    }

    pub fn with_bonding(mut self, bonding: BondingConfig) -> Self {
        self.bonding = bonding;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.bonding.alignment = alignment;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_rotation_increment(mut self, increment: Vec3) -> Self {
        self.rotation_increment = increment;
        self
    }

    pub fn with_atom_size(mut self, size: f32) -> Self {
        self.atom_size = size;
        self
    }

    pub fn with_molecule_orientation(mut self, orientation: MoleculeOrientation) -> Self {
        self.molecule_orientation = orientation;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every value for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let EnclosureConfig {
            min,
            max,
            clearance,
        } = self.enclosure;
        for (axis, lo, hi) in [('x', min.x, max.x), ('y', min.y, max.y), ('z', min.z, max.z)] {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(ConfigError::InvalidBounds {
                    axis,
                    min: lo,
                    max: hi,
                });
            }
        }
        if !(0.0..0.5).contains(&clearance) {
            return Err(ConfigError::InvalidClearance(clearance));
        }

        let threshold = self.bonding.collinear_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::InvalidCollinearThreshold(threshold));
        }
        let distance = self.bonding.plane_distance_threshold;
        if !(distance.is_finite() && distance >= 0.0) {
            return Err(ConfigError::InvalidPlaneDistance(distance));
        }

        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if !(self.atom_size.is_finite() && self.atom_size > 0.0) {
            return Err(ConfigError::InvalidAtomSize(self.atom_size));
        }
        if !self.rotation_increment.is_finite() {
            return Err(ConfigError::InvalidRotationIncrement);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(CondensationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = CondensationConfig::new()
            .with_enclosure(Vec3::new(-10.0, 10.0, -10.0), Vec3::new(10.0, -10.0, 10.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds { axis: 'y', .. })
        ));
    }

    #[test]
    fn test_threshold_and_speed_rejected() {
        let mut bonding = BondingConfig::default();
        bonding.collinear_threshold = 1.5;
        let config = CondensationConfig::new().with_bonding(bonding);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidCollinearThreshold(1.5))
        );

        let config = CondensationConfig::new().with_speed(0.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeed(0.0)));

        let config = CondensationConfig::new().with_clearance(0.5);
        assert_eq!(config.validate(), Err(ConfigError::InvalidClearance(0.5)));

        let config = CondensationConfig::new().with_atom_size(f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAtomSize(_))
        ));
    }

    #[test]
    fn test_json_partial_sections_use_defaults() {
        let json = r#"{ "speed": 1.5, "bonding": { "alignment": "Coplanar" } }"#;
        let config: CondensationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.speed, 1.5);
        assert_eq!(config.bonding.alignment, Alignment::Coplanar);
        assert_eq!(config.bonding.collinear_threshold, 0.99);
        assert_eq!(config.enclosure, EnclosureConfig::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_json_roundtrip_keeps_vectors() {
        let config = CondensationConfig::new().with_bounds(40.0).with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: CondensationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
