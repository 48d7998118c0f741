//! # Condensate - colored-cube condensation engine
//!
//! Atoms are unit cubes with six painted sides. They drift through a closed
//! box, tumble slowly, bounce off the walls, and fuse whenever two of them
//! touch with same-colored sides facing each other. Fused atoms form
//! molecules, which keep drifting as one rigid body and can absorb more atoms
//! or merge with other molecules.
//!
//! ## Quick Start
//!
//! ```ignore
//! use condensate::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let mut group = ParticleGroup::new(
//!         CondensationConfig::default()
//!             .with_bounds(100.0)
//!             .with_speed(0.5)
//!             .with_seed(42),
//!     )?;
//!     group.spawn_random_atoms(40);
//!
//!     for _ in 0..10_000 {
//!         group.update();
//!     }
//!     for body in group.bodies() {
//!         println!("{:?} {} with {} children", body.kind, body.id, body.child_count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Bodies
//!
//! A [`Body`] is either an atom or a molecule. Atoms carry a unit-cube
//! footprint scaled by `atom_size`; molecules carry nothing but their child
//! atoms. Every body is owned by exactly one place: the group's top-level
//! population, or a molecule's child list.
//!
//! ### Sides
//!
//! [`Side`] indexes the six faces: `+X, -X, +Y, -Y, +Z, -Z`, colored red,
//! orange, yellow, green, blue and purple. Two atoms bond only through sides
//! with the same index.
//!
//! ### Ticks
//!
//! [`ParticleGroup::update`] runs one tick:
//!
//! 1. Rotate and translate every top-level body (skipped while paused)
//! 2. Bounce bodies whose box touches a wall
//! 3. Condense: merge the first bondable pair, rescan, repeat until none remain
//!
//! ## Feature Overview
//!
//! | Concern | Types |
//! |---------|-------|
//! | Engine | [`ParticleGroup`], [`Merge`], [`TickStats`], [`BodyView`] |
//! | Geometry | [`Aabb`], [`Plane`], [`Transform`] |
//! | Bonding | [`AtomSnapshot`], [`MoleculeSnapshot`], [`Alignment`] |
//! | Walls | [`Enclosure`], [`Wall`] |
//! | Setup | [`CondensationConfig`], [`BondingConfig`], [`EnclosureConfig`] |
//! | Rendering | [`BodyInstance`], [`MarkerLine`] |

mod body;
pub mod bonding;
mod config;
mod enclosure;
mod error;
pub mod geometry;
mod instance;
mod simulation;
mod spawn;

pub use body::{Body, BodyId, BodyKind, MarkerLine, Side};
pub use bonding::{AtomSnapshot, MoleculeSnapshot};
pub use bytemuck;
pub use config::{Alignment, BondingConfig, CondensationConfig, EnclosureConfig, MoleculeOrientation};
pub use enclosure::{Enclosure, Wall};
pub use error::ConfigError;
pub use geometry::{Aabb, Plane, Transform};
pub use glam::{Affine3A, Quat, Vec3};
pub use instance::BodyInstance;
pub use simulation::{BodyView, Merge, ParticleGroup, TickStats};
pub use spawn::SpawnRng;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use condensate::prelude::*;
/// ```
pub mod prelude {
    pub use crate::body::{BodyId, BodyKind, Side};
    pub use crate::config::{Alignment, CondensationConfig, MoleculeOrientation};
    pub use crate::error::ConfigError;
    pub use crate::simulation::{BodyView, ParticleGroup, TickStats};
    pub use glam::{Quat, Vec3};
}
