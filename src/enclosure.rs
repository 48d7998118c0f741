//! The glass box that traps every body.
//!
//! The enclosure is kept as six separate planes rather than one box: a box
//! fully inside the volume "intersects" the volume, which says nothing about
//! touching a wall. Testing each wall plane against the body's box does.
//!
//! Walls are checked in a fixed order (`MinX`, `MaxX`, `MinY`, `MaxY`, `MinZ`,
//! `MaxZ`) and only the first one touched is acted on in a tick.

use crate::body::Body;
use crate::config::EnclosureConfig;
use crate::geometry::{Aabb, Plane};
use crate::spawn::SpawnRng;
use glam::Vec3;

/// One wall of the enclosure. Normals point into the volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wall {
    MinX,
    MaxX,
    MinY,
    MaxY,
    MinZ,
    MaxZ,
}

impl Wall {
    pub const ALL: [Wall; 6] = [
        Wall::MinX,
        Wall::MaxX,
        Wall::MinY,
        Wall::MaxY,
        Wall::MinZ,
        Wall::MaxZ,
    ];
}

#[derive(Clone, Debug)]
pub struct Enclosure {
    min: Vec3,
    max: Vec3,
    /// Absolute margin per axis kept free by [`Enclosure::random_pos`].
    clearance: Vec3,
    planes: [Plane; 6],
}

impl Enclosure {
    /// Build from an already-validated configuration.
    pub fn new(config: &EnclosureConfig) -> Self {
        let EnclosureConfig {
            min,
            max,
            clearance,
        } = *config;

        let planes = [
            Plane::new(Vec3::X, -min.x),
            Plane::new(Vec3::NEG_X, max.x),
            Plane::new(Vec3::Y, -min.y),
            Plane::new(Vec3::NEG_Y, max.y),
            Plane::new(Vec3::Z, -min.z),
            Plane::new(Vec3::NEG_Z, max.z),
        ];

        Self {
            min,
            max,
            clearance: (max - min) * clearance,
            planes,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.min, self.max)
    }

    pub fn plane(&self, wall: Wall) -> &Plane {
        &self.planes[wall as usize]
    }

    /// First wall, in fixed order, whose plane the box touches.
    pub fn collision(&self, bounds: &Aabb) -> Option<Wall> {
        Wall::ALL
            .into_iter()
            .find(|&wall| self.plane(wall).intersects_aabb(bounds))
    }

    /// Bounce a top-level body off the first wall its box touches.
    ///
    /// The body is first moved back by one tick of travel (`step`) so it does
    /// not stay embedded in the wall, then its trajectory is reflected across
    /// the wall normal.
    pub fn maybe_bounce(&self, body: &mut Body, bounds: &Aabb, step: f32) -> Option<Wall> {
        let wall = self.collision(bounds)?;
        let plane = self.plane(wall);

        body.local.translation -= body.trajectory * step;
        let reflected = plane.reflect(body.trajectory);
        body.trajectory = reflected.try_normalize().unwrap_or(plane.normal);

        log::trace!(
            "{} bounced off {:?}, trajectory now {:?}",
            body.name(),
            wall,
            body.trajectory
        );
        Some(wall)
    }

    /// Uniformly sampled position away from the walls.
    pub fn random_pos(&self, rng: &mut SpawnRng) -> Vec3 {
        rng.random_in_box(&Aabb::new(
            self.min + self.clearance,
            self.max - self.clearance,
        ))
    }
}
