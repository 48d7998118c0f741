//! Geometry primitives layered on top of glam.
//!
//! glam provides vectors, quaternions and affine matrices. This module adds the
//! handful of shapes the engine reasons about: axis-aligned boxes, planes and a
//! decomposed local [`Transform`].
//!
//! Box overlap is inclusive (boxes that share a face intersect) and a plane
//! intersects a box when the box straddles or touches it.

use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Component-wise magnitude below which a vector is considered zero.
pub const ZERO_THRESHOLD: f32 = 0.001;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Cube of edge length `edge` centered on the origin.
    pub fn cube(edge: f32) -> Self {
        let half = Vec3::splat(edge * 0.5);
        Self::new(-half, half)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Size along each axis (max - min).
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True if the boxes overlap or touch.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Axis-aligned box around this box after applying `matrix`.
    pub fn transformed(&self, matrix: &Affine3A) -> Aabb {
        let corners = self.corners().map(|c| matrix.transform_point3(c));
        let mut min = corners[0];
        let mut max = corners[0];
        for &c in &corners[1..] {
            min = min.min(c);
            max = max.max(c);
        }
        Aabb { min, max }
    }

    /// Build a unified box from several boxes. Returns `None` for an empty input.
    pub fn from_boxes<I: IntoIterator<Item = Aabb>>(boxes: I) -> Option<Aabb> {
        boxes.into_iter().reduce(|a, b| a.union(&b))
    }
}

/// A plane in Hessian normal form: `normal · p + constant = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self { normal, constant }
    }

    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        Self::new(normal, -point.dot(normal))
    }

    /// Signed distance; positive on the side the normal points to.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// True if the box straddles or touches the plane.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let mut min = 0.0;
        let mut max = 0.0;
        for axis in 0..3 {
            let n = self.normal[axis];
            if n > 0.0 {
                min += n * aabb.min[axis];
                max += n * aabb.max[axis];
            } else {
                min += n * aabb.max[axis];
                max += n * aabb.min[axis];
            }
        }
        min <= -self.constant && max >= -self.constant
    }

    /// Mirror `v` across the plane's normal.
    pub fn reflect(&self, v: Vec3) -> Vec3 {
        v - 2.0 * v.dot(self.normal) * self.normal
    }
}

/// Local transform of a body: translation, rotation and uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: 1.0,
    };

    pub fn new(translation: Vec3, rotation: Quat, scale: f32) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.translation,
        )
    }

    /// Decompose an affine matrix built from uniform scales and rotations.
    pub fn from_affine(matrix: &Affine3A) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self {
            translation,
            rotation: rotation.normalize(),
            scale: scale.x,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Rotation from XYZ Euler angles (radians).
pub fn euler(angles: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z)
}

/// True if every component of `v` is within [`ZERO_THRESHOLD`] of zero.
pub fn is_near_zero(v: Vec3) -> bool {
    v.abs().cmple(Vec3::splat(ZERO_THRESHOLD)).all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_touching_boxes_intersect() {
        let a = Aabb::new(Vec3::new(-5.0, -2.5, -2.5), Vec3::new(0.0, 2.5, 2.5));
        let b = Aabb::new(Vec3::new(0.0, -2.5, -2.5), Vec3::new(5.0, 2.5, 2.5));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let c = Aabb::new(Vec3::new(0.1, -2.5, -2.5), Vec3::new(5.0, 2.5, 2.5));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_transformed_box_rotated_quarter_turn() {
        let b = Aabb::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        let m = Affine3A::from_rotation_z(FRAC_PI_2);
        let t = b.transformed(&m);
        assert!((t.max.x - 2.0).abs() < 1e-5);
        assert!((t.max.y - 1.0).abs() < 1e-5);
        assert!((t.max.z - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_transformed_box_scaled_and_moved() {
        let m = Transform::new(Vec3::new(10.0, 0.0, 0.0), Quat::IDENTITY, 5.0).to_affine();
        let t = Aabb::cube(1.0).transformed(&m);
        assert!((t.min - Vec3::new(7.5, -2.5, -2.5)).length() < 1e-5);
        assert!((t.max - Vec3::new(12.5, 2.5, 2.5)).length() < 1e-5);
    }

    #[test]
    fn test_from_boxes() {
        assert!(Aabb::from_boxes(Vec::new()).is_none());
        let merged = Aabb::from_boxes([
            Aabb::cube(1.0),
            Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0)),
        ])
        .unwrap();
        assert_eq!(merged.min, Vec3::splat(-0.5));
        assert_eq!(merged.max, Vec3::splat(3.0));
    }

    #[test]
    fn test_plane_box_straddle() {
        // x = -100 wall
        let plane = Plane::new(Vec3::X, 100.0);
        let inside = Aabb::new(Vec3::new(-90.0, -1.0, -1.0), Vec3::new(-80.0, 1.0, 1.0));
        let touching = Aabb::new(Vec3::new(-101.0, -1.0, -1.0), Vec3::new(-96.0, 1.0, 1.0));
        assert!(!plane.intersects_aabb(&inside));
        assert!(plane.intersects_aabb(&touching));
    }

    #[test]
    fn test_plane_distance_and_reflect() {
        let plane = Plane::from_normal_and_point(Vec3::NEG_Y, Vec3::new(0.0, 50.0, 0.0));
        assert!((plane.distance_to_point(Vec3::new(3.0, 40.0, 1.0)) - 10.0).abs() < 1e-5);

        let v = Vec3::new(1.0, 1.0, 0.0).normalize();
        let r = plane.reflect(v);
        assert!((r.x - v.x).abs() < 1e-6);
        assert!((r.y + v.y).abs() < 1e-6);
    }

    #[test]
    fn test_transform_affine_roundtrip() {
        let t = Transform::new(Vec3::new(1.0, 2.0, 3.0), euler(Vec3::new(0.3, -1.2, PI / 3.0)), 5.0);
        let back = Transform::from_affine(&t.to_affine());
        assert!((back.translation - t.translation).length() < 1e-4);
        assert!((back.scale - 5.0).abs() < 1e-4);
        assert!(back.rotation.dot(t.rotation).abs() > 0.9999);
    }

    #[test]
    fn test_is_near_zero() {
        assert!(is_near_zero(Vec3::new(0.0005, -0.001, 0.0)));
        assert!(!is_near_zero(Vec3::new(0.0, 0.002, 0.0)));
    }
}
