//! Bonding predicates: decide from world transforms alone whether two bodies fuse.
//!
//! Two atoms bond when their boxes touch and, for some side index, the two
//! sides with that index face each other. Every predicate runs a cheap box
//! overlap test first and only then the per-side normal test.
//!
//! The predicates are pure functions over snapshots. The
//! [`ParticleGroup`](crate::ParticleGroup) takes the snapshots and acts on the
//! answers.
//!
//! # Alignment variants
//!
//! | [`Alignment`] | Extra requirement after the normals oppose |
//! |---------------|---------------------------------------------|
//! | `Opposed` | none |
//! | `Coplanar` | the two faces lie on one plane within `plane_distance_threshold` |
//! | `AlongTrajectory` | one atom's side normal points along its body's trajectory |

use crate::body::Side;
use crate::config::{Alignment, BondingConfig};
use crate::geometry::{Aabb, Plane};
use glam::{Affine3A, Vec3};

/// World-space view of a single atom.
#[derive(Clone, Copy, Debug)]
pub struct AtomSnapshot {
    pub world: Affine3A,
    pub bounds: Aabb,
    /// Trajectory of the top-level body carrying this atom.
    pub trajectory: Vec3,
}

impl AtomSnapshot {
    /// Snapshot an atom with local `footprint` placed by `world`.
    pub fn new(world: Affine3A, footprint: &Aabb, trajectory: Vec3) -> Self {
        Self {
            world,
            bounds: footprint.transformed(&world),
            trajectory,
        }
    }

    /// Outward unit normal of `side` in world space.
    ///
    /// Translation and scale drop out; only rotation matters. Returns `None`
    /// for a degenerate transform that collapses the normal.
    pub fn world_normal(&self, side: Side) -> Option<Vec3> {
        self.world
            .transform_vector3(side.local_normal())
            .try_normalize()
    }

    /// Center of `side`'s face in world space.
    pub fn world_face_center(&self, side: Side) -> Vec3 {
        self.world.transform_point3(side.local_face_center())
    }
}

/// World-space view of a molecule: its aggregate box and every atom it carries.
#[derive(Clone, Debug)]
pub struct MoleculeSnapshot {
    pub bounds: Aabb,
    pub atoms: Vec<AtomSnapshot>,
}

impl MoleculeSnapshot {
    /// Returns `None` for a molecule with no atoms.
    pub fn new(atoms: Vec<AtomSnapshot>) -> Option<Self> {
        let bounds = Aabb::from_boxes(atoms.iter().map(|a| a.bounds))?;
        Some(Self { bounds, atoms })
    }
}

/// True if `side` of `atom1` and `side` of `atom2` are touching under the
/// configured alignment rule.
pub fn is_side_aligned(
    config: &BondingConfig,
    side: Side,
    atom1: &AtomSnapshot,
    atom2: &AtomSnapshot,
) -> bool {
    let (Some(n1), Some(n2)) = (atom1.world_normal(side), atom2.world_normal(side)) else {
        return false;
    };

    // Same painted side on both atoms, pointing at each other.
    if n1.dot(n2) > -config.collinear_threshold {
        return false;
    }

    match config.alignment {
        Alignment::Opposed => true,
        Alignment::Coplanar => {
            let plane = Plane::from_normal_and_point(n1, atom1.world_face_center(side));
            let distance = plane.distance_to_point(atom2.world_face_center(side));
            distance.abs() <= config.plane_distance_threshold
        }
        Alignment::AlongTrajectory => {
            n1.dot(atom1.trajectory) >= config.collinear_threshold
                || n2.dot(atom2.trajectory) >= config.collinear_threshold
        }
    }
}

/// True if any side index is aligned between the two atoms.
pub fn same_color_touching(config: &BondingConfig, atom1: &AtomSnapshot, atom2: &AtomSnapshot) -> bool {
    Side::ALL
        .iter()
        .any(|&side| is_side_aligned(config, side, atom1, atom2))
}

/// Check if two atoms should bond.
pub fn is_atom_atom_bond(config: &BondingConfig, atom1: &AtomSnapshot, atom2: &AtomSnapshot) -> bool {
    atom1.bounds.intersects(&atom2.bounds) && same_color_touching(config, atom1, atom2)
}

/// Check if a loose atom should bond with a molecule.
pub fn is_atom_molecule_bond(
    config: &BondingConfig,
    atom: &AtomSnapshot,
    molecule: &MoleculeSnapshot,
) -> bool {
    if !atom.bounds.intersects(&molecule.bounds) {
        return false;
    }

    molecule
        .atoms
        .iter()
        .any(|ma| atom.bounds.intersects(&ma.bounds) && same_color_touching(config, atom, ma))
}

/// Check if two molecules should bond.
pub fn is_molecule_molecule_bond(
    config: &BondingConfig,
    molecule1: &MoleculeSnapshot,
    molecule2: &MoleculeSnapshot,
) -> bool {
    if !molecule1.bounds.intersects(&molecule2.bounds) {
        return false;
    }

    molecule1.atoms.iter().any(|a1| {
        molecule2
            .atoms
            .iter()
            .any(|a2| a1.bounds.intersects(&a2.bounds) && same_color_touching(config, a1, a2))
    })
}
