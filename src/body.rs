//! Atoms, molecules and the six painted sides of an atom.
//!
//! A [`Body`] is one node of the body hierarchy. Top-level bodies move through
//! the enclosure; child bodies ride along in their parent's local space.
//!
//! # Sides
//!
//! | Index | Normal | Color |
//! |-------|--------|-------|
//! | 0 | +X | red |
//! | 1 | -X | orange |
//! | 2 | +Y | yellow |
//! | 3 | -Y | green |
//! | 4 | +Z | blue |
//! | 5 | -Z | purple |
//!
//! Colors are positional: side 0 of one atom only ever pairs with side 0 of
//! another.

use crate::geometry::{Aabb, Transform};
use glam::Vec3;
use std::fmt;

/// One of the six faces of an atom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Side {
    pub const COUNT: usize = 6;

    pub const ALL: [Side; Side::COUNT] = [
        Side::PosX,
        Side::NegX,
        Side::PosY,
        Side::NegY,
        Side::PosZ,
        Side::NegZ,
    ];

    /// Side for a raw index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..6`. A bad side index is a caller bug.
    pub fn from_index(index: usize) -> Side {
        match Side::try_from(index) {
            Ok(side) => side,
            Err(bad) => panic!("side index {} out of range [0, {})", bad, Side::COUNT),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Outward unit normal in the atom's local space.
    pub fn local_normal(self) -> Vec3 {
        match self {
            Side::PosX => Vec3::X,
            Side::NegX => Vec3::NEG_X,
            Side::PosY => Vec3::Y,
            Side::NegY => Vec3::NEG_Y,
            Side::PosZ => Vec3::Z,
            Side::NegZ => Vec3::NEG_Z,
        }
    }

    /// Center of the face on the unit cube.
    pub fn local_face_center(self) -> Vec3 {
        self.local_normal() * 0.5
    }

    /// Paint color as packed `0xRRGGBB`.
    pub fn color(self) -> u32 {
        match self {
            Side::PosX => 0xff0000,
            Side::NegX => 0xffa500,
            Side::PosY => 0xffff00,
            Side::NegY => 0x008000,
            Side::PosZ => 0x0000ff,
            Side::NegZ => 0x800080,
        }
    }
}

impl TryFrom<usize> for Side {
    type Error = usize;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Side::ALL.get(index).copied().ok_or(index)
    }
}

/// Stable identifier of a body. Never reused within a [`ParticleGroup`](crate::ParticleGroup).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) u64);

impl BodyId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Atom,
    Molecule,
}

impl BodyKind {
    pub fn prefix(self) -> &'static str {
        match self {
            BodyKind::Atom => "atom",
            BodyKind::Molecule => "molecule",
        }
    }
}

/// Render-only line from an atom's center out along one side normal.
///
/// Markers are drawn but never take part in bounding boxes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerLine {
    pub side: Side,
    /// End point in the atom's local space; the line starts at the origin.
    pub end: Vec3,
    pub color: u32,
}

impl MarkerLine {
    /// Local length of a marker; the unit cube's faces sit at 0.5.
    pub const LENGTH: f32 = 1.0;

    pub fn for_side(side: Side) -> Self {
        Self {
            side,
            end: side.local_normal() * Self::LENGTH,
            color: side.color(),
        }
    }
}

/// A node in the body hierarchy.
#[derive(Clone, Debug)]
pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) kind: BodyKind,
    /// Transform relative to the parent, or to the world for top-level bodies.
    pub(crate) local: Transform,
    pub(crate) parent: Option<BodyId>,
    pub(crate) children: Vec<BodyId>,
    /// Unit direction of travel. Only meaningful while the body is top-level.
    pub(crate) trajectory: Vec3,
    /// Local-space footprint. Atoms own the unit cube, molecules own nothing.
    pub(crate) footprint: Option<Aabb>,
    pub(crate) markers: Vec<MarkerLine>,
}

impl Body {
    pub(crate) fn atom(id: BodyId, local: Transform, trajectory: Vec3) -> Self {
        Self {
            id,
            kind: BodyKind::Atom,
            local,
            parent: None,
            children: Vec::new(),
            trajectory,
            footprint: Some(Aabb::cube(1.0)),
            markers: Side::ALL.iter().map(|&s| MarkerLine::for_side(s)).collect(),
        }
    }

    pub(crate) fn molecule(id: BodyId, local: Transform, trajectory: Vec3) -> Self {
        Self {
            id,
            kind: BodyKind::Molecule,
            local,
            parent: None,
            children: Vec::new(),
            trajectory,
            footprint: None,
            markers: Vec::new(),
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn is_atom(&self) -> bool {
        self.kind == BodyKind::Atom
    }

    /// Display name such as `atom_3` or `molecule_12`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.kind.prefix(), self.id)
    }

    pub fn local_transform(&self) -> &Transform {
        &self.local
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn children(&self) -> &[BodyId] {
        &self.children
    }

    pub fn trajectory(&self) -> Vec3 {
        self.trajectory
    }

    pub fn footprint(&self) -> Option<&Aabb> {
        self.footprint.as_ref()
    }

    pub fn markers(&self) -> &[MarkerLine] {
        &self.markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_indices_roundtrip() {
        for (i, side) in Side::ALL.iter().enumerate() {
            assert_eq!(side.index(), i);
            assert_eq!(Side::from_index(i), *side);
        }
    }

    #[test]
    #[should_panic(expected = "side index 6 out of range")]
    fn test_side_index_out_of_range_panics() {
        Side::from_index(6);
    }

    #[test]
    fn test_side_try_from_rejects() {
        assert_eq!(Side::try_from(42), Err(42));
        assert_eq!(Side::try_from(3), Ok(Side::NegY));
    }

    #[test]
    fn test_opposite_sides_have_opposite_normals() {
        for pair in Side::ALL.chunks(2) {
            let d = pair[0].local_normal().dot(pair[1].local_normal());
            assert_eq!(d, -1.0);
        }
    }

    #[test]
    fn test_side_colors_are_distinct() {
        assert_eq!(Side::PosX.color(), 0xff0000);
        assert_eq!(Side::NegY.color(), 0x008000);
        for (i, a) in Side::ALL.iter().enumerate() {
            for b in &Side::ALL[i + 1..] {
                assert_ne!(a.color(), b.color());
            }
        }
    }

    #[test]
    fn test_atom_markers_reach_past_faces() {
        let atom = Body::atom(BodyId(0), Transform::IDENTITY, Vec3::X);
        assert_eq!(atom.markers().len(), Side::COUNT);
        let cube = atom.footprint().unwrap();
        for marker in atom.markers() {
            assert!(!cube.contains_point(marker.end));
        }
        assert_eq!(atom.name(), "atom_0");
    }
}
