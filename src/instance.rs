use crate::body::BodyId;
use bytemuck::{Pod, Zeroable};
use glam::{Affine3A, Mat4};

/// Per-atom instance data, laid out for a vertex buffer.
///
/// One per atom, loose or nested. `model` is the atom's world matrix in
/// column-major order, so a renderer can draw every atom with one unit-cube
/// mesh and color faces by side index.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub model: [[f32; 4]; 4],
    pub id: u64,
    /// Top-level body carrying this atom; equal to `id` for a loose atom.
    pub root: u64,
    /// 1 if the atom sits inside a molecule.
    pub nested: u32,
    pub _pad: u32,
}

impl BodyInstance {
    pub fn new(id: BodyId, root: BodyId, world: &Affine3A) -> Self {
        Self {
            model: Mat4::from(*world).to_cols_array_2d(),
            id: id.raw(),
            root: root.raw(),
            nested: u32::from(id != root),
            _pad: 0,
        }
    }
}
