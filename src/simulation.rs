//! The condensation engine.
//!
//! [`ParticleGroup`] owns every body. Each tick it moves the top-level bodies,
//! bounces them off the enclosure and then condenses: it scans all pairs of
//! top-level bodies, performs the first merge it finds, and rescans from the
//! top until a full scan finds nothing to merge.
//!
//! Bodies live in an arena keyed by [`BodyId`]. Each stores its local
//! transform plus a parent pointer and a child list; world transforms are
//! composed from the ancestors on demand. The population is the ordered set
//! of top-level ids.
//!
//! # Example
//!
//! ```ignore
//! use condensate::prelude::*;
//!
//! let mut group = ParticleGroup::new(CondensationConfig::default().with_seed(1))?;
//! group.spawn_random_atoms(40);
//! for _ in 0..1000 {
//!     group.update();
//! }
//! println!("{} bodies left", group.len());
//! ```

use crate::body::{Body, BodyId, BodyKind};
use crate::bonding::{
    is_atom_atom_bond, is_atom_molecule_bond, is_molecule_molecule_bond, AtomSnapshot,
    MoleculeSnapshot,
};
use crate::config::{CondensationConfig, MoleculeOrientation};
use crate::enclosure::Enclosure;
use crate::error::ConfigError;
use crate::geometry::{euler, is_near_zero, Aabb, Transform};
use crate::instance::BodyInstance;
use crate::spawn::SpawnRng;
use glam::{Affine3A, Quat, Vec3};
use indexmap::IndexSet;
use std::collections::HashMap;

/// A structural merge picked by a condensation scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Merge {
    /// Two atoms form a new molecule; both atom ids leave the population.
    NewMolecule { atom1: BodyId, atom2: BodyId },
    /// A loose atom joins an existing molecule.
    Absorb { atom: BodyId, molecule: BodyId },
    /// `retire`'s atoms move into `keep`; `retire` ceases to exist.
    Union { keep: BodyId, retire: BodyId },
}

/// Counters for the most recent [`ParticleGroup::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Top-level bodies moved this tick.
    pub advanced: usize,
    pub bounces: usize,
    pub merges: usize,
    /// Full pair scans run by condensation (always merges + 1).
    pub scans: usize,
}

/// Read-only view of a top-level body, for drawing.
#[derive(Clone, Copy, Debug)]
pub struct BodyView {
    pub id: BodyId,
    pub kind: BodyKind,
    pub world: Affine3A,
    pub trajectory: Vec3,
    pub child_count: usize,
}

enum Snapshot {
    Atom(AtomSnapshot),
    Molecule(MoleculeSnapshot),
}

/// Owns and advances every body in the enclosure.
pub struct ParticleGroup {
    config: CondensationConfig,
    enclosure: Enclosure,
    bodies: HashMap<BodyId, Body>,
    population: IndexSet<BodyId>,
    next_id: u64,
    rotation_step: Quat,
    rng: SpawnRng,
    paused: bool,
    last_tick: TickStats,
}

impl ParticleGroup {
    /// Create an empty group. Fails if the configuration is inconsistent.
    pub fn new(config: CondensationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            enclosure: Enclosure::new(&config.enclosure),
            rotation_step: euler(config.rotation_increment),
            rng: SpawnRng::new(config.seed),
            config,
            bodies: HashMap::new(),
            population: IndexSet::new(),
            next_id: 0,
            paused: false,
            last_tick: TickStats::default(),
        })
    }

    pub fn config(&self) -> &CondensationConfig {
        &self.config
    }

    pub fn enclosure(&self) -> &Enclosure {
        &self.enclosure
    }

    /// Number of top-level bodies.
    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// Total number of atoms, loose or inside molecules.
    pub fn atom_count(&self) -> usize {
        self.bodies.values().filter(|b| b.is_atom()).count()
    }

    /// True if `id` is a top-level body.
    pub fn contains(&self, id: BodyId) -> bool {
        self.population.contains(&id)
    }

    /// Any live body, top-level or nested. Retired ids return `None`.
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Top-level ids in population order.
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.population.iter().copied()
    }

    /// Top-level bodies in population order.
    pub fn bodies(&self) -> impl Iterator<Item = BodyView> + '_ {
        self.population.iter().filter_map(|&id| self.view(id))
    }

    /// View of a top-level body. `None` if the id is retired or nested.
    pub fn view(&self, id: BodyId) -> Option<BodyView> {
        if !self.population.contains(&id) {
            return None;
        }
        let body = self.bodies.get(&id)?;
        Some(BodyView {
            id,
            kind: body.kind,
            world: self.world_transform(id)?,
            trajectory: body.trajectory,
            child_count: body.children.len(),
        })
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// While paused, `update` stops moving bodies but still bounces and condenses.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn last_tick(&self) -> TickStats {
        self.last_tick
    }

    /// Add a new atom at `position`. A zero `trajectory` is replaced by a random direction.
    pub fn spawn(&mut self, position: Vec3, rotation: Quat, trajectory: Vec3) -> BodyId {
        let trajectory = match trajectory.try_normalize() {
            Some(t) => t,
            None => {
                log::warn!("spawn with degenerate trajectory {:?}, using a random one", trajectory);
                self.rng.random_direction()
            }
        };

        let id = self.allocate_id();
        let local = Transform::new(position, rotation.normalize(), self.config.atom_size);
        let body = Body::atom(id, local, trajectory);
        log::debug!("spawned {} at {:?}", body.name(), position);

        self.bodies.insert(id, body);
        self.population.insert(id);
        id
    }

    /// Spawn `count` atoms at random positions, orientations and trajectories.
    pub fn spawn_random_atoms(&mut self, count: usize) -> Vec<BodyId> {
        (0..count)
            .map(|_| {
                let position = self.enclosure.random_pos(&mut self.rng);
                let rotation = self.rng.random_orientation();
                let trajectory = self.rng.random_direction();
                self.spawn(position, rotation, trajectory)
            })
            .collect()
    }

    /// Advance one tick: move, bounce, then condense to a fixed point.
    pub fn update(&mut self) {
        let mut stats = TickStats::default();
        let ids: Vec<BodyId> = self.population.iter().copied().collect();

        for id in ids {
            if !self.paused {
                self.advance(id);
                stats.advanced += 1;
            }

            let Some(bounds) = self.world_bounds(id) else {
                continue;
            };
            let Some(body) = self.bodies.get_mut(&id) else {
                continue;
            };
            if self
                .enclosure
                .maybe_bounce(body, &bounds, self.config.speed)
                .is_some()
            {
                stats.bounces += 1;
            }
        }

        let (merges, scans) = self.condense_counted();
        stats.merges = merges;
        stats.scans = scans;

        log::debug!(
            "tick: {} advanced, {} bounces, {} merges, {} bodies",
            stats.advanced,
            stats.bounces,
            stats.merges,
            self.population.len()
        );
        self.last_tick = stats;
    }

    /// Merge bondable bodies one at a time until none are left. Returns the merge count.
    pub fn condense(&mut self) -> usize {
        self.condense_counted().0
    }

    fn condense_counted(&mut self) -> (usize, usize) {
        let mut merges = 0;
        let mut scans = 0;
        loop {
            scans += 1;
            match self.find_bond() {
                Some(merge) => {
                    self.apply(merge);
                    merges += 1;
                }
                None => break,
            }
        }
        log::trace!("condensed with {} merges over {} scans", merges, scans);
        (merges, scans)
    }

    /// First bondable pair in population order, if any.
    pub fn find_bond(&self) -> Option<Merge> {
        let bonding = &self.config.bonding;
        let snapshots: Vec<(BodyId, Snapshot)> = self
            .population
            .iter()
            .filter_map(|&id| Some((id, self.snapshot(id)?)))
            .collect();

        for (i, (id1, s1)) in snapshots.iter().enumerate() {
            for (id2, s2) in &snapshots[i + 1..] {
                let (id1, id2) = (*id1, *id2);
                let merge = match (s1, s2) {
                    (Snapshot::Atom(a1), Snapshot::Atom(a2)) => is_atom_atom_bond(bonding, a1, a2)
                        .then_some(Merge::NewMolecule {
                            atom1: id1,
                            atom2: id2,
                        }),
                    (Snapshot::Atom(a), Snapshot::Molecule(m)) => {
                        is_atom_molecule_bond(bonding, a, m).then_some(Merge::Absorb {
                            atom: id1,
                            molecule: id2,
                        })
                    }
                    (Snapshot::Molecule(m), Snapshot::Atom(a)) => {
                        is_atom_molecule_bond(bonding, a, m).then_some(Merge::Absorb {
                            atom: id2,
                            molecule: id1,
                        })
                    }
                    (Snapshot::Molecule(m1), Snapshot::Molecule(m2)) => {
                        is_molecule_molecule_bond(bonding, m2, m1).then_some(Merge::Union {
                            keep: id1,
                            retire: id2,
                        })
                    }
                };
                if merge.is_some() {
                    return merge;
                }
            }
        }
        None
    }

    /// Perform one structural merge.
    pub fn apply(&mut self, merge: Merge) {
        match merge {
            Merge::NewMolecule { atom1, atom2 } => self.make_new_molecule(atom1, atom2),
            Merge::Absorb { atom, molecule } => self.add_atom_to_molecule(atom, molecule),
            Merge::Union { keep, retire } => self.merge_molecules(keep, retire),
        }
    }

    /// World transform of any live body.
    pub fn world_transform(&self, id: BodyId) -> Option<Affine3A> {
        let body = self.bodies.get(&id)?;
        let local = body.local.to_affine();
        match body.parent {
            Some(parent) => Some(self.world_transform(parent)? * local),
            None => Some(local),
        }
    }

    /// World bounding box of a body and everything it carries.
    ///
    /// Built from atom footprints only; marker lines never widen it.
    pub fn world_bounds(&self, id: BodyId) -> Option<Aabb> {
        let world = self.world_transform(id)?;
        self.bounds_under(id, &world)
    }

    /// One instance per atom, loose or nested, ready for a GPU buffer.
    pub fn instances(&self) -> Vec<BodyInstance> {
        let mut out = Vec::new();
        for &root in &self.population {
            let Some(world) = self.world_transform(root) else {
                continue;
            };
            self.collect_instances(root, root, &world, &mut out);
        }
        out
    }

    fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    fn advance(&mut self, id: BodyId) {
        let speed = self.config.speed;
        let step = self.rotation_step;
        if let Some(body) = self.bodies.get_mut(&id) {
            body.local.rotation = (body.local.rotation * step).normalize();
            body.local.translation += body.trajectory * speed;
        }
    }

    fn bounds_under(&self, id: BodyId, world: &Affine3A) -> Option<Aabb> {
        let body = self.bodies.get(&id)?;
        let own = body.footprint.map(|f| f.transformed(world));
        let children = body.children.iter().filter_map(|child| {
            let local = self.bodies.get(child)?.local.to_affine();
            self.bounds_under(*child, &(*world * local))
        });
        Aabb::from_boxes(own.into_iter().chain(children))
    }

    fn snapshot(&self, id: BodyId) -> Option<Snapshot> {
        let body = self.bodies.get(&id)?;
        let world = self.world_transform(id)?;
        match body.kind {
            BodyKind::Atom => {
                let footprint = body.footprint?;
                Some(Snapshot::Atom(AtomSnapshot::new(
                    world,
                    &footprint,
                    body.trajectory,
                )))
            }
            BodyKind::Molecule => {
                let mut atoms = Vec::new();
                self.collect_atoms(id, &world, body.trajectory, &mut atoms);
                MoleculeSnapshot::new(atoms).map(Snapshot::Molecule)
            }
        }
    }

    fn collect_atoms(
        &self,
        id: BodyId,
        world: &Affine3A,
        trajectory: Vec3,
        out: &mut Vec<AtomSnapshot>,
    ) {
        let Some(body) = self.bodies.get(&id) else {
            return;
        };
        if let Some(footprint) = &body.footprint {
            out.push(AtomSnapshot::new(*world, footprint, trajectory));
        }
        for child in &body.children {
            if let Some(c) = self.bodies.get(child) {
                let child_world = *world * c.local.to_affine();
                self.collect_atoms(*child, &child_world, trajectory, out);
            }
        }
    }

    fn collect_instances(
        &self,
        id: BodyId,
        root: BodyId,
        world: &Affine3A,
        out: &mut Vec<BodyInstance>,
    ) {
        let Some(body) = self.bodies.get(&id) else {
            return;
        };
        if body.is_atom() {
            out.push(BodyInstance::new(id, root, world));
        }
        for child in &body.children {
            if let Some(c) = self.bodies.get(child) {
                let child_world = *world * c.local.to_affine();
                self.collect_instances(*child, root, &child_world, out);
            }
        }
    }

    /// Re-parent `child` under `parent`, keeping its world transform.
    fn attach(&mut self, parent: BodyId, child: BodyId) {
        let (Some(parent_world), Some(child_world)) =
            (self.world_transform(parent), self.world_transform(child))
        else {
            return;
        };
        let local = Transform::from_affine(&(parent_world.inverse() * child_world));

        let old_parent = match self.bodies.get_mut(&child) {
            Some(body) => {
                body.local = local;
                body.parent.replace(parent)
            }
            None => return,
        };
        if let Some(old) = old_parent.and_then(|p| self.bodies.get_mut(&p)) {
            old.children.retain(|&c| c != child);
        }
        if let Some(p) = self.bodies.get_mut(&parent) {
            p.children.push(child);
        }
    }

    fn make_new_molecule(&mut self, atom1: BodyId, atom2: BodyId) {
        self.population.shift_remove(&atom1);
        self.population.shift_remove(&atom2);

        let (Some(a1), Some(a2)) = (self.bodies.get(&atom1), self.bodies.get(&atom2)) else {
            return;
        };
        let position = (a1.local.translation + a2.local.translation) * 0.5;
        let cross = a1.trajectory.cross(a2.trajectory);
        let first_rotation = a1.local.rotation;

        let trajectory = if is_near_zero(cross) {
            log::warn!(
                "collinear trajectories for {} and {}, picking a random one",
                atom1,
                atom2
            );
            self.rng.random_direction()
        } else {
            cross.normalize()
        };
        let rotation = match self.config.molecule_orientation {
            MoleculeOrientation::Random => self.rng.random_orientation(),
            MoleculeOrientation::Identity => Quat::IDENTITY,
            MoleculeOrientation::FirstAtom => first_rotation,
        };

        let id = self.allocate_id();
        let molecule = Body::molecule(id, Transform::new(position, rotation, 1.0), trajectory);
        log::debug!("{} formed from atoms {} and {}", molecule.name(), atom1, atom2);
        self.bodies.insert(id, molecule);

        self.attach(id, atom1);
        self.attach(id, atom2);
        self.population.insert(id);
    }

    fn add_atom_to_molecule(&mut self, atom: BodyId, molecule: BodyId) {
        self.population.shift_remove(&atom);
        self.attach(molecule, atom);
        log::debug!("atom {} absorbed into molecule {}", atom, molecule);
    }

    fn merge_molecules(&mut self, keep: BodyId, retire: BodyId) {
        self.population.shift_remove(&retire);
        let children = match self.bodies.get(&retire) {
            Some(body) => body.children.clone(),
            None => return,
        };
        for child in children {
            self.attach(keep, child);
        }
        self.bodies.remove(&retire);
        log::debug!("molecule {} merged into molecule {}", retire, keep);
    }
}
