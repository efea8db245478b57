//! Asset table for meshes and techniques
//!
//! Models never own their collaborators; they hold copyable index handles
//! into this table. The table owns the boxed trait objects, and removing an
//! asset vacates its slot rather than shifting later entries, so surviving
//! handles keep resolving and a removed asset's handle simply stops
//! resolving.

use crate::gfx::traits::{Mesh, Technique};

/// Index of a mesh in the asset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(u32);

/// Index of a technique in the asset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TechniqueHandle(u32);

/// Owns every mesh and technique in a scene, generic over the draw sink.
pub struct Assets<E> {
    meshes: Vec<Option<Box<dyn Mesh<E>>>>,
    techniques: Vec<Option<Box<dyn Technique<E>>>>,
}

impl<E> Default for Assets<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Assets<E> {
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            techniques: Vec::new(),
        }
    }

    pub fn insert_mesh(&mut self, mesh: impl Mesh<E> + 'static) -> MeshHandle {
        MeshHandle(insert_slot(&mut self.meshes, Box::new(mesh)))
    }

    pub fn insert_technique(&mut self, technique: impl Technique<E> + 'static) -> TechniqueHandle {
        TechniqueHandle(insert_slot(&mut self.techniques, Box::new(technique)))
    }

    pub fn mesh_mut(&mut self, handle: MeshHandle) -> Option<&mut (dyn Mesh<E> + 'static)> {
        self.meshes
            .get_mut(handle.0 as usize)
            .and_then(|slot| slot.as_deref_mut())
    }

    pub fn technique_mut(
        &mut self,
        handle: TechniqueHandle,
    ) -> Option<&mut (dyn Technique<E> + 'static)> {
        self.techniques
            .get_mut(handle.0 as usize)
            .and_then(|slot| slot.as_deref_mut())
    }

    pub fn contains_mesh(&self, handle: MeshHandle) -> bool {
        matches!(self.meshes.get(handle.0 as usize), Some(Some(_)))
    }

    pub fn contains_technique(&self, handle: TechniqueHandle) -> bool {
        matches!(self.techniques.get(handle.0 as usize), Some(Some(_)))
    }

    /// Drops the mesh and vacates its slot. Returns whether anything was
    /// removed.
    pub fn remove_mesh(&mut self, handle: MeshHandle) -> bool {
        take_slot(&mut self.meshes, handle.0)
    }

    pub fn remove_technique(&mut self, handle: TechniqueHandle) -> bool {
        take_slot(&mut self.techniques, handle.0)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn technique_count(&self) -> usize {
        self.techniques.iter().filter(|slot| slot.is_some()).count()
    }
}

fn insert_slot<T>(slots: &mut Vec<Option<T>>, value: T) -> u32 {
    if let Some(index) = slots.iter().position(|slot| slot.is_none()) {
        slots[index] = Some(value);
        index as u32
    } else {
        slots.push(Some(value));
        (slots.len() - 1) as u32
    }
}

fn take_slot<T>(slots: &mut [Option<T>], index: u32) -> bool {
    slots
        .get_mut(index as usize)
        .and_then(|slot| slot.take())
        .is_some()
}

#[cfg(test)]
mod tests {
    use crate::gfx::frame::DrawUniforms;

    use super::*;

    struct NullMesh;
    impl Mesh<()> for NullMesh {
        fn submit_for_draw(&mut self, _sink: &mut ()) {}
    }

    struct NullTechnique;
    impl Technique<()> for NullTechnique {
        fn activate(&mut self, _sink: &mut ()) {}
        fn set_uniforms(&mut self, _sink: &mut (), _uniforms: &DrawUniforms) {}
    }

    #[test]
    fn removed_handles_stop_resolving() {
        let mut assets: Assets<()> = Assets::new();
        let a = assets.insert_mesh(NullMesh);
        let b = assets.insert_mesh(NullMesh);

        assert!(assets.remove_mesh(a));
        assert!(!assets.remove_mesh(a));
        assert!(!assets.contains_mesh(a));
        assert!(assets.contains_mesh(b));
        assert_eq!(assets.mesh_count(), 1);
    }

    #[test]
    fn vacated_slots_are_reused_without_breaking_survivors() {
        let mut assets: Assets<()> = Assets::new();
        let a = assets.insert_mesh(NullMesh);
        let b = assets.insert_mesh(NullMesh);
        assets.remove_mesh(a);

        let c = assets.insert_mesh(NullMesh);
        assert_eq!(a, c); // slot reuse
        assert!(assets.contains_mesh(b));
        assert!(assets.contains_mesh(c));
        assert_eq!(assets.mesh_count(), 2);
    }

    #[test]
    fn techniques_and_meshes_are_independent_tables() {
        let mut assets: Assets<()> = Assets::new();
        let t = assets.insert_technique(NullTechnique);
        assert!(assets.contains_technique(t));
        assert_eq!(assets.mesh_count(), 0);
        assert_eq!(assets.technique_count(), 1);
        assert!(assets.technique_mut(t).is_some());
    }
}
