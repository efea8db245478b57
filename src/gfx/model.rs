//! The scene-graph model node
//!
//! A [`Model`] is one drawable instance: a mesh handle, a technique handle
//! and a local transform. It owns nothing but its transform fields — both
//! collaborators live in the scene's [`Assets`] table and are merely
//! referenced by index, so a model never extends their lifetime.
//!
//! Transform conventions:
//! - local matrix = `T * R * S` (scale first, translation last);
//! - rotation is Euler angles in degrees, composed `Rz * Ry * Rx`;
//! - the per-frame parent matrix multiplies on the left:
//!   `world = parent * local`.
//!
//! The local matrix is cached and recomposed lazily: every transform setter
//! marks it dirty and [`Model::local_matrix`] refreshes it, so the cache can
//! never be stale at draw time.

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};

use crate::error::DrawError;
use crate::gfx::assets::{Assets, MeshHandle, TechniqueHandle};
use crate::gfx::frame::{DrawUniforms, FrameContext};
use crate::gfx::traits::Drawable;

pub struct Model {
    mesh: Option<MeshHandle>,
    effect: Option<TechniqueHandle>,

    position: Vector3<f32>,
    /// Euler angles in degrees, applied about X, Y, Z of the local frame.
    rotation: Vector3<f32>,
    scale: Vector3<f32>,

    matrix: Matrix4<f32>,
    dirty: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates a model with identity transform, unit scale and no bound
    /// collaborators.
    pub fn new() -> Self {
        Self {
            mesh: None,
            effect: None,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            matrix: Matrix4::identity(),
            dirty: false,
        }
    }

    /// Restores the defaults of [`Model::new`] on an existing instance.
    /// Idempotent; also unbinds mesh and technique.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Rebinds the geometry reference. `None` means "no geometry for this
    /// instance". The handle is not validated here; resolution happens at
    /// draw time.
    pub fn set_mesh(&mut self, mesh: Option<MeshHandle>) {
        self.mesh = mesh;
    }

    /// Rebinds the shading technique, with the same policy as
    /// [`Model::set_mesh`].
    pub fn set_effect(&mut self, effect: Option<TechniqueHandle>) {
        self.effect = effect;
    }

    pub fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    pub fn effect(&self) -> Option<TechniqueHandle> {
        self.effect
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.dirty = true;
    }

    pub fn translate(&mut self, delta: Vector3<f32>) {
        self.position += delta;
        self.dirty = true;
    }

    /// Sets the rotation as Euler angles in degrees.
    pub fn set_rotation(&mut self, rotation: Vector3<f32>) {
        self.rotation = rotation;
        self.dirty = true;
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
        self.dirty = true;
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    /// The cached local transform, recomposed from position, rotation and
    /// scale if a setter ran since the last call.
    pub fn local_matrix(&mut self) -> Matrix4<f32> {
        if self.dirty {
            let t = Matrix4::from_translation(self.position);
            let r = Matrix4::from_angle_z(Deg(self.rotation.z))
                * Matrix4::from_angle_y(Deg(self.rotation.y))
                * Matrix4::from_angle_x(Deg(self.rotation.x));
            let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
            self.matrix = t * r * s;
            self.dirty = false;
        }
        self.matrix
    }

    /// Per-frame draw entrypoint: resolves the world matrix, activates the
    /// bound technique, uploads uniforms and submits the bound geometry.
    ///
    /// Exactly one activation, one uniform upload and one submission happen
    /// per successful call, in that order. An unbound or unresolvable
    /// technique reports [`DrawError::NoPipeline`], an unbound or
    /// unresolvable mesh [`DrawError::NoGeometry`]; either way no partial
    /// work is issued and the instance stays usable.
    pub fn draw<E>(
        &mut self,
        frame: &FrameContext,
        assets: &mut Assets<E>,
        sink: &mut E,
    ) -> Result<(), DrawError> {
        let effect = self.effect.ok_or(DrawError::NoPipeline)?;
        let mesh = self.mesh.ok_or(DrawError::NoGeometry)?;
        if !assets.contains_technique(effect) {
            return Err(DrawError::NoPipeline);
        }
        if !assets.contains_mesh(mesh) {
            return Err(DrawError::NoGeometry);
        }

        let world = frame.parent * self.local_matrix();
        let uniforms = DrawUniforms {
            world,
            view: frame.view,
            projection: frame.projection,
            camera_position: frame.camera_position,
            elapsed: frame.elapsed,
        };

        // Both handles resolved above; the table is not touched in between.
        let technique = assets.technique_mut(effect).ok_or(DrawError::NoPipeline)?;
        technique.activate(sink);
        technique.set_uniforms(sink, &uniforms);

        let geometry = assets.mesh_mut(mesh).ok_or(DrawError::NoGeometry)?;
        geometry.submit_for_draw(sink);
        Ok(())
    }
}

impl<E> Drawable<E> for Model {
    fn draw(
        &mut self,
        frame: &FrameContext,
        assets: &mut Assets<E>,
        sink: &mut E,
    ) -> Result<(), DrawError> {
        Model::draw(self, frame, assets, sink)
    }
}
