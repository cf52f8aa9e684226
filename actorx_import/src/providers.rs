use std::collections::HashSet;
use std::path::{Path, PathBuf};

use actorx_ids::{MeshID, TextureID};
use actorx_world::OverrideMaterials;
use thiserror::Error;

/// A collaborator failed to import an asset that exists on disk.
/// Never fatal: the importer logs it and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("failed to import {}: {reason}", .path.display())]
    Failed { path: PathBuf, reason: String },

    #[error("no importer available for {}", .0.display())]
    Unavailable(PathBuf),
}

/// How a provider should interpret image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColorSpace {
    /// Raw data such as heightmaps and weightmaps.
    NonColor,
}

#[derive(Debug, Clone, Copy)]
pub struct MeshRequest<'a> {
    pub path: &'a Path,
    pub override_materials: &'a OverrideMaterials,
    pub scale: f32,
}

/// Imports `.psk` / `.pskx` meshes.
pub trait MeshProvider {
    fn import_mesh(&mut self, request: &MeshRequest<'_>) -> Result<MeshID, ProviderError>;
}

/// Optional `.uemodel` importer. Only consulted when `available()` is true.
pub trait ModelProvider {
    fn available(&self) -> bool;
    fn import_model(&mut self, path: &Path, scale: f32) -> Result<MeshID, ProviderError>;
}

pub trait TextureProvider {
    fn load_image(&mut self, path: &Path, color_space: ColorSpace)
    -> Result<TextureID, ProviderError>;
}

/// Everything the importer calls out to.
pub trait AssetProviders: MeshProvider + ModelProvider + TextureProvider {}

impl<T: MeshProvider + ModelProvider + TextureProvider> AssetProviders for T {}

/// Stand-in when no `.uemodel` importer is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableModels;

impl ModelProvider for UnavailableModels {
    fn available(&self) -> bool {
        false
    }

    fn import_model(&mut self, path: &Path, _scale: f32) -> Result<MeshID, ProviderError> {
        Err(ProviderError::Unavailable(path.to_path_buf()))
    }
}

/// Bundles three separate collaborators into the one value [`crate::WorldImporter`] takes.
#[derive(Debug, Clone, Default)]
pub struct Providers<M, T, D = UnavailableModels> {
    pub mesh: M,
    pub texture: T,
    pub model: D,
}

impl<M, T> Providers<M, T> {
    pub fn new(mesh: M, texture: T) -> Self {
        Self {
            mesh,
            texture,
            model: UnavailableModels,
        }
    }
}

impl<M, T, D> Providers<M, T, D> {
    pub fn with_model<D2: ModelProvider>(self, model: D2) -> Providers<M, T, D2> {
        Providers {
            mesh: self.mesh,
            texture: self.texture,
            model,
        }
    }
}

impl<M: MeshProvider, T, D> MeshProvider for Providers<M, T, D> {
    fn import_mesh(&mut self, request: &MeshRequest<'_>) -> Result<MeshID, ProviderError> {
        self.mesh.import_mesh(request)
    }
}

impl<M, T: TextureProvider, D> TextureProvider for Providers<M, T, D> {
    fn load_image(
        &mut self,
        path: &Path,
        color_space: ColorSpace,
    ) -> Result<TextureID, ProviderError> {
        self.texture.load_image(path, color_space)
    }
}

impl<M, T, D: ModelProvider> ModelProvider for Providers<M, T, D> {
    fn available(&self) -> bool {
        self.model.available()
    }

    fn import_model(&mut self, path: &Path, scale: f32) -> Result<MeshID, ProviderError> {
        self.model.import_model(path, scale)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    Mesh {
        path: PathBuf,
        overrides: Vec<(String, String)>,
        scale: f32,
    },
    Model {
        path: PathBuf,
        scale: f32,
    },
    Image {
        path: PathBuf,
        color_space: ColorSpace,
    },
}

/// Hands out sequential handles and remembers every request.
///
/// Used by the CLI for dry runs and by tests as a mock. Paths added with
/// [`RecordingProvider::fail_on`] are reported as failed imports.
#[derive(Debug, Clone, Default)]
pub struct RecordingProvider {
    calls: Vec<ProviderCall>,
    failing: HashSet<PathBuf>,
    models_available: bool,
    next_mesh: u32,
    next_texture: u32,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_models(mut self, available: bool) -> Self {
        self.models_available = available;
        self
    }

    pub fn fail_on(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }

    pub fn calls(&self) -> &[ProviderCall] {
        &self.calls
    }

    pub fn mesh_calls(&self) -> usize {
        self.count(|c| matches!(c, ProviderCall::Mesh { .. }))
    }

    pub fn model_calls(&self) -> usize {
        self.count(|c| matches!(c, ProviderCall::Model { .. }))
    }

    pub fn image_calls(&self) -> usize {
        self.count(|c| matches!(c, ProviderCall::Image { .. }))
    }

    fn count(&self, pred: impl Fn(&ProviderCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn check(&self, path: &Path) -> Result<(), ProviderError> {
        if self.failing.contains(path) {
            return Err(ProviderError::Failed {
                path: path.to_path_buf(),
                reason: "marked as failing".to_string(),
            });
        }
        Ok(())
    }

    fn next_mesh_id(&mut self) -> MeshID {
        self.next_mesh += 1;
        MeshID::from_parts(self.next_mesh, 0)
    }
}

impl MeshProvider for RecordingProvider {
    fn import_mesh(&mut self, request: &MeshRequest<'_>) -> Result<MeshID, ProviderError> {
        self.calls.push(ProviderCall::Mesh {
            path: request.path.to_path_buf(),
            overrides: request
                .override_materials
                .iter()
                .map(|(slot, path)| (slot.clone(), path.clone()))
                .collect(),
            scale: request.scale,
        });
        self.check(request.path)?;
        Ok(self.next_mesh_id())
    }
}

impl ModelProvider for RecordingProvider {
    fn available(&self) -> bool {
        self.models_available
    }

    fn import_model(&mut self, path: &Path, scale: f32) -> Result<MeshID, ProviderError> {
        self.calls.push(ProviderCall::Model {
            path: path.to_path_buf(),
            scale,
        });
        if !self.models_available {
            return Err(ProviderError::Unavailable(path.to_path_buf()));
        }
        self.check(path)?;
        Ok(self.next_mesh_id())
    }
}

impl TextureProvider for RecordingProvider {
    fn load_image(
        &mut self,
        path: &Path,
        color_space: ColorSpace,
    ) -> Result<TextureID, ProviderError> {
        self.calls.push(ProviderCall::Image {
            path: path.to_path_buf(),
            color_space,
        });
        self.check(path)?;
        self.next_texture += 1;
        Ok(TextureID::from_parts(self.next_texture, 0))
    }
}
