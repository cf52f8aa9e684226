use actorx_ids::{InstanceID, LightID, MeshID, TextureID, TileID};
use actorx_world::{LightKind, Rgb};
use glam::{Quat, Vec2, Vec3};

/// One step for the scene-graph side. Emitted in order; a command only ever
/// references handles created by earlier commands.
#[derive(Debug, Clone, PartialEq)]
pub enum InstantiationCommand {
    InstantiateActor {
        instance: InstanceID,
        actor: usize,
        name: String,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        /// `None` for root actors and for parents that appear later in the file.
        parent: Option<InstanceID>,
        mesh: Option<MeshID>,
        cast_shadow: bool,
        hidden: bool,
    },
    /// Links a child to a parent declared after it.
    ParentActor {
        child: InstanceID,
        parent: InstanceID,
    },
    CreateLight {
        light: LightID,
        owner: InstanceID,
        name: String,
        kind: LightKind,
        color: Rgb,
        energy: f32,
        cast_shadow: bool,
        shadow_soft_size: f32,
        /// Spot lights only.
        spot_size: Option<f32>,
        /// Area lights only, rectangle width and height.
        area_size: Option<Vec2>,
        /// Local rotation relative to the owning actor.
        rotation: Quat,
    },
    CreateLandscapeTile {
        tile: TileID,
        owner: Option<InstanceID>,
        name: String,
        coords: (i32, i32),
        position: Vec3,
        scale: Vec3,
        heightmap: TextureID,
        dimensions: Vec2,
    },
    AttachWeightmapLayer {
        tile: TileID,
        layer: i32,
        texture: TextureID,
        texture_path: String,
    },
}

impl InstantiationCommand {
    pub fn label(&self) -> &'static str {
        match self {
            InstantiationCommand::InstantiateActor { .. } => "instantiate_actor",
            InstantiationCommand::ParentActor { .. } => "parent_actor",
            InstantiationCommand::CreateLight { .. } => "create_light",
            InstantiationCommand::CreateLandscapeTile { .. } => "create_landscape_tile",
            InstantiationCommand::AttachWeightmapLayer { .. } => "attach_weightmap_layer",
        }
    }
}
