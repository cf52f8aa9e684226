use std::collections::BTreeMap;

use glam::{Quat, Vec2, Vec3};

/// Asset path written for actors that carry no mesh.
pub const NONE_ASSET: &str = "None";

/// Slot name -> replacement material path. Sorted iteration is the canonical order.
pub type OverrideMaterials = BTreeMap<String, String>;

/// What an ActorX file contains, taken from its header chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Mesh,
    Animation,
    World,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum LightKind {
    Sun = 0,
    Point = 1,
    Spot = 2,
    Area = 3,
}

impl LightKind {
    pub const ALL: [LightKind; 4] = [
        LightKind::Sun,
        LightKind::Point,
        LightKind::Spot,
        LightKind::Area,
    ];

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(LightKind::Sun),
            1 => Some(LightKind::Point),
            2 => Some(LightKind::Spot),
            3 => Some(LightKind::Area),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LightKind::Sun => "sun",
            LightKind::Point => "point",
            LightKind::Spot => "spot",
            LightKind::Area => "area",
        }
    }
}

/// Linear colour, each channel nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn from_array([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Converts the on-disk `-1 = none` convention into an index.
#[inline]
pub fn actor_index(raw: i32) -> Option<usize> {
    usize::try_from(raw).ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub name: String,
    pub asset_path: String,
    pub parent: i32,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub no_shadow: bool,
    pub hidden: bool,
    /// Only read by a light owned by this actor.
    pub use_temperature: bool,
}

impl Actor {
    pub fn new(name: impl Into<String>, asset_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asset_path: asset_path.into(),
            parent: -1,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            no_shadow: false,
            hidden: false,
            use_temperature: false,
        }
    }

    pub fn has_mesh(&self) -> bool {
        !self.asset_path.is_empty() && self.asset_path != NONE_ASSET
    }

    pub fn parent_index(&self) -> Option<usize> {
        actor_index(self.parent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub owner: i32,
    pub color: Rgb,
    pub kind: LightKind,
    /// Width, height and length. Area lights only.
    pub extent: Vec3,
    pub attenuation: f32,
    pub radius: f32,
    /// Kelvin.
    pub temperature: f32,
    pub shadow_bias: f32,
    pub lumens: f32,
    /// Spot lights only.
    pub cone_angle: f32,
}

impl Light {
    pub fn new(owner: i32, kind: LightKind) -> Self {
        Self {
            owner,
            color: Rgb::WHITE,
            kind,
            extent: Vec3::ZERO,
            attenuation: 0.0,
            radius: 0.0,
            temperature: 6500.0,
            shadow_bias: 0.0,
            lumens: 0.0,
            cone_angle: 0.0,
        }
    }

    pub fn owner_index(&self) -> Option<usize> {
        actor_index(self.owner)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Landscape {
    pub texture_path: String,
    /// `-1` means the first actor of the world.
    pub owner: i32,
    pub position: Vec3,
    pub scale: f32,
    /// 0 for the base heightmap, `n` for weightmap layer `n - 1`.
    pub kind: i32,
    pub tile: (i32, i32),
    pub height_bias: f32,
    pub center_offset: Vec3,
    pub dimensions: Vec2,
}

impl Landscape {
    pub fn base(texture_path: impl Into<String>, tile: (i32, i32)) -> Self {
        Self {
            texture_path: texture_path.into(),
            owner: -1,
            position: Vec3::ZERO,
            scale: 1.0,
            kind: 0,
            tile,
            height_bias: 0.0,
            center_offset: Vec3::ZERO,
            dimensions: Vec2::ONE,
        }
    }

    pub fn overlay(texture_path: impl Into<String>, tile: (i32, i32), kind: i32) -> Self {
        Self {
            kind,
            ..Self::base(texture_path, tile)
        }
    }

    #[inline]
    pub fn is_overlay(&self) -> bool {
        self.kind != 0
    }

    /// `None` for `-1`; the importer then falls back to the first actor.
    pub fn owner_index(&self) -> Option<usize> {
        actor_index(self.owner)
    }

    pub fn weightmap_layer(&self) -> Option<i32> {
        self.is_overlay().then(|| self.kind - 1)
    }

    /// True when the centre offset is strictly positive on every axis.
    pub fn is_offcenter(&self) -> bool {
        self.center_offset.cmpgt(Vec3::ZERO).all()
    }
}

/// A deserialized `.psw` file.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub kind: DataType,
    pub version: i32,
    pub actors: Vec<Actor>,
    pub lights: Vec<Light>,
    pub landscapes: Vec<Landscape>,
    /// Dense, one entry per actor.
    pub override_materials: Vec<OverrideMaterials>,
}

impl Default for World {
    fn default() -> Self {
        Self {
            kind: DataType::World,
            version: crate::SUPPORTED_VERSION,
            actors: Vec::new(),
            lights: Vec::new(),
            landscapes: Vec::new(),
            override_materials: Vec::new(),
        }
    }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn num_actors(&self) -> usize {
        self.actors.len()
    }

    /// Appends an actor with no overrides and returns its index.
    pub fn push_actor(&mut self, actor: Actor) -> usize {
        self.actors.push(actor);
        self.override_materials.push(OverrideMaterials::new());
        self.actors.len() - 1
    }

    pub fn overrides_for(&self, actor: usize) -> Option<&OverrideMaterials> {
        self.override_materials.get(actor)
    }
}
