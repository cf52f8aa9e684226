use std::collections::HashSet;
use std::path::Path;

use actorx_ids::TileID;
use actorx_io::TEXTURE_EXTENSION;
use actorx_world::Landscape;
use glam::Vec3;

use crate::commands::InstantiationCommand;
use crate::importer::ImportSession;
use crate::providers::AssetProviders;

/// Name prefix for tiles in a world without actors.
pub const UNOWNED_TILE_PREFIX: &str = "Landscape";

/// A created base tile and the weightmap textures already attached to it.
pub(crate) struct TileSlot {
    pub(crate) id: TileID,
    pub(crate) layers: HashSet<String>,
}

/// Position and scale of a base tile in scene units.
///
/// Entries are stored in a normalized space where a tile spans `scale` units
/// horizontally and 255 vertically before `dimensions` is applied.
pub fn tile_transform(landscape: &Landscape, resize_by: f32) -> (Vec3, Vec3) {
    let s = landscape.scale;
    let base = Vec3::new(s, s, 255.0);
    let dims = landscape.dimensions;
    let scale = base * Vec3::new(dims.x, dims.y, 1.0);

    let mut offset = (scale - base) / 2.0;
    offset.y = -offset.y;

    let mut position = landscape.position + landscape.center_offset + offset;
    let global = (s + 1.0) / 2.0 - 1.0;
    position.x += global;
    position.y -= global;
    position.z = -landscape.height_bias / 1000.0;

    (position * resize_by, scale * resize_by)
}

impl<P: AssetProviders> ImportSession<'_, P> {
    pub(crate) fn create_landscapes(&mut self) {
        let world = self.world;

        for landscape in &world.landscapes {
            if self.config.skip_offcenter && landscape.is_offcenter() {
                self.stats.landscapes_offcenter += 1;
                continue;
            }

            let path = match self
                .resolver
                .resolve(&landscape.texture_path, TEXTURE_EXTENSION)
            {
                Ok(path) => path,
                Err(err) => {
                    log::error!("landscape texture missing: {err}");
                    self.stats.missing_assets += 1;
                    continue;
                }
            };

            match landscape.weightmap_layer() {
                Some(layer) => self.attach_layer(landscape, layer, &path),
                None => self.create_tile(landscape, &path),
            }
        }
    }

    fn attach_layer(&mut self, landscape: &Landscape, layer: i32, path: &Path) {
        let (x, y) = landscape.tile;
        let (tile, attached) = match self.tiles.get(&landscape.tile) {
            Some(slot) => (slot.id, slot.layers.contains(&landscape.texture_path)),
            None => {
                log::debug!("no base tile at ({x}, {y}) for {}", landscape.texture_path);
                self.stats.overlays_without_base += 1;
                return;
            }
        };
        if attached {
            self.stats.duplicate_layers += 1;
            return;
        }

        let Some(texture) = self.load_texture(path) else {
            return;
        };
        if let Some(slot) = self.tiles.get_mut(&landscape.tile) {
            slot.layers.insert(landscape.texture_path.clone());
        }

        self.commands.push(InstantiationCommand::AttachWeightmapLayer {
            tile,
            layer,
            texture,
            texture_path: landscape.texture_path.clone(),
        });
        self.stats.layers_attached += 1;
    }

    fn create_tile(&mut self, landscape: &Landscape, path: &Path) {
        let world = self.world;
        let (x, y) = landscape.tile;

        if self.tiles.contains_key(&landscape.tile) {
            log::warn!(
                "duplicate base tile at ({x}, {y}) from {}, keeping the first",
                landscape.texture_path
            );
            self.stats.duplicate_tiles += 1;
            return;
        }

        let Some(heightmap) = self.load_texture(path) else {
            return;
        };

        let owner_index = landscape.owner_index().unwrap_or(0);
        let (owner, owner_name) = match world.actors.get(owner_index) {
            Some(actor) => (self.arena.get(owner_index), actor.name.as_str()),
            None => (None, UNOWNED_TILE_PREFIX),
        };

        let (position, scale) = tile_transform(landscape, self.config.resize_by);
        let id = TileID::from_parts(self.tiles.len() as u32 + 1, self.generation);

        self.commands.push(InstantiationCommand::CreateLandscapeTile {
            tile: id,
            owner,
            name: format!("{owner_name}_Sector{x}_{y}"),
            coords: landscape.tile,
            position,
            scale,
            heightmap,
            dimensions: landscape.dimensions,
        });
        self.tiles.insert(
            landscape.tile,
            TileSlot {
                id,
                layers: HashSet::new(),
            },
        );
        self.stats.tiles_created += 1;
    }
}
