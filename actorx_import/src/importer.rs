use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use actorx_ids::{InstanceID, MeshID, TextureID};
use actorx_io::{AssetResolver, MESH_EXTENSION, MODEL_EXTENSION, find_game_root};
use actorx_world::{Actor, OverrideMaterials, World, parse_world, validate_world};

use crate::arena::InstanceArena;
use crate::cache::{AssetCache, MeshKey};
use crate::commands::InstantiationCommand;
use crate::config::{ConfigError, ImportConfig};
use crate::error::ImportError;
use crate::landscape::TileSlot;
use crate::providers::{AssetProviders, ColorSpace, MeshRequest};
use crate::report::{
    BatchReport, ImportReport, ImportStats, ImportStatus, as_us, fmt_duration,
};

static NO_OVERRIDES: OverrideMaterials = OverrideMaterials::new();

/// Turns worlds into instantiation commands, calling out to `P` for assets.
///
/// Every call to [`WorldImporter::import`] runs in a fresh session: caches,
/// instance arena and tile registry start empty and are dropped afterwards.
pub struct WorldImporter<P> {
    config: ImportConfig,
    providers: P,
    sessions: u32,
}

impl<P: AssetProviders> WorldImporter<P> {
    pub fn new(config: ImportConfig, providers: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            providers,
            sessions: 0,
        })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn providers(&self) -> &P {
        &self.providers
    }

    pub fn into_providers(self) -> P {
        self.providers
    }

    /// Actors first, then lights, then landscapes. Missing or failing assets
    /// are skipped; only an invalid world is an error.
    pub fn import(&mut self, world: &World, game_root: &Path) -> Result<ImportReport, ImportError> {
        validate_world(world)?;

        // Generation 0 is never handed out, so handles from a session are never nil.
        self.sessions = self.sessions.checked_add(1).unwrap_or(1);
        let start = Instant::now();

        let mut session = ImportSession {
            world,
            config: &self.config,
            providers: &mut self.providers,
            resolver: AssetResolver::new(game_root),
            generation: self.sessions,
            arena: InstanceArena::with_capacity(world.num_actors(), self.sessions),
            mesh_cache: AssetCache::new(),
            texture_cache: AssetCache::new(),
            tiles: HashMap::new(),
            commands: Vec::new(),
            stats: ImportStats::default(),
        };
        session.instantiate_actors()?;
        session.create_lights();
        session.create_landscapes();

        let mut report = session.finish(game_root);
        report.stats.instantiate = start.elapsed();
        Ok(report)
    }

    /// Parses first; a file that fails to parse produces no commands at all.
    pub fn import_bytes(
        &mut self,
        bytes: &[u8],
        game_root: &Path,
    ) -> Result<ImportReport, ImportError> {
        let parse_start = Instant::now();
        let world = parse_world(bytes)?;
        let parse = parse_start.elapsed();

        let mut report = self.import(&world, game_root)?;
        report.stats.parse = Some(parse);
        Ok(report)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<ImportReport, ImportError> {
        let game_root = self.game_root_for(path)?;
        log::info!("importing world {}", path.display());

        let bytes = fs::read(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let report = self.import_bytes(&bytes, &game_root)?;

        log::debug!(
            "[world_import] path={} root={} parse_us={} instantiate_us={:.3} commands={} missing={}",
            path.display(),
            game_root.display(),
            fmt_duration(report.stats.parse),
            as_us(report.stats.instantiate),
            report.commands.len(),
            report.stats.missing_assets,
        );
        Ok(report)
    }

    /// `base_game_dir` when set, else the nearest marked directory above `path`.
    pub fn game_root_for(&self, path: &Path) -> Result<PathBuf, ImportError> {
        if let Some(root) = &self.config.base_game_dir {
            return Ok(root.clone());
        }
        find_game_root(path)
            .map(|root| root.path)
            .ok_or_else(|| ImportError::NoGameRoot(path.to_path_buf()))
    }

    /// Imports each file independently. Finished if any one of them succeeded.
    pub fn import_files(&mut self, paths: &[PathBuf]) -> BatchReport {
        let mut status = ImportStatus::Cancelled;
        let mut files = Vec::with_capacity(paths.len());

        for path in paths {
            let result = self.import_file(path);
            match &result {
                Ok(_) => status = ImportStatus::Finished,
                Err(err) => log::error!("failed to import {}: {err}", path.display()),
            }
            files.push((path.clone(), result));
        }

        BatchReport { status, files }
    }
}

/// State for one import call.
pub(crate) struct ImportSession<'a, P> {
    pub(crate) world: &'a World,
    pub(crate) config: &'a ImportConfig,
    pub(crate) providers: &'a mut P,
    pub(crate) resolver: AssetResolver,
    pub(crate) generation: u32,
    pub(crate) arena: InstanceArena,
    pub(crate) mesh_cache: AssetCache<MeshKey, Option<MeshID>>,
    pub(crate) texture_cache: AssetCache<PathBuf, Option<TextureID>>,
    pub(crate) tiles: HashMap<(i32, i32), TileSlot>,
    pub(crate) commands: Vec<InstantiationCommand>,
    pub(crate) stats: ImportStats,
}

impl<P: AssetProviders> ImportSession<'_, P> {
    fn instantiate_actors(&mut self) -> Result<(), ImportError> {
        let world = self.world;
        // Parent index -> children declared before it.
        let mut waiting: HashMap<usize, Vec<InstanceID>> = HashMap::new();

        for (index, actor) in world.actors.iter().enumerate() {
            let mesh = self.mesh_for(index, actor);
            let instance = self.arena.insert(index)?;

            let parent = match actor.parent_index() {
                Some(p) => {
                    let found = self.arena.get(p);
                    if found.is_none() {
                        waiting.entry(p).or_default().push(instance);
                    }
                    found
                }
                None => None,
            };

            self.commands.push(InstantiationCommand::InstantiateActor {
                instance,
                actor: index,
                name: actor.name.clone(),
                position: actor.position,
                rotation: actor.rotation,
                scale: actor.scale,
                parent,
                mesh,
                cast_shadow: !actor.no_shadow,
                hidden: actor.hidden,
            });
            self.stats.actors += 1;

            for child in waiting.remove(&index).unwrap_or_default() {
                self.commands.push(InstantiationCommand::ParentActor {
                    child,
                    parent: instance,
                });
                self.stats.deferred_parents += 1;
            }
        }
        Ok(())
    }

    fn mesh_for(&mut self, index: usize, actor: &Actor) -> Option<MeshID> {
        if !actor.has_mesh() {
            return None;
        }

        let world = self.world;
        let overrides = world.overrides_for(index).unwrap_or(&NO_OVERRIDES);
        let key = MeshKey::new(&actor.asset_path, overrides);

        let Self {
            mesh_cache,
            providers,
            resolver,
            config,
            stats,
            ..
        } = self;
        mesh_cache.get_or_import(key, || {
            import_mesh(
                resolver,
                &mut **providers,
                &actor.asset_path,
                overrides,
                config.resize_by,
                stats,
            )
        })
    }

    /// Images are loaded once per resolved path and session.
    pub(crate) fn load_texture(&mut self, path: &Path) -> Option<TextureID> {
        let Self {
            texture_cache,
            providers,
            stats,
            ..
        } = self;
        texture_cache.get_or_import(path.to_path_buf(), || {
            match providers.load_image(path, ColorSpace::NonColor) {
                Ok(id) => {
                    stats.textures_loaded += 1;
                    Some(id)
                }
                Err(err) => {
                    log::error!("{err}");
                    stats.provider_failures += 1;
                    None
                }
            }
        })
    }

    fn finish(self, game_root: &Path) -> ImportReport {
        let mut stats = self.stats;
        stats.mesh_cache_hits = self.mesh_cache.hits();
        ImportReport {
            game_root: game_root.to_path_buf(),
            commands: self.commands,
            stats,
        }
    }
}

/// `.psk`, then `.pskx`, then the `.uemodel` sibling if a model importer is present.
fn import_mesh<P: AssetProviders>(
    resolver: &AssetResolver,
    providers: &mut P,
    asset_path: &str,
    overrides: &OverrideMaterials,
    scale: f32,
    stats: &mut ImportStats,
) -> Option<MeshID> {
    let not_found = match resolver.resolve(asset_path, MESH_EXTENSION) {
        Ok(path) => {
            log::info!("importing model {}", path.display());
            let request = MeshRequest {
                path: &path,
                override_materials: overrides,
                scale,
            };
            return match providers.import_mesh(&request) {
                Ok(id) => {
                    stats.meshes_imported += 1;
                    Some(id)
                }
                Err(err) => {
                    log::error!("{err}");
                    stats.provider_failures += 1;
                    None
                }
            };
        }
        Err(not_found) => not_found,
    };

    if providers.available() {
        let model = not_found
            .tried
            .first()
            .map(|primary| AssetResolver::sibling(primary, MODEL_EXTENSION))
            .filter(|path| path.exists());
        if let Some(model) = model {
            log::info!("importing model {}", model.display());
            return match providers.import_model(&model, scale) {
                Ok(id) => {
                    stats.models_imported += 1;
                    Some(id)
                }
                Err(err) => {
                    log::error!("{err}");
                    stats.provider_failures += 1;
                    None
                }
            };
        }
    }

    log::error!(
        "can't find asset {asset_path}, tried looking for {:?}",
        not_found.tried
    );
    stats.missing_assets += 1;
    None
}
