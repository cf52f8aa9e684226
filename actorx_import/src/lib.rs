pub mod arena;
pub mod cache;
pub mod color;
pub mod commands;
pub mod config;
pub mod error;
pub mod importer;
pub mod landscape;
pub mod lights;
pub mod providers;
pub mod report;

pub use arena::{ArenaError, InstanceArena};
pub use cache::{AssetCache, MeshKey};
pub use color::kelvin_to_rgb;
pub use commands::InstantiationCommand;
pub use config::{ConfigError, ImportConfig, LIGHT_CUTOFF};
pub use error::ImportError;
pub use importer::WorldImporter;
pub use landscape::tile_transform;
pub use lights::{LIGHT_ROTATION, light_command};
pub use providers::*;
pub use report::{BatchReport, ImportReport, ImportStats, ImportStatus};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use actorx_ids::{InstanceID, MeshID};
    use actorx_world::{Actor, Landscape, Light, LightKind, NONE_ASSET, World, WorldError, encode_world};
    use glam::Vec3;

    use super::*;

    static TEST_DIR_SEQ: AtomicU64 = AtomicU64::new(0);

    fn temp_test_dir() -> PathBuf {
        let seq = TEST_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        let pid = std::process::id();
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("actorx_import_test_{pid}_{nonce}_{seq}"))
    }

    fn touch(root: &Path, relative: &str) -> io::Result<PathBuf> {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, b"")?;
        Ok(path)
    }

    fn importer(config: ImportConfig) -> WorldImporter<RecordingProvider> {
        WorldImporter::new(config, RecordingProvider::new()).expect("valid config")
    }

    fn actor_commands(report: &ImportReport) -> Vec<(Option<InstanceID>, Option<MeshID>)> {
        report
            .commands
            .iter()
            .filter_map(|c| match c {
                InstantiationCommand::InstantiateActor { parent, mesh, .. } => {
                    Some((*parent, *mesh))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn identical_actors_share_one_mesh_import() -> io::Result<()> {
        let root = temp_test_dir();
        touch(&root, "Game/Props/Chair.psk")?;

        let mut world = World::new();
        let a = world.push_actor(Actor::new("Chair_1", "/Game/Props/Chair"));
        let b = world.push_actor(Actor::new("Chair_2", "/Game/Props/Chair"));
        let c = world.push_actor(Actor::new("Chair_3", "/Game/Props/Chair"));
        let d = world.push_actor(Actor::new("Chair_4", "/Game/Props/Chair"));
        for i in [c, d] {
            world.override_materials[i].insert("Seat".into(), "/Game/Mats/Red".into());
        }
        world.override_materials[d].insert("Legs".into(), "/Game/Mats/Oak".into());

        let mut imp = importer(ImportConfig::default());
        let report = imp.import(&world, &root).unwrap();

        assert_eq!(imp.providers().mesh_calls(), 3);
        let meshes: Vec<_> = actor_commands(&report).into_iter().map(|(_, m)| m).collect();
        assert!(meshes.iter().all(Option::is_some));
        assert_eq!(meshes[a], meshes[b]);
        assert_ne!(meshes[a], meshes[c]);
        assert_ne!(meshes[c], meshes[d]);
        assert_eq!(report.stats.mesh_cache_hits, 1);
        assert_eq!(report.stats.meshes_imported, 3);

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn mesh_request_carries_overrides_and_scale() -> io::Result<()> {
        let root = temp_test_dir();
        let psk = touch(&root, "Game/Props/Chair.psk")?;

        let mut world = World::new();
        let i = world.push_actor(Actor::new("Chair", "/Game/Props/Chair"));
        world.override_materials[i].insert("Seat".into(), "/Game/Mats/Red".into());

        let mut imp = importer(ImportConfig {
            resize_by: 2.0,
            ..ImportConfig::default()
        });
        imp.import(&world, &root).unwrap();

        assert_eq!(
            imp.providers().calls(),
            &[ProviderCall::Mesh {
                path: psk,
                overrides: vec![("Seat".into(), "/Game/Mats/Red".into())],
                scale: 2.0,
            }]
        );

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn none_asset_instantiates_without_mesh() {
        let mut world = World::new();
        world.push_actor(Actor::new("Empty", NONE_ASSET));
        world.push_actor(Actor::new("Blank", ""));

        let mut imp = importer(ImportConfig::default());
        let report = imp.import(&world, Path::new("/nonexistent")).unwrap();

        assert!(imp.providers().calls().is_empty());
        assert_eq!(report.count("instantiate_actor"), 2);
        assert_eq!(report.stats.missing_assets, 0);
        assert!(actor_commands(&report).iter().all(|(_, m)| m.is_none()));
    }

    #[test]
    fn missing_and_failing_assets_do_not_stop_the_import() -> io::Result<()> {
        let root = temp_test_dir();
        let broken = touch(&root, "Game/Props/Broken.psk")?;
        touch(&root, "Game/Props/Fine.psk")?;

        let mut world = World::new();
        world.push_actor(Actor::new("Ghost", "/Game/Props/Ghost"));
        world.push_actor(Actor::new("Broken_1", "/Game/Props/Broken"));
        world.push_actor(Actor::new("Broken_2", "/Game/Props/Broken"));
        world.push_actor(Actor::new("Fine", "/Game/Props/Fine"));

        let mut imp = WorldImporter::new(
            ImportConfig::default(),
            RecordingProvider::new().fail_on(broken),
        )
        .unwrap();
        let report = imp.import(&world, &root).unwrap();

        let meshes: Vec<_> = actor_commands(&report).into_iter().map(|(_, m)| m).collect();
        assert_eq!(meshes.len(), 4);
        assert_eq!(&meshes[..3], &[None, None, None]);
        assert!(meshes[3].is_some());
        // The failed import is cached, not retried for the second actor.
        assert_eq!(imp.providers().mesh_calls(), 2);
        assert_eq!(report.stats.missing_assets, 1);
        assert_eq!(report.stats.provider_failures, 1);

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn pskx_and_uemodel_fallbacks() -> io::Result<()> {
        let root = temp_test_dir();
        let pskx = touch(&root, "Game/Props/Rock.pskx")?;
        let uemodel = touch(&root, "Game/Props/Tree.uemodel")?;

        let mut world = World::new();
        world.push_actor(Actor::new("Rock", "/Game/Props/Rock"));
        world.push_actor(Actor::new("Tree", "/Game/Props/Tree"));

        let mut without = importer(ImportConfig::default());
        let report = without.import(&world, &root).unwrap();
        assert_eq!(without.providers().mesh_calls(), 1);
        assert_eq!(without.providers().model_calls(), 0);
        assert_eq!(report.stats.missing_assets, 1);
        assert!(matches!(
            &without.providers().calls()[0],
            ProviderCall::Mesh { path, .. } if *path == pskx
        ));

        let mut with = WorldImporter::new(
            ImportConfig::default(),
            RecordingProvider::new().with_models(true),
        )
        .unwrap();
        let report = with.import(&world, &root).unwrap();
        assert_eq!(with.providers().model_calls(), 1);
        assert_eq!(report.stats.models_imported, 1);
        assert_eq!(report.stats.missing_assets, 0);
        assert!(with.providers().calls().iter().any(|c| matches!(
            c,
            ProviderCall::Model { path, .. } if *path == uemodel
        )));

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn forward_parent_is_linked_after_parent_exists() {
        let mut world = World::new();
        let mut child = Actor::new("Child", NONE_ASSET);
        child.parent = 2;
        world.push_actor(child);
        world.push_actor(Actor::new("Other", NONE_ASSET));
        world.push_actor(Actor::new("Parent", NONE_ASSET));
        let mut grandchild = Actor::new("Grandchild", NONE_ASSET);
        grandchild.parent = 0;
        world.push_actor(grandchild);

        let report = importer(ImportConfig::default())
            .import(&world, Path::new("/nonexistent"))
            .unwrap();

        let labels: Vec<_> = report.commands.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            [
                "instantiate_actor",
                "instantiate_actor",
                "instantiate_actor",
                "parent_actor",
                "instantiate_actor",
            ]
        );
        let ids: Vec<_> = report
            .commands
            .iter()
            .filter_map(|c| match c {
                InstantiationCommand::InstantiateActor { instance, .. } => Some(*instance),
                _ => None,
            })
            .collect();
        assert_eq!(
            report.commands[3],
            InstantiationCommand::ParentActor {
                child: ids[0],
                parent: ids[2],
            }
        );
        let parents: Vec<_> = actor_commands(&report).into_iter().map(|(p, _)| p).collect();
        assert_eq!(parents[0], None);
        assert_eq!(parents[3], Some(ids[0]));
        assert_eq!(report.stats.deferred_parents, 1);
    }

    #[test]
    fn commands_only_reference_existing_handles() -> io::Result<()> {
        let root = temp_test_dir();
        touch(&root, "Game/Land/H.png")?;
        touch(&root, "Game/Land/W.png")?;

        let mut world = World::new();
        let mut a = Actor::new("A", NONE_ASSET);
        a.parent = 1;
        world.push_actor(a);
        world.push_actor(Actor::new("B", NONE_ASSET));
        world.lights.push(Light::new(0, LightKind::Point));
        world.landscapes.push(Landscape::base("/Game/Land/H", (0, 0)));
        world.landscapes.push(Landscape::overlay("/Game/Land/W", (0, 0), 1));

        let report = importer(ImportConfig::default()).import(&world, &root).unwrap();

        let mut instances = HashSet::new();
        let mut tiles = HashSet::new();
        for command in &report.commands {
            match command {
                InstantiationCommand::InstantiateActor { instance, parent, .. } => {
                    assert!(parent.is_none_or(|p| instances.contains(&p)));
                    instances.insert(*instance);
                }
                InstantiationCommand::ParentActor { child, parent } => {
                    assert!(instances.contains(child) && instances.contains(parent));
                }
                InstantiationCommand::CreateLight { owner, .. } => {
                    assert!(instances.contains(owner));
                }
                InstantiationCommand::CreateLandscapeTile { tile, owner, .. } => {
                    assert!(owner.is_none_or(|o| instances.contains(&o)));
                    tiles.insert(*tile);
                }
                InstantiationCommand::AttachWeightmapLayer { tile, .. } => {
                    assert!(tiles.contains(tile));
                }
            }
        }
        assert_eq!(report.stats.instantiated_entities(), 4);

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn zero_spot_adjustment_suppresses_spot_lights() {
        let mut world = World::new();
        world.push_actor(Actor::new("Lamp", NONE_ASSET));
        world.lights.push(Light::new(0, LightKind::Spot));
        world.lights.push(Light::new(0, LightKind::Point));

        let report = importer(ImportConfig {
            adjust_spot_intensity: 0.0,
            ..ImportConfig::default()
        })
        .import(&world, Path::new("/nonexistent"))
        .unwrap();

        let kinds: Vec<_> = report
            .commands
            .iter()
            .filter_map(|c| match c {
                InstantiationCommand::CreateLight { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, [LightKind::Point]);
        assert_eq!(report.stats.lights_suppressed, 1);
    }

    #[test]
    fn light_parameters_follow_owner() {
        let mut world = World::new();
        let mut lamp = Actor::new("Lamp", NONE_ASSET);
        lamp.use_temperature = true;
        lamp.no_shadow = true;
        world.push_actor(lamp);
        let mut sun = Light::new(0, LightKind::Sun);
        sun.lumens = 5000.0;
        sun.temperature = 6600.0;
        world.lights.push(sun);
        world.lights.push(Light::new(-1, LightKind::Point));

        let report = importer(ImportConfig::default())
            .import(&world, Path::new("/nonexistent"))
            .unwrap();

        assert_eq!(report.stats.lights_created, 1);
        assert_eq!(report.stats.lights_without_owner, 1);
        match report.commands.last() {
            Some(InstantiationCommand::CreateLight {
                name,
                energy,
                color,
                cast_shadow,
                ..
            }) => {
                assert_eq!(name, "Lamp_light");
                assert!((energy - 5.0).abs() < 1e-4);
                assert_eq!(*color, kelvin_to_rgb(6600.0));
                assert!(!cast_shadow);
            }
            other => panic!("expected a light, got {other:?}"),
        }
    }

    fn landscape_world() -> World {
        let mut world = World::new();
        world.push_actor(Actor::new("Terrain", NONE_ASSET));
        world
    }

    #[test]
    fn overlay_before_base_is_skipped() -> io::Result<()> {
        let root = temp_test_dir();
        touch(&root, "Game/Land/H_2_3.png")?;
        touch(&root, "Game/Land/W_2_3.png")?;
        touch(&root, "Game/Land/W2_2_3.png")?;

        let mut world = landscape_world();
        world.landscapes.push(Landscape::overlay("/Game/Land/W_2_3", (2, 3), 1));
        world.landscapes.push(Landscape::base("/Game/Land/H_2_3", (2, 3)));
        world.landscapes.push(Landscape::overlay("/Game/Land/W2_2_3", (2, 3), 3));

        let report = importer(ImportConfig::default()).import(&world, &root).unwrap();

        assert_eq!(report.stats.overlays_without_base, 1);
        assert_eq!(report.count("create_landscape_tile"), 1);
        assert_eq!(report.count("attach_weightmap_layer"), 1);
        match report.commands.last() {
            Some(InstantiationCommand::AttachWeightmapLayer {
                layer,
                texture_path,
                ..
            }) => {
                assert_eq!(*layer, 2);
                assert_eq!(texture_path, "/Game/Land/W2_2_3");
            }
            other => panic!("expected a layer, got {other:?}"),
        }

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn offcenter_base_leaves_overlays_unattached() -> io::Result<()> {
        let root = temp_test_dir();
        touch(&root, "Game/Land/H.png")?;
        touch(&root, "Game/Land/W.png")?;

        let mut world = landscape_world();
        let mut base = Landscape::base("/Game/Land/H", (2, 3));
        base.center_offset = Vec3::new(1.0, 1.0, 1.0);
        world.landscapes.push(base);
        world.landscapes.push(Landscape::overlay("/Game/Land/W", (2, 3), 1));

        let report = importer(ImportConfig::default()).import(&world, &root).unwrap();
        assert_eq!(report.count("create_landscape_tile"), 0);
        assert_eq!(report.count("attach_weightmap_layer"), 0);
        assert_eq!(report.stats.landscapes_offcenter, 1);
        assert_eq!(report.stats.overlays_without_base, 1);

        let kept = importer(ImportConfig {
            skip_offcenter: false,
            ..ImportConfig::default()
        })
        .import(&world, &root)
        .unwrap();
        assert_eq!(kept.count("create_landscape_tile"), 1);
        assert_eq!(kept.count("attach_weightmap_layer"), 1);

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn duplicate_base_tile_keeps_first() -> io::Result<()> {
        let root = temp_test_dir();
        touch(&root, "Game/Land/A.png")?;
        touch(&root, "Game/Land/B.png")?;

        let mut world = landscape_world();
        world.landscapes.push(Landscape::base("/Game/Land/A", (0, 0)));
        world.landscapes.push(Landscape::base("/Game/Land/B", (0, 0)));

        let mut imp = importer(ImportConfig::default());
        let report = imp.import(&world, &root).unwrap();

        assert_eq!(report.count("create_landscape_tile"), 1);
        assert_eq!(report.stats.duplicate_tiles, 1);
        assert_eq!(imp.providers().image_calls(), 1);
        assert!(matches!(
            &imp.providers().calls()[0],
            ProviderCall::Image { path, color_space: ColorSpace::NonColor } if path.ends_with("A.png")
        ));

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn layers_are_deduplicated_per_tile_and_images_per_path() -> io::Result<()> {
        let root = temp_test_dir();
        touch(&root, "Game/Land/H.png")?;
        touch(&root, "Game/Land/W.png")?;

        let mut world = landscape_world();
        world.landscapes.push(Landscape::base("/Game/Land/H", (0, 0)));
        world.landscapes.push(Landscape::base("/Game/Land/H", (1, 0)));
        world.landscapes.push(Landscape::overlay("/Game/Land/W", (0, 0), 1));
        world.landscapes.push(Landscape::overlay("/Game/Land/W", (0, 0), 2));
        world.landscapes.push(Landscape::overlay("/Game/Land/W", (1, 0), 1));

        let mut imp = importer(ImportConfig::default());
        let report = imp.import(&world, &root).unwrap();

        assert_eq!(report.count("create_landscape_tile"), 2);
        assert_eq!(report.count("attach_weightmap_layer"), 2);
        assert_eq!(report.stats.duplicate_layers, 1);
        // Two distinct files, each loaded once.
        assert_eq!(imp.providers().image_calls(), 2);
        assert_eq!(report.stats.textures_loaded, 2);

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn missing_texture_skips_only_that_entry() -> io::Result<()> {
        let root = temp_test_dir();
        touch(&root, "Game/Land/H_1_0.png")?;

        let mut world = landscape_world();
        world.landscapes.push(Landscape::base("/Game/Land/H_0_0", (0, 0)));
        let mut tile = Landscape::base("/Game/Land/H_1_0", (1, 0));
        tile.scale = 127.0;
        world.landscapes.push(tile.clone());

        let report = importer(ImportConfig::default()).import(&world, &root).unwrap();
        assert_eq!(report.stats.missing_assets, 1);
        let (position, scale) = tile_transform(&tile, 0.01);
        match report.commands.last() {
            Some(InstantiationCommand::CreateLandscapeTile {
                name,
                coords,
                owner,
                position: p,
                scale: s,
                ..
            }) => {
                assert_eq!(name, "Terrain_Sector1_0");
                assert_eq!(*coords, (1, 0));
                assert!(owner.is_some());
                assert_eq!((*p, *s), (position, scale));
            }
            other => panic!("expected a tile, got {other:?}"),
        }

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn truncated_input_yields_no_commands() -> io::Result<()> {
        let mut world = landscape_world();
        world.push_actor(Actor::new("Chair", "/Game/Props/Chair"));
        let bytes = encode_world(&world);

        let mut imp = importer(ImportConfig::default());
        let err = imp
            .import_bytes(&bytes[..12], Path::new("/nonexistent"))
            .unwrap_err();
        assert!(matches!(err, ImportError::World(WorldError::Truncated(_))));
        assert!(imp.providers().calls().is_empty());

        let report = imp.import_bytes(&bytes, Path::new("/nonexistent")).unwrap();
        assert!(report.stats.parse.is_some());
        Ok(())
    }

    #[test]
    fn invalid_in_memory_world_is_rejected() {
        let mut world = landscape_world();
        world.actors[0].parent = 5;
        let err = importer(ImportConfig::default())
            .import(&world, Path::new("/nonexistent"))
            .unwrap_err();
        assert!(matches!(err, ImportError::World(WorldError::MalformedRecord(_))));
    }

    #[test]
    fn sessions_do_not_share_handles_or_caches() -> io::Result<()> {
        let root = temp_test_dir();
        touch(&root, "Game/Props/Chair.psk")?;
        let mut world = World::new();
        world.push_actor(Actor::new("Chair", "/Game/Props/Chair"));

        let mut imp = importer(ImportConfig::default());
        let first = imp.import(&world, &root).unwrap();
        let second = imp.import(&world, &root).unwrap();

        assert_eq!(imp.providers().mesh_calls(), 2);
        assert_ne!(first.commands[0], second.commands[0]);

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let result = WorldImporter::new(
            ImportConfig {
                resize_by: 0.0,
                ..ImportConfig::default()
            },
            RecordingProvider::new(),
        );
        assert!(matches!(result, Err(ConfigError::Invalid("resize_by", _))));
    }

    #[test]
    fn import_files_discovers_root_and_reports_status() -> io::Result<()> {
        let base = temp_test_dir();
        let game = base.join("game");
        touch(&game, "Game.root")?;
        touch(&game, "Content/Game/Props/Chair.psk")?;

        let mut world = World::new();
        world.push_actor(Actor::new("Chair", "/Game/Props/Chair"));
        let good = game.join("Content/Maps/Level.psw");
        fs::create_dir_all(game.join("Content/Maps"))?;
        fs::write(&good, encode_world(&world))?;
        let bad = touch(&game, "Content/Maps/Broken.psw")?;

        let mut imp = importer(ImportConfig::default());
        let batch = imp.import_files(&[bad.clone(), good.clone()]);
        assert_eq!(batch.status, ImportStatus::Finished);
        assert_eq!(batch.succeeded(), 1);
        let (_, report) = &batch.files[1];
        let report = report.as_ref().unwrap();
        assert_eq!(report.game_root, game.join("Content"));
        assert_eq!(report.stats.meshes_imported, 1);

        let batch = imp.import_files(&[bad]);
        assert_eq!(batch.status, ImportStatus::Cancelled);

        let _ = fs::remove_dir_all(&base);
        Ok(())
    }

    #[test]
    fn explicit_game_dir_wins_over_discovery() -> io::Result<()> {
        let base = temp_test_dir();
        let file = touch(&base, "loose/Level.psw")?;

        let imp = importer(ImportConfig {
            base_game_dir: Some(base.join("assets")),
            ..ImportConfig::default()
        });
        assert_eq!(imp.game_root_for(&file).unwrap(), base.join("assets"));

        let _ = fs::remove_dir_all(&base);
        Ok(())
    }

    #[derive(Default)]
    struct MeshLog {
        paths: Vec<PathBuf>,
    }

    impl MeshProvider for MeshLog {
        fn import_mesh(&mut self, request: &MeshRequest<'_>) -> Result<MeshID, ProviderError> {
            self.paths.push(request.path.to_path_buf());
            Ok(MeshID::from_parts(self.paths.len() as u32, 0))
        }
    }

    #[derive(Default)]
    struct ImageLog {
        loaded: Vec<(PathBuf, ColorSpace)>,
    }

    impl TextureProvider for ImageLog {
        fn load_image(
            &mut self,
            path: &Path,
            color_space: ColorSpace,
        ) -> Result<actorx_ids::TextureID, ProviderError> {
            self.loaded.push((path.to_path_buf(), color_space));
            Ok(actorx_ids::TextureID::from_parts(self.loaded.len() as u32, 0))
        }
    }

    #[derive(Default)]
    struct ModelLog {
        paths: Vec<PathBuf>,
    }

    impl ModelProvider for ModelLog {
        fn available(&self) -> bool {
            true
        }

        fn import_model(&mut self, path: &Path, _scale: f32) -> Result<MeshID, ProviderError> {
            self.paths.push(path.to_path_buf());
            Ok(MeshID::from_parts(100 + self.paths.len() as u32, 0))
        }
    }

    #[test]
    fn unavailable_models_always_refuse() {
        let mut models = UnavailableModels;
        assert!(!models.available());
        assert_eq!(
            models.import_model(Path::new("/a/Tree.uemodel"), 1.0),
            Err(ProviderError::Unavailable(PathBuf::from("/a/Tree.uemodel")))
        );
    }

    #[test]
    fn separate_providers_use_models_only_once_installed() -> io::Result<()> {
        let root = temp_test_dir();
        let rock = touch(&root, "Game/Props/Rock.psk")?;
        let tree = touch(&root, "Game/Props/Tree.uemodel")?;
        let height = touch(&root, "Game/Land/H.png")?;

        let mut world = World::new();
        world.push_actor(Actor::new("Rock", "/Game/Props/Rock"));
        world.push_actor(Actor::new("Tree", "/Game/Props/Tree"));
        world.landscapes.push(Landscape::base("/Game/Land/H", (0, 0)));

        let providers = Providers::new(MeshLog::default(), ImageLog::default());
        assert!(!providers.available());
        let mut imp = WorldImporter::new(ImportConfig::default(), providers).unwrap();
        let report = imp.import(&world, &root).unwrap();
        assert_eq!(report.stats.models_imported, 0);
        assert_eq!(report.stats.missing_assets, 1);
        let meshes: Vec<_> = actor_commands(&report).into_iter().map(|(_, m)| m).collect();
        assert!(meshes[0].is_some());
        assert_eq!(meshes[1], None);

        let providers = imp.into_providers();
        assert_eq!(providers.mesh.paths, [rock.clone()]);
        assert_eq!(providers.texture.loaded, [(height, ColorSpace::NonColor)]);

        let providers = providers.with_model(ModelLog::default());
        assert!(providers.available());
        let mut imp = WorldImporter::new(ImportConfig::default(), providers).unwrap();
        let report = imp.import(&world, &root).unwrap();
        assert_eq!(report.stats.models_imported, 1);
        assert_eq!(report.stats.missing_assets, 0);
        assert!(actor_commands(&report).iter().all(|(_, m)| m.is_some()));

        let providers = imp.into_providers();
        assert_eq!(providers.model.paths, [tree]);
        assert_eq!(providers.mesh.paths, [rock.clone(), rock]);

        let _ = fs::remove_dir_all(&root);
        Ok(())
    }
}
