use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use actorx_import::{
    ImportConfig, ImportReport, ImportStatus, InstantiationCommand, RecordingProvider,
    WorldImporter,
};
use actorx_world::{DataType, LightKind, World, parse_world, peek_data_type};
use anyhow::{Context, Result, bail};

const VALUE_FLAGS: [&str; 3] = ["--root", "--config", "--resize-by"];
const SWITCHES: [&str; 2] = ["--keep-offcenter", "--uemodel"];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1).map(String::as_str) else {
        print_usage();
        std::process::exit(2);
    };

    let result = match command {
        "inspect" => inspect_command(&args).map(|_| ImportStatus::Finished),
        "import" => import_command(&args),
        _ => {
            print_usage();
            Err(anyhow::anyhow!("unknown command `{command}`"))
        }
    };

    match result {
        Ok(ImportStatus::Finished) => {}
        Ok(ImportStatus::Cancelled) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  actorx_cli inspect <file.psw>");
    eprintln!(
        "  actorx_cli import <file.psw>... [--root <game_dir>] [--config <import.toml>] \
         [--resize-by <f>] [--keep-offcenter] [--uemodel]"
    );
}

fn parse_flag_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).cloned()
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Everything after the command that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut rest = args.iter().skip(2);
    while let Some(arg) = rest.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            rest.next();
        } else if !SWITCHES.contains(&arg.as_str()) {
            out.push(PathBuf::from(arg));
        }
    }
    out
}

fn inspect_command(args: &[String]) -> Result<()> {
    let Some(path) = positional(args).into_iter().next() else {
        bail!("inspect needs a file");
    };
    let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;

    let kind = peek_data_type(&bytes)
        .with_context(|| format!("{} is not an ActorX file", path.display()))?;
    if kind != DataType::World {
        println!("{}: {kind:?} data, nothing to inspect", path.display());
        return Ok(());
    }

    let world =
        parse_world(&bytes).with_context(|| format!("failed to parse {}", path.display()))?;
    print_world(&path, &world);
    Ok(())
}

fn print_world(path: &Path, world: &World) {
    println!("{}", path.display());
    println!("  version    {}", world.version);
    println!(
        "  actors     {} ({} with meshes, {} parented)",
        world.actors.len(),
        world.actors.iter().filter(|a| a.has_mesh()).count(),
        world.actors.iter().filter(|a| a.parent_index().is_some()).count(),
    );

    let kinds: Vec<String> = LightKind::ALL
        .iter()
        .map(|kind| {
            let n = world.lights.iter().filter(|l| l.kind == *kind).count();
            format!("{} {n}", kind.as_str())
        })
        .collect();
    println!("  lights     {} ({})", world.lights.len(), kinds.join(", "));

    let overlays = world.landscapes.iter().filter(|l| l.is_overlay()).count();
    println!(
        "  landscape  {} ({} base, {overlays} overlay, {} off-centre)",
        world.landscapes.len(),
        world.landscapes.len() - overlays,
        world.landscapes.iter().filter(|l| l.is_offcenter()).count(),
    );

    let overridden = world
        .override_materials
        .iter()
        .filter(|slots| !slots.is_empty())
        .count();
    println!("  overrides  {overridden} actors");
}

fn load_config(args: &[String]) -> Result<ImportConfig> {
    let mut config = match parse_flag_value(args, "--config") {
        Some(path) => ImportConfig::load(Path::new(&path))
            .with_context(|| format!("failed to load config {path}"))?,
        None => ImportConfig::default(),
    };

    if let Some(root) = parse_flag_value(args, "--root") {
        config.base_game_dir = Some(PathBuf::from(root));
    }
    if let Some(raw) = parse_flag_value(args, "--resize-by") {
        config.resize_by = raw
            .parse()
            .with_context(|| format!("--resize-by expects a number, got `{raw}`"))?;
    }
    if has_flag(args, "--keep-offcenter") {
        config.skip_offcenter = false;
    }
    Ok(config)
}

fn import_command(args: &[String]) -> Result<ImportStatus> {
    let files = positional(args);
    if files.is_empty() {
        bail!("import needs at least one file");
    }

    let config = load_config(args)?;
    let providers = RecordingProvider::new().with_models(has_flag(args, "--uemodel"));
    let mut importer = WorldImporter::new(config, providers).context("invalid import config")?;
    let settings = importer.config();
    log::info!(
        "resize_by={} skip_offcenter={} base_game_dir={:?}",
        settings.resize_by,
        settings.skip_offcenter,
        settings.base_game_dir
    );

    let batch = importer.import_files(&files);
    for (path, result) in &batch.files {
        match result {
            Ok(report) => print_report(path, report),
            Err(err) => println!("{}: failed: {err}", path.display()),
        }
    }
    println!(
        "{} of {} files imported, {} provider calls",
        batch.succeeded(),
        batch.files.len(),
        importer.providers().calls().len()
    );
    Ok(batch.status)
}

fn print_report(path: &Path, report: &ImportReport) {
    let stats = &report.stats;
    println!("{}", path.display());
    println!("  root       {}", report.game_root.display());
    println!(
        "  commands   {} (actors {}, parents {}, lights {}, tiles {}, layers {})",
        report.commands.len(),
        report.count("instantiate_actor"),
        report.count("parent_actor"),
        report.count("create_light"),
        report.count("create_landscape_tile"),
        report.count("attach_weightmap_layer"),
    );
    let unmeshed = report
        .commands
        .iter()
        .filter(|c| matches!(c, InstantiationCommand::InstantiateActor { mesh: None, .. }))
        .count();
    println!(
        "  meshes     {} imported, {} from .uemodel, {} cache hits, {unmeshed} actors without mesh",
        stats.meshes_imported, stats.models_imported, stats.mesh_cache_hits,
    );
    println!(
        "  skipped    {} missing assets, {} provider failures, {} suppressed lights, \
         {} ownerless lights, {} off-centre, {} orphan overlays, {} duplicate tiles",
        stats.missing_assets,
        stats.provider_failures,
        stats.lights_suppressed,
        stats.lights_without_owner,
        stats.landscapes_offcenter,
        stats.overlays_without_base,
        stats.duplicate_tiles,
    );
    if let Some(parse) = stats.parse {
        println!(
            "  timing     parse {:.3}ms, instantiate {:.3}ms",
            parse.as_secs_f64() * 1000.0,
            stats.instantiate.as_secs_f64() * 1000.0
        );
    }
}
