use std::path::PathBuf;
use std::time::Duration;

use crate::commands::InstantiationCommand;
use crate::error::ImportError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportStats {
    pub actors: usize,
    pub deferred_parents: usize,
    pub meshes_imported: usize,
    pub models_imported: usize,
    pub mesh_cache_hits: usize,
    pub textures_loaded: usize,
    pub missing_assets: usize,
    pub provider_failures: usize,
    pub lights_created: usize,
    pub lights_suppressed: usize,
    pub lights_without_owner: usize,
    pub tiles_created: usize,
    pub layers_attached: usize,
    pub landscapes_offcenter: usize,
    pub overlays_without_base: usize,
    pub duplicate_tiles: usize,
    pub duplicate_layers: usize,
    /// Only set when the importer parsed the bytes itself.
    pub parse: Option<Duration>,
    pub instantiate: Duration,
}

impl ImportStats {
    /// Actors, lights and base tiles.
    pub fn instantiated_entities(&self) -> usize {
        self.actors + self.lights_created + self.tiles_created
    }
}

#[derive(Debug, Clone)]
pub struct ImportReport {
    pub game_root: PathBuf,
    pub commands: Vec<InstantiationCommand>,
    pub stats: ImportStats,
}

impl ImportReport {
    pub fn count(&self, label: &str) -> usize {
        self.commands.iter().filter(|c| c.label() == label).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    /// At least one file imported.
    Finished,
    Cancelled,
}

#[derive(Debug)]
pub struct BatchReport {
    pub status: ImportStatus,
    pub files: Vec<(PathBuf, Result<ImportReport, ImportError>)>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|(_, r)| r.is_ok()).count()
    }
}

pub(crate) fn as_us(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000_000.0
}

pub(crate) fn fmt_duration(duration: Option<Duration>) -> String {
    duration
        .map(|value| format!("{:.3}", as_us(value)))
        .unwrap_or_else(|| "-".to_string())
}
