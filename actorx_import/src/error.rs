use std::path::PathBuf;

use actorx_world::WorldError;
use thiserror::Error;

use crate::arena::ArenaError;
use crate::config::ConfigError;

/// Fatal for one file. Per-asset problems never surface here; they are
/// logged and counted in [`crate::ImportStats`].
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no game directory found above {}; set base_game_dir", .0.display())]
    NoGameRoot(PathBuf),

    #[error(transparent)]
    Arena(#[from] ArenaError),
}
