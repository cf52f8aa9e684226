use std::path::{Component, Path, PathBuf};

use thiserror::Error;

pub const MESH_EXTENSION: &str = ".psk";
pub const MESH_FALLBACK_EXTENSION: &str = ".pskx";
pub const TEXTURE_EXTENSION: &str = ".png";
pub const MODEL_EXTENSION: &str = "uemodel";

/// A logical asset path had no existing file under the game root.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("asset `{logical}` not found, tried {tried:?}")]
pub struct AssetNotFound {
    pub logical: String,
    pub tried: Vec<PathBuf>,
}

/// Extensions tried, in order, after the requested one.
/// A mesh may be authored as either `.psk` or `.pskx`.
fn fallback_extensions(extension: &str) -> &'static [&'static str] {
    if extension == MESH_EXTENSION {
        &[MESH_FALLBACK_EXTENSION]
    } else {
        &[]
    }
}

/// Maps in-game logical paths (`/Game/Props/Chair`) onto files below a game root.
///
/// Only performs read-only existence checks, so resolving the same input twice
/// always gives the same answer.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ordered filesystem candidates for `logical`, primary extension first.
    pub fn candidates(&self, logical: &str, extension: &str) -> Vec<PathBuf> {
        let trimmed = logical.trim_matches(|c| c == '/' || c == '\\');
        let fallbacks = fallback_extensions(extension);

        // A path already carrying a fallback extension is taken as written.
        if fallbacks.iter().any(|ext| trimmed.ends_with(ext)) {
            return vec![self.join(trimmed)];
        }

        let stem = trimmed.strip_suffix(extension).unwrap_or(trimmed);
        let mut out = Vec::with_capacity(1 + fallbacks.len());
        out.push(self.join(&format!("{stem}{extension}")));
        for fallback in fallbacks {
            out.push(self.join(&format!("{stem}{fallback}")));
        }
        out
    }

    pub fn resolve(&self, logical: &str, extension: &str) -> Result<PathBuf, AssetNotFound> {
        let tried = self.candidates(logical, extension);
        match tried.iter().find(|path| path.exists()) {
            Some(found) => Ok(found.clone()),
            None => Err(AssetNotFound {
                logical: logical.to_string(),
                tried,
            }),
        }
    }

    /// Same file, different extension (`Chair.psk` -> `Chair.uemodel`).
    pub fn sibling(path: &Path, extension: &str) -> PathBuf {
        path.with_extension(extension.trim_start_matches('.'))
    }

    fn join(&self, relative: &str) -> PathBuf {
        let mut path = self.root.clone();
        for part in relative.split(['/', '\\']).filter(|p| !p.is_empty()) {
            path.push(part);
        }
        normalize_path(&path)
    }
}

/// Lexically collapse `.` and `..` without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
