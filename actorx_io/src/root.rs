use std::{
    fs,
    path::{Path, PathBuf},
};

/// Marker file extension identifying an exported game directory.
pub const ROOT_MARKER_EXTENSION: &str = "root";

/// Modern exports keep assets below this child of the marked directory.
pub const CONTENT_DIR: &str = "Content";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootLayout {
    /// Assets live directly in the marked directory.
    Legacy,
    /// Assets live in `<marked>/Content`.
    Modern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRoot {
    pub path: PathBuf,
    pub layout: RootLayout,
}

/// Walk up from the directory holding `input` looking for a directory with
/// exactly one `*.root` marker file.
pub fn find_game_root(input: &Path) -> Option<GameRoot> {
    let absolute = if input.is_absolute() {
        input.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(input)
    };

    let mut current = absolute.parent();
    while let Some(dir) = current {
        if count_root_markers(dir) == 1 {
            log::info!("found game root {}", dir.display());
            let content = dir.join(CONTENT_DIR);
            if content.is_dir() {
                log::info!("game root uses the Content layout");
                return Some(GameRoot {
                    path: content,
                    layout: RootLayout::Modern,
                });
            }
            return Some(GameRoot {
                path: dir.to_path_buf(),
                layout: RootLayout::Legacy,
            });
        }
        current = dir.parent();
    }

    None
}

/// Unreadable directories count as having no markers.
fn count_root_markers(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let hidden = p
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'));
            !hidden
                && p.extension()
                    .is_some_and(|ext| ext == ROOT_MARKER_EXTENSION)
        })
        .count()
}
