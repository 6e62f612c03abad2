use std::path::Path;

use crate::foundation::error::{SlitscanError, SlitscanResult};
use crate::foundation::types::FrameRef;

/// Enumerate the input frames of `dir` in their temporal order.
///
/// Non-directory entries whose name matches `pattern` (everything when
/// `pattern` is absent or empty) become [`FrameRef`]s. Entries are sorted
/// lexicographically by file name before indices are assigned: `read_dir`
/// order is platform-arbitrary, and the resulting index defines both the
/// temporal order of the sequence and the destination column of each
/// frame's pixels, so the order must be stable.
pub fn discover_frames(dir: &Path, pattern: Option<&str>) -> SlitscanResult<Vec<FrameRef>> {
    let matcher = match pattern {
        Some(p) if !p.is_empty() => {
            Some(
                glob::Pattern::new(p).map_err(|source| SlitscanError::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })?,
            )
        }
        _ => None,
    };

    let unreadable = |source| SlitscanError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut matched = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        if entry.file_type().map_err(unreadable)?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if matcher.as_ref().is_some_and(|m| !m.matches(&name)) {
            continue;
        }
        matched.push((name, entry.path()));
    }

    matched.sort();
    tracing::info!("{} files found", matched.len());

    Ok(matched
        .into_iter()
        .enumerate()
        .map(|(index, (_, path))| FrameRef { index, path })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/frames/locate.rs"]
mod tests;
