//! Filesystem path normalization.

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
///
/// # Example
/// ```ignore
/// use rsvg_batch::utils::path::normalize_path;
/// let abs = normalize_path(Path::new("./app/assets/logo.svg"));
/// ```
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.svg");
        assert_eq!(normalize_path(path), path);
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/file.svg");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("relative/path/file.svg"));
    }
}
