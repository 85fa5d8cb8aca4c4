//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/app/assets/  ← cwd
/// /home/user/site/rsvg.toml    ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(config_name, &cwd)
}

/// Same as [`find_config_file`], starting from an explicit directory.
pub fn find_config_file_from(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_parent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rsvg.toml"), "").unwrap();
        let nested = dir.path().join("app/assets");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_file_from(Path::new("rsvg.toml"), &nested).unwrap();
        assert_eq!(found, dir.path().join("rsvg.toml"));
    }

    #[test]
    fn test_find_absolute() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert!(find_config_file_from(&path, dir.path()).is_none());

        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file_from(&path, Path::new("/")), Some(path));
    }

    #[test]
    fn test_not_found() {
        let dir = TempDir::new().unwrap();
        let found = find_config_file_from(Path::new("no-such-config-file.toml"), dir.path());
        assert!(found.is_none());
    }
}
