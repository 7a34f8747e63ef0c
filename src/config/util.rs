//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`
/// Returns the path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/static/icons/  ← start
/// /home/user/site/favipack.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
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
            None => return None, // Reached filesystem root
        }
    }
}

/// Parse size string (e.g., "10KB") to bytes
///
/// Unparseable or overflowing input yields 0, which validation rejects.
pub fn parse_size_string(s: &str) -> usize {
    let s = s.trim().to_uppercase();
    let (number, unit) = if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s.as_str(), 1)
    };

    number
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_mul(unit))
        .unwrap_or(0)
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_size_string() {
        assert_eq!(parse_size_string("0B"), 0);
        assert_eq!(parse_size_string("100B"), 100);
        assert_eq!(parse_size_string("10KB"), 10 * 1024);
        assert_eq!(parse_size_string("5MB"), 5 * 1024 * 1024);
        assert_eq!(parse_size_string("  5kb  "), 5 * 1024);
        assert_eq!(parse_size_string("2048"), 2048);
        assert_eq!(parse_size_string("invalid"), 0);
    }

    #[test]
    fn test_parse_size_string_overflow_is_zero() {
        assert_eq!(parse_size_string("18446744073709551MB"), 0);
        assert_eq!(parse_size_string(&format!("{}KB", usize::MAX)), 0);
        assert_eq!(parse_size_string("99999999999999999999999"), 0);
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("favipack.toml"), "").unwrap();

        let found = find_config_file(Path::new("favipack.toml"), &nested).unwrap();
        assert_eq!(found, temp.path().join("favipack.toml"));
    }

    #[test]
    fn test_find_config_file_missing() {
        let temp = TempDir::new().unwrap();
        let found = find_config_file(Path::new("does-not-exist-favipack.toml"), temp.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_find_config_file_absolute() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        assert!(find_config_file(&path, temp.path()).is_none());
        std::fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(&path, Path::new("/")), Some(path));
    }
}
