//! Version marker persistence.
//!
//! The upstream database publishes an opaque version token. A run is
//! skipped when the persisted token matches the latest one byte for byte;
//! the token is only written back after a fully successful run, so a
//! failed run retries from scratch next time.

use std::fs;
use std::io;
use std::path::Path;

/// File name of the persisted token inside the output directory
pub const VERSION_FILE: &str = "version";

/// The token persisted by the last successful run, if any
pub fn current(output_dir: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(output_dir.join(VERSION_FILE)) {
        Ok(token) => Ok(Some(token)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Byte-for-byte comparison; any difference at all means re-normalize
pub fn is_current(persisted: Option<&str>, latest: &str) -> bool {
    persisted == Some(latest)
}

/// Persist the token after a successful run
pub fn persist(output_dir: &Path, token: &str) -> io::Result<()> {
    fs::write(output_dir.join(VERSION_FILE), token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_marker_means_stale() {
        let dir = tempfile::tempdir().unwrap();
        let persisted = current(dir.path()).unwrap();
        assert_eq!(persisted, None);
        assert!(!is_current(persisted.as_deref(), "{\"JP\":1}"));
    }

    #[test]
    fn test_persist_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        persist(dir.path(), "{\"JP\":1}").unwrap();
        let persisted = current(dir.path()).unwrap();
        assert!(is_current(persisted.as_deref(), "{\"JP\":1}"));
        assert!(!is_current(persisted.as_deref(), "{\"JP\":2}"));
    }

    #[test]
    fn test_comparison_is_exact() {
        // Whitespace or ordering differences count as updates
        assert!(!is_current(Some("{\"JP\": 1}"), "{\"JP\":1}"));
    }
}
