//! Command implementations.
//!
//! Every command returns whether its result blocks, so the binary can turn
//! a blocking verdict into a distinct exit code.

pub mod batch;
pub mod bias;
pub mod config;
pub mod conflicts;
pub mod coverage;
pub mod paths;
pub mod verify;

pub use self::batch::execute_batch;
pub use self::bias::execute_bias;
pub use self::config::execute_config;
pub use self::conflicts::execute_conflicts;
pub use self::coverage::execute_coverage;
pub use self::paths::execute_paths;
pub use self::verify::execute_verify;

use crate::error::{CliError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read and parse a JSON input file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CliError::NotFound(path.display().to_string()),
        _ => CliError::Io(e),
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        CliError::InvalidInput(format!("{}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use specgate_domain::Specification;
    use tempfile::TempDir;

    #[test]
    fn test_read_specifications() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("specs.json");
        fs::write(
            &path,
            r#"[{"category": "goals", "content": "Sell online", "confidence": 0.9}]"#,
        )
        .unwrap();

        let specs: Vec<Specification> = read_json(&path).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].category, "goals");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_json::<Vec<Specification>>(&dir.path().join("none.json")).unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{").unwrap();
        let err = read_json::<Vec<Specification>>(&path).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(ref msg) if msg.contains("broken.json")));
    }
}
