use std::fs;
use std::path::Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::errors::StatusError;

/// Persisted run status, loaded at run start and written back at run end
///
/// Unknown fields found in the file are kept in 'extra' so that the
/// wholesale rewrite never drops auxiliary data written by other versions.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RunStatus {
    #[serde(default)]
    pub extraction_broken: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_success: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

/// Loads the run status from file, defaulting to a healthy status when
/// no file exists yet
///
/// # Arguments
///
/// * 'status_file' - path to the status file
pub fn load_status(status_file: &str) -> Result<RunStatus, StatusError> {
    let path = Path::new(status_file);

    if path.exists() {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    } else {
        Ok(RunStatus::default())
    }
}

/// Saves the run status to file, overwriting any previous content
///
/// # Arguments
///
/// * 'status_file' - path to the status file
/// * 'status' - the status to save
pub fn save_status(status_file: &str, status: &RunStatus) -> Result<(), StatusError> {
    let json = serde_json::to_string_pretty(status)?;
    fs::write(status_file, json)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_path(dir: &tempfile::TempDir) -> String {
        dir.path().join("status.json").to_str().unwrap().to_string()
    }

    #[test]
    fn missing_file_defaults_to_healthy() {
        let dir = tempfile::tempdir().unwrap();

        let status = load_status(&status_path(&dir)).unwrap();

        assert!(!status.extraction_broken);
        assert!(status.last_success.is_none());
    }

    #[test]
    fn round_trip_preserves_broken_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = status_path(&dir);

        let mut status = RunStatus::default();
        status.extraction_broken = true;
        status.last_error = Some("HTTP 503".to_string());
        save_status(&path, &status).unwrap();

        let reloaded = load_status(&path).unwrap();
        assert_eq!(reloaded, status);
    }

    #[test]
    fn unknown_fields_survive_the_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = status_path(&dir);
        fs::write(&path, r#"{"extraction_broken": false, "schema_rev": 3}"#).unwrap();

        let status = load_status(&path).unwrap();
        save_status(&path, &status).unwrap();

        let reloaded = load_status(&path).unwrap();
        assert_eq!(reloaded.extra.get("schema_rev"), Some(&Value::from(3)));
    }
}
