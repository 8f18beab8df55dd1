//! Offline snapshot ingestion: rebuild a [`PlatformSnapshot`] from the CSV
//! exports the hosted datastore produces, one file per collection.

mod parser;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::workflows::admissions::domain::PlatformSnapshot;

/// Import failure, always naming the offending export file.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotImportError {
    #[error("failed to read export '{file}': {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV data in export '{file}': {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}

pub struct SnapshotImporter;

impl SnapshotImporter {
    /// Build a snapshot from a directory of exports. Every collection file
    /// is required except `eligibility_checks.csv`, which may be absent.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<PlatformSnapshot, SnapshotImportError> {
        let dir = dir.as_ref();

        let eligibility_path = dir.join("eligibility_checks.csv");
        let eligibility_checks = if eligibility_path.exists() {
            Some(load_file(dir, "eligibility_checks.csv")?)
        } else {
            None
        };

        Ok(PlatformSnapshot {
            users: load_file(dir, "users.csv")?,
            profiles: load_file(dir, "profiles.csv")?,
            documents: load_file(dir, "documents.csv")?,
            applications: load_file(dir, "applications.csv")?,
            consultations: load_file(dir, "consultations.csv")?,
            messages: load_file(dir, "messages.csv")?,
            aps_submissions: load_file(dir, "aps_submissions.csv")?,
            eligibility_checks,
        })
    }
}

fn load_file<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>, SnapshotImportError> {
    let handle = std::fs::File::open(dir.join(file)).map_err(|source| SnapshotImportError::Io {
        file: file.to_string(),
        source,
    })?;

    parser::parse_records(handle).map_err(|source| SnapshotImportError::Csv {
        file: file.to_string(),
        source,
    })
}
