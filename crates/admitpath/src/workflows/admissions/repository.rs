use std::sync::Mutex;

use super::domain::{
    ApplicationRecord, ApsSubmissionRecord, ConsultationRecord, DocumentRecord,
    EligibilityCheckRecord, MessageRecord, PlatformSnapshot, ProfileRecord, UserRecord,
};

/// Read access to the hosted datastore, one method per collection. Every
/// collection is required except `eligibility_checks`, which callers treat
/// as best-effort.
pub trait DirectoryRepository: Send + Sync {
    fn users(&self) -> Result<Vec<UserRecord>, RepositoryError>;
    fn profiles(&self) -> Result<Vec<ProfileRecord>, RepositoryError>;
    fn documents(&self) -> Result<Vec<DocumentRecord>, RepositoryError>;
    fn applications(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn consultations(&self) -> Result<Vec<ConsultationRecord>, RepositoryError>;
    fn messages(&self) -> Result<Vec<MessageRecord>, RepositoryError>;
    fn aps_submissions(&self) -> Result<Vec<ApsSubmissionRecord>, RepositoryError>;
    fn eligibility_checks(&self) -> Result<Vec<EligibilityCheckRecord>, RepositoryError>;
    fn record_eligibility_check(
        &self,
        record: EligibilityCheckRecord,
    ) -> Result<(), RepositoryError>;
}

/// Error enumeration for directory failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("collection '{0}' is not available")]
    Missing(&'static str),
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Snapshot-backed repository used by the demo server, the CLI, and tests.
pub struct InMemoryDirectory {
    snapshot: Mutex<PlatformSnapshot>,
}

impl InMemoryDirectory {
    pub fn new(snapshot: PlatformSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new(PlatformSnapshot::default())
    }
}

impl DirectoryRepository for InMemoryDirectory {
    fn users(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        Ok(self.lock().users.clone())
    }

    fn profiles(&self) -> Result<Vec<ProfileRecord>, RepositoryError> {
        Ok(self.lock().profiles.clone())
    }

    fn documents(&self) -> Result<Vec<DocumentRecord>, RepositoryError> {
        Ok(self.lock().documents.clone())
    }

    fn applications(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self.lock().applications.clone())
    }

    fn consultations(&self) -> Result<Vec<ConsultationRecord>, RepositoryError> {
        Ok(self.lock().consultations.clone())
    }

    fn messages(&self) -> Result<Vec<MessageRecord>, RepositoryError> {
        Ok(self.lock().messages.clone())
    }

    fn aps_submissions(&self) -> Result<Vec<ApsSubmissionRecord>, RepositoryError> {
        Ok(self.lock().aps_submissions.clone())
    }

    fn eligibility_checks(&self) -> Result<Vec<EligibilityCheckRecord>, RepositoryError> {
        self.lock()
            .eligibility_checks
            .clone()
            .ok_or(RepositoryError::Missing("eligibility_checks"))
    }

    fn record_eligibility_check(
        &self,
        record: EligibilityCheckRecord,
    ) -> Result<(), RepositoryError> {
        self.lock()
            .eligibility_checks
            .get_or_insert_with(Vec::new)
            .push(record);
        Ok(())
    }
}

impl InMemoryDirectory {
    fn lock(&self) -> std::sync::MutexGuard<'_, PlatformSnapshot> {
        self.snapshot.lock().expect("snapshot mutex poisoned")
    }
}
