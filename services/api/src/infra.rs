use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use admitpath::error::AppError;
use admitpath::workflows::admissions::{InMemoryDirectory, PlatformSnapshot};
use admitpath::workflows::snapshot::SnapshotImporter;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::demo::demo_snapshot;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load a CSV export when a directory is given, the demo dataset otherwise.
pub(crate) fn load_snapshot(snapshot_dir: Option<&Path>) -> Result<PlatformSnapshot, AppError> {
    match snapshot_dir {
        Some(dir) => Ok(SnapshotImporter::from_dir(dir)?),
        None => Ok(demo_snapshot()),
    }
}

pub(crate) fn directory_from(snapshot: PlatformSnapshot) -> Arc<InMemoryDirectory> {
    Arc::new(InMemoryDirectory::new(snapshot))
}
