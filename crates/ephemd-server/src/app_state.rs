//! Shared application state for the ephemd server.

use std::sync::Arc;
use std::time::Duration;

use ephemd_core::error::Result;

use crate::config::AppConfig;
use crate::obs::metrics::ServerMetrics;
use crate::probe::ReadinessProbe;
use crate::store::TaskStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: AppConfig,
    store: Arc<TaskStore>,
    metrics: ServerMetrics,
    probes: Vec<Arc<dyn ReadinessProbe>>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: AppConfig) -> Result<Self> {
        Self::with_probes(cfg, Vec::new())
    }

    /// Same, with readiness dependency probes registered for
    /// `/health/ready`. The demo deployment registers none.
    pub fn with_probes(cfg: AppConfig, probes: Vec<Arc<dyn ReadinessProbe>>) -> Result<Self> {
        cfg.validate()?;

        let store = Arc::new(TaskStore::new(Duration::from_millis(
            cfg.tasks.processing_delay_ms,
        )));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                metrics: ServerMetrics::default(),
                probes,
            }),
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &Arc<TaskStore> {
        &self.inner.store
    }

    pub fn metrics(&self) -> &ServerMetrics {
        &self.inner.metrics
    }

    pub fn probes(&self) -> &[Arc<dyn ReadinessProbe>] {
        &self.inner.probes
    }
}
